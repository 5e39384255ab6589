//! pbxfix CLI
//!
//! Ensures a tracked resource file (by default `GoogleService-Info.plist`)
//! is correctly and singly referenced in an Xcode project: one bare-path
//! file reference in the configured group, bundled exactly once by the
//! configured target's resources build phase, with any nested-path
//! duplicates from earlier buggy runs cleaned out.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pbxfix_cli::output::{format_count, Status};
use pbxfix_core::config::Config;
use pbxfix_core::error::exit_codes;
use pbxfix_xcodeproj::document::PbxDocument;
use pbxfix_xcodeproj::reconcile::{inspect, reconcile, TrackedResource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pbxfix")]
#[command(about = "Keep a resource file singly referenced in an Xcode project")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Repair the project so the tracked file is referenced exactly once
    Reconcile {
        #[command(flatten)]
        selection: Selection,

        /// Report what would change without writing the project
        #[arg(long)]
        dry_run: bool,
    },

    /// Report the tracked file's reference state without modifying anything
    Status {
        #[command(flatten)]
        selection: Selection,
    },
}

/// Flags overriding the config file, which overrides built-in defaults
#[derive(Args)]
struct Selection {
    /// Path to the .xcodeproj bundle
    #[arg(long)]
    project: Option<PathBuf>,

    /// Group path from the main group, /-separated
    #[arg(long)]
    group: Option<String>,

    /// Target whose resources build phase must bundle the file
    #[arg(long)]
    target: Option<String>,

    /// Tracked resource filename
    #[arg(long)]
    file: Option<String>,
}

impl Selection {
    fn apply(self, config: &Config) -> (PathBuf, TrackedResource) {
        let defaults = &config.schema.project;
        (
            self.project.unwrap_or_else(|| defaults.path.clone()),
            TrackedResource {
                group: self.group.unwrap_or_else(|| defaults.group.clone()),
                target: self.target.unwrap_or_else(|| defaults.target.clone()),
                file_name: self.file.unwrap_or_else(|| defaults.file.clone()),
            },
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = match Config::load(cli.config.as_deref().and_then(|p| p.to_str())) {
        Ok(c) => c,
        Err(e) => {
            Status::error(&format!("Config error: {}", e));
            std::process::exit(exit_codes::CONFIG_ERROR);
        }
    };

    let exit_code = match cli.command {
        Commands::Reconcile { selection, dry_run } => {
            let (project, resource) = selection.apply(&config);
            run_reconcile(&project, &resource, dry_run, cli.quiet)
        }
        Commands::Status { selection } => {
            let (project, resource) = selection.apply(&config);
            run_status(&project, &resource)
        }
    };

    std::process::exit(exit_code);
}

fn run_reconcile(
    project: &PathBuf,
    resource: &TrackedResource,
    dry_run: bool,
    quiet: bool,
) -> i32 {
    if !quiet {
        Status::info(&format!(
            "Checking {} for '{}'...",
            project.display(),
            resource.file_name
        ));
    }

    let mut doc = match PbxDocument::open(project) {
        Ok(d) => d,
        Err(e) => {
            Status::error(&format!("Failed to open project: {}", e));
            return e.exit_code();
        }
    };

    let report = match reconcile(&mut doc, resource) {
        Ok(r) => r,
        Err(e) => {
            Status::error(&format!("Reconcile failed: {}", e));
            return e.exit_code();
        }
    };

    for path in &report.removed_paths {
        Status::warning(&format!("Removed invalid reference '{}'", path));
    }
    if report.deduped_build_files > 0 {
        Status::warning(&format!(
            "Removed {} from the resources build phase",
            format_count(
                report.deduped_build_files,
                "duplicate entry",
                "duplicate entries"
            )
        ));
    }
    if report.created_reference && !quiet {
        Status::info(&format!(
            "Added '{}' to group '{}'",
            resource.file_name, resource.group
        ));
    }
    if report.attached_to_phase && !quiet {
        Status::info(&format!(
            "Registered '{}' in target '{}' resources",
            resource.file_name, resource.target
        ));
    }

    if !report.changed() {
        if !quiet {
            Status::success("Project already consistent, nothing to do");
        }
        return exit_codes::SUCCESS;
    }

    if dry_run {
        Status::warning("Dry run: changes not written");
        return exit_codes::SUCCESS;
    }

    match doc.save() {
        Ok(()) => {
            if !quiet {
                Status::success("Project updated");
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&format!("Failed to save project: {}", e));
            e.exit_code()
        }
    }
}

fn run_status(project: &PathBuf, resource: &TrackedResource) -> i32 {
    let doc = match PbxDocument::open(project) {
        Ok(d) => d,
        Err(e) => {
            Status::error(&format!("Failed to open project: {}", e));
            return e.exit_code();
        }
    };

    match inspect(&doc, resource) {
        Ok(status) => {
            status.print(&resource.file_name);
            println!();
            if status.is_clean() {
                Status::success("Project is clean");
            } else {
                Status::warning("Project needs reconciling. Run: pbxfix reconcile");
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&format!("Status failed: {}", e));
            e.exit_code()
        }
    }
}
