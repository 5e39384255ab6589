//! Resource-reference reconciliation
//!
//! A prior generation of the fix script registered `GoogleService-Info.plist`
//! with a group-nested path (`Runner/GoogleService-Info.plist`), which made
//! Xcode resolve the file to `ios/Runner/Runner/...` and fail the build.
//! [`reconcile`] repairs any such project: it removes every nested-path
//! reference to the tracked file (from its group and from every target's
//! resources build phase), ensures exactly one reference with the bare
//! filename exists in the group, and ensures the named target bundles it
//! exactly once.
//!
//! The routine is idempotent on the end state: a second run finds nothing to
//! do and reports no change.

use crate::document::{PbxDocument, PbxGroup};
use owo_colors::OwoColorize;
use pbxfix_core::error::{Error, Result};

/// The resource to keep singly referenced, and where
#[derive(Debug, Clone)]
pub struct TrackedResource {
    /// Group path from the main group, `/`-separated
    pub group: String,
    /// Target whose resources build phase must bundle the file
    pub target: String,
    /// Bare filename, no directory separators
    pub file_name: String,
}

/// What a reconciliation run changed
#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Paths of references removed from the group (nested duplicates and
    /// surplus exact references)
    pub removed_paths: Vec<String>,
    /// A new file reference was created in the group
    pub created_reference: bool,
    /// The reference was added to the target's resources build phase
    pub attached_to_phase: bool,
    /// Surplus build files dropped from the resources build phase
    pub deduped_build_files: usize,
}

impl ReconcileReport {
    /// Whether the run mutated the document at all
    pub fn changed(&self) -> bool {
        !self.removed_paths.is_empty()
            || self.created_reference
            || self.attached_to_phase
            || self.deduped_build_files > 0
    }
}

/// Read-only view of a tracked resource's health in the project
#[derive(Debug)]
pub struct ResourceStatus {
    /// Nested-path references to the tracked file still in the group
    pub invalid_paths: Vec<String>,
    /// References in the group whose path is exactly the tracked filename
    pub valid_references: usize,
    /// Build files in the target's resources phase pointing at an exact
    /// reference
    pub phase_entries: usize,
}

impl ResourceStatus {
    pub fn is_clean(&self) -> bool {
        self.invalid_paths.is_empty() && self.valid_references == 1 && self.phase_entries == 1
    }

    pub fn print(&self, file_name: &str) {
        println!("{}", format!("Status for {}", file_name).bold());
        println!();

        if self.invalid_paths.is_empty() {
            println!("  {} No nested-path references", "✓".green());
        } else {
            println!(
                "  {} Nested-path references: {}",
                "⚠".yellow(),
                self.invalid_paths.len()
            );
            for path in &self.invalid_paths {
                println!("      {}", path);
            }
        }

        match self.valid_references {
            1 => println!("  {} Exactly one group reference", "✓".green()),
            0 => println!("  {} No group reference", "⚠".yellow()),
            n => println!("  {} Duplicate group references: {}", "⚠".yellow(), n),
        }

        match self.phase_entries {
            1 => println!("  {} Bundled once in resources phase", "✓".green()),
            0 => println!("  {} Not in resources build phase", "⚠".yellow()),
            n => println!("  {} Bundled {} times in resources phase", "⚠".yellow(), n),
        }
    }
}

/// Resolve the group, target and resources build phase a reconciliation
/// needs. All three lookups happen before any mutation, so a failed lookup
/// leaves the document untouched.
fn resolve(doc: &PbxDocument, resource: &TrackedResource) -> Result<(PbxGroup, String)> {
    let group = doc
        .find_group(&resource.group)
        .ok_or_else(|| Error::GroupNotFound(resource.group.clone()))?;
    let target = doc
        .find_target(&resource.target)
        .ok_or_else(|| Error::TargetNotFound(resource.target.clone()))?;
    let phase = doc
        .resources_phase(&target)
        .ok_or_else(|| Error::ResourcesPhaseNotFound(resource.target.clone()))?;
    Ok((group, phase))
}

/// Bring the document to the reconciled end state. Persistence is the
/// caller's decision; check [`ReconcileReport::changed`] or
/// [`PbxDocument::is_dirty`].
pub fn reconcile(doc: &mut PbxDocument, resource: &TrackedResource) -> Result<ReconcileReport> {
    let (group, phase) = resolve(doc, resource)?;

    let mut report = ReconcileReport::default();

    // Pass 1: group references. Keep the first exact reference, detach
    // everything else that resolves to the tracked file.
    let mut keeper: Option<String> = None;
    for file_ref in doc.files_in_group(&group) {
        if file_ref.path == resource.file_name {
            if keeper.is_none() {
                keeper = Some(file_ref.id);
            } else {
                doc.detach_file_reference(&file_ref.id);
                report.removed_paths.push(file_ref.path);
            }
        } else if is_nested_reference(&file_ref.path, &resource.file_name) {
            doc.detach_file_reference(&file_ref.id);
            report.removed_paths.push(file_ref.path);
        }
    }

    let ref_id = match keeper {
        Some(id) => id,
        None => {
            report.created_reference = true;
            doc.add_file_reference(&group.id, &resource.file_name)?
        }
    };

    // Pass 2: resources build phase membership, exactly once.
    let entries: Vec<String> = doc
        .phase_build_files(&phase)
        .into_iter()
        .filter(|bf| bf.file_ref == ref_id)
        .map(|bf| bf.id)
        .collect();
    match entries.len() {
        0 => {
            doc.add_resource_build_file(&phase, &ref_id, &resource.file_name)?;
            report.attached_to_phase = true;
        }
        1 => {}
        n => {
            for bf_id in &entries[1..] {
                doc.remove_build_file(bf_id);
            }
            report.deduped_build_files = n - 1;
        }
    }

    Ok(report)
}

/// Report the tracked resource's state without mutating anything
pub fn inspect(doc: &PbxDocument, resource: &TrackedResource) -> Result<ResourceStatus> {
    let (group, phase) = resolve(doc, resource)?;

    let mut invalid_paths = Vec::new();
    let mut valid_ids = Vec::new();
    for file_ref in doc.files_in_group(&group) {
        if file_ref.path == resource.file_name {
            valid_ids.push(file_ref.id);
        } else if is_nested_reference(&file_ref.path, &resource.file_name) {
            invalid_paths.push(file_ref.path);
        }
    }

    let phase_entries = doc
        .phase_build_files(&phase)
        .iter()
        .filter(|bf| valid_ids.contains(&bf.file_ref))
        .count();

    Ok(ResourceStatus {
        invalid_paths,
        valid_references: valid_ids.len(),
        phase_entries,
    })
}

/// A corrupted reference from a prior buggy run: the path carries directory
/// separators but still names the tracked file
fn is_nested_reference(path: &str, file_name: &str) -> bool {
    path.contains('/') && path.rsplit('/').next() == Some(file_name)
}
