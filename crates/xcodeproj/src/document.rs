//! `project.pbxproj` document model
//!
//! Xcode's project manifest is an old-style property list. A full
//! parse/serialize round trip would churn every line of the file, so this
//! model works the way Xcode users expect a surgical tool to: objects are
//! located with regular expressions over the original text, and mutations
//! are targeted line insertions and removals. Everything the tool does not
//! touch survives byte-for-byte.
//!
//! Object identifiers are 24 uppercase hex digits. Definitions for
//! `PBXBuildFile` and `PBXFileReference` are single lines; container objects
//! (groups, targets, build phases) are multi-line entries whose membership
//! lists hold one id per line.

use pbxfix_core::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A 24-digit uppercase hex object id
const HEX_ID: &str = "[A-F0-9]{24}";

/// Start of an object definition: id, optional comment, `= {`
const ENTRY_START: &str = r"(?m)^[ \t]*([A-F0-9]{24})(?: /\* ([^*]+) \*/)? = \{";

/// A loaded `project.pbxproj`
#[derive(Debug)]
pub struct PbxDocument {
    pbxproj_path: PathBuf,
    content: String,
    dirty: bool,
}

/// Group node in the project's file tree
#[derive(Debug, Clone)]
pub struct PbxGroup {
    pub id: String,
    pub name: String,
    pub children: Vec<String>,
}

/// File reference entry
#[derive(Debug, Clone)]
pub struct FileReference {
    pub id: String,
    pub path: String,
}

/// Build file entry linking a file reference into a build phase
#[derive(Debug, Clone)]
pub struct BuildFile {
    pub id: String,
    pub file_ref: String,
}

/// Native target with its build phase ids
#[derive(Debug, Clone)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub build_phases: Vec<String>,
}

/// Parsed object entry within a section
struct Entry {
    id: String,
    comment: Option<String>,
    body: String,
}

impl PbxDocument {
    /// Open the manifest inside an `.xcodeproj` bundle
    pub fn open(project_path: &Path) -> Result<Self> {
        let pbxproj_path = project_path.join("project.pbxproj");
        if !pbxproj_path.exists() {
            return Err(Error::ProjectNotFound(pbxproj_path));
        }

        let content = fs::read_to_string(&pbxproj_path)?;
        Ok(Self {
            pbxproj_path,
            content,
            dirty: false,
        })
    }

    /// Whether any mutation touched the document since open/save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current manifest text
    pub fn contents(&self) -> &str {
        &self.content
    }

    /// Persist the manifest. The write goes to a sibling temp file first and
    /// is renamed into place, so a failed write never truncates the project.
    pub fn save(&mut self) -> Result<()> {
        let tmp = self.pbxproj_path.with_extension("pbxproj.tmp");
        fs::write(&tmp, &self.content)?;
        fs::rename(&tmp, &self.pbxproj_path)?;
        self.dirty = false;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// All groups in the project
    pub fn groups(&self) -> Vec<PbxGroup> {
        self.entries("PBXGroup")
            .into_iter()
            .map(|entry| {
                let name = attr(&entry.body, "name")
                    .or_else(|| attr(&entry.body, "path"))
                    .or(entry.comment)
                    .unwrap_or_default();
                PbxGroup {
                    id: entry.id,
                    name,
                    children: list_ids(&entry.body, "children"),
                }
            })
            .collect()
    }

    /// Resolve a group by a `/`-separated path walked from the main group
    pub fn find_group(&self, group_path: &str) -> Option<PbxGroup> {
        let groups = self.groups();
        let main_re = Regex::new(&format!(r"mainGroup = ({HEX_ID})")).unwrap();
        let main_id = main_re.captures(&self.content)?[1].to_string();

        let mut current = groups.iter().find(|g| g.id == main_id)?;
        for segment in group_path.split('/') {
            current = current
                .children
                .iter()
                .filter_map(|child| groups.iter().find(|g| &g.id == child))
                .find(|g| g.name == segment)?;
        }
        Some(current.clone())
    }

    /// Look up a file reference definition by id
    pub fn file_reference(&self, id: &str) -> Option<FileReference> {
        let (start, end) = self.section_bounds("PBXFileReference")?;
        let body = &self.content[start..end];
        let re = Regex::new(&format!(
            r"(?m)^[ \t]*{id}(?: /\* [^*]* \*/)? = \{{isa = PBXFileReference;([^\n]*)\}};"
        ))
        .unwrap();
        let caps = re.captures(body)?;
        let path = attr(&caps[1], "path")?;
        Some(FileReference {
            id: id.to_string(),
            path,
        })
    }

    /// File references that are direct children of a group
    pub fn files_in_group(&self, group: &PbxGroup) -> Vec<FileReference> {
        group
            .children
            .iter()
            .filter_map(|id| self.file_reference(id))
            .collect()
    }

    /// All native targets
    pub fn targets(&self) -> Vec<Target> {
        self.entries("PBXNativeTarget")
            .into_iter()
            .map(|entry| {
                let name = attr(&entry.body, "name")
                    .or(entry.comment)
                    .unwrap_or_default();
                Target {
                    id: entry.id,
                    name,
                    build_phases: list_ids(&entry.body, "buildPhases"),
                }
            })
            .collect()
    }

    /// Find target by exact name
    pub fn find_target(&self, name: &str) -> Option<Target> {
        self.targets().into_iter().find(|t| t.name == name)
    }

    /// The resources build phase of a target, if it has one
    pub fn resources_phase(&self, target: &Target) -> Option<String> {
        let phase_ids: Vec<String> = self
            .entries("PBXResourcesBuildPhase")
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        target
            .build_phases
            .iter()
            .find(|p| phase_ids.contains(p))
            .cloned()
    }

    /// Build files listed in a resources build phase
    pub fn phase_build_files(&self, phase_id: &str) -> Vec<BuildFile> {
        self.entries("PBXResourcesBuildPhase")
            .into_iter()
            .find(|entry| entry.id == phase_id)
            .map(|entry| {
                list_ids(&entry.body, "files")
                    .iter()
                    .filter_map(|id| self.build_file(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Look up a build file definition by id
    fn build_file(&self, id: &str) -> Option<BuildFile> {
        let (start, end) = self.section_bounds("PBXBuildFile")?;
        let body = &self.content[start..end];
        let re = Regex::new(&format!(
            r"(?m)^[ \t]*{id}(?: /\* [^*]* \*/)? = \{{isa = PBXBuildFile; fileRef = ({HEX_ID})"
        ))
        .unwrap();
        let caps = re.captures(body)?;
        Some(BuildFile {
            id: id.to_string(),
            file_ref: caps[1].to_string(),
        })
    }

    /// Ids of all build files pointing at a file reference
    pub fn build_files_for_ref(&self, ref_id: &str) -> Vec<String> {
        let Some((start, end)) = self.section_bounds("PBXBuildFile") else {
            return Vec::new();
        };
        let body = &self.content[start..end];
        let re = Regex::new(&format!(
            r"(?m)^[ \t]*({HEX_ID})(?: /\* [^*]* \*/)? = \{{isa = PBXBuildFile; fileRef = {ref_id}\b"
        ))
        .unwrap();
        re.captures_iter(body).map(|c| c[1].to_string()).collect()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Create a file reference in a group. The stored path is relative to
    /// the group, so a resource living in the group's own folder gets the
    /// bare filename.
    pub fn add_file_reference(&mut self, group_id: &str, file_name: &str) -> Result<String> {
        let id = self.fresh_id();
        let definition = format!(
            "\t\t{id} /* {file_name} */ = {{isa = PBXFileReference; lastKnownFileType = {}; path = {}; sourceTree = \"<group>\"; }};\n",
            file_type_for(file_name),
            quote_for_pbx(file_name),
        );
        self.insert_before_section_end("PBXFileReference", &definition)?;
        self.insert_list_entry(
            group_id,
            "children",
            &format!("\t\t\t\t{id} /* {file_name} */,\n"),
        )?;
        self.dirty = true;
        Ok(id)
    }

    /// Create a build file for a reference and link it into a resources
    /// build phase
    pub fn add_resource_build_file(
        &mut self,
        phase_id: &str,
        ref_id: &str,
        file_name: &str,
    ) -> Result<String> {
        let id = self.fresh_id();
        let definition = format!(
            "\t\t{id} /* {file_name} in Resources */ = {{isa = PBXBuildFile; fileRef = {ref_id} /* {file_name} */; }};\n"
        );
        self.insert_before_section_end("PBXBuildFile", &definition)?;
        self.insert_list_entry(
            phase_id,
            "files",
            &format!("\t\t\t\t{id} /* {file_name} in Resources */,\n"),
        )?;
        self.dirty = true;
        Ok(id)
    }

    /// Remove a file reference everywhere: its build files (definitions and
    /// phase memberships), its group memberships, then its own definition.
    /// Dropping only the group membership would leave the build phases
    /// bundling a dangling reference.
    pub fn detach_file_reference(&mut self, ref_id: &str) {
        for bf_id in self.build_files_for_ref(ref_id) {
            self.remove_build_file(&bf_id);
        }
        self.remove_list_entries(ref_id);
        self.remove_definition(ref_id);
    }

    /// Remove a build file definition and every list membership it has
    pub fn remove_build_file(&mut self, bf_id: &str) {
        self.remove_definition(bf_id);
        self.remove_list_entries(bf_id);
    }

    /// Remove a single-line object definition
    fn remove_definition(&mut self, id: &str) {
        let re = Regex::new(&format!(r"(?m)^[ \t]*{id}(?: /\* [^*]* \*/)? = \{{[^\n]*\n")).unwrap();
        self.replace_all(&re);
    }

    /// Remove every membership-list line for an id (group children, build
    /// phase files)
    fn remove_list_entries(&mut self, id: &str) {
        let re = Regex::new(&format!(r"(?m)^[ \t]*{id}(?: /\* [^*]* \*/)?,[ \t]*\n")).unwrap();
        self.replace_all(&re);
    }

    fn replace_all(&mut self, re: &Regex) {
        let updated = re.replace_all(&self.content, "");
        if updated.len() != self.content.len() {
            self.content = updated.into_owned();
            self.dirty = true;
        }
    }

    /// Insert a definition line just before a section's end marker
    fn insert_before_section_end(&mut self, section: &str, line: &str) -> Result<()> {
        let marker = format!("/* End {section} section */");
        let pos = self
            .content
            .find(&marker)
            .ok_or_else(|| Error::Malformed(format!("missing {section} section")))?;
        let line_start = self.content[..pos].rfind('\n').map(|p| p + 1).unwrap_or(0);
        self.content.insert_str(line_start, line);
        Ok(())
    }

    /// Insert a membership line at the head of an object's list attribute
    fn insert_list_entry(&mut self, owner_id: &str, key: &str, line: &str) -> Result<()> {
        let owner_re =
            Regex::new(&format!(r"(?m)^[ \t]*{owner_id}(?: /\* [^*]* \*/)? = \{{")).unwrap();
        let owner = owner_re
            .find(&self.content)
            .ok_or_else(|| Error::Malformed(format!("object {owner_id} not found")))?;

        // search only up to the next object definition, so an owner missing
        // the list errors instead of splicing into a later object's list
        let next_re = Regex::new(ENTRY_START).unwrap();
        let owner_end = next_re
            .find_at(&self.content, owner.end())
            .map(|m| m.start())
            .unwrap_or(self.content.len());

        let list_open = format!("{key} = (");
        let rel = self.content[owner.end()..owner_end]
            .find(&list_open)
            .ok_or_else(|| Error::Malformed(format!("object {owner_id} has no {key} list")))?;
        let after_open = owner.end() + rel + list_open.len();
        let newline = self.content[after_open..]
            .find('\n')
            .ok_or_else(|| Error::Malformed(format!("unterminated {key} list in {owner_id}")))?;

        self.content.insert_str(after_open + newline + 1, line);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Byte range of a `/* Begin X section */ ... /* End X section */` block
    fn section_bounds(&self, section: &str) -> Option<(usize, usize)> {
        let begin = format!("/* Begin {section} section */");
        let end = format!("/* End {section} section */");
        let start = self.content.find(&begin)? + begin.len();
        let stop = self.content[start..].find(&end)? + start;
        Some((start, stop))
    }

    /// Parse a section into its object entries. Each entry body runs from
    /// its definition line to the start of the next entry, which bounds the
    /// attribute searches below.
    fn entries(&self, section: &str) -> Vec<Entry> {
        let Some((start, stop)) = self.section_bounds(section) else {
            return Vec::new();
        };
        let body = &self.content[start..stop];
        let re = Regex::new(ENTRY_START).unwrap();

        let starts: Vec<(usize, String, Option<String>)> = re
            .captures_iter(body)
            .map(|cap| {
                let m = cap.get(0).unwrap();
                (
                    m.start(),
                    cap[1].to_string(),
                    cap.get(2).map(|c| c.as_str().trim().to_string()),
                )
            })
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(i, (entry_start, id, comment))| {
                let entry_end = starts.get(i + 1).map(|n| n.0).unwrap_or(body.len());
                Entry {
                    id: id.clone(),
                    comment: comment.clone(),
                    body: body[*entry_start..entry_end].to_string(),
                }
            })
            .collect()
    }

    /// Generate an object id not yet used anywhere in the document
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string()[..24].to_uppercase();
            if !self.content.contains(&id) {
                return id;
            }
        }
    }
}

/// Extract a scalar attribute value from an entry body, stripping quotes
fn attr(body: &str, key: &str) -> Option<String> {
    let re = Regex::new(&format!(r#"(?m)\b{key} = ("[^"\n]*"|[^;\n]+);"#)).unwrap();
    let raw = re.captures(body)?[1].trim().to_string();
    Some(raw.trim_matches('"').to_string())
}

/// Extract the object ids of a list attribute like `children = ( ... );`
fn list_ids(body: &str, key: &str) -> Vec<String> {
    let re = Regex::new(&format!(r"(?s)\b{key} = \((.*?)\);")).unwrap();
    let Some(caps) = re.captures(body) else {
        return Vec::new();
    };
    let id_re = Regex::new(HEX_ID).unwrap();
    id_re
        .find_iter(&caps[1])
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Quote a value the way Xcode does: bare only for safe identifier-ish
/// strings
fn quote_for_pbx(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/'));
    if plain {
        value.to_string()
    } else {
        format!("\"{value}\"")
    }
}

/// `lastKnownFileType` for a filename, by extension
fn file_type_for(file_name: &str) -> &'static str {
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some("plist") => "text.plist.xml",
        Some("swift") => "sourcecode.swift",
        Some("storyboard") => "file.storyboard",
        Some("xcassets") => "folder.assetcatalog",
        Some("json") => "text.json",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 54;
	objects = {

/* Begin PBXBuildFile section */
		74858FAF1ED2DC5600515810 /* AppDelegate.swift in Sources */ = {isa = PBXBuildFile; fileRef = 74858FAE1ED2DC5600515810 /* AppDelegate.swift */; };
		97C146FB1CF9000F007C117D /* Main.storyboard in Resources */ = {isa = PBXBuildFile; fileRef = 97C146FA1CF9000F007C117D /* Main.storyboard */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		74858FAE1ED2DC5600515810 /* AppDelegate.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = AppDelegate.swift; sourceTree = "<group>"; };
		97C146FA1CF9000F007C117D /* Main.storyboard */ = {isa = PBXFileReference; lastKnownFileType = file.storyboard; path = Main.storyboard; sourceTree = "<group>"; };
/* End PBXFileReference section */

/* Begin PBXGroup section */
		97C146E51CF9000F007C117D = {
			isa = PBXGroup;
			children = (
				97C146F01CF9000F007C117D /* Runner */,
			);
			sourceTree = "<group>";
		};
		97C146F01CF9000F007C117D /* Runner */ = {
			isa = PBXGroup;
			children = (
				74858FAE1ED2DC5600515810 /* AppDelegate.swift */,
				97C146FA1CF9000F007C117D /* Main.storyboard */,
				97C146F11CF9000F007C117D /* Config */,
			);
			path = Runner;
			sourceTree = "<group>";
		};
		97C146F11CF9000F007C117D /* Config */ = {
			isa = PBXGroup;
			children = (
			);
			path = Config;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXNativeTarget section */
		97C146ED1CF9000F007C117D /* Runner */ = {
			isa = PBXNativeTarget;
			buildPhases = (
				97C146EA1CF9000F007C117D /* Sources */,
				97C146EC1CF9000F007C117D /* Resources */,
			);
			name = Runner;
			productName = Runner;
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		97C146E61CF9000F007C117D /* Project object */ = {
			isa = PBXProject;
			mainGroup = 97C146E51CF9000F007C117D;
			targets = (
				97C146ED1CF9000F007C117D /* Runner */,
			);
		};
/* End PBXProject section */

/* Begin PBXResourcesBuildPhase section */
		97C146EC1CF9000F007C117D /* Resources */ = {
			isa = PBXResourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				97C146FB1CF9000F007C117D /* Main.storyboard in Resources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXResourcesBuildPhase section */

/* Begin PBXSourcesBuildPhase section */
		97C146EA1CF9000F007C117D /* Sources */ = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				74858FAF1ED2DC5600515810 /* AppDelegate.swift in Sources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXSourcesBuildPhase section */

	};
	rootObject = 97C146E61CF9000F007C117D /* Project object */;
}
"#;

    fn write_project(dir: &Path, content: &str) -> PathBuf {
        let project = dir.join("Runner.xcodeproj");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("project.pbxproj"), content).unwrap();
        project
    }

    fn open_fixture(dir: &tempfile::TempDir) -> PbxDocument {
        PbxDocument::open(&write_project(dir.path(), FIXTURE)).unwrap()
    }

    #[test]
    fn test_open_missing_project() {
        let dir = tempfile::tempdir().unwrap();
        let err = PbxDocument::open(&dir.path().join("Missing.xcodeproj")).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));
    }

    #[test]
    fn test_find_group_walks_path_from_main_group() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_fixture(&dir);

        let runner = doc.find_group("Runner").unwrap();
        assert_eq!(runner.id, "97C146F01CF9000F007C117D");
        assert_eq!(runner.name, "Runner");
        assert_eq!(runner.children.len(), 3);

        let config = doc.find_group("Runner/Config").unwrap();
        assert_eq!(config.name, "Config");
        assert!(config.children.is_empty());

        assert!(doc.find_group("Nonexistent").is_none());
        assert!(doc.find_group("Runner/Nonexistent").is_none());
    }

    #[test]
    fn test_files_in_group() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_fixture(&dir);

        let runner = doc.find_group("Runner").unwrap();
        let paths: Vec<String> = doc
            .files_in_group(&runner)
            .into_iter()
            .map(|f| f.path)
            .collect();
        assert_eq!(paths, vec!["AppDelegate.swift", "Main.storyboard"]);
    }

    #[test]
    fn test_find_target_and_resources_phase() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_fixture(&dir);

        let target = doc.find_target("Runner").unwrap();
        assert_eq!(target.build_phases.len(), 2);
        assert!(doc.find_target("Other").is_none());

        let phase = doc.resources_phase(&target).unwrap();
        assert_eq!(phase, "97C146EC1CF9000F007C117D");

        let files = doc.phase_build_files(&phase);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_ref, "97C146FA1CF9000F007C117D");
    }

    #[test]
    fn test_add_file_reference() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = open_fixture(&dir);

        let runner = doc.find_group("Runner").unwrap();
        let id = doc
            .add_file_reference(&runner.id, "GoogleService-Info.plist")
            .unwrap();
        assert!(doc.is_dirty());

        let fr = doc.file_reference(&id).unwrap();
        assert_eq!(fr.path, "GoogleService-Info.plist");
        // the dash forces Xcode-style quoting in the stored definition
        assert!(doc.contents().contains(r#"path = "GoogleService-Info.plist";"#));

        let runner = doc.find_group("Runner").unwrap();
        assert!(runner.children.contains(&id));
    }

    #[test]
    fn test_add_resource_build_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = open_fixture(&dir);

        let runner = doc.find_group("Runner").unwrap();
        let target = doc.find_target("Runner").unwrap();
        let phase = doc.resources_phase(&target).unwrap();

        let ref_id = doc
            .add_file_reference(&runner.id, "GoogleService-Info.plist")
            .unwrap();
        doc.add_resource_build_file(&phase, &ref_id, "GoogleService-Info.plist")
            .unwrap();

        let refs: Vec<String> = doc
            .phase_build_files(&phase)
            .into_iter()
            .map(|bf| bf.file_ref)
            .collect();
        assert!(refs.contains(&ref_id));
        assert_eq!(doc.build_files_for_ref(&ref_id).len(), 1);
    }

    #[test]
    fn test_add_file_reference_without_children_list_does_not_splice_elsewhere() {
        let dir = tempfile::tempdir().unwrap();
        // strip the Runner group's children list entirely
        let content = FIXTURE.replace(
            "\t\t\tchildren = (\n\t\t\t\t74858FAE1ED2DC5600515810 /* AppDelegate.swift */,\n\t\t\t\t97C146FA1CF9000F007C117D /* Main.storyboard */,\n\t\t\t\t97C146F11CF9000F007C117D /* Config */,\n\t\t\t);\n",
            "",
        );
        assert_ne!(content, FIXTURE);
        let project = write_project(dir.path(), &content);
        let mut doc = PbxDocument::open(&project).unwrap();

        let err = doc
            .add_file_reference("97C146F01CF9000F007C117D", "GoogleService-Info.plist")
            .unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));

        // the membership line must not land in a later object's list
        let config = doc.groups().into_iter().find(|g| g.name == "Config").unwrap();
        assert!(config.children.is_empty());
        let target = doc.find_target("Runner").unwrap();
        assert_eq!(target.build_phases.len(), 2);
    }

    #[test]
    fn test_detach_file_reference_removes_all_traces() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = open_fixture(&dir);

        // Main.storyboard: in the group, with a build file in Resources
        let ref_id = "97C146FA1CF9000F007C117D";
        doc.detach_file_reference(ref_id);

        assert!(doc.file_reference(ref_id).is_none());
        let runner = doc.find_group("Runner").unwrap();
        assert!(!runner.children.contains(&ref_id.to_string()));

        let target = doc.find_target("Runner").unwrap();
        let phase = doc.resources_phase(&target).unwrap();
        assert!(doc.phase_build_files(&phase).is_empty());
        assert!(doc.build_files_for_ref(ref_id).is_empty());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(dir.path(), FIXTURE);

        let mut doc = PbxDocument::open(&project).unwrap();
        let runner = doc.find_group("Runner").unwrap();
        let id = doc
            .add_file_reference(&runner.id, "GoogleService-Info.plist")
            .unwrap();
        doc.save().unwrap();
        assert!(!doc.is_dirty());

        let reopened = PbxDocument::open(&project).unwrap();
        assert!(reopened.file_reference(&id).is_some());
        // the temp file used for the atomic write is gone
        assert!(!project.join("project.pbxproj.tmp").exists());
    }

    #[test]
    fn test_quote_for_pbx() {
        assert_eq!(quote_for_pbx("AppDelegate.swift"), "AppDelegate.swift");
        assert_eq!(
            quote_for_pbx("GoogleService-Info.plist"),
            "\"GoogleService-Info.plist\""
        );
        assert_eq!(quote_for_pbx("with space"), "\"with space\"");
    }

    #[test]
    fn test_file_type_for() {
        assert_eq!(file_type_for("GoogleService-Info.plist"), "text.plist.xml");
        assert_eq!(file_type_for("AppDelegate.swift"), "sourcecode.swift");
        assert_eq!(file_type_for("README"), "text");
    }
}
