//! Xcode project file manipulation for pbxfix
//!
//! This crate provides:
//! - [`document::PbxDocument`]: a read/modify/write model of a
//!   `project.pbxproj` file, built on targeted regex edits of the original
//!   text so untouched objects survive byte-for-byte
//! - [`reconcile`]: the idempotent routine that guarantees a tracked
//!   resource file is singly and correctly referenced in a group and in a
//!   target's resources build phase

pub mod document;
pub mod reconcile;
