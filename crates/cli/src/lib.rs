//! Terminal output helpers for pbxfix

pub mod output;
