use crate::{ChangeKind, is_script_module};

use std::path::PathBuf;

/// Whether any changed path alters server-rendered output.
///
/// Client-only modules (`"use client"`) and non-script assets do not count.
/// Removed modules and modules that can no longer be read do.
pub fn touches_server_components(changes: &[(PathBuf, ChangeKind)]) -> bool {
    changes.iter().any(|(path, kind)| {
        if !is_script_module(path) {
            return false;
        }
        if *kind == ChangeKind::Removed {
            return true;
        }

        match std::fs::read_to_string(path) {
            Ok(source) => crate::classify_source(&source).affects_server_output(),
            Err(e) => {
                log::debug!("Treating unreadable {} as server module: {}", path.display(), e);
                true
            }
        }
    })
}
