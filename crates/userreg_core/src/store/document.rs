//! Whole-document load/save for the user collection.
//!
//! # Responsibility
//! - Create the document (and its parent directories) on first use.
//! - Decode the JSON array into records, tolerating absent or corrupt files.
//! - Replace the document atomically on save.
//!
//! # Invariants
//! - File handles live only for the duration of one call.
//! - Saves go through a sibling temp file plus rename, so readers observe
//!   either the previous or the new document, never a partial one.
//! - Log events carry counts and durations only, never record contents.

use super::{StoreError, StoreResult};
use crate::model::user::User;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const JSON_INDENT: &[u8] = b"    ";
const TEMP_SUFFIX: &str = "tmp";

/// Creates parent directories and an empty `[]` document if `path` is absent.
///
/// # Errors
/// - Returns `StoreError::Write` when directories or the file cannot be created.
pub fn ensure_document(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    if path.exists() {
        return Ok(());
    }

    info!("event=store_init module=store status=start action=create_empty");
    save_users(path, &[])
}

/// Loads every record from `path` in persisted order.
///
/// A missing or unparsable document is treated as an empty collection.
///
/// # Errors
/// - Returns `StoreError::Read` for I/O failures other than "not found".
pub fn load_users(path: &Path) -> StoreResult<Vec<User>> {
    let started_at = Instant::now();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("event=store_load module=store status=recovered reason=missing count=0");
            return Ok(Vec::new());
        }
        Err(source) => {
            error!(
                "event=store_load module=store status=error error_code=read_failed error={}",
                source
            );
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_slice::<Vec<User>>(&bytes) {
        Ok(users) => {
            debug!(
                "event=store_load module=store status=ok count={} duration_ms={}",
                users.len(),
                started_at.elapsed().as_millis()
            );
            Ok(users)
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=recovered reason=unparsable count=0 line={} column={}",
                err.line(),
                err.column()
            );
            Ok(Vec::new())
        }
    }
}

/// Replaces the document at `path` with `users`.
///
/// # Errors
/// - Returns `StoreError::Encode` when serialization fails.
/// - Returns `StoreError::Write` when the temp file cannot be written or moved.
pub fn save_users(path: &Path, users: &[User]) -> StoreResult<()> {
    let started_at = Instant::now();

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    users
        .serialize(&mut serializer)
        .map_err(StoreError::Encode)?;

    // Why: rename within one directory replaces the document in a single step,
    // so a failed write leaves the previous collection intact.
    let temp_path = temp_path_for(path);
    let written = fs::write(&temp_path, &buffer).and_then(|()| fs::rename(&temp_path, path));
    if let Err(source) = written {
        let _ = fs::remove_file(&temp_path);
        error!(
            "event=store_save module=store status=error error_code=write_failed count={} error={}",
            users.len(),
            source
        );
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(
        "event=store_save module=store status=ok count={} bytes={} duration_ms={}",
        users.len(),
        buffer.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}
