//! Test utilities for stache
//!
//! This crate provides shared testing utilities used across the stache workspace.

pub mod fixtures;

pub use fixtures::{RenderCase, fixtures_dir, load_render_case, render_cases};

use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Static mutex to serialize tests that modify process-wide state
///
/// The template facade keeps one default engine per process, so tests that
/// change its tags or cache must not interleave with tests that render
/// through it.
pub static GLOBAL_STATE_LOCK: Mutex<()> = Mutex::new(());

/// Hold [`GLOBAL_STATE_LOCK`] for the rest of the calling scope
///
/// A test that panicked while holding the lock leaves it poisoned; the
/// guard is recovered anyway since the lock protects no data.
///
/// # Examples
///
/// ```rust
/// use stache_testkit::serial_guard;
///
/// let _guard = serial_guard();
/// // mutate global state here
/// ```
pub fn serial_guard() -> MutexGuard<'static, ()> {
    GLOBAL_STATE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This ensures all test temporary files are centralized in a single location
/// that is gitignored and easy to clean up manually if needed.
///
/// # Returns
///
/// A `TempDir` instance that automatically cleans up on drop.
/// The directory is created at `.tmp/<random-name>` relative to the current directory.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use stache_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("page.mustache");
/// std::fs::write(&file_path, "Hello {{name}}").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
///
/// Use this variant when you need proper error handling instead of panics.
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}
