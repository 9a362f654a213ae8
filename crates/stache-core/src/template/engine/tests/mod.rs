//! Tests for template engine
//!
//! Organized into focused submodules: the scanner and parser first, then
//! context lookup, then rendering by feature.

use super::*;

// Test helper functions
mod helpers;

mod scanner;

// Context lookup tests
mod context;

mod partials;
