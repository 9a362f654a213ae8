//! Delimiters, escaping and per-render configuration

pub mod consts;
pub mod model;

pub use model::{EscapeFn, RenderConfig, Tags};
