// Core modules
pub mod config;
pub mod error;
pub mod template;
pub mod view;

// Re-export commonly used types
pub use config::{RenderConfig, Tags};
pub use error::{Result, TemplateError};
pub use template::{
    clear_cache, escape, parse, render, render_value, set_tags, set_template_cache, tags,
    template_cache, PartialSource, TemplateEngine,
};
pub use view::Value;
