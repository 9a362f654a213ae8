//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stache")]
#[command(version, about = "Render logic-less {{tag}} templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template against JSON view data
    Render {
        /// Template file
        template: PathBuf,

        /// JSON file with the view data (defaults to an empty object)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Directory holding `<name>.mustache` partials
        #[arg(short, long, env = "STACHE_PARTIALS")]
        partials: Option<PathBuf>,

        /// Opening and closing tags, e.g. "<% %>"
        #[arg(long)]
        tags: Option<String>,

        /// Do not HTML-escape {{name}} interpolations
        #[arg(long)]
        no_escape: bool,

        /// Write the output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the token tree of a template as JSON
    Parse {
        /// Template file
        template: PathBuf,

        /// Opening and closing tags, e.g. "<% %>"
        #[arg(long)]
        tags: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Check templates for syntax errors
    Check {
        /// Template files
        #[arg(required = true)]
        templates: Vec<PathBuf>,

        /// Opening and closing tags, e.g. "<% %>"
        #[arg(long)]
        tags: Option<String>,
    },
}
