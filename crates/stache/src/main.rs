mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let result = match cli.command {
        Commands::Render {
            template,
            data,
            partials,
            tags,
            no_escape,
            output,
        } => commands::render::run(commands::render::RenderArgs {
            template,
            data,
            partials,
            tags,
            no_escape,
            output,
        }),
        Commands::Parse {
            template,
            tags,
            pretty,
        } => commands::parse::run(template, tags, pretty),
        Commands::Check { templates, tags } => commands::check::run(templates, tags, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
