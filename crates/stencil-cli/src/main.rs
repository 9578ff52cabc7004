//! Stencil CLI - Create a new project from a conditional template tree

use anyhow::Result;
use clap::Parser;
use stencil_core::CreateArgs;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "stencil-create")]
#[command(about = "Create a new project from a template")]
#[command(version)]
pub struct Args {
    /// Type of project to create (template name)
    pub project_type: Option<String>,

    /// Name of the project
    pub name: Option<String>,

    /// Path to create the project under
    pub path: Option<PathBuf>,

    /// Framework to use (skips the framework prompt)
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Options to enable (comma-separated, e.g. pug,tailwindcss)
    #[arg(short, long, value_delimiter = ',')]
    pub options: Option<Vec<String>>,

    /// Local directory holding the template tree (defaults to ./templates)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Print what would be created without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.project_type,
            name: args.name,
            directory: args.path,
            framework: args.framework,
            options: args.options,
            dry_run: args.dry_run,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = stencil_core::run(args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
