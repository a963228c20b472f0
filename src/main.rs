//! CLI entry point for quill

use anyhow::Result;
use clap::{Parser, Subcommand};
use quill::Quill;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "A small static site generator for a personal blog", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Create the post as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Build the site into the public directory
    #[command(alias = "b")]
    Build,

    /// List site content
    List {
        /// Type of content to list (posts, drafts, tags, pages)
        #[arg(default_value = "posts")]
        r#type: String,
    },

    /// Remove the public directory
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "quill=debug,info"
    } else {
        "quill=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            quill::commands::init::init_site(&target_dir)?;
            println!("Initialized new site in {}", target_dir.display());
        }

        Commands::New { title, draft } => {
            let site = Quill::new(&base_dir)?;
            site.new_post(&title, draft)?;
        }

        Commands::Build => {
            let site = Quill::new(&base_dir)?;
            site.build()?;
            println!("Site built into {}", site.public_dir.display());
        }

        Commands::List { r#type } => {
            let site = Quill::new(&base_dir)?;
            quill::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = Quill::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully");
        }

        Commands::Version => {
            println!("quill version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
