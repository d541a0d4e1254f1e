//! # Article Index CLI (`articles`)
//!
//! The `articles` binary drives the index engine from the command line:
//! publishing, reading on behalf of a user, and printing each derived view.
//!
//! ## Usage
//!
//! ```bash
//! articles --config ./config/articles.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `articles publish --text <body> --tags <tags>` | Publish an article |
//! | `articles read <id> --user <user>` | Fetch an article and record the read |
//! | `articles get <id>` | Fetch an article without recording a read |
//! | `articles tag <tag>` | List article ids carrying a tag |
//! | `articles latest` | Latest published ids |
//! | `articles top` | Most-read articles with read counts |
//! | `articles history --user <user>` | A user's recently read ids |
//! | `articles tags` | Every tag ever used |
//! | `articles home --user <user>` | Combined landing view |
//! | `articles reconcile` | Rebuild tag index and latest list |
//!
//! ## Exit status
//!
//! `0` on success, `1` when the requested article does not exist, `2` for
//! any other failure (store unreachable, bad configuration).

use article_index::{config, db, logging, publish, read, reconcile, views};
use article_index_core::error::ArticleError;
use article_index_core::models::ArticleId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Article Index CLI: publish tagged articles and query their derived
/// views in Redis.
#[derive(Parser)]
#[command(
    name = "articles",
    about = "Article Index: publish tagged articles and query latest, by-tag, most-read and history views",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/articles.toml`. Store, index bound, and logging
    /// settings are read from this file.
    #[arg(long, global = true, default_value = "./config/articles.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Publish a new article.
    ///
    /// Prints the new article id. The article is stored first; tag index and
    /// latest list updates follow and are best-effort.
    Publish {
        /// Article body.
        #[arg(long)]
        text: String,

        /// Free-form tags separated by commas and/or spaces (e.g. "go, rust").
        #[arg(long, default_value = "")]
        tags: String,
    },

    /// Read an article as a user.
    ///
    /// Records the read in the user's history and the most-read ranking.
    Read {
        /// Article id.
        id: ArticleId,

        /// Reading user.
        #[arg(long)]
        user: String,
    },

    /// Fetch an article without recording a read.
    Get {
        /// Article id.
        id: ArticleId,
    },

    /// List article ids carrying a tag.
    Tag {
        /// Tag name.
        tag: String,
    },

    /// List the latest published article ids, newest first.
    Latest {
        /// Maximum ids to return (clamped to `indexes.capacity`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List the most-read articles with their read counts.
    Top {
        /// Number of entries (defaults to `indexes.top_k`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List what a user read most recently, newest first.
    History {
        /// User whose history to show.
        #[arg(long)]
        user: String,

        /// Maximum ids to return (clamped to `indexes.capacity`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List every tag ever used.
    Tags,

    /// Show the combined landing view for a user.
    Home {
        /// User the view is built for.
        #[arg(long)]
        user: String,

        /// Print the view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the tag index and latest list from stored articles.
    ///
    /// Repairs indices left behind by interrupted publishes. Safe to re-run.
    Reconcile,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ArticleError>() {
            Some(ArticleError::NotFound(id)) => {
                eprintln!("article not found: {}", id);
                ExitCode::from(1)
            }
            _ => {
                eprintln!("Error: {:#}", e);
                ExitCode::from(2)
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = config::load_config(&cli.config)?;
    logging::init_logging(&cfg.logging)?;

    let service = db::connect(&cfg).await?;

    match cli.command {
        Commands::Publish { text, tags } => {
            publish::run_publish(&service, &text, &tags).await?;
        }
        Commands::Read { id, user } => {
            read::run_read(&service, id, &user).await?;
        }
        Commands::Get { id } => {
            read::run_get(&service, id).await?;
        }
        Commands::Tag { tag } => {
            views::run_tag(&service, &tag).await?;
        }
        Commands::Latest { limit } => {
            views::run_latest(&service, limit).await?;
        }
        Commands::Top { limit } => {
            views::run_top(&service, limit).await?;
        }
        Commands::History { user, limit } => {
            views::run_history(&service, &user, limit).await?;
        }
        Commands::Tags => {
            views::run_tags(&service).await?;
        }
        Commands::Home { user, json } => {
            views::run_home(&service, &user, json).await?;
        }
        Commands::Reconcile => {
            reconcile::run_reconcile(&service).await?;
        }
    }

    Ok(())
}
