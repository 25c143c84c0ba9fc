use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use courseview::config::progress::ProgressStore;
use courseview::course::storage;
use courseview::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "courseview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a course chapter in the viewer
    Open {
        /// Path to the course JSON file
        course: PathBuf,
        /// Chapter to open (defaults to where you left off, or the first chapter)
        #[arg(short, long)]
        chapter: Option<String>,
    },
    /// Show your completion for each chapter of a course
    Progress {
        /// Path to the course JSON file
        course: PathBuf,
    },
    /// Clear stored progress for a course
    Reset {
        /// ID of the course to reset
        course_id: String,
    },
    /// Sign in as a learner
    Login {
        /// Display name
        name: String,
    },
    /// Sign out
    Logout,
}

/// Log to a file; the terminal belongs to the TUI
fn init_logging() -> Result<()> {
    let log_path = Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courseview=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Open { course, chapter }) => {
            let config = Config::load()?;
            let mut app = App::new(config, course, chapter)?;
            app.run().await?;
        }
        Some(Commands::Progress { course }) => {
            let config = Config::load()?;
            let user = config.user.context("Not signed in. Run `courseview login <name>` first")?;
            let course = storage::load_course(&course)?;
            let progress = ProgressStore::load()?.for_course(&user.user_id, &course);

            println!("{} ({:.0}% complete)", course.title, progress.completion_percent());
            for section in &course.sections {
                println!("  {}", section.section_title);
                for chapter in &section.chapters {
                    let completed = progress
                        .is_chapter_completed(&section.section_id, &chapter.chapter_id);
                    let mark = if completed { "\u{2713}" } else { "\u{25CB}" };
                    println!("    {} {} ({})", mark, chapter.title, chapter.chapter_id);
                }
            }
        }
        Some(Commands::Reset { course_id }) => {
            let mut store = ProgressStore::load()?;
            let removed = store.remove_course(&course_id);
            store.save()?;
            tracing::info!(course = %course_id, removed, "Progress reset");
            println!("Removed {} progress record(s) for {}", removed, course_id);
        }
        Some(Commands::Login { name }) => {
            let mut config = Config::load()?;
            let user = config.sign_in(&name);
            println!("Signed in as {} ({})", user.name, user.user_id);
            config.save()?;
        }
        Some(Commands::Logout) => {
            let mut config = Config::load()?;
            match config.sign_out() {
                Some(user) => println!("Signed out {}", user.name),
                None => println!("Not signed in"),
            }
            config.save()?;
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
