pub mod logging;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use deckview_common::ViewerConfig;
use deckview_core::source::{load, source_for};
use deckview_core::{DeckController, DeckStatus, MemorySurface, NodeKind, ViewNode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "deckview")]
#[command(about = "Terminal viewer for JSON slide decks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file (.toml or .json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Present a deck interactively
    View {
        /// Path or http(s) URL of the content document
        source: Option<String>,
        /// Start location, e.g. "#slide-3"
        #[arg(long)]
        fragment: Option<String>,
    },
    /// List the slides of the built deck
    Outline {
        source: Option<String>,
        /// Print the built deck as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one slide as plain text
    Show {
        source: Option<String>,
        /// 1-based slide number, clamped into the deck
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        slide: isize,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::View {
        source: None,
        fragment: None,
    });

    let config = ViewerConfig::resolve(cli.config.as_deref())?;
    let log_file = cli.log_file.or_else(|| config.log_file.clone());
    let interactive = matches!(command, Commands::View { .. });
    logging::init_logging(cli.debug, log_file.as_deref(), interactive)?;
    tracing::debug!(?config, "resolved configuration");

    match command {
        Commands::View { source, fragment } => {
            let location = source.unwrap_or_else(|| config.source.clone());
            deckview_tui::run_viewer(&config, &location, fragment).await?;
        }
        Commands::Outline { source, json } => {
            let location = source.unwrap_or_else(|| config.source.clone());
            let controller = load_controller(&location).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(controller.deck())?);
            } else {
                for (i, slide) in controller.deck().slides().iter().enumerate() {
                    println!("{}. {}", i + 1, slide.title().unwrap_or("(untitled)"));
                }
            }
        }
        Commands::Show { source, slide } => {
            let location = source.unwrap_or_else(|| config.source.clone());
            let mut surface = MemorySurface::default();
            let mut controller = load_controller_into(&location, &mut surface).await?;
            controller.render(slide.saturating_sub(1), &mut surface);
            print!("{}", show_text(&surface));
        }
    }

    Ok(())
}

async fn load_controller(location: &str) -> Result<DeckController> {
    let mut surface = MemorySurface::default();
    load_controller_into(location, &mut surface).await
}

/// Load `location` once through a controller; empty or failed loads become
/// errors carrying the user-visible message.
async fn load_controller_into(
    location: &str,
    surface: &mut MemorySurface,
) -> Result<DeckController> {
    let source = source_for(location);
    let mut controller = DeckController::new(source.label());
    controller.begin(surface);
    controller.handle(load(source.as_ref()).await, surface);

    match controller.status() {
        DeckStatus::Ready => Ok(controller),
        _ => Err(anyhow!(surface.content_text())),
    }
}

/// Plain-text rendering of a surface: slide body, progress and notes.
pub fn show_text(surface: &MemorySurface) -> String {
    let mut out = String::new();
    if let Some(node) = &surface.content {
        push_plain(node, &mut out);
    }
    out.push('\n');
    match &surface.fragment {
        Some(fragment) => out.push_str(&format!("[{}] #{fragment}\n", surface.progress)),
        None => out.push_str(&format!("[{}]\n", surface.progress)),
    }
    if !surface.speaker_notes.is_empty() {
        out.push_str(&format!("Notes: {}\n", surface.speaker_notes));
    }
    out
}

fn push_plain(node: &ViewNode, out: &mut String) {
    let text = node.text.as_deref().unwrap_or_default();
    match node.kind {
        NodeKind::Slide | NodeKind::BulletList => {
            for child in &node.children {
                push_plain(child, out);
            }
        }
        NodeKind::Heading => out.push_str(&format!("# {text}\n")),
        NodeKind::Subtitle => out.push_str(&format!("{text}\n")),
        NodeKind::Bullet => out.push_str(&format!("- {text}\n")),
        NodeKind::Example => {
            for line in text.lines() {
                out.push_str(&format!("    {line}\n"));
            }
        }
        NodeKind::Message => out.push_str(&format!("{text}\n")),
    }
}
