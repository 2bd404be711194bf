pub mod app;
pub mod surface;
pub mod widgets;

use anyhow::Result;
use deckview_common::ViewerConfig;
use deckview_core::protocol::DeckEvent;
use deckview_core::source::{load, source_for, ContentSource};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub use app::*;
pub use surface::*;

/// Run the interactive viewer for `location` (a path or http(s) URL).
pub async fn run_viewer(
    config: &ViewerConfig,
    location: &str,
    fragment: Option<String>,
) -> Result<()> {
    let source: Arc<dyn ContentSource> = Arc::from(source_for(location));
    let app = DeckApp::new(config, source.label(), fragment);

    let rx = spawn_load(source);
    run_app(app, rx).await
}

/// Fetch `source` once in the background; the outcome arrives on the returned channel.
pub fn spawn_load(source: Arc<dyn ContentSource>) -> UnboundedReceiver<DeckEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let event = load(source.as_ref()).await;
        if let Err(unsent) = tx.send(event) {
            let outcome = match unsent.0 {
                DeckEvent::LoadFailed(_) => "failed",
                _ => "finished",
            };
            tracing::debug!("{} load {outcome} after the viewer closed", source.label());
        }
    });
    rx
}
