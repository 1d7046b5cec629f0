use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use url::Url;

use crate::{EngineEvent, PokeApi};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    FetchPage,
    ResolveDetail { index: usize, name: String },
    LoadSprite { index: usize, url: Url },
}

/// Runs accessor calls on a background tokio runtime and reports results as
/// [`EngineEvent`]s. Dropping the handle stops the worker thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn PokeApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("pokedex-engine")
            .build()?;

        thread::Builder::new()
            .name("pokedex-dispatch".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage);
    }

    pub fn resolve_detail(&self, index: usize, name: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ResolveDetail {
            index,
            name: name.into(),
        });
    }

    pub fn load_sprite(&self, index: usize, url: Url) {
        let _ = self.cmd_tx.send(EngineCommand::LoadSprite { index, url });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn PokeApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchPage => EngineEvent::PageFetched {
            result: api.resource_list().await,
        },
        EngineCommand::ResolveDetail { index, name } => {
            let result = api.pokemon(&name).await;
            EngineEvent::DetailFetched {
                index,
                name,
                result,
            }
        }
        EngineCommand::LoadSprite { index, url } => EngineEvent::SpriteFetched {
            index,
            result: api.sprite(&url).await,
        },
    };
    let _ = event_tx.send(event);
}
