//! Terraclaim Engine - host bridge entry point.
//!
//! Reads one JSON host message per line from stdin and writes one JSON host
//! command per line to stdout. Logs go to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use terraclaim_domain::{ActorId, RegionId};
use terraclaim_engine::api::{Dispatched, Dispatcher, HostBridge};
use terraclaim_engine::infrastructure::app_settings::AppConfig;
use terraclaim_engine::infrastructure::clock::SystemClock;
use terraclaim_engine::infrastructure::key_value::{FileStore, InMemoryStore};
use terraclaim_engine::infrastructure::ports::PersistencePort;
use terraclaim_engine::use_cases::SettingsCommand;
use terraclaim_engine::{Ports, TerritoryService};
use terraclaim_shared::{HostCommand, HostMessage};

type SessionResult = (ActorId, RegionId, Vec<SettingsCommand>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // stdout carries host commands, so logs must go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "terraclaim_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Terraclaim Engine");

    let config = AppConfig::from_env();
    let persistence: Arc<dyn PersistencePort> = match &config.data_dir {
        Some(dir) => {
            tracing::info!(data_dir = %dir.display(), "Using file-backed store");
            Arc::new(FileStore::open(dir)?)
        }
        None => {
            tracing::warn!("TERRACLAIM_DATA_DIR not set, claims will not survive a restart");
            Arc::new(InMemoryStore::new())
        }
    };

    let (command_tx, mut command_rx) = mpsc::unbounded_channel::<HostCommand>();
    let bridge = Arc::new(HostBridge::new(command_tx));

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(command) = command_rx.recv().await {
            let mut line = match serde_json::to_string(&command) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to encode host command");
                    continue;
                }
            };
            line.push('\n');
            stdout.write_all(line.as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let service = TerritoryService::new(
        Ports {
            persistence,
            presentation: bridge.clone(),
            world: bridge.clone(),
            forms: bridge.clone(),
            clock: Arc::new(SystemClock::new()),
        },
        config.settings,
    );
    let session = service.settings_session();
    let mut dispatcher = Dispatcher::new(service);
    let mut sessions: JoinSet<SessionResult> = JoinSet::new();

    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    loop {
        tokio::select! {
            segment = lines.next_segment() => {
                let bytes = match segment {
                    Ok(Some(bytes)) => bytes,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Reading host input failed");
                        break;
                    }
                };
                let Some(message) = decode_host_message(&bytes) else {
                    continue;
                };
                bridge.observe(&message);
                match dispatcher.handle(message) {
                    Dispatched::Verdict { event_id, cancel } => {
                        bridge.emit(HostCommand::EventVerdict { event_id, cancel });
                    }
                    Dispatched::OpenSettings(request) => {
                        let session = session.clone();
                        sessions.spawn(async move {
                            let actor = request.actor.clone();
                            let region_id = request.region_id.clone();
                            let commands = session.run(request).await;
                            (actor, region_id, commands)
                        });
                    }
                    Dispatched::FormAnswer { request_id, reply } => {
                        bridge.resolve_form(request_id, reply);
                    }
                    Dispatched::Handled | Dispatched::Ignored => {}
                }
            }
            Some(finished) = sessions.join_next(), if !sessions.is_empty() => {
                match finished {
                    Ok((actor, region_id, commands)) => {
                        dispatcher.apply_settings(&actor, &region_id, commands);
                    }
                    Err(e) => tracing::warn!(error = %e, "Settings session task failed"),
                }
            }
        }
    }

    tracing::info!("Host input ended, shutting down");
    bridge.close_forms();
    sessions.shutdown().await;
    dispatcher.shutdown();

    drop(dispatcher);
    drop(session);
    drop(bridge);
    writer.await??;
    Ok(())
}

/// One input line as a host message. Blank, non-UTF-8 and unparsable lines
/// are skipped.
fn decode_host_message(bytes: &[u8]) -> Option<HostMessage> {
    let line = match std::str::from_utf8(bytes) {
        Ok(line) => line.trim(),
        Err(e) => {
            tracing::warn!(error = %e, "Host message is not valid UTF-8");
            return None;
        }
    };
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::warn!(error = %e, "Unparsable host message");
            None
        }
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
