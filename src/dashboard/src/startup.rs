use std::{sync::Arc, time::Duration};

use futures::StreamExt;
use map_view::{MapEvent, MapView, Poller, RefreshOutcome, VesselStore};
use park_api::ParkApiClient;
use snafu::ResultExt;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
    task::JoinHandle,
};
use tokio_util::{
    codec::{FramedRead, LinesCodec},
    sync::CancellationToken,
};
use tracing::{info, warn};

use crate::{
    Command, Environment, LogSurface, Settings,
    error::{
        Result,
        error::{InputSnafu, JoinSnafu, OutputSnafu, ParkApiSnafu},
    },
};

static MAX_LINE_LENGTH: usize = 1024;

pub struct App {
    store: Arc<VesselStore>,
    view: MapView,
    selected: mpsc::UnboundedReceiver<String>,
    poll_interval: Duration,
    environment: Environment,
}

impl App {
    pub fn build(settings: &Settings) -> Result<Self> {
        let client = ParkApiClient::new(&settings.api).context(ParkApiSnafu)?;
        let store = Arc::new(VesselStore::new(
            Arc::new(client),
            settings.boundary_max_age,
        ));

        let (tx, selected) = mpsc::unbounded_channel();
        let mut view = MapView::new(&store, &settings.map, Box::new(LogSurface));
        view.on_vessel_click(move |vessel| {
            let name = vessel.name.as_deref().unwrap_or("-");
            info!(mmsi = %vessel.mmsi, vessel_name = name, "vessel selected");
            // The receiver is gone once the shell has stopped.
            tx.send(format!("selected {} {name}", vessel.mmsi)).ok();
        });
        view.on_map_ready(|map| {
            let center = map.viewport().center();
            info!(
                longitude = center.x(),
                latitude = center.y(),
                zoom = map.viewport().zoom(),
                "map ready"
            );
        });

        Ok(Self {
            store,
            view,
            selected,
            poll_interval: settings.poll_interval,
            environment: settings.environment,
        })
    }

    /// Runs the dashboard, reading commands from `input` and writing responses to `output`
    /// until the input ends, `quit` is read or ctrl-c is received.
    ///
    /// The poller only runs outside the test environment, tests drive refreshes explicitly.
    pub async fn run(
        self,
        input: impl AsyncRead + Unpin,
        mut output: impl AsyncWrite + Unpin,
    ) -> Result<()> {
        let Self {
            store,
            view,
            mut selected,
            poll_interval,
            environment,
        } = self;

        let poller: Option<JoinHandle<()>> = match environment {
            Environment::Local | Environment::Development | Environment::Production => Some(
                tokio::spawn(Poller::new(store.clone(), poll_interval).run_continuous()),
            ),
            Environment::Test => None,
        };

        let cancel = CancellationToken::new();
        let (events, rx) = mpsc::channel::<MapEvent>(64);
        let view = tokio::spawn(view.run(rx, cancel.clone()));

        let mut lines = FramedRead::new(input, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("received ctrl-c, shutting down");
                    cancel.cancel();
                    break;
                }
                Some(line) = selected.recv() => {
                    write_line(&mut output, &line).await?;
                }
                line = lines.next() => {
                    let Some(line) = line else {
                        break;
                    };
                    let line = line.context(InputSnafu)?;
                    if line.trim().is_empty() {
                        continue;
                    }

                    match line.parse::<Command>() {
                        Ok(Command::Quit) => break,
                        Ok(command) => {
                            let response = execute(&store, &events, command).await;
                            if let Some(response) = response {
                                write_line(&mut output, &response).await?;
                            }
                        }
                        Err(e) => {
                            warn!("invalid command '{line}': {e}");
                            write_line(&mut output, &format!("error {e}")).await?;
                        }
                    }
                }
            }
        }

        // Pending map events are still handled before the map shuts down.
        drop(events);
        view.await.context(JoinSnafu)?;

        while let Some(line) = selected.recv().await {
            write_line(&mut output, &line).await?;
        }

        store.teardown();
        if let Some(poller) = poller {
            poller.await.context(JoinSnafu)?;
        }

        output.flush().await.context(OutputSnafu)?;
        info!("dashboard stopped");

        Ok(())
    }
}

async fn execute(
    store: &VesselStore,
    events: &mpsc::Sender<MapEvent>,
    command: Command,
) -> Option<String> {
    match command {
        Command::Map(event) => {
            if events.send(event).await.is_err() {
                warn!("map is no longer running");
            }
            None
        }
        Command::Refresh => Some(match store.refresh().await {
            RefreshOutcome::Applied { vessels } => format!("refresh applied {vessels}"),
            RefreshOutcome::Failed(kind) => format!("refresh failed {kind}"),
            RefreshOutcome::Stale => "refresh stale".to_string(),
            RefreshOutcome::TornDown => "refresh torn_down".to_string(),
        }),
        Command::Health => Some(if store.health().await {
            "health ok".to_string()
        } else {
            "health unavailable".to_string()
        }),
        Command::Search(query) => Some(match store.search(&query).await {
            Ok(vessels) => {
                let mmsis = vessels
                    .iter()
                    .map(|v| v.mmsi.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("found {} {mmsis}", vessels.len()).trim_end().to_string()
            }
            Err(e) => {
                warn!("vessel search failed: {e:?}");
                format!("search failed {}", e.kind())
            }
        }),
        Command::Quit => None,
    }
}

async fn write_line(output: &mut (impl AsyncWrite + Unpin), line: &str) -> Result<()> {
    output
        .write_all(format!("{line}\n").as_bytes())
        .await
        .context(OutputSnafu)
}
