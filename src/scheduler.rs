use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use crate::system::engine::SamplingEngine;
use crate::system::snapshot::Snapshot;
use crate::system::source::MetricsSource;

/// Drives the sampling engine on a fixed period and hands each finished
/// [`Snapshot`] to the consumer.
///
/// Ticks run one at a time: the next period is not awaited until the
/// previous sample has been built and delivered. Metric queries block, so
/// each sample runs on tokio's blocking pool and the engine and source move
/// there and back.
pub struct Scheduler {
    rx: mpsc::Receiver<Snapshot>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Scheduler {
    pub fn spawn<S>(engine: SamplingEngine, source: S, period: Duration) -> Self
    where
        S: MetricsSource + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Snapshot>(1);
        let (shutdown, mut stop) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut engine = engine;
            let mut source = source;
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut tick: u64 = 0;

            loop {
                tokio::select! {
                    biased;
                    _ = stop.changed() => break,
                    _ = interval.tick() => {}
                }

                let sampled = tokio::task::spawn_blocking(move || {
                    let snapshot = engine.sample(&mut source);
                    (engine, source, snapshot)
                })
                .await;

                let snapshot = match sampled {
                    Ok((e, s, snapshot)) => {
                        engine = e;
                        source = s;
                        snapshot
                    }
                    Err(err) => {
                        error!(error = %err, "sampling task failed, stopping scheduler");
                        break;
                    }
                };

                tick += 1;
                debug!(tick, ok = snapshot.is_ok(), "snapshot ready");

                tokio::select! {
                    biased;
                    _ = stop.changed() => break,
                    sent = tx.send(snapshot) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!(ticks = tick, "scheduler stopped");
        });

        Self { rx, shutdown, task }
    }

    /// Waits for the next snapshot. `None` once the scheduler has stopped.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// Stops scheduling new ticks and waits for an in-flight sample to end.
    pub async fn shutdown(self) -> Result<()> {
        let Scheduler {
            rx,
            shutdown,
            task,
        } = self;
        // The task may already be gone; a closed channel is fine.
        let _ = shutdown.send(true);
        drop(rx);
        task.await
            .map_err(|err| eyre!("scheduler task failed to join: {err}"))
    }
}
