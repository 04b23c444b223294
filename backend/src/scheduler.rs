//! Periodic monitor refresh
//!
//! Every tick re-runs the monitor for all active stores on the blocking pool
//! and publishes the result on a watch channel. Runs may overlap when one is
//! slow; a run only replaces the published result if it started later, so
//! the newest check always wins. The loop ends once every receiver is gone.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::services::{MonitorRun, MonitorService};

pub type MonitorResults = watch::Receiver<Option<MonitorRun>>;

pub struct RefreshScheduler {
    service: Arc<MonitorService>,
    period: Duration,
}

impl RefreshScheduler {
    /// Refresh every `check_interval_minutes`
    pub fn new(service: Arc<MonitorService>, check_interval_minutes: u64) -> Self {
        Self::with_period(service, Duration::from_secs(check_interval_minutes.max(1) * 60))
    }

    pub fn with_period(service: Arc<MonitorService>, period: Duration) -> Self {
        Self { service, period }
    }

    /// Start the refresh loop; the first run happens immediately
    pub fn spawn(self) -> (MonitorResults, JoinHandle<()>) {
        let (sender, receiver) = watch::channel(None);
        let handle = tokio::spawn(self.run(Arc::new(sender)));
        (receiver, handle)
    }

    async fn run(self, sender: Arc<watch::Sender<Option<MonitorRun>>>) {
        tracing::info!("Monitor refresh every {:?}", self.period);

        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if sender.is_closed() {
                tracing::info!("No monitor subscribers left, stopping refresh");
                break;
            }

            let service = Arc::clone(&self.service);
            let sender = Arc::clone(&sender);
            tokio::spawn(async move {
                match tokio::task::spawn_blocking(move || service.run_all()).await {
                    Ok(Ok(run)) => {
                        if !publish(&sender, run) {
                            tracing::debug!("Discarded monitor run superseded by a newer one");
                        }
                    }
                    Ok(Err(err)) => tracing::warn!("Monitor refresh failed: {}", err),
                    Err(err) => tracing::error!("Monitor refresh task failed: {}", err),
                }
            });
        }
    }
}

/// Publish `run` unless a run that started later is already published
pub fn publish(sender: &watch::Sender<Option<MonitorRun>>, run: MonitorRun) -> bool {
    sender.send_if_modified(|current| {
        let newer = current
            .as_ref()
            .map_or(true, |published| run.checked_at >= published.checked_at);
        if newer {
            *current = Some(run);
        }
        newer
    })
}
