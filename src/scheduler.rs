use log::{error, info, log, Level};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::error::FeedError;
use crate::models::update::UpdateMap;

/// Calls `updater` every `frequency` and forwards successful results.
///
/// The first tick fires immediately. A failed tick is handed to the error
/// handler and the next tick tries again; nothing is retried in between.
pub struct Scheduler<U, H> {
    frequency: Duration,
    updater: Arc<U>,
    error_handler: H,
}

impl<U, H> Scheduler<U, H>
where
    U: Fn() -> Result<UpdateMap, FeedError> + Send + Sync + 'static,
    H: Fn(&FeedError) + Send + Sync,
{
    pub fn new(frequency: Duration, updater: U, error_handler: H) -> Self {
        Self {
            frequency,
            updater: Arc::new(updater),
            error_handler,
        }
    }

    pub async fn run(self, updates: mpsc::Sender<UpdateMap>) {
        let mut interval = tokio::time::interval(self.frequency);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = updates.closed() => {
                    info!("Update receiver closed, stopping scheduler");
                    break;
                },
                _ = interval.tick() => {
                    // updaters do blocking RPC calls
                    let updater = Arc::clone(&self.updater);
                    let result = match tokio::task::spawn_blocking(move || updater()).await {
                        Ok(result) => result,
                        Err(e) => {
                            error!("Update task failed: {}", e);
                            continue;
                        }
                    };

                    match result {
                        Ok(update_map) => {
                            if updates.send(update_map).await.is_err() {
                                info!("Update receiver closed, stopping scheduler");
                                break;
                            }
                        }
                        Err(e) => (self.error_handler)(&e),
                    }
                }
            }
        }
    }
}

pub fn error_log_handler(
    data_source_id: &'static str,
    level: Level,
) -> impl Fn(&FeedError) + Send + Sync {
    move |e: &FeedError| log!(level, "[{}] failed to get update: {}", data_source_id, e)
}
