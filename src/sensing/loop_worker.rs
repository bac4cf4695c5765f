use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::pipeline::ContextPipeline;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at crate root)
use crate::{log_error, log_info, log_warn};

/// Tick, run one cycle, repeat. Failures are contained to their cycle; the
/// next tick is the retry.
pub async fn capture_loop(
    pipeline: ContextPipeline,
    cancel_token: CancellationToken,
    paused_rx: watch::Receiver<bool>,
) {
    let interval_ms = pipeline.config().capture.interval_ms.max(1);
    let timeout_ms = pipeline.config().capture.timeout_ms.max(1);

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if *paused_rx.borrow() {
                    continue;
                }

                // Abandoning the cycle on shutdown is safe: results are only
                // published once a cycle has fully completed.
                let cycle =
                    tokio::time::timeout(Duration::from_millis(timeout_ms), pipeline.run_cycle());
                tokio::select! {
                    outcome = cycle => match outcome {
                        Ok(Ok(_)) => {}
                        Ok(Err(err)) => {
                            log_error!("capture cycle failed: {err:?}");
                            pipeline.metrics().record_skip().await;
                        }
                        Err(_) => {
                            log_warn!("capture cycle timeout (> {}ms)", timeout_ms);
                            pipeline.metrics().record_skip().await;
                        }
                    },
                    _ = cancel_token.cancelled() => {
                        log_info!("capture loop shutting down; abandoning in-flight cycle");
                        break;
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("capture loop shutting down");
                break;
            }
        }
    }
}
