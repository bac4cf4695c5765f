use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::models::InputEvent;

use super::recorder::ActionRecorder;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Owns the task that drains the input subscription into the action log.
///
/// The OS hook lives outside this crate; it pushes [`InputEvent`]s into the
/// sender half returned by [`InputTracker::channel`].
pub struct InputTracker {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn channel(capacity: usize) -> (mpsc::Sender<InputEvent>, mpsc::Receiver<InputEvent>) {
        mpsc::channel(capacity.max(1))
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn start(
        &mut self,
        recorder: ActionRecorder,
        events: mpsc::Receiver<InputEvent>,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("input tracking already active");
        }

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(tracking_loop(recorder, events, cancel_token.clone()));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("input tracking task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

async fn tracking_loop(
    recorder: ActionRecorder,
    mut events: mpsc::Receiver<InputEvent>,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log_info!("input tracking shutting down");
                break;
            }
            event = events.recv() => match event {
                Some(event) => {
                    recorder.record(event);
                }
                None => {
                    log_info!("input subscription closed; input tracking stopped");
                    break;
                }
            }
        }
    }
}
