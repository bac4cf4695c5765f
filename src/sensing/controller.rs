use anyhow::{bail, Context, Result};
use log::info;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::loop_worker::capture_loop;
use super::pipeline::ContextPipeline;

/// Lifecycle of the periodic capture task.
pub struct CaptureController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    pause_tx: Option<watch::Sender<bool>>,
}

impl CaptureController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
            pause_tx: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn start(&mut self, pipeline: ContextPipeline) -> Result<()> {
        if self.handle.is_some() {
            bail!("capture already active");
        }

        let cancel_token = CancellationToken::new();

        // false = capturing, true = paused (ticks are skipped)
        let (pause_tx, pause_rx) = watch::channel(false);

        let handle = tokio::spawn(capture_loop(pipeline, cancel_token.clone(), pause_rx));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.pause_tx = Some(pause_tx);
        info!("capture loop started");
        Ok(())
    }

    pub fn pause(&self) {
        self.set_paused(true);
    }

    pub fn resume(&self) {
        self.set_paused(false);
    }

    pub fn is_paused(&self) -> bool {
        self.pause_tx
            .as_ref()
            .map(|tx| *tx.borrow())
            .unwrap_or(false)
    }

    fn set_paused(&self, paused: bool) {
        if let Some(tx) = &self.pause_tx {
            let _ = tx.send(paused);
            info!("capture {}", if paused { "paused" } else { "resumed" });
        }
    }

    pub async fn stop(&mut self) -> Result<()> {
        self.pause_tx = None;

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("capture loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

impl Default for CaptureController {
    fn default() -> Self {
        Self::new()
    }
}
