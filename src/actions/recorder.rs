use std::sync::Arc;

use chrono::Utc;

use crate::models::{ActionKind, InputEvent, UserAction};
use crate::platform::{process_name_for_window, ProcessInfo, WindowSystem};

use super::history::ActionLog;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Tags input events with the foreground window and appends them to the log.
#[derive(Clone)]
pub struct ActionRecorder {
    log: Arc<ActionLog>,
    window: Arc<dyn WindowSystem>,
    processes: Arc<dyn ProcessInfo>,
}

impl ActionRecorder {
    pub fn new(
        log: Arc<ActionLog>,
        window: Arc<dyn WindowSystem>,
        processes: Arc<dyn ProcessInfo>,
    ) -> Self {
        Self {
            log,
            window,
            processes,
        }
    }

    pub fn log(&self) -> &Arc<ActionLog> {
        &self.log
    }

    /// Record one input event. Lookup failures degrade to empty strings; the
    /// event itself is never dropped. Returns whether an action was appended
    /// (mouse releases are not actions).
    pub fn record(&self, event: InputEvent) -> bool {
        let Some(kind) = ActionKind::from_event(event) else {
            return false;
        };

        let (window_title, process_name) = self.resolve_foreground();
        log::debug!(
            "recorded {} action in \"{}\" ({})",
            kind.label(),
            window_title,
            process_name
        );
        self.log.push(UserAction {
            timestamp: Utc::now(),
            kind,
            window_title,
            process_name,
        });
        true
    }

    fn resolve_foreground(&self) -> (String, String) {
        let handle = match self.window.foreground_window() {
            Ok(handle) => handle,
            Err(err) => {
                log_warn!("foreground window lookup failed while recording input: {err}");
                return (String::new(), String::new());
            }
        };

        let title = self.window.window_title(handle).unwrap_or_else(|err| {
            log_warn!("window title lookup failed for {handle}: {err}");
            String::new()
        });

        let process_name =
            process_name_for_window(self.window.as_ref(), self.processes.as_ref(), handle)
                .unwrap_or_else(|err| {
                    log_warn!("process lookup failed for {handle}: {err}");
                    String::new()
                });

        (title, process_name)
    }
}
