//! Reduce detected text regions to the active window's lines.

pub mod filter;
pub mod merge;

pub use filter::{select_tokens, LineToken};
pub use merge::merge_lines;

use std::sync::Arc;

use crate::config::OrganizerConfig;
use crate::geometry::{client_area_in_screen_space, Rect};
use crate::models::{OrganizedWindowText, Region};
use crate::platform::{WindowHandle, WindowSystem};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Filter, sort and merge in one go for an already-resolved client area.
pub fn organize_lines(
    regions: &[Region],
    client_area: Rect,
    config: &OrganizerConfig,
) -> Vec<String> {
    let tokens = select_tokens(regions, client_area, config);
    merge_lines(tokens, config.line_gap_px)
}

#[derive(Clone)]
pub struct TextOrganizer {
    window: Arc<dyn WindowSystem>,
    config: OrganizerConfig,
}

impl TextOrganizer {
    pub fn new(window: Arc<dyn WindowSystem>, config: OrganizerConfig) -> Self {
        Self { window, config }
    }

    /// Never fails: without usable window geometry the result has no lines.
    pub fn organize(
        &self,
        regions: &[Region],
        active_window: WindowHandle,
    ) -> OrganizedWindowText {
        let window_title = match self.window.window_title(active_window) {
            Ok(title) => title,
            Err(err) => {
                log_warn!("could not read title of window {active_window}: {err}");
                String::new()
            }
        };

        let client_area = match client_area_in_screen_space(self.window.as_ref(), active_window) {
            Ok(area) => area,
            Err(err) => {
                log_warn!("no usable client area for window {active_window}: {err}");
                return OrganizedWindowText {
                    window_title,
                    lines: Vec::new(),
                };
            }
        };

        log::debug!("organizing text for \"{window_title}\" in client area {client_area:?}");

        OrganizedWindowText {
            lines: organize_lines(regions, client_area, &self.config),
            window_title,
        }
    }
}
