use serde::{Deserialize, Serialize};

use crate::error::ProcessResolutionError;

use super::{ProcessInfo, WindowHandle, WindowSystem};

/// A window the user can pick for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub title: String,
    pub handle: WindowHandle,
}

/// Name of the process that owns `handle`.
pub fn process_name_for_window(
    window: &dyn WindowSystem,
    processes: &dyn ProcessInfo,
    handle: WindowHandle,
) -> Result<String, ProcessResolutionError> {
    let pid = window.window_process_id(handle)?;
    processes.process_name(pid)
}

/// Visible, titled windows sorted case-insensitively by title.
/// `exclude_title` drops the host application's own window.
pub fn list_selectable_windows(
    window: &dyn WindowSystem,
    exclude_title: &str,
) -> Vec<WindowEntry> {
    let mut entries: Vec<WindowEntry> = window
        .enumerate_visible_windows()
        .into_iter()
        .filter(|(title, _)| !title.is_empty() && title != exclude_title)
        .map(|(title, handle)| WindowEntry { title, handle })
        .collect();

    entries.sort_by_cached_key(|entry| entry.title.to_lowercase());
    entries
}
