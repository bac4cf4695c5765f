use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Region, UserAction};

/// Text of the active window, reconstructed into lines top to bottom.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizedWindowText {
    pub window_title: String,
    pub lines: Vec<String>,
}

/// Point-in-time bundle of recent actions and the last detected regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    pub taken_at: DateTime<Utc>,
    pub recent_actions: Vec<UserAction>,
    pub active_regions: Vec<Region>,
    pub current_window: Option<String>,
}
