use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timings and counts for one capture cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleMetrics {
    pub timestamp: DateTime<Utc>,
    pub capture_ms: u64,
    pub detect_ms: u64,
    pub organize_ms: u64,
    pub total_ms: u64,
    pub frame_width: u32,
    pub frame_height: u32,
    pub text_regions: usize,
    pub ui_regions: usize,
    pub lines: usize,
    pub ocr_failed: bool,
    pub cpu_percent: f32,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub cpu_percent: f32,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub system: SystemMetrics,
    pub recent_cycles: Vec<CycleMetrics>,
    pub cycle_count: u64,
    pub skipped_count: u64,
    pub ocr_failure_count: u64,
}
