mod types;

pub use types::{CycleMetrics, MetricsSnapshot, SystemMetrics};

use std::sync::Arc;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::sync::Mutex;

const MAX_RECENT_CYCLES: usize = 20;

pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsState>>,
}

struct MetricsState {
    recent_cycles: Vec<CycleMetrics>,
    cycle_count: u64,
    skipped_count: u64,
    ocr_failure_count: u64,
    system: System,
    pid: Pid,
}

impl MetricsState {
    fn sample_process(&mut self) -> SystemMetrics {
        let pid = self.pid;
        self.system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        match self.system.process(pid) {
            Some(process) => SystemMetrics {
                cpu_percent: process.cpu_usage(),
                memory_mb: process.memory() as f64 / 1024.0 / 1024.0,
            },
            None => SystemMetrics::default(),
        }
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        let mut system = System::new();
        let pid = Pid::from_u32(std::process::id());

        // CPU usage is a delta between refreshes; take the baseline now.
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]));

        Self {
            inner: Arc::new(Mutex::new(MetricsState {
                recent_cycles: Vec::with_capacity(MAX_RECENT_CYCLES),
                cycle_count: 0,
                skipped_count: 0,
                ocr_failure_count: 0,
                system,
                pid,
            })),
        }
    }

    pub async fn sample_system_metrics(&self) -> SystemMetrics {
        self.inner.lock().await.sample_process()
    }

    pub async fn record_cycle(&self, metrics: CycleMetrics) {
        let mut state = self.inner.lock().await;

        state.cycle_count += 1;
        if metrics.ocr_failed {
            state.ocr_failure_count += 1;
        }

        state.recent_cycles.push(metrics);
        if state.recent_cycles.len() > MAX_RECENT_CYCLES {
            state.recent_cycles.remove(0);
        }
    }

    /// A tick that produced nothing (capture failed, timed out, or no frame).
    pub async fn record_skip(&self) {
        self.inner.lock().await.skipped_count += 1;
    }

    pub async fn get_snapshot(&self) -> MetricsSnapshot {
        let mut state = self.inner.lock().await;
        let system = state.sample_process();

        MetricsSnapshot {
            system,
            recent_cycles: state.recent_cycles.clone(),
            cycle_count: state.cycle_count,
            skipped_count: state.skipped_count,
            ocr_failure_count: state.ocr_failure_count,
        }
    }

    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        state.recent_cycles.clear();
        state.cycle_count = 0;
        state.skipped_count = 0;
        state.ocr_failure_count = 0;
        state.sample_process();
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MetricsCollector {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_only_recent_cycles() {
        let collector = MetricsCollector::new();
        for n in 0..25 {
            collector
                .record_cycle(CycleMetrics {
                    lines: n,
                    ocr_failed: n % 5 == 0,
                    ..CycleMetrics::default()
                })
                .await;
        }
        collector.record_skip().await;

        let snapshot = collector.get_snapshot().await;
        assert_eq!(snapshot.cycle_count, 25);
        assert_eq!(snapshot.skipped_count, 1);
        assert_eq!(snapshot.ocr_failure_count, 5);
        assert_eq!(snapshot.recent_cycles.len(), MAX_RECENT_CYCLES);
        assert_eq!(snapshot.recent_cycles[0].lines, 5);
        assert!(snapshot.system.memory_mb > 0.0);
    }

    #[tokio::test]
    async fn reset_clears_counters() {
        let collector = MetricsCollector::new();
        collector.record_cycle(CycleMetrics::default()).await;
        collector.reset().await;

        let snapshot = collector.get_snapshot().await;
        assert_eq!(snapshot.cycle_count, 0);
        assert!(snapshot.recent_cycles.is_empty());
    }
}
