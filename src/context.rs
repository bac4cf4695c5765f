//! Shared, read-mostly context: the last published detection cycle and the
//! action log, assembled into snapshots on demand.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::actions::ActionLog;
use crate::models::{ContextSnapshot, OrganizedWindowText, Region};

/// Everything one detection cycle produced. Published as a unit.
#[derive(Debug, Clone, Default)]
pub struct CycleResult {
    pub completed_at: Option<DateTime<Utc>>,
    pub regions: Vec<Region>,
    /// `None` when there was no usable active window this cycle.
    pub organized: Option<OrganizedWindowText>,
}

impl CycleResult {
    pub fn window_title(&self) -> Option<&str> {
        self.organized
            .as_ref()
            .map(|organized| organized.window_title.as_str())
    }
}

pub struct ContextState {
    actions: Arc<ActionLog>,
    latest: RwLock<Arc<CycleResult>>,
}

impl ContextState {
    pub fn new(actions: Arc<ActionLog>) -> Self {
        Self {
            actions,
            latest: RwLock::new(Arc::new(CycleResult::default())),
        }
    }

    pub fn actions(&self) -> &Arc<ActionLog> {
        &self.actions
    }

    /// Replace the previous cycle wholesale. Readers holding the old `Arc`
    /// keep a complete view of it.
    pub fn publish(&self, result: CycleResult) {
        let result = Arc::new(result);
        let mut guard = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *guard = result;
    }

    pub fn latest(&self) -> Arc<CycleResult> {
        let guard = self.latest.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn active_regions(&self) -> Vec<Region> {
        self.latest().regions.clone()
    }

    pub fn organized_text(&self) -> Option<OrganizedWindowText> {
        self.latest().organized.clone()
    }

    pub fn current_window(&self) -> Option<String> {
        self.latest().window_title().map(String::from)
    }

    /// The last `limit` actions plus the latest regions and window title.
    pub fn snapshot(&self, limit: usize) -> ContextSnapshot {
        let latest = self.latest();
        ContextSnapshot {
            taken_at: Utc::now(),
            recent_actions: self.actions.recent(limit),
            active_regions: latest.regions.clone(),
            current_window: latest.window_title().map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::models::{ActionKind, UserAction};

    fn action(key: &str) -> UserAction {
        UserAction {
            timestamp: Utc::now(),
            kind: ActionKind::KeyPress { key: key.into() },
            window_title: "Editor".into(),
            process_name: "editor".into(),
        }
    }

    fn cycle(title: &str, region_count: i32) -> CycleResult {
        CycleResult {
            completed_at: Some(Utc::now()),
            regions: (0..region_count)
                .map(|i| Region::ui_element(Rect::new(i, i, 30, 30), 0.8).unwrap())
                .collect(),
            organized: Some(OrganizedWindowText {
                window_title: title.into(),
                lines: vec!["line".into()],
            }),
        }
    }

    #[test]
    fn empty_state_snapshot() {
        let state = ContextState::new(Arc::new(ActionLog::default()));
        let snapshot = state.snapshot(5);

        assert!(snapshot.recent_actions.is_empty());
        assert!(snapshot.active_regions.is_empty());
        assert_eq!(snapshot.current_window, None);
    }

    #[test]
    fn snapshot_combines_actions_and_latest_cycle() {
        let log = Arc::new(ActionLog::default());
        for key in ["a", "b", "c"] {
            log.push(action(key));
        }
        let state = ContextState::new(Arc::clone(&log));
        state.publish(cycle("Browser", 3));

        let snapshot = state.snapshot(2);
        assert_eq!(snapshot.recent_actions.len(), 2);
        assert_eq!(snapshot.active_regions.len(), 3);
        assert_eq!(snapshot.current_window.as_deref(), Some("Browser"));
        // Reading is not consuming.
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn publish_replaces_instead_of_merging() {
        let state = ContextState::new(Arc::new(ActionLog::default()));
        state.publish(cycle("First", 5));
        let held = state.latest();

        state.publish(cycle("Second", 2));

        assert_eq!(held.regions.len(), 5);
        assert_eq!(state.active_regions().len(), 2);
        assert_eq!(state.current_window().as_deref(), Some("Second"));
    }

    #[test]
    fn readers_only_see_complete_cycles() {
        let state = Arc::new(ContextState::new(Arc::new(ActionLog::default())));

        let writer = {
            let state = Arc::clone(&state);
            std::thread::spawn(move || {
                for n in 1..200 {
                    state.publish(cycle(&format!("w{n}"), n));
                }
            })
        };

        for _ in 0..500 {
            let latest = state.latest();
            if let Some(title) = latest.window_title() {
                let n: usize = title.trim_start_matches('w').parse().unwrap();
                assert_eq!(latest.regions.len(), n);
            }
        }
        writer.join().unwrap();
    }
}
