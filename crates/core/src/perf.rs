//! Per-stage timing for a document pass.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PerformanceStage {
    Init,
    Load,
    DataBind,
    Layout,
    Render,
    Dispose,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageTiming {
    pub elapsed: Duration,
    pub count: usize,
}

#[derive(Debug, Default)]
struct MonitorState {
    stages: HashMap<PerformanceStage, StageTiming>,
    keyed: HashMap<(PerformanceStage, String), StageTiming>,
    open: HashMap<PerformanceStage, Instant>,
}

/// Collects elapsed time per stage. A disabled monitor ignores every call.
#[derive(Debug)]
pub struct PerformanceMonitor {
    enabled: bool,
    state: RefCell<MonitorState>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PerformanceMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: RefCell::new(MonitorState::default()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn begin(&self, stage: PerformanceStage) {
        if self.enabled {
            self.state.borrow_mut().open.insert(stage, Instant::now());
        }
    }

    /// Ends the stage started by [`PerformanceMonitor::begin`]. Unmatched calls are ignored.
    pub fn end(&self, stage: PerformanceStage) {
        if !self.enabled {
            return;
        }
        let mut state = self.state.borrow_mut();
        if let Some(start) = state.open.remove(&stage) {
            let timing = state.stages.entry(stage).or_default();
            timing.elapsed += start.elapsed();
            timing.count += 1;
        }
    }

    /// Measures a keyed section until the returned guard drops.
    pub fn record(&self, stage: PerformanceStage, key: impl Into<String>) -> Measurement<'_> {
        Measurement {
            monitor: self,
            stage,
            key: key.into(),
            start: Instant::now(),
        }
    }

    pub fn stage(&self, stage: PerformanceStage) -> Option<StageTiming> {
        self.state.borrow().stages.get(&stage).cloned()
    }

    pub fn keyed(&self, stage: PerformanceStage, key: &str) -> Option<StageTiming> {
        self.state
            .borrow()
            .keyed
            .get(&(stage, key.to_string()))
            .cloned()
    }

    pub fn reset(&self) {
        *self.state.borrow_mut() = MonitorState::default();
    }

    pub fn log_summary(&self) {
        if !self.enabled {
            return;
        }
        let state = self.state.borrow();
        let mut stages: Vec<_> = state.stages.iter().collect();
        stages.sort_by_key(|(stage, _)| **stage);
        log::info!("=== Document Performance ===");
        for (stage, timing) in stages {
            log::info!("{:?}: {:?} ({} runs)", stage, timing.elapsed, timing.count);
        }
        for ((stage, key), timing) in state.keyed.iter() {
            log::info!("{:?}/{}: {:?} ({} runs)", stage, key, timing.elapsed, timing.count);
        }
    }

    fn finish(&self, stage: PerformanceStage, key: String, elapsed: Duration) {
        if !self.enabled {
            return;
        }
        let mut state = self.state.borrow_mut();
        let timing = state.keyed.entry((stage, key)).or_default();
        timing.elapsed += elapsed;
        timing.count += 1;
    }
}

pub struct Measurement<'a> {
    monitor: &'a PerformanceMonitor,
    stage: PerformanceStage,
    key: String,
    start: Instant,
}

impl Drop for Measurement<'_> {
    fn drop(&mut self) {
        let key = std::mem::take(&mut self.key);
        self.monitor.finish(self.stage, key, self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_end_accumulates() {
        let monitor = PerformanceMonitor::new(true);
        monitor.begin(PerformanceStage::Load);
        monitor.end(PerformanceStage::Load);
        monitor.begin(PerformanceStage::Load);
        monitor.end(PerformanceStage::Load);

        assert_eq!(monitor.stage(PerformanceStage::Load).unwrap().count, 2);
        assert!(monitor.stage(PerformanceStage::Init).is_none());
    }

    #[test]
    fn test_record_guard() {
        let monitor = PerformanceMonitor::new(true);
        {
            let _m = monitor.record(PerformanceStage::Layout, "page-1");
        }
        assert_eq!(monitor.keyed(PerformanceStage::Layout, "page-1").unwrap().count, 1);
    }

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let monitor = PerformanceMonitor::disabled();
        monitor.begin(PerformanceStage::Render);
        monitor.end(PerformanceStage::Render);
        drop(monitor.record(PerformanceStage::Render, "x"));
        assert!(monitor.stage(PerformanceStage::Render).is_none());
        assert!(monitor.keyed(PerformanceStage::Render, "x").is_none());
    }
}
