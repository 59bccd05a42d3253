//! Named timers.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Result of stopping a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSpan {
    /// Label of the stopped timer
    pub label: String,
    /// Time between start and stop
    pub elapsed: Duration,
}

impl TimerSpan {
    /// Elapsed time in whole milliseconds.
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Start-time ledger keyed by label.
///
/// Labels are unique: starting an existing label again restarts it. Timers
/// started without a label get `timer_<n>` and are also remembered on a
/// stack so an unlabeled `stop` ends the most recent of them.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    running: HashMap<String, Instant>,
    auto_labels: Vec<String>,
    counter: u64,
}

impl TimerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer now. Returns its label.
    pub fn start(&mut self, label: Option<&str>) -> String {
        self.start_at(label, Instant::now())
    }

    /// Start a timer at an explicit instant.
    pub fn start_at(&mut self, label: Option<&str>, now: Instant) -> String {
        let label = match label {
            Some(label) => label.to_string(),
            None => {
                let label = self.next_auto_label();
                self.auto_labels.push(label.clone());
                label
            }
        };
        self.running.insert(label.clone(), now);
        label
    }

    /// Stop a timer now. `None` when no matching timer is running.
    pub fn stop(&mut self, label: Option<&str>) -> Option<TimerSpan> {
        self.stop_at(label, Instant::now())
    }

    /// Stop a timer at an explicit instant.
    ///
    /// Without a label this stops the most recently started auto-labeled
    /// timer that is still running. Elapsed time saturates at zero.
    pub fn stop_at(&mut self, label: Option<&str>, now: Instant) -> Option<TimerSpan> {
        let label = match label {
            Some(label) => label.to_string(),
            None => self.pop_running_auto_label()?,
        };
        let started = self.running.remove(&label)?;
        self.auto_labels.retain(|l| l != &label);

        Some(TimerSpan {
            label,
            elapsed: now.saturating_duration_since(started),
        })
    }

    /// Whether `label` is running.
    pub fn is_running(&self, label: &str) -> bool {
        self.running.contains_key(label)
    }

    /// Number of running timers.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Whether no timer is running.
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    fn next_auto_label(&mut self) -> String {
        loop {
            self.counter += 1;
            let candidate = format!("timer_{}", self.counter);
            if !self.running.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn pop_running_auto_label(&mut self) -> Option<String> {
        while let Some(label) = self.auto_labels.pop() {
            if self.running.contains_key(&label) {
                return Some(label);
            }
        }
        None
    }
}
