use std::time::{Duration, Instant};

/// Status of a step in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Step is running or ran forward successfully.
    Executed,
    /// Step failed and had no compensation.
    Failed,
    /// Step failed and its compensation succeeded.
    Compensated,
    /// Step failed and its compensation failed too.
    CompensationFailed,
}

/// Record of a step's execution in a plan.
#[derive(Debug)]
pub struct StepRecord {
    /// Name of the step.
    pub name: String,
    /// Current status.
    pub status: StepStatus,
    /// When the step started executing.
    pub started_at: Instant,
    /// When the step completed (forward or compensation).
    pub completed_at: Option<Instant>,
    /// Description of the compensation that ran (if any).
    pub compensation_description: Option<String>,
}

impl StepRecord {
    /// Time from start to completion, once the step has completed.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.completed_at
            .map(|completed_at| completed_at.duration_since(self.started_at))
    }
}

/// Audit log tracking every step a plan attempted.
#[derive(Debug, Default)]
pub struct RewindAuditLog {
    records: Vec<StepRecord>,
}

impl RewindAuditLog {
    /// Create a new empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, name: &str) {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Executed,
            started_at: Instant::now(),
            completed_at: None,
            compensation_description: None,
        });
    }

    pub(crate) fn record_success(&mut self) {
        self.finish_last(StepStatus::Executed, None);
    }

    pub(crate) fn record_failure(&mut self) {
        self.finish_last(StepStatus::Failed, None);
    }

    pub(crate) fn record_compensated(&mut self, description: String) {
        self.finish_last(StepStatus::Compensated, Some(description));
    }

    pub(crate) fn record_compensation_failed(&mut self, description: String) {
        self.finish_last(StepStatus::CompensationFailed, Some(description));
    }

    fn finish_last(&mut self, status: StepStatus, compensation_description: Option<String>) {
        if let Some(record) = self.records.last_mut() {
            record.status = status;
            record.completed_at = Some(Instant::now());
            if compensation_description.is_some() {
                record.compensation_description = compensation_description;
            }
        }
    }

    /// Get all records in the audit log.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Get a summary of the plan execution for display.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let status = match record.status {
                StepStatus::Executed => "✓",
                StepStatus::Failed => "✗",
                StepStatus::Compensated => "↩",
                StepStatus::CompensationFailed => "⚠",
            };
            match record.duration() {
                Some(duration) => {
                    lines.push(format!("{status} {} ({} ms)", record.name, duration.as_millis()));
                }
                None => lines.push(format!("{status} {}", record.name)),
            }
        }
        lines.join("\n")
    }
}
