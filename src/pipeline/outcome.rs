//! Per-item results and per-phase tallies.

use std::fmt;

/// Outcome class of one unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkStatus {
    Success,
    Fail,
    Skipped,
    NotFound,
}

impl WorkStatus {
    /// Upper-case tag printed in front of the message
    pub fn tag(self) -> &'static str {
        match self {
            WorkStatus::Success => "SUCCESS",
            WorkStatus::Fail => "FAIL",
            WorkStatus::Skipped => "SKIPPED",
            WorkStatus::NotFound => "NOT_FOUND",
        }
    }
}

/// Status plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkResult {
    pub status: WorkStatus,
    pub message: String,
}

impl WorkResult {
    pub fn new(status: WorkStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(WorkStatus::Success, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(WorkStatus::Fail, message)
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self::new(WorkStatus::Skipped, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(WorkStatus::NotFound, message)
    }
}

impl fmt::Display for WorkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.tag(), self.message)
    }
}

/// Counts of each status seen in one phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseSummary {
    pub success: usize,
    pub fail: usize,
    pub skipped: usize,
    pub not_found: usize,
}

impl PhaseSummary {
    pub fn record(&mut self, result: &WorkResult) {
        match result.status {
            WorkStatus::Success => self.success += 1,
            WorkStatus::Fail => self.fail += 1,
            WorkStatus::Skipped => self.skipped += 1,
            WorkStatus::NotFound => self.not_found += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.success + self.fail + self.skipped + self.not_found
    }
}

impl fmt::Display for PhaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed, {} skipped, {} not found",
            self.success, self.fail, self.skipped, self.not_found
        )
    }
}
