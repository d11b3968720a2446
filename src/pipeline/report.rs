//! Operator-facing progress output for the orchestrator.

use std::fmt;

use super::convert::TargetFormat;
use super::outcome::{PhaseSummary, WorkResult};

/// The two orchestrator phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Download,
    Convert(TargetFormat),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Download => write!(f, "PHASE 1: DOWNLOADING SONGS"),
            Phase::Convert(format) => {
                write!(f, "PHASE 2: CONVERTING TO {}", format.label())
            }
        }
    }
}

/// Receives progress from [`Orchestrator::run`](super::Orchestrator::run).
pub trait Reporter {
    fn phase_started(&mut self, phase: Phase, workers: usize);
    /// Free-form status line (discovery counts, early exits)
    fn notice(&mut self, message: &str);
    /// One item finished
    fn item(&mut self, result: &WorkResult);
    fn phase_finished(&mut self, phase: Phase, summary: &PhaseSummary);
    fn finished(&mut self);
}

const RULE_WIDTH: usize = 50;

/// Prints progress to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    phases_started: usize,
}

impl Reporter for ConsoleReporter {
    fn phase_started(&mut self, phase: Phase, workers: usize) {
        if self.phases_started > 0 {
            println!();
        }
        self.phases_started += 1;
        let rule = "=".repeat(RULE_WIDTH);
        println!("{}", rule);
        println!("{} (using up to {} workers)", phase, workers);
        println!("{}", rule);
    }

    fn notice(&mut self, message: &str) {
        println!("{}", message);
    }

    fn item(&mut self, result: &WorkResult) {
        println!("{}", result);
    }

    fn phase_finished(&mut self, _phase: Phase, summary: &PhaseSummary) {
        if summary.total() > 0 {
            println!("Done: {}", summary);
        }
    }

    fn finished(&mut self) {
        let rule = "=".repeat(RULE_WIDTH);
        println!("\n{}", rule);
        println!("All processes complete.");
        println!("{}", rule);
    }
}

/// Records everything for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub started: Vec<(Phase, usize)>,
    pub notices: Vec<String>,
    pub items: Vec<WorkResult>,
    pub summaries: Vec<(Phase, PhaseSummary)>,
    pub finished: bool,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn phase_started(&mut self, phase: Phase, workers: usize) {
        self.started.push((phase, workers));
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn item(&mut self, result: &WorkResult) {
        self.items.push(result.clone());
    }

    fn phase_finished(&mut self, phase: Phase, summary: &PhaseSummary) {
        self.summaries.push((phase, *summary));
    }

    fn finished(&mut self) {
        self.finished = true;
    }
}
