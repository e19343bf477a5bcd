//! Run state machine: `Idle → Running → Succeeded | Failed`, restartable from any
//! resolved state.
//!
//! `transition` is the only place a new state is computed. Export runs inside
//! `Succeeded` (the `exporting` flag) so a failed export never loses the report.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AnalysisReport, ProgressState};

pub const EXPORT_FAILED_MESSAGE: &str = "Failed to generate PDF.";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running {
        run_id: Uuid,
        progress: ProgressState,
    },
    Succeeded {
        run_id: Uuid,
        report: Arc<AnalysisReport>,
        progress: ProgressState,
        exporting: bool,
        export_error: Option<String>,
    },
    Failed {
        run_id: Uuid,
        message: String,
        progress: ProgressState,
    },
}

#[derive(Debug, Clone)]
pub enum RunEvent {
    Started { run_id: Uuid },
    Progressed(ProgressState),
    Completed(Arc<AnalysisReport>),
    Aborted(String),
    ExportStarted,
    ExportFinished,
    ExportFailed(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot apply {event} while {state}")]
pub struct InvalidTransition {
    pub state: &'static str,
    pub event: &'static str,
}

impl RunState {
    pub fn name(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running { .. } => "running",
            RunState::Succeeded {
                exporting: true, ..
            } => "exporting",
            RunState::Succeeded { .. } => "succeeded",
            RunState::Failed { .. } => "failed",
        }
    }

    /// A run or an export is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            RunState::Running { .. }
                | RunState::Succeeded {
                    exporting: true,
                    ..
                }
        )
    }

    pub fn report(&self) -> Option<&Arc<AnalysisReport>> {
        match self {
            RunState::Succeeded { report, .. } => Some(report),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn progress(&self) -> Option<&ProgressState> {
        match self {
            RunState::Idle => None,
            RunState::Running { progress, .. }
            | RunState::Succeeded { progress, .. }
            | RunState::Failed { progress, .. } => Some(progress),
        }
    }
}

impl RunEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RunEvent::Started { .. } => "started",
            RunEvent::Progressed(_) => "progressed",
            RunEvent::Completed(_) => "completed",
            RunEvent::Aborted(_) => "aborted",
            RunEvent::ExportStarted => "export_started",
            RunEvent::ExportFinished => "export_finished",
            RunEvent::ExportFailed(_) => "export_failed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computes the state that follows `state` after `event`.
pub fn transition(state: &RunState, event: RunEvent) -> Result<RunState, InvalidTransition> {
    let invalid = |event: &RunEvent| InvalidTransition {
        state: state.name(),
        event: event.name(),
    };

    match (state, event) {
        // A new run discards whatever the previous one left behind.
        (s, RunEvent::Started { run_id }) if !s.is_busy() => Ok(RunState::Running {
            run_id,
            progress: ProgressState::new(0.0, "Starting analysis..."),
        }),

        (RunState::Running { run_id, .. }, RunEvent::Progressed(progress)) => {
            Ok(RunState::Running {
                run_id: *run_id,
                progress,
            })
        }

        (RunState::Running { run_id, .. }, RunEvent::Completed(report)) => {
            Ok(RunState::Succeeded {
                run_id: *run_id,
                report,
                progress: ProgressState::new(100.0, "Analysis complete!"),
                exporting: false,
                export_error: None,
            })
        }

        (RunState::Running { run_id, progress }, RunEvent::Aborted(message)) => {
            Ok(RunState::Failed {
                run_id: *run_id,
                message,
                progress: progress.clone(),
            })
        }

        (
            RunState::Succeeded {
                run_id,
                report,
                exporting: false,
                ..
            },
            RunEvent::ExportStarted,
        ) => Ok(RunState::Succeeded {
            run_id: *run_id,
            report: Arc::clone(report),
            progress: ProgressState::new(0.0, "Generating PDF..."),
            exporting: true,
            export_error: None,
        }),

        (
            RunState::Succeeded {
                run_id,
                report,
                exporting: true,
                ..
            },
            RunEvent::Progressed(progress),
        ) => Ok(RunState::Succeeded {
            run_id: *run_id,
            report: Arc::clone(report),
            progress,
            exporting: true,
            export_error: None,
        }),

        (
            RunState::Succeeded {
                run_id,
                report,
                exporting: true,
                ..
            },
            RunEvent::ExportFinished,
        ) => Ok(RunState::Succeeded {
            run_id: *run_id,
            report: Arc::clone(report),
            progress: ProgressState::new(100.0, "PDF generated!"),
            exporting: false,
            export_error: None,
        }),

        (
            RunState::Succeeded {
                run_id,
                report,
                progress,
                exporting: true,
                ..
            },
            RunEvent::ExportFailed(message),
        ) => Ok(RunState::Succeeded {
            run_id: *run_id,
            report: Arc::clone(report),
            progress: progress.clone(),
            exporting: false,
            export_error: Some(message),
        }),

        (_, event) => Err(invalid(&event)),
    }
}
