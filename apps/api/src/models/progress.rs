use serde::{Deserialize, Serialize};

/// A snapshot of run progress: percentage in `[0, 100]` plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    pub percent: f64,
    pub message: String,
}

impl ProgressState {
    pub fn new(percent: f64, message: impl Into<String>) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
            message: message.into(),
        }
    }

    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }
}
