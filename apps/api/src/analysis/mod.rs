// Gene analysis pipeline.
// Implements: gene-list parsing, enrichment, per-gene visual generation with placeholders,
// paced sequential orchestration with progress reporting.
// All remote calls go through the AnalysisBackend seam. No direct Gemini calls here.

pub mod backend;
pub mod handlers;
pub mod orchestrator;
pub mod pacing;
pub mod prompts;
pub mod visuals;

#[cfg(test)]
pub mod testing;

pub use backend::{AnalysisBackend, GeminiBackend};
pub use orchestrator::{run_analysis, AnalysisError, ProgressSink};
pub use pacing::{Pacer, TokioPacer};
