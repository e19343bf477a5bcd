pub mod gene;
pub mod progress;
pub mod report;
pub mod viewer;

pub use gene::{parse_gene_list, GeneId, SAMPLE_GENE_LIST};
pub use progress::ProgressState;
pub use report::{AnalysisReport, EnrichmentTerm, GeneReport, GeneVisual, ImageRef};
pub use viewer::ViewerKind;
