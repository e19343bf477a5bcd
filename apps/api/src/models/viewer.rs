use std::fmt;

use serde::{Deserialize, Serialize};

/// The five eFP viewer kinds a report can contain.
///
/// Declaration order is the canonical order in which visuals are generated and shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerKind {
    TissueExpression,
    InteractionNetwork,
    SubcellularLocalization,
    WorldMap,
    PlantAnatomy,
}

impl ViewerKind {
    pub const ALL: [ViewerKind; 5] = [
        ViewerKind::TissueExpression,
        ViewerKind::InteractionNetwork,
        ViewerKind::SubcellularLocalization,
        ViewerKind::WorldMap,
        ViewerKind::PlantAnatomy,
    ];

    /// Human-readable label used in prompts and in the rendered report.
    pub fn label(self) -> &'static str {
        match self {
            ViewerKind::TissueExpression => "Tissue Expression (eFP)",
            ViewerKind::InteractionNetwork => "Interaction Network",
            ViewerKind::SubcellularLocalization => "Subcellular Localization",
            ViewerKind::WorldMap => "World eFP",
            ViewerKind::PlantAnatomy => "Plant Anatomy",
        }
    }

    /// Sorts the requested kinds into canonical order and removes duplicates.
    pub fn normalize(requested: &[ViewerKind]) -> Vec<ViewerKind> {
        let mut kinds = requested.to_vec();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

impl fmt::Display for ViewerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
