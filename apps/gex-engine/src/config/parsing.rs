//! Numeric parsing policy.

use serde::{Deserialize, Serialize};

use crate::numeric::MalformedCellPolicy;

/// How Strike/OI text is turned into numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Behaviour on a cell that fails lenient parsing.
    #[serde(default)]
    pub malformed_cells: MalformedCellPolicy,
}
