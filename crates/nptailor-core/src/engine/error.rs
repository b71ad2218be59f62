use thiserror::Error;

use super::config::ConfigError;
use super::plan::SubstrateSet;
use crate::core::chemistry::edits::EditError;
use crate::core::cluster::domain::DomainType;
use crate::core::models::molecule::GraphError;

/// Why one reaction could not be applied to a branch's scaffold.
///
/// Every variant is recoverable at the branch boundary: the combination that raised
/// it is discarded and the search moves on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReactionError {
    #[error("No residue at backbone position {position}")]
    MissingResidue { position: usize },

    #[error("Invalid substrate structure: {0}")]
    InvalidSubstrateStructure(String),

    #[error("Scaffold generation failed: {0}")]
    ScaffoldGeneration(String),
}

impl ReactionError {
    pub(crate) fn substrate(reason: impl Into<String>) -> Self {
        Self::InvalidSubstrateStructure(reason.into())
    }

    pub(crate) fn generation(reason: impl Into<String>) -> Self {
        Self::ScaffoldGeneration(reason.into())
    }
}

impl From<EditError> for ReactionError {
    fn from(error: EditError) -> Self {
        Self::ScaffoldGeneration(error.to_string())
    }
}

impl From<GraphError> for ReactionError {
    fn from(error: GraphError) -> Self {
        Self::ScaffoldGeneration(error.to_string())
    }
}

/// A discarded plan combination, attributed to the plan that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Discard {
    pub backbone: String,
    pub domain: DomainType,
    pub substrates: SubstrateSet,
    pub error: ReactionError,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
