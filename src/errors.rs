//! Error taxonomy of the diff engine.

use crate::artifacts::diff::revision_pair::RevisionPair;
use thiserror::Error;

pub type DiffResult<T> = Result<T, DiffError>;

#[derive(Debug, Error)]
pub enum DiffError {
    /// Revision pair, path or merge request reference does not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// The object store failed to produce one of the trees or blobs.
    #[error("unable to resolve trees for {pair}")]
    TreeResolution {
        pair: RevisionPair,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The requested retrieval mode is switched off.
    #[error("feature disabled: {0}")]
    FeatureDisabled(&'static str),

    /// Pagination input that adapters should have normalized.
    #[error("invalid pagination window: page {page}, per_page {per_page}")]
    InvalidWindow { page: usize, per_page: usize },
}

impl DiffError {
    pub fn not_found(what: impl Into<String>) -> Self {
        DiffError::NotFound(what.into())
    }

    /// Whether callers outside the core should see a plain "not found"
    ///
    /// Disabled features are reported like missing resources so that
    /// end users cannot tell them apart from absent or forbidden ones.
    pub fn is_not_found_externally(&self) -> bool {
        matches!(self, DiffError::NotFound(_) | DiffError::FeatureDisabled(_))
    }
}
