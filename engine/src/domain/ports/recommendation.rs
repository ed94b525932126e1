//! Port for the free-text recommendation service.
//!
//! The service receives a prompt and a catalog snapshot and returns an
//! ordered list of candidate app ids. It may fail, time out, or return ids
//! absent from the catalog; the engine filters to known ids and degrades to
//! an empty result on failure.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{AppId, AppRecord};

/// Errors raised by recommendation service adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendationServiceError {
    /// The service could not be reached or timed out.
    #[error("recommendation service unreachable: {message}")]
    Unreachable {
        /// Adapter-specific failure description.
        message: String,
    },
    /// The service answered with something unusable.
    #[error("recommendation response malformed: {message}")]
    Malformed {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl RecommendationServiceError {
    /// Helper for transport-level failures.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Helper for unusable responses.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Port for free-text app discovery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Return candidate app ids for the prompt, best match first.
    async fn recommend(
        &self,
        prompt: &str,
        catalog: &[AppRecord],
    ) -> Result<Vec<AppId>, RecommendationServiceError>;
}

/// Fixture service that recommends nothing.
#[derive(Debug, Default, Clone)]
pub struct FixtureRecommendationService;

#[async_trait]
impl RecommendationService for FixtureRecommendationService {
    async fn recommend(
        &self,
        _prompt: &str,
        _catalog: &[AppRecord],
    ) -> Result<Vec<AppId>, RecommendationServiceError> {
        Ok(Vec::new())
    }
}
