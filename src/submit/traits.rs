//! Trait abstraction for the submission boundary to enable mocking in tests

use crate::state::FormData;
use anyhow::Result;
use async_trait::async_trait;

/// Receives validated form data on a successful submit
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Deliver one submission. Returns a confirmation message for the user.
    async fn submit(&self, data: &FormData) -> Result<String>;
}
