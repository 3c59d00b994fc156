//! Rate acquisition abstractions

use crate::core::error::Result;
use crate::core::table::RateTable;
use async_trait::async_trait;

/// A remote feed that produces a complete rate table in one attempt.
///
/// Implementations return either a full table or an error; a partially
/// parsed feed is never returned.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<RateTable>;
}
