use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One collaborator answer for one property and date range. Consumed within
/// the search that requested it, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub property_id: u32,
    pub available: bool,
}

/// External reservation collaborator. Errors are per property; callers on
/// the search path treat a failed check as available.
#[async_trait]
pub trait AvailabilityClient: Send + Sync {
    async fn check_availability(
        &self,
        property_id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityResult>;
}
