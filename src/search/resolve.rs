use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::domain::property::PropertyRecord;
use crate::error::Result;
use crate::ports::availability::{AvailabilityClient, AvailabilityResult};

/// Availability fan-out over the candidate set: one query per property, all
/// issued concurrently, gathered in full before any filtering. Elapsed time
/// is bounded by the slowest single answer.
///
/// Fail open: a failed check (transport error, bad body, panicked task)
/// counts as available, so a dead collaborator degrades to date-less search
/// results instead of an empty page. Candidates keep their incoming order
/// regardless of response arrival order.
pub async fn resolve_available(
    client: &Arc<dyn AvailabilityClient>,
    candidates: Vec<PropertyRecord>,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Vec<PropertyRecord> {
    if candidates.is_empty() {
        return candidates;
    }

    let mut checks: JoinSet<(u32, Result<AvailabilityResult>)> = JoinSet::new();
    for property in &candidates {
        let client = Arc::clone(client);
        let id = property.id;
        checks
            .spawn(async move { (id, client.check_availability(id, check_in, check_out).await) });
    }

    // Only a definite "not available" removes a candidate.
    let mut unavailable: HashSet<u32> = HashSet::new();
    while let Some(joined) = checks.join_next().await {
        match joined {
            Ok((id, Ok(result))) => {
                if !result.available {
                    unavailable.insert(id);
                }
            }
            Ok((id, Err(error))) => {
                warn!(
                    property_id = id,
                    error = %error,
                    "availability check failed, assuming available"
                );
            }
            Err(join_error) => {
                warn!(error = %join_error, "availability task died, assuming available");
            }
        }
    }

    let kept: Vec<PropertyRecord> = candidates
        .into_iter()
        .filter(|p| !unavailable.contains(&p.id))
        .collect();
    debug!(kept = kept.len(), dropped = unavailable.len(), "availability resolved");
    kept
}
