use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::browse;
use crate::domain::criteria::{SearchCriteria, StayDates, parse_stay_date};
use crate::domain::pricing::{StayQuote, nights_between, quote_stay};
use crate::domain::property::{PropertyRecord, StaySummary};
use crate::error::{Result, StaysError};
use crate::ports::availability::{AvailabilityClient, AvailabilityResult};
use crate::ports::catalog::CatalogSource;

use super::{filter, rank, resolve};

/// Read-only query surface over the injected catalog and the reservation
/// collaborator. Every call is stateless; concurrent searches share the
/// catalog by reference and never contend.
pub struct SearchService {
    catalog: Arc<dyn CatalogSource>,
    availability: Arc<dyn AvailabilityClient>,
}

impl SearchService {
    pub fn new(catalog: Arc<dyn CatalogSource>, availability: Arc<dyn AvailabilityClient>) -> Self {
        Self {
            catalog,
            availability,
        }
    }

    /// Filter, resolve availability, rank, project. Infallible by contract:
    /// a query that matches nothing or cannot be interpreted returns the
    /// empty list rather than an error.
    pub async fn search(&self, criteria: &SearchCriteria) -> Vec<StaySummary> {
        let catalog = self.catalog.properties();
        let candidates = filter::filter_catalog(catalog, criteria);
        debug!(
            catalog = catalog.len(),
            candidates = candidates.len(),
            location = %criteria.location,
            "catalog filtered"
        );

        let candidates = match criteria.stay_dates() {
            StayDates::Open => candidates,
            StayDates::Range {
                check_in,
                check_out,
            } => {
                resolve::resolve_available(&self.availability, candidates, check_in, check_out)
                    .await
            }
            StayDates::Invalid => {
                warn!(
                    check_in = ?criteria.check_in,
                    check_out = ?criteria.check_out,
                    "unparseable date pair, failing closed"
                );
                return Vec::new();
            }
        };

        let ranked = rank::rank(candidates, criteria.sort_by, criteria.sort_order);
        ranked.iter().map(StaySummary::from_record).collect()
    }

    /// Stay quote for one property. `_guests` is accepted for parity with
    /// the booking form; party size does not affect the amount.
    pub fn quote(
        &self,
        property_id: u32,
        check_in: &str,
        check_out: &str,
        _guests: Option<u32>,
    ) -> Result<StayQuote> {
        let property = self
            .catalog
            .property(property_id)
            .ok_or(StaysError::PropertyNotFound { id: property_id })?;
        let check_in = parse_stay_date(check_in)?;
        let check_out = parse_stay_date(check_out)?;
        let nights = nights_between(check_in, check_out);
        Ok(quote_stay(property.price, nights, &property.pricing))
    }

    /// Direct collaborator passthrough. Unlike the search path this
    /// propagates collaborator errors to the caller.
    pub async fn availability(
        &self,
        property_id: u32,
        check_in: &str,
        check_out: &str,
    ) -> Result<AvailabilityResult> {
        if self.catalog.property(property_id).is_none() {
            return Err(StaysError::PropertyNotFound { id: property_id });
        }
        let check_in = parse_stay_date(check_in)?;
        let check_out = parse_stay_date(check_out)?;
        self.availability
            .check_availability(property_id, check_in, check_out)
            .await
    }

    pub fn property(&self, id: u32) -> Option<PropertyRecord> {
        self.catalog.property(id).cloned()
    }

    pub fn featured(&self, limit: usize) -> Vec<StaySummary> {
        browse::featured(self.catalog.properties(), limit)
            .iter()
            .map(StaySummary::from_record)
            .collect()
    }

    pub fn popular(&self, limit: usize) -> Vec<StaySummary> {
        browse::popular(self.catalog.properties(), limit)
            .iter()
            .map(StaySummary::from_record)
            .collect()
    }

    pub fn similar(&self, property_id: u32, limit: usize) -> Vec<StaySummary> {
        browse::similar(self.catalog.properties(), property_id, limit)
            .iter()
            .map(StaySummary::from_record)
            .collect()
    }

    pub fn locations(&self) -> Vec<String> {
        browse::locations(self.catalog.properties())
    }

    pub fn categories(&self) -> Vec<String> {
        browse::categories(self.catalog.properties())
    }
}
