use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::types::AvailabilityConfig;
use crate::error::{Result, StaysError};
use crate::ports::availability::{AvailabilityClient, AvailabilityResult};

/// Remote reservation collaborator. One GET per check and no retries: the
/// search path counts a failed answer as available, so a retry loop would
/// only stretch the fan-in while changing nothing.
pub struct ReservationsApi {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct AvailabilityBody {
    #[serde(default)]
    property_id: Option<u32>,
    available: bool,
}

impl ReservationsApi {
    pub fn new(
        endpoint: &str,
        config: &AvailabilityConfig,
    ) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AvailabilityClient for ReservationsApi {
    async fn check_availability(
        &self,
        property_id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityResult> {
        let url = format!("{}/api/availability", self.base_url);
        debug!(property_id, %check_in, %check_out, "querying reservations service");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("property_id", property_id.to_string()),
                ("check_in", check_in.to_string()),
                ("check_out", check_out.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StaysError::Availability {
                reason: format!("reservations service answered HTTP {status}"),
            });
        }

        let body: AvailabilityBody = response.json().await?;
        Ok(AvailabilityResult {
            property_id: body.property_id.unwrap_or(property_id),
            available: body.available,
        })
    }
}
