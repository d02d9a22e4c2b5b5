use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ports::availability::{AvailabilityClient, AvailabilityResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: u32,
    pub property_id: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
}

impl Booking {
    /// A requested stay clashes when it starts inside the booking, ends
    /// inside it, or envelops it. Back-to-back stays (checkout on the other
    /// party's checkin day) do not clash.
    fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        (check_in >= self.check_in && check_in < self.check_out)
            || (check_out > self.check_in && check_out <= self.check_out)
            || (check_in <= self.check_in && check_out >= self.check_out)
    }
}

/// Reservation collaborator backed by an in-memory booking list, used when
/// no remote endpoint is configured. A property is unavailable iff some
/// non-cancelled booking for it overlaps the requested range.
pub struct BookingLedger {
    bookings: RwLock<Vec<Booking>>,
}

impl BookingLedger {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: RwLock::new(bookings),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let bookings: Vec<Booking> = serde_json::from_str(&raw)?;
        tracing::info!(count = bookings.len(), path = %path.display(), "booking ledger loaded");
        Ok(Self::new(bookings))
    }

    /// Demo seeding hook; the query pipeline itself never writes.
    pub fn record(&self, booking: Booking) {
        if let Ok(mut bookings) = self.bookings.write() {
            bookings.push(booking);
        } else {
            tracing::error!("booking ledger lock poisoned, dropping booking");
        }
    }
}

#[async_trait]
impl AvailabilityClient for BookingLedger {
    async fn check_availability(
        &self,
        property_id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityResult> {
        let Ok(bookings) = self.bookings.read() else {
            tracing::error!("booking ledger lock poisoned, answering available");
            return Ok(AvailabilityResult {
                property_id,
                available: true,
            });
        };
        let conflict = bookings.iter().any(|b| {
            b.property_id == property_id
                && b.status != BookingStatus::Cancelled
                && b.overlaps(check_in, check_out)
        });
        Ok(AvailabilityResult {
            property_id,
            available: !conflict,
        })
    }
}
