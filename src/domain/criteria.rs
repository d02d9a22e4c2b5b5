use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StaysError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Rating,
    #[default]
    Popularity,
    /// Offered by the product surface but not computable from the catalog;
    /// ranking leaves the order untouched.
    Distance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Case-insensitive needle matched against location and name.
    /// Empty matches every property.
    pub location: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    /// Party size. Carried through for the collaborator but deliberately
    /// not a filter predicate; capacity is settled at booking time.
    pub guests: u32,
    pub min_price: f64,
    pub max_price: f64,
    /// Required amenities; every one must be present, exact match.
    pub amenities: Vec<String>,
    /// Rating floor. Zero or below means unconstrained.
    pub min_rating: f64,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            location: String::new(),
            check_in: None,
            check_out: None,
            guests: 1,
            min_price: 0.0,
            max_price: f64::MAX,
            amenities: Vec::new(),
            min_rating: 0.0,
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Outcome of resolving the criteria's date pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayDates {
    /// No usable pair; availability resolution is skipped.
    Open,
    Range {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    /// Both dates supplied but at least one unparseable. Searches fail
    /// closed on this instead of erroring.
    Invalid,
}

impl SearchCriteria {
    /// A half pair (only one date) carries no constraint, same as none.
    pub fn stay_dates(&self) -> StayDates {
        match (&self.check_in, &self.check_out) {
            (Some(ci), Some(co)) => {
                match (
                    NaiveDate::parse_from_str(ci, DATE_FORMAT),
                    NaiveDate::parse_from_str(co, DATE_FORMAT),
                ) {
                    (Ok(check_in), Ok(check_out)) => StayDates::Range {
                        check_in,
                        check_out,
                    },
                    _ => StayDates::Invalid,
                }
            }
            _ => StayDates::Open,
        }
    }
}

/// Strict date parse for the paths that report errors (quotes, direct
/// availability checks).
pub fn parse_stay_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| StaysError::InvalidParams {
        reason: format!("invalid date '{value}', expected YYYY-MM-DD"),
    })
}
