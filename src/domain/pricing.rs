#![allow(clippy::cast_precision_loss)] // Night counts are small enough for f64

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shortest stay that earns the monthly discount.
pub const MONTHLY_STAY_NIGHTS: i64 = 28;
/// Shortest stay that earns the weekly discount.
pub const WEEKLY_STAY_NIGHTS: i64 = 7;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-property pricing terms. Absent in catalog JSON means all zeros:
/// no fees, no length-of-stay discounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    #[serde(default)]
    pub cleaning_fee: f64,
    #[serde(default)]
    pub service_fee: f64,
    #[serde(default)]
    pub weekly_discount: f64,
    #[serde(default)]
    pub monthly_discount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountTier {
    None,
    Weekly,
    Monthly,
}

impl DiscountTier {
    /// Tier for a stay length. Tiers are mutually exclusive, longest wins:
    /// 28 nights and over is monthly, 7 to 27 is weekly, below 7 none.
    pub fn for_nights(nights: i64) -> Self {
        if nights >= MONTHLY_STAY_NIGHTS {
            Self::Monthly
        } else if nights >= WEEKLY_STAY_NIGHTS {
            Self::Weekly
        } else {
            Self::None
        }
    }

    pub fn percentage(self, policy: &PricingPolicy) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Weekly => policy.weekly_discount,
            Self::Monthly => policy.monthly_discount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayQuote {
    pub nights: i64,
    pub nightly_rate: f64,
    /// Undiscounted `nightly_rate * nights`.
    pub subtotal: f64,
    pub tier: DiscountTier,
    /// Amount subtracted by the winning tier.
    pub discount: f64,
    /// Flat cleaning + service fees, never discounted.
    pub fees: f64,
    pub total: f64,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Whole-night count for a date range, floored at one: a same-day or
/// inverted range still bills a single night.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(1)
}

pub fn quote_stay(nightly_rate: f64, nights: i64, policy: &PricingPolicy) -> StayQuote {
    let nights = nights.max(1);
    let subtotal = nightly_rate * nights as f64;
    let tier = DiscountTier::for_nights(nights);
    let discount = subtotal * tier.percentage(policy) / 100.0;
    let fees = policy.cleaning_fee + policy.service_fee;
    StayQuote {
        nights,
        nightly_rate,
        subtotal,
        tier,
        discount,
        fees,
        total: subtotal - discount + fees,
    }
}

// ---------------------------------------------------------------------------
// Display impls
// ---------------------------------------------------------------------------

impl std::fmt::Display for StayQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{rate:.0}/night x {nights} nights = {subtotal:.0}",
            rate = self.nightly_rate,
            nights = self.nights,
            subtotal = self.subtotal
        )?;
        match self.tier {
            DiscountTier::None => {}
            DiscountTier::Weekly => writeln!(f, "Weekly discount: -{:.0}", self.discount)?,
            DiscountTier::Monthly => writeln!(f, "Monthly discount: -{:.0}", self.discount)?,
        }
        if self.fees > 0.0 {
            writeln!(f, "Fees: {:.0}", self.fees)?;
        }
        write!(f, "Total: {:.0}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PricingPolicy {
        PricingPolicy {
            cleaning_fee: 600.0,
            service_fee: 650.0,
            weekly_discount: 10.0,
            monthly_discount: 20.0,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn nights_whole_days() {
        assert_eq!(nights_between(date("2026-09-01"), date("2026-09-11")), 10);
    }

    #[test]
    fn nights_same_day_floors_to_one() {
        assert_eq!(nights_between(date("2026-09-01"), date("2026-09-01")), 1);
    }

    #[test]
    fn nights_inverted_range_floors_to_one() {
        assert_eq!(nights_between(date("2026-09-11"), date("2026-09-01")), 1);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(DiscountTier::for_nights(1), DiscountTier::None);
        assert_eq!(DiscountTier::for_nights(6), DiscountTier::None);
        assert_eq!(DiscountTier::for_nights(7), DiscountTier::Weekly);
        assert_eq!(DiscountTier::for_nights(27), DiscountTier::Weekly);
        assert_eq!(DiscountTier::for_nights(28), DiscountTier::Monthly);
        assert_eq!(DiscountTier::for_nights(120), DiscountTier::Monthly);
    }

    #[test]
    fn ten_night_weekly_quote() {
        let quote = quote_stay(6500.0, 10, &policy());
        assert!((quote.subtotal - 65000.0).abs() < f64::EPSILON);
        assert_eq!(quote.tier, DiscountTier::Weekly);
        assert!((quote.discount - 6500.0).abs() < f64::EPSILON);
        assert!((quote.fees - 1250.0).abs() < f64::EPSILON);
        assert!((quote.total - 59750.0).abs() < f64::EPSILON);
    }

    #[test]
    fn short_stay_has_no_discount() {
        let quote = quote_stay(6500.0, 6, &policy());
        assert_eq!(quote.tier, DiscountTier::None);
        assert!((quote.discount - 0.0).abs() < f64::EPSILON);
        assert!((quote.total - (39000.0 + 1250.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn monthly_tier_wins_over_weekly() {
        let quote = quote_stay(1000.0, 28, &policy());
        assert_eq!(quote.tier, DiscountTier::Monthly);
        assert!((quote.discount - 5600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fees_are_flat_regardless_of_length() {
        let short = quote_stay(1000.0, 2, &policy());
        let long = quote_stay(1000.0, 30, &policy());
        assert!((short.fees - long.fees).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_policy_quote_is_bare_subtotal() {
        let quote = quote_stay(1200.0, 5, &PricingPolicy::default());
        assert!((quote.total - 6000.0).abs() < f64::EPSILON);
        assert!((quote.fees - 0.0).abs() < f64::EPSILON);
        assert_eq!(quote.tier, DiscountTier::None);
    }

    #[test]
    fn quote_clamps_nights() {
        let quote = quote_stay(1000.0, 0, &PricingPolicy::default());
        assert_eq!(quote.nights, 1);
        assert!((quote.total - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn quote_display_breakdown() {
        let s = quote_stay(6500.0, 10, &policy()).to_string();
        assert!(s.contains("6500/night x 10 nights = 65000"));
        assert!(s.contains("Weekly discount: -6500"));
        assert!(s.contains("Fees: 1250"));
        assert!(s.contains("Total: 59750"));
    }

    #[test]
    fn quote_display_without_discount_line() {
        let s = quote_stay(1000.0, 3, &PricingPolicy::default()).to_string();
        assert!(!s.contains("discount"));
        assert!(!s.contains("Fees:"));
        assert!(s.contains("Total: 3000"));
    }
}
