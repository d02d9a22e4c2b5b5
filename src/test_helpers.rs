use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::adapters::booking_ledger::{Booking, BookingStatus};
use crate::domain::pricing::PricingPolicy;
use crate::domain::property::{PropertyFeatures, PropertyRecord};
use crate::error::{Result, StaysError};
use crate::ports::availability::{AvailabilityClient, AvailabilityResult};

type CheckFn = Box<dyn Fn(u32, NaiveDate, NaiveDate) -> Result<AvailabilityResult> + Send + Sync>;

/// Closure-programmable reservation collaborator for unit tests.
pub struct MockAvailability {
    check_fn: Mutex<CheckFn>,
}

impl Default for MockAvailability {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAvailability {
    /// Answers "available" for every property.
    pub fn new() -> Self {
        Self {
            check_fn: Mutex::new(Box::new(|property_id, _, _| {
                Ok(AvailabilityResult {
                    property_id,
                    available: true,
                })
            })),
        }
    }

    /// Fails every check, for exercising the fail-open path.
    pub fn erroring() -> Self {
        Self::new().with_check(|_, _, _| {
            Err(StaysError::Availability {
                reason: "collaborator offline".into(),
            })
        })
    }

    #[must_use]
    pub fn with_check(
        self,
        f: impl Fn(u32, NaiveDate, NaiveDate) -> Result<AvailabilityResult> + Send + Sync + 'static,
    ) -> Self {
        *self.check_fn.lock().unwrap() = Box::new(f);
        self
    }
}

#[async_trait]
impl AvailabilityClient for MockAvailability {
    async fn check_availability(
        &self,
        property_id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityResult> {
        let f = self.check_fn.lock().unwrap();
        f(property_id, check_in, check_out)
    }
}

// --- Factory functions ---

pub fn make_property(id: u32, name: &str, location: &str, price: f64) -> PropertyRecord {
    PropertyRecord {
        id,
        name: name.to_string(),
        location: location.to_string(),
        description: String::new(),
        price,
        category: None,
        aesthetic: None,
        guests: 2,
        bedrooms: 1,
        bathrooms: 1,
        images: vec![format!("https://example.com/stays/{id}-1.jpg")],
        features: Some(PropertyFeatures {
            amenities: vec!["WiFi".to_string(), "Kitchen".to_string()],
            rating: 4.5,
            reviews_count: 50,
            is_available: true,
        }),
        story: None,
        pricing: PricingPolicy::default(),
    }
}

pub fn make_property_rated(
    id: u32,
    name: &str,
    location: &str,
    price: f64,
    rating: f64,
    reviews_count: u32,
) -> PropertyRecord {
    let mut property = make_property(id, name, location, price);
    if let Some(block) = property.features.as_mut() {
        block.rating = rating;
        block.reviews_count = reviews_count;
    }
    property
}

/// Record with no feature block at all, for the defaulting paths.
pub fn make_bare_property(id: u32, price: f64) -> PropertyRecord {
    PropertyRecord {
        id,
        name: format!("Bare Flat {id}"),
        location: "Sewri, Mumbai".to_string(),
        description: String::new(),
        price,
        category: None,
        aesthetic: None,
        guests: 0,
        bedrooms: 0,
        bathrooms: 0,
        images: vec![],
        features: None,
        story: None,
        pricing: PricingPolicy::default(),
    }
}

pub fn make_booking(id: u32, property_id: u32, check_in: &str, check_out: &str) -> Booking {
    Booking {
        id,
        property_id,
        check_in: NaiveDate::parse_from_str(check_in, "%Y-%m-%d").unwrap(),
        check_out: NaiveDate::parse_from_str(check_out, "%Y-%m-%d").unwrap(),
        status: BookingStatus::Confirmed,
    }
}

/// Small seeded catalog used by service and server tests.
pub fn sample_catalog() -> Vec<PropertyRecord> {
    let mut zen = make_property_rated(1, "Sea View Zen Loft", "Bandra West, Mumbai", 8500.0, 4.9, 127);
    zen.category = Some("Loft".into());
    zen.aesthetic = Some("Zen".into());
    zen.story = Some("Wake to the sound of the tide over Bandstand.".into());
    zen.pricing = PricingPolicy {
        cleaning_fee: 600.0,
        service_fee: 650.0,
        weekly_discount: 10.0,
        monthly_discount: 20.0,
    };
    if let Some(block) = zen.features.as_mut() {
        block.amenities = vec!["WiFi".into(), "Kitchen".into(), "Sea View".into()];
    }

    let mut cottage =
        make_property_rated(2, "Heritage Garden Cottage", "Colaba, Mumbai", 12000.0, 4.8, 89);
    cottage.category = Some("Cottage".into());
    cottage.aesthetic = Some("Heritage".into());
    cottage.pricing = PricingPolicy {
        cleaning_fee: 800.0,
        service_fee: 750.0,
        weekly_discount: 10.0,
        monthly_discount: 20.0,
    };

    let mut suite =
        make_property_rated(3, "Minimalist Sky Suite", "Lower Parel, Mumbai", 15000.0, 4.7, 156);
    suite.category = Some("Suite".into());
    suite.aesthetic = Some("Minimalist".into());

    let mut penthouse =
        make_property_rated(4, "Penthouse Sky Lounge", "Worli, Mumbai", 22000.0, 4.9, 203);
    penthouse.category = Some("Penthouse".into());
    penthouse.aesthetic = Some("Luxury".into());

    let mut studio = make_property_rated(7, "Studio Bandra", "Bandra West, Mumbai", 6500.0, 4.5, 134);
    studio.category = Some("Studio".into());
    studio.aesthetic = Some("Minimalist".into());
    studio.pricing = PricingPolicy {
        cleaning_fee: 600.0,
        service_fee: 650.0,
        weekly_discount: 10.0,
        monthly_discount: 20.0,
    };

    let mut manor = make_property_rated(8, "Colonial Manor", "Colaba, Mumbai", 18000.0, 4.9, 167);
    manor.category = Some("Manor".into());
    manor.aesthetic = Some("Heritage".into());

    vec![zen, cottage, suite, penthouse, studio, manor]
}
