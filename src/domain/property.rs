use serde::{Deserialize, Serialize};

use crate::domain::pricing::PricingPolicy;

/// Cover image used when a record carries no images at all.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.svg";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: u32,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub aesthetic: Option<String>,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "features_or_none")]
    pub features: Option<PropertyFeatures>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub pricing: PricingPolicy,
}

/// Rating, review count and amenity block as stored in catalog JSON.
///
/// Catalog data arrives from an external system; a record whose block is
/// absent, `null` or structurally broken still loads (the block becomes
/// `None`) and every reader sees [`PropertyFeatures::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFeatures {
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

impl Default for PropertyFeatures {
    fn default() -> Self {
        Self {
            amenities: Vec::new(),
            rating: 0.0,
            reviews_count: 0,
            is_available: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn features_or_none<'de, D>(deserializer: D) -> Result<Option<PropertyFeatures>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    // Tolerate any malformed block rather than rejecting the whole record.
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or(None))
}

impl PropertyRecord {
    pub fn rating(&self) -> f64 {
        self.features.as_ref().map_or(0.0, |f| f.rating)
    }

    pub fn reviews_count(&self) -> u32 {
        self.features.as_ref().map_or(0, |f| f.reviews_count)
    }

    pub fn amenities(&self) -> &[String] {
        self.features.as_ref().map_or(&[], |f| f.amenities.as_slice())
    }

    /// Normalized feature block, defaults filled in.
    pub fn feature_block(&self) -> PropertyFeatures {
        self.features.clone().unwrap_or_default()
    }
}

/// Flat projection of a [`PropertyRecord`] returned by searches.
///
/// Total over any record shape: missing narrative, images or feature block
/// degrade to defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaySummary {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: f64,
    pub features: PropertyFeatures,
    pub cover_image: String,
}

impl StaySummary {
    pub fn from_record(record: &PropertyRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            location: record.location.clone(),
            description: record.story.clone().unwrap_or_default(),
            price: record.price,
            features: record.feature_block(),
            cover_image: record
                .images
                .first()
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        }
    }
}

impl std::fmt::Display for StaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({:.0}/night",
            self.name, self.location, self.price
        )?;
        if self.features.rating > 0.0 {
            write!(
                f,
                ", {rating:.1}* {reviews} reviews",
                rating = self.features.rating,
                reviews = self.features.reviews_count
            )?;
        }
        if !self.features.is_available {
            write!(f, " | Currently unavailable")?;
        }
        write!(f, ")")
    }
}

impl std::fmt::Display for PropertyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Price: {:.0}/night", self.price)?;
        let rating = self.rating();
        if rating > 0.0 {
            writeln!(f, "Rating: {rating:.2} ({} reviews)", self.reviews_count())?;
        }
        if let Some(ref category) = self.category {
            write!(f, "Category: {category}")?;
            if let Some(ref aesthetic) = self.aesthetic {
                write!(f, " | Aesthetic: {aesthetic}")?;
            }
            writeln!(f)?;
        }
        if self.guests > 0 {
            writeln!(
                f,
                "Guests: {} | Bedrooms: {} | Bathrooms: {}",
                self.guests, self.bedrooms, self.bathrooms
            )?;
        }
        if self.pricing.cleaning_fee > 0.0 || self.pricing.service_fee > 0.0 {
            writeln!(
                f,
                "Fees: Cleaning {:.0} + Service {:.0}",
                self.pricing.cleaning_fee, self.pricing.service_fee
            )?;
        }
        if self.pricing.weekly_discount > 0.0 || self.pricing.monthly_discount > 0.0 {
            writeln!(
                f,
                "Discounts: {:.0}% weekly, {:.0}% monthly",
                self.pricing.weekly_discount, self.pricing.monthly_discount
            )?;
        }
        if !self.description.is_empty() {
            writeln!(f, "\n## Description\n{}", self.description)?;
        }
        let amenities = self.amenities();
        if !amenities.is_empty() {
            writeln!(f, "\n## Amenities\n{}", amenities.join(", "))?;
        }
        if let Some(ref story) = self.story {
            if !story.is_empty() {
                writeln!(f, "\n## The Story\n{story}")?;
            }
        }
        Ok(())
    }
}
