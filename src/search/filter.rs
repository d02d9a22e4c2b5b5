use crate::domain::criteria::SearchCriteria;
use crate::domain::property::PropertyRecord;

/// Ordered predicate chain over the catalog: location text, price band,
/// amenity conjunction, rating floor. Evaluation short-circuits per
/// property; catalog order is preserved and the input never mutated.
pub fn filter_catalog(
    catalog: &[PropertyRecord],
    criteria: &SearchCriteria,
) -> Vec<PropertyRecord> {
    let needle = criteria.location.to_lowercase();
    catalog
        .iter()
        .filter(|p| matches_location(p, &needle))
        .filter(|p| within_price_band(p, criteria.min_price, criteria.max_price))
        .filter(|p| has_all_amenities(p, &criteria.amenities))
        .filter(|p| meets_rating_floor(p, criteria.min_rating))
        .cloned()
        .collect()
}

fn matches_location(property: &PropertyRecord, needle: &str) -> bool {
    needle.is_empty()
        || property.location.to_lowercase().contains(needle)
        || property.name.to_lowercase().contains(needle)
}

/// Both ends inclusive. An inverted band matches nothing (fail closed).
fn within_price_band(property: &PropertyRecord, min: f64, max: f64) -> bool {
    property.price >= min && property.price <= max
}

/// Every requested amenity must be present, exact string equality.
fn has_all_amenities(property: &PropertyRecord, required: &[String]) -> bool {
    let amenities = property.amenities();
    required.iter().all(|a| amenities.contains(a))
}

/// A floor of zero or below disables the predicate: an explicit zero means
/// "no constraint", not "rating must exceed zero".
fn meets_rating_floor(property: &PropertyRecord, floor: f64) -> bool {
    floor <= 0.0 || property.rating() >= floor
}
