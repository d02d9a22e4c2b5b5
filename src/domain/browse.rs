use std::collections::HashSet;

use super::property::PropertyRecord;

/// Top rated properties, best first. Ties keep catalog order.
pub fn featured(catalog: &[PropertyRecord], limit: usize) -> Vec<PropertyRecord> {
    let mut picks: Vec<PropertyRecord> = catalog.to_vec();
    picks.sort_by(|a, b| {
        b.rating()
            .partial_cmp(&a.rating())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    picks.truncate(limit);
    picks
}

/// Most reviewed properties, busiest first. Ties keep catalog order.
pub fn popular(catalog: &[PropertyRecord], limit: usize) -> Vec<PropertyRecord> {
    let mut picks: Vec<PropertyRecord> = catalog.to_vec();
    picks.sort_by(|a, b| b.reviews_count().cmp(&a.reviews_count()));
    picks.truncate(limit);
    picks
}

/// Properties sharing a category or aesthetic with the given one, catalog
/// order, excluding the property itself. Unknown id yields nothing.
pub fn similar(catalog: &[PropertyRecord], property_id: u32, limit: usize) -> Vec<PropertyRecord> {
    let Some(subject) = catalog.iter().find(|p| p.id == property_id) else {
        return Vec::new();
    };
    catalog
        .iter()
        .filter(|p| {
            p.id != property_id
                && ((p.category.is_some() && p.category == subject.category)
                    || (p.aesthetic.is_some() && p.aesthetic == subject.aesthetic))
        })
        .take(limit)
        .cloned()
        .collect()
}

/// Free-text lookup over name, location and description, case-insensitive
/// substring. An empty query matches everything.
pub fn search_text(catalog: &[PropertyRecord], query: &str) -> Vec<PropertyRecord> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.location.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Distinct locations in first-appearance order.
pub fn locations(catalog: &[PropertyRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .filter(|p| seen.insert(p.location.clone()))
        .map(|p| p.location.clone())
        .collect()
}

/// Distinct category tags in first-appearance order.
pub fn categories(catalog: &[PropertyRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .filter_map(|p| p.category.as_ref())
        .filter(|c| seen.insert((*c).clone()))
        .cloned()
        .collect()
}
