use std::cmp::Ordering;

use crate::domain::criteria::{SortKey, SortOrder};
use crate::domain::property::PropertyRecord;

/// Stable reorder of the candidate list by the requested key. Equal keys
/// keep their incoming relative order in both directions; keys the catalog
/// cannot compute (distance) leave the order untouched.
pub fn rank(
    mut items: Vec<PropertyRecord>,
    sort_by: SortKey,
    sort_order: SortOrder,
) -> Vec<PropertyRecord> {
    let key_cmp: fn(&PropertyRecord, &PropertyRecord) -> Ordering = match sort_by {
        SortKey::Price => |a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        SortKey::Rating => |a, b| {
            a.rating()
                .partial_cmp(&b.rating())
                .unwrap_or(Ordering::Equal)
        },
        SortKey::Popularity => |a, b| a.reviews_count().cmp(&b.reviews_count()),
        SortKey::Distance => return items,
    };
    match sort_order {
        SortOrder::Asc => items.sort_by(key_cmp),
        SortOrder::Desc => items.sort_by(|a, b| key_cmp(b, a)),
    }
    items
}
