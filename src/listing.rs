//! Display ordering for listing views. The store itself returns records unordered.

use crate::models::Property;

/// Characters of description shown on a list item
pub const SUMMARY_CHARS: usize = 100;

/// Listings shown on the home page
pub const RECENT_COUNT: usize = 3;

/// Sort by id descending, which is creation order for store-assigned ids.
pub fn newest_first(mut properties: Vec<Property>) -> Vec<Property> {
    properties.sort_by(|a, b| b.id.cmp(&a.id));
    properties
}

/// The `count` newest listings.
pub fn recent(properties: Vec<Property>, count: usize) -> Vec<Property> {
    let mut sorted = newest_first(properties);
    sorted.truncate(count);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyId;
    use pretty_assertions::assert_eq;

    fn with_id(id: i64) -> Property {
        Property {
            id: PropertyId::from(id),
            title: format!("Listing {id}"),
            location: "Paris".to_string(),
            price: 100_000.0,
            description: String::new(),
        }
    }

    fn ids(properties: &[Property]) -> Vec<i64> {
        properties.iter().filter_map(|p| p.id.as_number()).collect()
    }

    #[test]
    fn sorts_newest_first() {
        let sorted = newest_first(vec![with_id(2), with_id(1_700_000_000_000), with_id(1)]);
        assert_eq!(ids(&sorted), vec![1_700_000_000_000, 2, 1]);
    }

    #[test]
    fn recent_keeps_only_newest() {
        let listings = (1..=5).map(with_id).collect();
        assert_eq!(ids(&recent(listings, RECENT_COUNT)), vec![5, 4, 3]);
        assert!(recent(Vec::new(), RECENT_COUNT).is_empty());
    }
}
