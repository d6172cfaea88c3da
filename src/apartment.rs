//! Apartment listing records and their query vocabulary.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::processing::{RecordFilter, SortKey};
use crate::types::RangeBound;

/// A single apartment listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    /// Display name.
    pub name: String,
    /// Floor plan image URL or path.
    #[serde(default)]
    pub structure_image: String,
    /// Area in square metres.
    pub area: f64,
    /// Number of rooms.
    pub rooms: u32,
    /// Floor the apartment is on.
    #[serde(default)]
    pub level: u32,
    /// Number of floors in the building.
    #[serde(default)]
    pub level_total: u32,
    /// Price in rubles.
    pub price: u64,
}

impl Apartment {
    /// Create a listing with the fields the pipeline filters on; the rest are left empty.
    pub fn new(name: impl Into<String>, price: u64, area: f64, rooms: u32) -> Self {
        Self {
            name: name.into(),
            structure_image: String::new(),
            area,
            rooms,
            level: 0,
            level_total: 0,
            price,
        }
    }

    /// Set the floor and building height.
    pub fn with_level(mut self, level: u32, level_total: u32) -> Self {
        self.level = level;
        self.level_total = level_total;
        self
    }
}

/// Fields an apartment list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApartmentSortKey {
    Area,
    Level,
    Price,
}

impl ApartmentSortKey {
    /// All sortable fields.
    pub const ALL: [Self; 3] = [Self::Area, Self::Level, Self::Price];

    /// Field name as used in query documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Level => "level",
            Self::Price => "price",
        }
    }
}

impl SortKey<Apartment> for ApartmentSortKey {
    fn compare(&self, a: &Apartment, b: &Apartment) -> Ordering {
        match self {
            Self::Area => a.area.total_cmp(&b.area),
            Self::Level => a.level.cmp(&b.level),
            Self::Price => a.price.cmp(&b.price),
        }
    }
}

/// Filters applied to apartment listings.
///
/// Every bound is optional; an unset bound, or an empty `rooms_counts`, never excludes a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApartmentsFilters {
    /// Inclusive price range.
    pub price: RangeBound<u64>,
    /// Inclusive area range.
    pub area: RangeBound<f64>,
    /// Allowed room counts. Empty means any.
    pub rooms_counts: Vec<u32>,
}

impl ApartmentsFilters {
    /// Returns `true` if no constraint is configured.
    pub fn is_empty(&self) -> bool {
        self.price.is_unbounded() && self.area.is_unbounded() && self.rooms_counts.is_empty()
    }
}

impl RecordFilter<Apartment> for ApartmentsFilters {
    fn matches(&self, record: &Apartment) -> bool {
        self.price.contains(&record.price)
            && self.area.contains(&record.area)
            && (self.rooms_counts.is_empty() || self.rooms_counts.contains(&record.rooms))
    }
}

#[cfg(test)]
mod tests {
    use super::{Apartment, ApartmentSortKey, ApartmentsFilters};
    use crate::processing::{RecordFilter, SortKey};
    use crate::types::RangeBound;
    use std::cmp::Ordering;

    #[test]
    fn default_filters_match_everything() {
        let f = ApartmentsFilters::default();
        assert!(f.is_empty());
        assert!(f.matches(&Apartment::new("x", 0, 0.0, 0)));
        assert!(f.matches(&Apartment::new("y", u64::MAX, 1e9, 99)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let f = ApartmentsFilters {
            price: RangeBound::new(Some(100), Some(200)),
            area: RangeBound::new(Some(40.0), None),
            ..Default::default()
        };
        assert!(f.matches(&Apartment::new("lo", 100, 40.0, 1)));
        assert!(f.matches(&Apartment::new("hi", 200, 90.0, 1)));
        assert!(!f.matches(&Apartment::new("cheap", 99, 50.0, 1)));
        assert!(!f.matches(&Apartment::new("pricey", 201, 50.0, 1)));
        assert!(!f.matches(&Apartment::new("small", 150, 39.5, 1)));
    }

    #[test]
    fn rooms_counts_is_a_membership_check() {
        let f = ApartmentsFilters {
            rooms_counts: vec![1, 3],
            ..Default::default()
        };
        assert!(f.matches(&Apartment::new("a", 1, 1.0, 1)));
        assert!(!f.matches(&Apartment::new("b", 1, 1.0, 2)));
        assert!(f.matches(&Apartment::new("c", 1, 1.0, 3)));
    }

    #[test]
    fn sort_keys_compare_their_field() {
        let a = Apartment::new("a", 100, 60.0, 2).with_level(3, 9);
        let b = Apartment::new("b", 200, 40.0, 2).with_level(3, 5);
        assert_eq!(ApartmentSortKey::Price.compare(&a, &b), Ordering::Less);
        assert_eq!(ApartmentSortKey::Area.compare(&a, &b), Ordering::Greater);
        assert_eq!(ApartmentSortKey::Level.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn filters_deserialize_from_partial_json() {
        let f: ApartmentsFilters =
            serde_json::from_str(r#"{"price":{"max":5000000},"rooms_counts":[2,3]}"#).unwrap();
        assert_eq!(f.price, RangeBound::new(None, Some(5_000_000)));
        assert!(f.area.is_unbounded());
        assert_eq!(f.rooms_counts, vec![2, 3]);
    }

    #[test]
    fn sort_key_names_round_trip_through_serde() {
        for key in ApartmentSortKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn apartment_parses_listing_json() {
        let a: Apartment = serde_json::from_str(
            r#"{"name":"Studio","structure_image":"/img/1.png","area":31.5,"rooms":1,"level":4,"level_total":17,"price":4200000}"#,
        )
        .unwrap();
        assert_eq!(a.name, "Studio");
        assert_eq!(a.level, 4);
        assert_eq!(a.level_total, 17);
        assert_eq!(a.price, 4_200_000);
    }
}
