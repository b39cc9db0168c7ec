use std::collections::HashSet;

use lazy_static::lazy_static;

/// The metro areas a review may be tagged with. Matching anywhere in the
/// service is an exact string comparison, case and punctuation included.
pub const VALID_LOCATIONS: [&str; 19] = [
    "Albuquerque, New Mexico",
    "Carlsbad, California",
    "Chula Vista, California",
    "Colorado Springs, Colorado",
    "Denver, Colorado",
    "El Cajon, California",
    "El Paso, Texas",
    "Escondido, California",
    "Fresno, California",
    "La Mesa, California",
    "Las Vegas, Nevada",
    "Los Angeles, California",
    "Mesa, Arizona",
    "Oceanside, California",
    "Phoenix, Arizona",
    "Sacramento, California",
    "Salt Lake City, Utah",
    "San Diego, California",
    "Tucson, Arizona",
];

lazy_static! {
    static ref VALID_LOCATION_SET: HashSet<&'static str> =
        VALID_LOCATIONS.iter().copied().collect();
}

pub fn is_valid(location: &str) -> bool {
    VALID_LOCATION_SET.contains(location)
}
