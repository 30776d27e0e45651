//! The bundled, read-only catalog of places.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::event::PlaceId;
use crate::ranking::ValidatedCoordinate;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub title: String,
    pub image: ImageRef,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_src: impl Into<String>,
        image_alt: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            id: PlaceId::new(id),
            title: title.into(),
            image: ImageRef {
                src: image_src.into(),
                alt: image_alt.into(),
            },
            lat,
            lon,
        }
    }

    /// `None` if the catalog entry carries coordinates outside the valid range.
    pub fn coordinate(&self) -> Option<ValidatedCoordinate> {
        ValidatedCoordinate::new(self.lat, self.lon).ok()
    }
}

// (id, title, image, alt text, lat, lon)
const BUNDLED_PLACES: &[(&str, &str, &str, &str, f64, f64)] = &[
    (
        "p1",
        "Forest Waterfall",
        "forest-waterfall.jpg",
        "A tranquil forest with a cascading waterfall amidst greenery.",
        44.5588,
        -80.344,
    ),
    (
        "p2",
        "Sahara Desert Dunes",
        "desert-dunes.jpg",
        "Golden sand dunes under a clear blue sky.",
        25.0,
        0.0,
    ),
    (
        "p3",
        "Majestic Mountain Peak",
        "majestic-mountain.jpg",
        "A snow-capped mountain peak against a clear sky.",
        46.5763,
        7.9904,
    ),
    (
        "p4",
        "Caribbean Beach",
        "caribbean-beach.jpg",
        "Pristine white sand and turquoise waters of a Caribbean beach.",
        18.2208,
        -66.5901,
    ),
    (
        "p5",
        "Ancient Grecian Ruins",
        "ancient-ruins.jpg",
        "Historic ruins of an ancient Grecian temple.",
        37.9715,
        23.7257,
    ),
    (
        "p6",
        "Amazon Rainforest Canopy",
        "amazon-rainforest.jpg",
        "Lush green canopy of a rainforest.",
        -3.4653,
        -62.2159,
    ),
    (
        "p7",
        "Northern Lights",
        "northern-lights.jpg",
        "The Northern Lights dancing in the night sky.",
        64.9631,
        -19.0208,
    ),
    (
        "p8",
        "Japanese Temple",
        "japanese-temple.jpg",
        "An ancient Japanese temple surrounded by autumn leaves.",
        34.9949,
        135.785,
    ),
    (
        "p9",
        "Great Barrier Reef",
        "great-barrier-reef.jpg",
        "Vibrant coral reefs teeming with marine life.",
        -18.2871,
        147.6992,
    ),
    (
        "p10",
        "Parisian Nights",
        "paris.jpg",
        "The Eiffel Tower illuminated at night.",
        48.8584,
        2.2945,
    ),
    (
        "p11",
        "Grand Canyon",
        "grand-canyon.jpg",
        "Layered red rock walls of a vast canyon at sunset.",
        36.1069,
        -112.1129,
    ),
    (
        "p12",
        "Venetian Canals",
        "venice.jpg",
        "Gondolas gliding along a narrow Venetian canal.",
        45.4408,
        12.3155,
    ),
];

/// Ordered list of places with unique ids.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Catalog {
    places: Vec<Place>,
}

impl Catalog {
    /// Builds a catalog, keeping the first place for any repeated id.
    pub fn new(places: Vec<Place>) -> Self {
        let mut seen = HashSet::with_capacity(places.len());
        let places = places
            .into_iter()
            .filter(|place| {
                let fresh = seen.insert(place.id.clone());
                if !fresh {
                    tracing::warn!(place_id = %place.id, "duplicate catalog id ignored");
                }
                fresh
            })
            .collect();
        Self { places }
    }

    pub fn bundled() -> Self {
        Self::new(
            BUNDLED_PLACES
                .iter()
                .map(|&(id, title, src, alt, lat, lon)| Place::new(id, title, src, alt, lat, lon))
                .collect(),
        )
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn find(&self, id: &PlaceId) -> Option<&Place> {
        self.places.iter().find(|place| &place.id == id)
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::bundled()
    }
}
