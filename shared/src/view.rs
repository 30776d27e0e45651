use serde::{Deserialize, Serialize};

use crate::catalog::Place;
use crate::model::LocationStatus;
use crate::ranking::{distance_to_place, format_distance, ValidatedCoordinate};

pub const PICKED_TITLE: &str = "I'd like to visit ...";
pub const PICKED_FALLBACK: &str = "Select the places you would like to visit below.";
pub const AVAILABLE_TITLE: &str = "Available Places";
pub const AVAILABLE_LOCATING_FALLBACK: &str = "Sorting Places by distance.";
pub const AVAILABLE_UNAVAILABLE_FALLBACK: &str = "Could not determine your location.";
pub const CONFIRMATION_TITLE: &str = "Are you sure?";
pub const CONFIRMATION_MESSAGE: &str = "Do you really want to remove this place?";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlaceCard {
    pub id: String,
    pub title: String,
    pub image_src: String,
    pub image_alt: String,
    pub distance_text: Option<String>,
}

impl PlaceCard {
    pub fn new(place: &Place, from: Option<ValidatedCoordinate>) -> Self {
        Self {
            id: place.id.to_string(),
            title: place.title.clone(),
            image_src: place.image.src.clone(),
            image_alt: place.image.alt.clone(),
            distance_text: from.map(|origin| format_distance(distance_to_place(origin, place))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlaceList {
    pub title: String,
    /// Shown by the shell when `places` is empty.
    pub fallback_text: String,
    pub places: Vec<PlaceCard>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmationView {
    pub place_id: String,
    pub title: String,
    pub message: String,
    pub remaining_ms: u64,
    pub total_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    /// True until saved picks are restored; the shell shows a loading state.
    pub hydrating: bool,
    pub picked: PlaceList,
    pub available: PlaceList,
    /// Present exactly while the removal dialog is open.
    pub confirmation: Option<ConfirmationView>,
    pub location: LocationStatus,
}
