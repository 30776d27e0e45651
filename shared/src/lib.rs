//! Core of the place picker: browse a fixed catalog, rank it by distance from the device,
//! keep a personal list of picks in local storage, and remove picks through a confirming,
//! self-expiring dialog.
//!
//! All platform work (storage, geolocation, timers, rendering) is requested from the shell
//! through [`Capabilities`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod confirmation;
pub mod event;
pub mod model;
pub mod ranking;
pub mod selection;
pub mod selection_store;
pub mod view;

use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use catalog::{Catalog, ImageRef, Place};
pub use config::{ConfigError, PickerConfig};
pub use crux_core::render::Render;
pub use event::{Event, PlaceId};
pub use model::{LocationStatus, Model};
pub use view::{ConfirmationView, PlaceCard, PlaceList, ViewModel};

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const DEFAULT_STORAGE_KEY: &str = "selectedPlaces";
pub const CONFIRM_TIMEOUT_MS: u64 = 3_000;
pub const COUNTDOWN_TICK_MS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    #[error("unknown place id: {0}")]
    UnknownPlace(PlaceId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("could not encode selections: {0}")]
    Serialization(String),
}

pub type PickerResult<T> = Result<T, PickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PickerError::UnknownPlace(PlaceId::new("p0")).to_string(),
            "unknown place id: p0"
        );
        assert_eq!(
            PickerError::from(ConfigError::ZeroTick).to_string(),
            "invalid configuration: countdown_tick_ms must be > 0"
        );
    }
}
