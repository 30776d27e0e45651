use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::PickerConfig;
use crate::confirmation::RemovalConfirmation;
use crate::ranking::ValidatedCoordinate;
use crate::selection::Selection;
use crate::selection_store::SelectionStore;
use crate::PickerResult;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    #[default]
    Locating,
    Resolved,
    /// Denied, failed, or answered with unusable coordinates. Final for the session.
    Unavailable,
}

#[derive(Clone, Debug)]
pub struct Model {
    pub config: PickerConfig,
    pub catalog: Catalog,
    pub store: SelectionStore,
    pub selection: Selection,
    pub confirmation: RemovalConfirmation,

    pub location: LocationStatus,
    pub position: Option<ValidatedCoordinate>,

    pub started: bool,
    /// Set once the persisted picks have been read back.
    pub hydrated: bool,
}

impl Model {
    pub fn with_config(config: PickerConfig, catalog: Catalog) -> PickerResult<Self> {
        config.validate()?;
        let store = SelectionStore::new(config.storage_key()?);
        let confirmation =
            RemovalConfirmation::new(config.confirm_timeout_ms, config.countdown_tick_ms);

        Ok(Self {
            config,
            catalog,
            store,
            selection: Selection::default(),
            confirmation,
            location: LocationStatus::Locating,
            position: None,
            started: false,
            hydrated: false,
        })
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::with_config(PickerConfig::default(), Catalog::bundled())
            .expect("default picker config is valid")
    }
}
