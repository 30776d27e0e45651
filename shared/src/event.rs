use serde::{Deserialize, Serialize};
use std::fmt;

use crate::capabilities::{GeolocationResult, KeyValueOutput, TimerOutput};

// --- Typed IDs ---

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

typed_id!(PlaceId);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    AppStarted,

    // User gestures
    SelectPlace { id: PlaceId },
    RequestRemoval { id: PlaceId },
    CancelRemoval,
    ConfirmRemoval,
    /// The dialog was closed by the platform (Escape key, back gesture) rather than a button.
    DialogDismissed,

    // Shell answers
    #[serde(skip)]
    SelectionsLoaded(KeyValueOutput),
    #[serde(skip)]
    SelectionsPersisted(KeyValueOutput),
    #[serde(skip)]
    PositionResolved(GeolocationResult),
    #[serde(skip)]
    TimerFired(TimerOutput),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AppStarted => "app_started",
            Self::SelectPlace { .. } => "select_place",
            Self::RequestRemoval { .. } => "request_removal",
            Self::CancelRemoval => "cancel_removal",
            Self::ConfirmRemoval => "confirm_removal",
            Self::DialogDismissed => "dialog_dismissed",
            Self::SelectionsLoaded(_) => "selections_loaded",
            Self::SelectionsPersisted(_) => "selections_persisted",
            Self::PositionResolved(_) => "position_resolved",
            Self::TimerFired(_) => "timer_fired",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::SelectPlace { .. }
                | Self::RequestRemoval { .. }
                | Self::CancelRemoval
                | Self::ConfirmRemoval
                | Self::DialogDismissed
        )
    }
}
