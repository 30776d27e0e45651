use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::{KvError, KvKey};
use crate::{CONFIRM_TIMEOUT_MS, COUNTDOWN_TICK_MS, DEFAULT_STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("confirm_timeout_ms must be > 0")]
    ZeroTimeout,
    #[error("countdown_tick_ms must be > 0")]
    ZeroTick,
    #[error("countdown_tick_ms ({tick_ms}) exceeds confirm_timeout_ms ({timeout_ms})")]
    TickExceedsTimeout { tick_ms: u64, timeout_ms: u64 },
    #[error("invalid storage key: {0}")]
    StorageKey(#[from] KvError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Local storage item holding the picked ids.
    pub storage_key: String,
    /// Delay after which an unanswered removal dialog confirms itself.
    pub confirm_timeout_ms: u64,
    /// Refresh interval of the countdown shown in the dialog. Cosmetic only.
    pub countdown_tick_ms: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            confirm_timeout_ms: CONFIRM_TIMEOUT_MS,
            countdown_tick_ms: COUNTDOWN_TICK_MS,
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.confirm_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.countdown_tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.countdown_tick_ms > self.confirm_timeout_ms {
            return Err(ConfigError::TickExceedsTimeout {
                tick_ms: self.countdown_tick_ms,
                timeout_ms: self.confirm_timeout_ms,
            });
        }
        self.storage_key()?;
        Ok(())
    }

    pub fn storage_key(&self) -> Result<KvKey, ConfigError> {
        Ok(KvKey::new(self.storage_key.as_str())?)
    }
}
