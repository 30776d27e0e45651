mod geolocation;
mod kv;
mod timer;

pub use self::geolocation::{
    Geolocation, GeolocationError, GeolocationOperation, GeolocationResult, Position,
};
pub use self::kv::{KeyValue, KeyValueOperation, KeyValueOutput, KvError, KvKey, MAX_KEY_LENGTH};
pub use self::timer::{Timer, TimerId, TimerOperation, TimerOutput};

/// Render capability re-export.
///
/// We use Crux's built-in Render capability directly because it provides
/// all necessary functionality for triggering view updates.
pub use crux_core::render::Render;

use crate::event::Event;
// The generated `Effect` enum names the app type as `App`.
use crate::App;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub kv: KeyValue<Event>,
    pub geolocation: Geolocation<Event>,
    pub timer: Timer<Event>,
}

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use std::collections::HashMap;

    use super::{KeyValueOperation, KeyValueOutput, KvKey};

    /// In-memory stand-in for the shell's key-value store.
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryKv {
        entries: HashMap<String, Vec<u8>>,
        fail_writes: bool,
    }

    impl InMemoryKv {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_value(key: &KvKey, value: impl Into<Vec<u8>>) -> Self {
            let mut kv = Self::new();
            kv.insert(key, value);
            kv
        }

        pub fn insert(&mut self, key: &KvKey, value: impl Into<Vec<u8>>) {
            self.entries.insert(key.as_str().to_string(), value.into());
        }

        pub fn value(&self, key: &KvKey) -> Option<&[u8]> {
            self.entries.get(key.as_str()).map(Vec::as_slice)
        }

        /// Makes every subsequent write fail, like a full or read-only store.
        pub fn fail_writes(&mut self, fail: bool) {
            self.fail_writes = fail;
        }

        pub fn execute(&mut self, operation: &KeyValueOperation) -> KeyValueOutput {
            match operation {
                KeyValueOperation::Read(key) => KeyValueOutput::Read(self.entries.get(key).cloned()),
                KeyValueOperation::Write(..) if self.fail_writes => KeyValueOutput::Write(false),
                KeyValueOperation::Write(key, value) => {
                    self.entries.insert(key.clone(), value.clone());
                    KeyValueOutput::Write(true)
                }
            }
        }
    }

}
