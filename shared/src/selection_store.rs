//! In-core mirror of the persisted selection.
//!
//! The shell owns durable storage; this type holds the last value the core wrote (or read at
//! startup) so every mutation is a read-modify-write on memory followed by a full `Set` of the
//! JSON array. Ids are kept oldest first.

use tracing::warn;

use crate::capabilities::KvKey;
use crate::event::PlaceId;
use crate::PickerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStore {
    key: KvKey,
    ids: Vec<PlaceId>,
}

impl SelectionStore {
    pub fn new(key: KvKey) -> Self {
        Self {
            key,
            ids: Vec::new(),
        }
    }

    pub fn key(&self) -> &KvKey {
        &self.key
    }

    /// Parses a stored value as written. Absent, malformed or non-array data yields no
    /// selections; repeats are kept so the caller can tell the value needs rewriting.
    pub fn decode(raw: Option<&[u8]>) -> Vec<PlaceId> {
        let Some(raw) = raw else {
            return Vec::new();
        };

        match serde_json::from_slice::<Option<Vec<PlaceId>>>(raw) {
            Ok(ids) => ids.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "stored selections are malformed, starting empty");
                Vec::new()
            }
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, PickerError> {
        serde_json::to_vec(&self.ids).map_err(|e| PickerError::Serialization(e.to_string()))
    }

    pub fn load(&self) -> &[PlaceId] {
        &self.ids
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.ids.contains(id)
    }

    /// Appends `id` unless already present. Returns whether anything changed.
    pub fn add(&mut self, id: &PlaceId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.clone());
        true
    }

    /// Removes every occurrence of `id`. Returns whether anything changed.
    pub fn remove(&mut self, id: &PlaceId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|stored| stored != id);
        self.ids.len() != before
    }

    /// Replaces the whole sequence. Returns whether it differs from the previous one.
    pub fn replace(&mut self, ids: Vec<PlaceId>) -> bool {
        let changed = self.ids != ids;
        self.ids = ids;
        changed
    }
}
