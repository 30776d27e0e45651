//! The picked/available lists and the pending-removal gate.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Place};
use crate::event::PlaceId;
use crate::{PickerError, PickerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Added,
    AlreadyPicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed(PlaceId),
    /// The pending place had already left the picked list.
    NotPicked(PlaceId),
    NothingPending,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Selection {
    /// Newest first, unique by id.
    picked: Vec<Place>,
    /// Catalog sorted by distance. Empty until a position is known.
    available: Vec<Place>,
    pending_removal: Option<PlaceId>,
    dialog_open: bool,
}

impl Selection {
    /// Builds the picked list from hydrated ids (newest first). Unknown and repeated ids are
    /// dropped.
    pub fn initialize<'a>(catalog: &Catalog, ids: impl IntoIterator<Item = &'a PlaceId>) -> Self {
        let mut picked: Vec<Place> = Vec::new();
        for id in ids {
            if picked.iter().any(|place| &place.id == id) {
                continue;
            }
            match catalog.find(id) {
                Some(place) => picked.push(place.clone()),
                None => tracing::warn!(place_id = %id, "dropping unknown place from saved picks"),
            }
        }

        Self {
            picked,
            ..Self::default()
        }
    }

    pub fn picked(&self) -> &[Place] {
        &self.picked
    }

    pub fn picked_ids(&self) -> impl Iterator<Item = &PlaceId> + '_ {
        self.picked.iter().map(|place| &place.id)
    }

    pub fn available(&self) -> &[Place] {
        &self.available
    }

    pub fn pending_removal(&self) -> Option<&PlaceId> {
        self.pending_removal.as_ref()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn is_picked(&self, id: &PlaceId) -> bool {
        self.picked_ids().any(|picked| picked == id)
    }

    pub fn set_available(&mut self, sorted: Vec<Place>) {
        self.available = sorted;
    }

    /// Opens the dialog for `id`, replacing any earlier pending id, which is returned.
    pub fn request_removal(&mut self, id: PlaceId) -> Option<PlaceId> {
        self.dialog_open = true;
        self.pending_removal.replace(id)
    }

    pub fn cancel_removal(&mut self) {
        self.dialog_open = false;
        self.pending_removal = None;
    }

    pub fn confirm_removal(&mut self) -> RemovalOutcome {
        self.dialog_open = false;
        let Some(id) = self.pending_removal.take() else {
            return RemovalOutcome::NothingPending;
        };

        let before = self.picked.len();
        self.picked.retain(|place| place.id != id);
        if self.picked.len() == before {
            RemovalOutcome::NotPicked(id)
        } else {
            RemovalOutcome::Removed(id)
        }
    }

    /// Prepends the catalog place `id` unless it is already picked.
    pub fn select_place(
        &mut self,
        catalog: &Catalog,
        id: &PlaceId,
    ) -> PickerResult<SelectOutcome> {
        if self.is_picked(id) {
            return Ok(SelectOutcome::AlreadyPicked);
        }
        let place = catalog
            .find(id)
            .ok_or_else(|| PickerError::UnknownPlace(id.clone()))?;
        self.picked.insert(0, place.clone());
        Ok(SelectOutcome::Added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn picked_ids(selection: &Selection) -> Vec<&str> {
        selection.picked_ids().map(PlaceId::as_str).collect()
    }

    #[test]
    fn test_initialize_drops_unknown_and_repeated_ids() {
        let catalog = Catalog::bundled();
        let ids: Vec<PlaceId> = ["p2", "ghost", "p5", "p2"].into_iter().map(PlaceId::from).collect();

        let selection = Selection::initialize(&catalog, &ids);

        assert_eq!(picked_ids(&selection), vec!["p2", "p5"]);
        assert!(selection.available().is_empty());
        assert!(!selection.is_dialog_open());
        assert!(selection.pending_removal().is_none());
    }

    #[test]
    fn test_initialize_empty() {
        let selection = Selection::initialize(&Catalog::bundled(), &Vec::new());
        assert!(selection.picked().is_empty());
    }

    #[test]
    fn test_select_prepends() {
        let catalog = Catalog::bundled();
        let mut selection = Selection::default();

        selection.select_place(&catalog, &"p1".into()).unwrap();
        selection.select_place(&catalog, &"p4".into()).unwrap();

        assert_eq!(picked_ids(&selection), vec!["p4", "p1"]);
    }

    #[test]
    fn test_select_is_idempotent() {
        let catalog = Catalog::bundled();
        let mut selection = Selection::default();

        assert_eq!(
            selection.select_place(&catalog, &"p3".into()),
            Ok(SelectOutcome::Added)
        );
        let once = selection.clone();
        assert_eq!(
            selection.select_place(&catalog, &"p3".into()),
            Ok(SelectOutcome::AlreadyPicked)
        );
        assert_eq!(selection, once);
    }

    #[test]
    fn test_select_unknown_place() {
        let mut selection = Selection::default();
        let result = selection.select_place(&Catalog::bundled(), &"nowhere".into());
        assert_eq!(result, Err(PickerError::UnknownPlace("nowhere".into())));
        assert!(selection.picked().is_empty());
    }

    #[test]
    fn test_request_overwrites_pending() {
        let mut selection = Selection::default();
        assert_eq!(selection.request_removal("p1".into()), None);
        assert_eq!(selection.request_removal("p2".into()), Some("p1".into()));
        assert_eq!(selection.pending_removal(), Some(&"p2".into()));
        assert!(selection.is_dialog_open());
    }

    #[test]
    fn test_confirm_removes_pending_place() {
        let catalog = Catalog::bundled();
        let mut selection = Selection::default();
        selection.select_place(&catalog, &"p1".into()).unwrap();
        selection.select_place(&catalog, &"p2".into()).unwrap();

        selection.request_removal("p1".into());
        assert_eq!(selection.confirm_removal(), RemovalOutcome::Removed("p1".into()));

        assert_eq!(picked_ids(&selection), vec!["p2"]);
        assert!(!selection.is_dialog_open());
        assert!(selection.pending_removal().is_none());
    }

    #[test]
    fn test_confirm_for_missing_place_is_harmless() {
        let mut selection = Selection::default();
        selection.request_removal("p6".into());
        assert_eq!(selection.confirm_removal(), RemovalOutcome::NotPicked("p6".into()));
        assert_eq!(selection.confirm_removal(), RemovalOutcome::NothingPending);
        assert!(!selection.is_dialog_open());
    }

    #[test]
    fn test_cancel_keeps_picks() {
        let catalog = Catalog::bundled();
        let mut selection = Selection::default();
        selection.select_place(&catalog, &"p1".into()).unwrap();

        selection.request_removal("p1".into());
        selection.cancel_removal();

        assert_eq!(picked_ids(&selection), vec!["p1"]);
        assert!(!selection.is_dialog_open());
        assert_eq!(selection.confirm_removal(), RemovalOutcome::NothingPending);
        assert_eq!(picked_ids(&selection), vec!["p1"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Select(usize),
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..14).prop_map(Op::Select),
            (0usize..14).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_picked_never_holds_duplicates(ops in prop::collection::vec(op(), 0..64)) {
            let catalog = Catalog::bundled();
            let mut selection = Selection::default();

            for op in ops {
                match op {
                    Op::Select(n) => {
                        let _ = selection.select_place(&catalog, &PlaceId::new(format!("p{n}")));
                    }
                    Op::Remove(n) => {
                        selection.request_removal(PlaceId::new(format!("p{n}")));
                        selection.confirm_removal();
                    }
                }

                let mut ids = picked_ids(&selection);
                let len = ids.len();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), len);
            }
        }
    }
}
