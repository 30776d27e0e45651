use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, GeolocationResult, KeyValueOutput, TimerOutput};
use crate::confirmation::{TimerCommand, TimerVerdict};
use crate::event::{Event, PlaceId};
use crate::model::{LocationStatus, Model};
use crate::ranking::{sort_by_distance, ValidatedCoordinate};
use crate::selection::{RemovalOutcome, Selection, SelectOutcome};
use crate::selection_store::SelectionStore;
use crate::view::{
    ConfirmationView, PlaceCard, PlaceList, ViewModel, AVAILABLE_LOCATING_FALLBACK,
    AVAILABLE_TITLE, AVAILABLE_UNAVAILABLE_FALLBACK, CONFIRMATION_MESSAGE, CONFIRMATION_TITLE,
    PICKED_FALLBACK, PICKED_TITLE,
};

#[derive(Default)]
pub struct App;

impl App {
    fn persist_store(model: &Model, caps: &Capabilities) {
        match model.store.encode() {
            Ok(bytes) => {
                caps.kv
                    .write(model.store.key().as_str(), bytes, Event::SelectionsPersisted);
            }
            Err(e) => warn!(error = %e, "could not encode selections, skipping write"),
        }
    }

    fn run_timer_commands(commands: Vec<TimerCommand>, caps: &Capabilities) {
        for command in commands {
            match command {
                TimerCommand::Start { id, millis } => {
                    debug!(timer_id = %id, millis, "timer set");
                    caps.timer.start(id, millis, Event::TimerFired);
                }
                TimerCommand::Clear { id } => {
                    debug!(timer_id = %id, "timer cleared");
                    caps.timer.clear(id);
                }
            }
        }
    }

    fn on_selections_loaded(output: KeyValueOutput, model: &mut Model, caps: &Capabilities) {
        if model.hydrated {
            debug!("selections already loaded, ignoring");
            return;
        }

        let raw = match output {
            KeyValueOutput::Read(raw) => raw,
            KeyValueOutput::Write(_) => {
                warn!("unexpected answer to selections read");
                None
            }
        };

        let mut known: Vec<PlaceId> = Vec::new();
        for id in SelectionStore::decode(raw.as_deref()) {
            if model.catalog.contains(&id) && !known.contains(&id) {
                known.push(id);
            }
        }

        // stored oldest first, shown newest first
        let available = model.selection.available().to_vec();
        model.selection = Selection::initialize(&model.catalog, known.iter().rev());
        model.selection.set_available(available);

        model.store.replace(known);
        model.hydrated = true;
        info!(count = model.store.load().len(), "saved selections restored");

        // unknown, repeated or unreadable entries are written back in clean form
        let needs_repair = raw
            .is_some_and(|raw| !matches!(model.store.encode(), Ok(clean) if clean == raw));
        if needs_repair {
            info!("repairing stored selections");
            Self::persist_store(model, caps);
        }
    }

    fn on_position_resolved(result: GeolocationResult, model: &mut Model) {
        if model.location != LocationStatus::Locating {
            debug!("position already settled, ignoring");
            return;
        }

        let position = match result {
            Ok(position) => position,
            Err(e) => {
                info!(error = %e, "no position, places stay unsorted");
                model.location = LocationStatus::Unavailable;
                return;
            }
        };

        match ValidatedCoordinate::new(position.latitude, position.longitude) {
            Ok(coord) => {
                model.position = Some(coord);
                model.location = LocationStatus::Resolved;
                model
                    .selection
                    .set_available(sort_by_distance(model.catalog.places(), coord));
                debug!(
                    count = model.selection.available().len(),
                    "places sorted by distance"
                );
            }
            Err(e) => {
                warn!(error = %e, "shell reported an invalid position");
                model.location = LocationStatus::Unavailable;
            }
        }
    }

    fn select_place(id: &PlaceId, model: &mut Model, caps: &Capabilities) {
        match model.selection.select_place(&model.catalog, id) {
            Ok(SelectOutcome::Added) => {
                model.store.add(id);
                Self::persist_store(model, caps);
            }
            Ok(SelectOutcome::AlreadyPicked) => debug!(place_id = %id, "already picked"),
            Err(e) => warn!(error = %e, "ignoring selection"),
        }
    }

    fn confirm_removal(model: &mut Model, caps: &Capabilities) {
        let outcome = model.selection.confirm_removal();
        Self::run_timer_commands(model.confirmation.resolve(), caps);

        match outcome {
            RemovalOutcome::Removed(id) => {
                info!(place_id = %id, "place removed");
                model.store.remove(&id);
                Self::persist_store(model, caps);
            }
            RemovalOutcome::NotPicked(id) => debug!(place_id = %id, "place was not picked"),
            RemovalOutcome::NothingPending => debug!("no removal pending"),
        }
    }

    fn close_dialog(model: &mut Model, caps: &Capabilities) {
        model.selection.cancel_removal();
        Self::run_timer_commands(model.confirmation.resolve(), caps);
    }

    fn on_timer_fired(output: TimerOutput, model: &mut Model, caps: &Capabilities) -> bool {
        match model.confirmation.on_timer_elapsed(output.id()) {
            TimerVerdict::AutoConfirm { place_id } => {
                debug!(place_id = %place_id, "confirmation timed out");
                Self::confirm_removal(model, caps);
                true
            }
            TimerVerdict::Tick { next, .. } => {
                Self::run_timer_commands(next.into_iter().collect(), caps);
                true
            }
            TimerVerdict::Stale => {
                debug!(timer_id = %output.id(), "stale timer");
                false
            }
        }
    }

    fn place_cards<'a>(
        places: impl IntoIterator<Item = &'a crate::catalog::Place>,
        from: Option<ValidatedCoordinate>,
    ) -> Vec<PlaceCard> {
        places
            .into_iter()
            .map(|place| PlaceCard::new(place, from))
            .collect()
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let event_name = event.name();
        debug!(event = event_name, "update");

        if event.is_user_initiated() && !model.hydrated {
            debug!(event = event_name, "ignoring user action before saved picks are restored");
            return;
        }

        match event {
            Event::AppStarted => {
                if model.started {
                    debug!("app already started");
                    return;
                }
                model.started = true;

                caps.kv
                    .read(model.store.key().as_str(), Event::SelectionsLoaded);
                caps.geolocation.current_position(Event::PositionResolved);
                caps.render.render();
            }

            Event::SelectionsLoaded(result) => {
                Self::on_selections_loaded(result, model, caps);
                caps.render.render();
            }

            Event::SelectionsPersisted(output) => match output {
                KeyValueOutput::Write(true) => debug!("selections saved"),
                KeyValueOutput::Write(false) => warn!("could not save selections"),
                KeyValueOutput::Read(_) => warn!("unexpected answer to selections write"),
            },

            Event::PositionResolved(result) => {
                Self::on_position_resolved(result, model);
                caps.render.render();
            }

            Event::SelectPlace { id } => {
                Self::select_place(&id, model, caps);
                caps.render.render();
            }

            Event::RequestRemoval { id } => {
                if let Some(previous) = model.selection.request_removal(id.clone()) {
                    debug!(previous = %previous, place_id = %id, "restarting confirmation");
                }
                Self::run_timer_commands(model.confirmation.begin(id), caps);
                caps.render.render();
            }

            Event::ConfirmRemoval => {
                Self::confirm_removal(model, caps);
                caps.render.render();
            }

            Event::CancelRemoval | Event::DialogDismissed => {
                Self::close_dialog(model, caps);
                caps.render.render();
            }

            Event::TimerFired(output) => {
                if Self::on_timer_fired(output, model, caps) {
                    caps.render.render();
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        let picked = PlaceList {
            title: PICKED_TITLE.to_string(),
            fallback_text: PICKED_FALLBACK.to_string(),
            places: Self::place_cards(model.selection.picked(), None),
        };

        let available_fallback = match model.location {
            LocationStatus::Unavailable => AVAILABLE_UNAVAILABLE_FALLBACK,
            LocationStatus::Locating | LocationStatus::Resolved => AVAILABLE_LOCATING_FALLBACK,
        };
        let available = PlaceList {
            title: AVAILABLE_TITLE.to_string(),
            fallback_text: available_fallback.to_string(),
            places: Self::place_cards(model.selection.available(), model.position),
        };

        let confirmation = model
            .selection
            .pending_removal()
            .filter(|_| model.selection.is_dialog_open())
            .map(|place_id| ConfirmationView {
                place_id: place_id.to_string(),
                title: CONFIRMATION_TITLE.to_string(),
                message: CONFIRMATION_MESSAGE.to_string(),
                remaining_ms: model
                    .confirmation
                    .remaining_ms()
                    .unwrap_or_else(|| model.confirmation.total_ms()),
                total_ms: model.confirmation.total_ms(),
            });

        ViewModel {
            hydrating: !model.hydrated,
            picked,
            available,
            confirmation,
            location: model.location,
        }
    }
}
