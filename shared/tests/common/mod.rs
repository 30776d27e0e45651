//! A scripted shell: answers storage requests from an in-memory store and keeps position
//! and timer requests until the test decides to answer them.

#![allow(dead_code)]

use std::collections::BTreeMap;

use crux_core::testing::AppTester;
use crux_core::Request;
use shared::capabilities::testing::InMemoryKv;
use shared::capabilities::{
    GeolocationOperation, GeolocationResult, KvKey, TimerId, TimerOperation, TimerOutput,
};
use shared::{App, Effect, Event, Model, PickerConfig, ViewModel};

pub struct Shell {
    pub app: AppTester<App, Effect>,
    pub model: Model,
    pub kv: InMemoryKv,
    pub renders: usize,
    pub cleared: Vec<TimerId>,
    timers: BTreeMap<TimerId, (u64, Request<TimerOperation>)>,
    position: Vec<Request<GeolocationOperation>>,
}

impl Shell {
    pub fn new(kv: InMemoryKv) -> Self {
        Self {
            app: AppTester::<App, Effect>::default(),
            model: Model::default(),
            kv,
            renders: 0,
            cleared: Vec::new(),
            timers: BTreeMap::new(),
            position: Vec::new(),
        }
    }

    /// Starts the app with `kv` as the persisted state.
    pub fn started(kv: InMemoryKv) -> Self {
        let mut shell = Self::new(kv);
        shell.dispatch(Event::AppStarted);
        shell
    }

    pub fn storage_key() -> KvKey {
        PickerConfig::default().storage_key().unwrap()
    }

    pub fn stored_raw(&self) -> Option<&[u8]> {
        self.kv.value(&Self::storage_key())
    }

    pub fn stored_ids(&self) -> Vec<String> {
        self.stored_raw()
            .map(|raw| serde_json::from_slice(raw).unwrap())
            .unwrap_or_default()
    }

    pub fn picked_ids(&self) -> Vec<String> {
        self.model
            .selection
            .picked_ids()
            .map(ToString::to_string)
            .collect()
    }

    pub fn view(&self) -> ViewModel {
        self.app.view(&self.model)
    }

    pub fn live_timers(&self) -> Vec<(TimerId, u64)> {
        self.timers
            .iter()
            .map(|(id, (millis, _))| (*id, *millis))
            .collect()
    }

    pub fn dispatch(&mut self, event: Event) {
        let update = self.app.update(event, &mut self.model);
        self.process(update.effects);
    }

    pub fn resolve_position(&mut self, result: GeolocationResult) {
        let mut request = self.position.pop().expect("a position request is outstanding");
        let update = self
            .app
            .resolve(&mut request, result)
            .expect("position request resolves");
        self.process_events(update.events);
    }

    pub fn has_position_request(&self) -> bool {
        !self.position.is_empty()
    }

    /// Fires the live timer `id`, as the shell would once its delay passed.
    pub fn fire_timer(&mut self, id: TimerId) {
        let (_, mut request) = self.timers.remove(&id).expect("timer is live");
        let update = self
            .app
            .resolve(&mut request, TimerOutput::Elapsed { id })
            .expect("timer request resolves");
        self.process_events(update.events);
    }

    /// Fires the live timer with the given delay (the confirm timer or the tick).
    pub fn fire_timer_of(&mut self, millis: u64) {
        let id = self
            .live_timers()
            .into_iter()
            .find(|(_, m)| *m == millis)
            .map(|(id, _)| id)
            .expect("a live timer with this delay");
        self.fire_timer(id);
    }

    /// Fires the confirm timer, as if the full countdown ran out with the dialog open.
    pub fn let_confirmation_expire(&mut self) {
        let total = self.model.config.confirm_timeout_ms;
        self.fire_timer_of(total);
    }

    fn process_events(&mut self, events: Vec<Event>) {
        for event in events {
            self.dispatch(event);
        }
    }

    fn process(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render(_) => self.renders += 1,
                Effect::KeyValue(mut request) => {
                    let output = self.kv.execute(&request.operation);
                    let update = self
                        .app
                        .resolve(&mut request, output)
                        .expect("kv request resolves");
                    self.process_events(update.events);
                }
                Effect::Geolocation(request) => self.position.push(request),
                Effect::Timer(request) => match request.operation.clone() {
                    TimerOperation::Start { id, millis } => {
                        self.timers.insert(id, (millis, request));
                    }
                    TimerOperation::Clear { id } => {
                        self.timers.remove(&id);
                        self.cleared.push(id);
                    }
                },
            }
        }
    }
}
