//! Timed, cancelable confirmation gate in front of a removal.
//!
//! Entering `Pending` acquires two shell timers: a single auto-confirm timer for the full
//! duration, and a short one-shot tick re-armed after each firing to drive the countdown.
//! Every exit from `Pending` releases whichever of them are still live. Timer ids are
//! never reused, so an answer for a released timer is recognised as stale.

use serde::{Deserialize, Serialize};

use crate::capabilities::TimerId;
use crate::event::PlaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start { id: TimerId, millis: u64 },
    Clear { id: TimerId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerVerdict {
    /// The full duration ran out with the dialog still open.
    AutoConfirm { place_id: PlaceId },
    /// Countdown advanced; `next` re-arms the tick unless the countdown reached zero.
    Tick {
        remaining_ms: u64,
        next: Option<TimerCommand>,
    },
    /// The timer belongs to a dialog that is gone.
    Stale,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfirmationPhase {
    #[default]
    Idle,
    Pending {
        place_id: PlaceId,
        confirm_timer: Option<TimerId>,
        tick_timer: Option<TimerId>,
        remaining_ms: u64,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RemovalConfirmation {
    phase: ConfirmationPhase,
    total_ms: u64,
    tick_ms: u64,
    next_timer_id: u64,
}

impl RemovalConfirmation {
    pub fn new(total_ms: u64, tick_ms: u64) -> Self {
        Self {
            phase: ConfirmationPhase::Idle,
            total_ms,
            tick_ms,
            next_timer_id: 1,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, ConfirmationPhase::Pending { .. })
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        match &self.phase {
            ConfirmationPhase::Pending { remaining_ms, .. } => Some(*remaining_ms),
            ConfirmationPhase::Idle => None,
        }
    }

    /// Enters `Pending` for `place_id`. Calling it while already pending restarts the
    /// countdown: the old timers are released and fresh ones acquired.
    pub fn begin(&mut self, place_id: PlaceId) -> Vec<TimerCommand> {
        let mut commands = self.resolve();

        let confirm_timer = self.allocate_timer();
        let tick_timer = self.allocate_timer();
        commands.push(TimerCommand::Start {
            id: confirm_timer,
            millis: self.total_ms,
        });
        commands.push(TimerCommand::Start {
            id: tick_timer,
            millis: self.tick_ms,
        });

        self.phase = ConfirmationPhase::Pending {
            place_id,
            confirm_timer: Some(confirm_timer),
            tick_timer: Some(tick_timer),
            remaining_ms: self.total_ms,
        };
        commands
    }

    /// Leaves `Pending` by any path (confirm, cancel, dismissal) and releases live timers.
    /// A no-op when idle.
    pub fn resolve(&mut self) -> Vec<TimerCommand> {
        match std::mem::take(&mut self.phase) {
            ConfirmationPhase::Idle => Vec::new(),
            ConfirmationPhase::Pending {
                confirm_timer,
                tick_timer,
                ..
            } => confirm_timer
                .into_iter()
                .chain(tick_timer)
                .map(|id| TimerCommand::Clear { id })
                .collect(),
        }
    }

    pub fn on_timer_elapsed(&mut self, id: TimerId) -> TimerVerdict {
        let tick_ms = self.tick_ms;
        let fresh_id = TimerId(self.next_timer_id);

        let ConfirmationPhase::Pending {
            place_id,
            confirm_timer,
            tick_timer,
            remaining_ms,
        } = &mut self.phase
        else {
            return TimerVerdict::Stale;
        };

        if *confirm_timer == Some(id) {
            *confirm_timer = None;
            return TimerVerdict::AutoConfirm {
                place_id: place_id.clone(),
            };
        }

        if *tick_timer != Some(id) {
            return TimerVerdict::Stale;
        }

        *remaining_ms = remaining_ms.saturating_sub(tick_ms);
        let remaining = *remaining_ms;
        if remaining == 0 {
            *tick_timer = None;
            return TimerVerdict::Tick {
                remaining_ms: 0,
                next: None,
            };
        }

        *tick_timer = Some(fresh_id);
        self.next_timer_id += 1;
        TimerVerdict::Tick {
            remaining_ms: remaining,
            next: Some(TimerCommand::Start {
                id: fresh_id,
                millis: tick_ms,
            }),
        }
    }

    fn allocate_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        id
    }
}
