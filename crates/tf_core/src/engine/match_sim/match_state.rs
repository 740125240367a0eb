//! Simulation cursor and event log for one match.

use std::collections::VecDeque;

use crate::models::{EventKind, EventMetadata, FreeKickZone, MatchEvent, Side};

/// Where the ball is, tactically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Midfield,
    /// The given side is attacking the opponent's goal.
    Attack(Side),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScheduledFreeKick {
    pub minute: u8,
    pub side: Side,
    pub zone: FreeKickZone,
}

#[derive(Debug)]
pub(crate) struct MatchState {
    pub minute: u8,
    pub zone: Zone,
    pub possession: Side,
    pub dominance: f32,
    pub halftime_reached: bool,
    free_kicks: VecDeque<ScheduledFreeKick>,
}

impl MatchState {
    pub fn new(possession: Side) -> Self {
        Self {
            minute: 0,
            zone: Zone::Midfield,
            possession,
            dominance: 0.0,
            halftime_reached: false,
            free_kicks: VecDeque::new(),
        }
    }

    /// Queues free kicks in minute order; ties keep generation order.
    pub fn schedule(&mut self, mut free_kicks: Vec<ScheduledFreeKick>) {
        free_kicks.sort_by_key(|fk| fk.minute);
        self.free_kicks = free_kicks.into();
    }

    pub fn scheduled_count(&self) -> usize {
        self.free_kicks.len()
    }

    /// Next free kick due at or before `minute`.
    pub fn pop_due(&mut self, minute: u8) -> Option<ScheduledFreeKick> {
        if self.free_kicks.front().is_some_and(|fk| fk.minute <= minute) {
            self.free_kicks.pop_front()
        } else {
            None
        }
    }

    /// Ball goes to `side`, play restarts in midfield.
    pub fn turnover(&mut self, side: Side) {
        self.possession = side;
        self.zone = Zone::Midfield;
    }

    pub fn is_attacking(&self, side: Side) -> bool {
        self.zone == Zone::Attack(side)
    }
}

/// Append-only event sink. Headless runs keep it disabled.
#[derive(Debug)]
pub(crate) struct EventLog {
    enabled: bool,
    events: Vec<MatchEvent>,
}

impl EventLog {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, events: Vec::new() }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records regardless of the enabled flag.
    pub fn push(&mut self, minute: u8, kind: EventKind, metadata: EventMetadata) {
        self.events.push(MatchEvent { minute, importance: kind.importance(), kind, metadata });
    }

    pub fn into_events(self) -> Vec<MatchEvent> {
        self.events
    }
}
