//! Player-facing message log.
//!
//! The core reports what happened as [`GameEvent`]s. The session turns the
//! ones a player cares about into short sentences and keeps the most recent
//! in a bounded buffer.
use std::collections::{HashMap, VecDeque};

use crawl_core::{EntityId, GameEvent, Tick};

use crate::oracle::ItemCatalog;

/// Severity level for messages produced from game events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Danger,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    pub tick: Tick,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, tick: Tick, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            tick,
            level,
        }
    }
}

/// Circular buffer of messages displayed to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Most recent entries first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Names of everyone involved in a batch of events, captured before the
/// batch ran so that slain creatures can still be named.
#[derive(Clone, Debug, Default)]
pub struct Names {
    actors: HashMap<EntityId, String>,
}

impl Names {
    pub fn capture(state: &crawl_core::GameState) -> Self {
        let actors = state
            .entities
            .all_actors()
            .map(|actor| (actor.id, actor.name.clone()))
            .collect();
        Self { actors }
    }

    /// Records a name learned after the capture, e.g. a fresh spawn.
    pub fn learn(&mut self, id: EntityId, name: impl Into<String>) {
        self.actors.insert(id, name.into());
    }

    /// Capitalized subject followed by the verb form that agrees with it.
    fn acts(&self, id: EntityId, you: &str, other: &str) -> String {
        let subject = self.of(id);
        let verb = if id.is_player() { you } else { other };
        capitalize(&format!("{subject} {verb}"))
    }

    fn of(&self, id: EntityId) -> String {
        if id.is_player() {
            return "you".to_owned();
        }
        self.actors
            .get(&id)
            .map_or_else(|| format!("something ({id})"), |name| format!("the {name}"))
    }
}

/// Sentence describing `event`, if it is worth showing.
///
/// Plain moves and NPC bookkeeping are left to the trace log.
pub fn describe(
    event: &GameEvent,
    names: &Names,
    items: &ItemCatalog,
) -> Option<(String, MessageLevel)> {
    use MessageLevel::*;

    let line = match event {
        GameEvent::Moved { .. } | GameEvent::ActionFailed { .. } => return None,
        GameEvent::Attacked {
            attacker,
            target,
            damage,
            critical,
            ranged,
        } => {
            let (you, other) = match (ranged, critical) {
                (true, true) => ("critically shoot", "critically shoots"),
                (true, false) => ("shoot", "shoots"),
                (false, true) => ("critically hit", "critically hits"),
                (false, false) => ("hit", "hits"),
            };
            let level = if target.is_player() { Danger } else { Info };
            let subject = names.acts(*attacker, you, other);
            (format!("{subject} {} for {damage}.", names.of(*target)), level)
        }
        GameEvent::Struck {
            source,
            target,
            damage,
        } => {
            let subject = names.acts(*source, "strike", "strikes");
            (format!("{subject} {} with lightning for {damage}.", names.of(*target)), Info)
        }
        GameEvent::Died { actor, .. } if actor.is_player() => ("You die...".to_owned(), Danger),
        GameEvent::Died { actor, .. } => (format!("{}.", names.acts(*actor, "die", "dies")), Info),
        GameEvent::Woke { actor } => (format!("{} up.", names.acts(*actor, "wake", "wakes")), Warning),
        GameEvent::Healed { actor, amount } => (
            format!("{} {amount} health.", names.acts(*actor, "recover", "recovers")),
            Info,
        ),
        GameEvent::EffectApplied {
            actor,
            effect,
            turns,
        } => (
            format!("{} {effect} for {turns} turns.", names.acts(*actor, "gain", "gains")),
            Info,
        ),
        GameEvent::EffectExpired { actor, effect } => (
            format!("The {effect} on {} wears off.", names.of(*actor)),
            Info,
        ),
        GameEvent::Confused { actor, turns } => (
            format!("{} confused for {turns} turns.", names.acts(*actor, "are", "is")),
            Info,
        ),
        GameEvent::ConfusionEnded { actor } => (
            format!("{} no longer confused.", names.acts(*actor, "are", "is")),
            Warning,
        ),
        GameEvent::PickedUp { actor, item } => (
            format!("{} up the {}.", names.acts(*actor, "pick", "picks"), items.name(*item)),
            Info,
        ),
        GameEvent::Dropped { actor, item } => (
            format!("{} the {}.", names.acts(*actor, "drop", "drops"), items.name(*item)),
            Info,
        ),
        GameEvent::Equipped { actor, item, slot } => (
            format!(
                "{} the {} as {slot}.",
                names.acts(*actor, "equip", "equips"),
                items.name(*item)
            ),
            Info,
        ),
        GameEvent::Unequipped { actor, item, .. } => (
            format!("{} away the {}.", names.acts(*actor, "put", "puts"), items.name(*item)),
            Info,
        ),
        GameEvent::ItemConsumed { actor, item } => (
            format!("{} the {}.", names.acts(*actor, "use", "uses"), items.name(*item)),
            Info,
        ),
        GameEvent::FloorChanged { floor, direction } => (
            format!("You go {direction} the stairs to floor {floor}."),
            Info,
        ),
        GameEvent::ThreatSpotted { spotted, .. } => {
            (format!("You spot {}.", names.of(*spotted)), Warning)
        }
    };
    Some(line)
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
