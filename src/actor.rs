// src/actor.rs

use std::fmt;
use std::sync::Arc;

/// A point in the host world. Axis components are read individually when
/// resolving relative (`~`) position arguments.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// A handle to an actor in the host world: the command invoker, or a player
/// resolved from a `player` argument.
///
/// The host supplies the implementation; the core only reads the name and
/// position and emits feedback through `send_message`/`play_sound`.
pub trait Actor {
    /// The actor's unique display name.
    fn name(&self) -> &str;

    /// The actor's current world position.
    fn position(&self) -> Position;

    /// Whether the actor carries the given tag. Used by permission predicates.
    fn has_tag(&self, tag: &str) -> bool;

    /// Delivers a chat message to this actor.
    fn send_message(&self, message: &str);

    /// Plays a sound cue for this actor.
    fn play_sound(&self, sound_id: &str);
}

/// Shared, cheaply clonable actor handle.
pub type ActorRef = Arc<dyn Actor>;

/// Lookup capability over the currently connected actors, supplied by the
/// host. Registration order of the returned list is host-defined.
pub trait ActorDirectory {
    /// Finds a connected actor by exact name.
    fn find_by_name(&self, name: &str) -> Option<ActorRef>;

    /// All currently connected actors.
    fn all_online(&self) -> Vec<ActorRef>;
}

// MARK: --- TEST SUPPORT ---
