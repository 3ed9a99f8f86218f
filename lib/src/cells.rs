//! Cells in the cellular automaton.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// The state of a cell.
///
/// What a state means is up to the [`Rule`](crate::rules::Rule).
/// The cell itself never checks whether a state is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State(pub u32);

/// The Dead state.
pub const DEAD: State = State(0);
/// The Alive state.
pub const ALIVE: State = State(1);

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The coordinates of a cell.
///
/// `(row, column)`. Both coordinates are 0-indexed.
///
/// The coordinates are signed, so that a negative coordinate
/// is reported as out of range instead of being unrepresentable.
pub type Coord = (i32, i32);

/// A cell in the cellular automaton.
///
/// A cell has two states: the state of the last committed generation,
/// and the pending state of the generation being computed.
/// After a commit the two states are always equal.
///
/// Cells returned by a [`World`](crate::World) are copies.
/// Changing them does not change the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The state of the last committed generation.
    previous: State,
    /// The pending state.
    next: State,
}

impl Cell {
    /// Creates a cell whose previous and next states are both `state`.
    #[inline]
    pub const fn new(state: State) -> Self {
        Self {
            previous: state,
            next: state,
        }
    }

    #[inline]
    pub(crate) const fn with_states(previous: State, next: State) -> Self {
        Self { previous, next }
    }

    /// The state of the last committed generation.
    #[inline]
    pub const fn previous(&self) -> State {
        self.previous
    }

    /// The pending state.
    #[inline]
    pub const fn next(&self) -> State {
        self.next
    }

    #[inline]
    pub fn set_previous(&mut self, state: State) {
        self.previous = state;
    }

    #[inline]
    pub fn set_next(&mut self, state: State) {
        self.next = state;
    }

    /// Copies the pending state into the previous state.
    #[inline]
    pub fn commit(&mut self) {
        self.previous = self.next;
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.previous)
    }
}

/// The color used to display a state.
///
/// The engine never looks inside a color; it only passes on
/// whatever the rule returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// The color of states which the rule does not know about.
    pub const FALLBACK: Self = Self::rgb(0xff, 0x00, 0xff);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A gray between black (`t = 0.0`) and white (`t = 1.0`).
    pub fn gray(t: f32) -> Self {
        let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(v, v, v)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
