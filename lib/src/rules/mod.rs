//! Cellular automata rules.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

mod generations;
mod life;

use crate::{
    cells::{Color, Coord, State, DEAD},
    error::Error,
};
use rand::{Rng, RngCore};
use rayon::prelude::*;
use std::{fmt::Debug, sync::Arc};

pub use generations::Generations;
pub use life::{Life, LifeLike};

/// Offsets `(row, column)` of the eight cells in the Moore neighborhood.
const NBHD: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A read-only view of the committed states of a world.
///
/// States are stored row by row, so the state at `(row, col)`
/// is `states[row * width + col]`.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    width: usize,
    height: usize,
    states: &'a [State],
}

impl<'a> Snapshot<'a> {
    /// Creates a view of `states` as a `width × height` grid.
    ///
    /// The view is not checked here; see [`check`](Self::check).
    pub fn new(width: usize, height: usize, states: &'a [State]) -> Self {
        Snapshot {
            width,
            height,
            states,
        }
    }

    /// Width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All states, row by row.
    pub fn states(&self) -> &'a [State] {
        self.states
    }

    /// Makes sure that the view describes a non-empty grid.
    pub fn check(&self) -> Result<(), Error> {
        if self.states.is_empty() {
            return Err(Error::InvalidInput("the snapshot has no cells"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidInput("the snapshot has zero width or height"));
        }
        if self.width.checked_mul(self.height) != Some(self.states.len()) {
            return Err(Error::InvalidInput(
                "the number of states does not match the size of the snapshot",
            ));
        }
        Ok(())
    }

    /// Gets the state at `coord`. Returns `None` if there is no such cell.
    pub fn get(&self, coord: Coord) -> Option<State> {
        let (row, col) = coord;
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row < self.height && col < self.width {
            self.states.get(row * self.width + col).copied()
        } else {
            None
        }
    }

    /// The Moore neighborhood of the cell at `(row, col)`.
    ///
    /// Neighbors beyond the edges of the grid do not exist.
    /// The grid never wraps around.
    /// Cells outside the grid have no neighbors at all.
    pub fn neighborhood(&self, row: usize, col: usize) -> Neighborhood {
        let mut nbhd = [None; 8];
        if row >= self.height || col >= self.width {
            return Neighborhood(nbhd);
        }
        let (row, col) = match (i32::try_from(row), i32::try_from(col)) {
            (Ok(row), Ok(col)) => (row, col),
            _ => return Neighborhood(nbhd),
        };
        for (n, (dr, dc)) in nbhd.iter_mut().zip(NBHD.iter()) {
            *n = match (row.checked_add(*dr), col.checked_add(*dc)) {
                (Some(r), Some(c)) => self.get((r, c)),
                _ => None,
            };
        }
        Neighborhood(nbhd)
    }
}

/// The eight neighbors of a cell.
///
/// `None` means that the neighbor is outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighborhood(pub [Option<State>; 8]);

impl Neighborhood {
    /// The sum of the states of all existing neighbors.
    pub fn sum(&self) -> u32 {
        self.0
            .iter()
            .flatten()
            .fold(0, |sum, state| sum.saturating_add(state.0))
    }

    /// Number of existing neighbors with the given state.
    pub fn count(&self, state: State) -> u32 {
        self.0.iter().flatten().filter(|&&s| s == state).count() as u32
    }
}

/// A cellular automaton rule.
///
/// A rule only needs to say how a single cell evolves, and how its states
/// are displayed. The whole-grid [`transition`](Rule::transition) and
/// [`randomize`](Rule::randomize) are provided, but can be overridden.
///
/// Implementations in this crate:
/// - [`Life`]
/// - [`LifeLike`]
/// - [`Generations`]
pub trait Rule: Debug + Send + Sync {
    /// The state of newly created or reset cells.
    fn default_state(&self) -> State {
        DEAD
    }

    /// The number of states.
    ///
    /// The valid states are `State(0)` up to `State(states() - 1)`.
    fn states(&self) -> u32;

    /// The rule string, e.g. `B3/S23`.
    fn rule_string(&self) -> String;

    /// The state of a cell in the next generation,
    /// given its current state and its neighborhood.
    fn next_state(&self, state: State, nbhd: &Neighborhood) -> State;

    /// The color to display a state.
    ///
    /// States that the rule does not know about are displayed
    /// as [`Color::FALLBACK`].
    fn state_color(&self, state: State) -> Color;

    /// Computes the next state of every cell.
    ///
    /// Only the states in the `snapshot` are read, so the order in which
    /// the cells are visited does not matter. Each row is computed
    /// as a separate task.
    fn transition(&self, snapshot: Snapshot<'_>, next: &mut [State]) -> Result<(), Error> {
        snapshot.check()?;
        if next.len() != snapshot.states.len() {
            return Err(Error::InvalidInput(
                "the output buffer does not match the size of the snapshot",
            ));
        }
        next.par_chunks_mut(snapshot.width)
            .enumerate()
            .for_each(|(row, next_row)| {
                let row_states = &snapshot.states[row * snapshot.width..];
                for (col, next_state) in next_row.iter_mut().enumerate() {
                    let nbhd = snapshot.neighborhood(row, col);
                    *next_state = self.next_state(row_states[col], &nbhd);
                }
            });
        Ok(())
    }

    /// Overwrites every state with a state drawn uniformly from
    /// all valid states.
    ///
    /// Fails if there are no cells, or if the rule has no states.
    fn randomize(&self, states: &mut [State], rng: &mut dyn RngCore) -> Result<(), Error> {
        if states.is_empty() {
            return Err(Error::InvalidInput("the world has no cells to randomize"));
        }
        let gen = self.states();
        if gen == 0 {
            return Err(Error::InvalidInput("the rule has no states"));
        }
        for state in states.iter_mut() {
            *state = State(rng.gen_range(0..gen));
        }
        Ok(())
    }
}

/// Parses a rule string.
///
/// * `B3/S23` (or simply `Life`) gives [`Life`];
/// * other Life-like rules give [`LifeLike`];
/// * Generations rules with more than 2 states give [`Generations`].
pub fn parse_rule(rule_string: &str) -> Result<Arc<dyn Rule>, Error> {
    let rule_string = rule_string.trim();
    if rule_string.is_empty() {
        return Err(Error::InvalidArgument("no rule is given"));
    }
    if rule_string.eq_ignore_ascii_case("life") {
        return Ok(Arc::new(Life));
    }
    let life_like = if let Ok(rule) = rule_string.parse::<LifeLike>() {
        rule
    } else {
        let rule = rule_string.parse::<Generations>()?;
        if rule.gen() > 2 {
            return Ok(Arc::new(rule));
        }
        rule.non_gen()
    };
    if life_like.is_life() {
        Ok(Arc::new(Life))
    } else {
        Ok(Arc::new(life_like))
    }
}
