//! The world.

use crate::{
    cells::{Cell, Color, Coord, State, ALIVE},
    error::Error,
    rules::{Rule, Snapshot},
};
use educe::Educe;
use log::{debug, trace};
use rand::RngCore;
use std::sync::Arc;

/// The world: a two-dimensional cellular automaton.
///
/// The cells are stored row by row in two flat buffers:
/// the states of the last committed generation, and the pending states
/// of the generation being computed. The cell at `(row, col)`
/// is at index `row * width + col` in both buffers.
///
/// Cells beyond the edges do not exist. The world never wraps around.
#[derive(Educe)]
#[educe(Debug)]
pub struct World {
    /// Name of the world.
    name: String,

    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// The rule of the cellular automaton.
    rule: Arc<dyn Rule>,

    /// States of the last committed generation.
    #[educe(Debug(ignore))]
    previous: Vec<State>,

    /// Pending states.
    ///
    /// Always equal to `previous` outside of [`advance`](Self::advance).
    #[educe(Debug(ignore))]
    next: Vec<State>,

    /// Number of generations since the last reset.
    generation: u64,
}

impl World {
    /// Creates a new world, where all cells are in the default state of the rule.
    ///
    /// Returns an error if the width or the height is not positive.
    pub fn new<S: Into<String>>(
        width: i32,
        height: i32,
        rule: Arc<dyn Rule>,
        name: S,
    ) -> Result<Self, Error> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidArgument(
                "width and height should be positive",
            ));
        }
        let (width, height) = (width as usize, height as usize);
        let size = width
            .checked_mul(height)
            .ok_or(Error::InvalidArgument("the world is too big"))?;
        let state = rule.default_state();
        let world = World {
            name: name.into(),
            width,
            height,
            rule,
            previous: vec![state; size],
            next: vec![state; size],
            generation: 0,
        };
        debug!(
            "Created {:?}: {} x {}, rule {}",
            world.name,
            width,
            height,
            world.rule.rule_string()
        );
        Ok(world)
    }

    /// Name of the world.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of generations since the world was created, reset,
    /// randomized or loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The rule of the cellular automaton.
    pub fn rule(&self) -> &Arc<dyn Rule> {
        &self.rule
    }

    /// Finds the index of a cell in the buffers.
    fn index(&self, coord: Coord) -> Result<usize, Error> {
        let (row, col) = coord;
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return Err(Error::OutOfRange(coord));
        }
        Ok(row as usize * self.width + col as usize)
    }

    /// Computes the next generation.
    ///
    /// The rule computes the pending state of every cell from the committed
    /// states. Then all pending states are committed at once, and the generation
    /// counter increases by one. If the rule fails, nothing is committed.
    pub fn advance(&mut self) -> Result<(), Error> {
        let snapshot = Snapshot::new(self.width, self.height, &self.previous);
        if let Err(e) = self.rule.transition(snapshot, &mut self.next) {
            self.next.copy_from_slice(&self.previous);
            return Err(e);
        }
        self.previous.copy_from_slice(&self.next);
        self.generation += 1;
        trace!("{:?}: generation {}", self.name, self.generation);
        Ok(())
    }

    /// Computes the next `n` generations.
    pub fn advance_by(&mut self, n: u64) -> Result<(), Error> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }

    /// Gets a copy of the cell at `coord`.
    pub fn get_cell(&self, coord: Coord) -> Result<Cell, Error> {
        let index = self.index(coord)?;
        Ok(Cell::with_states(self.previous[index], self.next[index]))
    }

    /// Gets the committed state of the cell at `coord`.
    pub fn get_cell_state(&self, coord: Coord) -> Result<State, Error> {
        let index = self.index(coord)?;
        Ok(self.previous[index])
    }

    /// Gets the color of the cell at `coord`.
    pub fn get_color(&self, coord: Coord) -> Result<Color, Error> {
        let index = self.index(coord)?;
        Ok(self.rule.state_color(self.previous[index]))
    }

    /// Sets the state of the cell at `coord`.
    ///
    /// Both the committed and the pending state are set,
    /// so the change is visible immediately.
    pub fn set_cell_state(&mut self, coord: Coord, state: State) -> Result<(), Error> {
        let index = self.index(coord)?;
        self.previous[index] = state;
        self.next[index] = state;
        Ok(())
    }

    /// Sets all cells to the default state of the rule,
    /// and resets the generation to 0.
    pub fn reset(&mut self) {
        let state = self.rule.default_state();
        self.previous.fill(state);
        self.next.fill(state);
        self.generation = 0;
        debug!("Reset {:?}", self.name);
    }

    /// Sets all cells to random states chosen by the rule,
    /// and resets the generation to 0.
    pub fn randomize(&mut self, rng: &mut dyn RngCore) -> Result<(), Error> {
        self.rule.randomize(&mut self.previous, rng)?;
        self.next.copy_from_slice(&self.previous);
        self.generation = 0;
        debug!("Randomized {:?}", self.name);
        Ok(())
    }

    /// Copies of all cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.previous
            .iter()
            .zip(self.next.iter())
            .map(|(&previous, &next)| Cell::with_states(previous, next))
    }

    /// Replaces all cells, and resets the generation to 0.
    ///
    /// The iterator must yield exactly `width * height` pairs of
    /// `(previous, next)`.
    pub(crate) fn replace_cells<I: IntoIterator<Item = (State, State)>>(&mut self, cells: I) {
        let (previous, next): (Vec<_>, Vec<_>) = cells.into_iter().unzip();
        debug_assert_eq!(previous.len(), self.previous.len());
        self.previous = previous;
        self.next = next;
        self.generation = 0;
    }

    /// Number of cells which are not in the default state.
    pub fn population(&self) -> usize {
        let default = self.rule.default_state();
        self.previous.iter().filter(|&&s| s != default).count()
    }

    /// Displays the world in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// * Cells in the default state are represented by `.`;
    /// * **Living** cells are represented by `o` for rules with 2 states,
    ///   `A` for rules with more states;
    /// * Other states are represented by uppercase letters starting from `B`;
    /// * States without a letter are represented by `?`.
    pub fn plaintext(&self) -> String {
        let default = self.rule.default_state();
        let gen_rule = self.rule.states() > 2;
        let mut str = String::with_capacity((self.width + 1) * self.height);
        for row in self.previous.chunks(self.width) {
            for &state in row {
                match state {
                    s if s == default => str.push('.'),
                    ALIVE if !gen_rule => str.push('o'),
                    State(i) if (1..=26).contains(&i) => str.push((b'A' + i as u8 - 1) as char),
                    _ => str.push('?'),
                }
            }
            str.push('\n');
        }
        str
    }
}
