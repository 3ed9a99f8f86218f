//! A two-dimensional cellular automaton engine.
//!
//! A [`World`] is a fixed-size grid of cells under a [`Rule`](rules::Rule).
//! Cells outside the grid do not exist; the grid never wraps around.
//!
//! ```
//! use ca2d_lib::{Config, ALIVE, DEAD};
//!
//! let mut world = Config::new(5, 5).world().unwrap();
//! for col in 1..=3 {
//!     world.set_cell_state((2, col), ALIVE).unwrap();
//! }
//! world.advance().unwrap();
//! assert_eq!(world.generation(), 1);
//! assert_eq!(world.get_cell_state((1, 2)).unwrap(), ALIVE);
//! assert_eq!(world.get_cell_state((2, 1)).unwrap(), DEAD);
//! ```

mod cells;
mod config;
mod error;
pub mod rules;
mod save;
mod world;

pub use cells::{Cell, Color, Coord, State, ALIVE, DEAD};
pub use config::Config;
pub use error::Error;
pub use save::{Format, SaveError, WorldSer, VERSION};
pub use world::World;
