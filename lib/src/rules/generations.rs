//! Generations rules.

use crate::{
    cells::{Color, State, ALIVE, DEAD},
    error::Error,
    rules::{LifeLike, Neighborhood, Rule},
};
use ca_rules::ParseLifeGen;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Totalistic Life-like Generations rules.
///
/// Besides the dead state `0` and the living state `1`,
/// a cell may be in one of the dying states `2` up to `gen - 1`.
///
/// * A dead cell is born iff the number of living neighbors is in `B`.
/// * A living cell stays alive iff the number of living neighbors is in `S`,
///   otherwise it starts dying.
/// * A dying cell moves on to the next dying state,
///   and becomes dead after the last one.
///
/// Only living neighbors are counted. Dying neighbors are not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generations {
    /// The birth and survival conditions.
    life: LifeLike,
    /// Number of states.
    gen: u32,
}

impl Generations {
    /// Constructs a new rule from the `b` and `s` data
    /// and the number of states.
    pub fn new(b: Vec<u8>, s: Vec<u8>, gen: usize) -> Self {
        Generations {
            life: LifeLike::new(b, s),
            gen: gen.clamp(2, u32::MAX as usize) as u32,
        }
    }

    /// Number of states.
    pub fn gen(&self) -> u32 {
        self.gen
    }

    /// Converts to the corresponding non-Generations rule.
    pub fn non_gen(self) -> LifeLike {
        self.life
    }
}

impl Rule for Generations {
    fn states(&self) -> u32 {
        self.gen
    }

    fn rule_string(&self) -> String {
        format!("{}/C{}", self.life.bs_string(), self.gen)
    }

    fn next_state(&self, state: State, nbhd: &Neighborhood) -> State {
        let alives = nbhd.count(ALIVE);
        match state {
            DEAD if self.life.born(alives) => ALIVE,
            DEAD => DEAD,
            ALIVE if self.life.survives(alives) => ALIVE,
            State(i) if i < self.gen - 1 => State(i + 1),
            _ => DEAD,
        }
    }

    fn state_color(&self, state: State) -> Color {
        match state {
            DEAD => Color::WHITE,
            ALIVE => Color::BLACK,
            State(i) if i < self.gen => Color::gray((i - 1) as f32 / (self.gen - 1) as f32),
            _ => Color::FALLBACK,
        }
    }
}

/// A parser for the rule.
impl ParseLifeGen for Generations {
    fn from_bsg(b: Vec<u8>, s: Vec<u8>, gen: usize) -> Self {
        Self::new(b, s, gen)
    }
}

impl FromStr for Generations {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: Generations = ParseLifeGen::parse_rule(input).map_err(Error::ParseRuleError)?;
        Ok(rule)
    }
}

impl Display for Generations {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rule_string())
    }
}
