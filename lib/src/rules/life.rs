//! Totalistic Life-like rules.

use crate::{
    cells::{Color, State, ALIVE, DEAD},
    error::Error,
    rules::{Neighborhood, Rule},
};
use ca_rules::ParseLife;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Conway's Game of Life.
///
/// A dead cell becomes alive iff exactly 3 neighbors are alive.
/// A living cell dies iff the number of living neighbors is neither 2 nor 3.
///
/// The number of living neighbors is the sum of the states of the neighbors,
/// so a cell with some other state is never changed by this rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Life;

impl Rule for Life {
    fn states(&self) -> u32 {
        2
    }

    fn rule_string(&self) -> String {
        String::from("B3/S23")
    }

    fn next_state(&self, state: State, nbhd: &Neighborhood) -> State {
        let alives = nbhd.sum();
        match state {
            DEAD if alives == 3 => ALIVE,
            ALIVE if alives != 2 && alives != 3 => DEAD,
            _ => state,
        }
    }

    fn state_color(&self, state: State) -> Color {
        match state {
            ALIVE => Color::BLACK,
            DEAD => Color::WHITE,
            _ => Color::FALLBACK,
        }
    }
}

impl Display for Life {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Game of Life")
    }
}

/// Totalistic Life-like rules.
///
/// Whether a cell is born or survives only depends on the number
/// of living neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeLike {
    /// `b[n]`: whether a dead cell with `n` living neighbors becomes alive.
    b: [bool; 9],
    /// `s[n]`: whether a living cell with `n` living neighbors stays alive.
    s: [bool; 9],
}

impl LifeLike {
    /// Constructs a new rule from the `b` and `s` data.
    ///
    /// Numbers greater than 8 are ignored.
    pub fn new(b: Vec<u8>, s: Vec<u8>) -> Self {
        let mut rule = LifeLike {
            b: [false; 9],
            s: [false; 9],
        };
        for i in b.into_iter().filter(|&i| i <= 8) {
            rule.b[i as usize] = true;
        }
        for i in s.into_iter().filter(|&i| i <= 8) {
            rule.s[i as usize] = true;
        }
        rule
    }

    /// Whether this is the rule of Conway's Game of Life.
    pub fn is_life(&self) -> bool {
        *self == LifeLike::new(vec![3], vec![2, 3])
    }

    pub(crate) fn born(&self, alives: u32) -> bool {
        self.b.get(alives as usize).copied().unwrap_or(false)
    }

    pub(crate) fn survives(&self, alives: u32) -> bool {
        self.s.get(alives as usize).copied().unwrap_or(false)
    }

    pub(crate) fn bs_string(&self) -> String {
        let digits = |table: &[bool; 9]| -> String {
            (0..=8)
                .filter(|&i| table[i])
                .map(|i| char::from(b'0' + i as u8))
                .collect()
        };
        format!("B{}/S{}", digits(&self.b), digits(&self.s))
    }
}

impl Rule for LifeLike {
    fn states(&self) -> u32 {
        2
    }

    fn rule_string(&self) -> String {
        self.bs_string()
    }

    fn next_state(&self, state: State, nbhd: &Neighborhood) -> State {
        let alives = nbhd.sum();
        match state {
            DEAD if self.born(alives) => ALIVE,
            ALIVE if !self.survives(alives) => DEAD,
            _ => state,
        }
    }

    fn state_color(&self, state: State) -> Color {
        Life.state_color(state)
    }
}

/// A parser for the rule.
impl ParseLife for LifeLike {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self::new(b, s)
    }
}

impl FromStr for LifeLike {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: LifeLike = ParseLife::parse_rule(input).map_err(Error::ParseRuleError)?;
        Ok(rule)
    }
}

impl Display for LifeLike {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bs_string())
    }
}
