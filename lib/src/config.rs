//! World configuration.

use crate::{error::Error, rules::parse_rule, world::World};
use serde::{Deserialize, Serialize};

/// World configuration.
///
/// The world will be generated from this configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width.
    pub width: i32,

    /// Height.
    pub height: i32,

    /// The rule string of the cellular automaton.
    ///
    /// See [`parse_rule`](crate::rules::parse_rule) for the supported rules.
    pub rule_string: String,

    /// Name of the world.
    pub name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 16,
            height: 16,
            rule_string: String::from("B3/S23"),
            name: String::from("Game of Life"),
        }
    }
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: i32, height: i32) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets the name of the world.
    pub fn set_name<S: ToString>(mut self, name: S) -> Self {
        self.name = name.to_string();
        self
    }

    /// Creates a new world from the configuration.
    ///
    /// Returns an error if the size is not positive,
    /// or if the rule string is missing or invalid.
    pub fn world(&self) -> Result<World, Error> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidArgument(
                "width and height should be positive",
            ));
        }
        let rule = parse_rule(&self.rule_string)?;
        World::new(self.width, self.height, rule, self.name.clone())
    }
}
