//! All kinds of errors in this crate.

use crate::{cells::Coord, save::SaveError};
use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Invalid argument: {0}.
    InvalidArgument(&'static str),
    /// Cell at {0:?} is out of range.
    OutOfRange(Coord),
    /// Invalid input: {0}.
    InvalidInput(&'static str),
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// Unable to save or load the world: {0}
    SerializationError(#[from] SaveError),
}
