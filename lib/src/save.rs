//! Saves the world.

use crate::{cells::State, error::Error, world::World};
use bincode::error::{DecodeError, EncodeError};
use displaydoc::Display;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;

/// The current version of the saved format.
pub const VERSION: u32 = 1;

/// At most this many bytes are read when decoding a binary save.
const DECODE_LIMIT: usize = 1 << 28;

/// How a world is saved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Compact binary format, using [bincode](https://docs.rs/bincode).
    #[default]
    Binary,

    /// JSON.
    Json,
}

impl Format {
    /// Chooses a format according to the extension of the file:
    /// JSON for `.json`, binary for everything else.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Binary,
        }
    }
}

/// Errors when saving or loading a world.
#[derive(Debug, Display, Error)]
pub enum SaveError {
    /// I/O error: {0}
    Io(#[from] io::Error),
    /// Unable to encode the world: {0}
    Encode(#[from] EncodeError),
    /// Unable to decode the world: {0}
    Decode(#[from] DecodeError),
    /// Invalid JSON: {0}
    Json(#[from] serde_json::Error),
    /// Unsupported version: {0}.
    UnsupportedVersion(u32),
    /// Width and height of the saved world should be positive.
    NonPositive,
    /// The saved world is {0:?}, but the world is {1:?}.
    SizeMismatch((u32, u32), (u32, u32)),
    /// Expected {0} cells, found {1}.
    CellCountMismatch(usize, usize),
    /// Found {0} unexpected bytes after the saved world.
    TrailingBytes(usize),
}

/// A representation of the world which can be easily serialized.
///
/// The cells are stored row by row,
/// each as a pair of the previous state and the next state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSer {
    /// Version of the format.
    version: u32,

    /// Width.
    width: u32,

    /// Height.
    height: u32,

    /// `(previous, next)` of every cell.
    cells: Vec<(State, State)>,
}

impl WorldSer {
    /// Width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(previous, next)` of every cell, row by row.
    pub fn cells(&self) -> &[(State, State)] {
        &self.cells
    }

    /// Encodes in the given format.
    pub fn encode(&self, format: Format) -> Result<Vec<u8>, SaveError> {
        let bytes = match format {
            Format::Binary => bincode::serde::encode_to_vec(self, bincode::config::standard())?,
            Format::Json => serde_json::to_vec(self)?,
        };
        Ok(bytes)
    }

    /// Decodes from the given format, and checks that the result makes sense.
    pub fn decode(format: Format, bytes: &[u8]) -> Result<Self, SaveError> {
        let ser: WorldSer = match format {
            Format::Binary => {
                let config = bincode::config::standard().with_limit::<DECODE_LIMIT>();
                let (ser, read) = bincode::serde::decode_from_slice(bytes, config)?;
                if read != bytes.len() {
                    return Err(SaveError::TrailingBytes(bytes.len() - read));
                }
                ser
            }
            Format::Json => serde_json::from_slice(bytes)?,
        };
        ser.check()?;
        Ok(ser)
    }

    /// Checks the version and the number of cells.
    fn check(&self) -> Result<(), SaveError> {
        if self.version != VERSION {
            return Err(SaveError::UnsupportedVersion(self.version));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SaveError::NonPositive);
        }
        let expected = (self.width as usize).saturating_mul(self.height as usize);
        if self.cells.len() != expected {
            return Err(SaveError::CellCountMismatch(expected, self.cells.len()));
        }
        Ok(())
    }
}

impl World {
    /// Saves the world as a [`WorldSer`].
    pub fn ser(&self) -> WorldSer {
        WorldSer {
            version: VERSION,
            width: self.width() as u32,
            height: self.height() as u32,
            cells: self.cells().map(|c| (c.previous(), c.next())).collect(),
        }
    }

    /// Restores the cells from a [`WorldSer`].
    ///
    /// The saved world must have the same size as this world.
    /// Nothing is changed if it does not.
    pub fn restore(&mut self, ser: &WorldSer) -> Result<(), Error> {
        ser.check()?;
        let size = (self.width() as u32, self.height() as u32);
        if (ser.width, ser.height) != size {
            return Err(SaveError::SizeMismatch((ser.width, ser.height), size).into());
        }
        self.replace_cells(ser.cells.iter().copied());
        Ok(())
    }

    /// Serializes the cells of the world.
    pub fn serialize(&self, format: Format) -> Result<Vec<u8>, Error> {
        Ok(self.ser().encode(format)?)
    }

    /// Deserializes the cells of the world, and resets the generation to 0.
    ///
    /// The world is left untouched if the input is malformed.
    pub fn deserialize(&mut self, format: Format, bytes: &[u8]) -> Result<(), Error> {
        let ser = WorldSer::decode(format, bytes)?;
        self.restore(&ser)
    }

    /// Saves the world to a file.
    ///
    /// The format is chosen by [`Format::from_path`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = self.serialize(Format::from_path(path))?;
        fs::write(path, bytes).map_err(SaveError::from)?;
        debug!("Saved {:?} to {}", self.name(), path.display());
        Ok(())
    }

    /// Loads the world from a file.
    ///
    /// The format is chosen by [`Format::from_path`].
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(SaveError::from)?;
        self.deserialize(Format::from_path(path), &bytes)?;
        debug!("Loaded {:?} from {}", self.name(), path.display());
        Ok(())
    }
}
