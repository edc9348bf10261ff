#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_muncher_core::{SessionConfig, StartTile};
use serde::{Deserialize, Serialize};

const TRANSFER_DOMAIN: &str = "muncher";
const TRANSFER_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded maze payload.
pub(crate) const TRANSFER_HEADER: &str = "muncher:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Complete maze description captured for clipboard transfer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct MazeTransfer {
    /// Number of tile columns contained in the maze.
    pub columns: u32,
    /// Number of tile rows contained in the maze.
    pub rows: u32,
    /// Length of a single tile edge expressed in pixels.
    pub tile_length: u32,
    /// Tile the agent occupies when a session starts.
    pub start: StartTile,
    /// Agent travel speed in pixels per simulation step.
    pub speed: u32,
    /// Score awarded for each consumed collectible.
    pub reward: u32,
    /// Layout rows encoded with the digit alphabet of [`SessionConfig`].
    pub layout_rows: Vec<String>,
}

impl MazeTransfer {
    /// Captures a session configuration as a transferable maze description.
    #[must_use]
    pub(crate) fn from_config(config: &SessionConfig) -> Self {
        Self {
            columns: config.columns,
            rows: config.rows,
            tile_length: config.tile_length,
            start: config.start,
            speed: config.speed,
            reward: config.reward,
            layout_rows: config.layout_rows.clone(),
        }
    }

    /// Rebuilds a session configuration from the transferred description.
    #[must_use]
    pub(crate) fn into_config(self) -> SessionConfig {
        SessionConfig {
            columns: self.columns,
            rows: self.rows,
            tile_length: self.tile_length,
            start: self.start,
            speed: self.speed,
            reward: self.reward,
            layout_rows: self.layout_rows,
        }
    }

    /// Encodes the maze into a single-line string suitable for clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableMaze {
            tile_length: self.tile_length,
            start: self.start,
            speed: self.speed,
            reward: self.reward,
            layout_rows: self.layout_rows.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("maze transfer serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{TRANSFER_HEADER}:{}x{}:{encoded}", self.columns, self.rows)
    }

    /// Decodes a maze from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, MazeTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MazeTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(MazeTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(MazeTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(MazeTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(MazeTransferError::MissingPayload)?;

        if domain != TRANSFER_DOMAIN {
            return Err(MazeTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != TRANSFER_VERSION {
            return Err(MazeTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(MazeTransferError::InvalidEncoding)?;
        let decoded: SerializableMaze =
            serde_json::from_slice(&bytes).map_err(MazeTransferError::InvalidPayload)?;

        Ok(Self {
            columns,
            rows,
            tile_length: decoded.tile_length,
            start: decoded.start,
            speed: decoded.speed,
            reward: decoded.reward,
            layout_rows: decoded.layout_rows,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableMaze {
    tile_length: u32,
    start: StartTile,
    speed: u32,
    reward: u32,
    layout_rows: Vec<String>,
}

/// Errors that can occur while decoding maze transfer strings.
#[derive(Debug)]
pub(crate) enum MazeTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded maze.
    MissingPrefix,
    /// The encoded maze did not contain a version segment.
    MissingVersion,
    /// The encoded maze did not include grid dimensions.
    MissingDimensions,
    /// The encoded maze did not include the payload segment.
    MissingPayload,
    /// The encoded maze used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded maze used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded maze.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for MazeTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "clipboard payload was empty"),
            Self::MissingPrefix => write!(f, "maze string is missing the prefix"),
            Self::MissingVersion => write!(f, "maze string is missing the version"),
            Self::MissingDimensions => write!(f, "maze string is missing the grid dimensions"),
            Self::MissingPayload => write!(f, "maze string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "maze prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "maze version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse grid dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode maze payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse maze payload: {error}")
            }
        }
    }
}

impl Error for MazeTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), MazeTransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| MazeTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| MazeTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| MazeTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(MazeTransferError::InvalidDimensions(
            dimensions.to_owned(),
        ));
    }

    Ok((columns, rows))
}
