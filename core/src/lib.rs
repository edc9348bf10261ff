#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Muncher engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Muncher.";

/// Score awarded for each collectible unless configuration overrides it.
pub const DEFAULT_REWARD: u32 = 10;

/// Discrete movement intents available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
}

impl Direction {
    /// Unit delta applied to a column index when stepping in this direction.
    #[must_use]
    pub const fn column_delta(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
            Self::Up | Self::Down => 0,
        }
    }

    /// Unit delta applied to a row index when stepping in this direction.
    #[must_use]
    pub const fn row_delta(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
            Self::Left | Self::Right => 0,
        }
    }
}

/// Kinds of cells that compose the maze layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Traversable cell with nothing to collect.
    Empty,
    /// Impassable cell; the boundary outside the grid also reads as wall.
    Wall,
    /// Traversable cell that awards score once, then becomes empty.
    Collectible,
}

impl CellKind {
    /// Maps a layout character onto a cell kind.
    ///
    /// `'1'` produces a wall and `'2'` a collectible; every other character
    /// maps to an empty cell.
    #[must_use]
    pub const fn from_layout_char(ch: char) -> Self {
        match ch {
            '1' => Self::Wall,
            '2' => Self::Collectible,
            _ => Self::Empty,
        }
    }

    /// Reports whether the agent may occupy a cell of this kind.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Location of a single grid cell expressed as column and row indices.
///
/// Coordinates are signed so that probe positions outside the maze remain
/// representable; any coordinate outside the configured dimensions always
/// resolves to a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the neighboring cell one step away in the provided direction.
    #[must_use]
    pub const fn offset_by(self, direction: Direction) -> Self {
        Self {
            column: self.column + direction.column_delta(),
            row: self.row + direction.row_delta(),
        }
    }
}

/// Continuous sub-tile position expressed in pixel units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new pixel-space position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns a new position translated by the provided pixel deltas.
    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Tile that the agent occupies when a session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StartTile {
    /// Zero-based column index of the starting tile.
    pub column: u32,
    /// Zero-based row index of the starting tile.
    pub row: u32,
}

impl StartTile {
    /// Creates a new starting tile descriptor.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// Complete description of a playable session.
///
/// Layout rows use the character mapping of [`CellKind::from_layout_char`].
/// Configurations are validated once at world construction; see the world
/// crate for the fail-fast contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of tile columns laid out in the grid.
    pub columns: u32,
    /// Number of tile rows laid out in the grid.
    pub rows: u32,
    /// Side length of a single square tile measured in pixels.
    pub tile_length: u32,
    /// Tile the agent occupies, centered, when the session starts.
    pub start: StartTile,
    /// Distance in pixels the agent travels per step.
    pub speed: u32,
    /// Score awarded for each consumed collectible.
    pub reward: u32,
    /// Ordered layout rows, topmost first. Missing rows are padded with
    /// all-wall rows up to `rows`.
    pub layout_rows: Vec<String>,
}

impl SessionConfig {
    /// Returns the reference 28x31 session used by the default experience.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            columns: 28,
            rows: 31,
            tile_length: 16,
            start: StartTile::new(13, 1),
            speed: 4,
            reward: DEFAULT_REWARD,
            layout_rows: CLASSIC_LAYOUT_ROWS.iter().map(|row| (*row).to_owned()).collect(),
        }
    }
}

/// Rows of the reference maze. Rows beyond the listed ones are padded with
/// solid wall rows so the grid reaches its configured height.
const CLASSIC_LAYOUT_ROWS: [&str; 17] = [
    "1111111111111111111111111111",
    "1000000000000000000000000001",
    "1011110111110111110111110101",
    "1020000100000100000100000201",
    "1011110111110111110111110101",
    "1000000000000000000000000001",
    "1011110110111111011011110101",
    "1000000100000000010000000001",
    "1111100111110111110011110111",
    "0000100000100000100000100000",
    "1111101110111111011110111111",
    "1000000000000000000000000001",
    "1011110111110111110111110101",
    "1020000100000100000100000201",
    "1011110111110111110111110101",
    "1000000000000000000000000001",
    "1111111111111111111111111111",
];

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Records the player's latest directional intent.
    QueueDirection {
        /// Direction the agent should turn toward when possible.
        direction: Direction,
    },
    /// Commits a direction once the motion system deems the turn legal.
    SetDirection {
        /// Direction of travel to activate.
        direction: Direction,
    },
    /// Proposes a candidate position for the agent this step.
    MoveAgent {
        /// Candidate pixel-space position computed by the motion system.
        to: Position,
    },
    /// Stops the agent in place, clearing its direction of travel.
    HaltAgent,
    /// Advances the simulation by one discrete step.
    Tick,
    /// Resets the session to its initial state with no carryover.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation advanced one step.
    TickAdvanced {
        /// Index of the step that just completed.
        tick: u64,
    },
    /// Confirms that a directional intent was recorded.
    DirectionQueued {
        /// Direction recorded as the pending intent.
        direction: Direction,
    },
    /// Confirms that the agent committed to a new direction of travel.
    DirectionCommitted {
        /// Direction the agent now travels in.
        direction: Direction,
    },
    /// Confirms that the agent moved to a new position.
    AgentMoved {
        /// Position the agent occupied before the move.
        from: Position,
        /// Position the agent occupies after the move.
        to: Position,
    },
    /// Reports that a proposed move was blocked and the agent stopped.
    AgentHalted {
        /// Tile the agent rests on after stopping.
        at: CellCoord,
    },
    /// Confirms that a collectible was consumed.
    CollectibleConsumed {
        /// Cell whose collectible was consumed.
        cell: CellCoord,
        /// Score awarded for the consumption.
        reward: u32,
    },
    /// Announces the new score after a change.
    ScoreChanged {
        /// Total score accumulated by the session.
        score: u32,
    },
    /// Announces that every collectible was consumed and the session ended.
    SessionWon {
        /// Score held when the session reached its terminal state.
        final_score: u32,
    },
    /// Confirms that the session was reset to its initial state.
    SessionReset,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellKind, Direction, SessionConfig};

    #[test]
    fn direction_deltas_are_unit_steps() {
        assert_eq!(Direction::Left.column_delta(), -1);
        assert_eq!(Direction::Right.column_delta(), 1);
        assert_eq!(Direction::Up.row_delta(), -1);
        assert_eq!(Direction::Down.row_delta(), 1);
        assert_eq!(Direction::Up.column_delta(), 0);
        assert_eq!(Direction::Left.row_delta(), 0);
    }

    #[test]
    fn layout_characters_map_onto_cell_kinds() {
        assert_eq!(CellKind::from_layout_char('1'), CellKind::Wall);
        assert_eq!(CellKind::from_layout_char('2'), CellKind::Collectible);
        assert_eq!(CellKind::from_layout_char('0'), CellKind::Empty);
        assert_eq!(CellKind::from_layout_char('x'), CellKind::Empty);
    }

    #[test]
    fn offset_by_follows_direction_deltas() {
        let origin = CellCoord::new(3, 5);
        assert_eq!(origin.offset_by(Direction::Left), CellCoord::new(2, 5));
        assert_eq!(origin.offset_by(Direction::Right), CellCoord::new(4, 5));
        assert_eq!(origin.offset_by(Direction::Up), CellCoord::new(3, 4));
        assert_eq!(origin.offset_by(Direction::Down), CellCoord::new(3, 6));
    }

    #[test]
    fn offset_by_may_leave_the_grid() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.offset_by(Direction::Left), CellCoord::new(-1, 0));
        assert_eq!(corner.offset_by(Direction::Up), CellCoord::new(0, -1));
    }

    #[test]
    fn classic_session_matches_reference_dimensions() {
        let config = SessionConfig::classic();
        assert_eq!(config.columns, 28);
        assert_eq!(config.rows, 31);
        assert_eq!(config.tile_length, 16);
        assert_eq!(config.speed, 4);
        assert_eq!(config.reward, super::DEFAULT_REWARD);
        assert!(config.layout_rows.len() <= config.rows as usize);
        for row in &config.layout_rows {
            assert_eq!(row.chars().count(), config.columns as usize);
        }
    }
}
