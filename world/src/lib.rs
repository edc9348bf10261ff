#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Muncher.
//!
//! The world owns the maze grid, the agent pose, and the session status.
//! All mutation flows through [`apply`], which executes [`Command`] values
//! and broadcasts [`Event`] values describing what actually happened. The
//! world re-validates every proposed mutation so that systems can stay pure
//! and adapters can stay thin.

use std::{error::Error, fmt};

use maze_muncher_core::{
    CellCoord, CellKind, Command, Direction, Event, Position, SessionConfig, WELCOME_BANNER,
};

/// Edge inset, in pixels, applied to collision probe points so that a body
/// flush against a wall does not register a false collision.
const PROBE_INSET: f32 = 1.0;

/// Mutable maze state: an immutable wall layout plus consumable collectibles.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    columns: u32,
    rows: u32,
    tile_length: u32,
    reward: u32,
    cells: Vec<CellKind>,
    remaining: u32,
}

impl MazeGrid {
    fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        if config.columns == 0 || config.rows == 0 {
            return Err(ConfigError::ZeroDimensions {
                columns: config.columns,
                rows: config.rows,
            });
        }
        if config.layout_rows.len() > config.rows as usize {
            return Err(ConfigError::TooManyLayoutRows {
                expected: config.rows,
                actual: config.layout_rows.len(),
            });
        }

        let columns = config.columns as usize;
        let mut cells = Vec::with_capacity(columns * config.rows as usize);
        for (index, row) in config.layout_rows.iter().enumerate() {
            let width = row.chars().count();
            if width != columns {
                return Err(ConfigError::NonRectangularLayout {
                    row_index: index,
                    expected: config.columns,
                    actual: width,
                });
            }
            cells.extend(row.chars().map(CellKind::from_layout_char));
        }
        // Missing rows pad out as solid wall, preserving the wall-ring closed
        // world at the bottom edge.
        let padded_rows = config.rows as usize - config.layout_rows.len();
        cells.extend(std::iter::repeat(CellKind::Wall).take(padded_rows * columns));

        let remaining = cells
            .iter()
            .filter(|kind| matches!(kind, CellKind::Collectible))
            .count() as u32;

        Ok(Self {
            columns: config.columns,
            rows: config.rows,
            tile_length: config.tile_length,
            reward: config.reward,
            cells,
            remaining,
        })
    }

    /// Kind of the cell at the provided coordinate.
    ///
    /// Any coordinate outside the grid, including negative ones, reads as
    /// [`CellKind::Wall`].
    #[must_use]
    pub fn kind_at(&self, cell: CellCoord) -> CellKind {
        match self.index(cell) {
            Some(index) => self.cells[index],
            None => CellKind::Wall,
        }
    }

    /// Reports whether the agent may occupy the provided cell.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.kind_at(cell).is_passable()
    }

    /// Consumes the collectible at the provided cell if one is present and
    /// returns the awarded score, or zero when there is nothing to consume.
    fn consume_if_collectible(&mut self, cell: CellCoord) -> u32 {
        let Some(index) = self.index(cell) else {
            return 0;
        };
        if self.cells[index] != CellKind::Collectible {
            return 0;
        }

        self.cells[index] = CellKind::Empty;
        self.remaining = self.remaining.saturating_sub(1);
        self.reward
    }

    /// Number of collectibles still present, maintained incrementally.
    #[must_use]
    pub fn remaining_collectibles(&self) -> u32 {
        self.remaining
    }

    /// Counts collectibles with a full scan of the grid.
    ///
    /// The incremental counter must always agree with this scan; tests use
    /// the scan as the oracle for that invariant.
    #[must_use]
    pub fn count_collectibles_by_scan(&self) -> u32 {
        self.cells
            .iter()
            .filter(|kind| matches!(kind, CellKind::Collectible))
            .count() as u32
    }

    /// Tile containing the provided pixel-space position.
    #[must_use]
    pub fn tile_under(&self, position: Position) -> CellCoord {
        let tile = self.tile_length as f32;
        CellCoord::new(
            (position.x() / tile).floor() as i32,
            (position.y() / tile).floor() as i32,
        )
    }

    /// Tests the four shrunken bounding-box corners of a candidate position
    /// against the wall layout.
    ///
    /// Probe points sit at half a tile minus [`PROBE_INSET`] from the center
    /// on each axis; a move is blocked when any probe lands inside a wall.
    /// Points outside the grid count as walls, so probing fails safe even
    /// without a surrounding wall ring.
    #[must_use]
    pub fn move_blocked(&self, to: Position) -> bool {
        let reach = self.half_length() as f32 - PROBE_INSET;
        let probes = [
            to.translated(-reach, -reach),
            to.translated(reach, -reach),
            to.translated(-reach, reach),
            to.translated(reach, reach),
        ];
        probes
            .iter()
            .any(|probe| self.kind_at(self.tile_under(*probe)) == CellKind::Wall)
    }

    /// Side length of a single square tile measured in pixels.
    #[must_use]
    pub const fn tile_length(&self) -> u32 {
        self.tile_length
    }

    /// Half a tile, the offset from a tile's corner to its center.
    #[must_use]
    pub const fn half_length(&self) -> u32 {
        self.tile_length / 2
    }

    /// Grid dimensions as a `(columns, rows)` pair.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Cell kinds in row-major order, topmost row first.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < 0 || cell.row() < 0 {
            return None;
        }
        let column = cell.column() as u32;
        let row = cell.row() as u32;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }
}

#[derive(Clone, Debug)]
struct Agent {
    position: Position,
    current: Option<Direction>,
    queued: Option<Direction>,
    speed: u32,
}

impl Agent {
    fn at_start(config: &SessionConfig, grid: &MazeGrid) -> Self {
        let half = grid.half_length() as f32;
        let tile = grid.tile_length() as f32;
        Self {
            position: Position::new(
                config.start.column as f32 * tile + half,
                config.start.row as f32 * tile + half,
            ),
            current: None,
            queued: None,
            speed: config.speed,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Session {
    score: u32,
    running: bool,
}

impl Session {
    const fn fresh() -> Self {
        Self {
            score: 0,
            running: true,
        }
    }
}

/// Represents the authoritative Maze Muncher world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: SessionConfig,
    pristine: MazeGrid,
    grid: MazeGrid,
    agent: Agent,
    session: Session,
    tick_index: u64,
}

impl World {
    /// Creates a new world from the provided configuration.
    ///
    /// Malformed configuration is a contract violation that fails here
    /// rather than surfacing as runtime misbehavior.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        if config.tile_length == 0 {
            return Err(ConfigError::ZeroTileLength);
        }
        if config.speed == 0 {
            return Err(ConfigError::ZeroSpeed);
        }

        let grid = MazeGrid::from_config(&config)?;
        let start = CellCoord::new(config.start.column as i32, config.start.row as i32);
        if config.start.column >= config.columns || config.start.row >= config.rows {
            return Err(ConfigError::StartOutOfBounds {
                column: config.start.column,
                row: config.start.row,
            });
        }
        if !grid.is_passable(start) {
            return Err(ConfigError::StartInsideWall {
                column: config.start.column,
                row: config.start.row,
            });
        }

        let agent = Agent::at_start(&config, &grid);
        Ok(Self {
            banner: WELCOME_BANNER,
            pristine: grid.clone(),
            grid,
            agent,
            session: Session::fresh(),
            tick_index: 0,
            config,
        })
    }

    fn reset(&mut self) {
        self.grid = self.pristine.clone();
        self.agent = Agent::at_start(&self.config, &self.grid);
        self.session = Session::fresh();
        self.tick_index = 0;
    }

    fn consume_under_agent(&mut self, out_events: &mut Vec<Event>) {
        let cell = self.grid.tile_under(self.agent.position);
        let reward = self.grid.consume_if_collectible(cell);
        if reward > 0 {
            self.session.score = self.session.score.saturating_add(reward);
            out_events.push(Event::CollectibleConsumed { cell, reward });
            out_events.push(Event::ScoreChanged {
                score: self.session.score,
            });
        }
    }

    fn check_win(&mut self, out_events: &mut Vec<Event>) {
        if self.session.running && self.grid.remaining_collectibles() == 0 {
            self.session.running = false;
            out_events.push(Event::SessionWon {
                final_score: self.session.score,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands other than [`Command::Restart`] are ignored once the session has
/// reached its terminal won state; the running flag is one-way.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if !world.session.running && !matches!(command, Command::Restart) {
        return;
    }

    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TickAdvanced {
                tick: world.tick_index,
            });
            // The tile under the agent is consumed every step, which also
            // covers an agent that starts the session on a collectible.
            world.consume_under_agent(out_events);
            world.check_win(out_events);
        }
        Command::QueueDirection { direction } => {
            world.agent.queued = Some(direction);
            out_events.push(Event::DirectionQueued { direction });
        }
        Command::SetDirection { direction } => {
            let centered = position_is_centered(
                world.agent.position,
                world.grid.tile_length(),
                world.grid.half_length(),
            );
            let destination = world
                .grid
                .tile_under(world.agent.position)
                .offset_by(direction);
            if centered && world.grid.is_passable(destination) {
                world.agent.current = Some(direction);
                world.agent.queued = None;
                out_events.push(Event::DirectionCommitted { direction });
            }
        }
        Command::MoveAgent { to } => {
            if world.grid.move_blocked(to) {
                // Hard stop on collision: the agent stays put and needs a
                // fresh queued direction to resume.
                world.agent.current = None;
                out_events.push(Event::AgentHalted {
                    at: world.grid.tile_under(world.agent.position),
                });
                return;
            }

            let from = world.agent.position;
            world.agent.position = to;
            out_events.push(Event::AgentMoved { from, to });

            world.consume_under_agent(out_events);
            world.check_win(out_events);
        }
        Command::HaltAgent => {
            if world.agent.current.take().is_some() {
                out_events.push(Event::AgentHalted {
                    at: world.grid.tile_under(world.agent.position),
                });
            }
        }
        Command::Restart => {
            world.reset();
            out_events.push(Event::SessionReset);
        }
    }
}

pub(crate) fn position_is_centered(position: Position, tile_length: u32, half: u32) -> bool {
    centered_on_axis(position.x(), tile_length, half)
        && centered_on_axis(position.y(), tile_length, half)
}

fn centered_on_axis(value: f32, tile_length: u32, half: u32) -> bool {
    // Round before the modulo so floating speed steps that drift off exact
    // multiples still register as centered.
    let offset = (value - half as f32).round() as i64;
    offset.rem_euclid(i64::from(tile_length)) == 0
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{position_is_centered, MazeGrid, World};
    use maze_muncher_core::{CellCoord, CellKind, Direction, Position, SessionConfig};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the session configuration.
    #[must_use]
    pub fn session_config(world: &World) -> &SessionConfig {
        &world.config
    }

    /// Exposes a read-only view of the maze grid.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        GridView { grid: &world.grid }
    }

    /// Captures an immutable snapshot of the agent pose.
    #[must_use]
    pub fn agent_snapshot(world: &World) -> AgentSnapshot {
        AgentSnapshot {
            position: world.agent.position,
            current: world.agent.current,
            queued: world.agent.queued,
            speed: world.agent.speed,
            tile: world.grid.tile_under(world.agent.position),
        }
    }

    /// Total score accumulated by the session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.session.score
    }

    /// Reports whether the session still accepts simulation steps.
    ///
    /// Callers must stop scheduling steps once this turns false.
    #[must_use]
    pub fn is_running(world: &World) -> bool {
        world.session.running
    }

    /// Number of collectibles still present in the maze.
    #[must_use]
    pub fn remaining_collectibles(world: &World) -> u32 {
        world.grid.remaining_collectibles()
    }

    /// Index of the most recently completed simulation step.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Read-only view into the maze grid.
    #[derive(Clone, Copy, Debug)]
    pub struct GridView<'a> {
        grid: &'a MazeGrid,
    }

    impl<'a> GridView<'a> {
        /// Kind of the cell at the provided coordinate; out-of-bounds reads
        /// as wall.
        #[must_use]
        pub fn kind_at(&self, cell: CellCoord) -> CellKind {
            self.grid.kind_at(cell)
        }

        /// Reports whether the agent may occupy the provided cell.
        #[must_use]
        pub fn is_passable(&self, cell: CellCoord) -> bool {
            self.grid.is_passable(cell)
        }

        /// Tests a candidate position's probe corners against the walls.
        #[must_use]
        pub fn move_blocked(&self, to: Position) -> bool {
            self.grid.move_blocked(to)
        }

        /// Tile containing the provided pixel-space position.
        #[must_use]
        pub fn tile_under(&self, position: Position) -> CellCoord {
            self.grid.tile_under(position)
        }

        /// Side length of a single square tile measured in pixels.
        #[must_use]
        pub fn tile_length(&self) -> u32 {
            self.grid.tile_length()
        }

        /// Grid dimensions as a `(columns, rows)` pair.
        #[must_use]
        pub fn dimensions(&self) -> (u32, u32) {
            self.grid.dimensions()
        }

        /// Cell kinds in row-major order, topmost row first.
        #[must_use]
        pub fn cells(&self) -> &'a [CellKind] {
            self.grid.cells()
        }
    }

    /// Immutable representation of the agent pose used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct AgentSnapshot {
        /// Continuous pixel-space position of the agent's center.
        pub position: Position,
        /// Direction the agent currently travels in, if any.
        pub current: Option<Direction>,
        /// Pending directional intent awaiting a legal turn.
        pub queued: Option<Direction>,
        /// Distance in pixels the agent travels per step.
        pub speed: u32,
        /// Tile containing the agent's center.
        pub tile: CellCoord,
    }

    impl AgentSnapshot {
        /// Reports whether the agent sits exactly on a tile center.
        #[must_use]
        pub fn is_centered(&self, tile_length: u32) -> bool {
            position_is_centered(self.position, tile_length, tile_length / 2)
        }
    }
}

/// Reasons a session configuration is rejected at world construction.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid must contain at least one column and one row.
    ZeroDimensions {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// Tiles must have a positive side length.
    ZeroTileLength,
    /// The agent must advance a positive distance per step.
    ZeroSpeed,
    /// A layout row's character count differs from the configured columns.
    NonRectangularLayout {
        /// Zero-based index of the offending row.
        row_index: usize,
        /// Configured column count.
        expected: u32,
        /// Character count of the offending row.
        actual: usize,
    },
    /// More layout rows were provided than the configured row count.
    TooManyLayoutRows {
        /// Configured row count.
        expected: u32,
        /// Number of layout rows provided.
        actual: usize,
    },
    /// The starting tile lies outside the grid.
    StartOutOfBounds {
        /// Configured start column.
        column: u32,
        /// Configured start row.
        row: u32,
    },
    /// The starting tile is a wall.
    StartInsideWall {
        /// Configured start column.
        column: u32,
        /// Configured start row.
        row: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimensions { columns, rows } => {
                write!(f, "grid dimensions must be positive (received {columns}x{rows})")
            }
            Self::ZeroTileLength => write!(f, "tile_length must be positive"),
            Self::ZeroSpeed => write!(f, "speed must be positive"),
            Self::NonRectangularLayout {
                row_index,
                expected,
                actual,
            } => write!(
                f,
                "layout row {row_index} holds {actual} cells but the grid is {expected} columns wide"
            ),
            Self::TooManyLayoutRows { expected, actual } => write!(
                f,
                "layout provides {actual} rows but the grid is {expected} rows tall"
            ),
            Self::StartOutOfBounds { column, row } => {
                write!(f, "start tile ({column}, {row}) lies outside the grid")
            }
            Self::StartInsideWall { column, row } => {
                write!(f, "start tile ({column}, {row}) is a wall")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_muncher_core::StartTile;

    fn corridor_config() -> SessionConfig {
        SessionConfig {
            columns: 7,
            rows: 3,
            tile_length: 16,
            start: StartTile::new(1, 1),
            speed: 4,
            reward: 10,
            layout_rows: vec![
                "1111111".to_owned(),
                "1002001".to_owned(),
                "1111111".to_owned(),
            ],
        }
    }

    fn center_of(column: i32, row: i32, tile: f32) -> Position {
        Position::new(column as f32 * tile + tile / 2.0, row as f32 * tile + tile / 2.0)
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        let mut config = corridor_config();
        config.columns = 0;
        assert_eq!(
            World::new(config).unwrap_err(),
            ConfigError::ZeroDimensions { columns: 0, rows: 3 }
        );
    }

    #[test]
    fn new_rejects_zero_tile_length() {
        let mut config = corridor_config();
        config.tile_length = 0;
        assert_eq!(World::new(config).unwrap_err(), ConfigError::ZeroTileLength);
    }

    #[test]
    fn new_rejects_zero_speed() {
        let mut config = corridor_config();
        config.speed = 0;
        assert_eq!(World::new(config).unwrap_err(), ConfigError::ZeroSpeed);
    }

    #[test]
    fn new_rejects_non_rectangular_layout() {
        let mut config = corridor_config();
        config.layout_rows[1] = "100201".to_owned();
        assert_eq!(
            World::new(config).unwrap_err(),
            ConfigError::NonRectangularLayout {
                row_index: 1,
                expected: 7,
                actual: 6,
            }
        );
    }

    #[test]
    fn new_rejects_excess_layout_rows() {
        let mut config = corridor_config();
        config.layout_rows.push("1111111".to_owned());
        assert_eq!(
            World::new(config).unwrap_err(),
            ConfigError::TooManyLayoutRows {
                expected: 3,
                actual: 4,
            }
        );
    }

    #[test]
    fn new_rejects_start_outside_grid() {
        let mut config = corridor_config();
        config.start = StartTile::new(7, 1);
        assert_eq!(
            World::new(config).unwrap_err(),
            ConfigError::StartOutOfBounds { column: 7, row: 1 }
        );
    }

    #[test]
    fn new_rejects_start_inside_wall() {
        let mut config = corridor_config();
        config.start = StartTile::new(0, 0);
        assert_eq!(
            World::new(config).unwrap_err(),
            ConfigError::StartInsideWall { column: 0, row: 0 }
        );
    }

    #[test]
    fn classic_configuration_constructs_a_world() {
        let world = World::new(SessionConfig::classic()).expect("classic maze is valid");
        let agent = query::agent_snapshot(&world);
        assert!(agent.is_centered(16));
        assert!(query::grid_view(&world).is_passable(agent.tile));
        assert!(query::remaining_collectibles(&world) > 0);
    }

    #[test]
    fn missing_layout_rows_pad_as_wall() {
        let mut config = corridor_config();
        config.rows = 5;
        let world = World::new(config).expect("valid configuration");
        let grid = query::grid_view(&world);
        for column in 0..7 {
            assert_eq!(grid.kind_at(CellCoord::new(column, 3)), CellKind::Wall);
            assert_eq!(grid.kind_at(CellCoord::new(column, 4)), CellKind::Wall);
        }
    }

    #[test]
    fn out_of_bounds_cells_read_as_wall() {
        let world = World::new(corridor_config()).expect("valid configuration");
        let grid = query::grid_view(&world);
        assert_eq!(grid.kind_at(CellCoord::new(-1, 1)), CellKind::Wall);
        assert_eq!(grid.kind_at(CellCoord::new(1, -1)), CellKind::Wall);
        assert_eq!(grid.kind_at(CellCoord::new(7, 1)), CellKind::Wall);
        assert_eq!(grid.kind_at(CellCoord::new(1, 3)), CellKind::Wall);
        assert!(!grid.is_passable(CellCoord::new(-1, -1)));
    }

    #[test]
    fn consumption_is_idempotent() {
        let mut world = World::new(corridor_config()).expect("valid configuration");
        let cell = CellCoord::new(3, 1);
        assert_eq!(world.grid.kind_at(cell), CellKind::Collectible);

        assert_eq!(world.grid.consume_if_collectible(cell), 10);
        assert_eq!(world.grid.kind_at(cell), CellKind::Empty);
        assert_eq!(world.grid.consume_if_collectible(cell), 0);
        assert_eq!(world.grid.consume_if_collectible(cell), 0);
    }

    #[test]
    fn remaining_counter_matches_full_scan() {
        let mut world = World::new(corridor_config()).expect("valid configuration");
        assert_eq!(
            world.grid.remaining_collectibles(),
            world.grid.count_collectibles_by_scan()
        );

        let _ = world.grid.consume_if_collectible(CellCoord::new(3, 1));
        assert_eq!(
            world.grid.remaining_collectibles(),
            world.grid.count_collectibles_by_scan()
        );

        let _ = world.grid.consume_if_collectible(CellCoord::new(3, 1));
        assert_eq!(
            world.grid.remaining_collectibles(),
            world.grid.count_collectibles_by_scan()
        );
    }

    #[test]
    fn set_direction_rejects_turns_into_walls() {
        let mut world = World::new(corridor_config()).expect("valid configuration");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::QueueDirection {
                direction: Direction::Up,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SetDirection {
                direction: Direction::Up,
            },
            &mut events,
        );

        let agent = query::agent_snapshot(&world);
        assert_eq!(agent.current, None);
        assert_eq!(agent.queued, Some(Direction::Up));
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::DirectionCommitted { .. })));
    }

    #[test]
    fn blocked_move_halts_the_agent_in_place() {
        let mut world = World::new(corridor_config()).expect("valid configuration");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SetDirection {
                direction: Direction::Right,
            },
            &mut events,
        );
        let before = query::agent_snapshot(&world);

        // Pushing straight into the wall left of the corridor.
        apply(
            &mut world,
            Command::MoveAgent {
                to: center_of(0, 1, 16.0),
            },
            &mut events,
        );

        let agent = query::agent_snapshot(&world);
        assert_eq!(agent.position, before.position);
        assert_eq!(agent.current, None);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::AgentHalted { .. })));
    }

    #[test]
    fn consuming_the_last_collectible_wins_the_session() {
        let mut world = World::new(corridor_config()).expect("valid configuration");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveAgent {
                to: center_of(3, 1, 16.0),
            },
            &mut events,
        );

        assert_eq!(query::score(&world), 10);
        assert!(!query::is_running(&world));
        assert!(events.contains(&Event::CollectibleConsumed {
            cell: CellCoord::new(3, 1),
            reward: 10,
        }));
        assert!(events.contains(&Event::ScoreChanged { score: 10 }));
        assert!(events.contains(&Event::SessionWon { final_score: 10 }));
    }

    #[test]
    fn terminal_state_ignores_further_commands() {
        let mut world = World::new(corridor_config()).expect("valid configuration");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveAgent {
                to: center_of(3, 1, 16.0),
            },
            &mut events,
        );
        assert!(!query::is_running(&world));

        events.clear();
        apply(&mut world, Command::Tick, &mut events);
        apply(
            &mut world,
            Command::QueueDirection {
                direction: Direction::Left,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MoveAgent {
                to: center_of(2, 1, 16.0),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(!query::is_running(&world));
        assert_eq!(query::tick_index(&world), 0);
    }

    #[test]
    fn restart_discards_all_session_progress() {
        let mut world = World::new(corridor_config()).expect("valid configuration");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveAgent {
                to: center_of(3, 1, 16.0),
            },
            &mut events,
        );
        assert!(!query::is_running(&world));

        events.clear();
        apply(&mut world, Command::Restart, &mut events);

        assert_eq!(events, vec![Event::SessionReset]);
        assert!(query::is_running(&world));
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::remaining_collectibles(&world), 1);
        let agent = query::agent_snapshot(&world);
        assert_eq!(agent.position, center_of(1, 1, 16.0));
        assert_eq!(agent.current, None);
        assert_eq!(agent.queued, None);
    }

    #[test]
    fn agent_snapshot_reports_centering() {
        let world = World::new(corridor_config()).expect("valid configuration");
        let agent = query::agent_snapshot(&world);
        assert!(agent.is_centered(16));

        let off_center = query::AgentSnapshot {
            position: agent.position.translated(4.0, 0.0),
            ..agent
        };
        assert!(!off_center.is_centered(16));
    }

    #[test]
    fn start_tile_collectible_is_consumed_on_first_tick() {
        let mut config = corridor_config();
        config.layout_rows[1] = "1200001".to_owned();
        let mut world = World::new(config).expect("valid configuration");
        let mut events = Vec::new();

        apply(&mut world, Command::Tick, &mut events);

        assert_eq!(query::score(&world), 10);
        assert!(events.contains(&Event::CollectibleConsumed {
            cell: CellCoord::new(1, 1),
            reward: 10,
        }));
        assert!(events.contains(&Event::SessionWon { final_score: 10 }));
    }

    #[test]
    fn collectible_free_layout_wins_on_first_tick() {
        let mut config = corridor_config();
        config.layout_rows[1] = "1000001".to_owned();
        let mut world = World::new(config).expect("valid configuration");
        let mut events = Vec::new();

        apply(&mut world, Command::Tick, &mut events);

        assert!(!query::is_running(&world));
        assert!(events.contains(&Event::SessionWon { final_score: 0 }));
    }
}
