#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Muncher adapters.
//!
//! Backends consume a declarative [`Scene`] describing the maze, the agent
//! pose, and the session status; adapters repopulate the scene once per
//! frame from world snapshots. Nothing in this crate touches a window or a
//! GPU, which keeps the contracts testable everywhere.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_muncher_core::{CellCoord, CellKind, Direction};
use std::{error::Error, fmt, time::Duration};

/// Amount the mouth openness changes per simulation step.
const MOUTH_STEP: f32 = 0.2;

/// Openness bound beyond which the mouth starts closing again.
const MOUTH_MAX: f32 = 0.9;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            red: self.red,
            green: self.green,
            blue: self.blue,
            alpha,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Directional intent captured from the keyboard on this frame, if any.
    pub queued_direction: Option<Direction>,
    /// Whether the adapter detected a restart request on this frame.
    pub restart: bool,
}

/// Purely cosmetic mouth animation carried by the agent presentation.
///
/// The openness oscillates by a fixed per-step delta, reversing when the
/// value leaves the nominal bounds. The reversal happens after the
/// increment, matching the reference renderer exactly, so the value may
/// transiently overshoot a bound by one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouthAnimation {
    openness: f32,
    delta: f32,
}

impl MouthAnimation {
    /// Creates a closed mouth that starts opening.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            openness: 0.0,
            delta: MOUTH_STEP,
        }
    }

    /// Advances the oscillation by one simulation step.
    pub fn advance(&mut self) {
        self.openness += self.delta;
        if self.openness > MOUTH_MAX || self.openness < 0.0 {
            self.delta = -self.delta;
        }
    }

    /// Current openness value consumed by backends.
    #[must_use]
    pub const fn openness(&self) -> f32 {
        self.openness
    }
}

impl Default for MouthAnimation {
    fn default() -> Self {
        Self::new()
    }
}

/// Describes the maze layout that backends draw each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MazePresentation {
    /// Number of tile columns laid out in the maze.
    pub columns: u32,
    /// Number of tile rows laid out in the maze.
    pub rows: u32,
    /// Side length of a single square tile expressed in pixels.
    pub tile_length: f32,
    /// Fill color used for wall tiles.
    pub wall_color: Color,
    /// Fill color used for collectible discs.
    pub collectible_color: Color,
    /// Cell kinds in row-major order, topmost row first.
    pub cells: Vec<CellKind>,
}

impl MazePresentation {
    /// Creates a new maze descriptor.
    ///
    /// Returns an error when the cell count does not match the dimensions.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        wall_color: Color,
        collectible_color: Color,
        cells: Vec<CellKind>,
    ) -> std::result::Result<Self, RenderingError> {
        let expected = columns as usize * rows as usize;
        if cells.len() != expected {
            return Err(RenderingError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            wall_color,
            collectible_color,
            cells,
        })
    }

    /// Kind of the cell at the provided coordinate; out-of-bounds reads as
    /// wall, mirroring the world's closed-world assumption.
    #[must_use]
    pub fn kind_at(&self, cell: CellCoord) -> CellKind {
        if cell.column() < 0 || cell.row() < 0 {
            return CellKind::Wall;
        }
        let column = cell.column() as u32;
        let row = cell.row() as u32;
        if column >= self.columns || row >= self.rows {
            return CellKind::Wall;
        }
        self.cells[row as usize * self.columns as usize + column as usize]
    }

    /// Total width of the maze measured in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the maze measured in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }
}

/// Agent rendered as a disc with a mouth wedge facing its travel direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentPresentation {
    /// Pixel-space position of the agent's center.
    pub position: Vec2,
    /// Direction the mouth faces; `None` faces right, matching the
    /// reference renderer's default orientation.
    pub facing: Option<Direction>,
    /// Mouth openness in the oscillation range of [`MouthAnimation`].
    pub mouth_openness: f32,
    /// Fill color of the agent's body.
    pub body_color: Color,
}

impl AgentPresentation {
    /// Creates a new agent presentation descriptor.
    #[must_use]
    pub const fn new(
        position: Vec2,
        facing: Option<Direction>,
        mouth_openness: f32,
        body_color: Color,
    ) -> Self {
        Self {
            position,
            facing,
            mouth_openness,
            body_color,
        }
    }

    /// Rotation of the mouth wedge in radians, derived from the facing
    /// direction.
    #[must_use]
    pub fn heading(&self) -> f32 {
        match self.facing {
            Some(Direction::Left) => std::f32::consts::PI,
            Some(Direction::Up) => -std::f32::consts::FRAC_PI_2,
            Some(Direction::Down) => std::f32::consts::FRAC_PI_2,
            Some(Direction::Right) | None => 0.0,
        }
    }
}

/// Session status surfaced to backends for overlay rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenePhase {
    /// The session still accepts simulation steps.
    Running,
    /// Every collectible was consumed; the session is terminal.
    Won {
        /// Score held when the session ended.
        final_score: u32,
    },
}

/// Scene description combining the maze, the agent, and the session status.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Maze layout that composes the play area.
    pub maze: MazePresentation,
    /// Agent visible within the maze.
    pub agent: AgentPresentation,
    /// Score shown by the heads-up display.
    pub score: u32,
    /// Session status controlling the win overlay.
    pub phase: ScenePhase,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(
        maze: MazePresentation,
        agent: AgentPresentation,
        score: u32,
        phase: ScenePhase,
    ) -> Self {
        Self {
            maze,
            agent,
            score,
            phase,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Muncher scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered, allowing adapters to pump the simulation once
    /// per displayed frame.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The provided cell buffer does not match the maze dimensions.
    CellCountMismatch {
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Cell count actually provided.
        actual: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellCountMismatch { expected, actual } => {
                write!(
                    f,
                    "maze presentation expects {expected} cells but received {actual}"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_maze() -> MazePresentation {
        MazePresentation::new(
            3,
            2,
            16.0,
            Color::from_rgb_u8(0, 31, 122),
            Color::from_rgb_u8(255, 210, 127),
            vec![
                CellKind::Wall,
                CellKind::Empty,
                CellKind::Collectible,
                CellKind::Wall,
                CellKind::Wall,
                CellKind::Wall,
            ],
        )
        .expect("matching cell count")
    }

    #[test]
    fn maze_creation_rejects_mismatched_cell_counts() {
        let error = MazePresentation::new(
            3,
            2,
            16.0,
            Color::from_rgb_u8(0, 0, 0),
            Color::from_rgb_u8(0, 0, 0),
            vec![CellKind::Empty; 5],
        )
        .expect_err("five cells cannot fill a 3x2 maze");

        assert_eq!(
            error,
            RenderingError::CellCountMismatch {
                expected: 6,
                actual: 5,
            }
        );
    }

    #[test]
    fn maze_reads_cells_in_row_major_order() {
        let maze = sample_maze();
        assert_eq!(maze.kind_at(CellCoord::new(0, 0)), CellKind::Wall);
        assert_eq!(maze.kind_at(CellCoord::new(1, 0)), CellKind::Empty);
        assert_eq!(maze.kind_at(CellCoord::new(2, 0)), CellKind::Collectible);
        assert_eq!(maze.kind_at(CellCoord::new(0, 1)), CellKind::Wall);
    }

    #[test]
    fn maze_out_of_bounds_reads_as_wall() {
        let maze = sample_maze();
        assert_eq!(maze.kind_at(CellCoord::new(-1, 0)), CellKind::Wall);
        assert_eq!(maze.kind_at(CellCoord::new(3, 0)), CellKind::Wall);
        assert_eq!(maze.kind_at(CellCoord::new(0, 2)), CellKind::Wall);
    }

    #[test]
    fn mouth_oscillates_and_reverses_at_the_bounds() {
        let mut mouth = MouthAnimation::new();
        let mut observed = Vec::new();
        for _ in 0..12 {
            mouth.advance();
            observed.push(mouth.openness());
        }

        // The reversal happens after the increment, so the value overshoots
        // to 1.0 before closing and to -0.2 before reopening.
        let expected = [
            0.2, 0.4, 0.6, 0.8, 1.0, 0.8, 0.6, 0.4, 0.2, 0.0, -0.2, 0.0,
        ];
        for (value, reference) in observed.iter().zip(expected.iter()) {
            assert!((value - reference).abs() < 1e-5);
        }
    }

    #[test]
    fn heading_matches_facing_direction() {
        let agent = |facing| {
            AgentPresentation::new(Vec2::ZERO, facing, 0.0, Color::from_rgb_u8(255, 213, 0))
        };
        assert_eq!(agent(None).heading(), 0.0);
        assert_eq!(agent(Some(Direction::Right)).heading(), 0.0);
        assert_eq!(agent(Some(Direction::Left)).heading(), std::f32::consts::PI);
        assert_eq!(
            agent(Some(Direction::Up)).heading(),
            -std::f32::consts::FRAC_PI_2
        );
        assert_eq!(
            agent(Some(Direction::Down)).heading(),
            std::f32::consts::FRAC_PI_2
        );
    }
}
