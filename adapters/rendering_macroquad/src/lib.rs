#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Muncher.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use maze_muncher_core::{CellCoord, CellKind, Direction};
use maze_muncher_rendering::{
    FrameInput, MazePresentation, Presentation, RenderingBackend, Scene, ScenePhase,
};
use std::f32::consts::PI;
use std::time::Duration;

/// Number of straight segments used to approximate the agent's body arc.
const BODY_SEGMENTS: u32 = 32;

/// Radius of a collectible disc expressed in unscaled pixels.
const COLLECTIBLE_RADIUS: f32 = 3.0;

/// Keyboard state sampled once per frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    quit_requested: bool,
    restart: bool,
    queued_direction: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let restart = is_key_pressed(KeyCode::R);

        let queued_direction = if is_key_pressed(KeyCode::Left) {
            Some(Direction::Left)
        } else if is_key_pressed(KeyCode::Right) {
            Some(Direction::Right)
        } else if is_key_pressed(KeyCode::Up) {
            Some(Direction::Up)
        } else if is_key_pressed(KeyCode::Down) {
            Some(Direction::Down)
        } else {
            None
        };

        Self {
            quit_requested,
            restart,
            queued_direction,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the
    /// platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per
    /// second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (scene.maze.width() * 2.0).max(320.0) as i32,
            window_height: (scene.maze.height() * 2.0).max(320.0) as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    queued_direction: keyboard.queued_direction,
                    restart: keyboard.restart,
                };

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::fit(
                    &scene.maze,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_maze(&scene.maze, &metrics);
                draw_agent(&scene, &metrics);
                draw_hud(&scene, &metrics);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SceneMetrics {
    fn fit(maze: &MazePresentation, screen_width: f32, screen_height: f32) -> Self {
        let maze_width = maze.width().max(1.0);
        let maze_height = maze.height().max(1.0);
        let scale = (screen_width / maze_width)
            .min(screen_height / maze_height)
            .max(f32::EPSILON);

        Self {
            scale,
            offset_x: (screen_width - maze_width * scale) * 0.5,
            offset_y: (screen_height - maze_height * scale) * 0.5,
        }
    }

    fn project(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.offset_x + x * self.scale,
            self.offset_y + y * self.scale,
        )
    }
}

fn draw_maze(maze: &MazePresentation, metrics: &SceneMetrics) {
    let tile = maze.tile_length;
    let wall_color = to_macroquad_color(maze.wall_color);
    let collectible_color = to_macroquad_color(maze.collectible_color);

    for row in 0..maze.rows {
        for column in 0..maze.columns {
            let kind = maze.kind_at(CellCoord::new(column as i32, row as i32));
            let (x, y) = metrics.project(column as f32 * tile, row as f32 * tile);
            match kind {
                CellKind::Wall => {
                    macroquad::shapes::draw_rectangle(
                        x,
                        y,
                        tile * metrics.scale,
                        tile * metrics.scale,
                        wall_color,
                    );
                }
                CellKind::Collectible => {
                    let half = tile * 0.5 * metrics.scale;
                    macroquad::shapes::draw_circle(
                        x + half,
                        y + half,
                        COLLECTIBLE_RADIUS * metrics.scale,
                        collectible_color,
                    );
                }
                CellKind::Empty => {}
            }
        }
    }
}

fn draw_agent(scene: &Scene, metrics: &SceneMetrics) {
    let agent = &scene.agent;
    let (center_x, center_y) = metrics.project(agent.position.x, agent.position.y);
    let center = MacroquadVec2::new(center_x, center_y);
    let radius = (scene.maze.tile_length * 0.5 - 1.0).max(1.0) * metrics.scale;
    let color = to_macroquad_color(agent.body_color);

    // The body is a disc with a wedge removed for the mouth; the wedge
    // angle follows the animation value exactly like the reference
    // renderer: openness * PI / 3.
    let mouth = (agent.mouth_openness * PI / 3.0).max(0.0);
    let heading = agent.heading();
    let start = heading + mouth;
    let sweep = (2.0 * PI - 2.0 * mouth).max(0.0);

    let step = sweep / BODY_SEGMENTS as f32;
    for segment in 0..BODY_SEGMENTS {
        let from = start + segment as f32 * step;
        let to = from + step;
        macroquad::shapes::draw_triangle(
            center,
            center + MacroquadVec2::new(from.cos(), from.sin()) * radius,
            center + MacroquadVec2::new(to.cos(), to.sin()) * radius,
            color,
        );
    }
}

fn draw_hud(scene: &Scene, metrics: &SceneMetrics) {
    let font_size = (20.0 * metrics.scale).max(16.0);
    macroquad::text::draw_text(
        &format!("Score: {}", scene.score),
        metrics.offset_x + 8.0,
        metrics.offset_y + font_size,
        font_size,
        macroquad::color::WHITE,
    );

    if let ScenePhase::Won { final_score } = scene.phase {
        let (x, y) = metrics.project(0.0, 0.0);
        macroquad::shapes::draw_rectangle(
            x,
            y,
            scene.maze.width() * metrics.scale,
            scene.maze.height() * metrics.scale,
            macroquad::color::Color::new(0.0, 0.0, 0.0, 0.6),
        );
        let (text_x, text_y) = metrics.project(
            scene.maze.width() * 0.1,
            scene.maze.height() * 0.5,
        );
        macroquad::text::draw_text(
            &format!("You won! Score: {final_score}"),
            text_x,
            text_y,
            font_size * 1.2,
            macroquad::color::WHITE,
        );
    }
}

fn to_macroquad_color(color: maze_muncher_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
