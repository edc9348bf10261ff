#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Muncher experience.

mod maze_transfer;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use maze_muncher_core::{Command, Event, SessionConfig};
use maze_muncher_rendering::{
    AgentPresentation, Color, MazePresentation, MouthAnimation, Presentation, RenderingBackend,
    Scene, ScenePhase,
};
use maze_muncher_rendering_macroquad::MacroquadBackend;
use maze_muncher_system_motion::Motion;
use maze_muncher_world::{self as world, query, World};

use crate::maze_transfer::MazeTransfer;

const WINDOW_TITLE: &str = "Maze Muncher";
const BACKGROUND: Color = Color::from_rgb_u8(0, 0, 0);
const WALL_COLOR: Color = Color::from_rgb_u8(0, 31, 122);
const COLLECTIBLE_COLOR: Color = Color::from_rgb_u8(255, 210, 127);
const AGENT_COLOR: Color = Color::from_rgb_u8(255, 213, 0);

/// Command-line options accepted by the Maze Muncher binary.
#[derive(Debug, Parser)]
#[command(name = "maze-muncher", about = "Grid-based maze muncher arcade session")]
struct Cli {
    /// Path to a TOML session configuration; defaults to the classic maze.
    #[arg(long, value_name = "PATH", conflicts_with = "layout")]
    config: Option<PathBuf>,

    /// Encoded maze string produced by `--export-layout`.
    #[arg(long, value_name = "STRING")]
    layout: Option<String>,

    /// Print the resolved configuration as an encoded maze string and exit.
    #[arg(long)]
    export_layout: bool,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Render as fast as possible instead of waiting for the display.
    #[arg(long)]
    no_vsync: bool,
}

/// Entry point for the Maze Muncher command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    if cli.export_layout {
        println!("{}", MazeTransfer::from_config(&config).encode());
        return Ok(());
    }

    let world = World::new(config).context("session configuration rejected")?;
    log::info!("{}", query::welcome_banner(&world));

    let scene = build_scene(&world)?;
    let presentation = Presentation::new(WINDOW_TITLE, BACKGROUND, scene);
    let backend = MacroquadBackend::new()
        .with_vsync(!cli.no_vsync)
        .with_show_fps(cli.show_fps);

    run_session(backend, presentation, world)
}

/// Resolves the session configuration from the command line, preferring an
/// encoded maze string over a configuration file.
fn resolve_config(cli: &Cli) -> Result<SessionConfig> {
    if let Some(encoded) = cli.layout.as_deref() {
        let transfer = MazeTransfer::decode(encoded).context("invalid --layout string")?;
        return Ok(transfer.into_config());
    }

    if let Some(path) = cli.config.as_deref() {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read configuration at {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("could not parse configuration at {}", path.display()))?;
        return Ok(config);
    }

    Ok(SessionConfig::classic())
}

/// Drives the simulation from the backend's frame callback: queued input is
/// applied first, then one simulation step runs while the session is live.
fn run_session(
    backend: MacroquadBackend,
    presentation: Presentation,
    mut world: World,
) -> Result<()> {
    let motion = Motion::default();
    let mut mouth = MouthAnimation::new();

    backend.run(presentation, move |_frame_dt, input, scene| {
        let mut events = Vec::new();

        if input.restart {
            world::apply(&mut world, Command::Restart, &mut events);
            mouth = MouthAnimation::new();
        }
        if let Some(direction) = input.queued_direction {
            world::apply(&mut world, Command::QueueDirection { direction }, &mut events);
        }

        if query::is_running(&world) {
            world::apply(&mut world, Command::Tick, &mut events);

            let mut commands = Vec::new();
            {
                let agent = query::agent_snapshot(&world);
                let grid = query::grid_view(&world);
                motion.handle(&events, &agent, grid, &mut commands);
            }
            for command in commands {
                world::apply(&mut world, command, &mut events);
            }

            mouth.advance();
        }

        for event in &events {
            if let Event::SessionWon { final_score } = event {
                log::info!("maze cleared with a final score of {final_score}");
            }
        }

        sync_scene(&world, &mouth, scene);
    })
}

fn build_scene(world: &World) -> Result<Scene> {
    let grid = query::grid_view(world);
    let (columns, rows) = grid.dimensions();
    let maze = MazePresentation::new(
        columns,
        rows,
        grid.tile_length() as f32,
        WALL_COLOR,
        COLLECTIBLE_COLOR,
        grid.cells().to_vec(),
    )
    .context("world grid does not describe a drawable maze")?;

    let agent = agent_presentation(world, &MouthAnimation::new());
    let scene = Scene::new(maze, agent, query::score(world), ScenePhase::Running);
    Ok(scene)
}

fn agent_presentation(world: &World, mouth: &MouthAnimation) -> AgentPresentation {
    let agent = query::agent_snapshot(world);
    AgentPresentation::new(
        Vec2::new(agent.position.x(), agent.position.y()),
        agent.current,
        mouth.openness(),
        AGENT_COLOR,
    )
}

fn sync_scene(world: &World, mouth: &MouthAnimation, scene: &mut Scene) {
    scene.maze.cells.clear();
    scene
        .maze
        .cells
        .extend_from_slice(query::grid_view(world).cells());
    scene.agent = agent_presentation(world, mouth);
    scene.score = query::score(world);
    scene.phase = if query::is_running(world) {
        ScenePhase::Running
    } else {
        ScenePhase::Won {
            final_score: query::score(world),
        }
    };
}
