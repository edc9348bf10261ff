#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic motion system that turns directional intent into movement.
//!
//! The system is pure: it consumes world events and immutable views, then
//! responds exclusively with command batches. The world re-validates every
//! command before mutating state, so motion and world stay in agreement
//! about centering and collision rules.

use maze_muncher_core::{Command, Event};
use maze_muncher_world::query::{AgentSnapshot, GridView};

/// Pure system that reacts to world events and emits movement commands.
///
/// One simulation step produces at most three commands, in order: an
/// optional direction commit, then either a move proposal or a halt.
#[derive(Debug, Default)]
pub struct Motion;

impl Motion {
    /// Consumes world events and immutable views to emit movement commands.
    ///
    /// The step algorithm is two-phase: a queued direction commits only when
    /// the agent sits exactly on a tile center and the destination tile is
    /// passable; afterwards the active direction proposes a candidate
    /// position one speed-step ahead, which halts instead of moving when any
    /// collision probe lands inside a wall.
    pub fn handle(
        &self,
        events: &[Event],
        agent: &AgentSnapshot,
        grid: GridView<'_>,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TickAdvanced { .. }))
        {
            return;
        }

        let mut direction = agent.current;
        if agent.is_centered(grid.tile_length()) {
            if let Some(queued) = agent.queued {
                if grid.is_passable(agent.tile.offset_by(queued)) {
                    out.push(Command::SetDirection { direction: queued });
                    direction = Some(queued);
                }
                // An impassable destination leaves the queued direction
                // pending; it is retried on every subsequent step.
            }
        }

        let Some(direction) = direction else {
            return;
        };

        let step = agent.speed as f32;
        let candidate = agent.position.translated(
            direction.column_delta() as f32 * step,
            direction.row_delta() as f32 * step,
        );

        if grid.move_blocked(candidate) {
            out.push(Command::HaltAgent);
        } else {
            out.push(Command::MoveAgent { to: candidate });
        }
    }
}
