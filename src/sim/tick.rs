//! Per-frame simulation step
//!
//! Applies queued player commands, then advances the run by one frame delta.

use super::collision::first_hit;
use super::difficulty::{smooth_interval, speed_at, target_spawn_interval};
use super::spawn::{SpawnSource, spawn_obstacle};
use super::state::{GameState, RunPhase, TapSide};

/// A discrete player intent, queued by input handlers between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    TogglePause,
    /// Only honoured once the run has ended
    Restart,
    /// Pointer tap: restart when dead, otherwise a lane change toward that side
    Tap(TapSide),
    /// Tab hidden or window lost focus
    AutoPause,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Applied in order before the simulation advances
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LaneChanged { lane: u8 },
    Paused,
    Resumed,
    Restarted,
    ObstacleSpawned { id: u32, lane: u8 },
    ObstacleScored { id: u32, score: u32 },
    /// Collision ended the run. `new_best` is set when the host should persist `best`.
    RunEnded { score: u32, best: u32, new_best: bool },
}

/// Advance the game state by one frame
pub fn tick<S: SpawnSource + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    source: &mut S,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for &command in &input.commands {
        apply_command(state, command, &mut events);
    }

    // NaN and negative deltas (clock skew) advance nothing
    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.tuning.max_frame_dt)
    } else {
        0.0
    };

    // Don't tick if paused or dead
    if state.phase != RunPhase::Running {
        return events;
    }

    // Difficulty ramp
    state.elapsed += dt;
    state.speed = speed_at(&state.tuning, state.elapsed);
    let target = target_spawn_interval(&state.tuning, state.elapsed);
    state.spawn_interval = smooth_interval(&state.tuning, state.spawn_interval, target);

    // Spawning
    state.spawn_timer += dt;
    if state.spawn_timer >= state.spawn_interval {
        state.spawn_timer = 0.0;
        let id = spawn_obstacle(state, source);
        if let Some(o) = state.obstacles.last() {
            events.push(GameEvent::ObstacleSpawned { id, lane: o.lane });
        }
    }

    // Fall and score
    let step = state.speed * dt;
    let line = state.player.y;
    for obstacle in &mut state.obstacles {
        obstacle.y += step;
        if !obstacle.passed && obstacle.bottom() >= line {
            obstacle.passed = true;
            state.score += 1;
            events.push(GameEvent::ObstacleScored {
                id: obstacle.id,
                score: state.score,
            });
        }
    }

    state.obstacles.retain(|o| !o.is_off_screen());

    // Collision - first hit ends the run, nothing else is checked this frame
    if first_hit(&state.obstacles, &state.player).is_some() {
        end_run(state, &mut events);
    }

    events
}

fn apply_command(state: &mut GameState, command: Command, events: &mut Vec<GameEvent>) {
    match (command, state.phase) {
        (Command::MoveLeft, RunPhase::Running) | (Command::Tap(TapSide::Left), RunPhase::Running) => {
            if state.player.move_left() {
                events.push(GameEvent::LaneChanged {
                    lane: state.player.lane,
                });
            }
        }
        (Command::MoveRight, RunPhase::Running)
        | (Command::Tap(TapSide::Right), RunPhase::Running) => {
            let last = state.tuning.last_lane();
            if state.player.move_right(last) {
                events.push(GameEvent::LaneChanged {
                    lane: state.player.lane,
                });
            }
        }
        (Command::TogglePause, RunPhase::Running) | (Command::AutoPause, RunPhase::Running) => {
            state.phase = RunPhase::Paused;
            log::info!("Paused at {:.1}s, score {}", state.elapsed, state.score);
            events.push(GameEvent::Paused);
        }
        (Command::TogglePause, RunPhase::Paused) => {
            state.phase = RunPhase::Running;
            log::info!("Resumed");
            events.push(GameEvent::Resumed);
        }
        (Command::Restart, RunPhase::Dead) | (Command::Tap(_), RunPhase::Dead) => {
            state.restart();
            log::info!("Run {} started", state.runs);
            events.push(GameEvent::Restarted);
        }
        // Everything else is a no-op in the current phase
        _ => {}
    }
}

fn end_run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = RunPhase::Dead;
    let new_best = state.score > state.best_score;
    state.best_score = state.best_score.max(state.score);
    log::info!(
        "Run over: score {} (best {}{})",
        state.score,
        state.best_score,
        if new_best { ", new best" } else { "" }
    );
    events.push(GameEvent::RunEnded {
        score: state.score,
        best: state.best_score,
        new_best,
    });
}
