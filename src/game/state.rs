//! The game engine - one session of aiming, shooting and resolving.
//!
//! An explicit two-state machine drives each shot:
//! - `Idle`: no live projectile, the player may aim and fire.
//! - `Flying`: a projectile advances once per tick, aim and fire input is
//!   ignored until it lands.
//!
//! Win: the grid is empty after a placement resolves.
//! Lose: after a placement resolves, some bubble sits below the danger line.
//! Either ends the session and freezes every input until [`BubbleGame::reset`].

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use super::{
    aim::{PreviewSegment, preview_path},
    bubble::BubbleColor,
    cluster::{MatchResult, resolve_placement},
    config::GameConfig,
    grid::BubbleGrid,
    hex::{CANVAS_WIDTH, GridCoord},
    projectile::{Projectile, snap_cell},
    shooter::{SHOOTER_ORIGIN, ShooterState},
    snapshot::GameSnapshot,
};

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Reflect)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

/// Running score for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Reflect)]
pub struct GameScore {
    pub score: u32,
    pub bubbles_popped: u32,
    pub clusters_popped: u32,
    pub shots_fired: u32,
}

impl GameScore {
    fn record(&mut self, result: &MatchResult) -> u32 {
        let points = result.score_delta();
        if result.popped() {
            self.score += points;
            self.bubbles_popped += (result.cluster.len() + result.floating.len()) as u32;
            self.clusters_popped += 1;
        }
        points
    }
}

/// The shot state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Flying(Projectile),
}

/// A projectile that settled on the grid this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Landing {
    pub coord: GridCoord,
    pub color: BubbleColor,
    /// What the placement removed, empty when no cluster popped.
    pub matched: MatchResult,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub status: GameStatus,
    pub score_delta: u32,
    pub landing: Option<Landing>,
}

impl TickReport {
    fn quiet(status: GameStatus) -> Self {
        Self {
            status,
            score_delta: 0,
            landing: None,
        }
    }
}

/// One bubble-shooter session. Owns the grid, the shooter and the projectile.
#[derive(Debug, Clone)]
pub struct BubbleGame {
    config: GameConfig,
    grid: BubbleGrid,
    shooter: ShooterState,
    phase: Phase,
    status: GameStatus,
    score: GameScore,
    rng: StdRng,
}

/// A config the simulation can run with; invalid ones fall back to defaults.
fn checked_config(config: GameConfig) -> GameConfig {
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("{}, using default settings", e);
            GameConfig {
                seed: config.seed,
                ..GameConfig::default()
            }
        }
    }
}

fn session_rng(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

impl BubbleGame {
    /// Start a session with the opening layout.
    pub fn new(config: GameConfig) -> Self {
        let config = checked_config(config);
        let mut rng = session_rng(&config);
        let grid = BubbleGrid::initial_layout(&mut rng);
        let shooter = ShooterState::random(&mut rng);
        info!(
            "New game: {} bubbles, seed {:?}",
            grid.len(),
            config.seed
        );
        Self {
            config,
            grid,
            shooter,
            phase: Phase::Idle,
            status: GameStatus::Playing,
            score: GameScore::default(),
            rng,
        }
    }

    /// Start a session from a prepared grid and shooter.
    pub fn with_layout(config: GameConfig, grid: BubbleGrid, shooter: ShooterState) -> Self {
        let config = checked_config(config);
        let rng = session_rng(&config);
        Self {
            config,
            grid,
            shooter,
            phase: Phase::Idle,
            status: GameStatus::Playing,
            score: GameScore::default(),
            rng,
        }
    }

    /// Throw the session away and deal a fresh one with the same config.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &BubbleGrid {
        &self.grid
    }

    pub fn shooter(&self) -> &ShooterState {
        &self.shooter
    }

    pub fn score(&self) -> &GameScore {
        &self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The live projectile, while one is flying.
    pub fn projectile(&self) -> Option<&Projectile> {
        match &self.phase {
            Phase::Flying(projectile) => Some(projectile),
            Phase::Idle => None,
        }
    }

    /// Whether the player may aim and fire right now.
    pub fn is_idle(&self) -> bool {
        self.status == GameStatus::Playing && self.phase == Phase::Idle
    }

    /// Aim the shooter. Ignored while a projectile flies or after the
    /// session ended; returns whether the aim was applied.
    pub fn set_aim(&mut self, angle: f32) -> bool {
        if !self.is_idle() {
            debug!("Ignoring aim while not idle");
            return false;
        }
        self.shooter.set_angle(angle, self.config.max_aim_angle);
        true
    }

    /// Aim from a pointer's x position on the playfield.
    pub fn set_aim_from_pointer(&mut self, x: f32) -> bool {
        let angle = ShooterState::angle_from_pointer_x(x, CANVAS_WIDTH, self.config.max_aim_angle);
        self.set_aim(angle)
    }

    /// Fire the loaded bubble along the current aim.
    ///
    /// Only valid while idle with a loaded bubble; otherwise nothing
    /// happens and `false` is returned.
    pub fn fire(&mut self) -> bool {
        if !self.is_idle() {
            debug!("Ignoring fire while not idle");
            return false;
        }
        let Some(color) = self.shooter.loaded else {
            debug!("Ignoring fire with nothing loaded");
            return false;
        };

        let projectile = Projectile::launch(
            SHOOTER_ORIGIN,
            self.shooter.angle(),
            self.config.projectile_speed,
            color,
        );
        self.phase = Phase::Flying(projectile);
        self.score.shots_fired += 1;
        info!(
            "Fired {:?} bubble at angle {:.3} (shot {})",
            color,
            self.shooter.angle(),
            self.score.shots_fired
        );
        true
    }

    /// Advance one frame.
    ///
    /// Moves the projectile a fixed step; on impact it snaps to the grid,
    /// the placement is resolved and the win/lose conditions are checked.
    pub fn tick(&mut self) -> TickReport {
        if self.status != GameStatus::Playing {
            return TickReport::quiet(self.status);
        }
        let Phase::Flying(mut projectile) = self.phase else {
            return TickReport::quiet(self.status);
        };

        projectile.advance();
        let Some(impact) = projectile.impact(&self.grid) else {
            self.phase = Phase::Flying(projectile);
            return TickReport::quiet(self.status);
        };

        debug!("Projectile stopped by {:?} at {:?}", impact, projectile.pos);
        self.phase = Phase::Idle;

        let Some(landing) = self.land(&projectile) else {
            self.shooter.rotate(&mut self.rng);
            return TickReport::quiet(self.status);
        };

        let score_delta = self.score.record(&landing.matched);
        if score_delta > 0 {
            info!("+{} points (total: {})", score_delta, self.score.score);
        }

        self.status = self.evaluate_status();
        match self.status {
            GameStatus::Won => {
                info!("WIN! All bubbles cleared! Final score: {}", self.score.score);
            }
            GameStatus::Lost => {
                info!(
                    "GAME OVER! Bubbles reached the danger line. Final score: {}",
                    self.score.score
                );
                self.shooter.rotate(&mut self.rng);
            }
            GameStatus::Playing => self.shooter.rotate(&mut self.rng),
        }

        TickReport {
            status: self.status,
            score_delta,
            landing: Some(landing),
        }
    }

    /// Put a stopped projectile on the grid and resolve matches.
    fn land(&mut self, projectile: &Projectile) -> Option<Landing> {
        let Some(coord) = snap_cell(&self.grid, projectile.pos) else {
            warn!(
                "No free cell near {:?}, discarding {:?} projectile",
                projectile.pos, projectile.color
            );
            return None;
        };

        if let Err(e) = self.grid.insert(coord, projectile.color) {
            warn!("Rejected placement: {}", e);
            return None;
        }
        info!("Bubble landed at {} with color {:?}", coord, projectile.color);

        let matched = resolve_placement(&mut self.grid, coord, projectile.color);
        Some(Landing {
            coord,
            color: projectile.color,
            matched,
        })
    }

    fn evaluate_status(&self) -> GameStatus {
        if self.grid.is_empty() {
            return GameStatus::Won;
        }
        match self.grid.max_y() {
            Some(y) if y > self.config.danger_line_y => GameStatus::Lost,
            _ => GameStatus::Playing,
        }
    }

    /// The aim preview ray; empty unless the shooter is idle.
    pub fn preview_path(&self) -> Vec<PreviewSegment> {
        if !self.is_idle() {
            return Vec::new();
        }
        preview_path(SHOOTER_ORIGIN, self.shooter.angle(), self.config.preview_length)
    }

    /// Everything the presentation layer needs to draw this frame.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}
