//! Directional wavelet automaton for 2-D wave interference.
//!
//! Each cell holds zero or more wavelets carrying energy and a propagation
//! direction. On every tick a due wavelet fans up to three successors into
//! the cells of its 135-degree cone and is consumed; a per-cell
//! superposition field accumulates resident energy for the renderer.
//! Absorbing walls destroy incoming wavelets, emitters pulse fresh ones on
//! a fixed interval, and energy dissipates until a wavelet falls below
//! tolerance and retires.

pub mod config;
pub mod direction;
pub mod edit;
pub mod particle;
pub mod tile;
pub mod universe;

#[cfg(test)]
mod interference_test;

use std::collections::VecDeque;

use log::{debug, trace};
use thiserror::Error;

use config::{Config, MAX_DIM, WALL_SUPERPOSITION};
use direction::Direction;
use edit::{Edit, EditKind};
use particle::Particle;
use tile::{Emitter, Tile, TileKind};

/// Construction requests the engine rejects up front rather than building
/// an inconsistent grid.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid dimensions {rows}x{cols} outside supported range 1..={max}", max = MAX_DIM)]
    Dimensions { rows: usize, cols: usize },
    #[error("interval {value} ms is not a positive finite duration")]
    Interval { value: f64 },
    #[error("{name} = {value} is outside its valid range")]
    Coefficient { name: &'static str, value: f64 },
}

/// 2-D grid of tiles plus the superposition field the renderer reads.
///
/// Every coordinate holds exactly one tile. Out-of-bounds reads answer
/// Wall, out-of-bounds spawns are dropped at the edge, never reflected.
/// The tick counter starts at zero and only ever increments, one per
/// completed [`step`](Grid::step).
#[derive(Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    /// Authoritative per-cell energy sum, maintained incrementally: plus
    /// at spawn, minus when a wavelet acts or expires, hard-set on tile
    /// replacement.
    superposition: Vec<f32>,
    tick: u64,
    edits: VecDeque<Edit>,
    config: Config,
}

impl Grid {
    /// All cells open, superposition all zero, tick zero.
    ///
    /// # Errors
    /// Rejects dimensions outside `1..=MAX_DIM` per axis.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::with_config(rows, cols, Config::default())
    }

    /// # Errors
    /// Rejects dimensions outside `1..=MAX_DIM` per axis and any config
    /// knob outside its documented range.
    pub fn with_config(rows: usize, cols: usize, config: Config) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 || rows > MAX_DIM || cols > MAX_DIM {
            return Err(GridError::Dimensions { rows, cols });
        }
        config.validate()?;
        Ok(Self {
            rows,
            cols,
            tiles: (0..rows * cols).map(|_| Tile::open()).collect(),
            superposition: vec![0.0; rows * cols],
            tick: 0,
            edits: VecDeque::new(),
            config,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < self.rows && col >= 0 && (col as usize) < self.cols
    }

    fn index(&self, row: i32, col: i32) -> usize {
        row as usize * self.cols + col as usize
    }

    /// Render snapshot of one cell: the tile kind for color selection and
    /// the superposition value for opacity. Wall cells (and out-of-bounds
    /// reads) answer the sentinel, never an energy sum.
    #[must_use]
    pub fn read_cell(&self, row: i32, col: i32) -> (TileKind, f32) {
        if !self.in_bounds(row, col) {
            return (TileKind::Wall, WALL_SUPERPOSITION);
        }
        let i = self.index(row, col);
        (self.tiles[i].kind(), self.superposition[i])
    }

    /// Derived live sum of the wavelets resident at (row, col). The
    /// superposition field is the authoritative value; this recomputation
    /// exists for diagnostics and invariant checks.
    #[must_use]
    pub fn resident_energy(&self, row: i32, col: i32) -> f32 {
        if !self.in_bounds(row, col) {
            return WALL_SUPERPOSITION;
        }
        self.tiles[self.index(row, col)].resident_energy()
    }

    #[must_use]
    pub fn particle_count(&self, row: i32, col: i32) -> usize {
        if !self.in_bounds(row, col) {
            return 0;
        }
        self.tiles[self.index(row, col)].particle_count()
    }

    /// Row-major superposition buffer for zero-copy rendering.
    #[must_use]
    pub fn superposition_ptr(&self) -> *const f32 {
        self.superposition.as_ptr()
    }

    /// Row-major tile kinds as their `u8` discriminants.
    #[must_use]
    pub fn tile_kinds(&self) -> Vec<u8> {
        self.tiles.iter().map(|tile| tile.kind() as u8).collect()
    }

    /// Queue an edit; it takes effect at the next step boundary.
    pub fn submit_edit(&mut self, edit: Edit) {
        self.edits.push_back(edit);
    }

    /// Advance the simulation exactly one tick: drain pending edits, run
    /// the propagation pass in fixed row-major order, then increment the
    /// tick counter. `elapsed_ms` is the simulation time this tick covers;
    /// emitter timers advance by it.
    pub fn step(&mut self, elapsed_ms: f64) {
        self.apply_edits();

        let current = self.tick;
        for i in 0..self.tiles.len() {
            let row = (i / self.cols) as i32;
            let col = (i % self.cols) as i32;

            let due = match self.tiles[i].open_mut() {
                Some(open) => open.take_due(current),
                None => continue,
            };
            for particle in due {
                self.act(i, row, col, particle, current);
            }

            let pulse = match &mut self.tiles[i] {
                Tile::Emitter(emitter) => emitter.advance(elapsed_ms),
                _ => None,
            };
            if let Some(directions) = pulse {
                trace!("emitter at ({row}, {col}) pulsing on tick {current}");
                let energy = self.config.starting_energy;
                for direction in directions {
                    self.spawn(row, col, Particle::emitted(direction, energy, current + 1));
                }
            }
        }

        self.tick += 1;
    }

    /// One wavelet acts: retire its energy from its cell and, unless it
    /// has dissipated below tolerance, fan successors into its cone.
    /// Successors are tagged for the next tick, so nothing spawned
    /// mid-pass can act again in the same pass.
    fn act(&mut self, cell: usize, row: i32, col: i32, particle: Particle, current: u64) {
        self.superposition[cell] -= particle.energy;
        if particle.energy.abs() < self.config.energy_tolerance {
            // Spent: a pure sink, no successors.
            return;
        }
        for direction in particle.direction.cone() {
            let (dr, dc) = direction.delta();
            let energy =
                self.config
                    .successor_energy(particle.energy, direction, particle.emitter_direction);
            self.spawn(
                row + dr,
                col + dc,
                Particle::new(direction, particle.emitter_direction, energy, current + 1),
            );
        }
    }

    /// Place a wavelet and credit its energy to the superposition field.
    /// Out-of-grid targets are dropped, their energy lost. Walls absorb
    /// silently with no field credit; absorption must not register as
    /// intensity.
    fn spawn(&mut self, row: i32, col: i32, particle: Particle) {
        if !self.in_bounds(row, col) {
            return;
        }
        let i = self.index(row, col);
        if let Some(open) = self.tiles[i].open_mut() {
            self.superposition[i] += particle.energy;
            open.push(particle);
        }
    }

    /// Drain and apply pending edits in FIFO order. Every queued edit is
    /// applied, including repeats on the same coordinate within a batch.
    fn apply_edits(&mut self) {
        while let Some(edit) = self.edits.pop_front() {
            if !self.in_bounds(edit.row, edit.col) {
                debug!("dropping out-of-range edit {edit:?}");
                continue;
            }
            let i = self.index(edit.row, edit.col);
            match edit.kind {
                EditKind::InjectWave => {
                    let energy = self.config.starting_energy;
                    let next = self.tick + 1;
                    for direction in [Direction::Right, Direction::Left] {
                        self.spawn(edit.row, edit.col, Particle::emitted(direction, energy, next));
                    }
                }
                EditKind::ToggleWall => {
                    if self.tiles[i].kind() == TileKind::Wall {
                        self.tiles[i] = Tile::open();
                        self.superposition[i] = 0.0;
                    } else {
                        // Resident wavelets are discarded with the tile.
                        self.tiles[i] = Tile::Wall;
                        self.superposition[i] = WALL_SUPERPOSITION;
                    }
                    debug!(
                        "cell ({}, {}) toggled to {}",
                        edit.row,
                        edit.col,
                        self.tiles[i].kind()
                    );
                }
                EditKind::ToggleEmitter => match self.tiles[i].kind() {
                    TileKind::Open => {
                        self.tiles[i] = Tile::Emitter(Emitter::from_config(&self.config));
                        self.superposition[i] = 0.0;
                    }
                    TileKind::Emitter => {
                        self.tiles[i] = Tile::open();
                        self.superposition[i] = 0.0;
                    }
                    // Walls keep absorbing; remove the wall first.
                    TileKind::Wall => {}
                },
            }
        }
    }
}
