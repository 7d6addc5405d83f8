//! Tile variants: open cells, absorbing walls, and periodic emitters.

use std::fmt;

use crate::config::{Config, WALL_SUPERPOSITION};
use crate::direction::Direction;
use crate::particle::Particle;

/// Discriminant values map directly to the `u8` kind buffer handed to the
/// renderer for color selection; do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TileKind {
    Open = 0,
    Wall = 1,
    Emitter = 2,
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Wall => write!(f, "Wall"),
            Self::Emitter => write!(f, "Emitter"),
        }
    }
}

/// One grid cell. Edits replace the whole variant; particles never migrate
/// across a variant change.
#[derive(Clone, Debug)]
pub enum Tile {
    Open(OpenTile),
    /// Inert sink: incoming wavelets are destroyed silently.
    Wall,
    Emitter(Emitter),
}

impl Tile {
    #[must_use]
    pub fn open() -> Self {
        Self::Open(OpenTile::default())
    }

    #[must_use]
    pub fn kind(&self) -> TileKind {
        match self {
            Self::Open(_) => TileKind::Open,
            Self::Wall => TileKind::Wall,
            Self::Emitter(_) => TileKind::Emitter,
        }
    }

    /// Particle storage, if this variant has any.
    pub(crate) fn open_mut(&mut self) -> Option<&mut OpenTile> {
        match self {
            Self::Open(tile) => Some(tile),
            Self::Emitter(emitter) => Some(&mut emitter.cell),
            Self::Wall => None,
        }
    }

    /// Live sum of resident energies; walls answer the sentinel.
    #[must_use]
    pub fn resident_energy(&self) -> f32 {
        match self {
            Self::Open(tile) => tile.resident_energy(),
            Self::Emitter(emitter) => emitter.cell.resident_energy(),
            Self::Wall => WALL_SUPERPOSITION,
        }
    }

    #[must_use]
    pub fn particle_count(&self) -> usize {
        match self {
            Self::Open(tile) => tile.particle_count(),
            Self::Emitter(emitter) => emitter.cell.particle_count(),
            Self::Wall => 0,
        }
    }
}

/// Holds the wavelets currently resident in a cell, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct OpenTile {
    particles: Vec<Particle>,
}

impl OpenTile {
    pub(crate) fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Remove and return the wavelets due to act on `tick`; later-tagged
    /// wavelets stay resident, compacted in place.
    pub(crate) fn take_due(&mut self, tick: u64) -> Vec<Particle> {
        let mut due = Vec::new();
        self.particles.retain(|p| {
            if p.activation_tick == tick {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due
    }

    /// Derived live sum of resident energies. The grid's superposition
    /// field is the authoritative copy.
    #[must_use]
    pub fn resident_energy(&self) -> f32 {
        self.particles.iter().map(|p| p.energy).sum()
    }

    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }
}

/// An open cell that also pulses fresh wavelets on a fixed interval.
#[derive(Clone, Debug)]
pub struct Emitter {
    pub cell: OpenTile,
    timer: Timer,
    directions: Vec<Direction>,
}

impl Emitter {
    #[must_use]
    pub fn new(interval_ms: f64, directions: Vec<Direction>) -> Self {
        Self {
            cell: OpenTile::default(),
            timer: Timer::new(interval_ms),
            directions,
        }
    }

    pub(crate) fn from_config(config: &Config) -> Self {
        Self::new(config.emit_interval_ms, config.emit_directions.clone())
    }

    /// Advance the pulse timer; on expiry, rearm it and return the
    /// directions to pulse in. The timer only advances while the
    /// simulation steps, so emission cadence follows simulation time,
    /// not wall clock.
    pub(crate) fn advance(&mut self, elapsed_ms: f64) -> Option<Vec<Direction>> {
        self.timer.advance(elapsed_ms);
        if self.timer.is_finished() {
            self.timer.reset();
            Some(self.directions.clone())
        } else {
            None
        }
    }
}

/// Counts down a fixed duration in milliseconds.
#[derive(Clone, Debug)]
pub struct Timer {
    duration_ms: f64,
    remaining_ms: f64,
}

impl Timer {
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            remaining_ms: duration_ms,
        }
    }

    pub fn advance(&mut self, elapsed_ms: f64) {
        self.remaining_ms -= elapsed_ms;
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    /// Rearm for a full duration; unspent overshoot is discarded.
    pub fn reset(&mut self) {
        self.remaining_ms = self.duration_ms;
    }
}
