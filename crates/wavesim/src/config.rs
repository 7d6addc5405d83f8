//! Tuning constants for the propagation rule and default timings.

use crate::direction::Direction;
use crate::GridError;

/// Energy every wavelet starts with. Opacity rendering assumes 1.0.
pub const STARTING_ENERGY: f32 = 1.0;

/// Fraction of energy a successor keeps on a straight (cardinal) move.
pub const ENERGY_DISSIPATION: f32 = 0.75;

/// Diagonal moves cover more distance per tick, so they dissipate harder.
pub const ENERGY_DISSIPATION_DIAG: f32 = ENERGY_DISSIPATION * 0.85;

/// Multiplier for successors travelling off the emission axis.
pub const ENERGY_IMPROPER_DIR_MULTIPLIER: f32 = 0.25;

/// Below this magnitude a wavelet is spent: it retires without successors.
pub const ENERGY_TOLERANCE: f32 = 0.005;

/// Superposition value reserved for absorbing walls. Never a valid energy
/// sum; the renderer keys its wall color off it.
pub const WALL_SUPERPOSITION: f32 = -1.0;

/// Grid axes are capped so coordinates stay byte-sized.
pub const MAX_DIM: usize = 256;

/// Pulse interval for emitters toggled on by an edit.
pub const DEFAULT_EMIT_INTERVAL_MS: f64 = 100.0;

/// Interval of the host-side gate that triggers simulation steps.
pub const DEFAULT_STEP_INTERVAL_MS: f64 = 50.0;

/// Numeric tuning the host may override at grid construction.
/// Validated once up front; every steady-state path assumes it holds.
#[derive(Clone, Debug)]
pub struct Config {
    pub starting_energy: f32,
    /// Energy fraction kept on a straight successor move. Must stay below
    /// 1 so energy is non-increasing along every propagation path.
    pub dissipation: f32,
    /// Energy fraction kept on a diagonal successor move.
    pub diagonal_dissipation: f32,
    /// Extra multiplier for successors not aligned with the emission
    /// direction, in (0, 1].
    pub off_axis_penalty: f32,
    pub energy_tolerance: f32,
    /// Interval between pulses for emitters toggled on by an edit.
    pub emit_interval_ms: f64,
    /// Directions such emitters pulse in.
    pub emit_directions: Vec<Direction>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_energy: STARTING_ENERGY,
            dissipation: ENERGY_DISSIPATION,
            diagonal_dissipation: ENERGY_DISSIPATION_DIAG,
            off_axis_penalty: ENERGY_IMPROPER_DIR_MULTIPLIER,
            energy_tolerance: ENERGY_TOLERANCE,
            emit_interval_ms: DEFAULT_EMIT_INTERVAL_MS,
            emit_directions: vec![Direction::Right, Direction::Left],
        }
    }
}

impl Config {
    pub(crate) fn validate(&self) -> Result<(), GridError> {
        let positive = [
            ("starting_energy", self.starting_energy),
            ("energy_tolerance", self.energy_tolerance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::Coefficient {
                    name,
                    value: f64::from(value),
                });
            }
        }
        // Dissipation below 1 keeps energy non-increasing along every
        // path.
        let fractions = [
            ("dissipation", self.dissipation),
            ("diagonal_dissipation", self.diagonal_dissipation),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || value <= 0.0 || value >= 1.0 {
                return Err(GridError::Coefficient {
                    name,
                    value: f64::from(value),
                });
            }
        }
        // The penalty may reach 1 (no off-axis damping) but not exceed it.
        let penalty = self.off_axis_penalty;
        if !penalty.is_finite() || penalty <= 0.0 || penalty > 1.0 {
            return Err(GridError::Coefficient {
                name: "off_axis_penalty",
                value: f64::from(penalty),
            });
        }
        if !self.emit_interval_ms.is_finite() || self.emit_interval_ms <= 0.0 {
            return Err(GridError::Interval {
                value: self.emit_interval_ms,
            });
        }
        Ok(())
    }

    /// Energy a successor spawns with: the parent's energy scaled by the
    /// move-length dissipation, penalized further when the successor's
    /// direction has drifted off the emission axis.
    #[must_use]
    pub fn successor_energy(
        &self,
        parent_energy: f32,
        direction: Direction,
        emitter_direction: Direction,
    ) -> f32 {
        let dissipation = if direction.is_diagonal() {
            self.diagonal_dissipation
        } else {
            self.dissipation
        };
        let alignment = if direction.is_aligned_with(emitter_direction) {
            1.0
        } else {
            self.off_axis_penalty
        };
        parent_energy * dissipation * alignment
    }
}
