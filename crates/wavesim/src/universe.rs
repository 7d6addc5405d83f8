//! WASM host boundary: owns the step gate and the render buffer views.

use wasm_bindgen::prelude::*;

use crate::config::DEFAULT_STEP_INTERVAL_MS;
use crate::edit::{Edit, EditKind};
use crate::tile::Timer;
use crate::{Grid, GridError};

/// Host-facing wrapper around [`Grid`]. The engine itself is an
/// event-driven discrete stepper; the fixed-interval gate that decides
/// when a tick runs lives here, on the host side of the boundary.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    grid: Grid,
    gate: Timer,
    /// Simulation time accumulated since the last step, handed to the
    /// step so emitter timers lose nothing across skipped frames.
    pending_ms: f64,
}

#[wasm_bindgen]
impl Universe {
    /// All cells open, superposition all zero, tick zero.
    ///
    /// # Errors
    /// Fails fast on out-of-range dimensions rather than building an
    /// inconsistent grid.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: usize, cols: usize) -> Result<Universe, JsError> {
        let grid = Grid::new(rows, cols)?;
        Ok(Self {
            grid,
            gate: Timer::new(DEFAULT_STEP_INTERVAL_MS),
            pending_ms: 0.0,
        })
    }

    /// Advance the gate by `elapsed_ms` of wall-clock time and run exactly
    /// one simulation step when it expires; a no-op otherwise. Returns
    /// whether a step ran.
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        self.gate.advance(elapsed_ms);
        self.pending_ms += elapsed_ms;
        if !self.gate.is_finished() {
            return false;
        }
        self.grid.step(self.pending_ms);
        self.pending_ms = 0.0;
        self.gate.reset();
        true
    }

    /// Replace the step gate interval, restarting the countdown.
    ///
    /// # Errors
    /// Rejects non-positive or non-finite intervals.
    pub fn set_step_interval(&mut self, interval_ms: f64) -> Result<(), JsError> {
        if !interval_ms.is_finite() || interval_ms <= 0.0 {
            return Err(JsError::from(GridError::Interval { value: interval_ms }));
        }
        self.gate = Timer::new(interval_ms);
        Ok(())
    }

    pub fn inject_wave(&mut self, row: i32, col: i32) {
        self.grid.submit_edit(Edit::new(EditKind::InjectWave, row, col));
    }

    pub fn toggle_wall(&mut self, row: i32, col: i32) {
        self.grid.submit_edit(Edit::new(EditKind::ToggleWall, row, col));
    }

    pub fn toggle_emitter(&mut self, row: i32, col: i32) {
        self.grid.submit_edit(Edit::new(EditKind::ToggleEmitter, row, col));
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.grid.tick_id()
    }

    /// Zero-copy view of the row-major `f32` superposition field, for
    /// opacity rendering. Walls hold the sentinel, never an opacity
    /// fraction.
    #[must_use]
    pub fn superposition_ptr(&self) -> *const f32 {
        self.grid.superposition_ptr()
    }

    /// Tile kind per cell for color selection, row-major.
    #[must_use]
    pub fn tile_kinds(&self) -> Vec<u8> {
        self.grid.tile_kinds()
    }
}

impl Universe {
    /// Direct engine access for native hosts and tests; not exported to
    /// the WASM boundary.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
