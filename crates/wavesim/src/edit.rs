//! Queued grid edits, applied once per tick before propagation.

/// The three edit operations the host may queue against a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EditKind {
    /// Spawn a pair of opposite starting-energy wavelets.
    InjectWave,
    /// Toggle the cell between open and absorbing wall.
    ToggleWall,
    /// Toggle the cell between open and periodic emitter.
    ToggleEmitter,
}

/// A pending edit. Out-of-range coordinates are dropped silently when the
/// queue drains.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Edit {
    pub kind: EditKind,
    pub row: i32,
    pub col: i32,
}

impl Edit {
    #[must_use]
    pub fn new(kind: EditKind, row: i32, col: i32) -> Self {
        Self { kind, row, col }
    }
}
