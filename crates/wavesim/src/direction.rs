//! The eight compass directions a wavelet can travel in.

use std::fmt;

/// Ordered clockwise from Up. The rotation arithmetic below indexes by
/// discriminant, so do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
}

/// All directions, in discriminant order.
pub const ALL: [Direction; 8] = [
    Direction::Up,
    Direction::UpRight,
    Direction::Right,
    Direction::DownRight,
    Direction::Down,
    Direction::DownLeft,
    Direction::Left,
    Direction::UpLeft,
];

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Direction {
    /// (row, col) offset of the neighboring cell in this direction.
    /// Rows grow downward, columns grow rightward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::UpRight => (-1, 1),
            Self::Right => (0, 1),
            Self::DownRight => (1, 1),
            Self::Down => (1, 0),
            Self::DownLeft => (1, -1),
            Self::Left => (0, -1),
            Self::UpLeft => (-1, -1),
        }
    }

    fn rotated(self, steps: i8) -> Self {
        ALL[(self as i8 + steps).rem_euclid(8) as usize]
    }

    /// The three directions a wavelet travelling this way fans out into:
    /// 45 degrees counter-clockwise, straight ahead, 45 degrees clockwise.
    #[must_use]
    pub fn cone(self) -> [Self; 3] {
        [self.rotated(-1), self, self.rotated(1)]
    }

    /// Whether this direction is within 45 degrees of `emitter`.
    /// Aligned wavelets keep their strength; off-axis leakage decays fast.
    #[must_use]
    pub fn is_aligned_with(self, emitter: Self) -> bool {
        let diff = (self as i8 - emitter as i8).rem_euclid(8);
        diff <= 1 || diff == 7
    }

    /// Diagonal moves cover more distance per tick and dissipate harder.
    #[must_use]
    pub fn is_diagonal(self) -> bool {
        self as u8 % 2 == 1
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        self.rotated(4)
    }
}
