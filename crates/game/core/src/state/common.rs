use std::fmt;

/// Discrete grid position expressed in tile coordinates.
///
/// `x` grows to the east and `y` grows to the south, matching row-major
/// storage of the puzzle grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self.step_by(direction, 1)
    }

    /// Returns the position `distance` steps away in `direction`.
    pub fn step_by(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// King-move distance; diagonal neighbours are at distance 1.
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass facings, spaced 45° apart clockwise from north.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Clockwise angle from north in degrees.
    pub const fn degrees(self) -> i32 {
        self.octant() * 45
    }

    const fn octant(self) -> i32 {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 1,
            Direction::East => 2,
            Direction::SouthEast => 3,
            Direction::South => 4,
            Direction::SouthWest => 5,
            Direction::West => 6,
            Direction::NorthWest => 7,
        }
    }

    /// Snaps an arbitrary angle to the nearest facing.
    pub fn from_degrees(degrees: i32) -> Self {
        let normalized = degrees.rem_euclid(360);
        let octant = ((normalized + 22) / 45) % 8;
        Self::ALL[octant as usize]
    }

    /// Rotates clockwise by `degrees` (negative values rotate counter-clockwise).
    pub fn rotate(self, degrees: i32) -> Self {
        Self::from_degrees(self.degrees() + degrees)
    }

    pub fn opposite(self) -> Self {
        self.rotate(180)
    }
}
