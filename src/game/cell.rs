use super::direction::Direction;

/// Glyph drawn for every body segment
pub const SEGMENT_GLYPH: char = 'o';

/// Glyphs a freshly spawned piece of food may use
pub const FOOD_GLYPHS: [char; 5] = ['*', '@', '%', '&', '$'];

/// A coordinate on the grid, row first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move one step in a direction, wrapping around a `height` x `width` torus
    pub fn stepped(&self, direction: Direction, height: usize, width: usize) -> Self {
        match direction {
            Direction::Up => Self::new((self.row + height - 1) % height, self.col),
            Direction::Down => Self::new((self.row + 1) % height, self.col),
            Direction::Left => Self::new(self.row, (self.col + width - 1) % width),
            Direction::Right => Self::new(self.row, (self.col + 1) % width),
        }
    }
}

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Body segment. `age` is the number of ticks since it was laid, -1 while fresh.
    Segment { age: i64 },
    Head { direction: Direction },
    Food { glyph: char },
}

impl Cell {
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Segment { .. } => SEGMENT_GLYPH,
            Cell::Head { direction } => direction.head_glyph(),
            Cell::Food { glyph } => *glyph,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_segment(&self) -> bool {
        matches!(self, Cell::Segment { .. })
    }

    pub fn is_head(&self) -> bool {
        matches!(self, Cell::Head { .. })
    }

    pub fn is_food(&self) -> bool {
        matches!(self, Cell::Food { .. })
    }
}
