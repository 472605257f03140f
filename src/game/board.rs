use std::fmt;

use rand::Rng;
use tracing::{debug, info};

use super::{
    cell::{Cell, FOOD_GLYPHS, Position},
    config::GameConfig,
    direction::Direction,
    error::BoardError,
};

/// Largest number of cells a board may hold
pub const MAX_CELLS: usize = 1 << 24;

/// Whether the board can still be ticked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Terminal. A new board has to be built to play again.
    Lost,
}

/// Information about a successful tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Direction actually applied this tick
    pub direction: Direction,
    /// Whether the head moved onto food
    pub ate_food: bool,
    /// Where food appeared this tick, if the spawn attempt succeeded
    pub food_spawned: Option<Position>,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum TickOutcome {
    Advanced(TickInfo),
    /// The head ran into the body
    Lost,
}

impl TickOutcome {
    pub fn is_lost(&self) -> bool {
        matches!(self, TickOutcome::Lost)
    }
}

/// A toroidal snake board
///
/// The grid is dense and row-major. Body segments carry their own age and
/// expire once it reaches the snake's length, so no separate segment list is
/// kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    grid: Vec<Cell>,
    head_pos: Position,
    direction: Direction,
    length: u32,
    food_present: bool,
    phase: Phase,
    ticks: u64,
}

impl Board {
    /// Create a board with a single head at the top-left corner facing right
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let cells = width
            .checked_mul(height)
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or(BoardError::TooLarge { width, height })?;

        let direction = Direction::Right;
        let head_pos = Position::new(0, 0);
        let mut grid = vec![Cell::Empty; cells];
        grid[0] = Cell::Head { direction };

        Ok(Self {
            width,
            height,
            grid,
            head_pos,
            direction,
            length: 1,
            food_present: false,
            phase: Phase::Playing,
            ticks: 0,
        })
    }

    pub fn from_config(config: &GameConfig) -> Result<Self, BoardError> {
        Self::new(config.width, config.height)
    }

    /// Advance the simulation by one step
    ///
    /// A requested reversal is ignored and the snake carries on straight.
    /// Food placement draws from `rng`. Once a tick returns
    /// [`TickOutcome::Lost`] every later call returns it again without
    /// touching the board.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        requested: Option<Direction>,
        rng: &mut R,
    ) -> TickOutcome {
        if self.phase == Phase::Lost {
            return TickOutcome::Lost;
        }

        let direction = match requested {
            Some(turn) if self.direction.can_switch_to(turn) => turn,
            _ => self.direction,
        };
        let next = self.head_pos.stepped(direction, self.height, self.width);

        let food_spawned = if self.food_present {
            None
        } else {
            self.try_spawn_food(rng)
        };

        if self.cell(next).is_segment() {
            info!(
                row = next.row,
                col = next.col,
                length = self.length,
                ticks = self.ticks,
                "snake ran into itself"
            );
            self.phase = Phase::Lost;
            return TickOutcome::Lost;
        }

        let ate_food = self.cell(next).is_food();
        if ate_food {
            self.food_present = false;
            self.length += 1;
            debug!(row = next.row, col = next.col, length = self.length, "food eaten");
        }

        // Segment first: on a one-wide torus `next` can equal the old head
        // position and the head has to win.
        let previous = self.head_pos;
        self.set_cell(previous, Cell::Segment { age: -1 });
        self.set_cell(next, Cell::Head { direction });
        self.age_segments();

        self.head_pos = next;
        self.direction = direction;
        self.ticks += 1;

        TickOutcome::Advanced(TickInfo {
            direction,
            ate_food,
            food_spawned,
        })
    }

    /// One line of glyphs per row, top to bottom
    pub fn render(&self) -> Vec<String> {
        self.grid
            .chunks(self.width)
            .map(|row| row.iter().map(Cell::glyph).collect())
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn head_pos(&self) -> Position {
        self.head_pos
    }

    /// Direction the head is facing
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Target number of body segments, excluding the head
    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn food_present(&self) -> bool {
        self.food_present
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_lost(&self) -> bool {
        self.phase == Phase::Lost
    }

    /// Number of successful ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Cell at `pos`; both coordinates must be on the board
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.grid[self.index(pos)]
    }

    /// All cells with their coordinates, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .map(|(i, cell)| (Position::new(i / self.width, i % self.width), cell))
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    fn set_cell(&mut self, pos: Position, cell: Cell) {
        let index = self.index(pos);
        self.grid[index] = cell;
    }

    /// Draw a single candidate cell and place food there if it is empty.
    /// No retry, so spawning slows down as the board fills.
    fn try_spawn_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        let pos = Position::new(rng.gen_range(0..self.height), rng.gen_range(0..self.width));
        if !self.cell(pos).is_empty() {
            return None;
        }

        let glyph = FOOD_GLYPHS[rng.gen_range(0..FOOD_GLYPHS.len())];
        self.set_cell(pos, Cell::Food { glyph });
        self.food_present = true;
        debug!(row = pos.row, col = pos.col, %glyph, "food spawned");
        Some(pos)
    }

    /// Ages run 0..length, so exactly `length` segments trail the head once
    /// the snake is fully grown.
    fn age_segments(&mut self) {
        let length = i64::from(self.length);
        for cell in &mut self.grid {
            if let Cell::Segment { age } = cell {
                *age += 1;
                if *age >= length {
                    *cell = Cell::Empty;
                }
            }
        }
    }
}

/// Text dump with each row framed by `|`
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render() {
            writeln!(f, "|{line}|")?;
        }
        Ok(())
    }
}
