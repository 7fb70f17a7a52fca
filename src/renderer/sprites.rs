//! Member sprite data
//!
//! Three member types, two animation frames each, on a 6x5 pixel grid. Each
//! row is a bitmask read from the most significant of the six bits (leftmost
//! pixel) down.

pub const SPRITE_COLUMNS: usize = 6;
pub const SPRITE_ROWS: usize = 5;

/// One frame of a member sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpritePattern {
    pub rows: [u8; SPRITE_ROWS],
}

impl SpritePattern {
    const fn new(rows: [u8; SPRITE_ROWS]) -> Self {
        Self { rows }
    }

    /// Whether the pixel at (column, row) is lit
    pub fn is_set(&self, column: usize, row: usize) -> bool {
        column < SPRITE_COLUMNS
            && row < SPRITE_ROWS
            && self.rows[row] & (1 << (SPRITE_COLUMNS - 1 - column)) != 0
    }

    /// Lit pixels as (column, row), row-major
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SPRITE_ROWS).flat_map(move |row| {
            (0..SPRITE_COLUMNS)
                .filter(move |&column| self.is_set(column, row))
                .map(move |column| (column, row))
        })
    }
}

const SPRITES: [[SpritePattern; 2]; 3] = [
    [
        SpritePattern::new([0b001100, 0b011110, 0b111111, 0b110011, 0b001100]),
        SpritePattern::new([0b001100, 0b011110, 0b111111, 0b001100, 0b110011]),
    ],
    [
        SpritePattern::new([0b010010, 0b001100, 0b011110, 0b110011, 0b101101]),
        SpritePattern::new([0b010010, 0b101101, 0b011110, 0b110011, 0b010010]),
    ],
    [
        SpritePattern::new([0b011110, 0b111111, 0b110011, 0b011110, 0b101101]),
        SpritePattern::new([0b011110, 0b111111, 0b110011, 0b011110, 0b100001]),
    ],
];

/// Pattern for a member's sprite type (1-3) and animation frame (0/1).
/// Out-of-range types fall back to the nearest valid one.
pub fn pattern(sprite_type: u8, frame: u8) -> SpritePattern {
    let kind = (sprite_type.clamp(1, 3) - 1) as usize;
    SPRITES[kind][(frame & 1) as usize]
}
