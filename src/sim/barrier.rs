//! Destructible barriers
//!
//! A barrier is a brick wall of square segments with a notch cut out of each
//! top corner. Segments lose one health per hit and disappear at zero.

use serde::{Deserialize, Serialize};

use super::entity::{Body, HasBody};
use crate::config::Config;
use crate::error::SimError;

/// One brick of a barrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub body: Body,
    pub health: u8,
}

impl HasBody for Segment {
    fn body(&self) -> &Body {
        &self.body
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    /// Present segments only; health is always >= 1
    pub segments: Vec<Segment>,
}

/// Whether the brick at (row, col) is part of a corner notch
fn in_notch(row: usize, col: usize, cols: usize) -> bool {
    match row {
        0 => col < 2 || col + 2 >= cols,
        1 => col < 1 || col + 1 >= cols,
        _ => false,
    }
}

impl Barrier {
    /// Build a full-health barrier with its top-left corner at (x, y)
    pub fn new(x: f32, y: f32, config: &Config) -> Self {
        let size = config.segment_size;
        let rows = (config.barrier_height / size).ceil() as usize;
        let cols = (config.barrier_width / size).ceil() as usize;

        let mut segments = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                if in_notch(row, col, cols) {
                    continue;
                }
                segments.push(Segment {
                    body: Body::new(x + col as f32 * size, y + row as f32 * size, size, size),
                    health: config.segment_health,
                });
            }
        }
        Self { segments }
    }

    /// Build the full row of barriers evenly spaced across the field
    pub fn build_row(config: &Config) -> Vec<Barrier> {
        let spacing = config.field_width / (config.barrier_count + 1) as f32;
        let y = config.field_height - config.barrier_bottom_offset;
        (0..config.barrier_count)
            .map(|i| {
                let center = spacing * (i + 1) as f32;
                Barrier::new(center - config.barrier_width / 2.0, y, config)
            })
            .collect()
    }

    /// A barrier with no segments left absorbs nothing
    pub fn is_inert(&self) -> bool {
        self.segments.is_empty()
    }

    /// Apply one point of damage per listed segment index (indices refer to
    /// the segment order before this call; repeats stack). Segments reaching
    /// zero are removed. Returns the number of segments destroyed.
    pub fn apply_damage(&mut self, hits: &[usize]) -> Result<usize, SimError> {
        if let Some(&bad) = hits.iter().find(|&&i| i >= self.segments.len()) {
            return Err(SimError::invariant(format!(
                "damage to missing segment {bad} (barrier has {})",
                self.segments.len()
            )));
        }
        for &i in hits {
            let segment = &mut self.segments[i];
            if segment.health == 0 {
                return Err(SimError::invariant(format!(
                    "segment {i} damaged past zero health"
                )));
            }
            segment.health -= 1;
        }
        let before = self.segments.len();
        self.segments.retain(|s| s.health > 0);
        Ok(before - self.segments.len())
    }

    /// Top edge of the highest segment, if any remain
    pub fn top(&self) -> Option<f32> {
        self.segments.iter().map(|s| s.body.top()).reduce(f32::min)
    }
}

/// Top edge of the highest segment across all barriers
pub fn highest_segment_top(barriers: &[Barrier]) -> Option<f32> {
    barriers.iter().filter_map(Barrier::top).reduce(f32::min)
}
