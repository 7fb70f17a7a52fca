//! Cosmetic scrolling starfield
//!
//! Not gameplay-affecting. Uses its own RNG stream so the background never
//! perturbs gameplay decisions.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A background star
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Pixels per tick
    pub speed: f32,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct StarField {
    pub stars: Vec<Star>,
    width: f32,
    height: f32,
    rng: Pcg32,
}

impl StarField {
    pub fn new(count: usize, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| {
                let mut star = Self::fresh_star(&mut rng, width);
                star.y = rng.random_range(0.0..height);
                star
            })
            .collect();
        Self {
            stars,
            width,
            height,
            rng,
        }
    }

    fn fresh_star(rng: &mut Pcg32, width: f32) -> Star {
        Star {
            x: rng.random_range(0.0..width),
            y: 0.0,
            speed: 0.5 + rng.random::<f32>() * 2.0,
            size: rng.random::<f32>() * 2.0,
        }
    }

    /// Drift every star down, respawning at the top once past the bottom
    pub fn update(&mut self) {
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y > self.height {
                *star = Self::fresh_star(&mut self.rng, self.width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_stay_in_field() {
        let mut field = StarField::new(100, 800.0, 600.0, 7);
        assert_eq!(field.stars.len(), 100);
        for _ in 0..2000 {
            field.update();
        }
        for star in &field.stars {
            assert!((0.0..800.0).contains(&star.x));
            assert!(star.y <= 600.0);
            assert!((0.5..=2.5).contains(&star.speed));
            assert!(star.size < 2.0);
        }
    }
}
