use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::{error::ParamsError, math_helpers::distance};

/// Disc in which new agents may be spawned. It does not contain agents once
/// they are flying: positions are never clamped or wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub center: DVec2,
    pub radius: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Arena {
            center: DVec2::new(640., 360.),
            radius: 300.,
        }
    }
}

impl Arena {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Arena { center, radius }
    }

    /// Rejects arenas a [`Spawner`] can't sample from: non-finite values, a
    /// negative radius, or a diameter that overflows.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("arena.center.x", self.center.x),
            ("arena.center.y", self.center.y),
            ("arena.radius", self.radius),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite { name, value });
            }
        }

        if self.radius < 0. {
            return Err(ParamsError::NegativeRadius {
                name: "arena.radius",
                value: self.radius,
            });
        }

        if !(2. * self.radius).is_finite() {
            return Err(ParamsError::ArenaTooLarge(self.radius));
        }

        Ok(())
    }

    /// boundary inclusive
    pub fn contains(&self, point: DVec2) -> bool {
        distance(point, self.center) <= self.radius
    }
}

/// A request from the input side to add an agent between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnEvent {
    pub position: DVec2,
    /// degrees, counter-clockwise from +x
    pub heading_deg: f64,
}

impl SpawnEvent {
    pub fn new(position: DVec2, heading_deg: f64) -> Self {
        SpawnEvent {
            position,
            heading_deg,
        }
    }
}

/// Seeded stand-in for a user clicking around the arena.
pub struct Spawner {
    arena: Arena,
    rng: Xoshiro256PlusPlus,
}

impl Spawner {
    pub fn new(arena: Arena, seed: u64) -> Self {
        Spawner {
            arena,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Uniform position inside the arena disc and uniform heading in [0, 360).
    ///
    /// A radius that [`Arena::validate`] rejects, or zero, spawns at the center.
    pub fn next_event(&mut self) -> SpawnEvent {
        let r = self.arena.radius.max(0.);

        // the sampled range spans the diameter, which must stay finite;
        // rejection keeps the point inside even when rounding would nudge a
        // polar sample past the rim
        let position = if r == 0. || !(2. * r).is_finite() {
            self.arena.center
        } else {
            loop {
                let candidate = self.arena.center
                    + DVec2::new(self.rng.gen_range(-r..=r), self.rng.gen_range(-r..=r));
                if self.arena.contains(candidate) {
                    break candidate;
                }
            }
        };

        SpawnEvent {
            position,
            heading_deg: self.rng.gen_range(0.0..360.),
        }
    }
}

impl Iterator for Spawner {
    type Item = SpawnEvent;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_event())
    }
}
