//! The resizable particle collection advanced once per tick.
//!
//! Particles never interact, so ticking is order-independent and the
//! ensemble is free to add or remove particles between ticks. The
//! single-writer discipline is the caller's: `resize` and `reset` must
//! not run concurrently with `tick`.

use crate::config::{Config, ConfigError};
use crate::particle::Particle;
use rand::Rng;

/// Exclusively owns every [`Particle`]; particles have no identity
/// outside the ensemble.
#[derive(Debug, Default)]
pub struct ParticleEnsemble {
    particles: Vec<Particle>,
}

impl ParticleEnsemble {
    /// Creates an ensemble with `count` randomly placed particles.
    ///
    /// ### Parameters
    /// - `count` - Initial number of particles.
    /// - `cfg` - Validated before any particle is spawned.
    /// - `rng` - Random number generator for the initial positions.
    ///
    /// ### Returns
    /// The populated ensemble, or a [`ConfigError`] if `cfg` is invalid.
    pub fn new(count: usize, cfg: &Config, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let particles = (0..count).map(|_| Self::spawn(cfg, rng)).collect();
        Ok(Self { particles })
    }

    fn spawn(cfg: &Config, rng: &mut impl Rng) -> Particle {
        Particle::random_in_cube(
            cfg.spawn_center,
            cfg.spawn_half_width,
            cfg.trail_capacity,
            rng,
        )
    }

    /// Advances every particle by one tick.
    ///
    /// The tick is complete when this returns; callers may then read
    /// any particle's position and trail without seeing partial state.
    pub fn tick(&mut self, cfg: &Config) {
        for p in &mut self.particles {
            p.tick(cfg);
        }
    }

    /// Grows or shrinks the ensemble to exactly `target` particles.
    ///
    /// Growing appends fresh randomly placed particles; shrinking
    /// removes the most-recently-appended first, so the surviving
    /// particles and their states are untouched. A `target` equal to
    /// the current count is a no-op (after validation).
    pub fn resize(
        &mut self,
        target: usize,
        cfg: &Config,
        rng: &mut impl Rng,
    ) -> Result<(), ConfigError> {
        cfg.validate()?;

        let current = self.particles.len();
        if target == current {
            return Ok(());
        }

        if target < current {
            self.particles.truncate(target);
        } else {
            self.particles.reserve(target - current);
            for _ in current..target {
                self.particles.push(Self::spawn(cfg, rng));
            }
        }

        log::debug!("resized ensemble from {current} to {target} particles");
        Ok(())
    }

    /// Drops every particle and recreates `target` fresh ones.
    pub fn reset(
        &mut self,
        target: usize,
        cfg: &Config,
        rng: &mut impl Rng,
    ) -> Result<(), ConfigError> {
        cfg.validate()?;

        self.particles.clear();
        self.particles.extend((0..target).map(|_| Self::spawn(cfg, rng)));

        log::debug!("reset ensemble with {target} fresh particles");
        Ok(())
    }

    /// Reinitializes every particle's trail to its current position.
    ///
    /// Useful when trails are re-enabled after a period of
    /// integration-only ticks, so no stale history is displayed.
    pub fn reset_trails(&mut self) {
        for p in &mut self.particles {
            p.reset_trail();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of all particles, for the renderer.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
