use crate::config::Config;
use crate::stepper;
use crate::trail::TrailBuffer;
use glam::DVec3;
use rand::Rng;

/// One attractor particle: its current state and its trail history.
#[derive(Debug)]
pub struct Particle {
    pos: DVec3,
    trail: TrailBuffer,
}

impl Particle {
    pub fn new(pos: DVec3, trail_capacity: usize) -> Self {
        Self {
            pos,
            trail: TrailBuffer::new(trail_capacity, pos),
        }
    }

    /// Spawns a particle uniformly inside an axis-aligned cube.
    pub fn random_in_cube(
        center: DVec3,
        half_width: f64,
        trail_capacity: usize,
        rng: &mut impl Rng,
    ) -> Self {
        let offset = DVec3::new(
            rng.random_range(-half_width..=half_width),
            rng.random_range(-half_width..=half_width),
            rng.random_range(-half_width..=half_width),
        );
        Self::new(center + offset, trail_capacity)
    }

    /// Advances the particle by one tick.
    ///
    /// Steps the state through the Lorenz field, records the new
    /// position in the trail, and recomputes the visible trail length
    /// as `ceil(sqrt(|velocity|) * trail_scale)`, so faster particles
    /// draw longer trail segments. With `cfg.trails_enabled` false the
    /// state still advances but the trail is left untouched.
    pub fn tick(&mut self, cfg: &Config) {
        let step = stepper::step(self.pos, cfg.dt, &cfg.params);
        self.pos = step.next;

        if cfg.trails_enabled {
            self.trail.push(self.pos);
            let len = (step.velocity.length().sqrt() * cfg.trail_scale).ceil() as usize;
            self.trail.set_visible_len(len);
        }
    }

    /// Current position.
    #[inline]
    pub fn pos(&self) -> DVec3 {
        self.pos
    }

    /// Read-only view of the trail; together with [`Particle::pos`]
    /// this is the entire per-particle rendering contract.
    #[inline]
    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Reinitializes the trail to the current position.
    pub fn reset_trail(&mut self) {
        self.trail.reset(self.pos);
    }
}
