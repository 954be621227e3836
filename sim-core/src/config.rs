use glam::DVec3;

/// Parameters of the Lorenz vector field.
///
/// The defaults are the classical chaotic regime
/// (`sigma = 10`, `rho = 28`, `beta = 8/3`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

/// Simulation configuration, owned by the host driver and passed by
/// reference into `tick`/`resize`/`reset`.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Integration time step. Must be finite and positive.
    pub dt: f64,
    pub params: LorenzParams,
    /// Trail history capacity per particle. Must be at least 1.
    pub trail_capacity: usize,
    /// Scale constant for the velocity-driven visible trail length.
    pub trail_scale: f64,
    /// Center of the cube new particles are sampled in.
    pub spawn_center: DVec3,
    /// Half the side length of the sampling cube.
    pub spawn_half_width: f64,
    /// When false, ticking integrates state but leaves trails untouched.
    pub trails_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dt: 0.002,
            params: LorenzParams::default(),
            trail_capacity: 200,
            trail_scale: 10.0,
            spawn_center: DVec3::ZERO,
            spawn_half_width: 10.0,
            trails_enabled: true,
        }
    }
}

/// Rejected configuration values, reported by [`Config::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `dt` was zero, negative, or non-finite.
    InvalidDt(f64),
    /// Trail capacity was zero; a trail needs at least one slot.
    ZeroTrailCapacity,
    /// Spawn cube half-width was negative or non-finite.
    InvalidSpawnHalfWidth(f64),
    /// Visible-length scale constant was negative or non-finite.
    InvalidTrailScale(f64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDt(dt) => {
                write!(f, "dt must be finite and positive, got {dt}")
            }
            ConfigError::ZeroTrailCapacity => {
                write!(f, "trail capacity must be at least 1")
            }
            ConfigError::InvalidSpawnHalfWidth(w) => {
                write!(f, "spawn half-width must be finite and non-negative, got {w}")
            }
            ConfigError::InvalidTrailScale(k) => {
                write!(f, "trail scale must be finite and non-negative, got {k}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Checks every field that has a validity constraint.
    ///
    /// Called at ensemble construction, `resize`, and `reset`; invalid
    /// values are rejected rather than coerced to defaults.
    ///
    /// ### Returns
    /// `Ok(())` if the configuration is usable, otherwise the first
    /// [`ConfigError`] encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt(self.dt));
        }
        if self.trail_capacity == 0 {
            return Err(ConfigError::ZeroTrailCapacity);
        }
        if !self.spawn_half_width.is_finite() || self.spawn_half_width < 0.0 {
            return Err(ConfigError::InvalidSpawnHalfWidth(self.spawn_half_width));
        }
        if !self.trail_scale.is_finite() || self.trail_scale < 0.0 {
            return Err(ConfigError::InvalidTrailScale(self.trail_scale));
        }
        Ok(())
    }
}
