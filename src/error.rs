//! Error types for the ambient (non-gameplay) surface.
//!
//! The simulation core is a closed loop over well-formed numeric state and
//! has no recoverable errors by design; everything fallible lives at the
//! edges, which today means loading and validating the tuning config. Those
//! paths propagate through these types rather than panicking, so a bad
//! config file degrades to compiled defaults instead of a crash.

use std::fmt;

/// Top-level error enum for config loading and validation.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    Read(std::io::Error),

    /// The config file is not valid TOML (or has mistyped fields).
    Parse(toml::de::Error),

    /// A loaded value is outside its safe operating range.
    /// Returned by the validation helpers below.
    OutOfRange {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(err) => write!(f, "failed to read config file: {}", err),
            ConfigError::Parse(err) => write!(f, "failed to parse config file: {}", err),
            ConfigError::OutOfRange {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config field '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if a value that scales or divides other quantities is not
/// strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value <= 0.0 {
        Err(ConfigError::OutOfRange {
            name,
            value: value as f64,
            safe_range: "(0.0, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if the player radius fraction would produce a degenerate
/// or window-filling player.
pub fn validate_radius_fraction(value: f32) -> ConfigResult<()> {
    if value <= 0.0 || value >= 0.5 {
        Err(ConfigError::OutOfRange {
            name: "player_radius_fraction",
            value: value as f64,
            safe_range: "(0.0, 0.5)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if the spawn interval bounds are inverted or zero.
/// A zero minimum would spawn one enemy every tick once difficulty peaks.
pub fn validate_spawn_interval(min: u32, initial: u32) -> ConfigResult<()> {
    if min == 0 || initial < min {
        Err(ConfigError::OutOfRange {
            name: "spawn_interval_min",
            value: min as f64,
            safe_range: "[1, spawn_interval_initial]",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if the particle fade rate would make bursts immortal or
/// invisible.
pub fn validate_fade_rate(value: f32) -> ConfigResult<()> {
    if value <= 0.0 || value > 1.0 {
        Err(ConfigError::OutOfRange {
            name: "particle_fade_per_tick",
            value: value as f64,
            safe_range: "(0.0, 1.0]",
        })
    } else {
        Ok(())
    }
}
