use std::time::Duration;

use crate::error::ConfigError;

/// Timing and viewport parameters for a quiz run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How long answer coloring stays on screen before the quiz moves on.
    pub feedback_dwell: Duration,
    /// How long the "last chance" banner is shown.
    pub last_chance: Duration,
    /// How long the confetti stream keeps emitting after completion.
    pub confetti: Duration,
    /// How long leftover confetti may fall after the stream stops.
    pub confetti_linger: Duration,
    /// Nominal integration step of every particle simulator.
    pub tick: Duration,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feedback_dwell: Duration::from_millis(2500),
            last_chance: Duration::from_millis(3000),
            confetti: Duration::from_millis(3000),
            confetti_linger: Duration::from_millis(2000),
            tick: Duration::from_millis(16),
            viewport_width: 1280.0,
            viewport_height: 800.0,
            seed: None,
        }
    }
}

impl Config {
    /// Reads the `QUIZ_*` variables from the process environment.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                Some(raw) => parse::<u64>(key, &raw).map(Duration::from_millis),
                None => Ok(default),
            }
        };
        let float = |key: &'static str, default: f32| -> Result<f32, ConfigError> {
            match lookup(key) {
                Some(raw) => {
                    let value = parse::<f32>(key, &raw)?;
                    if !value.is_finite() || value <= 0.0 {
                        return Err(ConfigError::InvalidValue { key, value: raw });
                    }
                    Ok(value)
                }
                None => Ok(default),
            }
        };

        let tick = millis("QUIZ_TICK_MS", defaults.tick)?;
        if tick.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "QUIZ_TICK_MS",
                value: "0".to_string(),
            });
        }

        let seed = match lookup("QUIZ_SEED") {
            Some(raw) => Some(parse::<u64>("QUIZ_SEED", &raw)?),
            None => None,
        };

        Ok(Self {
            feedback_dwell: millis("QUIZ_FEEDBACK_DWELL_MS", defaults.feedback_dwell)?,
            last_chance: millis("QUIZ_LAST_CHANCE_MS", defaults.last_chance)?,
            confetti: millis("QUIZ_CONFETTI_MS", defaults.confetti)?,
            confetti_linger: millis("QUIZ_CONFETTI_LINGER_MS", defaults.confetti_linger)?,
            tick,
            viewport_width: float("QUIZ_VIEWPORT_WIDTH", defaults.viewport_width)?,
            viewport_height: float("QUIZ_VIEWPORT_HEIGHT", defaults.viewport_height)?,
            seed,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
