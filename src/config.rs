/// Settle delay between the two reads of one update, in milliseconds
pub const DEFAULT_READ_DELAY_MS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    InvalidAlpha,
    #[cfg(feature = "time-constant")]
    InvalidTimeConstant,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidAlpha => write!(f, "alpha must be in range (0.0, 1.0]"),
            #[cfg(feature = "time-constant")]
            ConfigError::InvalidTimeConstant => {
                write!(f, "time constant and sample period must be > 0 and give alpha > 0.0")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Weight of the newest sample
    pub alpha: f32,
    pub read_delay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            read_delay_ms: DEFAULT_READ_DELAY_MS,
        }
    }
}

impl Config {
    pub const fn new(alpha: f32) -> Self {
        Self {
            alpha,
            read_delay_ms: DEFAULT_READ_DELAY_MS,
        }
    }

    pub const fn with_read_delay(mut self, read_delay_ms: u32) -> Self {
        self.read_delay_ms = read_delay_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_alpha(self.alpha)
    }

    /// Alpha for a first-order lowpass with time constant `tau_ms`, sampled
    /// every `sample_period_ms`: `1 - exp(-period / tau)`
    #[cfg(feature = "time-constant")]
    pub fn from_time_constant(tau_ms: f32, sample_period_ms: f32) -> Result<Self, ConfigError> {
        // negated comparisons also catch NaN
        if !(tau_ms > 0.0) || !(sample_period_ms > 0.0) {
            return Err(ConfigError::InvalidTimeConstant);
        }

        let alpha = 1.0 - libm::expf(-sample_period_ms / tau_ms);
        // period far below tau rounds alpha to 0.0 in f32
        if validate_alpha(alpha).is_err() {
            return Err(ConfigError::InvalidTimeConstant);
        }

        Ok(Self::new(alpha))
    }
}

pub(crate) fn validate_alpha(alpha: f32) -> Result<(), ConfigError> {
    // NaN fails both comparisons
    if alpha > 0.0 && alpha <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidAlpha)
    }
}
