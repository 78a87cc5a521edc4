use core::fmt;

use num_traits::AsPrimitive;

use crate::config::{validate_alpha, Config, ConfigError, DEFAULT_READ_DELAY_MS};
use crate::ewma::Ewma;
use crate::hal::{DelaySource, SampleSource};

#[cfg(feature = "async")]
use crate::hal::AsyncDelaySource;

/// EWMA-smoothed analog input
///
/// Each [`update`](Self::update) reads the channel twice, `read_delay_ms`
/// apart, and folds the second reading into the running average. The first
/// reading only gives the ADC input time to settle.
pub struct SmoothAin<S: SampleSource, D> {
    channel: u8,
    source: S,
    delay: D,
    read_delay_ms: u32,
    last_raw: S::Sample,
    ewma: Ewma,
}

impl<S: SampleSource, D> SmoothAin<S, D> {
    /// Bind a filter to `channel`. Alpha is taken as given, see
    /// [`from_config`](Self::from_config) for a validating constructor.
    pub fn new(channel: u8, alpha: f32, source: S, delay: D) -> Self {
        Self {
            channel,
            source,
            delay,
            read_delay_ms: DEFAULT_READ_DELAY_MS,
            last_raw: S::Sample::default(),
            ewma: Ewma::new(alpha),
        }
    }

    pub fn from_config(channel: u8, config: Config, source: S, delay: D) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut filter = Self::new(channel, config.alpha, source, delay);
        filter.read_delay_ms = config.read_delay_ms;
        Ok(filter)
    }

    /// Fold a value that did not come from this filter's channel.
    ///
    /// Same recurrence as `update`, including the cold start on a fresh
    /// filter. Does not change [`last_value`](Self::last_value).
    pub fn insert_value(&mut self, value: S::Sample) -> f32 {
        self.ewma.fold(value.as_())
    }

    pub fn alpha(&self) -> f32 {
        self.ewma.alpha()
    }

    /// Takes effect from the next update; past averages are untouched
    pub fn set_alpha(&mut self, alpha: f32) {
        #[cfg(feature = "log")]
        log::debug!("channel {}: alpha {} -> {}", self.channel, self.ewma.alpha(), alpha);

        self.ewma.set_alpha(alpha);
    }

    pub fn try_set_alpha(&mut self, alpha: f32) -> Result<(), ConfigError> {
        validate_alpha(alpha)?;
        self.set_alpha(alpha);
        Ok(())
    }

    pub fn read_delay_ms(&self) -> u32 {
        self.read_delay_ms
    }

    pub fn set_read_delay(&mut self, ms: u32) {
        #[cfg(feature = "log")]
        log::debug!("channel {}: read delay {} -> {} ms", self.channel, self.read_delay_ms, ms);

        self.read_delay_ms = ms;
    }

    /// Raw sample behind the latest `update`, default value before the first
    pub fn last_value(&self) -> S::Sample {
        self.last_raw
    }

    pub fn average(&self) -> f32 {
        self.ewma.average()
    }

    pub fn previous(&self) -> f32 {
        self.ewma.previous()
    }

    pub fn readings(&self) -> u32 {
        self.ewma.readings()
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn ewma(&self) -> &Ewma {
        &self.ewma
    }

    /// Write the current and previous average as one line
    pub fn print_values<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{}", self.ewma)
    }

    /// Give back the sample source and delay
    pub fn release(self) -> (S, D) {
        (self.source, self.delay)
    }

    fn fold_raw(&mut self, raw: S::Sample) -> f32 {
        self.last_raw = raw;
        self.ewma.fold(raw.as_())
    }
}

impl<S: SampleSource, D: DelaySource> SmoothAin<S, D> {
    /// Take a settled reading and return the new average
    pub fn update(&mut self) -> f32 {
        let _ = self.source.read_sample(self.channel);
        self.delay.wait_ms(self.read_delay_ms);
        let raw = self.source.read_sample(self.channel);
        self.fold_raw(raw)
    }
}

#[cfg(feature = "async")]
impl<S: SampleSource, D: AsyncDelaySource> SmoothAin<S, D> {
    /// [`update`](Self::update) with the settle delay as an await point
    pub async fn update_async(&mut self) -> f32 {
        let _ = self.source.read_sample(self.channel);
        self.delay.wait_ms(self.read_delay_ms).await;
        let raw = self.source.read_sample(self.channel);
        self.fold_raw(raw)
    }
}

impl<S, D> fmt::Debug for SmoothAin<S, D>
where
    S: SampleSource,
    S::Sample: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmoothAin")
            .field("channel", &self.channel)
            .field("read_delay_ms", &self.read_delay_ms)
            .field("last_raw", &self.last_raw)
            .field("ewma", &self.ewma)
            .finish()
    }
}
