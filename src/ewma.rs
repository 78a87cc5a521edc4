use core::fmt;

/// Exponentially-weighted moving average state.
///
/// `average = alpha * sample + (1 - alpha) * previous`
///
/// Lower alpha = more smoothing, higher = more responsive. Alpha is expected
/// in (0.0, 1.0] but is not checked here, see [`Config::validate`].
///
/// [`Config::validate`]: crate::Config::validate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ewma {
    alpha: f32,
    one_minus_alpha: f32,
    average: f32,
    previous: f32,
    // 0 until the first fold
    readings: u32,
}

impl Ewma {
    /// Create new EWMA state with no readings folded in yet
    pub const fn new(alpha: f32) -> Self {
        Self {
            alpha,
            one_minus_alpha: 1.0 - alpha,
            average: 0.0,
            previous: 0.0,
            readings: 0,
        }
    }

    /// Fold one sample into the average and return the new average.
    ///
    /// The first fold after creation sets both the average and the previous
    /// average to the sample, so the output does not ramp up from zero.
    pub fn fold(&mut self, sample: f32) -> f32 {
        if self.readings == 0 {
            self.average = sample;
            self.previous = sample;
            self.readings = 1;

            #[cfg(feature = "log")]
            log::trace!("ewma cold start at {}", sample);

            return self.average;
        }

        self.readings = self.readings.saturating_add(1);
        self.previous = self.average;
        self.average = self.alpha * sample + self.one_minus_alpha * self.previous;

        #[cfg(feature = "log")]
        log::trace!(
            "ewma fold #{}: sample {} -> {} (was {})",
            self.readings,
            sample,
            self.average,
            self.previous
        );

        self.average
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Replace the smoothing factor. Averages and reading count are kept,
    /// the new factor applies from the next fold on.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.one_minus_alpha = 1.0 - alpha;
    }

    /// Most recent smoothed value
    pub fn average(&self) -> f32 {
        self.average
    }

    /// Smoothed value before the most recent fold
    pub fn previous(&self) -> f32 {
        self.previous
    }

    /// Number of folds since creation
    pub fn readings(&self) -> u32 {
        self.readings
    }

    pub fn is_initialized(&self) -> bool {
        self.readings != 0
    }
}

impl fmt::Display for Ewma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ave, aveOld = {}\t{}", self.average, self.previous)
    }
}
