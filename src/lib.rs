#![no_std]

mod config;
mod ewma;
mod smooth_ain;
pub mod hal;

pub use config::{Config, ConfigError, DEFAULT_READ_DELAY_MS};
pub use ewma::Ewma;
pub use smooth_ain::SmoothAin;
pub use hal::{DelaySource, SampleSource};

#[cfg(feature = "async")]
pub use hal::AsyncDelaySource;

#[cfg(feature = "embedded-hal")]
pub use hal::HalDelay;
