//! Hardware seams
//!
//! The filter never touches peripherals directly. Reading a channel and
//! waiting for the ADC to settle go through these traits so the same filter
//! runs against a real ADC, a mock, or a scripted sequence in tests.

use num_traits::AsPrimitive;

/// One ADC conversion on a channel
pub trait SampleSource {
    /// Raw sample type, typically `u16` or `u32`
    type Sample: Copy + Default + AsPrimitive<f32>;

    fn read_sample(&mut self, channel: u8) -> Self::Sample;
}

impl<F, T> SampleSource for F
where
    F: FnMut(u8) -> T,
    T: Copy + Default + AsPrimitive<f32>,
{
    type Sample = T;

    fn read_sample(&mut self, channel: u8) -> T {
        self(channel)
    }
}

/// Blocking pause
pub trait DelaySource {
    fn wait_ms(&mut self, ms: u32);
}

impl<D: DelaySource + ?Sized> DelaySource for &mut D {
    fn wait_ms(&mut self, ms: u32) {
        (**self).wait_ms(ms)
    }
}

/// Suspending pause for cooperative executors
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait AsyncDelaySource {
    async fn wait_ms(&mut self, ms: u32);
}

#[cfg(feature = "async")]
impl<D: AsyncDelaySource + ?Sized> AsyncDelaySource for &mut D {
    async fn wait_ms(&mut self, ms: u32) {
        (**self).wait_ms(ms).await
    }
}

/// Adapts an `embedded-hal` delay provider
///
/// ```ignore
/// let delay = HalDelay(timer.delay());
/// let filter = SmoothAin::new(0, 0.2, read_adc, delay);
/// ```
#[cfg(feature = "embedded-hal")]
#[derive(Debug)]
pub struct HalDelay<D>(pub D);

#[cfg(feature = "embedded-hal")]
impl<D: embedded_hal::delay::DelayNs> DelaySource for HalDelay<D> {
    fn wait_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

#[cfg(all(feature = "embedded-hal", feature = "async"))]
impl<D: embedded_hal_async::delay::DelayNs> AsyncDelaySource for HalDelay<D> {
    async fn wait_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms).await;
    }
}
