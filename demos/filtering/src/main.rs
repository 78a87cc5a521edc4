//! Demonstrates EWMA smoothing with smooth-ain
//!
//! A simulated 12-bit ADC reads a potentiometer sitting near mid-scale with
//! some noise on top, then the knob is turned to three quarters.

use std::thread;
use std::time::Duration;

use smooth_ain::{Config, DelaySource, SmoothAin};

struct SleepDelay;

impl DelaySource for SleepDelay {
    fn wait_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}

/// Deterministic noisy pot: 2048 for the first 10 updates, then 3072, with +/-40 counts of noise
fn noisy_pot() -> impl FnMut(u8) -> u16 {
    let noise = [0_i32, 35, -20, 40, -38, 12, -5, 28, -33, 18];
    let mut n = 0_usize;
    move |_: u8| {
        let level = if n < 20 { 2048 } else { 3072 };
        let sample = level + noise[n % noise.len()];
        n += 1;
        sample as u16
    }
}

fn run(label: &str, mut filter: SmoothAin<impl FnMut(u8) -> u16, SleepDelay>) {
    println!("{} (alpha={:.3})", label, filter.alpha());
    println!("   Raw → Output");
    for _ in 0..20 {
        let output = filter.update();
        println!("   {:4} → {:7.1}", filter.last_value(), output);
    }

    let mut line = String::new();
    let _ = filter.print_values(&mut line);
    print!("   {}", line);
    println!();
}

fn main() {
    println!("=== smooth-ain Filtering Examples ===\n");

    // Example 1: alpha = 1.0 passes the settled reading through
    let mut filter = SmoothAin::new(0, 1.0, noisy_pot(), SleepDelay);
    filter.set_read_delay(1);
    run("1. No smoothing", filter);

    // Example 2: heavy smoothing
    let mut filter = SmoothAin::new(0, 0.2, noisy_pot(), SleepDelay);
    filter.set_read_delay(1);
    run("2. EWMA", filter);

    // Example 3: alpha from a 50 ms time constant at one update per 10 ms
    let config = Config::from_time_constant(50.0, 10.0)
        .expect("Valid time constant")
        .with_read_delay(1);
    let filter = SmoothAin::from_config(0, config, noisy_pot(), SleepDelay).expect("Valid config");
    run("3. EWMA from time constant", filter);

    // Example 4: values from somewhere other than the ADC
    println!("4. Inserted values");
    let mut filter = SmoothAin::new(0, 0.5, noisy_pot(), SleepDelay);
    for value in [200_u16, 200, 100, 100, 300] {
        println!("   {:4} → {:7.1}", value, filter.insert_value(value));
    }
}
