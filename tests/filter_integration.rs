use std::cell::RefCell;
use std::rc::Rc;

use smooth_ain::{DelaySource, SmoothAin};

/// Records every requested pause instead of sleeping
#[derive(Default)]
struct RecordingDelay {
    waits: Vec<u32>,
}

impl RecordingDelay {
    fn total_ms(&self) -> u32 {
        self.waits.iter().sum()
    }
}

impl DelaySource for RecordingDelay {
    fn wait_ms(&mut self, ms: u32) {
        self.waits.push(ms);
    }
}

/// Replays `samples` in order, then reads 0
fn scripted(samples: Vec<u32>) -> impl FnMut(u8) -> u32 {
    let mut samples = samples.into_iter();
    move |_: u8| samples.next().unwrap_or(0)
}

#[test]
fn test_two_update_scenario() {
    let mut filter = SmoothAin::new(0, 0.5, scripted(vec![100, 100, 50, 50]), RecordingDelay::default());

    assert_eq!(filter.update(), 100.0);
    // 0.5 * 50 + 0.5 * 100
    assert_eq!(filter.update(), 75.0);
    assert_eq!(filter.previous(), 100.0);
    assert_eq!(filter.readings(), 2);
}

#[test]
fn test_first_update_uses_second_read() {
    let mut filter = SmoothAin::new(0, 0.3, scripted(vec![4095, 1234]), RecordingDelay::default());

    let out = filter.update();

    assert_eq!(out, 1234.0);
    assert_eq!(filter.average(), 1234.0);
    assert_eq!(filter.previous(), 1234.0);
    assert_eq!(filter.readings(), 1);
}

#[test]
fn test_last_value_is_second_read() {
    let samples = vec![10, 20, 30, 40, 50, 60];
    let mut filter = SmoothAin::new(0, 0.5, scripted(samples), RecordingDelay::default());

    filter.update();
    assert_eq!(filter.last_value(), 20);

    filter.update();
    assert_eq!(filter.last_value(), 40);

    filter.update();
    assert_eq!(filter.last_value(), 60);
}

#[test]
fn test_insert_value_does_not_touch_last_value() {
    let mut filter = SmoothAin::new(0, 0.5, scripted(vec![0, 300]), RecordingDelay::default());

    filter.update();
    let out = filter.insert_value(100);

    // 0.5 * 100 + 0.5 * 300
    assert_eq!(out, 200.0);
    assert_eq!(filter.last_value(), 300);
    assert_eq!(filter.readings(), 2);
}

#[test]
fn test_reads_bound_channel() {
    let mut channels = Vec::new();
    let source = |channel: u8| {
        channels.push(channel);
        512_u16
    };

    let mut filter = SmoothAin::new(7, 0.5, source, RecordingDelay::default());
    filter.update();
    filter.update();
    drop(filter);

    assert_eq!(channels, [7, 7, 7, 7]);
}

#[test]
fn test_settle_delay_per_update() {
    let mut delay = RecordingDelay::default();
    {
        let mut filter = SmoothAin::new(0, 0.5, |_: u8| 1_u32, &mut delay);
        for _ in 0..5 {
            filter.update();
        }
    }

    // One pause per update, each the default 10 ms
    assert_eq!(delay.waits, [10; 5]);
    assert!(delay.total_ms() >= 5 * 10);
}

#[test]
fn test_set_read_delay_applies_to_next_update() {
    let mut filter = SmoothAin::new(0, 0.5, |_: u8| 1_u32, RecordingDelay::default());

    filter.update();
    filter.set_read_delay(2);
    filter.update();
    filter.set_read_delay(0);
    filter.update();

    let (_, delay) = filter.release();
    assert_eq!(delay.waits, [10, 2, 0]);
}

/// Delay that appends to a log shared with the sample source
struct LoggingDelay(Rc<RefCell<Vec<&'static str>>>);

impl DelaySource for LoggingDelay {
    fn wait_ms(&mut self, _ms: u32) {
        self.0.borrow_mut().push("wait");
    }
}

#[test]
fn test_settle_delay_sits_between_reads() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let source_events = Rc::clone(&events);
    let source = move |_: u8| {
        source_events.borrow_mut().push("read");
        100_u16
    };

    let mut filter = SmoothAin::new(0, 0.5, source, LoggingDelay(Rc::clone(&events)));

    filter.update();
    assert_eq!(*events.borrow(), ["read", "wait", "read"]);

    filter.update();
    assert_eq!(*events.borrow(), ["read", "wait", "read", "read", "wait", "read"]);
}

#[test]
fn test_readings_and_last_value_only_move_forward() {
    let samples = vec![100, 300, 120, 280, 90, 310];
    let mut filter = SmoothAin::new(0, 0.5, scripted(samples), RecordingDelay::default());

    filter.update();
    let mut readings = filter.readings();
    assert_eq!(filter.last_value(), 300);

    filter.insert_value(50);
    assert!(filter.readings() > readings);
    readings = filter.readings();

    filter.set_alpha(0.9);
    filter.set_read_delay(1);
    assert_eq!(filter.readings(), readings);
    assert_eq!(filter.last_value(), 300);

    filter.update();
    assert!(filter.readings() > readings);
    assert_eq!(filter.last_value(), 280);
}

#[test]
fn test_set_alpha_affects_only_later_updates() {
    let samples = vec![0, 0, 0, 1000, 0, 1000];
    let mut filter = SmoothAin::new(0, 0.5, scripted(samples), RecordingDelay::default());

    filter.update();
    let before = filter.update();
    assert_eq!(before, 500.0);

    filter.set_alpha(0.1);
    assert_eq!(filter.alpha(), 0.1);
    assert_eq!(filter.average(), 500.0);

    // 0.1 * 1000 + 0.9 * 500
    let after = filter.update();
    assert!((after - 550.0).abs() < 1e-3, "Expected 550.0, got {}", after);
}

#[test]
fn test_filter_smooths_noisy_input() {
    let noisy = [500_u16, 510, 490, 505, 495, 500, 498, 502];
    let mut reads = noisy.iter().flat_map(|&s| [s, s]);
    let source = move |_: u8| reads.next().unwrap_or(0);

    let mut filter = SmoothAin::new(0, 0.2, source, RecordingDelay::default());

    let outputs: Vec<f32> = noisy.iter().map(|_| filter.update()).collect();

    let input: Vec<f32> = noisy.iter().map(|&s| s as f32).collect();
    assert!(variance(&outputs) < variance(&input));
    assert!(outputs.iter().all(|&x| (490.0..=510.0).contains(&x)));
}

#[test]
fn test_zero_and_saturated_samples_are_accepted() {
    let samples = vec![0, 0, 4095, 4095];
    let mut filter = SmoothAin::new(0, 1.0, scripted(samples), RecordingDelay::default());

    assert_eq!(filter.update(), 0.0);
    assert_eq!(filter.update(), 4095.0);
}

fn variance(data: &[f32]) -> f32 {
    let mean: f32 = data.iter().sum::<f32>() / data.len() as f32;
    data.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / data.len() as f32
}
