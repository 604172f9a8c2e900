//! Blink worker on its own thread, fed through a real queue.

use std::time::Duration;

use rgbled_widget::adapters::delay::ThreadDelay;
use rgbled_widget::queue::BlinkRequest;
use rgbled_widget::worker::BlinkWorker;
use rgbled_widget::Color;

use crate::mock_hw::{RecordingSink, leak_queue, wait_for};

#[test]
fn requests_are_shown_in_fifo_order() {
    let queue = leak_queue();
    let sink = RecordingSink::new();
    BlinkWorker::new(sink.clone(), ThreadDelay, 10)
        .spawn(queue)
        .unwrap();

    queue.try_enqueue(BlinkRequest::blink(Color::RED, 20, 0)).unwrap();
    queue.try_enqueue(BlinkRequest::blink(Color::GREEN, 20, 0)).unwrap();
    queue.try_enqueue(BlinkRequest::persistent(Color::BLUE)).unwrap();

    assert!(wait_for(Duration::from_secs(2), || sink.writes().len() == 5));
    assert_eq!(
        sink.colors(),
        vec![Color::RED, Color::BLACK, Color::GREEN, Color::BLACK, Color::BLUE]
    );
}

#[test]
fn blink_timing_respects_active_and_interval() {
    let queue = leak_queue();
    let sink = RecordingSink::new();
    BlinkWorker::new(sink.clone(), ThreadDelay, 40)
        .spawn(queue)
        .unwrap();

    queue.try_enqueue(BlinkRequest::blink(Color::CYAN, 30, 0)).unwrap();
    queue.try_enqueue(BlinkRequest::blink(Color::MAGENTA, 30, 0)).unwrap();

    assert!(wait_for(Duration::from_secs(2), || sink.writes().len() == 4));
    let w = sink.writes();
    // CYAN on for at least active_ms.
    assert!(w[1].at - w[0].at >= Duration::from_millis(30));
    // Restored colour held for at least the interval before the next blink.
    assert!(w[2].at - w[1].at >= Duration::from_millis(40));
    assert!(w[3].at - w[2].at >= Duration::from_millis(30));
}

#[test]
fn blink_returns_to_persistent_colour() {
    let queue = leak_queue();
    let sink = RecordingSink::new();
    let worker = BlinkWorker::new(sink.clone(), ThreadDelay, 5);
    let snapshot = worker.snapshot();
    worker.spawn(queue).unwrap();

    queue.try_enqueue(BlinkRequest::persistent(Color::DARK_BLUE)).unwrap();
    queue.try_enqueue(BlinkRequest::blink(Color::ORANGE, 10, 5)).unwrap();

    assert!(wait_for(Duration::from_secs(2), || sink.writes().len() == 3));
    assert_eq!(
        sink.colors(),
        vec![Color::DARK_BLUE, Color::ORANGE, Color::DARK_BLUE]
    );
    assert_eq!(snapshot.get(), Color::DARK_BLUE);
}

#[test]
fn producers_never_block_on_a_busy_worker() {
    let queue = leak_queue();
    let sink = RecordingSink::new();
    BlinkWorker::new(sink.clone(), ThreadDelay, 5)
        .spawn(queue)
        .unwrap();

    // First blink keeps the worker busy well past the enqueues below.
    queue.try_enqueue(BlinkRequest::blink(Color::RED, 300, 0)).unwrap();
    assert!(wait_for(Duration::from_secs(1), || sink.writes().len() == 1));

    let t0 = std::time::Instant::now();
    let mut dropped = 0;
    for _ in 0..20 {
        if queue.try_enqueue(BlinkRequest::blink(Color::GREEN, 1, 0)).is_err() {
            dropped += 1;
        }
    }
    assert!(t0.elapsed() < Duration::from_millis(100));
    assert_eq!(dropped, 4);
}
