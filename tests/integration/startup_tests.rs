//! Boot sequencing: readiness gate, boot indication, initialized gate.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rgbled_widget::adapters::state::KeyboardState;
use rgbled_widget::app::ports::LinkState;
use rgbled_widget::config::SplitRole;
use rgbled_widget::events::IndicatorEvent;
use rgbled_widget::{Color, ColorTable, Error, IndicatorConfig, start};

use crate::mock_hw::{RecordingDelay, RecordingSink, leak_queue, wait_for};

fn state(battery: u8, link: LinkState) -> Arc<KeyboardState> {
    let s = Arc::new(KeyboardState::new());
    s.set_battery(battery);
    s.set_link(link);
    s
}

#[test]
fn boot_shows_battery_then_connectivity() {
    let sink = RecordingSink::new();
    let delay = RecordingDelay::new();
    let kb = state(90, LinkState::Connected);
    let ind = start(
        sink.clone(),
        delay.clone(),
        IndicatorConfig::default(),
        ColorTable::default(),
        leak_queue(),
        kb.providers(),
    )
    .unwrap();

    assert!(wait_for(Duration::from_secs(1), || sink.writes().len() == 4));
    assert_eq!(
        sink.colors(),
        vec![Color::GREEN, Color::BLACK, Color::BLUE, Color::BLACK]
    );
    // Start-up pauses for the battery blink plus one interval.
    assert_eq!(delay.sleeps().iter().filter(|&&ms| ms == 2500).count(), 1);
    assert!(ind.listeners().is_initialized());
    assert!(ind.worker_running());
}

#[test]
fn low_battery_at_boot_uses_low_colour() {
    let sink = RecordingSink::new();
    let config = IndicatorConfig {
        battery_level_low: 20,
        battery_level_high: 60,
        ..Default::default()
    };
    start(
        sink.clone(),
        RecordingDelay::new(),
        config,
        ColorTable::default(),
        leak_queue(),
        state(5, LinkState::Advertising).providers(),
    )
    .unwrap();

    assert!(wait_for(Duration::from_secs(1), || sink.writes().len() == 4));
    assert_eq!(sink.colors()[0], Color::RED);
    assert_eq!(sink.colors()[2], Color::CYAN);
}

#[test]
fn missing_battery_uses_missing_colour() {
    let sink = RecordingSink::new();
    start(
        sink.clone(),
        RecordingDelay::new(),
        IndicatorConfig::default(),
        ColorTable::default(),
        leak_queue(),
        state(0, LinkState::Disconnected).providers(),
    )
    .unwrap();

    assert!(wait_for(Duration::from_secs(1), || sink.writes().len() == 4));
    assert_eq!(sink.colors()[0], Color::MAGENTA);
    assert_eq!(sink.colors()[2], Color::RED);
}

#[test]
fn not_ready_sink_disables_indicator() {
    let sink = RecordingSink::not_ready();
    let delay = RecordingDelay::new();
    let queue = leak_queue();
    let res = start(
        sink.clone(),
        delay.clone(),
        IndicatorConfig::default(),
        ColorTable::default(),
        queue,
        state(50, LinkState::Connected).providers(),
    );

    assert!(matches!(res, Err(Error::NotReady)));
    thread::sleep(Duration::from_millis(50));
    assert!(queue.is_empty());
    assert!(sink.writes().is_empty());
    assert!(delay.sleeps().is_empty());
}

#[test]
fn invalid_config_is_rejected_before_spawning() {
    let sink = RecordingSink::new();
    let res = start(
        sink.clone(),
        RecordingDelay::new(),
        IndicatorConfig {
            interval_ms: 0,
            ..Default::default()
        },
        ColorTable::default(),
        leak_queue(),
        state(50, LinkState::Connected).providers(),
    );
    assert!(matches!(res, Err(Error::Config(_))));
    assert!(sink.writes().is_empty());
}

#[test]
fn boot_sets_initial_layer_colour() {
    let sink = RecordingSink::new();
    let kb = state(50, LinkState::Connected);
    kb.set_highest_layer(1);
    let mut config = IndicatorConfig {
        battery_show_self: false,
        show_layer_colors: true,
        ..Default::default()
    };
    config.layer_colors.extend_from_slice(&[0, 9]).unwrap();

    let ind = start(
        sink.clone(),
        RecordingDelay::new(),
        config,
        ColorTable::default(),
        leak_queue(),
        kb.providers(),
    )
    .unwrap();

    assert!(wait_for(Duration::from_secs(1), || sink.writes().len() == 3));
    assert_eq!(
        sink.colors(),
        vec![Color::BLUE, Color::BLACK, Color::DARK_GREEN]
    );
    assert_eq!(ind.displayed(), Color::DARK_GREEN);
}

#[test]
fn peripheral_ignores_layers() {
    let sink = RecordingSink::new();
    let kb = state(50, LinkState::Connected);
    let ind = start(
        sink.clone(),
        RecordingDelay::new(),
        IndicatorConfig {
            battery_show_self: false,
            show_layer_colors: true,
            layer_debounce_ms: 10,
            split_role: SplitRole::Peripheral,
            ..Default::default()
        },
        ColorTable::default(),
        leak_queue(),
        kb.providers(),
    )
    .unwrap();

    assert!(wait_for(Duration::from_secs(1), || sink.writes().len() == 2));
    kb.set_highest_layer(2);
    ind.on_event(IndicatorEvent::LayerChanged { active: true });
    thread::sleep(Duration::from_millis(100));
    assert_eq!(sink.writes().len(), 2);
}
