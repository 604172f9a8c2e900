//! Keyboard events → listeners → queue → worker → sink.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rgbled_widget::adapters::state::KeyboardState;
use rgbled_widget::app::ports::{LinkState, Transport};
use rgbled_widget::events::IndicatorEvent;
use rgbled_widget::{Color, ColorTable, Indicator, IndicatorConfig, start};

use crate::mock_hw::{RecordingDelay, RecordingSink, leak_queue, wait_for};

/// Start quietly: no battery blink, so only connectivity is shown at boot.
fn running(config: IndicatorConfig) -> (Indicator, RecordingSink, Arc<KeyboardState>) {
    let state = Arc::new(KeyboardState::new());
    state.set_battery(90);
    state.set_link(LinkState::Connected);
    let sink = RecordingSink::new();
    let indicator = start(
        sink.clone(),
        RecordingDelay::new(),
        config,
        ColorTable::default(),
        leak_queue(),
        state.providers(),
    )
    .unwrap();
    // Boot connectivity blink: BLUE then back to the persistent colour.
    assert!(wait_for(Duration::from_secs(1), || sink.writes().len() >= 2));
    thread::sleep(Duration::from_millis(20));
    (indicator, sink, state)
}

fn quiet() -> IndicatorConfig {
    IndicatorConfig {
        battery_show_self: false,
        layer_debounce_ms: 40,
        ..Default::default()
    }
}

#[test]
fn three_layers_blink_three_times() {
    let (ind, sink, state) = running(quiet());
    state.set_highest_layer(3);
    ind.on_event(IndicatorEvent::LayerChanged { active: true });

    assert!(wait_for(Duration::from_secs(1), || sink.count(Color::WHITE) == 3));
    thread::sleep(Duration::from_millis(150));
    assert_eq!(sink.count(Color::WHITE), 3);
}

#[test]
fn layer_burst_dispatches_once_with_settled_state() {
    let (ind, sink, state) = running(quiet());
    for layer in [1, 3, 2, 4, 2] {
        state.set_highest_layer(layer);
        ind.on_event(IndicatorEvent::LayerChanged { active: true });
        thread::sleep(Duration::from_millis(5));
    }

    assert!(wait_for(Duration::from_secs(1), || sink.count(Color::WHITE) == 2));
    thread::sleep(Duration::from_millis(200));
    assert_eq!(sink.count(Color::WHITE), 2);
    assert!(!ind.listeners().layer_pending());
}

#[test]
fn battery_event_uses_current_level() {
    let (ind, sink, state) = running(IndicatorConfig {
        battery_level_low: 20,
        battery_level_high: 60,
        ..quiet()
    });
    // `battery_show_self: false` also silences runtime battery events.
    state.set_battery(5);
    ind.on_event(IndicatorEvent::BatteryChanged);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(sink.count(Color::RED), 0);

    let (ind, sink, state) = running(IndicatorConfig {
        battery_show_self: true,
        battery_level_low: 20,
        battery_level_high: 60,
        ..quiet()
    });
    let before = sink.count(Color::RED);
    state.set_battery(5);
    ind.on_event(IndicatorEvent::BatteryChanged);
    assert!(wait_for(Duration::from_secs(1), || sink.count(Color::RED) == before + 1));
}

#[test]
fn connectivity_event_shows_usb_when_enabled() {
    let (ind, sink, state) = running(IndicatorConfig {
        conn_show_usb: true,
        ..quiet()
    });
    state.set_transport(Transport::Usb);
    ind.on_event(IndicatorEvent::ConnectivityChanged);
    assert!(wait_for(Duration::from_secs(1), || sink.count(Color::MAGENTA) == 1));
}

#[test]
fn layer_colour_becomes_persistent() {
    let mut config = IndicatorConfig {
        show_layer_change: false,
        show_layer_colors: true,
        ..quiet()
    };
    config.layer_colors.extend_from_slice(&[0, 11]).unwrap();
    let (ind, sink, state) = running(config);

    state.set_highest_layer(1);
    ind.on_event(IndicatorEvent::LayerChanged { active: true });
    assert!(wait_for(Duration::from_secs(1), || ind.displayed() == Color::ORANGE));

    // Later blinks restore the layer colour, not black.
    ind.on_event(IndicatorEvent::ConnectivityChanged);
    assert!(wait_for(Duration::from_secs(1), || sink.count(Color::ORANGE) == 2));
    assert_eq!(sink.colors().last(), Some(&Color::ORANGE));
}
