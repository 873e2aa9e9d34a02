//! Shared fixtures for trellis-core integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use trellis_core::config::TrellisConfig;
use trellis_core::element::UIElement;
use trellis_core::interaction::ViewInteraction;
use trellis_core::matcher::ViewMatcher;
use trellis_core::mock::MockDriver;

/// Short timeouts so failing waits finish quickly.
pub fn fast_config() -> Arc<TrellisConfig> {
    Arc::new(
        TrellisConfig::default()
            .with_timeout_ms(200)
            .with_poll_interval_ms(10)
            .with_max_scroll_attempts(3),
    )
}

pub fn window(children: Vec<UIElement>) -> UIElement {
    UIElement::new("Window")
        .with_frame(0.0, 0.0, 390.0, 844.0)
        .with_children(children)
}

/// A login form: email field with a value, password field, login button.
pub fn login_screen() -> Vec<UIElement> {
    vec![window(vec![
        UIElement::new("TextField")
            .with_id("email")
            .with_value("old")
            .with_frame(20.0, 200.0, 350.0, 44.0),
        UIElement::new("SecureTextField")
            .with_id("password")
            .with_frame(20.0, 260.0, 350.0, 44.0),
        UIElement::new("Button")
            .with_id("login")
            .with_label("Log In")
            .with_frame(20.0, 400.0, 350.0, 44.0),
        UIElement::new("Button")
            .with_id("forgot")
            .with_label("Forgot?")
            .with_hittable(false)
            .with_frame(20.0, 460.0, 350.0, 44.0),
    ])]
}

/// A list whose frame spans y 100..500, with cells 100pt tall starting at `first_y`.
pub fn list_screen(cells: usize, first_y: f64) -> Vec<UIElement> {
    let rows = (0..cells)
        .map(|i| {
            UIElement::new("Cell")
                .with_label(format!("Row {}", i))
                .with_frame(0.0, first_y + 100.0 * i as f64, 400.0, 100.0)
        })
        .collect();
    vec![window(vec![UIElement::new("Table")
        .with_id("list")
        .with_frame(0.0, 100.0, 400.0, 400.0)
        .with_children(rows)])]
}

pub fn interaction(driver: &Arc<MockDriver>, matcher: ViewMatcher) -> ViewInteraction {
    ViewInteraction::new(driver.clone(), matcher).with_config(fast_config())
}

pub fn by_id(id: &str) -> ViewMatcher {
    ViewMatcher::WithId(id.to_string())
}
