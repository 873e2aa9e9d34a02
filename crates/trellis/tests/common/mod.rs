//! Shared fixtures for trellis DSL tests.

#![allow(dead_code)]

use std::sync::Arc;

use trellis::prelude::*;
use trellis_core::element::UIElement;
use trellis_core::mock::MockDriver;

pub const ROW_HEIGHT: f64 = 60.0;

pub fn fast_config() -> TrellisConfig {
    TrellisConfig::default()
        .with_timeout_ms(200)
        .with_poll_interval_ms(10)
        .with_max_scroll_attempts(3)
}

pub fn context(driver: &Arc<MockDriver>) -> Trellis {
    Trellis::new(driver.clone()).with_config(fast_config())
}

pub fn window(children: Vec<UIElement>) -> UIElement {
    UIElement::new("Window")
        .with_frame(0.0, 0.0, 390.0, 844.0)
        .with_children(children)
}

/// One inbox cell: a title, a delete button and an optional "unread" value.
pub fn cell(i: usize, y: f64, unread: bool) -> UIElement {
    let cell = UIElement::new("Cell")
        .with_label(format!("Message {}", i))
        .with_frame(0.0, y, 400.0, ROW_HEIGHT)
        .with_children(vec![
            UIElement::new("StaticText")
                .with_id("title")
                .with_label(format!("Message {}", i))
                .with_frame(16.0, y + 10.0, 200.0, 20.0),
            UIElement::new("Button")
                .with_id("delete")
                .with_label("Delete")
                .with_frame(320.0, y + 10.0, 60.0, 40.0),
        ]);
    if unread {
        cell.with_value("unread")
    } else {
        cell
    }
}

/// An inbox table spanning y 100..500 with `rows` cells starting at `first_y`.
pub fn inbox_screen(rows: usize, first_y: f64) -> Vec<UIElement> {
    inbox_with(rows, first_y, &[])
}

pub fn inbox_with(rows: usize, first_y: f64, unread: &[usize]) -> Vec<UIElement> {
    let cells = (0..rows)
        .map(|i| cell(i, first_y + ROW_HEIGHT * i as f64, unread.contains(&i)))
        .collect();
    vec![window(vec![UIElement::new("Table")
        .with_id("inbox")
        .with_frame(0.0, 100.0, 400.0, 400.0)
        .with_children(cells)])]
}

/// Centre of the title of row `i` when rows start at `first_y`.
pub fn title_center(i: usize, first_y: f64) -> (i32, i32) {
    (116, (first_y + ROW_HEIGHT * i as f64 + 20.0) as i32)
}

/// A row wrapper as a test author would declare it.
#[derive(Debug)]
pub struct InboxRow {
    pub item: Item,
    pub title: View,
    pub delete: View,
}

impl ListItem for InboxRow {
    fn from_item(item: Item) -> Self {
        Self {
            title: item.view(|b| b.with_id("title")),
            delete: item.view(|b| b.with_id("delete")),
            item,
        }
    }
}

/// A row type that is never registered.
#[derive(Debug)]
pub struct DraftRow(pub Item);

pub fn inbox(ctx: &Trellis) -> ListView {
    ctx.list(|b| b.with_id("inbox"), |items| items.register::<InboxRow>())
}
