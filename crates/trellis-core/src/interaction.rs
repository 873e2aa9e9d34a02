//! Deferred view interactions.
//!
//! A [`ViewInteraction`] is a matcher bound to a driver. Building one does
//! not touch the UI: the hierarchy is only fetched when an action is
//! performed or an assertion is checked. Both wait for the screen to reach
//! the expected state, polling every `poll_interval_ms` for up to
//! `timeout_ms` (see [`TrellisConfig`]).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trellis_core::action::ViewAction;
//! use trellis_core::assertion::ViewAssertion;
//! use trellis_core::interaction::ViewInteraction;
//! use trellis_core::matcher::ViewMatcher;
//! use trellis_core::mock::MockDriver;
//!
//! # async fn run() -> Result<(), trellis_core::interaction::InteractionError> {
//! let driver = Arc::new(MockDriver::new(vec![]));
//! let login = ViewInteraction::new(driver, ViewMatcher::WithId("login".into()));
//! login.perform(ViewAction::Click).await?;
//! login.check(ViewAssertion::DoesNotExist).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use base64::Engine;
use thiserror::Error;
use tracing::{debug, info_span, Instrument};

use crate::action::{Direction, ViewAction};
use crate::assertion::ViewAssertion;
use crate::config::TrellisConfig;
use crate::driver::{AutomationDriver, DriverError};
use crate::element::{ElementFrame, UIElement};
use crate::journal::{Journal, Step, StepLog, StepResult};
use crate::matcher::ViewMatcher;
use crate::root::RootMatcher;
use crate::tree::ElementTree;

const BACKSPACE: &str = "\u{8}";

/// Errors raised while resolving, acting on, or asserting about a view.
#[derive(Error, Debug)]
pub enum InteractionError {
    #[error("No element {matcher} found in {root} after {waited_ms}ms")]
    NoMatch {
        matcher: String,
        root: String,
        waited_ms: u64,
    },

    #[error("Ambiguous match: {count} elements {matcher}")]
    AmbiguousMatch { matcher: String, count: usize },

    #[error("Element {matcher} exists but is not displayed after {waited_ms}ms")]
    NotDisplayed { matcher: String, waited_ms: u64 },

    #[error("Assertion '{assertion}' failed for element {matcher}: {detail}")]
    AssertionFailed {
        assertion: String,
        matcher: String,
        detail: String,
    },

    #[error("No window matches {0}")]
    NoRoot(String),

    #[error("Element {matcher} not visible after {attempts} scroll attempts")]
    ScrollExhausted { matcher: String, attempts: u32 },

    #[error("List {matcher} has no children")]
    EmptyList { matcher: String },

    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// A deferred reference to a UI element.
#[derive(Clone)]
pub struct ViewInteraction {
    driver: Arc<dyn AutomationDriver>,
    matcher: ViewMatcher,
    root: RootMatcher,
    config: Arc<TrellisConfig>,
    journal: Journal,
}

impl std::fmt::Debug for ViewInteraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewInteraction")
            .field("matcher", &self.matcher.to_string())
            .field("root", &self.root)
            .finish()
    }
}

impl ViewInteraction {
    /// Creates an interaction with default config and a fresh journal.
    pub fn new(driver: Arc<dyn AutomationDriver>, matcher: ViewMatcher) -> Self {
        Self {
            driver,
            matcher,
            root: RootMatcher::default(),
            config: Arc::new(TrellisConfig::default()),
            journal: Journal::new(),
        }
    }

    pub fn with_config(mut self, config: Arc<TrellisConfig>) -> Self {
        self.config = config;
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn in_root(mut self, root: RootMatcher) -> Self {
        self.root = root;
        self
    }

    pub fn matcher(&self) -> &ViewMatcher {
        &self.matcher
    }

    pub fn root(&self) -> &RootMatcher {
        &self.root
    }

    pub fn config(&self) -> &Arc<TrellisConfig> {
        &self.config
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn driver(&self) -> &Arc<dyn AutomationDriver> {
        &self.driver
    }

    /// A new interaction for `matcher` sharing this one's driver, root,
    /// config and journal.
    pub fn derive(&self, matcher: ViewMatcher) -> Self {
        Self {
            matcher,
            ..self.clone()
        }
    }

    /// An interaction for elements matching `matcher` inside this element.
    pub fn descendant(&self, matcher: ViewMatcher) -> Self {
        self.derive(ViewMatcher::all_of(vec![
            matcher,
            ViewMatcher::IsDescendantOf(Box::new(self.matcher.clone())),
        ]))
    }

    /// Dumps the hierarchy, failing fast on a backend that was never connected.
    async fn snapshot(&self) -> Result<Vec<UIElement>, DriverError> {
        if !self.driver.is_connected() {
            return Err(DriverError::NotConnected);
        }
        self.driver.dump_tree().await
    }

    fn tree<'a>(&self, roots: &'a [UIElement]) -> ElementTree<'a> {
        ElementTree::new(self.root.select(roots))
    }

    /// Index of the single element matching `matcher` in `tree`.
    fn resolve(&self, matcher: &ViewMatcher, tree: &ElementTree<'_>) -> Result<Option<usize>, InteractionError> {
        let hits = matcher.find_all(tree);
        match hits.len() {
            0 => Ok(None),
            1 => Ok(Some(hits[0])),
            count => Err(InteractionError::AmbiguousMatch {
                matcher: matcher.to_string(),
                count,
            }),
        }
    }

    fn locate_in(&self, roots: &[UIElement]) -> Result<Option<UIElement>, InteractionError> {
        let tree = self.tree(roots);
        Ok(self.resolve(&self.matcher, &tree)?.map(|idx| tree.element(idx).clone()))
    }

    /// Looks the element up in a single snapshot, without waiting.
    pub async fn locate(&self) -> Result<Option<UIElement>, InteractionError> {
        let roots = self.snapshot().await?;
        self.locate_in(&roots)
    }

    async fn wait_for(&self, require_displayed: bool) -> Result<UIElement, InteractionError> {
        let start = Instant::now();
        let timeout = self.config.timeout();
        let mut hidden = false;

        loop {
            let roots = self.snapshot().await?;
            let has_root = !self.root.select(&roots).is_empty();
            match self.locate_in(&roots)? {
                Some(element) if !require_displayed || element.is_displayed() => {
                    return Ok(element);
                }
                Some(_) => hidden = true,
                None => hidden = false,
            }

            if start.elapsed() >= timeout {
                let waited_ms = start.elapsed().as_millis() as u64;
                let matcher = self.matcher.to_string();
                return Err(if hidden {
                    InteractionError::NotDisplayed { matcher, waited_ms }
                } else if !has_root {
                    InteractionError::NoRoot(self.root.to_string())
                } else {
                    InteractionError::NoMatch {
                        matcher,
                        root: self.root.to_string(),
                        waited_ms,
                    }
                });
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// Waits for the element to exist and returns a snapshot of it.
    pub async fn element(&self) -> Result<UIElement, InteractionError> {
        self.wait_for(false).await
    }

    /// Number of direct children of the resolved element.
    pub async fn child_count(&self) -> Result<usize, InteractionError> {
        Ok(self.element().await?.children.len())
    }

    /// Position of the last direct child; fails on an element without children.
    pub async fn last_child_position(&self) -> Result<usize, InteractionError> {
        match self.child_count().await? {
            0 => Err(InteractionError::EmptyList {
                matcher: self.matcher.to_string(),
            }),
            n => Ok(n - 1),
        }
    }

    /// Performs an action once the element is present and displayed.
    pub async fn perform(&self, action: ViewAction) -> Result<(), InteractionError> {
        let span = info_span!("perform", action = action.name());
        async {
            let start = Instant::now();
            let result = self.execute(&action).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            debug!(elapsed_ms, success = result.is_ok(), "action complete");
            self.record(Step::Action { name: action.name().to_string() }, &result, elapsed_ms)
                .await;
            result
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, action: &ViewAction) -> Result<(), InteractionError> {
        match action {
            ViewAction::ScrollTo => return self.scroll_into_view().await,
            ViewAction::SwipeUntilSettled { direction } => {
                return self.swipe_until_settled(*direction).await
            }
            _ => {}
        }

        let element = &self.wait_for(true).await?;
        let frame = element.frame.ok_or_else(|| {
            DriverError::CommandFailed(format!("{} has no frame", element.describe()))
        })?;
        let (x, y) = frame.center();

        match action {
            ViewAction::Click => self.driver.tap_location(x, y).await?,
            ViewAction::DoubleClick => self.driver.double_tap(x, y).await?,
            ViewAction::LongClick => {
                self.driver.long_press(x, y, self.config.long_press_secs).await?
            }
            ViewAction::TypeText { text } => {
                self.driver.tap_location(x, y).await?;
                self.driver.type_text(text).await?;
            }
            ViewAction::ClearText => {
                self.driver.tap_location(x, y).await?;
                self.clear_text(element).await?;
            }
            ViewAction::ReplaceText { text } => {
                self.driver.tap_location(x, y).await?;
                self.clear_text(element).await?;
                if !text.is_empty() {
                    self.driver.type_text(text).await?;
                }
            }
            ViewAction::Swipe { direction } => self.swipe_within(&frame, *direction).await?,
            // Neither needs the element to be on screen first.
            ViewAction::ScrollTo | ViewAction::SwipeUntilSettled { .. } => {}
        }
        Ok(())
    }

    async fn clear_text(&self, element: &UIElement) -> Result<(), DriverError> {
        let len = element.value.as_deref().map_or(0, |v| v.chars().count());
        if len > 0 {
            self.driver.type_text(&BACKSPACE.repeat(len)).await?;
        }
        Ok(())
    }

    async fn swipe_within(&self, frame: &ElementFrame, direction: Direction) -> Result<(), DriverError> {
        let ((sx, sy), (ex, ey)) = direction.span();
        let (start_x, start_y) = frame.point_at(sx, sy);
        let (end_x, end_y) = frame.point_at(ex, ey);
        self.driver
            .swipe(start_x, start_y, end_x, end_y, Some(self.config.swipe_duration_secs))
            .await
    }

    /// Swipes the element's scroll container until the element is displayed
    /// and lies fully inside it.
    ///
    /// The container is the parent list for positional matchers and the
    /// window otherwise.
    async fn scroll_into_view(&self) -> Result<(), InteractionError> {
        let max_attempts = self.config.max_scroll_attempts;
        let container = self.matcher.container();

        for attempt in 0..=max_attempts {
            let roots = self.snapshot().await?;
            let tree = self.tree(&roots);
            let found = self.resolve(&self.matcher, &tree)?;
            let viewport = match container {
                Some(c) => self
                    .resolve(c, &tree)?
                    .and_then(|idx| tree.element(idx).frame),
                None => None,
            }
            .or_else(|| match found {
                Some(idx) => window_frame(&tree, idx),
                None => top_window_frame(&tree),
            });

            if let Some(idx) = found {
                let element = tree.element(idx);
                let inside = match (element.frame, viewport) {
                    (Some(f), Some(v)) => v.contains(&f),
                    _ => true,
                };
                if element.is_displayed() && inside {
                    debug!(attempt, "element scrolled into view");
                    return Ok(());
                }
            }
            if attempt == max_attempts {
                break;
            }

            let viewport = viewport.ok_or_else(|| {
                DriverError::CommandFailed("cannot scroll: container has no frame".to_string())
            })?;
            self.swipe_within(&viewport, Direction::Up).await?;
            tokio::time::sleep(self.config.poll_interval()).await;
        }

        Err(InteractionError::ScrollExhausted {
            matcher: self.matcher.to_string(),
            attempts: max_attempts,
        })
    }

    /// Swipes inside this element until two consecutive snapshots of it are
    /// identical, or `max_scroll_attempts` swipes have been made.
    async fn swipe_until_settled(&self, direction: Direction) -> Result<(), InteractionError> {
        let mut previous = self.element().await?;
        for swipes in 1..=self.config.max_scroll_attempts {
            let frame = previous.frame.ok_or_else(|| {
                DriverError::CommandFailed(format!("{} has no frame", previous.describe()))
            })?;
            self.swipe_within(&frame, direction).await?;
            tokio::time::sleep(self.config.poll_interval()).await;
            let current = self.element().await?;
            if current == previous {
                debug!(swipes, direction = direction.name(), "scroll settled");
                return Ok(());
            }
            previous = current;
        }
        debug!(direction = direction.name(), "scroll did not settle");
        Ok(())
    }

    /// Checks an assertion, retrying until it holds or the timeout elapses.
    pub async fn check(&self, assertion: ViewAssertion) -> Result<(), InteractionError> {
        let span = info_span!("check", assertion = assertion.name());
        async {
            let start = Instant::now();
            let result = self.check_inner(&assertion).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            debug!(elapsed_ms, success = result.is_ok(), "assertion complete");
            self.record(
                Step::Assertion { name: assertion.name().to_string() },
                &result,
                elapsed_ms,
            )
            .await;
            result
        }
        .instrument(span)
        .await
    }

    async fn check_inner(&self, assertion: &ViewAssertion) -> Result<(), InteractionError> {
        let start = Instant::now();
        let timeout = self.config.timeout();

        loop {
            let roots = self.snapshot().await?;
            let tree = self.tree(&roots);
            let found = self.resolve(&self.matcher, &tree)?;
            let detail = match assertion.evaluate(&tree, found) {
                Ok(()) => return Ok(()),
                Err(detail) => detail,
            };

            if start.elapsed() >= timeout {
                return Err(InteractionError::AssertionFailed {
                    assertion: assertion.to_string(),
                    matcher: self.matcher.to_string(),
                    detail,
                });
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    async fn record(&self, step: Step, result: &Result<(), InteractionError>, elapsed_ms: u64) {
        let outcome = match result {
            Ok(()) => StepResult::Success,
            Err(e) => StepResult::Failure(e.to_string()),
        };
        let mut entry = StepLog::new(step, self.matcher.to_string(), outcome, Some(elapsed_ms));
        if entry.is_failure() && self.config.screenshot_on_failure {
            match self.driver.screenshot().await {
                Ok(png) => {
                    entry = entry.with_screenshot(base64::engine::general_purpose::STANDARD.encode(png));
                }
                Err(e) => debug!(error = %e, "failure screenshot unavailable"),
            }
        }
        self.journal.record(entry);
    }
}

/// Frame of the window (tree root) holding `idx`.
fn window_frame(tree: &ElementTree<'_>, idx: usize) -> Option<ElementFrame> {
    let top = tree.ancestors(idx).last().unwrap_or(idx);
    tree.element(top).frame
}

/// Frame of the last window in the snapshot.
fn top_window_frame(tree: &ElementTree<'_>) -> Option<ElementFrame> {
    tree.indices()
        .filter(|&i| tree.node(i).parent.is_none())
        .last()
        .and_then(|i| tree.element(i).frame)
}
