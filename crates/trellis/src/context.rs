//! Entry point that hands out view handles.

use std::sync::Arc;

use trellis_core::config::TrellisConfig;
use trellis_core::driver::AutomationDriver;
use trellis_core::interaction::ViewInteraction;
use trellis_core::journal::Journal;
use trellis_core::matcher::ViewMatcher;
use trellis_core::root::RootMatcher;

use crate::builder::ViewBuilder;
use crate::list::{ItemRegistryBuilder, ListView};
use crate::screen::Screen;
use crate::view::{TextField, View};

/// Shared driver, config, journal and default root for one test.
///
/// Every handle created from the same context records into the same
/// [`Journal`].
#[derive(Clone)]
pub struct Trellis {
    driver: Arc<dyn AutomationDriver>,
    config: Arc<TrellisConfig>,
    journal: Journal,
    root: RootMatcher,
}

impl std::fmt::Debug for Trellis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trellis")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("steps", &self.journal.len())
            .finish()
    }
}

impl Trellis {
    /// Uses the config from `~/.trellis/config.json`, or defaults.
    pub fn new(driver: Arc<dyn AutomationDriver>) -> Self {
        Self {
            driver,
            config: Arc::new(TrellisConfig::load()),
            journal: Journal::new(),
            root: RootMatcher::default(),
        }
    }

    pub fn with_config(mut self, config: TrellisConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Root used by every handle created afterwards.
    pub fn with_root(mut self, root: RootMatcher) -> Self {
        self.root = root;
        self
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn config(&self) -> &TrellisConfig {
        &self.config
    }

    pub fn driver(&self) -> &Arc<dyn AutomationDriver> {
        &self.driver
    }

    pub fn interaction(&self, matcher: ViewMatcher) -> ViewInteraction {
        ViewInteraction::new(self.driver.clone(), matcher)
            .with_config(self.config.clone())
            .with_journal(self.journal.clone())
            .in_root(self.root.clone())
    }

    pub fn view<F>(&self, f: F) -> View
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        View::new(self.interaction(ViewBuilder::from_fn(f)))
    }

    pub fn text_field<F>(&self, f: F) -> TextField
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
    {
        TextField::new(self.interaction(ViewBuilder::from_fn(f)))
    }

    pub fn list<F, R>(&self, f: F, items: R) -> ListView
    where
        F: FnOnce(ViewBuilder) -> ViewBuilder,
        R: FnOnce(ItemRegistryBuilder) -> ItemRegistryBuilder,
    {
        ListView::new(self.interaction(ViewBuilder::from_fn(f)), items)
    }

    pub fn on<S: Screen>(&self) -> S {
        S::new(self)
    }
}
