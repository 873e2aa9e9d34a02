//! Errors raised by the DSL layer.

use thiserror::Error;
use trellis_core::interaction::InteractionError;

/// Errors from list and item accessors.
///
/// [`DslError::NotRegistered`] is the only failure this crate produces
/// itself. Everything else comes from the interaction layer unchanged.
#[derive(Error, Debug)]
pub enum DslError {
    /// A list accessor asked for an item type with no registered factory.
    #[error("Item type {type_name} is not registered for list {list}")]
    NotRegistered {
        type_name: &'static str,
        list: String,
    },

    #[error(transparent)]
    Interaction(#[from] InteractionError),
}
