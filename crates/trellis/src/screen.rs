//! Page objects.

use crate::context::Trellis;

/// A screen of the app under test, declared as a set of handles.
///
/// ```
/// use trellis::prelude::*;
///
/// struct LoginScreen {
///     email: TextField,
///     submit: View,
/// }
///
/// impl Screen for LoginScreen {
///     fn new(ctx: &Trellis) -> Self {
///         Self {
///             email: ctx.text_field(|b| b.with_id("email")),
///             submit: ctx.view(|b| b.with_type("Button").with_label("Log In")),
///         }
///     }
/// }
/// ```
pub trait Screen: Sized {
    fn new(ctx: &Trellis) -> Self;
}
