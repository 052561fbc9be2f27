//! Builder API for declaring transitions on record types.
//!
//! Declarations are plain values, typically kept in a `static` behind a
//! `LazyLock` or constructed once at start-up. Building checks their shape;
//! registration happens later, on first access.

pub mod declaration;
pub mod error;
pub mod transition;

pub use declaration::TransitionDeclaration;
pub use error::{BuildError, DeclarationViolation, LabelRole};
pub use transition::TransitionBuilder;

/// Start declaring a transition named `name` on record type `R`.
///
/// # Example
///
/// ```
/// use statefield::builder::transition;
///
/// struct Order {
///     status: String,
/// }
///
/// statefield::record_schema! {
///     Order {
///         status: State,
///     }
/// }
///
/// let cancel = transition::<Order, (), ()>("cancel")
///     .source(["placed", "paid"])
///     .target("cancelled")
///     .handler(|order: &mut Order, ()| order.status = "cancelled".to_string())
///     .build()
///     .unwrap();
///
/// assert_eq!(cancel.target(), "cancelled");
/// ```
pub fn transition<R, A, O>(name: impl Into<String>) -> TransitionBuilder<R, A, O> {
    TransitionBuilder::new(name)
}
