//! Copy-on-write snapshot helper.
//!
//! # Responsibility
//! - Produce a new immutable value from a base value and a mutation recipe.
//! - Share every subtree the recipe does not touch with the base.
//!
//! # Invariants
//! - The base value is never modified.
//! - A failed recipe commits nothing; the base stays the only live value.
//! - Sharing is per `Arc` node: recipes reach nested data through
//!   `Arc::make_mut`, which clones a node only when it is still shared.

use std::sync::Arc;

/// Runs `recipe` against a writable draft of `base` and returns the result.
///
/// The draft starts as a shallow clone of `base`; nested `Arc` fields keep
/// pointing at the base's subtrees until the recipe calls `Arc::make_mut` on
/// them.
pub fn produce<T, E, F>(base: &Arc<T>, recipe: F) -> Result<Arc<T>, E>
where
    T: Clone,
    F: FnOnce(&mut T) -> Result<(), E>,
{
    let mut next = Arc::clone(base);
    recipe(Arc::make_mut(&mut next))?;
    Ok(next)
}
