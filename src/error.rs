//! The error type shared by the trees in this crate.
//!
//! Only preconditions violations are errors. Absence as a query *result*
//! (e.g. [`find`][crate::linked::Tree::find] on a missing item) is ordinary
//! control flow and modeled with `Option` instead.

/// Errors reported by tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The item handed to [`remove`][crate::linked::Tree::remove] is not in
    /// the tree. The tree is left untouched.
    #[error("item is not in the tree")]
    NotFound,
}
