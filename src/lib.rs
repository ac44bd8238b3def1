//! This crate exposes a mutable, link-based Binary Search Tree (BST)
//! intended as a reusable ordered-container building block.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of this BST are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value (equal values go right on
//!    insertion).
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! The tree in this crate does **not** balance itself on every mutation - its
//! shape depends entirely on insertion order, and inserting already-sorted
//! data degenerates into a linked list of height `len - 1`. Balance is
//! restored only by an explicit call to [`linked::Tree::rebalance`], which
//! rebuilds a height-minimal tree from the sorted contents.

#![deny(missing_docs)]

pub mod error;
pub mod linked;
pub mod stack;


pub use error::Error;
