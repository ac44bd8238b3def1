//! A mutable, link-based BST. Every node is exclusively owned by its parent
//! link (or by the tree's root handle), so splicing during deletion and
//! rebuilding transfer ownership instead of aliasing.
//!
//! The tree never balances itself on mutation. `add` hangs the new node off
//! the first empty link it reaches, so the shape - and every `O(height)`
//! bound - depends entirely on insertion order. [`Tree::rebalance`] rebuilds
//! a height-minimal tree from the sorted contents on demand.
//!
//! # Examples
//!
//! ```
//! use bstree::linked::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! assert_eq!(tree.find(&1), Some(&1));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing a node returns its value.
//! let removed = tree.remove(&1);
//!
//! assert_eq!(removed, Ok(1));
//! assert_eq!(tree.find(&1), None);
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::vec;

use crate::error::Error;
use crate::stack::Stack;

type Link<T> = Option<Box<Node<T>>>;

/// A single tree cell: a stored value and owned links to two optional
/// children. Everything smaller hangs to the left, everything
/// greater-or-equal to the right.
#[derive(Clone, Debug)]
struct Node<T> {
    data: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            left: None,
            right: None,
        }
    }
}

/// A mutable Binary Search Tree storing totally ordered items.
///
/// Items only need to satisfy `Ord` for the operations that navigate the
/// tree; constructing an empty tree or asking for its size requires nothing
/// of `T`.
#[derive(Clone, Debug)]
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        Self::drop_subtree(self.root.take());
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of items stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Potentially finds the stored item equal to the given one. If no node
    /// matches, `None` is returned.
    ///
    /// Searching never mutates or allocates, so unlike a splay tree repeated
    /// `find` calls always return the same answer.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match item.cmp(&node.data) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.data),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Returns `true` if an equal item is stored in the tree.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Adds the item to the tree, attaching a new leaf at the first empty
    /// link on the item's search path. Equal items go right, so `add` always
    /// grows the tree by one node - it never overwrites.
    ///
    /// No rebalancing happens here: adding already-sorted input produces a
    /// degenerate chain of height `len - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(2);
    /// tree.add(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if item < node.data {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(Node::new(item)));
        self.len += 1;
    }

    /// Removes the node holding an item equal to the given one and returns
    /// the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such item is stored; the tree is
    /// left untouched in that case. Callers are expected to have verified
    /// presence, or to treat the error as the contract.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    /// use bstree::Error;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.remove(&1), Ok(1));
    /// assert_eq!(tree.remove(&1), Err(Error::NotFound));
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T, Error>
    where
        T: Ord,
    {
        let removed = Self::remove_below(&mut self.root, item)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Walks down from `link` to the slot holding an item equal to `item`
    /// and splices it out. Iterative, so a degenerate chain costs no call
    /// stack.
    fn remove_below(mut link: &mut Link<T>, item: &T) -> Result<T, Error>
    where
        T: Ord,
    {
        loop {
            // Peek with a shared borrow first; the equal case passes the
            // link itself to `splice_out`.
            let ordering = match link.as_deref() {
                None => return Err(Error::NotFound),
                Some(node) => item.cmp(&node.data),
            };
            if ordering == Ordering::Equal {
                return Ok(Self::splice_out(link));
            }
            let node = link.as_deref_mut().expect("the link was occupied above");
            link = match ordering {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }
    }

    /// Detaches the node in `link` and returns its value. With zero or one
    /// child the node's only child (if any) takes over the vacated link.
    /// With two children the largest value of the left subtree is lifted
    /// into the node and the donor is spliced out of its old spot instead,
    /// so both subtrees stay attached.
    fn splice_out(link: &mut Link<T>) -> T {
        let mut node = link.take().expect("splice_out targets an occupied link");
        match (node.left.take(), node.right.take()) {
            (None, None) => node.data,
            (Some(child), None) | (None, Some(child)) => {
                *link = Some(child);
                node.data
            }
            (left @ Some(_), right @ Some(_)) => {
                node.left = left;
                node.right = right;
                let lifted = Self::detach_largest(&mut node.left);
                let removed = mem::replace(&mut node.data, lifted);
                *link = Some(node);
                removed
            }
        }
    }

    /// Removes the largest node reachable from `link` and returns its value.
    /// The largest node is the rightmost one, so it has no right child and
    /// its left child takes its place.
    fn detach_largest(mut link: &mut Link<T>) -> T {
        while link.as_ref().map_or(false, |node| node.right.is_some()) {
            link = &mut link.as_mut().expect("checked to be occupied above").right;
        }
        let node = link.take().expect("a two-child node has a left subtree");
        *link = node.left;
        node.data
    }

    /// If an equal item is stored, overwrites it in place with `new_item`
    /// and returns the old value; otherwise returns `None`. Navigation
    /// compares against the values currently stored, never `new_item`.
    ///
    /// The tree is **not** restructured and the replacement is **not**
    /// checked against the node's neighbors. A `new_item` that doesn't
    /// preserve the old item's ordering relative to the rest of the tree
    /// silently breaks the search invariant: lookups and ordered queries
    /// misbehave until the value is replaced back or the tree is rebuilt.
    /// Keeping the order is the caller's responsibility.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let mut tree: Tree<i32> = [2, 1, 3].iter().copied().collect();
    ///
    /// assert_eq!(tree.replace(&3, 4), Some(3));
    /// assert_eq!(tree.replace(&3, 4), None);
    /// assert_eq!(tree.len(), 3);
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match item.cmp(&node.data) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Equal => return Some(mem::replace(&mut node.data, new_item)),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// Makes the tree empty, dropping every node.
    pub fn clear(&mut self) {
        Self::drop_subtree(self.root.take());
        self.len = 0;
    }

    /// Tears a subtree down without recursing, so dropping a degenerate
    /// chain can't blow the call stack the way nested `Box` drops would.
    fn drop_subtree(root: Link<T>) {
        let mut stack = Stack::new();
        if let Some(root) = root {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
            // `node` drops here with both children already detached.
        }
    }

    /// An iterator over the stored items in ascending order.
    ///
    /// The iterator is lazy - it only walks as far as it is driven - and a
    /// fresh one can be started at any time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let tree: Tree<i32> = [2, 3, 1].iter().copied().collect();
    /// let sorted: Vec<i32> = tree.in_order().copied().collect();
    ///
    /// assert_eq!(sorted, [1, 2, 3]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_, T> {
        InOrder::new(self.root.as_deref())
    }

    /// An iterator over the stored items in pre-order: each node is yielded
    /// before anything in its subtrees, and its left subtree is exhausted
    /// before its right. This is the tree's default iteration order (it is
    /// what `&tree` iterates in) and the first item yielded is always the
    /// root, which makes the physical shape of the tree observable.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let tree: Tree<i32> = [2, 1, 3].iter().copied().collect();
    /// let visited: Vec<i32> = tree.iter().copied().collect();
    ///
    /// assert_eq!(visited, [2, 1, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    /// The height of the tree: the length of the longest root-to-leaf path.
    /// A lone node has height 0 and the empty tree reports -1 by convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.add(1);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.add(2);
    /// tree.add(3);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack = Stack::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 0));
        }
        // Depth-first with an explicit stack, so a degenerate chain costs
        // no call stack.
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Whether the tree's height is close to the theoretical minimum for its
    /// size, using the heuristic threshold `height < 2 * log2(len + 1) - 1`.
    ///
    /// This is deliberately looser than an AVL or red-black balance
    /// criterion; small degenerate trees can still pass it. The empty tree
    /// reports `false` (`-1 < -1` does not hold).
    pub fn is_balanced(&self) -> bool {
        let threshold = 2.0 * (self.len as f64 + 1.0).log2() - 1.0;
        (self.height() as f64) < threshold
    }

    /// The stored items `v` satisfying `low <= v <= high`, in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let tree: Tree<i32> = [5, 3, 8, 1, 4, 7, 9].iter().copied().collect();
    ///
    /// assert_eq!(tree.range_find(&3, &8), [&3, &4, &5, &7, &8]);
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        self.in_order()
            .skip_while(|item| *item < low)
            .take_while(|item| *item <= high)
            .collect()
    }

    /// The smallest stored item strictly greater than the given one, or
    /// `None` if there is no such item. The query item itself need not be
    /// stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let tree: Tree<i32> = [2, 1, 3].iter().copied().collect();
    ///
    /// assert_eq!(tree.successor(&1), Some(&2));
    /// assert_eq!(tree.successor(&3), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.data > *item {
                best = Some(&node.data);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }
        best
    }

    /// The largest stored item strictly less than the given one, or `None`
    /// if there is no such item.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let tree: Tree<i32> = [2, 1, 3].iter().copied().collect();
    ///
    /// assert_eq!(tree.predecessor(&3), Some(&2));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.data < *item {
                best = Some(&node.data);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }
        best
    }

    /// Rebuilds the tree to the minimum possible height for its size. The
    /// stored items and `len` are unchanged.
    ///
    /// The current values are captured in ascending order and the tree is
    /// rebuilt around the lower-middle element of each sub-sequence, giving
    /// a height of `ceil(log2(len + 1)) - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::linked::Tree;
    ///
    /// let mut tree: Tree<i32> = (1..=5).collect();
    /// assert_eq!(tree.height(), 4);
    ///
    /// tree.rebalance();
    ///
    /// assert_eq!(tree.height(), 2);
    /// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
    /// ```
    pub fn rebalance(&mut self) {
        let mut items = Vec::with_capacity(self.len);
        Self::drain_in_order(self.root.take(), &mut items);
        let mut items = items.into_iter();
        self.root = Self::build_balanced(&mut items, self.len);
    }

    /// Consumes a subtree, pushing its values onto `out` in ascending order.
    fn drain_in_order(root: Link<T>, out: &mut Vec<T>) {
        let mut stack = Stack::new();
        let mut current = root;
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            match stack.pop() {
                Some(mut node) => {
                    current = node.right.take();
                    out.push(node.data);
                }
                None => return,
            }
        }
    }

    /// Builds a height-minimal subtree from the next `n` ascending items:
    /// the left subtree takes the `n / 2` values before the lower-middle
    /// element, the element itself becomes the subtree root, and the right
    /// subtree takes the rest.
    fn build_balanced(items: &mut vec::IntoIter<T>, n: usize) -> Link<T> {
        if n == 0 {
            return None;
        }
        let left = Self::build_balanced(items, n / 2);
        let data = items.next().expect("rebuild consumes exactly `n` items");
        let right = Self::build_balanced(items, n - n / 2 - 1);
        Some(Box::new(Node { data, left, right }))
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    /// Builds a tree by `add`ing each element in iteration order. The shape
    /// of the result depends on that order; sorted input degenerates.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    /// Renders the tree rotated 90 degrees counterclockwise: the right
    /// subtree comes first, each level adds a `"| "` prefix, and every
    /// value gets its own line.
    ///
    /// A reverse in-order walk driven by an explicit stack; deep chains
    /// cost no call stack.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Stack::new();
        let mut current = self.root.as_deref();
        let mut level = 0;
        loop {
            // Right goes on before the node so it prints first.
            while let Some(node) = current {
                stack.push((node, level));
                current = node.right.as_deref();
                level += 1;
            }
            match stack.pop() {
                Some((node, depth)) => {
                    for _ in 0..depth {
                        f.write_str("| ")?;
                    }
                    writeln!(f, "{}", node.data)?;
                    current = node.left.as_deref();
                    level = depth + 1;
                }
                None => return Ok(()),
            }
        }
    }
}

/// A lazy iterator over a [`Tree`]'s items in ascending order. Created by
/// [`Tree::in_order`].
#[derive(Debug)]
pub struct InOrder<'a, T> {
    spine: Vec<&'a Node<T>>,
}

impl<'a, T> InOrder<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self { spine: Vec::new() };
        iter.descend_left(root);
        iter
    }

    /// Stacks up the left spine below `node`; the deepest entry is the next
    /// item to yield.
    fn descend_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.spine.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.spine.pop()?;
        self.descend_left(node.right.as_deref());
        Some(&node.data)
    }
}

/// A pre-order iterator over a [`Tree`]'s items, driven by a
/// [`Stack`][crate::stack::Stack]. Created by [`Tree::iter`]. Each node is
/// yielded before its children, left subtree before right.
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Stack<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut stack = Stack::new();
        if let Some(root) = root {
            stack.push(root);
        }
        Self { stack }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so left comes off first.
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some(&node.data)
    }
}
