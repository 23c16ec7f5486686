//! Static block nesting.
//!
//! The compiler records every function, loop, try, and plain block it
//! enters in a [`ScopeTree`]. The tree answers the compile-time questions
//! about control flow: whether a `break` has a loop to leave, whether a
//! `return` has a function to return from. At run time each activation of
//! a block gets its own [`Frame`](crate::Frame) tagged with the block's id.

use std::fmt;

/// Index of a block in its [`ScopeTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);

impl BlockId {
    /// The synthetic `main` function wrapping the whole program.
    pub const ROOT: BlockId = BlockId(0);

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `{ ... }`, `if` branches, `catch` handlers.
    Plain,
    /// A function body, including the synthetic `main`.
    Function,
    /// `while` and `for`.
    Loop,
    /// The protected part of `try`.
    Try,
}

impl BlockKind {
    pub const fn name(self) -> &'static str {
        match self {
            BlockKind::Plain => "block",
            BlockKind::Function => "function",
            BlockKind::Loop => "loop",
            BlockKind::Try => "try",
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    kind: BlockKind,
    parent: Option<BlockId>,
}

/// Arena of blocks with parent links.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    nodes: Vec<Node>,
}

impl ScopeTree {
    /// A tree holding only the root function.
    pub fn new() -> Self {
        ScopeTree {
            nodes: vec![Node {
                kind: BlockKind::Function,
                parent: None,
            }],
        }
    }

    fn push(&mut self, kind: BlockKind, parent: BlockId) -> BlockId {
        let id = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
        });
        BlockId(id)
    }

    pub fn kind(&self, id: BlockId) -> Option<BlockKind> {
        self.nodes.get(id.index()).map(|node| node.kind)
    }

    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.nodes.get(id.index()).and_then(|node| node.parent)
    }

    /// Blocks from `id` up to the root, `id` first.
    pub fn ancestors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        std::iter::successors(Some(id), |&id| self.parent(id))
    }

    /// Nearest enclosing function, `id` included.
    pub fn enclosing_function(&self, id: BlockId) -> BlockId {
        self.ancestors(id)
            .find(|&b| self.kind(b) == Some(BlockKind::Function))
            .unwrap_or(BlockId::ROOT)
    }

    /// True if a loop encloses `id` without a function boundary in
    /// between.
    pub fn in_loop(&self, id: BlockId) -> bool {
        for block in self.ancestors(id) {
            match self.kind(block) {
                Some(BlockKind::Loop) => return true,
                Some(BlockKind::Function) | None => return false,
                Some(BlockKind::Plain | BlockKind::Try) => {}
            }
        }
        false
    }

    /// True if `id` sits inside a real function rather than `main`.
    pub fn in_function(&self, id: BlockId) -> bool {
        self.enclosing_function(id) != BlockId::ROOT
    }

    /// Every block in creation order, starting with the root.
    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.nodes.len()).filter_map(|i| u32::try_from(i).ok().map(BlockId))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        ScopeTree::new()
    }
}

/// Cursor into a [`ScopeTree`] under construction.
pub struct BlockBuilder {
    tree: ScopeTree,
    current: BlockId,
}

impl BlockBuilder {
    pub fn new() -> Self {
        BlockBuilder {
            tree: ScopeTree::new(),
            current: BlockId::ROOT,
        }
    }

    pub fn current(&self) -> BlockId {
        self.current
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    /// Run `f` inside a fresh child block of the given kind, passing the
    /// new block's id. The builder returns to the parent afterwards, even
    /// when `f` fails.
    pub fn with_block<R>(&mut self, kind: BlockKind, f: impl FnOnce(&mut Self, BlockId) -> R) -> R {
        let parent = self.current;
        let id = self.tree.push(kind, parent);
        self.current = id;
        let result = f(self, id);
        self.current = parent;
        result
    }

    pub fn in_loop(&self) -> bool {
        self.tree.in_loop(self.current)
    }

    pub fn in_function(&self) -> bool {
        self.tree.in_function(self.current)
    }

    pub fn finish(self) -> ScopeTree {
        self.tree
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        BlockBuilder::new()
    }
}

#[cfg(test)]
mod tests;
