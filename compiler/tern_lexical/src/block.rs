//! Statement accumulation for rewriting passes.
//!
//! While a block is open its statements are collected in a buffer: the
//! traversal appends each rebuilt statement after visiting it, and a pass
//! may inject statements of its own. When the block is popped the buffer
//! becomes the block's statement list.
//!
//! A statement appended while statement `s` is being visited lands before
//! `s`, since `s` joins the buffer only once its visit completes.

use tern_ir::{Ir, NodeId, NodeTag};

use crate::{ContextExtension, LexicalContext};

/// Customisation points of [`BlockStatements`].
pub trait BlockHooks {
    /// Filter the statements collected for a block about to be popped.
    fn pop_statements(&mut self, _ir: &mut Ir, statements: Vec<NodeId>) -> Vec<NodeId> {
        statements
    }

    /// Adjust a block after its statements were replaced.
    fn after_set_statements(&mut self, _ir: &mut Ir, block: NodeId) -> NodeId {
        block
    }
}

/// Keeps collected statements as they are.
#[derive(Copy, Clone, Debug, Default)]
pub struct KeepStatements;

impl BlockHooks for KeepStatements {}

/// One statement buffer per open block.
#[derive(Debug, Default)]
pub struct BlockStatements<H: BlockHooks = KeepStatements> {
    hooks: H,
    /// One entry per frame; `Some` for block frames.
    buffers: Vec<Option<Vec<NodeId>>>,
    last_statement: Option<NodeId>,
}

/// A lexical context collecting the statements of open blocks.
pub type BlockLexicalContext<H = KeepStatements> = LexicalContext<BlockStatements<H>>;

impl<H: BlockHooks> BlockStatements<H> {
    pub fn new(hooks: H) -> Self {
        BlockStatements {
            hooks,
            buffers: Vec::new(),
            last_statement: None,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    #[track_caller]
    fn innermost(&mut self) -> &mut Vec<NodeId> {
        match self.buffers.iter_mut().rev().find_map(Option::as_mut) {
            Some(buffer) => buffer,
            None => panic!("no block is open"),
        }
    }

    /// Add `statement` to the end of the innermost open block.
    ///
    /// # Panics
    /// If no block is open.
    #[track_caller]
    pub fn append_statement(&mut self, statement: NodeId) {
        self.innermost().push(statement);
        self.last_statement = Some(statement);
    }

    /// Add `statement` to the start of the innermost open block.
    ///
    /// # Panics
    /// If no block is open.
    #[track_caller]
    pub fn prepend_statement(&mut self, statement: NodeId) {
        self.innermost().insert(0, statement);
    }

    /// Add `statements`, in order, to the start of the innermost open block.
    ///
    /// # Panics
    /// If no block is open.
    #[track_caller]
    pub fn prepend_statements(&mut self, statements: impl IntoIterator<Item = NodeId>) {
        self.innermost().splice(0..0, statements);
    }

    /// Most recently appended statement of the innermost open block.
    pub fn last_statement(&self) -> Option<NodeId> {
        self.last_statement
    }

    fn innermost_last(&self) -> Option<NodeId> {
        self.buffers
            .iter()
            .rev()
            .find_map(Option::as_ref)
            .and_then(|buffer| buffer.last().copied())
    }
}

impl<H: BlockHooks> ContextExtension for BlockStatements<H> {
    fn on_push(&mut self, ir: &Ir, node: NodeId) {
        let is_block = ir.nodes.tag(node) == NodeTag::Block;
        self.buffers.push(is_block.then(Vec::new));
        if is_block {
            self.last_statement = None;
        }
    }

    fn on_statement(&mut self, statement: NodeId) {
        if let Some(Some(buffer)) = self.buffers.last_mut() {
            buffer.push(statement);
            self.last_statement = Some(statement);
        }
    }

    fn before_pop(&mut self, ir: &mut Ir, node: NodeId) -> NodeId {
        let Some(Some(statements)) = self.buffers.pop() else {
            return node;
        };
        if ir.nodes.tag(node) != NodeTag::Block {
            return node;
        }
        let statements = self.hooks.pop_statements(ir, statements);
        let block = ir.nodes.set_block_statements(node, statements);
        self.hooks.after_set_statements(ir, block)
    }

    fn after_pop(&mut self, _ir: &Ir, _node: NodeId) {
        self.last_statement = self.innermost_last();
    }
}

impl BlockLexicalContext {
    pub fn with_blocks(ir: Ir) -> Self {
        Self::with_extension(ir, BlockStatements::default())
    }
}

impl<H: BlockHooks> BlockLexicalContext<H> {
    pub fn with_hooks(ir: Ir, hooks: H) -> Self {
        Self::with_extension(ir, BlockStatements::new(hooks))
    }

    /// See [`BlockStatements::append_statement`].
    #[track_caller]
    pub fn append_statement(&mut self, statement: NodeId) {
        self.extension_mut().append_statement(statement);
    }

    /// See [`BlockStatements::prepend_statement`].
    #[track_caller]
    pub fn prepend_statement(&mut self, statement: NodeId) {
        self.extension_mut().prepend_statement(statement);
    }

    /// See [`BlockStatements::prepend_statements`].
    #[track_caller]
    pub fn prepend_statements(&mut self, statements: impl IntoIterator<Item = NodeId>) {
        self.extension_mut().prepend_statements(statements);
    }

    pub fn last_statement(&self) -> Option<NodeId> {
        self.extension().last_statement()
    }
}
