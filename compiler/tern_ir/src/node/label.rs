//! Code generation labels owned by nodes.
//!
//! These are jump targets for the code generator, not source labels (see
//! `LabelNode`). Every copy of a node receives fresh label ids so that two
//! versions of one node never share a jump target within a traversal.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelKind {
    BlockEntry,
    BlockBreak,
    LoopContinue,
    LoopBreak,
    SwitchBreak,
    CaseEntry,
}

impl LabelKind {
    pub const fn prefix(self) -> &'static str {
        match self {
            LabelKind::BlockEntry => "block_entry",
            LabelKind::BlockBreak => "block_break",
            LabelKind::LoopContinue => "loop_continue",
            LabelKind::LoopBreak => "loop_break",
            LabelKind::SwitchBreak => "switch_break",
            LabelKind::CaseEntry => "case_entry",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub id: u32,
    pub kind: LabelKind,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.prefix(), self.id)
    }
}
