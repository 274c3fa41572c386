//! Indented tree rendering for tests and debugging.
//!
//! One line per node: the kind followed by its salient fields, children
//! indented two spaces below it in traversal order.
//!
//! ```text
//! Block terminal
//!   Throw
//!     Literal 1
//! ```

use std::fmt::Write;

use crate::node::{BlockFlags, ForFlags, LiteralValue, NodeId, NodeKind, VarFlags};
use crate::Ir;

/// Render the tree rooted at `root`.
pub fn dump(ir: &Ir, root: NodeId) -> String {
    let mut out = String::new();
    dump_into(ir, root, 0, &mut out);
    out
}

fn dump_into(ir: &Ir, id: NodeId, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(ir.nodes.tag(id).name());
    let mut detail = String::new();
    // Writing into a String cannot fail.
    let _ = describe(ir, id, &mut detail);
    if !detail.is_empty() {
        out.push(' ');
        out.push_str(&detail);
    }
    out.push('\n');
    for child in ir.nodes.children(id) {
        dump_into(ir, child, depth + 1, out);
    }
}

fn describe(ir: &Ir, id: NodeId, s: &mut String) -> std::fmt::Result {
    match ir.nodes.kind(id) {
        NodeKind::Ident(ident) => {
            write!(s, "{}", ir.resolve(ident.name))?;
            if let Some(symbol) = ident.symbol {
                write!(s, " {symbol:?}")?;
            }
            match ident.optimistic.ty {
                Some(ty) => write!(s, " :{ty}"),
                None => Ok(()),
            }
        }
        NodeKind::Literal(value) => write_literal(ir, *value, s),
        NodeKind::Binary(binary) => {
            write!(s, "{}", binary.op.as_symbol())?;
            match binary.optimistic.ty {
                Some(ty) => write!(s, " :{ty}"),
                None => Ok(()),
            }
        }
        NodeKind::Unary(unary) => write!(s, "{}", unary.op.as_symbol()),
        NodeKind::Access(access) => write!(s, ".{}", ir.resolve(access.property)),
        NodeKind::Function(function) => {
            write!(s, "{} {:?}", ir.resolve(function.name), function.kind)
        }
        NodeKind::Block(block) => {
            let mut words = Vec::new();
            if block.flags.contains(BlockFlags::IS_TERMINAL) {
                words.push("terminal");
            }
            if block.flags.contains(BlockFlags::NEEDS_SCOPE) {
                words.push("scope");
            }
            if block.flags.contains(BlockFlags::IS_SYNTHETIC) {
                words.push("synthetic");
            }
            write!(s, "{}", words.join(" "))
        }
        NodeKind::Var(var) => {
            if var.flags.contains(VarFlags::IS_CONST) {
                write!(s, "const")
            } else if var.flags.contains(VarFlags::IS_LET) {
                write!(s, "let")
            } else {
                Ok(())
            }
        }
        NodeKind::For(for_node) => {
            if for_node.flags.contains(ForFlags::IS_FOR_IN) {
                write!(s, "in")
            } else if for_node.flags.contains(ForFlags::IS_FOR_OF) {
                write!(s, "of")
            } else {
                Ok(())
            }
        }
        NodeKind::While(while_node) if while_node.is_do_while => write!(s, "do"),
        NodeKind::Label(label) => write!(s, "{}", ir.resolve(label.label)),
        NodeKind::Break(jump) | NodeKind::Continue(jump) => match jump.label {
            Some(label) => write!(s, "{}", ir.resolve(label)),
            None => Ok(()),
        },
        NodeKind::JumpToInlinedFinally(jump) => write!(s, "{}", ir.resolve(jump.label)),
        NodeKind::Case(case) if case.test.is_none() => write!(s, "default"),
        NodeKind::Throw(throw) if throw.is_synthetic_rethrow => write!(s, "rethrow"),
        NodeKind::Split(split) => {
            write!(s, "{} unit {}", ir.resolve(split.name), split.compile_unit)
        }
        _ => Ok(()),
    }
}

fn write_literal(ir: &Ir, value: LiteralValue, s: &mut String) -> std::fmt::Result {
    match value {
        LiteralValue::Null => write!(s, "null"),
        LiteralValue::Undefined => write!(s, "undefined"),
        LiteralValue::Boolean(b) => write!(s, "{b}"),
        LiteralValue::Int(i) => write!(s, "{i}"),
        LiteralValue::Long(l) => write!(s, "{l}L"),
        LiteralValue::Number(bits) => write!(s, "{:?}", f64::from_bits(bits)),
        LiteralValue::String(name) => write!(s, "{:?}", ir.resolve(name)),
        LiteralValue::Regex { pattern, flags } => {
            write!(s, "/{}/{}", ir.resolve(pattern), ir.resolve(flags))
        }
    }
}
