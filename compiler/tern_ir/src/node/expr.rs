//! Expression node payloads.

use std::rc::Rc;

use super::flags::{BaseFlags, CallFlags, FunctionFlags, IdentFlags};
use super::NodeId;
use crate::{BinaryOp, LocalVariableConversion, Module, Name, SymbolId, Type, UnaryOp};

/// Optimistic typing state of an expression that may be computed at a
/// narrower type than its pessimistic one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Optimistic {
    /// Type speculated by the optimistic pass; `None` until assigned.
    pub ty: Option<Type>,
    /// Deoptimization point id; [`Optimistic::INVALID_PROGRAM_POINT`] if none.
    pub program_point: i32,
}

impl Optimistic {
    pub const INVALID_PROGRAM_POINT: i32 = -1;

    pub const NONE: Optimistic = Optimistic {
        ty: None,
        program_point: Self::INVALID_PROGRAM_POINT,
    };

    pub const fn has_program_point(self) -> bool {
        self.program_point != Self::INVALID_PROGRAM_POINT
    }
}

impl Default for Optimistic {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentNode {
    pub name: Name,
    pub symbol: Option<SymbolId>,
    pub flags: IdentFlags,
    pub optimistic: Optimistic,
    pub conversion: Option<LocalVariableConversion>,
}

/// Literal value. Numbers are stored as bits to keep `Eq`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralValue {
    Null,
    Undefined,
    Boolean(bool),
    Int(i32),
    Long(i64),
    /// IEEE-754 bits of a double.
    Number(u64),
    String(Name),
    Regex { pattern: Name, flags: Name },
}

impl LiteralValue {
    pub fn number(value: f64) -> Self {
        LiteralValue::Number(value.to_bits())
    }

    pub fn as_number(self) -> Option<f64> {
        match self {
            LiteralValue::Number(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    pub const fn ty(self) -> Type {
        match self {
            LiteralValue::Null | LiteralValue::Regex { .. } => Type::Object,
            LiteralValue::Undefined => Type::Undefined,
            LiteralValue::Boolean(_) => Type::Boolean,
            LiteralValue::Int(_) => Type::Int,
            LiteralValue::Long(_) => Type::Long,
            LiteralValue::Number(_) => Type::Number,
            LiteralValue::String(_) => Type::String,
        }
    }
}

/// Array literal. `None` elements are holes (`[1, , 3]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayLiteralNode {
    pub elements: Vec<Option<NodeId>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectNode {
    pub properties: Vec<NodeId>,
}

/// One property of an object literal or class body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyNode {
    pub key: NodeId,
    pub value: Option<NodeId>,
    pub getter: Option<NodeId>,
    pub setter: Option<NodeId>,
    pub is_static: bool,
    pub computed: bool,
}

/// Template literal: the cooked strings and substitutions interleaved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateLiteralNode {
    pub exprs: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryNode {
    pub op: BinaryOp,
    pub lhs: NodeId,
    pub rhs: NodeId,
    pub optimistic: Optimistic,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryNode {
    pub op: UnaryOp,
    pub expression: NodeId,
    pub optimistic: Optimistic,
}

/// `base.property`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessNode {
    pub base: NodeId,
    pub property: Name,
    pub flags: BaseFlags,
    pub optimistic: Optimistic,
}

/// `base[index]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexNode {
    pub base: NodeId,
    pub index: NodeId,
    pub flags: BaseFlags,
    pub optimistic: Optimistic,
}

/// Extra arguments of a direct `eval` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalArgs {
    pub args: Vec<NodeId>,
    /// The caller's `this`; always an `Ident`.
    pub this: NodeId,
    /// Source location reported for the evaluated code.
    pub location: Name,
    pub strict: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallNode {
    pub function: NodeId,
    pub args: Vec<NodeId>,
    pub eval_args: Option<EvalArgs>,
    pub flags: CallFlags,
    pub optimistic: Optimistic,
}

/// `test ? true_expr : false_expr`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TernaryNode {
    pub test: NodeId,
    pub true_expr: NodeId,
    pub false_expr: NodeId,
}

/// Wraps an expression that ends a control-flow path, such as a loop test
/// or a ternary branch, so it can carry join conversions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinPredecessorNode {
    pub expression: Option<NodeId>,
    pub conversion: Option<LocalVariableConversion>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionKind {
    /// Top-level program.
    Script,
    Normal,
    Arrow,
    Getter,
    Setter,
    Generator,
    Module,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionNode {
    pub kind: FunctionKind,
    /// Name binding of a named function; an `Ident`.
    pub ident: Option<NodeId>,
    pub name: Name,
    pub params: Vec<NodeId>,
    /// Body `Block`.
    pub body: NodeId,
    pub flags: FunctionFlags,
    pub return_type: Type,
    /// Import/export records of a module function.
    pub module: Option<Rc<Module>>,
}
