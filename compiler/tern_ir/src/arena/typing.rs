//! Expression typing and the optimistic protocol.
//!
//! Every expression has a *pessimistic* type, the widest type its value can
//! have, and operators also have a *most optimistic* type they may be
//! speculatively computed in. The conservative widening rules below decide
//! the pessimistic type of operators from their operand types.

use super::{NodeArena, wrong_kind};
use crate::node::{NodeId, NodeKind, Optimistic};
use crate::{BinaryOp, LocalVariableTypes, NoLocalTypes, Type, UnaryOp};

impl NodeArena {
    /// Optimistic state of identifiers, operators, accesses and calls.
    pub fn optimistic(&self, id: NodeId) -> Option<Optimistic> {
        match self.kind(id) {
            NodeKind::Ident(n) => Some(n.optimistic),
            NodeKind::Binary(n) => Some(n.optimistic),
            NodeKind::Unary(n) => Some(n.optimistic),
            NodeKind::Access(n) => Some(n.optimistic),
            NodeKind::Index(n) => Some(n.optimistic),
            NodeKind::Call(n) => Some(n.optimistic),
            _ => None,
        }
    }

    /// Type of the expression `id` given the current local variable types.
    ///
    /// Binary results are cached per node and local-type snapshot.
    #[track_caller]
    pub fn get_type(&self, id: NodeId, locals: &dyn LocalVariableTypes) -> Type {
        match self.kind(id) {
            NodeKind::Ident(ident) => ident.optimistic.ty.unwrap_or_else(|| {
                ident
                    .symbol
                    .and_then(|symbol| locals.type_of(symbol))
                    .unwrap_or(Type::Object)
            }),
            NodeKind::Literal(value) => value.ty(),
            NodeKind::ArrayLiteral(_)
            | NodeKind::Object(_)
            | NodeKind::Function(_)
            | NodeKind::Error => Type::Object,
            NodeKind::TemplateLiteral(_) => Type::String,
            NodeKind::Binary(_) => self.cached_binary_type(id, locals),
            NodeKind::Unary(unary) => {
                let widest = self.widest_operation_type(id, locals);
                match unary.optimistic.ty {
                    None => widest,
                    Some(ty) => Type::narrowest(
                        widest,
                        Type::widest(ty, self.get_type(unary.expression, locals)),
                    ),
                }
            }
            NodeKind::Access(n) => n.optimistic.ty.unwrap_or(Type::Object),
            NodeKind::Index(n) => n.optimistic.ty.unwrap_or(Type::Object),
            NodeKind::Call(n) => n.optimistic.ty.unwrap_or(Type::Object),
            NodeKind::Ternary(ternary) => Type::widest_return_type(
                self.get_type(ternary.true_expr, locals),
                self.get_type(ternary.false_expr, locals),
            ),
            NodeKind::JoinPredecessor(join) => join
                .expression
                .map_or(Type::Unknown, |expr| self.get_type(expr, locals)),
            other => wrong_kind("expression", id, other.tag()),
        }
    }

    fn cached_binary_type(&self, id: NodeId, locals: &dyn LocalVariableTypes) -> Type {
        let snapshot = locals.snapshot();
        if let Some(&(cached_snapshot, ty)) = self.type_cache.borrow().get(&id) {
            if cached_snapshot == snapshot {
                return ty;
            }
        }
        let ty = self.binary_type_uncached(id, locals);
        self.type_cache.borrow_mut().insert(id, (snapshot, ty));
        ty
    }

    fn binary_type_uncached(&self, id: NodeId, locals: &dyn LocalVariableTypes) -> Type {
        let binary = self.binary(id);
        let lhs = self.get_type(binary.lhs, locals);
        let rhs = self.get_type(binary.rhs, locals);
        match binary.optimistic.ty {
            Some(Type::Undecided) => Self::decide_add_type(lhs, rhs),
            None => self.widest_operation_type(id, locals),
            Some(ty) if matches!(binary.op, BinaryOp::Shr | BinaryOp::AssignShr) => ty,
            Some(ty) => Type::narrowest(
                self.widest_operation_type(id, locals),
                Type::widest(ty, Type::widest(lhs, rhs)),
            ),
        }
    }

    /// Widest type the operation can produce for the current operand types.
    ///
    /// For operators this is the conservative widening table; for
    /// everything else it is the expression's pessimistic type.
    pub fn widest_operation_type(&self, id: NodeId, locals: &dyn LocalVariableTypes) -> Type {
        match self.kind(id) {
            NodeKind::Binary(binary) => {
                let operand = |id| self.get_type(id, locals);
                binary_widest_type(binary.op, || operand(binary.lhs), || operand(binary.rhs))
            }
            NodeKind::Unary(unary) => {
                unary_widest_type(unary.op, self.get_type(unary.expression, locals))
            }
            NodeKind::Ident(_)
            | NodeKind::Access(_)
            | NodeKind::Index(_)
            | NodeKind::Call(_) => Type::Object,
            _ => self.get_type(id, locals),
        }
    }

    /// Narrowest type the expression may speculatively be computed in.
    pub fn most_optimistic_type(&self, id: NodeId) -> Type {
        match self.kind(id) {
            NodeKind::Binary(binary) => match binary.op {
                BinaryOp::Add | BinaryOp::AssignAdd => Type::Undecided,
                op if op.can_overflow() => Type::Int,
                _ => self.most_pessimistic_type(id),
            },
            NodeKind::Unary(unary) if unary.op.can_overflow() => Type::Int,
            NodeKind::Ident(_)
            | NodeKind::Access(_)
            | NodeKind::Index(_)
            | NodeKind::Call(_) => Type::Int,
            _ => self.most_pessimistic_type(id),
        }
    }

    /// Statically safe type, knowing nothing about local variable types.
    pub fn most_pessimistic_type(&self, id: NodeId) -> Type {
        self.widest_operation_type(id, &NoLocalTypes)
    }

    /// Speculating a narrower type than the pessimistic one is possible.
    pub fn can_be_optimistic(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::Ident(_)
            | NodeKind::Access(_)
            | NodeKind::Index(_)
            | NodeKind::Call(_) => true,
            NodeKind::Binary(_) | NodeKind::Unary(_) => {
                self.most_optimistic_type(id) != self.most_pessimistic_type(id)
            }
            _ => false,
        }
    }

    /// The expression is currently typed narrower than its operation can
    /// produce, so code generation needs a deoptimization guard.
    pub fn is_optimistic(&self, id: NodeId, locals: &dyn LocalVariableTypes) -> bool {
        self.can_be_optimistic(id)
            && self.get_type(id, locals).weight() < self.widest_operation_type(id, locals).weight()
    }

    /// Resolve the undecided optimistic type of a `+` once its operand
    /// types are known.
    ///
    /// # Panics
    /// Panics if the node's type is not undecided; every `+` is decided
    /// exactly once.
    #[track_caller]
    pub fn decide_type(&mut self, id: NodeId, locals: &dyn LocalVariableTypes) -> NodeId {
        let binary = self.binary(id);
        assert_eq!(
            binary.optimistic.ty,
            Some(Type::Undecided),
            "type of {id:?} is already decided"
        );
        let (lhs, rhs) = (binary.lhs, binary.rhs);
        let ty = Self::decide_add_type(self.get_type(lhs, locals), self.get_type(rhs, locals));
        self.set_optimistic_type(id, ty)
    }

    /// Optimistic `+`: strings concatenate lazily, otherwise the widest
    /// numeric operand wins. No conservative int to long widening here.
    fn decide_add_type(lhs: Type, rhs: Type) -> Type {
        if lhs.is_string() || rhs.is_string() {
            return Type::CharSequence;
        }
        let widest = Type::widest(numeric_promotion(lhs), numeric_promotion(rhs));
        if widest.is_object() {
            Type::Object
        } else {
            widest
        }
    }
}

fn numeric_promotion(ty: Type) -> Type {
    ty.boolean_to_int().undefined_to_number()
}

/// Conservative widening table for binary operators. Operand types are
/// computed lazily; most operators do not need them.
fn binary_widest_type(op: BinaryOp, lhs: impl Fn() -> Type, rhs: impl Fn() -> Type) -> Type {
    match op {
        BinaryOp::Add | BinaryOp::AssignAdd => {
            let (l, r) = (lhs(), rhs());
            if l == Type::Boolean && r == Type::Boolean {
                return Type::Int;
            }
            if l.is_string() || r.is_string() {
                return Type::CharSequence;
            }
            match Type::widest(numeric_promotion(l), numeric_promotion(r)) {
                Type::Int => Type::Long,
                widest if widest.is_numeric() => Type::Number,
                _ => Type::Object,
            }
        }
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::AssignSub | BinaryOp::AssignMul => {
            let (l, r) = (lhs(), rhs());
            if l == Type::Boolean && r == Type::Boolean {
                return Type::Int;
            }
            if Type::widest(l.boolean_to_int(), r.boolean_to_int()) == Type::Int {
                Type::Long
            } else {
                Type::Number
            }
        }
        // int % 0 and int / int are not ints.
        BinaryOp::Div | BinaryOp::Mod | BinaryOp::AssignDiv | BinaryOp::AssignMod => Type::Number,
        // `>>>` of a negative int exceeds the int range.
        BinaryOp::Shr | BinaryOp::AssignShr => Type::Long,
        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::Shl
        | BinaryOp::Sar
        | BinaryOp::AssignBitAnd
        | BinaryOp::AssignBitOr
        | BinaryOp::AssignBitXor
        | BinaryOp::AssignShl
        | BinaryOp::AssignSar => Type::Int,
        BinaryOp::Eq
        | BinaryOp::Ne
        | BinaryOp::EqStrict
        | BinaryOp::NeStrict
        | BinaryOp::Lt
        | BinaryOp::Le
        | BinaryOp::Gt
        | BinaryOp::Ge
        | BinaryOp::In
        | BinaryOp::Instanceof => Type::Boolean,
        BinaryOp::Assign | BinaryOp::CommaRight => rhs(),
        BinaryOp::CommaLeft => lhs(),
        BinaryOp::And | BinaryOp::Or => Type::widest_return_type(lhs(), rhs()),
    }
}

fn unary_widest_type(op: UnaryOp, operand: Type) -> Type {
    match op {
        UnaryOp::Pos => match operand {
            Type::Boolean => Type::Int,
            ty if ty.is_numeric() => ty,
            _ => Type::Number,
        },
        // -0 is not an int.
        UnaryOp::Neg => Type::Number,
        UnaryOp::Not | UnaryOp::Delete => Type::Boolean,
        UnaryOp::BitNot => Type::Int,
        UnaryOp::Typeof => Type::String,
        UnaryOp::Void => Type::Undefined,
        UnaryOp::New => Type::Object,
        UnaryOp::IncPrefix | UnaryOp::DecPrefix | UnaryOp::IncPostfix | UnaryOp::DecPostfix => {
            if operand.boolean_to_int() == Type::Int {
                Type::Long
            } else {
                Type::Number
            }
        }
    }
}

#[cfg(test)]
mod tests;
