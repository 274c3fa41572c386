//! Binary and unary operators.

/// Binary operators, including assignments and the comma forms.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    /// `>>`, arithmetic shift.
    Sar,
    /// `>>>`, logical shift.
    Shr,

    // Logical
    And,
    Or,

    // Comparison
    Eq,
    Ne,
    EqStrict,
    NeStrict,
    Lt,
    Le,
    Gt,
    Ge,

    // Relational
    In,
    Instanceof,

    // Assignment
    Assign,
    AssignAdd,
    AssignSub,
    AssignMul,
    AssignDiv,
    AssignMod,
    AssignBitAnd,
    AssignBitOr,
    AssignBitXor,
    AssignShl,
    AssignSar,
    AssignShr,

    /// Comma whose value is the left operand.
    CommaLeft,
    /// Comma whose value is the right operand.
    CommaRight,
}

impl BinaryOp {
    /// Source-level spelling.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Sar => ">>",
            Self::Shr => ">>>",
            Self::And => "&&",
            Self::Or => "||",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::EqStrict => "===",
            Self::NeStrict => "!==",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::In => "in",
            Self::Instanceof => "instanceof",
            Self::Assign => "=",
            Self::AssignAdd => "+=",
            Self::AssignSub => "-=",
            Self::AssignMul => "*=",
            Self::AssignDiv => "/=",
            Self::AssignMod => "%=",
            Self::AssignBitAnd => "&=",
            Self::AssignBitOr => "|=",
            Self::AssignBitXor => "^=",
            Self::AssignShl => "<<=",
            Self::AssignSar => ">>=",
            Self::AssignShr => ">>>=",
            Self::CommaLeft | Self::CommaRight => ",",
        }
    }

    /// `=` or a compound assignment.
    pub const fn is_assignment(self) -> bool {
        matches!(self, Self::Assign) || self.is_self_modifying()
    }

    /// Compound assignment: reads and writes its left operand.
    pub const fn is_self_modifying(self) -> bool {
        self.compound_operator().is_some()
    }

    /// Arithmetic operator a compound assignment applies.
    pub const fn compound_operator(self) -> Option<BinaryOp> {
        Some(match self {
            Self::AssignAdd => Self::Add,
            Self::AssignSub => Self::Sub,
            Self::AssignMul => Self::Mul,
            Self::AssignDiv => Self::Div,
            Self::AssignMod => Self::Mod,
            Self::AssignBitAnd => Self::BitAnd,
            Self::AssignBitOr => Self::BitOr,
            Self::AssignBitXor => Self::BitXor,
            Self::AssignShl => Self::Shl,
            Self::AssignSar => Self::Sar,
            Self::AssignShr => Self::Shr,
            _ => return None,
        })
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::Ne
                | Self::EqStrict
                | Self::NeStrict
                | Self::Lt
                | Self::Le
                | Self::Gt
                | Self::Ge
        )
    }

    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Result may exceed 32-bit int range for int operands.
    pub const fn can_overflow(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Mul
                | Self::Div
                | Self::Mod
                | Self::Shr
                | Self::AssignAdd
                | Self::AssignSub
                | Self::AssignMul
                | Self::AssignDiv
                | Self::AssignMod
                | Self::AssignShr
        )
    }
}

/// Unary operators, including increments and `new`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// `+x`
    Pos,
    /// `-x`
    Neg,
    Not,
    BitNot,
    Typeof,
    Void,
    Delete,
    IncPrefix,
    DecPrefix,
    IncPostfix,
    DecPostfix,
    New,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Pos => "+",
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Typeof => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
            Self::IncPrefix | Self::IncPostfix => "++",
            Self::DecPrefix | Self::DecPostfix => "--",
            Self::New => "new",
        }
    }

    /// Increment or decrement: reads and writes its operand.
    pub const fn is_self_modifying(self) -> bool {
        matches!(
            self,
            Self::IncPrefix | Self::DecPrefix | Self::IncPostfix | Self::DecPostfix
        )
    }

    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::IncPostfix | Self::DecPostfix)
    }

    /// Result may exceed 32-bit int range for an int operand.
    pub const fn can_overflow(self) -> bool {
        matches!(self, Self::Pos | Self::Neg) || self.is_self_modifying()
    }
}
