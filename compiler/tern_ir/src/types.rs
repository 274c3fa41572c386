//! The optimistic type lattice.
//!
//! Types are ordered by weight: `Unknown < Boolean < Int < Long < Number`,
//! and every object type weighs more than every primitive. Object types
//! do not order among themselves; widening two different object types
//! yields `Object`.

use std::fmt;

/// Compile-time representation type of an expression or local slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// Not yet known; the bottom of the lattice.
    #[default]
    Unknown,
    Boolean,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// 64-bit float.
    Number,
    /// Lazily concatenated string; result of `+` on a string operand.
    CharSequence,
    String,
    Undefined,
    Object,
    /// Placeholder for an optimistic `+` whose operand types are pending.
    Undecided,
}

impl Type {
    const OBJECT_WEIGHT: u8 = 20;

    /// Position in the widening order.
    pub const fn weight(self) -> u8 {
        match self {
            Type::Unknown => 0,
            Type::Boolean => 1,
            Type::Int => 2,
            Type::Long => 3,
            Type::Number => 4,
            Type::CharSequence
            | Type::String
            | Type::Undefined
            | Type::Object
            | Type::Undecided => Self::OBJECT_WEIGHT,
        }
    }

    /// The wider of two types. Two distinct object types widen to `Object`.
    pub fn widest(a: Type, b: Type) -> Type {
        if a == b {
            return a;
        }
        if a.is_object() && b.is_object() {
            return Type::Object;
        }
        if a.weight() >= b.weight() {
            a
        } else {
            b
        }
    }

    /// The narrower of two types; ties keep `a`.
    pub fn narrowest(a: Type, b: Type) -> Type {
        if b.weight() < a.weight() {
            b
        } else {
            a
        }
    }

    /// Widening for values returned from either of two branches.
    ///
    /// Unlike [`Type::widest`], a boolean and a number do not merge into a
    /// number, nor a number and a string into a string: the value keeps its
    /// identity, so the result is `Object`.
    pub fn widest_return_type(a: Type, b: Type) -> Type {
        if a == Type::Unknown {
            return b;
        }
        if b == Type::Unknown {
            return a;
        }
        if a.is_boolean() != b.is_boolean() || a.is_numeric() != b.is_numeric() {
            return Type::Object;
        }
        Type::widest(a, b)
    }

    /// Booleans are carried as ints in arithmetic.
    pub fn boolean_to_int(self) -> Type {
        if self == Type::Boolean {
            Type::Int
        } else {
            self
        }
    }

    /// `undefined` is NaN in arithmetic.
    pub fn undefined_to_number(self) -> Type {
        if self == Type::Undefined {
            Type::Number
        } else {
            self
        }
    }

    /// Int, Long or Number.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Type::Int | Type::Long | Type::Number)
    }

    /// Int or Long.
    pub const fn is_integer(self) -> bool {
        matches!(self, Type::Int | Type::Long)
    }

    pub const fn is_boolean(self) -> bool {
        matches!(self, Type::Boolean)
    }

    pub const fn is_object(self) -> bool {
        self.weight() == Self::OBJECT_WEIGHT
    }

    /// String or lazily concatenated string.
    pub const fn is_string(self) -> bool {
        matches!(self, Type::String | Type::CharSequence)
    }

    pub const fn is_unknown(self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub const fn is_undecided(self) -> bool {
        matches!(self, Type::Undecided)
    }

    /// Number of local-variable slots a value of this type occupies.
    pub const fn slot_width(self) -> u32 {
        match self {
            Type::Unknown => 0,
            Type::Long | Type::Number => 2,
            _ => 1,
        }
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            Type::Unknown => "unknown",
            Type::Boolean => "boolean",
            Type::Int => "int",
            Type::Long => "long",
            Type::Number => "double",
            Type::CharSequence => "charseq",
            Type::String => "string",
            Type::Undefined => "undefined",
            Type::Object => "object",
            Type::Undecided => "undecided",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests;
