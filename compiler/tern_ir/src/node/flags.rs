//! Per-node flag sets.
//!
//! Lexical-context frames accumulate flags as raw `u32` bits; see
//! [`NodeArena::apply_frame_flags`](crate::NodeArena::apply_frame_flags)
//! for how they land on Block, Function and For nodes.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct BlockFlags: u32 {
        /// Needs a scope object at runtime.
        const NEEDS_SCOPE = 1 << 0;
        /// Control flow never falls off the end.
        const IS_TERMINAL = 1 << 1;
        /// Program-level block.
        const IS_GLOBAL_SCOPE = 1 << 2;
        /// Compiler-generated.
        const IS_SYNTHETIC = 1 << 3;
        /// Body block of a function.
        const IS_BODY = 1 << 4;
        /// Holds parameter initialisation of a function with default or
        /// destructured parameters.
        const IS_PARAMETER_BLOCK = 1 << 5;
        /// Wraps a switch to scope its `let` declarations.
        const IS_SWITCH_BLOCK = 1 << 6;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FunctionFlags: u32 {
        const IS_ANONYMOUS = 1 << 0;
        /// Function declaration rather than expression.
        const IS_DECLARED = 1 << 1;
        const IS_STRICT = 1 << 2;
        const USES_ARGUMENTS = 1 << 3;
        /// Body was split into separately compiled pieces.
        const IS_SPLIT = 1 << 4;
        /// Contains a direct `eval` call.
        const HAS_EVAL = 1 << 5;
        /// A nested function contains a direct `eval` call.
        const HAS_NESTED_EVAL = 1 << 6;
        /// Some block of this function needs a scope object.
        const HAS_SCOPE_BLOCK = 1 << 7;
        /// Declares a parameter or variable named `arguments`.
        const DEFINES_ARGUMENTS = 1 << 8;
        const USES_ANCESTOR_SCOPE = 1 << 9;
        const HAS_FUNCTION_DECLARATIONS = 1 << 10;
        /// Top-level script function.
        const IS_PROGRAM = 1 << 11;
        const USES_SELF_SYMBOL = 1 << 12;
        const USES_THIS = 1 << 13;
        /// Nested inside `with` or a function with eval.
        const IN_DYNAMIC_CONTEXT = 1 << 14;
        const NEEDS_PARENT_SCOPE = 1 << 15;
        const IS_ARROW = 1 << 16;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ForFlags: u32 {
        const IS_FOR_IN = 1 << 0;
        const IS_FOR_EACH = 1 << 1;
        const IS_FOR_OF = 1 << 2;
        /// Loop head declares a `let`; each iteration gets a fresh scope.
        const PER_ITERATION_SCOPE = 1 << 3;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct IdentFlags: u32 {
        /// Name in property position (`o.name`, `{name: v}`).
        const PROPERTY_NAME = 1 << 0;
        /// The variable is initialised by this occurrence.
        const INITIALIZED_HERE = 1 << 1;
        /// Names a function.
        const FUNCTION = 1 << 2;
        /// Reserved word in strict mode.
        const FUTURESTRICT_NAME = 1 << 3;
        const IS_DECLARED_HERE = 1 << 4;
        /// Value is never read.
        const IS_DEAD = 1 << 5;
        const DIRECT_SUPER = 1 << 6;
        const REST_PARAMETER = 1 << 7;
        const PROTO_PROPERTY = 1 << 8;
        const DEFAULT_PARAMETER = 1 << 9;
        const DESTRUCTURED_PARAMETER = 1 << 10;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct VarFlags: u32 {
        const IS_LET = 1 << 0;
        const IS_CONST = 1 << 1;
        /// Hoisted function declaration.
        const IS_FUNCTION_DECLARATION = 1 << 2;
        /// Last hoisted function declaration of its block.
        const IS_LAST_FUNCTION_DECLARATION = 1 << 3;
        const IS_EXPORT = 1 << 4;
    }
}

bitflags! {
    /// Flags of property and element access bases.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct BaseFlags: u32 {
        /// The access is the callee of a call.
        const IS_FUNCTION = 1 << 0;
        const IS_SUPER = 1 << 1;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CallFlags: u32 {
        const IS_NEW = 1 << 0;
        /// `f.apply(...)` rewritten into a plain call.
        const IS_APPLY_TO_CALL = 1 << 1;
        /// Direct `eval`.
        const IS_EVAL = 1 << 2;
    }
}
