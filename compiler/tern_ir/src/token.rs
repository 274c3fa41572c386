//! Packed token descriptors and node position data.
//!
//! The parser hands every node a `Token` encoding the token kind, the
//! source position and the token length. The IR never interprets the tag;
//! it only carries it through rewrites so downstream consumers can.

use std::fmt;

use crate::{IrError, IrResult};

/// Finish offset of a node with no source extent.
pub const NO_FINISH: u32 = 0;

/// Line number of a node with no source line.
pub const NO_LINE_NUMBER: i32 = -1;

/// Packed token: `position (32 bits) | length (24 bits) | tag (8 bits)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Token(u64);

impl Token {
    /// The synthetic no-token, carried by nodes the compiler invents.
    pub const NONE: Token = Token(0);

    /// Largest length the 24-bit length field can hold.
    pub const MAX_LENGTH: u32 = 0x00FF_FFFF;

    /// Pack a token, rejecting lengths that do not fit the length field.
    pub fn try_new(tag: u8, position: u32, length: u32) -> IrResult<Token> {
        if length > Self::MAX_LENGTH {
            return Err(IrError::TokenLengthOverflow { length });
        }
        Ok(Token(
            (u64::from(position) << 32) | (u64::from(length) << 8) | u64::from(tag),
        ))
    }

    /// Pack a token.
    ///
    /// # Panics
    /// Panics if `length` exceeds [`Token::MAX_LENGTH`].
    pub fn new(tag: u8, position: u32, length: u32) -> Token {
        match Self::try_new(tag, position, length) {
            Ok(token) => token,
            Err(e) => panic!("{e}"),
        }
    }

    /// Token kind as assigned by the parser.
    #[inline]
    pub const fn tag(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Source offset of the first character.
    #[inline]
    pub const fn position(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Length in characters.
    #[inline]
    pub const fn length(self) -> u32 {
        ((self.0 >> 8) & Self::MAX_LENGTH as u64) as u32
    }

    /// Offset one past the last character.
    #[inline]
    pub const fn span_end(self) -> u32 {
        self.position().saturating_add(self.length())
    }

    #[inline]
    pub const fn is_synthetic(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// Same position and length, different kind.
    #[inline]
    pub const fn with_tag(self, tag: u8) -> Token {
        Token((self.0 & !0xFF) | tag as u64)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            write!(f, "Token::NONE")
        } else {
            write!(
                f,
                "Token(tag={}, {}..{})",
                self.tag(),
                self.position(),
                self.span_end()
            )
        }
    }
}

/// Position data every node constructor takes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Origin {
    pub line: i32,
    pub token: Token,
    pub finish: u32,
}

impl Origin {
    /// Origin of compiler-generated nodes.
    pub const SYNTHETIC: Origin = Origin {
        line: NO_LINE_NUMBER,
        token: Token::NONE,
        finish: NO_FINISH,
    };

    pub const fn new(line: i32, token: Token, finish: u32) -> Self {
        Origin {
            line,
            token,
            finish,
        }
    }

    /// Origin spanning exactly `token`.
    pub const fn of_token(line: i32, token: Token) -> Self {
        Origin {
            line,
            token,
            finish: token.span_end(),
        }
    }
}
