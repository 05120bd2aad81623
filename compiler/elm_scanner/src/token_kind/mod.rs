//! External token kinds and the per-call validity set.

use bitflags::bitflags;

/// Token kinds this scanner can emit.
///
/// Discriminants are the external symbol indices of the grammar's
/// `externals` list; the engine's `valid_symbols` array is indexed by them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TokenKind {
    /// End of a declaration inside the current section.
    EndDecl = 0,
    /// Start of an indented section; pushes its column.
    OpenSection = 1,
    /// End of the innermost section.
    EndSection = 2,
    /// `-` glued to its operand, as in `-x` or `-(f x)`.
    MinusWithoutTrailingWhitespace = 3,
    /// Body of a `[glsl| ... |]` shader literal.
    GlslContent = 4,
    /// Body of a `{- ... -}` block comment.
    BlockCommentContent = 5,
}

impl TokenKind {
    pub const COUNT: usize = 6;

    pub const ALL: [TokenKind; Self::COUNT] = [
        TokenKind::EndDecl,
        TokenKind::OpenSection,
        TokenKind::EndSection,
        TokenKind::MinusWithoutTrailingWhitespace,
        TokenKind::GlslContent,
        TokenKind::BlockCommentContent,
    ];

    /// External symbol index reported back to the engine.
    #[inline]
    pub const fn symbol(self) -> u16 {
        self as u16
    }

    pub fn from_symbol(symbol: u16) -> Option<Self> {
        Self::ALL.get(usize::from(symbol)).copied()
    }

    /// Single-kind validity set.
    #[inline]
    pub const fn flag(self) -> ValidSymbols {
        ValidSymbols::from_bits_truncate(1 << self as u8)
    }

    /// Name used in the grammar and in trace output.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::EndDecl => "virtual_end_decl",
            TokenKind::OpenSection => "virtual_open_section",
            TokenKind::EndSection => "virtual_end_section",
            TokenKind::MinusWithoutTrailingWhitespace => "minus_without_trailing_whitespace",
            TokenKind::GlslContent => "glsl_content",
            TokenKind::BlockCommentContent => "block_comment_content",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Token kinds the grammar accepts at the current position.
    ///
    /// Bit `n` corresponds to the [`TokenKind`] with symbol `n`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ValidSymbols: u8 {
        const END_DECL = 1 << 0;
        const OPEN_SECTION = 1 << 1;
        const END_SECTION = 1 << 2;
        const MINUS_WITHOUT_TRAILING_WHITESPACE = 1 << 3;
        const GLSL_CONTENT = 1 << 4;
        const BLOCK_COMMENT_CONTENT = 1 << 5;
    }
}

impl ValidSymbols {
    /// Build from the engine's `valid_symbols` array.
    ///
    /// Entries past the known kinds are ignored; missing entries count as
    /// not valid.
    pub fn from_slice(valid: &[bool]) -> Self {
        TokenKind::ALL
            .iter()
            .zip(valid)
            .filter(|&(_, &is_valid)| is_valid)
            .fold(Self::empty(), |set, (kind, _)| set | kind.flag())
    }

    #[inline]
    pub fn accepts(self, kind: TokenKind) -> bool {
        self.contains(kind.flag())
    }
}

impl From<TokenKind> for ValidSymbols {
    fn from(kind: TokenKind) -> Self {
        kind.flag()
    }
}

impl FromIterator<TokenKind> for ValidSymbols {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | kind.flag())
    }
}
