//! Token definitions for the manifest lexer

use crate::common::Span;
use logos::Logos;

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// All token kinds in a manifest
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")] // Skip whitespace
#[logos(skip r"#[^\n]*")] // Skip comments
pub enum TokenKind {
    // === Statements ===
    #[token("bitmap")]
    Bitmap,
    #[token("record")]
    Record,
    #[token("save")]
    Save,
    #[token("data_page")]
    DataPage,
    #[token("save_page")]
    SavePage,

    // === Bitmap options ===
    #[token("frames")]
    Frames,
    #[token("masked")]
    Masked,

    // === Literals ===
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| lex.slice().to_string())]
    HexLiteral(String),

    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    IntLiteral(String),

    /// Quoted path; the quotes are stripped
    #[regex(r#""[^"\n]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    StringLiteral(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// End of input
    Eof,
}

impl TokenKind {
    /// Check if this token starts a statement
    pub fn is_statement_start(&self) -> bool {
        matches!(
            self,
            TokenKind::Bitmap | TokenKind::Record | TokenKind::Save | TokenKind::DataPage | TokenKind::SavePage
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Bitmap => write!(f, "'bitmap'"),
            TokenKind::Record => write!(f, "'record'"),
            TokenKind::Save => write!(f, "'save'"),
            TokenKind::DataPage => write!(f, "'data_page'"),
            TokenKind::SavePage => write!(f, "'save_page'"),
            TokenKind::Frames => write!(f, "'frames'"),
            TokenKind::Masked => write!(f, "'masked'"),
            TokenKind::HexLiteral(s) | TokenKind::IntLiteral(s) => write!(f, "number {}", s),
            TokenKind::StringLiteral(s) => write!(f, "string \"{}\"", s),
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}
