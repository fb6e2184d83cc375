//! # Tokens
//!
//! The scanner's output unit. Every [`Token`] carries the 1-based source
//! line it began on, which the parser and compiler thread through into
//! error messages.

/// A lexical token.
///
/// Identifier and string-literal payloads are scanned as raw bytes (capped
/// at 127) and lossily converted to UTF-8 once, here, so every later stage
/// works with ordinary `String`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Eq,
    Plus,
    Minus,
    Star,
    Slash,
    IntLit(i64),
    StrLit(String),
    Identifier(String),
    Function,
    Return,
    Var,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Token { kind, line }
    }

    /// Name used in diagnostics and error messages, mirroring the
    /// `lexer_token_type_to_str` table the scanner is modeled on.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            TokenKind::Eof => "EOF",
            TokenKind::LParen => "BRACKET_OPEN",
            TokenKind::RParen => "BRACKET_CLOSE",
            TokenKind::LBrace => "CURLY_OPEN",
            TokenKind::RBrace => "CURLY_CLOSE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Eq => "EQ_SIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::IntLit(_) => "INT_LITERAL",
            TokenKind::StrLit(_) => "STR_LITERAL",
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::Function => "FUNCTION",
            TokenKind::Return => "RETURN",
            TokenKind::Var => "VAR",
        }
    }
}
