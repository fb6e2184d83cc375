//! # Scanner
//!
//! Turns a half-open byte range `[begin, end)` into a lazy sequence of
//! [`Token`]s. The scanner is total over its input: it never fails, it
//! only ever returns `Eof` once the range is exhausted. Malformed bytes
//! are simply accepted as identifier bytes — there is no lexical error.
//!
//! Grounded on `examples/original_source/src/lexer.c`: single-character
//! punctuation dispatch, decimal digit accumulation (wrapping on overflow),
//! `"`-delimited strings copied into a fixed buffer, and a reserved
//! punctuation set bounding identifier runs.

use crate::token::{Token, TokenKind};

/// Payloads (identifiers, string literals) are truncated to this many
/// bytes, matching `silk`'s 128-byte scratch buffer (127 data bytes plus
/// the NUL the C implementation appends).
const MAX_PAYLOAD_BYTES: usize = 127;

/// Bytes that terminate an identifier run. Note this set intentionally
/// does *not* include `-` or `=` — neither does the original scanner's
/// `is_valid_identifier`, so `-`/`=` embedded inside an identifier-shaped
/// run do not split it. Preserved as observed behavior, not "fixed".
const RESERVED: &[u8] = b"(){};+*/.,";

pub struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Lexer { data, pos: 0, line: 1 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
        }
        Some(b)
    }

    /// Scan and return the next token, advancing past it.
    pub fn next(&mut self) -> Token {
        loop {
            match self.peek() {
                None => return Token::new(TokenKind::Eof, self.line),
                Some(b) if b.is_ascii_whitespace() => {
                    self.bump();
                    continue;
                }
                _ => break,
            }
        }

        let line = self.line;
        let b = self.peek().unwrap();

        if let Some(kind) = single_char_token(b) {
            self.pos += 1;
            return Token::new(kind, line);
        }

        if b.is_ascii_digit() {
            return self.scan_int(line);
        }

        if b == b'"' {
            return self.scan_string(line);
        }

        self.scan_identifier(line)
    }

    fn scan_int(&mut self, line: u32) -> Token {
        let mut num: i64 = 0;
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            // Overflow is implementation-defined wrap, per spec.
            num = num.wrapping_mul(10).wrapping_add((b - b'0') as i64);
            self.pos += 1;
        }
        Token::new(TokenKind::IntLit(num), line)
    }

    fn scan_string(&mut self, line: u32) -> Token {
        self.pos += 1; // opening '"'
        let mut buf = Vec::with_capacity(MAX_PAYLOAD_BYTES);
        while let Some(b) = self.peek() {
            if b == b'"' {
                break;
            }
            if buf.len() < MAX_PAYLOAD_BYTES {
                buf.push(b);
            }
            self.pos += 1;
        }
        if self.peek() == Some(b'"') {
            self.pos += 1;
        }
        Token::new(TokenKind::StrLit(String::from_utf8_lossy(&buf).into_owned()), line)
    }

    fn scan_identifier(&mut self, line: u32) -> Token {
        let mut buf = Vec::with_capacity(MAX_PAYLOAD_BYTES);
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || RESERVED.contains(&b) {
                break;
            }
            if buf.len() < MAX_PAYLOAD_BYTES {
                buf.push(b);
            }
            self.pos += 1;
        }
        let kind = match buf.as_slice() {
            b"function" => TokenKind::Function,
            b"return" => TokenKind::Return,
            b"var" => TokenKind::Var,
            _ => TokenKind::Identifier(String::from_utf8_lossy(&buf).into_owned()),
        };
        Token::new(kind, line)
    }
}

fn single_char_token(b: u8) -> Option<TokenKind> {
    Some(match b {
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b'{' => TokenKind::LBrace,
        b'}' => TokenKind::RBrace,
        b';' => TokenKind::Semicolon,
        b',' => TokenKind::Comma,
        b'=' => TokenKind::Eq,
        b'+' => TokenKind::Plus,
        b'-' => TokenKind::Minus,
        b'*' => TokenKind::Star,
        b'/' => TokenKind::Slash,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src.as_bytes());
        let mut out = Vec::new();
        loop {
            let tok = lexer.next();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn skips_whitespace_and_tracks_lines() {
        let mut lexer = Lexer::new(b"1\n2");
        let t1 = lexer.next();
        assert_eq!(t1.kind, TokenKind::IntLit(1));
        assert_eq!(t1.line, 1);
        let t2 = lexer.next();
        assert_eq!(t2.kind, TokenKind::IntLit(2));
        assert_eq!(t2.line, 2);
    }

    #[test]
    fn keywords_vs_identifiers() {
        assert_eq!(
            tokens("function return var foo"),
            vec![
                TokenKind::Function,
                TokenKind::Return,
                TokenKind::Var,
                TokenKind::Identifier("foo".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_literal_truncates_silently() {
        let long = "a".repeat(200);
        let src = format!("\"{}\"", long);
        let toks = tokens(&src);
        match &toks[0] {
            TokenKind::StrLit(s) => assert_eq!(s.len(), 127),
            other => panic!("expected StrLit, got {:?}", other),
        }
    }

    #[test]
    fn identifier_truncates_silently() {
        let long = "b".repeat(200);
        let toks = tokens(&long);
        match &toks[0] {
            TokenKind::Identifier(s) => assert_eq!(s.len(), 127),
            other => panic!("expected Identifier, got {:?}", other),
        }
    }

    #[test]
    fn unterminated_string_reaches_eof_gracefully() {
        let toks = tokens("\"abc");
        assert_eq!(toks[0], TokenKind::StrLit("abc".to_string()));
        assert_eq!(toks[1], TokenKind::Eof);
    }

    #[test]
    fn punctuation_and_operators() {
        assert_eq!(
            tokens("(){};,=+-*/"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Eq,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }
}
