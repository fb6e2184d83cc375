//! # Parser
//!
//! Recursive descent over the token stream with one token of lookahead.
//! The expression grammar is intentionally flat and right-associative —
//! `Expr := Primary (BinOp Expr)?` — with no operator precedence. Grounded
//! on `examples/original_source/src/parser.c`'s `unexpected()`-driven error
//! reporting and its scope/return/var statement dispatch.

use crate::ast::{Ast, AstKind, BinOp};
use crate::error::Error;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    filename: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8], filename: &'a str) -> Self {
        let mut lexer = Lexer::new(data);
        let current = lexer.next();
        Parser { lexer, current, filename }
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next();
        std::mem::replace(&mut self.current, next)
    }

    fn error(&self, wanted: &str) -> Error {
        Error::Parse {
            line: self.current.line,
            message: format!("Invalid token {}, expected {}", self.current.name(), wanted),
        }
    }

    fn expect(&mut self, kind: TokenKind, wanted: &str) -> Result<Token, Error> {
        if self.current.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.error(wanted))
        }
    }

    fn expect_identifier(&mut self) -> Result<(String, u32), Error> {
        match self.current.kind.clone() {
            TokenKind::Identifier(name) => {
                let line = self.current.line;
                self.advance();
                Ok((name, line))
            }
            _ => Err(self.error("IDENTIFIER")),
        }
    }

    /// Parse an entire program into a root `Scope` node.
    pub fn parse_program(&mut self) -> Result<Ast, Error> {
        let mut children = Vec::new();
        while self.current.kind != TokenKind::Eof {
            match &self.current.kind {
                TokenKind::Function => children.push(self.parse_function()?),
                TokenKind::Var => children.push(self.parse_var()?),
                TokenKind::Semicolon => {
                    self.advance();
                }
                _ => {
                    let expr = self.parse_expr()?;
                    self.expect(TokenKind::Semicolon, "SEMICOLON")?;
                    children.push(expr);
                }
            }
        }
        Ok(Ast::new(AstKind::Scope(children), 1))
    }

    fn parse_function(&mut self) -> Result<Ast, Error> {
        let line = self.current.line;
        self.advance(); // `function`
        let (name, _) = self.expect_identifier()?;
        self.expect(TokenKind::LParen, "BRACKET_OPEN")?;

        let mut params = Vec::new();
        while self.current.kind != TokenKind::RParen {
            let (param, _) = self.expect_identifier()?;
            params.push(param);
            if self.current.kind == TokenKind::Comma {
                self.advance();
            }
        }
        self.expect(TokenKind::RParen, "BRACKET_CLOSE")?;

        let body = self.parse_scope()?;
        Ok(Ast::new(
            AstKind::FunctionDecl { name, params, body: Box::new(body) },
            line,
        ))
    }

    fn parse_scope(&mut self) -> Result<Ast, Error> {
        let line = self.current.line;
        self.expect(TokenKind::LBrace, "CURLY_OPEN")?;
        let mut children = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::Return => children.push(self.parse_return()?),
                TokenKind::Var => children.push(self.parse_var()?),
                TokenKind::Identifier(_) | TokenKind::IntLit(_) | TokenKind::StrLit(_) => {
                    let expr = self.parse_expr()?;
                    self.expect(TokenKind::Semicolon, "SEMICOLON")?;
                    children.push(expr);
                }
                _ => return Err(self.error("CURLY_CLOSE")),
            }
        }
        Ok(Ast::new(AstKind::Scope(children), line))
    }

    fn parse_return(&mut self) -> Result<Ast, Error> {
        let line = self.current.line;
        self.advance(); // `return`
        if self.current.kind == TokenKind::Semicolon {
            self.advance();
            return Ok(Ast::new(AstKind::Return(None), line));
        }
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "SEMICOLON")?;
        Ok(Ast::new(AstKind::Return(Some(Box::new(expr))), line))
    }

    /// `var` IDENT `=` Expr — the trailing `;` is left for the enclosing
    /// scope loop's own `;` handling, matching observed behavior.
    fn parse_var(&mut self) -> Result<Ast, Error> {
        let line = self.current.line;
        self.advance(); // `var`
        let (name, _) = self.expect_identifier()?;
        self.expect(TokenKind::Eq, "EQ_SIGN")?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "SEMICOLON")?;
        Ok(Ast::new(AstKind::VarDecl { name, expr: Box::new(expr) }, line))
    }

    fn parse_expr(&mut self) -> Result<Ast, Error> {
        let lhs = self.parse_primary()?;
        let op = match &self.current.kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            _ => return Ok(lhs),
        };
        let line = self.current.line;
        self.advance();
        let rhs = self.parse_expr()?;
        Ok(Ast::new(
            AstKind::BinOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs) },
            line,
        ))
    }

    fn parse_primary(&mut self) -> Result<Ast, Error> {
        let line = self.current.line;
        match self.current.kind.clone() {
            TokenKind::IntLit(v) => {
                self.advance();
                Ok(Ast::new(AstKind::IntLit(v), line))
            }
            TokenKind::StrLit(s) => {
                self.advance();
                Ok(Ast::new(AstKind::StrLit(s), line))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.current.kind == TokenKind::LParen {
                    self.advance();
                    let mut args = Vec::new();
                    while self.current.kind != TokenKind::RParen {
                        args.push(self.parse_expr()?);
                        if self.current.kind == TokenKind::Comma {
                            self.advance();
                        }
                    }
                    self.expect(TokenKind::RParen, "BRACKET_CLOSE")?;
                    Ok(Ast::new(AstKind::FunCall { name, args }, line))
                } else {
                    Ok(Ast::new(AstKind::VarLookup(name), line))
                }
            }
            _ => Err(self.error("IDENTIFIER, INT_LITERAL or STR_LITERAL")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Ast {
        let mut parser = Parser::new(src.as_bytes(), "test");
        parser.parse_program().expect("parse should succeed")
    }

    #[test]
    fn right_associative_precedence_free_grammar() {
        let tree = parse("var x = 2 + 3 * 4;");
        match &tree.kind {
            AstKind::Scope(children) => match &children[0].kind {
                AstKind::VarDecl { name, expr } => {
                    assert_eq!(name, "x");
                    match &expr.kind {
                        AstKind::BinOp { op: BinOp::Add, rhs, .. } => match &rhs.kind {
                            AstKind::BinOp { op: BinOp::Mul, .. } => {}
                            other => panic!("expected nested Mul, got {:?}", other),
                        },
                        other => panic!("expected top-level Add, got {:?}", other),
                    }
                }
                other => panic!("expected VarDecl, got {:?}", other),
            },
            other => panic!("expected Scope, got {:?}", other),
        }
    }

    #[test]
    fn function_call_without_parens_is_lookup() {
        let tree = parse("var y = x;");
        match &tree.kind {
            AstKind::Scope(children) => match &children[0].kind {
                AstKind::VarDecl { expr, .. } => {
                    assert!(matches!(expr.kind, AstKind::VarLookup(_)));
                }
                other => panic!("unexpected node {:?}", other),
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn call_parses_argument_list() {
        let tree = parse("add(7, 5);");
        match &tree.kind {
            AstKind::Scope(children) => match &children[0].kind {
                AstKind::FunCall { name, args } => {
                    assert_eq!(name, "add");
                    assert_eq!(args.len(), 2);
                }
                other => panic!("unexpected node {:?}", other),
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn tolerates_missing_comma_between_params() {
        let tree = parse("function f(a b) { return a; }");
        match &tree.kind {
            AstKind::Scope(children) => match &children[0].kind {
                AstKind::FunctionDecl { params, .. } => {
                    assert_eq!(params, &vec!["a".to_string(), "b".to_string()]);
                }
                other => panic!("unexpected node {:?}", other),
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn invalid_token_reports_expected_kind() {
        let mut parser = Parser::new(b"var x 1;", "test");
        let err = parser.parse_program().unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("expected EQ_SIGN"), "{message}");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn stray_semicolons_are_no_ops() {
        let tree = parse(";;var x = 1;;");
        match &tree.kind {
            AstKind::Scope(children) => assert_eq!(children.len(), 1),
            _ => unreachable!(),
        }
    }
}
