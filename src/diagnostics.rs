//! # Diagnostic dump formats
//!
//! The five independently-toggled dumps from the run context: tokens, AST,
//! bytecode, residual operand stack, and error lines. The teacher treats
//! this as inline `Display`/print logic; we give it its own module because
//! the CLI toggles each dump independently rather than always printing
//! everything `-v`-style.

use crate::ast::Ast;
use crate::bytecode::Op;
use crate::error::Error;
use crate::lexer::Lexer;
use crate::token::TokenKind;

/// `<TOKEN_NAME> [payload]` per line.
pub fn dump_tokens(data: &[u8]) -> String {
    let mut lexer = Lexer::new(data);
    let mut out = String::new();
    loop {
        let tok = lexer.next();
        let done = tok.kind == TokenKind::Eof;
        match &tok.kind {
            TokenKind::IntLit(v) => out.push_str(&format!("{} {v}\n", tok.name())),
            TokenKind::StrLit(s) => out.push_str(&format!("{} {s}\n", tok.name())),
            TokenKind::Identifier(s) => out.push_str(&format!("{} {s}\n", tok.name())),
            _ => out.push_str(&format!("{}\n", tok.name())),
        }
        if done {
            break;
        }
    }
    out
}

/// Indented 2-spaces-per-level AST dump; delegates to [`Ast::dump`].
pub fn dump_ast(root: &Ast) -> String {
    root.dump()
}

/// Right-aligned `index: OPCODE [imm]` bytecode dump.
pub fn dump_bytecode(program: &[Op]) -> String {
    crate::bytecode::dump(program)
}

/// The residual operand stack at `EXIT`, top printed last.
pub fn dump_stack(stack: &[i64]) -> String {
    let values: Vec<String> = stack.iter().map(i64::to_string).collect();
    format!("[{}]\n", values.join(", "))
}

/// `<filename>:<line>: error: <message>`, falling back to a line-less form
/// for errors without a source position.
pub fn format_error(err: &Error, filename: &str) -> String {
    err.render(filename)
}
