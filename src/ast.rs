//! # Abstract syntax tree
//!
//! One node type, one `AstKind` enum, matching the single tagged `ASTNode`
//! union `examples/original_source/src/ast.h` defines — the natural Rust
//! encoding keeps one node type, one line field, and lets `Drop` do what
//! `ast_destroy` does by hand in the original.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AstKind {
    Scope(Vec<Ast>),
    FunctionDecl {
        name: String,
        params: Vec<String>,
        body: Box<Ast>,
    },
    Return(Option<Box<Ast>>),
    VarDecl {
        name: String,
        expr: Box<Ast>,
    },
    IntLit(i64),
    StrLit(String),
    BinOp {
        op: BinOp,
        lhs: Box<Ast>,
        rhs: Box<Ast>,
    },
    VarLookup(String),
    VarAssign {
        name: String,
        expr: Box<Ast>,
    },
    FunCall {
        name: String,
        args: Vec<Ast>,
    },
}

/// A node in the program tree. Every node carries the source line it began
/// on so compile errors can point back at it.
#[derive(Clone, Debug, PartialEq)]
pub struct Ast {
    pub kind: AstKind,
    pub line: u32,
}

impl Ast {
    pub fn new(kind: AstKind, line: u32) -> Self {
        Ast { kind, line }
    }

    /// Render the indented dump format: 2 spaces per level, node kind then
    /// payload.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match &self.kind {
            AstKind::Scope(children) => {
                out.push_str(&format!("{indent}Scope\n"));
                for child in children {
                    child.dump_into(out, depth + 1);
                }
            }
            AstKind::FunctionDecl { name, params, body } => {
                out.push_str(&format!("{indent}FunctionDecl {name}({})\n", params.join(", ")));
                body.dump_into(out, depth + 1);
            }
            AstKind::Return(expr) => {
                out.push_str(&format!("{indent}Return\n"));
                if let Some(expr) = expr {
                    expr.dump_into(out, depth + 1);
                }
            }
            AstKind::VarDecl { name, expr } => {
                out.push_str(&format!("{indent}VarDecl {name}\n"));
                expr.dump_into(out, depth + 1);
            }
            AstKind::IntLit(v) => out.push_str(&format!("{indent}Expr.IntLit {v}\n")),
            AstKind::StrLit(s) => out.push_str(&format!("{indent}Expr.StrLit \"{s}\"\n")),
            AstKind::BinOp { op, lhs, rhs } => {
                out.push_str(&format!("{indent}Expr.BinOp {}\n", op.symbol()));
                lhs.dump_into(out, depth + 1);
                rhs.dump_into(out, depth + 1);
            }
            AstKind::VarLookup(name) => out.push_str(&format!("{indent}Expr.VarLookup {name}\n")),
            AstKind::VarAssign { name, expr } => {
                out.push_str(&format!("{indent}Expr.VarAssign {name}\n"));
                expr.dump_into(out, depth + 1);
            }
            AstKind::FunCall { name, args } => {
                out.push_str(&format!("{indent}Expr.FunCall {name}\n"));
                for arg in args {
                    arg.dump_into(out, depth + 1);
                }
            }
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_nests_by_two_spaces() {
        let tree = Ast::new(
            AstKind::Scope(vec![Ast::new(
                AstKind::VarDecl {
                    name: "x".to_string(),
                    expr: Box::new(Ast::new(AstKind::IntLit(2), 1)),
                },
                1,
            )]),
            1,
        );
        let dump = tree.dump();
        assert_eq!(dump, "Scope\n  VarDecl x\n    Expr.IntLit 2\n");
    }

    #[test]
    fn binop_dump_shows_symbol_and_operands() {
        let tree = Ast::new(
            AstKind::BinOp {
                op: BinOp::Mul,
                lhs: Box::new(Ast::new(AstKind::IntLit(3), 1)),
                rhs: Box::new(Ast::new(AstKind::IntLit(4), 1)),
            },
            1,
        );
        assert_eq!(tree.dump(), "Expr.BinOp *\n  Expr.IntLit 3\n  Expr.IntLit 4\n");
    }
}
