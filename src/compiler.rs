//! # Compiler
//!
//! Two passes over the parsed program, grounded on
//! `examples/original_source/src/ast.c`'s `ast_compile`/`compile_recur`
//! shape: pass 1 walks top-level statements, emitting code for everything
//! but `FunctionDecl` (which is only registered), then appends `EXIT`; pass
//! 2 emits each function body at its recorded start address; a final
//! backpatch pass rewrites `CALL` placeholders to resolved addresses.
//!
//! Symbol tables are a `Vec<String>` (insertion order = index) plus a
//! `HashMap<String, usize>` for duplicate-checked lookup, the same two-Vec
//! discipline `ast.c` uses for its `FunctionCtx`/`BackPatch` vectors.

use std::collections::HashMap;

use crate::ast::{Ast, AstKind, BinOp};
use crate::bytecode::Op;
use crate::error::Error;

#[derive(Default)]
struct SymbolTable {
    order: Vec<String>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    fn declare(&mut self, name: &str) -> Result<usize, ()> {
        if self.index.contains_key(name) {
            return Err(());
        }
        let idx = self.order.len();
        self.order.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        Ok(idx)
    }

    fn lookup(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

struct FunctionInfo<'a> {
    params: &'a [String],
    body: &'a Ast,
    start_addr: usize,
}

/// Placeholder value written into a `CALL` immediate until the backpatch
/// pass resolves it; any undischarged patch is a compiler bug, not a
/// program error, since `compile` always resolves or fails first.
const CALL_PLACEHOLDER: i64 = -1;

/// Expr.StrLit has no runtime representation (`Value` is integer-only); it
/// compiles to a stable sentinel push so every expression still leaves
/// exactly one value on the stack, the same arity every other expression
/// kind upholds.
const STR_LIT_SENTINEL: i64 = 0;

pub struct Compiler<'a> {
    globals: SymbolTable,
    locals: Option<SymbolTable>,
    functions: Vec<FunctionInfo<'a>>,
    function_index: HashMap<String, usize>,
    patches: Vec<(usize, String, u32)>,
    code: Vec<Op>,
}

/// The compiled program plus the two sizes the VM needs at construction:
/// the final globals table size and the largest per-function locals table,
/// both known only once every function body has been compiled.
pub struct Program {
    pub code: Vec<Op>,
    pub globals_count: usize,
    pub locals_capacity: usize,
}

impl<'a> Compiler<'a> {
    pub fn compile(root: &'a Ast) -> Result<Program, Error> {
        let children = match &root.kind {
            AstKind::Scope(children) => children,
            _ => unreachable!("the parser always produces a root Scope"),
        };

        let mut c = Compiler {
            globals: SymbolTable::default(),
            locals: None,
            functions: Vec::new(),
            function_index: HashMap::new(),
            patches: Vec::new(),
            code: Vec::new(),
        };

        // Pass 1: top-level emission + function registration.
        for child in children {
            match &child.kind {
                AstKind::FunctionDecl { name, params, body } => {
                    let idx = c.functions.len();
                    c.function_index.insert(name.clone(), idx);
                    c.functions.push(FunctionInfo { params, body, start_addr: 0 });
                }
                _ => c.compile_stmt(child)?,
            }
        }
        c.code.push(Op::Exit);

        // Pass 2: function body emission.
        let mut locals_capacity = 0usize;
        for i in 0..c.functions.len() {
            let start = c.code.len();
            c.functions[i].start_addr = start;
            let params = c.functions[i].params;
            let body = c.functions[i].body;

            let mut locals = SymbolTable::default();
            for name in params {
                locals.declare(name).map_err(|_| Error::Compile {
                    line: body.line,
                    message: format!("Duplicate parameter {name}"),
                })?;
            }
            // Reverse iteration: the caller pushes arguments left-to-right,
            // so the top of the stack on entry is the rightmost argument.
            for idx in (0..params.len()).rev() {
                c.code.push(Op::Store(idx as i64));
            }

            c.locals = Some(locals);
            c.compile_stmt(body)?;
            locals_capacity = locals_capacity.max(c.locals.as_ref().unwrap().order.len());
            c.locals = None;
        }

        // Backpatch pass.
        for (pos, name, line) in &c.patches {
            let target = c
                .function_index
                .get(name)
                .ok_or_else(|| Error::Compile {
                    line: *line,
                    message: format!("Undeclared identifier {name}"),
                })?;
            let addr = c.functions[*target].start_addr;
            c.code[*pos] = Op::Call(addr as i64);
        }

        Ok(Program {
            globals_count: c.globals.order.len(),
            locals_capacity,
            code: c.code,
        })
    }

    fn compile_stmt(&mut self, node: &'a Ast) -> Result<(), Error> {
        match &node.kind {
            AstKind::Scope(children) => {
                for child in children {
                    self.compile_stmt(child)?;
                }
                Ok(())
            }
            AstKind::VarDecl { name, expr } => {
                let already_declared = match &self.locals {
                    Some(locals) => locals.lookup(name).is_some(),
                    None => self.globals.lookup(name).is_some(),
                };
                if already_declared {
                    return Err(Error::Compile {
                        line: node.line,
                        message: format!("Duplicate declaration of {name}"),
                    });
                }
                self.compile_expr(expr)?;
                if let Some(locals) = &mut self.locals {
                    let idx = locals.declare(name).expect("checked above");
                    self.code.push(Op::Store(idx as i64));
                } else {
                    let idx = self.globals.declare(name).expect("checked above");
                    self.code.push(Op::StoreGlobal(idx as i64));
                }
                Ok(())
            }
            AstKind::Return(expr) => {
                if let Some(expr) = expr {
                    self.compile_expr(expr)?;
                }
                self.code.push(Op::Ret);
                Ok(())
            }
            _ => self.compile_expr(node),
        }
    }

    fn compile_expr(&mut self, node: &'a Ast) -> Result<(), Error> {
        match &node.kind {
            AstKind::IntLit(v) => {
                self.code.push(Op::Push(*v));
                Ok(())
            }
            AstKind::StrLit(_) => {
                self.code.push(Op::Push(STR_LIT_SENTINEL));
                Ok(())
            }
            AstKind::BinOp { op, lhs, rhs } => {
                self.compile_expr(lhs)?;
                self.compile_expr(rhs)?;
                self.code.push(match op {
                    BinOp::Add => Op::Sum,
                    BinOp::Sub => Op::Sub,
                    BinOp::Mul => Op::Mul,
                    BinOp::Div => Op::Div,
                });
                Ok(())
            }
            AstKind::VarLookup(name) => {
                if let Some(locals) = &self.locals {
                    if let Some(idx) = locals.lookup(name) {
                        self.code.push(Op::Load(idx as i64));
                        return Ok(());
                    }
                }
                if let Some(idx) = self.globals.lookup(name) {
                    self.code.push(Op::LoadGlobal(idx as i64));
                    Ok(())
                } else {
                    Err(Error::Compile {
                        line: node.line,
                        message: format!("Undeclared identifier {name}"),
                    })
                }
            }
            AstKind::VarAssign { name, expr } => {
                self.compile_expr(expr)?;
                if let Some(locals) = &self.locals {
                    if let Some(idx) = locals.lookup(name) {
                        self.code.push(Op::Store(idx as i64));
                        self.code.push(Op::Load(idx as i64));
                        return Ok(());
                    }
                }
                if let Some(idx) = self.globals.lookup(name) {
                    self.code.push(Op::StoreGlobal(idx as i64));
                    self.code.push(Op::LoadGlobal(idx as i64));
                    Ok(())
                } else {
                    Err(Error::Compile {
                        line: node.line,
                        message: format!("Undeclared identifier {name}"),
                    })
                }
            }
            AstKind::FunCall { name, args } => {
                for arg in args {
                    self.compile_expr(arg)?;
                }
                self.patches.push((self.code.len(), name.clone(), node.line));
                self.code.push(Op::Call(CALL_PLACEHOLDER));
                Ok(())
            }
            AstKind::Scope(_) | AstKind::FunctionDecl { .. } | AstKind::Return(_) | AstKind::VarDecl { .. } => {
                unreachable!("statement-only node reached expression lowering")
            }
        }
    }
}
