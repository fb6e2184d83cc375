//! # wisp
//!
//! A tiny JS-like interpreter: scanner, parser, compiler, and stack VM. The
//! pipeline is scanner -> parser -> compiler -> VM; each stage halts on its
//! first error and signals upward, matching `examples/original_source`'s
//! `silk_run_file`/`silk_run_string`/`silk_run` shape in
//! `examples/original_source/src/run.c`.

pub mod ast;
pub mod bytecode;
pub mod compiler;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod vm;

use std::path::Path;

use compiler::Compiler;
use context::Context;
use error::Error;
use parser::Parser;
use vm::Vm;

/// Run a source buffer through the full pipeline, printing whichever
/// diagnostics `ctx` enables as each stage completes.
fn run(source: &[u8], ctx: &Context) -> Result<(), Error> {
    if ctx.print_tokens {
        print!("{}", diagnostics::dump_tokens(source));
    }

    let mut parser = Parser::new(source, &ctx.filename);
    let ast = parser.parse_program()?;

    if ctx.print_ast {
        print!("{}", diagnostics::dump_ast(&ast));
    }

    let program = Compiler::compile(&ast)?;

    if ctx.print_bytecode {
        print!("{}", diagnostics::dump_bytecode(&program.code));
    }

    let mut vm = Vm::new(program.code, program.globals_count, program.locals_capacity);
    vm.run()?;

    if ctx.print_stack_on_exit {
        print!("{}", diagnostics::dump_stack(vm.operand_stack()));
    }

    Ok(())
}

fn report(result: Result<(), Error>, ctx: &Context) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            if ctx.print_errors {
                eprintln!("{}", diagnostics::format_error(&e, &ctx.filename));
            }
            1
        }
    }
}

/// Run a source file by path. Exit-code convention: 0 on success, 1 on any
/// I/O, lex, parse, compile, or VM failure.
pub fn run_file(path: &Path, ctx: &Context) -> i32 {
    match std::fs::read(path) {
        Ok(bytes) => run_buffer(&bytes, ctx),
        Err(e) => report(Err(Error::Io(e)), ctx),
    }
}

/// Run a source string.
pub fn run_string(source: &str, ctx: &Context) -> i32 {
    run_buffer(source.as_bytes(), ctx)
}

/// Run a source buffer delimited by `[0, source.len())`.
pub fn run_buffer(source: &[u8], ctx: &Context) -> i32 {
    report(run(source, ctx), ctx)
}
