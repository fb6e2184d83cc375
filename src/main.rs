//! CLI front-end over the `wisp` library: `wisp [-t|-a|-b|-s|-e] <file>`,
//! one flag per diagnostic toggle in [`wisp::context::Context`]. Shaped
//! after the teacher's `main.rs` (flag parsing, usage text, exit codes).

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use wisp::context::Context;

const USAGE: &str = "\
usage: wisp [-t] [-a] [-b] [-s] [-e] <file>

  -t    print tokens
  -a    print the AST
  -b    print bytecode
  -s    print the residual operand stack on exit
  -e    print errors to stderr
  -h, --help    print this message
";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut ctx = Context::default();
    let mut file: Option<PathBuf> = None;

    for arg in &args {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            "-t" => ctx.print_tokens = true,
            "-a" => ctx.print_ast = true,
            "-b" => ctx.print_bytecode = true,
            "-s" => ctx.print_stack_on_exit = true,
            "-e" => ctx.print_errors = true,
            other if other.starts_with('-') => {
                eprintln!("wisp: unknown flag {other}");
                eprint!("{USAGE}");
                return ExitCode::FAILURE;
            }
            other => file = Some(PathBuf::from(other)),
        }
    }

    let Some(file) = file else {
        eprint!("{USAGE}");
        return ExitCode::FAILURE;
    };
    ctx.filename = file.display().to_string();

    match wisp::run_file(&file, &ctx) {
        0 => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
