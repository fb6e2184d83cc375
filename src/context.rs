//! # Run context
//!
//! The diagnostic toggles and filename threaded through a run, playing the
//! role the teacher's CLI flags play over its own runtime.

#[derive(Clone, Debug)]
pub struct Context {
    pub print_tokens: bool,
    pub print_ast: bool,
    pub print_bytecode: bool,
    pub print_stack_on_exit: bool,
    pub print_errors: bool,
    pub filename: String,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            print_tokens: false,
            print_ast: false,
            print_bytecode: false,
            print_stack_on_exit: false,
            print_errors: false,
            filename: "<input>".to_string(),
        }
    }
}
