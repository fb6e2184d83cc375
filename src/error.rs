//! # Errors
//!
//! One enum per stage, matching the teacher's `error.rs`: a manual
//! `Display`/`std::error::Error` pair, no `thiserror`/`anyhow`.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Parse { line: u32, message: String },
    Compile { line: u32, message: String },
    Vm(VmError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VmError {
    StackUnderflow,
    LocalOutOfRange(i64),
    GlobalOutOfRange(i64),
    DivisionByZero,
    CallStackUnderflow,
}

impl Error {
    /// Route through the `<filename>:<line>: error: <message>` format from
    /// the diagnostics spec; `Io`/`Vm` have no source line to report.
    pub fn render(&self, filename: &str) -> String {
        match self {
            Error::Io(e) => format!("{filename}: error: {e}"),
            Error::Parse { line, message } => format!("{filename}:{line}: error: {message}"),
            Error::Compile { line, message } => format!("{filename}:{line}: error: {message}"),
            Error::Vm(e) => format!("{filename}: error: {e}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Parse { line, message } => write!(f, "{line}: error: {message}"),
            Error::Compile { line, message } => write!(f, "{line}: error: {message}"),
            Error::Vm(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<VmError> for Error {
    fn from(e: VmError) -> Self {
        Error::Vm(e)
    }
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::StackUnderflow => write!(f, "operand stack underflow"),
            VmError::LocalOutOfRange(i) => write!(f, "local index {i} out of range"),
            VmError::GlobalOutOfRange(i) => write!(f, "global index {i} out of range"),
            VmError::DivisionByZero => write!(f, "division by zero"),
            VmError::CallStackUnderflow => write!(f, "call stack underflow"),
        }
    }
}

impl std::error::Error for VmError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_parse_error_with_file_and_line() {
        let err = Error::Parse { line: 3, message: "Invalid token RPAREN, expected SEMICOLON".to_string() };
        assert_eq!(
            err.render("demo.wisp"),
            "demo.wisp:3: error: Invalid token RPAREN, expected SEMICOLON"
        );
    }

    #[test]
    fn vm_error_display_is_human_readable() {
        assert_eq!(VmError::DivisionByZero.to_string(), "division by zero");
    }
}
