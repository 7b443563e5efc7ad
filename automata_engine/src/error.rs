use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unbalanced parentheses or an operator without enough operands
    MalformedExpression(String),
    /// A DFA description that references undeclared states or symbols, or is
    /// otherwise not a well-formed DFA
    InvalidAutomatonDescription(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Error {
        Error::MalformedExpression(message.into())
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Error {
        Error::InvalidAutomatonDescription(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedExpression(ref s) => write!(f, "Malformed expression: {}", s),
            Error::InvalidAutomatonDescription(ref s) => {
                write!(f, "Invalid automaton description: {}", s)
            }
        }
    }
}

impl error::Error for Error {}
