use std::fmt::{Display, Formatter};

use colored::Colorize;

/// The base error returned by [`Rational`](crate::base::Rational) operations. Within the evaluator
/// this is turned into [`ParseError`] by supplementing the slice of input it is blamed on.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseError(String);

impl From<String> for BaseError {
    fn from(string: String) -> BaseError {
        BaseError(string)
    }
}

impl From<&str> for BaseError {
    fn from(string: &str) -> BaseError {
        BaseError(string.to_string())
    }
}

impl std::error::Error for BaseError { }

impl Display for BaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// The reason an evaluation failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The input ended where a number, `(` or `)` was required.
    EndOfInput,
    /// A character which can not appear at this point of the expression.
    UnexpectedChar(char),
    /// Parentheses nested deeper than [`MAX_DEPTH`](crate::MAX_DEPTH).
    TooDeep,
    /// Division by zero or a literal which could not be read.
    Arithmetic(BaseError),
    /// The evaluation was stopped through [`stop::send_stop`](crate::base::stop::send_stop).
    Interrupt
}

impl From<BaseError> for ErrorKind {
    fn from(err: BaseError) -> ErrorKind {
        ErrorKind::Arithmetic(err)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::EndOfInput => write!(f, "unexpected end of input"),
            ErrorKind::UnexpectedChar(ch) => write!(f, "unexpected character '{ch}'"),
            ErrorKind::TooDeep => write!(f, "parentheses nested too deeply"),
            ErrorKind::Arithmetic(err) => write!(f, "{err}"),
            ErrorKind::Interrupt => write!(f, "interrupted")
        }
    }
}


/// The error type returned by [`evaluate_to_value`](crate::evaluate_to_value) and friends.
/// Contains the reason of the failure and its location within the input string. The lifetime is
/// bound to the lifetime of the input string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError<'str> {
    kind: ErrorKind,
    slice: &'str str
}

impl<'str> ParseError<'str> {
    pub fn new(kind: impl Into<ErrorKind>, slice: &'str str) -> ParseError<'str> {
        ParseError{kind: kind.into(), slice}
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The part of the input the error is blamed on. Empty if the input ended prematurely.
    pub fn slice(&self) -> &'str str {
        self.slice
    }

    /// Reproduces `input` in full with the part causing the error highlighted. An error at the
    /// end of input is marked by a highlighted underscore after the input.
    ///
    /// `input` must be the same string that was evaluated. For the actual description of the
    /// error, use the `Display` trait.
    pub fn highlight(&self, input: &str) -> String {
        let start = (self.slice.as_ptr() as usize).saturating_sub(input.as_ptr() as usize);
        let end = start + self.slice.len();
        if end > input.len() || !input.is_char_boundary(start) || !input.is_char_boundary(end) {
            return input.to_string();
        }
        let marked = if self.slice.is_empty() { "_" } else { &input[start..end] };
        format!("{}{}{}", &input[..start], marked.red().bold(), &input[end..])
    }
}

impl std::error::Error for ParseError<'_> { }

impl Display for ParseError<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

/// Evaluates `$expr`, which may use `?` on a [`BaseError`], and turns a failure into a
/// [`ParseError`] blaming `$blame`.
macro_rules! try_with {
    ($blame:expr, $expr:expr) => {
        match (|| -> Result<_, BaseError> { Ok($expr) })() {
            Ok(result) => result,
            Err(err) => return Err(ParseError::new(err, $blame))
        }
    }
}

pub(crate) use try_with;
