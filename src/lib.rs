//! Exact rational arithmetic and a calculator for arithmetic expressions over it.
//!
//! ```
//! assert_eq!(ratcalc::evaluate_to_string("(11 + 42 - 5) / (11 - 4)").unwrap(), "48 / 7");
//! ```

pub mod base;
mod parser;

pub use parser::{Parser, MAX_DEPTH};

use base::{ParseError, Rational};
use base::tracing::{NoTracer, Tracer};

/// Evaluates an arithmetic expression exactly.
///
/// Accepts integer literals, `+ - * /`, parentheses and implicit multiplication of juxtaposed
/// factors such as `(1+2)(3+4)`. Whitespace and letters are ignored, an optional `=` may end the
/// input.
pub fn evaluate_to_value(input: &str) -> Result<Rational, ParseError<'_>> {
    evaluate_traced(input, &mut NoTracer)
}

/// Like [`evaluate_to_value`], rendering the result as `"n"` or `"n / d"`.
pub fn evaluate_to_string(input: &str) -> Result<String, ParseError<'_>> {
    evaluate_to_value(input).map(|value| value.to_string())
}

/// Like [`evaluate_to_value`], reporting each step of the evaluation to `tracer`.
pub fn evaluate_traced<'str>(input: &'str str, tracer: &mut dyn Tracer) -> Result<Rational, ParseError<'str>> {
    Parser::new(input, tracer).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{stop, ErrorKind};
    use std::sync::Mutex;

    // Serializes the tests which read or raise the process-wide stop flag.
    static STOP_FLAG: Mutex<()> = Mutex::new(());

    #[test]
    fn test_entry_points() {
        let _guard = STOP_FLAG.lock().unwrap_or_else(|err| err.into_inner());
        stop::reset_stop();
        assert_eq!(evaluate_to_string("(11 + 42 - 5) / (11 - 4)"), Ok("48 / 7".to_string()));
        assert_eq!(evaluate_to_string("(17-3)(14-6)-22="), Ok("90".to_string()));
        assert_eq!(evaluate_to_string("3/4*8"), Ok("6".to_string()));
        assert_eq!(evaluate_to_string("-5+2"), Ok("-3".to_string()));
        assert_eq!(evaluate_to_value("2/6").unwrap(), Rational::new(1, 3).unwrap());
        assert_eq!(evaluate_to_value("(2+3))").unwrap_err().kind(), &ErrorKind::UnexpectedChar(')'));
    }

    #[test]
    fn test_stop_flag() {
        let _guard = STOP_FLAG.lock().unwrap_or_else(|err| err.into_inner());
        stop::send_stop();
        assert!(stop::should_stop());
        let err = evaluate_to_value("1+2*3").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Interrupt);
        stop::reset_stop();
        assert!(!stop::should_stop());
        assert_eq!(evaluate_to_string("1+2*3"), Ok("7".to_string()));
    }
}
