use crate::base::*;

use std::fmt::{Display, Formatter};

/// The grammar procedure an [`Event`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Expression,
    Term,
    Factor
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Expression => write!(f, "expression"),
            Rule::Term => write!(f, "term"),
            Rule::Factor => write!(f, "factor")
        }
    }
}

/// Reported by the evaluator around each grammar procedure. Every `Enter` is matched by exactly
/// one `Leave`, also on failure. `Leave` carries the part of the input consumed by the procedure.
#[derive(Debug)]
pub enum Event<'a> {
    Enter(Rule),
    Leave(Rule, &'a str, &'a Result<Rational, ParseError<'a>>)
}

/// Receiver of evaluation [`Event`]s, see [`evaluate_traced`](crate::evaluate_traced).
pub trait Tracer {
    fn log(&mut self, ev: Event<'_>);
}

/// A [`Tracer`] which ignores all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTracer;

impl Tracer for NoTracer {
    fn log(&mut self, _ev: Event<'_>) { }
}
