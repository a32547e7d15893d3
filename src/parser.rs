use std::str::CharIndices;
use std::iter::Peekable;
use crate::base::*;
use crate::base::tracing::{Event, Rule, Tracer};

/// A recursive-descent evaluator. Each grammar level is a method which recognizes its production
/// and folds it into a [`Rational`] in the same pass:
///
/// ```text
/// expression := ['+' | '-'] term { ('+' | '-') term }
/// term       := factor { ('*' | '/') factor | factor }
/// factor     := digit { digit } | '(' expression ')'
/// ```
///
/// Whitespace and ASCII letters are skipped wherever they appear, so `1 2` reads as `12`. An
/// expression ends at `=`, at an unmatched `)`, or at the end of input.
///
/// Parentheses may nest at most [`MAX_DEPTH`] levels deep.
pub struct Parser<'str, 'tr> {
    input: &'str str,
    iter: Peekable<CharIndices<'str>>,
    tracer: &'tr mut dyn Tracer,
    should_stop: fn() -> bool,
    depth: usize
}

/// The deepest nesting of parentheses accepted. Each level costs several stack frames.
pub const MAX_DEPTH: usize = 128;

fn is_ignored(c: char) -> bool {
    c.is_ascii_whitespace() || c.is_ascii_alphabetic()
}

impl<'str, 'tr> Parser<'str, 'tr> {
    pub fn new(input: &'str str, tracer: &'tr mut dyn Tracer) -> Parser<'str, 'tr> {
        Parser{input, iter: input.char_indices().peekable(), tracer, should_stop: stop::should_stop, depth: 0}
    }

    /// Evaluates the whole input. After the expression only a single `=` may follow.
    pub fn parse(mut self) -> Result<Rational, ParseError<'str>> {
        let value = self.parse_expression()?;
        if self.peek() == Some('=') {
            self.iter.next();
        }
        match self.peek() {
            None => Ok(value),
            Some(ch) => Err(self.unexpected(ch))
        }
    }

    fn peek(&mut self) -> Option<char> {
        while let Some(&(_, ch)) = self.iter.peek() {
            if !is_ignored(ch) {
                return Some(ch);
            }
            self.iter.next();
        }
        None
    }

    fn byte_pos(&mut self) -> usize {
        match self.iter.peek() {
            Some(&(pos, _)) => pos,
            None => self.input.len()
        }
    }

    fn unexpected(&mut self, ch: char) -> ParseError<'str> {
        let start = self.byte_pos();
        ParseError::new(ErrorKind::UnexpectedChar(ch), &self.input[start..(start + ch.len_utf8())])
    }

    fn end_of_input(&self) -> ParseError<'str> {
        ParseError::new(ErrorKind::EndOfInput, &self.input[self.input.len()..])
    }

    fn check_stop(&mut self) -> Result<(), ParseError<'str>> {
        if (self.should_stop)() {
            let start = self.byte_pos();
            return Err(ParseError::new(ErrorKind::Interrupt, &self.input[start..start]));
        }
        Ok(())
    }

    /// Runs `func` between a pair of tracer events. Returns the consumed slice with the result.
    fn traced(&mut self, rule: Rule, func: fn(&mut Self) -> Result<Rational, ParseError<'str>>)
        -> (&'str str, Result<Rational, ParseError<'str>>)
    {
        self.peek();
        let start = self.byte_pos();
        self.tracer.log(Event::Enter(rule));
        let result = func(self);
        let end = self.byte_pos();
        let slice = self.input[start..end].trim_end_matches(is_ignored);
        self.tracer.log(Event::Leave(rule, slice, &result));
        (slice, result)
    }

    fn parse_expression(&mut self) -> Result<Rational, ParseError<'str>> {
        self.traced(Rule::Expression, Self::expression_inner).1
    }

    fn parse_term(&mut self) -> Result<Rational, ParseError<'str>> {
        self.traced(Rule::Term, Self::term_inner).1
    }

    fn parse_factor(&mut self) -> Result<Rational, ParseError<'str>> {
        self.traced(Rule::Factor, Self::factor_inner).1
    }

    fn expression_inner(&mut self) -> Result<Rational, ParseError<'str>> {
        let mut value = match self.peek() {
            Some('-') => {
                self.iter.next();
                -self.parse_term()?
            },
            Some('+') => {
                self.iter.next();
                self.parse_term()?
            },
            _ => self.parse_term()?
        };
        loop {
            match self.peek() {
                Some('+') => {
                    self.iter.next();
                    value += self.parse_term()?;
                },
                Some('-') => {
                    self.iter.next();
                    value -= self.parse_term()?;
                },
                None | Some('=' | ')') => return Ok(value),
                Some(ch) => return Err(self.unexpected(ch))
            }
        }
    }

    fn term_inner(&mut self) -> Result<Rational, ParseError<'str>> {
        let mut value = self.parse_factor()?;
        loop {
            self.check_stop()?;
            match self.peek() {
                Some('0'..='9' | '(') => value *= self.parse_factor()?,
                Some('*') => {
                    self.iter.next();
                    value *= self.parse_factor()?;
                },
                Some('/') => {
                    self.iter.next();
                    let (slice, divisor) = self.traced(Rule::Factor, Self::factor_inner);
                    let divisor = divisor?;
                    let quot = try_with!(slice, value.checked_div(&divisor)?);
                    value = quot;
                },
                None | Some('+' | '-' | '=' | ')') => return Ok(value),
                Some(ch) => return Err(self.unexpected(ch))
            }
        }
    }

    fn factor_inner(&mut self) -> Result<Rational, ParseError<'str>> {
        match self.peek() {
            Some('(') => {
                if self.depth >= MAX_DEPTH {
                    let start = self.byte_pos();
                    return Err(ParseError::new(ErrorKind::TooDeep, &self.input[start..(start + 1)]));
                }
                self.iter.next();
                self.depth += 1;
                let value = self.parse_expression();
                self.depth -= 1;
                let value = value?;
                match self.peek() {
                    Some(')') => {
                        self.iter.next();
                        Ok(value)
                    },
                    Some(ch) => Err(self.unexpected(ch)),
                    None => Err(self.end_of_input())
                }
            },
            Some('0'..='9') => self.read_literal(),
            Some(ch) => Err(self.unexpected(ch)),
            None => Err(self.end_of_input())
        }
    }

    fn read_literal(&mut self) -> Result<Rational, ParseError<'str>> {
        let start = self.byte_pos();
        let mut digits = String::new();
        while let Some(ch @ '0'..='9') = self.peek() {
            self.check_stop()?;
            digits.push(ch);
            self.iter.next();
        }
        let end = self.byte_pos();
        let slice = self.input[start..end].trim_end_matches(is_ignored);
        let numer = try_with!(slice, digits.parse::<Number>()
            .map_err(|err| BaseError::from(format!("invalid number '{slice}': {err}")))?);
        Ok(Rational::from(numer))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::tracing::NoTracer;

    /// A parser which ignores the global stop flag, so that tests raising it do not interfere.
    fn parser<'str, 'tr>(input: &'str str, tracer: &'tr mut dyn Tracer) -> Parser<'str, 'tr> {
        let mut parser = Parser::new(input, tracer);
        parser.should_stop = || false;
        parser
    }

    fn eval(input: &str) -> Result<Rational, ParseError<'_>> {
        parser(input, &mut NoTracer).parse()
    }

    macro_rules! test_eval {
        ($input:literal => err) => { assert!(eval($input).is_err(), "{}", $input); };
        ($input:literal => $output:literal) => {
            assert_eq!(eval($input).map(|value| value.to_string()), Ok($output.to_string()));
        };
    }

    #[track_caller]
    fn assert_error(input: &str, kind: ErrorKind, at: std::ops::Range<usize>) {
        let err = eval(input).unwrap_err();
        assert_eq!(err.kind(), &kind);
        assert_eq!(err.slice(), &input[at]);
    }

    #[test]
    fn test_scenarios() {
        test_eval!("(11 + 42 - 5) / (11 - 4)" => "48 / 7");
        test_eval!("(17-3)(14-6)-22=" => "90");
        test_eval!("3/4*8" => "6");
        test_eval!("-5+2" => "-3");
        test_eval!("(2+3))" => err);
    }

    #[test]
    fn test_precedence() {
        test_eval!("1+2*3" => "7");
        test_eval!("(1+2)*3" => "9");
        test_eval!("10-4-3" => "3");
        test_eval!("12/3/2" => "2");
        test_eval!("1/2+1/3" => "5 / 6");
        test_eval!("1/2-1/2" => "0");
        test_eval!("2/4" => "1 / 2");
        test_eval!("-1/3" => "-1 / 3");
        test_eval!("+7" => "7");
        test_eval!("-(2-5)" => "3");
        test_eval!("6/(1-3)" => "-3");
    }

    #[test]
    fn test_implicit_mul() {
        test_eval!("2(3)" => "6");
        test_eval!("(2)3" => "6");
        test_eval!("(1/2)(2/3)(3/4)" => "1 / 4");
        test_eval!("1/2(4)" => "2");
    }

    #[test]
    fn test_ignored() {
        test_eval!("  4 * 5 =" => "20");
        test_eval!("1 2" => "12");
        test_eval!("x = 3 + y4" => err);
        test_eval!("three 3 plus 4" => "34");
        test_eval!("\t(1\n+1)\r\n" => "2");
    }

    #[test]
    fn test_big() {
        test_eval!("123456789012345678901234567890 * 10 / 5" => "246913578024691357802469135780");
        test_eval!("1/99999999999999999999 + 1/99999999999999999999"
            => "2 / 99999999999999999999");
        test_eval!("(2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2*2) + 1"
            => "18446744073709551617");
    }

    #[test]
    fn test_errors() {
        assert_error("(2+3))", ErrorKind::UnexpectedChar(')'), 5..6);
        assert_error("", ErrorKind::EndOfInput, 0..0);
        assert_error("   ", ErrorKind::EndOfInput, 3..3);
        assert_error("1+", ErrorKind::EndOfInput, 2..2);
        assert_error("(1+2", ErrorKind::EndOfInput, 4..4);
        assert_error("(1+2=", ErrorKind::UnexpectedChar('='), 4..5);
        assert_error("=", ErrorKind::UnexpectedChar('='), 0..1);
        assert_error("()", ErrorKind::UnexpectedChar(')'), 1..2);
        assert_error("3*-4", ErrorKind::UnexpectedChar('-'), 2..3);
        assert_error("450 - - 8", ErrorKind::UnexpectedChar('-'), 6..7);
        assert_error("1.5", ErrorKind::UnexpectedChar('.'), 1..2);
        assert_error("2^3", ErrorKind::UnexpectedChar('^'), 1..2);
        assert_error("1=2", ErrorKind::UnexpectedChar('2'), 2..3);
        assert_error("1==", ErrorKind::UnexpectedChar('='), 2..3);
        assert_error("1/(2-2)", ErrorKind::Arithmetic("division by zero".into()), 2..7);
        assert_error("5/0", ErrorKind::Arithmetic("division by zero".into()), 2..3);
        assert_error("1+✓", ErrorKind::UnexpectedChar('✓'), 2..5);
    }

    #[test]
    fn test_nesting() {
        let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(eval(&nested(MAX_DEPTH)), Ok(Rational::one()));
        assert_error(&nested(MAX_DEPTH + 1), ErrorKind::TooDeep, MAX_DEPTH..(MAX_DEPTH + 1));
        assert_error(&nested(10 * MAX_DEPTH), ErrorKind::TooDeep, MAX_DEPTH..(MAX_DEPTH + 1));
        let sequential = format!("{}1", "(1)".repeat(4 * MAX_DEPTH));
        assert_eq!(eval(&sequential), Ok(Rational::one()));
        let deep_then_shallow = format!("{}*{}", nested(MAX_DEPTH), nested(MAX_DEPTH));
        assert_eq!(eval(&deep_then_shallow), Ok(Rational::one()));
    }

    #[test]
    fn test_interrupt() {
        let mut tracer = NoTracer;
        let mut parser = Parser::new("1+2*3", &mut tracer);
        parser.should_stop = || true;
        let err = parser.parse().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Interrupt);

        // Long literals are interruptible too.
        let input = "12345678901234567890";
        let mut parser = Parser::new(input, &mut tracer);
        parser.should_stop = || true;
        let err = parser.parse().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Interrupt);
        assert_eq!(err.slice().as_ptr(), input.as_ptr());
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Tracer for Recorder {
        fn log(&mut self, ev: Event<'_>) {
            self.0.push(match ev {
                Event::Enter(rule) => format!("> {rule}"),
                Event::Leave(rule, slice, Ok(value)) => format!("< {rule} {slice} = {value}"),
                Event::Leave(rule, slice, Err(err)) => format!("< {rule} {slice} ! {err}")
            });
        }
    }

    #[test]
    fn test_tracer() {
        let mut rec = Recorder::default();
        assert_eq!(parser("2*(3)", &mut rec).parse(), Ok(Rational::from(6)));
        assert_eq!(rec.0, [
            "> expression",
            "> term",
            "> factor",
            "< factor 2 = 2",
            "> factor",
            "> expression",
            "> term",
            "> factor",
            "< factor 3 = 3",
            "< term 3 = 3",
            "< expression 3 = 3",
            "< factor (3) = 3",
            "< term 2*(3) = 6",
            "< expression 2*(3) = 6"
        ]);

        let mut rec = Recorder::default();
        assert!(parser("1+", &mut rec).parse().is_err());
        assert_eq!(rec.0.iter().filter(|ev| ev.starts_with('>')).count(),
            rec.0.iter().filter(|ev| ev.starts_with('<')).count());
        assert_eq!(rec.0.last().map(String::as_str), Some("< expression 1+ ! unexpected end of input"));
    }
}
