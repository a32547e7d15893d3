use ratcalc::base::tracing::*;

use colored::Colorize;

/// Prints the steps of an evaluation as an indented tree once the outermost expression is done.
#[derive(Default)]
pub struct TextTracer {
    rec: Vec<Vec<Traced>>,
    tracing: bool,
}

struct Traced {
    rule: Rule,
    slice: String,
    steps: Vec<Traced>,
    output: Result<String, String>,
}

impl Tracer for TextTracer {
    fn log(&mut self, ev: Event<'_>) {
        if !self.tracing { return; }
        match ev {
            Event::Enter(_) => self.rec.push(Vec::new()),
            Event::Leave(rule, slice, res) => {
                let steps = self.rec.pop().expect("unbalanced tracer calls");
                let t = Traced {
                    rule,
                    slice: slice.to_string(),
                    // A single step covering the same input adds nothing.
                    steps: match <[Traced; 1]>::try_from(steps) {
                        Ok([inner]) if inner.slice == slice => inner.steps,
                        Ok([inner]) => vec![inner],
                        Err(steps) => steps,
                    },
                    output: res.as_ref().map(ToString::to_string).map_err(ToString::to_string),
                };
                match self.rec.last_mut() {
                    Some(tt) => tt.push(t),
                    None => Self::writeout(t)
                }
            }
        }
    }
}

impl TextTracer {
    fn writeout(t: Traced) {
        Self::writeout_level(t, 0);
    }

    fn writeout_level(t: Traced, level: usize) {
        print!("{}", "  ".repeat(level));
        match t.steps.is_empty() {
            true => print!("{}", Self::styled(&format!("[-] {} {} => ", t.rule, t.slice))),
            false => {
                println!("{}", Self::styled(&format!("[-] {} {}", t.rule, t.slice)));
                for tt in t.steps {
                    Self::writeout_level(tt, level + 1);
                }
                print!("{}{}", "  ".repeat(level + 1), Self::styled("=> "));
            }
        }
        match t.output {
            Ok(out) => println!("{}", Self::styled(&out)),
            Err(err) => println!("{}", Self::styled(&format!("[!] {err}"))),
        }
    }

    fn styled(s: &str) -> String {
        s.dimmed().to_string()
    }

    pub(crate) fn toggle(&mut self, on: bool) {
        self.tracing = on;
        if !on {
            self.rec.clear();
        }
    }

    pub(crate) fn is_on(&self) -> bool {
        self.tracing
    }
}
