use ratcalc::base::stop;
use ratcalc::evaluate_traced;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

mod tracer;
use tracer::TextTracer;

const BANNER: &str = "\
Exact rational calculator. Expressions follow the grammar

  expression => [+|-] term { + term | - term } [=]
  term       => factor { * factor | / factor | factor }
  factor     => digit { digit } | ( expression )

Multiplication and division bind tighter than addition and subtraction, operators of equal
precedence associate to the left. Juxtaposed factors are multiplied.

Valid input:    (11 + 42 - 5) / (11 - 4)
                (17-3)(14-6)-22=
Invalid input:  (3 / 4) * - (5 + 1)     consecutive operators
                (3 + 7)) =              mismatched parentheses
                450 - - 8 =             double negative, use + instead

Commands: :help, :trace on|off, :quit";

enum Command {
    Help,
    Trace(bool),
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let cmd = words.next().unwrap_or_default();
    let arg = words.next();
    match (cmd, arg) {
        (":help" | ":?", None) => Ok(Command::Help),
        (":trace", Some("on")) => Ok(Command::Trace(true)),
        (":trace", Some("off")) => Ok(Command::Trace(false)),
        (":quit" | ":exit", None) => Ok(Command::Quit),
        _ => Err(format!("unknown command '{}'", line.trim()))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    ctrlc::set_handler(stop::send_stop)?;
    let mut rl = DefaultEditor::new()?;
    let mut tracer = TextTracer::default();
    println!("{BANNER}");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into())
        };
        if line.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(line.as_str())?;

        if line.trim_start().starts_with(':') {
            match parse_command(&line) {
                Ok(Command::Help) => println!("{BANNER}"),
                Ok(Command::Trace(on)) => {
                    tracer.toggle(on);
                    println!("tracing {}", if tracer.is_on() { "on" } else { "off" });
                },
                Ok(Command::Quit) => break,
                Err(err) => println!("{}", err.red())
            }
            continue;
        }

        stop::reset_stop();
        match evaluate_traced(&line, &mut tracer) {
            Ok(value) => println!("{value}"),
            Err(err) => {
                println!("{}", err.highlight(&line));
                println!("{} {err}", "Error:".red().bold());
            }
        }
    }
    Ok(())
}
