use std::io::{BufRead, Write};

use clap::{App, Arg, ArgMatches};
use itertools::Itertools;
use slog::{debug, info, o, Discard, Drain, Logger};
use slog_term::{FullFormat, TermDecorator};

use regcalc::{
    command::QUIT_KEYWORD,
    event::Event,
    interpreter::{Interpreter, StdIo},
    register::{Operand, Register, RegisterStore},
    value::Value,
};

#[derive(Debug)]
enum CommandError {
    InvalidFormat,
    UnknownCommand(String),
    UnknownRegister(String),
}

impl ::std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CommandError::InvalidFormat => write!(f, "invalid format"),
            CommandError::UnknownCommand(cmd) => write!(f, "unknown command: .{}", cmd),
            CommandError::UnknownRegister(name) => write!(f, "unknown register: {}", name),
        }
    }
}

struct REPL {
    interpreter: Interpreter<StdIo>,
    logger: Logger,
}

fn describe_operand(store: &RegisterStore, operand: &Operand) -> String {
    match operand {
        Operand::Literal(number) => Value(*number).to_string(),
        Operand::Register(id) => store[*id].name().to_string(),
    }
}

fn print_log(store: &RegisterStore, register: &Register) {
    println!("Register {}", register);

    for (i, entry) in register.log().iter().enumerate() {
        println!(
            "  {:>3} {} {} {}",
            i,
            if entry.executed { "[x]" } else { "[ ]" },
            entry.operator,
            describe_operand(store, &entry.operand),
        );
    }
}

impl REPL {
    fn new() -> REPL {
        REPL {
            interpreter: Interpreter::new(StdIo),
            logger: Logger::root(Discard, o!()),
        }
    }

    fn set_logger(&mut self, logger: Logger) {
        self.logger = logger.clone();
        self.interpreter.set_logger(logger.clone());

        self.interpreter.add_listener(move |event: &Event| {
            if let Event::EntryApplied { register, index, operator, operand, value } = event {
                info!(logger, "applied";
                      "register" => *register,
                      "entry" => *index,
                      "operation" => format!("{} {}", operator, Value(*operand)),
                      "value" => *value);
            }
        });
    }

    fn handle_command(&mut self, command: &str) -> Result<(), CommandError> {
        let mut args = command.split_whitespace();
        let cmd = args.next().ok_or(CommandError::InvalidFormat)?;
        let args: Vec<_> = args.collect();

        let store = &self.interpreter.store;

        match (cmd, args.as_slice()) {
            ("help", _) => {
                println!("Available commands:");
                println!("  <register> <add|subtract|multiply> <value>   Record an operation");
                println!("  print <register>                             Resolve and print a register");
                println!("  .regs, .registers                            List all registers without resolving them");
                println!("  .log <register>                              Print the operation log of a register");
                println!("  .quit                                        Exit");
            }
            ("regs", _) | ("registers", _) => {
                if store.is_empty() {
                    println!("No registers");
                }

                for register in store.iter() {
                    println!("{}", register);
                }
            }
            ("log", [name]) => {
                let register = store
                    .by_name(&name.to_lowercase())
                    .ok_or_else(|| CommandError::UnknownRegister(name.to_string()))?;

                print_log(store, register);
            }
            ("log", _) => return Err(CommandError::InvalidFormat),
            ("quit", _) => self.interpreter.halted = true,
            (cmd, _) => return Err(CommandError::UnknownCommand(cmd.to_string())),
        }

        Ok(())
    }

    fn handle_line(&mut self, input: &str) -> Result<(), CommandError> {
        let input = input.trim();

        if input.starts_with('.') {
            return self.handle_command(&input[1..]);
        }

        if let Err(err) = self.interpreter.execute_line(&input.to_lowercase()) {
            println!("{}", err);

            if let Some(cycle) = err.cycle() {
                println!("  cycle: {}", cycle);
            }
        }

        Ok(())
    }

    fn run(&mut self) {
        println!("Type .help for a list of all available commands or start typing commands. Type {} to exit.", QUIT_KEYWORD);

        let stdin = ::std::io::stdin();
        let mut lines = stdin.lock().lines();

        while !self.interpreter.halted {
            print!("> ");
            let _ = ::std::io::stdout().flush();

            let input = match lines.next() {
                Some(Ok(input)) => input,
                Some(Err(err)) => {
                    eprintln!("Error: {}", err);
                    break;
                }
                None => break,
            };

            if let Err(err) = self.handle_line(&input) {
                eprintln!("Error: {}", err);
            }
        }

        let names = self.interpreter.store.iter().map(Register::name).join(", ");
        debug!(self.logger, "exiting"; "registers" => names);
    }
}

fn parse_args() -> ArgMatches<'static> {
    App::new("regcalcrepl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read-Evaluate-Print-Loop utility for the register calculator")
        .arg(
            Arg::with_name("verbose")
                .help("Enables verbose logging")
                .long("verbose")
                .short("v"),
        )
        .get_matches()
}

fn main() {
    let args = parse_args();

    let mut repl = REPL::new();

    if args.is_present("verbose") {
        let decorator = TermDecorator::new().build();
        let drain = FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        repl.set_logger(Logger::root(drain, o!()));
    }

    repl.run();
}
