//! [Interpreter] for executing streams of register commands.

use slog::{debug, o, warn, Discard, Logger};

use crate::command::{words, Argument, Command};
use crate::error::{CommandError, ErrorKind};
use crate::event::{EventDispatcher, EventListener};
use crate::register::{Operand, RegisterStore};
use crate::resolver::Resolver;
use crate::value::Value;

/// Interface to whatever receives the results of print commands and the rejected commands.
pub trait Output {
    /// Called when a print command has been resolved.
    ///
    /// # Parameters
    /// - `register`: The name of the printed register.
    /// - `value`: The resolved value of the register.
    fn print(&mut self, register: &str, value: f64);

    /// Called when a command has been rejected.
    fn error(&mut self, error: &CommandError);
}

/// The interpreter owns the registers of a run and executes commands against them.
///
/// Operate commands are only recorded. Print commands force the printed register and report its
/// value to the [Output].
pub struct Interpreter<IO> {
    /// All registers mentioned so far.
    pub store: RegisterStore,

    /// Receives printed values and errors.
    pub io: IO,

    /// True once a `quit` command has been executed.
    pub halted: bool,

    events: EventDispatcher,
    logger: Logger,
}

impl<IO> Interpreter<IO>
where
    IO: Output,
{
    /// Create a new interpreter with an empty register store.
    ///
    /// # Parameters
    /// - `io`: An [Output] handler.
    pub fn new(io: IO) -> Interpreter<IO> {
        Interpreter {
            store: RegisterStore::new(),
            io,
            halted: false,
            events: EventDispatcher::new(),
            logger: Logger::root(Discard, o!()),
        }
    }

    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = logger;
    }

    /// Registers a listener that is notified about every entry the resolver applies.
    pub fn add_listener<L: EventListener + 'static>(&mut self, listener: L) {
        self.events.add_listener(listener);
    }

    /// Executes a single line, returning the error instead of reporting it.
    ///
    /// A rejected operate command leaves every register untouched. A print command rejected
    /// because of a dependency cycle keeps the entries that were applied before the cycle was
    /// found.
    pub fn execute_line(&mut self, line: &str) -> Result<(), CommandError> {
        let tokens = words(line);
        let command = Command::from_words(&tokens).map_err(|err| err.quoting(line))?;

        self.execute(command)
            .map_err(|kind| CommandError::from_words(&tokens, kind).quoting(line))
    }

    /// Executes a validated command.
    pub fn execute(&mut self, command: Command) -> Result<(), ErrorKind> {
        match command {
            Command::Operate {
                target,
                operator,
                operand,
            } => {
                let target = self.store.get_or_create(target);

                let operand = match operand {
                    Argument::Number(number) => Operand::Literal(number),
                    Argument::Register(name) => Operand::Register(self.store.get_or_create(name)),
                };

                debug!(self.logger, "recorded operation";
                       "register" => self.store[target].name(),
                       "operator" => %operator,
                       "register_operand" => operand.is_register());

                self.store[target].append(operator, operand);
            }
            Command::Print { register } => {
                let value = self.value_of(register)?;
                self.io.print(register, value);
            }
            Command::Quit => {
                debug!(self.logger, "quit");
                self.halted = true;
            }
        }

        Ok(())
    }

    /// Forces the register called `name` and returns its value.
    ///
    /// # Errors
    /// Fails if no register called `name` has been mentioned or if the register depends on
    /// itself.
    pub fn value_of(&mut self, name: &str) -> Result<f64, ErrorKind> {
        let id = self
            .store
            .lookup(name)
            .ok_or_else(|| ErrorKind::UndeclaredRegister {
                name: name.to_string(),
            })?;

        Resolver::new(&mut self.store, &mut self.events)
            .with_logger(&self.logger)
            .resolve(id)?;

        let value = self.store[id].value;

        debug!(self.logger, "resolved register"; "register" => name, "value" => value);

        Ok(value)
    }

    /// Executes a single line and reports a rejected command to the [Output].
    pub fn step(&mut self, line: &str) {
        if self.halted {
            return;
        }

        if let Err(err) = self.execute_line(line) {
            warn!(self.logger, "command rejected"; "line" => err.line.as_str(), "reason" => %err.kind);
            self.io.error(&err);
        }
    }

    /// Executes lines until the stream ends or a `quit` command is executed.
    pub fn run<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            if self.halted {
                break;
            }

            self.step(line.as_ref());
        }
    }
}

/// An output handler for testing purposes.
///
/// Appends printed values and errors to an output buffer, in the order they were reported.
#[derive(Debug, Default)]
pub struct TestIo {
    output_buffer: Vec<Outcome>,
}

/// A single entry of the [TestIo] output buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Printed { register: String, value: f64 },
    Rejected(CommandError),
}

impl Outcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Printed { value, .. } => Some(*value),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CommandError> {
        match self {
            Outcome::Rejected(err) => Some(err),
            Outcome::Printed { .. } => None,
        }
    }
}

impl TestIo {
    pub fn new() -> TestIo {
        TestIo {
            output_buffer: Vec::new(),
        }
    }

    pub fn output(&self) -> &[Outcome] {
        &self.output_buffer[..]
    }

    pub fn into_output(self) -> Vec<Outcome> {
        self.output_buffer
    }

    /// The output rendered the way [StdIo] would print it, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        self.output_buffer
            .iter()
            .map(|outcome| match outcome {
                Outcome::Printed { value, .. } => Value(*value).to_string(),
                Outcome::Rejected(err) => err.to_string(),
            })
            .collect()
    }

    /// The printed values, skipping errors.
    pub fn values(&self) -> Vec<f64> {
        self.output_buffer.iter().filter_map(Outcome::value).collect()
    }

    /// The reported errors, skipping printed values.
    pub fn errors(&self) -> Vec<&ErrorKind> {
        self.output_buffer
            .iter()
            .filter_map(Outcome::error)
            .map(|err| &err.kind)
            .collect()
    }
}

impl Output for TestIo {
    fn print(&mut self, register: &str, value: f64) {
        self.output_buffer.push(Outcome::Printed {
            register: register.to_string(),
            value,
        });
    }

    fn error(&mut self, error: &CommandError) {
        self.output_buffer.push(Outcome::Rejected(error.clone()));
    }
}

impl Output for &mut TestIo {
    fn print(&mut self, register: &str, value: f64) {
        (**self).print(register, value)
    }

    fn error(&mut self, error: &CommandError) {
        (**self).error(error)
    }
}

/// An output handler that prints values and errors to the terminal standard output, one per line.
pub struct StdIo;

impl Output for StdIo {
    fn print(&mut self, _register: &str, value: f64) {
        println!("{}", Value(value));
    }

    fn error(&mut self, error: &CommandError) {
        println!("{}", error);
    }
}
