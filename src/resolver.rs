//! Forcing of deferred register operations.
//!
//! Operate commands only append entries to the log of a register. When a value is needed, the
//! [Resolver] applies every entry that has not been applied yet, in log order. An entry whose
//! operand is another register first forces that register completely, depth-first.
//!
//! Applied entries are flagged as executed and never applied again, so forcing a register a
//! second time only applies the entries appended since the previous forcing.
//!
//! The dependency path is kept on an explicit stack rather than on the native call stack. A
//! register that is asked to resolve while it is already on the path depends on itself and the
//! resolution is abandoned with [ErrorKind::CyclicDependency].

use std::collections::HashSet;

use itertools::Itertools;
use slog::{o, trace, warn, Discard, Logger};

use crate::error::ErrorKind;
use crate::event::{Event, EventDispatcher};
use crate::register::{Operand, RegisterId, RegisterStore};

/// Utility struct for forcing registers in the context of a single store.
pub(crate) struct Resolver<'s> {
    store: &'s mut RegisterStore,
    events: &'s mut EventDispatcher,
    logger: Logger,

    /// The dependency path, outermost register first.
    path: Vec<RegisterId>,

    /// The registers in `path`.
    in_progress: HashSet<RegisterId>,
}

impl<'s> Resolver<'s> {
    pub fn new(store: &'s mut RegisterStore, events: &'s mut EventDispatcher) -> Resolver<'s> {
        Resolver {
            store,
            events,
            logger: Logger::root(Discard, o!()),
            path: Vec::new(),
            in_progress: HashSet::new(),
        }
    }

    pub fn with_logger(mut self, logger: &Logger) -> Resolver<'s> {
        self.logger = logger.clone();
        self
    }

    /// Applies every pending entry of `root` and, transitively, of the registers it depends on.
    ///
    /// On success the value of `root` is up to date. On failure the entries applied so far stay
    /// applied and the entry that closed the cycle stays pending.
    pub fn resolve(mut self, root: RegisterId) -> Result<(), ErrorKind> {
        self.enter(root);

        while let Some(id) = self.path.last().copied() {
            let entry = match self.store[id].pending_entry() {
                Some(entry) => *entry,
                None => {
                    self.leave();
                    continue;
                }
            };

            let operand = match entry.operand {
                Operand::Literal(number) => number,
                Operand::Register(dependency) => {
                    if self.in_progress.contains(&dependency) {
                        return Err(self.cycle(dependency));
                    }

                    if !self.store[dependency].is_resolved() {
                        self.enter(dependency);
                        continue;
                    }

                    self.store[dependency].value
                }
            };

            self.apply(id, operand);
        }

        Ok(())
    }

    /// Pushes `register` onto the dependency path.
    fn enter(&mut self, register: RegisterId) {
        trace!(self.logger, "resolving register";
               "register" => self.store[register].name(),
               "depth" => self.path.len());

        self.path.push(register);
        self.in_progress.insert(register);
    }

    fn leave(&mut self) {
        if let Some(register) = self.path.pop() {
            self.in_progress.remove(&register);
        }
    }

    fn apply(&mut self, id: RegisterId, operand: f64) {
        let index = match self.store[id].apply_pending(operand) {
            Some(index) => index,
            None => return,
        };

        let register = &self.store[id];
        let operator = register.log()[index].operator;

        trace!(self.logger, "applied log entry";
               "register" => register.name(),
               "index" => index,
               "operator" => %operator,
               "operand" => operand,
               "value" => register.value);

        self.events.dispatch(Event::EntryApplied {
            register: register.name(),
            index,
            operator,
            operand,
            value: register.value,
        });
    }

    fn cycle(&mut self, register: RegisterId) -> ErrorKind {
        let start = self
            .path
            .iter()
            .position(|id| *id == register)
            .unwrap_or(0);

        let cycle: Vec<String> = self.path[start..]
            .iter()
            .copied()
            .chain(std::iter::once(register))
            .map(|id| self.store[id].name().to_string())
            .collect();

        let name = self.store[register].name();

        warn!(self.logger, "dependency cycle";
              "register" => name,
              "cycle" => %cycle.iter().join(" -> "));

        self.events.dispatch(Event::CycleDetected { register: name });

        ErrorKind::CyclicDependency {
            register: name.to_string(),
            cycle,
        }
    }
}
