//! Registers, their operation logs and the store that owns them.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::operator::Operator;
use crate::value::Value;

/// Identifies a register inside a [RegisterStore].
///
/// Ids are handed out in first-seen order and stay valid for the lifetime of the store, as
/// registers are never removed.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct RegisterId(usize);

/// The second argument of an operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// A number given directly in the command.
    Literal(f64),

    /// The value of another register, resolved when the entry is applied.
    Register(RegisterId),
}

impl Operand {
    pub fn is_register(&self) -> bool {
        match self {
            Operand::Register(_) => true,
            Operand::Literal(_) => false,
        }
    }
}

/// A single pending (or already applied) operation in the log of a register.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogEntry {
    pub operator: Operator,
    pub operand: Operand,

    /// Set once the entry has been applied to the value of the register. Never cleared.
    pub executed: bool,
}

impl LogEntry {
    pub fn new(operator: Operator, operand: Operand) -> LogEntry {
        LogEntry {
            operator,
            operand,
            executed: false,
        }
    }
}

/// A named numeric cell together with the operations recorded against it.
#[derive(Debug, Clone)]
pub struct Register {
    name: String,

    /// The value accumulated from the entries applied so far.
    pub value: f64,

    log: Vec<LogEntry>,

    /// Index of the first entry that has not been applied. Entries are applied in log order,
    /// so every entry before it is executed and every entry from it on is not.
    next_pending: usize,
}

impl Register {
    fn new(name: String) -> Register {
        Register {
            name,
            value: 0.0,
            log: Vec::new(),
            next_pending: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in the order they were appended.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Number of log entries that have not been applied yet.
    pub fn pending(&self) -> usize {
        self.log.len() - self.next_pending
    }

    /// Index of the first log entry that has not been applied yet.
    pub fn first_pending(&self) -> Option<usize> {
        if self.is_resolved() {
            None
        } else {
            Some(self.next_pending)
        }
    }

    /// The first log entry that has not been applied yet.
    pub fn pending_entry(&self) -> Option<&LogEntry> {
        self.log.get(self.next_pending)
    }

    pub fn is_resolved(&self) -> bool {
        self.next_pending == self.log.len()
    }

    /// Applies the first pending entry with an already resolved operand and returns its index.
    pub(crate) fn apply_pending(&mut self, operand: f64) -> Option<usize> {
        let index = self.next_pending;
        let entry = self.log.get_mut(index)?;

        self.value = entry.operator.apply(self.value, operand);
        entry.executed = true;
        self.next_pending += 1;

        Some(index)
    }

    /// Records an operation without evaluating it.
    pub fn append(&mut self, operator: Operator, operand: Operand) {
        self.log.push(LogEntry::new(operator, operand));
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.name, Value(self.value))?;

        match self.pending() {
            0 => Ok(()),
            n => write!(f, " ({} pending)", n),
        }
    }
}

/// Owns every register of a run, keyed by name and kept in first-seen order.
#[derive(Default, Debug, Clone)]
pub struct RegisterStore {
    registers: Vec<Register>,
    ids: HashMap<String, RegisterId>,
}

impl RegisterStore {
    pub fn new() -> RegisterStore {
        RegisterStore::default()
    }

    /// Returns the id of the register called `name`, creating an empty register (value 0, no
    /// log entries) if none exists yet.
    pub fn get_or_create(&mut self, name: &str) -> RegisterId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }

        let id = RegisterId(self.registers.len());
        self.registers.push(Register::new(name.to_string()));
        self.ids.insert(name.to_string(), id);

        id
    }

    /// Returns the id of the register called `name` without creating it.
    pub fn lookup(&self, name: &str) -> Option<RegisterId> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn register(&self, id: RegisterId) -> &Register {
        &self.registers[id.0]
    }

    pub fn register_mut(&mut self, id: RegisterId) -> &mut Register {
        &mut self.registers[id.0]
    }

    pub fn by_name(&self, name: &str) -> Option<&Register> {
        self.lookup(name).map(|id| self.register(id))
    }

    /// Iterates over the registers in the order they were first mentioned.
    pub fn iter(&self) -> impl Iterator<Item = &Register> {
        self.registers.iter()
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}

impl Index<RegisterId> for RegisterStore {
    type Output = Register;

    fn index(&self, id: RegisterId) -> &Register {
        self.register(id)
    }
}

impl IndexMut<RegisterId> for RegisterStore {
    fn index_mut(&mut self, id: RegisterId) -> &mut Register {
        self.register_mut(id)
    }
}
