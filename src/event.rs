//! Event handling.
//!
//! This library exposes an event-based interface for observing the resolver as it forces
//! registers. [EventListeners](EventListener) can be registered on the
//! [Interpreter](crate::interpreter::Interpreter) with the
//! [add_listener](crate::interpreter::Interpreter::add_listener) method.
//!
//! A blanket implementation of [EventListener] for all `Fn(&Event)` is provided.

use crate::operator::Operator;

/// Represents an event that occurred while resolving a register.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// A log entry was applied to the value of a register.
    EntryApplied {
        /// Name of the register whose log contains the entry.
        register: &'a str,

        /// Position of the entry in the log.
        index: usize,

        /// The operator of the entry.
        operator: Operator,

        /// The resolved operand the operator was applied with.
        operand: f64,

        /// The new value of the register.
        value: f64,
    },

    /// Resolution was abandoned because the register depends on itself.
    CycleDetected {
        /// The register that was reached again while it was being resolved.
        register: &'a str,
    },
}

/// Trait for consuming events.
pub trait EventListener {
    /// Called whenever a new event has been created.
    fn event(&mut self, event: &Event);
}

impl<F> EventListener for F
where
    F: Fn(&Event),
{
    fn event(&mut self, event: &Event) {
        self(event)
    }
}

#[derive(Default)]
pub(crate) struct EventDispatcher {
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventDispatcher {
    pub fn new() -> EventDispatcher {
        EventDispatcher {
            listeners: Vec::new(),
        }
    }

    pub fn add_listener<L: EventListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener) as Box<dyn EventListener>)
    }

    pub fn dispatch(&mut self, event: Event) {
        for listener in &mut self.listeners {
            listener.event(&event);
        }
    }
}
