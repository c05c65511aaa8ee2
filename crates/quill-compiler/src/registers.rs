//! Virtual register naming and the temporary register pool.
//!
//! Two namespaces share the VM's register file:
//! - *named* registers, one per source identifier, never allocated here
//! - *temporary* registers, borrowed while an expression is being lowered
//!   and released before the lowering call returns
//!
//! Temporaries render as `.t<n>`. `.` never appears in an identifier, so a
//! temporary cannot alias a named register.
//!
//! The VM provides arbitrarily many registers, so the pool never fails; it
//! just grows.

use std::collections::BTreeSet;
use std::fmt;

/// A VM-visible storage slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Register {
    /// Register bound to a source identifier (or its scoped slot).
    Named(String),
    /// Short-lived temporary from the [`RegisterPool`].
    Temp(u32),
}

impl Register {
    pub fn named(name: impl Into<String>) -> Self {
        Register::Named(name.into())
    }

    /// Sink for values nobody reads.
    pub fn discard() -> Self {
        Register::Named(DISCARD.to_string())
    }
}

/// Name of the sink register.
pub const DISCARD: &str = "NONE";

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::Named(name) => f.write_str(name),
            Register::Temp(index) => write!(f, ".t{index}"),
        }
    }
}

/// Pool of temporary registers.
///
/// `borrow` hands out the lowest free index; a borrowed register is not
/// handed out again until it is released.
#[derive(Debug, Default)]
pub struct RegisterPool {
    /// Number of temporaries ever created.
    capacity: u32,
    /// Created and not currently borrowed.
    free: BTreeSet<u32>,
    /// Highest number of simultaneously borrowed temporaries.
    peak: usize,
}

impl RegisterPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow an unused temporary.
    pub fn borrow(&mut self) -> Register {
        let index = match self.free.pop_first() {
            Some(index) => index,
            None => {
                let index = self.capacity;
                self.capacity += 1;
                index
            }
        };
        self.peak = self.peak.max(self.outstanding());
        Register::Temp(index)
    }

    /// Return a borrowed temporary to the pool.
    ///
    /// # Panics
    ///
    /// Panics if `register` is not a currently borrowed temporary.
    pub fn release(&mut self, register: Register) {
        let Register::Temp(index) = register else {
            panic!("released named register '{register}' to the temporary pool");
        };
        assert!(
            index < self.capacity && self.free.insert(index),
            "released temporary '{register}' that is not borrowed"
        );
    }

    /// Temporaries currently borrowed.
    pub fn outstanding(&self) -> usize {
        self.capacity as usize - self.free.len()
    }

    /// Highest `outstanding()` observed so far.
    pub fn peak_outstanding(&self) -> usize {
        self.peak
    }

    /// Temporaries ever created.
    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }
}
