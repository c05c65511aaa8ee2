//! Identifier to named-register mapping.
//!
//! With [`RegisterNaming::Verbatim`] the identifier text is the register
//! name, which is the wire format the VM tooling expects. Every function
//! then shares one flat namespace.
//!
//! [`RegisterNaming::Scoped`] keeps a frame per function definition and a
//! scope per block. Slots are named `<function>.<ident>`, and a `let` that
//! shadows an existing slot in the same function gets `<function>.<ident>.<n>`.
//! A `.` never appears in an identifier, so slot names cannot collide with
//! source names or with other functions' slots.

use rustc_hash::FxHashMap;

use crate::registers::Register;

/// How identifiers map onto VM registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegisterNaming {
    /// Identifier text is the register name.
    #[default]
    Verbatim,
    /// Function- and block-scoped slots.
    Scoped,
}

/// Symbols of one function definition.
#[derive(Debug)]
struct FunctionFrame {
    /// Label the function is emitted under.
    name: String,
    /// Block scopes, innermost last. Index 0 is the function scope.
    scopes: Vec<FxHashMap<String, Register>>,
    /// Slots created so far per identifier.
    slot_counts: FxHashMap<String, u32>,
}

impl FunctionFrame {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scopes: vec![FxHashMap::default()],
            slot_counts: FxHashMap::default(),
        }
    }

    fn new_slot(&mut self, ident: &str) -> Register {
        let count = self.slot_counts.entry(ident.to_string()).or_insert(0);
        let name = match *count {
            0 => format!("{}.{}", self.name, ident),
            n => format!("{}.{}.{}", self.name, ident, n),
        };
        *count += 1;
        Register::Named(name)
    }

    fn lookup(&self, ident: &str) -> Option<&Register> {
        self.scopes.iter().rev().find_map(|scope| scope.get(ident))
    }
}

/// Symbol table for one compilation.
#[derive(Debug, Default)]
pub struct SymbolTable {
    naming: RegisterNaming,
    /// Function frames, innermost (nested function value) last.
    frames: Vec<FunctionFrame>,
}

impl SymbolTable {
    pub fn new(naming: RegisterNaming) -> Self {
        Self {
            naming,
            frames: Vec::new(),
        }
    }

    /// Start a function definition emitted under `name`.
    pub fn enter_function(&mut self, name: &str) {
        self.frames.push(FunctionFrame::new(name));
    }

    pub fn exit_function(&mut self) {
        self.frames.pop();
    }

    /// Enter a block scope.
    pub fn push_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.scopes.push(FxHashMap::default());
        }
    }

    /// Leave a block scope, dropping its bindings.
    pub fn pop_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut()
            && frame.scopes.len() > 1
        {
            frame.scopes.pop();
        }
    }

    /// Bind `ident` to a fresh slot in the innermost scope (`let`).
    pub fn declare(&mut self, ident: &str) -> Register {
        if self.naming == RegisterNaming::Verbatim {
            return Register::named(ident);
        }
        let Some(frame) = self.frames.last_mut() else {
            return Register::named(ident);
        };
        let slot = frame.new_slot(ident);
        if let Some(scope) = frame.scopes.last_mut() {
            scope.insert(ident.to_string(), slot.clone());
        }
        slot
    }

    /// Bind a parameter in the function scope.
    pub fn declare_parameter(&mut self, ident: &str) -> Register {
        if self.naming == RegisterNaming::Verbatim {
            return Register::named(ident);
        }
        let Some(frame) = self.frames.last_mut() else {
            return Register::named(ident);
        };
        let slot = frame.new_slot(ident);
        frame.scopes[0].insert(ident.to_string(), slot.clone());
        slot
    }

    /// Register for a use of `ident`.
    ///
    /// Names never seen in the current function are bound in its function
    /// scope, matching the language's implicit declaration on first use.
    pub fn resolve(&mut self, ident: &str) -> Register {
        if self.naming == RegisterNaming::Verbatim {
            return Register::named(ident);
        }
        let Some(frame) = self.frames.last_mut() else {
            return Register::named(ident);
        };
        if let Some(slot) = frame.lookup(ident) {
            return slot.clone();
        }
        let slot = frame.new_slot(ident);
        frame.scopes[0].insert(ident.to_string(), slot.clone());
        slot
    }

    /// Function frames currently open.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
