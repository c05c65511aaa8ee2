//! Append-only instruction buffer.
//!
//! The generator only ever appends. Forward jump targets are never
//! patched: a label is defined when the generator reaches its position in
//! program order, and the VM resolves names when it loads the text.
//!
//! # Example
//!
//! ```
//! use quill_compiler::emit::InstructionBuffer;
//! use quill_compiler::registers::Register;
//!
//! let mut buf = InstructionBuffer::new();
//! buf.emit_load("7", Register::named("x"));
//! buf.emit_push(Register::named("x"));
//! buf.emit_return();
//! assert_eq!(buf.render(), "LOAD 7 %x\nPUSH %x\nRETURN\n");
//! ```

use crate::instruction::{BinaryOp, Instruction};
use crate::labels::Label;
use crate::registers::Register;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionBuffer {
    code: Vec<Instruction>,
}

impl InstructionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Basic Emission
    // ==========================================================================

    pub fn emit(&mut self, instr: Instruction) {
        self.code.push(instr);
    }

    pub fn define_label(&mut self, label: Label) {
        self.emit(Instruction::Label(label));
    }

    // ==========================================================================
    // Data Movement
    // ==========================================================================

    pub fn emit_load(&mut self, literal: &str, dst: Register) {
        self.emit(Instruction::Load {
            literal: literal.to_string(),
            dst,
        });
    }

    pub fn emit_load_address(&mut self, label: Label, dst: Register) {
        self.emit(Instruction::LoadAddress { label, dst });
    }

    pub fn emit_move(&mut self, src: Register, dst: Register) {
        self.emit(Instruction::Move { src, dst });
    }

    pub fn emit_push(&mut self, src: Register) {
        self.emit(Instruction::Push(src));
    }

    pub fn emit_pop(&mut self, dst: Register) {
        self.emit(Instruction::Pop(dst));
    }

    // ==========================================================================
    // Arithmetic / Logic
    // ==========================================================================

    pub fn emit_binary(&mut self, op: BinaryOp, lhs: Register, rhs: Register, dst: Register) {
        self.emit(Instruction::Binary { op, lhs, rhs, dst });
    }

    /// Negate `reg` in place.
    pub fn emit_not(&mut self, reg: Register) {
        self.emit(Instruction::Not {
            src: reg.clone(),
            dst: reg,
        });
    }

    // ==========================================================================
    // Control Flow
    // ==========================================================================

    pub fn emit_jump(&mut self, label: Label) {
        self.emit(Instruction::Jump(label));
    }

    pub fn emit_jump_if(&mut self, label: Label, cond: Register) {
        self.emit(Instruction::JumpIf { label, cond });
    }

    pub fn emit_call_value(&mut self, target: Register) {
        self.emit(Instruction::CallValue(target));
    }

    pub fn emit_return(&mut self) {
        self.emit(Instruction::Return);
    }

    pub fn emit_out(&mut self, src: Register) {
        self.emit(Instruction::Out(src));
    }

    // ==========================================================================
    // Access
    // ==========================================================================

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.code
    }

    pub fn into_vec(self) -> Vec<Instruction> {
        self.code
    }

    /// Text form, one line per instruction, each terminated by `\n`.
    pub fn render(&self) -> String {
        render(&self.code)
    }
}

/// Render instructions one per line, each terminated by `\n`.
pub fn render(code: &[Instruction]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for instr in code {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{instr}");
    }
    out
}
