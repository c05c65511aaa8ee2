//! Typed instructions for the register+stack VM.
//!
//! Each [`Instruction`] renders to exactly one line of the textual format
//! the VM loads:
//!
//! ```text
//! LOAD 5 %x          load immediate
//! LOAD &fn0 %f       load function address
//! MOVE %x %y         copy register
//! SUB %a %b %b       b := a - b
//! NOT %c %c          logical negation
//! JMP &L1            unconditional jump
//! JMPC &L0 %c        jump when c is non-zero
//! PUSH %x / POP %x   operand stack
//! CALLV %f           call the address held in f
//! RETURN / OUT %x / END
//! &L0:               label definition
//! ##############     section separator
//! ```

use std::fmt;

use crate::labels::Label;
use crate::registers::Register;

/// Section separator between the entry code and each function.
pub const SEPARATOR: &str = "##############";

/// Two-operand opcode computing `dst := lhs OP rhs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    CmpEq,
    CmpNe,
    CmpLt,
    CmpGt,
}

impl BinaryOp {
    /// Map source operator text to its opcode.
    pub fn from_operator(text: &str) -> Option<Self> {
        match text {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "==" => Some(BinaryOp::CmpEq),
            "!=" => Some(BinaryOp::CmpNe),
            "<" => Some(BinaryOp::CmpLt),
            ">" => Some(BinaryOp::CmpGt),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            BinaryOp::Add => "ADD",
            BinaryOp::Sub => "SUB",
            BinaryOp::Mul => "MUL",
            BinaryOp::Div => "DIV",
            BinaryOp::CmpEq => "CMPE",
            BinaryOp::CmpNe => "CMPNE",
            BinaryOp::CmpLt => "CMPL",
            BinaryOp::CmpGt => "CMPG",
        }
    }
}

/// One line of VM code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `&name:`
    Label(Label),
    /// Empty line.
    Blank,
    /// `LOAD <literal> %dst`. The literal is the source text, unparsed.
    Load { literal: String, dst: Register },
    /// `LOAD &<label> %dst`
    LoadAddress { label: Label, dst: Register },
    /// `MOVE %src %dst`
    Move { src: Register, dst: Register },
    /// `<OP> %lhs %rhs %dst`
    Binary {
        op: BinaryOp,
        lhs: Register,
        rhs: Register,
        dst: Register,
    },
    /// `NOT %src %dst`
    Not { src: Register, dst: Register },
    /// `JMP &<label>`
    Jump(Label),
    /// `JMPC &<label> %cond`
    JumpIf { label: Label, cond: Register },
    /// `PUSH %src`
    Push(Register),
    /// `POP %dst`
    Pop(Register),
    /// `CALLV %target`
    CallValue(Register),
    /// `RETURN`
    Return,
    /// `OUT %src`
    Out(Register),
    /// `END`
    End,
    /// `##############`
    Separator,
}

impl Instruction {
    /// Target of a `JMP`/`JMPC`.
    pub fn jump_target(&self) -> Option<&Label> {
        match self {
            Instruction::Jump(label) | Instruction::JumpIf { label, .. } => Some(label),
            _ => None,
        }
    }

    /// Label defined by this line.
    pub fn defined_label(&self) -> Option<&Label> {
        match self {
            Instruction::Label(label) => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Label(label) => write!(f, "&{label}:"),
            Instruction::Blank => Ok(()),
            Instruction::Load { literal, dst } => write!(f, "LOAD {literal} %{dst}"),
            Instruction::LoadAddress { label, dst } => write!(f, "LOAD &{label} %{dst}"),
            Instruction::Move { src, dst } => write!(f, "MOVE %{src} %{dst}"),
            Instruction::Binary { op, lhs, rhs, dst } => {
                write!(f, "{} %{lhs} %{rhs} %{dst}", op.mnemonic())
            }
            Instruction::Not { src, dst } => write!(f, "NOT %{src} %{dst}"),
            Instruction::Jump(label) => write!(f, "JMP &{label}"),
            Instruction::JumpIf { label, cond } => write!(f, "JMPC &{label} %{cond}"),
            Instruction::Push(src) => write!(f, "PUSH %{src}"),
            Instruction::Pop(dst) => write!(f, "POP %{dst}"),
            Instruction::CallValue(target) => write!(f, "CALLV %{target}"),
            Instruction::Return => f.write_str("RETURN"),
            Instruction::Out(src) => write!(f, "OUT %{src}"),
            Instruction::End => f.write_str("END"),
            Instruction::Separator => f.write_str(SEPARATOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_mapping() {
        let table = [
            ("+", "ADD"),
            ("-", "SUB"),
            ("*", "MUL"),
            ("/", "DIV"),
            ("==", "CMPE"),
            ("!=", "CMPNE"),
            ("<", "CMPL"),
            (">", "CMPG"),
        ];
        for (text, mnemonic) in table {
            assert_eq!(BinaryOp::from_operator(text).unwrap().mnemonic(), mnemonic);
        }
        assert_eq!(BinaryOp::from_operator("%"), None);
        assert_eq!(BinaryOp::from_operator("="), None);
    }

    #[test]
    fn binary_renders_left_operand_first() {
        let instr = Instruction::Binary {
            op: BinaryOp::Sub,
            lhs: Register::Temp(0),
            rhs: Register::named("r"),
            dst: Register::named("r"),
        };
        assert_eq!(instr.to_string(), "SUB %.t0 %r %r");
    }

    #[test]
    fn wire_format() {
        let t = Register::Temp(1);
        let cases = [
            (Instruction::Label(Label::new("L0")), "&L0:"),
            (Instruction::Blank, ""),
            (
                Instruction::Load {
                    literal: "42".to_string(),
                    dst: t.clone(),
                },
                "LOAD 42 %.t1",
            ),
            (
                Instruction::LoadAddress {
                    label: Label::new("fn3"),
                    dst: Register::named("f"),
                },
                "LOAD &fn3 %f",
            ),
            (
                Instruction::Move {
                    src: Register::named("x"),
                    dst: t.clone(),
                },
                "MOVE %x %.t1",
            ),
            (
                Instruction::Not {
                    src: t.clone(),
                    dst: t.clone(),
                },
                "NOT %.t1 %.t1",
            ),
            (Instruction::Jump(Label::new("L2")), "JMP &L2"),
            (
                Instruction::JumpIf {
                    label: Label::new("L0"),
                    cond: t.clone(),
                },
                "JMPC &L0 %.t1",
            ),
            (Instruction::Push(t.clone()), "PUSH %.t1"),
            (Instruction::Pop(t.clone()), "POP %.t1"),
            (Instruction::CallValue(Register::named("f")), "CALLV %f"),
            (Instruction::Return, "RETURN"),
            (Instruction::Out(t), "OUT %.t1"),
            (Instruction::End, "END"),
            (Instruction::Separator, "##############"),
        ];
        for (instr, text) in cases {
            assert_eq!(instr.to_string(), text);
        }
    }

    #[test]
    fn jump_targets() {
        let jump = Instruction::Jump(Label::new("L1"));
        assert_eq!(jump.jump_target(), Some(&Label::new("L1")));
        assert_eq!(Instruction::Return.jump_target(), None);
        assert_eq!(
            Instruction::Label(Label::new("L1")).defined_label(),
            Some(&Label::new("L1"))
        );
    }
}
