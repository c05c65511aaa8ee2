//! A compiled program and its text layout.
//!
//! ```text
//!                     <- entry label line, left empty
//! <entry code>
//! END
//! ##############
//! &fn0:
//! <fn0 code>
//! ##############
//! &fn1:
//! ...
//! ```

use std::fmt;

use crate::instruction::Instruction;
use crate::labels::Label;

/// Label the entry function is lowered under.
pub const ENTRY_LABEL: &str = "main";

static ENTRY_TAIL: [Instruction; 2] = [Instruction::End, Instruction::Separator];
static FUNCTION_TAIL: Instruction = Instruction::Separator;

/// Code of one top-level function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCode {
    /// Position in the function list; `fnref(index)` refers to it.
    pub index: usize,
    pub label: Label,
    /// Starts with the `&fn<index>:` label.
    pub code: Vec<Instruction>,
}

/// Output of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Entry code, starting with a blank line in place of its label.
    pub entry: Vec<Instruction>,
    pub functions: Vec<FunctionCode>,
}

impl Program {
    /// Assemble a program, blanking the entry function's own label.
    pub fn new(mut entry: Vec<Instruction>, functions: Vec<FunctionCode>) -> Self {
        if let Some(first) = entry.first_mut()
            && let Some(label) = first.defined_label()
            && label.as_str() == ENTRY_LABEL
        {
            *first = Instruction::Blank;
        }
        Self { entry, functions }
    }

    /// Every line of the program in output order, with `END` and the
    /// separators in place.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.entry.iter().chain(ENTRY_TAIL.iter()).chain(
            self.functions
                .iter()
                .flat_map(|f| f.code.iter().chain(std::iter::once(&FUNCTION_TAIL))),
        )
    }

    /// Function compiled under `index`.
    pub fn function(&self, index: usize) -> Option<&FunctionCode> {
        self.functions.get(index)
    }

    /// Text handed to the VM.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in self.instructions() {
            writeln!(f, "{instr}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::Register;

    fn function(index: usize, body: Vec<Instruction>) -> FunctionCode {
        let label = Label::function(index);
        let mut code = vec![Instruction::Label(label.clone())];
        code.extend(body);
        FunctionCode { index, label, code }
    }

    #[test]
    fn entry_label_is_blanked() {
        let program = Program::new(
            vec![
                Instruction::Label(Label::new(ENTRY_LABEL)),
                Instruction::Return,
            ],
            Vec::new(),
        );
        assert_eq!(program.entry[0], Instruction::Blank);
        assert_eq!(program.render(), "\nRETURN\nEND\n##############\n");
    }

    #[test]
    fn other_labels_are_kept() {
        let program = Program::new(vec![Instruction::Label(Label::new("L0"))], Vec::new());
        assert_eq!(program.render(), "&L0:\nEND\n##############\n");
    }

    #[test]
    fn functions_follow_separators() {
        let program = Program::new(
            vec![Instruction::Label(Label::new(ENTRY_LABEL))],
            vec![
                function(0, vec![Instruction::Pop(Register::named("a"))]),
                function(1, vec![Instruction::Return]),
            ],
        );

        assert_eq!(
            program.render(),
            "\nEND\n##############\n&fn0:\nPOP %a\n##############\n&fn1:\nRETURN\n##############\n"
        );
        assert_eq!(program.to_string(), program.render());
        assert_eq!(program.function(1).map(|f| f.label.as_str()), Some("fn1"));
    }
}
