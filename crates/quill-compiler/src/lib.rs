//! Quill code generator
//!
//! Lowers a parsed Quill program to the line-oriented text consumed by the
//! register+stack VM.
//!
//! ## Architecture
//!
//! - **Entry**: the entry function is lowered under the label `main`, its
//!   label line is blanked and the code is closed with `END`
//! - **Functions**: each top-level function is lowered under `fn<index>`,
//!   which is what `fnref(index)` loads
//!
//! ## Modules
//!
//! - [`codegen`]: AST lowering with destination-passing expressions
//! - [`emit`]: Append-only instruction buffer
//! - [`instruction`]: Typed instructions and their text form
//! - [`labels`]: Jump label allocation
//! - [`program`]: Compiled program layout
//! - [`registers`]: Named registers and the temporary register pool
//! - [`symbols`]: Identifier to register mapping
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use quill_compiler::compile_to_text;
//! use quill_core::AstBuilder;
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//! let body = ast.block(&[
//!     ast.assign(ast.ident("x"), ast.number("2")),
//!     ast.ret(&[ast.ident("x")]),
//! ]);
//! let main = ast.function(&[], body);
//!
//! let text = compile_to_text(&[], &main).unwrap();
//! assert_eq!(
//!     text,
//!     "\nLOAD 2 %x\nMOVE %x %.t0\nPUSH %.t0\nRETURN\nEND\n##############\n"
//! );
//! ```

pub mod codegen;
pub mod emit;
pub mod instruction;
pub mod labels;
pub mod program;
pub mod registers;
pub mod symbols;

pub use codegen::{CodeGenerator, Destination};
pub use emit::InstructionBuffer;
pub use instruction::{BinaryOp, Instruction, SEPARATOR};
pub use labels::{Label, LabelAllocator};
pub use program::{ENTRY_LABEL, FunctionCode, Program};
pub use registers::{Register, RegisterPool};
pub use symbols::{RegisterNaming, SymbolTable};

// Re-export the error type from core for convenience
pub use quill_core::CodegenError;

use quill_core::Node;

/// Options for a [`Compiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompilerOptions {
    /// How identifiers map onto VM registers.
    pub register_naming: RegisterNaming,
}

impl CompilerOptions {
    pub fn with_register_naming(mut self, naming: RegisterNaming) -> Self {
        self.register_naming = naming;
        self
    }
}

/// The main compiler entry point.
///
/// A `Compiler` holds no state between calls: compiling the same input
/// twice produces the same text.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompilerOptions,
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile a program.
    ///
    /// `entry` is lowered first, then `functions` in order. Temporaries,
    /// labels and symbols are shared by the whole compilation, so labels
    /// are unique across the output. The first error aborts the compilation.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(
        &self,
        functions: &[Node<'_>],
        entry: &Node<'_>,
    ) -> Result<Program, CodegenError> {
        let mut generator = CodeGenerator::new(self.options.register_naming);

        let entry = {
            #[cfg(feature = "profiling")]
            profiling::scope!("entry");

            generator.generate_function(entry, ENTRY_LABEL)?
        };

        let functions = {
            #[cfg(feature = "profiling")]
            profiling::scope!("functions");

            functions
                .iter()
                .enumerate()
                .map(|(index, node)| {
                    let label = Label::function(index);
                    let code = generator.generate_function(node, label.as_str())?;
                    Ok(FunctionCode { index, label, code })
                })
                .collect::<Result<Vec<_>, CodegenError>>()?
        };

        Ok(Program::new(entry, functions))
    }
}

/// Compile with default options and render the VM text.
pub fn compile_to_text(functions: &[Node<'_>], entry: &Node<'_>) -> Result<String, CodegenError> {
    Compiler::default()
        .compile(functions, entry)
        .map(|program| program.render())
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use quill_core::AstBuilder;

    use super::*;

    #[test]
    fn labels_are_unique_across_functions() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let looped = |cond: &str| {
            ast.function(
                &[],
                ast.block(&[ast.while_branch(ast.ident(cond), ast.block(&[]))]),
            )
        };
        let main = looped("a");
        let functions = [looped("b")];

        let program = Compiler::default().compile(&functions, &main).unwrap();
        let text = program.render();
        assert!(text.contains("&L0:\n"));
        assert!(text.contains("&L3:\n"));
        assert_eq!(text.matches("&L1:\n").count(), 1);
    }

    #[test]
    fn options_select_naming() {
        let options = CompilerOptions::default().with_register_naming(RegisterNaming::Scoped);
        let compiler = Compiler::new(options);
        assert_eq!(compiler.options().register_naming, RegisterNaming::Scoped);
        assert_eq!(
            CompilerOptions::default().register_naming,
            RegisterNaming::Verbatim
        );
    }

    #[test]
    fn error_in_function_aborts() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let main = ast.function(&[], ast.block(&[]));
        let functions = [ast.block(&[])];

        let err = Compiler::default().compile(&functions, &main).unwrap_err();
        assert!(err.to_string().contains("top-level definition"));
    }
}
