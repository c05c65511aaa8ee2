//! Quill
//!
//! Lowers a quill abstract syntax tree to the text format of the quill
//! register+stack VM.
//!
//! - [`quill_core`] holds the AST node model, tokens and errors
//! - [`quill_compiler`] holds the code generator
//!
//! # Example
//!
//! ```
//! use quill::prelude::*;
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//! let main = ast.function(&[], ast.block(&[ast.call("print", &[ast.number("7")])]));
//!
//! let program = Compiler::default().compile(&[], &main).unwrap();
//! assert!(program.render().contains("OUT %.t0\n"));
//! ```

pub use bumpalo::Bump;
pub use quill_compiler::{
    CodeGenerator, Compiler, CompilerOptions, FunctionCode, Instruction, Label, Program, Register,
    RegisterNaming, compile_to_text,
};
pub use quill_core::{
    AstBuilder, CodegenError, Node, NodeKind, NodePosition, Span, Token, TokenKind,
};

pub mod compiler {
    pub use quill_compiler::*;
}

pub mod core {
    pub use quill_core::*;
}

// Re-export main types
pub mod prelude {
    pub use bumpalo::Bump;
    pub use quill_compiler::{Compiler, CompilerOptions, Program, RegisterNaming, compile_to_text};
    pub use quill_core::{AstBuilder, CodegenError, Node, NodeKind, Span, Token, TokenKind};
}
