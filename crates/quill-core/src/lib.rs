//! Core types shared by the quill code generator and its callers.
//!
//! - [`ast`]: the arena-allocated AST handed over by the parser
//! - [`token`]: token kinds and their printable form
//! - [`span`]: source locations
//! - [`error`]: the code generation error taxonomy

pub mod ast;
pub mod error;
pub mod span;
pub mod token;

pub use ast::{AstBuilder, Node, NodeKind};
pub use error::{CodegenError, NodePosition};
pub use span::Span;
pub use token::{Token, TokenKind};
