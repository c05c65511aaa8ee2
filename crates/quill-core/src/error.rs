//! Error types for code generation.
//!
//! Every error is fatal: the first one aborts the whole compilation and is
//! returned to the caller of the driver. Each variant records the offending
//! token in its printable form, where it sits in the source, and the
//! lowering trail that led to it (for example `fn0 > while > call 'f'`).

use std::fmt;

use thiserror::Error;

use crate::Span;

/// Syntactic position a node was lowered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodePosition {
    /// Statement inside a block.
    Statement,
    /// Expression whose value lands in a destination register.
    Expression,
    /// Callee of a call expression.
    CallTarget,
    /// Argument list of a call expression.
    ArgumentList,
    /// Entry of a function's parameter list.
    Parameter,
    /// Top-level node handed to the driver as a function.
    Definition,
}

impl NodePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodePosition::Statement => "statement",
            NodePosition::Expression => "expression",
            NodePosition::CallTarget => "call target",
            NodePosition::ArgumentList => "argument list",
            NodePosition::Parameter => "parameter",
            NodePosition::Definition => "top-level definition",
        }
    }
}

impl fmt::Display for NodePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while lowering an AST to instructions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// Left-hand side of `=` is neither an identifier nor a let-binding.
    #[error("at {span}: expecting IDENT or LET on the left side of '=', got {token} [{context}]")]
    MalformedAssignment {
        token: String,
        span: Span,
        context: String,
    },

    /// Infix node with operator text outside the supported set.
    #[error("at {span}: unknown operator text '{operator}' in {token} [{context}]")]
    UnknownOperator {
        operator: String,
        token: String,
        span: Span,
        context: String,
    },

    /// First child of a function definition is not an identifier list.
    #[error("at {span}: expected token type IDENTLIST but got {token} [{context}]")]
    MalformedFunctionDefinition {
        token: String,
        span: Span,
        context: String,
    },

    /// A node reached a dispatch point that has no lowering rule for it.
    #[error("at {span}: unexpected node {token} in {position} position [{context}]")]
    UnhandledNode {
        token: String,
        position: NodePosition,
        span: Span,
        context: String,
    },

    /// A node lacks a child its kind requires.
    #[error("at {span}: {token} is missing child {index} [{context}]")]
    MissingChild {
        token: String,
        index: usize,
        span: Span,
        context: String,
    },

    /// Branch keyword other than `if` or `while`.
    #[error("at {span}: unknown branch keyword '{keyword}' [{context}]")]
    UnknownBranch {
        keyword: String,
        span: Span,
        context: String,
    },
}

impl CodegenError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            CodegenError::MalformedAssignment { span, .. }
            | CodegenError::UnknownOperator { span, .. }
            | CodegenError::MalformedFunctionDefinition { span, .. }
            | CodegenError::UnhandledNode { span, .. }
            | CodegenError::MissingChild { span, .. }
            | CodegenError::UnknownBranch { span, .. } => *span,
        }
    }

    /// Lowering trail at the point of failure.
    pub fn context(&self) -> &str {
        match self {
            CodegenError::MalformedAssignment { context, .. }
            | CodegenError::UnknownOperator { context, .. }
            | CodegenError::MalformedFunctionDefinition { context, .. }
            | CodegenError::UnhandledNode { context, .. }
            | CodegenError::MissingChild { context, .. }
            | CodegenError::UnknownBranch { context, .. } => context,
        }
    }
}
