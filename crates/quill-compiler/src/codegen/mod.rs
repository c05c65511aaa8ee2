//! AST lowering.
//!
//! The [`CodeGenerator`] walks one function-definition tree at a time and
//! appends instructions to its buffer:
//! - statements (blocks, branches, returns) in `stmt`
//! - expressions (literals, identifiers, infix operators) in `expr`
//! - calls and the `print` builtin in `call`
//! - function definitions in `function`
//!
//! Expressions are lowered *into* a [`Destination`] chosen by the caller.
//! Every temporary borrowed while lowering a node is released before the
//! lowering call returns, on the error path too, so the pool is balanced
//! after every top-level function.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use quill_compiler::codegen::CodeGenerator;
//! use quill_compiler::symbols::RegisterNaming;
//! use quill_core::AstBuilder;
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//! let body = ast.block(&[ast.ret(&[ast.number("1")])]);
//! let main = ast.function(&[], body);
//!
//! let mut generator = CodeGenerator::new(RegisterNaming::Verbatim);
//! let code = generator.generate_function(&main, "main").unwrap();
//! assert_eq!(code.len(), 4);
//! assert_eq!(generator.registers().outstanding(), 0);
//! ```

mod call;
mod expr;
mod function;
mod stmt;

use quill_core::{CodegenError, Node, NodeKind, NodePosition};

use crate::emit::InstructionBuffer;
use crate::instruction::Instruction;
use crate::labels::LabelAllocator;
use crate::registers::{Register, RegisterPool};
use crate::symbols::{RegisterNaming, SymbolTable};

type Result<T> = std::result::Result<T, CodegenError>;

/// Where the value of an expression goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Nobody reads the value.
    ///
    /// Numeric literals emit nothing. Other expressions still run for their
    /// effects and write into the [`DISCARD`](crate::registers::DISCARD)
    /// register.
    Discard,
    /// Value lands in this register.
    Register(Register),
}

impl Destination {
    /// Register the value is written to.
    pub fn register(&self) -> Register {
        match self {
            Destination::Discard => Register::discard(),
            Destination::Register(reg) => reg.clone(),
        }
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Destination::Discard)
    }
}

/// Lowers function definitions to VM instructions.
///
/// One generator is used for a whole compilation: temporaries, labels and
/// symbols persist across functions so label names stay unique program-wide.
#[derive(Debug)]
pub struct CodeGenerator {
    registers: RegisterPool,
    labels: LabelAllocator,
    symbols: SymbolTable,
    out: InstructionBuffer,
    /// Lowering trail reported in errors.
    trail: Vec<String>,
}

impl CodeGenerator {
    pub fn new(naming: RegisterNaming) -> Self {
        Self {
            registers: RegisterPool::new(),
            labels: LabelAllocator::new(),
            symbols: SymbolTable::new(naming),
            out: InstructionBuffer::new(),
            trail: Vec::new(),
        }
    }

    /// Lower a function definition emitted under the label `name`.
    ///
    /// Returns the instructions for this function only. The first one is
    /// always the `&name:` label.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate_function(&mut self, node: &Node<'_>, name: &str) -> Result<Vec<Instruction>> {
        if node.kind != NodeKind::FunctionDefinition {
            return Err(self.unhandled(node, NodePosition::Definition));
        }

        let result = self.lower_expr(node, &Destination::Register(Register::named(name)));
        let code = std::mem::take(&mut self.out).into_vec();
        debug_assert_eq!(self.registers.outstanding(), 0);
        debug_assert_eq!(self.symbols.depth(), 0);
        result.map(|()| code)
    }

    pub fn registers(&self) -> &RegisterPool {
        &self.registers
    }

    pub fn labels(&self) -> &LabelAllocator {
        &self.labels
    }

    // ==========================================================================
    // Dispatch
    // ==========================================================================

    /// Lower any node. Statement kinds ignore `dst`.
    fn lower(&mut self, node: &Node<'_>, dst: &Destination) -> Result<()> {
        match node.kind {
            NodeKind::Block => self.lower_block(node),
            NodeKind::Branch => self.lower_branch(node),
            NodeKind::Return => self.lower_return(node),
            NodeKind::InfixOperator
            | NodeKind::NumericLiteral
            | NodeKind::Identifier
            | NodeKind::FunctionReference
            | NodeKind::FunctionDefinition
            | NodeKind::Call => self.lower_expr(node, dst),
            NodeKind::IdentifierList | NodeKind::ExpressionList | NodeKind::Let => {
                let position = if dst.is_discard() {
                    NodePosition::Statement
                } else {
                    NodePosition::Expression
                };
                Err(self.unhandled(node, position))
            }
        }
    }

    /// Lower a node whose value nobody reads.
    fn lower_stmt(&mut self, node: &Node<'_>) -> Result<()> {
        self.lower(node, &Destination::Discard)
    }

    /// Lower a node that must produce a value.
    fn lower_expr(&mut self, node: &Node<'_>, dst: &Destination) -> Result<()> {
        match node.kind {
            NodeKind::InfixOperator => self.lower_infix(node, dst),
            NodeKind::NumericLiteral => {
                self.lower_literal(node, dst);
                Ok(())
            }
            NodeKind::Identifier => {
                self.lower_identifier(node, dst);
                Ok(())
            }
            NodeKind::FunctionReference => {
                self.lower_function_ref(node, dst);
                Ok(())
            }
            NodeKind::FunctionDefinition => self.lower_function(node, dst),
            NodeKind::Call => self.lower_call(node, dst),
            _ => Err(self.unhandled(node, NodePosition::Expression)),
        }
    }

    // ==========================================================================
    // Scoped Resources
    // ==========================================================================

    /// Run `f` with a borrowed temporary, releasing it whatever `f` returns.
    fn with_temp<R>(&mut self, f: impl FnOnce(&mut Self, &Register) -> Result<R>) -> Result<R> {
        let temp = self.registers.borrow();
        let result = f(self, &temp);
        self.registers.release(temp);
        result
    }

    /// Run `f` with `frame` appended to the error trail.
    fn with_context<R>(
        &mut self,
        frame: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.trail.push(frame.into());
        let result = f(self);
        self.trail.pop();
        result
    }

    // ==========================================================================
    // Errors
    // ==========================================================================

    fn context(&self) -> String {
        self.trail.join(" > ")
    }

    /// Child `index` of `node`, or a `MissingChild` error.
    fn child<'ast>(&self, node: &Node<'ast>, index: usize) -> Result<&'ast Node<'ast>> {
        node.child(index).ok_or_else(|| CodegenError::MissingChild {
            token: node.token.print_string(),
            index,
            span: node.span(),
            context: self.context(),
        })
    }

    fn unhandled(&self, node: &Node<'_>, position: NodePosition) -> CodegenError {
        CodegenError::UnhandledNode {
            token: node.token.print_string(),
            position,
            span: node.span(),
            context: self.context(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use quill_core::AstBuilder;

    use super::*;

    fn generate(naming: RegisterNaming, node: &Node<'_>) -> Result<String> {
        let mut generator = CodeGenerator::new(naming);
        let code = generator.generate_function(node, "main")?;
        assert_eq!(generator.registers().outstanding(), 0);
        Ok(crate::emit::render(&code))
    }

    #[test]
    fn destination_register() {
        assert_eq!(Destination::Discard.register(), Register::discard());
        assert_eq!(
            Destination::Register(Register::Temp(2)).register(),
            Register::Temp(2)
        );
    }

    #[test]
    fn top_level_must_be_function() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let block = ast.block(&[]);

        let err = generate(RegisterNaming::Verbatim, &block).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnhandledNode {
                position: NodePosition::Definition,
                ..
            }
        ));
    }

    #[test]
    fn discarded_literal_emits_nothing() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let main = ast.function(&[], ast.block(&[ast.number("5")]));

        assert_eq!(
            generate(RegisterNaming::Verbatim, &main).unwrap(),
            "&main:\n"
        );
    }

    #[test]
    fn discarded_identifier_writes_sink() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let main = ast.function(&[], ast.block(&[ast.ident("x")]));

        assert_eq!(
            generate(RegisterNaming::Verbatim, &main).unwrap(),
            "&main:\nMOVE %x %NONE\n"
        );
    }

    #[test]
    fn let_is_not_a_statement() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let main = ast.function(&[], ast.block(&[ast.let_binding("x")]));

        let err = generate(RegisterNaming::Verbatim, &main).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnhandledNode {
                position: NodePosition::Statement,
                ..
            }
        ));
        assert_eq!(err.context(), "main");
    }

    #[test]
    fn error_trail_names_enclosing_constructs() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let cond = ast.ident("c");
        let bad = ast.infix("%", ast.ident("a"), ast.ident("b"));
        let body = ast.block(&[ast.call("f", &[bad])]);
        let main = ast.function(&[], ast.block(&[ast.while_branch(cond, body)]));

        let err = generate(RegisterNaming::Verbatim, &main).unwrap_err();
        assert_eq!(err.context(), "main > while > call 'f' > infix '%'");
    }
}
