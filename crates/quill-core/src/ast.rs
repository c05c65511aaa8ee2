//! Arena-allocated AST consumed by the code generator.
//!
//! Every node carries a [`NodeKind`] tag, the token it was built from, and a
//! fixed-arity (per kind) list of children:
//!
//! ```text
//! Block               [stmt...]
//! InfixOperator       [lhs, rhs]
//! Return              [expr...]
//! NumericLiteral      []
//! Identifier          []
//! IdentifierList      [Identifier...]
//! Branch              [condition, Block]
//! FunctionDefinition  [IdentifierList, Block]
//! FunctionReference   []              (token text is the function index)
//! Call                [Identifier, ExpressionList]
//! ExpressionList      [expr...]
//! Let                 [Identifier]
//! ```
//!
//! Nodes are plain `Copy` views into a [`bumpalo::Bump`] arena, the same
//! way the parser hands its trees over. [`AstBuilder`] builds well-shaped
//! trees without a parser.

use bumpalo::Bump;

use crate::{Span, Token, TokenKind};

/// Node-kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Block,
    InfixOperator,
    Return,
    NumericLiteral,
    Identifier,
    IdentifierList,
    Branch,
    FunctionDefinition,
    FunctionReference,
    Call,
    ExpressionList,
    Let,
}

/// A single AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<'ast> {
    /// What this node is.
    pub kind: NodeKind,
    /// The token the node was built from.
    pub token: Token<'ast>,
    /// Ordered children, arity fixed by `kind`.
    pub children: &'ast [Node<'ast>],
}

impl<'ast> Node<'ast> {
    /// Create a node from its parts.
    pub fn new(kind: NodeKind, token: Token<'ast>, children: &'ast [Node<'ast>]) -> Self {
        Self {
            kind,
            token,
            children,
        }
    }

    /// Literal text of the node's token.
    #[inline]
    pub fn text(&self) -> &'ast str {
        self.token.text
    }

    /// Source location of the node's token.
    #[inline]
    pub fn span(&self) -> Span {
        self.token.span
    }

    /// Child at `index`, if present.
    #[inline]
    pub fn child(&self, index: usize) -> Option<&'ast Node<'ast>> {
        self.children.get(index)
    }

    /// Same node with its token moved to `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.token.span = span;
        self
    }
}

/// Builds well-shaped nodes in an arena.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use quill_core::{AstBuilder, NodeKind};
///
/// let arena = Bump::new();
/// let b = AstBuilder::new(&arena);
/// let main = b.function(&[], b.block(&[b.ret(&[b.number("0")])]));
/// assert_eq!(main.kind, NodeKind::FunctionDefinition);
/// ```
#[derive(Clone, Copy)]
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self { arena }
    }

    /// Allocate an arbitrary node. Used for shapes the helpers below don't
    /// produce, including deliberately malformed ones.
    pub fn node(
        &self,
        kind: NodeKind,
        token_kind: TokenKind,
        text: &str,
        children: &[Node<'ast>],
    ) -> Node<'ast> {
        let text = self.arena.alloc_str(text);
        let children = self.arena.alloc_slice_copy(children);
        Node::new(
            kind,
            Token::new(token_kind, text, Span::default()),
            children,
        )
    }

    pub fn number(&self, literal: &str) -> Node<'ast> {
        self.node(NodeKind::NumericLiteral, TokenKind::NumLit, literal, &[])
    }

    pub fn ident(&self, name: &str) -> Node<'ast> {
        self.node(NodeKind::Identifier, TokenKind::Ident, name, &[])
    }

    /// `let <name>`, valid only as the target of `=`.
    pub fn let_binding(&self, name: &str) -> Node<'ast> {
        let ident = self.ident(name);
        self.node(NodeKind::Let, TokenKind::Let, "let", &[ident])
    }

    pub fn infix(&self, operator: &str, lhs: Node<'ast>, rhs: Node<'ast>) -> Node<'ast> {
        self.node(
            NodeKind::InfixOperator,
            TokenKind::InfixOp,
            operator,
            &[lhs, rhs],
        )
    }

    pub fn assign(&self, target: Node<'ast>, value: Node<'ast>) -> Node<'ast> {
        self.infix("=", target, value)
    }

    pub fn ret(&self, values: &[Node<'ast>]) -> Node<'ast> {
        self.node(NodeKind::Return, TokenKind::Return, "return", values)
    }

    pub fn block(&self, statements: &[Node<'ast>]) -> Node<'ast> {
        self.node(NodeKind::Block, TokenKind::Block, "{", statements)
    }

    pub fn branch(&self, keyword: &str, condition: Node<'ast>, body: Node<'ast>) -> Node<'ast> {
        self.node(
            NodeKind::Branch,
            TokenKind::Branch,
            keyword,
            &[condition, body],
        )
    }

    pub fn if_branch(&self, condition: Node<'ast>, body: Node<'ast>) -> Node<'ast> {
        self.branch("if", condition, body)
    }

    pub fn while_branch(&self, condition: Node<'ast>, body: Node<'ast>) -> Node<'ast> {
        self.branch("while", condition, body)
    }

    /// Function definition with the given parameter names and body block.
    pub fn function(&self, params: &[&str], body: Node<'ast>) -> Node<'ast> {
        let idents: Vec<Node<'ast>> = params.iter().map(|p| self.ident(p)).collect();
        let params = self.node(NodeKind::IdentifierList, TokenKind::IdentList, "(", &idents);
        self.node(
            NodeKind::FunctionDefinition,
            TokenKind::FunDef,
            "fn",
            &[params, body],
        )
    }

    /// Reference to the top-level function at `index`.
    pub fn function_ref(&self, index: usize) -> Node<'ast> {
        self.node(
            NodeKind::FunctionReference,
            TokenKind::FnRef,
            &index.to_string(),
            &[],
        )
    }

    pub fn call(&self, callee: &str, args: &[Node<'ast>]) -> Node<'ast> {
        let target = self.ident(callee);
        let args = self.node(NodeKind::ExpressionList, TokenKind::ExprList, "(", args);
        self.node(NodeKind::Call, TokenKind::Call, callee, &[target, args])
    }
}
