//! Token types attached to AST nodes.
//!
//! The kinds and their upper-case names follow the token-type table the
//! lexer and parser share. Code generation only reads tokens: the kind to
//! describe a node in diagnostics, and the literal text for operators,
//! identifiers, numeric literals and function indices.

use std::fmt;

use crate::Span;

/// A token as seen by the code generator.
///
/// The `'ast` lifetime refers to the arena holding the lexeme text.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'ast> {
    /// The type of token.
    pub kind: TokenKind,
    /// The literal source text of this token (allocated in arena).
    pub text: &'ast str,
    /// Location in source.
    pub span: Span,
}

impl<'ast> Token<'ast> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, text: &'ast str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Printable form used in diagnostics: `TOKEN('INFOP', '+')`.
    pub fn print_string(&self) -> String {
        format!("TOKEN('{}', '{}')", self.kind.name(), self.text)
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.text, self.span)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print_string())
    }
}

/// All token types produced by the lexer and parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    OpenCurly,
    /// `}`
    CloseCurly,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Infix operator: `=`, `+`, `-`, `*`, `/`, `==`, `!=`, `<`, `>`
    InfixOp,
    /// `return`
    Return,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// Comparison operator as lexed, before the parser folds it into `InfixOp`
    Comparison,
    /// User-defined identifier
    Ident,
    /// `if` / `while`
    Branch,
    /// Integer literal
    NumLit,
    /// Synthetic: statement block
    Block,
    /// Synthetic: parameter list of a function definition
    IdentList,
    /// Synthetic: function definition
    FunDef,
    /// Synthetic: argument list of a call
    ExprList,
    /// Synthetic: call expression
    Call,
    /// `let`
    Let,
    /// Synthetic: reference to a top-level function by index
    FnRef,
}

impl TokenKind {
    /// Upper-case name of the kind as printed in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::OpenCurly => "OCBR",
            TokenKind::CloseCurly => "CCBR",
            TokenKind::OpenParen => "OBR",
            TokenKind::CloseParen => "CBR",
            TokenKind::InfixOp => "INFOP",
            TokenKind::Return => "RETURN",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMIC",
            TokenKind::Comparison => "COMP",
            TokenKind::Ident => "IDENT",
            TokenKind::Branch => "BRANCH",
            TokenKind::NumLit => "NUMLIT",
            TokenKind::Block => "BLOCK",
            TokenKind::IdentList => "IDENTLIST",
            TokenKind::FunDef => "FUNDEF",
            TokenKind::ExprList => "EXPRESSIONLIST",
            TokenKind::Call => "CALL",
            TokenKind::Let => "LET",
            TokenKind::FnRef => "FNREF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_string_matches_diagnostic_form() {
        let token = Token::new(TokenKind::InfixOp, "+", Span::new(1, 3, 1));
        assert_eq!(token.print_string(), "TOKEN('INFOP', '+')");
        assert_eq!(token.to_string(), "TOKEN('INFOP', '+')");
    }

    #[test]
    fn synthetic_kinds_have_names() {
        assert_eq!(TokenKind::ExprList.name(), "EXPRESSIONLIST");
        assert_eq!(TokenKind::IdentList.to_string(), "IDENTLIST");
        assert_eq!(TokenKind::FnRef.name(), "FNREF");
    }

    #[test]
    fn debug_includes_text_and_span() {
        let token = Token::new(TokenKind::Ident, "x", Span::new(2, 7, 1));
        assert_eq!(format!("{:?}", token), "Ident(\"x\" @ 2:7)");
    }
}
