//! Function definitions.

use quill_core::{CodegenError, Node, NodeKind, NodePosition};

use super::{CodeGenerator, Destination, Result};
use crate::labels::Label;

impl CodeGenerator {
    /// ```text
    /// &<dst>:
    ///     POP %param0
    ///     POP %param1
    ///     <body>
    /// ```
    ///
    /// The destination register's name becomes the entry label.
    pub(super) fn lower_function(&mut self, node: &Node<'_>, dst: &Destination) -> Result<()> {
        let params = self.child(node, 0)?;
        if params.kind != NodeKind::IdentifierList {
            return Err(CodegenError::MalformedFunctionDefinition {
                token: params.token.print_string(),
                span: params.span(),
                context: self.context(),
            });
        }
        let body = self.child(node, 1)?;

        let name = dst.register().to_string();
        self.out.define_label(Label::new(name.as_str()));

        self.symbols.enter_function(&name);
        let result = self.with_context(name.as_str(), |this| {
            for param in params.children {
                if param.kind != NodeKind::Identifier {
                    return Err(this.unhandled(param, NodePosition::Parameter));
                }
                let slot = this.symbols.declare_parameter(param.text());
                this.out.emit_pop(slot);
            }
            this.lower_stmt(body)
        });
        self.symbols.exit_function();
        result
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use quill_core::{AstBuilder, CodegenError, NodeKind, NodePosition, TokenKind};

    use crate::codegen::CodeGenerator;
    use crate::emit::render;
    use crate::symbols::RegisterNaming;

    #[test]
    fn parameters_popped_in_order() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let body = ast.block(&[ast.ret(&[ast.infix("-", ast.ident("a"), ast.ident("b"))])]);
        let f = ast.function(&["a", "b"], body);

        let mut generator = CodeGenerator::new(RegisterNaming::Verbatim);
        let code = generator.generate_function(&f, "fn0").unwrap();
        assert_eq!(
            render(&code),
            "&fn0:\n\
             POP %a\n\
             POP %b\n\
             MOVE %a %.t1\n\
             MOVE %b %.t0\n\
             SUB %.t1 %.t0 %.t0\n\
             PUSH %.t0\n\
             RETURN\n"
        );
    }

    #[test]
    fn nested_definition_is_labelled_by_target() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let inner = ast.function(&["n"], ast.block(&[ast.ret(&[ast.ident("n")])]));
        let main = ast.function(&[], ast.block(&[ast.assign(ast.ident("g"), inner)]));

        let mut generator = CodeGenerator::new(RegisterNaming::Verbatim);
        let code = generator.generate_function(&main, "main").unwrap();
        assert_eq!(
            render(&code),
            "&main:\n\
             &g:\n\
             POP %n\n\
             MOVE %n %.t0\n\
             PUSH %.t0\n\
             RETURN\n"
        );
    }

    #[test]
    fn scoped_parameters() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let body = ast.block(&[ast.ret(&[ast.ident("a")])]);
        let f = ast.function(&["a"], body);

        let mut generator = CodeGenerator::new(RegisterNaming::Scoped);
        let code = generator.generate_function(&f, "fn0").unwrap();
        assert_eq!(
            render(&code),
            "&fn0:\nPOP %fn0.a\nMOVE %fn0.a %.t0\nPUSH %.t0\nRETURN\n"
        );
    }

    #[test]
    fn parameter_list_required() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let f = ast.node(
            NodeKind::FunctionDefinition,
            TokenKind::FunDef,
            "fn",
            &[ast.ident("a"), ast.block(&[])],
        );

        let mut generator = CodeGenerator::new(RegisterNaming::Verbatim);
        let err = generator.generate_function(&f, "fn0").unwrap_err();
        assert!(matches!(err, CodegenError::MalformedFunctionDefinition { .. }));
        assert!(err.to_string().contains("IDENTLIST"));
    }

    #[test]
    fn parameters_must_be_identifiers() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let params = ast.node(
            NodeKind::IdentifierList,
            TokenKind::IdentList,
            "(",
            &[ast.number("1")],
        );
        let f = ast.node(
            NodeKind::FunctionDefinition,
            TokenKind::FunDef,
            "fn",
            &[params, ast.block(&[])],
        );

        let mut generator = CodeGenerator::new(RegisterNaming::Verbatim);
        let err = generator.generate_function(&f, "fn0").unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnhandledNode {
                position: NodePosition::Parameter,
                ..
            }
        ));
        assert_eq!(err.context(), "fn0");
    }

    #[test]
    fn missing_body() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let params = ast.node(NodeKind::IdentifierList, TokenKind::IdentList, "(", &[]);
        let f = ast.node(
            NodeKind::FunctionDefinition,
            TokenKind::FunDef,
            "fn",
            &[params],
        );

        let mut generator = CodeGenerator::new(RegisterNaming::Verbatim);
        let err = generator.generate_function(&f, "fn0").unwrap_err();
        assert!(matches!(err, CodegenError::MissingChild { index: 1, .. }));
    }
}
