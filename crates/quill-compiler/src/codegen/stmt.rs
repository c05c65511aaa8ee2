//! Blocks, branches and returns.

use quill_core::{CodegenError, Node};

use super::{CodeGenerator, Destination, Result};

impl CodeGenerator {
    /// Lower each statement of a block in order, inside a fresh scope.
    pub(super) fn lower_block(&mut self, node: &Node<'_>) -> Result<()> {
        self.symbols.push_scope();
        let result = node
            .children
            .iter()
            .try_for_each(|stmt| self.lower_stmt(stmt));
        self.symbols.pop_scope();
        result
    }

    /// Lower `return e1, e2, ...`.
    ///
    /// Every value is lowered into the same temporary and only the last one
    /// is pushed.
    pub(super) fn lower_return(&mut self, node: &Node<'_>) -> Result<()> {
        self.with_context("return", |this| {
            this.with_temp(|this, temp| {
                let dst = Destination::Register(temp.clone());
                for value in node.children {
                    this.lower(value, &dst)?;
                }
                this.out.emit_push(temp.clone());
                Ok(())
            })?;
            this.out.emit_return();
            Ok(())
        })
    }

    /// Lower an `if` or `while` branch.
    pub(super) fn lower_branch(&mut self, node: &Node<'_>) -> Result<()> {
        let condition = self.child(node, 0)?;
        let body = self.child(node, 1)?;

        match node.text() {
            "if" => self.with_context("if", |this| this.lower_if(condition, body)),
            "while" => self.with_context("while", |this| this.lower_while(condition, body)),
            keyword => Err(CodegenError::UnknownBranch {
                keyword: keyword.to_string(),
                span: node.span(),
                context: self.context(),
            }),
        }
    }

    /// ```text
    ///     <cond -> t>
    ///     NOT %t %t
    ///     JMPC &end %t
    ///     <body>
    /// &end:
    /// ```
    fn lower_if(&mut self, condition: &Node<'_>, body: &Node<'_>) -> Result<()> {
        self.with_temp(|this, temp| {
            let end = this.labels.next();
            let dst = Destination::Register(temp.clone());

            this.lower_expr(condition, &dst)?;
            this.out.emit_not(temp.clone());
            this.out.emit_jump_if(end.clone(), temp.clone());
            this.lower_stmt(body)?;
            this.out.define_label(end);
            Ok(())
        })
    }

    /// ```text
    /// &start:
    ///     <cond -> t>
    ///     NOT %t %t
    ///     JMPC &end %t
    ///     <body>
    ///     JMP &start
    /// &end:
    /// ```
    ///
    /// `end` is allocated before `start`.
    fn lower_while(&mut self, condition: &Node<'_>, body: &Node<'_>) -> Result<()> {
        self.with_temp(|this, temp| {
            let end = this.labels.next();
            let start = this.labels.next();
            let dst = Destination::Register(temp.clone());

            this.out.define_label(start.clone());
            this.lower_expr(condition, &dst)?;
            this.out.emit_not(temp.clone());
            this.out.emit_jump_if(end.clone(), temp.clone());
            this.lower_stmt(body)?;
            this.out.emit_jump(start);
            this.out.define_label(end);
            Ok(())
        })
    }
}
