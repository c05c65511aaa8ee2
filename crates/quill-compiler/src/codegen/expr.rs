//! Literals, identifiers, function references and infix operators.

use quill_core::{CodegenError, Node, NodeKind};

use super::{CodeGenerator, Destination, Result};
use crate::instruction::BinaryOp;
use crate::labels::Label;
use crate::registers::Register;

impl CodeGenerator {
    /// `LOAD <text> %dst`. A discarded literal emits nothing.
    pub(super) fn lower_literal(&mut self, node: &Node<'_>, dst: &Destination) {
        if let Destination::Register(reg) = dst {
            self.out.emit_load(node.text(), reg.clone());
        }
    }

    /// `MOVE %ident %dst`
    pub(super) fn lower_identifier(&mut self, node: &Node<'_>, dst: &Destination) {
        let src = self.symbols.resolve(node.text());
        self.out.emit_move(src, dst.register());
    }

    /// `LOAD &fn<index> %dst`
    pub(super) fn lower_function_ref(&mut self, node: &Node<'_>, dst: &Destination) {
        self.out
            .emit_load_address(Label::function(node.text()), dst.register());
    }

    pub(super) fn lower_infix(&mut self, node: &Node<'_>, dst: &Destination) -> Result<()> {
        let operator = node.text();
        self.with_context(format!("infix '{operator}'"), |this| {
            if operator == "=" {
                this.lower_assignment(node)
            } else {
                let lhs = this.child(node, 0)?;
                let rhs = this.child(node, 1)?;
                this.lower_binary(node, lhs, rhs, dst)
            }
        })
    }

    /// Lower the right side straight into the target's register.
    ///
    /// The target is checked before the right side is looked up. The
    /// assignment itself has no value: `dst` is never written.
    fn lower_assignment(&mut self, node: &Node<'_>) -> Result<()> {
        let target = self.child(node, 0)?;
        let reg = self.assignment_target(target)?;
        let value = self.child(node, 1)?;
        self.lower(value, &Destination::Register(reg))
    }

    fn assignment_target(&mut self, target: &Node<'_>) -> Result<Register> {
        match target.kind {
            NodeKind::Identifier => Ok(self.symbols.resolve(target.text())),
            NodeKind::Let => {
                let name = self.child(target, 0)?;
                Ok(self.symbols.declare(name.text()))
            }
            _ => Err(CodegenError::MalformedAssignment {
                token: target.token.print_string(),
                span: target.span(),
                context: self.context(),
            }),
        }
    }

    /// ```text
    ///     <lhs -> x>
    ///     <rhs -> dst>
    ///     OP %x %dst %dst
    /// ```
    fn lower_binary(
        &mut self,
        node: &Node<'_>,
        lhs: &Node<'_>,
        rhs: &Node<'_>,
        dst: &Destination,
    ) -> Result<()> {
        let Some(op) = BinaryOp::from_operator(node.text()) else {
            return Err(CodegenError::UnknownOperator {
                operator: node.text().to_string(),
                token: node.token.print_string(),
                span: node.span(),
                context: self.context(),
            });
        };

        self.with_temp(|this, x| {
            this.lower(lhs, &Destination::Register(x.clone()))?;
            this.lower(rhs, dst)?;
            let out = dst.register();
            this.out.emit_binary(op, x.clone(), out.clone(), out);
            Ok(())
        })
    }
}
