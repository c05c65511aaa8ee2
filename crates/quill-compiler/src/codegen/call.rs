//! Calls and the `print` builtin.
//!
//! Calling convention:
//! - the caller pushes the arguments last to first
//! - `CALLV` jumps to the address held in the callee's register
//! - the callee pops its parameters first to last, pushes one value and
//!   returns
//! - the caller pops that value into the destination

use quill_core::{Node, NodeKind, NodePosition};

use super::{CodeGenerator, Destination, Result};

/// Callee name handled inline instead of through `CALLV`.
const PRINT_BUILTIN: &str = "print";

impl CodeGenerator {
    pub(super) fn lower_call(&mut self, node: &Node<'_>, dst: &Destination) -> Result<()> {
        let target = self.child(node, 0)?;
        if target.kind != NodeKind::Identifier {
            return Err(self.unhandled(target, NodePosition::CallTarget));
        }
        let args = self.child(node, 1)?;
        if args.kind != NodeKind::ExpressionList {
            return Err(self.unhandled(args, NodePosition::ArgumentList));
        }

        let callee = target.text();
        self.with_context(format!("call '{callee}'"), |this| {
            this.with_temp(|this, temp| {
                let arg_dst = Destination::Register(temp.clone());
                for arg in args.children.iter().rev() {
                    this.lower_expr(arg, &arg_dst)?;
                    this.out.emit_push(temp.clone());
                }
                Ok(())
            })?;

            if callee == PRINT_BUILTIN {
                this.lower_print(args.children.len(), dst)
            } else {
                this.lower_call_value(callee, dst)
            }
        })
    }

    /// Pop and output each pushed argument, then yield `0`.
    fn lower_print(&mut self, arg_count: usize, dst: &Destination) -> Result<()> {
        self.with_temp(|this, temp| {
            for _ in 0..arg_count {
                this.out.emit_pop(temp.clone());
                this.out.emit_out(temp.clone());
            }
            this.out.emit_load("0", temp.clone());
            this.out.emit_move(temp.clone(), dst.register());
            Ok(())
        })
    }

    fn lower_call_value(&mut self, callee: &str, dst: &Destination) -> Result<()> {
        let target = self.symbols.resolve(callee);
        self.out.emit_call_value(target);
        self.with_temp(|this, result| {
            this.out.emit_pop(result.clone());
            this.out.emit_move(result.clone(), dst.register());
            Ok(())
        })
    }
}
