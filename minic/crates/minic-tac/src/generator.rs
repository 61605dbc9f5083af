//! AST-to-TAC lowering.

use minic_par::ast::{AstKind, AstNode, Value};

use crate::tac::{Instr, Label, Operand, Temp};

/// The TAC generator: two monotonically increasing counters and the
/// lowering walk. A generator instance covers one compilation; a fresh
/// compilation needs a fresh instance so numbering restarts at zero.
///
/// Control-flow lowering assembles each region (condition, body, update)
/// into its own buffer first and splices the buffers afterwards; the
/// buffer-filling order is what pins temporary and label numbering.
pub struct TacGen {
    next_temp: u32,
    next_label: u32,
}

impl TacGen {
    pub fn new() -> Self {
        Self {
            next_temp: 0,
            next_label: 0,
        }
    }

    /// Lowers a validated program into a flat instruction list.
    pub fn generate(mut self, root: &AstNode) -> Vec<Instr> {
        let mut out = Vec::new();
        self.lower_stmt(root, &mut out);
        out
    }

    fn fresh_temp(&mut self) -> Temp {
        let temp = Temp(self.next_temp);
        self.next_temp += 1;
        temp
    }

    fn fresh_label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn lower_stmt(&mut self, node: &AstNode, out: &mut Vec<Instr>) {
        match &node.kind {
            AstKind::Block { children, .. } => {
                for child in children {
                    self.lower_stmt(child, out);
                }
            }

            AstKind::IntDcl { .. }
            | AstKind::FloatDcl { .. }
            | AstKind::StringDcl { .. }
            | AstKind::BoolDcl { .. } => {
                let Some((ty, name, init)) = node.kind.as_declaration() else {
                    return;
                };
                match init.and_then(assign_expr) {
                    Some(expr) => {
                        // RHS temporaries are emitted ahead of the declare line.
                        let value = self.lower_operand(expr, out);
                        out.push(Instr::Declare {
                            ty,
                            name: name.to_owned(),
                        });
                        out.push(Instr::Copy {
                            dest: Operand::Var(name.to_owned()),
                            src: value,
                        });
                    }
                    None => out.push(Instr::Declare {
                        ty,
                        name: name.to_owned(),
                    }),
                }
            }

            AstKind::Reassign { name, value } => {
                if let Some(expr) = assign_expr(value) {
                    let src = self.lower_operand(expr, out);
                    out.push(Instr::Copy {
                        dest: Operand::Var(name.clone()),
                        src,
                    });
                }
            }

            AstKind::Print { expr } => {
                let value = self.lower_operand(expr, out);
                out.push(Instr::Print { value });
            }

            AstKind::IfStatement {
                if_branch,
                elif_branches,
                else_branch,
            } => self.lower_if(if_branch, elif_branches, else_branch.as_deref(), out),

            AstKind::WhileStatement { cond, body } => self.lower_while(cond, body, out),

            AstKind::ForStatement {
                init,
                cond,
                update,
                body,
            } => self.lower_for(init, cond, update, body, out),

            // Branch nodes are reached through lower_if, expressions through
            // lower_operand; nothing else lowers as a statement.
            _ => {}
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Lowers an expression to the operand holding its value. Operator nodes
    /// emit instructions into `out`; leaves render directly.
    fn lower_operand(&mut self, node: &AstNode, out: &mut Vec<Instr>) -> Operand {
        match &node.kind {
            AstKind::IntToFloat { expr } => {
                let src = self.lower_operand(expr, out);
                let dest = self.fresh_temp();
                out.push(Instr::ToFloat { dest, src });
                Operand::Temp(dest)
            }
            AstKind::Neg { expr } => {
                let src = self.lower_operand(expr, out);
                let dest = self.fresh_temp();
                out.push(Instr::Neg { dest, src });
                Operand::Temp(dest)
            }
            AstKind::Binary { op, lhs, rhs } => {
                // Left before right: numbering is pinned left-to-right.
                let lhs = self.lower_operand(lhs, out);
                let rhs = self.lower_operand(rhs, out);
                let dest = self.fresh_temp();
                out.push(Instr::Binary {
                    dest,
                    op: *op,
                    lhs,
                    rhs,
                });
                Operand::Temp(dest)
            }
            _ => leaf_operand(node),
        }
    }

    /// Produces the operand tested by a control-flow condition. Comparisons,
    /// logical operations, and variable references yield their operand
    /// directly; any other condition value is first copied into a fresh
    /// temporary so the following `not` has a named source.
    fn lower_condition(&mut self, cond: &AstNode, out: &mut Vec<Instr>) -> Operand {
        match &cond.kind {
            AstKind::Binary { op, .. } if op.is_comparison() || op.is_logical() => {
                self.lower_operand(cond, out)
            }
            AstKind::VarRef { .. } => self.lower_operand(cond, out),
            _ => {
                let dest = self.fresh_temp();
                let src = leaf_operand(cond);
                out.push(Instr::Copy {
                    dest: Operand::Temp(dest),
                    src,
                });
                Operand::Temp(dest)
            }
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    /// If/elif/else chain.
    ///
    /// Each conditional branch lowers to
    /// `<cond>; tN = not v; tN IFGOTO Li; <body>; GOTO Lend; LABEL Li`,
    /// with the `GOTO Lend`/`LABEL Lend` pair only present when the chain
    /// has more than one branch. An else body runs unconditionally in the
    /// slot before `Lend`.
    fn lower_if(
        &mut self,
        if_branch: &AstNode,
        elif_branches: &[AstNode],
        else_branch: Option<&AstNode>,
        out: &mut Vec<Instr>,
    ) {
        let mut cond_bufs: Vec<Vec<Instr>> = Vec::new();
        let mut cond_vars: Vec<Operand> = Vec::new();
        let mut bodies: Vec<Vec<Instr>> = Vec::new();
        let mut labels: Vec<Label> = Vec::new();

        if let AstKind::If { cond, body } = &if_branch.kind {
            let mut buf = Vec::new();
            let var = self.lower_condition(cond, &mut buf);
            cond_bufs.push(buf);
            cond_vars.push(var);
            let mut body_buf = Vec::new();
            self.lower_stmt(body, &mut body_buf);
            bodies.push(body_buf);
        }

        for branch in elif_branches {
            if let AstKind::Elif { cond, body } = &branch.kind {
                let mut buf = Vec::new();
                let var = self.lower_condition(cond, &mut buf);
                cond_bufs.push(buf);
                cond_vars.push(var);
                labels.push(self.fresh_label());
                let mut body_buf = Vec::new();
                self.lower_stmt(body, &mut body_buf);
                bodies.push(body_buf);
            }
        }

        let mut has_else = false;
        if let Some(branch) = else_branch {
            if let AstKind::Else { body } = &branch.kind {
                has_else = true;
                labels.push(self.fresh_label());
                let mut body_buf = Vec::new();
                self.lower_stmt(body, &mut body_buf);
                bodies.push(body_buf);
            }
        }

        // One skip label per conditional branch, then the continue label
        // closing a multi-branch chain.
        let n_conditional = cond_bufs.len();
        while labels.len() < n_conditional {
            labels.push(self.fresh_label());
        }
        let continue_label = if bodies.len() > 1 {
            Some(self.fresh_label())
        } else {
            None
        };

        for i in 0..bodies.len() {
            let body = std::mem::take(&mut bodies[i]);
            if has_else && i == n_conditional {
                out.extend(body);
                continue;
            }
            let not_temp = self.fresh_temp();
            out.extend(std::mem::take(&mut cond_bufs[i]));
            out.push(Instr::Not {
                dest: not_temp,
                src: cond_vars[i].clone(),
            });
            out.push(Instr::IfGoto {
                cond: not_temp,
                target: labels[i],
            });
            out.extend(body);
            if let Some(continue_label) = continue_label {
                out.push(Instr::Goto(continue_label));
            }
            out.push(Instr::Label(labels[i]));
        }

        if let Some(continue_label) = continue_label {
            out.push(Instr::Label(continue_label));
        }
    }

    fn lower_while(&mut self, cond: &AstNode, body: &AstNode, out: &mut Vec<Instr>) {
        let mut cond_buf = Vec::new();
        let cond_var = self.lower_condition(cond, &mut cond_buf);
        let start = self.fresh_label();
        let mut body_buf = Vec::new();
        self.lower_stmt(body, &mut body_buf);
        let end = self.fresh_label();
        let not_temp = self.fresh_temp();

        out.push(Instr::Label(start));
        out.extend(cond_buf);
        out.push(Instr::Not {
            dest: not_temp,
            src: cond_var,
        });
        out.push(Instr::IfGoto {
            cond: not_temp,
            target: end,
        });
        out.extend(body_buf);
        out.push(Instr::Goto(start));
        out.push(Instr::Label(end));
    }

    fn lower_for(
        &mut self,
        init: &AstNode,
        cond: &AstNode,
        update: &AstNode,
        body: &AstNode,
        out: &mut Vec<Instr>,
    ) {
        let start = self.fresh_label();
        let mut init_buf = Vec::new();
        self.lower_stmt(init, &mut init_buf);
        let mut cond_buf = Vec::new();
        let cond_var = self.lower_condition(cond, &mut cond_buf);
        let mut update_buf = Vec::new();
        self.lower_stmt(update, &mut update_buf);
        let mut body_buf = Vec::new();
        self.lower_stmt(body, &mut body_buf);
        let end = self.fresh_label();
        let not_temp = self.fresh_temp();

        out.extend(init_buf);
        out.push(Instr::Label(start));
        out.extend(cond_buf);
        out.push(Instr::Not {
            dest: not_temp,
            src: cond_var,
        });
        out.push(Instr::IfGoto {
            cond: not_temp,
            target: end,
        });
        out.extend(body_buf);
        out.extend(update_buf);
        out.push(Instr::Goto(start));
        out.push(Instr::Label(end));
    }
}

impl Default for TacGen {
    fn default() -> Self {
        Self::new()
    }
}

/// The initializer expression inside an `Assign` node.
fn assign_expr(assign: &AstNode) -> Option<&AstNode> {
    match &assign.kind {
        AstKind::Assign { expr } => Some(expr),
        _ => None,
    }
}

/// Renders a leaf expression as an operand. Variable references render as
/// their name, literals as their value.
fn leaf_operand(node: &AstNode) -> Operand {
    match &node.kind {
        AstKind::VarRef { name } => Operand::Var(name.clone()),
        AstKind::IntLit(v) => Operand::Const(Value::Int(*v)),
        AstKind::FloatLit(v) => Operand::Const(Value::Float(*v)),
        AstKind::StringLit(s) => Operand::Const(Value::Str(s.clone())),
        AstKind::BoolLit(b) => Operand::Const(Value::Bool(*b)),
        // Anything else in operand position carries its folded value.
        _ => match &node.value {
            Some(value) => Operand::Const(value.clone()),
            None => Operand::Var(String::new()),
        },
    }
}
