//! The semantic analyzer.

use minic_par::ast::{AstKind, AstNode, BinOp, PrimType, Value};
use minic_par::scope::{ScopeId, ScopeTree};
use minic_util::{CompileError, LineIndex, Result};

/// Walks the AST once, threading the current scope.
///
/// The analyzer owns no data of its own; it annotates the AST in place and
/// updates the scope entries (folded values, initialization state) as
/// assignments are encountered along the static path.
pub struct SemanticAnalyzer<'a> {
    scopes: &'a mut ScopeTree,
    lines: &'a LineIndex,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(scopes: &'a mut ScopeTree, lines: &'a LineIndex) -> Self {
        Self { scopes, lines }
    }

    /// Checks a whole program. `root` must be the block the scope tree was
    /// built for.
    pub fn analyze(&mut self, root: &mut AstNode) -> Result<()> {
        let scope = self.scopes.root();
        self.check_stmt(root, scope)
    }

    fn error(&self, message: String, line: u32) -> CompileError {
        CompileError::semantic(message, line, self.lines.line(line))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn check_stmt(&mut self, node: &mut AstNode, scope: ScopeId) -> Result<()> {
        // Expression kinds never appear in statement position; route any
        // that do straight through the expression checker.
        if matches!(
            node.kind,
            AstKind::Assign { .. }
                | AstKind::IntLit(_)
                | AstKind::FloatLit(_)
                | AstKind::StringLit(_)
                | AstKind::BoolLit(_)
                | AstKind::VarRef { .. }
                | AstKind::Binary { .. }
                | AstKind::Neg { .. }
                | AstKind::IntToFloat { .. }
        ) {
            self.check_expr(node, scope)?;
            return Ok(());
        }

        let line = node.line;
        let declaration = node
            .kind
            .as_declaration()
            .map(|(ty, name, _)| (ty, name.to_owned()));

        // Annotation to apply to the statement node once the borrow on its
        // kind has ended.
        let mut annotation: Option<(PrimType, Option<Value>)> = None;

        match &mut node.kind {
            AstKind::Block {
                children,
                scope: block_scope,
            } => {
                // Set during scope construction; the enclosing scope is only
                // a fallback for trees built by hand in tests.
                let inner = block_scope.unwrap_or(scope);
                for child in children {
                    self.check_stmt(child, inner)?;
                }
            }

            AstKind::IntDcl { init, .. }
            | AstKind::FloatDcl { init, .. }
            | AstKind::StringDcl { init, .. }
            | AstKind::BoolDcl { init, .. } => {
                let Some((decl_ty, name)) = declaration else {
                    return Ok(());
                };
                match init {
                    Some(assign) => {
                        let value = self.check_assign(assign, decl_ty, &name, scope, line)?;
                        annotation = Some((decl_ty, value));
                    }
                    // Bare declaration: the entry stays uninitialized until
                    // a reassignment reaches it.
                    None => annotation = Some((decl_ty, None)),
                }
            }

            AstKind::Reassign { name, value } => {
                let name = name.clone();
                let target_ty = match self.scopes.lookup(scope, &name) {
                    Some(info) => info.ty,
                    None => {
                        return Err(
                            self.error(format!("variable name \"{}\" does not exist", name), line)
                        )
                    }
                };
                let folded = self.check_assign(value, target_ty, &name, scope, line)?;
                annotation = Some((target_ty, folded));
            }

            AstKind::Print { expr } => {
                self.check_expr(expr, scope)?;
            }

            AstKind::IfStatement {
                if_branch,
                elif_branches,
                else_branch,
            } => {
                self.check_stmt(if_branch, scope)?;
                for branch in elif_branches {
                    self.check_stmt(branch, scope)?;
                }
                if let Some(branch) = else_branch {
                    self.check_stmt(branch, scope)?;
                }
            }

            AstKind::If { cond, body }
            | AstKind::Elif { cond, body }
            | AstKind::WhileStatement { cond, body } => {
                self.check_cond(cond, scope)?;
                self.check_stmt(body, scope)?;
            }

            AstKind::Else { body } => self.check_stmt(body, scope)?,

            AstKind::ForStatement {
                init,
                cond,
                update,
                body,
            } => {
                // The header lives in the body block's scope.
                let body_scope = match &body.kind {
                    AstKind::Block {
                        scope: Some(inner), ..
                    } => *inner,
                    _ => scope,
                };
                self.check_stmt(init, body_scope)?;
                self.check_cond(cond, body_scope)?;
                self.check_stmt(update, body_scope)?;
                self.check_stmt(body, scope)?;
            }

            // Expression kinds were routed to check_expr above.
            _ => {}
        }

        if let Some((ty, value)) = annotation {
            node.ty = Some(ty);
            node.value = value;
        }
        Ok(())
    }

    /// Checks the `= expr` of a declaration or reassignment against the
    /// target type, widening an int initializer for a float target, and
    /// records the assignment in the scope entry.
    fn check_assign(
        &mut self,
        assign: &mut AstNode,
        target_ty: PrimType,
        name: &str,
        scope: ScopeId,
        line: u32,
    ) -> Result<Option<Value>> {
        let AstKind::Assign { expr } = &mut assign.kind else {
            return Err(self.error("assignment expected".to_owned(), assign.line));
        };

        let (expr_ty, _) = self.check_expr(expr, scope)?;

        match (target_ty, expr_ty) {
            (PrimType::Float, PrimType::Int) => wrap_int_to_float(expr),
            (target, found) if target != found => {
                return Err(self.error(
                    format!(
                        "value of type {} cannot be assigned to {} variable \"{}\"",
                        found, target, name
                    ),
                    line,
                ));
            }
            _ => {}
        }

        let value = expr.value.clone();
        assign.ty = Some(target_ty);
        assign.value = value.clone();

        if let Some(info) = self.scopes.lookup_mut(scope, name) {
            info.value = value.clone();
            info.initialized = true;
        }
        Ok(value)
    }

    /// Control-flow conditions must type to bool; the parser has already
    /// limited their shape.
    fn check_cond(&mut self, cond: &mut AstNode, scope: ScopeId) -> Result<()> {
        let (ty, _) = self.check_expr(cond, scope)?;
        if ty != PrimType::Bool {
            return Err(self.error(
                format!("condition must be of type bool, found {}", ty),
                cond.line,
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Types (and, when possible, folds) an expression, annotating the node
    /// and returning the annotations.
    fn check_expr(&mut self, node: &mut AstNode, scope: ScopeId) -> Result<(PrimType, Option<Value>)> {
        let line = node.line;

        let (ty, value) = match &mut node.kind {
            AstKind::IntLit(v) => (PrimType::Int, Some(Value::Int(*v))),
            AstKind::FloatLit(v) => (PrimType::Float, Some(Value::Float(*v))),
            AstKind::StringLit(s) => (PrimType::String, Some(Value::Str(s.clone()))),
            AstKind::BoolLit(b) => (PrimType::Bool, Some(Value::Bool(*b))),

            AstKind::VarRef { name } => {
                let info = match self.scopes.lookup(scope, name) {
                    Some(info) => info,
                    None => {
                        return Err(
                            self.error(format!("variable name \"{}\" does not exist", name), line)
                        )
                    }
                };
                if !info.initialized {
                    return Err(self.error(
                        format!("variable \"{}\" used before initialization", name),
                        line,
                    ));
                }
                (info.ty, info.value.clone())
            }

            AstKind::Neg { expr } => {
                let (inner_ty, inner_value) = self.check_expr(expr, scope)?;
                if !inner_ty.is_numeric() {
                    return Err(self.error(format!("cannot negate a {} value", inner_ty), line));
                }
                let value = match inner_value {
                    Some(Value::Int(v)) => v.checked_neg().map(Value::Int),
                    Some(Value::Float(v)) => Some(Value::Float(-v)),
                    _ => None,
                };
                (inner_ty, value)
            }

            AstKind::IntToFloat { expr } => {
                let (_, inner_value) = self.check_expr(expr, scope)?;
                (PrimType::Float, inner_value.map(Value::widened))
            }

            AstKind::Binary { op, lhs, rhs } => {
                let op = *op;
                let (lt, lv) = self.check_expr(lhs, scope)?;
                let (rt, rv) = self.check_expr(rhs, scope)?;

                if op.is_arithmetic() {
                    let (ty, value) = self.arith(op, lt, rt, &lv, &rv, line)?;
                    // Widen int operands feeding a float-valued operator.
                    if ty == PrimType::Float {
                        if lt == PrimType::Int {
                            wrap_int_to_float(lhs);
                        }
                        if rt == PrimType::Int {
                            wrap_int_to_float(rhs);
                        }
                    }
                    (ty, value)
                } else if op.is_comparison() {
                    self.comparison(op, lt, rt, &lv, &rv, line)?
                } else {
                    self.logical(op, lt, rt, &lv, &rv, line)?
                }
            }

            _ => return Err(self.error("expression expected".to_owned(), line)),
        };

        node.ty = Some(ty);
        node.value = value.clone();
        Ok((ty, value))
    }

    /// Arithmetic type lattice and folding for `+ - * / ^`.
    fn arith(
        &self,
        op: BinOp,
        lt: PrimType,
        rt: PrimType,
        lv: &Option<Value>,
        rv: &Option<Value>,
        line: u32,
    ) -> Result<(PrimType, Option<Value>)> {
        let both_numeric = lt.is_numeric() && rt.is_numeric();
        let either_float = lt == PrimType::Float || rt == PrimType::Float;

        match op {
            BinOp::Add => {
                if lt == PrimType::Bool || rt == PrimType::Bool {
                    return Err(self.error(
                        format!("cannot sum {} and {} values", lt, rt),
                        line,
                    ));
                }
                if lt == PrimType::String || rt == PrimType::String {
                    // Concatenation; non-string operands are stringified.
                    let value = match (lv, rv) {
                        (Some(l), Some(r)) => Some(Value::Str(format!("{}{}", l, r))),
                        _ => None,
                    };
                    return Ok((PrimType::String, value));
                }
                let ty = if either_float { PrimType::Float } else { PrimType::Int };
                Ok((ty, fold_numeric(op, ty, lv, rv)))
            }

            BinOp::Sub | BinOp::Mul => {
                if !both_numeric {
                    let verb = if op == BinOp::Sub { "subtract" } else { "multiply" };
                    return Err(self.error(
                        format!("cannot {} {} and {} values", verb, lt, rt),
                        line,
                    ));
                }
                let ty = if either_float { PrimType::Float } else { PrimType::Int };
                Ok((ty, fold_numeric(op, ty, lv, rv)))
            }

            BinOp::Div => {
                if !both_numeric {
                    return Err(self.error(
                        format!("cannot divide {} and {} values", lt, rt),
                        line,
                    ));
                }
                if rv.as_ref().is_some_and(Value::is_zero) {
                    return Err(self.error("cannot perform division by zero".to_owned(), line));
                }
                // An int quotient that is not integral is a float result;
                // it later fails int-declaration conformance by design.
                let ty = if either_float {
                    PrimType::Float
                } else {
                    match (lv, rv) {
                        (Some(Value::Int(l)), Some(Value::Int(r))) if l % r != 0 => PrimType::Float,
                        _ => PrimType::Int,
                    }
                };
                Ok((ty, fold_numeric(op, ty, lv, rv)))
            }

            BinOp::Pow => {
                if !both_numeric {
                    return Err(self.error(
                        format!("cannot exponentiate {} and {} values", lt, rt),
                        line,
                    ));
                }
                let negative_exponent = match rv {
                    Some(Value::Int(v)) => *v < 0,
                    Some(Value::Float(v)) => *v < 0.0,
                    _ => false,
                };
                let ty = if either_float || negative_exponent {
                    PrimType::Float
                } else {
                    PrimType::Int
                };
                Ok((ty, fold_numeric(op, ty, lv, rv)))
            }

            _ => Err(self.error("arithmetic operator expected".to_owned(), line)),
        }
    }

    /// Comparison lattice: `==`/`!=` reject number-vs-string, relational
    /// operators reject bool and string operands. The result is bool.
    fn comparison(
        &self,
        op: BinOp,
        lt: PrimType,
        rt: PrimType,
        lv: &Option<Value>,
        rv: &Option<Value>,
        line: u32,
    ) -> Result<(PrimType, Option<Value>)> {
        let num_vs_string = (lt.is_numeric() && rt == PrimType::String)
            || (rt.is_numeric() && lt == PrimType::String);

        match op {
            BinOp::Eq | BinOp::Ne => {
                if num_vs_string {
                    return Err(self.error(
                        format!("cannot compare {} and {} with \"{}\"", lt, rt, op.symbol()),
                        line,
                    ));
                }
            }
            _ => {
                let bool_or_string = |ty: PrimType| matches!(ty, PrimType::Bool | PrimType::String);
                if bool_or_string(lt) || bool_or_string(rt) {
                    return Err(self.error(
                        format!("cannot compare {} and {} with \"{}\"", lt, rt, op.symbol()),
                        line,
                    ));
                }
            }
        }

        Ok((PrimType::Bool, fold_comparison(op, lv, rv)))
    }

    /// Logical lattice: bool with bool, or bool mixed with int (`0` is
    /// false, anything else true). Everything else is rejected.
    fn logical(
        &self,
        op: BinOp,
        lt: PrimType,
        rt: PrimType,
        lv: &Option<Value>,
        rv: &Option<Value>,
        line: u32,
    ) -> Result<(PrimType, Option<Value>)> {
        let bool_or_int = |ty: PrimType| matches!(ty, PrimType::Bool | PrimType::Int);
        let allowed = bool_or_int(lt)
            && bool_or_int(rt)
            && (lt == PrimType::Bool || rt == PrimType::Bool);
        if !allowed {
            return Err(self.error(
                format!(
                    "cannot perform a boolean operation on {} and {} values",
                    lt, rt
                ),
                line,
            ));
        }

        let value = match (lv.as_ref().and_then(Value::truthy), rv.as_ref().and_then(Value::truthy))
        {
            (Some(l), Some(r)) => Some(Value::Bool(if op == BinOp::And {
                l && r
            } else {
                l || r
            })),
            _ => None,
        };
        Ok((PrimType::Bool, value))
    }
}

/// Replaces `*slot` with an `IntToFloat` wrapper around it, widening the
/// folded value along the way.
fn wrap_int_to_float(slot: &mut Box<AstNode>) {
    let line = slot.line;
    let value = slot.value.clone().map(Value::widened);
    let inner = std::mem::replace(slot, Box::new(AstNode::new(AstKind::IntLit(0), line)));
    **slot = AstNode {
        kind: AstKind::IntToFloat { expr: inner },
        line,
        ty: Some(PrimType::Float),
        value,
    };
}

/// Folds a numeric binary operation. Folding is best-effort: overflow or a
/// missing operand value yields `None`, never an error.
fn fold_numeric(
    op: BinOp,
    result_ty: PrimType,
    lv: &Option<Value>,
    rv: &Option<Value>,
) -> Option<Value> {
    let (l, r) = match (lv, rv) {
        (Some(l), Some(r)) => (l, r),
        _ => return None,
    };

    if result_ty == PrimType::Float {
        let (lf, rf) = (l.as_f64()?, r.as_f64()?);
        let value = match op {
            BinOp::Add => lf + rf,
            BinOp::Sub => lf - rf,
            BinOp::Mul => lf * rf,
            BinOp::Div => lf / rf,
            BinOp::Pow => lf.powf(rf),
            _ => return None,
        };
        return Some(Value::Float(value));
    }

    match (l, r) {
        (Value::Int(l), Value::Int(r)) => {
            let value = match op {
                BinOp::Add => l.checked_add(*r),
                BinOp::Sub => l.checked_sub(*r),
                BinOp::Mul => l.checked_mul(*r),
                BinOp::Div => l.checked_div(*r),
                BinOp::Pow => u32::try_from(*r).ok().and_then(|exp| l.checked_pow(exp)),
                _ => None,
            };
            value.map(Value::Int)
        }
        _ => None,
    }
}

/// Folds a comparison. Mixed int/float operands compare numerically;
/// bool-vs-int equality is left unfolded.
fn fold_comparison(op: BinOp, lv: &Option<Value>, rv: &Option<Value>) -> Option<Value> {
    let (l, r) = match (lv, rv) {
        (Some(l), Some(r)) => (l, r),
        _ => return None,
    };

    if let (Some(lf), Some(rf)) = (l.as_f64(), r.as_f64()) {
        let result = match op {
            BinOp::Eq => lf == rf,
            BinOp::Ne => lf != rf,
            BinOp::Ge => lf >= rf,
            BinOp::Le => lf <= rf,
            BinOp::Gt => lf > rf,
            BinOp::Lt => lf < rf,
            _ => return None,
        };
        return Some(Value::Bool(result));
    }

    match (l, r, op) {
        (Value::Str(l), Value::Str(r), BinOp::Eq) => Some(Value::Bool(l == r)),
        (Value::Str(l), Value::Str(r), BinOp::Ne) => Some(Value::Bool(l != r)),
        (Value::Bool(l), Value::Bool(r), BinOp::Eq) => Some(Value::Bool(l == r)),
        (Value::Bool(l), Value::Bool(r), BinOp::Ne) => Some(Value::Bool(l != r)),
        _ => None,
    }
}
