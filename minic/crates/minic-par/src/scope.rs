//! Lexical scopes and their construction.
//!
//! Scopes form a tree rooted at the program block, stored in an arena so
//! parent links are plain ids rather than owning references. A block's node
//! records the id of the scope it owns. Name lookup walks parent links to
//! the root; declaration refuses a name that already exists anywhere along
//! that chain (MiniLang has no shadowing).
//!
//! Construction runs as a second walk after parsing. The one irregular case
//! is the `for` statement: its header (init declaration, condition, update)
//! binds into the body block's scope, so the walk creates the body scope
//! first and processes the header inside it before descending into the body.

use indexmap::IndexMap;

use minic_util::{CompileError, Idx, IndexVec, LineIndex, Result};

use crate::ast::{AstKind, AstNode, PrimType, Value};

/// Identifier of a scope in the [`ScopeTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl Idx for ScopeId {
    fn from_usize(idx: usize) -> Self {
        ScopeId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What the scope knows about one declared variable.
#[derive(Clone, Debug, PartialEq)]
pub struct VarInfo {
    pub ty: PrimType,
    pub declared_line: u32,
    /// Folded constant value, when the semantic pass could compute one.
    pub value: Option<Value>,
    /// Whether any assignment has reached the variable yet. Separate from
    /// `value`: an assignment whose right side could not be folded still
    /// initializes the variable.
    pub initialized: bool,
}

impl VarInfo {
    pub fn new(ty: PrimType, declared_line: u32) -> Self {
        Self {
            ty,
            declared_line,
            value: None,
            initialized: false,
        }
    }
}

/// A single scope: its bindings, parent link, and child scopes.
#[derive(Debug)]
pub struct Scope {
    /// Bindings in declaration order (the verbose dump relies on it).
    pub table: IndexMap<String, VarInfo>,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
}

/// Arena of all scopes of one program.
#[derive(Debug, Default)]
pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            scopes: IndexVec::new(),
        }
    }

    /// The program scope. Valid once construction has run.
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    /// Creates a scope under `parent` (`None` only for the root).
    pub fn add_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = self.scopes.push(Scope {
            table: IndexMap::new(),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.scopes[parent].children.push(id);
        }
        id
    }

    /// Inserts a binding, rejecting a name that already exists in `scope`
    /// or any enclosing scope. On rejection returns the line of the
    /// earlier declaration.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        info: VarInfo,
    ) -> std::result::Result<(), u32> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(existing) = self.scopes[id].table.get(name) {
                return Err(existing.declared_line);
            }
            current = self.scopes[id].parent;
        }
        self.scopes[scope].table.insert(name.to_owned(), info);
        Ok(())
    }

    /// Resolves `name` from `scope` outward.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&VarInfo> {
        self.owner_of(scope, name)
            .and_then(|id| self.scopes[id].table.get(name))
    }

    pub fn lookup_mut(&mut self, scope: ScopeId, name: &str) -> Option<&mut VarInfo> {
        let owner = self.owner_of(scope, name)?;
        self.scopes[owner].table.get_mut(name)
    }

    fn owner_of(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if self.scopes[id].table.contains_key(name) {
                return Some(id);
            }
            current = self.scopes[id].parent;
        }
        None
    }

    /// Table rendering for the verbose driver dump.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (id, scope) in self.scopes.iter_enumerated() {
            match scope.parent {
                Some(parent) => out.push_str(&format!("scope {} (parent {}):\n", id.0, parent.0)),
                None => out.push_str(&format!("scope {} (root):\n", id.0)),
            }
            for (name, info) in &scope.table {
                out.push_str(&format!(
                    "  {}: {}, declared line {}",
                    name, info.ty, info.declared_line
                ));
                if let Some(value) = &info.value {
                    out.push_str(&format!(", value {}", value));
                }
                out.push('\n');
            }
        }
        out
    }
}

/// Builds the scope tree for a parsed program, checking declaration
/// uniqueness and name resolution along the way.
pub fn build_scopes(root: &mut AstNode, lines: &LineIndex) -> Result<ScopeTree> {
    let mut builder = ScopeBuilder {
        tree: ScopeTree::new(),
        lines,
    };
    builder.visit_block(root, None, None)?;
    Ok(builder.tree)
}

type ForHeader<'n> = (&'n mut AstNode, &'n mut AstNode, &'n mut AstNode);

struct ScopeBuilder<'a> {
    tree: ScopeTree,
    lines: &'a LineIndex,
}

impl ScopeBuilder<'_> {
    fn error(&self, message: String, line: u32) -> CompileError {
        CompileError::parse(message, line, self.lines.line(line))
    }

    fn visit_block(
        &mut self,
        block: &mut AstNode,
        parent: Option<ScopeId>,
        header: Option<ForHeader<'_>>,
    ) -> Result<()> {
        let id = self.tree.add_scope(parent);
        let AstKind::Block { children, scope } = &mut block.kind else {
            return Err(self.error("block statement expected".to_owned(), block.line));
        };
        *scope = Some(id);

        // A for-loop header binds into this scope before the body is walked.
        if let Some((init, cond, update)) = header {
            self.visit(init, id)?;
            self.visit(cond, id)?;
            self.visit(update, id)?;
        }

        for child in children {
            self.visit(child, id)?;
        }
        Ok(())
    }

    fn visit(&mut self, node: &mut AstNode, scope: ScopeId) -> Result<()> {
        if matches!(node.kind, AstKind::Block { .. }) {
            return self.visit_block(node, Some(scope), None);
        }

        let decl_ty = node.kind.as_declaration().map(|(ty, _, _)| ty);
        let line = node.line;

        match &mut node.kind {
            AstKind::ForStatement {
                init,
                cond,
                update,
                body,
            } => {
                self.visit_block(body, Some(scope), Some((&mut **init, &mut **cond, &mut **update)))?;
            }

            AstKind::IntDcl { name, init }
            | AstKind::FloatDcl { name, init }
            | AstKind::StringDcl { name, init }
            | AstKind::BoolDcl { name, init } => {
                // The initializer is resolved before the name is bound, so
                // `int a = a;` is an undefined-name error.
                if let Some(init) = init {
                    self.visit(init, scope)?;
                }
                let ty = decl_ty.unwrap_or(PrimType::Int);
                if self
                    .tree
                    .declare(scope, name, VarInfo::new(ty, line))
                    .is_err()
                {
                    return Err(
                        self.error(format!("variable name \"{}\" already exists", name), line)
                    );
                }
            }

            AstKind::Reassign { name, value } => {
                if self.tree.lookup(scope, name).is_none() {
                    return Err(
                        self.error(format!("variable name \"{}\" does not exist", name), line)
                    );
                }
                self.visit(value, scope)?;
            }

            AstKind::VarRef { name } => {
                if self.tree.lookup(scope, name).is_none() {
                    return Err(
                        self.error(format!("variable name \"{}\" does not exist", name), line)
                    );
                }
            }

            AstKind::Assign { expr } | AstKind::Print { expr } => self.visit(expr, scope)?,

            AstKind::IfStatement {
                if_branch,
                elif_branches,
                else_branch,
            } => {
                self.visit(if_branch, scope)?;
                for branch in elif_branches {
                    self.visit(branch, scope)?;
                }
                if let Some(branch) = else_branch {
                    self.visit(branch, scope)?;
                }
            }

            AstKind::If { cond, body }
            | AstKind::Elif { cond, body }
            | AstKind::WhileStatement { cond, body } => {
                self.visit(cond, scope)?;
                self.visit(body, scope)?;
            }

            AstKind::Else { body } => self.visit(body, scope)?,

            AstKind::Binary { lhs, rhs, .. } => {
                self.visit(lhs, scope)?;
                self.visit(rhs, scope)?;
            }

            AstKind::Neg { expr } | AstKind::IntToFloat { expr } => self.visit(expr, scope)?,

            AstKind::IntLit(_)
            | AstKind::FloatLit(_)
            | AstKind::StringLit(_)
            | AstKind::BoolLit(_) => {}

            // Handled by the early return above.
            AstKind::Block { .. } => {}
        }
        Ok(())
    }
}
