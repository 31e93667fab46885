//! Constant string bindings visible to key resolution.
//!
//! After the resolver pass every identifier carries the syntax context of the
//! scope that declared it, so a reference and its declaration share an `Id`
//! exactly when the reference resolves to that declaration. A shadowing `let`
//! or parameter gets a different context and therefore never matches an outer
//! `const`.

use std::collections::HashMap;

use swc_core::ecma::ast::{Expr, Id, Ident, Lit, Pat, Program, VarDecl, VarDeclKind};
use swc_core::ecma::visit::{Visit, VisitWith};

/// `const` bindings whose initializer is a plain string literal
#[derive(Debug, Clone, Default)]
pub struct ConstBindings {
    values: HashMap<Id, String>,
}

impl ConstBindings {
    /// Collect bindings from a program that has already been through the resolver
    pub fn collect(program: &Program) -> Self {
        let mut collector = ConstCollector::default();
        program.visit_with(&mut collector);
        Self {
            values: collector.values,
        }
    }

    /// Literal value of the `const` this identifier refers to, if any
    pub fn lookup(&self, ident: &Ident) -> Option<&str> {
        self.values.get(&ident.to_id()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Default)]
struct ConstCollector {
    values: HashMap<Id, String>,
}

impl Visit for ConstCollector {
    fn visit_var_decl(&mut self, decl: &VarDecl) {
        if decl.kind == VarDeclKind::Const {
            for declarator in &decl.decls {
                if let Pat::Ident(binding) = &declarator.name
                    && let Some(init) = &declarator.init
                    && let Expr::Lit(Lit::Str(value)) = &**init
                {
                    self.values.insert(binding.id.to_id(), value.value.to_string());
                }
            }
        }
        decl.visit_children_with(self);
    }
}
