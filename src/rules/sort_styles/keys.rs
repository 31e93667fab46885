use swc_core::common::{Span, Spanned};
use swc_core::ecma::ast::{Expr, Lit, Prop, PropName, Tpl};

use crate::lint_context::ConstBindings;

/// Comparable text of a property's key, or `None` when it cannot be known statically
pub fn resolve_prop_key(prop: &Prop, bindings: &ConstBindings) -> Option<String> {
    match prop {
        Prop::Shorthand(ident) => Some(ident.sym.to_string()),
        Prop::Assign(assign) => Some(assign.key.sym.to_string()),
        Prop::KeyValue(kv) => resolve_prop_name(&kv.key, bindings),
        Prop::Getter(getter) => resolve_prop_name(&getter.key, bindings),
        Prop::Setter(setter) => resolve_prop_name(&setter.key, bindings),
        Prop::Method(method) => resolve_prop_name(&method.key, bindings),
    }
}

/// Span of the key itself, where diagnostics are anchored
pub fn prop_key_span(prop: &Prop) -> Span {
    match prop {
        Prop::Shorthand(ident) => ident.span,
        Prop::Assign(assign) => assign.key.span,
        Prop::KeyValue(kv) => kv.key.span(),
        Prop::Getter(getter) => getter.key.span(),
        Prop::Setter(setter) => setter.key.span(),
        Prop::Method(method) => method.key.span(),
    }
}

pub fn resolve_prop_name(name: &PropName, bindings: &ConstBindings) -> Option<String> {
    match name {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => Some(s.value.to_string()),
        PropName::Computed(computed) => resolve_computed(&computed.expr, bindings),
        // Numeric keys are normalized by the engine (`1.0` is `"1"`), so their
        // source text is not a reliable sort key
        PropName::Num(_) | PropName::BigInt(_) => None,
    }
}

fn resolve_computed(expr: &Expr, bindings: &ConstBindings) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => Some(s.value.to_string()),
        Expr::Tpl(tpl) => resolve_template(tpl, bindings),
        _ => None,
    }
}

/// Concatenate a template's text, substituting each embedded identifier with
/// the string literal its `const` binding holds.
fn resolve_template(tpl: &Tpl, bindings: &ConstBindings) -> Option<String> {
    let mut resolved = String::new();

    for (idx, quasi) in tpl.quasis.iter().enumerate() {
        resolved.push_str(quasi.cooked.as_deref().unwrap_or(&*quasi.raw));
        if let Some(expr) = tpl.exprs.get(idx) {
            let Expr::Ident(ident) = &**expr else {
                return None;
            };
            resolved.push_str(bindings.lookup(ident)?);
        }
    }

    Some(resolved)
}
