use swc_core::ecma::ast::{CallExpr, Callee, Expr, ObjectLit};

/// The object literal declared by a style-sheet factory call, if `call` is one.
///
/// The callee must be a member call `Name.method(...)` with `Name` among
/// `names`, and the call must have exactly one argument that is an object
/// literal (not spread).
pub fn style_sheet_object<'n>(call: &'n CallExpr, names: &[String]) -> Option<&'n ObjectLit> {
    if !callee_matches(&call.callee, names) {
        return None;
    }

    let [argument] = call.args.as_slice() else {
        return None;
    };
    if argument.spread.is_some() {
        return None;
    }

    match &*argument.expr {
        Expr::Object(object) => Some(object),
        _ => None,
    }
}

fn callee_matches(callee: &Callee, names: &[String]) -> bool {
    let Callee::Expr(expr) = callee else {
        return false;
    };

    let Expr::Member(member) = &**expr else {
        return false;
    };
    let Expr::Ident(object) = &*member.obj else {
        return false;
    };

    names.iter().any(|n| n.as_str() == &*object.sym)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceDialect;
    use crate::lint_context::LintContext;
    use swc_core::ecma::visit::{Visit, VisitWith};

    /// Number of members of each located object, per call in source order
    fn located(content: &str, names: &[&str]) -> Vec<Option<usize>> {
        struct Calls<'n> {
            names: &'n [String],
            found: Vec<Option<usize>>,
        }

        impl Visit for Calls<'_> {
            fn visit_call_expr(&mut self, call: &CallExpr) {
                self.found
                    .push(style_sheet_object(call, self.names).map(|object| object.props.len()));
                call.visit_children_with(self);
            }
        }

        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let ctx = LintContext::new(content, SourceDialect::JavaScript, None).unwrap();
        let mut calls = Calls {
            names: &names,
            found: Vec::new(),
        };
        ctx.program.visit_with(&mut calls);
        calls.found
    }

    #[test]
    fn test_member_call_on_configured_object() {
        assert_eq!(located("StyleSheet.create({ a: {}, b: {} });", &["StyleSheet"]), vec![Some(2)]);
        assert_eq!(
            located("OtherStyleSheet.create({ a: {} });", &["StyleSheet", "OtherStyleSheet"]),
            vec![Some(1)]
        );
        assert_eq!(located("OtherStyleSheet.create({ a: {} });", &["StyleSheet"]), vec![None]);
    }

    #[test]
    fn test_bare_call_of_configured_name_is_ignored() {
        assert_eq!(located("StyleSheet({ b: {}, a: {} });", &["StyleSheet"]), vec![None]);
        assert_eq!(located("StyleSheet['create']({ a: {} });", &["StyleSheet"]), vec![Some(1)]);
    }

    #[test]
    fn test_argument_shape_is_required() {
        let names = ["StyleSheet"];
        assert_eq!(located("StyleSheet.create();", &names), vec![None]);
        assert_eq!(located("StyleSheet.create(styles);", &names), vec![None]);
        assert_eq!(located("StyleSheet.create({ a: {} }, extra);", &names), vec![None]);
        assert_eq!(located("StyleSheet.create(...args);", &names), vec![None]);
    }

    #[test]
    fn test_other_callees_are_ignored() {
        let names = ["StyleSheet"];
        assert_eq!(located("theme.StyleSheet.create({ a: {} });", &names), vec![None]);
        assert_eq!(located("getSheet().create({ a: {} });", &names), vec![None, None]);
    }
}
