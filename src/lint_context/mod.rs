//! Parsed view of one source file shared by every rule.
//!
//! The file is parsed once with swc, run through the resolver so identifiers
//! carry their scope, and scanned for constant string bindings. Rules work on
//! the AST and map spans back to byte offsets and line/column positions here.

mod line_index;
mod scope;

pub use line_index::LineIndex;
pub use scope::ConstBindings;

use std::ops::Range;
use std::path::{Path, PathBuf};

use swc_core::common::{BytePos, FileName, GLOBALS, Globals, Mark, SourceMap, Span, Spanned, sync::Lrc};
use swc_core::ecma::ast::{EsVersion, Program};
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::VisitMutWith;

use crate::config::SourceDialect;
use crate::rule::LintError;

pub struct LintContext<'a> {
    pub content: &'a str,
    pub dialect: SourceDialect,
    pub source_file: Option<PathBuf>,
    pub program: Program,
    pub line_index: LineIndex,
    start_pos: u32,
    const_bindings: ConstBindings,
}

impl<'a> LintContext<'a> {
    /// Parse `content` in the given dialect.
    ///
    /// Syntax errors (including ones the parser recovered from) are returned as
    /// [`LintError::ParsingError`] with the 1-based position of the first error.
    pub fn new(content: &'a str, dialect: SourceDialect, source_file: Option<PathBuf>) -> Result<Self, LintError> {
        let line_index = LineIndex::new(content);
        let (program, start_pos, const_bindings) = GLOBALS.set(&Globals::new(), || {
            parse_program(content, dialect, source_file.as_deref(), &line_index)
        })?;

        Ok(Self {
            content,
            dialect,
            source_file,
            program,
            line_index,
            start_pos,
            const_bindings,
        })
    }

    /// Byte offset of a source position within `content`
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0.saturating_sub(self.start_pos) as usize).min(self.content.len())
    }

    /// Byte range covered by a span
    pub fn span_range(&self, span: Span) -> Range<usize> {
        self.offset(span.lo)..self.offset(span.hi)
    }

    /// Byte range covered by any node
    pub fn node_range<N: Spanned>(&self, node: &N) -> Range<usize> {
        self.span_range(node.span())
    }

    /// 1-based (line, column) of a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.line_index.line_col(self.content, offset)
    }

    pub fn const_bindings(&self) -> &ConstBindings {
        &self.const_bindings
    }
}

fn syntax_for(dialect: SourceDialect) -> Syntax {
    if dialect.is_typescript() {
        Syntax::Typescript(TsSyntax {
            tsx: dialect.supports_jsx(),
            decorators: true,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        })
    }
}

fn parse_program(
    content: &str,
    dialect: SourceDialect,
    source_file: Option<&Path>,
    line_index: &LineIndex,
) -> Result<(Program, u32, ConstBindings), LintError> {
    let cm: Lrc<SourceMap> = Default::default();
    let file_name = match source_file {
        Some(path) => FileName::Real(path.to_path_buf()),
        None => FileName::Anon,
    };
    let fm = cm.new_source_file(file_name.into(), content.to_string());
    let start_pos = fm.start_pos.0;

    let lexer = Lexer::new(syntax_for(dialect), EsVersion::Es2022, StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    let parse_error = |err: swc_core::ecma::parser::error::Error| {
        let offset = err.span().lo.0.saturating_sub(start_pos) as usize;
        let (line, column) = line_index.line_col(content, offset);
        LintError::ParsingError(format!("{line}:{column}: {}", err.kind().msg()))
    };

    let mut program = parser.parse_program().map_err(parse_error)?;
    if let Some(err) = parser.take_errors().into_iter().next() {
        return Err(parse_error(err));
    }

    let unresolved_mark = Mark::new();
    let top_level_mark = Mark::new();
    program.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, dialect.is_typescript()));

    let const_bindings = ConstBindings::collect(&program);
    log::trace!("Collected {} const string bindings", const_bindings.len());

    Ok((program, start_pos, const_bindings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_core::ecma::ast::{Expr, Ident};
    use swc_core::ecma::visit::{Visit, VisitWith};

    /// Records the const lookup result for every identifier expression, in source order
    struct IdentLookups<'c> {
        bindings: Option<&'c ConstBindings>,
        found: Vec<(String, Option<String>)>,
    }

    impl Visit for IdentLookups<'_> {
        fn visit_expr(&mut self, expr: &Expr) {
            if let Expr::Ident(ident) = expr {
                self.record(ident);
            }
            expr.visit_children_with(self);
        }
    }

    impl IdentLookups<'_> {
        fn record(&mut self, ident: &Ident) {
            let value = self
                .bindings
                .and_then(|b| b.lookup(ident))
                .map(str::to_string);
            self.found.push((ident.sym.to_string(), value));
        }
    }

    fn lookups(content: &str) -> Vec<(String, Option<String>)> {
        let ctx = LintContext::new(content, SourceDialect::JavaScript, None).unwrap();
        let mut visitor = IdentLookups {
            bindings: Some(ctx.const_bindings()),
            found: Vec::new(),
        };
        ctx.program.visit_with(&mut visitor);
        visitor.found
    }

    #[test]
    fn test_parses_jsx_by_default() {
        let ctx = LintContext::new("const el = <View style={styles.a} />;", SourceDialect::JavaScript, None);
        assert!(ctx.is_ok());
    }

    #[test]
    fn test_parses_typescript_dialects() {
        let ts = "const size: number = 4; export type T = { a: string };";
        assert!(LintContext::new(ts, SourceDialect::TypeScript, None).is_ok());

        let tsx = "const el = <View style={s.a} />; const n = x as number;";
        assert!(LintContext::new(tsx, SourceDialect::Tsx, None).is_ok());
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = match LintContext::new("const a = ;\n", SourceDialect::JavaScript, None) {
            Err(err) => err,
            Ok(_) => panic!("expected a parse error"),
        };
        match err {
            LintError::ParsingError(message) => assert!(message.starts_with("1:"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_span_offsets_map_to_content() {
        let content = "const a = 'x';\nconst b = a;";
        let ctx = LintContext::new(content, SourceDialect::JavaScript, None).unwrap();
        let range = ctx.node_range(&ctx.program);
        assert_eq!(&content[range], content);
        assert_eq!(ctx.line_col(content.find("b =").unwrap()), (2, 7));
    }

    #[test]
    fn test_const_string_bindings_resolve() {
        let found = lookups("const a = 'a'; let b = 'b'; const c = 1; const d = `d`; use(a, b, c, d);");
        assert_eq!(
            found,
            vec![
                ("use".to_string(), None),
                ("a".to_string(), Some("a".to_string())),
                ("b".to_string(), None),
                ("c".to_string(), None),
                ("d".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_shadowed_binding_does_not_resolve() {
        let found = lookups("const a = 'outer'; function f(a) { return a; } function g() { return a; }");
        assert_eq!(
            found,
            vec![("a".to_string(), None), ("a".to_string(), Some("outer".to_string()))]
        );
    }

    #[test]
    fn test_block_scoped_const_resolves_inside_block_only() {
        let found = lookups("{ const k = 'inner'; use(k); } use(k);");
        assert_eq!(
            found,
            vec![
                ("use".to_string(), None),
                ("k".to_string(), Some("inner".to_string())),
                ("use".to_string(), None),
                ("k".to_string(), None),
            ]
        );
    }
}
