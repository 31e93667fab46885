//! Applying the fixes attached to lint warnings.

use crate::rule::{Fix, LintWarning};

/// Apply the fixes of `warnings` to `content` in a single pass.
///
/// Several warnings may carry the same fix (every violation in a segment
/// points at the segment rewrite); identical fixes are applied once. When
/// fixes overlap, the one that starts first wins and the others are left for
/// a later pass over the fixed content.
pub fn apply_warning_fixes(content: &str, warnings: &[LintWarning]) -> Result<String, String> {
    let mut fixes: Vec<&Fix> = warnings.iter().filter_map(|w| w.fix.as_ref()).collect();
    fixes.sort_by(|a, b| {
        (a.range.start, a.range.end, &a.replacement).cmp(&(b.range.start, b.range.end, &b.replacement))
    });
    fixes.dedup();

    let mut selected: Vec<&Fix> = Vec::with_capacity(fixes.len());
    for fix in fixes {
        if fix.range.start > fix.range.end
            || fix.range.end > content.len()
            || !content.is_char_boundary(fix.range.start)
            || !content.is_char_boundary(fix.range.end)
        {
            return Err(format!(
                "Fix range {}..{} is invalid for content of length {}",
                fix.range.start,
                fix.range.end,
                content.len()
            ));
        }

        if let Some(previous) = selected.last()
            && fix.range.start < previous.range.end
        {
            log::debug!(
                "Deferring fix at {}..{}: overlaps fix at {}..{}",
                fix.range.start,
                fix.range.end,
                previous.range.start,
                previous.range.end
            );
            continue;
        }
        selected.push(fix);
    }

    let mut result = content.to_string();
    for fix in selected.iter().rev() {
        result.replace_range(fix.range.clone(), &fix.replacement);
    }
    Ok(result)
}

/// Number of warnings that carry a fix
pub fn fixable_count(warnings: &[LintWarning]) -> usize {
    warnings.iter().filter(|w| w.fix.is_some()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Severity;

    fn warning(range: std::ops::Range<usize>, replacement: &str) -> LintWarning {
        LintWarning {
            message: "test".to_string(),
            line: 1,
            column: range.start + 1,
            end_line: 1,
            end_column: range.end + 1,
            severity: Severity::Warning,
            fix: Some(Fix {
                range,
                replacement: replacement.to_string(),
            }),
            rule_name: Some("test".to_string()),
        }
    }

    #[test]
    fn test_applies_independent_fixes() {
        let content = "b a / d c";
        let warnings = vec![warning(6..9, "c d"), warning(0..3, "a b")];
        assert_eq!(apply_warning_fixes(content, &warnings).unwrap(), "a b / c d");
    }

    #[test]
    fn test_identical_fixes_apply_once() {
        let content = "c b a";
        let warnings = vec![warning(0..5, "a b c"), warning(0..5, "a b c")];
        assert_eq!(apply_warning_fixes(content, &warnings).unwrap(), "a b c");
    }

    #[test]
    fn test_overlapping_fix_is_deferred() {
        let content = "outer(inner)";
        let warnings = vec![warning(6..11, "INNER"), warning(0..12, "OUTER(inner)")];
        assert_eq!(apply_warning_fixes(content, &warnings).unwrap(), "OUTER(inner)");
    }

    #[test]
    fn test_adjacent_fixes_both_apply() {
        let content = "abcd";
        let warnings = vec![warning(0..2, "BA"), warning(2..4, "DC")];
        assert_eq!(apply_warning_fixes(content, &warnings).unwrap(), "BADC");
    }

    #[test]
    fn test_invalid_range_is_an_error() {
        let content = "abc";
        assert!(apply_warning_fixes(content, &[warning(1..10, "x")]).is_err());

        let multibyte = "é";
        assert!(apply_warning_fixes(multibyte, &[warning(1..2, "x")]).is_err());
    }

    #[test]
    fn test_warnings_without_fixes() {
        let mut unfixable = warning(0..1, "");
        unfixable.fix = None;
        assert_eq!(apply_warning_fixes("abc", &[unfixable.clone()]).unwrap(), "abc");
        assert_eq!(fixable_count(&[unfixable, warning(0..1, "x")]), 1);
    }
}
