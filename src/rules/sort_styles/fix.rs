use std::ops::Range;

use super::order::SortOrder;
use crate::rule::Fix;

/// Order that sorts the resolvable keys of a segment.
///
/// Returns `perm` where `perm[slot]` is the index of the member that ends up
/// in `slot`. Resolvable keys are stably sorted among the slots that held
/// resolvable keys; unresolvable members keep their slot.
pub fn sorted_permutation(keys: &[Option<String>], order: SortOrder) -> Vec<usize> {
    let slots: Vec<usize> = keys
        .iter()
        .enumerate()
        .filter_map(|(idx, key)| key.as_ref().map(|_| idx))
        .collect();

    let mut sorted = slots.clone();
    sorted.sort_by(|&a, &b| match (&keys[a], &keys[b]) {
        (Some(a), Some(b)) => order.compare(a, b),
        _ => std::cmp::Ordering::Equal,
    });

    let mut perm: Vec<usize> = (0..keys.len()).collect();
    for (slot, member) in slots.into_iter().zip(sorted) {
        perm[slot] = member;
    }
    perm
}

/// Build the replacement that puts a segment's members in `perm` order.
///
/// `member_ranges` are the byte ranges of the members in source order. Each
/// member's text is reused verbatim and the text between members (commas,
/// whitespace, comments) stays where it is. The replaced span is trimmed to
/// the first and last slot whose member changes, so members that keep their
/// place are left byte-identical. Returns `None` when nothing moves.
pub fn plan_segment_fix(source: &str, member_ranges: &[Range<usize>], perm: &[usize]) -> Option<Fix> {
    debug_assert_eq!(member_ranges.len(), perm.len());

    let first = perm.iter().enumerate().position(|(slot, &member)| slot != member)?;
    let last = perm.iter().enumerate().rposition(|(slot, &member)| slot != member)?;

    let mut replacement = String::new();
    for slot in first..=last {
        replacement.push_str(source.get(member_ranges[perm[slot]].clone())?);
        if slot < last {
            replacement.push_str(source.get(member_ranges[slot].end..member_ranges[slot + 1].start)?);
        }
    }

    Some(Fix {
        range: member_ranges[first].start..member_ranges[last].end,
        replacement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn keys(names: &[&str]) -> Vec<Option<String>> {
        names
            .iter()
            .map(|n| if *n == "?" { None } else { Some(n.to_string()) })
            .collect()
    }

    /// Lay members out as `text, text, ...` and return the source with their ranges
    fn layout(members: &[&str]) -> (String, Vec<Range<usize>>) {
        let mut source = String::new();
        let mut ranges = Vec::new();
        for (idx, member) in members.iter().enumerate() {
            if idx > 0 {
                source.push_str(", ");
            }
            let start = source.len();
            source.push_str(member);
            ranges.push(start..source.len());
        }
        (source, ranges)
    }

    fn apply(source: &str, fix: &Fix) -> String {
        let mut out = source.to_string();
        out.replace_range(fix.range.clone(), &fix.replacement);
        out
    }

    #[test]
    fn test_sorted_permutation() {
        assert_eq!(sorted_permutation(&keys(&["c", "a", "b"]), SortOrder::Asc), vec![1, 2, 0]);
        assert_eq!(sorted_permutation(&keys(&["a", "c", "b"]), SortOrder::Desc), vec![1, 2, 0]);
        assert_eq!(sorted_permutation(&keys(&[]), SortOrder::Asc), Vec::<usize>::new());
    }

    #[test]
    fn test_unresolvable_members_keep_their_slot() {
        // b ? a  ->  a ? b
        assert_eq!(sorted_permutation(&keys(&["b", "?", "a"]), SortOrder::Asc), vec![2, 1, 0]);
        // ? c b  ->  ? b c
        assert_eq!(sorted_permutation(&keys(&["?", "c", "b"]), SortOrder::Asc), vec![0, 2, 1]);
    }

    #[test]
    fn test_equal_keys_keep_relative_order() {
        assert_eq!(
            sorted_permutation(&keys(&["b", "a", "b", "a"]), SortOrder::Asc),
            vec![1, 3, 0, 2]
        );
    }

    #[test]
    fn test_plan_swaps_members() {
        let (source, ranges) = layout(&["b: {}", "a: {}"]);
        let fix = plan_segment_fix(&source, &ranges, &[1, 0]).unwrap();
        assert_eq!(fix.range, 0..source.len());
        assert_eq!(apply(&source, &fix), "a: {}, b: {}");
    }

    #[test]
    fn test_plan_trims_to_moved_members() {
        let (source, ranges) = layout(&["a: 1", "d: 3", "c: 2", "e: 4"]);
        let fix = plan_segment_fix(&source, &ranges, &[0, 2, 1, 3]).unwrap();
        assert_eq!(fix.range, ranges[1].start..ranges[2].end);
        assert_eq!(fix.replacement, "c: 2, d: 3");
    }

    #[test]
    fn test_plan_keeps_gap_text_in_place() {
        let source = "b: 1, // first\n  a: 2";
        let ranges = vec![0..4, 17..21];
        let fix = plan_segment_fix(source, &ranges, &[1, 0]).unwrap();
        assert_eq!(apply(source, &fix), "a: 2, // first\n  b: 1");
    }

    #[test]
    fn test_plan_identity_is_none() {
        let (source, ranges) = layout(&["a: 1", "b: 2"]);
        assert!(plan_segment_fix(&source, &ranges, &[0, 1]).is_none());
    }

    fn key_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            4 => "[a-e]{1,2}".prop_map(Some),
            1 => Just(None),
        ]
    }

    proptest! {
        #[test]
        fn prop_fix_only_reorders_members(keys in prop::collection::vec(key_strategy(), 0..8)) {
            let texts: Vec<String> = keys
                .iter()
                .enumerate()
                .map(|(idx, key)| format!("{}: {idx}", key.as_deref().unwrap_or("[x]")))
                .collect();
            let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            let (source, ranges) = layout(&text_refs);

            let perm = sorted_permutation(&keys, SortOrder::Asc);
            let fixed = match plan_segment_fix(&source, &ranges, &perm) {
                Some(fix) => apply(&source, &fix),
                None => source.clone(),
            };

            let mut before: Vec<&str> = source.split(", ").collect();
            let mut after: Vec<&str> = fixed.split(", ").collect();
            // Unresolvable members sit in their original slots
            for (slot, key) in keys.iter().enumerate() {
                if key.is_none() {
                    prop_assert_eq!(after[slot], before[slot]);
                }
            }
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_sorted_keys_pass_the_order_check(keys in prop::collection::vec(key_strategy(), 0..8)) {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                let perm = sorted_permutation(&keys, order);
                let reordered: Vec<Option<String>> = perm.iter().map(|&i| keys[i].clone()).collect();
                prop_assert!(super::super::order::check_order(&reordered, order).is_empty());
            }
        }
    }
}
