use std::ops::Range;

/// A member sequence split at its barriers.
///
/// `segments` are non-empty index ranges of orderable members, in source
/// order; `barriers` are the indices of the members that split them. Every
/// member index appears in exactly one of the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub segments: Vec<Range<usize>>,
    pub barriers: Vec<usize>,
}

/// Split `members` into maximal runs that contain no barrier.
///
/// A barrier belongs to neither neighbouring run. Runs left empty by
/// adjacent, leading or trailing barriers are dropped.
pub fn segment<T>(members: &[T], is_barrier: impl Fn(&T) -> bool) -> Segmentation {
    let mut segmentation = Segmentation::default();
    let mut start = 0;

    for (idx, member) in members.iter().enumerate() {
        if is_barrier(member) {
            if start < idx {
                segmentation.segments.push(start..idx);
            }
            segmentation.barriers.push(idx);
            start = idx + 1;
        }
    }
    if start < members.len() {
        segmentation.segments.push(start..members.len());
    }

    segmentation
}
