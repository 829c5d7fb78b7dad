//! Consolidation of candidate rectangles into a minimal covering set.
//!
//! Detection strategies overlap: the same diagram can surface as a
//! filled component, an edge component, and several nested fragments.
//! Merging runs two monotone reduction passes, in order:
//!
//! 1. Containment elimination - a rectangle mostly inside a strictly
//!    larger one is a sub-part of that region, not an independent
//!    diagram.
//! 2. Overlap/adjacency union to a fixed point - two rectangles whose
//!    IoU meets the threshold, or whose gap-expanded forms overlap, are
//!    replaced by their union. Unioning can create a rectangle that
//!    newly overlaps a third, so the scan repeats until a full pass
//!    changes nothing. Termination is guaranteed: every union strictly
//!    decreases the rectangle count, and nothing is ever re-split.

use crate::geometry::Rect;

/// Parameters controlling candidate consolidation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MergeConfig {
    /// A rectangle overlapping a strictly larger one by at least this
    /// fraction of its own area is eliminated
    pub containment_ratio: f32,
    /// Pairwise IoU at or above this value triggers a union
    pub iou_threshold: f32,
    /// Gap-expansion radius for the adjacency rule; `None` disables the
    /// rule and merging is IoU-only
    pub gap_px: Option<u32>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            containment_ratio: 0.9,
            iou_threshold: 0.08,
            gap_px: Some(40),
        }
    }
}

/// Reduce a candidate set to a merged set.
///
/// Empty input yields empty output; there are no other failure modes.
///
/// # Examples
///
/// ```
/// use contest_extract::geometry::Rect;
/// use contest_extract::merge::{merge_regions, MergeConfig};
///
/// let candidates = vec![Rect::new(10, 10, 200, 200), Rect::new(15, 15, 50, 50)];
/// let merged = merge_regions(&candidates, &MergeConfig::default());
/// assert_eq!(merged, vec![Rect::new(10, 10, 200, 200)]);
/// ```
pub fn merge_regions(candidates: &[Rect], config: &MergeConfig) -> Vec<Rect> {
    let survivors = eliminate_contained(candidates, config.containment_ratio);
    union_to_fixed_point(survivors, config)
}

/// Drop every rectangle whose overlap with a strictly larger rectangle
/// is at least `ratio` of its own area.
fn eliminate_contained(candidates: &[Rect], ratio: f32) -> Vec<Rect> {
    candidates
        .iter()
        .filter(|r| {
            !candidates
                .iter()
                .any(|s| s.area() > r.area() && r.overlap_fraction(s) >= ratio)
        })
        .copied()
        .collect()
}

fn should_union(a: &Rect, b: &Rect, config: &MergeConfig) -> bool {
    if a.iou(b) >= config.iou_threshold {
        return true;
    }
    match config.gap_px {
        Some(gap) => a.expand(gap).intersects(&b.expand(gap)),
        None => false,
    }
}

/// Repeatedly union qualifying pairs until a full pass is stable.
fn union_to_fixed_point(mut rects: Vec<Rect>, config: &MergeConfig) -> Vec<Rect> {
    loop {
        let merged = find_and_union(&mut rects, config);
        if !merged {
            return rects;
        }
    }
}

/// Union the first qualifying pair in place. Returns false when no pair
/// qualifies, i.e. the set is at its fixed point.
fn find_and_union(rects: &mut Vec<Rect>, config: &MergeConfig) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if should_union(&rects[i], &rects[j], config) {
                rects[i] = rects[i].union(&rects[j]);
                rects.swap_remove(j);
                return true;
            }
        }
    }
    false
}
