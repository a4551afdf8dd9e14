//! Vertex-list reconciliation for polygon morphing.
//!
//! Morphing between polygons of different cardinality needs equal-length
//! vertex sequences. The shorter outline is expanded to the longer one's
//! count by greedy nearest-point matching, then repaired so every original
//! vertex survives and the result still traces the shorter outline in order.
//! The matching is greedy per index, not globally optimal.

use crate::geometry::Point;
use std::collections::HashSet;

/// Raised when the contiguity sweep exhausts every candidate placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingExhausted;

/// Outcome of one contiguity sweep
enum SweepCheck {
    /// The matched sequence traces the reference outline
    Matches,
    /// The outline was traced but trailing slots stayed unchecked;
    /// index of the last validated slot
    Partial(usize),
    /// First slot that falls off the reference outline, together with the
    /// reference edge end it was expected to reach
    Mismatch { index: usize, expected: Point },
}

/// Expand `lower` to `bigger`'s vertex count.
///
/// The result has exactly `bigger.len()` entries, every point of `lower`
/// appears at least once, and consecutive entries stay adjacent within
/// `lower`'s edge sequence (or identical).
pub fn reconcile(lower: &[Point], bigger: &[Point]) -> Result<Vec<Point>, MatchingExhausted> {
    debug_assert!(lower.len() <= bigger.len());

    // Pass 1: greedy nearest-point matching, independent per index.
    let no_exclusions = HashSet::new();
    let mut matched: Vec<Point> = bigger
        .iter()
        .map(|point| match nearest(lower, *point, &no_exclusions) {
            Some((_, nearest)) => nearest,
            None => *point,
        })
        .collect();

    // Pass 2: coverage repair. Every point of the shorter outline must
    // survive; uncovered points overwrite their nearest slot, slots already
    // claimed in this pass excluded.
    let mut claimed: HashSet<usize> = HashSet::new();
    for low in lower {
        if !matched.contains(low) {
            log::debug!("matched list misses {low}, reinserting it");
            if let Some((slot, _)) = nearest(&matched, *low, &claimed) {
                claimed.insert(slot);
                matched[slot] = *low;
            }
        }
    }

    // Pass 3: contiguity repair. Sweep the matched sequence along the
    // shorter outline's edges; mismatching slots get the nearest untried
    // candidate, a partially validated tail collapses onto the last good
    // value rather than failing.
    let mut last_ok: isize = -1;
    let mut tried: HashSet<usize> = HashSet::new();
    loop {
        match sweep(&matched, lower, last_ok) {
            SweepCheck::Matches => break,
            SweepCheck::Partial(index) => {
                log::warn!("collapsing unmatched tail after slot {index}");
                let filler = matched[index];
                for slot in matched.iter_mut().skip(index) {
                    *slot = filler;
                }
                break;
            }
            SweepCheck::Mismatch { index, expected } => {
                if last_ok < index as isize - 1 {
                    tried.clear();
                    last_ok = index as isize - 1;
                }
                match nearest(lower, expected, &tried) {
                    Some((candidate, point)) => {
                        matched[index] = point;
                        tried.insert(candidate);
                    }
                    None => return Err(MatchingExhausted),
                }
            }
        }
    }

    Ok(matched)
}

/// Index and value of the point nearest to `target`, skipping excluded
/// indices. `None` when every index is excluded.
pub(crate) fn nearest(
    points: &[Point],
    target: Point,
    excluded: &HashSet<usize>,
) -> Option<(usize, Point)> {
    let mut best: Option<(usize, Point)> = None;
    let mut best_distance = f64::INFINITY;
    for (i, point) in points.iter().enumerate() {
        if excluded.contains(&i) {
            continue;
        }
        let distance = point.distance_to(target);
        if distance < best_distance {
            best_distance = distance;
            best = Some((i, *point));
        }
    }
    best
}

/// Walk `matched` cyclically along `reference`'s edges.
///
/// Slots up to and including `start_check` are trusted from earlier sweeps.
/// Consuming all of `matched` means the sequences agree; running out of
/// edges first leaves a tail that was never validated.
fn sweep(matched: &[Point], reference: &[Point], start_check: isize) -> SweepCheck {
    let total = matched.len();
    let mut index = 0usize;

    for (start, end) in cyclic_edges(reference) {
        while index < total {
            let point = matched[index];
            if index as isize > start_check && !point.on_segment(start, end) {
                return SweepCheck::Mismatch {
                    index,
                    expected: end,
                };
            }
            index += 1;
            if point == end {
                break;
            }
        }
        if index >= total {
            return SweepCheck::Matches;
        }
    }

    // edges exhausted with slots left over
    SweepCheck::Partial(index.saturating_sub(1))
}

/// Consecutive vertex pairs, wrapping around the last element
fn cyclic_edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let count = points.len();
    (0..count).map(move |i| (points[i], points[(i + 1) % count]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 50.0),
            Point::new(0.0, 50.0),
        ]
    }

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(25.0, 50.0),
        ]
    }

    #[test]
    fn test_output_length_is_bigger_count() {
        let matched = reconcile(&triangle(), &square()).unwrap();
        assert_eq!(matched.len(), 4);
    }

    #[test]
    fn test_every_lower_point_survives() {
        let matched = reconcile(&triangle(), &square()).unwrap();
        for point in triangle() {
            assert!(matched.contains(&point), "{point} missing from {matched:?}");
        }
    }

    #[test]
    fn test_result_stays_on_lower_outline() {
        let lower = triangle();
        let matched = reconcile(&lower, &square()).unwrap();
        for point in &matched {
            let on_outline = (0..lower.len()).any(|i| {
                point.on_segment(lower[i], lower[(i + 1) % lower.len()])
            });
            assert!(on_outline, "{point} is off the shorter outline");
        }
    }

    #[test]
    fn test_equal_length_lists_pass_through() {
        let lower = triangle();
        let matched = reconcile(&lower, &lower).unwrap();
        assert_eq!(matched, lower);
    }

    #[test]
    fn test_large_gap_in_counts() {
        let bigger: Vec<Point> = (0..12)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / 12.0;
                Point::new(50.0 * angle.cos(), 50.0 * angle.sin())
            })
            .collect();
        let matched = reconcile(&triangle(), &bigger).unwrap();
        assert_eq!(matched.len(), 12);
        for point in triangle() {
            assert!(matched.contains(&point));
        }
    }

    #[test]
    fn test_nearest_excludes_indices() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let mut excluded = HashSet::new();
        excluded.insert(0);
        let (index, point) = nearest(&points, Point::new(1.0, 0.0), &excluded).unwrap();
        assert_eq!(index, 1);
        assert_eq!(point, Point::new(10.0, 0.0));

        excluded.insert(1);
        assert!(nearest(&points, Point::new(1.0, 0.0), &excluded).is_none());
    }
}
