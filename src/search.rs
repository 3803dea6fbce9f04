/// Finds the element of `sorted` whose key is closest to `target`.
///
/// `sorted` must be in ascending key order. The search narrows a bracket
/// `[i, j]` until the two ends are adjacent, then picks the nearer end;
/// an exact tie between the two ends goes to the upper one.
pub fn closest_by<T>(sorted: &[T], target: f64, key: impl Fn(&T) -> f64) -> Option<&T> {
    if sorted.is_empty() {
        return None;
    }

    let (mut i, mut j) = (0usize, sorted.len() - 1);
    while i + 1 < j {
        let k = i + (j - i) / 2;
        if key(&sorted[k]) < target {
            i = k;
        } else {
            j = k;
        }
    }

    let (left, right) = (&sorted[i], &sorted[j]);
    let (lo, hi) = (key(left), key(right));
    if target < lo {
        Some(left)
    } else if target > hi {
        Some(right)
    } else if target - lo < hi - target {
        Some(left)
    } else {
        Some(right)
    }
}
