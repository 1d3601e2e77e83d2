//! Euclidean rhythm generation for `token(H,T)` notation.

/// Spread `hits` onsets over `total` slots.
/// Returns a Vec<bool> where `true` = onset, `false` = rest.
///
/// This is a rounding distribution, not Bjorklund's algorithm: onset `i` lands
/// on `round(i * total / hits) % total`. For some inputs two onsets round onto
/// the same slot, so the result can hold fewer than `hits` onsets.
pub fn euclidean_rhythm(hits: usize, total: usize) -> Vec<bool> {
    if hits == 0 {
        return vec![false; total];
    }
    if hits >= total {
        return vec![true; total];
    }

    let mut rhythm = vec![false; total];
    let spacing = total as f64 / hits as f64;
    for i in 0..hits {
        let position = (i as f64 * spacing).round() as usize % total;
        rhythm[position] = true;
    }
    rhythm
}

/// Onset positions of `euclidean_rhythm(hits, total)` that fall below
/// `limit`, in ascending order.
///
/// Work is bounded by `limit`, not by `total`, so very long cycles are cheap
/// when only the first few slots are needed.
pub fn euclidean_onsets(hits: usize, total: usize, limit: usize) -> Vec<usize> {
    let span = limit.min(total);
    if hits == 0 || span == 0 {
        return Vec::new();
    }
    if hits >= total {
        return (0..span).collect();
    }

    // spacing > 1, so positions strictly increase with i; a position that
    // wraps to `total` lands on slot 0, which i = 0 already covers
    let spacing = total as f64 / hits as f64;
    let mut onsets = Vec::new();
    for i in 0..hits {
        let position = (i as f64 * spacing).round() as usize;
        if position >= span {
            break;
        }
        onsets.push(position);
    }
    onsets
}
