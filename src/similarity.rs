//! Edit-tolerant string similarity based on the longest common subsequence.
//!
//! Both inputs are normalized with [`normalize_key`] before comparison, so
//! `"Mary Ann"` and `"maryann"` are identical. The score is
//! `lcs / max(len_a, len_b)` measured in characters, always within `[0, 1]`.

/// Normalize a string for similarity comparison.
///
/// Lower-cases and removes every whitespace character, including internal
/// runs. This is stricter than the parser's normalizer, which keeps
/// internal whitespace.
pub fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Length of the longest common subsequence of `a` and `b`.
///
/// Classic dynamic-programming recurrence evaluated with two rolling rows:
/// a diagonal step on equal characters, otherwise the larger of the cell
/// above and the cell to the left.
pub fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0_usize; b.len().saturating_add(1)];
    for ca in a {
        let mut curr: Vec<usize> = Vec::with_capacity(prev.len());
        curr.push(0);
        for (cb, above) in b.iter().zip(prev.windows(2)) {
            let left = curr.last().copied().unwrap_or(0);
            let cell = if ca == cb {
                above[0].saturating_add(1)
            } else {
                above[1].max(left)
            };
            curr.push(cell);
        }
        prev = curr;
    }
    prev.last().copied().unwrap_or(0)
}

/// Similarity of two strings in `[0, 1]`.
///
/// Returns `1.0` for strings that are identical after normalization and
/// `0.0` when they share no characters or both normalize to empty.
/// Symmetric in its arguments. Callers are expected to cap input length;
/// the cost is proportional to the product of both lengths.
pub fn score(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize_key(a).chars().collect();
    let b: Vec<char> = normalize_key(b).chars().collect();

    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }

    let common = lcs_len(&a, &b);
    ratio(common, longest)
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    let num = u32::try_from(numerator).unwrap_or(u32::MAX);
    let den = u32::try_from(denominator).unwrap_or(u32::MAX);
    f64::from(num) / f64::from(den)
}
