//! Sequence metrics: longest common subsequence/substring and Ratcliff/Obershelp

/// Length of the longest common subsequence (characters in order, gaps allowed)
pub fn longest_common_subsequence(source: &str, target: &str) -> usize {
    let a: Vec<char> = source.chars().collect();
    let b: Vec<char> = target.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Length of the longest common contiguous substring
pub fn longest_common_substring(source: &str, target: &str) -> usize {
    let a: Vec<char> = source.chars().collect();
    let b: Vec<char> = target.chars().collect();
    longest_match(&a, &b).2
}

/// Ratcliff/Obershelp pattern matching similarity: `2 * matched / (|a| + |b|)`.
///
/// Matched characters come from the longest common block plus, recursively,
/// the blocks found to its left and right.
pub fn ratcliff_obershelp_similarity(source: &str, target: &str) -> f64 {
    let a: Vec<char> = source.chars().collect();
    let b: Vec<char> = target.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * matched_characters(&a, &b)) as f64 / total as f64
}

fn matched_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, len) = longest_match(&a[a_lo..a_hi], &b[b_lo..b_hi]);
        if len == 0 {
            continue;
        }
        matched += len;
        let (i, j) = (a_lo + i, b_lo + j);
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + len < a_hi && j + len < b_hi {
            pending.push((i + len, a_hi, j + len, b_hi));
        }
    }

    matched
}

/// First longest common block as `(start_in_a, start_in_b, len)`
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    if a.is_empty() || b.is_empty() {
        return best;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best.2 {
                let len = curr[j + 1];
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}
