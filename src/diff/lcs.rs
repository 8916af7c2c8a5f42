//! Longest common subsequence over arbitrary comparable tokens.
//!
//! The table is the classic O(m·n) dynamic program. Reconstruction walks back
//! from the bottom-right corner and, when the up and left neighbours hold the
//! same length, steps up. Which of several equally long subsequences is
//! returned depends on that rule, so callers relying on a particular match for
//! repeated tokens get a stable answer.

/// Fill the LCS length table for `a` and `b`.
///
/// `table[i][j]` holds the LCS length of `a[..i]` and `b[..j]`.
fn length_table<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Vec<usize>> {
    let (m, n) = (a.len(), b.len());
    let mut table = vec![vec![0usize; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    table
}

/// Compute a longest common subsequence of `a` and `b`.
pub fn lcs<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let table = length_table(a, b);
    let mut result = Vec::with_capacity(table[a.len()][b.len()]);
    let (mut i, mut j) = (a.len(), b.len());

    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            result.push(a[i - 1].clone());
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    // Collected back to front.
    result.reverse();
    result
}

/// Length of the longest common subsequence of `a` and `b`
pub fn lcs_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    length_table(a, b)[a.len()][b.len()]
}
