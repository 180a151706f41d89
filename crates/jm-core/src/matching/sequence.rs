use std::collections::HashMap;

/// Ratcliff/Obershelp 類似度 `2 * M / T`（M: 一致文字数, T: 両文字列の長さ合計）
///
/// 最長一致ブロックを取り、その左右を再帰的に同様に処理する。同長のブロックが
/// 複数ある場合は `a` 側で最も早く始まるものを採用する。200文字以上で働く
/// 頻出文字の除外は行わない（スキル名の長さでは発生しない）。
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b_index.entry(*c).or_default().push(j);
    }

    let mut matched = 0usize;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(&a, &b_index, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    2.0 * matched as f64 / total as f64
}

/// `a[a_lo..a_hi]` と `b[b_lo..b_hi]` の最長共通部分列（連続）を `(i, j, size)` で返す。
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // j → a[i-1] で終わる b[j] までの一致長
    let mut run_len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_run_len = HashMap::new();
        let positions = b_index.get(c).map(Vec::as_slice).unwrap_or(&[]);
        for &j in positions {
            if j < b_lo {
                continue;
            }
            if j >= b_hi {
                break;
            }
            let k = j
                .checked_sub(1)
                .and_then(|prev| run_len.get(&prev))
                .copied()
                .unwrap_or(0)
                + 1;
            next_run_len.insert(j, k);
            if k > best_size {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_size = k;
            }
        }
        run_len = next_run_len;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identical_and_empty_inputs() {
        assert_eq!(sequence_ratio("rust", "rust"), 1.0);
        assert_eq!(sequence_ratio("", ""), 1.0);
        assert_eq!(sequence_ratio("rust", ""), 0.0);
    }

    #[test]
    fn one_extra_character() {
        assert_close(sequence_ratio("rust", "rusty"), 8.0 / 9.0);
        assert_close(sequence_ratio("kubernetes", "kubernets"), 18.0 / 19.0);
        assert_close(sequence_ratio("rustlang", "rustlng"), 14.0 / 15.0);
    }

    #[test]
    fn blocks_on_both_sides_of_longest_match() {
        // "k" first, then "s" from the remainder on the right
        assert_close(sequence_ratio("k8s", "kubernets"), 4.0 / 12.0);
    }

    #[test]
    fn rotation_keeps_only_longest_block() {
        // "bcd" matches; the leftover "a" sits on opposite sides
        assert_close(sequence_ratio("abcd", "bcda"), 6.0 / 8.0);
    }

    #[test]
    fn unrelated_words_score_low() {
        assert_close(sequence_ratio("cobol", "haskell"), 2.0 / 12.0);
    }
}
