//! Case-insensitive Levenshtein edit distance.
//!
//! Runs inside the per-candidate scoring loops, so it uses the rolling-row
//! technique: O(len1 * len2) time, one row of O(min(len1, len2)) cells.

/// Minimum number of single-character inserts/deletes/substitutions needed to
/// turn `a` into `b`, ignoring case.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().flat_map(char::to_lowercase).collect();
    let b: Vec<char> = b.chars().flat_map(char::to_lowercase).collect();

    // Keep the row as short as possible.
    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };

    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (i, lc) in long.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;

        for (j, sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };
            let next = (row[j] + 1).min(row[j + 1] + 1).min(prev_diag + cost);
            prev_diag = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(edit_distance("github", "github"), 0);
    }

    #[test]
    fn empty_string_costs_full_length() {
        assert_eq!(edit_distance("", "rust"), 4);
        assert_eq!(edit_distance("rust", ""), 4);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn symmetric() {
        assert_eq!(edit_distance("kitten", "sitting"), edit_distance("sitting", "kitten"));
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(edit_distance("GitHub", "github"), 0);
        assert_eq!(edit_distance("RUST", "rusty"), 1);
    }

    #[test]
    fn single_substitution() {
        assert_eq!(edit_distance("work", "worm"), 1);
    }
}
