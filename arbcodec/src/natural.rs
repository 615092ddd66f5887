//! Natural (numeric-aware) string ordering for term keys.
//!
//! POEditor sorts terms naturally, so `item2` comes before `item10`. Plain
//! lexicographic ordering would interleave them and produce noisy diffs in
//! generated ARB files.

use std::cmp::Ordering;

/// Compares two strings treating runs of ASCII digits as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < a_bytes.len() && j < b_bytes.len() {
        let ca = a_bytes[i];
        let cb = b_bytes[j];

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let a_start = i;
            while i < a_bytes.len() && a_bytes[i].is_ascii_digit() {
                i += 1;
            }
            let b_start = j;
            while j < b_bytes.len() && b_bytes[j].is_ascii_digit() {
                j += 1;
            }

            let a_digits = a[a_start..i].trim_start_matches('0');
            let b_digits = b[b_start..j].trim_start_matches('0');

            // More significant digits wins; equal width falls back to the
            // digit string itself.
            let ordering = a_digits
                .len()
                .cmp(&b_digits.len())
                .then_with(|| a_digits.cmp(b_digits));
            if ordering != Ordering::Equal {
                return ordering;
            }
        } else {
            if ca != cb {
                return ca.cmp(&cb);
            }
            i += 1;
            j += 1;
        }
    }

    (a_bytes.len() - i)
        .cmp(&(b_bytes.len() - j))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_compare_numerically() {
        assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
        assert_eq!(natural_cmp("item10", "item2"), Ordering::Greater);
        assert_eq!(natural_cmp("item1", "item2"), Ordering::Less);
    }

    #[test]
    fn test_plain_strings_compare_lexicographically() {
        assert_eq!(natural_cmp("apple", "banana"), Ordering::Less);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_is_less() {
        assert_eq!(natural_cmp("item", "item1"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("item002", "item10"), Ordering::Less);
        // Equal values tie-break on the raw string.
        assert_eq!(natural_cmp("item010", "item10"), Ordering::Less);
    }

    #[test]
    fn test_sorting_a_term_list() {
        let mut terms = ["item10", "item2", "item1", "alpha", "item10b"];
        terms.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(terms, ["alpha", "item1", "item2", "item10", "item10b"]);
    }
}
