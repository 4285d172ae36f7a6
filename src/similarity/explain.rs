//! Explain how two attribute strings differ.
//!
//! Both strings are aligned character by character (letters compared
//! case-insensitively), and every unaligned or case-mismatched character is
//! classified. Results are reported in a fixed order: case, whitespace,
//! punctuation, then remaining spelling edits. Descriptions are always
//! relative to the alphabetically-first raw string, so `explain(a, b)` and
//! `explain(b, a)` are identical.

use crate::models::{Difference, DifferenceRecord, Edit};
use crate::similarity::normalize::is_punctuation;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Keep(char, char),
    Delete(char),
    Insert(char),
}

pub fn explain(a: &str, b: &str) -> DifferenceRecord {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    if first == second {
        return DifferenceRecord::default();
    }

    let x: Vec<char> = first.chars().collect();
    let y: Vec<char> = second.chars().collect();

    let mut case_pairs: Vec<(char, char)> = Vec::new();
    let (mut first_ws, mut second_ws) = (0, 0);
    let (mut first_punct, mut second_punct) = (String::new(), String::new());
    let mut edits: Vec<Edit> = Vec::new();
    let mut pending = Edit {
        from: String::new(),
        to: String::new(),
    };

    for op in align(&x, &y) {
        match op {
            Op::Keep(c1, c2) => {
                flush_edit(&mut pending, &mut edits);
                if c1 != c2 && !case_pairs.contains(&(c1, c2)) {
                    case_pairs.push((c1, c2));
                }
            }
            Op::Delete(c) if c.is_whitespace() => first_ws += 1,
            Op::Delete(c) if is_punctuation(c) => first_punct.push(c),
            Op::Delete(c) => pending.from.push(c),
            Op::Insert(c) if c.is_whitespace() => second_ws += 1,
            Op::Insert(c) if is_punctuation(c) => second_punct.push(c),
            Op::Insert(c) => pending.to.push(c),
        }
    }
    flush_edit(&mut pending, &mut edits);

    let mut record = Vec::new();
    if !case_pairs.is_empty() {
        record.push(Difference::Case { pairs: case_pairs });
    }
    if first_ws > 0 || second_ws > 0 {
        record.push(Difference::Whitespace {
            first_extra: first_ws,
            second_extra: second_ws,
        });
    }
    if !first_punct.is_empty() || !second_punct.is_empty() {
        record.push(Difference::Punctuation {
            first_only: first_punct,
            second_only: second_punct,
        });
    }
    if !edits.is_empty() {
        record.push(Difference::Spelling { edits });
    }

    DifferenceRecord(record)
}

fn flush_edit(pending: &mut Edit, edits: &mut Vec<Edit>) {
    if !pending.from.is_empty() || !pending.to.is_empty() {
        edits.push(std::mem::replace(
            pending,
            Edit {
                from: String::new(),
                to: String::new(),
            },
        ));
    }
}

fn same_char(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Upper bound on the alignment table, in cells. Middles larger than this
/// are reported as one deletion followed by one insertion.
const MAX_ALIGNMENT_CELLS: usize = 4_000_000;

/// Align `x` with `y`, keeping any common prefix and suffix as-is and running
/// the weighted alignment only on the differing middle.
fn align(x: &[char], y: &[char]) -> Vec<Op> {
    let prefix = x
        .iter()
        .zip(y)
        .take_while(|(a, b)| same_char(**a, **b))
        .count();
    let suffix = x[prefix..]
        .iter()
        .rev()
        .zip(y[prefix..].iter().rev())
        .take_while(|(a, b)| same_char(**a, **b))
        .count();

    let keep = |a: &[char], b: &[char]| {
        a.iter()
            .zip(b)
            .map(|(&c1, &c2)| Op::Keep(c1, c2))
            .collect::<Vec<_>>()
    };
    let (x_mid, y_mid) = (&x[prefix..x.len() - suffix], &y[prefix..y.len() - suffix]);

    let mut ops = Vec::with_capacity(x.len() + y.len());
    ops.extend(keep(&x[..prefix], &y[..prefix]));
    if (x_mid.len() + 1).saturating_mul(y_mid.len() + 1) > MAX_ALIGNMENT_CELLS {
        ops.extend(x_mid.iter().map(|&c| Op::Delete(c)));
        ops.extend(y_mid.iter().map(|&c| Op::Insert(c)));
    } else {
        ops.extend(align_middle(x_mid, y_mid));
    }
    ops.extend(keep(&x[x.len() - suffix..], &y[y.len() - suffix..]));
    ops
}

/// Weighted longest-common-subsequence alignment.
///
/// A letter/digit/symbol match outweighs any number of whitespace or
/// punctuation matches, so content characters are never left unaligned in
/// favour of separators. Ties prefer deletion over insertion.
fn align_middle(x: &[char], y: &[char]) -> Vec<Op> {
    let (n, m) = (x.len(), y.len());
    let heavy = n + m + 1;
    let weight = |c: char| {
        if c.is_whitespace() || is_punctuation(c) {
            1
        } else {
            heavy
        }
    };

    // dp[i][j]: best weight aligning x[i..] with y[j..]
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            let skip = dp[i + 1][j].max(dp[i][j + 1]);
            dp[i][j] = if same_char(x[i], y[j]) {
                skip.max(weight(x[i]) + dp[i + 1][j + 1])
            } else {
                skip
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if same_char(x[i], y[j]) && dp[i][j] == weight(x[i]) + dp[i + 1][j + 1] {
            ops.push(Op::Keep(x[i], y[j]));
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            ops.push(Op::Delete(x[i]));
            i += 1;
        } else {
            ops.push(Op::Insert(y[j]));
            j += 1;
        }
    }
    ops.extend(x[i..].iter().map(|&c| Op::Delete(c)));
    ops.extend(y[j..].iter().map(|&c| Op::Insert(c)));
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kinds(record: &DifferenceRecord) -> Vec<&'static str> {
        record
            .iter()
            .map(|d| match d {
                Difference::Case { .. } => "case",
                Difference::Whitespace { .. } => "whitespace",
                Difference::Punctuation { .. } => "punctuation",
                Difference::Spelling { .. } => "spelling",
            })
            .collect()
    }

    #[test]
    fn test_case_only() {
        let record = explain("color", "Color");
        assert_eq!(
            record.0,
            vec![Difference::Case {
                pairs: vec![('C', 'c')]
            }]
        );
    }

    #[test]
    fn test_case_pairs_are_deduplicated() {
        let record = explain("COLOR", "color");
        assert_eq!(
            record.0,
            vec![Difference::Case {
                pairs: vec![('C', 'c'), ('O', 'o'), ('L', 'l'), ('R', 'r')]
            }]
        );
    }

    #[test]
    fn test_whitespace_only() {
        let record = explain("Product  Name", "Product Name");
        assert_eq!(
            record.0,
            vec![Difference::Whitespace {
                first_extra: 1,
                second_extra: 0
            }]
        );

        let record = explain("ProductName", "Product Name");
        assert_eq!(kinds(&record), vec!["whitespace"]);

        assert_eq!(kinds(&explain("Color ", "Color")), vec!["whitespace"]);
    }

    #[test]
    fn test_punctuation_only() {
        let record = explain("Product-Name", "ProductName");
        assert_eq!(
            record.0,
            vec![Difference::Punctuation {
                first_only: "-".to_string(),
                second_only: String::new(),
            }]
        );
        assert_eq!(record.to_string(), "Punctuation: '-' vs ''");
    }

    #[test]
    fn test_spelling_edit() {
        let record = explain("colour", "color");
        assert_eq!(
            record.0,
            vec![Difference::Spelling {
                edits: vec![Edit {
                    from: "".to_string(),
                    to: "u".to_string(),
                }]
            }]
        );
    }

    #[test]
    fn test_substitution_grouped_into_one_edit() {
        let record = explain("Grey", "Gray");
        assert_eq!(
            record.0,
            vec![Difference::Spelling {
                edits: vec![Edit {
                    from: "a".to_string(),
                    to: "e".to_string(),
                }]
            }]
        );
    }

    #[test]
    fn test_multiple_differences_reported_in_order() {
        let record = explain("product-name", "Product  Nmae");
        assert_eq!(
            kinds(&record),
            vec!["case", "whitespace", "punctuation", "spelling"]
        );
    }

    #[test]
    fn test_content_preferred_over_separators() {
        // Separators move, the letter stays aligned.
        let record = explain("a--", "--a");
        assert!(!kinds(&record).contains(&"spelling"));
    }

    #[test]
    fn test_identical_is_empty() {
        assert!(explain("Color", "Color").0.is_empty());
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        assert_eq!(kinds(&explain("", "---")), vec!["punctuation"]);
        assert_eq!(kinds(&explain("", "   ")), vec!["whitespace"]);
        assert_eq!(kinds(&explain("", "abc")), vec!["spelling"]);
    }

    #[test]
    fn test_long_strings_align_only_the_middle() {
        let a = format!("{}colour{}", "x".repeat(20_000), "y".repeat(20_000));
        let b = format!("{}color{}", "x".repeat(20_000), "y".repeat(20_000));
        let record = explain(&a, &b);
        assert_eq!(
            record.0,
            vec![Difference::Spelling {
                edits: vec![Edit {
                    from: "".to_string(),
                    to: "u".to_string(),
                }]
            }]
        );
    }

    #[test]
    fn test_oversized_middle_is_bounded() {
        let a = format!("a{}", "x".repeat(5_000));
        let b = format!("b{}z", "x".repeat(5_000));
        let record = explain(&a, &b);
        assert_eq!(kinds(&record), vec!["spelling"]);
    }

    proptest! {
        #[test]
        fn explain_is_order_independent(a in ".{0,20}", b in ".{0,20}") {
            prop_assert_eq!(explain(&a, &b), explain(&b, &a));
        }

        #[test]
        fn distinct_strings_always_differ(a in ".{0,20}", b in ".{0,20}") {
            prop_assume!(a != b);
            prop_assert!(!explain(&a, &b).0.is_empty());
        }

        #[test]
        fn normalize_equal_means_no_spelling(s in "[a-zA-Z ]{1,20}", sep in "[-_ ]") {
            let joined = s.replace(' ', &sep);
            let record = explain(&s, &joined.to_uppercase());
            let no_spelling = record.iter().all(|d| !matches!(d, Difference::Spelling { .. }));
            prop_assert!(no_spelling, "unexpected spelling difference: {}", record);
        }
    }
}
