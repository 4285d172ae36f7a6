use crate::models::Score;
use crate::similarity::normalize::scoring_form;

/// Lexical similarity of two attribute strings, `0..=100`.
///
/// Levenshtein ratio over the [`scoring_form`]s:
/// `round(100 * (1 - distance / max_len))`, counted in chars. A score of
/// `100` is reserved for identical scoring forms, so a single edit in a very
/// long string rounds down to `99` instead of up. Identical non-empty inputs
/// score `100`; otherwise, if either form is empty the score is `0`.
pub fn score(a: &str, b: &str) -> Score {
    if a == b && !a.is_empty() {
        return 100;
    }
    score_forms(&scoring_form(a), &scoring_form(b))
}

/// [`score`] over precomputed scoring forms.
pub fn score_forms(a: &str, b: &str) -> Score {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0;
    }
    if a == b {
        return 100;
    }

    let distance = strsim::levenshtein(a, b);
    let max_len = len_a.max(len_b) as f64;
    let ratio = 100.0 * (1.0 - distance as f64 / max_len);

    (ratio.round() as Score).min(99)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_is_100() {
        assert_eq!(score("Color", "Color"), 100);
        assert_eq!(score("Color", "color "), 100);
    }

    #[test]
    fn test_punctuation_lowers_score() {
        assert!(score("Product-Name", "Product Name") < 100);
        assert!(score("Product-Name", "Product Name") >= 90);
    }

    #[test]
    fn test_unrelated_is_low() {
        assert!(score("Red", "Blue") < 50);
        assert!(score("Color", "Size") < 80);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(score("", ""), 0);
        assert_eq!(score("", "Color"), 0);
        assert_eq!(score("   ", "Color"), 0);
        assert_eq!(score("   ", " "), 0);
    }

    #[test]
    fn test_identical_whitespace_only_is_100() {
        assert_eq!(score("   ", "   "), 100);
        assert_eq!(score("\t", "\t"), 100);
    }

    #[test]
    fn test_long_single_edit_stays_below_100() {
        let a = "a".repeat(300);
        let b = format!("{}b", "a".repeat(299));
        assert_eq!(score(&a, &b), 99);
    }

    #[test]
    fn test_more_edits_score_lower() {
        let one = score("colour", "colour1");
        let two = score("colour", "colour12");
        let three = score("colour", "colour123");
        assert!(one > two && two > three);
    }

    proptest! {
        #[test]
        fn score_is_symmetric(a in ".{0,30}", b in ".{0,30}") {
            prop_assert_eq!(score(&a, &b), score(&b, &a));
        }

        #[test]
        fn score_of_self_is_100(a in ".{1,30}") {
            prop_assert_eq!(score(&a, &a), 100);
        }

        #[test]
        fn score_is_bounded(a in ".{0,30}", b in ".{0,30}") {
            prop_assert!(score(&a, &b) <= 100);
        }
    }
}
