//! Keyword-based bin classification.

use crate::model::BinCategory;

/// Map a calendar label to the bin it announces.
///
/// Every category whose keyword occurs in the label (case-insensitively) is a
/// candidate; the last one in [`BinCategory::ALL`] order wins. Labels without a
/// keyword, such as holiday notices, yield `None`.
#[must_use]
pub fn classify(label_text: &str) -> Option<BinCategory> {
    let label = label_text.to_lowercase();
    BinCategory::ALL
        .into_iter()
        .rev()
        .find(|category| label.contains(category.keyword()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn recognizes_calendar_labels() {
        assert_eq!(classify("Ophalen van restafval"), Some(BinCategory::Residual));
        assert_eq!(classify("Papier en karton"), Some(BinCategory::Paper));
        assert_eq!(
            classify("GFT (Groenten-, fruit- en tuinafval)"),
            Some(BinCategory::Plants)
        );
        assert_eq!(classify("PLASTIC, blik en drinkpakken"), Some(BinCategory::Plastic));
    }

    #[test]
    fn labels_without_keyword_are_unclassified() {
        assert_eq!(classify("Tweede Pinksterdag: geen inzameling"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn last_category_wins_when_several_match() {
        assert_eq!(classify("plastic of papier"), Some(BinCategory::Paper));
        assert_eq!(classify("restafval en plastic"), Some(BinCategory::Residual));
        assert_eq!(classify("groenten, papier"), Some(BinCategory::Plants));
    }

    fn category() -> impl Strategy<Value = BinCategory> {
        prop::sample::select(BinCategory::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn keyword_anywhere_in_label_is_found(
            category in category(),
            prefix in "[ a-z0-9,-]{0,12}",
            suffix in "[ a-z0-9,-]{0,12}",
            upper in any::<bool>(),
        ) {
            let keyword = if upper {
                category.keyword().to_uppercase()
            } else {
                category.keyword().to_owned()
            };
            let label = format!("{prefix}{keyword}{suffix}");
            let found = classify(&label);
            // A random affix can only add a keyword that sorts after this one.
            prop_assert!(found.is_some_and(|found| found >= category), "{label:?} -> {found:?}");
        }

        #[test]
        fn digits_and_punctuation_never_classify(label in "[0-9 ,.:;()-]{0,40}") {
            prop_assert_eq!(classify(&label), None);
        }
    }
}
