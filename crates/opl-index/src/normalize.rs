//! Name normalization.
//!
//! Index keys use a single canonical rule. Searches try several looser
//! variants, in a fixed order, and stop at the first variant with a hit.

/// Canonical index key for a dataset display name.
///
/// Trims, drops every space and lowercases. Commas are kept.
///
/// # Examples
///
/// ```
/// use opl_index::canonical_name;
///
/// assert_eq!(canonical_name("  John Smith "), "johnsmith");
/// assert_eq!(canonical_name("Smith, John"), "smith,john");
/// ```
pub fn canonical_name(display_name: &str) -> String {
    display_name.trim().replace(' ', "").to_lowercase()
}

/// One search normalization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Remove spaces and commas, lowercase.
    StripSpacesAndCommas,
    /// Remove spaces only, lowercase.
    StripSpaces,
    /// Remove commas only, lowercase.
    StripCommas,
}

impl Variant {
    /// Variants in the order searches must try them.
    pub const ORDER: [Variant; 3] = [
        Variant::StripSpacesAndCommas,
        Variant::StripSpaces,
        Variant::StripCommas,
    ];

    pub fn apply(self, input: &str) -> String {
        match self {
            Self::StripSpacesAndCommas => input.replace([' ', ','], "").to_lowercase(),
            Self::StripSpaces => input.replace(' ', "").to_lowercase(),
            Self::StripCommas => input.replace(',', "").to_lowercase(),
        }
    }
}

/// Ordered, de-duplicated search keys for free-text input.
///
/// Blank keys are dropped, so blank input yields no variants at all.
pub fn search_variants(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(Variant::ORDER.len());
    for variant in Variant::ORDER {
        let key = variant.apply(input);
        if !key.trim().is_empty() && !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_variant_order() {
        assert_eq!(
            search_variants("O'Brien, Sean"),
            vec!["o'briensean", "o'brien,sean", "o'brien sean"]
        );
    }

    #[test]
    fn test_variants_are_deduplicated() {
        assert_eq!(search_variants("John Smith"), vec!["johnsmith", "john smith"]);
        assert_eq!(search_variants("Smith"), vec!["smith"]);
    }

    #[test]
    fn test_blank_input_has_no_variants() {
        assert!(search_variants("").is_empty());
        assert!(search_variants("   ").is_empty());
        assert_eq!(search_variants("  , "), vec![","]);
    }

    #[test]
    fn test_canonical_matches_first_variant_without_commas() {
        assert_eq!(canonical_name("John Smith"), search_variants("John Smith")[0]);
    }

    proptest! {
        #[test]
        fn test_variants_are_idempotent(input in "[ ,a-zA-Z'.-]{0,24}") {
            for variant in Variant::ORDER {
                let once = variant.apply(&input);
                prop_assert_eq!(variant.apply(&once), once);
            }
        }

        #[test]
        fn test_canonical_is_idempotent(input in "[ ,a-zA-Z'.-]{0,24}") {
            let once = canonical_name(&input);
            prop_assert_eq!(canonical_name(&once), once);
        }
    }
}
