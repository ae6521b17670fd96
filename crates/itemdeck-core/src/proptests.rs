//! Property-based tests for identifiers.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::ids::{ItemId, generate_identifier, is_valid_identifier};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_any_24_hex_chars_are_valid(s in "[a-fA-F0-9]{24}") {
            prop_assert!(is_valid_identifier(&s));
            let id = ItemId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        #[test]
        fn test_other_lengths_are_invalid(s in "[a-f0-9]{0,23}|[a-f0-9]{25,40}") {
            prop_assert!(!is_valid_identifier(&s));
        }

        #[test]
        fn test_non_hex_char_is_invalid(
            prefix in "[a-f0-9]{0,23}",
            bad in "[g-zG-Z_ -]",
        ) {
            let mut s = prefix.clone();
            s.push_str(&bad);
            while s.len() < 24 {
                s.push('0');
            }
            prop_assert!(!is_valid_identifier(&s));
        }

        #[test]
        fn test_generated_ids_validate(_seed in any::<u8>()) {
            prop_assert!(is_valid_identifier(&generate_identifier()));
        }
    }
}
