use proptest::prelude::*;
use service_utils::constants::INVISIBLE_CHARS;
use service_utils::{unique_of, value_of, StringUtils};

// Text heavy on whitespace and invisible characters
fn noisy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z]{1,4}",
            Just(" ".to_string()),
            Just("\t".to_string()),
            Just("\n".to_string()),
            Just("\u{3000}".to_string()),
            prop::sample::select(INVISIBLE_CHARS.to_vec()).prop_map(String::from),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn collapsed_text_is_clean(s in noisy_text()) {
        let out = StringUtils::remove_duplicate_spaces(&s);
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.chars().any(|c| INVISIBLE_CHARS.contains(&c)));
        prop_assert!(out.chars().all(|c| c == ' ' || !c.is_whitespace()));
    }

    #[test]
    fn remove_all_spaces_leaves_no_whitespace(s in noisy_text()) {
        let out = StringUtils::remove_all_spaces(&s);
        prop_assert!(!out.chars().any(char::is_whitespace));
        prop_assert!(!out.chars().any(|c| INVISIBLE_CHARS.contains(&c)));
    }

    #[test]
    fn cleaning_is_idempotent(s in ".{0,80}") {
        let once = StringUtils::remove_duplicate_spaces(&s);
        prop_assert_eq!(StringUtils::remove_duplicate_spaces(&once), once.clone());
        let all = StringUtils::remove_all_spaces(&s);
        prop_assert_eq!(StringUtils::remove_all_spaces(&all), all.clone());
    }

    #[test]
    fn collapsing_then_removing_matches_removing(s in noisy_text()) {
        let collapsed = StringUtils::remove_duplicate_spaces(&s);
        prop_assert_eq!(collapsed.replace(' ', ""), StringUtils::remove_all_spaces(&s));
    }

    #[test]
    fn unique_of_has_no_duplicates_and_keeps_order(xs in prop::collection::vec(0u8..16, 0..64)) {
        let unique = unique_of(&xs);

        for (i, a) in unique.iter().enumerate() {
            prop_assert!(!unique[i + 1..].contains(a));
            prop_assert!(xs.contains(a));
        }

        let first_seen: Vec<usize> = unique
            .iter()
            .map(|v| xs.iter().position(|x| x == v).unwrap_or(usize::MAX))
            .collect();
        prop_assert!(first_seen.windows(2).all(|w| w[0] < w[1]));

        prop_assert_eq!(unique_of(&unique), unique.clone());
    }

    #[test]
    fn unique_of_keeps_every_distinct_value(xs in prop::collection::vec(".{0,3}", 0..32)) {
        let unique = unique_of(&xs);
        prop_assert!(xs.iter().all(|x| unique.contains(x)));
    }

    #[test]
    fn value_of_returns_referenced_value(v in any::<i64>(), s in ".{0,16}") {
        prop_assert_eq!(value_of(Some(&v)), v);
        prop_assert_eq!(value_of(Some(&s)), s);
        prop_assert_eq!(value_of::<i64>(None), 0);
    }
}
