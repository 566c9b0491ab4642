use super::parser::UpstreamItem;

/// Keeps the items whose `dc:creator` text equals `author` exactly.
///
/// No trimming, case folding or Unicode normalization is applied. Relative
/// order is preserved.
pub fn filter_by_creator<'a>(items: &'a [UpstreamItem], author: &str) -> Vec<&'a UpstreamItem> {
    items
        .iter()
        .filter(|item| item.creator.as_deref() == Some(author))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(creator: Option<&str>, link: &str) -> UpstreamItem {
        UpstreamItem {
            creator: creator.map(str::to_string),
            link: Some(link.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_match_only() {
        let items = vec![
            item(Some("Rei丨暮らしとNotion。"), "1"),
            item(Some("Rei丨暮らしとNotion。 "), "2"),
            item(Some("rei丨暮らしとNotion。"), "3"),
            item(Some("Someone Else"), "4"),
            item(None, "5"),
            item(Some("Rei丨暮らしとNotion。"), "6"),
        ];

        let kept: Vec<_> = filter_by_creator(&items, "Rei丨暮らしとNotion。")
            .into_iter()
            .map(|i| i.link.as_deref().unwrap())
            .collect();
        assert_eq!(kept, vec!["1", "6"]);
    }

    #[test]
    fn test_no_matches() {
        let items = vec![item(Some("Alice"), "1")];
        assert!(filter_by_creator(&items, "Bob").is_empty());
        assert!(filter_by_creator(&[], "Bob").is_empty());
    }

    proptest! {
        #[test]
        fn prop_filter_is_ordered_subset(
            creators in proptest::collection::vec(prop_oneof![Just("A"), Just("B"), Just("a")], 0..30)
        ) {
            let items: Vec<_> = creators
                .iter()
                .enumerate()
                .map(|(i, c)| item(Some(c), &i.to_string()))
                .collect();

            let kept = filter_by_creator(&items, "A");
            prop_assert!(kept.len() <= items.len());
            prop_assert!(kept.iter().all(|i| i.creator.as_deref() == Some("A")));

            let positions: Vec<usize> = kept
                .iter()
                .map(|i| i.link.as_deref().unwrap().parse().unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(kept.len(), creators.iter().filter(|c| **c == "A").count());
        }
    }
}
