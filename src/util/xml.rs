use std::borrow::Cow;

/// Characters that have to be replaced before text is interpolated into XML.
const ESCAPE_CHARS: [char; 5] = ['&', '<', '>', '"', '\''];

/// Escapes text for use in XML element content or attribute values.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with their predefined entities.
/// `&` is always handled first so the entities introduced for the other
/// characters are not escaped a second time. An absent value escapes to the
/// empty string.
///
/// Borrows the input when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use author_feed::util::escape_xml;
///
/// assert_eq!(escape_xml(Some("Tips & <Tricks>")), "Tips &amp; &lt;Tricks&gt;");
/// assert_eq!(escape_xml(None), "");
/// ```
pub fn escape_xml(text: Option<&str>) -> Cow<'_, str> {
    let Some(text) = text else {
        return Cow::Borrowed("");
    };
    if !text.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_each_char() {
        assert_eq!(escape_xml(Some("&")), "&amp;");
        assert_eq!(escape_xml(Some("<")), "&lt;");
        assert_eq!(escape_xml(Some(">")), "&gt;");
        assert_eq!(escape_xml(Some("\"")), "&quot;");
        assert_eq!(escape_xml(Some("'")), "&apos;");
    }

    #[test]
    fn test_existing_entity_is_escaped_again() {
        // Input text is literal, so an entity-looking sequence must survive a round trip
        assert_eq!(escape_xml(Some("&amp;")), "&amp;amp;");
        assert_eq!(escape_xml(Some("&lt;b&gt;")), "&amp;lt;b&amp;gt;");
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(escape_xml(None), "");
        assert_eq!(escape_xml(Some("")), "");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        let escaped = escape_xml(Some("暮らしとNotion。"));
        assert!(matches!(escaped, Cow::Borrowed(_)));
        assert_eq!(escaped, "暮らしとNotion。");
    }

    #[test]
    fn test_mixed() {
        assert_eq!(
            escape_xml(Some(r#"Q&A: "<tag>" isn't"#)),
            "Q&amp;A: &quot;&lt;tag&gt;&quot; isn&apos;t"
        );
    }

    proptest! {
        #[test]
        fn prop_escaped_text_has_no_raw_markup(text in ".*") {
            let escaped = escape_xml(Some(&text));
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
        }

        #[test]
        fn prop_unescape_restores_input(text in "[a-z&<>\"' 日本]{0,40}") {
            let escaped = escape_xml(Some(&text));
            let restored = quick_xml::escape::unescape(&escaped).unwrap();
            prop_assert_eq!(restored.as_ref(), text.as_str());
        }
    }
}
