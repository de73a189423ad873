//! Minimal XML text handling for the SVG builder.

/// Characters allowed in XML 1.0 text content: tab, LF, CR, and everything
/// outside the control/surrogate ranges.
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Escapes text for use inside an SVG attribute or text node, dropping any
/// characters XML 1.0 forbids outright.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_valid_xml_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_xml;
    use proptest::prelude::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_xml(r#"Records <"identified" & 'screened'>"#),
            "Records &lt;&quot;identified&quot; &amp; &apos;screened&apos;&gt;"
        );
    }

    #[test]
    fn strips_invalid_control_characters() {
        assert_eq!(escape_xml("n\u{0007} = \u{000C}141"), "n = 141");
    }

    #[test]
    fn keeps_label_line_breaks() {
        assert_eq!(escape_xml("Studies included\n(n = 141)"), "Studies included\n(n = 141)");
    }

    proptest! {
        #[test]
        fn output_never_contains_raw_markup(s in "\\PC*") {
            let escaped = escape_xml(&s);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(escaped.chars().all(super::is_valid_xml_char));
        }
    }
}
