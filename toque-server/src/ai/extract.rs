/// Pull the first balanced JSON object out of free-form completion text.
///
/// Models wrap their JSON in prose or markdown fences often enough that
/// a plain `serde_json::from_str` on the whole reply is unreliable.
/// Brace counting skips braces inside string literals.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn extracts_from_markdown_fence() {
        let text = "Voici les prédictions :\n```json\n{\"predictions\": []}\n```";
        assert_eq!(extract_json_object(text), Some("{\"predictions\": []}"));
    }

    #[test]
    fn handles_nested_objects_and_braces_in_strings() {
        let text = r#"note {"outer": {"raison": "pic {inattendu}"}} trailing"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"outer": {"raison": "pic {inattendu}"}}"#)
        );
    }

    #[test]
    fn none_when_unbalanced_or_absent() {
        assert_eq!(extract_json_object("pas de json ici"), None);
        assert_eq!(extract_json_object(r#"{"a": 1"#), None);
    }
}
