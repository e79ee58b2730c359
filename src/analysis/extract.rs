/// Locate the first complete JSON object inside free-form model output
///
/// Generative models like to wrap their JSON in prose or markdown fences.
/// The scanner walks the text tracking brace depth, ignoring braces that
/// appear inside string literals (including escaped quotes), and returns the
/// first balanced `{...}` slice.

/// Return the first balanced `{...}` substring, or None if there is none
pub fn first_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(&raw[start..end]);
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
    fn test_plain_object() {
        assert_eq!(first_json_object(r#"{"mood":"happy"}"#), Some(r#"{"mood":"happy"}"#));
    }

    #[test]
    fn test_object_wrapped_in_prose_and_fences() {
        let raw = "Sure! Here is the analysis:\n```json\n{\"mood\": \"calm\", \"emotions\": [{\"emotion\": \"calm\"}]}\n```\nLet me know {if} you need more.";
        assert_eq!(
            first_json_object(raw),
            Some("{\"mood\": \"calm\", \"emotions\": [{\"emotion\": \"calm\"}]}")
        );
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let raw = r#"{"summary": "a } tricky { string with \" quote", "mood": "sad"} trailing"#;
        assert_eq!(
            first_json_object(raw),
            Some(r#"{"summary": "a } tricky { string with \" quote", "mood": "sad"}"#)
        );
    }

    #[test]
    fn test_unbalanced_or_missing() {
        assert_eq!(first_json_object("no json here"), None);
        assert_eq!(first_json_object("{\"mood\": \"happy\""), None);
    }

    #[test]
    fn test_stray_closing_brace_before_object() {
        assert_eq!(first_json_object("} then {\"a\":1}"), Some("{\"a\":1}"));
    }
}
