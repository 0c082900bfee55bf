//! Best-effort JSON extraction from free-form model output.
//!
//! The study-guide prompt asks for JSON, but models routinely wrap the
//! object in prose or a markdown fence. The extraction takes the span from
//! the first `{` to the last `}` - the same greedy match the prompt was
//! designed against - and leaves parsing to the caller.

/// Extract the widest `{ ... }` span from free-form text.
///
/// Returns `None` when the text contains no such span. The result is not
/// guaranteed to be valid JSON; callers must still parse it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_object_extracted_whole() {
        let text = r#"{"summary": "s"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn object_in_prose_extracted() {
        let text = "Here is your study guide:\n{\"summary\": \"s\"}\nEnjoy!";
        assert_eq!(extract_json_object(text), Some("{\"summary\": \"s\"}"));
    }

    #[test]
    fn markdown_fence_stripped() {
        let text = "```json\n{\"summary\": \"s\", \"flashcards\": []}\n```";
        assert_eq!(
            extract_json_object(text),
            Some("{\"summary\": \"s\", \"flashcards\": []}")
        );
    }

    #[test]
    fn nested_braces_kept() {
        let text = "x {\"a\": {\"b\": 1}} y";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn no_object_returns_none() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn reversed_braces_return_none() {
        assert_eq!(extract_json_object("} backwards {"), None);
    }
}
