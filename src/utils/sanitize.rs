//! HTML sanitization for user-supplied content.
//!
//! News bodies are authored in the admin panel as rich HTML; testimonials
//! and contact-form fields are plain text. Both go through ammonia before
//! they reach the database.

use once_cell::sync::Lazy;

static TEXT_CLEANER: Lazy<ammonia::Builder<'static>> = Lazy::new(ammonia::Builder::empty);

/// Sanitize rich HTML, keeping ammonia's conservative default tag set.
pub fn sanitize_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Strip all markup, leaving plain text only.
pub fn sanitize_text(input: &str) -> String {
    TEXT_CLEANER.clean(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tags_removed() {
        let dirty = "<p>hello</p><script>alert('x')</script>";
        let clean = sanitize_html(dirty);
        assert!(clean.contains("<p>hello</p>"));
        assert!(!clean.contains("script"));
    }

    #[test]
    fn test_event_handlers_removed() {
        let dirty = r#"<a href="/x" onclick="steal()">link</a>"#;
        let clean = sanitize_html(dirty);
        assert!(!clean.contains("onclick"));
    }

    #[test]
    fn test_plain_text_strips_all_tags() {
        let dirty = "<b>bold</b> and <i>italic</i>";
        assert_eq!(sanitize_text(dirty), "bold and italic");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(sanitize_text("just words"), "just words");
    }
}
