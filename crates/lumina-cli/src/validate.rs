//! Field validation for editor and visitor input.
//!
//! Validation runs before any store call, so a rejected form never leaves
//! a partial write behind.

use crate::output::CliError;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_AUTHOR_LEN: usize = 64;
pub const MAX_COMMENT_LEN: usize = 4_096;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
    pub suggestion: String,
    pub code: &'static str,
}

impl ValidationError {
    pub fn new(
        field: &'static str,
        reason: impl Into<String>,
        suggestion: impl Into<String>,
        code: &'static str,
    ) -> Self {
        Self {
            field,
            reason: reason.into(),
            suggestion: suggestion.into(),
            code,
        }
    }

    pub fn to_cli_error(&self) -> CliError {
        CliError::with_details(
            format!("invalid {}: {}", self.field, self.reason),
            self.suggestion.clone(),
            self.code,
        )
    }
}

fn require_non_empty(
    field: &'static str,
    value: &str,
    suggestion: &str,
    code: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            "must not be empty",
            suggestion,
            code,
        ));
    }
    Ok(())
}

pub fn validate_title(s: &str) -> Result<(), ValidationError> {
    require_non_empty("title", s, "provide a non-empty --title", "invalid_title")?;
    if s.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::new(
            "title",
            format!("must be <= {MAX_TITLE_LEN} characters"),
            "shorten the title",
            "invalid_title",
        ));
    }
    if s.chars().any(char::is_control) {
        return Err(ValidationError::new(
            "title",
            "must not contain control characters",
            "remove control characters from the title",
            "invalid_title",
        ));
    }
    Ok(())
}

pub fn validate_excerpt(s: &str) -> Result<(), ValidationError> {
    require_non_empty(
        "excerpt",
        s,
        "provide a non-empty --excerpt",
        "invalid_excerpt",
    )
}

pub fn validate_content(s: &str) -> Result<(), ValidationError> {
    require_non_empty(
        "content",
        s,
        "provide body text via --content or --content-file",
        "invalid_content",
    )
}

pub fn validate_category(s: &str) -> Result<(), ValidationError> {
    require_non_empty(
        "category",
        s,
        "provide a non-empty --category",
        "invalid_category",
    )
}

pub fn validate_comment_author(s: &str) -> Result<(), ValidationError> {
    require_non_empty("author", s, "provide a non-empty --author", "invalid_author")?;
    if s.chars().count() > MAX_AUTHOR_LEN {
        return Err(ValidationError::new(
            "author",
            format!("must be <= {MAX_AUTHOR_LEN} characters"),
            "shorten the author name",
            "invalid_author",
        ));
    }
    Ok(())
}

pub fn validate_comment_body(s: &str) -> Result<(), ValidationError> {
    require_non_empty("comment", s, "provide a non-empty --body", "invalid_comment")?;
    if s.chars().count() > MAX_COMMENT_LEN {
        return Err(ValidationError::new(
            "comment",
            format!("must be <= {MAX_COMMENT_LEN} characters"),
            "shorten the comment",
            "invalid_comment",
        ));
    }
    if s.chars()
        .any(|ch| ch.is_control() && ch != '\n' && ch != '\t')
    {
        return Err(ValidationError::new(
            "comment",
            "must not contain control characters",
            "use plain UTF-8 text",
            "invalid_comment",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_required_fields_are_rejected() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_excerpt("").is_err());
        assert!(validate_content("").is_err());
        assert!(validate_category("\t").is_err());
        assert!(validate_comment_author("").is_err());
        assert!(validate_comment_body(" ").is_err());
    }

    #[test]
    fn reasonable_values_pass() {
        assert!(validate_title("The Art of Minimalism").is_ok());
        assert!(validate_excerpt("Less is more.").is_ok());
        assert!(validate_content("# Heading\n\nBody").is_ok());
        assert!(validate_category("Design").is_ok());
        assert!(validate_comment_author("Dana").is_ok());
        assert!(validate_comment_body("Great read!\nThanks.").is_ok());
    }

    #[test]
    fn oversized_values_are_rejected() {
        assert!(validate_title(&"t".repeat(MAX_TITLE_LEN + 1)).is_err());
        assert!(validate_comment_author(&"a".repeat(MAX_AUTHOR_LEN + 1)).is_err());
        assert!(validate_comment_body(&"c".repeat(MAX_COMMENT_LEN + 1)).is_err());
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(validate_title("bad\u{0007}title").is_err());
        let err = validate_comment_body("bad\u{0007}comment").expect_err("must fail");
        assert!(err.reason.contains("control characters"));
    }

    #[test]
    fn to_cli_error_carries_code() {
        let err = validate_title("").expect_err("must fail");
        let cli = err.to_cli_error();
        assert_eq!(cli.error_code.as_deref(), Some("invalid_title"));
        assert!(cli.message.contains("title"));
    }
}
