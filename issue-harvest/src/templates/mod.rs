//! Template rendering using Handlebars.
//!
//! Migration comments are rendered from Handlebars templates so the wording
//! can be replaced through configuration.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

/// Default provenance comment posted first on a migrated issue.
///
/// Variables: `source_url`, `source_number`, `source_repo`, `team`, `author`.
pub const DEFAULT_PROVENANCE_TEMPLATE: &str = "Comments and Issue are copied from the Original Ticket: {{source_url}}. \
From now on {{team}} is responsible for tracking this issue. \
Please use this ticket/thread for further discussions cc @{{author}}";

/// Default body for each copied comment.
///
/// Variables: `body`, `author`, `author_association`, `created_at`,
/// `updated_at`, `reactions`.
pub const DEFAULT_COMMENT_TEMPLATE: &str = "{{body}}

---
_Originally posted by @{{author}}{{#unless (eq author_association \"NONE\")}} ({{author_association}}){{/unless}} \
on {{created_at}}{{#if updated_at}}, last edited {{updated_at}}{{/if}}\
{{#if reactions}}. Reactions: {{reactions}}{{/if}}_";

/// Checks that `template` compiles.
///
/// # Errors
///
/// Returns [`TemplateError::RegistrationError`] on a syntax error.
pub fn validate_template(template: &str) -> Result<(), TemplateError> {
    handlebars::Template::compile(template)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_templates_compile() {
        validate_template(DEFAULT_PROVENANCE_TEMPLATE).unwrap();
        validate_template(DEFAULT_COMMENT_TEMPLATE).unwrap();
    }

    #[test]
    fn rejects_unclosed_blocks() {
        assert!(matches!(
            validate_template("{{#if team}}unterminated"),
            Err(TemplateError::RegistrationError(_))
        ));
    }
}
