//! Template renderer.

use crate::source::{Comment, Issue, RepoRef};
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{json, Value};

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Comments are markdown, not HTML
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("eq", Box::new(eq_helper));

    hbs
}

/// Helper function for equality comparison in templates.
///
/// Usage: `{{#if (eq variable "value")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Renders migration comments.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the provenance comment for an issue copied from `source_repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_provenance(
        &self,
        template: &str,
        issue: &Issue,
        source_repo: &RepoRef,
        team: &str,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "source_url": issue.html_url,
            "source_number": issue.number,
            "source_repo": source_repo.to_string(),
            "team": team,
            "author": issue.author,
        });

        self.render_template(template, &data)
    }

    /// Renders the body of a copied comment, keeping the original author,
    /// timestamps and reactions as text.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_comment(
        &self,
        template: &str,
        comment: &Comment,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "body": comment.body,
            "author": comment.author,
            "author_association": comment.author_association,
            "created_at": comment.created_at.to_string(),
            "updated_at": comment
                .updated_at
                .filter(|updated| *updated != comment.created_at)
                .map(|updated| updated.to_string())
                .unwrap_or_default(),
            "reactions": comment
                .reactions
                .as_ref()
                .map(|r| r.render())
                .unwrap_or_default(),
        });

        self.render_template(template, &data)
    }

    fn render_template(&self, template: &str, data: &Value) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{IssueState, ReactionSummary};
    use crate::templates::{DEFAULT_COMMENT_TEMPLATE, DEFAULT_PROVENANCE_TEMPLATE};
    use chrono::{TimeZone, Utc};

    fn sample_issue() -> Issue {
        Issue {
            number: 794,
            title: "Carrier mapping change".to_string(),
            body: "Please map DHL".to_string(),
            author: "jdoe".to_string(),
            state: IssueState::Closed,
            html_url: "https://github.example.com/mantle/ops/issues/794".to_string(),
            created_at: Utc.with_ymd_and_hms(2022, 1, 10, 8, 0, 0).unwrap(),
            closed_at: None,
        }
    }

    fn sample_comment() -> Comment {
        Comment {
            id: 1,
            body: "Done <b>now</b>".to_string(),
            author: "octo".to_string(),
            author_association: "MEMBER".to_string(),
            created_at: Utc.with_ymd_and_hms(2022, 1, 11, 9, 0, 0).unwrap(),
            updated_at: None,
            reactions: None,
        }
    }

    #[test]
    fn renders_default_provenance() {
        let renderer = TemplateRenderer::new();
        let text = renderer
            .render_provenance(
                DEFAULT_PROVENANCE_TEMPLATE,
                &sample_issue(),
                &RepoRef::new("mantle", "ops"),
                "Team Mantle",
            )
            .unwrap();

        assert!(text.starts_with(
            "Comments and Issue are copied from the Original Ticket: \
             https://github.example.com/mantle/ops/issues/794."
        ));
        assert!(text.contains("From now on Team Mantle is responsible"));
        assert!(text.ends_with("cc @jdoe"));
    }

    #[test]
    fn renders_comment_footer_without_escaping() {
        let renderer = TemplateRenderer::new();
        let text = renderer
            .render_comment(DEFAULT_COMMENT_TEMPLATE, &sample_comment())
            .unwrap();

        assert!(text.starts_with("Done <b>now</b>\n\n---\n"));
        assert!(text.contains("_Originally posted by @octo (MEMBER) on 2022-01-11 09:00:00 UTC_"));
        assert!(!text.contains("last edited"));
        assert!(!text.contains("Reactions"));
    }

    #[test]
    fn comment_footer_includes_edits_and_reactions() {
        let renderer = TemplateRenderer::new();
        let mut comment = sample_comment();
        comment.author_association = "NONE".to_string();
        comment.updated_at = Some(Utc.with_ymd_and_hms(2022, 1, 12, 9, 0, 0).unwrap());
        comment.reactions = Some(ReactionSummary {
            total_count: 2,
            heart: 2,
            ..Default::default()
        });

        let text = renderer
            .render_comment(DEFAULT_COMMENT_TEMPLATE, &comment)
            .unwrap();

        assert!(text.contains("@octo on 2022-01-11 09:00:00 UTC"));
        assert!(text.contains(", last edited 2022-01-12 09:00:00 UTC"));
        assert!(text.ends_with(". Reactions: ❤️ 2_"));
    }

    #[test]
    fn strict_mode_rejects_unknown_variables() {
        let renderer = TemplateRenderer::new();
        let result = renderer.render_comment("{{missing}}", &sample_comment());
        assert!(result.is_err());
    }
}
