//! Text posted on migrated issues.

use crate::source::{Comment, Issue, RepoRef};
use crate::templates::{
    validate_template, TemplateError, TemplateRenderer, DEFAULT_COMMENT_TEMPLATE,
    DEFAULT_PROVENANCE_TEMPLATE,
};

/// Owning team and templates used when copying an issue.
pub struct MigrationNotes {
    team: String,
    provenance_template: String,
    comment_template: String,
    renderer: TemplateRenderer,
}

impl MigrationNotes {
    /// Uses the default templates, naming `team` as the new owner.
    pub fn new(team: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            provenance_template: DEFAULT_PROVENANCE_TEMPLATE.to_string(),
            comment_template: DEFAULT_COMMENT_TEMPLATE.to_string(),
            renderer: TemplateRenderer::new(),
        }
    }

    /// Replaces the provenance template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not compile.
    pub fn with_provenance_template(
        mut self,
        template: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let template = template.into();
        validate_template(&template)?;
        self.provenance_template = template;
        Ok(self)
    }

    /// Replaces the copied-comment template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not compile.
    pub fn with_comment_template(
        mut self,
        template: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let template = template.into();
        validate_template(&template)?;
        self.comment_template = template;
        Ok(self)
    }

    /// The team named as new owner.
    #[must_use]
    pub fn team(&self) -> &str {
        &self.team
    }

    pub(crate) fn provenance(
        &self,
        issue: &Issue,
        from: &RepoRef,
    ) -> Result<String, TemplateError> {
        self.renderer
            .render_provenance(&self.provenance_template, issue, from, &self.team)
    }

    pub(crate) fn copied_comment(&self, comment: &Comment) -> Result<String, TemplateError> {
        self.renderer.render_comment(&self.comment_template, comment)
    }
}

impl std::fmt::Debug for MigrationNotes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationNotes")
            .field("team", &self.team)
            .finish_non_exhaustive()
    }
}
