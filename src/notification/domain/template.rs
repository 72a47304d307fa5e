//! Email template rendering.

use minijinja::Environment;
use serde_json::Value;

use super::NotificationDomainError;

/// Rendered output of an [`EmailTemplate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Rendered subject line.
    pub subject: String,
    /// Rendered plain-text body.
    pub body: String,
}

/// Subject and body templates rendered against a JSON context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    subject: String,
    body: String,
}

impl EmailTemplate {
    /// Creates a template from subject and body sources.
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Renders subject and body against the given context.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDomainError::TemplateRender`] when either
    /// template fails to render.
    pub fn render(&self, context: &Value) -> Result<RenderedEmail, NotificationDomainError> {
        let environment = Environment::new();
        let subject = environment.render_str(&self.subject, context).map_err(|error| {
            NotificationDomainError::TemplateRender {
                reason: error.to_string(),
            }
        })?;
        let body = environment.render_str(&self.body, context).map_err(|error| {
            NotificationDomainError::TemplateRender {
                reason: error.to_string(),
            }
        })?;
        Ok(RenderedEmail { subject, body })
    }
}
