use std::fmt;

use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::HttpError;

/// What a failed render was producing; selects the message shown to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// A full dashboard page.
    Page,
    /// A datastar patch: panel, rows or the "load more" control.
    Fragment,
}

impl RenderTarget {
    fn public_message(self) -> &'static str {
        match self {
            RenderTarget::Page => "The dashboard page could not be rendered",
            RenderTarget::Fragment => "The table could not be refreshed",
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderTarget::Page => "page",
            RenderTarget::Fragment => "fragment",
        })
    }
}

#[derive(Debug, Error)]
#[error("{target} template `{source}` failed to render")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) target: RenderTarget,
    #[source]
    pub(crate) error: AskamaError,
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        HttpError::from_error(
            err.source,
            StatusCode::INTERNAL_SERVER_ERROR,
            err.target.public_message(),
            &err,
        )
    }
}

fn render<T: Template>(
    template: &T,
    source: &'static str,
    target: RenderTarget,
) -> Result<String, TemplateRenderError> {
    template.render().map_err(|error| TemplateRenderError {
        source,
        target,
        error,
    })
}

/// Render a datastar patch body; failures carry `source` into the error report.
pub fn render_fragment<T: Template>(template: &T, source: &'static str) -> Result<String, HttpError> {
    Ok(render(template, source, RenderTarget::Fragment)?)
}

/// Render a full page, turning a template failure into the error response.
pub fn render_page<T: Template>(template: T, source: &'static str, status: StatusCode) -> Response {
    match render(&template, source, RenderTarget::Page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => HttpError::from(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_errors_name_target_and_source() {
        let error = TemplateRenderError {
            source: "lists::render_more",
            target: RenderTarget::Fragment,
            error: AskamaError::Fmt,
        };
        assert_eq!(
            error.to_string(),
            "fragment template `lists::render_more` failed to render"
        );
        assert_eq!(
            RenderTarget::Fragment.public_message(),
            "The table could not be refreshed"
        );
    }
}
