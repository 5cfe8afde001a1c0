//! Page rendering (minijinja)
//!
//! Templates are compiled into the binary and can be replaced at startup from
//! a directory holding files with the same names. Auto-escaping follows the
//! template extension (`.html` and `.xml` are HTML-escaped).

use std::path::Path;

use minijinja::Environment;
use serde::Serialize;
use shortlink_core::Shortcut;
use thiserror::Error;

pub const FORM_TEMPLATE: &str = "form.html";
pub const OPENSEARCH_TEMPLATE: &str = "opensearch.xml";

const EMBEDDED: [(&str, &str); 2] = [
    (FORM_TEMPLATE, include_str!("../templates/form.html")),
    (OPENSEARCH_TEMPLATE, include_str!("../templates/opensearch.xml")),
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Identity of this deployment, shown in pages and the OpenSearch descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub service_name: String,
    pub service_host: String,
    pub port: u16,
}

#[derive(Debug, Serialize)]
struct FormContext<'a> {
    short_form: &'a str,
    shortcuts: &'a [Shortcut],
    #[serde(flatten)]
    service: &'a ServiceInfo,
}

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load templates from `dir`, or the embedded copies when `dir` is `None`.
    pub fn load(dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        for (name, embedded) in EMBEDDED {
            let source = match dir {
                Some(dir) => {
                    let path = dir.join(name);
                    std::fs::read_to_string(&path).map_err(|source| TemplateError::Read {
                        path: path.display().to_string(),
                        source,
                    })?
                }
                None => embedded.to_string(),
            };
            env.add_template_owned(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn embedded() -> Result<Self, TemplateError> {
        Self::load(None)
    }

    /// Render the lookup/create form, listing `shortcuts` as candidates.
    pub fn render_form(
        &self,
        service: &ServiceInfo,
        short_form: &str,
        shortcuts: &[Shortcut],
    ) -> Result<String, TemplateError> {
        let context = FormContext {
            short_form,
            shortcuts,
            service,
        };
        Ok(self.env.get_template(FORM_TEMPLATE)?.render(context)?)
    }

    /// Render the OpenSearch description body (without XML declaration).
    pub fn render_opensearch(&self, service: &ServiceInfo) -> Result<String, TemplateError> {
        Ok(self.env.get_template(OPENSEARCH_TEMPLATE)?.render(service)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ServiceInfo {
        ServiceInfo {
            service_name: "go".to_string(),
            service_host: "go.example.com".to_string(),
            port: 8080,
        }
    }

    #[test]
    fn test_form_lists_candidates() {
        let templates = Templates::embedded().unwrap();
        let shortcuts = vec![
            Shortcut::new("red", "http://reddit.com").with_description("front page"),
            Shortcut::new("blue", "http://bluemoon.org"),
        ];

        let html = templates.render_form(&service(), "front", &shortcuts).unwrap();
        // minijinja also escapes '/' inside attribute values
        assert!(html.contains(">red</a>"));
        assert!(html.contains(">blue</a>"));
        assert!(html.contains("reddit.com"));
        assert!(html.contains("front page"));
        assert!(html.contains(r#"value="front""#));
    }

    #[test]
    fn test_form_escapes_user_text() {
        let templates = Templates::embedded().unwrap();
        let shortcuts =
            vec![Shortcut::new("x", "http://x.example").with_description("<script>alert(1)</script>")];

        let html = templates
            .render_form(&service(), "<b>", &shortcuts)
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains(r#"value="<b>""#));
    }

    #[test]
    fn test_empty_form_has_no_candidates() {
        let templates = Templates::embedded().unwrap();
        let html = templates.render_form(&service(), "", &[]).unwrap();
        assert!(!html.contains("Matching shortcuts"));
        assert!(html.contains(r#"<form method="post" action="/">"#));
    }

    #[test]
    fn test_opensearch_template_url() {
        let templates = Templates::embedded().unwrap();
        let xml = templates.render_opensearch(&service()).unwrap();
        assert!(xml.contains("<ShortName>go</ShortName>"));
        assert!(xml.contains(r#"template="http://go.example.com:8080/{searchTerms}""#));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FORM_TEMPLATE), "custom {{ service_name }}").unwrap();
        std::fs::write(dir.path().join(OPENSEARCH_TEMPLATE), "<x/>").unwrap();

        let templates = Templates::load(Some(dir.path())).unwrap();
        assert_eq!(
            templates.render_form(&service(), "", &[]).unwrap(),
            "custom go"
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Templates::load(Some(dir.path())).err().unwrap();
        assert!(matches!(err, TemplateError::Read { .. }));
    }
}
