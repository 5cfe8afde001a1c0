use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use shortlink_core::{normalize_url, Shortcut};

use crate::error::AppError;
use crate::jobs::{spawn_add_shortcut, AddShortcutJob};
use crate::AppState;

pub const OPENSEARCH_CONTENT_TYPE: &str = "application/opensearchdescription+xml";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Fields posted by the create form. The alias may come from the path instead.
#[derive(Debug, Default, Deserialize)]
pub struct ShortcutForm {
    pub shortform: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    /// Present when the client asks for a description fetch
    pub attempt: Option<String>,
}

impl ShortcutForm {
    /// Query-string fields overlaid with body fields; the body wins.
    fn merge(query: ShortcutForm, body: Option<ShortcutForm>) -> ShortcutForm {
        let Some(body) = body else {
            return query;
        };
        ShortcutForm {
            shortform: body.shortform.or(query.shortform),
            url: body.url.or(query.url),
            description: body.description.or(query.description),
            attempt: body.attempt.or(query.attempt),
        }
    }
}

pub async fn redirect_to_index() -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/index.html")],
    )
        .into_response()
}

pub async fn empty_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_form(&state, "", &[])
}

pub async fn opensearch(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state.templates.render_opensearch(&state.service)?;
    Ok((
        [(header::CONTENT_TYPE, OPENSEARCH_CONTENT_TYPE)],
        format!("{XML_DECLARATION}\n{body}"),
    )
        .into_response())
}

/// Exact alias → 303 to its URL; otherwise the form with fuzzy candidates.
pub async fn lookup(
    State(state): State<AppState>,
    Path(short_form): Path<String>,
) -> Result<Response, AppError> {
    let found = state.index.find_shortcut(&short_form)?;

    match found.redirect_target() {
        Some(url) => see_other(url),
        None => Ok(render_form(&state, &short_form, &found.shortcuts)?.into_response()),
    }
}

// A missing or non-form body is not rejected here: validation reports which
// field is absent.
pub async fn create_root(
    State(state): State<AppState>,
    Query(query): Query<ShortcutForm>,
    body: Option<Form<ShortcutForm>>,
) -> Result<Response, AppError> {
    let form = ShortcutForm::merge(query, body.map(|Form(body)| body));
    create(state, None, form)
}

pub async fn create_at(
    State(state): State<AppState>,
    Path(short_form): Path<String>,
    Query(query): Query<ShortcutForm>,
    body: Option<Form<ShortcutForm>>,
) -> Result<Response, AppError> {
    let form = ShortcutForm::merge(query, body.map(|Form(body)| body));
    create(state, Some(short_form), form)
}

/// Validate, answer with a redirect to the new target, then store in the
/// background.
fn create(
    state: AppState,
    path_short_form: Option<String>,
    form: ShortcutForm,
) -> Result<Response, AppError> {
    let short_form = path_short_form
        .or(form.shortform)
        .filter(|s| !s.trim().is_empty())
        .ok_or(AppError::BadRequest("Shortcut was not supplied"))?;

    if state.index.contains(&short_form)? {
        return Err(AppError::BadRequest("Shortcut already exists."));
    }

    let url = form
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or(AppError::BadRequest("URL was not supplied"))?;

    let normalized = normalize_url(&url);
    let response = see_other(&normalized)?;

    let shortcut = Shortcut::new(short_form, normalized)
        .with_description(form.description.unwrap_or_default());
    spawn_add_shortcut(
        state.index.clone(),
        state.fetcher.clone(),
        AddShortcutJob {
            shortcut,
            fetch_description: form.attempt.is_some(),
        },
    );

    Ok(response)
}

fn render_form(
    state: &AppState,
    short_form: &str,
    shortcuts: &[Shortcut],
) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render_form(
        &state.service,
        short_form,
        shortcuts,
    )?))
}

/// 303 redirect. Non-ASCII targets are re-serialized percent-encoded.
fn see_other(location: &str) -> Result<Response, AppError> {
    let value = match HeaderValue::from_str(location) {
        Ok(value) => value,
        Err(_) => url::Url::parse(location)
            .ok()
            .and_then(|parsed| HeaderValue::from_str(parsed.as_str()).ok())
            .ok_or_else(|| AppError::InvalidRedirect(location.to_string()))?,
    };
    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response())
}
