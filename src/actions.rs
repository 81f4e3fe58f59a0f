use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::db::store::TodoStore;

/// Flat field map submitted by the mutation forms. Every field is optional;
/// which ones are required depends on the intent.
#[derive(Debug, Default, Deserialize)]
pub struct MutationForm {
    pub intent: Option<String>,
    pub title: Option<String>,
    pub id: Option<String>,
    pub completed: Option<String>,
}

// Browsers can submit either form encoding; both decode into the same
// field map.
#[async_trait]
impl<S> FromRequest<S> for MutationForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            let mut form = MutationForm::default();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(IntoResponse::into_response)?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let value = field.text().await.map_err(IntoResponse::into_response)?;
                match name.as_str() {
                    "intent" => form.intent = Some(value),
                    "title" => form.title = Some(value),
                    "id" => form.id = Some(value),
                    "completed" => form.completed = Some(value),
                    _ => {}
                }
            }
            Ok(form)
        } else {
            let Form(form) = Form::<MutationForm>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(form)
        }
    }
}

#[derive(Debug)]
pub enum ActionError {
    /// Bad form input. Rendered as an inline banner; no mutation applied.
    Validation(String),
    /// Persistence failure. Propagates to the handler error boundary.
    Storage(sqlx::Error),
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::Validation(message) => write!(f, "{message}"),
            ActionError::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Validation(_) => None,
            ActionError::Storage(err) => Some(err),
        }
    }
}

impl From<sqlx::Error> for ActionError {
    fn from(err: sqlx::Error) -> Self {
        ActionError::Storage(err)
    }
}

/// Routes one submitted form to the matching store operation. The caller
/// re-reads the full list for display afterwards, so success carries no data.
pub async fn apply(store: &TodoStore, form: &MutationForm) -> Result<(), ActionError> {
    match form.intent.as_deref() {
        Some("create") => {
            let title = form.title.as_deref().unwrap_or("").trim();
            if title.is_empty() {
                return Err(ActionError::Validation("Title is required".to_string()));
            }
            store.insert(title).await?;
            Ok(())
        }
        Some("toggle") => {
            let Some(id) = form.id.as_deref() else {
                return Err(ActionError::Validation("Invalid todo ID".to_string()));
            };
            // The form round-trips the completed flag the client last saw and
            // we invert that, not the stored value. A stale submission can
            // therefore desynchronize the flag; kept to match form semantics.
            let completed = form.completed.as_deref() == Some("true");
            store.set_completed(id, !completed).await?;
            Ok(())
        }
        Some("delete") => {
            let Some(id) = form.id.as_deref() else {
                return Err(ActionError::Validation("Invalid todo ID".to_string()));
            };
            store.delete_by_id(id).await?;
            Ok(())
        }
        // unrecognized or absent intents fall through without touching storage
        _ => Ok(()),
    }
}
