use crate::error::StudentError;
use crate::service::StudentDraft;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use tracing::debug;

pub(crate) struct StudentBody(pub(crate) StudentDraft);

impl<S> FromRequest<S> for StudentBody
where
    S: Send + Sync,
{
    type Rejection = StudentError;

    /// Decode a create/update JSON body; malformed bodies are rejected as missing fields.
    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(draft) = Json::<StudentDraft>::from_request(req, &()).await?;

        debug!(
            has_name = draft.name.is_some(),
            has_email = draft.email.is_some(),
            "Extracted student body"
        );

        Ok(Self(draft))
    }
}
