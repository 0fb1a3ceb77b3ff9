use crate::domain::requests::validation_messages;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use shared::errors::HttpError;
use validator::Validate;

/// JSON body that has been parsed and validated.
///
/// Every rejection is a 400: a missing content type, malformed JSON, a body
/// of the wrong shape and a failed field rule are all treated alike.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        value.validate().map_err(|errors| {
            HttpError::BadRequest(validation_messages(&errors).join("; "))
        })?;

        Ok(Self(value))
    }
}
