use axum::{
    async_trait,
    body::{Bytes, HttpBody},
    extract::{rejection::BytesRejection, FromRequest, FromRequestParts, Path as AxumPath},
    http::header::{self, HeaderMap},
    http::{request::Parts, Request, StatusCode},
    response::{IntoResponse, Response},
    BoxError,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{form::FormData, Error};

/// Path parameters. Anything that fails to parse is reported as an unknown
/// resource.
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(t) = AxumPath::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error {
                detail: Some(e.into()),
                ..Error::not_found()
            })?;
        Ok(Self(t))
    }
}

/// An `application/x-www-form-urlencoded` body, keeping repeated keys.
pub struct Form(pub FormData);

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Invalid mime type, expected application/x-www-form-urlencoded")]
    Mime,
    #[error("Could not read body bytes: {}", .0)]
    BodyRead(#[from] BytesRejection),
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let status = match self {
            FormError::Mime => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            FormError::BodyRead(_) => StatusCode::BAD_REQUEST,
        };
        Error {
            status,
            title: "Could not read form body".to_string(),
            detail: Some(self.into()),
        }
        .into_response()
    }
}

#[async_trait]
impl<S, B> FromRequest<S, B> for Form
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = FormError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        if !form_content_type(req.headers()) {
            return Err(FormError::Mime);
        }
        let bytes = Bytes::from_request(req, state).await?;
        Ok(Form(FormData::parse(&bytes)))
    }
}

fn form_content_type(headers: &HeaderMap) -> bool {
    let content_type = if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        content_type
    } else {
        return false;
    };

    let content_type = if let Ok(content_type) = content_type.to_str() {
        content_type
    } else {
        return false;
    };

    let mime = if let Ok(mime) = content_type.parse::<mime::Mime>() {
        mime
    } else {
        return false;
    };

    mime.type_() == mime::APPLICATION && mime.subtype() == mime::WWW_FORM_URLENCODED
}
