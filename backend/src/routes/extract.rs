//! Request extractors with API-shaped rejections

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};

/// `axum::Json` whose rejection renders as an [`ApiError`] body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `Multipart` whose rejection renders as an [`ApiError`] body
pub struct AppMultipart(pub Multipart);

#[async_trait]
impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Ok(Self(multipart))
    }
}
