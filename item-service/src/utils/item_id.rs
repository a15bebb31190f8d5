use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// `:id` path segment parsed as an ObjectId.
///
/// Runs before any body extractor, so a malformed identifier is rejected with
/// 400 before the body is read or storage is touched.
#[derive(Debug, Clone, Copy)]
pub struct ItemId(pub ObjectId);

pub fn parse_item_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("invalid item id '{}': {}", raw, e)))
}

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

        let id = parse_item_id(&raw)?;
        tracing::Span::current().record("item_id", tracing::field::display(&id));

        Ok(ItemId(id))
    }
}
