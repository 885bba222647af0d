//! CRUD handlers shared by every [`Resource`]. Each one takes the entity's
//! repository as its only collaborator; the validator comes from `T::schema()`.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::database::{ListQuery, Page, PageRequest, Pagination, Repository};
use crate::error::ApiError;
use crate::handlers::utils::{object_body, typed};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{to_document, Record, Resource};
use crate::validation::FieldError;

fn not_found<T: Resource>() -> ApiError {
    ApiError::not_found(format!("{} not found", T::LABEL))
}

/// Parse the `:id` segment; the canonical decimal form is the document key.
fn parse_id<T: Resource>(raw: &str) -> Result<(i64, String), ApiError> {
    raw.trim()
        .parse::<i64>()
        .map(|id| (id, id.to_string()))
        .map_err(|_| ApiError::bad_request(format!("{} must be an integer", T::ID_FIELD)))
}

/// POST /api/<resource>
pub async fn create<T: Resource>(
    State(repo): State<Repository<T>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Record<T>> {
    let body = object_body(payload)?;
    let fields = T::schema().validate(&body).map_err(ApiError::validation)?;
    let entity: T = typed(fields)?;

    if let Some(message) = repo.find_conflict(&entity, None).await? {
        return Err(ApiError::conflict(message));
    }

    let record = repo.create(&entity).await?;
    tracing::debug!("Created {} {}", T::LABEL, entity.id());
    Ok(ApiResponse::created(record))
}

/// GET /api/<resource>?page&limit
pub async fn list<T: Resource>(
    State(repo): State<Repository<T>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Page<Record<T>>> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let request = PageRequest::from_query(&query).map_err(ApiError::validation)?;

    let (data, total) = repo.find_page(&request).await?;
    Ok(ApiResponse::success(Page {
        data,
        pagination: Pagination::new(total, &request),
    }))
}

/// GET /api/<resource>/:id
pub async fn get<T: Resource>(State(repo): State<Repository<T>>, Path(id): Path<String>) -> ApiResult<Record<T>> {
    let (_, key) = parse_id::<T>(&id)?;
    repo.find_by_key(&key)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(not_found::<T>)
}

/// PUT /api/<resource>/:id - supplied fields replace stored ones, the rest are kept.
pub async fn update<T: Resource>(
    State(repo): State<Repository<T>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Record<T>> {
    let (id, key) = parse_id::<T>(&id)?;
    let body = object_body(payload)?;
    let existing = repo.find_by_key(&key).await?.ok_or_else(not_found::<T>)?;

    let changes = T::schema().validate_partial(&body).map_err(ApiError::validation)?;
    if changes.get(T::ID_FIELD).is_some_and(|v| v != &Value::from(id)) {
        return Err(ApiError::validation(vec![FieldError::new(
            T::ID_FIELD,
            format!("{} cannot be changed", T::ID_FIELD),
        )]));
    }

    let mut merged = to_document(&existing.entity).map_err(|e| {
        tracing::error!("Failed to serialize stored {}: {}", T::LABEL, e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;
    for (field, value) in changes {
        if value.is_null() {
            merged.remove(&field);
        } else {
            merged.insert(field, value);
        }
    }
    let entity: T = typed(merged)?;

    if let Some(message) = repo.find_conflict(&entity, Some(&key)).await? {
        return Err(ApiError::conflict(message));
    }

    // The document can vanish between the read and the write.
    repo.update(&key, &entity)
        .await?
        .map(ApiResponse::success)
        .ok_or_else(not_found::<T>)
}

/// DELETE /api/<resource>/:id
pub async fn delete<T: Resource>(State(repo): State<Repository<T>>, Path(id): Path<String>) -> ApiResult<()> {
    let (_, key) = parse_id::<T>(&id)?;
    if repo.delete(&key).await? {
        tracing::debug!("Deleted {} {}", T::LABEL, key);
        Ok(ApiResponse::no_content())
    } else {
        Err(not_found::<T>())
    }
}
