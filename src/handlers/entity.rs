//! CRUD handler bodies shared by the author and book routes: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::DbSession;
use crate::model::Entity;
use crate::service::CrudService;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Path id of a single-entity route.
pub type IdPath = Result<Path<i64>, PathRejection>;

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list<E: Entity>(mut session: DbSession) -> Result<Json<Vec<E>>, AppError> {
    let rows = CrudService::list_all::<E>(&mut session).await?;
    Ok(Json(rows))
}

pub async fn read<E: Entity>(mut session: DbSession, id: IdPath) -> Result<Json<E>, AppError> {
    let Path(id) = id?;
    let row = CrudService::get_by_id::<E>(&mut session, id)
        .await?
        .ok_or(AppError::NotFound(E::NOT_FOUND))?;
    Ok(Json(row))
}

pub async fn create<E>(
    mut session: DbSession,
    payload: Result<Json<E::New>, JsonRejection>,
) -> Result<Json<E>, AppError>
where
    E: Entity,
    E::New: DeserializeOwned,
{
    let Json(new) = payload?;
    let row = CrudService::create::<E>(&mut session, &new).await?;
    Ok(Json(row))
}

pub async fn update<E: Entity>(
    mut session: DbSession,
    id: IdPath,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<E>, AppError> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let patch = body_to_map(body)?;
    let row = CrudService::update::<E>(&mut session, id, &patch)
        .await?
        .ok_or(AppError::NotFound(E::NOT_FOUND))?;
    Ok(Json(row))
}

pub async fn delete<E: Entity>(mut session: DbSession, id: IdPath) -> Result<Json<E>, AppError> {
    let Path(id) = id?;
    let row = CrudService::delete::<E>(&mut session, id)
        .await?
        .ok_or(AppError::NotFound(E::NOT_FOUND))?;
    Ok(Json(row))
}

