//! The HTTP handlers shared by every named resource.

use axum::{
    Json, Router,
    extract::{
        OriginalUri, Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};

use crate::{
    AppState,
    database_id::DatabaseId,
    endpoints::format_endpoint,
    error::ApiError,
    extract::{ApiJson, path_param, query_params},
    pagination::{ItemList, Page, PageQuery, PageRequest},
    resource::{Resource, service},
    transaction::{TransactionDetails, TransactionDto},
    validation::ValidationMode,
};

/// The routes for the collection, members, name lookup and transaction pages of `R`.
pub fn routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route(R::COLLECTION, get(list::<R>).post(create::<R>))
        .route(
            R::MEMBER,
            get(get_one::<R>)
                .put(replace::<R>)
                .patch(patch::<R>)
                .delete(delete::<R>),
        )
        .route(R::BY_NAME, get(get_by_name::<R>))
        .route(R::TRANSACTIONS, get(transactions::<R>))
}

async fn list<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<ItemList<R::Dto>>, ApiError> {
    let records = state
        .with_connection(service::list::<R>)
        .map_err(|error| error.at(uri.path()))?;

    let dtos: Vec<R::Dto> = records.into_iter().map(R::into_linked_dto).collect();

    Ok(Json(dtos.into()))
}

async fn get_one<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
) -> Result<Json<R::Dto>, ApiError> {
    let id = path_param(path, &uri)?;

    let record = state
        .with_connection(|connection| service::get::<R>(id, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok(Json(record.into_linked_dto()))
}

async fn get_by_name<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<R::Dto>, ApiError> {
    let name = path_param(path, &uri)?;

    let record = state
        .with_connection(|connection| service::get_by_name::<R>(&name, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok(Json(record.into_linked_dto()))
}

async fn create<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(request): ApiJson<R::Request>,
) -> Result<(StatusCode, Json<R::Dto>), ApiError> {
    let draft = R::draft_from_request(request, ValidationMode::Create)
        .map_err(|error| error.at(uri.path()))?;

    let record = state
        .with_connection(move |connection| service::create::<R>(draft, connection))
        .map_err(|error| error.at(uri.path()))?;

    tracing::debug!("created {} {}", R::ENTITY, record.id());

    Ok((StatusCode::CREATED, Json(record.into_linked_dto())))
}

async fn replace<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
    ApiJson(request): ApiJson<R::Request>,
) -> Result<Json<R::Dto>, ApiError> {
    let id = path_param(path, &uri)?;
    let draft = R::draft_from_request(request, ValidationMode::Replace)
        .map_err(|error| error.at(uri.path()))?;

    let record = state
        .with_connection(move |connection| service::replace::<R>(id, draft, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok(Json(record.into_linked_dto()))
}

async fn patch<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
    ApiJson(request): ApiJson<R::Request>,
) -> Result<Json<R::Dto>, ApiError> {
    let id = path_param(path, &uri)?;
    let patch = R::patch_from_request(request).map_err(|error| error.at(uri.path()))?;

    let record = state
        .with_connection(move |connection| service::patch::<R>(id, patch, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok(Json(record.into_linked_dto()))
}

async fn delete<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_param(path, &uri)?;

    state
        .with_connection(|connection| service::delete::<R>(id, connection))
        .map_err(|error| error.at(uri.path()))?;

    tracing::debug!("deleted {} {id}", R::ENTITY);

    Ok(StatusCode::NO_CONTENT)
}

async fn transactions<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<TransactionDto>>, ApiError> {
    let id = path_param(path, &uri)?;
    let query = query_params(query, &uri)?;
    let request = PageRequest::from_query(query, &state.pagination_config)
        .map_err(|error| error.at(uri.path()))?;

    let (details, total) = state
        .with_connection(|connection| service::transactions_page::<R>(id, request, connection))
        .map_err(|error| error.at(uri.path()))?;

    let items = details
        .into_iter()
        .map(TransactionDetails::into_linked_dto)
        .collect();

    Ok(Json(Page::new(
        items,
        request,
        total,
        &format_endpoint(R::TRANSACTIONS, id),
    )))
}
