//! The HTTP handlers for `/api/transactions`.

use axum::{
    Json, Router,
    extract::{OriginalUri, Path, State, rejection::PathRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    AppState,
    database_id::DatabaseId,
    endpoints,
    error::ApiError,
    extract::{ApiJson, path_param},
    pagination::ItemList,
    transaction::{TransactionDetails, TransactionDto, TransactionRequest, service},
    validation::ValidationMode,
};

/// The routes for the transaction collection and its members.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions).post(create_transaction),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction)
                .put(replace_transaction)
                .patch(patch_transaction)
                .delete(delete_transaction),
        )
}

async fn list_transactions(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<ItemList<TransactionDto>>, ApiError> {
    let transactions = state
        .with_connection(service::list)
        .map_err(|error| error.at(uri.path()))?;

    let dtos: Vec<TransactionDto> = transactions
        .into_iter()
        .map(TransactionDetails::into_linked_dto)
        .collect();

    Ok(Json(dtos.into()))
}

async fn get_transaction(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
) -> Result<Json<TransactionDto>, ApiError> {
    let id = path_param(path, &uri)?;

    let transaction = state
        .with_connection(|connection| service::get(id, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok(Json(transaction.into_linked_dto()))
}

async fn create_transaction(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    ApiJson(request): ApiJson<TransactionRequest>,
) -> Result<(StatusCode, Json<TransactionDto>), ApiError> {
    let draft = request
        .into_draft(ValidationMode::Create)
        .map_err(|error| error.at(uri.path()))?;

    let transaction = state
        .with_connection(move |connection| service::create(draft, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok((StatusCode::CREATED, Json(transaction.into_linked_dto())))
}

async fn replace_transaction(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
    ApiJson(request): ApiJson<TransactionRequest>,
) -> Result<Json<TransactionDto>, ApiError> {
    let id = path_param(path, &uri)?;
    let draft = request
        .into_draft(ValidationMode::Replace)
        .map_err(|error| error.at(uri.path()))?;

    let transaction = state
        .with_connection(move |connection| service::replace(id, draft, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok(Json(transaction.into_linked_dto()))
}

async fn patch_transaction(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
    ApiJson(request): ApiJson<TransactionRequest>,
) -> Result<Json<TransactionDto>, ApiError> {
    let id = path_param(path, &uri)?;
    let patch = request.into_patch().map_err(|error| error.at(uri.path()))?;

    let transaction = state
        .with_connection(move |connection| service::patch(id, patch, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok(Json(transaction.into_linked_dto()))
}

async fn delete_transaction(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    path: Result<Path<DatabaseId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_param(path, &uri)?;

    state
        .with_connection(|connection| service::delete(id, connection))
        .map_err(|error| error.at(uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}
