//! A JSON extractor that reports body errors in the API's error format.

use axum::{
    Json,
    extract::{
        FromRequest, Path, Query, Request,
        rejection::{PathRejection, QueryRejection},
    },
    http::Uri,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Error,
    error::ApiError,
    validation::{RequestBody, check_enum_fields},
};

/// Like [axum::Json], but rejections are rendered as [ApiError]s.
///
/// Decoding happens in two steps: the body is parsed as untyped JSON and its
/// enum-valued fields are checked against their legal values, then it is
/// decoded into `T`. Field requirements are not checked here since they depend
/// on the HTTP method, see [RequestBody::validate].
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + RequestBody,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = request.uri().path().to_owned();

        let Json(body) = Json::<Value>::from_request(request, state)
            .await
            .map_err(|rejection| Error::Validation(vec![rejection.body_text()]).at(&path))?;

        check_enum_fields(&body, T::ENUM_FIELDS).map_err(|error| error.at(&path))?;

        serde_json::from_value(body)
            .map(ApiJson)
            .map_err(|error| Error::Validation(vec![error.to_string()]).at(&path))
    }
}

/// Unwrap a path parameter, reporting a malformed value as an [ApiError].
pub fn path_param<T>(path: Result<Path<T>, PathRejection>, uri: &Uri) -> Result<T, ApiError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| Error::Validation(vec![rejection.body_text()]).at(uri.path()))
}

/// Unwrap query parameters, reporting malformed values as an [ApiError].
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>, uri: &Uri) -> Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| Error::Validation(vec![rejection.body_text()]).at(uri.path()))
}
