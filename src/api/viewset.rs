//! # ViewSet
//!
//! Generic CRUD handlers shared by every resource. A resource implements [`ViewSet`] to
//! name its record type, its typed client and its transfer functions, and
//! [`viewset_routes`] binds the six operations to a collection path and an item path.
//!
//! Every handler resolves the caller first, so bad credentials fail before anything else,
//! then consults the policy table. Item operations look the record up before reading the
//! body, so an unknown id is a 404 regardless of the payload.

use crate::api::auth::Caller;
use crate::api::error::{ApiError, ApiResult};
use crate::api::meta::RequestMeta;
use crate::api::policy::{authorize, Operation, Resource};
use crate::api::server::AppState;
use crate::error::{FieldErrors, PortfolioError, NON_FIELD_ERRORS};
use crate::transfer::fields::INVALID_INTEGER;
use crate::transfer::{MediaLinks, Mode};
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use resource_store::{ActorClient, Record};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

type Create<V> = <<V as ViewSet>::Record as Record>::Create;
type Update<V> = <<V as ViewSet>::Record as Record>::Update;
type Filter<V> = <<V as ViewSet>::Record as Record>::Filter;

/// Query parameters accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Owner id: the account for profiles, the owning profile for owned collections.
    pub user: Option<String>,
}

pub trait ViewSet: Sized + Send + Sync + 'static {
    const RESOURCE: Resource;

    type Record: Record;
    type Client: ActorClient<Self::Record, Error = PortfolioError> + 'static;

    fn client(state: &AppState) -> &Self::Client;

    /// Filter for `?user=`. Resources without an owner ignore it.
    fn owner_filter(_owner: u32) -> Option<Filter<Self>> {
        None
    }

    fn read_create(body: &Value, meta: &RequestMeta) -> Result<Create<Self>, FieldErrors>;

    fn read_update(body: &Value, mode: Mode) -> Result<Update<Self>, FieldErrors>;

    fn represent(record: &Self::Record, links: &MediaLinks) -> serde_json::Result<Value>;
}

pub fn viewset_routes<V: ViewSet>() -> Router<Arc<AppState>> {
    let collection = format!("/{}/", V::RESOURCE.path());
    let item = format!("/{}/:id/", V::RESOURCE.path());
    Router::new()
        .route(&collection, get(list::<V>).post(create::<V>))
        .route(
            &item,
            get(retrieve::<V>)
                .put(update::<V>)
                .patch(partial_update::<V>)
                .delete(destroy::<V>),
        )
}

/// Path ids that are not positive integers cannot name a record. `u32::from_str` takes a
/// leading `+`, so the first byte is checked as well.
fn parse_id<V: ViewSet>(raw: &str) -> ApiResult<<V::Record as Record>::Id> {
    if !raw.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
        return Err(ApiError::not_found());
    }
    match raw.parse::<u32>() {
        Ok(id) if id > 0 => Ok(id.into()),
        _ => Err(ApiError::not_found()),
    }
}

fn parse_body(body: &Bytes) -> ApiResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::parse_error(format!("JSON parse error - {e}")))
}

fn owner_filter<V: ViewSet>(query: &ListQuery) -> ApiResult<Option<Filter<V>>> {
    let Some(raw) = query.user.as_deref() else {
        return Ok(None);
    };
    let owner = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| ApiError::validation(FieldErrors::single("user", INVALID_INTEGER)))?;
    Ok(V::owner_filter(owner))
}

fn render<V: ViewSet>(record: &V::Record, links: &MediaLinks) -> ApiResult<Value> {
    V::represent(record, links).map_err(|e| ApiError::internal(format!("serialization failed: {e}")))
}

async fn fetch<V: ViewSet>(state: &AppState, id: <V::Record as Record>::Id) -> ApiResult<V::Record> {
    V::client(state)
        .get(id)
        .await?
        .ok_or_else(ApiError::not_found)
}

async fn list<V: ViewSet>(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    meta: RequestMeta,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Value>>> {
    authorize(V::RESOURCE, Operation::List, &caller)?;
    let Query(query) = query.map_err(|rejection| {
        ApiError::validation(FieldErrors::single(NON_FIELD_ERRORS, rejection.body_text()))
    })?;
    let filter = owner_filter::<V>(&query)?;
    let records = V::client(&state).list(filter).await?;

    let links = meta.media_links(&state.config.media_url);
    let body = records
        .iter()
        .map(|record| render::<V>(record, &links))
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(Json(body))
}

async fn create<V: ViewSet>(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    meta: RequestMeta,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    authorize(V::RESOURCE, Operation::Create, &caller)?;
    let params = V::read_create(&parse_body(&body)?, &meta)?;
    let record = V::client(&state).create(params).await?;
    tracing::debug!(resource = %V::RESOURCE, "Created");

    let links = meta.media_links(&state.config.media_url);
    Ok((StatusCode::CREATED, Json(render::<V>(&record, &links)?)))
}

async fn retrieve<V: ViewSet>(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    meta: RequestMeta,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    authorize(V::RESOURCE, Operation::Retrieve, &caller)?;
    let record = fetch::<V>(&state, parse_id::<V>(&id)?).await?;

    let links = meta.media_links(&state.config.media_url);
    Ok(Json(render::<V>(&record, &links)?))
}

async fn update<V: ViewSet>(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    meta: RequestMeta,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    authorize(V::RESOURCE, Operation::Update, &caller)?;
    apply_update::<V>(&state, &meta, &id, &body, Mode::Replace).await
}

async fn partial_update<V: ViewSet>(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    meta: RequestMeta,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    authorize(V::RESOURCE, Operation::PartialUpdate, &caller)?;
    apply_update::<V>(&state, &meta, &id, &body, Mode::Partial).await
}

async fn apply_update<V: ViewSet>(
    state: &AppState,
    meta: &RequestMeta,
    id: &str,
    body: &Bytes,
    mode: Mode,
) -> ApiResult<Json<Value>> {
    let id = parse_id::<V>(id)?;
    fetch::<V>(state, id.clone()).await?;

    let changes = V::read_update(&parse_body(body)?, mode)?;
    let record = V::client(state).update(id.clone(), changes).await?;
    tracing::debug!(resource = %V::RESOURCE, %id, ?mode, "Updated");

    let links = meta.media_links(&state.config.media_url);
    Ok(Json(render::<V>(&record, &links)?))
}

async fn destroy<V: ViewSet>(
    caller: Caller,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    authorize(V::RESOURCE, Operation::Destroy, &caller)?;
    let id = parse_id::<V>(&id)?;
    V::client(&state).delete(id.clone()).await?;
    tracing::debug!(resource = %V::RESOURCE, %id, "Deleted");
    Ok(StatusCode::NO_CONTENT)
}
