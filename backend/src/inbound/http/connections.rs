//! Connection and discovery endpoints.
//!
//! ```text
//! GET /user/requests/received
//! GET /user/connections
//! GET /explore
//! GET /feed?page=1&limit=10
//! ```
//!
//! Every handler resolves the caller from the session and delegates to the
//! [`ConnectionsQuery`](crate::domain::ports::ConnectionsQuery) port.

use actix_web::{get, web};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::{ExploreEntry, ReceivedRequest, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorSchema, ExploreResponseSchema, ProfilesResponseSchema, ReceivedRequestsResponseSchema,
};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Message accompanying the received-requests list.
pub const RECEIVED_REQUESTS_MESSAGE: &str = "Data fetched successfully";

/// Body of `GET /user/requests/received`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReceivedRequestsResponse {
    /// Fixed success message.
    pub message: String,
    /// Pending requests with requester profiles.
    pub data: Vec<ReceivedRequest>,
}

/// `{ "data": [...] }` envelope used by the remaining endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Response items.
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for DataResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Query string accepted by `GET /feed`.
///
/// Values are kept as raw strings: anything that does not start with a
/// positive integer falls back to the default.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// One-based page number (default 1).
    #[param(example = "1")]
    pub page: Option<String>,
    /// Page size (default 10, at most 50).
    #[param(example = "10")]
    pub limit: Option<String>,
}

impl FeedQuery {
    /// Parsed and clamped page request.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Pending connection requests addressed to the caller.
#[utoipa::path(
    get,
    path = "/user/requests/received",
    responses(
        (status = 200, description = "Pending requests", body = ReceivedRequestsResponseSchema),
        (status = 400, description = "Store query failed", body = ErrorSchema),
        (status = 401, description = "No valid session", body = ErrorSchema)
    ),
    tags = ["connections"],
    operation_id = "listReceivedRequests"
)]
#[get("/user/requests/received")]
pub async fn received_requests(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<ReceivedRequestsResponse>> {
    let data = state.connections.received_requests(caller.id()).await?;
    Ok(web::Json(ReceivedRequestsResponse {
        message: RECEIVED_REQUESTS_MESSAGE.to_owned(),
        data,
    }))
}

/// Profiles of the caller's accepted connections.
#[utoipa::path(
    get,
    path = "/user/connections",
    responses(
        (status = 200, description = "Connected profiles", body = ProfilesResponseSchema),
        (status = 400, description = "Store query failed", body = ErrorSchema),
        (status = 401, description = "No valid session", body = ErrorSchema)
    ),
    tags = ["connections"],
    operation_id = "listConnections"
)]
#[get("/user/connections")]
pub async fn connections(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<DataResponse<UserProfile>>> {
    let data = state.connections.connections(caller.id()).await?;
    Ok(web::Json(data.into()))
}

/// Users the caller has no request with, badged by connection state.
#[utoipa::path(
    get,
    path = "/explore",
    responses(
        (status = 200, description = "Explore list", body = ExploreResponseSchema),
        (status = 400, description = "Store query failed", body = ErrorSchema),
        (status = 401, description = "No valid session", body = ErrorSchema)
    ),
    tags = ["discovery"],
    operation_id = "explore"
)]
#[get("/explore")]
pub async fn explore(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<DataResponse<ExploreEntry>>> {
    let data = state.connections.explore(caller.id()).await?;
    Ok(web::Json(data.into()))
}

/// Users the caller has no request with and who are connected to nobody.
#[utoipa::path(
    get,
    path = "/feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Feed", body = ProfilesResponseSchema),
        (status = 400, description = "Store query failed", body = ErrorSchema),
        (status = 401, description = "No valid session", body = ErrorSchema)
    ),
    tags = ["discovery"],
    operation_id = "feed"
)]
#[get("/feed")]
pub async fn feed(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    query: web::Query<FeedQuery>,
) -> ApiResult<web::Json<DataResponse<UserProfile>>> {
    let data = state
        .connections
        .feed(caller.id(), query.page_request())
        .await?;
    Ok(web::Json(data.into()))
}

/// Register the connection endpoints on an app or scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use connection_feed::inbound::http::connections;
///
/// let _app = App::new().configure(connections::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(received_requests)
        .service(connections)
        .service(explore)
        .service(feed);
}
