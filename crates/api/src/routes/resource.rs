//! REST handlers shared by every resource.
//!
//! Each handler is generic over the [`Entity`] it serves; [`routes`]
//! registers them under `/api/{path}`. Handlers validate the request, call
//! exactly one service method and shape the response (status, alert and
//! pagination headers, JSON body).

use axum::{
    Json, Router,
    extract::{FromRef, Path, RawQuery, State, rejection::JsonRejection, rejection::PathRejection},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header::LOCATION},
    response::IntoResponse,
    routing::get,
};
use tracing::debug;
use url::form_urlencoded;

use online_shop_core::page::{PageError, PageRequest};

use crate::error::{AppError, MALFORMED_REQUEST_KEY, Result};
use crate::headers::{AlertHeaders, pagination_headers};
use crate::models::Entity;
use crate::services::{EntityService, QueryService};
use crate::state::AppState;

/// Routes for one resource.
pub fn routes<E>() -> Router<AppState>
where
    E: Entity,
    EntityService<E>: FromRef<AppState>,
    QueryService<E>: FromRef<AppState>,
{
    let collection = format!("/api/{}", E::PATH);
    Router::new()
        .route(
            &collection,
            get(list::<E>).post(create::<E>).put(update::<E>),
        )
        .route(&format!("{collection}/count"), get(count::<E>))
        .route(
            &format!("{collection}/{{id}}"),
            get(get_one::<E>).delete(delete::<E>),
        )
}

/// Decoded query parameters.
fn query_params(query: Option<&str>) -> Vec<(String, String)> {
    query
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn parse_criteria<E: Entity>(params: &[(String, String)]) -> Result<E::Criteria> {
    E::parse_criteria(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .map_err(|e| AppError::bad_request(E::NAME, "badcriteria", e.to_string()))
}

fn parse_page<E: Entity>(params: &[(String, String)]) -> Result<PageRequest> {
    let request = PageRequest::from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .map_err(|e| AppError::bad_request(E::NAME, "badpage", e.to_string()))?;

    if let Some(sort) = request
        .sort()
        .iter()
        .find(|s| E::sort_column(&s.property).is_none())
    {
        let err = PageError::UnknownProperty(sort.property.clone());
        return Err(AppError::bad_request(E::NAME, "badpage", err.to_string()));
    }
    Ok(request)
}

fn body<E: Entity>(payload: std::result::Result<Json<E::Dto>, JsonRejection>) -> Result<E::Dto> {
    let Json(dto) = payload
        .map_err(|e| AppError::bad_request(E::NAME, MALFORMED_REQUEST_KEY, e.body_text()))?;
    AppError::check(E::NAME, &dto)?;
    Ok(dto)
}

fn path_id<E: Entity>(id: std::result::Result<Path<E::Id>, PathRejection>) -> Result<E::Id> {
    id.map(|Path(id)| id)
        .map_err(|e| AppError::bad_request(E::NAME, MALFORMED_REQUEST_KEY, e.body_text()))
}

/// Create an entity.
async fn create<E: Entity>(
    State(service): State<EntityService<E>>,
    State(alerts): State<AlertHeaders>,
    payload: std::result::Result<Json<E::Dto>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let dto = body::<E>(payload)?;
    debug!(?dto, "REST request to save {}", E::TYPE_NAME);

    if E::dto_id(&dto).is_some() {
        return Err(AppError::bad_request(
            E::NAME,
            "idexists",
            format!("A new {} cannot already have an ID", E::NAME),
        ));
    }

    let saved = service.save(&dto).await?;
    let id = E::dto_id(&saved)
        .ok_or_else(|| AppError::Internal(format!("saved {} has no id", E::TYPE_NAME)))?
        .to_string();

    let mut headers: HeaderMap = alerts.entity_created(E::NAME, &id);
    let location = HeaderValue::from_str(&format!("/api/{}/{id}", E::PATH))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    headers.insert(LOCATION, location);

    Ok((StatusCode::CREATED, headers, Json(saved)))
}

/// Update an entity.
async fn update<E: Entity>(
    State(service): State<EntityService<E>>,
    State(alerts): State<AlertHeaders>,
    payload: std::result::Result<Json<E::Dto>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let dto = body::<E>(payload)?;
    debug!(?dto, "REST request to update {}", E::TYPE_NAME);

    let Some(id) = E::dto_id(&dto) else {
        return Err(AppError::bad_request(E::NAME, "idnull", "Invalid id"));
    };

    let saved = service.save(&dto).await?;
    let headers = alerts.entity_updated(E::NAME, &id.to_string());

    Ok((headers, Json(saved)))
}

/// List entities matching the query's criteria, one page at a time.
async fn list<E: Entity>(
    State(queries): State<QueryService<E>>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    let params = query_params(query.as_deref());
    let criteria = parse_criteria::<E>(&params)?;
    let request = parse_page::<E>(&params)?;
    debug!(?criteria, "REST request to get {}s by criteria", E::TYPE_NAME);

    let page = queries.find_by_criteria(&criteria, &request).await?;
    let headers = pagination_headers(&uri, &page);

    Ok((headers, Json(page.content)))
}

/// Count entities matching the query's criteria.
async fn count<E: Entity>(
    State(queries): State<QueryService<E>>,
    RawQuery(query): RawQuery,
) -> Result<Json<i64>> {
    let params = query_params(query.as_deref());
    let criteria = parse_criteria::<E>(&params)?;
    debug!(?criteria, "REST request to count {}s by criteria", E::TYPE_NAME);

    Ok(Json(queries.count_by_criteria(&criteria).await?))
}

/// Get one entity.
async fn get_one<E: Entity>(
    State(service): State<EntityService<E>>,
    id: std::result::Result<Path<E::Id>, PathRejection>,
) -> Result<Json<E::Dto>> {
    let id = path_id::<E>(id)?;
    debug!("REST request to get {} : {}", E::TYPE_NAME, id);

    service.find_one(id).await?.map(Json).ok_or(AppError::NotFound)
}

/// Delete one entity. Deleting a missing id succeeds.
async fn delete<E: Entity>(
    State(service): State<EntityService<E>>,
    State(alerts): State<AlertHeaders>,
    id: std::result::Result<Path<E::Id>, PathRejection>,
) -> Result<impl IntoResponse> {
    let id = path_id::<E>(id)?;
    debug!("REST request to delete {} : {}", E::TYPE_NAME, id);

    service.delete(id).await?;
    let headers = alerts.entity_deleted(E::NAME, &id.to_string());

    Ok((StatusCode::NO_CONTENT, headers))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, Response};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::routes::app;
    use crate::state::AppState;

    use super::*;

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        router.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_create_wish_list() {
        let router = app(AppState::in_memory());

        let response = send(
            &router,
            Method::POST,
            "/api/wish-lists",
            Some(json!({ "title": "Birthday" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(header(&response, "location"), Some("/api/wish-lists/1"));
        assert_eq!(
            header(&response, "x-onlineshopapp-alert"),
            Some("onlineShopApp.wishList.created")
        );
        assert_eq!(header(&response, "x-onlineshopapp-params"), Some("1"));

        let body = json_body(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["title"], "Birthday");
    }

    #[tokio::test]
    async fn test_create_with_existing_id_is_rejected() {
        let router = app(AppState::in_memory());

        let response = send(
            &router,
            Method::POST,
            "/api/wish-lists",
            Some(json!({ "id": 5, "title": "x" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            header(&response, "x-onlineshopapp-error"),
            Some("error.idexists")
        );
        assert_eq!(header(&response, "x-onlineshopapp-params"), Some("wishList"));
        assert_eq!(json_body(response).await["errorKey"], "idexists");

        let count = send(&router, Method::GET, "/api/wish-lists/count", None).await;
        assert_eq!(json_body(count).await, json!(0));
    }

    #[tokio::test]
    async fn test_create_reports_missing_required_fields() {
        let router = app(AppState::in_memory());

        let response = send(
            &router,
            Method::POST,
            "/api/addresses",
            Some(json!({ "address1": "1 Main St", "country": "NZ" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["errorKey"], "validation");
        assert_eq!(
            body["fieldErrors"],
            json!([{ "objectName": "addressDTO", "field": "postcode", "message": "NotNull" }])
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let router = app(AppState::in_memory());

        let response = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = router.clone().oneshot(response).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            header(&response, "x-onlineshopapp-error"),
            Some("error.http.400")
        );
    }

    #[tokio::test]
    async fn test_update_without_id_is_rejected() {
        let router = app(AppState::in_memory());

        let response = send(
            &router,
            Method::PUT,
            "/api/wish-lists",
            Some(json!({ "id": null, "title": "x" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["errorKey"], "idnull");
    }

    #[tokio::test]
    async fn test_update_wish_list() {
        let router = app(AppState::in_memory());
        send(
            &router,
            Method::POST,
            "/api/wish-lists",
            Some(json!({ "title": "Birthday" })),
        )
        .await;

        let response = send(
            &router,
            Method::PUT,
            "/api/wish-lists",
            Some(json!({ "id": 1, "title": "Birthday 2027", "restricted": true })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            header(&response, "x-onlineshopapp-alert"),
            Some("onlineShopApp.wishList.updated")
        );
        let body = json_body(response).await;
        assert_eq!(body["title"], "Birthday 2027");
        assert_eq!(body["restricted"], true);

        let fetched = json_body(send(&router, Method::GET, "/api/wish-lists/1", None).await).await;
        assert_eq!(fetched["title"], "Birthday 2027");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found_with_empty_body() {
        let router = app(AppState::in_memory());

        let response = send(&router, Method::GET, "/api/wish-lists/999", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_succeeds() {
        let router = app(AppState::in_memory());

        let response = send(&router, Method::DELETE, "/api/wish-lists/999", None).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            header(&response, "x-onlineshopapp-alert"),
            Some("onlineShopApp.wishList.deleted")
        );
        assert_eq!(header(&response, "x-onlineshopapp-params"), Some("999"));
    }

    #[tokio::test]
    async fn test_delete_removes_entity() {
        let router = app(AppState::in_memory());
        send(
            &router,
            Method::POST,
            "/api/customers",
            Some(json!({ "firstName": "Ada" })),
        )
        .await;

        let response = send(&router, Method::DELETE, "/api/customers/1", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&router, Method::GET, "/api/customers/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let router = app(AppState::in_memory());

        let response = send(&router, Method::GET, "/api/products/abc", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_pages_and_links() {
        let router = app(AppState::in_memory());
        for title in ["Birthday", "Holiday", "Wedding"] {
            send(
                &router,
                Method::POST,
                "/api/wish-lists",
                Some(json!({ "title": title })),
            )
            .await;
        }

        let response = send(&router, Method::GET, "/api/wish-lists?page=0&size=2", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header(&response, "x-total-count"), Some("3"));
        let link = header(&response, "link").unwrap().to_owned();
        assert!(link.starts_with("</api/wish-lists?page=1&size=2>; rel=\"next\""));
        assert!(!link.contains("rel=\"prev\""));

        let body = json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));
        assert_eq!(body[0]["title"], "Birthday");
    }

    #[tokio::test]
    async fn test_list_and_count_by_criteria() {
        let router = app(AppState::in_memory());
        for (title, customer) in [("Birthday", 1), ("birthday gifts", 2), ("Holiday", 1)] {
            send(
                &router,
                Method::POST,
                "/api/wish-lists",
                Some(json!({ "title": title, "customerId": customer })),
            )
            .await;
        }

        let response = send(
            &router,
            Method::GET,
            "/api/wish-lists?title.contains=birth&customerId.equals=1",
            None,
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["title"], "Birthday");

        let response = send(
            &router,
            Method::GET,
            "/api/wish-lists/count?title.contains=BIRTH",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!(2));
    }

    #[tokio::test]
    async fn test_unknown_criteria_is_rejected() {
        let router = app(AppState::in_memory());

        let response = send(&router, Method::GET, "/api/wish-lists?colour.equals=red", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            header(&response, "x-onlineshopapp-error"),
            Some("error.badcriteria")
        );
    }

    #[tokio::test]
    async fn test_unknown_sort_property_is_rejected() {
        let router = app(AppState::in_memory());

        let response = send(&router, Method::GET, "/api/customers?sort=password,asc", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["errorKey"], "badpage");
        assert_eq!(body["title"], "unknown sort property: password");
    }

    #[tokio::test]
    async fn test_category_keeps_products() {
        let router = app(AppState::in_memory());

        let response = send(
            &router,
            Method::POST,
            "/api/categories",
            Some(json!({
                "description": "Toys",
                "status": "AVAILABLE",
                "products": [{ "id": 4, "title": "Kite" }]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let fetched = json_body(send(&router, Method::GET, "/api/categories/1", None).await).await;
        assert_eq!(fetched["status"], "AVAILABLE");
        assert_eq!(fetched["products"][0]["id"], 4);
    }
}
