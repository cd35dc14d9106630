//! Response headers for alerts and pagination.
//!
//! # Alerts
//!
//! Successful writes carry a translatable alert key and its parameter:
//!
//! ```text
//! X-onlineShopApp-alert: onlineShopApp.wishList.created
//! X-onlineShopApp-params: 7
//! ```
//!
//! Rejected requests carry the error key and the entity name instead:
//!
//! ```text
//! X-onlineShopApp-error: error.idexists
//! X-onlineShopApp-params: wishList
//! ```
//!
//! # Pagination
//!
//! List responses carry `X-Total-Count` and an RFC 8288 `Link` header with
//! `next`, `prev`, `last` and `first` relations.

use axum::http::header::LINK;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri};
use url::form_urlencoded;

use online_shop_core::page::Page;

/// Header carrying the total number of rows across all pages.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Builds alert headers tagged with the application name.
#[derive(Debug, Clone)]
pub struct AlertHeaders {
    application_name: String,
    alert: HeaderName,
    error: HeaderName,
    params: HeaderName,
}

impl AlertHeaders {
    /// Create alert headers for `application_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name cannot be part of a header name.
    pub fn new(application_name: &str) -> Result<Self, axum::http::header::InvalidHeaderName> {
        Ok(Self {
            application_name: application_name.to_owned(),
            alert: HeaderName::try_from(format!("x-{application_name}-alert"))?,
            error: HeaderName::try_from(format!("x-{application_name}-error"))?,
            params: HeaderName::try_from(format!("x-{application_name}-params"))?,
        })
    }

    /// Alert for a created entity.
    #[must_use]
    pub fn entity_created(&self, entity_name: &str, id: &str) -> HeaderMap {
        self.alert(&format!("{}.{entity_name}.created", self.application_name), id)
    }

    /// Alert for an updated entity.
    #[must_use]
    pub fn entity_updated(&self, entity_name: &str, id: &str) -> HeaderMap {
        self.alert(&format!("{}.{entity_name}.updated", self.application_name), id)
    }

    /// Alert for a deleted entity.
    #[must_use]
    pub fn entity_deleted(&self, entity_name: &str, id: &str) -> HeaderMap {
        self.alert(&format!("{}.{entity_name}.deleted", self.application_name), id)
    }

    /// Failure alert for a rejected request.
    #[must_use]
    pub fn failure(&self, entity_name: &str, error_key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, &self.error, &format!("error.{error_key}"));
        insert(&mut headers, &self.params, entity_name);
        headers
    }

    fn alert(&self, message: &str, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        insert(&mut headers, &self.alert, message);
        insert(&mut headers, &self.params, param);
        headers
    }
}

/// Insert a header, URL-encoding the value so any text is a valid header.
fn insert(headers: &mut HeaderMap, name: &HeaderName, value: &str) {
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    if let Ok(value) = HeaderValue::from_str(&encoded) {
        headers.insert(name.clone(), value);
    }
}

/// Pagination headers for `page`, with links derived from the request URI.
#[must_use]
pub fn pagination_headers<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total_elements));

    let size = page.size;
    let last = page.total_pages().saturating_sub(1);
    let mut links = Vec::with_capacity(4);
    if page.has_next() {
        links.push(link(uri, page.page + 1, size, "next"));
    }
    if page.has_previous() {
        links.push(link(uri, page.page - 1, size, "prev"));
    }
    links.push(link(uri, last, size, "last"));
    links.push(link(uri, 0, size, "first"));

    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(LINK, value);
    }
    headers
}

/// `<uri>; rel="relation"` with `page` and `size` replaced in the query.
fn link(uri: &Uri, page: u32, size: u32, relation: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(existing) = uri.query() {
        for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
            if key != "page" && key != "size" {
                query.append_pair(&key, &value);
            }
        }
    }
    query.append_pair("page", &page.to_string());
    query.append_pair("size", &size.to_string());

    format!("<{}?{}>; rel=\"{relation}\"", uri.path(), query.finish())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use online_shop_core::page::PageRequest;

    use super::*;

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_creation_alert() {
        let alerts = AlertHeaders::new("onlineShopApp").unwrap();
        let headers = alerts.entity_created("wishList", "7");

        assert_eq!(
            header(&headers, "x-onlineshopapp-alert"),
            Some("onlineShopApp.wishList.created")
        );
        assert_eq!(header(&headers, "x-onlineshopapp-params"), Some("7"));
    }

    #[test]
    fn test_update_and_deletion_alerts() {
        let alerts = AlertHeaders::new("shop").unwrap();

        let updated = alerts.entity_updated("product", "3");
        assert_eq!(header(&updated, "x-shop-alert"), Some("shop.product.updated"));

        let deleted = alerts.entity_deleted("product", "3");
        assert_eq!(header(&deleted, "x-shop-alert"), Some("shop.product.deleted"));
    }

    #[test]
    fn test_failure_alert() {
        let alerts = AlertHeaders::new("onlineShopApp").unwrap();
        let headers = alerts.failure("wishList", "idexists");

        assert_eq!(
            header(&headers, "x-onlineshopapp-error"),
            Some("error.idexists")
        );
        assert_eq!(header(&headers, "x-onlineshopapp-params"), Some("wishList"));
        assert!(headers.get("x-onlineshopapp-alert").is_none());
    }

    #[test]
    fn test_alert_param_is_url_encoded() {
        let alerts = AlertHeaders::new("shop").unwrap();
        let headers = alerts.entity_updated("address", "a b");
        assert_eq!(header(&headers, "x-shop-params"), Some("a+b"));
    }

    #[test]
    fn test_invalid_application_name() {
        assert!(AlertHeaders::new("online shop").is_err());
    }

    #[test]
    fn test_pagination_headers_middle_page() {
        let uri: Uri = "/api/wish-lists?title.contains=birth&page=1&size=10"
            .parse()
            .unwrap();
        let page = Page::new(vec![0; 10], &PageRequest::of(1, 10), 35);

        let headers = pagination_headers(&uri, &page);

        assert_eq!(header(&headers, "x-total-count"), Some("35"));
        assert_eq!(
            header(&headers, "link"),
            Some(
                "</api/wish-lists?title.contains=birth&page=2&size=10>; rel=\"next\",\
                 </api/wish-lists?title.contains=birth&page=0&size=10>; rel=\"prev\",\
                 </api/wish-lists?title.contains=birth&page=3&size=10>; rel=\"last\",\
                 </api/wish-lists?title.contains=birth&page=0&size=10>; rel=\"first\""
            )
        );
    }

    #[test]
    fn test_pagination_headers_single_page() {
        let uri: Uri = "/api/products".parse().unwrap();
        let page = Page::new(vec![0; 2], &PageRequest::default(), 2);

        let headers = pagination_headers(&uri, &page);

        assert_eq!(
            header(&headers, "link"),
            Some(
                "</api/products?page=0&size=20>; rel=\"last\",\
                 </api/products?page=0&size=20>; rel=\"first\""
            )
        );
    }

    #[test]
    fn test_pagination_headers_empty_result() {
        let uri: Uri = "/api/products?sort=title,desc".parse().unwrap();
        let page: Page<u8> = Page::new(Vec::new(), &PageRequest::default(), 0);

        let headers = pagination_headers(&uri, &page);

        assert_eq!(header(&headers, "x-total-count"), Some("0"));
        let link = header(&headers, "link").unwrap();
        assert!(link.starts_with("</api/products?sort=title%2Cdesc&page=0&size=20>; rel=\"last\""));
    }
}
