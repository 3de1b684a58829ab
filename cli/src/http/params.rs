//! 表单参数提取：查询字符串与 urlencoded 请求体合并

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{FromRequest, Query, Request};
use axum::http::{header, Method};
use axum::Form;

use super::models::HttpServerError;

/// Form parameters from the query string and, for non-GET requests with an
/// `application/x-www-form-urlencoded` body, from the body. Body values win.
///
/// Consumes the body, so it must be the last extractor of a handler.
#[derive(Debug, Default, Clone)]
pub struct FormParams(pub HashMap<String, String>);

impl FormParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// True only for the literal value `true`.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormParams
where
    S: Send + Sync,
{
    type Rejection = HttpServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut values) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
            .map_err(|e| HttpServerError::InvalidRequest(e.body_text()))?;

        let has_form_body = req.method() != Method::GET
            && req
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if has_form_body {
            let Form(body) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| HttpServerError::InvalidRequest(e.body_text()))?;
            values.extend(body);
        }

        Ok(Self(values))
    }
}
