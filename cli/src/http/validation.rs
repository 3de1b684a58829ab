//! 基础请求验证逻辑

use super::models::{HttpServerError, MoveTarget};
use super::params::FormParams;

/// A parameter that must be present. Empty values are allowed.
pub fn require_param<'a>(params: &'a FormParams, name: &str) -> Result<&'a str, HttpServerError> {
    params
        .get(name)
        .ok_or_else(|| HttpServerError::InvalidRequest(format!("parameter '{name}' must be used")))
}

/// A parameter that must be present and non-empty.
pub fn require_non_empty<'a>(
    params: &'a FormParams,
    name: &str,
) -> Result<&'a str, HttpServerError> {
    match params.get(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(HttpServerError::InvalidRequest(format!(
            "please use '{name}' parameter"
        ))),
    }
}

/// Exactly one of `after` or `before`, naming a non-empty item id.
pub fn validate_move_target(params: &FormParams) -> Result<MoveTarget, HttpServerError> {
    let after = params.get("after").filter(|v| !v.is_empty());
    let before = params.get("before").filter(|v| !v.is_empty());
    match (after, before) {
        (Some(after), None) => Ok(MoveTarget::After(after.to_string())),
        (None, Some(before)) => Ok(MoveTarget::Before(before.to_string())),
        (Some(_), Some(_)) => Err(HttpServerError::InvalidRequest(
            "use only one of 'after' or 'before'".to_string(),
        )),
        (None, None) => Err(HttpServerError::InvalidRequest(
            "please use 'after' or 'before' parameter".to_string(),
        )),
    }
}
