//! Success interpretation for 2xx responses.
//!
//! The platform's services answer in two shapes. Most endpoints treat any
//! 2xx status as success and hand the body back as-is. The account and
//! booking services wrap payloads in an envelope and expect callers to also
//! check a boolean `success` flag, so a 200 whose body says `success: false`
//! is still a failure. [`SuccessPolicy`] names both contracts; each call
//! picks one, falling back to the client-wide default.

use serde_json::Value;

/// How a 2xx response is judged successful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessPolicy {
    /// Any 2xx status is success. The body is returned as-is.
    #[default]
    HttpStatus,
    /// 2xx and a `success: true` flag in the body. A false or absent flag
    /// fails the call even though the wire status was fine.
    SuccessFlag,
}

pub(crate) fn envelope_accepts(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn envelope_failure_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or("request failed")
        .to_string()
}
