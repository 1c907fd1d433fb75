//! API Response Envelope
//!
//! Every reply, success or failure, is wrapped in the same
//! `{result, message, data}` envelope.

use serde::Serialize;

/// Uniform response envelope.
///
/// `result` is `true` for success, `false` for failure. `message` carries a
/// human-readable note and `data` the typed payload (`null` on failure or
/// for acknowledge-only operations).
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let ok = ApiResponse::success("Login successful", "alice@example.com");
/// assert!(ok.result);
///
/// let err: ApiResponse<()> = ApiResponse::fail("Invalid credentials");
/// assert!(!err.result);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub result: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Success with payload, no message.
    pub fn of(data: T) -> Self {
        Self {
            result: true,
            message: None,
            data: Some(data),
        }
    }

    /// Success with message and payload.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            result: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Success with message only (acknowledge).
    pub fn success_no_data(message: impl Into<String>) -> Self {
        Self {
            result: true,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Failure with message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            result: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let resp = ApiResponse::success("ok", 42);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["result"], true);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_fail_has_null_data() {
        let resp: ApiResponse<i32> = ApiResponse::fail("nope");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["result"], false);
        assert_eq!(json["message"], "nope");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_ack_shape() {
        let resp: ApiResponse<()> = ApiResponse::success_no_data("done");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["result"], true);
        assert!(json["data"].is_null());
    }
}
