//! HTTP response handling and the backend's response envelope.
//!
//! Most endpoints answer `{"success": bool, "data": ..., "message": ...}`.
//! Some answer the payload bare. [`Response::data`] and friends are the one
//! place that difference is absorbed.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON. An empty body reads as `null`.
    pub fn json_value(&self) -> Result<Value, FetchError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error carries the body's `message` field when there is one.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .json_value()
            .ok()
            .and_then(|v| message_of(&v))
            .unwrap_or_default();
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }

    /// The payload as `T`, failing when there is none.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        self.optional_data()?
            .ok_or_else(|| FetchError::ParseError("response carried no data".to_string()))
    }

    /// The payload as `T`, or `None` when the backend sent no entity back.
    pub fn optional_data<T: DeserializeOwned>(&self) -> Result<Option<T>, FetchError> {
        match payload(self.json_value()?)? {
            Some(value) => Ok(Some(
                serde_json::from_value(value).map_err(|e| FetchError::ParseError(e.to_string()))?,
            )),
            None => Ok(None),
        }
    }

    /// The payload as a list; a missing payload is an empty list.
    pub fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>, FetchError> {
        Ok(self.optional_data()?.unwrap_or_default())
    }
}

/// Unwrap the envelope.
///
/// - `success: false` is an error carrying the backend message.
/// - A `data` key yields its value (`null` is `None`).
/// - An envelope with neither `data` nor other fields yields `None`.
/// - Anything else is the payload itself.
pub fn payload(body: Value) -> Result<Option<Value>, FetchError> {
    match body {
        Value::Null => Ok(None),
        Value::Object(mut map) => {
            if map.get("success").and_then(Value::as_bool) == Some(false) {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Request failed")
                    .to_string();
                return Err(FetchError::Rejected(message));
            }
            if let Some(data) = map.remove("data") {
                return Ok((!data.is_null()).then_some(data));
            }
            map.remove("success");
            map.remove("message");
            if map.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Value::Object(map)))
            }
        }
        other => Ok(Some(other)),
    }
}

/// The `message` field of an error body.
pub fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Data {
        value: i32,
    }

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_enveloped_data() {
        let resp = make_response(200, br#"{"success": true, "data": {"value": 42}}"#);
        assert_eq!(resp.data::<Data>().unwrap(), Data { value: 42 });
    }

    #[test]
    fn test_bare_data() {
        let resp = make_response(200, br#"{"value": 7}"#);
        assert_eq!(resp.data::<Data>().unwrap(), Data { value: 7 });
    }

    #[test]
    fn test_rejected_envelope() {
        let resp = make_response(200, br#"{"success": false, "message": "Order not found"}"#);
        let err = resp.data::<Data>().unwrap_err();
        assert_eq!(err.to_string(), "Order not found");
    }

    #[test]
    fn test_success_without_data() {
        let resp = make_response(200, br#"{"success": true, "message": "Deleted"}"#);
        assert_eq!(resp.optional_data::<Data>().unwrap(), None);
        assert!(resp.data::<Data>().is_err());
        assert!(make_response(204, b"").optional_data::<Data>().unwrap().is_none());
    }

    #[test]
    fn test_list_defaults_to_empty() {
        let resp = make_response(200, br#"{"success": true, "data": null}"#);
        assert!(resp.list::<Data>().unwrap().is_empty());
        let resp = make_response(200, br#"[{"value": 1}, {"value": 2}]"#);
        assert_eq!(resp.list::<Data>().unwrap().len(), 2);
    }

    #[test]
    fn test_error_for_status_keeps_backend_message() {
        let err = make_response(400, br#"{"message": "Email already used"}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.backend_message(), Some("Email already used"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_error_for_status_plain_body() {
        let err = make_response(502, b"Bad Gateway").error_for_status().unwrap_err();
        assert_eq!(err.backend_message(), None);
        assert!(make_response(201, b"").error_for_status().is_ok());
    }

    #[test]
    fn test_header_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let resp = Response::new(200, headers, Vec::new());
        assert_eq!(resp.header("content-type"), Some("application/json"));
    }
}
