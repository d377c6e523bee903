use std::collections::{BTreeMap, HashMap};

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ErrorCode, HandlerError};
use crate::status::{translate, Translation};

/// Request parameters as supplied by the caller. Values are interpreted by
/// each handler; this layer performs no coercion.
pub type Params = HashMap<String, String>;

/// Looks up a parameter a handler cannot work without.
///
/// # Errors
///
/// Returns `INVALID_PARAMETER` naming the key when it is absent.
pub fn required_param<'a>(params: &'a Params, key: &str) -> Result<&'a str, HandlerError> {
    params.get(key).map(String::as_str).ok_or_else(|| {
        HandlerError::with_detail(ErrorCode::InvalidParameter, format!("missing parameter `{key}`"))
    })
}

/// Transport-agnostic response: status, JSON object body, and headers.
///
/// The body is always a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(with = "status_code")]
    pub status: StatusCode,
    pub body: Map<String, Value>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Response {
    /// Response with an empty object body and no headers.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Map::new(),
            headers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn json(status: StatusCode, body: Map<String, Value>) -> Self {
        Self {
            status,
            body,
            headers: BTreeMap::new(),
        }
    }

    /// Like [`Response::json`], for a body held as a plain `Value`.
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_SOFTWARE_ERROR` when `body` is not a JSON object.
    pub fn try_json(status: StatusCode, body: Value) -> Result<Self, HandlerError> {
        match body {
            Value::Object(map) => Ok(Self::json(status, map)),
            other => Err(HandlerError::with_detail(
                ErrorCode::InternalSoftwareError,
                format!("response body must be a JSON object, got {other}"),
            )),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Builds the synthesized response for a translated code.
    ///
    /// The body is `{"result": message}`, plus `"detail"` when one is given.
    #[must_use]
    pub fn translated(translation: Translation, detail: Option<&str>) -> Self {
        let mut body = Map::new();
        body.insert("result".to_string(), Value::from(translation.message));
        if let Some(detail) = detail {
            body.insert("detail".to_string(), Value::from(detail));
        }
        Self::json(translation.status, body)
    }

    /// Translates a handler failure into a response.
    #[must_use]
    pub fn from_error(err: &HandlerError) -> Self {
        Self::translated(translate(err.code), err.detail.as_deref())
    }

    /// The `"result"` field of a translated body, if present.
    #[must_use]
    pub fn result_message(&self) -> Option<&str> {
        self.body.get("result").and_then(Value::as_str)
    }
}

/// Successful handler result with an explicit kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The handler built the response itself.
    Response(Response),
    /// The handler succeeded and reports it with a status code
    /// (for example `ADDED_USERPLANE`).
    Signal(ErrorCode),
}

impl Outcome {
    /// Resolves to a response, translating a signalled code.
    #[must_use]
    pub fn into_response(self) -> Response {
        match self {
            Self::Response(resp) => resp,
            Self::Signal(code) => Response::translated(translate(code), None),
        }
    }
}

impl From<Response> for Outcome {
    fn from(resp: Response) -> Self {
        Self::Response(resp)
    }
}

mod status_code {
    use http::StatusCode;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u16(status.as_u16())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<StatusCode, D::Error> {
        let raw = u16::deserialize(d)?;
        StatusCode::from_u16(raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_response_has_empty_object_body() {
        let resp = Response::new(StatusCode::OK);
        assert!(resp.body.is_empty());
        assert!(resp.headers.is_empty());
    }

    #[test]
    fn required_param_reports_missing_key() {
        let mut params = Params::new();
        params.insert("id".to_string(), "42".to_string());
        assert_eq!(required_param(&params, "id").unwrap(), "42");

        let err = required_param(&params, "body").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParameter);
        assert_eq!(err.detail.as_deref(), Some("missing parameter `body`"));
    }

    #[test]
    fn error_response_carries_message_and_detail() {
        let err = HandlerError::with_detail(ErrorCode::UserplaneNotFound, "id 7");
        let resp = Response::from_error(&err);
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.result_message(), Some("USERPLANE_NOT_FOUND"));
        assert_eq!(resp.body["detail"], "id 7");
    }

    #[test]
    fn signal_outcome_translates() {
        let resp = Outcome::Signal(ErrorCode::AddedUserplane).into_response();
        assert_eq!(resp.status, StatusCode::CREATED);
        assert_eq!(Some(&resp.body), json!({ "result": "ADDED_USERPLANE" }).as_object());
    }

    #[test]
    fn response_outcome_passes_through() {
        let resp = Response::try_json(StatusCode::OK, json!({ "id": "42" }))
            .unwrap()
            .with_header("x-a", "b");
        assert_eq!(Outcome::from(resp.clone()).into_response(), resp);
    }

    #[test]
    fn try_json_accepts_only_objects() {
        let resp = Response::try_json(StatusCode::OK, json!({ "id": "42" })).unwrap();
        assert_eq!(resp.body["id"], "42");

        for body in [json!([1, 2]), json!("text"), json!(7), Value::Null] {
            let err = Response::try_json(StatusCode::OK, body).unwrap_err();
            assert_eq!(err.code, ErrorCode::InternalSoftwareError);
            assert!(err
                .detail
                .as_deref()
                .is_some_and(|d| d.starts_with("response body must be a JSON object")));
        }
    }

    #[test]
    fn non_object_body_is_rejected_on_deserialize() {
        let text = r#"{"status":200,"body":[1,2],"headers":{}}"#;
        assert!(serde_json::from_str::<Response>(text).is_err());
    }

    #[test]
    fn response_serializes_status_as_number() {
        let resp = Response::new(StatusCode::NO_CONTENT);
        let text = serde_json::to_string(&resp).unwrap();
        assert_eq!(text, r#"{"status":204,"body":{},"headers":{}}"#);

        let back: Response = serde_json::from_str(&text).unwrap();
        assert_eq!(back, resp);
    }
}
