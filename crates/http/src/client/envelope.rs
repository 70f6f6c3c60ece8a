//! Response envelope normalization
//!
//! Every backend response is wrapped as `{ code, data, message? }`. These
//! functions turn a raw body into either the `data` payload or a
//! [`ClientError`]; they have no side effects; the clients raise the
//! user-facing notification on top of them.

use super::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope code meaning success
pub const SUCCESS_CODE: i64 = 200;

/// Message used when the backend gives none
pub const FALLBACK_MESSAGE: &str = "请求失败";

/// The uniform response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    /// Success payload, or the rejection this envelope stands for
    pub fn into_result(self) -> Result<Value, ClientError> {
        if self.code == SUCCESS_CODE {
            Ok(self.data)
        } else {
            Err(ClientError::Rejected {
                code: Some(self.code),
                message: non_empty(self.message.as_deref()).unwrap_or(FALLBACK_MESSAGE).to_string(),
            })
        }
    }
}

/// Normalize the body of a 2xx response
///
/// Bodies that are not JSON or carry no numeric `code` are rejections.
pub fn normalize_body(body: &[u8]) -> Result<Value, ClientError> {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return Err(ClientError::Rejected {
            code: None,
            message: FALLBACK_MESSAGE.to_string(),
        });
    };

    let code = value.get("code").and_then(Value::as_i64);
    if code == Some(SUCCESS_CODE) {
        return Ok(match value {
            Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
            _ => Value::Null,
        });
    }

    Err(ClientError::Rejected {
        code,
        message: field_message(&value, "message").unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
    })
}

/// Normalize the body of a non-2xx response
///
/// Prefers `detail`, then `message`, then the fallback.
pub fn normalize_error_body(status: u16, body: &[u8]) -> ClientError {
    let value = serde_json::from_slice::<Value>(body).unwrap_or(Value::Null);
    let message = field_message(&value, "detail")
        .or_else(|| field_message(&value, "message"))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

    ClientError::Status { status, message }
}

fn field_message(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::Null => None,
        Value::String(s) => non_empty(Some(s)).map(str::to_string),
        // validation errors arrive as a list of objects
        other => Some(other.to_string()),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bytes(value: &Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    #[test]
    fn test_success_returns_data_only() {
        let body = bytes(&json!({
            "code": 200,
            "data": {"token": "tok123", "username": "alice"},
            "message": "ignored"
        }));
        assert_eq!(
            normalize_body(&body).unwrap(),
            json!({"token": "tok123", "username": "alice"})
        );
    }

    #[test]
    fn test_success_without_data_is_null() {
        let body = bytes(&json!({"code": 200, "message": "删除成功"}));
        assert_eq!(normalize_body(&body).unwrap(), Value::Null);
    }

    #[test]
    fn test_rejection_uses_message() {
        let body = bytes(&json!({"code": 404, "message": "key schema not found"}));
        match normalize_body(&body) {
            Err(ClientError::Rejected { code, message }) => {
                assert_eq!(code, Some(404));
                assert_eq!(message, "key schema not found");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_rejection_falls_back() {
        for body in [
            json!({"code": 500}),
            json!({"code": 500, "message": ""}),
            json!({"code": 500, "message": null}),
            json!({"data": 1}),
        ] {
            let err = normalize_body(&bytes(&body)).unwrap_err();
            assert_eq!(err.to_string(), FALLBACK_MESSAGE);
        }

        let err = normalize_body(b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ClientError::Rejected { code: None, .. }));
    }

    #[test]
    fn test_error_body_prefers_detail() {
        let err = normalize_error_body(
            401,
            &bytes(&json!({"detail": "用户名或密码错误", "message": "other"})),
        );
        assert_eq!(err.to_string(), "用户名或密码错误");
        assert!(err.is_auth_expired());

        let err = normalize_error_body(500, &bytes(&json!({"message": "server exploded"})));
        assert_eq!(err.to_string(), "server exploded");

        let err = normalize_error_body(502, b"");
        assert!(matches!(
            err,
            ClientError::Status { status: 502, ref message } if message == FALLBACK_MESSAGE
        ));
    }

    #[test]
    fn test_error_body_stringifies_structured_detail() {
        let err = normalize_error_body(422, &bytes(&json!({"detail": [{"loc": ["body", "name"]}]})));
        assert_eq!(err.to_string(), r#"[{"loc":["body","name"]}]"#);
    }

    #[test]
    fn test_envelope_into_result() {
        let ok = Envelope {
            code: 200,
            data: json!([1, 2]),
            message: None,
        };
        assert_eq!(ok.into_result().unwrap(), json!([1, 2]));

        let rejected: Envelope =
            serde_json::from_value(json!({"code": 403, "message": "forbidden"})).unwrap();
        assert_eq!(rejected.data, Value::Null);
        assert_eq!(rejected.into_result().unwrap_err().to_string(), "forbidden");
    }
}
