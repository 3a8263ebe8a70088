//! Response interpretation
//!
//! The router replies with a loosely typed payload (nested AMQP maps and
//! lists). All shape validation happens here, once, at the boundary: the rest
//! of the program only ever sees a [`QueryResult`] or a [`QueryError`].

use fe2o3_amqp_types::primitives::{SimpleValue, Value};
use thiserror::Error;

/// The pieces of the reply message the interpreter needs, as extracted from
/// the AMQP message by the transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status_code: Option<SimpleValue>,
    pub status_description: Option<String>,
    pub body: Option<Value>,
}

/// A successfully decoded query response.
///
/// `header` is the attribute-name list *as returned by the server* (which may
/// reorder or filter the requested list); `rows` are kept in server order with
/// values untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Error)]
pub enum QueryError {
    /// The server answered with a non-200 status (or no usable status at all).
    #[error("{}", .description.as_deref().unwrap_or("request failed"))]
    RequestFailed {
        status: Option<i64>,
        description: Option<String>,
    },

    /// Status was 200 but the payload lacked the expected shape.
    #[error("bad response body: {0:?}")]
    MalformedResponse(Option<Value>),
}

const STATUS_OK: i64 = 200;

fn integer_status(value: &SimpleValue) -> Option<i64> {
    match value {
        SimpleValue::Ubyte(v) => Some(i64::from(*v)),
        SimpleValue::Ushort(v) => Some(i64::from(*v)),
        SimpleValue::Uint(v) => Some(i64::from(*v)),
        SimpleValue::Ulong(v) => i64::try_from(*v).ok(),
        SimpleValue::Byte(v) => Some(i64::from(*v)),
        SimpleValue::Short(v) => Some(i64::from(*v)),
        SimpleValue::Int(v) => Some(i64::from(*v)),
        SimpleValue::Long(v) => Some(*v),
        _ => None,
    }
}

fn as_sequence(value: &Value) -> Option<&[Value]> {
    match value {
        Value::List(items) => Some(items),
        Value::Array(items) => Some(&items.0),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Symbol(s) => Some(s.0.clone()),
        _ => None,
    }
}

fn map_entry<'a>(map: &'a Value, key: &str) -> Option<&'a Value> {
    match map {
        Value::Map(entries) => entries.get(&Value::String(key.to_string())),
        _ => None,
    }
}

/// Interpret a raw reply into a decoded result or a structured error.
///
/// Status codes other than an integer 200 fail as [`QueryError::RequestFailed`]
/// carrying the server's description. A 200 reply must carry a map body with
/// `attributeNames` (sequence of strings) and `results` (sequence of
/// sequences); anything else fails as [`QueryError::MalformedResponse`] with
/// the payload attached for diagnosis. Values are passed through untouched.
pub fn interpret(raw: RawResponse) -> Result<QueryResult, QueryError> {
    let status = raw.status_code.as_ref().and_then(integer_status);
    if status != Some(STATUS_OK) {
        return Err(QueryError::RequestFailed {
            status,
            description: raw.status_description,
        });
    }

    let malformed = |body: &Option<Value>| QueryError::MalformedResponse(body.clone());
    let body = raw.body.as_ref().ok_or_else(|| malformed(&raw.body))?;

    let names = map_entry(body, "attributeNames")
        .and_then(as_sequence)
        .ok_or_else(|| malformed(&raw.body))?;
    let header = names
        .iter()
        .map(|v| as_text(v).ok_or_else(|| malformed(&raw.body)))
        .collect::<Result<Vec<_>, _>>()?;

    let results = map_entry(body, "results")
        .and_then(as_sequence)
        .ok_or_else(|| malformed(&raw.body))?;
    let rows = results
        .iter()
        .map(|row| {
            as_sequence(row)
                .map(<[Value]>::to_vec)
                .ok_or_else(|| malformed(&raw.body))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QueryResult { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fe2o3_amqp_types::primitives::OrderedMap;

    fn body(names: &[&str], rows: &[&[Value]]) -> Value {
        let mut map: OrderedMap<Value, Value> = OrderedMap::new();
        map.insert(
            Value::String("attributeNames".to_string()),
            Value::List(names.iter().map(|n| Value::String(n.to_string())).collect()),
        );
        map.insert(
            Value::String("results".to_string()),
            Value::List(rows.iter().map(|r| Value::List(r.to_vec())).collect()),
        );
        Value::Map(map)
    }

    #[test]
    fn test_interpret_success() {
        let raw = RawResponse {
            status_code: Some(SimpleValue::Int(200)),
            status_description: Some("OK".to_string()),
            body: Some(body(
                &["identity", "capacity"],
                &[
                    &[Value::String("L1".to_string()), Value::Int(250)],
                    &[Value::String("L2".to_string()), Value::Int(0)],
                ],
            )),
        };
        let result = interpret(raw).unwrap();
        assert_eq!(result.header, ["identity", "capacity"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0][0], Value::String("L1".to_string()));
        assert_eq!(result.rows[1][1], Value::Int(0));
    }

    #[test]
    fn test_interpret_accepts_wider_integer_status() {
        let raw = RawResponse {
            status_code: Some(SimpleValue::Long(200)),
            status_description: None,
            body: Some(body(&[], &[])),
        };
        assert!(interpret(raw).is_ok());
    }

    #[test]
    fn test_non_200_status_fails_with_description() {
        let raw = RawResponse {
            status_code: Some(SimpleValue::Int(404)),
            status_description: Some("No such entity".to_string()),
            body: None,
        };
        match interpret(raw) {
            Err(QueryError::RequestFailed {
                status,
                description,
            }) => {
                assert_eq!(status, Some(404));
                assert_eq!(description.as_deref(), Some("No such entity"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_missing_status_fails() {
        let raw = RawResponse {
            status_code: None,
            status_description: None,
            body: Some(body(&[], &[])),
        };
        assert!(matches!(
            interpret(raw),
            Err(QueryError::RequestFailed { status: None, .. })
        ));
    }

    #[test]
    fn test_non_integer_status_fails() {
        let raw = RawResponse {
            status_code: Some(SimpleValue::String("200".to_string())),
            status_description: None,
            body: Some(body(&[], &[])),
        };
        assert!(matches!(interpret(raw), Err(QueryError::RequestFailed { .. })));
    }

    #[test]
    fn test_missing_results_key_is_malformed() {
        let mut map: OrderedMap<Value, Value> = OrderedMap::new();
        map.insert(
            Value::String("attributeNames".to_string()),
            Value::List(vec![Value::String("identity".to_string())]),
        );
        let raw = RawResponse {
            status_code: Some(SimpleValue::Int(200)),
            status_description: None,
            body: Some(Value::Map(map)),
        };
        assert!(matches!(
            interpret(raw),
            Err(QueryError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_non_map_body_is_malformed() {
        let raw = RawResponse {
            status_code: Some(SimpleValue::Int(200)),
            status_description: None,
            body: Some(Value::String("not a map".to_string())),
        };
        assert!(matches!(
            interpret(raw),
            Err(QueryError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_missing_body_is_malformed() {
        let raw = RawResponse {
            status_code: Some(SimpleValue::Int(200)),
            status_description: None,
            body: None,
        };
        assert!(matches!(
            interpret(raw),
            Err(QueryError::MalformedResponse(None))
        ));
    }

    #[test]
    fn test_request_failed_display_carries_description() {
        let err = QueryError::RequestFailed {
            status: Some(404),
            description: Some("No such entity".to_string()),
        };
        assert!(err.to_string().contains("No such entity"));
    }
}
