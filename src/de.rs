use serde::de::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Accept any JSON, treating `null` and `""` alike as absent. Type checks are
/// left to the caller so that they can be made in a meaningful order.
pub fn blank_as_none<'a, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'a>,
{
    Option::<Value>::deserialize(deserializer)
        .map(|x| x.filter(|v| !v.is_null() && v.as_str() != Some("")))
}

#[test]
fn test_blank_as_none() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct T {
        #[serde(default, deserialize_with = "blank_as_none")]
        val: Option<Value>,
    }

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": "x"}"#).unwrap(),
        T { val: Some("x".into()) },
    );
    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": 1}"#).unwrap(),
        T { val: Some(1.into()) },
    );
    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": ""}"#).unwrap(),
        T { val: None },
    );
    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": null}"#).unwrap(),
        T { val: None },
    );
    assert_eq!(serde_json::from_str::<T>(r#"{}"#).unwrap(), T { val: None });
}

/// Parse a string via [FromStr], quietly substituting the default for
/// anything else: absent values, other JSON types, or unrecognised strings.
pub fn or_default<'a, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'a>,
    T: FromStr + Default,
{
    Option::<Value>::deserialize(deserializer).map(|x| {
        x.as_ref()
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    })
}

#[test]
fn test_or_default() {
    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct T {
        #[serde(default, deserialize_with = "or_default")]
        val: u8,
    }

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": "7"}"#).unwrap(),
        T { val: 7 },
    );
    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": "seven"}"#).unwrap(),
        T { val: 0 },
    );
    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": 7}"#).unwrap(),
        T { val: 0 },
    );
    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": [true]}"#).unwrap(),
        T { val: 0 },
    );
    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": null}"#).unwrap(),
        T { val: 0 },
    );
    assert_eq!(serde_json::from_str::<T>(r#"{}"#).unwrap(), T { val: 0 });
}
