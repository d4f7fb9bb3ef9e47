use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses a response body, logging and discarding malformed input.
pub fn from_json<T: DeserializeOwned>(body: Option<&str>) -> Option<T> {
    let body = body?;
    serde_json::from_str(body)
        .map_err(|err| tracing::warn!(%err, "failed to parse JSON body"))
        .ok()
}

/// Reinterprets an already-parsed value as `T`.
pub fn generic_cast<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    let value = value?;
    T::deserialize(value)
        .map_err(|err| {
            tracing::warn!(%err, target_type = std::any::type_name::<T>(), "JSON cast failed")
        })
        .ok()
}

/// Reinterprets a JSON array as a list of `T`; `null` entries become `None`.
pub fn generic_list_cast<T: DeserializeOwned>(value: Option<&Value>) -> Option<Vec<Option<T>>> {
    let items = match value? {
        Value::Array(items) => items,
        Value::Null => return None,
        other => {
            tracing::warn!(kind = json_kind(other), "expected a JSON array");
            return None;
        }
    };
    items
        .iter()
        .map(|item| match item {
            Value::Null => Ok(None),
            item => T::deserialize(item).map(Some),
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            tracing::warn!(%err, target_type = std::any::type_name::<T>(), "JSON list cast failed")
        })
        .ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::{from_json, generic_cast, generic_list_cast};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Wallet {
        name: String,
        balance: f64,
        #[serde(default)]
        currency: Option<String>,
    }

    #[test]
    fn from_json_parses_or_gives_none() {
        let wallet: Wallet =
            from_json(Some(r#"{"name":"main","balance":12.5}"#)).expect("wallet");
        assert_eq!(wallet.balance, 12.5);
        assert_eq!(wallet.currency, None);
        assert_eq!(from_json::<Wallet>(Some("{")), None);
        assert_eq!(from_json::<Wallet>(None), None);
    }

    #[test]
    fn generic_cast_reads_nested_values() {
        let response = json!({"data": {"name": "savings", "balance": 1000, "currency": "NGN"}});
        let wallet: Wallet = generic_cast(response.get("data")).expect("wallet");
        assert_eq!(wallet.name, "savings");
        assert_eq!(wallet.currency.as_deref(), Some("NGN"));
        assert_eq!(generic_cast::<Wallet>(response.get("missing")), None);
        assert_eq!(generic_cast::<Wallet>(Some(&json!({"name": 1}))), None);
    }

    #[test]
    fn generic_list_cast_keeps_null_entries() {
        let list = json!([
            {"name": "a", "balance": 1.0},
            null,
            {"name": "b", "balance": 2.0}
        ]);
        let wallets = generic_list_cast::<Wallet>(Some(&list)).expect("list");
        assert_eq!(wallets.len(), 3);
        assert!(wallets[1].is_none());
        assert_eq!(wallets[2].as_ref().map(|w| w.name.as_str()), Some("b"));
    }

    #[test]
    fn generic_list_cast_rejects_non_arrays_and_bad_entries() {
        assert!(generic_list_cast::<Wallet>(Some(&json!({"name": "a"}))).is_none());
        assert!(generic_list_cast::<Wallet>(Some(&json!(null))).is_none());
        assert!(generic_list_cast::<Wallet>(Some(&json!([{"name": "a"}]))).is_none());
        assert!(generic_list_cast::<Wallet>(None).is_none());
    }
}
