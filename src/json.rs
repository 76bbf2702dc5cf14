use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde_json::Value;

/// Decode `content` into `T`, accepting only a JSON object at the top level.
///
/// Derived struct impls also take a JSON array and fill fields by position;
/// neither the credential file nor an API page is ever shaped like that.
pub fn from_object_str<T: DeserializeOwned>(content: &str) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;
    if value.is_object() {
        return serde_json::from_value(value);
    }
    let unexpected = match &value {
        Value::Object(_) => Unexpected::Map,
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
    };
    Err(serde_json::Error::invalid_type(unexpected, &"a JSON object"))
}
