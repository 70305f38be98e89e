//! Value loading for listed leaves.

use crate::error::NamespaceError;
use crate::store::{KeyValueStore, ValueRead};
use std::collections::HashMap;
use tracing::debug;

/// Load string values for `keys`.
///
/// A key that vanished since the scan, or whose value is not a string, maps
/// to `None` without failing the batch. Any store error aborts.
pub async fn load_values(
    store: &dyn KeyValueStore,
    keys: &[String],
) -> Result<HashMap<String, Option<String>>, NamespaceError> {
    let mut values = HashMap::with_capacity(keys.len());
    for key in keys {
        let value = match store
            .get_value(key)
            .await
            .map_err(|e| NamespaceError::transport("get", key.clone(), e))?
        {
            ValueRead::Text(text) => Some(text),
            ValueRead::Missing => {
                debug!(op = "ls-file", key = %key, "key vanished before value load");
                None
            }
            ValueRead::WrongType => {
                debug!(op = "ls-file", key = %key, "non-string value; skipping value load");
                None
            }
        };
        values.insert(key.clone(), value);
    }
    Ok(values)
}
