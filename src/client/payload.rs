//! Wire payload builders: GET URLs and POST bodies.
//!
//! Both builders prune structurally: a field that is absent or an empty
//! container (`null`, `{}`, `[]`, `""`) is omitted from the wire entirely,
//! never emitted as `null` or an empty object. This keeps payloads minimal
//! and avoids servers receiving ambiguous empty values.

use serde_json::Value;
use url::Url;

use crate::client::persisted::PersistedQueryExtension;
use crate::operation::Operation;

/// Query parameter carrying the operation name on GET requests.
const OP_PARAM: &str = "op";
/// Wire field for the persisted-document id.
const DOCUMENT_ID_FIELD: &str = "documentId";
/// Wire field for the operation variables.
const VARIABLES_FIELD: &str = "variables";
/// Wire field for the persisted-query extension.
const EXTENSIONS_FIELD: &str = "extensions";
/// Wire field for the document text in POST bodies.
const QUERY_FIELD: &str = "query";

/// The fields of a POST request body, before pruning.
#[derive(Debug, Default)]
pub(crate) struct RequestPayload<'a> {
    /// The document text.
    pub query: Option<&'a str>,
    /// The persisted-document id.
    pub document_id: Option<&'a str>,
    /// The operation variables.
    pub variables: Option<&'a Value>,
    /// The APQ persisted-query extension.
    pub extensions: Option<&'a PersistedQueryExtension>,
}

/// Builds the GET URL for an operation.
///
/// Always sets `op` (the operation name); sets `documentId` only when the
/// operation carries one; sets `variables` (JSON-encoded) only when
/// structurally non-empty; sets `extensions` (JSON-encoded) only when the
/// caller supplies one. The GET path never carries a raw query string.
pub(crate) fn build_url(
    endpoint: &Url,
    operation: &Operation,
    extension: Option<&PersistedQueryExtension>,
) -> Result<Url, serde_json::Error> {
    let variables = operation
        .variables()
        .filter(|v| !is_empty_value(v))
        .map(serde_json::to_string)
        .transpose()?;
    let extensions = extension.map(serde_json::to_string).transpose()?;

    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(OP_PARAM, operation.name());
        if let Some(id) = operation.document_id() {
            pairs.append_pair(DOCUMENT_ID_FIELD, id);
        }
        if let Some(variables) = &variables {
            pairs.append_pair(VARIABLES_FIELD, variables);
        }
        if let Some(extensions) = &extensions {
            pairs.append_pair(EXTENSIONS_FIELD, extensions);
        }
    }

    Ok(url)
}

/// Builds a pruned JSON body from the payload fields.
///
/// Pruning is structural: a field that is present but empty is treated the
/// same as an absent field and removed before serialization.
pub(crate) fn build_body(payload: &RequestPayload<'_>) -> Result<Value, serde_json::Error> {
    let mut body = serde_json::Map::new();

    if let Some(query) = payload.query.filter(|q| !q.is_empty()) {
        body.insert(QUERY_FIELD.to_string(), Value::String(query.to_string()));
    }
    if let Some(id) = payload.document_id.filter(|id| !id.is_empty()) {
        body.insert(DOCUMENT_ID_FIELD.to_string(), Value::String(id.to_string()));
    }
    if let Some(variables) = payload.variables.filter(|v| !is_empty_value(v)) {
        body.insert(VARIABLES_FIELD.to_string(), variables.clone());
    }
    if let Some(extensions) = payload.extensions {
        body.insert(EXTENSIONS_FIELD.to_string(), serde_json::to_value(extensions)?);
    }

    Ok(Value::Object(body))
}

/// Reports whether a JSON value is an empty container.
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
