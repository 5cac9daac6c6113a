//! Detection of the server-side "persisted query unknown" signal.

use serde_json::Value;

/// Substring an APQ-speaking server puts in an error `message` when the
/// persisted query hash is unknown.
const NOT_FOUND_MESSAGE: &str = "PersistedQueryNotFound";

/// Error code an APQ-speaking server puts in `extensions.code` when the
/// persisted query hash is unknown.
const NOT_FOUND_CODE: &str = "PERSISTED_QUERY_NOT_FOUND";

/// Reports whether a parsed response body signals that the server does not
/// recognize the persisted query hash.
///
/// This is a structural check, independent of HTTP status: the body must be
/// an object with an `errors` array, and at least one element must be an
/// object whose `message` contains `"PersistedQueryNotFound"` or whose
/// `extensions.code` equals `"PERSISTED_QUERY_NOT_FOUND"`.
///
/// Any shape mismatch yields `false`; ambiguous input is never treated as
/// the not-found condition, and this function never errors.
///
/// # Example
///
/// ```rust
/// use graphql_apq::is_persisted_query_not_found;
/// use serde_json::json;
///
/// let body = json!({ "errors": [{ "message": "PersistedQueryNotFound" }] });
/// assert!(is_persisted_query_not_found(&body));
///
/// let body = json!({ "data": { "posts": [] } });
/// assert!(!is_persisted_query_not_found(&body));
/// ```
#[must_use]
pub fn is_persisted_query_not_found(body: &Value) -> bool {
    let Some(errors) = body.get("errors").and_then(Value::as_array) else {
        return false;
    };

    errors.iter().any(|error| {
        let message_matches = error
            .get("message")
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains(NOT_FOUND_MESSAGE));

        let code_matches = error
            .get("extensions")
            .and_then(|extensions| extensions.get("code"))
            .and_then(Value::as_str)
            == Some(NOT_FOUND_CODE);

        message_matches || code_matches
    })
}
