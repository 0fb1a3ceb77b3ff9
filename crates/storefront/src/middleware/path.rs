use shared::errors::HttpError;

/// Parses an `{id}` path segment. An id that is not a number cannot name a
/// record, so it is answered like any other missing one.
pub fn resource_id(raw: &str, not_found: &str) -> Result<i32, HttpError> {
    raw.parse::<i32>()
        .map_err(|_| HttpError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(resource_id("42", "Order not found").ok(), Some(42));
    }

    #[test]
    fn non_numeric_ids_are_not_found() {
        match resource_id("abc", "Order not found") {
            Err(HttpError::NotFound(msg)) => assert_eq!(msg, "Order not found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
