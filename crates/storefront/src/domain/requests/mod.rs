pub mod category;
pub mod order;
pub mod product;

use serde::{Deserialize, Deserializer};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Keeps "field absent" apart from "field set to null" on update bodies.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Flattens validation errors, nested ones included, into sorted
/// `path: message` lines such as `items[0].quantity: Quantity must be at least 1`.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_messages(errors, "", &mut messages);
    messages.sort();

    if messages.is_empty() {
        messages.push("Validation failed".to_string());
    }
    messages
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push(format!("{path}: {}", describe(error, &path)));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, &path, out),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    collect_messages(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn describe(error: &ValidationError, path: &str) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            "required" => "Field is required".to_string(),
            _ => format!("Invalid {path}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{order::CreateOrderRequest, validation_messages};
    use validator::Validate;

    #[test]
    fn nested_item_errors_carry_their_index() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{"user_id":1,"items":[
                {"product_id":1,"quantity":1,"unit_price":1},
                {"product_id":1,"quantity":0,"unit_price":1}
            ]}"#,
        )
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            vec!["items[1].quantity: Quantity must be at least 1".to_string()]
        );
    }
}
