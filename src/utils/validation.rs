use validator::{Validate, ValidationError, ValidationErrors};

/// Runs the derived validators and flattens any failures into readable
/// messages, ordered by `fields`.
pub fn validate_payload<T: Validate>(payload: &T, fields: &[&str]) -> Result<(), Vec<String>> {
    payload.validate()
        .map_err(|err| collect_messages(&err, fields))
}

pub fn collect_messages(errors: &ValidationErrors, fields: &[&str]) -> Vec<String> {
    let field_errors = errors.field_errors();
    let mut messages: Vec<String> = fields.iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errs| errs.iter())
        .map(message_of)
        .collect();

    // Anything not listed goes last, sorted so the output stays stable.
    let mut rest: Vec<_> = field_errors.iter()
        .filter(|(field, _)| !fields.contains(*field))
        .collect();
    rest.sort_by_key(|(field, _)| **field);
    for (_, errs) in rest {
        messages.extend(errs.iter().map(message_of));
    }

    messages
}

fn message_of(err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => format!("{} is invalid", err.code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_code_when_message_missing() {
        let mut errors = ValidationErrors::new();
        errors.add("age", ValidationError::new("range"));
        assert_eq!(collect_messages(&errors, &["age"]), vec!["range is invalid"]);
    }

    #[test]
    fn unlisted_fields_are_kept() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("nickname too short".into());
        errors.add("nickname", err);
        assert_eq!(collect_messages(&errors, &["age"]), vec!["nickname too short"]);
    }
}
