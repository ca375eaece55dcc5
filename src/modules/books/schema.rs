//! Declarative payload validation for book requests.
//!
//! Every violation is reported, not just the first one, as
//! `{"field": ..., "error": ...}` details for the 400 response.

use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// JSON integer that fits in `i32`; floats and numeric strings are rejected
    Integer,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    fn check(&self, value: &Value) -> Option<&'static str> {
        match self.kind {
            FieldKind::Text if !value.is_string() => Some("must be a string"),
            FieldKind::Integer
                if value
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .is_none() =>
            {
                Some("must be an integer")
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
    /// Fields that must not appear at all
    pub forbidden: &'static [&'static str],
}

pub const CREATE_BOOK: Schema = Schema {
    fields: &[
        FieldRule::required("isbn", FieldKind::Text),
        FieldRule::required("amazon_url", FieldKind::Text),
        FieldRule::required("author", FieldKind::Text),
        FieldRule::required("language", FieldKind::Text),
        FieldRule::required("pages", FieldKind::Integer),
        FieldRule::required("publisher", FieldKind::Text),
        FieldRule::required("title", FieldKind::Text),
        FieldRule::required("year", FieldKind::Integer),
    ],
    forbidden: &[],
};

pub const UPDATE_BOOK: Schema = Schema {
    fields: &[
        FieldRule::optional("amazon_url", FieldKind::Text),
        FieldRule::optional("author", FieldKind::Text),
        FieldRule::optional("language", FieldKind::Text),
        FieldRule::optional("pages", FieldKind::Integer),
        FieldRule::optional("publisher", FieldKind::Text),
        FieldRule::optional("title", FieldKind::Text),
        FieldRule::optional("year", FieldKind::Integer),
    ],
    forbidden: &["isbn"],
};

impl Schema {
    pub fn validate(&self, payload: &Value) -> Result<(), Vec<Value>> {
        let Some(object) = payload.as_object() else {
            return Err(vec![
                json!({"field": Value::Null, "error": "body must be a JSON object"}),
            ]);
        };

        let mut details = Vec::new();
        self.check_keys(object, &mut details);

        for rule in self.fields {
            match object.get(rule.name) {
                None if rule.required => details.push(violation(rule.name, "required")),
                None => {}
                Some(value) => {
                    if let Some(error) = rule.check(value) {
                        details.push(violation(rule.name, error));
                    }
                }
            }
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(details)
        }
    }

    fn check_keys(&self, object: &Map<String, Value>, details: &mut Vec<Value>) {
        for key in object.keys() {
            if self.forbidden.contains(&key.as_str()) {
                details.push(violation(key, "not allowed"));
            } else if !self.fields.iter().any(|rule| rule.name == key.as_str()) {
                details.push(violation(key, "unknown field"));
            }
        }
    }
}

fn violation(field: &str, error: &str) -> Value {
    json!({"field": field, "error": error})
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namesake() -> Value {
        json!({
            "isbn": "0395927218",
            "amazon_url": "https://amazon.com/namesake",
            "author": "Jhumpa Lahiri",
            "language": "english",
            "pages": 291,
            "publisher": "Houghton Mifflin",
            "title": "Namesake",
            "year": 2003
        })
    }

    fn fields_with(details: &[Value], error: &str) -> Vec<String> {
        details
            .iter()
            .filter(|d| d["error"] == error)
            .map(|d| d["field"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn complete_book_passes_create() {
        assert!(CREATE_BOOK.validate(&namesake()).is_ok());
    }

    #[test]
    fn empty_body_reports_every_required_field() {
        let details = CREATE_BOOK.validate(&json!({})).unwrap_err();
        assert_eq!(
            fields_with(&details, "required"),
            vec![
                "isbn",
                "amazon_url",
                "author",
                "language",
                "pages",
                "publisher",
                "title",
                "year"
            ]
        );
    }

    #[test]
    fn missing_title_and_year_are_reported() {
        let mut book = namesake();
        let object = book.as_object_mut().unwrap();
        object.remove("title");
        object.remove("year");

        let details = CREATE_BOOK.validate(&book).unwrap_err();
        assert_eq!(fields_with(&details, "required"), vec!["title", "year"]);
    }

    #[test]
    fn integers_are_strict() {
        for bad in [json!("291"), json!(291.5), json!(null), json!(i64::MAX)] {
            let mut book = namesake();
            book["pages"] = bad.clone();
            let details = CREATE_BOOK.validate(&book).unwrap_err();
            assert_eq!(
                fields_with(&details, "must be an integer"),
                vec!["pages"],
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn text_fields_reject_numbers() {
        let mut book = namesake();
        book["isbn"] = json!(395927218);
        let details = CREATE_BOOK.validate(&book).unwrap_err();
        assert_eq!(fields_with(&details, "must be a string"), vec!["isbn"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut book = namesake();
        book["rating"] = json!(5);
        let details = CREATE_BOOK.validate(&book).unwrap_err();
        assert_eq!(fields_with(&details, "unknown field"), vec!["rating"]);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let details = CREATE_BOOK.validate(&json!([namesake()])).unwrap_err();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0]["error"], "body must be a JSON object");
    }

    #[test]
    fn update_allows_partial_payloads() {
        assert!(UPDATE_BOOK.validate(&json!({})).is_ok());
        assert!(UPDATE_BOOK
            .validate(&json!({"title": "Updated book title", "year": 2017}))
            .is_ok());
    }

    #[test]
    fn update_forbids_isbn() {
        let details = UPDATE_BOOK
            .validate(&json!({"isbn": "0691161518", "author": "Matthew Lane"}))
            .unwrap_err();
        assert_eq!(fields_with(&details, "not allowed"), vec!["isbn"]);
    }

    #[test]
    fn update_still_type_checks() {
        let details = UPDATE_BOOK
            .validate(&json!({"year": "2017", "title": 12}))
            .unwrap_err();
        assert_eq!(fields_with(&details, "must be an integer"), vec!["year"]);
        assert_eq!(fields_with(&details, "must be a string"), vec!["title"]);
    }
}
