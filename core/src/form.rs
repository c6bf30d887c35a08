//! `application/x-www-form-urlencoded` bodies for the POST endpoints.

/// Ordered set of form fields.
///
/// Fields are encoded sorted by key so the same input always produces the
/// same body. Values are percent-encoded; keys are fixed ASCII names.
#[derive(Debug, Default, Clone)]
pub struct FormBody {
    fields: Vec<(&'static str, String)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    pub fn optional_field(self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    pub fn encode(&self) -> String {
        let mut fields: Vec<&(&'static str, String)> = self.fields.iter().collect();
        fields.sort_by_key(|(k, _)| *k);
        fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_sorted_by_key() {
        let form = FormBody::new()
            .field("to_ids", "1")
            .field("body", "hi")
            .field("limit", "0");
        assert_eq!(form.encode(), "body=hi&limit=0&to_ids=1");
    }

    #[test]
    fn values_are_percent_encoded() {
        let form = FormBody::new().field("body", "a b&c=d\nこんにちは");
        assert_eq!(
            form.encode(),
            "body=a%20b%26c%3Dd%0A%E3%81%93%E3%82%93%E3%81%AB%E3%81%A1%E3%81%AF"
        );
    }

    #[test]
    fn optional_field_skipped_when_none() {
        let form = FormBody::new()
            .field("body", "x")
            .optional_field("limit", None::<String>);
        assert_eq!(form.encode(), "body=x");
    }

    #[test]
    fn empty_form_encodes_to_empty_string() {
        assert_eq!(FormBody::new().encode(), "");
    }
}
