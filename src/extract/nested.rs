use serde_json::Value;

static NULL: Value = Value::Null;

/// Get-or-default access into an untyped match document. Every step
/// resolves to `Null` (or an empty slice) when the level is missing or has
/// an unexpected shape, so a chain never fails part way.
pub trait Nested {
    fn at(&self, key: &str) -> &Value;
    fn idx(&self, i: usize) -> &Value;
    fn items(&self) -> &[Value];

    fn i64_val(&self) -> Option<i64>;
    fn f64_val(&self) -> Option<f64>;
    fn str_val(&self) -> Option<String>;
    fn bool_val(&self) -> Option<bool>;

    /// Any present value as text; numbers and strings end up alike.
    fn text(&self) -> Option<String>;
}

impl Nested for Value {
    fn at(&self, key: &str) -> &Value {
        self.as_object()
            .and_then(|o| o.get(key))
            .unwrap_or(&NULL)
    }

    fn idx(&self, i: usize) -> &Value {
        self.as_array()
            .and_then(|a| a.get(i))
            .unwrap_or(&NULL)
    }

    fn items(&self) -> &[Value] {
        self.as_array()
            .map(|a| a.as_slice())
            .unwrap_or(&[])
    }

    fn i64_val(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn f64_val(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn str_val(&self) -> Option<String> {
        self.as_str().map(|s| s.to_string())
    }

    fn bool_val(&self) -> Option<bool> {
        self.as_bool()
    }

    fn text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_levels_resolve_to_null() {
        let doc = json!({ "content": { "lineup": 5 } });
        assert!(doc.at("content").at("lineup").at("homeTeam").at("starters").is_null());
        assert!(doc.at("nope").idx(3).at("x").is_null());
        assert!(doc.at("content").at("lineup").items().is_empty());
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        assert_eq!(json!("4506312").i64_val(), Some(4506312));
        assert_eq!(json!(8633).i64_val(), Some(8633));
        assert_eq!(json!(90.0).i64_val(), Some(90));
        assert_eq!(json!(90.5).i64_val(), None);
        assert_eq!(json!("7.4").f64_val(), Some(7.4));
        assert_eq!(json!({}).i64_val(), None);
    }

    #[test]
    fn text_is_uniform_across_types() {
        assert_eq!(json!(12).text().as_deref(), Some("12"));
        assert_eq!(json!(0.55).text().as_deref(), Some("0.55"));
        assert_eq!(json!("55%").text().as_deref(), Some("55%"));
        assert_eq!(json!(true).text().as_deref(), Some("true"));
        assert_eq!(Value::Null.text(), None);
    }

    #[test]
    fn str_val_is_strict() {
        assert_eq!(json!("Real Madrid").str_val().as_deref(), Some("Real Madrid"));
        assert_eq!(json!(1).str_val(), None);
    }
}
