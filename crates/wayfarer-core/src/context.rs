//! Execution context and placeholder resolution
//!
//! Step arguments may embed `<dotted.path>` placeholders referring to a
//! prior step's output, rooted at either a tool name or a positional
//! `step<i>` alias. The context is keyed by a typed [`ContextKey`] and
//! lookups return an explicit found/not-found result.
//!
//! Unresolved placeholders are left as literal text. This is deliberate: an
//! unresolved reference still counts as a "present" argument and surfaces
//! downstream as a missing-argument or tool error, never as a resolver
//! error.

use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Placeholder syntax: `<` + word-character segments joined by `.` + `>`
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(\w+(?:\.\w+)*)>").expect("placeholder regex is valid"));

/// Root key of a context entry: a tool name or a positional step alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextKey {
    /// Most recent output of the named tool (last-write-wins)
    Tool(String),
    /// Output of the step at this index (unique, never overwritten)
    Step(usize),
}

impl ContextKey {
    /// Parse a placeholder root segment. `step<i>` maps to the positional
    /// key, anything else is a tool name.
    #[must_use]
    pub fn parse(segment: &str) -> Self {
        if let Some(index) = segment.strip_prefix("step") {
            if let Ok(index) = index.parse::<usize>() {
                return Self::Step(index);
            }
        }
        Self::Tool(segment.to_string())
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tool(name) => write!(f, "{}", name),
            Self::Step(index) => write!(f, "step{}", index),
        }
    }
}

/// Accumulated outputs of prior steps, scoped to one plan execution.
///
/// Grows monotonically: every successful step records its output under the
/// tool-name key and the positional key. Never shared across requests.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    entries: HashMap<ContextKey, Value>,
}

impl ExecutionContext {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single entry
    pub fn insert(&mut self, key: ContextKey, value: Value) {
        self.entries.insert(key, value);
    }

    /// Record a successful step's output under both its tool name and its
    /// positional alias
    pub fn record(&mut self, tool: &str, index: usize, output: Value) {
        self.insert(ContextKey::Tool(tool.to_string()), output.clone());
        self.insert(ContextKey::Step(index), output);
    }

    /// Walk a field path below the given root key.
    ///
    /// Returns `None` if the root is absent, any path segment is missing or
    /// not traversable, or the value reached is JSON `null` (a null output
    /// field counts as not-found, matching the silent-resolution policy).
    #[must_use]
    pub fn lookup(&self, key: &ContextKey, path: &[&str]) -> Option<&Value> {
        let mut value = self.entries.get(key)?;
        for segment in path {
            value = value.as_object()?.get(*segment)?;
        }
        if value.is_null() {
            None
        } else {
            Some(value)
        }
    }

    /// Whether the context has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve every placeholder in a single argument value.
///
/// Strings are scanned for placeholders; lists and mappings recurse into
/// every element; other scalars pass through unchanged. A placeholder whose
/// path does not resolve stays in the output as literal text.
#[must_use]
pub fn resolve_value(value: &Value, context: &ExecutionContext) -> Value {
    match value {
        Value::String(s) => Value::String(resolve_str(s, context)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, context))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve_value(v, context)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Resolve every value of a step's argument mapping
#[must_use]
pub fn resolve_args(args: &Map<String, Value>, context: &ExecutionContext) -> Map<String, Value> {
    args.iter()
        .map(|(name, value)| (name.clone(), resolve_value(value, context)))
        .collect()
}

fn resolve_str(input: &str, context: &ExecutionContext) -> String {
    PLACEHOLDER
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let segments: Vec<&str> = caps[1].split('.').collect();
            let key = ContextKey::parse(segments[0]);
            match context.lookup(&key, &segments[1..]) {
                Some(value) => render(value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// String form substituted for a resolved placeholder: strings verbatim,
/// everything else in canonical JSON text.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context_with(tool: &str, output: Value) -> ExecutionContext {
        let mut context = ExecutionContext::new();
        context.record(tool, 0, output);
        context
    }

    #[test]
    fn test_context_key_parse() {
        assert_eq!(ContextKey::parse("get_route_day"), ContextKey::Tool("get_route_day".into()));
        assert_eq!(ContextKey::parse("step3"), ContextKey::Step(3));
        // Not a positional alias: no index after the prefix
        assert_eq!(ContextKey::parse("steps"), ContextKey::Tool("steps".into()));
    }

    #[test]
    fn test_resolve_simple_placeholder() {
        let context = context_with("get_route_day", json!({"end": "Utrecht"}));
        let resolved = resolve_value(&json!("<get_route_day.end>"), &context);
        assert_eq!(resolved, json!("Utrecht"));
    }

    #[test]
    fn test_unresolved_placeholder_stays_literal() {
        let context = context_with("get_route_day", json!({"end": "Utrecht"}));
        let resolved = resolve_value(&json!("<get_route_day.missing>"), &context);
        assert_eq!(resolved, json!("<get_route_day.missing>"));
    }

    #[test]
    fn test_resolution_idempotent_without_placeholders() {
        let context = context_with("get_route_day", json!({"end": "Utrecht"}));
        let input = json!("plain text with < and > but no reference");
        assert_eq!(resolve_value(&input, &context), input);
    }

    #[test]
    fn test_resolve_step_alias() {
        let context = context_with("get_route_day", json!({"end": "Utrecht"}));
        let resolved = resolve_value(&json!("<step0.end>"), &context);
        assert_eq!(resolved, json!("Utrecht"));
    }

    #[test]
    fn test_resolve_mixed_literal_text_and_multiple_placeholders() {
        let mut context = ExecutionContext::new();
        context.record("get_route_day", 0, json!({"start": "Groningen", "end": "Zwolle"}));

        let resolved = resolve_value(
            &json!("from <get_route_day.start> to <get_route_day.end>"),
            &context,
        );
        assert_eq!(resolved, json!("from Groningen to Zwolle"));
    }

    #[test]
    fn test_resolve_stringifies_scalars_and_structures() {
        let context = context_with(
            "get_route_day",
            json!({"distance": 70, "scenic": true, "waypoints": ["a", "b"]}),
        );

        assert_eq!(
            resolve_value(&json!("<get_route_day.distance> km"), &context),
            json!("70 km")
        );
        assert_eq!(
            resolve_value(&json!("<get_route_day.scenic>"), &context),
            json!("true")
        );
        assert_eq!(
            resolve_value(&json!("<get_route_day.waypoints>"), &context),
            json!(r#"["a","b"]"#)
        );
    }

    #[test]
    fn test_resolve_recurses_into_lists_and_objects() {
        let context = context_with("get_route_day", json!({"end": "Utrecht"}));

        let input = json!({
            "locations": ["<get_route_day.end>", "Amsterdam"],
            "nested": {"place": "<get_route_day.end>"},
            "count": 2
        });
        let resolved = resolve_value(&input, &context);

        assert_eq!(resolved["locations"][0], "Utrecht");
        assert_eq!(resolved["locations"][1], "Amsterdam");
        assert_eq!(resolved["nested"]["place"], "Utrecht");
        assert_eq!(resolved["count"], 2);
    }

    #[test]
    fn test_resolve_deep_path() {
        let context = context_with("get_weather_forecast", json!({"today": {"condition": "sunny"}}));
        let resolved = resolve_value(&json!("<get_weather_forecast.today.condition>"), &context);
        assert_eq!(resolved, json!("sunny"));
    }

    #[test]
    fn test_null_output_field_counts_as_not_found() {
        let context = context_with("get_route_day", json!({"end": null}));
        let resolved = resolve_value(&json!("<get_route_day.end>"), &context);
        assert_eq!(resolved, json!("<get_route_day.end>"));
    }

    #[test]
    fn test_path_through_non_object_counts_as_not_found() {
        let context = context_with("get_route_day", json!({"end": "Utrecht"}));
        let resolved = resolve_value(&json!("<get_route_day.end.postcode>"), &context);
        assert_eq!(resolved, json!("<get_route_day.end.postcode>"));
    }

    #[test]
    fn test_non_string_scalars_pass_through() {
        let context = ExecutionContext::new();
        assert_eq!(resolve_value(&json!(70), &context), json!(70));
        assert_eq!(resolve_value(&json!(true), &context), json!(true));
        assert_eq!(resolve_value(&json!(null), &context), json!(null));
    }

    #[test]
    fn test_resolve_args_resolves_every_value() {
        let context = context_with("get_route_day", json!({"end": "Utrecht"}));
        let mut args = Map::new();
        args.insert("location".to_string(), json!("<get_route_day.end>"));
        args.insert("days".to_string(), json!(3));

        let resolved = resolve_args(&args, &context);
        assert_eq!(resolved["location"], "Utrecht");
        assert_eq!(resolved["days"], 3);
    }
}
