//! Container transformers: lists and key/value maps.
//!
//! Both share the same body machinery: trim, strip an optional terminal
//! token, split through a [`BiSep`], reject stray terminals, parse each
//! fragment with the child transformer while collecting per-index
//! failures, and check an optional exact item count. Rendering is the
//! mirror image with the terminal appended before the final join.

use crate::bisep::BiSep;
use crate::error::CodecError;
use crate::transform::Transform;
use crate::value::{MapKey, Value};
use indexmap::IndexMap;

/// How many per-item failures a container reports verbatim before
/// summarizing the rest as `+N more`.
const MAX_REPORTED_FAILURES: usize = 3;

/// Construction-time configuration shared by container transformers.
#[derive(Clone, Debug)]
pub struct ContainerConfig {
    /// Item separator.
    pub sep: BiSep,
    /// Optional end-of-section token (`-1` in most section kinds).
    pub terminal: Option<String>,
    /// Whether a configured terminal must be present when parsing.
    pub terminal_required: bool,
    /// Optional exact item count.
    pub size: Option<usize>,
    /// Whether empty fragments are dropped after splitting.
    pub filter_empty: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            sep: BiSep::whitespace(),
            terminal: None,
            terminal_required: true,
            size: None,
            filter_empty: true,
        }
    }
}

/// Split a section body into item fragments per the container protocol.
///
/// Covers trimming, terminal stripping, separator splitting, empty
/// filtering, and the stray-terminal check. Item parsing and the size
/// check happen in the callers so failures can name the child codec.
fn split_body(text: &str, config: &ContainerConfig) -> Result<Vec<String>, CodecError> {
    let mut text = text.trim();

    if let Some(terminal) = &config.terminal {
        match text.strip_suffix(terminal.as_str()) {
            Some(stripped) => text = stripped.trim_end(),
            None if config.terminal_required => {
                let found = text.split_whitespace().last().unwrap_or("<empty>");
                return Err(CodecError::parsing(format!(
                    "must end with terminal '{terminal}', found '{found}'"
                )));
            }
            None => {}
        }
    }

    let mut items = config.sep.split(text, None);
    if config.filter_empty {
        items.retain(|item| !item.is_empty());
    }

    if let Some(terminal) = &config.terminal {
        if let Some(pos) = items.iter().position(|item| item.trim() == terminal) {
            let extra: Vec<&str> = items[pos + 1..].iter().map(|s| s.trim()).collect();
            return Err(CodecError::parsing(format!(
                "terminal '{terminal}' appears before the last item; found {extra:?} after it"
            )));
        }
    }

    Ok(items)
}

/// Parse every fragment, collecting failures instead of short-circuiting.
fn parse_items<T>(
    items: &[String],
    mut parse_one: impl FnMut(&str) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    let mut parsed = Vec::with_capacity(items.len());
    let mut failures: Vec<String> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match parse_one(item) {
            Ok(value) => parsed.push(value),
            Err(e) => failures.push(format!("item {index}: {e}")),
        }
    }
    if failures.is_empty() {
        return Ok(parsed);
    }
    let total = failures.len();
    let mut summary = failures[..total.min(MAX_REPORTED_FAILURES)].join("; ");
    if total > MAX_REPORTED_FAILURES {
        summary.push_str(&format!("; +{} more", total - MAX_REPORTED_FAILURES));
    }
    Err(CodecError::parsing(format!(
        "{total} item(s) failed to parse: {summary}"
    )))
}

fn check_size(count: usize, config: &ContainerConfig) -> Result<(), CodecError> {
    if let Some(size) = config.size {
        if count != size {
            return Err(CodecError::parsing(format!(
                "expected {size} items, found {count}"
            )));
        }
    }
    Ok(())
}

fn join_rendered(mut rendered: Vec<String>, config: &ContainerConfig) -> String {
    if let Some(terminal) = &config.terminal {
        rendered.push(terminal.clone());
    }
    config.sep.join(rendered)
}

/// A homogeneous ordered sequence.
pub struct ListTransform {
    child: Box<dyn Transform>,
    config: ContainerConfig,
}

impl ListTransform {
    /// Build a list codec over the given child transformer.
    pub fn new(child: Box<dyn Transform>, config: ContainerConfig) -> Self {
        Self { child, config }
    }
}

impl Transform for ListTransform {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        let items = split_body(text, &self.config)?;
        let parsed = parse_items(&items, |item| self.child.parse(item))?;
        check_size(parsed.len(), &self.config)?;
        Ok(Value::List(parsed))
    }

    fn render(&self, value: &Value) -> Result<String, CodecError> {
        let items = value.as_list().ok_or_else(|| {
            CodecError::rendering(format!("expected a list, got a {}", value.type_name()))
        })?;
        let mut rendered = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let text = self
                .child
                .render(item)
                .map_err(|e| e.amend(format!("item {index}")))?;
            rendered.push(text);
        }
        Ok(join_rendered(rendered, &self.config))
    }

    fn validate(&self, value: &Value) -> Result<(), CodecError> {
        let items = value.as_list().ok_or_else(|| {
            CodecError::validation(format!("expected a list, got a {}", value.type_name()))
        })?;
        for item in items {
            self.child.validate(item)?;
        }
        Ok(())
    }
}

/// An insertion-ordered key/value mapping.
///
/// Each item fragment is split once more on the key/value separator;
/// later duplicate keys overwrite earlier ones in place.
pub struct MapTransform {
    key: Box<dyn Transform>,
    child: Box<dyn Transform>,
    kv_sep: BiSep,
    config: ContainerConfig,
}

impl MapTransform {
    /// Build a map codec with the given key and value transformers.
    pub fn new(
        key: Box<dyn Transform>,
        child: Box<dyn Transform>,
        kv_sep: BiSep,
        config: ContainerConfig,
    ) -> Self {
        Self {
            key,
            child,
            kv_sep,
            config,
        }
    }

    fn parse_item(&self, text: &str) -> Result<(MapKey, Value), CodecError> {
        let parts = self.kv_sep.split(text, Some(1));
        if parts.len() != 2 {
            return Err(CodecError::parsing(format!(
                "expected key-value pair, got '{}'",
                text.trim()
            )));
        }
        let key = match self.key.parse(&parts[0])? {
            Value::Int(i) => MapKey::Int(i),
            Value::Text(s) => MapKey::Text(s),
            other => {
                return Err(CodecError::parsing(format!(
                    "map key must be an integer or text, got a {}",
                    other.type_name()
                )))
            }
        };
        let value = self.child.parse(&parts[1])?;
        Ok((key, value))
    }
}

impl Transform for MapTransform {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        let items = split_body(text, &self.config)?;
        let pairs = parse_items(&items, |item| self.parse_item(item))?;
        check_size(pairs.len(), &self.config)?;
        let mut map = IndexMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn render(&self, value: &Value) -> Result<String, CodecError> {
        let map = value.as_map().ok_or_else(|| {
            CodecError::rendering(format!("expected a map, got a {}", value.type_name()))
        })?;
        let mut rendered = Vec::with_capacity(map.len());
        for (key, item) in map {
            let key_text = self.key.render(&key.to_value())?;
            let item_text = self
                .child
                .render(item)
                .map_err(|e| e.amend(format!("key {key}")))?;
            rendered.push(self.kv_sep.join([key_text, item_text]));
        }
        Ok(join_rendered(rendered, &self.config))
    }

    fn validate(&self, value: &Value) -> Result<(), CodecError> {
        let map = value.as_map().ok_or_else(|| {
            CodecError::validation(format!("expected a map, got a {}", value.type_name()))
        })?;
        for item in map.values() {
            self.child.validate(item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{FuncTransform, NumberTransform};

    fn int_list(config: ContainerConfig) -> ListTransform {
        ListTransform::new(Box::new(FuncTransform::int()), config)
    }

    fn text_list(config: ContainerConfig) -> ListTransform {
        ListTransform::new(Box::new(FuncTransform::text()), config)
    }

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().copied().map(Value::Int).collect())
    }

    // ── Body splitting ──────────────────────────────────────────

    #[test]
    fn split_on_literal_separator() {
        let tf = text_list(ContainerConfig {
            sep: BiSep::symmetric(":"),
            ..Default::default()
        });
        assert_eq!(
            tf.parse("a b:c-d:--:e").unwrap(),
            Value::List(vec![
                "a b".into(),
                "c-d".into(),
                "--".into(),
                "e".into()
            ])
        );
    }

    #[test]
    fn empty_fragments_kept_when_configured() {
        let tf = text_list(ContainerConfig {
            sep: BiSep::symmetric("-"),
            filter_empty: false,
            ..Default::default()
        });
        assert_eq!(
            tf.parse("a b:c-d:-:e").unwrap(),
            Value::List(vec!["a b:c".into(), "d:".into(), "".into(), ":e".into()])
        );
    }

    #[test]
    fn terminal_stripped_before_split() {
        let tf = int_list(ContainerConfig {
            terminal: Some("-1".into()),
            ..Default::default()
        });
        assert_eq!(tf.parse("4 5 6 -1").unwrap(), ints(&[4, 5, 6]));
    }

    #[test]
    fn missing_required_terminal_names_trailing_token() {
        let tf = int_list(ContainerConfig {
            terminal: Some("-1".into()),
            ..Default::default()
        });
        let err = tf.parse("4 5 6").unwrap_err();
        assert!(err.detail().contains("-1"));
        assert!(err.detail().contains("'6'"));
    }

    #[test]
    fn optional_terminal_may_be_absent() {
        let tf = int_list(ContainerConfig {
            terminal: Some("-1".into()),
            terminal_required: false,
            ..Default::default()
        });
        assert_eq!(tf.parse("4 5 6").unwrap(), ints(&[4, 5, 6]));
        assert_eq!(tf.parse("4 5 6 -1").unwrap(), ints(&[4, 5, 6]));
    }

    #[test]
    fn terminal_before_last_item_reports_extras() {
        let tf = text_list(ContainerConfig {
            terminal: Some("-1".into()),
            ..Default::default()
        });
        let err = tf.parse("a -1 b -1").unwrap_err();
        assert!(err.detail().contains("before the last item"));
        assert!(err.detail().contains("\"b\""));
    }

    #[test]
    fn token_merely_starting_with_terminal_is_an_item() {
        let tf = text_list(ContainerConfig {
            terminal: Some("-1".into()),
            ..Default::default()
        });
        assert_eq!(
            tf.parse("a -1b -1").unwrap(),
            Value::List(vec!["a".into(), "-1b".into()])
        );
    }

    // ── Item parsing ────────────────────────────────────────────

    #[test]
    fn failures_collected_across_items() {
        let tf = int_list(ContainerConfig::default());
        let err = tf.parse("1 x 3 y z q").unwrap_err();
        assert!(err.detail().starts_with("4 item(s) failed"));
        assert!(err.detail().contains("item 1"));
        assert!(err.detail().contains("+1 more"));
    }

    #[test]
    fn wrong_size_names_both_counts() {
        let tf = int_list(ContainerConfig {
            size: Some(3),
            ..Default::default()
        });
        let err = tf.parse("1 2").unwrap_err();
        assert!(err.detail().contains("expected 3 items, found 2"));
    }

    // ── Rendering ───────────────────────────────────────────────

    #[test]
    fn render_appends_terminal() {
        let tf = int_list(ContainerConfig {
            terminal: Some("-1".into()),
            ..Default::default()
        });
        assert_eq!(tf.render(&ints(&[4, 5, 6])).unwrap(), "4 5 6 -1");
    }

    #[test]
    fn render_without_terminal() {
        let tf = int_list(ContainerConfig::default());
        assert_eq!(tf.render(&ints(&[4, 5, 6])).unwrap(), "4 5 6");
    }

    // ── Maps ────────────────────────────────────────────────────

    fn demand_map() -> MapTransform {
        MapTransform::new(
            Box::new(FuncTransform::int()),
            Box::new(FuncTransform::int()),
            BiSep::whitespace(),
            ContainerConfig {
                sep: BiSep::symmetric("\n"),
                terminal: Some("-1".into()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn map_parses_ordered_pairs() {
        let tf = demand_map();
        let value = tf.parse("1 17\n2 5\n-1").unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map[&MapKey::Int(1)], Value::Int(17));
        assert_eq!(map[&MapKey::Int(2)], Value::Int(5));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![MapKey::Int(1), MapKey::Int(2)]);
    }

    #[test]
    fn map_item_without_separator_fails() {
        let tf = demand_map();
        let err = tf.parse("1\n-1").unwrap_err();
        assert!(err.detail().contains("key-value pair"));
    }

    #[test]
    fn map_duplicate_keys_overwrite() {
        let tf = demand_map();
        let value = tf.parse("1 17\n1 9\n-1").unwrap();
        assert_eq!(value.as_map().unwrap()[&MapKey::Int(1)], Value::Int(9));
    }

    #[test]
    fn map_renders_in_iteration_order() {
        let tf = demand_map();
        let value = tf.parse("2 5\n1 17\n-1").unwrap();
        assert_eq!(tf.render(&value).unwrap(), "2 5\n1 17\n-1");
    }

    #[test]
    fn coordinate_map_round_trips() {
        let tf = MapTransform::new(
            Box::new(FuncTransform::int()),
            Box::new(ListTransform::new(
                Box::new(NumberTransform),
                ContainerConfig::default(),
            )),
            BiSep::whitespace(),
            ContainerConfig {
                sep: BiSep::symmetric("\n"),
                ..Default::default()
            },
        );
        let text = "1 16.47 96.1\n2 16.47 94.44";
        let value = tf.parse(text).unwrap();
        assert_eq!(tf.render(&value).unwrap(), text);
    }
}
