//! Dedicated codec for the tour section.
//!
//! Tour lists need a richer terminal policy than the generic container
//! protocol: every `-1` token closes a tour, a run of trailing terminals
//! collapses, and an entirely empty body is a valid zero-tour section.
//! This transformer works on the whitespace token stream directly.

use crate::error::CodecError;
use crate::transform::Transform;
use crate::value::Value;

/// The reserved tour terminator token.
const TERMINAL: &str = "-1";

/// Codec for a newline/whitespace mix of `-1`-terminated tours.
#[derive(Clone, Debug)]
pub struct ToursTransform {
    /// Whether the (non-empty) body must end in a terminal token.
    pub require_terminal: bool,
}

impl ToursTransform {
    /// A tours codec with a mandatory trailing terminal.
    pub fn new() -> Self {
        Self {
            require_terminal: true,
        }
    }
}

impl Default for ToursTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for ToursTransform {
    fn parse(&self, text: &str) -> Result<Value, CodecError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Value::empty_list());
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        if self.require_terminal {
            let last = tokens.last().copied().unwrap_or("<empty>");
            if last != TERMINAL {
                return Err(CodecError::parsing(format!(
                    "tour list must end with terminal '{TERMINAL}', found '{last}'"
                )));
            }
        }

        let mut tours = Vec::new();
        let mut current = Vec::new();
        for token in tokens {
            if token == TERMINAL {
                if !current.is_empty() {
                    tours.push(Value::List(std::mem::take(&mut current)));
                }
            } else {
                let index: i64 = token.parse().map_err(|_| {
                    CodecError::parsing(format!("invalid tour index '{token}'"))
                })?;
                current.push(Value::Int(index));
            }
        }
        if !current.is_empty() {
            tours.push(Value::List(current));
        }
        Ok(Value::List(tours))
    }

    fn render(&self, value: &Value) -> Result<String, CodecError> {
        let tours = value.as_list().ok_or_else(|| {
            CodecError::rendering(format!("expected a list of tours, got a {}", value.type_name()))
        })?;
        let mut lines = Vec::with_capacity(tours.len() + 1);
        for tour in tours {
            let indices = tour.as_list().ok_or_else(|| {
                CodecError::rendering(format!("expected a tour, got a {}", tour.type_name()))
            })?;
            if indices.is_empty() {
                continue;
            }
            let mut line = String::new();
            for index in indices {
                let i = index.as_int().ok_or_else(|| {
                    CodecError::rendering(format!(
                        "tour indices must be integers, got a {}",
                        index.type_name()
                    ))
                })?;
                line.push_str(&i.to_string());
                line.push(' ');
            }
            line.push_str(TERMINAL);
            lines.push(line);
        }
        if lines.is_empty() {
            return Ok(String::new());
        }
        lines.push(TERMINAL.to_owned());
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tours(value: &Value) -> Vec<Vec<i64>> {
        value
            .as_list()
            .unwrap()
            .iter()
            .map(|t| {
                t.as_list()
                    .unwrap()
                    .iter()
                    .map(|i| i.as_int().unwrap())
                    .collect()
            })
            .collect()
    }

    fn value(input: &[&[i64]]) -> Value {
        Value::List(
            input
                .iter()
                .map(|t| Value::List(t.iter().copied().map(Value::Int).collect()))
                .collect(),
        )
    }

    #[test]
    fn empty_and_terminal_only_bodies_are_zero_tours() {
        let tf = ToursTransform::new();
        for text in ["", "-1", "-1 -1", "-1 -1 -1"] {
            assert_eq!(tours(&tf.parse(text).unwrap()), Vec::<Vec<i64>>::new());
        }
    }

    #[test]
    fn parse_with_terminal_required() {
        let tf = ToursTransform::new();
        assert_eq!(tours(&tf.parse("7 8 9 -1").unwrap()), vec![vec![7, 8, 9]]);
        assert_eq!(tours(&tf.parse("7 8 9 -1 -1").unwrap()), vec![vec![7, 8, 9]]);
        assert_eq!(
            tours(&tf.parse("7 8 9 -1 7 8 9 -1").unwrap()),
            vec![vec![7, 8, 9], vec![7, 8, 9]]
        );
    }

    #[test]
    fn missing_terminal_fails_naming_trailing_token() {
        let tf = ToursTransform::new();
        for text in ["7 8 9", "7 8 9 -1 7 8 9"] {
            let err = tf.parse(text).unwrap_err();
            assert!(err.detail().contains("'9'"), "{err}");
        }
    }

    #[test]
    fn parse_without_terminal_requirement() {
        let tf = ToursTransform {
            require_terminal: false,
        };
        assert_eq!(tours(&tf.parse("7 8 9").unwrap()), vec![vec![7, 8, 9]]);
        assert_eq!(
            tours(&tf.parse("7 8 9 -1 7 8 9").unwrap()),
            vec![vec![7, 8, 9], vec![7, 8, 9]]
        );
    }

    #[test]
    fn bad_index_names_the_token() {
        let tf = ToursTransform::new();
        let err = tf.parse("7 a 9 -1 -1").unwrap_err();
        assert!(err.detail().contains("'a'"));
    }

    #[test]
    fn render_layout() {
        let tf = ToursTransform::new();
        assert_eq!(tf.render(&value(&[])).unwrap(), "");
        assert_eq!(tf.render(&value(&[&[]])).unwrap(), "");
        assert_eq!(tf.render(&value(&[&[7, 8, 9]])).unwrap(), "7 8 9 -1\n-1");
        assert_eq!(
            tf.render(&value(&[&[7, 8, 9], &[7, 8, 9]])).unwrap(),
            "7 8 9 -1\n7 8 9 -1\n-1"
        );
    }

    #[test]
    fn canonical_text_round_trips() {
        let tf = ToursTransform::new();
        let text = "7 8 9 -1\n1 2 3 -1\n-1";
        let parsed = tf.parse(text).unwrap();
        assert_eq!(tf.render(&parsed).unwrap(), text);
    }
}
