//! Asymmetric split/join separator.
//!
//! Every container codec reads and writes through a [`BiSep`]: a split
//! rule applied when parsing and an output token used when rendering.
//! The two directions are deliberately not inverses — parsing is
//! permissive (any whitespace run, any of several alternative tokens)
//! while rendering always emits one canonical token.

/// How input text is broken into fragments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitRule {
    /// Split on any run of whitespace, dropping empty fragments.
    Whitespace,
    /// Split on a literal token, keeping empty fragments.
    Literal(String),
    /// Split on any one of several literal tokens, keeping empty fragments.
    AnyOf(Vec<String>),
}

/// A bidirectional separator: a [`SplitRule`] for parsing and an output
/// token for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiSep {
    rule: SplitRule,
    out: String,
}

impl BiSep {
    /// Whitespace-run splitting, single-space joining.
    pub fn whitespace() -> Self {
        Self {
            rule: SplitRule::Whitespace,
            out: " ".to_owned(),
        }
    }

    /// The same literal token for both directions.
    pub fn symmetric(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            rule: SplitRule::Literal(token.clone()),
            out: token,
        }
    }

    /// A literal input token with a distinct output token.
    pub fn literal(input: impl Into<String>, out: impl Into<String>) -> Self {
        Self {
            rule: SplitRule::Literal(input.into()),
            out: out.into(),
        }
    }

    /// Several alternative input tokens with one output token.
    pub fn any_of(inputs: Vec<String>, out: impl Into<String>) -> Self {
        Self {
            rule: SplitRule::AnyOf(inputs),
            out: out.into(),
        }
    }

    /// The split rule applied when parsing.
    pub fn rule(&self) -> &SplitRule {
        &self.rule
    }

    /// The token emitted when rendering.
    pub fn out(&self) -> &str {
        &self.out
    }

    /// Split `text` into fragments.
    ///
    /// `max_splits` bounds the number of splits performed (not the number
    /// of fragments); the unsplit remainder becomes the final fragment.
    pub fn split(&self, text: &str, max_splits: Option<usize>) -> Vec<String> {
        match &self.rule {
            SplitRule::Whitespace => split_whitespace(text, max_splits),
            SplitRule::Literal(token) => split_literal(text, std::slice::from_ref(token), max_splits),
            SplitRule::AnyOf(tokens) => split_literal(text, tokens, max_splits),
        }
    }

    /// Join fragments with the output token.
    pub fn join<I, S>(&self, items: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                joined.push_str(&self.out);
            }
            joined.push_str(item.as_ref());
        }
        joined
    }
}

impl Default for BiSep {
    fn default() -> Self {
        Self::whitespace()
    }
}

fn split_whitespace(text: &str, max_splits: Option<usize>) -> Vec<String> {
    match max_splits {
        None => text.split_whitespace().map(str::to_owned).collect(),
        Some(max) => {
            let mut out = Vec::new();
            let mut rest = text.trim_start();
            while !rest.is_empty() {
                if out.len() == max {
                    out.push(rest.to_owned());
                    return out;
                }
                match rest.find(char::is_whitespace) {
                    Some(end) => {
                        out.push(rest[..end].to_owned());
                        rest = rest[end..].trim_start();
                    }
                    None => {
                        out.push(rest.to_owned());
                        rest = "";
                    }
                }
            }
            out
        }
    }
}

fn split_literal(text: &str, tokens: &[String], max_splits: Option<usize>) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos < text.len() {
        if max_splits.is_some_and(|max| out.len() == max) {
            break;
        }
        let matched = tokens
            .iter()
            .find(|tok| !tok.is_empty() && text[pos..].starts_with(tok.as_str()));
        match matched {
            Some(tok) => {
                out.push(text[start..pos].to_owned());
                pos += tok.len();
                start = pos;
            }
            None => {
                // advance one character, respecting UTF-8 boundaries
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    out.push(text[start..].to_owned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_split_drops_empties() {
        let sep = BiSep::whitespace();
        assert_eq!(sep.split("  a\t b \n c ", None), ["a", "b", "c"]);
        assert_eq!(sep.split("", None), Vec::<String>::new());
    }

    #[test]
    fn whitespace_split_bounded() {
        let sep = BiSep::whitespace();
        assert_eq!(sep.split(" 1  16.47 96.10 ", Some(1)), ["1", "16.47 96.10 "]);
    }

    #[test]
    fn literal_split_keeps_empties() {
        let sep = BiSep::symmetric(":");
        assert_eq!(sep.split("a b:c-d:--:e", None), ["a b", "c-d", "--", "e"]);
        assert_eq!(sep.split("d:", None), ["d", ""]);
        assert_eq!(sep.split("", None), [""]);
    }

    #[test]
    fn any_of_split() {
        let sep = BiSep::any_of(vec![";".into(), ",".into()], String::from(", "));
        assert_eq!(sep.split("a;b,c", None), ["a", "b", "c"]);
    }

    #[test]
    fn join_uses_output_token() {
        let sep = BiSep::literal("-1", " -1\n");
        assert_eq!(sep.join(["a", "b"]), "a -1\nb");
    }

    #[test]
    fn split_and_join_are_not_inverses() {
        let sep = BiSep::literal("-1", " -1\n");
        let fragments = sep.split("a -1\nb", None);
        assert_eq!(fragments, ["a ", "\nb"]);
    }
}
