//! Keyword-driven document splitting.
//!
//! A TSPLIB document is a sequence of `KEYWORD: value` and
//! `KEYWORD:` + multi-line-body entries, closed by a literal `EOF` line.
//! The splitter scans line by line: a line whose head token is a known
//! keyword (with or without a colon) starts a new section; every other
//! line belongs to the body of the section currently open. Text before
//! the first keyword and after `EOF` is ignored.

/// Split a document into `(keyword, body)` pairs in document order.
///
/// `is_keyword` decides which head tokens open a section; `EOF` always
/// ends the scan. Bodies are returned raw (no trimming).
pub(crate) fn split_document<'a>(
    text: &'a str,
    is_keyword: impl Fn(&str) -> bool,
) -> Vec<(&'a str, String)> {
    let mut sections: Vec<(&'a str, String)> = Vec::new();
    let mut open: Option<(&'a str, String)> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        let (head, inline) = match trimmed.split_once(':') {
            Some((head, rest)) => (head.trim_end(), Some(rest.trim_start())),
            None => (trimmed, None),
        };

        if head == "EOF" {
            break;
        }
        if is_keyword(head) {
            if let Some(section) = open.take() {
                sections.push(section);
            }
            open = Some((head, inline.unwrap_or("").to_owned()));
        } else if let Some((_, body)) = open.as_mut() {
            if !body.is_empty() {
                body.push('\n');
            }
            body.push_str(line);
        }
    }
    if let Some(section) = open.take() {
        sections.push(section);
    }
    sections
}
