//! Front-matter lines parsed into the metadata map.

use crate::convert::Metadata;

/// Parse the body of a metadata block.
///
/// `KEY: VALUE` lines start an entry: the key (ASCII alphanumerics, `_`,
/// `-`) is lowercased, the value trimmed, and a repeated key appends
/// another value to the earlier entry. Lines indented four spaces or a
/// tab extend the most recent entry with another value. Anything else is
/// ignored.
pub(crate) fn parse(body: &str) -> Metadata {
    let mut metadata = Metadata::new();
    let mut current: Option<String> = None;
    for line in body.lines() {
        if let Some(rest) = continuation(line) {
            if let Some(values) = current.as_ref().and_then(|key| metadata.get_mut(key)) {
                values.push(rest.trim().to_string());
                continue;
            }
        }
        match header(line) {
            Some((key, value)) => {
                metadata.entry(key.clone()).or_default().push(value);
                current = Some(key);
            }
            None => current = None,
        }
    }
    metadata
}

fn continuation(line: &str) -> Option<&str> {
    line.strip_prefix("    ").or_else(|| line.strip_prefix('\t'))
}

fn header(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    Some((key.to_ascii_lowercase(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_entries() {
        let metadata = parse("title: Demo Doc\nstatus: draft\n");
        assert_eq!(metadata.get("title"), Some(&vec!["Demo Doc".to_string()]));
        assert_eq!(metadata.get("status"), Some(&vec!["draft".to_string()]));
    }

    #[test]
    fn test_keys_are_lowercased() {
        let metadata = parse("Title: Demo\n");
        assert_eq!(metadata.get("title"), Some(&vec!["Demo".to_string()]));
        assert!(metadata.get("Title").is_none());
    }

    #[test]
    fn test_continuation_lines_extend_the_last_entry() {
        let metadata = parse("authors: Ana\n    Ben\n\tCy\n");
        assert_eq!(
            metadata.get("authors"),
            Some(&vec![
                "Ana".to_string(),
                "Ben".to_string(),
                "Cy".to_string()
            ])
        );
    }

    #[test]
    fn test_repeated_key_accumulates_values() {
        let metadata = parse("tag: one\ntag: two\n");
        assert_eq!(
            metadata.get("tag"),
            Some(&vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn test_empty_value_is_kept() {
        let metadata = parse("draft:\n");
        assert_eq!(metadata.get("draft"), Some(&vec![String::new()]));
    }

    #[test]
    fn test_non_entry_lines_are_ignored_and_break_continuations() {
        let metadata = parse("authors: Ana\n- not a header\n    Ben\n");
        assert_eq!(metadata.get("authors"), Some(&vec!["Ana".to_string()]));
    }

    #[test]
    fn test_keys_with_spaces_are_not_entries() {
        let metadata = parse("not a key: value\n");
        assert!(metadata.is_empty());
    }
}
