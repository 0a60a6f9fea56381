//! Line format of the exclusion store.
//!
//! One nation per line, newline-terminated. Blank lines are tolerated on
//! read since older files may end with a stray separator.

use crate::types::NationName;
use tracing::warn;

/// Parse the contents of an exclusion file.
///
/// Lines are normalized on the way in; blank lines are skipped.
pub fn parse_exclusions(content: &str) -> Vec<NationName> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match NationName::new(line) {
            Ok(name) => Some(name),
            Err(e) => {
                warn!("Skipping exclusion store line {}: {}", idx + 1, e);
                None
            }
        })
        .collect()
}

/// Render names as store lines, each terminated by `\n`.
pub fn render_lines(names: &[NationName]) -> String {
    let mut out = String::with_capacity(names.iter().map(|n| n.as_str().len() + 1).sum());
    for name in names {
        out.push_str(name.as_str());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let parsed = parse_exclusions("alpha\n\nbeta\n   \ngamma\n");
        let names: Vec<&str> = parsed.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_parse_normalizes_and_keeps_duplicates() {
        let parsed = parse_exclusions("Alpha One\nalpha_one\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], parsed[1]);
    }

    #[test]
    fn test_render_lines() {
        let names = vec![NationName::new("a").unwrap(), NationName::new("b").unwrap()];
        assert_eq!(render_lines(&names), "a\nb\n");
        assert_eq!(render_lines(&[]), "");
    }
}
