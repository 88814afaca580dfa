//! Search rule parsing for the managed-bean log probe
//!
//! A raw configuration line has the form `namePattern|attributePattern`.
//! This module turns an ordered list of such lines into the ordered list of
//! [`SearchRule`] values that drives each scan. Pattern syntax is not
//! validated here; invalid regular expressions surface when a rule is first
//! used by the scanner.

/// Built-in search configuration used when no lines are configured
///
/// Matches the publish replication agent queue and logs its depth.
pub const DEFAULT_SEARCH_CONFIG: &str =
    r#".*replication.*type=agent.*id="publish".*|QueueNumEntries"#;

/// One configured probe target: a bean name pattern and an attribute name pattern
///
/// Both patterns are matched as full-string regular expressions. A rule is an
/// immutable value; reconfiguration builds a fresh rule list instead of
/// mutating rules in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRule {
    name_pattern: String,
    attribute_pattern: String,
}

impl SearchRule {
    /// Create a new search rule
    ///
    /// # Arguments
    ///
    /// * `name_pattern` - Pattern matched against a bean's canonical name
    /// * `attribute_pattern` - Pattern matched against attribute names of a matched bean
    pub fn new(name_pattern: impl Into<String>, attribute_pattern: impl Into<String>) -> Self {
        Self {
            name_pattern: name_pattern.into(),
            attribute_pattern: attribute_pattern.into(),
        }
    }

    /// Pattern matched against a bean's canonical name
    pub fn name_pattern(&self) -> &str {
        &self.name_pattern
    }

    /// Pattern matched against attribute names within a matched bean
    pub fn attribute_pattern(&self) -> &str {
        &self.attribute_pattern
    }

    /// Parse a single raw configuration line
    ///
    /// The line is split on every `|`; the first segment becomes the name
    /// pattern and the second the attribute pattern. Additional segments are
    /// ignored. A line without a delimiter gets an empty attribute pattern.
    ///
    /// Returns `None` for blank or whitespace-only lines.
    pub fn parse(line: &str) -> Option<SearchRule> {
        if line.trim().is_empty() {
            return None;
        }

        let mut segments = line.split('|');
        let name_pattern = segments.next().unwrap_or_default();
        let attribute_pattern = segments.next().unwrap_or_default();
        Some(SearchRule::new(name_pattern, attribute_pattern))
    }

    /// Parse an ordered list of raw configuration lines into rules
    ///
    /// If `lines` is empty the built-in [`DEFAULT_SEARCH_CONFIG`] line is
    /// parsed instead. Blank lines are skipped; rule order follows line
    /// order.
    pub fn parse_all(lines: &[String]) -> Vec<SearchRule> {
        if lines.is_empty() {
            return SearchRule::parse(DEFAULT_SEARCH_CONFIG).into_iter().collect();
        }

        lines.iter().filter_map(|line| SearchRule::parse(line)).collect()
    }
}

impl std::fmt::Display for SearchRule {
    /// Renders the rule in its raw configuration form `namePattern|attributePattern`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.name_pattern, self.attribute_pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_parse_all_skips_blank_lines_and_defaults_missing_attribute() {
        let lines = vec![
            "a|b".to_string(),
            "".to_string(),
            "  ".to_string(),
            "c".to_string(),
        ];

        let rules = SearchRule::parse_all(&lines);

        assert_eq!(
            rules,
            vec![SearchRule::new("a", "b"), SearchRule::new("c", "")]
        );
    }

    #[test]
    fn test_parse_ignores_segments_beyond_the_second() {
        let rule = SearchRule::parse("a|b|c|d").unwrap();
        assert_eq!(rule.name_pattern(), "a");
        assert_eq!(rule.attribute_pattern(), "b");
        assert_eq!(rule.to_string(), "a|b");
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        let rule = SearchRule::parse("a|").unwrap();
        assert_eq!(rule.name_pattern(), "a");
        assert_eq!(rule.attribute_pattern(), "");

        let rule = SearchRule::parse("|b").unwrap();
        assert_eq!(rule.name_pattern(), "");
        assert_eq!(rule.attribute_pattern(), "b");
    }

    #[test]
    fn test_parse_does_not_trim_segments() {
        let rule = SearchRule::parse(" a |b ").unwrap();
        assert_eq!(rule.name_pattern(), " a ");
        assert_eq!(rule.attribute_pattern(), "b ");
    }

    #[test]
    fn test_parse_all_empty_input_uses_builtin_default() {
        let rules = SearchRule::parse_all(&[]);

        assert_eq!(
            rules,
            vec![SearchRule::new(
                r#".*replication.*type=agent.*id="publish".*"#,
                "QueueNumEntries"
            )]
        );
    }

    #[test]
    fn test_parse_all_blank_only_input_yields_no_rules() {
        // A non-empty list of blank lines is not "absent" configuration, so
        // the default is not substituted and the probe runs with zero rules.
        let lines = vec!["".to_string(), "   ".to_string()];
        assert!(SearchRule::parse_all(&lines).is_empty());
    }

    /// Raw configuration line drawn from the characters that matter to the parser
    #[derive(Debug, Clone)]
    struct RawLine(String);

    impl Arbitrary for RawLine {
        fn arbitrary(g: &mut Gen) -> Self {
            let alphabet: &[char] = &['a', 'b', '.', '*', '=', '"', '|', ' ', '\t'];
            let len = usize::arbitrary(g) % 16;
            let line: String = (0..len).map(|_| *g.choose(alphabet).unwrap()).collect();
            RawLine(line)
        }
    }

    #[quickcheck]
    fn prop_rule_count_matches_non_blank_line_count(lines: Vec<RawLine>) -> bool {
        let raw: Vec<String> = lines.into_iter().map(|line| line.0).collect();
        if raw.is_empty() {
            return SearchRule::parse_all(&raw).len() == 1;
        }

        let non_blank = raw.iter().filter(|line| !line.trim().is_empty()).count();
        SearchRule::parse_all(&raw).len() == non_blank
    }

    #[quickcheck]
    fn prop_parsed_patterns_never_contain_the_delimiter(lines: Vec<RawLine>) -> bool {
        let raw: Vec<String> = lines.into_iter().map(|line| line.0).collect();
        SearchRule::parse_all(&raw).iter().all(|rule| {
            !rule.name_pattern().contains('|') && !rule.attribute_pattern().contains('|')
        })
    }

    #[quickcheck]
    fn prop_blank_lines_never_produce_rules(count: usize) -> bool {
        let raw: Vec<String> = (0..count % 8 + 1).map(|_| "   ".to_string()).collect();
        SearchRule::parse_all(&raw).is_empty()
    }
}
