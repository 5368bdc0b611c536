//! Splits a raw query into term tokens and `#tag` filters.
//!
//! Queries starting with `:` or `::` are web-search escapes owned by the
//! surrounding UI; the parser recognizes them so the core can return an empty
//! result set instead of choking.

/// The parsed form of a query: lowercased term tokens plus any `#`-stripped
/// tag filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub terms: Vec<String>,
    pub tag_filters: Vec<String>,
    pub web_escape: bool,
}

impl Query {
    /// A query that carries tag filters but no term tokens.
    pub fn is_tag_only(&self) -> bool {
        self.terms.is_empty() && !self.tag_filters.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.tag_filters.is_empty()
    }

    /// The term tokens re-joined, used by the fuzzy title fallback.
    pub fn term_string(&self) -> String {
        self.terms.join(" ")
    }
}

/// Parse a raw query string.
pub fn parse(raw: &str) -> Query {
    let trimmed = raw.trim().to_lowercase();

    // Web-search escape: the UI handles these, we just stay out of the way.
    if trimmed.starts_with(':') {
        return Query {
            terms: Vec::new(),
            tag_filters: Vec::new(),
            web_escape: true,
        };
    }

    let mut terms = Vec::new();
    let mut tag_filters = Vec::new();

    for token in trimmed.split_whitespace() {
        if let Some(tag) = token.strip_prefix('#') {
            if !tag.is_empty() {
                tag_filters.push(tag.to_string());
            }
        } else {
            terms.push(token.to_string());
        }
    }

    Query {
        terms,
        tag_filters,
        web_escape: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_terms_and_tags() {
        let q = parse("rust #work book");
        assert_eq!(q.terms, vec!["rust", "book"]);
        assert_eq!(q.tag_filters, vec!["work"]);
        assert!(!q.is_tag_only());
    }

    #[test]
    fn lowercases_and_trims() {
        let q = parse("  GitHub  ");
        assert_eq!(q.terms, vec!["github"]);
        assert!(q.tag_filters.is_empty());
    }

    #[test]
    fn tag_only_query() {
        let q = parse("#work #urgent");
        assert!(q.is_tag_only());
        assert_eq!(q.tag_filters, vec!["work", "urgent"]);
    }

    #[test]
    fn web_escape_yields_nothing() {
        for raw in [":wiki rust", "::g rust"] {
            let q = parse(raw);
            assert!(q.web_escape);
            assert!(q.terms.is_empty());
            assert!(q.tag_filters.is_empty());
        }
    }

    #[test]
    fn bare_hash_is_dropped() {
        let q = parse("# rust");
        assert_eq!(q.terms, vec!["rust"]);
        assert!(q.tag_filters.is_empty());
    }

    #[test]
    fn term_string_rejoins_terms() {
        assert_eq!(parse("git hub #dev").term_string(), "git hub");
    }
}
