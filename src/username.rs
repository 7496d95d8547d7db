use std::fmt;

/// A LeetCode account name as typed by the user, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trims surrounding whitespace; returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let name = Username::parse("  alice \n").unwrap();
        assert_eq!(name.as_str(), "alice");
        assert_eq!(name.to_string(), "alice");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert!(Username::parse("").is_none());
        assert!(Username::parse("   \t").is_none());
    }

    #[test]
    fn inner_whitespace_is_kept() {
        // No validation beyond trimming; upstream decides what exists.
        assert_eq!(Username::parse(" a b ").unwrap().as_str(), "a b");
    }
}
