//! Origin allowlist
//!
//! Membership is exact string equality. No normalization, no wildcards.

/// Ordered set of trusted origins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginAllowlist {
    origins: Vec<String>,
}

impl OriginAllowlist {
    /// Build from an ordered list, dropping later duplicates.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for origin in origins {
            list.add(origin);
        }
        list
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    /// Append `origin` unless already present. Returns true if added.
    pub fn add(&mut self, origin: impl Into<String>) -> bool {
        let origin = origin.into();
        if self.contains(&origin) {
            return false;
        }
        self.origins.push(origin);
        true
    }

    pub fn clear(&mut self) {
        self.origins.clear();
    }

    /// Owned copy of the current list.
    pub fn snapshot(&self) -> Vec<String> {
        self.origins.clone()
    }

    /// Highest-priority origin; the default target for a sub-app.
    pub fn first(&self) -> Option<&str> {
        self.origins.first().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.origins
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}
