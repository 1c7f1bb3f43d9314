//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A query to be reasoned about by the personas (Value Object)
///
/// Every persona receives the same query rendered into its own prompt
/// template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query {
    content: String,
}

impl Query {
    /// Create a new query, rejecting empty or whitespace-only content
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Self { content })
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Query::new(s)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Query::new(s)
    }
}

impl From<Query> for String {
    fn from(q: Query) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_creation() {
        let q = Query::new("Is unit testing important?").unwrap();
        assert_eq!(q.content(), "Is unit testing important?");
    }

    #[test]
    fn test_empty_query_rejected() {
        assert_eq!(Query::new(""), Err(DomainError::EmptyQuery));
        assert_eq!(Query::new("   \n"), Err(DomainError::EmptyQuery));
    }

    #[test]
    fn test_query_serde_as_plain_string() {
        let q = Query::new("why?").unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"why?\"");
        assert!(serde_json::from_str::<Query>("\"\"").is_err());
    }
}
