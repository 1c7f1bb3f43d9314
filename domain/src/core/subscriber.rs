//! Subscriber identifier value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The account a request is admitted and billed against (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubscriberId(String);

impl SubscriberId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptySubscriber);
        }
        Ok(Self(id))
    }

    /// An anonymous, randomly generated subscriber
    pub fn anonymous() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SubscriberId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        SubscriberId::new(s)
    }
}

impl From<SubscriberId> for String {
    fn from(id: SubscriberId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_rejects_blank() {
        assert_eq!(SubscriberId::new(" "), Err(DomainError::EmptySubscriber));
        assert_eq!(SubscriberId::new("u1").unwrap().as_str(), "u1");
    }

    #[test]
    fn test_anonymous_subscribers_are_distinct() {
        assert_ne!(SubscriberId::anonymous(), SubscriberId::anonymous());
    }
}
