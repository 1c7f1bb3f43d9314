//! Usage record value object

use serde::{Deserialize, Serialize};

/// Consumption of one subscriber within one accounting period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub queries_used: u64,
    pub tokens_used: u64,
}

impl UsageRecord {
    pub fn new(queries_used: u64, tokens_used: u64) -> Self {
        Self {
            queries_used,
            tokens_used,
        }
    }

    /// The record after one more query consuming `tokens`
    pub fn incremented(&self, tokens: u64) -> Self {
        Self {
            queries_used: self.queries_used.saturating_add(1),
            tokens_used: self.tokens_used.saturating_add(tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incremented() {
        let r = UsageRecord::default().incremented(150).incremented(50);
        assert_eq!(r, UsageRecord::new(2, 200));
    }
}
