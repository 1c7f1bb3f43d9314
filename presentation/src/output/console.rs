//! Console output for usage reports and errors

use colored::Colorize;
use personachain_domain::{AccountingPeriod, Limit, SubscriberId, TierLimits, UsageRecord};
use serde::Serialize;

/// A subscriber's standing for one accounting period
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport {
    pub subscriber: SubscriberId,
    pub period: String,
    pub tier: String,
    pub usage: UsageRecord,
    pub limits: TierLimits,
}

impl UsageReport {
    pub fn new(
        subscriber: SubscriberId,
        period: AccountingPeriod,
        tier: impl Into<String>,
        usage: UsageRecord,
        limits: TierLimits,
    ) -> Self {
        Self {
            subscriber,
            period: period.key(),
            tier: tier.into(),
            usage,
            limits,
        }
    }

    /// Queries left this period, `None` when unlimited
    pub fn queries_remaining(&self) -> Option<u64> {
        match self.limits.queries_per_month {
            Limit::Finite(max) => Some(max.saturating_sub(self.usage.queries_used)),
            Limit::Unlimited => None,
        }
    }
}

/// Formats usage reports and errors for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn usage(report: &UsageReport) -> String {
        let mut out = String::new();
        out.push_str(&Self::header(&format!("Usage for {}", report.subscriber)));
        out.push('\n');
        out.push_str(&format!("{} {}\n", "Period:".cyan().bold(), report.period));
        out.push_str(&format!("{} {}\n", "Tier:".cyan().bold(), report.tier));
        out.push_str(&format!(
            "{} {} / {}\n",
            "Queries:".cyan().bold(),
            report.usage.queries_used,
            report.limits.queries_per_month
        ));
        out.push_str(&format!(
            "{} {}\n",
            "Tokens:".cyan().bold(),
            report.usage.tokens_used
        ));
        out.push_str(&format!(
            "{} {} per query, {} personas\n",
            "Limits:".cyan().bold(),
            report.limits.tokens_per_query,
            report.limits.personas_max
        ));
        match report.queries_remaining() {
            Some(0) => out.push_str(&format!("{}\n", "Monthly query quota exhausted".red().bold())),
            Some(n) => out.push_str(&format!("{} {}\n", "Remaining:".cyan().bold(), n)),
            None => {}
        }
        out
    }

    pub fn usage_json(report: &UsageReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(50);
        format!("{}\n{}\n{}", line.dimmed(), title.bold(), line.dimmed())
    }
}
