//! Static in-memory datasets backing the lookup tools
//!
//! Three read-only collections: a ticket tracker, a wiki, and an analytics
//! metric store. Loaded once at first access and never mutated, so they are
//! safe to share across concurrent orchestration calls.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// A ticket tracker record
#[derive(Debug, Clone, Serialize)]
pub struct TicketRecord {
    /// One-line summary
    pub title: &'static str,
    /// Workflow status
    pub status: &'static str,
    /// Assigned engineer
    pub assignee: &'static str,
    /// Priority label (P0 highest)
    pub priority: &'static str,
    /// Full description
    pub description: &'static str,
    /// Creation date (YYYY-MM-DD)
    pub created: &'static str,
    /// Last update date (YYYY-MM-DD)
    pub updated: &'static str,
}

/// A wiki page record
#[derive(Debug, Clone, Serialize)]
pub struct WikiPage {
    /// Page title
    pub title: &'static str,
    /// Page body
    pub content: &'static str,
    /// Last update date (YYYY-MM-DD)
    pub updated: &'static str,
}

/// An analytics metric record
#[derive(Debug, Clone, Serialize)]
pub struct MetricRecord {
    /// Current period value
    pub current: f64,
    /// Previous period value
    pub previous: f64,
    /// Trend direction ("up" or "down")
    pub trend: &'static str,
    /// Percentage change between periods
    pub change_pct: f64,
    /// Comparison period
    pub period: &'static str,
}

lazy_static! {
    /// Ticket tracker records keyed by ticket id
    pub static ref TICKETS: HashMap<&'static str, TicketRecord> = {
        let mut m = HashMap::new();
        m.insert("SHOP-2847", TicketRecord {
            title: "Safari checkout crashes on iOS 17",
            status: "In Review",
            assignee: "Alice Chen",
            priority: "P0",
            description: "Users on Safari 17/iOS report checkout crashes at payment step. \
                          Hotfix deployed yesterday, monitoring for recovery.",
            created: "2025-01-15",
            updated: "2025-01-18",
        });
        m.insert("SHOP-2901", TicketRecord {
            title: "Payment gateway timeout",
            status: "Open",
            assignee: "Bob Smith",
            priority: "P1",
            description: "Stripe webhook timeouts causing order confirmation delays.",
            created: "2025-01-16",
            updated: "2025-01-17",
        });
        m.insert("SHOP-3001", TicketRecord {
            title: "Mobile web performance degradation",
            status: "In Progress",
            assignee: "Carol Wang",
            priority: "P1",
            description: "Mobile page load times increased 20% after new analytics integration.",
            created: "2025-01-14",
            updated: "2025-01-18",
        });
        m.insert("SHOP-2955", TicketRecord {
            title: "Address validation API errors",
            status: "Open",
            assignee: "David Lee",
            priority: "P2",
            description: "Third-party address validation service returning 500 errors \
                          for Canadian addresses.",
            created: "2025-01-17",
            updated: "2025-01-17",
        });
        m
    };

    /// Wiki pages keyed by page key
    pub static ref WIKI_PAGES: HashMap<&'static str, WikiPage> = {
        let mut m = HashMap::new();
        m.insert("checkout-rewrite", WikiPage {
            title: "Checkout Rewrite Q2 2025",
            content: "Project is 75% complete and on track for Q2 delivery. Main focus areas: \
                      Safari compatibility, payment flow optimization, mobile UX improvements.",
            updated: "2025-01-15",
        });
        m.insert("mobile-strategy", WikiPage {
            title: "Mobile Optimization Strategy 2025",
            content: "Mobile conversion funnel analysis shows Safari-specific issues affecting \
                      iOS users. Target: improve mobile conversion rate by 15% through \
                      performance and UX enhancements.",
            updated: "2025-01-10",
        });
        m.insert("payment-architecture", WikiPage {
            title: "Payment Flow Architecture",
            content: "Current payment architecture uses Stripe webhooks for order confirmation. \
                      Known issues: webhook timeouts during peak traffic, retry logic needs \
                      improvement.",
            updated: "2025-01-12",
        });
        m
    };

    /// Analytics metrics keyed by metric name
    pub static ref METRICS: HashMap<&'static str, MetricRecord> = {
        let mut m = HashMap::new();
        m.insert("mobile_conversions", MetricRecord {
            current: 3.2,
            previous: 3.5,
            trend: "down",
            change_pct: -8.6,
            period: "week-over-week",
        });
        m.insert("checkout_completion", MetricRecord {
            current: 78.5,
            previous: 82.1,
            trend: "down",
            change_pct: -4.4,
            period: "week-over-week",
        });
        m.insert("safari_users", MetricRecord {
            current: 24.3,
            previous: 25.1,
            trend: "down",
            change_pct: -3.2,
            period: "week-over-week",
        });
        m.insert("payment_success_rate", MetricRecord {
            current: 96.2,
            previous: 97.8,
            trend: "down",
            change_pct: -1.6,
            period: "week-over-week",
        });
        m
    };
}

/// List metric names in sorted order (stable output for prompts and answers)
#[must_use]
pub fn metric_names() -> Vec<&'static str> {
    let mut names: Vec<_> = METRICS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// List wiki page keys in sorted order
#[must_use]
pub fn wiki_page_keys() -> Vec<&'static str> {
    let mut keys: Vec<_> = WIKI_PAGES.keys().copied().collect();
    keys.sort_unstable();
    keys
}
