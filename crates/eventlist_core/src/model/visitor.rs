//! Per-referrer visit tally.

use serde::Serialize;

/// Stored visit count for one referrer domain.
///
/// `count` starts at 1 on first observation and never decreases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorCount {
    pub domain: String,
    pub count: i64,
}
