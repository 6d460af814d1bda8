//! # Log Filter
//!
//! Address/topic matching over bor logs with `eth_getLogs` semantics.

use shared_types::{Address, Hash, SideChainLog};

/// Criteria a log must satisfy.
///
/// - `addresses`: empty matches any emitter, otherwise the log's address must
///   be one of them.
/// - `topics`: position `i` constrains topic `i`; `None` is a wildcard, an
///   alternative list matches any of its entries. A log with fewer topics
///   than the filter has positions never matches, wildcards included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Accepted emitters.
    pub addresses: Vec<Address>,
    /// Positional topic constraints.
    pub topics: Vec<Option<Vec<Hash>>>,
}

impl LogFilter {
    /// Filter that accepts every log.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to a single emitter.
    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    /// Append a positional topic constraint.
    pub fn with_topic(mut self, topic: Option<Vec<Hash>>) -> Self {
        self.topics.push(topic);
        self
    }

    /// True if `log` satisfies every constraint.
    pub fn matches(&self, log: &SideChainLog) -> bool {
        if !self.addresses.is_empty() && !self.addresses.contains(&log.address) {
            return false;
        }

        if self.topics.len() > log.topics.len() {
            return false;
        }

        self.topics
            .iter()
            .zip(&log.topics)
            .all(|(constraint, topic)| match constraint {
                Some(alternatives) => alternatives.is_empty() || alternatives.contains(topic),
                None => true,
            })
    }

    /// Keep matching logs, preserving order.
    pub fn apply(&self, logs: Vec<SideChainLog>) -> Vec<SideChainLog> {
        logs.into_iter().filter(|log| self.matches(log)).collect()
    }
}
