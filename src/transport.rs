// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Transport budget and delivery
//!
//! Satellite text services cap each message at a fixed number of
//! characters. A composed message longer than the budget is split: the
//! first part is transmitted and the rest is handed back to the operator.
//! The overflow is never dropped silently.

use crate::channel::Channel;
use crate::composer::Message;
use crate::error::Result;
use crate::recovery::{with_retry_metrics, RetryStrategy};

/// Character budget of one outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Budget(usize);

impl Budget {
    /// Web form deployments
    pub const SHORT: Budget = Budget(140);
    /// Email gateway deployments
    pub const LONG: Budget = Budget(160);

    /// Create a budget; zero is not a usable budget
    pub fn new(chars: usize) -> Option<Self> {
        if chars == 0 {
            None
        } else {
            Some(Self(chars))
        }
    }

    /// Characters allowed
    pub fn chars(&self) -> usize {
        self.0
    }

    /// Split text at the budget, on a character boundary
    pub fn split(&self, text: &str) -> Transmission {
        let cut = text
            .char_indices()
            .nth(self.0)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let (sent, overflow) = text.split_at(cut);
        Transmission {
            sent: sent.to_string(),
            overflow: overflow.to_string(),
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::SHORT
    }
}

/// What is transmitted and what is left over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// Part that fits the budget
    pub sent: String,
    /// Part cut off, empty if the message fit
    pub overflow: String,
}

impl Transmission {
    /// Check whether anything was cut off
    pub fn is_truncated(&self) -> bool {
        !self.overflow.is_empty()
    }

    /// Length of the full message in characters
    pub fn total_len(&self) -> usize {
        self.sent.chars().count() + self.overflow.chars().count()
    }
}

/// Send a message through a channel, within a budget
///
/// Returns the [`Transmission`] so the caller can report the overflow.
pub fn deliver<C: Channel + ?Sized>(
    channel: &mut C,
    message: &Message,
    budget: Budget,
    retry: &RetryStrategy,
) -> Result<Transmission> {
    let transmission = budget.split(message.as_str());
    if transmission.is_truncated() {
        log::warn!(
            "message is {} chars, budget {}: truncated {:?}",
            transmission.total_len(),
            budget.chars(),
            transmission.overflow
        );
    }

    let result = with_retry_metrics(retry, || channel.send(&transmission.sent))?;
    if result.attempts > 1 {
        log::info!(
            "delivered after {} attempts in {:?}",
            result.attempts,
            result.total_duration
        );
    }

    Ok(transmission)
}
