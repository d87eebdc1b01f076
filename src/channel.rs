// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.


//! Delivery channel abstraction
//!
//! A channel takes one outbound text and hands it to the satellite
//! messaging service (web form, email gateway). Implementations live with
//! the operator's tooling; this crate ships in-memory channels for tests.

use crate::error::{ChannelError, Result};

/// Statistics about channel usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelMetrics {
    /// Total characters sent
    pub chars_sent: u64,
    /// Total messages sent
    pub messages_sent: u64,
    /// Failed send attempts
    pub failures: u64,
}

/// Trait for delivery channels
pub trait Channel {
    /// Send one outbound text
    fn send(&mut self, text: &str) -> Result<()>;

    /// Check if the channel is available
    fn is_available(&self) -> bool;

    /// Get channel metrics
    fn metrics(&self) -> ChannelMetrics;

    /// Close the channel
    fn close(&mut self);
}

/// A channel that keeps every sent text in memory
#[derive(Debug)]
pub struct MemoryChannel {
    sent: Vec<String>,
    is_open: bool,
    metrics: ChannelMetrics,
}

impl MemoryChannel {
    /// Create a new memory channel
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            is_open: true,
            metrics: ChannelMetrics::default(),
        }
    }

    /// Texts sent so far, oldest first
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Most recent text sent
    pub fn last(&self) -> Option<&str> {
        self.sent.last().map(String::as_str)
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel for MemoryChannel {
    fn send(&mut self, text: &str) -> Result<()> {
        if !self.is_open {
            self.metrics.failures += 1;
            return Err(ChannelError::Disconnected {
                reason: "Channel is closed".to_string(),
            }
            .into());
        }

        self.sent.push(text.to_string());
        self.metrics.chars_sent += text.chars().count() as u64;
        self.metrics.messages_sent += 1;

        Ok(())
    }

    fn is_available(&self) -> bool {
        self.is_open
    }

    fn metrics(&self) -> ChannelMetrics {
        self.metrics.clone()
    }

    fn close(&mut self) {
        self.is_open = false;
    }
}

/// Channel that rejects a fixed number of sends before accepting
///
/// Simulates a relay that is briefly unreachable.
#[derive(Debug)]
pub struct FlakyChannel {
    inner: MemoryChannel,
    failures_left: u32,
}

impl FlakyChannel {
    /// Create a channel failing the first `failures` sends
    pub fn new(failures: u32) -> Self {
        Self {
            inner: MemoryChannel::new(),
            failures_left: failures,
        }
    }

    /// Underlying memory channel
    pub fn inner(&self) -> &MemoryChannel {
        &self.inner
    }
}

impl Channel for FlakyChannel {
    fn send(&mut self, text: &str) -> Result<()> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            self.inner.metrics.failures += 1;
            return Err(ChannelError::Rejected {
                reason: "relay unavailable".to_string(),
            }
            .into());
        }
        self.inner.send(text)
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn metrics(&self) -> ChannelMetrics {
        self.inner.metrics()
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
