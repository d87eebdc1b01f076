// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Compact text codec
//!
//! Serializes delta sequences into the terse form sent over the satellite
//! link.
//!
//! # Format
//!
//! ```text
//! field    = tag value*
//! tag      = "W" | "G" | "D"
//! value    = ["-"] digit+        (never "0")
//! ```
//!
//! A field is its tag followed by every non-zero value of the sequence with
//! no separator; a negative value is set apart by its own minus sign and a
//! zero contributes nothing. Speeds `[10, 2, 2, 2]` encode as `W10222`,
//! directions `[10, 0, -1]` as `D10-1`.
//!
//! Tags are always drawn from the fixed uppercase alphabet and values are
//! always base-10 integers, so a reader scanning left to right starts a new
//! field at every tag letter. The message-level day separator `T` follows
//! the same rule.

use crate::delta::{DeltaSequence, DeltaSet};
use crate::metric::{Metric, DAY_SEPARATOR};
use std::fmt::Write;

/// Encode one metric's sequence as a field
pub fn encode(sequence: &DeltaSequence) -> String {
    let mut out = String::with_capacity(1 + sequence.len() * 2);
    out.push(sequence.metric.tag());
    for value in sequence.values.iter().filter(|v| **v != 0) {
        // Writing to a String cannot fail
        let _ = write!(out, "{}", value);
    }
    out
}

/// Encode one location's metrics for one day
///
/// Fields appear in the order of the set (speed, gusts, direction for sets
/// built by [`crate::delta::encode_all`]).
pub fn encode_fragment(set: &DeltaSet) -> String {
    set.sequences.iter().map(encode).collect()
}

/// Check whether a character starts a field
pub fn is_tag(c: char) -> bool {
    c == DAY_SEPARATOR || Metric::from_tag(c).is_some()
}

/// A field found by [`split_fields`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Tag letter that opened the field
    pub tag: char,
    /// Raw text up to the next tag
    pub body: &'a str,
}

impl Field<'_> {
    /// Metric of the field, or `None` for the day separator
    pub fn metric(&self) -> Option<Metric> {
        Metric::from_tag(self.tag)
    }

    /// Check that the body only holds value characters
    pub fn is_well_formed(&self) -> bool {
        self.body.chars().all(|c| c.is_ascii_digit() || c == '-')
    }
}

/// Split encoded text into fields the way a receiving device reads it
///
/// Returns the text before the first tag (the message header) and the
/// fields in order.
pub fn split_fields(text: &str) -> (&str, Vec<Field<'_>>) {
    let mut starts = text.char_indices().filter(|(_, c)| is_tag(*c)).peekable();

    let header_end = starts.peek().map(|(i, _)| *i).unwrap_or(text.len());
    let header = &text[..header_end];

    let mut fields = Vec::new();
    while let Some((start, tag)) = starts.next() {
        let body_start = start + tag.len_utf8();
        let end = starts.peek().map(|(i, _)| *i).unwrap_or(text.len());
        fields.push(Field {
            tag,
            body: &text[body_start..end],
        });
    }

    (header, fields)
}
