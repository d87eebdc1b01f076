//! Tracker position
//!
//! Reads the current device position from a satellite tracker's message
//! feed. Messages are listed newest first; track summaries carry no
//! coordinates and are skipped.

use crate::error::PositionError;
use crate::region::Coordinate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "Messages", default)]
    messages: Vec<FeedMessage>,
}

#[derive(Debug, Deserialize)]
struct FeedMessage {
    #[serde(rename = "Latitude", default)]
    latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<f64>,
}

/// Latest position in a tracker feed
pub fn latest_position(feed_json: &str) -> Result<Coordinate, PositionError> {
    let feed: Feed =
        serde_json::from_str(feed_json).map_err(|e| PositionError::Malformed(e.to_string()))?;

    feed.messages
        .iter()
        .find_map(|m| match (m.latitude, m.longitude) {
            // A zero latitude marks a message without a fix
            (Some(lat), Some(lon)) if lat != 0.0 => Some(Coordinate::new(lat, lon)),
            _ => None,
        })
        .ok_or(PositionError::NoFix)
}
