// Windcast - Compact wind forecasts for satellite text links
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Integration tests for message composition
//!
//! These tests run raw forecast rows through the daytime filter, the
//! composer and the transport budget, the way the CLI does.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use windcast::codec::split_fields;
use windcast::{
    compose, deliver, quantize_direction, Budget, DaytimeFilter, MemoryChannel, Metric, RawPoint,
    RetryStrategy, Series, ShapeError, WindcastConfig, WindcastError, DAY_SEPARATOR,
};

fn pacific() -> FixedOffset {
    FixedOffset::west_opt(7 * 3600).unwrap()
}

fn midnight() -> DateTime<FixedOffset> {
    pacific().with_ymd_and_hms(2025, 7, 14, 0, 0, 0).unwrap()
}

/// 72 hourly rows starting at midnight, values from `f(hour_index)`
fn raw_forecast<F>(f: F) -> Vec<RawPoint>
where
    F: Fn(i64) -> (f64, f64, f64),
{
    (0..72)
        .map(|h| {
            let (speed, gusts, direction) = f(h);
            RawPoint {
                timestamp: midnight() + Duration::hours(h),
                speed: Some(speed),
                gusts: Some(gusts),
                direction: Some(direction),
            }
        })
        .collect()
}

#[test]
fn test_end_to_end_two_locations() {
    let calm = Series::from_raw("(46.85, -121.76)", &raw_forecast(|_| (4.2, 7.6, 181.0))).unwrap();
    let building =
        Series::from_raw("(46.79, -121.74)", &raw_forecast(|h| (h as f64, h as f64 + 5.0, 270.0)))
            .unwrap();

    let now = midnight() + Duration::hours(5);
    let filter = DaytimeFilter::default();
    let series: Vec<Series> = [calm, building]
        .iter()
        .map(|s| filter.apply(s, &now))
        .collect();

    let message = compose(&series, "mount_rainier").unwrap();

    // Today 06..=20 is 15 rows: 7 two-hour windows. Tomorrow: 3 four-hour windows.
    // Location "(46.79, ...)" sorts before "(46.85, ...)".
    let building_today = format!("W7{}G12{}D27", "2".repeat(6), "2".repeat(6));
    let calm_today = "W4G8D18";
    let building_tomorrow = "W3344G3844D27";
    let calm_tomorrow = "W4G8D18";
    assert_eq!(
        message.as_str(),
        format!(
            "mr6{}{}T{}{}",
            building_today, calm_today, building_tomorrow, calm_tomorrow
        )
    );
}

#[test]
fn test_start_hour_after_now() {
    let series = Series::from_raw("a", &raw_forecast(|_| (10.0, 12.0, 90.0))).unwrap();
    let now = midnight() + Duration::hours(13) + Duration::minutes(20);
    let filtered = DaytimeFilter::default().apply(&series, &now);

    let message = compose(&[filtered], "mt_hood").unwrap();
    assert!(message.as_str().starts_with("mh14"));
}

#[test]
fn test_after_evening_missing_tomorrow() {
    // Running late on the last forecast day leaves a single day group
    let series = Series::from_raw("a", &raw_forecast(|_| (10.0, 12.0, 90.0))).unwrap();
    let now = midnight() + Duration::hours(2 * 24 + 12);
    let filtered = DaytimeFilter::default().apply(&series, &now);

    let result = compose(&[filtered], "mt_hood");
    assert!(matches!(
        result,
        Err(WindcastError::Shape(ShapeError::MissingDay { found: 1, .. }))
    ));
}

#[test]
fn test_exactly_one_separator() {
    let series = Series::from_raw(
        "a",
        &raw_forecast(|h| ((h % 7) as f64, (h % 11) as f64, (h * 13 % 360) as f64)),
    )
    .unwrap();
    let now = midnight();
    let filtered = DaytimeFilter::default().apply(&series, &now);
    let message = compose(&[filtered], "mt_hood").unwrap();

    let separators = message.as_str().matches(DAY_SEPARATOR).count();
    assert_eq!(separators, 1);

    let (header, fields) = split_fields(message.as_str());
    assert_eq!(header, message.header());
    let split = fields.iter().position(|f| f.tag == DAY_SEPARATOR).unwrap();
    assert!(fields[..split].iter().all(|f| f.metric().is_some()));
    assert!(fields[split + 1..].iter().all(|f| f.metric().is_some()));
    assert!(fields.iter().all(|f| f.is_well_formed()));
    assert_eq!(
        fields[..split].iter().map(|f| f.metric()).collect::<Vec<_>>(),
        vec![Some(Metric::Speed), Some(Metric::Gusts), Some(Metric::Direction)]
    );
}

#[test]
fn test_direction_boundaries() {
    // 95 and 105 both quantize to 10 under half-to-even rounding
    assert_eq!(quantize_direction(95), 10);
    assert_eq!(quantize_direction(105), 10);

    let directions = [95.0, 95.0, 105.0, 105.0];
    let series = Series::from_raw(
        "a",
        &raw_forecast(|h| {
            let index = (h - 6).clamp(0, 3) as usize;
            (0.0, 0.0, directions[index])
        }),
    )
    .unwrap();
    let filtered = DaytimeFilter::new(6, 9)
        .unwrap()
        .apply(&series, &midnight());
    let message = compose(&[filtered], "a").unwrap();
    assert_eq!(message.today(), "WGD10");
}

#[test]
fn test_config_driven_delivery() {
    let config = WindcastConfig::from_json(r#"{ "transport": { "budget": 12 } }"#).unwrap();
    let series = Series::from_raw("a", &raw_forecast(|h| (h as f64, 30.0, 200.0))).unwrap();
    let filtered = config
        .daytime_filter()
        .unwrap()
        .apply(&series, &midnight());
    let composer = windcast::Composer::with_config(config.composer_config()).unwrap();
    let message = composer.compose(&[filtered], "mt_hood").unwrap();

    let mut channel = MemoryChannel::new();
    let budget = config.budget().unwrap();
    let sent = deliver(&mut channel, &message, budget, &RetryStrategy::None).unwrap();

    assert_eq!(channel.last().unwrap().len(), 12);
    assert!(sent.is_truncated());
    assert_eq!(format!("{}{}", sent.sent, sent.overflow), message.as_str());
    assert_eq!(budget, Budget::new(12).unwrap());
}
