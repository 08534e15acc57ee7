// © 2024-2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use twilight_model::util::datetime::{Timestamp, TimestampParseError};

/// Gets the [DateTime] object for a timestamp from Discord. If any failures occur in the conversion, returns `None`.
pub fn datetime_from_timestamp(timestamp: &Timestamp) -> Option<DateTime<Utc>> {
	let micros = timestamp.as_micros();
	Utc.timestamp_micros(micros).single()
}

/// Gets a Discord [Timestamp] for the given time, as used in embeds.
pub fn timestamp_from_datetime(datetime: DateTime<Utc>) -> Result<Timestamp, TimestampParseError> {
	Timestamp::from_micros(datetime.timestamp_micros())
}

/// Formats a time as ISO 8601 with millisecond precision in UTC (e.g. `2024-06-01T12:00:00.000Z`).
pub fn iso_timestamp(datetime: &DateTime<Utc>) -> String {
	datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}
