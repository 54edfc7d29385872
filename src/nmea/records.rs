use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::Position;

/// UTC time of day as reported in a sentence's position-fix field.
///
/// Either all four fields hold decoded values or all four are `-1`,
/// meaning the receiver has no time fix yet. `microsecond` carries the
/// up-to-three-digit fractional part of the fix time exactly as it
/// appears on the wire, so its resolution is milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub microsecond: i32,
}

impl Time {
    pub const INVALID: Self = Self {
        hour: -1,
        minute: -1,
        second: -1,
        microsecond: -1,
    };

    pub fn is_valid(&self) -> bool {
        self.hour != Self::INVALID.hour
            && self.minute != Self::INVALID.minute
            && self.second != Self::INVALID.second
            && self.microsecond != Self::INVALID.microsecond
    }
}

/// UTC date from an RMC sentence. `year` is already expanded from the
/// two wire digits (2000..=2099); `-1` in every field means no date fix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

impl Date {
    pub const INVALID: Self = Self {
        day: -1,
        month: -1,
        year: -1,
    };

    pub fn is_valid(&self) -> bool {
        self.day != Self::INVALID.day
            && self.month != Self::INVALID.month
            && self.year != Self::INVALID.year
    }
}

/// Satellite system that produced a sentence, from its two-letter
/// talker ID.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Talker {
    Unknown,
    Gps,
    Glonass,
    Galileo,
    Gnss,
    Bds,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    Invalid,
    GpsFix,
    DgpsFix,
}

/// Decoded GxRMC record: position, velocity, time/date, validity.
///
/// Absent floating point fields are `NAN`; absent time/date fields are
/// the `-1` sentinels. A field keeps its previous value when a sentence
/// omits the corresponding token entirely (short sentence), so stale
/// data can survive a void fix. Check `is_valid` before trusting the
/// position.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RmcData {
    pub source: Talker,
    pub time_utc: Time,
    pub is_valid: bool,
    /// Degrees, north positive.
    pub latitude: f32,
    /// Degrees, east positive.
    pub longitude: f32,
    /// Meters per second over ground.
    pub speed: f32,
    /// Track angle in degrees.
    pub course: f32,
    /// Degrees, west negative.
    pub magnetic_variation: f32,
    pub date: Date,
}

impl RmcData {
    pub const INVALID: Self = Self {
        source: Talker::Unknown,
        time_utc: Time::INVALID,
        is_valid: false,
        latitude: f32::NAN,
        longitude: f32::NAN,
        speed: f32::NAN,
        course: f32::NAN,
        magnetic_variation: f32::NAN,
        date: Date::INVALID,
    };

    pub fn has_datetime(&self) -> bool {
        self.date.is_valid() && self.time_utc.is_valid()
    }

    pub fn position(&self) -> Option<Position> {
        position(self.latitude, self.longitude)
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        datetime_utc(&self.date, &self.time_utc)
    }

    /// Seconds since the Unix epoch, rounded to the nearest second.
    pub fn timestamp(&self) -> Option<i64> {
        self.datetime().map(|dt| dt.timestamp())
    }
}

/// Decoded GxGGA record: position, fix quality, satellites, altitude.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GgaData {
    pub source: Talker,
    pub time_utc: Time,
    /// Degrees, north positive.
    pub latitude: f32,
    /// Degrees, east positive.
    pub longitude: f32,
    pub fix_quality: FixQuality,
    /// `-1` when the field is absent.
    pub num_satellites: i32,
    pub hdop: f32,
    /// Meters above mean sea level.
    pub altitude: f32,
    /// Meters, geoid above WGS84 ellipsoid.
    pub geoidal_separation: f32,
    /// Seconds since the last DGPS update, `-1` when absent.
    pub dgps_age: i32,
    /// DGPS station ID, fixed width, zero filled. Not a C string:
    /// compare the four bytes, don't look for a terminator.
    pub dgps_id: [u8; 4],
}

impl GgaData {
    pub const INVALID: Self = Self {
        source: Talker::Unknown,
        time_utc: Time::INVALID,
        latitude: f32::NAN,
        longitude: f32::NAN,
        fix_quality: FixQuality::Invalid,
        num_satellites: -1,
        hdop: f32::NAN,
        altitude: f32::NAN,
        geoidal_separation: f32::NAN,
        dgps_age: -1,
        dgps_id: [0; 4],
    };

    pub fn position(&self) -> Option<Position> {
        position(self.latitude, self.longitude)
    }
}

fn position(lat: f32, lon: f32) -> Option<Position> {
    if lat.is_finite() && lon.is_finite() {
        Some(Position { lat, lon })
    } else {
        None
    }
}

/// Combines a decoded date and time into a UTC datetime, rounding the
/// fractional part to the nearest whole second. `None` if either input
/// is the sentinel or out of range.
pub fn datetime_utc(date: &Date, time: &Time) -> Option<DateTime<Utc>> {
    if !date.is_valid() || !time.is_valid() {
        return None;
    }

    let day = NaiveDate::from_ymd_opt(
        date.year,
        u32::try_from(date.month).ok()?,
        u32::try_from(date.day).ok()?,
    )?;
    let tod = NaiveTime::from_hms_opt(
        u32::try_from(time.hour).ok()?,
        u32::try_from(time.minute).ok()?,
        u32::try_from(time.second).ok()?,
    )?;

    let mut dt = NaiveDateTime::new(day, tod);
    if time.microsecond > 500 {
        dt = dt.checked_add_signed(TimeDelta::seconds(1))?;
    }

    Some(DateTime::from_naive_utc_and_offset(dt, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_time_is_invalid() {
        assert!(!Time::INVALID.is_valid());
        assert!(Time {
            hour: 13,
            minute: 37,
            second: 25,
            microsecond: 0
        }
        .is_valid());
    }

    #[test]
    fn time_with_one_sentinel_field_is_invalid() {
        let time = Time {
            hour: 13,
            minute: -1,
            second: 25,
            microsecond: 0,
        };
        assert!(!time.is_valid());
    }

    #[test]
    fn invalid_date_is_invalid() {
        assert!(!Date::INVALID.is_valid());
        assert!(Date {
            day: 29,
            month: 10,
            year: 2020
        }
        .is_valid());
    }

    #[test]
    fn posix_timestamp_rounds_up_past_half_second() {
        let date = Date {
            day: 29,
            month: 10,
            year: 2020,
        };
        let time = Time {
            hour: 13,
            minute: 37,
            second: 25,
            microsecond: 689,
        };

        let dt = datetime_utc(&date, &time).unwrap();
        assert_eq!(dt.timestamp(), 1603978646);
    }

    #[test]
    fn posix_timestamp_rounds_down_below_half_second() {
        let date = Date {
            day: 29,
            month: 10,
            year: 2020,
        };
        let time = Time {
            hour: 13,
            minute: 37,
            second: 25,
            microsecond: 322,
        };

        let dt = datetime_utc(&date, &time).unwrap();
        assert_eq!(dt.timestamp(), 1603978646 - 1);
    }

    #[test]
    fn round_up_carries_into_the_next_minute() {
        let date = Date {
            day: 29,
            month: 10,
            year: 2020,
        };
        let time = Time {
            hour: 13,
            minute: 37,
            second: 59,
            microsecond: 900,
        };

        let dt = datetime_utc(&date, &time).unwrap();
        assert_eq!(dt.timestamp(), 1603978680);
    }

    #[test]
    fn no_datetime_from_sentinels() {
        let date = Date {
            day: 29,
            month: 10,
            year: 2020,
        };
        assert!(datetime_utc(&date, &Time::INVALID).is_none());
        assert!(datetime_utc(
            &Date::INVALID,
            &Time {
                hour: 1,
                minute: 2,
                second: 3,
                microsecond: 0
            }
        )
        .is_none());
    }

    #[test]
    fn invalid_record_has_no_position() {
        assert!(RmcData::INVALID.position().is_none());
        assert!(GgaData::INVALID.position().is_none());

        let mut rmc = RmcData::INVALID;
        rmc.latitude = 52.514467;
        rmc.longitude = 13.3493;
        let pos = rmc.position().unwrap();
        assert!((pos.lat - 52.514467).abs() < 1e-5);
        assert!((pos.lon - 13.3493).abs() < 1e-5);
    }
}
