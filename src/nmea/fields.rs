//! Field tokenization shared by the RMC and GGA decoders.
//!
//! Sentences are split with a cursor over the framed byte slice; the
//! input is never mutated and every token is a subslice of it.

use core::ops::Range;

use super::records::{Date, Time};

/// Lazy iterator over the comma-separated fields of a sentence.
///
/// A trailing separator yields a final empty field, and consecutive
/// separators yield empty fields in between, so field positions stay
/// stable when a receiver leaves values out. [`Fields::split_checksum`]
/// additionally treats `'*'` as a separator, turning the field right
/// before the checksum into a regular token.
pub(crate) struct Fields<'a> {
    rest: Option<&'a [u8]>,
    split_at_star: bool,
}

impl<'a> Fields<'a> {
    pub fn new(sentence: &'a [u8]) -> Self {
        Self {
            rest: Some(sentence),
            split_at_star: false,
        }
    }

    pub fn split_checksum(sentence: &'a [u8]) -> Self {
        Self {
            rest: Some(sentence),
            split_at_star: true,
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest?;
        let split_at_star = self.split_at_star;
        match rest
            .iter()
            .position(|&c| c == b',' || (split_at_star && c == b'*'))
        {
            Some(sep) => {
                self.rest = Some(&rest[sep + 1..]);
                Some(&rest[..sep])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// `HHMMSS.sss` → [`Time`]. The fractional digits (at most three) go
/// into `microsecond` unscaled, matching the wire precision.
pub(crate) fn parse_time(token: &[u8]) -> Option<Time> {
    let hour = int_field(token, 0..2)?;
    let minute = int_field(token, 2..4)?;
    let second = int_field(token, 4..6)?;

    let frac = token.get(7..).unwrap_or(&[]);
    let frac = &frac[..frac.len().min(3)];
    let microsecond = if frac.is_empty() {
        0
    } else {
        parse_i32(frac)?
    };

    Some(Time {
        hour,
        minute,
        second,
        microsecond,
    })
}

/// `DDMM.mmmm` → signed degrees (sign applied later from the N/S field).
pub(crate) fn parse_latitude(token: &[u8]) -> f32 {
    parse_angle(token, 2)
}

/// `DDDMM.mmmm` → signed degrees (sign applied later from the E/W field).
pub(crate) fn parse_longitude(token: &[u8]) -> f32 {
    parse_angle(token, 3)
}

fn parse_angle(token: &[u8], deg_digits: usize) -> f32 {
    let Some(degrees) = int_field(token, 0..deg_digits) else {
        return f32::NAN;
    };
    let minutes = token
        .get(deg_digits..)
        .and_then(|m| core::str::from_utf8(m).ok())
        .and_then(|m| m.parse::<f32>().ok());
    match minutes {
        Some(minutes) => degrees as f32 + minutes / 60.0,
        None => f32::NAN,
    }
}

/// `DDMMYY` → [`Date`] with the century fixed to 2000.
pub(crate) fn parse_date(token: &[u8]) -> Option<Date> {
    Some(Date {
        day: int_field(token, 0..2)?,
        month: int_field(token, 2..4)?,
        year: 2000 + int_field(token, 4..6)?,
    })
}

pub(crate) fn parse_f32(token: &[u8]) -> Option<f32> {
    core::str::from_utf8(token).ok()?.parse().ok()
}

/// Integer from the token's leading digits, ignoring whatever follows
/// (`"0.0"` decodes as `0`). `None` when no digits lead the token.
pub(crate) fn parse_i32(token: &[u8]) -> Option<i32> {
    let digits_end = token
        .iter()
        .position(|c| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let digits = token.get(..digits_end).filter(|d| !d.is_empty())?;
    core::str::from_utf8(digits).ok()?.parse().ok()
}

fn int_field(token: &[u8], range: Range<usize>) -> Option<i32> {
    core::str::from_utf8(token.get(range)?).ok()?.parse().ok()
}
