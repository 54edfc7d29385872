//! GxRMC decoding: recommended minimum navigation data.

use super::checksum;
use super::fields::{self, Fields};
use super::records::{Date, RmcData, Talker, Time};
use super::Error;

const RMC_TALKERS: [(&[u8; 6], Talker); 5] = [
    (b"$GPRMC", Talker::Gps),
    (b"$GLRMC", Talker::Glonass),
    (b"$GARMC", Talker::Galileo),
    (b"$GNRMC", Talker::Gnss),
    (b"$BDRMC", Talker::Bds),
];

/// True for any RMC sentence from a recognized talker.
pub fn is_gx_rmc(sentence: &[u8]) -> bool {
    talker(sentence).is_some()
}

fn talker(token: &[u8]) -> Option<Talker> {
    RMC_TALKERS
        .iter()
        .find(|(prefix, _)| token.starts_with(*prefix))
        .map(|&(_, talker)| talker)
}

const KNOTS_PER_M_PER_S: f32 = 1.9438444924574;

fn knots_to_m_per_s(knots: f32) -> f32 {
    knots / KNOTS_PER_M_PER_S
}

// One state per comma-separated field, in wire order. Parsing is
// positional: a state consumes exactly one token and names the field
// that token holds.
#[derive(Copy, Clone)]
enum State {
    MessageId,
    UtcPositionFix,
    Status,
    LatitudeVal,
    LatitudeNs,
    LongitudeVal,
    LongitudeEw,
    SpeedOverGround,
    TrackAngle,
    Date,
    MagneticVariation,
    MagneticVariationEastWest,
    Checksum,
    Done,
}

/// Decodes a framed, checksum-verified RMC sentence into `data`.
///
/// Absent fields decode to their sentinels and unrecognized values are
/// tolerated, with one exception: an empty or unknown status field
/// fails the whole sentence with [`Error::Rmc`]. `data` may be left
/// partially updated on failure, so parse into a scratch record and
/// commit on success.
pub fn parse(sentence: &[u8], data: &mut RmcData) -> Result<(), Error> {
    let mut state = State::MessageId;

    for token in Fields::new(sentence) {
        // Only the fields up to track angle are mandatory. When a
        // receiver omits the optional tail, the checksum field shows up
        // early, still glued to the last value (`W*45`); jump straight
        // to the checksum state instead of consuming it positionally.
        if checksum::is_checksum_token(token) {
            state = State::Checksum;
        }

        state = match state {
            State::MessageId => {
                if let Some(talker) = talker(token) {
                    data.source = talker;
                }
                State::UtcPositionFix
            }
            State::UtcPositionFix => {
                data.time_utc = fields::parse_time(token).unwrap_or(Time::INVALID);
                State::Status
            }
            State::Status => match token.first() {
                Some(b'A') => {
                    data.is_valid = true;
                    State::LatitudeVal
                }
                // A void fix still carries time and date worth keeping,
                // so keep tokenizing.
                Some(b'V') => {
                    data.is_valid = false;
                    State::LatitudeVal
                }
                _ => {
                    data.is_valid = false;
                    return Err(Error::Rmc);
                }
            },
            State::LatitudeVal => {
                data.latitude = fields::parse_latitude(token);
                State::LatitudeNs
            }
            State::LatitudeNs => {
                if token.first() == Some(&b'S') {
                    data.latitude = -data.latitude;
                }
                State::LongitudeVal
            }
            State::LongitudeVal => {
                data.longitude = fields::parse_longitude(token);
                State::LongitudeEw
            }
            State::LongitudeEw => {
                if token.first() == Some(&b'W') {
                    data.longitude = -data.longitude;
                }
                State::SpeedOverGround
            }
            State::SpeedOverGround => {
                data.speed = fields::parse_f32(token)
                    .map(knots_to_m_per_s)
                    .unwrap_or(f32::NAN);
                State::TrackAngle
            }
            State::TrackAngle => {
                data.course = fields::parse_f32(token).unwrap_or(f32::NAN);
                State::Date
            }
            State::Date => {
                data.date = fields::parse_date(token).unwrap_or(Date::INVALID);
                State::MagneticVariation
            }
            State::MagneticVariation => {
                data.magnetic_variation = fields::parse_f32(token).unwrap_or(f32::NAN);
                State::MagneticVariationEastWest
            }
            State::MagneticVariationEastWest => {
                if token.first() == Some(&b'W') {
                    data.magnetic_variation = -data.magnetic_variation;
                }
                State::Checksum
            }
            State::Checksum => State::Done,
            State::Done => break,
        };
    }

    Ok(())
}
