//! GxGGA decoding: fix quality, satellites in use, altitude.

use super::fields::{self, Fields};
use super::records::{FixQuality, GgaData, Talker, Time};

const GGA_TALKERS: [(&[u8; 6], Talker); 5] = [
    (b"$GPGGA", Talker::Gps),
    (b"$GLGGA", Talker::Glonass),
    (b"$GAGGA", Talker::Galileo),
    (b"$GNGGA", Talker::Gnss),
    (b"$BDGGA", Talker::Bds),
];

/// True for any GGA sentence from a recognized talker.
pub fn is_gx_gga(sentence: &[u8]) -> bool {
    talker(sentence).is_some()
}

fn talker(token: &[u8]) -> Option<Talker> {
    GGA_TALKERS
        .iter()
        .find(|(prefix, _)| token.starts_with(*prefix))
        .map(|&(_, talker)| talker)
}

#[derive(Copy, Clone)]
enum State {
    MessageId,
    UtcPositionFix,
    LatitudeVal,
    LatitudeNs,
    LongitudeVal,
    LongitudeEw,
    FixQuality,
    NumberSatellites,
    HorizontalDilutionOfPrecision,
    Altitude,
    AltitudeUnit,
    GeoidalSeparation,
    GeoidalSeparationUnit,
    DgpsAge,
    DgpsId,
    Checksum,
    Done,
}

/// Decodes a framed, checksum-verified GGA sentence into `data`.
///
/// Fully permissive: absent or garbled fields decode to their
/// sentinels and nothing fails the sentence. A GGA sentence has a
/// fixed field count, so the splitter detaches the checksum from the
/// DGPS station ID instead of hunting for it.
pub fn parse(sentence: &[u8], data: &mut GgaData) {
    let mut state = State::MessageId;

    for token in Fields::split_checksum(sentence) {
        state = match state {
            State::MessageId => {
                if let Some(talker) = talker(token) {
                    data.source = talker;
                }
                State::UtcPositionFix
            }
            State::UtcPositionFix => {
                data.time_utc = fields::parse_time(token).unwrap_or(Time::INVALID);
                State::LatitudeVal
            }
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
                State::FixQuality
            }
            State::FixQuality => {
                data.fix_quality = match token.first() {
                    Some(b'1') => FixQuality::GpsFix,
                    Some(b'2') => FixQuality::DgpsFix,
                    _ => FixQuality::Invalid,
                };
                State::NumberSatellites
            }
            State::NumberSatellites => {
                data.num_satellites = fields::parse_i32(token).unwrap_or(-1);
                State::HorizontalDilutionOfPrecision
            }
            State::HorizontalDilutionOfPrecision => {
                data.hdop = fields::parse_f32(token).unwrap_or(f32::NAN);
                State::Altitude
            }
            State::Altitude => {
                data.altitude = fields::parse_f32(token).unwrap_or(f32::NAN);
                State::AltitudeUnit
            }
            // The unit fields are consumed but never overrule a decoded
            // value; an absent value already left its sentinel behind.
            State::AltitudeUnit => State::GeoidalSeparation,
            State::GeoidalSeparation => {
                data.geoidal_separation = fields::parse_f32(token).unwrap_or(f32::NAN);
                State::GeoidalSeparationUnit
            }
            State::GeoidalSeparationUnit => State::DgpsAge,
            State::DgpsAge => {
                data.dgps_age = fields::parse_i32(token).unwrap_or(-1);
                State::DgpsId
            }
            State::DgpsId => {
                data.dgps_id = [0; 4];
                let len = token.len().min(data.dgps_id.len());
                data.dgps_id[..len].copy_from_slice(&token[..len]);
                State::Checksum
            }
            State::Checksum => State::Done,
            State::Done => break,
        };
    }
}
