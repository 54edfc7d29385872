#![cfg_attr(not(test), no_std)]

pub mod nmea;

pub use nmea::{
    records::{Date, FixQuality, GgaData, RmcData, Talker, Time},
    Error, NmeaParser,
};

/// A decoded WGS84 coordinate pair, in signed degrees.
#[derive(Debug, Default, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub lat: f32,
    pub lon: f32,
}
