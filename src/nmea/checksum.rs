//! NMEA XOR checksum verification.
//!
//! A sentence checksum covers every byte strictly between the leading
//! `'$'` and the `'*'` delimiter and is transmitted as two hex digits
//! right after the `'*'`.

/// Verifies the checksum of a framed sentence (`$...*hh...`). False
/// when the sentence carries no `'*'` or the digits don't parse.
pub fn is_checksum_ok(sentence: &[u8]) -> bool {
    extract_checksum(sentence).map_or(false, |expected| expected == calc_checksum(sentence))
}

/// True iff `token` looks like the final field of a sentence with the
/// checksum still attached: `<field>*<2 hex digits>`. Lets a tokenizer
/// spot the checksum early when a receiver omits optional fields.
pub fn is_checksum_token(token: &[u8]) -> bool {
    match token.iter().position(|&c| c == b'*') {
        Some(star) => matches!(
            token.get(star + 1..star + 3),
            Some(digits) if digits.iter().all(u8::is_ascii_hexdigit)
        ),
        None => false,
    }
}

fn calc_checksum(sentence: &[u8]) -> u8 {
    let (checksum, _) = sentence
        .iter()
        .fold((0u8, false), |(checksum, in_payload), &c| match c {
            b'$' => (checksum, true),
            b'*' => (checksum, false),
            _ if in_payload => (checksum ^ c, true),
            _ => (checksum, in_payload),
        });
    checksum
}

fn extract_checksum(sentence: &[u8]) -> Option<u8> {
    let star = sentence.iter().position(|&c| c == b'*')?;
    let digits = sentence.get(star + 1..star + 3)?;
    let digits = core::str::from_utf8(digits).ok()?;
    u8::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_checksum_mtk3333() {
        let gprmc: &[u8] =
            b"$GPRMC,062101.714,A,5001.869,N,01912.114,E,955535.7,116.2,290520,000.0,W*45\r\n";
        assert!(is_checksum_ok(gprmc));
    }

    #[test]
    fn valid_checksum_ublox_neo_6m() {
        let gprmc: &[u8] =
            b"$GPRMC,193517.00,A,4837.99895,N,01301.58584,E,0.793,,111020,,,A*7D\r\n";
        assert!(is_checksum_ok(gprmc));
    }

    #[test]
    fn invalid_checksum() {
        let gprmc: &[u8] =
            b"$GPRMC,062101.714,A,5001.869,N,01912.114,E,955535.7,116.2,290520,000.0,W*FF\r\n";
        assert!(!is_checksum_ok(gprmc));
    }

    #[test]
    fn lowercase_hex_digits_accepted() {
        let gpgga: &[u8] =
            b"$GPGGA,111908.952,4838.0060,N,01301.5895,E,1,05,2.4,454.7,M,46.6,M,0.0,0000*7a\r\n";
        assert!(is_checksum_ok(gpgga));
    }

    #[test]
    fn missing_star_is_rejected() {
        assert!(!is_checksum_ok(b"$GPRMC,062101.714,A\r\n"));
    }

    #[test]
    fn any_single_payload_flip_breaks_the_checksum() {
        let good = b"$GPRMC,052856.105,A,5230.874,N,01321.056,E,085.7,206.4,080720,000.0,W*78\r\n";
        let star = good.iter().position(|&c| c == b'*').unwrap();

        for i in 1..star {
            let mut corrupted = *good;
            corrupted[i] ^= 0x01;
            assert!(
                !is_checksum_ok(&corrupted),
                "flip at offset {i} went undetected"
            );
        }
    }

    #[test]
    fn checksum_token_classification() {
        assert!(is_checksum_token(b"W*FF"));
        assert!(is_checksum_token(b"N*7B\r\n"));
        assert!(is_checksum_token(b"*53"));
        assert!(!is_checksum_token(b"01912.114"));
        assert!(!is_checksum_token(b"W*F"));
        assert!(!is_checksum_token(b""));
    }
}
