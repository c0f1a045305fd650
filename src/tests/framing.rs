use crate::{ChecksumMode, FrameError, LineEndingMode, checksum, checksum_trailer, frame};

const GGA: &str = "$GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*59";

fn strict(line: &str) -> Result<crate::Frame<'_>, FrameError> {
    frame(line, ChecksumMode::Required, LineEndingMode::Tolerated)
}

#[test]
fn test_frame_ok() {
    let res = strict(GGA);
    assert!(res.is_ok());

    let frame = res.unwrap();
    assert_eq!(frame.sentence, GGA);
    assert_eq!(
        frame.payload,
        "GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,"
    );
    assert_eq!(frame.checksum, Some(0x59));
}

#[test]
fn test_frame_lowercase_hex() {
    let res = strict("$GPGGA,123456,data*4a");
    assert_eq!(
        res,
        Err(FrameError::ChecksumMismatch {
            expected: 0x41,
            found: 0x4A
        })
    );

    assert!(strict("$GNRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,,,A*62").is_ok());
    assert!(strict("$GPGGA,123456,data*41").is_ok());
}

#[test]
fn test_frame_crlf() {
    let line = format!("{GGA}\r");

    let res = frame(&line, ChecksumMode::Required, LineEndingMode::Tolerated);
    assert_eq!(res.map(|f| f.sentence), Ok(GGA));

    let res = frame(&line, ChecksumMode::Required, LineEndingMode::Forbidden);
    assert_eq!(res, Err(FrameError::LineEnding));

    // only a single carriage return is stripped
    let line = format!("{GGA}\r\r");
    let res = frame(&line, ChecksumMode::Required, LineEndingMode::Tolerated);
    assert_eq!(res, Err(FrameError::MalformedChecksum));
}

#[test]
fn test_frame_missing_checksum() {
    let line = "$GPGGA,123456,data";

    assert_eq!(strict(line), Err(FrameError::MissingChecksum));

    let res = frame(line, ChecksumMode::Optional, LineEndingMode::Tolerated);
    assert!(res.is_ok());

    let frame = res.unwrap();
    assert_eq!(frame.payload, "GPGGA,123456,data");
    assert_eq!(frame.checksum, None);
}

#[test]
fn test_frame_optional_checksum_still_validated() {
    let res = frame(
        "$GPGGA,123456,data*99",
        ChecksumMode::Optional,
        LineEndingMode::Tolerated,
    );
    assert_eq!(
        res,
        Err(FrameError::ChecksumMismatch {
            expected: 0x41,
            found: 0x99
        })
    );
}

#[test]
fn test_frame_malformed_trailer() {
    assert_eq!(strict("$GPGGA,123456,data*"), Err(FrameError::MalformedChecksum));
    assert_eq!(strict("$GPGGA,123456,data*4"), Err(FrameError::MalformedChecksum));
    assert_eq!(strict("$GPGGA,123456,data*411"), Err(FrameError::MalformedChecksum));
    assert_eq!(strict("$GPGGA,123456,data*4z"), Err(FrameError::MalformedChecksum));
    assert_eq!(strict("$GPGGA,123456,data*41 "), Err(FrameError::MalformedChecksum));
}

#[test]
fn test_frame_anchors_on_last_star() {
    // the first '*' is part of the payload
    let payload = "GPTXT,a*b";
    let (_, cc) = checksum(payload);
    let line = format!("${payload}*{cc:02X}");

    let res = strict(&line);
    assert_eq!(res.map(|f| f.payload), Ok(payload));
}

#[test]
fn test_frame_start_and_ascii() {
    assert_eq!(strict("GPGGA,123456,data*41"), Err(FrameError::MissingStart));
    assert_eq!(strict(""), Err(FrameError::MissingStart));
    assert_eq!(strict("!GPGGA,123456,data*41"), Err(FrameError::MissingStart));
    assert_eq!(strict("$GPGGA,12345é,data*41"), Err(FrameError::NonAscii));
}

#[test]
fn test_checksum_trailer() {
    assert_eq!(checksum_trailer("1F"), Ok(("", 0x1F)));
    assert_eq!(checksum_trailer("00"), Ok(("", 0x00)));
    assert_eq!(checksum_trailer("ff"), Ok(("", 0xFF)));
    assert!(checksum_trailer("1F43").is_err());
    assert!(checksum_trailer("1Fzz").is_err());
    assert!(checksum_trailer("1").is_err());
    assert!(checksum_trailer("1z").is_err());
    assert!(checksum_trailer("").is_err());
}

#[test]
fn test_single_byte_mutation_breaks_checksum() {
    let payload = "GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
    let (_, cc) = checksum(payload);

    for index in 0..payload.len() {
        let mut mutated = payload.as_bytes().to_vec();
        mutated[index] = if mutated[index] == b'0' { b'1' } else { b'0' };
        let mutated = String::from_utf8(mutated).unwrap();

        let line = format!("${mutated}*{cc:02X}");
        assert!(
            matches!(strict(&line), Err(FrameError::ChecksumMismatch { .. })),
            "mutation at {index} went unnoticed"
        );
    }
}
