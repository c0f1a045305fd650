use std::thread;

use crate::{
    ChecksumMode, Decoder, DecoderConfig, FixQuality, FixedDeclination, FrameError,
    NavigationMode, NavigationState, Outcome, PositionStatus, SentenceId, SharedNavigation,
    Talker, UtcEpoch,
};

const GGA: &str = "$GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*59";
const RMC: &str = "$GNRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,,,A*62";

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value should be set");
    assert!(
        (actual - expected).abs() < 1e-4,
        "{actual} is not close to {expected}"
    );
}

#[test]
fn test_gga_scenario() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();

    let outcome = decoder.decode(GGA, &mut state);
    assert_eq!(
        outcome,
        Outcome::Applied {
            talker: Talker::Combined,
            sentence: SentenceId::Gga
        }
    );

    assert_close(state.latitude, 48.1173);
    assert_close(state.longitude, 11.5167);
    assert_eq!(state.fix_quality, FixQuality::SinglePoint);
    assert_eq!(state.num_satellites, Some(8));
    assert_eq!(state.horizontal_dilution, Some(0.9));
    assert_eq!(state.altitude, Some(545.4));
    assert_eq!(state.geoid_undulation, Some(46.9));
}

#[test]
fn test_tampered_gga_is_discarded() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();
    decoder.decode(RMC, &mut state);
    let before = state;

    // altitude 545.4 -> 545.5, original trailer kept
    let tampered = "$GNGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.5,M,46.9,M,,*59";
    let outcome = decoder.decode(tampered, &mut state);

    assert_eq!(
        outcome,
        Outcome::Discarded(FrameError::ChecksumMismatch {
            expected: 0x58,
            found: 0x59
        })
    );
    assert_eq!(state, before);
}

#[test]
fn test_rmc_scenario() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();

    let outcome = decoder.decode(RMC, &mut state);
    assert!(outcome.is_applied());

    assert_eq!(state.position_status, PositionStatus::Valid);
    assert_eq!(state.navigation_mode, NavigationMode::Autonomous);
    assert_eq!(
        state.utc,
        Some(UtcEpoch {
            seconds: 764_426_119,
            microseconds: 0
        })
    );
    assert_eq!(state.speed_over_ground, Some(22.4));
    assert_eq!(state.course_over_ground, Some(84.4));

    // RMC leaves the GGA fields alone
    assert_eq!(state.latitude, None);
    assert_eq!(state.fix_quality, FixQuality::Invalid);
}

#[test]
fn test_unlisted_quality_code_is_invalid() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();
    decoder.decode(GGA, &mut state);
    assert_eq!(state.fix_quality, FixQuality::SinglePoint);

    let outcome = decoder.decode(
        "$GNGGA,123519,4807.038,N,01131.000,E,3,08,0.9,545.4,M,46.9,M,,*5B",
        &mut state,
    );
    assert!(outcome.is_applied());
    assert_eq!(state.fix_quality, FixQuality::Invalid);
}

#[test]
fn test_out_of_byte_quality_code_is_invalid() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();

    for line in [
        "$GNGGA,123519,4807.038,N,01131.000,E,256,08,0.9,545.4,M,46.9,M,,*59",
        "$GNGGA,123519,4807.038,N,01131.000,E,-1,08,0.9,545.4,M,46.9,M,,*74",
    ] {
        decoder.decode(
            "$GNGGA,123519,4807.038,N,01131.000,E,4,08,0.9,545.4,M,46.9,M,,*5C",
            &mut state,
        );
        assert_eq!(state.fix_quality, FixQuality::RtkFixed);

        assert!(decoder.decode(line, &mut state).is_applied());
        assert_eq!(state.fix_quality, FixQuality::Invalid, "{line}");
    }
}

#[test]
fn test_leap_second_updates_timestamp() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();

    decoder.decode(
        "$GNRMC,235960,A,4807.038,N,01131.000,E,022.4,084.4,311216,,,A*6D",
        &mut state,
    );
    // 2016-12-31T23:59:59.999999Z
    assert_eq!(
        state.utc,
        Some(UtcEpoch {
            seconds: 1_483_228_799,
            microseconds: 999_999,
        })
    );
}

#[test]
fn test_decoding_twice_is_idempotent() {
    let mut decoder = Decoder::with_declination(DecoderConfig::default(), FixedDeclination(2.5));

    let mut once = NavigationState::new();
    decoder.decode(RMC, &mut once);
    decoder.decode(GGA, &mut once);

    let mut twice = once;
    decoder.decode(RMC, &mut twice);
    decoder.decode(GGA, &mut twice);

    assert_eq!(once, twice);
    assert_eq!(once.magnetic_declination, Some(2.5));
}

#[test]
fn test_empty_fields_are_sticky() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();
    decoder.decode(GGA, &mut state);
    decoder.decode(RMC, &mut state);
    let before = state;

    let outcome = decoder.decode("$GNGGA,,,,,,,,,,,,,,*48", &mut state);
    assert!(outcome.is_applied());
    assert_eq!(state, before);

    let outcome = decoder.decode(
        "$GNGGA,123520,,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*4D",
        &mut state,
    );
    assert!(outcome.is_applied());
    assert_eq!(state.latitude, before.latitude);
}

#[test]
fn test_out_of_range_minutes_are_sticky() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();
    decoder.decode(GGA, &mut state);

    decoder.decode(
        "$GNGGA,123519,4875.000,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*57",
        &mut state,
    );
    assert_close(state.latitude, 48.1173);
}

#[test]
fn test_unknown_sentences_are_ignored() {
    let mut decoder = Decoder::new(DecoderConfig::default());
    let mut state = NavigationState::new();

    let outcome = decoder.decode(
        "$GNGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*6A",
        &mut state,
    );
    assert_eq!(outcome, Outcome::Ignored);

    let outcome = decoder.decode("$PUBX,00,123519*12", &mut state);
    assert_eq!(outcome, Outcome::Ignored);

    assert_eq!(state, NavigationState::default());
}

#[test]
fn test_talker_filter() {
    let config = DecoderConfig::default().with_talker(Talker::Combined);
    let mut decoder = Decoder::new(config);
    let mut state = NavigationState::new();

    let glonass = "$GLGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*5B";
    assert_eq!(decoder.decode(glonass, &mut state), Outcome::Ignored);
    assert_eq!(state.latitude, None);

    let mut decoder = Decoder::new(DecoderConfig::default());
    assert_eq!(
        decoder.decode(glonass, &mut state),
        Outcome::Applied {
            talker: Talker::Glonass,
            sentence: SentenceId::Gga
        }
    );
}

#[test]
fn test_missing_checksum() {
    let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
    let mut state = NavigationState::new();

    let mut decoder = Decoder::new(DecoderConfig::default());
    assert_eq!(
        decoder.decode(line, &mut state),
        Outcome::Discarded(FrameError::MissingChecksum)
    );
    assert_eq!(state.latitude, None);

    let mut decoder =
        Decoder::new(DecoderConfig::default().with_checksum(ChecksumMode::Optional));
    assert!(decoder.decode(line, &mut state).is_applied());
    assert_close(state.latitude, 48.1173);
}

#[test]
fn test_declination_seeded_value_survives_rmc() {
    let mut decoder = Decoder::with_declination(DecoderConfig::default(), FixedDeclination(1.0));
    let mut state = NavigationState::with_declination(-14.42);

    decoder.decode(RMC, &mut state);
    assert_eq!(state.magnetic_declination, Some(-14.42));

    decoder.decode(GGA, &mut state);
    assert_eq!(state.magnetic_declination, Some(1.0));
}

#[test]
fn test_shared_state_is_never_half_applied() {
    let shared = SharedNavigation::default();

    let south = "$GNGGA,123519,4807.038,S,01131.000,W,2,12,1.5,-10.2,M,-3.1,M,,*59";

    let reader = {
        let shared = shared.clone();
        thread::spawn(move || {
            for _ in 0..1000 {
                let snapshot = shared.snapshot();
                if let (Some(lat), Some(lon)) = (snapshot.state.latitude, snapshot.state.longitude)
                {
                    // both coordinates always come from the same sentence
                    assert_eq!(lat.is_sign_negative(), lon.is_sign_negative());
                }
            }
        })
    };

    let mut decoder = Decoder::new(DecoderConfig::default());
    for i in 0..1000 {
        let line = if i % 2 == 0 { GGA } else { south };
        assert!(decoder.decode_shared(line, &shared).is_applied());
    }

    reader.join().unwrap();
    assert_eq!(shared.snapshot().version, 1000);
}
