use log::debug;
use time::OffsetDateTime;

use crate::{
    DeclinationModel, Fields,
    navigation::{
        FixQuality, NavigationState, UtcEpoch,
        parse::{latitude, longitude},
    },
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// Fields 1 (fix time), 10 and 12 (units), 13 and 14 (DGPS) are not used.
pub(super) fn apply<D: DeclinationModel>(
    fields: &Fields<'_>,
    state: &mut NavigationState,
    model: &mut D,
) {
    let lat = fields
        .non_empty(2)
        .and_then(|magnitude| latitude(magnitude, fields.value(3).unwrap_or_default()));
    let lon = fields
        .non_empty(4)
        .and_then(|magnitude| longitude(magnitude, fields.value(5).unwrap_or_default()));

    if let Some(lat) = lat {
        state.latitude = Some(lat);
    }
    if let Some(lon) = lon {
        state.longitude = Some(lon);
    }

    if let (Some(lat), Some(lon)) = (lat, lon) {
        let date = state
            .utc
            .and_then(UtcEpoch::date)
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());

        if let Some(declination) = model.declination(lat, lon, date) {
            debug!("magnetic declination at ({lat:.5}, {lon:.5}) on {date}: {declination:.2}");
            state.magnetic_declination = Some(declination);
        }
    }

    if let Some(quality) = fields.parse::<FixQuality>(6) {
        state.fix_quality = quality;
    }
    if let Some(count) = fields.parse::<u8>(7) {
        state.num_satellites = Some(count);
    }
    if let Some(hdop) = fields.parse::<f64>(8) {
        state.horizontal_dilution = Some(hdop);
    }
    if let Some(altitude) = fields.parse::<f64>(9) {
        state.altitude = Some(altitude);
    }
    if let Some(separation) = fields.parse::<f64>(11) {
        state.geoid_undulation = Some(separation);
    }
}
