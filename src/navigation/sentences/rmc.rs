use log::debug;

use crate::{
    Fields,
    navigation::{
        NavigationMode, NavigationState, PositionStatus, UtcEpoch,
        parse::{utc_date, utc_time},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// NMEA 2.3:
/// ```text
///         1         2 3       4 5        6  7   8   9    10 1112
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
///
/// The position (3 to 6) is taken from GGA and the magnetic variation (10,
/// 11) from the declination model, so those fields are not used.
pub(super) fn apply(fields: &Fields<'_>, state: &mut NavigationState) {
    // time and date only make sense together
    if let (Some(time), Some(date)) = (fields.non_empty(1), fields.non_empty(9)) {
        match (utc_time(time), utc_date(date)) {
            (Some(time), Some(date)) => state.utc = Some(UtcEpoch::from_date_time(date, time)),
            _ => debug!(
                "{}: malformed time {time:?} or date {date:?}, keeping the previous fix time",
                fields.identifier()
            ),
        }
    }

    if let Some(status) = fields.parse::<PositionStatus>(2) {
        state.position_status = status;
    }
    if let Some(speed) = fields.parse::<f64>(7) {
        state.speed_over_ground = Some(speed);
    }
    if let Some(course) = fields.parse::<f64>(8) {
        state.course_over_ground = Some(course);
    }
    if let Some(mode) = fields.parse::<NavigationMode>(12) {
        state.navigation_mode = mode;
    }
}
