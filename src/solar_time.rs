use crate::angles::{
    altitude_of_celestial_body, deg_to_rad, hour_angle_for_altitude, interpolate,
    interpolate_angles, normalize_angle, normalize_to_scale, quadrant_shift, shadow_altitude,
};
use crate::calendar::CalendarDate;
use crate::solar::SolarCoordinates;
use crate::types::Coordinates;

/// Apparent altitude of the sun's upper limb at rise and set: 34' of
/// refraction plus 16' of semi-diameter.
pub const SUNRISE_ALTITUDE: f64 = -50.0 / 60.0;

/// Sidereal degrees per mean solar day.
const SIDEREAL_RATE: f64 = 360.985647;

/// Fraction of a day, in [0, 1), at which the sun crosses the meridian
/// (Meeus p. 102). `longitude` is east-positive.
pub fn approximate_transit(longitude: f64, sidereal_time: f64, right_ascension: f64) -> f64 {
    let lw = -longitude;
    normalize_to_scale((right_ascension + lw - sidereal_time) / 360.0, 1.0)
}

/// Transit in UTC hours after one refinement of the approximation.
pub fn corrected_transit(
    m0: f64,
    longitude: f64,
    sidereal_time: f64,
    right_ascension: f64,
    previous_right_ascension: f64,
    next_right_ascension: f64,
) -> f64 {
    let lw = -longitude;
    let theta = normalize_angle(sidereal_time + SIDEREAL_RATE * m0);
    let alpha = normalize_angle(interpolate_angles(
        right_ascension,
        previous_right_ascension,
        next_right_ascension,
        m0,
    ));
    let h = quadrant_shift(theta - lw - alpha);
    let dm = h / -360.0;
    (m0 + dm) * 24.0
}

/// Position of the sun on three consecutive days, centred on `date`.
///
/// Interpolating across the neighbours keeps the result accurate for
/// events far from 00:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTime {
    coordinates: Coordinates,
    solar: SolarCoordinates,
    previous_solar: SolarCoordinates,
    next_solar: SolarCoordinates,
    approximate_transit: f64,
    /// UTC hours from 00:00 of the date; may be negative or exceed 24.
    pub transit: f64,
    /// UTC hours; NaN when the sun does not rise.
    pub sunrise: f64,
    /// UTC hours; NaN when the sun does not set.
    pub sunset: f64,
}

impl SolarTime {
    pub fn new(date: CalendarDate, coordinates: Coordinates) -> Self {
        let julian_day = date.julian_day();
        let previous_solar = SolarCoordinates::new(julian_day - 1.0);
        let solar = SolarCoordinates::new(julian_day);
        let next_solar = SolarCoordinates::new(julian_day + 1.0);

        let m0 = approximate_transit(
            coordinates.longitude(),
            solar.apparent_sidereal_time,
            solar.right_ascension,
        );
        let transit = corrected_transit(
            m0,
            coordinates.longitude(),
            solar.apparent_sidereal_time,
            solar.right_ascension,
            previous_solar.right_ascension,
            next_solar.right_ascension,
        );

        let mut solar_time = Self {
            coordinates,
            solar,
            previous_solar,
            next_solar,
            approximate_transit: m0,
            transit,
            sunrise: f64::NAN,
            sunset: f64::NAN,
        };
        solar_time.sunrise = solar_time.hour_angle(SUNRISE_ALTITUDE, false);
        solar_time.sunset = solar_time.hour_angle(SUNRISE_ALTITUDE, true);
        solar_time
    }

    pub fn solar_coordinates(&self) -> &SolarCoordinates {
        &self.solar
    }

    /// UTC hours at which the sun passes `altitude` degrees, before or
    /// after transit. NaN when that altitude is never reached.
    pub fn hour_angle(&self, altitude: f64, after_transit: bool) -> f64 {
        let latitude = self.coordinates.latitude();
        let lw = -self.coordinates.longitude();
        let m0 = self.approximate_transit;

        let h0 = hour_angle_for_altitude(altitude, latitude, self.solar.declination);
        let m = if after_transit {
            m0 + h0 / 360.0
        } else {
            m0 - h0 / 360.0
        };

        let theta = normalize_angle(self.solar.apparent_sidereal_time + SIDEREAL_RATE * m);
        let alpha = normalize_angle(interpolate_angles(
            self.solar.right_ascension,
            self.previous_solar.right_ascension,
            self.next_solar.right_ascension,
            m,
        ));
        let delta = interpolate(
            self.solar.declination,
            self.previous_solar.declination,
            self.next_solar.declination,
            m,
        );
        let h = theta - lw - alpha;
        let altitude_at_m = altitude_of_celestial_body(latitude, delta, h);

        let numerator = altitude_at_m - altitude;
        let denominator = 360.0
            * deg_to_rad(delta).cos()
            * deg_to_rad(latitude).cos()
            * deg_to_rad(h).sin();
        (m + numerator / denominator) * 24.0
    }

    /// UTC hours at which an object's shadow reaches `shadow_length` times
    /// its height beyond its noon shadow. Always after transit.
    pub fn afternoon(&self, shadow_length: f64) -> f64 {
        let altitude = shadow_altitude(
            shadow_length,
            self.coordinates.latitude(),
            self.solar.declination,
        );
        self.hour_angle(altitude, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transit_follows_longitude() {
        let date = CalendarDate::new(2015, 7, 12).unwrap();
        let greenwich = SolarTime::new(date, Coordinates::new(0.0, 0.0).unwrap());
        let west = SolarTime::new(date, Coordinates::new(0.0, -90.0).unwrap());
        // 90 degrees west transits six hours later.
        assert!((west.transit - greenwich.transit - 6.0).abs() < 0.01);
        // Greenwich transit in July is about 12:05 UTC.
        assert!((greenwich.transit - 12.09).abs() < 0.05, "{}", greenwich.transit);
    }

    #[test]
    fn polar_summer_has_no_sunset() {
        let date = CalendarDate::new(2016, 6, 21).unwrap();
        let solar = SolarTime::new(date, Coordinates::new(78.2, 15.6).unwrap());
        assert!(solar.sunrise.is_nan());
        assert!(solar.sunset.is_nan());
        assert!(solar.transit.is_finite());
    }
}
