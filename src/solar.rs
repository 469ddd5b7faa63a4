//! Low-order solar ephemeris after Meeus, *Astronomical Algorithms*.
//!
//! All functions take the Julian century `t` measured from J2000.0 and
//! return degrees unless noted otherwise.

use crate::angles::{deg_to_rad, normalize_angle, quadrant_shift, rad_to_deg};
use crate::calendar::{julian_century, J2000};

pub fn mean_solar_longitude(t: f64) -> f64 {
    normalize_angle(280.4664567 + 36000.76983 * t + 0.0003032 * t.powi(2))
}

pub fn mean_lunar_longitude(t: f64) -> f64 {
    normalize_angle(218.3165 + 481267.8813 * t)
}

pub fn ascending_lunar_node_longitude(t: f64) -> f64 {
    normalize_angle(125.04452 - 1934.136261 * t + 0.0020708 * t.powi(2) + t.powi(3) / 450000.0)
}

pub fn mean_solar_anomaly(t: f64) -> f64 {
    normalize_angle(357.52911 + 35999.05029 * t - 0.0001537 * t.powi(2))
}

pub fn solar_equation_of_the_center(t: f64, mean_anomaly: f64) -> f64 {
    let m = deg_to_rad(mean_anomaly);
    (1.914602 - 0.004817 * t - 0.000014 * t.powi(2)) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin()
}

/// Apparent longitude referred to the true equinox of date.
pub fn apparent_solar_longitude(t: f64, mean_longitude: f64) -> f64 {
    let longitude = mean_longitude + solar_equation_of_the_center(t, mean_solar_anomaly(t));
    let omega = 125.04 - 1934.136 * t;
    normalize_angle(longitude - 0.00569 - 0.00478 * deg_to_rad(omega).sin())
}

/// IAU mean obliquity of the ecliptic.
pub fn mean_obliquity_of_the_ecliptic(t: f64) -> f64 {
    23.439291 - 0.013004167 * t - 0.0000001639 * t.powi(2) + 0.0000005036 * t.powi(3)
}

pub fn apparent_obliquity_of_the_ecliptic(t: f64, mean_obliquity: f64) -> f64 {
    let omega = 125.04 - 1934.136 * t;
    mean_obliquity + 0.00256 * deg_to_rad(omega).cos()
}

/// Mean sidereal time at Greenwich, the hour angle of the vernal equinox.
pub fn mean_sidereal_time(t: f64) -> f64 {
    let jd = t * 36525.0 + J2000;
    normalize_angle(
        280.46061837 + 360.98564736629 * (jd - J2000) + 0.000387933 * t.powi(2)
            - t.powi(3) / 38710000.0,
    )
}

pub fn nutation_in_longitude(solar_longitude: f64, lunar_longitude: f64, ascending_node: f64) -> f64 {
    let l0 = deg_to_rad(solar_longitude);
    let lp = deg_to_rad(lunar_longitude);
    let omega = deg_to_rad(ascending_node);
    (-17.2 / 3600.0) * omega.sin() - (1.32 / 3600.0) * (2.0 * l0).sin()
        - (0.23 / 3600.0) * (2.0 * lp).sin()
        + (0.21 / 3600.0) * (2.0 * omega).sin()
}

pub fn nutation_in_obliquity(solar_longitude: f64, lunar_longitude: f64, ascending_node: f64) -> f64 {
    let l0 = deg_to_rad(solar_longitude);
    let lp = deg_to_rad(lunar_longitude);
    let omega = deg_to_rad(ascending_node);
    (9.2 / 3600.0) * omega.cos() + (0.57 / 3600.0) * (2.0 * l0).cos()
        + (0.10 / 3600.0) * (2.0 * lp).cos()
        - (0.09 / 3600.0) * (2.0 * omega).cos()
}

/// Position of the sun for one Julian day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCoordinates {
    pub julian_day: f64,
    pub declination: f64,
    pub right_ascension: f64,
    pub apparent_sidereal_time: f64,
    /// Apparent minus mean solar time, in minutes.
    pub equation_of_time: f64,
}

impl SolarCoordinates {
    pub fn new(julian_day: f64) -> Self {
        let t = julian_century(julian_day);
        let l0 = mean_solar_longitude(t);
        let lp = mean_lunar_longitude(t);
        let omega = ascending_lunar_node_longitude(t);
        let lambda = deg_to_rad(apparent_solar_longitude(t, l0));
        let theta0 = mean_sidereal_time(t);
        let delta_psi = nutation_in_longitude(l0, lp, omega);
        let delta_epsilon = nutation_in_obliquity(l0, lp, omega);
        let epsilon0 = mean_obliquity_of_the_ecliptic(t);
        let epsilon_app = deg_to_rad(apparent_obliquity_of_the_ecliptic(t, epsilon0));

        // Meeus p. 165
        let declination = rad_to_deg((epsilon_app.sin() * lambda.sin()).asin());
        let right_ascension = normalize_angle(rad_to_deg(
            (epsilon_app.cos() * lambda.sin()).atan2(lambda.cos()),
        ));

        // Meeus p. 88
        let apparent_sidereal_time =
            theta0 + delta_psi * deg_to_rad(epsilon0 + delta_epsilon).cos();

        // Meeus eq. 28.3
        let eot_degrees = quadrant_shift(
            l0 - 0.0057183 - right_ascension + delta_psi * epsilon_app.cos(),
        );

        Self {
            julian_day,
            declination,
            right_ascension,
            apparent_sidereal_time,
            equation_of_time: eot_degrees * 4.0,
        }
    }
}
