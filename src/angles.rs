pub const DEGREES_PER_HOUR: f64 = 15.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Shifts an angle into [-180, 180].
pub fn quadrant_shift(angle: f64) -> f64 {
    if (-180.0..=180.0).contains(&angle) {
        return angle;
    }
    angle - 360.0 * (angle / 360.0).round()
}

pub fn normalize_to_scale(value: f64, max: f64) -> f64 {
    value.rem_euclid(max)
}

/// Three-point interpolation over equidistant samples (Meeus, p. 24).
///
/// `n` is the fraction of the interval past the middle sample `y2`.
pub fn interpolate(y2: f64, y1: f64, y3: f64, n: f64) -> f64 {
    let a = y2 - y1;
    let b = y3 - y2;
    let c = b - a;
    y2 + (n / 2.0) * (a + b + n * c)
}

/// Same as [`interpolate`] but unwinds the differences so a wrap through
/// 360° does not produce a jump.
pub fn interpolate_angles(y2: f64, y1: f64, y3: f64, n: f64) -> f64 {
    let a = normalize_angle(y2 - y1);
    let b = normalize_angle(y3 - y2);
    let c = b - a;
    y2 + (n / 2.0) * (a + b + n * c)
}

/// Altitude of a body given observer latitude, declination and local
/// hour angle, all in degrees.
pub fn altitude_of_celestial_body(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_alt = lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(sin_alt.asin())
}

/// Hour angle (degrees) at which the sun reaches `altitude`.
///
/// Returns NaN when the altitude is never reached on that day.
pub fn hour_angle_for_altitude(altitude: f64, latitude: f64, declination: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let cos_h = (deg_to_rad(altitude).sin() - lat_rad.sin() * dec_rad.sin())
        / (lat_rad.cos() * dec_rad.cos());
    rad_to_deg(cos_h.acos())
}

/// Altitude of the sun when an object's shadow is `shadow_factor` times
/// its height plus its noon shadow.
pub fn shadow_altitude(shadow_factor: f64, latitude: f64, declination: f64) -> f64 {
    let noon_shadow = deg_to_rad((latitude - declination).abs()).tan();
    rad_to_deg((1.0 / (shadow_factor + noon_shadow)).atan())
}
