use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use ::prayer_times::*;

fn local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%-m/%-d/%y, %-I:%M %p")
        .to_string()
}

fn solve(
    lat: f64,
    lon: f64,
    (y, m, d): (i32, u32, u32),
    params: CalculationParameters,
) -> (PrayerTimes, PrayerTimes, SunnahTimes) {
    let coordinates = Coordinates::new(lat, lon).unwrap();
    let today = PrayerTimes::new(coordinates, CalendarDate::new(y, m, d).unwrap(), params).unwrap();
    let tomorrow = today.next_day().unwrap();
    let sunnah = SunnahTimes::new(&today).unwrap();
    (today, tomorrow, sunnah)
}

fn assert_night_order(today: &PrayerTimes, tomorrow: &PrayerTimes, sunnah: &SunnahTimes) {
    assert!(today.maghrib() < sunnah.first_third_of_the_night());
    assert!(sunnah.first_third_of_the_night() < sunnah.middle_of_the_night());
    assert!(sunnah.middle_of_the_night() < sunnah.last_third_of_the_night());
    assert!(sunnah.last_third_of_the_night() < tomorrow.fajr());
    assert_eq!(sunnah.last_time_of_witr(), tomorrow.fajr() - Duration::minutes(5));
    assert_eq!(sunnah.first_time_of_witr(), today.isha());
}

// ── Reference scenarios ──

#[test]
fn test_sunnah_times_new_york() {
    let (today, tomorrow, sunnah) = solve(
        35.7750,
        -78.6336,
        (2015, 7, 12),
        CalculationMethod::NorthAmerica.parameters(),
    );
    let tz = chrono_tz::America::New_York;
    assert_eq!(local(today.maghrib(), tz), "7/12/15, 8:32 PM");
    assert_eq!(local(tomorrow.fajr(), tz), "7/13/15, 4:43 AM");

    assert_eq!(local(sunnah.middle_of_the_night(), tz), "7/13/15, 12:38 AM");
    assert_eq!(local(sunnah.last_third_of_the_night(), tz), "7/13/15, 1:59 AM");
    assert_eq!(local(sunnah.sunrise(), tz), "7/12/15, 6:08 AM");
    assert_eq!(local(sunnah.last_time_of_duha(), tz), "7/12/15, 1:11 PM");
    assert_eq!(local(sunnah.first_time_of_witr(), tz), "7/12/15, 9:57 PM");
    assert_eq!(local(sunnah.last_time_of_witr(), tz), "7/13/15, 4:38 AM");
    assert_night_order(&today, &tomorrow, &sunnah);
}

#[test]
fn test_sunnah_times_london() {
    let (today, tomorrow, sunnah) = solve(
        51.5074,
        -0.1278,
        (2016, 12, 31),
        CalculationMethod::MoonsightingCommittee.parameters(),
    );
    let tz = chrono_tz::Europe::London;
    assert_eq!(local(today.maghrib(), tz), "12/31/16, 4:04 PM");
    assert_eq!(local(tomorrow.fajr(), tz), "1/1/17, 6:25 AM");

    assert_eq!(local(sunnah.middle_of_the_night(), tz), "12/31/16, 11:15 PM");
    assert_eq!(local(sunnah.last_third_of_the_night(), tz), "1/1/17, 1:38 AM");
    assert_eq!(local(sunnah.sunrise(), tz), "12/31/16, 8:06 AM");
    assert_eq!(local(sunnah.last_time_of_duha(), tz), "12/31/16, 11:59 AM");
    assert_eq!(local(sunnah.first_time_of_witr(), tz), "12/31/16, 5:38 PM");
    assert_eq!(local(sunnah.last_time_of_witr(), tz), "1/1/17, 6:20 AM");
    assert_night_order(&today, &tomorrow, &sunnah);
}

#[test]
fn test_sunnah_times_oslo() {
    let params = CalculationMethod::MuslimWorldLeague
        .parameters()
        .with_high_latitude_rule(HighLatitudeRule::MiddleOfTheNight);
    let (today, tomorrow, sunnah) = solve(59.9094, 10.7349, (2016, 7, 1), params);
    let tz = chrono_tz::Europe::Oslo;
    assert_eq!(local(today.maghrib(), tz), "7/1/16, 10:41 PM");
    assert_eq!(local(tomorrow.fajr(), tz), "7/2/16, 1:20 AM");

    assert_eq!(local(sunnah.middle_of_the_night(), tz), "7/2/16, 12:01 AM");
    assert_eq!(local(sunnah.last_third_of_the_night(), tz), "7/2/16, 12:27 AM");
    assert_eq!(local(sunnah.last_time_of_duha(), tz), "7/1/16, 1:12 PM");
    assert_eq!(local(sunnah.first_time_of_witr(), tz), "7/2/16, 1:21 AM");
    assert_eq!(local(sunnah.last_time_of_witr(), tz), "7/2/16, 1:15 AM");
    assert_eq!(sunnah.sunrise(), today.sunrise());
    assert_night_order(&today, &tomorrow, &sunnah);
}

#[test]
fn test_sunnah_times_across_spring_dst_change() {
    let (today, tomorrow, sunnah) = solve(
        37.7749,
        -122.4194,
        (2017, 3, 11),
        CalculationMethod::NorthAmerica.parameters(),
    );
    let tz = chrono_tz::America::Los_Angeles;
    assert_eq!(local(today.fajr(), tz), "3/11/17, 5:14 AM");
    assert_eq!(local(today.maghrib(), tz), "3/11/17, 6:13 PM");
    assert_eq!(local(tomorrow.fajr(), tz), "3/12/17, 6:13 AM");

    assert_eq!(local(sunnah.middle_of_the_night(), tz), "3/11/17, 11:43 PM");
    assert_eq!(local(sunnah.last_third_of_the_night(), tz), "3/12/17, 1:33 AM");
    assert_eq!(local(sunnah.sunrise(), tz), "3/11/17, 6:26 AM");
    assert_eq!(local(sunnah.last_time_of_duha(), tz), "3/11/17, 12:11 PM");
    assert_eq!(local(sunnah.first_time_of_witr(), tz), "3/11/17, 7:25 PM");
    assert_eq!(local(sunnah.last_time_of_witr(), tz), "3/12/17, 6:08 AM");
    assert_night_order(&today, &tomorrow, &sunnah);
}

#[test]
fn test_sunnah_times_across_autumn_dst_change() {
    let params = CalculationMethod::MuslimWorldLeague
        .parameters()
        .with_high_latitude_rule(HighLatitudeRule::SeventhOfTheNight);
    let (today, tomorrow, sunnah) = solve(48.8566, 2.3522, (2015, 10, 24), params);
    let tz = chrono_tz::Europe::Paris;
    assert_eq!(local(today.fajr(), tz), "10/24/15, 6:38 AM");
    assert_eq!(local(today.maghrib(), tz), "10/24/15, 6:45 PM");
    assert_eq!(local(tomorrow.fajr(), tz), "10/25/15, 5:40 AM");

    assert_eq!(local(sunnah.middle_of_the_night(), tz), "10/25/15, 12:43 AM");
    assert_eq!(local(sunnah.last_third_of_the_night(), tz), "10/25/15, 2:42 AM");
    assert_eq!(local(sunnah.sunrise(), tz), "10/24/15, 8:24 AM");
    assert_eq!(local(sunnah.last_time_of_duha(), tz), "10/24/15, 1:26 PM");
    assert_eq!(local(sunnah.first_time_of_witr(), tz), "10/24/15, 8:24 PM");
    assert_eq!(local(sunnah.last_time_of_witr(), tz), "10/25/15, 5:35 AM");
    assert_night_order(&today, &tomorrow, &sunnah);
}

// ── Derivation ──

#[test]
fn test_from_days_matches_new() {
    let (today, tomorrow, sunnah) = solve(
        21.4225,
        39.8262,
        (2019, 5, 6),
        CalculationMethod::UmmAlQura.parameters(),
    );
    assert_eq!(SunnahTimes::from_days(&today, &tomorrow), Some(sunnah));
}

#[test]
fn test_from_days_rejects_unrelated_days() {
    let params = CalculationMethod::UmmAlQura.parameters();
    let (today, tomorrow, _) = solve(21.4225, 39.8262, (2019, 5, 6), params);

    assert_eq!(SunnahTimes::from_days(&today, &today), None);
    assert_eq!(SunnahTimes::from_days(&tomorrow, &today), None);

    let two_days_on = tomorrow.next_day().unwrap();
    assert_eq!(SunnahTimes::from_days(&today, &two_days_on), None);

    let other_params = PrayerTimes::new(
        today.coordinates(),
        tomorrow.date(),
        params.with_madhab(Madhab::Hanafi),
    )
    .unwrap();
    assert_eq!(SunnahTimes::from_days(&today, &other_params), None);

    let other_place = PrayerTimes::new(
        Coordinates::new(21.5, 39.8262).unwrap(),
        tomorrow.date(),
        params,
    )
    .unwrap();
    assert_eq!(SunnahTimes::from_days(&today, &other_place), None);
}

#[test]
fn test_sunnah_times_are_whole_minutes() {
    let (_, _, sunnah) = solve(
        -33.8688,
        151.2093,
        (2021, 8, 9),
        CalculationMethod::MuslimWorldLeague
            .parameters()
            .with_rounding(Rounding::None),
    );
    for instant in [
        sunnah.first_third_of_the_night(),
        sunnah.middle_of_the_night(),
        sunnah.last_third_of_the_night(),
        sunnah.sunrise(),
        sunnah.first_time_of_duha(),
        sunnah.last_time_of_duha(),
        sunnah.first_time_of_witr(),
        sunnah.last_time_of_witr(),
    ] {
        assert_eq!(instant.timestamp() % 60, 0, "{instant}");
    }
}

#[test]
fn test_unresolvable_next_day_gives_none() {
    // Svalbard runs out of solvable days as polar day sets in.
    let coordinates = Coordinates::new(78.2232, 15.6267).unwrap();
    let params = CalculationParameters::default();
    let last = (100..200)
        .map(|n| CalendarDate::new(2016, 1, 1).unwrap().add_days(n))
        .take_while(|date| PrayerTimes::new(coordinates, *date, params).is_some())
        .last()
        .unwrap();
    let today = PrayerTimes::new(coordinates, last, params).unwrap();
    assert!(today.next_day().is_none());
    assert!(SunnahTimes::new(&today).is_none());
}

// ── Duha window ──

#[test]
fn test_duha_window() {
    let (today, _, sunnah) = solve(
        35.7750,
        -78.6336,
        (2015, 7, 12),
        CalculationMethod::NorthAmerica.parameters(),
    );
    assert_eq!(
        sunnah.first_time_of_duha(),
        today.sunrise() + Duration::minutes(20)
    );
    assert_eq!(
        sunnah.last_time_of_duha(),
        today.dhuhr() - Duration::minutes(10)
    );

    let range = sunnah.duha_range();
    assert_eq!(*range.start(), sunnah.first_time_of_duha());
    assert_eq!(*range.end(), sunnah.last_time_of_duha());

    assert!(sunnah.is_duha_time(sunnah.first_time_of_duha()));
    assert!(sunnah.is_duha_time(sunnah.last_time_of_duha()));
    assert!(sunnah.is_duha_time(today.sunrise() + Duration::hours(2)));
    assert!(!sunnah.is_duha_time(today.sunrise()));
    assert!(!sunnah.is_duha_time(today.dhuhr()));
    assert!(!sunnah.is_duha_time(sunnah.first_time_of_duha() - Duration::seconds(1)));
}
