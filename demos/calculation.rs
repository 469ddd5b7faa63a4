use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

use prayer_times::{
    CalculationMethod, CalendarDate, Coordinates, Madhab, Prayer, PrayerTimes, SolarTime,
    SunnahTimes,
};

fn local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p").to_string()
}

fn main() {
    let coordinates = Coordinates::new(35.7750, -78.6336).expect("valid coordinates");
    let date = CalendarDate::new(2015, 7, 12).expect("valid date");
    let params = CalculationMethod::NorthAmerica
        .parameters()
        .with_madhab(Madhab::Hanafi);

    let solar = SolarTime::new(date, coordinates);
    let sun = solar.solar_coordinates();

    println!("=== Prayer Time Calculation Example ===");
    println!(
        "Location: Raleigh, NC ({:.4}°N, {:.4}°W)",
        coordinates.latitude(),
        -coordinates.longitude()
    );
    println!("Date: {}", date);
    println!("Method: {:?}, {:?}", params.method(), params.madhab());
    println!();
    println!("--- Solar Position (0h UT) ---");
    println!("Julian day: {:.1}", sun.julian_day);
    println!("Declination: {:.2}°", sun.declination);
    println!("Right ascension: {:.2}°", sun.right_ascension);
    println!("Equation of Time: {:.2} minutes", sun.equation_of_time);
    println!("Transit: {:.3} h UTC", solar.transit);
    println!();

    let Some(times) = PrayerTimes::new(coordinates, date, params) else {
        println!("Prayer times cannot be resolved for this date and place.");
        return;
    };

    println!("--- Prayer Times ({}) ---", New_York);
    for prayer in Prayer::ALL {
        println!("{:<8} {}", format!("{:?}:", prayer), local(times.time(prayer), New_York));
    }
    println!();

    let Some(sunnah) = SunnahTimes::new(&times) else {
        println!("The following day cannot be resolved; no Sunnah times.");
        return;
    };

    println!("--- Sunnah Times ---");
    println!(
        "Duha: {} to {}",
        local(sunnah.first_time_of_duha(), New_York),
        local(sunnah.last_time_of_duha(), New_York)
    );
    println!(
        "First third of the night: {}",
        local(sunnah.first_third_of_the_night(), New_York)
    );
    println!(
        "Middle of the night: {}",
        local(sunnah.middle_of_the_night(), New_York)
    );
    println!(
        "Last third of the night: {}",
        local(sunnah.last_third_of_the_night(), New_York)
    );
    println!(
        "Witr: {} to {}",
        local(sunnah.first_time_of_witr(), New_York),
        local(sunnah.last_time_of_witr(), New_York)
    );
}
