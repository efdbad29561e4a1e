use hifitime::Unit;
use nightlux::{
    coordinates::HorizontalPosition,
    earth_orientation::EarthOrientation,
    lunar::LunarEphemeris,
    solar::SolarEphemeris,
    time::{julian_day, Instant, JulianMoment},
};

/// Twice-daily instants over the whole of 2024.
fn year_2024() -> impl Iterator<Item = Instant> {
    let start = Instant::new(2024, 1, 1, 0, 0, 0).to_epoch();
    (0..(2 * 366_i64)).map(move |k| Instant::from_epoch(start + Unit::Hour * (12 * k)))
}

#[test]
fn test_moon_distance_over_2024() {
    let mut closest = f64::INFINITY;
    let mut farthest = 0.0_f64;
    for instant in year_2024() {
        let moment = JulianMoment::from_instant(&instant);
        let orientation = EarthOrientation::at(&moment);
        let moon = LunarEphemeris::at(moment.t, orientation.nutation.longitude);
        assert!(
            (356_500.0..=406_700.0).contains(&moon.distance),
            "{instant}: {} km",
            moon.distance
        );
        closest = closest.min(moon.distance);
        farthest = farthest.max(moon.distance);
    }
    // A year spans several perigees and apogees
    assert!(closest < 358_000.0);
    assert!(farthest > 405_000.0);
}

#[test]
fn test_lunar_phase_over_2024() {
    let mut fractions = Vec::new();
    for instant in year_2024() {
        let moment = JulianMoment::from_instant(&instant);
        let orientation = EarthOrientation::at(&moment);
        let sun = SolarEphemeris::at(moment.t);
        let moon = LunarEphemeris::at(moment.t, orientation.nutation.longitude);
        let phase = moon.phase(sun.apparent_longitude, sun.distance);

        assert!((0.0..=1.0).contains(&phase.illuminated_fraction));
        assert!((0.0..=180.0).contains(&phase.phase_angle));
        assert!((0.0..=180.0).contains(&phase.elongation));
        fractions.push(phase.illuminated_fraction);
    }
    let min = fractions.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = fractions.iter().cloned().fold(0.0, f64::max);
    assert!(min < 0.01);
    assert!(max > 0.99);
}

#[test]
fn test_positions_stay_in_range() {
    let location = nightlux::ObserverLocation::new(-45.0, 170.0);
    for instant in year_2024() {
        let moment = JulianMoment::from_instant(&instant);
        let orientation = EarthOrientation::at(&moment);
        let lst = orientation.local_sidereal_time(location.longitude);

        let sun = SolarEphemeris::at(moment.t);
        let moon = LunarEphemeris::at(moment.t, orientation.nutation.longitude);
        for equatorial in [
            sun.equatorial(orientation.true_obliquity),
            moon.equatorial(orientation.true_obliquity),
        ] {
            assert!((0.0..360.0).contains(&equatorial.right_ascension));
            assert!(equatorial.declination.abs() < 30.0);

            let position = HorizontalPosition::observe(&equatorial, lst, &location);
            assert!((-90.0..=90.0).contains(&position.altitude));
            assert!((0.0..360.0).contains(&position.azimuth));
            assert!(position.refracted_altitude >= position.altitude);
        }
    }
}

#[test]
fn test_julian_day_steps_by_half_days() {
    let days: Vec<f64> = year_2024().map(|i| julian_day(&i)).collect();
    assert_eq!(days[0], 2460310.5);
    for pair in days.windows(2) {
        assert!((pair[1] - pair[0] - 0.5).abs() < 1e-9);
    }
}
