use nightlux::{IlluminanceSample, ObserverLocation};

pub fn seoul() -> ObserverLocation {
    ObserverLocation::new(37.5665, 126.978)
}

pub fn santiago() -> ObserverLocation {
    ObserverLocation::new(-33.4489, -70.6693)
}

/// Check the value ranges every sample of a series must satisfy.
pub fn assert_sample_in_range(sample: &IlluminanceSample) {
    for altitude in [sample.sun_altitude, sample.moon_altitude] {
        assert!(
            (-90.0..=90.0).contains(&altitude),
            "altitude {altitude} at {}",
            sample.local_time
        );
    }
    for azimuth in [sample.sun_azimuth, sample.moon_azimuth] {
        assert!(
            (0.0..360.0).contains(&azimuth),
            "azimuth {azimuth} at {}",
            sample.local_time
        );
    }
    assert!((0.0..=100.0).contains(&sample.moon_illumination));
    assert!((0.0..=180.0).contains(&sample.moon_phase_angle));
    assert!((356_500.0..=406_800.0).contains(&sample.moon_distance));
    assert!((0.983..=1.017).contains(&sample.sun_distance));

    for term in [
        sample.sun_reflected,
        sample.moon_reflected,
        sample.sun_twilight,
        sample.surface,
    ] {
        assert!(term >= 0.0, "negative illuminance at {}", sample.local_time);
    }
}
