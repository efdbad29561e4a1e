mod common;

use approx::assert_relative_eq;
use common::{assert_sample_in_range, santiago, seoul};
use nightlux::{
    config::SamplingWindow,
    generate_illuminance_series,
    series::{evaluate_grid, sample_at, surface_illuminance},
    CalendarDate, IlluminanceConfig, IlluminanceSeries, Instant,
};

#[test]
fn test_seoul_default_series() {
    let config = IlluminanceConfig::default();
    let date: CalendarDate = "2024-10-18".parse().unwrap();
    let samples = generate_illuminance_series(date, 9.0, seoul(), &config).unwrap();

    assert_eq!(samples.len(), 97);
    assert_eq!(samples[0].utc, Instant::new(2024, 10, 18, 7, 0, 0));
    assert_eq!(samples[96].utc, Instant::new(2024, 10, 18, 23, 0, 0));
    assert_eq!(samples[0].local_time, "2024-10-18 16:00");
    assert_eq!(samples[96].local_time, "2024-10-19 08:00");

    for pair in samples.windows(2) {
        let (a, b) = (pair[0].utc.to_epoch(), pair[1].utc.to_epoch());
        assert_relative_eq!((b - a).to_seconds(), 600.0, epsilon = 1e-9);
    }

    for sample in &samples {
        assert_sample_in_range(sample);
    }
}

#[test]
fn test_seoul_sunset_sequence() {
    let config = IlluminanceConfig::default();
    let samples =
        generate_illuminance_series(CalendarDate::new(2024, 10, 18), 9.0, seoul(), &config)
            .unwrap();

    // 16:00 KST: the Sun is still up
    let first = &samples[0];
    assert!(first.sun_altitude > 0.0);
    assert!(first.sun_reflected > 0.0);
    assert!(first.sun_twilight >= 400.0);

    // 21:00 KST: astronomical night, only moonlight remains
    let night = &samples[30];
    assert_eq!(night.local_time, "2024-10-18 21:00");
    assert!(night.sun_altitude < -12.0);
    assert_eq!(night.sun_twilight, 0.0);
    assert_eq!(night.surface, night.moon_reflected);
    assert!(night.moon_altitude > 0.0);
    assert!(night.surface > 0.0);

    // Two days after the full Moon
    assert!(night.moon_illumination > 95.0);
}

#[test]
fn test_surface_combines_twilight_and_moonlight() {
    let config = IlluminanceConfig::default();
    let samples =
        generate_illuminance_series(CalendarDate::new(2024, 10, 18), 9.0, seoul(), &config)
            .unwrap();

    for sample in &samples {
        // Each term is rounded separately to 0.01
        let recomposed = sample.sun_twilight * 1000.0 + sample.moon_reflected;
        assert!(
            (sample.surface - recomposed).abs() <= 5.02,
            "{}: {} vs {}",
            sample.local_time,
            sample.surface,
            recomposed
        );
    }
}

#[test]
fn test_southern_observer_with_negative_offset() {
    let config = IlluminanceConfig::default();
    let samples =
        generate_illuminance_series(CalendarDate::new(2024, 6, 21), -4.0, santiago(), &config)
            .unwrap();

    assert_eq!(samples.len(), 97);
    assert_eq!(samples[0].local_time, "2024-06-21 03:00");
    assert_eq!(samples[96].local_time, "2024-06-21 19:00");
    for sample in &samples {
        assert_sample_in_range(sample);
    }
}

#[test]
fn test_fractional_offset_and_year_rollover() {
    let config = IlluminanceConfig::default();
    let samples =
        generate_illuminance_series(CalendarDate::new(2024, 12, 31), 5.5, seoul(), &config)
            .unwrap();
    assert_eq!(samples[0].local_time, "2024-12-31 12:30");
    assert_eq!(samples[96].local_time, "2025-01-01 04:30");
}

#[test]
fn test_series_iterator_matches_vector() {
    let config = IlluminanceConfig::default();
    let date = CalendarDate::new(2024, 10, 18);
    let samples = generate_illuminance_series(date, 9.0, seoul(), &config).unwrap();

    let mut series = IlluminanceSeries::new(date, 9.0, seoul(), config).unwrap();
    let first_pass: Vec<_> = series.by_ref().take(5).collect();
    assert_eq!(first_pass, samples[..5]);
    assert_eq!(series.len(), 92);

    series.restart();
    assert_eq!(series.collect::<Vec<_>>(), samples);
}

#[test]
fn test_custom_sampling_window() {
    let config = IlluminanceConfig {
        sampling: SamplingWindow {
            start_minute: 0,
            end_minute: 1435,
            step_minutes: 5,
        },
        ..IlluminanceConfig::default()
    };
    let samples =
        generate_illuminance_series(CalendarDate::new(2024, 10, 18), 0.0, seoul(), &config)
            .unwrap();
    assert_eq!(samples.len(), 288);
    assert_eq!(samples[287].local_time, "2024-10-18 23:55");
}

#[test]
fn test_moonlight_scales_with_albedo() {
    let instant = Instant::new(2024, 10, 18, 15, 30, 0);
    let reference = IlluminanceConfig::default();
    let mut brighter = reference;
    brighter.lunar.albedo *= 2.0;

    let base = surface_illuminance(&instant, &seoul(), &reference);
    let doubled = surface_illuminance(&instant, &seoul(), &brighter);
    assert!(base > 0.0);
    assert_relative_eq!(doubled, 2.0 * base, max_relative = 1e-12);
}

#[test]
fn test_single_sample_matches_series() {
    let config = IlluminanceConfig::default();
    let samples =
        generate_illuminance_series(CalendarDate::new(2024, 10, 18), 9.0, seoul(), &config)
            .unwrap();
    let single = sample_at(&Instant::new(2024, 10, 18, 12, 0, 0), 9.0, &seoul(), &config);
    assert_eq!(single, samples[30]);
}

#[test]
fn test_grid_over_korea() {
    let config = IlluminanceConfig::default();
    let instant = Instant::new(2024, 10, 18, 14, 0, 0);
    let latitudes: Vec<f64> = (0..5).map(|k| 33.0 + k as f64).collect();
    let longitudes: Vec<f64> = (0..4).map(|k| 125.0 + k as f64 * 1.5).collect();

    let grid = evaluate_grid(&instant, &latitudes, &longitudes, &config);
    assert_eq!(grid.len(), 20);
    for (_, _, value) in &grid {
        // Full night in the whole box: moonlight only, a fraction of a lux
        assert!(*value > 0.0 && *value < 1.0);
    }
}

#[test]
fn test_azimuths_near_north_stay_below_360() {
    let config = IlluminanceConfig::default();
    // The Moon passes north around 03:50 UTC, the Sun around 15:17 UTC
    for (hour, minute) in [(3, 47), (15, 14)] {
        let start = Instant::new(2024, 10, 18, hour, minute, 0).to_epoch();
        for second in 0..(6 * 60_i64) {
            let instant = Instant::from_epoch(start + hifitime::Unit::Second * second);
            let sample = sample_at(&instant, 9.0, &seoul(), &config);
            assert_sample_in_range(&sample);
        }
    }
}
