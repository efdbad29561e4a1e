pub mod config;
pub mod constants;
pub mod coordinates;
pub mod display;
pub mod earth_orientation;
pub mod illuminance_errors;
pub mod lunar;
pub mod radiometry;
pub mod series;
pub mod solar;
pub mod time;

pub use config::IlluminanceConfig;
pub use coordinates::ObserverLocation;
pub use illuminance_errors::IlluminanceError;
pub use series::{generate_illuminance_series, IlluminanceSample, IlluminanceSeries};
pub use time::{CalendarDate, Instant};
