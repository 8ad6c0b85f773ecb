/// Wire field keys (as they appear in the source CSV and stream messages)
pub const FIELD_STN_CODE: &str = "STN Code";
pub const FIELD_LOCATION_NAME: &str = "Location Name";
pub const FIELD_YEAR: &str = "Year";
pub const FIELD_DISSOLVED_OXYGEN: &str = "Dissolved Oxygen";
pub const FIELD_PH: &str = "pH";
pub const FIELD_CONDUCTIVITY: &str = "Conductivity";
pub const FIELD_BOD: &str = "BOD";
pub const FIELD_NITRATE_NITRITE: &str = "Nitrate N + Nitrite N";
pub const FIELD_FECAL_COLIFORM: &str = "Fecal Coliform";
pub const FIELD_TOTAL_COLIFORM: &str = "Total Coliform";
pub const FIELD_WQI: &str = "WQI";
pub const FIELD_LAT: &str = "lat";
pub const FIELD_LON: &str = "lon";

/// Measurement constraints (checked but never enforced)
pub const MIN_VALID_PH: f64 = 0.0;
pub const MAX_VALID_PH: f64 = 14.0;
pub const MIN_VALID_LAT: f64 = -90.0;
pub const MAX_VALID_LAT: f64 = 90.0;
pub const MIN_VALID_LON: f64 = -180.0;
pub const MAX_VALID_LON: f64 = 180.0;

/// WQI classification thresholds
pub const WQI_EXCELLENT_MAX: f64 = 50.0;
pub const WQI_GOOD_MAX: f64 = 100.0;
pub const WQI_POOR_MAX: f64 = 200.0;
pub const WQI_VERY_POOR_MAX: f64 = 300.0;

/// Pipeline defaults
pub const DEFAULT_STREAM_NAME: &str = "water-quality-stream";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET_NAME: &str = "water-quality-data";
pub const DEFAULT_BATCH_DELAY_SECONDS: u64 = 2;
pub const DEFAULT_DATA_DIR: &str = "data";

/// Blob path layout
pub const BLOB_PREFIX: &str = "water_data";

/// Narrator defaults
pub const RESPONSE_MARKER: &str = "Response:";
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 1000;
pub const DEFAULT_SERVE_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVE_PORT: u16 = 5000;

/// I/O defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
