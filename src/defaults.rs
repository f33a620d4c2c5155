/// Depot the entry form starts from (Cairo downtown)
pub const DEFAULT_ORIGIN_LAT: f64 = 30.0444;
pub const DEFAULT_ORIGIN_LON: f64 = 31.2357;

pub const DEFAULT_MASS_KG: f64 = 5.0;
pub const DEFAULT_PARCEL_COUNT: u32 = 2;
pub const DEFAULT_ZONE_CLASS: &str = "A";
pub const DEFAULT_OPERATION_TYPE: &str = "Delivery";

pub const DEFAULT_ROUTING_TIMEOUT_SECONDS: u64 = 30;
