/// Origin note stamped on holdings opened by a SIP execution
pub const SIP_ORIGIN_NOTE: &str = "SIP Auto-execution";

/// Decimal precision used when logging units and prices
pub const DECIMAL_PRECISION: u32 = 4;

/// Default timezone used to derive the business date of a batch run
pub const DEFAULT_BUSINESS_TZ_NAME: &str = "Asia/Kolkata";
