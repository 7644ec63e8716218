/// Product name used in generated identifiers.
pub const PRODUCT_NAME: &str = "icsforge";

/// Default `PRODID` value for generated calendars.
pub const PRODUCT_ID: &str = const_str::concat!("-//", PRODUCT_NAME, "//", PRODUCT_NAME, "//EN");

/// iCalendar `VERSION` emitted by default.
pub const ICAL_VERSION: &str = "2.0";

/// iCalendar `CALSCALE` emitted by default.
pub const CALSCALE_GREGORIAN: &str = "GREGORIAN";

/// Default publish method.
pub const METHOD_PUBLISH: &str = "PUBLISH";

/// Maximum content line length in octets per RFC 5545 §3.1.
pub const DEFAULT_FOLD_LIMIT: usize = 75;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "ICSFORGE";

/// Name of the optional configuration file (extension resolved by `config`).
pub const CONFIG_FILE_NAME: &str = "icsforge";
