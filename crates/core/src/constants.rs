//! Shared unit constants

/// Bytes per binary unit
pub const BYTES_PER_KIB: f64 = 1024.0;
pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Bits per decimal megabit
pub const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// Prefixes used by [`fmt_human`](crate::fmt_human)
pub const BINARY_PREFIXES: [&str; 9] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];
pub const DECIMAL_PREFIXES: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];
