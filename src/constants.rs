//! # Constants and type definitions for the catalog browser
//!
//! This module centralizes the **fixed names**, **group keys**, **unit conversions** and
//! **type aliases** shared by the classifier, the tree builder and the reference catalog.
//!
//! ## Overview
//!
//! - Reserved group key used when no prefix rule matches a type tag
//! - Deep-sky and solar-system group keys (the left-hand side of the label tables)
//! - Distance/magnitude conversions used to rank stars
//! - Type aliases for names, type tags and magnitudes

// -------------------------------------------------------------------------------------------------
// Group keys
// -------------------------------------------------------------------------------------------------

/// Bucket key returned by the classifier when no rule matches.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Name of the star at the center of the home planetary system.
pub const HOME_STAR_NAME: &str = "Sol";

/// Deep-sky type tag prefixes, most specific first.
pub const DSO_GROUP_PREFIXES: [&str; 7] = ["SB", "S", "E", "Irr", "Neb", "Glob", "Open cluster"];

/// Solar-system body type tag prefixes, in display order.
pub const BODY_GROUP_PREFIXES: [&str; 7] = [
    "planet",
    "dwarfplanet",
    "moon",
    "minormoon",
    "asteroid",
    "comet",
    "spacecraft",
];

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Light-years per parsec
pub const LY_PER_PARSEC: f64 = 3.26156;

/// Distances below this value (light-years) are clamped before taking a logarithm
pub const MIN_STAR_DISTANCE: f64 = 1e-6;

/// Number of stars returned by a star browser query
pub const DEFAULT_STAR_LIMIT: usize = 100;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Display name of a catalog object or a browser node
pub type ObjectName = String;
/// Catalog type tag (e.g. `"SBc"` for a barred spiral galaxy)
pub type TypeTag = String;
/// Key of a classifier bucket, resolved to a display label through a label table
pub type GroupKey = String;
/// Stellar magnitude
pub type Magnitude = f64;
/// Distance in light-years
pub type LightYear = f64;
