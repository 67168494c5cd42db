// Common utilities shared between internal and user-facing macros
//
// This module contains:
// - type_scan: detects borrowed or opaque types in signatures

mod type_scan;

pub use type_scan::*;
