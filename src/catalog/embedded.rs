//! Embedded company catalog
//!
//! Catalog rows compiled into the binary at build time.

// Include generated catalog from build script
include!(concat!(env!("OUT_DIR"), "/companies.rs"));
