//! # Config Crate
//!
//! Centralized tuning constants and the configuration snapshot consumed by
//! the relief pipeline. Every magic number used by point sampling,
//! triangulation and facet construction lives here so that the geometry
//! crates stay declarative.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_BASE_THICKNESS, EPSILON};
//! use config::settings::ReliefConfig;
//!
//! let cfg = ReliefConfig::default();
//! assert!(cfg.validate().is_ok());
//! assert_eq!(cfg.mesh.base_thickness, DEFAULT_BASE_THICKNESS);
//! assert!(EPSILON > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Immutable Snapshot**: A `ReliefConfig` is validated once per request
//! - **Serde Friendly**: Every setting can be loaded from JSON with defaults

pub mod constants;
pub mod settings;

pub use settings::{
    ConfigError, MeshConfig, ReliefConfig, ReliefMethod, SamplingParams, TileConfig, ToneCurve,
};
