//! # Configuration Constants
//!
//! Centralized constants for the relief pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Sampling**: Point distribution factors and thresholds
//! - **Triangulation**: Super-triangle sizing
//! - **Relief**: Default physical dimensions and tone curve
//! - **Tiling**: Printer bed defaults

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// General tolerance for lengths and areas.
///
/// Facets whose doubled area falls at or below this are skipped, and light
/// vectors shorter than this fall back to overhead lighting.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// let sliver = 1e-12_f64 * 2.0;
/// assert!(sliver <= EPSILON);
/// ```
pub const EPSILON: f64 = 1e-10;

/// Orientation magnitude below which a triangle counts as degenerate.
///
/// Measured as twice the signed area of the triangle in normalized
/// coordinates. Degenerate triangles get a circumcircle that never
/// contains a point.
pub const DEGENERATE_EPSILON: f64 = 1e-14;

/// Area threshold used by mesh validation to reject zero-area triangles.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Boundary points are seeded at this fraction of the base spacing.
///
/// # Example
///
/// ```rust
/// use config::constants::BOUNDARY_STEP_FACTOR;
///
/// let spacing = 1.0 / 20.0;
/// let step = spacing * BOUNDARY_STEP_FACTOR;
/// assert!(step < spacing);
/// ```
pub const BOUNDARY_STEP_FACTOR: f64 = 0.5;

/// Interior candidates are scanned on a sub-grid of this fraction of the
/// base spacing.
pub const CANDIDATE_STEP_FACTOR: f64 = 0.5;

/// Weight of local contrast in the candidate priority.
pub const CONTRAST_PRIORITY_WEIGHT: f64 = 0.5;

/// Edge strength above which a candidate is flagged as an edge point.
pub const EDGE_THRESHOLD: f64 = 0.3;

/// Minimum distance multiplier applied to edge points.
pub const EDGE_SPACING_FACTOR: f64 = 0.6;

/// Edge strength above which refinement points are emitted.
pub const STRONG_EDGE_THRESHOLD: f64 = 0.5;

/// Distance of a refinement point from its parent, in parent radii.
pub const EDGE_EXTRA_OFFSET: f64 = 0.75;

/// Minimum distance of a refinement point, in parent radii.
pub const EDGE_EXTRA_SPACING: f64 = 0.5;

// =============================================================================
// TRIANGULATION CONSTANTS
// =============================================================================

/// Circumradius of the Bowyer-Watson super-triangle, in multiples of the
/// point-cloud extent.
///
/// # Example
///
/// ```rust
/// use config::constants::SUPER_TRIANGLE_MARGIN;
/// assert!(SUPER_TRIANGLE_MARGIN >= 10.0);
/// ```
pub const SUPER_TRIANGLE_MARGIN: f64 = 100.0;

// =============================================================================
// SAMPLING DEFAULTS
// =============================================================================

/// Default number of points per unit width.
pub const DEFAULT_CELL_DENSITY: f64 = 40.0;

/// Upper bound on the cell density accepted by validation.
pub const MAX_CELL_DENSITY: f64 = 1000.0;

/// Default weight of edge strength in the candidate priority.
pub const DEFAULT_EDGE_SENSITIVITY: f64 = 1.0;

/// Default jitter amount in [0, 1].
pub const DEFAULT_JITTER: f64 = 0.3;

/// Default cell scale for black regions when adaptive sizing is on.
pub const DEFAULT_MIN_CELL_SCALE: f64 = 0.5;

/// Default cell scale for white regions when adaptive sizing is on.
pub const DEFAULT_MAX_CELL_SCALE: f64 = 1.5;

/// Default RNG seed for jitter.
pub const DEFAULT_SEED: u64 = 0;

// =============================================================================
// RELIEF DEFAULTS
// =============================================================================

/// Default model width in millimeters.
pub const DEFAULT_OUTPUT_WIDTH: f64 = 150.0;

/// Default model height (Y extent) in millimeters.
pub const DEFAULT_OUTPUT_HEIGHT: f64 = 150.0;

/// Default solid base under every facet, in millimeters.
pub const DEFAULT_BASE_THICKNESS: f64 = 3.0;

/// Default relief height added at full brightness, in millimeters.
pub const DEFAULT_MAX_RELIEF_HEIGHT: f64 = 8.0;

/// Default maximum facet tilt in degrees.
pub const DEFAULT_MAX_TILT_ANGLE: f64 = 35.0;

/// Tilt angles at or above this value make `tan` explode.
pub const MAX_TILT_ANGLE_LIMIT: f64 = 89.0;

/// Default light azimuth in degrees (counter-clockwise from +X).
pub const DEFAULT_LIGHT_AZIMUTH: f64 = 135.0;

/// Default light elevation in degrees above the horizon.
pub const DEFAULT_LIGHT_ELEVATION: f64 = 45.0;

/// Default share of the relief height used by tilted methods.
pub const DEFAULT_HEIGHT_VARIATION: f64 = 0.5;

/// Default facet sharpness.
pub const DEFAULT_FACET_SHARPNESS: f64 = 1.0;

/// Default weight of the center-sampled brightness in the facet blend.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CENTER_WEIGHT;
///
/// let blended = 1.0 * DEFAULT_CENTER_WEIGHT + 0.0 * (1.0 - DEFAULT_CENTER_WEIGHT);
/// assert_eq!(blended, 0.6);
/// ```
pub const DEFAULT_CENTER_WEIGHT: f64 = 0.6;

/// Default midtone gamma of the tilt curve.
pub const DEFAULT_TONE_GAMMA: f64 = 0.7;

/// Default offset added to the sharpness before inverting the exponent.
pub const DEFAULT_SHARPNESS_OFFSET: f64 = 0.5;

/// Facets whose lowest top corner drops below this fraction of the base
/// thickness are raised.
pub const DEFAULT_MIN_WALL_FACTOR: f64 = 0.5;

// =============================================================================
// TILING DEFAULTS
// =============================================================================

/// Default printer bed width in millimeters.
pub const DEFAULT_BED_WIDTH: f64 = 220.0;

/// Default printer bed depth in millimeters.
pub const DEFAULT_BED_HEIGHT: f64 = 220.0;

/// Default overlap shared by neighboring tiles, in millimeters.
pub const DEFAULT_TILE_OVERLAP: f64 = 5.0;

/// Tolerance on tile bounds in normalized coordinates.
pub const TILE_EPSILON: f64 = 1e-6;
