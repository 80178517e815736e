//! Configuration snapshot for one relief generation request.
//!
//! The pipeline treats a [`ReliefConfig`] as immutable: it is built (or
//! parsed from JSON), validated once, and then borrowed by every stage.
//!
//! # Examples
//! ```
//! use config::settings::{ReliefConfig, ReliefMethod};
//!
//! let cfg = ReliefConfig::from_json(r#"{ "mesh": { "method": "heightmap" } }"#)
//!     .expect("valid json");
//! assert_eq!(cfg.mesh.method, ReliefMethod::Heightmap);
//! ```

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the top face of each facet is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliefMethod {
    /// Level facets rotated toward or away from the light.
    #[default]
    Angled,
    /// Per-vertex height displacement, no tilt.
    Heightmap,
    /// Tilt from the facet brightness plus per-vertex displacement.
    Hybrid,
}

/// Tuning heuristics shaping brightness into tilt.
///
/// # Examples
/// ```
/// use config::settings::ToneCurve;
/// let tone = ToneCurve::default();
/// assert!(tone.gamma < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneCurve {
    /// Weight of the center-sampled brightness against the vertex average.
    pub center_weight: f64,
    /// Exponent applied to the distance from mid-grey.
    pub gamma: f64,
    /// Added to the facet sharpness before taking the reciprocal exponent.
    pub sharpness_offset: f64,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self {
            center_weight: DEFAULT_CENTER_WEIGHT,
            gamma: DEFAULT_TONE_GAMMA,
            sharpness_offset: DEFAULT_SHARPNESS_OFFSET,
        }
    }
}

/// Parameters of the adaptive point generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Target number of points per unit width.
    pub cell_density: f64,
    /// Weight of edge strength in the candidate priority.
    pub edge_sensitivity: f64,
    /// Jitter amount in [0, 1].
    pub jitter: f64,
    /// Scale the local spacing by brightness.
    pub adaptive_sizing: bool,
    /// Spacing scale at brightness 0.
    pub min_cell_scale: f64,
    /// Spacing scale at brightness 1.
    pub max_cell_scale: f64,
    /// Emit extra points next to strong edges.
    pub edge_refinement: bool,
    /// Seed of the jitter RNG.
    pub seed: u64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            cell_density: DEFAULT_CELL_DENSITY,
            edge_sensitivity: DEFAULT_EDGE_SENSITIVITY,
            jitter: DEFAULT_JITTER,
            adaptive_sizing: true,
            min_cell_scale: DEFAULT_MIN_CELL_SCALE,
            max_cell_scale: DEFAULT_MAX_CELL_SCALE,
            edge_refinement: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl SamplingParams {
    /// Base spacing between points in normalized units.
    ///
    /// # Examples
    /// ```
    /// use config::settings::SamplingParams;
    /// let params = SamplingParams { cell_density: 20.0, ..Default::default() };
    /// assert_eq!(params.base_spacing(), 0.05);
    /// ```
    pub fn base_spacing(&self) -> f64 {
        1.0 / self.cell_density
    }

    /// Checks ranges of every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_density > 0.0 && self.cell_density <= MAX_CELL_DENSITY) {
            return Err(ConfigError::InvalidDensity(self.cell_density));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(ConfigError::InvalidJitter(self.jitter));
        }
        if !self.edge_sensitivity.is_finite() || self.edge_sensitivity < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "edge_sensitivity",
                value: self.edge_sensitivity,
            });
        }
        if !(self.min_cell_scale > 0.0) || !(self.min_cell_scale <= self.max_cell_scale) {
            return Err(ConfigError::InvalidCellScale {
                min: self.min_cell_scale,
                max: self.max_cell_scale,
            });
        }
        Ok(())
    }
}

/// Physical description of the relief.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Model width in millimeters.
    pub output_width: f64,
    /// Model height (Y extent) in millimeters.
    pub output_height: f64,
    /// Solid base under every facet in millimeters.
    pub base_thickness: f64,
    /// Relief height at full brightness in millimeters.
    pub max_relief_height: f64,
    /// Largest facet rotation in degrees.
    pub max_tilt_angle: f64,
    /// Facet strategy.
    pub method: ReliefMethod,
    /// Light azimuth in degrees, counter-clockwise from +X.
    pub light_azimuth: f64,
    /// Light elevation in degrees above the horizon.
    pub light_elevation: f64,
    /// Share of the relief height used by the tilted methods.
    pub height_variation: f64,
    /// Contrast exaggeration of the tilt curve.
    pub facet_sharpness: f64,
    /// Lowest allowed top corner, as a fraction of the base thickness.
    pub min_wall_factor: f64,
    /// Brightness-to-tilt heuristics.
    pub tone: ToneCurve,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            output_width: DEFAULT_OUTPUT_WIDTH,
            output_height: DEFAULT_OUTPUT_HEIGHT,
            base_thickness: DEFAULT_BASE_THICKNESS,
            max_relief_height: DEFAULT_MAX_RELIEF_HEIGHT,
            max_tilt_angle: DEFAULT_MAX_TILT_ANGLE,
            method: ReliefMethod::default(),
            light_azimuth: DEFAULT_LIGHT_AZIMUTH,
            light_elevation: DEFAULT_LIGHT_ELEVATION,
            height_variation: DEFAULT_HEIGHT_VARIATION,
            facet_sharpness: DEFAULT_FACET_SHARPNESS,
            min_wall_factor: DEFAULT_MIN_WALL_FACTOR,
            tone: ToneCurve::default(),
        }
    }
}

impl MeshConfig {
    /// Checks ranges of every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("output_width", self.output_width)?;
        positive("output_height", self.output_height)?;
        positive("base_thickness", self.base_thickness)?;
        non_negative("max_relief_height", self.max_relief_height)?;
        non_negative("height_variation", self.height_variation)?;
        non_negative("facet_sharpness", self.facet_sharpness)?;
        non_negative("min_wall_factor", self.min_wall_factor)?;
        if !(0.0..MAX_TILT_ANGLE_LIMIT).contains(&self.max_tilt_angle) {
            return Err(ConfigError::InvalidTiltAngle(self.max_tilt_angle));
        }
        if !self.light_azimuth.is_finite() || !self.light_elevation.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "light_direction",
                value: if self.light_azimuth.is_finite() {
                    self.light_elevation
                } else {
                    self.light_azimuth
                },
            });
        }
        if !(0.0..=1.0).contains(&self.tone.center_weight) {
            return Err(ConfigError::InvalidParameter {
                name: "tone.center_weight",
                value: self.tone.center_weight,
            });
        }
        positive("tone.gamma", self.tone.gamma)?;
        positive(
            "facet_sharpness + tone.sharpness_offset",
            self.facet_sharpness + self.tone.sharpness_offset,
        )?;
        Ok(())
    }
}

/// Printer bed used to split a large relief into tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Bed width in millimeters.
    pub bed_width: f64,
    /// Bed depth in millimeters.
    pub bed_height: f64,
    /// Width of the strip shared by neighboring tiles, in millimeters.
    pub overlap: f64,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            bed_width: DEFAULT_BED_WIDTH,
            bed_height: DEFAULT_BED_HEIGHT,
            overlap: DEFAULT_TILE_OVERLAP,
        }
    }
}

impl TileConfig {
    /// Checks that the overlap leaves usable bed space.
    ///
    /// # Examples
    /// ```
    /// use config::settings::TileConfig;
    /// let tiles = TileConfig { bed_width: 10.0, bed_height: 10.0, overlap: 10.0 };
    /// assert!(tiles.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("overlap", self.overlap)?;
        for bed in [self.bed_width, self.bed_height] {
            if !bed.is_finite() || bed <= self.overlap {
                return Err(ConfigError::InvalidBed {
                    bed,
                    overlap: self.overlap,
                });
            }
        }
        Ok(())
    }
}

/// Complete configuration of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefConfig {
    /// Point generator parameters.
    pub sampling: SamplingParams,
    /// Facet construction parameters.
    pub mesh: MeshConfig,
    /// Optional printer bed tiling.
    pub tiles: Option<TileConfig>,
}

impl ReliefConfig {
    /// Parses a configuration from JSON; missing fields take defaults.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|err| ConfigError::Json(err.to_string()))
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::Json(err.to_string()))
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sampling.validate()?;
        self.mesh.validate()?;
        if let Some(tiles) = &self.tiles {
            tiles.validate()?;
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Cell density is not within (0, MAX_CELL_DENSITY].
    InvalidDensity(f64),
    /// Jitter outside [0, 1].
    InvalidJitter(f64),
    /// Cell scale range is empty or non-positive.
    InvalidCellScale { min: f64, max: f64 },
    /// Tilt angle outside [0, 89).
    InvalidTiltAngle(f64),
    /// Overlap consumes the whole bed.
    InvalidBed { bed: f64, overlap: f64 },
    /// A named parameter is out of range.
    InvalidParameter { name: &'static str, value: f64 },
    /// JSON could not be parsed.
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDensity(value) => {
                write!(f, "cell_density must be within (0, {MAX_CELL_DENSITY}]: {value}")
            }
            ConfigError::InvalidJitter(value) => {
                write!(f, "jitter must be within [0, 1]: {value}")
            }
            ConfigError::InvalidCellScale { min, max } => {
                write!(f, "cell scale range must satisfy 0 < min <= max: {min}..{max}")
            }
            ConfigError::InvalidTiltAngle(value) => {
                write!(f, "max_tilt_angle must be within [0, {MAX_TILT_ANGLE_LIMIT}): {value}")
            }
            ConfigError::InvalidBed { bed, overlap } => {
                write!(f, "bed size {bed} must exceed overlap {overlap}")
            }
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "{name} is out of range: {value}")
            }
            ConfigError::Json(message) => write!(f, "invalid configuration json: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}
