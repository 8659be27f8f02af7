/*
 * Error Module
 *
 * Errors raised while building simulation entities or parsing their
 * textual representations. Numeric degeneracies (zero-length vectors,
 * division by zero) are not errors: they resolve to documented fallback
 * values in the vector module.
 */

use std::fmt;

/// Errors raised when an entity is constructed from an invalid configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A body that is expected to steer was built without a behavior set.
    MissingBehaviors,
    /// A physical limit was negative or not a finite number.
    InvalidLimit { field: &'static str, value: f32 },
    /// Mass must be strictly positive.
    NonPositiveMass(f32),
    /// World bounds must be positive and finite.
    InvalidBounds { width: f32, height: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingBehaviors => {
                write!(f, "Boid has no behavior set; supply at least an empty BehaviorSet")
            }
            ConfigError::InvalidLimit { field, value } => {
                write!(f, "Invalid value for {}: {} (must be finite and non-negative)", field, value)
            }
            ConfigError::NonPositiveMass(mass) => write!(f, "Mass must be positive, got {}", mass),
            ConfigError::InvalidBounds { width, height } => {
                write!(f, "World bounds must be positive, got {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Error returned when a string is not in the `Vector2D x:<x>, y:<y>` format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVectorError {
    pub input: String,
}

impl fmt::Display for ParseVectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected \"Vector2D x:<x>, y:<y>\", got {:?}", self.input)
    }
}

impl std::error::Error for ParseVectorError {}

/// Error returned when a color string is not `#RGB` or `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    pub input: String,
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected #RGB or #RRGGBB, got {:?}", self.input)
    }
}

impl std::error::Error for ParseColorError {}

/// Errors raised while loading simulation parameters from disk.
#[derive(Debug)]
pub enum ParamsError {
    /// The parameter file could not be read.
    Io(std::io::Error),
    /// The parameter file is not valid JSON for `SimulationParams`.
    Parse(serde_json::Error),
    /// The parameters parsed but describe an impossible world.
    Invalid(ConfigError),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Io(e) => write!(f, "Failed to read parameter file: {}", e),
            ParamsError::Parse(e) => write!(f, "Failed to parse parameter file: {}", e),
            ParamsError::Invalid(e) => write!(f, "Invalid parameters: {}", e),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Io(e) => Some(e),
            ParamsError::Parse(e) => Some(e),
            ParamsError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ParamsError {
    fn from(e: std::io::Error) -> Self {
        ParamsError::Io(e)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> Self {
        ParamsError::Parse(e)
    }
}

impl From<ConfigError> for ParamsError {
    fn from(e: ConfigError) -> Self {
        ParamsError::Invalid(e)
    }
}
