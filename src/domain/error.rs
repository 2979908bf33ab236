// Domain error taxonomy

/// Errors raised by the fleet core while ingesting or analyzing telemetry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FleetError {
    /// A raw record lacks a required field or sub-structure.
    #[error("malformed input: missing or invalid field `{path}`")]
    MalformedInput { path: String },

    /// A snapshot reports a lower odometer than the vehicle's latest one.
    #[error("odometer regression for {vin}: latest {previous}, reported {reported}")]
    OdometerRegression {
        vin: String,
        previous: f64,
        reported: f64,
    },

    /// A descriptor for one vehicle was applied to another.
    #[error("vehicle descriptor for {reported} applied to {expected}")]
    VinMismatch { expected: String, reported: String },

    /// Energy price must be a positive, finite amount per kWh.
    #[error("invalid kWh rate: {0}")]
    InvalidRate(f64),
}

impl FleetError {
    pub fn malformed(path: impl Into<String>) -> Self {
        FleetError::MalformedInput { path: path.into() }
    }
}
