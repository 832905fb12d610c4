//! Error types used by the crate.

use thiserror::Error;

use crate::layer::LineId;

/// Ortelius error type.
///
/// None of these are fatal to the engine. A degenerate projection defers
/// rendering until the state becomes valid, a failing layer is skipped by the
/// compositor, and an empty fit input is reported back to the caller. The
/// worst outcome of any error here is a blank or stale frame.
#[derive(Debug, Error)]
pub enum OrteliusError {
    /// The screen rectangle or the bounding box needed to build a projection
    /// has a zero span.
    #[error("cannot derive a projection from a zero-size screen or bounding box")]
    DegenerateProjection,

    /// A layer referenced a line the data source has no geometry for.
    #[error("data source has no geometry for line {0:?}")]
    MissingGeometry(LineId),

    /// A zoom target calculation was given no geometry at all.
    #[error("cannot compute a bounding box of empty geometry")]
    EmptyGeometry,
}
