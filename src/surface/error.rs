//! Errors raised while allocating or snapshotting the raster surface.

use thiserror::Error;

/// Failures that can surface from Cairo while managing the backing store.
///
/// Drawing failures are not represented here: stroke and clear operations
/// log and carry on instead of failing the caller.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to allocate {width}x{height} raster surface: {source}")]
    Allocation {
        width: i32,
        height: i32,
        #[source]
        source: cairo::Error,
    },

    #[error("failed to create drawing context: {0}")]
    Context(#[source] cairo::Error),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] cairo::IoError),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] cairo::IoError),
}
