//! Encoded raster snapshots and the restorations that replay them.

use super::error::SurfaceError;
use std::io::Cursor;

/// PNG-encoded copy of the raster buffer at one moment in time.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Vec<u8>,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("bytes", &self.png.len())
            .finish()
    }
}

impl Snapshot {
    /// Encodes the current contents of `surface`.
    pub fn capture(surface: &cairo::ImageSurface) -> Result<Self, SurfaceError> {
        let mut png = Vec::new();
        surface.write_to_png(&mut png).map_err(SurfaceError::Encode)?;
        Ok(Self { png })
    }

    /// Wraps already-encoded PNG bytes.
    pub fn from_png(png: Vec<u8>) -> Self {
        Self { png }
    }

    pub fn as_png(&self) -> &[u8] {
        &self.png
    }

    /// Decodes the snapshot back into an image surface.
    pub fn decode(&self) -> Result<cairo::ImageSurface, SurfaceError> {
        let mut reader = Cursor::new(self.png.as_slice());
        cairo::ImageSurface::create_from_png(&mut reader).map_err(SurfaceError::Decode)
    }
}

/// A captured snapshot waiting to be painted into the reallocated buffer.
///
/// Restorations are independent: a later resize never cancels or reorders
/// an earlier one.
#[derive(Debug, Clone)]
pub struct PendingRestoration {
    id: u64,
    snapshot: Snapshot,
}

impl PendingRestoration {
    pub(crate) fn new(id: u64, snapshot: Snapshot) -> Self {
        Self { id, snapshot }
    }

    /// Monotonic capture sequence number.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}
