//! Serialisation of documents.
//!
//! The layout engine only produces [`Document`] values; writing them out is
//! left to an [`Exporter`]. Formats live behind cargo feature flags.

use crate::document::Document;

#[cfg(feature = "dxf-io")]
pub mod dxf;

/// Writes a document in some interchange format.
pub trait Exporter {
    type Output;

    /// Must preserve layer names and colours, closed and open polylines,
    /// bulges, and text height, rotation and anchor.
    fn export(&self, document: &Document) -> Result<Self::Output, IoError>;
}

/// Generic I/O and format-conversion errors.
///
/// When a format feature is disabled the corresponding variant does not exist.
#[derive(Debug)]
pub enum IoError {
    StdIo(std::io::Error),

    MalformedInput(String),

    #[cfg(feature = "dxf-io")]
    /// Error bubbled up from the `dxf` crate while reading or writing.
    Dxf(::dxf::DxfError),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use IoError::*;

        match self {
            StdIo(error) => write!(f, "std::io::Error: {error}"),

            MalformedInput(msg) => write!(f, "Input is malformed: {msg}"),

            #[cfg(feature = "dxf-io")]
            Dxf(error) => write!(f, "DXF error: {error}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(value: std::io::Error) -> Self {
        Self::StdIo(value)
    }
}

#[cfg(feature = "dxf-io")]
impl From<::dxf::DxfError> for IoError {
    fn from(value: ::dxf::DxfError) -> Self {
        Self::Dxf(value)
    }
}
