//! Export functionality for family layouts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a [`FamilyLayout`] into an output format. It is the final stage in
//! the Kindred pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Member JSON
//!     ↓ parse
//! [FamilyMember]
//!     ↓ layout
//! FamilyLayout (placements, connectors, size)
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG preview via [`svg::SvgBuilder`] and [`svg::Svg`]
//! - [`json`]: the render model as JSON via [`json::JsonExporter`], plus the
//!   member collection codec used for import and export
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`KindredError::Export`] at the crate boundary.
//!
//! [`KindredError::Export`]: crate::KindredError::Export

pub mod json;
pub mod svg;

use std::io;

use thiserror::Error;

use crate::layout::FamilyLayout;

/// Abstraction for layout export backends.
pub trait Exporter {
    /// Writes `layout` to `writer` in the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_layout<W: io::Write>(&self, layout: &FamilyLayout, writer: W) -> Result<(), Error>;

    /// Renders `layout` into an in-memory string.
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::export_layout`].
    fn render_to_string(&self, layout: &FamilyLayout) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.export_layout(layout, &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| Error::Render(err.to_string()))
    }
}

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure.
    #[error("Render error: {0}")]
    Render(String),
    /// An I/O error encountered while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
