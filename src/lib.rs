//! Parametric 2D layouts of **kinetic inductance detector (KID)** pixels,
//! and the tiling of many pixels into one array layout.
//!
//! A pixel is built from a small set of physical dimensions: every polyline,
//! arc and label follows from closed-form expressions, with arcs stored as
//! exact polyline bulges. Arrays place finished pixel documents with a rigid
//! transform each (mirror, rotation, translation) and merge them in order.
//!
//! ```no_run
//! use kid_drawer::assembly::{ArrayAssembler, ArrayEntry};
//! use kid_drawer::pattern::{Dimensions, Parameters, PixelPattern, Variant};
//! use kid_drawer::transform::Mirror;
//!
//! # fn main() -> Result<(), kid_drawer::Error> {
//! let mut assembler = ArrayAssembler::new();
//! for index in 1..=2 {
//!     let params = Parameters::new(index, Dimensions::default())?;
//!     let pixel = PixelPattern::new(params, Variant::CapacitorCross)?.build()?;
//!     assembler.insert(index as usize, pixel);
//! }
//! let array = assembler.assemble(&[
//!     ArrayEntry::new(1, 0.0, 0.0, 0.0, Mirror::None),
//!     ArrayEntry::new(2, 3000.0, 0.0, 180.0, Mirror::X),
//! ])?;
//! # let _ = array;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**dxf-io**](https://en.wikipedia.org/wiki/AutoCAD_DXF): `.dxf` export and import
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to build pixel batches and place array entries
//! - **tracing**: debug logging of construction steps and assembly

#![forbid(unsafe_code)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod log;
pub mod geometry;
pub mod layers;
pub mod document;
pub mod traits;
pub mod transform;
pub mod pattern;
pub mod assembly;
pub mod lattice;
pub mod io;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use assembly::{ArrayAssembler, ArrayEntry};
pub use document::{ArcVertex, ArrayDocument, Document, Entity, PixelDocument, Primitive};
pub use errors::{AssemblyError, ConfigurationError, Error, GeometryError};
pub use layers::{Layer, LayerTable};
pub use pattern::{Dimensions, Parameters, PixelPattern, Variant};
pub use traits::TransformOps;
pub use transform::{Mirror, RigidTransform};
