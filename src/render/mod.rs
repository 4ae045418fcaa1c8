//! Raster target and the glue between crate geometry and `vello_cpu`.

pub(crate) mod convert;
pub mod surface;
