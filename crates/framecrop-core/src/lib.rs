pub mod config;
pub mod consts;
pub mod editor;
pub mod error;
pub mod io;
pub mod raster;
pub mod upload;
pub mod viewport;
