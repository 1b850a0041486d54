pub mod config;
pub mod crop;
pub mod info;
pub mod resize;
