pub mod bootstrap;
pub mod color_utils;
pub mod config;
pub mod hooks;
pub mod host;
pub mod itemtypes;
pub mod manifest;
pub mod version;
