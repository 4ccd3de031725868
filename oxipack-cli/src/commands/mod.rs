//! Command implementations for OxiPack CLI.

pub mod compress;
pub mod decompress;
pub mod menu;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use menu::cmd_menu;
