// Re-export the public API
pub use {lopper_cli, lopper_core};
