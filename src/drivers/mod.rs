//! I2C device drivers behind the collaborator ports
pub mod ht16k33;
pub mod mcp9808;
