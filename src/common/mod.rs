pub mod error;
pub mod hexdump;
