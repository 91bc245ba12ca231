pub mod config;
pub mod mac;
pub mod wol;
