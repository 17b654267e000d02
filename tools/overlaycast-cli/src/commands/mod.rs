pub mod config;
pub mod frames;
pub mod qr;
pub mod watermark;
