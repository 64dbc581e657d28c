// anh2prompt - Image-to-prompt analysis gateway for the Gemini vision API

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod prepare;
pub mod server;
pub mod utils;
