// CLI module for anh2prompt

pub mod analyze;

use clap::Parser;
use std::path::PathBuf;

/// anh2prompt - Image-to-prompt analysis gateway for the Gemini vision API
#[derive(Parser, Debug)]
#[command(name = "anh2prompt", version, about, long_about = None)]
pub struct Args {
    /// Prepare an image file and send it to a running gateway instead of
    /// starting the server
    #[arg(long, value_name = "FILE")]
    pub analyze: Option<PathBuf>,

    /// Gateway endpoint used by --analyze
    #[arg(long, value_name = "URL")]
    pub gateway: Option<String>,
}
