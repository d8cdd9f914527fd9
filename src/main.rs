// Release builds on Windows run without a console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use neck_protector::bootstrap::{self, LaunchOptions};
use neck_protector::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_guard = logging::init();
    let options = LaunchOptions::from_args(std::env::args().skip(1));
    bootstrap::run(options, log_guard)
}
