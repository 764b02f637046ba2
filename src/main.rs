use std::io;

use anyhow::Result;
use gopro_merge::config::AppConfig;
use gopro_merge::modules::prompt::prompt_folder_fl::prompt_for_folder;
use gopro_merge::run::{process_gopro_folder, FfmpegTools};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    config.check_tools();

    let folder = prompt_for_folder(io::stdin().lock(), io::stdout())?;

    let tools = FfmpegTools::from_config(&config);
    let summary = process_gopro_folder(&folder, &tools, &config.output_prefix)?;

    for output in &summary.merged {
        println!("✅ Successfully created {}", output.display());
    }
    for (session, reason) in &summary.failed {
        println!("❌ Session {} skipped: {}", session, reason);
    }
    println!(
        "Merged {} session(s), skipped {} session(s) and {} file(s).",
        summary.merged.len(),
        summary.failed.len(),
        summary.skipped_files.len()
    );
    Ok(())
}
