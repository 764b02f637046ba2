use std::fs;
use std::path::Path;

const BUNDLED_TOOLS: [&str; 2] = ["ffmpeg", "ffprobe"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Watching a missing path reruns the script on every build
    if Path::new("bin").is_dir() {
        println!("cargo:rerun-if-changed=bin");
    } else {
        println!("cargo:rerun-if-changed=build.rs");
    }

    // Copy bundled ffmpeg/ffprobe next to the output binary
    let out_dir = std::env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("../../.."); // Points to target/debug or target/release
    let bin_dest = dest_path.join("bin");

    let exe_suffix = if std::env::var("CARGO_CFG_WINDOWS").is_ok() {
        ".exe"
    } else {
        ""
    };

    for tool in BUNDLED_TOOLS {
        let file_name = format!("{}{}", tool, exe_suffix);
        let src_exe = Path::new("bin").join(&file_name);

        if src_exe.exists() {
            fs::create_dir_all(&bin_dest)?;
            let dest_exe = bin_dest.join(&file_name);
            fs::copy(&src_exe, &dest_exe)?;
            println!("Copied {} to {}", src_exe.display(), dest_exe.display());
        } else {
            println!("{} not bundled, it will be resolved at runtime", src_exe.display());
        }
    }
    Ok(())
}
