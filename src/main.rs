use std::process;

use wallcraft_icongen::config::ExportConfig;
use wallcraft_icongen::error::ExportError;
use wallcraft_icongen::logger::{log_error, log_line};
use wallcraft_icongen::{export, icon};

fn run(preview_only: bool) -> Result<(), ExportError> {
    println!("Generating WallCraft retro stripe icon...");
    log_line("render start");
    let master = icon::generate_icon(icon::MASTER_SIZE);

    let cfg = ExportConfig::default();
    if preview_only {
        export::write_previews(&master, &cfg.preview_dir)?;
        return Ok(());
    }

    println!("Saving all sizes...");
    export::export_all(&master, &cfg)?;
    export::write_previews(&master, &cfg.preview_dir)?;
    log_line("export done");
    println!("Done!");
    Ok(())
}

fn main() {
    let preview_only = std::env::args().skip(1).any(|arg| arg == "--preview");
    if let Err(e) = run(preview_only) {
        log_error("icon export failed", &e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
