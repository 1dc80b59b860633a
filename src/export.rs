use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::process::{Command, Stdio};

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::logger::{log_command, log_error, log_line};

/// Tauri icon directory layout: desktop sizes plus the Windows store tiles.
pub const PNG_TARGETS: &[(&str, u32)] = &[
    ("32x32.png", 32),
    ("128x128.png", 128),
    ("128x128@2x.png", 256),
    ("icon.png", 512),
    ("Square30x30Logo.png", 30),
    ("Square44x44Logo.png", 44),
    ("Square71x71Logo.png", 71),
    ("Square89x89Logo.png", 89),
    ("Square107x107Logo.png", 107),
    ("Square142x142Logo.png", 142),
    ("Square150x150Logo.png", 150),
    ("Square284x284Logo.png", 284),
    ("Square310x310Logo.png", 310),
    ("StoreLogo.png", 50),
];

pub const ICO_SIZES: &[u32] = &[16, 24, 32, 48, 64, 128, 256];

pub const ICNS_SIZES: &[u32] = &[16, 32, 128, 256, 512, 1024];

/// hicolor theme subdirectories and the pixel size installed into each.
pub const THEME_SIZES: &[(&str, u32)] = &[
    ("48x48", 48),
    ("64x64", 64),
    ("96x96", 96),
    ("128x128", 128),
    ("256x256", 256),
    ("512x512", 512),
];

pub const THEME_ICON_NAME: &str = "wallcraft.png";

fn resized(master: &RgbaImage, size: u32) -> RgbaImage {
    if master.width() == size && master.height() == size {
        master.clone()
    } else {
        imageops::resize(master, size, size, FilterType::Lanczos3)
    }
}

/// Full export: PNG table, ICO, best-effort ICNS, theme install plus cache
/// refresh. The steps are independent; only the ICNS write is allowed to fail
/// without aborting the run.
pub fn export_all(master: &RgbaImage, cfg: &ExportConfig) -> Result<(), ExportError> {
    log_line(&format!("export start -> {}", cfg.icons_dir.display()));
    fs::create_dir_all(&cfg.icons_dir)?;

    write_pngs(master, &cfg.icons_dir)?;
    write_ico(master, &cfg.icons_dir.join("icon.ico"))?;

    // ICNS support varies by platform tooling; keep going without it
    if let Err(e) = write_icns(master, &cfg.icons_dir.join("icon.icns")) {
        log_error("icns export failed", &e);
        println!("  ICNS save failed ({}), skipping", e);
    }

    if let Some(theme_dir) = &cfg.theme_dir {
        install_theme_icons(master, theme_dir)?;
        if let Some(hook) = cfg.refresh_hook {
            hook(theme_dir);
        }
    }
    Ok(())
}

fn write_pngs(master: &RgbaImage, dir: &Path) -> Result<(), ExportError> {
    for &(name, size) in PNG_TARGETS {
        let path = dir.join(name);
        resized(master, size).save(&path)?;
        println!("  Saved {} ({}x{})", name, size, size);
    }
    Ok(())
}

fn write_ico(master: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    for &size in ICO_SIZES {
        let img = resized(master, size);
        let entry = ico::IconImage::from_rgba_data(size, size, img.into_raw());
        dir.add_entry(ico::IconDirEntry::encode(&entry)?);
    }
    let file = BufWriter::new(File::create(path)?);
    dir.write(file)?;
    println!("  Saved icon.ico (multi-size)");
    Ok(())
}

fn write_icns(master: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    let mut family = icns::IconFamily::new();
    for &size in ICNS_SIZES {
        let img = resized(master, size);
        let icon = icns::Image::from_data(icns::PixelFormat::RGBA, size, size, img.into_raw())?;
        family.add_icon(&icon)?;
    }
    let file = BufWriter::new(File::create(path)?);
    family.write(file)?;
    println!("  Saved icon.icns");
    Ok(())
}

fn install_theme_icons(master: &RgbaImage, theme_dir: &Path) -> Result<(), ExportError> {
    for &(dirname, size) in THEME_SIZES {
        let dest_dir = theme_dir.join(dirname).join("apps");
        fs::create_dir_all(&dest_dir)?;
        resized(master, size).save(dest_dir.join(THEME_ICON_NAME))?;
        println!("  Installed {}/apps/{}", dirname, THEME_ICON_NAME);
    }
    Ok(())
}

/// Two preview images for manual inspection.
pub fn write_previews(master: &RgbaImage, preview_dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(preview_dir)?;
    let path = preview_dir.join("preview.png");
    resized(master, 256).save(&path)?;
    println!("  Preview saved: {}", path.display());
    let path_lg = preview_dir.join("preview_512.png");
    resized(master, 512).save(&path_lg)?;
    println!("  Preview (large) saved: {}", path_lg.display());
    Ok(())
}

/// Best-effort desktop cache refresh after a theme install. The tools are not
/// present on every system; failures and output are discarded.
pub fn refresh_icon_caches(theme_dir: &Path) {
    run_quiet(
        "gtk-update-icon-cache",
        &["-f".into(), "-t".into(), theme_dir.display().to_string()],
    );
    if let Some(dirs) = directories::BaseDirs::new() {
        let applications = dirs.data_dir().join("applications");
        run_quiet("update-desktop-database", &[applications.display().to_string()]);
    }
}

fn run_quiet(program: &str, args: &[String]) {
    log_command(program, args);
    let _ = Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}
