use image::Rgb;

use crate::config::Config;
use crate::flatten::{self, Outcome};
use crate::scan;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub fixed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Flattens every icon matched by `config`, reporting each file on stdout.
///
/// A failing file is reported and the remaining files are still processed.
pub fn run(config: &Config) -> Summary {
    let mut summary = Summary::default();

    let icons = match scan::enumerate(&config.icon_dir, &config.pattern) {
        Ok(icons) => icons,
        Err(e) => {
            println!("Error scanning {}: {}", config.icon_dir.display(), e);
            return summary;
        }
    };

    if icons.is_empty() {
        println!("No icon files found in {}", config.icon_dir.display());
        return summary;
    }

    summary.found = icons.len();
    println!("Found {} icon files to process", icons.len());

    let background = Rgb(config.background);
    for icon in &icons {
        let name = icon
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| icon.display().to_string());

        match flatten::flatten(icon, background) {
            Ok(Outcome::Fixed) => {
                summary.fixed += 1;
                println!("Fixed: {}", name);
            }
            Ok(Outcome::Skipped) => {
                summary.skipped += 1;
                println!("Skipped (no alpha): {}", name);
            }
            Err(e) => {
                summary.failed += 1;
                println!("Error processing {}: {}", e.path().display(), e);
            }
        }
    }

    tracing::info!(
        fixed = summary.fixed,
        skipped = summary.skipped,
        failed = summary.failed,
        "icon batch finished"
    );
    println!("\nDone! All icons have been processed.");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, Rgba, RgbaImage};
    use std::fs;

    fn config_for(dir: &tempfile::TempDir) -> Config {
        Config {
            icon_dir: dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn empty_directory_finishes_without_work() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(run(&config_for(&dir)), Summary::default());
    }

    #[test]
    fn corrupt_icon_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let transparent = dir.path().join("Icon-App-20x20@2x.png");
        let opaque = dir.path().join("Icon-App-29x29@1x.png");
        let corrupt = dir.path().join("Icon-App-40x40@1x.png");
        let unrelated = dir.path().join("Launch-Image.png");

        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]))
            .save(&transparent)
            .expect("save fixture");
        RgbImage::from_pixel(2, 2, Rgb([5, 5, 5]))
            .save(&opaque)
            .expect("save fixture");
        fs::write(&corrupt, b"\x89PNG truncated").expect("write fixture");
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]))
            .save(&unrelated)
            .expect("save fixture");
        let unrelated_before = fs::read(&unrelated).expect("read fixture");

        let summary = run(&config_for(&dir));

        assert_eq!(
            summary,
            Summary {
                found: 3,
                fixed: 1,
                skipped: 1,
                failed: 1,
            }
        );
        let fixed = image::open(&transparent).expect("decode fixed icon");
        assert!(!fixed.color().has_alpha());
        assert_eq!(fixed.to_rgb8().get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(fs::read(&unrelated).expect("read back"), unrelated_before);
    }

    #[test]
    fn bad_pattern_is_reported_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            pattern: "Icon-App-[.png".to_string(),
            ..config_for(&dir)
        };
        assert_eq!(run(&config), Summary::default());
    }
}
