use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

use crate::error::{ChartError, Result};

/// Places a sans-serif TTF usually lives on common systems.
const SYSTEM_FONTS: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const STYLES: [FontStyle; 4] = [
    FontStyle::Normal,
    FontStyle::Bold,
    FontStyle::Italic,
    FontStyle::Oblique,
];

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register a TTF for the `sans-serif` family, preferring `preferred` and then the
/// system locations. Registration happens once per process; later calls return the
/// first result. `None` means charts are drawn without text.
pub fn register_fonts(preferred: Option<&Path>) -> Result<Option<&'static Path>> {
    if let Some(path) = preferred {
        if !path.is_file() {
            return Err(ChartError::Config(format!(
                "font file {} does not exist",
                path.display()
            )));
        }
    }

    let registered = REGISTERED.get_or_init(|| {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            // ab_glyph keeps a reference to the font data for the process lifetime.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match STYLES
                .iter()
                .try_for_each(|style| register_font("sans-serif", *style, bytes))
            {
                Ok(()) => {
                    log::info!("Using font {}", path.display());
                    return Some(path);
                }
                Err(_) => log::warn!("Skipping font {}: not a usable TTF", path.display()),
            }
        }

        log::warn!("No usable TTF font found; charts will be rendered without text");
        None
    });

    Ok(registered.as_deref())
}
