//! Bundled app icon and the derived tray/notification images.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageFormat, RgbaImage};
use thiserror::Error;

const BUNDLED_ICON: &[u8] = include_bytes!("assets/icon.png");

/// Frame sizes written into the Windows toast icon.
pub const NOTIFICATION_ICON_SIZES: [u32; 5] = [16, 24, 32, 48, 64];

/// Edge length used for the PNG toast icon and the tray icon.
pub const ICON_SIZE: u32 = 64;

const NOTIFICATION_ICON_STEM: &str = "neck_protector_toast_icon";

#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to process icon image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The embedded app icon, decoded.
pub fn bundled_rgba() -> Result<RgbaImage, IconError> {
    decode_rgba(BUNDLED_ICON)
}

pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, IconError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

pub fn resized(image: &RgbaImage, size: u32) -> RgbaImage {
    if image.dimensions() == (size, size) {
        return image.clone();
    }
    imageops::resize(image, size, size, FilterType::Lanczos3)
}

/// Converts RGBA pixels to the ARGB32 byte order StatusNotifierItem expects.
pub fn to_argb32(image: &RgbaImage) -> Vec<u8> {
    let mut argb = Vec::with_capacity(image.as_raw().len());
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        argb.extend_from_slice(&[a, r, g, b]);
    }
    argb
}

/// Writes a multi-resolution `.ico` with one PNG frame per size in
/// [`NOTIFICATION_ICON_SIZES`].
pub fn write_ico(source: &RgbaImage, path: &Path) -> Result<(), IconError> {
    let frames = NOTIFICATION_ICON_SIZES
        .iter()
        .map(|&size| {
            let frame = resized(source, size);
            IcoFrame::as_png(frame.as_raw(), size, size, ExtendedColorType::Rgba8)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let file = File::create(path).map_err(|source| IconError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    IcoEncoder::new(BufWriter::new(file)).encode_images(&frames)?;
    Ok(())
}

pub fn write_png(source: &RgbaImage, path: &Path) -> Result<(), IconError> {
    resized(source, ICON_SIZE).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Writes the toast icon into `dir`: `.ico` on Windows, `.png` elsewhere.
///
/// Best-effort: returns `None` on any failure and reminders show without an icon.
pub fn prepare_notification_icon(dir: &Path) -> Option<PathBuf> {
    prepare_notification_icon_from(BUNDLED_ICON, dir)
}

pub fn prepare_notification_icon_from(source: &[u8], dir: &Path) -> Option<PathBuf> {
    match try_prepare(source, dir) {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Notification icon ready");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to prepare notification icon, reminders will show without one"
            );
            None
        }
    }
}

fn try_prepare(source: &[u8], dir: &Path) -> Result<PathBuf, IconError> {
    fs::create_dir_all(dir).map_err(|source| IconError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let image = decode_rgba(source)?;

    if cfg!(target_os = "windows") {
        let path = dir.join(format!("{NOTIFICATION_ICON_STEM}.ico"));
        write_ico(&image, &path)?;
        Ok(path)
    } else {
        let path = dir.join(format!("{NOTIFICATION_ICON_STEM}.png"));
        write_png(&image, &path)?;
        Ok(path)
    }
}
