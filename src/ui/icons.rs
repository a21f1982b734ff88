use std::fs;
use std::path::{Path, PathBuf};

use image::ImageReader;
use log::debug;
use tiny_skia::{Pixmap, Transform};
use walkdir::WalkDir;

use crate::config::IconConfig;

const THEME_SUBDIRS: [&str; 7] = [
    "hicolor/48x48/apps",
    "hicolor/scalable/apps",
    "hicolor/32x32/apps",
    "hicolor/64x64/apps",
    "Adwaita/48x48/apps",
    "Adwaita/scalable/apps",
    "",
];

const EXTENSIONS: [&str; 2] = ["png", "svg"];

/// What the icon preview shows for the current `Icon` value.
#[derive(Debug, Clone)]
pub enum IconPreview {
    NoIcon,
    Image { source: PathBuf, pixmap: Pixmap },
    Invalid,
}

impl IconPreview {
    pub fn label(&self) -> String {
        match self {
            IconPreview::NoIcon => "No Icon".to_string(),
            IconPreview::Invalid => "Invalid".to_string(),
            IconPreview::Image { source, pixmap } => {
                format!("{}x{} from {}", pixmap.width(), pixmap.height(), source.display())
            }
        }
    }
}

pub struct IconResolver {
    theme_paths: Vec<PathBuf>,
    size: u32,
}

impl IconResolver {
    pub fn new(config: &IconConfig) -> Self {
        Self {
            theme_paths: config.theme_paths.clone(),
            size: config.preview_size.max(1),
        }
    }

    /// Try `value` as an image path first, then as a theme icon name.
    pub fn resolve(&self, value: &str) -> IconPreview {
        if value.is_empty() {
            return IconPreview::NoIcon;
        }

        let path = Path::new(value);
        if path.is_file() {
            if let Some(pixmap) = self.load_from_path(path) {
                return IconPreview::Image { source: path.to_path_buf(), pixmap };
            }
            debug!("{:?} is not a readable image, trying theme lookup", path);
        }

        if let Some(found) = self.find_theme_icon(value) {
            if let Some(pixmap) = self.load_from_path(&found) {
                return IconPreview::Image { source: found, pixmap };
            }
        }

        IconPreview::Invalid
    }

    fn find_theme_icon(&self, icon_name: &str) -> Option<PathBuf> {
        if icon_name.contains('/') {
            return None;
        }

        for root in &self.theme_paths {
            if !root.exists() { continue; }

            for sub in THEME_SUBDIRS {
                let dir = root.join(sub);
                if !dir.exists() { continue; }

                for ext in EXTENSIONS {
                    let file_path = dir.join(format!("{}.{}", icon_name, ext));
                    if file_path.is_file() {
                        return Some(file_path);
                    }
                }
            }
        }

        for root in &self.theme_paths {
            let found = WalkDir::new(root)
                .max_depth(5)
                .sort_by_file_name()
                .into_iter()
                .flatten()
                .find(|entry| {
                    let path = entry.path();
                    entry.file_type().is_file()
                        && path.file_stem().and_then(|s| s.to_str()) == Some(icon_name)
                        && path
                            .extension()
                            .and_then(|s| s.to_str())
                            .is_some_and(|ext| EXTENSIONS.contains(&ext))
                });
            if let Some(entry) = found {
                return Some(entry.into_path());
            }
        }

        None
    }

    fn load_from_path(&self, path: &Path) -> Option<Pixmap> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        match ext {
            "svg" => self.load_svg(path),
            _ => self.load_raster(path),
        }
    }

    fn load_raster(&self, path: &Path) -> Option<Pixmap> {
        let img = ImageReader::open(path).ok()?.with_guessed_format().ok()?.decode().ok()?;
        let img = img.resize(self.size, self.size, image::imageops::FilterType::Lanczos3);
        let mut rgba = img.into_rgba8();

        for pixel in rgba.chunks_exact_mut(4) {
            let a = pixel[3] as f32 / 255.0;
            pixel[0] = (pixel[0] as f32 * a) as u8;
            pixel[1] = (pixel[1] as f32 * a) as u8;
            pixel[2] = (pixel[2] as f32 * a) as u8;
        }

        let width = rgba.width();
        let height = rgba.height();

        Pixmap::from_vec(rgba.into_vec(), tiny_skia::IntSize::from_wh(width, height)?)
    }

    fn load_svg(&self, path: &Path) -> Option<Pixmap> {
        let opt = resvg::usvg::Options::default();
        let svg_data = fs::read(path).ok()?;
        let tree = resvg::usvg::Tree::from_data(&svg_data, &opt).ok()?;

        let (w, h) = (tree.size().width(), tree.size().height());
        let scale = self.size as f32 / w.max(h);
        let width = ((w * scale).round() as u32).max(1);
        let height = ((h * scale).round() as u32).max(1);

        let mut pixmap = Pixmap::new(width, height)?;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        Some(pixmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn resolver(theme_paths: Vec<PathBuf>) -> IconResolver {
        IconResolver::new(&IconConfig { theme_paths, preview_size: 64 })
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn empty_value_has_no_icon() {
        assert!(matches!(resolver(vec![]).resolve(""), IconPreview::NoIcon));
        assert_eq!(IconPreview::NoIcon.label(), "No Icon");
    }

    #[test]
    fn unknown_value_is_invalid() {
        let dir = tempdir().unwrap();
        let r = resolver(vec![dir.path().to_path_buf()]);
        assert!(matches!(r.resolve("definitely-not-an-icon"), IconPreview::Invalid));
        assert!(matches!(r.resolve("/nonexistent/icon.png"), IconPreview::Invalid));
    }

    #[test]
    fn non_image_file_is_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "not an image").unwrap();
        let preview = resolver(vec![]).resolve(path.to_str().unwrap());
        assert!(matches!(preview, IconPreview::Invalid));
    }

    #[test]
    fn file_path_is_scaled_keeping_aspect() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 128, 64);

        match resolver(vec![]).resolve(path.to_str().unwrap()) {
            IconPreview::Image { source, pixmap } => {
                assert_eq!(source, path);
                assert_eq!((pixmap.width(), pixmap.height()), (64, 32));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn theme_name_is_found_in_hicolor() {
        let dir = tempdir().unwrap();
        let icon = dir.path().join("hicolor/48x48/apps/my-editor.png");
        write_png(&icon, 48, 48);

        match resolver(vec![dir.path().to_path_buf()]).resolve("my-editor") {
            IconPreview::Image { source, pixmap } => {
                assert_eq!(source, icon);
                assert_eq!(pixmap.width(), 64);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn theme_name_is_found_by_walking() {
        let dir = tempdir().unwrap();
        let icon = dir.path().join("Papirus/24x24/apps/tool.png");
        write_png(&icon, 24, 24);

        match resolver(vec![dir.path().to_path_buf()]).resolve("tool") {
            IconPreview::Image { source, .. } => assert_eq!(source, icon),
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn svg_icons_render() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logo.svg");
        fs::write(
            &path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16"><rect width="16" height="16" fill="red"/></svg>"#,
        )
        .unwrap();

        match resolver(vec![]).resolve(path.to_str().unwrap()) {
            IconPreview::Image { pixmap, .. } => {
                assert_eq!((pixmap.width(), pixmap.height()), (64, 64));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }
}
