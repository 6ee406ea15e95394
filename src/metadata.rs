use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use serde::Serialize;

use crate::loader::DecodedImage;

#[derive(Debug, Serialize)]
struct Description {
    file_name: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_size: Option<u64>,
    format: String,
    width: usize,
    height: usize,
    frames: usize,
    animated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exif: Vec<ExifEntry>,
}

#[derive(Debug, Serialize)]
struct ExifEntry {
    tag: String,
    value: String,
}

/// Pretty-printed JSON summary of a loaded image and its EXIF fields.
pub fn describe(path: &Path, image: &DecodedImage) -> String {
    let [width, height] = image.size();
    let description = Description {
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
        path: path.display().to_string(),
        file_size: fs::metadata(path).ok().map(|meta| meta.len()),
        format: path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_uppercase)
            .unwrap_or_default(),
        width,
        height,
        frames: image.frame_count(),
        animated: image.is_animated(),
        exif: read_exif(path),
    };

    serde_json::to_string_pretty(&description).unwrap_or_else(|err| {
        log::warn!("Could not serialize metadata for {}: {err}", path.display());
        String::new()
    })
}

fn read_exif(path: &Path) -> Vec<ExifEntry> {
    let Ok(file) = File::open(path) else {
        return Vec::new();
    };
    let mut reader = BufReader::new(file);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return Vec::new();
    };

    exif.fields()
        .filter(|field| field.ifd_num == exif::In::PRIMARY)
        .map(|field| ExifEntry {
            tag: field.tag.to_string(),
            value: field
                .display_value()
                .with_unit(&exif)
                .to_string()
                .trim_matches('"')
                .to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::decode_path;
    use crate::loader::fixtures::write_gif;

    #[test]
    fn describes_dimensions_and_frames() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_gif(dir.path(), "b.gif", 3);
        let image = decode_path(&path).expect("gif should decode");

        let text = describe(&path, &image);
        let value: serde_json::Value = serde_json::from_str(&text).expect("should be JSON");
        assert_eq!(value["file_name"], "b.gif");
        assert_eq!(value["format"], "GIF");
        assert_eq!(value["width"], 8);
        assert_eq!(value["height"], 6);
        assert_eq!(value["frames"], 3);
        assert_eq!(value["animated"], true);
        assert!(value.get("exif").is_none());
    }
}
