//! Internet Shortcut (`.url`) encoding.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

const SECTION: &str = "[InternetShortcut]";
const URL_KEY: &str = "URL=";
const FILE_SCHEME: &str = "file://";

/// Characters escaped inside the path part of a `file://` URL.
const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// `file:///` URL for an executable path.
pub fn file_url(target: &Path) -> String {
    let raw = target.to_string_lossy().replace('\\', "/");
    let encoded = utf8_percent_encode(&raw, PATH_SET).to_string();
    if encoded.starts_with('/') {
        format!("{FILE_SCHEME}{encoded}")
    } else {
        format!("{FILE_SCHEME}/{encoded}")
    }
}

/// Inverse of [`file_url`]. Returns `None` for non-file URLs.
pub fn path_from_url(url: &str) -> Option<PathBuf> {
    let rest = url.trim().strip_prefix(FILE_SCHEME)?;
    let decoded = percent_decode_str(rest).decode_utf8_lossy().into_owned();

    // "/C:/Games/x.exe" -> "C:/Games/x.exe"
    let bytes = decoded.as_bytes();
    let path = if bytes.len() >= 3 && bytes[0] == b'/' && bytes[2] == b':' {
        decoded[1..].to_string()
    } else {
        decoded
    };
    Some(PathBuf::from(path))
}

/// Full file body for a shortcut to `target`.
pub fn render(target: &Path) -> String {
    let mut lines = vec![SECTION.to_string(), format!("{URL_KEY}{}", file_url(target))];
    if let Some(dir) = target.parent() {
        lines.push(format!("WorkingDirectory={}", dir.display()));
    }
    lines.push(format!("IconFile={}", target.display()));
    lines.push("IconIndex=0".to_string());

    let mut body = lines.join("\r\n");
    body.push_str("\r\n");
    body
}

/// Reads the target recorded in an existing shortcut file.
///
/// `Ok(None)` means the file exists but carries no usable `URL=` line.
pub fn read_target(path: &Path) -> io::Result<Option<PathBuf>> {
    let body = fs::read_to_string(path)?;
    Ok(body
        .lines()
        .find_map(|line| {
            let line = line.trim();
            line.get(..URL_KEY.len())
                .filter(|key| key.eq_ignore_ascii_case(URL_KEY))
                .map(|_| &line[URL_KEY.len()..])
        })
        .and_then(path_from_url))
}

/// Whether two targets name the same file.
pub fn same_target(a: &Path, b: &Path) -> bool {
    let norm = |p: &Path| {
        let s = p.to_string_lossy().replace('\\', "/");
        if cfg!(windows) { s.to_lowercase() } else { s }
    };
    norm(a) == norm(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unix_path_url() {
        assert_eq!(
            file_url(Path::new("/games/Half Life/hl2.exe")),
            "file:///games/Half%20Life/hl2.exe"
        );
    }

    #[test]
    fn drive_path_url() {
        assert_eq!(
            file_url(Path::new(r"C:\Games\Rock #1\rock.exe")),
            "file:///C:/Games/Rock%20%231/rock.exe"
        );
    }

    #[test]
    fn decodes_drive_paths() {
        assert_eq!(
            path_from_url("file:///C:/Games/Rock%20%231/rock.exe"),
            Some(PathBuf::from("C:/Games/Rock #1/rock.exe"))
        );
        assert_eq!(path_from_url("https://example.com"), None);
    }

    #[test]
    fn render_has_section_and_icon() {
        let body = render(Path::new("/games/celeste/Celeste.exe"));
        assert!(body.starts_with("[InternetShortcut]\r\n"));
        assert!(body.contains("URL=file:///games/celeste/Celeste.exe\r\n"));
        assert!(body.contains("WorkingDirectory=/games/celeste\r\n"));
        assert!(body.contains("IconFile=/games/celeste/Celeste.exe\r\n"));
        assert!(body.ends_with("IconIndex=0\r\n"));
    }

    #[test]
    fn reads_back_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("My Game").join("game.exe");
        let file = dir.path().join("My Game.url");
        fs::write(&file, render(&target)).unwrap();

        let read = read_target(&file).unwrap().unwrap();
        assert!(same_target(&read, &target));
    }

    #[test]
    fn missing_url_line_is_none() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("odd.url");
        fs::write(&file, "[InternetShortcut]\r\nIconIndex=0\r\n").unwrap();
        assert_eq!(read_target(&file).unwrap(), None);
    }

    #[test]
    fn lowercase_url_key_accepted() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("odd.url");
        fs::write(&file, "[InternetShortcut]\nurl=file:///g/x.exe\n").unwrap();
        assert_eq!(read_target(&file).unwrap(), Some(PathBuf::from("/g/x.exe")));
    }
}
