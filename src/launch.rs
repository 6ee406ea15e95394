use std::path::PathBuf;

/// What the process was asked to open on launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRequest {
    Empty,
    Open(PathBuf),
}

impl LaunchRequest {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            LaunchRequest::Empty => None,
            LaunchRequest::Open(path) => Some(path),
        }
    }
}

pub fn parse_launch_request_from_args(args: &[String]) -> Result<LaunchRequest, String> {
    let paths = match args.first().map(String::as_str) {
        None => return Ok(LaunchRequest::Empty),
        Some("--open") => {
            if args.len() == 1 {
                return Err("Missing file path after --open.".to_string());
            }
            &args[1..]
        }
        Some(_) => args,
    };

    if paths.len() > 1 {
        return Err(format!("Expected a single image path (got {}).", paths.len()));
    }

    let raw = paths[0].trim();
    if raw.is_empty() {
        return Err("Image path is empty.".to_string());
    }
    parse_path_argument(raw).map(LaunchRequest::Open)
}

/// Plain paths pass through; `file://` URIs are percent-decoded.
pub fn parse_path_argument(value: &str) -> Result<PathBuf, String> {
    let Some(rest) = strip_file_scheme(value) else {
        return Ok(PathBuf::from(value));
    };

    // file:///C:/x.png keeps the drive letter, file:///home/x.png keeps the root.
    let rest = rest.strip_prefix("localhost").unwrap_or(rest);
    let decoded = percent_decode(rest)?;
    let bytes = decoded.as_bytes();
    let is_drive_path =
        bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':';
    if is_drive_path {
        return Ok(PathBuf::from(&decoded[1..]));
    }
    if decoded.trim().is_empty() {
        return Err("file:// URI does not contain a path.".to_string());
    }
    Ok(PathBuf::from(decoded))
}

fn strip_file_scheme(uri: &str) -> Option<&str> {
    let prefix = "file://";
    let head = uri.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        uri.get(prefix.len()..)
    } else {
        None
    }
}

fn percent_decode(value: &str) -> Result<String, String> {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'%' => {
                if index + 2 >= bytes.len() {
                    return Err("Invalid percent-encoding in URI.".to_string());
                }
                let hi = decode_hex_digit(bytes[index + 1])
                    .ok_or_else(|| "Invalid percent-encoding in URI.".to_string())?;
                let lo = decode_hex_digit(bytes[index + 2])
                    .ok_or_else(|| "Invalid percent-encoding in URI.".to_string())?;
                decoded.push((hi << 4) | lo);
                index += 3;
            }
            byte => {
                decoded.push(byte);
                index += 1;
            }
        }
    }

    String::from_utf8(decoded).map_err(|_| "URI contains invalid UTF-8 after decoding.".to_string())
}

fn decode_hex_digit(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
