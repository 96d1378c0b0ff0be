//! JSON document loading.

use std::io::Read;
use std::path::Path;

use tlm_model::Namespace;
use tracing::debug;

use crate::error::{IngestError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Reads and decodes the namespace document at `path`.
///
/// A leading UTF-8 byte-order mark is skipped. UTF-16 input is rejected.
pub fn read_namespaces(path: &Path) -> Result<Vec<Namespace>> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if let Some(encoding) = utf16_encoding(&bytes) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding,
        });
    }

    let namespaces: Vec<Namespace> =
        serde_json::from_slice(strip_bom(&bytes)).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        namespace_count = namespaces.len(),
        "decoded input document"
    );
    Ok(namespaces)
}

/// Decodes a namespace document from any reader.
pub fn read_namespaces_from_reader<R: Read>(reader: R) -> Result<Vec<Namespace>> {
    serde_json::from_reader(reader).map_err(|source| IngestError::JsonParseInline { source })
}

/// Decodes a namespace document held in memory.
pub fn parse_namespaces(json: &str) -> Result<Vec<Namespace>> {
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    serde_json::from_str(json).map_err(|source| IngestError::JsonParseInline { source })
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes)
}

fn utf16_encoding(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xFE, ..] => Some("UTF-16 LE"),
        [0xFE, 0xFF, ..] => Some("UTF-16 BE"),
        _ => None,
    }
}
