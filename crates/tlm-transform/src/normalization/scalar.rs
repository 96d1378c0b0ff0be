//! Scalar coercion to `f64`.

use tlm_model::{CoercionWarning, Scalar, WarningKind};
use tracing::warn;

use super::categorical::token_code;

/// Coerces one cell to `f64`.
///
/// Numbers pass through, booleans become `1.0`/`0.0`, known categorical tokens
/// become their code, and any other string is parsed as a float. Strings
/// beyond the `f64` range are rejected. Cells that fit none of these rules are
/// returned as the reason they were rejected.
pub fn coerce(value: &Scalar) -> Result<f64, WarningKind> {
    match value {
        Scalar::Number(v) => Ok(*v),
        Scalar::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Scalar::Text(text) => {
            if let Some(code) = token_code(text) {
                return Ok(f64::from(code));
            }
            match text.parse::<f64>() {
                Ok(v) if v.is_finite() || is_infinity_literal(text) => Ok(v),
                _ => Err(WarningKind::UnparseableText { text: text.clone() }),
            }
        }
        Scalar::Unsupported { kind, raw } => Err(WarningKind::UnsupportedType {
            kind: *kind,
            raw: raw.clone(),
        }),
    }
}

/// True for spelled-out infinities such as `inf` or `-Infinity`. Any other
/// text that parses to an infinity overflowed the `f64` range.
fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Coerces the cell at raw position `[row][col]`, never failing.
///
/// Rejected cells log one warning and become `0.0`.
pub fn normalize(value: &Scalar, row: usize, col: usize) -> f64 {
    normalize_into(value, row, col, &mut Vec::new())
}

/// Like [`normalize`], additionally recording the warning in `warnings`.
pub(crate) fn normalize_into(
    value: &Scalar,
    row: usize,
    col: usize,
    warnings: &mut Vec<CoercionWarning>,
) -> f64 {
    match coerce(value) {
        Ok(v) => v,
        Err(kind) => {
            let warning = CoercionWarning { row, col, kind };
            warn!(row, col, value_type = value.kind(), "{warning}");
            warnings.push(warning);
            0.0
        }
    }
}
