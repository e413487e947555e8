//! Terminal QR codes drawn with half-block characters.

use qrcode::types::QrError;
use qrcode::{Color, QrCode};

/// Light modules around the code.
const QUIET_ZONE: usize = 2;
const INDENT: &str = "      ";

/// Render `data` as a QR code, two module rows per text line.
///
/// # Errors
///
/// Returns [`QrError`] if `data` does not fit in a QR code.
pub fn render(data: &str) -> Result<String, QrError> {
    let code = QrCode::new(data)?;
    let colors = code.to_colors();
    let width = code.width();
    let side = width + 2 * QUIET_ZONE;

    let dark = |x: usize, y: usize| {
        let inside = (QUIET_ZONE..QUIET_ZONE + width).contains(&x)
            && (QUIET_ZONE..QUIET_ZONE + width).contains(&y);
        inside && colors[(y - QUIET_ZONE) * width + (x - QUIET_ZONE)] == Color::Dark
    };

    let mut out = String::new();
    for y in (0..side).step_by(2) {
        out.push_str(INDENT);
        for x in 0..side {
            out.push(match (dark(x, y), dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }
    Ok(out)
}

/// Print the QR code for `data`, or a warning if it cannot be encoded.
pub fn print(data: &str) {
    match render(data) {
        Ok(code) => println!("\n{code}"),
        Err(e) => log::warn!("cannot render QR code: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_square_ish() {
        let code = render("0x9858EfFD232B4033E47d90003D41EC34EcaEda94").unwrap();
        let lines: Vec<&str> = code.lines().collect();

        let widths: Vec<usize> = lines.iter().map(|line| line.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));

        let side = widths[0] - INDENT.len();
        assert_eq!(lines.len(), side.div_ceil(2));
    }

    #[test]
    fn test_quiet_zone_is_blank() {
        let code = render("sprig").unwrap();
        let first = code.lines().next().unwrap();
        assert!(first.chars().all(|c| c == ' '));
    }

    #[test]
    fn test_oversized_data_fails() {
        assert!(render(&"x".repeat(8000)).is_err());
    }
}
