//! Startup banner: "TN-CASTING" in figlet letters, red fading to white.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Flag red (#e70013).
const TUNIS_RED: (u8, u8, u8) = (0xe7, 0x00, 0x13);
const PAPER_WHITE: (u8, u8, u8) = (0xf5, 0xf5, 0xf5);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner followed by the version line. Silently skips the art if
/// the built-in font cannot render.
pub fn print_welcome() {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("TN-CASTING").map(|f| f.to_string()));

    if let Some(art) = art {
        let lines: Vec<&str> = art.lines().collect();
        let total = lines.len().max(1);
        for (i, line) in lines.iter().enumerate() {
            let t = if total <= 1 {
                1.0
            } else {
                i as f64 / (total - 1) as f64
            };
            let (r, g, b) = lerp_rgb(TUNIS_RED, PAPER_WHITE, t);
            let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
            let _ = out.execute(Print(line));
            let _ = out.execute(Print("\r\n"));
            let _ = out.execute(ResetColor);
        }
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: TUNIS_RED.0,
        g: TUNIS_RED.1,
        b: TUNIS_RED.2,
    }));
    let _ = out.execute(Print(format!("v{}  casting calls across Tunisia\r\n", version)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(TUNIS_RED, PAPER_WHITE, 0.0), TUNIS_RED);
        assert_eq!(lerp_rgb(TUNIS_RED, PAPER_WHITE, 1.0), PAPER_WHITE);
        assert_eq!(lerp_rgb((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
    }
}
