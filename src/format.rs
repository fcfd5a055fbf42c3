//! Text helpers shared by the report sections.

const FACTOR: f64 = 1024.0;
const UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

const TITLE_RULE: usize = 40;
const SUBTITLE_RULE: usize = 38;

/// Scale a byte count to the largest binary unit that keeps it below 1024.
///
/// ```
/// use system_information::format::scale_bytes;
///
/// assert_eq!(scale_bytes(1253656), "1.20MB");
/// assert_eq!(scale_bytes(1253656678), "1.17GB");
/// ```
pub fn scale_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let largest = UNITS.len() - 1;

    for unit in &UNITS[..largest] {
        if value < FACTOR {
            return format!("{value:.2}{unit}B");
        }
        value /= FACTOR;
    }

    format!("{value:.2}{}B", UNITS[largest])
}

pub fn render_title(title: &str) -> String {
    rule('=', TITLE_RULE, title)
}

pub fn render_subtitle(title: &str) -> String {
    rule('-', SUBTITLE_RULE, title)
}

fn rule(fill: char, width: usize, title: &str) -> String {
    let bar = fill.to_string().repeat(width);
    format!("{bar} {title} {bar}")
}
