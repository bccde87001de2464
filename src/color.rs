//! Hex color parsing shared by both generators

/// A color with 8-bit alpha, red, green and blue channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    /// Channels as 0-1 floats in `(red, green, blue, alpha)` order
    pub fn unit_channels(self) -> (f64, f64, f64, f64) {
        let unit = |c: u8| f64::from(c) / 255.0;
        (unit(self.r), unit(self.g), unit(self.b), unit(self.a))
    }
}

/// Parse `#RGB`, `#ARGB`, `#RRGGBB` or `#AARRGGBB`. Alpha comes first and
/// defaults to fully opaque. Returns `None` for anything that is not hex.
pub fn parse_hex_color(input: &str) -> Option<Argb> {
    let digits = input.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded = match digits.len() {
        3 => format!("ff{}", double_each(digits)),
        4 => double_each(digits),
        6 => format!("ff{}", digits),
        8 => digits.to_string(),
        _ => return None,
    };

    let bytes = hex::decode(expanded).ok()?;
    match bytes.as_slice() {
        [a, r, g, b] => Some(Argb {
            a: *a,
            r: *r,
            g: *g,
            b: *b,
        }),
        _ => None,
    }
}

fn double_each(digits: &str) -> String {
    digits.chars().flat_map(|c| [c, c]).collect()
}
