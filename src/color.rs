use serde::Serialize;

use super::error::ColorError;

// `h` in degrees, `s` and `l` in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }

    pub fn from_hex(hex: &str) -> Result<Rgb, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Malformed(hex.to_owned()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorError::Malformed(hex.to_owned()))?;

        Ok(Rgb {
            red: (value >> 16 & 0xff) as u8,
            green: (value >> 8 & 0xff) as u8,
            blue: (value & 0xff) as u8,
        })
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.red as f32 / 255.;
        let g = self.green as f32 / 255.;
        let b = self.blue as f32 / 255.;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.;

        if max == min {
            return Hsl { h: 0., s: 0., l: l * 100. };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2. - max - min) } else { d / (max + min) };

        let sector = if max == r {
            (g - b) / d + if g < b { 6. } else { 0. }
        } else if max == g {
            (b - r) / d + 2.
        } else {
            (r - g) / d + 4.
        };

        Hsl { h: sector * 60., s: s * 100., l: l * 100. }
    }
}

pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Rgb::from_hex(hex).map(Rgb::to_hsl)
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Hsl { h, s, l }
    }

    // CSS `hsl()` rules: hue wraps, saturation and lightness clamp.
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.) / 360.;
        let s = self.s.clamp(0., 100.) / 100.;
        let l = self.l.clamp(0., 100.) / 100.;

        if s == 0. {
            let v = channel(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1. + s) } else { l + s - l * s };
        let p = 2. * l - q;

        Rgb {
            red: channel(hue_to_rgb(p, q, h + 1. / 3.)),
            green: channel(hue_to_rgb(p, q, h)),
            blue: channel(hue_to_rgb(p, q, h - 1. / 3.)),
        }
    }

    pub fn to_sk_color(self) -> tiny_skia::Color {
        let Rgb { red, green, blue } = self.to_rgb();
        tiny_skia::Color::from_rgba8(red, green, blue, 255)
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.);
    if t < 1. / 6. {
        p + (q - p) * 6. * t
    } else if t < 0.5 {
        q
    } else if t < 2. / 3. {
        p + (q - p) * (2. / 3. - t) * 6.
    } else {
        p
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0., 1.) * 255.).round() as u8
}

/// Arithmetic mean of the hues, `0` for an empty palette.
///
/// Hue is circular, so palettes straddling 0°/360° average to a hue that
/// appears in none of their colors. This is a known approximation.
pub fn mean_hue<'a>(colors: impl IntoIterator<Item = &'a Hsl>) -> f32 {
    let (sum, count) = colors
        .into_iter()
        .fold((0., 0usize), |(sum, count), c| (sum + c.h, count + 1));

    if count == 0 { 0. } else { sum / count as f32 }
}
