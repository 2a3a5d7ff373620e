// Built-in lookup tables.  Tables given by control points are
// expanded to 256 entries by linear interpolation.

use std::ops::Deref;
use lazy_static::lazy_static;
pub(crate) mod ty;
use ty::*;

const FULL: usize = 256;

/// Expand the control points `r`, `g`, `b` (same length) to `n`
/// colors by linear interpolation.
fn expand(r: &[u8], g: &[u8], b: &[u8], n: usize) -> Vec<RGB8> {
    let last = (r.len() - 1) as f64;
    (0 .. n).map(|i| {
        let x = i as f64 * last / (n - 1) as f64;
        let i0 = x.floor() as usize;
        let i1 = (i0 + 1).min(r.len() - 1);
        let f = x - i0 as f64;
        let lerp = |c: &[u8]| {
            (c[i0] as f64 + f * (c[i1] as f64 - c[i0] as f64)).round() as u8 };
        RGB8 { r: lerp(r), g: lerp(g), b: lerp(b) }
    }).collect()
}

/// Expand `#rrggbb` stops to `n` colors.
fn expand_hex(stops: &[u32], n: usize) -> Vec<RGB8> {
    let r: Vec<u8> = stops.iter().map(|c| (c >> 16) as u8).collect();
    let g: Vec<u8> = stops.iter().map(|c| (c >> 8) as u8).collect();
    let b: Vec<u8> = stops.iter().map(|&c| c as u8).collect();
    expand(&r, &g, &b, n)
}

fn hex(stops: &[u32]) -> Vec<RGB8> {
    stops.iter()
        .map(|&c| RGB8 { r: (c >> 16) as u8, g: (c >> 8) as u8, b: c as u8 })
        .collect()
}

/// Fully saturated hue wheel, red → yellow → green → cyan → blue →
/// magenta, stopping short of red again.
fn spectrum(n: usize) -> Vec<RGB8> {
    (0 .. n).map(|i| {
        let t = 6. * i as f64 / n as f64;
        let f = (255. * t.fract()).round();
        let (r, g, b) = match t.trunc() as usize {
            0 => (255., f, 0.),
            1 => (255. - f, 255., 0.),
            2 => (0., 255., f),
            3 => (0., 255. - f, 255.),
            4 => (f, 0., 255.),
            _ => (255., 0., 255. - f),
        };
        RGB8 { r: r as u8, g: g as u8, b: b as u8 }
    }).collect()
}

lazy_static! {
  pub(crate) static ref GRAYS: PaletteData = PaletteData {
    name: "grays",
    typ: PaletteType::Seq,
    rgb: (0 ..= 255u8).map(|v| RGB8 { r: v, g: v, b: v }).collect(),
  };
}

lazy_static! {
  pub(crate) static ref FIRE: PaletteData = PaletteData {
    name: "fire",
    typ: PaletteType::Seq,
    rgb: expand(
      &[0, 0, 1, 25, 49, 73, 98, 122, 146, 162, 173, 184, 195, 207, 217,
        229, 240, 252, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
        255, 255, 255, 255],
      &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 14, 35, 57, 79, 101, 117,
        133, 147, 161, 175, 190, 205, 219, 234, 248, 255, 255, 255, 255],
      &[0, 61, 96, 130, 165, 192, 220, 227, 210, 181, 151, 122, 93, 64,
        35, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 35, 98, 160, 223, 255],
      FULL),
  };
}

lazy_static! {
  pub(crate) static ref ICE: PaletteData = PaletteData {
    name: "ice",
    typ: PaletteType::Seq,
    rgb: expand(
      &[0, 0, 0, 0, 0, 0, 19, 29, 50, 48, 79, 112, 134, 158, 186, 201,
        217, 229, 242, 250, 250, 250, 250, 251, 250, 250, 250, 250, 251,
        251, 243, 230],
      &[156, 165, 176, 184, 190, 196, 193, 184, 171, 162, 146, 125, 107,
        93, 81, 87, 92, 97, 95, 93, 93, 90, 85, 69, 64, 54, 47, 35, 19, 0,
        4, 0],
      &[140, 147, 158, 166, 170, 176, 209, 220, 234, 225, 236, 246, 250,
        251, 250, 250, 245, 230, 230, 222, 202, 180, 163, 142, 123, 114,
        106, 94, 84, 64, 26, 27],
      FULL),
  };
}

lazy_static! {
  pub(crate) static ref SPECTRUM: PaletteData = PaletteData {
    name: "spectrum",
    typ: PaletteType::Qual,
    rgb: spectrum(FULL),
  };
}

lazy_static! {
  pub(crate) static ref RED_GREEN: PaletteData = PaletteData {
    name: "red-green",
    typ: PaletteType::Div,
    rgb: (0 .. FULL).map(|i| {
      if i < FULL / 2 { RGB8 { r: (255 - 2 * i) as u8, g: 0, b: 0 } }
      else { RGB8 { r: 0, g: (2 * (i - FULL / 2) + 1) as u8, b: 0 } }
    }).collect(),
  };
}

// Matplotlib
lazy_static! {
  pub(crate) static ref VIRIDIS: PaletteData = PaletteData {
    name: "viridis",
    typ: PaletteType::Seq,
    rgb: expand_hex(&[0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e,
                      0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b, 0xfde725],
                    FULL),
  };
}

lazy_static! {
  pub(crate) static ref MAGMA: PaletteData = PaletteData {
    name: "magma",
    typ: PaletteType::Seq,
    rgb: expand_hex(&[0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f,
                      0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d, 0xfcfdbf],
                    FULL),
  };
}

// Brewer, see http://colorbrewer2.org/
lazy_static! {
  pub(crate) static ref RDBU: PaletteData = PaletteData {
    name: "rdbu",
    typ: PaletteType::Div,
    rgb: hex(&[0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7,
               0xd1e5f0, 0x92c5de, 0x4393c3, 0x2166ac, 0x053061]),
  };
}

lazy_static! {
  pub(crate) static ref BLUE_WHITE_RED: PaletteData = PaletteData {
    name: "blue-white-red",
    typ: PaletteType::Div,
    rgb: hex(&[0x0000ff, 0xffffff, 0xff0000]),
  };
}

lazy_static! {
  pub(crate) static ref ALL_PALETTES: [&'static PaletteData; 9] = [
    GRAYS.deref(), FIRE.deref(), ICE.deref(), SPECTRUM.deref(),
    RED_GREEN.deref(), VIRIDIS.deref(), MAGMA.deref(), RDBU.deref(),
    BLUE_WHITE_RED.deref()];
}
