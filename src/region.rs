//! Regions of interest and the pixels they cover.

use std::f64::consts::PI;

/// Number of vertices used to approximate an oval outline.
const OVAL_VERTICES: usize = 72;

/// Geometry of a region, in pixel coordinates.  Pixel `(i, j)` covers
/// `[i, i+1) × [j, j+1)` and belongs to a shape when its centre does.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis aligned rectangle with top left corner `(x, y)`.
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// Ellipse inscribed in the given bounding rectangle.
    Oval { x: f64, y: f64, width: f64, height: f64 },
    /// Closed polygon (even-odd rule).
    Polygon(Vec<(f64, f64)>),
    /// Explicit pixels: `bits[j * width + i]` says whether pixel
    /// `(x + i, y + j)` belongs to the region.  Missing bits are unset.
    Mask { x: i64, y: i64, width: u32, height: u32, bits: Vec<bool> },
}

/// A region of interest: an identifier and its geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub id: String,
    pub shape: Shape,
}

impl Region {
    pub fn new(id: impl Into<String>, shape: Shape) -> Self {
        Region { id: id.into(), shape }
    }
}

/// Distance from `p` to the segment `[a, b]`.
fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0. { 0. }
            else { (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0., 1.) };
    (p.0 - a.0 - t * dx).hypot(p.1 - a.1 - t * dy)
}

impl Shape {
    /// Bounding box `(x0, y0, x1, y1)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Rectangle { x, y, width, height }
            | Shape::Oval { x, y, width, height } =>
                (*x, *y, x + width, y + height),
            Shape::Polygon(p) => p.iter().fold(
                (f64::INFINITY, f64::INFINITY,
                 f64::NEG_INFINITY, f64::NEG_INFINITY),
                |(x0, y0, x1, y1), &(x, y)|
                (x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
            Shape::Mask { x, y, width, height, .. } =>
                (*x as f64, *y as f64,
                 (*x + *width as i64) as f64, (*y + *height as i64) as f64),
        }
    }

    /// Whether the point `(px, py)` lies inside the shape.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        match self {
            Shape::Rectangle { x, y, width, height } =>
                px >= *x && px < x + width && py >= *y && py < y + height,
            Shape::Oval { x, y, width, height } => {
                if *width <= 0. || *height <= 0. { return false }
                let (a, b) = (width / 2., height / 2.);
                let u = (px - x - a) / a;
                let v = (py - y - b) / b;
                u * u + v * v <= 1.
            }
            Shape::Polygon(p) => {
                let n = p.len();
                if n < 3 { return false }
                let mut inside = false;
                let mut j = n - 1;
                for i in 0 .. n {
                    let (xi, yi) = p[i];
                    let (xj, yj) = p[j];
                    if (yi > py) != (yj > py)
                        && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                        inside = !inside;
                    }
                    j = i;
                }
                inside
            }
            Shape::Mask { .. } =>
                self.mask_bit(px.floor() as i64, py.floor() as i64),
        }
    }

    fn mask_bit(&self, i: i64, j: i64) -> bool {
        match self {
            Shape::Mask { x, y, width, height, bits } => {
                let (i, j) = (i - x, j - y);
                if i < 0 || j < 0 || i >= *width as i64 || j >= *height as i64 {
                    return false
                }
                bits.get(j as usize * *width as usize + i as usize)
                    .copied().unwrap_or(false)
            }
            _ => false,
        }
    }

    /// Closed outline of a geometric shape.
    fn vertices(&self) -> Vec<(f64, f64)> {
        match self {
            Shape::Rectangle { x, y, width, height } =>
                vec![(*x, *y), (x + width, *y), (x + width, y + height),
                     (*x, y + height)],
            Shape::Oval { x, y, width, height } => {
                let (a, b) = (width / 2., height / 2.);
                (0 .. OVAL_VERTICES).map(|k| {
                    let th = 2. * PI * k as f64 / OVAL_VERTICES as f64;
                    (x + a + a * th.cos(), y + b + b * th.sin())
                }).collect()
            }
            Shape::Polygon(p) => p.clone(),
            Shape::Mask { .. } => vec![],
        }
    }

    /// Pixels of a `width × height` canvas covered by the shape, in
    /// row-major order.  With `stroke = Some(w)`, only the pixels
    /// inside the shape closer than `w` to its boundary are returned.
    pub fn pixels(&self, stroke: Option<f64>, width: u32, height: u32)
                  -> Vec<(u32, u32)> {
        let (x0, y0, x1, y1) = self.bounds();
        if !(x0 <= x1 && y0 <= y1) { return vec![] }
        let i0 = x0.floor().max(0.) as u32;
        let j0 = y0.floor().max(0.) as u32;
        let i1 = x1.ceil().min(width as f64).max(0.) as u32;
        let j1 = y1.ceil().min(height as f64).max(0.) as u32;
        let vertices = if stroke.is_some() { self.vertices() } else { vec![] };
        let mut out = Vec::new();
        for j in j0 .. j1 {
            for i in i0 .. i1 {
                let (px, py) = (i as f64 + 0.5, j as f64 + 0.5);
                if !self.contains(px, py) { continue }
                let keep = match stroke {
                    None => true,
                    Some(w) => self.near_boundary(&vertices, i, j, px, py, w),
                };
                if keep { out.push((i, j)) }
            }
        }
        out
    }

    fn near_boundary(&self, vertices: &[(f64, f64)], i: u32, j: u32,
                     px: f64, py: f64, w: f64) -> bool {
        match self {
            Shape::Mask { .. } => {
                let r = w.ceil().max(1.) as i64;
                let (i, j) = (i as i64, j as i64);
                (-r ..= r).any(|dj| (-r ..= r).any(|di| {
                    !self.mask_bit(i + di, j + dj) }))
            }
            _ => {
                let n = vertices.len();
                (0 .. n).any(|k| {
                    let d = segment_distance((px, py), vertices[k],
                                             vertices[(k + 1) % n]);
                    d < w })
            }
        }
    }
}
