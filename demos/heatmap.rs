//! Color a grid of cells by their distance to the centre and save the
//! painted canvas and its legend as PNG files.
//!
//! Usage: `cargo run --example heatmap [config.json]`

use std::{env, error::Error, fs};
use image::{Rgba, RgbaImage};
use roi_color_coder::{render, Config, Measurements, Region, Shape};

type Err = Box<dyn Error>;

const CELLS: u32 = 12;
const CELL: f64 = 24.;

fn cells() -> (Vec<Region>, Measurements) {
    let mut regions = Vec::new();
    let mut m = Measurements::new();
    let c = (CELLS - 1) as f64 / 2.;
    for j in 0 .. CELLS {
        for i in 0 .. CELLS {
            let id = format!("cell-{i}-{j}");
            let (x, y) = (i as f64 * CELL, j as f64 * CELL);
            let shape = if (i + j) % 3 == 0 {
                Shape::Oval { x, y, width: CELL, height: CELL }
            } else {
                Shape::Rectangle { x: x + 1., y: y + 1.,
                                   width: CELL - 2., height: CELL - 2. }
            };
            regions.push(Region::new(id.clone(), shape));
            // Leave a hole without data in the middle.
            if i != CELLS / 2 || j != CELLS / 2 {
                m.insert(id, (i as f64 - c).hypot(j as f64 - c));
            }
        }
    }
    (regions, m)
}

fn main() -> Result<(), Err> {
    let config = match env::args().nth(1) {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let (regions, m) = cells();
    let side = (CELLS as f64 * CELL) as u32;
    let mut canvas = RgbaImage::from_pixel(side, side, Rgba([40, 40, 40, 255]));
    let out = render(&mut canvas, &regions, &m, &config.lut()?, &config)?;
    for tick in out.legend.ticks() {
        println!("{:>8} at {:.3}: {:?}", tick.label, tick.position, tick.color);
    }
    canvas.save("heatmap.png")?;
    out.legend.image().save("heatmap-legend.png")?;
    Ok(())
}
