// src/pattern.rs
use crate::canvas::{Canvas, Fill, Primitive};
use crate::utils::*;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use std::fmt;

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 800;

const BLUR_PROBABILITY: f64 = 0.3;
const TEXTURE_DOTS: usize = 1000;
const ORGANIC_STEPS: usize = 10;

/// Procedural drawing style. Exactly one runs per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Geometric,
    Organic,
    Minimalist,
    Textured,
    Flowing,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Geometric,
        Style::Organic,
        Style::Minimalist,
        Style::Textured,
        Style::Flowing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Geometric => "geometric",
            Style::Organic => "organic",
            Style::Minimalist => "minimalist",
            Style::Textured => "textured",
            Style::Flowing => "flowing",
        }
    }

    /// Uniform draw over the five styles
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Style {
        Style::ALL[rng.gen_range(0..Style::ALL.len())]
    }

    pub fn draw<R: Rng + ?Sized>(self, canvas: &mut Canvas, rng: &mut R) {
        match self {
            Style::Geometric => draw_geometric(canvas, rng),
            Style::Organic => draw_organic(canvas, rng),
            Style::Minimalist => draw_minimalist(canvas, rng),
            Style::Textured => draw_textured(canvas, rng),
            Style::Flowing => draw_flowing(canvas, rng),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render one abstract black-and-white image.
///
/// Every random draw comes from `rng`, so a freshly seeded generator makes the
/// output a pure function of the seed. The style is drawn first, then the
/// style's own geometry, then the optional blur.
pub fn generate<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> Canvas {
    let mut canvas = Canvas::new(width, height);

    let style = Style::choose(rng);
    canvas.set_style(style);
    style.draw(&mut canvas, rng);

    if rng.gen::<f64>() < BLUR_PROBABILITY {
        let radius = rng.gen_range(0.5..=2.0_f32);
        canvas.blur(radius);
    }

    debug!(
        "rendered {}x{} {} pattern with {} primitives, blur {:?}",
        width,
        height,
        style,
        canvas.primitives().len(),
        canvas.blur_radius()
    );
    canvas
}

/// Render with a private generator: seeded when `seed` is given, from OS
/// entropy otherwise.
pub fn generate_seeded(width: u32, height: u32, seed: Option<u64>) -> Canvas {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    generate(width, height, &mut rng)
}

fn coin_fill<R: Rng + ?Sized>(rng: &mut R) -> Fill {
    if rng.gen::<f64>() > 0.5 {
        Fill::Black
    } else {
        Fill::None
    }
}

#[derive(Clone, Copy)]
enum GeometricShape {
    Circle,
    Rectangle,
    Line,
}

const GEOMETRIC_SHAPES: [GeometricShape; 3] = [
    GeometricShape::Circle,
    GeometricShape::Rectangle,
    GeometricShape::Line,
];

fn draw_geometric<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let count = rng.gen_range(20..=50);

    for _ in 0..count {
        let shape = GEOMETRIC_SHAPES[rng.gen_range(0..GEOMETRIC_SHAPES.len())];
        let x1 = rng.gen_range(0..=width);
        let y1 = rng.gen_range(0..=height);

        let primitive = match shape {
            GeometricShape::Circle => {
                let radius = rng.gen_range(10..=100_i64);
                let cx = clamp_center(x1, radius, width);
                let cy = clamp_center(y1, radius, height);
                Primitive::Circle {
                    center: (cx as f64, cy as f64),
                    radius: radius as f64,
                    fill: coin_fill(rng),
                    stroke: 2.0,
                }
            }
            GeometricShape::Rectangle => {
                let x2 = rng.gen_range(0..=width);
                let y2 = rng.gen_range(0..=height);
                let (min, max) = ordered_corners((x1, y1), (x2, y2));
                Primitive::Rectangle {
                    min,
                    max,
                    fill: coin_fill(rng),
                    stroke: 2.0,
                }
            }
            GeometricShape::Line => {
                let x2 = rng.gen_range(0..=width);
                let y2 = rng.gen_range(0..=height);
                Primitive::Line {
                    from: (x1 as f64, y1 as f64),
                    to: (x2 as f64, y2 as f64),
                    stroke: rng.gen_range(1..=5) as f32,
                }
            }
        };
        canvas.draw(primitive);
    }
}

/// Random walks: each step turns to a fresh angle and stays on the canvas
fn draw_organic<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R) {
    let (width, height) = (canvas.width() as f64, canvas.height() as f64);
    let count = rng.gen_range(5..=15);

    for _ in 0..count {
        let mut x = rng.gen_range(0..=canvas.width()) as f64;
        let mut y = rng.gen_range(0..=canvas.height()) as f64;
        let mut points = Vec::with_capacity(ORGANIC_STEPS);

        for _ in 0..ORGANIC_STEPS {
            let angle = rng.gen_range(0.0..TAU);
            let length = rng.gen_range(20..=100) as f64;
            x = clamp_to_extent(x + length * angle.cos(), width);
            y = clamp_to_extent(y + length * angle.sin(), height);
            points.push((x, y));
        }

        if points.len() < 2 {
            continue;
        }
        let stroke = rng.gen_range(2..=8) as f32;
        canvas.draw(Primitive::PolyLine { points, stroke });
    }
}

fn draw_minimalist<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let count = rng.gen_range(3..=8);

    for _ in 0..count {
        let x = rng.gen_range(0..=width);
        let y = rng.gen_range(0..=height);
        let half = rng.gen_range(50..=200_i64) / 2;

        let primitive = if rng.gen::<f64>() > 0.5 {
            Primitive::Circle {
                center: (x as f64, y as f64),
                radius: half as f64,
                fill: coin_fill(rng),
                stroke: 3.0,
            }
        } else {
            Primitive::Rectangle {
                min: (x - half, y - half),
                max: (x + half, y + half),
                fill: coin_fill(rng),
                stroke: 3.0,
            }
        };
        canvas.draw(primitive);
    }
}

/// Stippled noise with a few hollow frames on top
fn draw_textured<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);

    for _ in 0..TEXTURE_DOTS {
        let x = rng.gen_range(0..=width);
        let y = rng.gen_range(0..=height);
        let radius = rng.gen_range(1..=5);
        canvas.draw(Primitive::Circle {
            center: (x as f64, y as f64),
            radius: radius as f64,
            fill: Fill::Black,
            stroke: 0.0,
        });
    }

    let frames = rng.gen_range(5..=15);
    for _ in 0..frames {
        let a = (rng.gen_range(0..=width), rng.gen_range(0..=height));
        let b = (rng.gen_range(0..=width), rng.gen_range(0..=height));
        let (min, max) = ordered_corners(a, b);
        canvas.draw(Primitive::Rectangle {
            min,
            max,
            fill: Fill::None,
            stroke: 2.0,
        });
    }
}

fn draw_flowing<R: Rng + ?Sized>(canvas: &mut Canvas, rng: &mut R) {
    let height = canvas.height() as f64;
    let baseline = (canvas.height() / 2) as f64;
    let xs = wave_xs(canvas.width());
    let waves = rng.gen_range(3..=8_u32);

    for wave in 0..waves {
        let mut points = Vec::with_capacity(xs.len());
        for &x in xs.iter() {
            let amplitude = rng.gen_range(-100..=100) as f64;
            let y = clamp_to_extent(baseline + wave_offset(x, amplitude, wave), height);
            points.push((x, y));
        }

        if points.len() < 2 {
            continue;
        }
        let stroke = rng.gen_range(2..=6) as f32;
        canvas.draw(Primitive::PolyLine { points, stroke });
    }
}
