// src/canvas.rs
use crate::pattern::Style;
use crate::utils::{gaussian_blur, segment_distance};
use image::{GrayImage, ImageBuffer, Luma};

pub const BLACK: Luma<u8> = Luma([0]);
pub const WHITE: Luma<u8> = Luma([255]);

/// Interior of a closed shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Black,
    /// Outline only
    None,
}

/// A single shape appended to a canvas. Strokes are always black.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        center: (f64, f64),
        radius: f64,
        fill: Fill,
        stroke: f32,
    },
    /// Corners are inclusive pixel bounds with `min <= max` on both axes
    Rectangle {
        min: (i64, i64),
        max: (i64, i64),
        fill: Fill,
        stroke: f32,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: f32,
    },
    PolyLine {
        points: Vec<(f64, f64)>,
        stroke: f32,
    },
}

impl Primitive {
    /// Geometric bounding box as `(min_x, min_y, max_x, max_y)`, stroke excluded
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Primitive::Circle { center, radius, .. } => (
                center.0 - radius,
                center.1 - radius,
                center.0 + radius,
                center.1 + radius,
            ),
            Primitive::Rectangle { min, max, .. } => {
                (min.0 as f64, min.1 as f64, max.0 as f64, max.1 as f64)
            }
            Primitive::Line { from, to, .. } => (
                from.0.min(to.0),
                from.1.min(to.1),
                from.0.max(to.0),
                from.1.max(to.1),
            ),
            Primitive::PolyLine { points, .. } => points.iter().fold(
                (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            ),
        }
    }
}

/// White raster surface that accumulates black primitives.
///
/// Besides the pixels, the canvas remembers what was drawn on it: every
/// primitive in draw order, the style that produced them and the blur radius
/// if a blur was applied.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: GrayImage,
    primitives: Vec<Primitive>,
    style: Option<Style>,
    blur_radius: Option<f32>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            image: ImageBuffer::from_pixel(width, height, WHITE),
            primitives: Vec::new(),
            style: None,
            blur_radius: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn style(&self) -> Option<Style> {
        self.style
    }

    pub fn blur_radius(&self) -> Option<f32> {
        self.blur_radius
    }

    pub(crate) fn set_style(&mut self, style: Style) {
        self.style = Some(style);
    }

    /// Rasterize `primitive` and record it
    pub fn draw(&mut self, primitive: Primitive) {
        match &primitive {
            Primitive::Circle {
                center,
                radius,
                fill,
                stroke,
            } => self.paint_circle(*center, *radius, *fill, *stroke),
            Primitive::Rectangle {
                min,
                max,
                fill,
                stroke,
            } => self.paint_rectangle(*min, *max, *fill, *stroke),
            Primitive::Line { from, to, stroke } => self.paint_segment(*from, *to, *stroke),
            Primitive::PolyLine { points, stroke } => {
                for pair in points.windows(2) {
                    self.paint_segment(pair[0], pair[1], *stroke);
                }
            }
        }
        self.primitives.push(primitive);
    }

    /// Replace the pixels with a Gaussian-blurred copy
    pub fn blur(&mut self, radius: f32) {
        self.image = gaussian_blur(&self.image, radius);
        self.blur_radius = Some(radius);
    }

    /// Pixel window covering the given box, clipped to the canvas
    fn window(
        &self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Option<(u32, u32, u32, u32)> {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        let x0 = min_x.floor().max(0.0);
        let y0 = min_y.floor().max(0.0);
        let x1 = max_x.ceil().min(width as f64 - 1.0);
        let y1 = max_y.ceil().min(height as f64 - 1.0);
        if !(x0 <= x1 && y0 <= y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Paint black every pixel in the window whose center satisfies `covered`
    fn paint_where(
        &mut self,
        window: Option<(u32, u32, u32, u32)>,
        covered: impl Fn(f64, f64) -> bool,
    ) {
        let Some((x0, y0, x1, y1)) = window else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                if covered(x as f64 + 0.5, y as f64 + 0.5) {
                    self.image.put_pixel(x, y, BLACK);
                }
            }
        }
    }

    fn paint_circle(&mut self, center: (f64, f64), radius: f64, fill: Fill, stroke: f32) {
        let window = self.window(
            center.0 - radius,
            center.1 - radius,
            center.0 + radius,
            center.1 + radius,
        );
        let inner = radius - stroke as f64;
        self.paint_where(window, |px, py| {
            let d = ((px - center.0).powi(2) + (py - center.1).powi(2)).sqrt();
            d <= radius && (fill == Fill::Black || (stroke > 0.0 && d >= inner))
        });
    }

    fn paint_rectangle(&mut self, min: (i64, i64), max: (i64, i64), fill: Fill, stroke: f32) {
        let (width, height) = self.image.dimensions();
        let x0 = min.0.max(0);
        let y0 = min.1.max(0);
        let x1 = max.0.min(width as i64 - 1);
        let y1 = max.1.min(height as i64 - 1);
        let s = stroke.ceil() as i64;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let on_edge = s > 0
                    && (x < min.0 + s || x > max.0 - s || y < min.1 + s || y > max.1 - s);
                if fill == Fill::Black || on_edge {
                    self.image.put_pixel(x as u32, y as u32, BLACK);
                }
            }
        }
    }

    fn paint_segment(&mut self, from: (f64, f64), to: (f64, f64), stroke: f32) {
        let half = (stroke as f64 / 2.0).max(0.5);
        let window = self.window(
            from.0.min(to.0) - half,
            from.1.min(to.1) - half,
            from.0.max(to.0) + half,
            from.1.max(to.1) + half,
        );
        self.paint_where(window, |px, py| segment_distance((px, py), from, to) <= half);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_count(canvas: &Canvas) -> usize {
        canvas.image().pixels().filter(|p| p[0] == 0).count()
    }

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = Canvas::new(12, 7);
        assert_eq!(canvas.image().dimensions(), (12, 7));
        assert!(canvas.image().pixels().all(|p| *p == WHITE));
        assert!(canvas.primitives().is_empty());
        assert_eq!(canvas.style(), None);
        assert_eq!(canvas.blur_radius(), None);
    }

    #[test]
    fn test_filled_rectangle_covers_inclusive_bounds() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw(Primitive::Rectangle {
            min: (2, 3),
            max: (5, 7),
            fill: Fill::Black,
            stroke: 2.0,
        });
        assert_eq!(black_count(&canvas), 4 * 5);
        assert_eq!(canvas.primitives().len(), 1);
    }

    #[test]
    fn test_outline_rectangle_leaves_interior_white() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw(Primitive::Rectangle {
            min: (2, 2),
            max: (11, 11),
            fill: Fill::None,
            stroke: 2.0,
        });
        assert_eq!(canvas.image().get_pixel(2, 2)[0], 0);
        assert_eq!(canvas.image().get_pixel(3, 6)[0], 0);
        assert_eq!(canvas.image().get_pixel(4, 6)[0], 255);
        assert_eq!(canvas.image().get_pixel(6, 6)[0], 255);
        assert_eq!(canvas.image().get_pixel(11, 11)[0], 0);
        assert_eq!(black_count(&canvas), 10 * 10 - 6 * 6);
    }

    #[test]
    fn test_rectangle_is_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw(Primitive::Rectangle {
            min: (-20, -20),
            max: (40, 40),
            fill: Fill::Black,
            stroke: 3.0,
        });
        assert_eq!(black_count(&canvas), 100);
    }

    #[test]
    fn test_circle_outline_and_fill() {
        let mut outline = Canvas::new(40, 40);
        outline.draw(Primitive::Circle {
            center: (20.0, 20.0),
            radius: 10.0,
            fill: Fill::None,
            stroke: 2.0,
        });
        assert_eq!(outline.image().get_pixel(20, 20)[0], 255);
        assert_eq!(outline.image().get_pixel(29, 20)[0], 0);

        let mut filled = Canvas::new(40, 40);
        filled.draw(Primitive::Circle {
            center: (20.0, 20.0),
            radius: 10.0,
            fill: Fill::Black,
            stroke: 2.0,
        });
        assert_eq!(filled.image().get_pixel(20, 20)[0], 0);
        assert!(black_count(&filled) > black_count(&outline));
        // roughly pi * r^2
        let area = black_count(&filled) as f64;
        assert!((area - std::f64::consts::PI * 100.0).abs() < 30.0);
    }

    #[test]
    fn test_dot_without_stroke() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw(Primitive::Circle {
            center: (5.0, 5.0),
            radius: 1.0,
            fill: Fill::Black,
            stroke: 0.0,
        });
        assert_eq!(black_count(&canvas), 4);
    }

    #[test]
    fn test_line_width() {
        let mut thin = Canvas::new(30, 30);
        thin.draw(Primitive::Line {
            from: (0.0, 15.0),
            to: (30.0, 15.0),
            stroke: 1.0,
        });
        let mut thick = Canvas::new(30, 30);
        thick.draw(Primitive::Line {
            from: (0.0, 15.0),
            to: (30.0, 15.0),
            stroke: 5.0,
        });
        assert_eq!(black_count(&thin), 30 * 2);
        assert!(black_count(&thick) >= 30 * 4);
        assert_eq!(thin.image().get_pixel(10, 5)[0], 255);
    }

    #[test]
    fn test_polyline_draws_each_segment() {
        let mut canvas = Canvas::new(30, 30);
        canvas.draw(Primitive::PolyLine {
            points: vec![(2.0, 2.0), (25.0, 2.0), (25.0, 25.0)],
            stroke: 2.0,
        });
        assert_eq!(canvas.image().get_pixel(12, 1)[0], 0);
        assert_eq!(canvas.image().get_pixel(24, 14)[0], 0);
        assert_eq!(canvas.image().get_pixel(10, 20)[0], 255);
    }

    #[test]
    fn test_single_point_polyline_paints_nothing() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw(Primitive::PolyLine {
            points: vec![(5.0, 5.0)],
            stroke: 4.0,
        });
        assert_eq!(black_count(&canvas), 0);
    }

    #[test]
    fn test_bounds() {
        let line = Primitive::Line {
            from: (9.0, 1.0),
            to: (3.0, 7.0),
            stroke: 1.0,
        };
        assert_eq!(line.bounds(), (3.0, 1.0, 9.0, 7.0));

        let poly = Primitive::PolyLine {
            points: vec![(4.0, 4.0), (1.0, 8.0), (6.0, 2.0)],
            stroke: 1.0,
        };
        assert_eq!(poly.bounds(), (1.0, 2.0, 6.0, 8.0));
    }

    #[test]
    fn test_blur_records_radius() {
        let mut canvas = Canvas::new(8, 8);
        canvas.blur(1.25);
        assert_eq!(canvas.blur_radius(), Some(1.25));
        assert!(canvas.image().pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_empty_canvas_accepts_primitives() {
        let mut canvas = Canvas::new(0, 0);
        canvas.draw(Primitive::Line {
            from: (0.0, 0.0),
            to: (5.0, 5.0),
            stroke: 3.0,
        });
        assert_eq!(canvas.primitives().len(), 1);
    }
}
