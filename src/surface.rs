// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing surfaces.
//!
//! [`Surface`] is the small canvas-like API the drawing routines target:
//! filled circles, stroked lines and rectangles, and pixel blits. Two
//! implementations ship with the crate:
//!
//! - [`ImageSurface`] rasterizes into an [`RgbaImage`] using `imageproc`.
//! - [`Recorder`] keeps a display list of [`DrawCommand`]s, for replaying
//!   onto another backend or for asserting on what was drawn.

use image::{DynamicImage, RgbaImage, imageops};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::color::Color;
use crate::keypoints::{BoundingBox, Vector2D};

/// A 2D drawing target.
pub trait Surface {
    /// Current `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Resize the surface, clearing its contents.
    fn resize(&mut self, width: u32, height: u32);

    /// Fill a circle centred on `center`.
    fn fill_circle(&mut self, center: Vector2D, radius: f32, color: Color);

    /// Stroke a straight line of the given width.
    fn stroke_line(&mut self, from: Vector2D, to: Vector2D, width: f32, color: Color);

    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: BoundingBox, color: Color);

    /// Replace the pixels under `image` with its contents, no blending.
    fn put_image(&mut self, image: &RgbaImage, x: i64, y: i64);

    /// Composite `image` over the surface at its natural size.
    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64);
}

/// Raster surface backed by an RGBA image buffer.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    canvas: RgbaImage,
}

impl ImageSurface {
    /// Transparent surface of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
        }
    }

    /// Surface initialised with a copy of `image`.
    #[must_use]
    pub fn from_image(image: &DynamicImage) -> Self {
        Self {
            canvas: image.to_rgba8(),
        }
    }

    /// Borrow the rendered pixels.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Take the rendered pixels.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }
}

fn finite(p: Vector2D) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

impl Surface for ImageSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas = RgbaImage::new(width, height);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fill_circle(&mut self, center: Vector2D, radius: f32, color: Color) {
        // Degenerate poses produce NaN positions; those draw nothing.
        if !finite(center) || !radius.is_finite() || radius < 0.0 {
            return;
        }
        draw_filled_circle_mut(
            &mut self.canvas,
            (center.x.round() as i32, center.y.round() as i32),
            radius.round() as i32,
            color.to_rgba(),
        );
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn stroke_line(&mut self, from: Vector2D, to: Vector2D, width: f32, color: Color) {
        if !finite(from) || !finite(to) {
            return;
        }
        let pixel = color.to_rgba();
        let strands = width.ceil().max(1.0) as i32;
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len = dx.hypot(dy);

        if strands == 1 || len == 0.0 {
            draw_line_segment_mut(&mut self.canvas, (from.x, from.y), (to.x, to.y), pixel);
            return;
        }

        // Thick strokes are parallel one-pixel lines spread along the normal.
        let (nx, ny) = (-dy / len, dx / len);
        let center = (strands - 1) as f32 / 2.0;
        for i in 0..strands {
            let offset = i as f32 - center;
            let (ox, oy) = (nx * offset, ny * offset);
            draw_line_segment_mut(
                &mut self.canvas,
                (from.x + ox, from.y + oy),
                (to.x + ox, to.y + oy),
                pixel,
            );
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn stroke_rect(&mut self, rect: BoundingBox, color: Color) {
        let corners = [rect.min_x, rect.min_y, rect.max_x, rect.max_y];
        if corners.iter().any(|v| !v.is_finite()) {
            return;
        }
        // Edges are clamped to one pixel outside the canvas, where they draw nothing.
        let (width, height) = self.canvas.dimensions();
        let clamp_x = |v: f32| v.round().clamp(-1.0, width as f32) as i32;
        let clamp_y = |v: f32| v.round().clamp(-1.0, height as f32) as i32;
        let (x0, x1) = (clamp_x(rect.min_x), clamp_x(rect.max_x));
        let (y0, y1) = (clamp_y(rect.min_y), clamp_y(rect.max_y));
        let w = x1.abs_diff(x0) + 1;
        let h = y1.abs_diff(y0) + 1;
        let at = Rect::at(x0.min(x1), y0.min(y1)).of_size(w, h);
        draw_hollow_rect_mut(&mut self.canvas, at, color.to_rgba());
    }

    fn put_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::replace(&mut self.canvas, image, x, y);
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.canvas, image, x, y);
    }
}

/// One primitive issued against a [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize {
        width: u32,
        height: u32,
    },
    Circle {
        center: Vector2D,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vector2D,
        to: Vector2D,
        width: f32,
        color: Color,
    },
    Rect {
        rect: BoundingBox,
        color: Color,
    },
    PutImage {
        image: RgbaImage,
        x: i64,
        y: i64,
    },
    DrawImage {
        image: RgbaImage,
        x: i64,
        y: i64,
    },
}

/// Display-list surface that records every primitive in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    width: u32,
    height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Recorded circle centres, in order.
    #[must_use]
    pub fn circles(&self) -> Vec<Vector2D> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }

    /// Recorded line endpoints, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<(Vector2D, Vector2D)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Replay the display list onto another surface.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Resize { width, height } => target.resize(*width, *height),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => target.fill_circle(*center, *radius, *color),
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => target.stroke_line(*from, *to, *width, *color),
                DrawCommand::Rect { rect, color } => target.stroke_rect(*rect, *color),
                DrawCommand::PutImage { image, x, y } => target.put_image(image, *x, *y),
                DrawCommand::DrawImage { image, x, y } => target.draw_image(image, *x, *y),
            }
        }
    }
}

impl Surface for Recorder {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn fill_circle(&mut self, center: Vector2D, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vector2D, to: Vector2D, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: BoundingBox, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn put_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        self.commands.push(DrawCommand::PutImage {
            image: image.clone(),
            x,
            y,
        });
    }

    fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        self.commands.push(DrawCommand::DrawImage {
            image: image.clone(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_fill_circle_paints_center() {
        let mut surface = ImageSurface::new(20, 20);
        surface.fill_circle(Vector2D::new(10.0, 10.0), 3.0, Color::AQUA);
        assert_eq!(*surface.image().get_pixel(10, 10), Rgba([0, 255, 255, 255]));
        assert_eq!(*surface.image().get_pixel(0, 0), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_non_finite_points_are_ignored() {
        let mut surface = ImageSurface::new(8, 8);
        surface.fill_circle(Vector2D::new(f32::NAN, 2.0), 3.0, Color::RED);
        surface.stroke_line(Vector2D::new(0.0, 0.0), Vector2D::new(f32::NAN, 1.0), 2.0, Color::RED);
        assert!(surface.image().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_thick_line_covers_two_rows() {
        let mut surface = ImageSurface::new(20, 20);
        surface.stroke_line(Vector2D::new(2.0, 10.0), Vector2D::new(17.0, 10.0), 2.0, Color::RED);
        let painted_rows: Vec<u32> = (0..20)
            .filter(|&y| surface.image().get_pixel(10, y)[3] == 255)
            .collect();
        assert_eq!(painted_rows.len(), 2);
    }

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut surface = ImageSurface::new(20, 20);
        let rect = BoundingBox {
            min_x: 2.0,
            min_y: 2.0,
            max_x: 12.0,
            max_y: 12.0,
        };
        surface.stroke_rect(rect, Color::RED);
        assert_eq!(surface.image().get_pixel(2, 2)[0], 255);
        assert_eq!(surface.image().get_pixel(7, 7)[3], 0);
    }

    #[test]
    fn test_stroke_rect_far_outside_canvas() {
        let mut surface = ImageSurface::new(10, 10);
        let rect = BoundingBox {
            min_x: -1.0e12,
            min_y: 2.0,
            max_x: 4_294_967_296.0,
            max_y: 6.0,
        };
        surface.stroke_rect(rect, Color::RED);
        // Only the horizontal edges fall on the canvas.
        assert_eq!(*surface.image().get_pixel(5, 2), Color::RED.to_rgba());
        assert_eq!(surface.image().get_pixel(0, 4)[3], 0);
        assert_eq!(surface.image().get_pixel(9, 4)[3], 0);
    }

    #[test]
    fn test_put_image_replaces_pixels() {
        let mut surface = ImageSurface::new(4, 4);
        surface.fill_circle(Vector2D::new(1.0, 1.0), 4.0, Color::RED);
        let patch = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 0]));
        surface.put_image(&patch, 0, 0);
        assert_eq!(*surface.image().get_pixel(1, 1), Rgba([1, 2, 3, 0]));
    }

    #[test]
    fn test_recorder_replay() {
        let mut recorder = Recorder::new(16, 16);
        recorder.fill_circle(Vector2D::new(4.0, 4.0), 2.0, Color::AQUA);
        recorder.stroke_line(Vector2D::new(0.0, 8.0), Vector2D::new(15.0, 8.0), 1.0, Color::RED);
        assert_eq!(recorder.circles(), vec![Vector2D::new(4.0, 4.0)]);
        assert_eq!(recorder.lines().len(), 1);

        let mut raster = ImageSurface::new(16, 16);
        recorder.replay(&mut raster);
        assert_eq!(*raster.image().get_pixel(4, 4), Color::AQUA.to_rgba());
        assert_eq!(*raster.image().get_pixel(10, 8), Color::RED.to_rgba());
    }
}
