// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Putting whole images onto a surface.

use std::future::Future;

use image::{DynamicImage, RgbImage, RgbaImage};
use ndarray::Array3;

use crate::error::{OverlayError, Result};
use crate::surface::Surface;

/// Row-major RGB pixels of logical shape `[height, width, 3]` whose bytes may
/// only be available asynchronously (e.g. read back from a device).
pub trait PixelSource {
    /// Logical `(height, width)`.
    fn shape(&self) -> (usize, usize);

    /// Fetch the `height * width * 3` pixel bytes.
    fn data(&self) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

impl PixelSource for Array3<u8> {
    fn shape(&self) -> (usize, usize) {
        let (height, width, _) = self.dim();
        (height, width)
    }

    fn data(&self) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let channels = self.dim().2;
        let bytes = if channels == 3 {
            // iter() walks logical order, so non-contiguous views are fine.
            Ok(self.iter().copied().collect())
        } else {
            Err(OverlayError::Shape(format!(
                "expected 3 channels, got {channels}"
            )))
        };
        std::future::ready(bytes)
    }
}

impl PixelSource for RgbImage {
    fn shape(&self) -> (usize, usize) {
        (self.height() as usize, self.width() as usize)
    }

    fn data(&self) -> impl Future<Output = Result<Vec<u8>>> + Send {
        std::future::ready(Ok(self.as_raw().clone()))
    }
}

/// Expand packed RGB bytes to an opaque RGBA image.
///
/// # Errors
///
/// Returns [`OverlayError::Shape`] if `data` is not exactly
/// `width * height * 3` bytes, or the dimensions overflow `usize`
/// arithmetic or `u32`.
pub fn rgb_to_rgba(data: &[u8], width: usize, height: usize) -> Result<RgbaImage> {
    let too_large = || OverlayError::Shape(format!("{width}x{height} is too large"));
    let pixels = width.checked_mul(height).ok_or_else(too_large)?;
    let expected = pixels.checked_mul(3).ok_or_else(too_large)?;
    if data.len() != expected {
        return Err(OverlayError::Shape(format!(
            "pixel buffer has {} bytes, expected {expected} for {width}x{height} RGB",
            data.len()
        )));
    }
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(too_large());
    };

    let mut rgba = Vec::with_capacity(pixels.checked_mul(4).ok_or_else(too_large)?);
    for rgb in data.chunks_exact(3) {
        rgba.extend_from_slice(rgb);
        rgba.push(255);
    }

    RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| OverlayError::Shape(format!("cannot build {w}x{h} RGBA image")))
}

/// Blit an RGB pixel source onto `surface` at the origin.
///
/// The pixel bytes are awaited once; the conversion and blit that follow run
/// without yielding. `surface` stays mutably borrowed for the whole call, so
/// no other drawing can interleave with it.
///
/// # Errors
///
/// Returns an error if fetching the pixels fails or the buffer length does
/// not match the source's shape. The surface is untouched in that case.
pub async fn render_to_canvas<P, S>(pixels: &P, surface: &mut S) -> Result<()>
where
    P: PixelSource + ?Sized,
    S: Surface + ?Sized,
{
    let (height, width) = pixels.shape();
    let data = pixels.data().await?;

    let image = rgb_to_rgba(&data, width, height)?;
    surface.put_image(&image, 0, 0);
    Ok(())
}

/// Resize `surface` to `size` (width, height) and draw `image` unscaled at the origin.
pub fn render_image_to_canvas<S: Surface + ?Sized>(
    image: &DynamicImage,
    size: (u32, u32),
    surface: &mut S,
) {
    surface.resize(size.0, size.1);
    surface.draw_image(&image.to_rgba8(), 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, ImageSurface, Recorder};
    use image::Rgba;

    /// Source whose bytes arrive after the task yields once.
    struct Deferred {
        height: usize,
        width: usize,
        bytes: Vec<u8>,
    }

    impl PixelSource for Deferred {
        fn shape(&self) -> (usize, usize) {
            (self.height, self.width)
        }

        fn data(&self) -> impl Future<Output = Result<Vec<u8>>> + Send {
            let bytes = self.bytes.clone();
            async move {
                tokio::task::yield_now().await;
                Ok(bytes)
            }
        }
    }

    fn gradient(height: usize, width: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
            u8::try_from((y * 31 + x * 7 + c * 50) % 256).unwrap()
        })
    }

    #[tokio::test]
    async fn test_render_to_canvas_forces_opaque_alpha() {
        let pixels = gradient(3, 5);
        let mut surface = ImageSurface::new(5, 3);
        render_to_canvas(&pixels, &mut surface).await.unwrap();

        for (x, y, px) in surface.image().enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            assert_eq!(px[3], 255);
            assert_eq!(px[0], pixels[[y, x, 0]]);
            assert_eq!(px[1], pixels[[y, x, 1]]);
            assert_eq!(px[2], pixels[[y, x, 2]]);
        }
    }

    #[tokio::test]
    async fn test_render_to_canvas_awaits_deferred_source() {
        let source = Deferred {
            height: 1,
            width: 2,
            bytes: vec![10, 20, 30, 40, 50, 60],
        };
        let mut rec = Recorder::new(2, 1);
        render_to_canvas(&source, &mut rec).await.unwrap();

        match &rec.commands[..] {
            [DrawCommand::PutImage { image, x: 0, y: 0 }] => {
                assert_eq!(image.as_raw(), &vec![10, 20, 30, 255, 40, 50, 60, 255]);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_render_to_canvas_length_mismatch() {
        let source = Deferred {
            height: 2,
            width: 2,
            bytes: vec![0; 11],
        };
        let mut rec = Recorder::new(2, 2);
        assert!(render_to_canvas(&source, &mut rec).await.is_err());
        assert!(rec.commands.is_empty());
    }

    #[tokio::test]
    async fn test_render_to_canvas_oversized_shape() {
        let source = Deferred {
            height: usize::MAX / 2,
            width: 3,
            bytes: vec![0; 6],
        };
        let mut rec = Recorder::new(2, 1);
        let err = render_to_canvas(&source, &mut rec).await.unwrap_err();
        assert!(matches!(err, OverlayError::Shape(_)));
        assert!(rec.commands.is_empty());
    }

    #[test]
    fn test_rgb_to_rgba_byte_count_overflow() {
        // width * height fits, the RGB byte count does not.
        let err = rgb_to_rgba(&[0; 3], usize::MAX / 2, 1).unwrap_err();
        assert!(matches!(err, OverlayError::Shape(_)));
    }

    #[tokio::test]
    async fn test_rgba_array_is_rejected() {
        let pixels = Array3::<u8>::zeros((2, 2, 4));
        let mut rec = Recorder::new(2, 2);
        let err = render_to_canvas(&pixels, &mut rec).await.unwrap_err();
        assert!(matches!(err, OverlayError::Shape(_)));
    }

    #[test]
    fn test_rgb_image_source_shape() {
        let img = RgbImage::new(7, 4);
        assert_eq!(PixelSource::shape(&img), (4, 7));
    }

    #[test]
    fn test_render_image_to_canvas() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 255])));
        let mut surface = ImageSurface::new(1, 1);
        render_image_to_canvas(&image, (4, 3), &mut surface);

        assert_eq!(surface.dimensions(), (4, 3));
        assert_eq!(*surface.image().get_pixel(1, 1), Rgba([9, 8, 7, 255]));
        assert_eq!(*surface.image().get_pixel(3, 2), Rgba([0, 0, 0, 0]));
    }
}
