//! Local swatch renderer
//!
//! Draws a flat approximation of a tee (round body, feet band, one eye) in the
//! requested colors. It is not a skin renderer; it only lets the service run
//! and be inspected without an external engine.

use futures::future::BoxFuture;
use image::{ImageBuffer, Rgba, RgbaImage};
use log::debug;

use crate::color::PackedColorCode;
use crate::{Error, GatewayConfig, RenderGateway, RenderOptions, Result};

/// Largest edge length the preview backend will allocate.
pub const MAX_PREVIEW_SIZE: u32 = 1024;

/// Colors used when the request has no override (tee brown).
pub const DEFAULT_BODY: PackedColorCode = PackedColorCode(0xFFBC6B39);
pub const DEFAULT_FEET: PackedColorCode = PackedColorCode(0xFF8A4B26);

const EYE: Rgba<u8> = Rgba([24, 16, 12, 255]);

pub struct PreviewRenderGateway {
    default_size: u32,
}

impl PreviewRenderGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            default_size: config.preview_size,
        }
    }

    /// Render synchronously; the async trait method is a thin wrapper.
    pub fn render_png(&self, options: &RenderOptions) -> Result<Vec<u8>> {
        let size = options.output_size_pixels.unwrap_or(self.default_size);
        if size == 0 || size > MAX_PREVIEW_SIZE {
            return Err(Error::RenderError(format!(
                "preview size {} outside 1..={}",
                size, MAX_PREVIEW_SIZE
            )));
        }

        let (body, feet) = options
            .custom_colors
            .map(|c| (c.body_code, c.feet_code))
            .unwrap_or((DEFAULT_BODY, DEFAULT_FEET));

        let img = paint_swatch(size, body, feet, options.view_angle_degrees.unwrap_or(0.0));

        let mut png_data = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_data);
        img.write_with_encoder(encoder)
            .map_err(|e| Error::RenderError(format!("Failed to encode PNG: {e}")))?;

        debug!("preview rendered {}x{} ({} bytes)", size, size, png_data.len());
        Ok(png_data)
    }
}

impl RenderGateway for PreviewRenderGateway {
    fn name(&self) -> &'static str {
        "preview"
    }

    fn render(&self, options: RenderOptions) -> BoxFuture<'_, Result<Vec<u8>>> {
        Box::pin(async move { self.render_png(&options) })
    }
}

/// Body disc in the upper part, feet band along the bottom, eye offset by `angle`.
fn paint_swatch(size: u32, body: PackedColorCode, feet: PackedColorCode, angle: f64) -> RgbaImage {
    let s = size as f64;
    let (cx, cy, radius) = (s * 0.5, s * 0.45, s * 0.38);
    let feet_top = s * 0.78;

    let (sin, cos) = angle.to_radians().sin_cos();
    let (ex, ey) = (cx + cos * radius * 0.45, cy - sin * radius * 0.45);
    let eye_radius = (s * 0.06).max(1.0);

    let body = Rgba(body.to_rgba());
    let feet = Rgba(feet.to_rgba());

    ImageBuffer::from_fn(size, size, |x, y| {
        let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
        let in_disc = |ox: f64, oy: f64, r: f64| (px - ox).powi(2) + (py - oy).powi(2) <= r * r;

        if in_disc(ex, ey, eye_radius) {
            EYE
        } else if py >= feet_top && (px - cx).abs() <= radius {
            feet
        } else if in_disc(cx, cy, radius) {
            body
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CustomColors;

    fn options(size: Option<u32>) -> RenderOptions {
        RenderOptions {
            custom_colors: Some(CustomColors {
                body_code: PackedColorCode(0xFFFF0000),
                feet_code: PackedColorCode(0xFF0000FF),
            }),
            view_angle_degrees: None,
            output_size_pixels: size,
            skin_resource_name: "default".to_string(),
        }
    }

    #[test]
    fn swatch_uses_requested_colors() {
        let img = paint_swatch(100, PackedColorCode(0xFFFF0000), PackedColorCode(0xFF0000FF), 0.0);
        // left of the body centre, away from the eye
        assert_eq!(img.get_pixel(30, 45), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(50, 95), &Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn png_has_signature() {
        let gw = PreviewRenderGateway::new(&GatewayConfig::default());
        let png = gw.render_png(&options(Some(32))).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn oversized_is_rejected() {
        let gw = PreviewRenderGateway::new(&GatewayConfig::default());
        let err = gw.render_png(&options(Some(MAX_PREVIEW_SIZE + 1))).unwrap_err();
        assert!(matches!(err, Error::RenderError(_)));
    }
}
