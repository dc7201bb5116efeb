//! Teeworlds skin render gateway
//!
//! Accepts human-friendly render parameters (hex or decimal colors, a view
//! angle, an output size, a skin name), validates them, packs colors into the
//! 32-bit TW color codes a rendering engine expects and hands the result to a
//! [`RenderGateway`] backend which returns PNG bytes.
//!
//! # Backends
//!
//! - **Remote** (`remote` feature, default): POSTs the engine payload to an
//!   external rendering engine over HTTP
//! - **Preview** (`preview` feature, default): renders a flat color swatch
//!   locally, handy when no engine is reachable
//!
//! # Example
//!
//! ```
//! use tw_skin_gateway::validate::{validate, RawQuery};
//!
//! let query = RawQuery {
//!     body_color: Some("#FF0000".to_string()),
//!     feet_color: Some("0, 0, 255".to_string()),
//!     size: Some("256".to_string()),
//!     ..Default::default()
//! };
//! let options = validate(&query).unwrap();
//! let colors = options.custom_colors.unwrap();
//! assert_eq!(colors.body_code.0, 0xFFFF0000);
//! assert_eq!(colors.feet_code.0, 0xFF0000FF);
//! ```

use futures::future::BoxFuture;
use serde::Serialize;

pub mod color;
pub mod error;
pub mod server;
pub mod validate;

pub use color::{encode_color, parse_color, CanonicalColor, PackedColorCode};
pub use error::{Error, Result};
pub use validate::{validate, RawQuery, ValidationFailure};

// HTTP client for an external rendering engine
#[cfg(feature = "remote")]
pub mod remote;

// Local swatch renderer, no engine required
#[cfg(feature = "preview")]
pub mod preview;

/// Configuration for the rendering backends
///
/// The defaults leave `engine_url` unset, which selects the preview backend.
///
/// # Examples
///
/// ```
/// let cfg = tw_skin_gateway::GatewayConfig::default();
/// assert!(cfg.engine_url.is_none());
/// assert_eq!(cfg.timeout_ms, 30000);
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Endpoint of the external rendering engine
    pub engine_url: Option<String>,
    /// Timeout for a single render call in milliseconds
    pub timeout_ms: u64,
    /// User agent sent to the engine
    pub user_agent: String,
    /// Edge length of preview images when the request has no `size`
    pub preview_size: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            engine_url: None,
            timeout_ms: 30000,
            user_agent: format!("tw-skin-gateway/{}", env!("CARGO_PKG_VERSION")),
            preview_size: 128,
        }
    }
}

/// Body and feet overrides, always set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomColors {
    pub body_code: PackedColorCode,
    pub feet_code: PackedColorCode,
}

/// Validated render parameters
///
/// Built by [`validate::validate`]; every `None` means "let the engine decide".
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub custom_colors: Option<CustomColors>,
    pub view_angle_degrees: Option<f64>,
    pub output_size_pixels: Option<u32>,
    pub skin_resource_name: String,
}

impl RenderOptions {
    /// The request body the rendering engine understands.
    pub fn engine_payload(&self) -> EnginePayload<'_> {
        let options = EngineOptions {
            custom_colors: self.custom_colors.map(|c| EngineColors {
                body_tw_code: c.body_code,
                feet_tw_code: c.feet_code,
            }),
            view_angle: self.view_angle_degrees,
            size: self.output_size_pixels,
        };
        let is_empty =
            options.custom_colors.is_none() && options.view_angle.is_none() && options.size.is_none();

        EnginePayload {
            skin: &self.skin_resource_name,
            options: (!is_empty).then_some(options),
        }
    }
}

/// Wire form of a render request
#[derive(Debug, Clone, Serialize)]
pub struct EnginePayload<'a> {
    pub skin: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<EngineOptions>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_colors: Option<EngineColors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineColors {
    #[serde(rename = "bodyTWcode")]
    pub body_tw_code: PackedColorCode,
    #[serde(rename = "feetTWcode")]
    pub feet_tw_code: PackedColorCode,
}

/// Core trait for rendering backends
///
/// Implementations turn validated options into encoded image bytes. Failures
/// are returned as-is; callers do not retry.
pub trait RenderGateway: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Render a skin and return PNG bytes
    fn render(&self, options: RenderOptions) -> BoxFuture<'_, Result<Vec<u8>>>;
}

/// Create the backend selected by `config`
///
/// A configured `engine_url` selects the remote engine; otherwise the preview
/// renderer is used when the `preview` feature is enabled.
pub fn new_gateway(config: &GatewayConfig) -> Result<Box<dyn RenderGateway>> {
    if let Some(url) = &config.engine_url {
        #[cfg(feature = "remote")]
        {
            let gateway = remote::HttpRenderGateway::new(url, config)?;
            return Ok(Box::new(gateway));
        }

        #[cfg(not(feature = "remote"))]
        {
            return Err(Error::ConfigError(format!(
                "engine url {url} given but the `remote` feature is disabled"
            )));
        }
    }

    #[cfg(feature = "preview")]
    {
        Ok(Box::new(preview::PreviewRenderGateway::new(config)))
    }

    #[cfg(not(feature = "preview"))]
    {
        Err(Error::ConfigError(
            "no engine url given and the `preview` feature is disabled".to_string(),
        ))
    }
}
