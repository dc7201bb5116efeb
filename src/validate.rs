//! Query validation: raw `GET /render-skin` parameters in, [`RenderOptions`] out.

use std::fmt;

use serde::Deserialize;

use crate::color::parse_color;
use crate::{CustomColors, RenderOptions};

/// Skin resource used when the request does not name one.
pub const DEFAULT_SKIN_RESOURCE: &str = "default";

/// Query parameters exactly as they arrive, before any interpretation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuery {
    pub body_color: Option<String>,
    pub feet_color: Option<String>,
    pub looking_degree: Option<String>,
    pub size: Option<String>,
    pub skin_resource: Option<String>,
}

/// Why a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: &'static str,
    pub message: String,
}

impl ValidationFailure {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationFailure {}

/// Treat empty values like missing ones.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Validate and normalize a render request.
///
/// Custom colors are all-or-nothing: the engine mis-renders when only one of
/// body/feet is overridden, so a lone color is rejected here. An unparsable
/// `lookingDegree` is dropped rather than rejected; a bad `size` is rejected.
pub fn validate(query: &RawQuery) -> Result<RenderOptions, ValidationFailure> {
    let custom_colors = validate_colors(query)?;

    let view_angle_degrees = supplied(&query.looking_degree)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite());

    let output_size_pixels = match supplied(&query.size) {
        None => None,
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(size) if size > 0 => Some(size),
            _ => {
                return Err(ValidationFailure::new(
                    "size",
                    format!("expected a positive integer, got {raw:?}"),
                ))
            }
        },
    };

    let skin_resource_name = supplied(&query.skin_resource)
        .unwrap_or(DEFAULT_SKIN_RESOURCE)
        .to_string();

    Ok(RenderOptions {
        custom_colors,
        view_angle_degrees,
        output_size_pixels,
        skin_resource_name,
    })
}

fn validate_colors(query: &RawQuery) -> Result<Option<CustomColors>, ValidationFailure> {
    let body_raw = supplied(&query.body_color);
    let feet_raw = supplied(&query.feet_color);
    let body = parse_color(body_raw);
    let feet = parse_color(feet_raw);

    match (body, feet) {
        (None, None) => Ok(None),
        (Some(body), Some(feet)) => Ok(Some(CustomColors {
            body_code: body.encode(),
            feet_code: feet.encode(),
        })),
        (Some(_), None) => Err(missing_partner("feetColor", feet_raw)),
        (None, Some(_)) => Err(missing_partner("bodyColor", body_raw)),
    }
}

fn missing_partner(field: &'static str, raw: Option<&str>) -> ValidationFailure {
    let message = match raw {
        Some(raw) => format!(
            "{raw:?} is not a valid color; bodyColor and feetColor must be provided together"
        ),
        None => "bodyColor and feetColor must be provided together".to_string(),
    };
    ValidationFailure::new(field, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedColorCode;

    fn query(pairs: &[(&str, &str)]) -> RawQuery {
        let mut q = RawQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "bodyColor" => q.body_color = value,
                "feetColor" => q.feet_color = value,
                "lookingDegree" => q.looking_degree = value,
                "size" => q.size = value,
                "skinResource" => q.skin_resource = value,
                other => panic!("unknown key {other}"),
            }
        }
        q
    }

    #[test]
    fn empty_query_uses_defaults() {
        let opts = validate(&RawQuery::default()).unwrap();
        assert_eq!(opts.skin_resource_name, "default");
        assert!(opts.custom_colors.is_none());
        assert!(opts.view_angle_degrees.is_none());
        assert!(opts.output_size_pixels.is_none());
    }

    #[test]
    fn body_without_feet_is_rejected() {
        let err = validate(&query(&[("bodyColor", "255,0,0")])).unwrap_err();
        assert_eq!(err.field, "feetColor");
        assert!(err.message.contains("must be provided together"));
    }

    #[test]
    fn feet_without_body_is_rejected() {
        let err = validate(&query(&[("feetColor", "#00FF00")])).unwrap_err();
        assert_eq!(err.field, "bodyColor");
    }

    #[test]
    fn invalid_partner_is_rejected() {
        let err = validate(&query(&[("bodyColor", "#FF0000"), ("feetColor", "#XYZ")])).unwrap_err();
        assert_eq!(err.field, "feetColor");
        assert!(err.message.contains("not a valid color"));
    }

    #[test]
    fn two_invalid_colors_mean_no_override() {
        let opts = validate(&query(&[("bodyColor", "nope"), ("feetColor", "#12")])).unwrap();
        assert!(opts.custom_colors.is_none());
    }

    #[test]
    fn full_request_is_normalized() {
        let opts = validate(&query(&[
            ("bodyColor", "#FF0000"),
            ("feetColor", "#0000FF"),
            ("size", "256"),
        ]))
        .unwrap();
        assert_eq!(
            opts.custom_colors,
            Some(CustomColors {
                body_code: PackedColorCode(0xFFFF0000),
                feet_code: PackedColorCode(0xFF0000FF),
            })
        );
        assert_eq!(opts.output_size_pixels, Some(256));
        assert_eq!(opts.skin_resource_name, "default");
    }

    #[test]
    fn bad_size_is_rejected() {
        for size in ["-5", "abc", "0", "2.5", "99999999999"] {
            let err = validate(&query(&[("size", size)])).unwrap_err();
            assert_eq!(err.field, "size", "{size}");
        }
    }

    #[test]
    fn looking_degree_is_passed_through_or_dropped() {
        let opts = validate(&query(&[("lookingDegree", "-450.5")])).unwrap();
        assert_eq!(opts.view_angle_degrees, Some(-450.5));

        for bad in ["left", "inf", "NaN"] {
            let opts = validate(&query(&[("lookingDegree", bad)])).unwrap();
            assert_eq!(opts.view_angle_degrees, None, "{bad}");
        }
    }

    #[test]
    fn skin_resource_is_verbatim() {
        let opts = validate(&query(&[("skinResource", "  santa_cammo ")])).unwrap();
        assert_eq!(opts.skin_resource_name, "  santa_cammo ");

        let opts = validate(&query(&[("skinResource", "")])).unwrap();
        assert_eq!(opts.skin_resource_name, DEFAULT_SKIN_RESOURCE);
    }

    #[test]
    fn failure_display_names_field() {
        let err = validate(&query(&[("size", "abc")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid size: expected a positive integer, got \"abc\"");
    }
}
