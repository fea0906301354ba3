use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    /// A dimension was zero, negative, or not finite.
    #[error("invalid {label} dimensions: {width}x{height}")]
    InvalidDimension {
        label: &'static str,
        width: f32,
        height: f32,
    },
}

/// A rectangle fitted into target bounds, rounded to whole units for
/// geometry generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitRect {
    pub width: u32,
    pub height: u32,
}

/// Largest rectangle with the content's aspect ratio that fits inside the
/// target bounds. One axis lands exactly on the bound, the other at or
/// under it.
///
/// Width and height are rounded to the nearest integer independently; the
/// resulting sub-unit aspect drift is accepted.
pub fn fit(
    content_width: f32,
    content_height: f32,
    bounds_width: f32,
    bounds_height: f32,
) -> Result<FitRect, FitError> {
    check_dimensions("content", content_width, content_height)?;
    check_dimensions("bounds", bounds_width, bounds_height)?;

    let content_aspect = content_width / content_height;
    let bounds_aspect = bounds_width / bounds_height;

    let (width, height) = if content_aspect > bounds_aspect {
        // Content relatively wider: pin width, scale height down
        (bounds_width, bounds_width / content_aspect)
    } else {
        (bounds_height * content_aspect, bounds_height)
    };

    Ok(FitRect {
        width: width.round() as u32,
        height: height.round() as u32,
    })
}

fn check_dimensions(label: &'static str, width: f32, height: f32) -> Result<(), FitError> {
    let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
    if valid {
        Ok(())
    } else {
        Err(FitError::InvalidDimension {
            label,
            width,
            height,
        })
    }
}
