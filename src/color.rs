//! CPU reference for the fragment-stage color transform.
//!
//! The shader in [`crate::pipeline`] applies exposure scaling followed by an
//! optional linear-to-sRGB encode. The functions here implement the same
//! math on the CPU so output can be predicted and verified without a GPU.

/// Boundary between the linear and power segments of the sRGB encode.
pub const SRGB_THRESHOLD: f32 = 0.0031308;

/// Encode a single linear-light channel as gamma-compressed sRGB.
///
/// Values outside [0, 1] are passed through the same piecewise formula
/// without clamping, matching the shader.
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= SRGB_THRESHOLD {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Per-channel [`linear_to_srgb`] over an RGB triple.
pub fn linear_to_srgb_rgb(rgb: [f32; 3]) -> [f32; 3] {
    [
        linear_to_srgb(rgb[0]),
        linear_to_srgb(rgb[1]),
        linear_to_srgb(rgb[2]),
    ]
}

/// Apply the full fragment color contract to a sampled RGBA value:
/// RGB is scaled by `exposure`, then sRGB-encoded when `linear` is set.
/// Alpha is never touched.
pub fn shade(color: [f32; 4], exposure: f32, linear: bool) -> [f32; 4] {
    let mut rgb = [
        color[0] * exposure,
        color[1] * exposure,
        color[2] * exposure,
    ];
    if linear {
        rgb = linear_to_srgb_rgb(rgb);
    }
    [rgb[0], rgb[1], rgb[2], color[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_branches_agree_at_threshold() {
        let lower = SRGB_THRESHOLD * 12.92;
        let higher = 1.055 * SRGB_THRESHOLD.powf(1.0 / 2.4) - 0.055;
        assert!((lower - higher).abs() < 1e-4);
    }

    #[test]
    fn test_monotonic_across_threshold() {
        let below = linear_to_srgb(SRGB_THRESHOLD - 1e-5);
        let at = linear_to_srgb(SRGB_THRESHOLD);
        let above = linear_to_srgb(SRGB_THRESHOLD + 1e-5);
        assert!(below <= at && at <= above);
    }

    #[test]
    fn test_shade_is_identity_by_default() {
        let color = [0.25, 0.5, 0.75, 0.4];
        assert_eq!(shade(color, 1.0, false), color);
    }

    #[test]
    fn test_shade_exposure_scales_rgb_only() {
        let out = shade([0.1, 0.2, 0.3, 0.9], 2.0, false);
        assert_eq!(out, [0.2, 0.4, 0.6, 0.9]);
    }

    #[test]
    fn test_shade_leaves_alpha_when_linear() {
        let out = shade([0.5, 0.5, 0.5, 0.125], 1.0, true);
        assert_eq!(out[3], 0.125);
        // Mid grey encodes brighter than linear
        assert!(out[0] > 0.5);
    }

    #[test]
    fn test_negative_exposure_not_clamped() {
        let out = shade([0.5, 0.5, 0.5, 1.0], -1.0, false);
        assert_eq!(out[0], -0.5);
    }
}
