//! Public-API tests for the quad's uniform state and fixed geometry.
//! Everything here runs without a GPU device.

use quadblit::color::{linear_to_srgb, shade, SRGB_THRESHOLD};
use quadblit::quad::DEFAULT_MVP;
use quadblit::vertex::{QUAD_INDICES, QUAD_VERTICES};
use quadblit::{Matrix4, QuadUniforms};

#[test]
fn default_state_matches_construction_contract() {
    let uniforms = QuadUniforms::default();
    assert_eq!(uniforms.texture_linear, 0);
    assert_eq!(uniforms.texture_exposure, 1.0);
    assert_eq!(Matrix4::from_cols(uniforms.mvp), DEFAULT_MVP);
}

#[test]
fn mvp_uniform_round_trips_exactly() {
    let mvp = Matrix4::perspective(0.6, 0.1, 100.0, 1.5)
        .matmul(&Matrix4::look_at([1.0, 2.0, 3.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]))
        .matmul(&Matrix4::rotate([0.3, 0.7, 0.1], 1.234));

    let uniforms = QuadUniforms {
        mvp: mvp.to_cols(),
        ..Default::default()
    };
    assert_eq!(Matrix4::from_cols(uniforms.mvp), mvp);
}

#[test]
fn degenerate_mvp_is_accepted() {
    let zero = Matrix4 { data: [0.0; 16] };
    let uniforms = QuadUniforms {
        mvp: zero.to_cols(),
        ..Default::default()
    };
    assert_eq!(Matrix4::from_cols(uniforms.mvp), zero);
}

#[test]
fn geometry_is_one_quad_of_two_triangles() {
    assert_eq!(QUAD_VERTICES.len(), 4);
    assert_eq!(QUAD_INDICES, [0, 2, 1, 3, 2, 0]);
}

#[test]
fn uv_order_is_flipped_relative_to_positions() {
    // Bottom-left position carries the top-right texel and vice versa
    assert_eq!(QUAD_VERTICES[0].position[..2], [-1.0, -1.0]);
    assert_eq!(QUAD_VERTICES[0].uv, [1.0, 1.0]);
    assert_eq!(QUAD_VERTICES[2].position[..2], [1.0, 1.0]);
    assert_eq!(QUAD_VERTICES[2].uv, [0.0, 0.0]);
}

#[test]
fn fragment_transform_is_identity_at_defaults() {
    for rgb in [0.0, 0.25, 0.5, 1.0] {
        let color = [rgb, rgb, rgb, 0.8];
        assert_eq!(shade(color, 1.0, false), color);
    }
}

#[test]
fn srgb_encode_is_continuous_at_threshold() {
    let below = linear_to_srgb(SRGB_THRESHOLD);
    let above = linear_to_srgb(SRGB_THRESHOLD + f32::EPSILON);
    assert!((below - above).abs() < 1e-4);
}

#[test]
fn exposure_applies_before_srgb_encode() {
    // 0.5 exposure on a 0.5 texel encodes 0.25, not encode(0.5) * 0.5
    let out = shade([0.5, 0.5, 0.5, 1.0], 0.5, true);
    assert!((out[0] - linear_to_srgb(0.25)).abs() < 1e-6);
}
