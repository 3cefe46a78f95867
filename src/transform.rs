/// A 4x4 transformation matrix stored in row-major order.
///
/// Used to build the model-view-projection transform applied to the quad's
/// vertices. Converted to column-major with [`Matrix4::to_cols`] when
/// uploaded to the GPU.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4 {
    /// Matrix data in row-major order: [row0, row1, row2, row3]
    pub data: [f32; 16],
}

impl Matrix4 {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, 0.0, // row 1
            0.0, 0.0, 1.0, 0.0, // row 2
            0.0, 0.0, 0.0, 1.0, // row 3
        ],
    };

    /// Create an identity matrix
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a translation matrix
    pub fn translate(v: [f32; 3]) -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, v[0], // row 0
                0.0, 1.0, 0.0, v[1], // row 1
                0.0, 0.0, 1.0, v[2], // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Create a non-uniform scale matrix
    pub fn scale(v: [f32; 3]) -> Self {
        Self {
            data: [
                v[0], 0.0, 0.0, 0.0, // row 0
                0.0, v[1], 0.0, 0.0, // row 1
                0.0, 0.0, v[2], 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Create a rotation matrix around an arbitrary axis (Rodrigues form).
    /// The axis is normalized internally; a zero axis yields identity.
    pub fn rotate(axis: [f32; 3], angle_radians: f32) -> Self {
        let len = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        if len < 1e-10 {
            return Self::IDENTITY;
        }
        let (x, y, z) = (axis[0] / len, axis[1] / len, axis[2] / len);
        let (sin, cos) = angle_radians.sin_cos();
        let t = 1.0 - cos;

        Self {
            data: [
                t * x * x + cos,
                t * x * y - sin * z,
                t * x * z + sin * y,
                0.0, // row 0
                t * x * y + sin * z,
                t * y * y + cos,
                t * y * z - sin * x,
                0.0, // row 1
                t * x * z - sin * y,
                t * y * z + sin * x,
                t * z * z + cos,
                0.0, // row 2
                0.0,
                0.0,
                0.0,
                1.0, // row 3
            ],
        }
    }

    /// Create a right-handed look-at view matrix.
    pub fn look_at(origin: [f32; 3], target: [f32; 3], up: [f32; 3]) -> Self {
        let f = normalize(sub(target, origin));
        let s = normalize(cross(f, up));
        let u = cross(s, f);

        Self {
            data: [
                s[0],
                s[1],
                s[2],
                -dot(s, origin), // row 0
                u[0],
                u[1],
                u[2],
                -dot(u, origin), // row 1
                -f[0],
                -f[1],
                -f[2],
                dot(f, origin), // row 2
                0.0,
                0.0,
                0.0,
                1.0, // row 3
            ],
        }
    }

    /// Create a perspective projection matrix.
    ///
    /// `fov_y` is the full vertical field of view in radians.
    pub fn perspective(fov_y: f32, near: f32, far: f32, aspect: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let range = far - near;

        Self {
            data: [
                f / aspect,
                0.0,
                0.0,
                0.0, // row 0
                0.0,
                f,
                0.0,
                0.0, // row 1
                0.0,
                0.0,
                -(far + near) / range,
                -2.0 * far * near / range, // row 2
                0.0,
                0.0,
                -1.0,
                0.0, // row 3
            ],
        }
    }

    /// Compose this matrix with another: self * other.
    /// Applies `other` first, then `self`.
    pub fn matmul(&self, other: &Matrix4) -> Matrix4 {
        let a = &self.data;
        let b = &other.data;

        // Row-major indexing: element at row i, col j is at index i*4 + j
        let mut result = [0.0f32; 16];

        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[i * 4 + k] * b[k * 4 + j];
                }
                result[i * 4 + j] = sum;
            }
        }

        Matrix4 { data: result }
    }

    /// Transform a 3D point by this matrix, with perspective divide.
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        let d = &self.data;
        let x = d[0] * p[0] + d[1] * p[1] + d[2] * p[2] + d[3];
        let y = d[4] * p[0] + d[5] * p[1] + d[6] * p[2] + d[7];
        let z = d[8] * p[0] + d[9] * p[1] + d[10] * p[2] + d[11];
        let w = d[12] * p[0] + d[13] * p[1] + d[14] * p[2] + d[15];

        if w.abs() > 1e-10 && (w - 1.0).abs() > 1e-10 {
            [x / w, y / w, z / w]
        } else {
            [x, y, z]
        }
    }

    /// Get the columns of the matrix for GPU upload (WGSL mat4x4 is
    /// column-major).
    pub fn to_cols(&self) -> [[f32; 4]; 4] {
        let d = &self.data;
        [
            [d[0], d[4], d[8], d[12]],
            [d[1], d[5], d[9], d[13]],
            [d[2], d[6], d[10], d[14]],
            [d[3], d[7], d[11], d[15]],
        ]
    }

    /// Rebuild a matrix from GPU column order. Exact inverse of
    /// [`Matrix4::to_cols`].
    pub fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self {
            data: [
                cols[0][0], cols[1][0], cols[2][0], cols[3][0], // row 0
                cols[0][1], cols[1][1], cols[2][1], cols[3][1], // row 1
                cols[0][2], cols[1][2], cols[2][2], cols[3][2], // row 2
                cols[0][3], cols[1][3], cols[2][3], cols[3][3], // row 3
            ],
        }
    }

    /// Check if this is the identity matrix
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    if len < 1e-10 {
        return v;
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_identity() {
        let m = Matrix4::identity();
        assert_eq!(m, Matrix4::IDENTITY);
        assert!(m.is_identity());

        let p = m.transform_point([3.0, -2.0, 7.0]);
        assert_eq!(p, [3.0, -2.0, 7.0]);
    }

    #[test]
    fn test_translate() {
        let m = Matrix4::translate([10.0, 20.0, -5.0]);
        let [x, y, z] = m.transform_point([1.0, 2.0, 3.0]);
        assert!(approx_eq(x, 11.0));
        assert!(approx_eq(y, 22.0));
        assert!(approx_eq(z, -2.0));
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let m = Matrix4::rotate([0.0, 0.0, 1.0], std::f32::consts::FRAC_PI_2);
        let [x, y, z] = m.transform_point([1.0, 0.0, 0.0]);
        assert!(approx_eq(x, 0.0));
        assert!(approx_eq(y, 1.0));
        assert!(approx_eq(z, 0.0));
    }

    #[test]
    fn test_rotate_zero_axis_is_identity() {
        let m = Matrix4::rotate([0.0, 0.0, 0.0], 1.5);
        assert!(m.is_identity());
    }

    #[test]
    fn test_matmul_composes() {
        let t = Matrix4::translate([5.0, 0.0, 0.0]);
        let s = Matrix4::scale([2.0, 2.0, 2.0]);

        // t * s scales first, then translates
        let m = t.matmul(&s);
        let [x, y, z] = m.transform_point([1.0, 1.0, 1.0]);
        assert!(approx_eq(x, 7.0));
        assert!(approx_eq(y, 2.0));
        assert!(approx_eq(z, 2.0));
    }

    #[test]
    fn test_cols_round_trip() {
        let m = Matrix4 {
            data: [
                1.0, 2.0, 3.0, 4.0, //
                5.0, 6.0, 7.0, 8.0, //
                9.0, 10.0, 11.0, 12.0, //
                13.0, 14.0, 15.0, 16.0,
            ],
        };
        assert_eq!(Matrix4::from_cols(m.to_cols()), m);

        // First column of the GPU layout is the first element of each row
        let cols = m.to_cols();
        assert_eq!(cols[0], [1.0, 5.0, 9.0, 13.0]);
    }

    #[test]
    fn test_perspective_maps_depth_range() {
        let near = 0.1;
        let far = 20.0;
        let m = Matrix4::perspective(25.0_f32.to_radians(), near, far, 1.0);

        // Points on the near/far planes along -Z map to NDC z = -1/+1
        let [_, _, z_near] = m.transform_point([0.0, 0.0, -near]);
        assert!(approx_eq(z_near, -1.0));

        let [_, _, z_far] = m.transform_point([0.0, 0.0, -far]);
        assert!(approx_eq(z_far, 1.0));
    }

    #[test]
    fn test_look_at_centers_target() {
        let m = Matrix4::look_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        // The target lands on the -Z view axis
        let [x, y, z] = m.transform_point([0.0, 0.0, 0.0]);
        assert!(approx_eq(x, 0.0));
        assert!(approx_eq(y, 0.0));
        assert!(approx_eq(z, -5.0));
    }
}
