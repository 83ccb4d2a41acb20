use ordered_float::NotNan;

//See https://pages.mtu.edu/~shene/COURSES/cs3621/NOTES/geometry/geo-tran.html

///Affine transformation in matrix form, limited to translations, rotations and uniform scaling
#[derive(Clone, Debug, PartialEq)]
pub struct Transformation {
    matrix: [[NotNan<f64>; 3]; 3],
}

impl Transformation {
    pub fn from_translation((tx, ty): (f64, f64)) -> Self {
        Self {
            matrix: transl_m((tx, ty)),
        }
    }

    /// Uniform scaling with respect to the origin
    pub fn from_scaling(factor: f64) -> Self {
        Self {
            matrix: scale_m(factor),
        }
    }

    /// Rotation of `angle` radians around `pivot`
    pub fn from_rotation_around(angle: f64, (px, py): (f64, f64)) -> Self {
        Self::from_translation((-px, -py))
            .rotate(angle)
            .translate((px, py))
    }

    pub fn rotate(mut self, angle: f64) -> Self {
        self.matrix = dot_prod(&rot_m(angle), &self.matrix);
        self
    }

    pub fn translate(mut self, (tx, ty): (f64, f64)) -> Self {
        self.matrix = dot_prod(&transl_m((tx, ty)), &self.matrix);
        self
    }

    /// Applies the transformation to a single coordinate pair
    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let m = &self.matrix;
        let t_x = m[0][0].into_inner() * x + m[0][1].into_inner() * y + m[0][2].into_inner();
        let t_y = m[1][0].into_inner() * x + m[1][1].into_inner() * y + m[1][2].into_inner();
        (t_x, t_y)
    }
}

const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
const _1: NotNan<f64> = unsafe { NotNan::new_unchecked(1.0) };

fn rot_m(angle: f64) -> [[NotNan<f64>; 3]; 3] {
    let (sin, cos) = angle.sin_cos();
    //quarter turns have to be exact, otherwise rotated axis-aligned shapes gain spurious width
    let cos = NotNan::new(snap_unit(cos)).expect("cos is NaN");
    let sin = NotNan::new(snap_unit(sin)).expect("sin is NaN");

    [[cos, -sin, _0], [sin, cos, _0], [_0, _0, _1]]
}

fn transl_m((tx, ty): (f64, f64)) -> [[NotNan<f64>; 3]; 3] {
    let h = NotNan::new(tx).expect("tx is NaN");
    let k = NotNan::new(ty).expect("ty is NaN");

    [[_1, _0, h], [_0, _1, k], [_0, _0, _1]]
}

fn scale_m(factor: f64) -> [[NotNan<f64>; 3]; 3] {
    let s = NotNan::new(factor).expect("scale factor is NaN");

    [[s, _0, _0], [_0, s, _0], [_0, _0, _1]]
}

fn snap_unit(v: f64) -> f64 {
    const SNAP: f64 = 1e-12;
    if v.abs() < SNAP {
        0.0
    } else if (v.abs() - 1.0).abs() < SNAP {
        v.signum()
    } else {
        v
    }
}

fn dot_prod(a: &[[NotNan<f64>; 3]; 3], b: &[[NotNan<f64>; 3]; 3]) -> [[NotNan<f64>; 3]; 3] {
    let mut result = [[_0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}
