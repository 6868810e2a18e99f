//! Element stiffness engine: local blocks, frame rotations and global transforms
//!
//! DOF order per node is fixed: 0 = axial translation along the local tangent,
//! 1/5 = translation/rotation in bending plane 1, 2/4 = translation/rotation
//! in bending plane 2, 3 = torsion about the tangent.

pub mod sparse;
mod tensor;

use nalgebra::{Matrix2, Matrix3, Matrix4, SMatrix, SVector, Vector3, Vector6};

use crate::elements::{ElementKind, SectionProperties};
use crate::error::{FEAError, FEAResult};
use crate::geometry::MIN_SEGMENT_LENGTH;

pub use sparse::{SkylineCholesky, SparseMatrixBuilder};
pub use tensor::StiffnessTensor;

pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;

/// 12x12 block coupling the two nodes of one segment, indexed `node * 6 + dof`
pub type Mat12 = SMatrix<f64, 12, 12>;
/// Stacked 6-DOF vectors of the two nodes of one segment
pub type Vec12 = SVector<f64, 12>;

/// cos(8°): tangents closer than this to global Z use global Y as the reference
const PARALLEL_COSINE: f64 = 0.990_268_068_741_570_3;

/// Local stiffness block of a two-node segment of the given kind and length
pub fn local_stiffness<P>(kind: ElementKind, length: f64, props: &P) -> Mat12
where
    P: SectionProperties + ?Sized,
{
    match kind {
        ElementKind::Truss | ElementKind::Cable => axial_stiffness(length, props),
        ElementKind::EulerBernoulli => beam_stiffness(length, props, 0.0, 0.0),
        ElementKind::Timoshenko => {
            let l2 = length * length;
            let [_, a1, a2] = props.areas();
            let [_, iy, iz] = props.inertias();
            let e = props.young_modulus();
            let g = props.shear_modulus();
            let phi1 = 12.0 * e * iz / (g * a1 * l2);
            let phi2 = 12.0 * e * iy / (g * a2 * l2);
            beam_stiffness(length, props, phi1, phi2)
        }
    }
}

fn axial_stiffness<P: SectionProperties + ?Sized>(length: f64, props: &P) -> Mat12 {
    let mut k = Mat12::zeros();
    let ea_l = props.young_modulus() * props.areas()[0] / length;
    scatter_pair(&mut k, 0, &(ea_l * bar_pattern()));
    k
}

/// Beam block with shear parameters `phi1`/`phi2` for the two bending planes.
/// Zero shear parameters give the Euler-Bernoulli block.
fn beam_stiffness<P>(length: f64, props: &P, phi1: f64, phi2: f64) -> Mat12
where
    P: SectionProperties + ?Sized,
{
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;
    let e = props.young_modulus();
    let g = props.shear_modulus();
    let [ax, _, _] = props.areas();
    let [ix, iy, iz] = props.inertias();

    let mut k = Mat12::zeros();
    scatter_pair(&mut k, 0, &(e * ax / l * bar_pattern()));
    scatter_pair(&mut k, 3, &(g * ix / l * bar_pattern()));

    let c1 = e * iz / ((1.0 + phi1) * l3);
    #[rustfmt::skip]
    let plane1 = Matrix4::new(
        12.0,     6.0 * l,                -12.0,    6.0 * l,
        6.0 * l,  (4.0 + phi1) * l2,      -6.0 * l, (2.0 - phi1) * l2,
        -12.0,    -6.0 * l,               12.0,     -6.0 * l,
        6.0 * l,  (2.0 - phi1) * l2,      -6.0 * l, (4.0 + phi1) * l2,
    );
    scatter_bending(&mut k, [1, 5], &(c1 * plane1));

    let c2 = e * iy / ((1.0 + phi2) * l3);
    #[rustfmt::skip]
    let plane2 = Matrix4::new(
        12.0,     -6.0 * l,               -12.0,    -6.0 * l,
        -6.0 * l, (4.0 + phi2) * l2,      6.0 * l,  (2.0 - phi2) * l2,
        -12.0,    6.0 * l,                12.0,     6.0 * l,
        -6.0 * l, (2.0 - phi2) * l2,      6.0 * l,  (4.0 + phi2) * l2,
    );
    scatter_bending(&mut k, [2, 4], &(c2 * plane2));

    k
}

fn bar_pattern() -> Matrix2<f64> {
    Matrix2::new(1.0, -1.0, -1.0, 1.0)
}

/// Place a 2x2 (node i, node j) block on a single DOF
fn scatter_pair(k: &mut Mat12, dof: usize, block: &Matrix2<f64>) {
    let idx = [dof, 6 + dof];
    for (a, &ia) in idx.iter().enumerate() {
        for (b, &ib) in idx.iter().enumerate() {
            k[(ia, ib)] = block[(a, b)];
        }
    }
}

/// Place a 4x4 bending block ordered (i.translation, i.rotation, j.translation, j.rotation)
fn scatter_bending(k: &mut Mat12, dofs: [usize; 2], block: &Matrix4<f64>) {
    let idx = [dofs[0], dofs[1], 6 + dofs[0], 6 + dofs[1]];
    for (a, &ia) in idx.iter().enumerate() {
        for (b, &ib) in idx.iter().enumerate() {
            k[(ia, ib)] = block[(a, b)];
        }
    }
}

/// Rotation from global to local axes for the segment `p0 -> p1`.
///
/// Rows are the local axes `[r, w, v]`: `r` is the unit tangent, `v` is the
/// reference up vector orthogonalised against `r`, and `w = v × r`.
pub fn frame_rotation(p0: &Vec3, p1: &Vec3) -> FEAResult<Mat3> {
    let delta = p1 - p0;
    let length = delta.norm();
    if length < MIN_SEGMENT_LENGTH {
        return Err(FEAError::InvalidGeometry(format!(
            "zero-length segment at ({}, {}, {})",
            p0.x, p0.y, p0.z
        )));
    }
    let r = delta / length;

    let mut up = Vec3::z();
    if r.dot(&up).abs() > PARALLEL_COSINE {
        up = Vec3::y();
    }
    let v = (up - r * up.dot(&r)).normalize();
    let w = v.cross(&r);

    Ok(Mat3::from_rows(&[r.transpose(), w.transpose(), v.transpose()]))
}

/// 12x12 block-diagonal transform built from four copies of a 3x3 rotation
pub fn transformation_matrix(rotation: &Mat3) -> Mat12 {
    let mut t = Mat12::zeros();
    for block in 0..4 {
        let offset = block * 3;
        t.fixed_view_mut::<3, 3>(offset, offset).copy_from(rotation);
    }
    t
}

/// Global-frame block of one segment: `Tᵀ · K_local · T`
pub fn segment_stiffness<P>(kind: ElementKind, p0: &Vec3, p1: &Vec3, props: &P) -> FEAResult<Mat12>
where
    P: SectionProperties + ?Sized,
{
    let rotation = frame_rotation(p0, p1)?;
    let k_local = local_stiffness(kind, (p1 - p0).norm(), props);
    let t = transformation_matrix(&rotation);
    Ok(t.transpose() * k_local * t)
}

/// Full stiffness tensor of a multi-point path: consecutive segment blocks
/// overlap-added on the shared interior points.
pub fn path_stiffness<P>(kind: ElementKind, points: &[Vec3], props: &P) -> FEAResult<StiffnessTensor>
where
    P: SectionProperties + ?Sized,
{
    let mut k = StiffnessTensor::zeros(points.len());
    for (i, pair) in points.windows(2).enumerate() {
        let block = segment_stiffness(kind, &pair[0], &pair[1], props)?;
        k.add_segment(i, i + 1, &block);
    }
    Ok(k)
}

/// Stack two nodal vectors into a segment vector
pub fn stack_pair(first: &Vec6, second: &Vec6) -> Vec12 {
    let mut out = Vec12::zeros();
    out.fixed_rows_mut::<6>(0).copy_from(first);
    out.fixed_rows_mut::<6>(6).copy_from(second);
    out
}
