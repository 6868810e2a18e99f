//! Cantilever with a circular section and a transverse tip load

use approx::assert_relative_eq;
use beam_fea::prelude::*;
use std::f64::consts::PI;

const LENGTH: f64 = 1000.0;
const E: f64 = 210e3;
const NU: f64 = 0.3;
const DIAMETER: f64 = 8.0;
const LOAD: f64 = 10.0;

fn sample_params(n: usize) -> Vec<f64> {
    (0..=n).map(|i| i as f64 / n as f64).collect()
}

fn build_cantilever(kind: ElementKind, options: AnalysisOptions) -> (StaticModel, ElementId) {
    let section = Section::circle(Material::isotropic(E, NU), DIAMETER).unwrap();
    let beam = Element::from_points(kind, &[[0.0, 0.0, 0.0], [LENGTH, 0.0, 0.0]], section)
        .unwrap()
        .with_parameters(&sample_params(100))
        .unwrap();

    let mut model = StaticModel::with_options(options);
    let id = model.add_element(beam);
    model
        .add_boundary_condition([0.0, 0.0, 0.0], &BoundaryKey::fixed())
        .unwrap();
    model
        .add_concentrated_load_by_name([LENGTH, 0.0, 0.0], &[("Fy", LOAD)])
        .unwrap();
    (model, id)
}

fn analytic_deflection(t: f64) -> f64 {
    64.0 * LOAD * LENGTH.powi(3) * (1.5 * t * t - 0.5 * t.powi(3)) / (3.0 * E * PI * DIAMETER.powi(4))
}

#[test]
fn test_deflection_matches_beam_theory() {
    let (mut model, id) = build_cantilever(ElementKind::EulerBernoulli, AnalysisOptions::default());
    model.run().unwrap();

    let u = model.field(id, "u").unwrap();
    assert_eq!(u.len(), 101);
    let tip = analytic_deflection(1.0);
    for (t, value) in u.iter() {
        assert_relative_eq!(value.y, analytic_deflection(t), epsilon = 1e-9 * tip, max_relative = 1e-6);
        assert_relative_eq!(value.x, 0.0, epsilon = 1e-9 * tip);
        assert_relative_eq!(value.z, 0.0, epsilon = 1e-9 * tip);
    }

    // Between nodes the curve interpolates linearly
    let mid = 0.5 * (analytic_deflection(0.50) + analytic_deflection(0.51));
    assert_relative_eq!(u.eval(0.505).y, mid, max_relative = 1e-6);
}

#[test]
fn test_deformed_is_position_plus_displacement() {
    let (mut model, id) = build_cantilever(ElementKind::EulerBernoulli, AnalysisOptions::default());
    model.run().unwrap();

    let d = model.field(id, "d").unwrap();
    assert_relative_eq!(d.eval(1.0).x, LENGTH, epsilon = 1e-6);
    assert_relative_eq!(d.eval(1.0).y, analytic_deflection(1.0), max_relative = 1e-6);
    assert_relative_eq!(d.eval(0.3).x, 0.3 * LENGTH, epsilon = 1e-6);
}

#[test]
fn test_internal_force_is_constant_shear() {
    let (mut model, id) = build_cantilever(ElementKind::EulerBernoulli, AnalysisOptions::default());
    model.run().unwrap();

    let fi = model.field(id, "FI").unwrap();
    for (_, value) in fi.iter() {
        assert_relative_eq!(value.y, -LOAD, epsilon = 1e-6);
        assert_relative_eq!(value.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(value.z, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn test_internal_moment_is_linear() {
    let (mut model, id) = build_cantilever(ElementKind::EulerBernoulli, AnalysisOptions::default());
    model.run().unwrap();

    let mi = model.field(id, "MI").unwrap();
    for (t, value) in mi.iter() {
        assert_relative_eq!(value.z, -LOAD * LENGTH * (1.0 - t), epsilon = 1e-4);
        assert_relative_eq!(value.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(value.y, 0.0, epsilon = 1e-4);
    }
}

#[test]
fn test_external_resultants_are_load_and_reaction() {
    let (mut model, id) = build_cantilever(ElementKind::EulerBernoulli, AnalysisOptions::default());
    model.run().unwrap();

    // K·U: applied load at the free end, reaction at the support, zero between
    let fe = model.field(id, "FE").unwrap();
    assert_relative_eq!(fe.eval(1.0).y, LOAD, epsilon = 1e-6);
    assert_relative_eq!(fe.eval(0.0).y, -LOAD, epsilon = 1e-6);
    assert_relative_eq!(fe.eval(0.5).y, 0.0, epsilon = 1e-6);

    let me = model.field(id, "ME").unwrap();
    assert_relative_eq!(me.eval(0.0).z, -LOAD * LENGTH, epsilon = 1e-4);
    assert_relative_eq!(me.eval(1.0).z, 0.0, epsilon = 1e-4);

    let rxn = model.reaction_at([0.0, 0.0, 0.0]).unwrap();
    assert_relative_eq!(rxn.fy, -LOAD, epsilon = 1e-6);
    assert_relative_eq!(rxn.mz, -LOAD * LENGTH, epsilon = 1e-4);
}

#[test]
fn test_fields_are_idempotent() {
    let (mut model, id) = build_cantilever(ElementKind::EulerBernoulli, AnalysisOptions::default());
    model.run().unwrap();

    for code in ["p", "u", "d", "FI", "FE", "MI", "ME"] {
        let first = model.field(id, code).unwrap();
        let second = model.field(id, code).unwrap();
        assert_eq!(first, second, "field {} changed between calls", code);
    }
}

#[test]
fn test_stress_fields_unsupported() {
    let (mut model, id) = build_cantilever(ElementKind::EulerBernoulli, AnalysisOptions::default());
    model.run().unwrap();

    assert!(matches!(model.field(id, "TR"), Err(FEAError::UnsupportedField(_))));
    assert!(matches!(model.field(id, "VM"), Err(FEAError::UnsupportedField(_))));
    assert!(matches!(model.field(id, "sigma"), Err(FEAError::Validation(_))));
}

#[test]
fn test_skyline_backend_agrees() {
    let (mut dense, id) = build_cantilever(ElementKind::EulerBernoulli, AnalysisOptions::default());
    let (mut skyline, _) = build_cantilever(
        ElementKind::EulerBernoulli,
        AnalysisOptions::default().with_backend(SolverBackend::SkylineCholesky),
    );
    dense.run().unwrap();
    skyline.run().unwrap();

    let a = dense.field(id, "u").unwrap();
    let b = skyline.field(id, "u").unwrap();
    for ((_, x), (_, y)) in a.iter().zip(b.iter()) {
        assert_relative_eq!(x.y, y.y, epsilon = 1e-9, max_relative = 1e-8);
    }
}

#[test]
fn test_timoshenko_adds_shear_deflection() {
    let (mut model, id) = build_cantilever(ElementKind::Timoshenko, AnalysisOptions::default());
    model.run().unwrap();

    let g = E / (2.0 * (1.0 + NU));
    let kappa = 6.0 * (1.0 + NU) / (7.0 + 6.0 * NU);
    let shear_area = kappa * PI * DIAMETER * DIAMETER / 4.0;
    let expected = analytic_deflection(1.0) + LOAD * LENGTH / (g * shear_area);

    let tip = model.field(id, "u").unwrap().eval(1.0);
    assert_relative_eq!(tip.y, expected, max_relative = 1e-6);
    assert!(tip.y > analytic_deflection(1.0));
}

#[test]
fn test_out_of_plane_bending() {
    // Fz on an X beam bends about global Y
    let section = Section::circle(Material::isotropic(E, NU), DIAMETER).unwrap();
    let beam = Element::euler_bernoulli(&[[0.0, 0.0, 0.0], [LENGTH, 0.0, 0.0]], section)
        .unwrap()
        .with_parameters(&sample_params(10))
        .unwrap();

    let mut model = StaticModel::new();
    let id = model.add_element(beam);
    model
        .add_boundary_condition([0.0, 0.0, 0.0], &BoundaryKey::fixed())
        .unwrap();
    model
        .add_concentrated_load([LENGTH, 0.0, 0.0], &[(LoadKey::Fz, LOAD)])
        .unwrap();
    model.run().unwrap();

    let tip = model.displacement_at([LENGTH, 0.0, 0.0]).unwrap();
    let inertia = PI * DIAMETER.powi(4) / 64.0;
    assert_relative_eq!(tip.dz, analytic_deflection(1.0), max_relative = 1e-6);
    assert_relative_eq!(tip.ry, -LOAD * LENGTH * LENGTH / (2.0 * E * inertia), max_relative = 1e-6);
    assert_relative_eq!(tip.dy, 0.0, epsilon = 1e-9);
    assert_relative_eq!(tip.rz, 0.0, epsilon = 1e-12);

    let u = model.field(id, "u").unwrap();
    for (t, value) in u.iter() {
        assert_relative_eq!(value.z, analytic_deflection(t), epsilon = 1e-9, max_relative = 1e-6);
    }

    // Root reaction moment about Y balances the tip load lever arm
    let rxn = model.reaction_at([0.0, 0.0, 0.0]).unwrap();
    assert_relative_eq!(rxn.fz, -LOAD, epsilon = 1e-6);
    assert_relative_eq!(rxn.my, LOAD * LENGTH, epsilon = 1e-4);
    let mi = model.field(id, "MI").unwrap();
    assert_relative_eq!(mi.eval(0.0).y, LOAD * LENGTH, epsilon = 1e-4);
}

#[test]
fn test_vertical_cantilever() {
    // Axis parallel to the global Z reference direction
    let section = Section::circle(Material::isotropic(E, NU), DIAMETER).unwrap();
    let column = Element::euler_bernoulli(&[[0.0, 0.0, 0.0], [0.0, 0.0, LENGTH]], section).unwrap();

    let mut model = StaticModel::new();
    let id = model.add_element(column);
    model
        .add_boundary_condition([0.0, 0.0, 0.0], &BoundaryKey::fixed())
        .unwrap();
    model
        .add_concentrated_load([0.0, 0.0, LENGTH], &[(LoadKey::Fx, LOAD)])
        .unwrap();
    model.run().unwrap();

    let tip = model.field(id, "u").unwrap().eval(1.0);
    assert_relative_eq!(tip.x, analytic_deflection(1.0), max_relative = 1e-6);
    assert_relative_eq!(tip.y, 0.0, epsilon = 1e-9);

    let rxn = model.reaction_at([0.0, 0.0, 0.0]).unwrap();
    assert_relative_eq!(rxn.fx, -LOAD, epsilon = 1e-6);
    assert_relative_eq!(rxn.my, -LOAD * LENGTH, epsilon = 1e-4);
}
