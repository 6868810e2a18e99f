//! Torsion of a circular bar about a skew axis

use approx::assert_relative_eq;
use beam_fea::prelude::*;
use std::f64::consts::PI;

#[test]
fn test_twist_about_skew_axis() {
    let length = 500.0;
    let e = 70e3;
    let nu = 0.33;
    let d = 12.0;
    let torque = 2500.0;

    let r = Point3::new(1.0, -2.0, 0.5).normalize();
    let tip = r * length;

    let section = Section::circle(Material::isotropic(e, nu), d).unwrap();
    let bar = Element::euler_bernoulli(&[[0.0, 0.0, 0.0], [tip.x, tip.y, tip.z]], section)
        .unwrap()
        .with_parameters(&[0.2, 0.4, 0.6, 0.8])
        .unwrap();

    let mut model = StaticModel::new();
    let id = model.add_element(bar);
    model
        .add_boundary_condition([0.0, 0.0, 0.0], &BoundaryKey::fixed())
        .unwrap();
    model
        .add_concentrated_load(
            [tip.x, tip.y, tip.z],
            &[
                (LoadKey::Mx, torque * r.x),
                (LoadKey::My, torque * r.y),
                (LoadKey::Mz, torque * r.z),
            ],
        )
        .unwrap();
    model.run().unwrap();

    let twist = 64.0 * torque * length * (1.0 + nu) / (PI * e * d.powi(4));
    let rotation = model.displacement_at([tip.x, tip.y, tip.z]).unwrap();
    assert_relative_eq!(rotation.rx, twist * r.x, epsilon = 1e-12, max_relative = 1e-6);
    assert_relative_eq!(rotation.ry, twist * r.y, epsilon = 1e-12, max_relative = 1e-6);
    assert_relative_eq!(rotation.rz, twist * r.z, epsilon = 1e-12, max_relative = 1e-6);
    assert_relative_eq!(rotation.translation_magnitude(), 0.0, epsilon = 1e-9);

    // Twist grows linearly along the bar
    let mid = model.displacement_at([0.4 * tip.x, 0.4 * tip.y, 0.4 * tip.z]).unwrap();
    assert_relative_eq!(mid.rotation_magnitude(), 0.4 * twist, max_relative = 1e-6);

    let reaction = model.reaction_at([0.0, 0.0, 0.0]).unwrap();
    assert_relative_eq!(reaction.mx, -torque * r.x, epsilon = 1e-6);
    assert_relative_eq!(reaction.my, -torque * r.y, epsilon = 1e-6);
    assert_relative_eq!(reaction.mz, -torque * r.z, epsilon = 1e-6);
    assert_relative_eq!(reaction.force_magnitude(), 0.0, epsilon = 1e-6);

    // Internal torque is carried unchanged to the support
    let mi = model.field(id, "MI").unwrap();
    for (_, m) in mi.iter() {
        assert_relative_eq!(m.dot(&r), -torque, epsilon = 1e-6);
    }
}
