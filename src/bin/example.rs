//! Beam FEA Example - Portal Frame

use anyhow::Result;
use beam_fea::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== Beam FEA Example: Portal Frame ===\n");

    // Create a simple portal frame (mm, N)
    //
    //     N3 ---- M ---- N4
    //     |              |
    //     |              |
    //     N1            N2
    //     ^              ^
    //   Fixed          Fixed
    //
    let height = 4000.0;
    let span = 6000.0;
    let section = Section::rectangle(Material::steel(), 150.0, 300.0)?;

    let mut model = StaticModel::with_options(AnalysisOptions::default().with_logging());

    let left = model.add_element(
        Element::euler_bernoulli(&[[0.0, 0.0, 0.0], [0.0, height, 0.0]], section)?
            .with_parameters(&[0.25, 0.5, 0.75])?,
    );
    let beam = model.add_element(
        Element::timoshenko(&[[0.0, height, 0.0], [span, height, 0.0]], section)?
            .with_parameters(&[0.25, 0.5, 0.75])?,
    );
    let right = model.add_element(
        Element::euler_bernoulli(&[[span, height, 0.0], [span, 0.0, 0.0]], section)?
            .with_parameters(&[0.25, 0.5, 0.75])?,
    );

    model.add_boundary_condition([0.0, 0.0, 0.0], &BoundaryKey::fixed())?;
    model.add_boundary_condition([span, 0.0, 0.0], &BoundaryKey::fixed())?;

    // Lateral load at the top of the left column, gravity load at mid-span
    model.add_concentrated_load([0.0, height, 0.0], &[(LoadKey::Fx, 10_000.0)])?;
    model.add_concentrated_load_by_name([span / 2.0, height, 0.0], &[("Fy", -50_000.0)])?;

    model.run()?;

    println!("--- Displacements ---");
    for (name, point) in [
        ("N3", [0.0, height, 0.0]),
        ("M", [span / 2.0, height, 0.0]),
        ("N4", [span, height, 0.0]),
    ] {
        let d = model.displacement_at(point)?;
        println!(
            "{:>3}: DX = {:>10.4} mm, DY = {:>10.4} mm, RZ = {:>10.6} rad",
            name, d.dx, d.dy, d.rz
        );
    }

    println!("\n--- Reactions ---");
    for (name, point) in [("N1", [0.0, 0.0, 0.0]), ("N2", [span, 0.0, 0.0])] {
        let r = model.reaction_at(point)?;
        println!(
            "{:>3}: FX = {:>10.1} N, FY = {:>10.1} N, MZ = {:>12.1} N·mm",
            name, r.fx, r.fy, r.mz
        );
    }

    println!("\n--- Beam internal moment MI (about Z) ---");
    for (t, m) in model.field(beam, "MI")?.iter() {
        println!("t = {:.2}: {:>12.1} N·mm", t, m.z);
    }

    println!("\n--- Column external forces FE ---");
    for (label, id) in [("left", left), ("right", right)] {
        let fe = model.field(id, "FE")?;
        let base = fe.eval(0.0);
        println!("{:>5} base: ({:.1}, {:.1}, {:.1}) N", label, base.x, base.y, base.z);
    }

    println!("\n--- Summary ---");
    println!("{}", serde_json::to_string_pretty(&model.summary()?)?);

    Ok(())
}
