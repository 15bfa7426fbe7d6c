// Canonical (NVT) displacement Monte Carlo for a Lennard-Jones fluid.
//
// The driver owns positions, the trial displacement and the counters, and
// uses the integrator for energies, acceptance and step retuning.
// Run with: cargo run --example lj_displacement

use color_eyre::eyre::{Result, WrapErr};
use mc_integrator::{Integrator, IntegratorConfig, TrialCounters};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

const CONFIG: &str = "cutoff: 2.5\nlow_acceptance: 0.38\nhigh_acceptance: 0.42\n";

fn minimum_image_distance(box_length: f64, a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let mut d = a - b;
    for k in 0..3 {
        d[k] -= box_length * (d[k] / box_length).round();
    }
    d.norm_squared()
}

fn lennard_jones(r2: f64) -> f64 {
    let inv_r2 = 1.0 / r2;
    let inv_r6 = inv_r2 * inv_r2 * inv_r2;
    4.0 * (inv_r6 * inv_r6 - inv_r6)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = IntegratorConfig::from_yaml_str(CONFIG).wrap_err("Failed to parse integrator config")?;
    let integrator = Integrator::new(lennard_jones, config)?;
    info!("{}", integrator);

    // fcc lattice in reduced units
    let n_cells = 3;
    let a = 1.7;
    let box_length = n_cells as f64 * a;
    let basis = [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(0.5, 0.5, 0.0),
        Vector3::new(0.5, 0.0, 0.5),
        Vector3::new(0.0, 0.5, 0.5),
    ];

    let mut positions = Vec::new();
    for i in 0..n_cells {
        for j in 0..n_cells {
            for k in 0..n_cells {
                let origin = Vector3::new(i as f64, j as f64, k as f64) * a;
                for &b in &basis {
                    positions.push(origin + b * a);
                }
            }
        }
    }

    let geometry = |p: &Vector3<f64>, q: &Vector3<f64>| minimum_image_distance(box_length, p, q);

    let temperature = 1.2;
    let beta = 1.0 / temperature;
    let mut max_displacement = 0.3;
    let mut counters = TrialCounters::new();
    let mut rng = StdRng::seed_from_u64(2024);

    let n_atoms = positions.len();
    let sweeps = 200;
    let retune_interval = 10 * n_atoms;

    info!("N = {}, L = {:.3}, T = {}", n_atoms, box_length, temperature);

    for step in 1..=sweeps * n_atoms {
        let idx = rng.gen_range(0..n_atoms);
        let old_position = positions[idx];
        let old_energy = integrator.particle_energy(&positions, idx, &geometry)?;

        let displacement = Vector3::new(
            max_displacement * (2.0 * rng.gen::<f64>() - 1.0),
            max_displacement * (2.0 * rng.gen::<f64>() - 1.0),
            max_displacement * (2.0 * rng.gen::<f64>() - 1.0),
        );
        positions[idx] = (old_position + displacement).map(|x| x.rem_euclid(box_length));
        let new_energy = integrator.particle_energy(&positions, idx, &geometry)?;

        let accepted = integrator.is_accepted(new_energy - old_energy, beta, &mut rng)?;
        if !accepted {
            positions[idx] = old_position;
        }
        counters.record(accepted);

        if step % retune_interval == 0 {
            let rate = counters.acceptance_rate().unwrap_or(0.0);
            max_displacement = integrator.retune(max_displacement, &mut counters)?;

            // Each pair is counted twice when summing per-particle energies
            let mut total = 0.0;
            for i in 0..n_atoms {
                total += integrator.particle_energy(&positions, i, &geometry)?;
            }
            info!(
                "Sweep {}: acceptance={:.3}, max_displacement={:.4}, U/N={:.4}",
                step / n_atoms,
                rate,
                max_displacement,
                0.5 * total / n_atoms as f64
            );
        }
    }

    Ok(())
}
