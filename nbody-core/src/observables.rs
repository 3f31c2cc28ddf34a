//! Whole-system measurements
//!
//! These only observe a [`Simulation`]; the integrator never corrects
//! for drift in any of them.

use crate::simulation::Simulation;
use glam::DVec3;

/// A named scalar reading, printed as `name = value`
#[derive(Debug, Clone)]
pub struct Observable {
    pub name: String,
    pub value: f64,
}

impl Observable {
    fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

pub fn total_mass(sim: &Simulation) -> f64 {
    sim.bodies().iter().map(|b| b.mass()).sum()
}

/// Mass-weighted mean position, or the origin for an empty system
pub fn center_of_mass(sim: &Simulation) -> DVec3 {
    let mass = total_mass(sim);
    if mass == 0.0 {
        return DVec3::ZERO;
    }
    let weighted = sim
        .bodies()
        .iter()
        .fold(DVec3::ZERO, |acc, b| acc + b.position() * b.mass());
    weighted / mass
}

pub fn total_momentum(sim: &Simulation) -> DVec3 {
    sim.bodies()
        .iter()
        .fold(DVec3::ZERO, |acc, b| acc + b.momentum())
}

pub fn kinetic_energy(sim: &Simulation) -> f64 {
    sim.bodies().iter().map(|b| b.kinetic_energy()).sum()
}

/// Pairwise potential -m_i m_j / r with G = 1. Coincident pairs are skipped.
pub fn potential_energy(sim: &Simulation) -> f64 {
    let bodies = sim.bodies();
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r = a.position().distance(b.position());
            if r > 0.0 {
                energy -= a.mass() * b.mass() / r;
            }
        }
    }
    energy
}

pub fn total_energy(sim: &Simulation) -> f64 {
    kinetic_energy(sim) + potential_energy(sim)
}

/// Every reading, in a fixed order
pub fn evaluate(sim: &Simulation) -> Vec<Observable> {
    let com = center_of_mass(sim);
    let momentum = total_momentum(sim);
    vec![
        Observable::new("elapsed_time", sim.elapsed_time()),
        Observable::new("bodies", sim.len() as f64),
        Observable::new("total_mass", total_mass(sim)),
        Observable::new("com_x", com.x),
        Observable::new("com_y", com.y),
        Observable::new("com_z", com.z),
        Observable::new("momentum", momentum.length()),
        Observable::new("kinetic_energy", kinetic_energy(sim)),
        Observable::new("potential_energy", potential_energy(sim)),
        Observable::new("total_energy", total_energy(sim)),
    ]
}
