use std::fmt;

use nalgebra::Vector3;
use rand::Rng;
use tracing::{debug, trace};

use crate::collaborators::{MinimumImage, PairPotential};
use crate::config::IntegratorConfig;
use crate::error::McError;

/// Scale applied to the trial displacement when too few moves are accepted
const SHRINK_FACTOR: f64 = 0.8;
/// Scale applied to the trial displacement when too many moves are accepted
const GROW_FACTOR: f64 = 1.2;

/// Metropolis move evaluator for particles interacting through a pair potential
///
/// The integrator holds only fixed parameters. Positions, the trial
/// displacement and the trial counters all belong to the driving simulation
/// loop, which calls the three operations:
/// 1. [`particle_energy`](Self::particle_energy): energy of one particle with the rest
/// 2. [`is_accepted`](Self::is_accepted): Metropolis criterion for an energy change
/// 3. [`adjust_displacement`](Self::adjust_displacement): retune the trial displacement
pub struct Integrator<P> {
    potential: P,
    config: IntegratorConfig,
}

/// Result of a displacement retune: new step size and zeroed counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementUpdate {
    pub max_displacement: f64,
    pub n_trials: u64,
    pub n_accept: u64,
}

impl From<DisplacementUpdate> for (f64, u64, u64) {
    fn from(update: DisplacementUpdate) -> Self {
        (update.max_displacement, update.n_trials, update.n_accept)
    }
}

/// Attempted/accepted move counters kept by a driver between retunes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialCounters {
    pub n_trials: u64,
    pub n_accept: u64,
}

impl TrialCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one attempted move
    pub fn record(&mut self, accepted: bool) {
        self.n_trials += 1;
        if accepted {
            self.n_accept += 1;
        }
    }

    /// Fraction of accepted moves, `None` before the first trial
    pub fn acceptance_rate(&self) -> Option<f64> {
        if self.n_trials == 0 {
            None
        } else {
            Some(self.n_accept as f64 / self.n_trials as f64)
        }
    }
}

impl<P: PairPotential> Integrator<P> {
    /// Create an integrator around `potential`, rejecting a cutoff that is not
    /// strictly positive.
    ///
    /// The acceptance band is expected to satisfy
    /// `0 < low_acceptance < high_acceptance < 1`; it is not checked here.
    pub fn new(potential: P, config: IntegratorConfig) -> Result<Self, McError> {
        config.validate()?;
        debug!(
            cutoff = config.cutoff,
            low_acceptance = config.low_acceptance,
            high_acceptance = config.high_acceptance,
            "Creating Metropolis integrator"
        );
        Ok(Self { potential, config })
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Compute the potential energy of particle `i_particle` with every other
    /// particle closer than the cutoff.
    ///
    /// Distances are compared squared; pairs are visited in ascending index
    /// order so the sum is reproducible. Collaborator errors are returned
    /// unchanged as the `source` of the resulting [`McError`].
    pub fn particle_energy<G>(
        &self,
        coordinates: &[Vector3<f64>],
        i_particle: usize,
        geometry: &G,
    ) -> Result<f64, McError>
    where
        G: MinimumImage + ?Sized,
    {
        let i_position = coordinates
            .get(i_particle)
            .ok_or(McError::ParticleIndexOutOfRange {
                index: i_particle,
                len: coordinates.len(),
            })?;

        let cutoff2 = self.config.cutoff * self.config.cutoff;

        let mut e_total = 0.0;
        for (j_particle, j_position) in coordinates.iter().enumerate() {
            if j_particle == i_particle {
                continue;
            }

            let rij2 = geometry
                .minimum_image_distance(i_position, j_position)
                .map_err(|source| McError::Geometry {
                    i: i_particle,
                    j: j_particle,
                    source,
                })?;

            if rij2 < cutoff2 {
                e_total += self
                    .potential
                    .pair_energy(rij2)
                    .map_err(|source| McError::Potential { r2: rij2, source })?;
            }
        }

        Ok(e_total)
    }

    /// Accept or reject a move with energy change `delta_e` at inverse
    /// temperature `beta` (Metropolis criterion).
    ///
    /// Energy-lowering moves are always accepted without touching `rng`.
    /// Otherwise exactly one uniform draw `u` in `[0, 1)` is taken and the move
    /// is accepted when `u < exp(-beta * delta_e)`.
    pub fn is_accepted<R>(&self, delta_e: f64, beta: f64, rng: &mut R) -> Result<bool, McError>
    where
        R: Rng + ?Sized,
    {
        if !beta.is_finite() || beta <= 0.0 {
            return Err(McError::InvalidBeta { beta });
        }

        if delta_e < 0.0 {
            trace!(delta_e, "Downhill move accepted");
            return Ok(true);
        }

        let random_number: f64 = rng.gen();
        let p_acc = (-beta * delta_e).exp();
        let accept = random_number < p_acc;
        trace!(delta_e, beta, p_acc, random_number, accept, "Metropolis test");

        Ok(accept)
    }

    /// Rescale the maximum trial displacement from the acceptance rate
    /// `n_accept / n_trials` and reset both counters.
    ///
    /// Below `low_acceptance` the step is multiplied by 0.8, above
    /// `high_acceptance` by 1.2, and inside the band it is left alone. The
    /// returned counters are zero in every case. Zero trials is an error.
    pub fn adjust_displacement(
        &self,
        max_displacement: f64,
        n_trials: u64,
        n_accept: u64,
    ) -> Result<DisplacementUpdate, McError> {
        if n_trials == 0 {
            return Err(McError::ZeroTrials);
        }

        let acc_rate = n_accept as f64 / n_trials as f64;

        let new_displacement = if acc_rate < self.config.low_acceptance {
            max_displacement * SHRINK_FACTOR
        } else if acc_rate > self.config.high_acceptance {
            max_displacement * GROW_FACTOR
        } else {
            max_displacement
        };

        debug!(
            acc_rate,
            old = max_displacement,
            new = new_displacement,
            "Adjusted maximum displacement"
        );

        Ok(DisplacementUpdate {
            max_displacement: new_displacement,
            n_trials: 0,
            n_accept: 0,
        })
    }

    /// [`adjust_displacement`](Self::adjust_displacement) driven by a
    /// [`TrialCounters`], which is zeroed on success.
    pub fn retune(
        &self,
        max_displacement: f64,
        counters: &mut TrialCounters,
    ) -> Result<f64, McError> {
        let update =
            self.adjust_displacement(max_displacement, counters.n_trials, counters.n_accept)?;
        counters.n_trials = update.n_trials;
        counters.n_accept = update.n_accept;
        Ok(update.max_displacement)
    }
}

impl<P> fmt::Display for Integrator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Integrator: cutoff={}, acceptance band=[{}, {}]",
            self.config.cutoff, self.config.low_acceptance, self.config.high_acceptance
        )
    }
}

impl<P> fmt::Debug for Integrator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Integrator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
