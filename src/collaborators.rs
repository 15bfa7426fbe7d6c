use nalgebra::Vector3;

use crate::error::CollaboratorError;

/// Pairwise interaction energy as a function of the squared separation.
///
/// Any `Fn(f64) -> f64` is a potential. Implement the trait directly when the
/// potential can fail (e.g. a singularity at `r2 == 0`).
pub trait PairPotential {
    fn pair_energy(&self, r2: f64) -> Result<f64, CollaboratorError>;
}

impl<F> PairPotential for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn pair_energy(&self, r2: f64) -> Result<f64, CollaboratorError> {
        Ok(self(r2))
    }
}

/// Minimum-image squared distance between two positions under the box's
/// periodic boundary convention.
pub trait MinimumImage {
    fn minimum_image_distance(
        &self,
        a: &Vector3<f64>,
        b: &Vector3<f64>,
    ) -> Result<f64, CollaboratorError>;
}

impl<F> MinimumImage for F
where
    F: Fn(&Vector3<f64>, &Vector3<f64>) -> f64,
{
    #[inline]
    fn minimum_image_distance(
        &self,
        a: &Vector3<f64>,
        b: &Vector3<f64>,
    ) -> Result<f64, CollaboratorError> {
        Ok(self(a, b))
    }
}
