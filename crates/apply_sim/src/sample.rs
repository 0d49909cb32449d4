//! Sampling from finite populations.

use rand::distributions::WeightedIndex;
use rand::seq::index;
use rand::Rng;
use rand_distr::Distribution;

use crate::error::SimError;
use crate::prng::SimRng;

impl SimRng {
    /// Draws `size` items from `population`.
    ///
    /// With `replace` every draw sees the whole population; without it each
    /// item is drawn at most once. `prob` gives relative, unnormalised
    /// weights; weighted draws without replacement are taken one at a time,
    /// removing each chosen item before the next draw.
    ///
    /// # Errors
    /// - `SimError::SampleTooLarge` when `size` exceeds the population (or
    ///   its positively weighted part) without replacement
    /// - `SimError::InvalidWeights` when `prob` has the wrong length, holds a
    ///   negative or non-finite weight, or sums to zero
    ///
    /// # Examples
    /// ```
    /// use apply_sim::SimRng;
    ///
    /// let mut rng = SimRng::from_seed(7);
    /// let drawn = rng.sample(&["a", "b", "c"], 3, false, None).unwrap();
    /// let mut sorted = drawn.clone();
    /// sorted.sort();
    /// assert_eq!(sorted, vec!["a", "b", "c"]);
    /// ```
    pub fn sample<T: Clone>(
        &mut self,
        population: &[T],
        size: usize,
        replace: bool,
        prob: Option<&[f64]>,
    ) -> Result<Vec<T>, SimError> {
        let picks = match prob {
            None => self.sample_indices(population.len(), size, replace)?,
            Some(weights) => {
                validate_weights(weights, population.len())?;
                if replace {
                    self.weighted_with_replacement(weights, size)?
                } else {
                    self.weighted_without_replacement(weights, size)?
                }
            }
        };
        Ok(picks.into_iter().map(|i| population[i].clone()).collect())
    }

    /// Random ordering of `0..n`.
    pub fn permutation(&mut self, n: usize) -> Vec<usize> {
        index::sample(self.inner_mut(), n, n).into_vec()
    }

    fn sample_indices(
        &mut self,
        population: usize,
        size: usize,
        replace: bool,
    ) -> Result<Vec<usize>, SimError> {
        if replace {
            if size > 0 && population == 0 {
                return Err(SimError::SampleTooLarge { size, population });
            }
            let rng = self.inner_mut();
            return Ok((0..size).map(|_| rng.gen_range(0..population)).collect());
        }
        if size > population {
            return Err(SimError::SampleTooLarge { size, population });
        }
        Ok(index::sample(self.inner_mut(), population, size).into_vec())
    }

    fn weighted_with_replacement(
        &mut self,
        weights: &[f64],
        size: usize,
    ) -> Result<Vec<usize>, SimError> {
        if size == 0 {
            return Ok(Vec::new());
        }
        let dist = WeightedIndex::<f64>::new(weights)
            .map_err(|e| SimError::InvalidWeights(e.to_string()))?;
        let rng = self.inner_mut();
        Ok((0..size).map(|_| dist.sample(&mut *rng)).collect())
    }

    fn weighted_without_replacement(
        &mut self,
        weights: &[f64],
        size: usize,
    ) -> Result<Vec<usize>, SimError> {
        let positive = weights.iter().filter(|&&w| w > 0.0).count();
        if size > positive {
            return Err(SimError::SampleTooLarge {
                size,
                population: positive,
            });
        }

        let mut remaining: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
        let mut picks = Vec::with_capacity(size);
        for _ in 0..size {
            let dist = WeightedIndex::<f64>::new(remaining.iter().map(|&(_, w)| w))
                .map_err(|e| SimError::InvalidWeights(e.to_string()))?;
            let slot = dist.sample(self.inner_mut());
            picks.push(remaining.remove(slot).0);
        }
        Ok(picks)
    }
}

fn validate_weights(weights: &[f64], population: usize) -> Result<(), SimError> {
    if weights.len() != population {
        return Err(SimError::InvalidWeights(format!(
            "expected {} weights, got {}",
            population,
            weights.len()
        )));
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(SimError::InvalidWeights(format!(
            "weight {} is negative or not finite",
            w
        )));
    }
    if population > 0 && weights.iter().all(|&w| w == 0.0) {
        return Err(SimError::InvalidWeights("all weights are zero".to_string()));
    }
    Ok(())
}
