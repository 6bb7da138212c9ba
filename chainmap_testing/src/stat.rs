//! Empirical checks of how evenly a hash function spreads keys over buckets.
use ndarray::prelude::*;
use ndarray::{ScalarOperand, Zip};
use num_traits::{Float, NumAssignOps};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// A result of a Chi-square test.
#[derive(Debug)]
pub struct Chi2Statistic<V> {
    pub chi2: V,
    pub dof: usize,
    pub p_value: V,
}

/// Calculates the chi-square statistic.
pub fn chi2<V>(observed: &[V], expected: &[V], dof: Option<usize>) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64>,
{
    debug_assert_eq!(observed.len(), expected.len(), "Dimensions must match");
    let chi2: V = Zip::from(observed)
        .and(expected)
        .fold(0.0.into(), |acc, &obs, &exp| {
            let diff = obs - exp;
            acc + diff.powf(2.0.into()) / exp
        });

    let dof = dof.unwrap_or(observed.len() - 1);
    let dist = ChiSquared::new(dof as f64).expect("Degrees of freedom must be positive");
    let p_value = (1.0 - dist.cdf(chi2.to_f64().unwrap_or(f64::INFINITY))).into();

    Chi2Statistic { chi2, dof, p_value }
}

/// Performs a Chi-square uniformity test.
pub fn chi2_uniformity<'a, V, A>(observed: A) -> Chi2Statistic<V>
where
    V: Float + NumAssignOps + From<f64> + ScalarOperand,
    A: AsArray<'a, V>,
{
    let observed: ArrayView1<V> = observed.into();
    let total_sum = observed.sum();
    let num_cells = observed.len();
    let expected_value = total_sum / (num_cells as f64).into();

    let expected = Array1::<V>::from_elem(observed.dim(), expected_value);
    let observed = observed.to_owned();

    chi2(
        observed.as_slice().expect("Owned arrays are contiguous"),
        expected.as_slice().expect("Owned arrays are contiguous"),
        None,
    )
}

/// Tests whether `index_of` spreads `keys` uniformly over `num_buckets` buckets.
///
/// Each key must be distinct, otherwise the test measures the key distribution instead.
pub fn bucket_uniformity<K, F>(keys: &[K], num_buckets: usize, index_of: F) -> Chi2Statistic<f64>
where
    F: Fn(&K) -> usize,
{
    debug_assert!(num_buckets > 1, "Need at least 2 buckets");

    let mut counts = Array1::<f64>::zeros(num_buckets);
    for key in keys {
        let bucket_idx = index_of(key);
        assert!(
            bucket_idx < num_buckets,
            "Index {} is out of range {}",
            bucket_idx,
            num_buckets
        );
        counts[bucket_idx] += 1.0;
    }
    chi2_uniformity(&counts)
}

/// An aggregation of p-values from multiple runs of a statistical test.
#[derive(Debug)]
pub struct PValueAggregation {
    pub outcome: bool,
    pub alpha: f64,
    pub expected_passes: f64,
    pub num_passes: usize,
    pub uniformity: Chi2Statistic<f64>,
}

/// Aggregates test results from multiple runs of a statistical test.
///
/// # Notes
///
/// Based on [Bassham et al. (2010)] which describes approaches for statistically
/// testing PRNGs and in particular - approaches to aggregation of the test results
/// (see section 4.2). The p-values are binned into 10 cells for the uniformity part.
///
/// [Bassham et al. (2010)]: https://doi.org/10.6028/NIST.SP.800-22r1a
pub fn aggregate_p_values(p_values: &[f64], alpha: f64) -> PValueAggregation {
    let num_trials = p_values.len() as f64;
    let pass_rate = 1.0 - alpha;
    let confidence = 3.0 * ((pass_rate * (1.0 - pass_rate)) / num_trials).sqrt();
    let expected_passes = num_trials * (pass_rate - confidence);
    let num_passes = p_values.iter().filter(|&&p| p >= alpha).count();

    let mut bins = Array1::<f64>::zeros(10);
    for &p in p_values {
        bins[((p * 10.0) as usize).min(9)] += 1.0;
    }
    let uniformity = chi2_uniformity(&bins);

    let outcome = num_passes as f64 >= expected_passes && uniformity.p_value > alpha;

    PValueAggregation {
        outcome,
        alpha,
        expected_passes,
        num_passes,
        uniformity,
    }
}
