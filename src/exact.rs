//! Exact probability that a package of `n` bears covers all `m` flavors.
//!
//! Two independent derivations are provided. `surjection_probability` counts onto
//! maps through Stirling numbers of the second kind. `partition_probability` gives
//! each flavor one bear and spreads the remaining `n - m` bears according to the
//! integer partitions of `n - m`, weighting every flavor-count vector by its
//! multinomial coefficient.

use itertools::Itertools;
use num::rational::Ratio;
use num::{BigUint, One, ToPrimitive, Zero};

pub fn factorial(k: usize) -> BigUint {
    (1..=k).fold(BigUint::one(), |acc, i| acc * i)
}

/// S(n, k): ways to split `n` labelled items into `k` non-empty unlabelled blocks.
pub fn stirling_second_kind(n: usize, k: usize) -> BigUint {
    // row[j] holds S(i, j) for the current i
    let mut row = vec![BigUint::zero(); k + 1];
    row[0] = BigUint::one();
    for i in 1..=n {
        for j in (1..=k.min(i)).rev() {
            row[j] = &row[j] * j + &row[j - 1];
        }
        row[0] = BigUint::zero();
    }
    row[k].clone()
}

/// all partitions of `k`, parts in non-increasing order. `k == 0` has the single empty partition.
pub fn integer_partitions(k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    visit_partitions(k, k, |parts| out.push(parts.to_vec()));
    out
}

/// calls `visit` once per partition of `k` into at most `max_parts` parts.
/// branches that cannot finish within `max_parts` are never entered.
pub fn visit_partitions<F: FnMut(&[usize])>(k: usize, max_parts: usize, mut visit: F) {
    let mut current = Vec::with_capacity(max_parts.min(k));
    partitions_into(k, k, max_parts, &mut current, &mut visit);
}

fn partitions_into<F: FnMut(&[usize])>(
    remaining: usize,
    max_part: usize,
    max_parts: usize,
    current: &mut Vec<usize>,
    visit: &mut F,
) {
    if remaining == 0 {
        visit(current.as_slice());
        return;
    }
    let slots = max_parts - current.len();
    for part in (1..=remaining.min(max_part)).rev() {
        // parts only shrink from here on
        if part * slots < remaining {
            break;
        }
        current.push(part);
        partitions_into(remaining - part, part, max_parts, current, visit);
        current.pop();
    }
}

fn all_outcomes(n: usize, m: usize) -> BigUint {
    num::pow(BigUint::from(m), n)
}

fn zero() -> Ratio<BigUint> {
    Ratio::new(BigUint::zero(), BigUint::one())
}

pub fn surjection_probability(n: usize, m: usize) -> Ratio<BigUint> {
    assert!(m > 0, "category_count must be at least 1");
    if n < m {
        return zero();
    }
    Ratio::new(factorial(m) * stirling_second_kind(n, m), all_outcomes(n, m))
}

pub fn partition_probability(n: usize, m: usize) -> Ratio<BigUint> {
    assert!(m > 0, "category_count must be at least 1");
    if n < m {
        return zero();
    }
    let extra = n - m;
    let m_factorial = factorial(m);
    let n_factorial = factorial(n);

    let mut favorable = BigUint::zero();
    visit_partitions(extra, m, |lambda| {
        // flavors that got no extra bears count as a part of size 0
        let untouched = m - lambda.len();
        let multiplicities = lambda.iter().counts();
        let symmetry = multiplicities
            .values()
            .fold(factorial(untouched), |acc, &c| acc * factorial(c));
        let arrangements = &m_factorial / symmetry;

        let denominator = lambda
            .iter()
            .fold(BigUint::one(), |acc, &part| acc * factorial(part + 1));
        let multinomial = &n_factorial / denominator;

        favorable += arrangements * multinomial;
    });
    Ratio::new(favorable, all_outcomes(n, m))
}

pub fn to_f64(p: &Ratio<BigUint>) -> f64 {
    p.to_f64().unwrap_or(f64::NAN)
}

pub fn exact_probability(n: usize, m: usize) -> f64 {
    to_f64(&surjection_probability(n, m))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partitions() {
        assert_eq!(integer_partitions(0), vec![Vec::<usize>::new()]);
        assert_eq!(
            integer_partitions(4),
            vec![
                vec![4],
                vec![3, 1],
                vec![2, 2],
                vec![2, 1, 1],
                vec![1, 1, 1, 1]
            ]
        );
        let counts = (0..12)
            .map(|k| integer_partitions(k).len())
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 1, 2, 3, 5, 7, 11, 15, 22, 30, 42, 56]);
    }

    #[test]
    fn test_bounded_partitions() {
        let mut seen = Vec::new();
        visit_partitions(5, 2, |parts| seen.push(parts.to_vec()));
        assert_eq!(seen, vec![vec![5], vec![4, 1], vec![3, 2]]);

        // partitions of 70 into at most 2 parts: 70 and (70 - j, j) for j in 1..=35
        let mut count = 0;
        visit_partitions(70, 2, |parts| {
            assert!(parts.len() <= 2);
            count += 1;
        });
        assert_eq!(count, 36);

        let mut zero = 0;
        visit_partitions(0, 3, |parts| {
            assert!(parts.is_empty());
            zero += 1;
        });
        assert_eq!(zero, 1);
    }

    #[test]
    fn test_many_extra_bears_few_flavors() {
        let now = std::time::Instant::now();
        assert_eq!(partition_probability(72, 2), surjection_probability(72, 2));
        assert_eq!(partition_probability(60, 6), surjection_probability(60, 6));
        assert!(now.elapsed().as_secs() < 5, "took {:?}", now.elapsed());
    }

    #[test]
    fn test_stirling() {
        assert_eq!(stirling_second_kind(0, 0), BigUint::one());
        assert_eq!(stirling_second_kind(5, 0), BigUint::zero());
        assert_eq!(stirling_second_kind(3, 5), BigUint::zero());
        assert_eq!(stirling_second_kind(4, 2), BigUint::from(7u32));
        assert_eq!(stirling_second_kind(10, 5), BigUint::from(42525u32));
    }

    #[test]
    fn test_full_package_matches_factorial_ratio() {
        for m in 1..10 {
            let expected = Ratio::new(factorial(m), all_outcomes(m, m));
            assert_eq!(surjection_probability(m, m), expected);
            assert_eq!(partition_probability(m, m), expected);
        }
        assert!((exact_probability(12, 12) - 0.0000537).abs() < 1e-7);
        assert_eq!(exact_probability(1, 1), 1.0);
    }

    #[test]
    fn test_methods_agree() {
        for m in 1..9 {
            for n in 0..20 {
                assert_eq!(
                    surjection_probability(n, m),
                    partition_probability(n, m),
                    "n={}, m={}",
                    n,
                    m
                );
            }
        }
    }

    #[test]
    fn test_twelve_flavors() {
        let known = [
            (12, 0.0000537),
            (13, 0.0003492),
            (14, 0.0012562),
            (15, 0.0033101),
            (25, 0.1819),
        ];
        let mut last = 0.0;
        for &(n, expected) in known.iter() {
            let p = exact_probability(n, 12);
            assert!((p - expected).abs() < 1e-6 + expected * 1e-3, "n={} p={}", n, p);
            assert!(p > last);
            last = p;
        }
    }

    #[test]
    fn test_small_package() {
        assert_eq!(exact_probability(3, 4), 0.0);
        assert_eq!(exact_probability(0, 1), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_no_flavors() {
        surjection_probability(3, 0);
    }
}
