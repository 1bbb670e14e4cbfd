use std::collections::HashSet;

use rand::distributions::{Distribution, Uniform};
use rand::prelude::*;

/// draws `package_size` category indices uniformly from `0..category_count`.
pub fn generate_package_with<R: Rng + ?Sized>(
    rng: &mut R,
    package_size: usize,
    category_count: usize,
) -> Vec<usize> {
    assert!(category_count > 0, "category_count must be at least 1");
    let flavor = Uniform::from(0..category_count);
    flavor.sample_iter(rng).take(package_size).collect()
}

pub fn generate_package(package_size: usize, category_count: usize) -> Vec<usize> {
    generate_package_with(&mut thread_rng(), package_size, category_count)
}

pub fn count_distinct(package: &[usize]) -> usize {
    package.iter().collect::<HashSet<_>>().len()
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_count_distinct() {
        assert_eq!(count_distinct(&[]), 0);
        assert_eq!(count_distinct(&[3, 3, 3]), 1);
        assert_eq!(count_distinct(&[0, 1, 2, 1, 0]), 3);

        let package = vec![4, 0, 4, 2, 7];
        assert_eq!(count_distinct(&package), count_distinct(&package));
    }

    #[test]
    fn test_seeded_packages_repeat() {
        let mut a = StdRng::seed_from_u64(12);
        let mut b = StdRng::seed_from_u64(12);
        for _ in 0..10 {
            assert_eq!(
                generate_package_with(&mut a, 20, 12),
                generate_package_with(&mut b, 20, 12)
            );
        }
    }

    #[test]
    fn test_single_flavor() {
        let package = generate_package(30, 1);
        assert!(package.iter().all(|&e| e == 0));
        assert_eq!(count_distinct(&package), 1);
    }

    #[test]
    fn test_all_flavors_show_up() {
        // with enough draws every category turns up
        let mut rng = StdRng::seed_from_u64(0);
        let package = generate_package_with(&mut rng, 10_000, 12);
        assert_eq!(count_distinct(&package), 12);
    }

    #[test]
    #[should_panic]
    fn test_zero_categories() {
        generate_package(5, 0);
    }

    proptest! {
        #[test]
        fn package_in_range(seed in any::<u64>(), n in 0usize..64, m in 1usize..32) {
            let mut rng = StdRng::seed_from_u64(seed);
            let package = generate_package_with(&mut rng, n, m);
            prop_assert_eq!(package.len(), n);
            prop_assert!(package.iter().all(|&e| e < m));
            prop_assert!(count_distinct(&package) <= m.min(n));
        }
    }
}
