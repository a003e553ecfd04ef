use std::f64::consts::{PI, TAU};

use crystal_genesis::crystal::genes;
use crystal_genesis::geometry::{canonical_angles, cartesian_to_spherical, spherical_to_cartesian};
use crystal_genesis::{Genotype, GENOTYPE_LEN};
use proptest::prelude::*;

prop_compose! {
    fn arb_genotype()(genes in prop::array::uniform11(any::<u32>())) -> Genotype {
        Genotype::new(genes)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_sub_crystal_count_in_range(genotype in arb_genotype()) {
        let count = genes::sub_crystal_count(&genotype);
        prop_assert!((1..=genes::MAX_SUB_CRYSTALS).contains(&count), "count {}", count);
    }

    #[test]
    fn test_cut_count_in_range(genotype in arb_genotype(), n in 0usize..genes::MAX_SUB_CRYSTALS) {
        prop_assert!(genes::cut_count(&genotype, n) < genes::MAX_CUTS);
    }

    #[test]
    fn test_cut_gene_index_in_cut_block(i in 0usize..10_000, n in 0usize..10_000, k in 0usize..10_000) {
        let index = genes::cut_gene_index(i, n, k);
        prop_assert!((2..=7).contains(&index), "index {}", index);
    }

    #[test]
    fn test_shape_ranges(genotype in arb_genotype(), n in 0usize..genes::MAX_SUB_CRYSTALS) {
        let scale = genes::scale(&genotype, n);
        for s in scale.to_array() {
            prop_assert!((1.0..3.0).contains(&s), "scale {}", s);
        }

        let placement = genes::placement(&genotype, n);
        prop_assert!((0.0..TAU).contains(&placement.azimuth));
        prop_assert!((0.0..TAU).contains(&placement.polar));
        prop_assert!((1..=3).contains(&placement.radius));

        let distance = placement.displacement().length();
        prop_assert!((distance - f64::from(placement.radius)).abs() < 1e-9);
    }

    #[test]
    fn test_cut_anchor_ranges(genotype in arb_genotype(), i in 0usize..64, n in 0usize..genes::MAX_SUB_CRYSTALS) {
        let anchor = genes::cut_anchor(&genotype, i, n);
        prop_assert!((0.0..TAU).contains(&anchor.azimuth));
        prop_assert!((0.0..TAU).contains(&anchor.polar));
        prop_assert!((0.0..genes::MAX_CUT_RADIUS).contains(&anchor.radius));
        prop_assert!((anchor.point().length() - anchor.radius).abs() < 1e-12);
    }

    #[test]
    fn test_spherical_round_trip(
        azimuth in 0.0f64..TAU,
        polar in 0.01f64..(TAU - 0.01),
        radius in 0.01f64..10.0,
    ) {
        // Skip directions too close to the poles, where the azimuth is not recoverable
        prop_assume!((polar - PI).abs() > 0.01);

        let point = spherical_to_cartesian(azimuth, polar, radius);
        let (a, p, r) = cartesian_to_spherical(point);
        let (expected_a, expected_p) = canonical_angles(azimuth, polar);

        let azimuth_error = (a - expected_a).abs().min(TAU - (a - expected_a).abs());
        prop_assert!(azimuth_error < 1e-9, "azimuth {} vs {}", a, expected_a);
        prop_assert!((p - expected_p).abs() < 1e-9, "polar {} vs {}", p, expected_p);
        prop_assert!((r - radius).abs() < 1e-9);
        prop_assert!((spherical_to_cartesian(a, p, r) - point).length() < 1e-9);
    }

    #[test]
    fn test_genotype_text_round_trip(genotype in arb_genotype()) {
        let text = genotype.to_string();
        prop_assert!(text.starts_with('#'));
        prop_assert_eq!(text.split_whitespace().count(), GENOTYPE_LEN + 1);

        let parsed: Genotype = text.parse().unwrap();
        prop_assert_eq!(parsed, genotype);
    }
}
