use fever_baseline::domain::LabelDistribution;
use proptest::prelude::*;

fn logit_or_infinity() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -1.0e6f64..1.0e6,
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn argmax_is_first_index_of_maximum(logits in prop::collection::vec(-1.0e6f64..1.0e6, 1..32)) {
        let index = LabelDistribution::new(logits.clone()).argmax().unwrap();
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(logits[index], max);
        prop_assert!(logits[..index].iter().all(|&v| v < max));
    }

    #[test]
    fn argmax_with_forced_ties_prefers_first(
        prefix in prop::collection::vec(-10.0f64..0.0, 0..8),
        middle in prop::collection::vec(-10.0f64..0.0, 0..8),
        top in 1.0f64..10.0,
    ) {
        let mut logits = prefix.clone();
        logits.push(top);
        logits.extend(middle);
        logits.push(top);

        let index = LabelDistribution::new(logits).argmax().unwrap();
        prop_assert_eq!(index, prefix.len());
    }

    #[test]
    fn argmax_handles_infinite_logits(logits in prop::collection::vec(logit_or_infinity(), 1..16)) {
        let index = LabelDistribution::new(logits.clone()).argmax().unwrap();
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(logits[index], max);
        prop_assert!(logits[..index].iter().all(|&v| v < max));
    }
}
