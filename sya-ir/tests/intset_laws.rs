use proptest::prelude::*;
use sya_ir::IntervalSet;

fn interval_set() -> impl Strategy<Value = IntervalSet> {
    prop::collection::vec((-200i128..200, 1i128..40), 0..6).prop_map(|pairs| {
        IntervalSet::new(pairs.into_iter().map(|(low, len)| (low, low + len)))
            .expect("lengths are positive")
    })
}

fn is_normalized(set: &IntervalSet) -> bool {
    set.elems().iter().all(|&(low, high)| low < high)
        && set.elems().windows(2).all(|w| w[0].1 < w[1].0)
}

proptest! {
    #[test]
    fn union_is_commutative(a in interval_set(), b in interval_set()) {
        prop_assert_eq!(&a | &b, &b | &a);
    }

    #[test]
    fn union_is_associative(a in interval_set(), b in interval_set(), c in interval_set()) {
        prop_assert_eq!(&(&a | &b) | &c, &a | &(&b | &c));
    }

    #[test]
    fn union_is_idempotent(a in interval_set()) {
        prop_assert_eq!(&a | &a, a);
    }

    #[test]
    fn intersection_is_commutative(a in interval_set(), b in interval_set()) {
        prop_assert_eq!(&a & &b, &b & &a);
    }

    #[test]
    fn intersection_with_empty_is_empty(a in interval_set()) {
        prop_assert!((&a & &IntervalSet::empty()).is_empty());
    }

    #[test]
    fn results_stay_normalized(a in interval_set(), b in interval_set()) {
        prop_assert!(is_normalized(&a));
        prop_assert!(is_normalized(&(&a | &b)));
        prop_assert!(is_normalized(&(&a & &b)));
    }

    #[test]
    fn membership_agrees_with_set_algebra(a in interval_set(), b in interval_set(), v in -250i128..250) {
        prop_assert_eq!((&a | &b).contains(v), a.contains(v) || b.contains(v));
        prop_assert_eq!((&a & &b).contains(v), a.contains(v) && b.contains(v));
    }
}

#[test]
fn construction_order_does_not_matter() {
    let a = IntervalSet::new([(0, 3), (3, 6), (10, 12)]).unwrap();
    let b = IntervalSet::new([(10, 12), (2, 6), (0, 3)]).unwrap();
    assert_eq!(a, b);
}
