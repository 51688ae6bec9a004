use index_filter::IndexFilter;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Capacities around the word boundaries
fn arb_capacity() -> impl Strategy<Value = usize> {
    prop_oneof![
        Just(0usize),
        Just(1),
        Just(63),
        Just(64),
        Just(65),
        Just(127),
        Just(128),
        Just(129),
        0usize..400,
    ]
}

// A capacity together with positions valid for it
prop_compose! {
    fn arb_positions()
        (capacity in arb_capacity())
        (positions in prop::collection::vec(0..capacity.max(1), 0..150), capacity in Just(capacity))
        -> (usize, Vec<usize>)
    {
        let positions = if capacity == 0 { Vec::new() } else { positions };
        (capacity, positions)
    }
}

// Two position sets sharing one capacity
prop_compose! {
    fn arb_pair()
        (capacity in arb_capacity())
        (
            a in prop::collection::vec(0..capacity.max(1), 0..150),
            b in prop::collection::vec(0..capacity.max(1), 0..150),
            capacity in Just(capacity)
        )
        -> (usize, Vec<usize>, Vec<usize>)
    {
        if capacity == 0 {
            (0, Vec::new(), Vec::new())
        } else {
            (capacity, a, b)
        }
    }
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Delete(usize),
}

prop_compose! {
    fn arb_ops()
        (capacity in 1usize..300)
        (
            ops in prop::collection::vec(
                prop_oneof![
                    (0..capacity).prop_map(Op::Add),
                    (0..capacity).prop_map(Op::Delete),
                ],
                0..200,
            ),
            capacity in Just(capacity)
        )
        -> (usize, Vec<Op>)
    {
        (capacity, ops)
    }
}

proptest! {
    #[test]
    fn test_add_delete_matches_reference((capacity, ops) in arb_ops()) {
        let mut filter = IndexFilter::new(capacity);
        let mut reference = BTreeSet::new();

        for op in ops {
            match op {
                Op::Add(p) => {
                    prop_assert_eq!(filter.add(p), reference.insert(p));
                }
                Op::Delete(p) => {
                    prop_assert_eq!(filter.delete(p), reference.remove(&p));
                }
            }
            prop_assert_eq!(filter.len(), reference.len());
        }

        let iterated: Vec<usize> = filter.iter().collect();
        let expected: Vec<usize> = reference.iter().copied().collect();
        prop_assert_eq!(iterated, expected);
        for p in 0..capacity {
            prop_assert_eq!(filter.has(p), reference.contains(&p));
        }
    }

    #[test]
    fn test_union_matches_reference((capacity, a, b) in arb_pair()) {
        let fa = IndexFilter::from_positions(capacity, a.iter().copied());
        let fb = IndexFilter::from_positions(capacity, b.iter().copied());
        let ra: BTreeSet<usize> = a.into_iter().collect();
        let rb: BTreeSet<usize> = b.into_iter().collect();

        let mut union = IndexFilter::filled(capacity);
        union.union_of(&fa, &fb);

        let expected: Vec<usize> = ra.union(&rb).copied().collect();
        prop_assert_eq!(union.len(), expected.len());
        prop_assert_eq!(union.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_intersection_matches_reference((capacity, a, b) in arb_pair()) {
        let fa = IndexFilter::from_positions(capacity, a.iter().copied());
        let fb = IndexFilter::from_positions(capacity, b.iter().copied());
        let ra: BTreeSet<usize> = a.into_iter().collect();
        let rb: BTreeSet<usize> = b.into_iter().collect();

        let mut both = IndexFilter::filled(capacity);
        both.intersection_of(&fa, &fb);

        let expected: Vec<usize> = ra.intersection(&rb).copied().collect();
        prop_assert_eq!(both.len(), expected.len());
        prop_assert_eq!(both.iter().collect::<Vec<_>>(), expected);

        let mut in_place = fa.clone();
        in_place.intersection_with(&fb);
        prop_assert_eq!(in_place, both);
    }

    #[test]
    fn test_fill_and_clear((capacity, positions) in arb_positions()) {
        let mut filter = IndexFilter::from_positions(capacity, positions);

        filter.fill();
        prop_assert_eq!(filter.len(), capacity);
        prop_assert_eq!(filter.iter().count(), capacity);
        prop_assert!(filter.iter().all(|p| p < capacity));
        prop_assert!((0..capacity).all(|p| filter.has(p)));

        filter.clear();
        prop_assert_eq!(filter.len(), 0);
        prop_assert!((0..capacity).all(|p| !filter.has(p)));
    }

    #[test]
    fn test_iterator_len_is_exact((capacity, positions) in arb_positions()) {
        let filter = IndexFilter::from_positions(capacity, positions);
        let mut it = filter.iter();
        let mut left = filter.len();
        prop_assert_eq!(it.len(), left);
        while it.next().is_some() {
            left -= 1;
            prop_assert_eq!(it.len(), left);
        }
        prop_assert_eq!(left, 0);
    }

    #[test]
    fn test_resize_keeps_lower_positions(
        (capacity, positions) in arb_positions(),
        new_capacity in 0usize..400
    ) {
        let mut filter = IndexFilter::from_positions(capacity, positions.iter().copied());
        filter.resize(new_capacity);

        let expected: BTreeSet<usize> = positions
            .into_iter()
            .filter(|&p| p < new_capacity)
            .collect();
        prop_assert_eq!(filter.capacity(), new_capacity);
        prop_assert_eq!(filter.len(), expected.len());
        prop_assert_eq!(
            filter.iter().collect::<Vec<_>>(),
            expected.into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_copy_is_independent((capacity, positions) in arb_positions()) {
        let original = IndexFilter::from_positions(capacity, positions);
        let snapshot: Vec<usize> = original.iter().collect();
        let mut copy = original.copy();
        prop_assert_eq!(&copy, &original);

        copy.clear();
        if capacity > 0 {
            copy.add(capacity - 1);
        }
        prop_assert_eq!(original.iter().collect::<Vec<_>>(), snapshot);
        prop_assert_eq!(original.len(), original.iter().count());
    }
}
