use assert_matches::assert_matches;
use gazeseg::{
    merge_adjacent, to_continuous, to_discrete, ContinuousClassification, CoverageFault,
    DiscreteClassification, Event, GazeError, Label, TemporalGrid,
};
use proptest::prelude::*;

const LABELS: [Label; 5] = [
    Label::Fixation,
    Label::Saccade,
    Label::Pso,
    Label::Blink,
    Label::Undefined,
];

/// Regular 100 Hz timestamps with a one-second pause inserted before each
/// index in `gaps_before`.
fn timestamps(n: usize, gaps_before: &[usize]) -> Vec<f64> {
    let mut offset = 0.0;
    (0..n)
        .map(|i| {
            if gaps_before.contains(&i) {
                offset += 1.0;
            }
            offset + i as f64 * 0.01
        })
        .collect()
}

fn assert_partition(events: &[Event], n: usize) {
    let mut expected = 0;
    for event in events {
        assert_eq!(event.onset, expected, "events must be ordered and gap-free");
        assert!(event.onset <= event.offset);
        expected = event.offset + 1;
    }
    assert_eq!(expected, n, "events must reach the last sample");
}

fn recording() -> impl Strategy<Value = (Vec<Label>, Vec<usize>)> {
    (2usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::sample::select(LABELS.to_vec()), n),
            prop::collection::vec(1..n, 0..4).prop_map(|mut gaps| {
                gaps.sort_unstable();
                gaps.dedup();
                gaps
            }),
        )
    })
}

proptest! {
    #[test]
    fn discrete_events_partition_all_samples((labels, gaps) in recording()) {
        let n = labels.len();
        let grid = TemporalGrid::build(timestamps(n, &gaps)).unwrap();
        let discrete = to_discrete(&ContinuousClassification::new(labels), &grid).unwrap();
        assert_partition(discrete.events(), n);
    }

    #[test]
    fn continuous_round_trips_through_events((labels, gaps) in recording()) {
        let n = labels.len();
        let grid = TemporalGrid::build(timestamps(n, &gaps)).unwrap();
        let continuous = ContinuousClassification::new(labels);
        let discrete = to_discrete(&continuous, &grid).unwrap();
        prop_assert_eq!(to_continuous(discrete.events(), n).unwrap(), continuous);
    }

    #[test]
    fn events_round_trip_after_merging((labels, gaps) in recording(), splits in prop::collection::vec(any::<bool>(), 60)) {
        let n = labels.len();
        let grid = TemporalGrid::build(timestamps(n, &gaps)).unwrap();
        let continuous = ContinuousClassification::new(labels);
        let canonical = to_discrete(&continuous, &grid).unwrap();

        // Split canonical events at arbitrary points: same per-sample labels,
        // more events than needed.
        let mut fragmented = Vec::new();
        for event in canonical.events() {
            let mut onset = event.onset;
            for i in event.onset..event.offset {
                if splits[i] {
                    fragmented.push(Event::new(onset, i, event.label));
                    onset = i + 1;
                }
            }
            fragmented.push(Event::new(onset, event.offset, event.label));
        }
        let fragmented = DiscreteClassification::with_grid(fragmented, &grid);

        let expanded = to_continuous(fragmented.events(), n).unwrap();
        let rediscretized = to_discrete(&expanded, &grid).unwrap();
        prop_assert_eq!(&rediscretized, &merge_adjacent(&fragmented));
        prop_assert_eq!(&rediscretized, &canonical);
    }
}

#[test]
fn constant_labels_split_at_gap() {
    let grid = TemporalGrid::build(timestamps(10, &[5])).unwrap();
    assert_eq!(grid.gaps().collect::<Vec<_>>(), vec![(4, 5)]);

    let discrete =
        to_discrete(&ContinuousClassification::new(vec![Label::Fixation; 10]), &grid).unwrap();
    assert!(discrete.len() >= 2);
    assert_eq!(
        discrete.events(),
        &[
            Event::new(0, 4, Label::Fixation),
            Event::new(5, 9, Label::Fixation)
        ]
    );

    // merging keeps the gap-forced break
    assert_eq!(merge_adjacent(&discrete), discrete);
}

#[test]
fn missing_index_is_a_coverage_error() {
    let events = vec![
        Event::new(0, 1, Label::Fixation),
        Event::new(3, 4, Label::Saccade),
    ];
    assert_matches!(
        to_continuous(&events, 5),
        Err(GazeError::Coverage {
            n: 5,
            fault: CoverageFault::Missing(2)
        })
    );
}

#[test]
fn discrete_classification_serializes_as_json() {
    let grid = TemporalGrid::build(timestamps(4, &[2])).unwrap();
    let discrete = to_discrete(
        &ContinuousClassification::new(vec![Label::Fixation, Label::Fixation, Label::Pso, Label::Pso]),
        &grid,
    )
    .unwrap();

    let json = serde_json::to_value(&discrete).unwrap();
    assert_eq!(json["events"][1]["label"], "PSO");
    assert_eq!(json["gap_breaks"][0], 2);

    let back: DiscreteClassification = serde_json::from_value(json).unwrap();
    assert_eq!(back, discrete);
}
