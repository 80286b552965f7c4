//! Properties that hold for every kind of automaton over many generations.

use proptest::prelude::*;

use crate::factory;
use crate::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        ..Default::default()
    })]

    #[test]
    fn test_dimensions_never_change(
        kind_index in 0_usize..AutomatonKind::ALL.len(),
        width in 1_usize..10,
        height in 1_usize..10,
        bounded: bool,
        seed: u64,
    ) {
        let config = AutomatonConfig {
            width,
            height,
            edges: if bounded { Edges::Bounded } else { Edges::Wrap },
            seed: Some(seed),
            ..AutomatonConfig::default()
        };
        let kind = AutomatonKind::ALL[kind_index];
        let mut automaton = factory::build_kind(kind, &config).unwrap();
        for i in 1..=25 {
            automaton.step().unwrap();
            prop_assert_eq!((width, height), (automaton.width(), automaton.height()));
            prop_assert_eq!(i, automaton.generation_count());
        }
    }

    #[test]
    fn test_wator_health_stays_in_range(
        width in 2_usize..12,
        height in 2_usize..12,
        bounded: bool,
        seed: u64,
    ) {
        let mut config = AutomatonConfig {
            width,
            height,
            edges: if bounded { Edges::Bounded } else { Edges::Wrap },
            seed: Some(seed),
            ..AutomatonConfig::default()
        };
        config.wator.prey_density = 0.4;
        config.wator.predator_density = 0.2;
        let mut automaton = match factory::build_kind(AutomatonKind::Wator, &config).unwrap() {
            AnyAutomaton::Wator(a) => a,
            other => panic!("built {:?}", other.kind()),
        };
        for _ in 0..30 {
            automaton.step().unwrap();
            for cell in automaton.grid().values() {
                prop_assert!(cell.health() <= cell.max_health());
                if cell.state() == WatorState::Predator {
                    prop_assert!(!cell.is_dead());
                }
            }
        }
    }
}

#[test]
fn test_factory_seed_reproduces_run() {
    let config = AutomatonConfig {
        width: 16,
        height: 12,
        seed: Some(2021),
        ..AutomatonConfig::default()
    };
    let run = || {
        let mut automaton = match factory::build("codi", &config).unwrap() {
            AnyAutomaton::CoDi(a) => a,
            other => panic!("built {:?}", other.kind()),
        };
        for _ in 0..10 {
            automaton.step().unwrap();
        }
        automaton.grid().clone()
    };
    assert_eq!(run(), run());
}
