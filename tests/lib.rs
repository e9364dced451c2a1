// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use elevator_dataset_generator::*;

mod cli_argument_parsing_tests;

#[test]
fn test_state_ids_are_unique() {
    let first = ElevatorStateId::new();
    let second = ElevatorStateId::new();

    assert_ne!(first, second);
    assert!(first.to_string().starts_with("STATE_"));
}

#[test]
fn test_public_reexports() {
    let parameters = SimulationParameters::default();
    let weights = FloorWeights::derive(&parameters).unwrap();
    assert_eq!(weights.len(), parameters.floor_count());

    let mut engine = GenerationEngine::from_seed(
        SimulationParameters { rows_to_generate: 3, ..parameters },
        InMemoryStore::new(),
        Some(1),
    )
    .unwrap();
    let statistics: RunStatistics = engine.run().unwrap();
    assert_eq!(statistics.rows_generated, 3);
}
