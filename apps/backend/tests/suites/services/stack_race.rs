// Several players race to stack the same discard card

use std::sync::Barrier;
use std::thread;

use pablo_backend::domain::PlayerAction;
use pablo_backend::ErrorCode;

use crate::support::match_setup::harness;
use crate::support::recording_notifier::of_kind;

const ROUNDS: usize = 25;

#[test]
fn exactly_one_concurrent_stack_wins() {
    let h = harness(None);
    let racers = ["b", "c", "d"];

    for round in 0..ROUNDS {
        let match_id = format!("race-{round}");
        let handle = h.table(
            &match_id,
            &[
                ("a", &["2H", "3H", "4H", "6H"]),
                ("b", &["5S", "2S", "3S", "4S"]),
                ("c", &["5C", "2C", "3C", "4C"]),
                ("d", &["5H", "6S", "6C", "6D"]),
            ],
            &["5D"],
        );
        h.notifier.take();

        let barrier = Barrier::new(racers.len());
        let results: Vec<_> = thread::scope(|s| {
            let workers: Vec<_> = racers
                .iter()
                .map(|id| {
                    let barrier = &barrier;
                    let flow = &h.flow;
                    let match_id = match_id.as_str();
                    s.spawn(move || {
                        barrier.wait();
                        flow.submit(match_id, id, PlayerAction::StackOwn { slot: 0 })
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        let wins = results
            .iter()
            .filter(|r| matches!(r, Ok(outcome) if outcome.failure.is_none()))
            .count();
        assert_eq!(wins, 1, "round {round}: {results:?}");
        for result in results.iter().filter(|r| r.is_err()) {
            let err = result.as_ref().unwrap_err();
            assert_eq!(err.code(), ErrorCode::AlreadyResolved);
        }

        let sent = h.notifier.take();
        let stack_results = of_kind(&sent, "public_stack_result");
        assert_eq!(stack_results.len(), 1);
        assert_eq!(stack_results[0].msg["success"], true);

        let state = handle.lock();
        assert_eq!(state.discard_pile.len(), 2);
        assert!(!state.stacking_enabled());
        assert_eq!(state.card_total(), 52);
        let emptied = racers
            .iter()
            .filter(|id| state.players[**id].hand[0].is_none())
            .count();
        assert_eq!(emptied, 1);
    }
}
