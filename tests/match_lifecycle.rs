//! Match lifecycle tests through the application service
//!
//! These tests drive `MatchService` over the in-memory repositories:
//! - Booking rules (slot, court, distinct teams)
//! - Status transitions and score entry from either side
//! - Ranking recomputation after finished matches

use chrono::{NaiveDate, NaiveTime};
use padel_corpo_api::application::{MatchFilter, MatchService, NewMatch};
use padel_corpo_api::domain::errors::EngineError;
use padel_corpo_api::domain::matches::{MatchRules, MatchStatus, MatchUpdate, SlotEdit, StatusChange};
use padel_corpo_api::domain::ranking::PointsTable;
use padel_corpo_api::domain::score::{Score, SetRules, Side};
use padel_corpo_api::infrastructure::repositories::{
    InMemoryMatchRepository, InMemoryTeamRepository,
};
use std::sync::Arc;
use uuid::Uuid;

fn setup_service() -> MatchService {
    setup_service_with(MatchRules::default())
}

fn setup_service_with(rules: MatchRules) -> MatchService {
    MatchService::new(
        Arc::new(InMemoryMatchRepository::new()),
        Arc::new(InMemoryTeamRepository::new()),
        rules,
        PointsTable::default(),
    )
}

async fn register(service: &MatchService, company: &str) -> Uuid {
    service
        .register_team(company, [Uuid::new_v4(), Uuid::new_v4()])
        .await
        .expect("Failed to register team")
        .id()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn at(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

fn booking(home: Uuid, away: Uuid, date: NaiveDate, hour: u32, court: u8) -> NewMatch {
    NewMatch {
        date,
        time: at(hour),
        court_number: court,
        home_team_id: home,
        away_team_id: away,
    }
}

#[tokio::test]
async fn test_created_match_starts_scheduled() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;

    let game = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .expect("Failed to create match");

    assert_eq!(game.status(), MatchStatus::Scheduled);
    assert_eq!(game.score_for(Side::Home), None);
    assert_eq!(game.winner_team(), None);

    let stored = service.get_match(game.id()).await.unwrap();
    assert_eq!(stored, game);
}

#[tokio::test]
async fn test_second_booking_on_same_slot_is_rejected() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let c = register(&service, "Initech").await;
    let d = register(&service, "Umbrella").await;

    service
        .create_match(booking(a, b, day(10), 18, 3))
        .await
        .unwrap();

    let err = service
        .create_match(booking(c, d, day(10), 18, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SlotConflict { .. }));

    // Another court at the same time is fine
    service
        .create_match(booking(c, d, day(10), 18, 4))
        .await
        .expect("Different court should be free");
}

#[tokio::test]
async fn test_team_cannot_play_itself() {
    let service = setup_service();
    let a = register(&service, "Acme").await;

    let err = service
        .create_match(booking(a, a, day(10), 18, 1))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::SameTeamConflict);
}

#[tokio::test]
async fn test_unknown_team_is_rejected() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let ghost = Uuid::new_v4();

    let err = service
        .create_match(booking(a, ghost, day(10), 18, 1))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::TeamNotFound(ghost));
}

#[tokio::test]
async fn test_court_outside_configured_range_is_rejected() {
    let service = setup_service_with(MatchRules {
        max_courts: 4,
        ..MatchRules::default()
    });
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;

    let err = service
        .create_match(booking(a, b, day(10), 18, 5))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidCourt {
            court: 5,
            max_courts: 4
        }
    );
}

#[tokio::test]
async fn test_away_entry_is_stored_from_home_point_of_view() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let game = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();

    let finished = service
        .finish_match(game.id(), Side::Away, "6-4, 3-6, 6-2")
        .await
        .expect("Failed to finish match");

    assert_eq!(finished.status(), MatchStatus::Finished);
    assert_eq!(
        finished.score_for(Side::Home),
        Some("4-6, 6-3, 2-6".parse::<Score>().unwrap())
    );
    assert_eq!(
        finished.score_for(Side::Away),
        Some("6-4, 3-6, 6-2".parse::<Score>().unwrap())
    );
    assert_eq!(finished.winner_team(), Some(b));
}

#[tokio::test]
async fn test_invalid_score_leaves_match_untouched() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let game = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();

    let cases = [
        ("6-4", EngineError::InsufficientSets),
        ("6-4, 4-6", EngineError::DrawNotAllowed),
        ("6-4, 6-4, 6-4", EngineError::PrematureStop { set_number: 3 }),
    ];
    for (raw, expected) in cases {
        let err = service
            .finish_match(game.id(), Side::Home, raw)
            .await
            .unwrap_err();
        assert_eq!(err, expected, "score {:?}", raw);
    }

    let err = service
        .finish_match(game.id(), Side::Home, "six-four")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "ParseError");

    let stored = service.get_match(game.id()).await.unwrap();
    assert_eq!(stored.status(), MatchStatus::Scheduled);
    assert_eq!(stored.score_for(Side::Home), None);
}

#[tokio::test]
async fn test_strict_rules_reject_impossible_sets() {
    let service = setup_service_with(MatchRules {
        set_rules: SetRules::Padel,
        ..MatchRules::default()
    });
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let game = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();

    let err = service
        .finish_match(game.id(), Side::Home, "6-5, 6-4")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidSetScore { set_number: 1, .. }));

    service
        .finish_match(game.id(), Side::Home, "7-6, 6-4")
        .await
        .expect("Tie-break set should be accepted");
}

#[tokio::test]
async fn test_cancelled_match_cannot_be_finished() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let game = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();

    service.cancel_match(game.id()).await.unwrap();
    let err = service
        .finish_match(game.id(), Side::Home, "6-4, 6-4")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidTransition {
            from: MatchStatus::Cancelled,
            to: MatchStatus::Finished,
        }
    );
}

#[tokio::test]
async fn test_cancelled_match_frees_its_slot() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let c = register(&service, "Initech").await;
    let game = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();

    service.cancel_match(game.id()).await.unwrap();
    let replacement = service
        .create_match(booking(a, c, day(10), 18, 1))
        .await
        .expect("Slot of a cancelled match should be free");

    // Reactivating the first match now collides with the replacement
    let err = service
        .update_match(
            game.id(),
            MatchUpdate {
                status: Some(StatusChange::Schedule),
                ..MatchUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SlotConflict { .. }));

    service.delete_match(replacement.id()).await.unwrap();
    let reopened = service
        .update_match(
            game.id(),
            MatchUpdate {
                status: Some(StatusChange::Schedule),
                ..MatchUpdate::default()
            },
        )
        .await
        .expect("Slot is free again");
    assert_eq!(reopened.status(), MatchStatus::Scheduled);
}

#[tokio::test]
async fn test_reopening_finished_match_clears_score() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let game = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();

    service
        .finish_match(game.id(), Side::Home, "6-1, 6-1")
        .await
        .unwrap();
    assert_eq!(service.ranking().await.unwrap().len(), 2);

    let reopened = service
        .update_match(
            game.id(),
            MatchUpdate {
                status: Some(StatusChange::Schedule),
                ..MatchUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(reopened.status(), MatchStatus::Scheduled);
    assert_eq!(reopened.score_for(Side::Home), None);
    assert!(service.ranking().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rescheduling_respects_status_and_slots() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let c = register(&service, "Initech").await;
    let d = register(&service, "Umbrella").await;
    let first = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();
    service
        .create_match(booking(c, d, day(11), 19, 2))
        .await
        .unwrap();

    let move_to = |date, hour, court| MatchUpdate {
        slot: SlotEdit {
            date: Some(date),
            time: Some(at(hour)),
            court: Some(court),
        },
        status: None,
    };

    let err = service
        .update_match(first.id(), move_to(day(11), 19, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SlotConflict { .. }));

    let moved = service
        .update_match(first.id(), move_to(day(11), 20, 2))
        .await
        .expect("Free slot");
    assert_eq!(moved.slot().date, day(11));
    assert_eq!(moved.slot().time, at(20));

    service
        .finish_match(first.id(), Side::Home, "6-3, 6-3")
        .await
        .unwrap();
    let err = service
        .update_match(first.id(), move_to(day(12), 18, 1))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::SchedulingLocked {
            status: MatchStatus::Finished
        }
    );
}

#[tokio::test]
async fn test_only_scheduled_matches_can_be_deleted() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let game = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();
    service
        .finish_match(game.id(), Side::Home, "6-3, 6-3")
        .await
        .unwrap();

    let err = service.delete_match(game.id()).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::NotDeletable {
            status: MatchStatus::Finished
        }
    );

    let missing = Uuid::new_v4();
    assert_eq!(
        service.delete_match(missing).await.unwrap_err(),
        EngineError::MatchNotFound(missing)
    );
}

#[tokio::test]
async fn test_list_filters_by_status_team_and_dates() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let c = register(&service, "Initech").await;

    let ab = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();
    service
        .create_match(booking(b, c, day(12), 18, 1))
        .await
        .unwrap();
    service
        .create_match(booking(a, c, day(14), 18, 1))
        .await
        .unwrap();
    service
        .finish_match(ab.id(), Side::Home, "6-2, 6-2")
        .await
        .unwrap();

    let all = service.list_matches(&MatchFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let finished = service
        .list_matches(&MatchFilter {
            status: Some(MatchStatus::Finished),
            ..MatchFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].id(), ab.id());

    let for_c = service
        .list_matches(&MatchFilter {
            team_id: Some(c),
            ..MatchFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(for_c.len(), 2);

    let window = service
        .list_matches(&MatchFilter {
            from: Some(day(11)),
            to: Some(day(13)),
            ..MatchFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].slot().date, day(12));
}

#[tokio::test]
async fn test_ranking_reflects_finished_matches() {
    let service = setup_service();
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let c = register(&service, "Initech").await;

    let ab = service
        .create_match(booking(a, b, day(10), 18, 1))
        .await
        .unwrap();
    let ac = service
        .create_match(booking(a, c, day(10), 19, 1))
        .await
        .unwrap();
    // Stays scheduled and must not count
    service
        .create_match(booking(b, c, day(10), 20, 1))
        .await
        .unwrap();

    service
        .finish_match(ab.id(), Side::Home, "6-4, 6-4")
        .await
        .unwrap();
    service
        .finish_match(ac.id(), Side::Away, "6-3, 3-6, 6-1")
        .await
        .unwrap();

    let ranking = service.ranking().await.unwrap();
    assert_eq!(ranking.len(), 3);

    // a: 1 win + 1 loss (4 pts), c: 1 win (3 pts), b: 1 loss (1 pt)
    assert_eq!(ranking[0].team_id, a);
    assert_eq!(ranking[0].points, 4);
    assert_eq!(ranking[0].matches_played, 2);
    assert_eq!(ranking[0].sets_won, 3);
    assert_eq!(ranking[0].sets_lost, 2);

    assert_eq!(ranking[1].team_id, c);
    assert_eq!(ranking[1].points, 3);
    assert_eq!(ranking[1].team_name, "Initech");

    assert_eq!(ranking[2].team_id, b);
    assert_eq!(ranking[2].points, 1);
    assert_eq!(ranking[2].position, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_of_one_slot_admit_exactly_one() {
    let service = Arc::new(setup_service());
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let c = register(&service, "Initech").await;
    let d = register(&service, "Umbrella").await;

    let first = tokio::spawn({
        let service = service.clone();
        async move { service.create_match(booking(a, b, day(20), 18, 2)).await }
    });
    let second = tokio::spawn({
        let service = service.clone();
        async move { service.create_match(booking(c, d, day(20), 18, 2)).await }
    });
    let (first, second) = tokio::join!(first, second);
    let results = [first.unwrap(), second.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(EngineError::SlotConflict { .. }))));
    assert_eq!(
        service.list_matches(&MatchFilter::default()).await.unwrap().len(),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_from_separate_services_admit_exactly_one() {
    // Two services over one store, as two API processes over one database
    let matches = Arc::new(InMemoryMatchRepository::new());
    let teams = Arc::new(InMemoryTeamRepository::new());
    let service = || {
        Arc::new(MatchService::new(
            matches.clone(),
            teams.clone(),
            MatchRules::default(),
            PointsTable::default(),
        ))
    };
    let (left, right) = (service(), service());
    let a = register(&left, "Acme").await;
    let b = register(&left, "Globex").await;
    let c = register(&right, "Initech").await;
    let d = register(&right, "Umbrella").await;

    let first = tokio::spawn({
        let service = left.clone();
        async move { service.create_match(booking(a, b, day(21), 18, 2)).await }
    });
    let second = tokio::spawn({
        let service = right.clone();
        async move { service.create_match(booking(c, d, day(21), 18, 2)).await }
    });
    let (first, second) = tokio::join!(first, second);
    let results = [first.unwrap(), second.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(EngineError::SlotConflict { .. }))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_results_for_one_match_keep_a_single_score() {
    let service = Arc::new(setup_service());
    let a = register(&service, "Acme").await;
    let b = register(&service, "Globex").await;
    let game = service
        .create_match(booking(a, b, day(22), 18, 1))
        .await
        .unwrap();
    let id = game.id();

    let home_entry = tokio::spawn({
        let service = service.clone();
        async move { service.finish_match(id, Side::Home, "6-1, 6-1").await }
    });
    let away_entry = tokio::spawn({
        let service = service.clone();
        async move { service.finish_match(id, Side::Away, "6-3, 6-3").await }
    });
    let (home_entry, away_entry) = tokio::join!(home_entry, away_entry);
    let home_entry = home_entry.unwrap().expect("Home entry should be accepted");
    let away_entry = away_entry.unwrap().expect("Away entry should be accepted");

    // Whichever landed first wins; the other is a same-state no-op
    let stored = service.get_match(id).await.unwrap();
    assert_eq!(stored.status(), MatchStatus::Finished);
    assert_eq!(home_entry.score_for(Side::Home), stored.score_for(Side::Home));
    assert_eq!(away_entry.score_for(Side::Home), stored.score_for(Side::Home));

    let ranking = service.ranking().await.unwrap();
    assert_eq!(ranking.iter().map(|r| r.wins).sum::<u32>(), 1);
    assert_eq!(ranking.iter().map(|r| r.matches_played).sum::<u32>(), 2);
}
