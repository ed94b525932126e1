use mockable::Clock;
use rstest::rstest;

use crate::domain::{ErrorCode, ThemePreference, TicketStatus, TransactionKind, UserPatch};
use crate::test_support::{fixture_engine, sample_app};

#[rstest]
fn recording_usage_prepends_history_and_rewards_the_session_user() {
    let (_store, clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");
    let app = sample_app("calc", "CloudCalc");

    let item = engine.record_usage(&app, 120);

    assert_eq!(item.app_name, "CloudCalc");
    assert_eq!(item.timestamp, clock.utc());
    assert_eq!(engine.history().first(), Some(&item));
    assert_eq!(engine.current_user().expect("session user").points, 341);
    let entry = engine.ledger().first().expect("ledger entry");
    assert_eq!(entry.kind, TransactionKind::Earned);
    assert_eq!(entry.amount, 1);
    assert_eq!(entry.reason, "Used CloudCalc");
}

#[rstest]
fn usage_without_a_session_records_history_only() {
    let (_store, _clock, mut engine) = fixture_engine();
    let app = sample_app("calc", "CloudCalc");

    engine.record_usage(&app, 30);

    assert_eq!(engine.history().len(), 1);
    assert!(engine.ledger().is_empty());
}

#[rstest]
fn history_is_newest_first() {
    let (_store, clock, mut engine) = fixture_engine();
    engine.record_usage(&sample_app("calc", "CloudCalc"), 10);
    clock.advance(chrono::Duration::minutes(5));
    engine.record_usage(&sample_app("paint", "PaintPro"), 20);

    let names: Vec<&str> = engine
        .history()
        .iter()
        .map(|item| item.app_name.as_str())
        .collect();
    assert_eq!(names, vec!["PaintPro", "CloudCalc"]);
}

#[rstest]
fn toggling_the_wishlist_twice_restores_membership() {
    let (_store, _clock, mut engine) = fixture_engine();
    let app = sample_app("calc", "CloudCalc");

    assert!(engine.toggle_wishlist(&app.id));
    assert_eq!(engine.wishlist(), &[app.id.clone()]);
    assert!(!engine.toggle_wishlist(&app.id));
    assert!(engine.wishlist().is_empty());
}

#[rstest]
fn profile_updates_merge_only_the_supplied_fields() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");

    let user = engine
        .update_user(UserPatch {
            name: Some("Alice W.".to_owned()),
            ..UserPatch::default()
        })
        .expect("update");

    assert_eq!(user.name, "Alice W.");
    assert_eq!(user.email.as_str(), "alice@example.com");
    assert_eq!(user.points, 340);
}

#[rstest]
fn profile_updates_reject_another_accounts_email() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");

    let err = engine
        .update_user(UserPatch {
            email: Some(
                crate::domain::EmailAddress::new("BOB@construction.com").expect("email"),
            ),
            ..UserPatch::default()
        })
        .expect_err("email collision");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        engine.current_user().expect("session user").email.as_str(),
        "alice@example.com"
    );
}

#[rstest]
fn profile_updates_reject_a_blank_name() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");

    let err = engine
        .update_user(UserPatch {
            name: Some("  ".to_owned()),
            ..UserPatch::default()
        })
        .expect_err("blank name");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
fn profile_updates_require_a_session() {
    let (_store, _clock, mut engine) = fixture_engine();
    let err = engine
        .update_user(UserPatch::default())
        .expect_err("no session");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
fn toggling_the_theme_flips_between_the_two_preferences() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");

    let user = engine.toggle_theme().expect("first toggle");
    assert_eq!(user.theme_preference, ThemePreference::Light);
    let user = engine.toggle_theme().expect("second toggle");
    assert_eq!(user.theme_preference, ThemePreference::Dark);
}

#[rstest]
fn support_tickets_are_created_open() {
    let (_store, clock, mut engine) = fixture_engine();
    engine.login("bob@construction.com").expect("login");

    let ticket = engine
        .submit_support("Billing question", "Why was I charged twice?")
        .expect("submit");

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.subject, "Billing question");
    assert_eq!(ticket.date, clock.utc());
    assert!(ticket.admin_reply.is_none());
    assert_eq!(engine.support_tickets().len(), 1);
}

#[rstest]
#[case("", "a message")]
#[case("a subject", "  ")]
fn blank_support_fields_are_rejected(#[case] subject: &str, #[case] message: &str) {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("bob@construction.com").expect("login");

    let err = engine
        .submit_support(subject, message)
        .expect_err("blank field");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(engine.support_tickets().is_empty());
}

#[rstest]
fn closing_a_ticket_records_the_reply() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("bob@construction.com").expect("login");
    let ticket = engine
        .submit_support("Billing question", "Why was I charged twice?")
        .expect("submit");

    engine
        .close_support(&ticket.id, Some("Refund issued."))
        .expect("close");

    let stored = engine.support_tickets().first().expect("ticket");
    assert_eq!(stored.status, TicketStatus::Closed);
    assert_eq!(stored.admin_reply.as_deref(), Some("Refund issued."));
}

#[rstest]
fn closing_a_closed_ticket_keeps_the_original_reply() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("bob@construction.com").expect("login");
    let ticket = engine
        .submit_support("Billing question", "Why was I charged twice?")
        .expect("submit");
    engine
        .close_support(&ticket.id, Some("Refund issued."))
        .expect("close");

    engine
        .close_support(&ticket.id, Some("Second reply"))
        .expect("no-op close");

    let stored = engine.support_tickets().first().expect("ticket");
    assert_eq!(stored.admin_reply.as_deref(), Some("Refund issued."));
}

#[rstest]
fn closing_an_unknown_ticket_is_not_found() {
    let (_store, _clock, mut engine) = fixture_engine();
    let err = engine
        .close_support("missing", None)
        .expect_err("unknown ticket");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
