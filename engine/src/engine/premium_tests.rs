use mockable::Clock;
use rstest::rstest;

use crate::domain::ports::{MockPaymentProvider, PaymentOutcome, PaymentProviderError};
use crate::domain::{ErrorCode, SubscriptionStatus, TransactionKind};
use crate::test_support::{fixture_engine, uid};

#[rstest]
fn quote_without_redemption_carries_no_discount() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");

    let quote = engine.premium_quote(false).expect("quote");

    assert_eq!(quote.base_price, 199);
    assert_eq!(quote.redeemed_points, 0);
    assert_eq!(quote.discount, 0);
    assert_eq!(quote.final_price, 199);
}

#[rstest]
fn quote_floors_fractional_discounts() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");

    // 340 points at 10 per unit: 34 units off.
    let quote = engine.premium_quote(true).expect("quote");

    assert_eq!(quote.redeemed_points, 340);
    assert_eq!(quote.discount, 34);
    assert_eq!(quote.final_price, 165);
}

#[rstest]
fn quote_caps_redemption_at_the_full_price() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");
    engine
        .grant_points(&uid("u1"), 1660, "test balance")
        .expect("grant");

    let quote = engine.premium_quote(true).expect("quote");

    // 2000 points available but only 1990 are redeemable against 199 units.
    assert_eq!(quote.redeemed_points, 1990);
    assert_eq!(quote.discount, 199);
    assert_eq!(quote.final_price, 0);
}

#[rstest]
fn quote_with_a_small_balance_redeems_it_all() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.signup("Carol Danvers", "carol@example.com").expect("signup");

    let quote = engine.premium_quote(true).expect("quote");

    assert_eq!(quote.redeemed_points, 50);
    assert_eq!(quote.discount, 5);
    assert_eq!(quote.final_price, 194);
}

#[rstest]
fn quote_requires_a_session() {
    let (_store, _clock, engine) = fixture_engine();
    let err = engine.premium_quote(true).expect_err("no session");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
fn upgrade_flips_the_account_and_redeems_in_one_transition() {
    let (_store, clock, mut engine) = fixture_engine();
    engine.login("bob@construction.com").expect("login");

    let user = engine.upgrade(20, Some("txn_42")).expect("upgrade");

    assert!(user.is_premium);
    assert_eq!(user.subscription_status, SubscriptionStatus::Active);
    assert_eq!(user.subscription_id.as_deref(), Some("txn_42"));
    assert_eq!(user.subscription_date, Some(clock.utc()));
    assert_eq!(user.points, 0);
    let entry = engine.ledger().first().expect("ledger entry");
    assert_eq!(entry.kind, TransactionKind::Redeemed);
    assert_eq!(entry.reason, "Discount on Premium");
    let notification = engine.notifications().first().expect("notification");
    assert_eq!(notification.title, "Welcome to Premium");
}

#[rstest]
fn upgrade_without_a_transaction_id_records_the_sentinel() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("bob@construction.com").expect("login");

    let user = engine.upgrade(0, None).expect("upgrade");

    assert_eq!(user.subscription_id.as_deref(), Some("manual_upgrade"));
    // Zero redemption appends no ledger entry.
    assert!(engine.ledger().is_empty());
}

#[rstest]
fn upgrade_rejects_redemption_beyond_the_balance() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("bob@construction.com").expect("login");

    let err = engine.upgrade(21, None).expect_err("over balance");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let user = engine.current_user().expect("session user");
    assert!(!user.is_premium);
    assert_eq!(user.points, 20);
}

#[tokio::test]
async fn a_fully_discounted_purchase_skips_the_provider() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");
    engine
        .grant_points(&uid("u1"), 1660, "test balance")
        .expect("grant");
    let mut provider = MockPaymentProvider::new();
    provider.expect_charge().times(0);

    let receipt = engine
        .purchase_premium(true, &provider)
        .await
        .expect("purchase");

    assert_eq!(receipt.amount_charged, 0);
    assert_eq!(receipt.redeemed_points, 1990);
    assert!(receipt.transaction_id.starts_with("points_full_"));
    let user = engine.current_user().expect("session user");
    assert!(user.is_premium);
    assert_eq!(user.points, 10);
}

#[tokio::test]
async fn an_authorized_charge_completes_the_upgrade() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");
    let mut provider = MockPaymentProvider::new();
    provider
        .expect_charge()
        .withf(|amount| *amount == 165)
        .times(1)
        .returning(|_| {
            Ok(PaymentOutcome::Authorized {
                transaction_id: "txn_77".to_owned(),
            })
        });

    let receipt = engine
        .purchase_premium(true, &provider)
        .await
        .expect("purchase");

    assert_eq!(receipt.amount_charged, 165);
    assert_eq!(receipt.transaction_id, "txn_77");
    let user = engine.current_user().expect("session user");
    assert!(user.is_premium);
    assert_eq!(user.subscription_id.as_deref(), Some("txn_77"));
    assert_eq!(user.points, 0);
}

#[tokio::test]
async fn a_declined_charge_leaves_the_account_untouched() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");
    let mut provider = MockPaymentProvider::new();
    provider
        .expect_charge()
        .times(1)
        .returning(|_| {
            Ok(PaymentOutcome::Declined {
                reason: "card expired".to_owned(),
            })
        });

    let err = engine
        .purchase_premium(true, &provider)
        .await
        .expect_err("declined");

    assert_eq!(err.code(), ErrorCode::CollaboratorFailure);
    let user = engine.current_user().expect("session user");
    assert!(!user.is_premium);
    assert_eq!(user.points, 340);
    assert!(engine.ledger().is_empty());
}

#[tokio::test]
async fn a_provider_failure_surfaces_as_a_collaborator_error() {
    let (_store, _clock, mut engine) = fixture_engine();
    engine.login("alice@example.com").expect("login");
    let mut provider = MockPaymentProvider::new();
    provider
        .expect_charge()
        .times(1)
        .returning(|_| Err(PaymentProviderError::unreachable("gateway timeout")));

    let err = engine
        .purchase_premium(true, &provider)
        .await
        .expect_err("unreachable");

    assert_eq!(err.code(), ErrorCode::CollaboratorFailure);
    assert!(!engine.current_user().expect("session user").is_premium);
}
