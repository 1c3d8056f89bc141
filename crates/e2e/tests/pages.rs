//! Negative paths of the page objects and flows
//!
//! Needs a browser: SCOOTER_E2E_LIVE=1 cargo test --package scooter-e2e --test pages -- --ignored

mod common;

use scooter_e2e::flows;
use scooter_e2e::{E2eError, FaqCase};

#[tokio::test]
#[ignore = "needs a WebDriver server and access to the app"]
async fn confirmation_is_absent_on_blank_page() {
    let Some(live) = common::live_with(|config| config.wait.timeout_ms = 500).await else {
        return;
    };

    live.session
        .driver()
        .goto("about:blank")
        .await
        .expect("navigate to blank page");
    let displayed = live.session.order().is_confirmation_displayed().await;

    live.session.quit().await.expect("quit browser");
    assert!(!displayed, "confirmation dialog reported on an empty page");
}

#[tokio::test]
#[ignore = "needs a WebDriver server and access to the app"]
async fn wrong_faq_answer_fails_assertion() {
    let Some(live) = common::live().await else {
        return;
    };

    let case = FaqCase {
        index: 0,
        expected_answer: "Сутки — 100 рублей.".to_string(),
    };
    let outcome = flows::faq_answer(&live.session, &case).await;

    live.session.quit().await.expect("quit browser");
    match outcome {
        Err(E2eError::AssertionFailed(msg)) => assert!(msg.contains("FAQ index 0"), "{}", msg),
        other => panic!("expected an answer mismatch, got {:?}", other),
    }
}
