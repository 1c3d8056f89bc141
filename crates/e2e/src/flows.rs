//! The two user flows under test

use chrono::NaiveDate;
use tracing::info;

use crate::error::{E2eError, E2eResult};
use crate::pages::order::RentalForm;
use crate::scenario::{FaqCase, OrderCase};
use crate::session::BrowserSession;

/// Expand one FAQ question and check the answer text
pub async fn faq_answer(session: &BrowserSession, case: &FaqCase) -> E2eResult<()> {
    let actual = session
        .home()
        .open_faq_answer(case.index)
        .await
        .map_err(|e| E2eError::in_step(format!("open FAQ question {}", case.index), e))?;

    check_answer(case, &actual)
}

/// Compare a rendered answer with the expected one
pub fn check_answer(case: &FaqCase, actual: &str) -> E2eResult<()> {
    if actual == case.expected_answer {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed(format!(
            "answer text mismatch for FAQ index {}: expected {:?}, got {:?}",
            case.index, case.expected_answer, actual
        )))
    }
}

/// Walk through both order form steps and check the confirmation dialog shows up
pub async fn place_order(session: &BrowserSession, case: &OrderCase, today: NaiveDate) -> E2eResult<()> {
    let rental = RentalForm {
        delivery_date: case.rental.delivery_date.render(today)?,
        rental_period: case.rental.rental_period,
        scooter_color: case.rental.scooter_color,
        comment: &case.rental.comment,
    };

    session
        .home()
        .start_order(case.entry)
        .await
        .map_err(|e| E2eError::in_step(format!("click {} order button", case.entry), e))?;

    let order = session.order();

    order
        .wait_for_step_one()
        .await
        .map_err(|e| E2eError::in_step("wait for personal data form", e))?;
    order
        .fill_step_one(&case.customer)
        .await
        .map_err(|e| E2eError::in_step("fill personal data", e))?;
    order
        .click_next_button()
        .await
        .map_err(|e| E2eError::in_step("click next", e))?;

    order
        .wait_for_step_two()
        .await
        .map_err(|e| E2eError::in_step("wait for rental data form", e))?;
    order
        .fill_step_two(&rental)
        .await
        .map_err(|e| E2eError::in_step("fill rental data", e))?;
    order
        .click_order_button()
        .await
        .map_err(|e| E2eError::in_step("click order", e))?;

    if !order.is_confirmation_displayed().await {
        return Err(E2eError::AssertionFailed(
            "order confirmation dialog is not displayed".to_string(),
        ));
    }

    info!("Order '{}' reached the confirmation dialog", case.name);
    Ok(())
}
