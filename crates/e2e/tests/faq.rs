//! FAQ accordion: each question reveals its own answer
//!
//! Needs a browser: SCOOTER_E2E_LIVE=1 cargo test --package scooter-e2e --test faq -- --ignored

mod common;

use scooter_e2e::flows;
use scooter_e2e::FaqCase;
use test_case::test_case;

#[test_case(0, "Сутки — 400 рублей. Оплата курьеру — наличными или картой." ; "price")]
#[test_case(1, "Пока что у нас так: один заказ — один самокат. Если хотите покататься с друзьями, можете просто сделать несколько заказов — один за другим." ; "several scooters")]
#[test_case(2, "Допустим, вы оформляете заказ на 8 мая. Мы привозим самокат 8 мая в течение дня. Отсчёт времени аренды начинается с момента, когда вы оплатите заказ курьеру. Если мы привезли самокат 8 мая в 20:30, суточная аренда закончится 9 мая в 20:30." ; "rental time")]
#[test_case(3, "Только начиная с завтрашнего дня. Но скоро станем расторопнее." ; "order for today")]
#[test_case(4, "Пока что нет! Но если что-то срочное — всегда можно позвонить в поддержку по красивому номеру 1010." ; "extend or return early")]
#[test_case(5, "Самокат приезжает к вам с полной зарядкой. Этого хватает на восемь суток — даже если будете кататься без передышек и во сне. Зарядка не понадобится." ; "charger")]
#[test_case(6, "Да, пока самокат не привезли. Штрафа не будет, объяснительной записки тоже не попросим. Все же свои." ; "cancel order")]
#[test_case(7, "Да, обязательно. Всем самокатов! И Москве, и Московской области." ; "outside mkad")]
#[tokio::test]
#[ignore = "needs a WebDriver server and access to the app"]
async fn faq_answer_is_shown(index: u32, expected_answer: &str) {
    let Some(live) = common::live().await else {
        return;
    };

    let case = FaqCase {
        index,
        expected_answer: expected_answer.to_string(),
    };
    let outcome = flows::faq_answer(&live.session, &case).await;

    live.session.quit().await.expect("quit browser");
    if let Err(e) = outcome {
        panic!("{}", e);
    }
}
