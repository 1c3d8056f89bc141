//! Home page: cookie banner, FAQ accordion and the two "Заказать" buttons

use thirtyfour::prelude::*;
use tracing::{debug, info};

use crate::error::E2eResult;
use crate::scenario::OrderEntry;
use crate::wait::Waits;

pub mod locators {
    pub const COOKIE_ACCEPT_BUTTON_ID: &str = "rcc-confirm-button";

    pub const HEADER_ORDER_BUTTON: &str =
        "//div[contains(@class,'Header_Nav')]//button[text()='Заказать']";

    /// The button in the "how it works" section near the bottom of the page
    pub const FOOTER_ORDER_BUTTON: &str = r#"//*[@id="root"]/div/div/div[4]/div[2]/div[5]/button"#;

    pub const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView(true);";

    pub fn faq_heading_id(index: u32) -> String {
        format!("accordion__heading-{}", index)
    }

    pub fn faq_panel_id(index: u32) -> String {
        format!("accordion__panel-{}", index)
    }
}

pub struct HomePage<'a> {
    driver: &'a WebDriver,
    waits: Waits,
}

impl<'a> HomePage<'a> {
    pub fn new(driver: &'a WebDriver, waits: Waits) -> Self {
        Self { driver, waits }
    }

    /// Dismiss the cookie consent banner
    pub async fn accept_cookies(&self) -> E2eResult<()> {
        debug!("Accepting cookies");
        self.waits
            .clickable(self.driver, By::Id(locators::COOKIE_ACCEPT_BUTTON_ID), "cookie accept button")
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn faq_question_button(&self, index: u32) -> E2eResult<WebElement> {
        Ok(self.driver.find(By::Id(locators::faq_heading_id(index))).await?)
    }

    pub async fn faq_answer_panel(&self, index: u32) -> E2eResult<WebElement> {
        Ok(self.driver.find(By::Id(locators::faq_panel_id(index))).await?)
    }

    /// Expand question `index` and return the trimmed text of its answer panel
    pub async fn open_faq_answer(&self, index: u32) -> E2eResult<String> {
        self.faq_question_button(index).await?.click().await?;

        let panel = self
            .waits
            .visible(
                self.driver,
                By::Id(locators::faq_panel_id(index)),
                &format!("FAQ answer panel {}", index),
            )
            .await?;

        let text = panel.text().await?;
        Ok(text.trim().to_string())
    }

    pub async fn click_header_order_button(&self) -> E2eResult<()> {
        self.driver
            .find(By::XPath(locators::HEADER_ORDER_BUTTON))
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn click_footer_order_button(&self) -> E2eResult<()> {
        let button = self.driver.find(By::XPath(locators::FOOTER_ORDER_BUTTON)).await?;
        self.driver
            .execute(locators::SCROLL_INTO_VIEW, vec![button.to_json()?])
            .await?;
        button.click().await?;
        Ok(())
    }

    /// Open the order form through the given entry point
    pub async fn start_order(&self, entry: OrderEntry) -> E2eResult<()> {
        info!("Starting order from the {} button", entry);
        match entry {
            OrderEntry::Header => self.click_header_order_button().await,
            OrderEntry::Footer => self.click_footer_order_button().await,
        }
    }
}
