//! Order page: the two-step rental form and the confirmation dialog

use std::time::Duration;
use thirtyfour::prelude::*;
use tracing::{debug, info};

use crate::error::E2eResult;
use crate::pages::input_by_placeholder;
use crate::scenario::{Customer, RentalPeriod, ScooterColor};
use crate::wait::Waits;

pub mod locators {
    // Step one: who and where
    pub const FIRST_NAME: &str = "* Имя";
    pub const LAST_NAME: &str = "* Фамилия";
    pub const ADDRESS: &str = "* Адрес: куда привезти заказ";
    pub const METRO_STATION: &str = "* Станция метро";
    pub const PHONE: &str = "* Телефон: на него позвонит курьер";
    pub const NEXT_BUTTON: &str = "//button[text()='Далее']";

    // Step two: when and what
    pub const DELIVERY_DATE: &str = "* Когда привезти самокат";
    pub const RENTAL_PERIOD_DROPDOWN_CLASS: &str = "Dropdown-control";
    pub const BLACK_CHECKBOX_ID: &str = "black";
    pub const GREY_CHECKBOX_ID: &str = "grey";
    pub const COMMENT: &str = "Комментарий для курьера";
    pub const ORDER_BUTTON: &str = r#"//*[@id="root"]/div/div[2]/div[3]/button[2]"#;

    pub const CONFIRMATION: &str = "//*[contains(text(),'Хотите оформить заказ?')]";

    pub fn rental_period_option(label: &str) -> String {
        format!("//div[@class='Dropdown-menu']/div[text()='{}']", label)
    }
}

/// Rental details already resolved for the current day
#[derive(Debug, Clone)]
pub struct RentalForm<'s> {
    pub delivery_date: String,
    pub rental_period: RentalPeriod,
    pub scooter_color: ScooterColor,
    pub comment: &'s str,
}

pub struct OrderPage<'a> {
    driver: &'a WebDriver,
    waits: Waits,
    dropdown_settle: Duration,
}

impl<'a> OrderPage<'a> {
    pub fn new(driver: &'a WebDriver, waits: Waits, dropdown_settle: Duration) -> Self {
        Self {
            driver,
            waits,
            dropdown_settle,
        }
    }

    async fn input(&self, placeholder: &str) -> E2eResult<WebElement> {
        Ok(self.driver.find(By::XPath(input_by_placeholder(placeholder))).await?)
    }

    pub async fn wait_for_step_one(&self) -> E2eResult<()> {
        self.waits
            .visible(
                self.driver,
                By::XPath(input_by_placeholder(locators::FIRST_NAME)),
                "first name field",
            )
            .await?;
        Ok(())
    }

    pub async fn wait_for_step_two(&self) -> E2eResult<()> {
        self.waits
            .visible(
                self.driver,
                By::XPath(input_by_placeholder(locators::DELIVERY_DATE)),
                "delivery date field",
            )
            .await?;
        Ok(())
    }

    /// Fill the personal data step
    pub async fn fill_step_one(&self, customer: &Customer) -> E2eResult<()> {
        debug!("Filling step one for {} {}", customer.first_name, customer.last_name);

        self.input(locators::FIRST_NAME)
            .await?
            .send_keys(customer.first_name.as_str())
            .await?;
        self.input(locators::LAST_NAME)
            .await?
            .send_keys(customer.last_name.as_str())
            .await?;
        self.input(locators::ADDRESS)
            .await?
            .send_keys(customer.address.as_str())
            .await?;

        // The station list is a react-select style widget: open it, type, pick the first match
        let metro = self.input(locators::METRO_STATION).await?;
        metro.click().await?;
        tokio::time::sleep(self.dropdown_settle).await;
        self.waits
            .clickable(
                self.driver,
                By::XPath(input_by_placeholder(locators::METRO_STATION)),
                "metro station input",
            )
            .await?;
        metro.send_keys(customer.metro_station.as_str()).await?;
        metro.send_keys(Key::Down + Key::Enter).await?;

        self.input(locators::PHONE)
            .await?
            .send_keys(customer.phone.as_str())
            .await?;
        Ok(())
    }

    pub async fn click_next_button(&self) -> E2eResult<()> {
        self.waits
            .clickable(self.driver, By::XPath(locators::NEXT_BUTTON), "next button")
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Fill the rental data step
    pub async fn fill_step_two(&self, rental: &RentalForm<'_>) -> E2eResult<()> {
        debug!(
            "Filling step two: {} for {}",
            rental.delivery_date,
            rental.rental_period.label()
        );

        let delivery = self.input(locators::DELIVERY_DATE).await?;
        delivery.send_keys(rental.delivery_date.as_str()).await?;
        // Escape closes the date picker popup, which otherwise covers the dropdown
        delivery.send_keys(Key::Escape).await?;

        self.waits
            .clickable(
                self.driver,
                By::ClassName(locators::RENTAL_PERIOD_DROPDOWN_CLASS),
                "rental period dropdown",
            )
            .await?
            .click()
            .await?;
        self.waits
            .clickable(
                self.driver,
                By::XPath(locators::rental_period_option(rental.rental_period.label())),
                &format!("rental period '{}'", rental.rental_period.label()),
            )
            .await?
            .click()
            .await?;

        self.select_scooter_color(rental.scooter_color).await?;

        self.input(locators::COMMENT)
            .await?
            .send_keys(rental.comment)
            .await?;
        Ok(())
    }

    pub async fn select_scooter_color(&self, color: ScooterColor) -> E2eResult<()> {
        let id = match color {
            ScooterColor::BlackPearl => locators::BLACK_CHECKBOX_ID,
            ScooterColor::GreyHopelessness => locators::GREY_CHECKBOX_ID,
        };
        self.waits
            .clickable(self.driver, By::Id(id), &format!("'{}' checkbox", color.label()))
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn click_order_button(&self) -> E2eResult<()> {
        self.waits
            .clickable(self.driver, By::XPath(locators::ORDER_BUTTON), "order button")
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Whether the "Хотите оформить заказ?" dialog is shown. Lookup failures count as `false`.
    pub async fn is_confirmation_displayed(&self) -> bool {
        match self
            .waits
            .visible(self.driver, By::XPath(locators::CONFIRMATION), "order confirmation")
            .await
        {
            Ok(dialog) => dialog.is_displayed().await.unwrap_or(false),
            Err(e) => {
                info!("Order confirmation not shown: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::locators::*;
    use crate::pages::input_by_placeholder;

    #[test]
    fn test_rental_period_option_xpath() {
        assert_eq!(
            rental_period_option("двое суток"),
            "//div[@class='Dropdown-menu']/div[text()='двое суток']"
        );
    }

    #[test]
    fn test_placeholders_are_required_fields() {
        for placeholder in [FIRST_NAME, LAST_NAME, ADDRESS, METRO_STATION, PHONE, DELIVERY_DATE] {
            assert!(placeholder.starts_with("* "), "{} should be marked required", placeholder);
        }
        // the comment is the only optional field
        assert_eq!(
            input_by_placeholder(COMMENT),
            "//input[@placeholder='Комментарий для курьера']"
        );
    }
}
