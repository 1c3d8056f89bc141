//! Declarative YAML test data for the FAQ and order flows

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{E2eError, E2eResult};

/// Date format of the "Когда привезти самокат" field
pub const DELIVERY_DATE_FORMAT: &str = "%d.%m.%Y";

/// All cases from one or more scenario files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub faq: Vec<FaqCase>,

    #[serde(default)]
    pub orders: Vec<OrderCase>,
}

/// One FAQ accordion entry: clicking question `index` must reveal `expected_answer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqCase {
    pub index: u32,
    pub expected_answer: String,
}

impl FaqCase {
    pub fn name(&self) -> String {
        format!("faq-{}", self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCase {
    pub name: String,
    pub entry: OrderEntry,
    pub customer: Customer,
    pub rental: RentalDetails,
}

/// Which "Заказать" button opens the order form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderEntry {
    Header,
    Footer,
}

impl TryFrom<String> for OrderEntry {
    type Error = E2eError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "header" => Ok(OrderEntry::Header),
            "footer" => Ok(OrderEntry::Footer),
            _ => Err(E2eError::ScenarioParse(format!(
                "unknown order entry '{}', expected header or footer",
                value
            ))),
        }
    }
}

impl From<OrderEntry> for String {
    fn from(entry: OrderEntry) -> Self {
        entry.to_string()
    }
}

impl fmt::Display for OrderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderEntry::Header => write!(f, "header"),
            OrderEntry::Footer => write!(f, "footer"),
        }
    }
}

/// Step one of the order form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub metro_station: String,
    pub phone: String,
}

/// Step two of the order form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalDetails {
    pub delivery_date: DeliveryDate,
    pub rental_period: RentalPeriod,
    pub scooter_color: ScooterColor,
    #[serde(default)]
    pub comment: String,
}

/// A fixed `dd.MM.yyyy` date, or a number of days after the day the case runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeliveryDate {
    Relative { in_days: u64 },
    Fixed(String),
}

impl DeliveryDate {
    /// Render the date as typed into the form
    pub fn render(&self, today: NaiveDate) -> E2eResult<String> {
        match self {
            DeliveryDate::Relative { in_days } => {
                let date = today.checked_add_days(Days::new(*in_days)).ok_or_else(|| {
                    E2eError::ScenarioParse(format!("delivery date {} days out of range", in_days))
                })?;
                Ok(date.format(DELIVERY_DATE_FORMAT).to_string())
            }
            DeliveryDate::Fixed(s) => {
                NaiveDate::parse_from_str(s, DELIVERY_DATE_FORMAT).map_err(|e| {
                    E2eError::ScenarioParse(format!("delivery date '{}' is not dd.MM.yyyy: {}", s, e))
                })?;
                Ok(s.clone())
            }
        }
    }
}

/// Options of the "Срок аренды" dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalPeriod {
    #[serde(rename = "сутки")]
    OneDay,
    #[serde(rename = "двое суток")]
    TwoDays,
    #[serde(rename = "трое суток")]
    ThreeDays,
    #[serde(rename = "четверо суток")]
    FourDays,
    #[serde(rename = "пятеро суток")]
    FiveDays,
    #[serde(rename = "шестеро суток")]
    SixDays,
    #[serde(rename = "семеро суток")]
    SevenDays,
}

impl RentalPeriod {
    /// Option text as rendered in the dropdown
    pub fn label(&self) -> &'static str {
        match self {
            RentalPeriod::OneDay => "сутки",
            RentalPeriod::TwoDays => "двое суток",
            RentalPeriod::ThreeDays => "трое суток",
            RentalPeriod::FourDays => "четверо суток",
            RentalPeriod::FiveDays => "пятеро суток",
            RentalPeriod::SixDays => "шестеро суток",
            RentalPeriod::SevenDays => "семеро суток",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScooterColor {
    BlackPearl,
    GreyHopelessness,
}

impl ScooterColor {
    pub fn label(&self) -> &'static str {
        match self {
            ScooterColor::BlackPearl => "чёрный жемчуг",
            ScooterColor::GreyHopelessness => "серая безысходность",
        }
    }
}

impl TryFrom<String> for ScooterColor {
    type Error = E2eError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let wanted = value.trim().to_lowercase();
        [ScooterColor::BlackPearl, ScooterColor::GreyHopelessness]
            .into_iter()
            .find(|color| color.label() == wanted)
            .ok_or_else(|| E2eError::ScenarioParse(format!("unknown scooter color '{}'", value)))
    }
}

impl From<ScooterColor> for String {
    fn from(color: ScooterColor) -> Self {
        color.label().to_string()
    }
}

impl ScenarioFile {
    /// Parse scenarios from a YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        let file: Self = serde_yaml::from_str(yaml)?;
        file.validate()?;
        Ok(file)
    }

    /// Parse scenarios from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| match e {
            E2eError::ScenarioParse(msg) => {
                E2eError::ScenarioParse(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load and merge all scenario files from a directory
    pub fn load_all(dir: &Path) -> E2eResult<Self> {
        let mut merged = Self::default();

        let mut paths: Vec<_> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        for path in paths {
            let file = Self::from_file(&path)?;
            merged.faq.extend(file.faq);
            merged.orders.extend(file.orders);
        }

        merged.validate()?;
        Ok(merged)
    }

    pub fn is_empty(&self) -> bool {
        self.faq.is_empty() && self.orders.is_empty()
    }

    /// Reject duplicate or path-like case names and malformed fixed dates
    pub fn validate(&self) -> E2eResult<()> {
        for order in &self.orders {
            check_case_name(&order.name)?;
        }

        let mut names = std::collections::HashSet::new();
        let all_names = self
            .faq
            .iter()
            .map(FaqCase::name)
            .chain(self.orders.iter().map(|o| o.name.clone()));
        for name in all_names {
            if !names.insert(name.clone()) {
                return Err(E2eError::ScenarioParse(format!("duplicate case '{}'", name)));
            }
        }

        for order in &self.orders {
            if let DeliveryDate::Fixed(_) = order.rental.delivery_date {
                // any valid day will do; only the format is checked here
                order.rental.delivery_date.render(NaiveDate::MIN)?;
            }
        }
        Ok(())
    }

    /// The cases the suite ships with
    pub fn builtin() -> Self {
        let faq = [
            "Сутки — 400 рублей. Оплата курьеру — наличными или картой.",
            "Пока что у нас так: один заказ — один самокат. Если хотите покататься с друзьями, можете просто сделать несколько заказов — один за другим.",
            "Допустим, вы оформляете заказ на 8 мая. Мы привозим самокат 8 мая в течение дня. Отсчёт времени аренды начинается с момента, когда вы оплатите заказ курьеру. Если мы привезли самокат 8 мая в 20:30, суточная аренда закончится 9 мая в 20:30.",
            "Только начиная с завтрашнего дня. Но скоро станем расторопнее.",
            "Пока что нет! Но если что-то срочное — всегда можно позвонить в поддержку по красивому номеру 1010.",
            "Самокат приезжает к вам с полной зарядкой. Этого хватает на восемь суток — даже если будете кататься без передышек и во сне. Зарядка не понадобится.",
            "Да, пока самокат не привезли. Штрафа не будет, объяснительной записки тоже не попросим. Все же свои.",
            "Да, обязательно. Всем самокатов! И Москве, и Московской области.",
        ]
        .into_iter()
        .zip(0u32..)
        .map(|(answer, index)| FaqCase {
            index,
            expected_answer: answer.to_string(),
        })
        .collect();

        let orders = vec![
            OrderCase {
                name: "order-header".to_string(),
                entry: OrderEntry::Header,
                customer: Customer {
                    first_name: "Иван".to_string(),
                    last_name: "Иванов".to_string(),
                    address: "ул. Ленина, д. 1".to_string(),
                    metro_station: "Лубянка".to_string(),
                    phone: "89123456789".to_string(),
                },
                rental: RentalDetails {
                    delivery_date: DeliveryDate::Relative { in_days: 3 },
                    rental_period: RentalPeriod::OneDay,
                    scooter_color: ScooterColor::BlackPearl,
                    comment: "Комментарий теста 1".to_string(),
                },
            },
            OrderCase {
                name: "order-footer".to_string(),
                entry: OrderEntry::Footer,
                customer: Customer {
                    first_name: "Петр".to_string(),
                    last_name: "Петров".to_string(),
                    address: "ул. Пушкина, д. 2".to_string(),
                    metro_station: "Пушкинская".to_string(),
                    phone: "89876543210".to_string(),
                },
                rental: RentalDetails {
                    delivery_date: DeliveryDate::Relative { in_days: 5 },
                    rental_period: RentalPeriod::TwoDays,
                    scooter_color: ScooterColor::GreyHopelessness,
                    comment: "Комментарий теста 2".to_string(),
                },
            },
        ];

        Self { faq, orders }
    }
}

/// Case names become file names of failure screenshots
fn check_case_name(name: &str) -> E2eResult<()> {
    if name.trim().is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(E2eError::ScenarioParse(format!(
            "case name '{}' must be a plain file name",
            name
        )));
    }
    Ok(())
}
