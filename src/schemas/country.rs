use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::database::models::Country;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CountryPayload {
    #[garde(required, length(min = 1, max = 64))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryView {
    pub id: i32,
    pub name: String,
}

impl From<Country> for CountryView {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
        }
    }
}
