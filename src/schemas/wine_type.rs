use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::database::models::WineType;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WineTypePayload {
    #[serde(rename = "type")]
    #[garde(required, length(min = 1, max = 64))]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WineTypeView {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<WineType> for WineTypeView {
    fn from(wine_type: WineType) -> Self {
        Self {
            id: wine_type.id,
            kind: wine_type.kind,
        }
    }
}
