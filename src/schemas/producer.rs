use garde::Validate;
use serde::{Deserialize, Serialize};

use super::{NameRef, RegionRef};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProducerPayload {
    #[garde(required, length(min = 1, max = 128))]
    pub name: Option<String>,
    #[garde(length(max = 500))]
    pub description: Option<String>,
    #[garde(dive)]
    pub region: Option<RegionRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProducerView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub region: Option<NameRef>,
}
