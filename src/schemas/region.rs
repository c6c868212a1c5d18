use garde::Validate;
use serde::{Deserialize, Serialize};

use super::{CountryRef, NameRef};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegionPayload {
    #[garde(required, length(min = 1, max = 128))]
    pub name: Option<String>,
    #[garde(dive)]
    pub country: Option<CountryRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionView {
    pub id: i32,
    pub name: String,
    pub country: Option<NameRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_country_is_optional() {
        let payload: RegionPayload = serde_json::from_str(r#"{"name": "Rioja"}"#).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.country.is_none());
    }

    #[test]
    fn null_country_counts_as_omitted() {
        let payload: RegionPayload =
            serde_json::from_str(r#"{"name": "Rioja", "country": null}"#).unwrap();
        assert!(payload.country.is_none());
    }

    #[test]
    fn empty_country_object_is_invalid() {
        let payload: RegionPayload =
            serde_json::from_str(r#"{"name": "Rioja", "country": {}}"#).unwrap();
        let report = payload.validate().unwrap_err();
        assert!(report.iter().any(|(path, _)| path.to_string() == "country.name"));
    }
}
