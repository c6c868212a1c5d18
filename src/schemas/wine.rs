use chrono::Datelike;
use garde::Validate;
use serde::{Deserialize, Serialize};

use super::{GrapeRef, NameRef, ProducerRef, TypeRef, WineTypeRef};

/// Earliest vintage accepted
pub const FIRST_VINTAGE: i32 = 1867;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WinePayload {
    #[garde(required, length(min = 1, max = 128))]
    pub name: Option<String>,
    #[garde(length(max = 128))]
    pub style: Option<String>,
    #[garde(dive)]
    pub wine_type: Option<WineTypeRef>,
    #[garde(dive)]
    pub producer: Option<ProducerRef>,
    #[garde(dive)]
    pub grape: Option<GrapeRef>,
    #[garde(custom(check_vintage))]
    pub year_produced: Option<i32>,
    #[garde(range(min = 0.0, max = 100.0))]
    pub alcohol_percentage: Option<f64>,
    #[garde(range(min = 187, max = 1500))]
    pub volume: Option<i32>,
    #[garde(length(max = 500))]
    pub picture: Option<String>,
    #[garde(length(max = 500))]
    pub description: Option<String>,
    /// Presigned URL of a picture stored by this request; set by the server, never by clients
    #[serde(skip)]
    #[garde(skip)]
    pub uploaded_picture: Option<String>,
}

fn check_vintage(value: &Option<i32>, _context: &()) -> garde::Result {
    let Some(year) = value else {
        return Ok(());
    };
    let current = chrono::Utc::now().year();
    if *year < FIRST_VINTAGE || *year > current {
        return Err(garde::Error::new(format!(
            "must be between {} and {}",
            FIRST_VINTAGE, current
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WineView {
    pub id: i32,
    pub name: String,
    pub style: Option<String>,
    pub wine_type: Option<TypeRef>,
    pub producer: Option<NameRef>,
    pub grape: Option<NameRef>,
    pub year_produced: Option<i32>,
    pub alcohol_percentage: Option<f64>,
    pub volume: Option<i32>,
    pub picture: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> WinePayload {
        WinePayload {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn failed_fields(payload: &WinePayload) -> Vec<String> {
        match payload.validate() {
            Ok(()) => Vec::new(),
            Err(report) => report.iter().map(|(path, _)| path.to_string()).collect(),
        }
    }

    #[test]
    fn minimal_wine_is_valid() {
        assert!(named("Gran Reserva 904").validate().is_ok());
    }

    #[test]
    fn vintage_bounds() {
        let mut payload = named("Old");
        payload.year_produced = Some(FIRST_VINTAGE);
        assert!(failed_fields(&payload).is_empty());

        payload.year_produced = Some(FIRST_VINTAGE - 1);
        assert_eq!(failed_fields(&payload), vec!["year_produced"]);

        payload.year_produced = Some(chrono::Utc::now().year() + 1);
        assert_eq!(failed_fields(&payload), vec!["year_produced"]);
    }

    #[test]
    fn volume_bounds() {
        let mut payload = named("Magnum");
        payload.volume = Some(1500);
        assert!(failed_fields(&payload).is_empty());

        payload.volume = Some(186);
        assert_eq!(failed_fields(&payload), vec!["volume"]);
    }

    #[test]
    fn alcohol_is_a_percentage() {
        let mut payload = named("Strong");
        payload.alcohol_percentage = Some(100.5);
        assert_eq!(failed_fields(&payload), vec!["alcohol_percentage"]);
    }

    #[test]
    fn uploaded_picture_url_is_not_length_checked() {
        let mut payload = named("Long Label");
        payload.uploaded_picture = Some(format!("https://pictures.test/{}", "a".repeat(2000)));
        assert!(failed_fields(&payload).is_empty());

        payload.picture = Some("b".repeat(501));
        assert_eq!(failed_fields(&payload), vec!["picture"]);
    }

    #[test]
    fn clients_cannot_set_uploaded_picture() {
        let parsed = serde_json::from_str::<WinePayload>(
            r#"{"name": "Sneaky", "uploaded_picture": "https://elsewhere.test/x.png"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn nested_references_parse() {
        let payload: WinePayload = serde_json::from_value(serde_json::json!({
            "name": "Viña Tondonia",
            "wine_type": {"type": "red"},
            "producer": {"name": "López de Heredia"},
            "grape": {"name": "Tempranillo"},
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.wine_type.and_then(|t| t.kind).as_deref(), Some("red"));
    }
}
