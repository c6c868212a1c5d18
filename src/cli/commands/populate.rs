use serde_json::json;
use sqlx::PgConnection;
use tracing::{info, warn};

use super::connect;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::{Grape, Producer, Region, Wine};
use crate::database::Repository;
use crate::schemas::{
    CountryRef, GrapePayload, GrapeRef, ProducerPayload, ProducerRef, RegionPayload, RegionRef,
    WinePayload, WineTypeRef,
};
use crate::services::CatalogResource;
use crate::storage::{ObjectStore, S3Store};

struct SeedRegion {
    name: &'static str,
    country: &'static str,
}

struct SeedProducer {
    name: &'static str,
    region: &'static str,
    description: &'static str,
}

struct SeedGrape {
    name: &'static str,
    region: &'static str,
    description: &'static str,
}

struct SeedWine {
    name: &'static str,
    wine_type: &'static str,
    producer: &'static str,
    grape: &'static str,
    style: &'static str,
    year_produced: i32,
    alcohol_percentage: f64,
    picture: &'static str,
    description: &'static str,
}

const REGIONS: &[SeedRegion] = &[
    SeedRegion { name: "Tuscany", country: "Italy" },
    SeedRegion { name: "Loire Valley", country: "France" },
    SeedRegion { name: "Norte", country: "Portugal" },
];

const PRODUCERS: &[SeedProducer] = &[
    SeedProducer {
        name: "Tenuta Sette Ponti",
        region: "Tuscany",
        description: "Family estate in the hills between Arezzo and Florence, farming its vineyards \
                      with respect for local tradition and the balance of the land.",
    },
    SeedProducer {
        name: "Chateau du Poyet",
        region: "Loire Valley",
        description: "Estate of around 43 hectares in La Chapelle-Heulin producing Muscadet \
                      Sevre-et-Maine, owned by the Bonneau family.",
    },
    SeedProducer {
        name: "W. & J. Graham's",
        region: "Norte",
        description: "Independent family Port house for almost two centuries and one of the first \
                      to own vineyards in the Douro Valley.",
    },
];

const GRAPES: &[SeedGrape] = &[
    SeedGrape {
        name: "Sangiovese",
        region: "Tuscany",
        description: "The most planted red variety in Italy, behind Chianti Classico and Brunello \
                      di Montalcino.",
    },
    SeedGrape {
        name: "Melon de Bourgogne",
        region: "Loire Valley",
        description: "White grape of the Muscadet appellation with naturally high acidity, apple \
                      and citrus flavours and a mineral, sometimes saline finish.",
    },
    SeedGrape {
        name: "Touriga Nacional",
        region: "Norte",
        description: "Dark-skinned Portuguese variety with firm tannins, used for dry reds and the \
                      fortified wines of Oporto.",
    },
];

const WINES: &[SeedWine] = &[
    SeedWine {
        name: "Crognolo Toscana",
        wine_type: "red",
        producer: "Tenuta Sette Ponti",
        grape: "Sangiovese",
        style: "Savory and Classic",
        year_produced: 2018,
        alcohol_percentage: 14.5,
        picture: "tenuta-sette-ponti-crognolo-toscana.png",
        description: "Mostly Sangiovese with Merlot and Cabernet Sauvignon; plum, tobacco and \
                      baking spice with grainy tannins.",
    },
    SeedWine {
        name: "Muscadet Sevre et Maine Sur Lie",
        wine_type: "white",
        producer: "Chateau du Poyet",
        grape: "Melon de Bourgogne",
        style: "Green and Flinty",
        year_produced: 2018,
        alcohol_percentage: 14.5,
        picture: "chateau-de-poyet-muscadet-sevre-et-maine-sur-lie.png",
        description: "Pale and crisp, kept on its lees through the winter for a fresh, tangy finish.",
    },
    SeedWine {
        name: "20 year old tawny port",
        wine_type: "port",
        producer: "W. & J. Graham's",
        grape: "Touriga Nacional",
        style: "Rich and Warming",
        year_produced: 2018,
        alcohol_percentage: 20.0,
        picture: "grahams-20-years-old-tawny-port.png",
        description: "Amber tawny with a nutty bouquet, mature fruit and orange peel; rich, softly \
                      sweet and long.",
    },
];

/// Wine types created through the wines' nested references
const WINE_TYPES: &[&str] = &["red", "white", "port"];

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = connect(config).await?;
    let storage = S3Store::from_config(&config.storage).await;
    if storage.is_none() {
        warn!("AWS_BUCKET not set; seed wines get no picture");
    }

    let mut tx = db.begin().await?;
    let mut inserted = 0usize;

    for seed in REGIONS {
        let payload = RegionPayload {
            name: Some(seed.name.to_string()),
            country: Some(CountryRef {
                name: Some(seed.country.to_string()),
            }),
        };
        inserted += ensure::<Region>(&mut *tx, payload).await? as usize;
    }

    for seed in PRODUCERS {
        let payload = ProducerPayload {
            name: Some(seed.name.to_string()),
            description: Some(seed.description.to_string()),
            region: Some(RegionRef {
                name: Some(seed.region.to_string()),
            }),
        };
        inserted += ensure::<Producer>(&mut *tx, payload).await? as usize;
    }

    for seed in GRAPES {
        let payload = GrapePayload {
            name: Some(seed.name.to_string()),
            description: Some(seed.description.to_string()),
            region: Some(RegionRef {
                name: Some(seed.region.to_string()),
            }),
        };
        inserted += ensure::<Grape>(&mut *tx, payload).await? as usize;
    }

    for seed in WINES {
        let picture = match &storage {
            Some(store) => Some(store.presign_download(seed.picture).await?),
            None => None,
        };
        let payload = WinePayload {
            name: Some(seed.name.to_string()),
            style: Some(seed.style.to_string()),
            wine_type: Some(WineTypeRef {
                kind: Some(seed.wine_type.to_string()),
            }),
            producer: Some(ProducerRef {
                name: Some(seed.producer.to_string()),
            }),
            grape: Some(GrapeRef {
                name: Some(seed.grape.to_string()),
            }),
            year_produced: Some(seed.year_produced),
            alcohol_percentage: Some(seed.alcohol_percentage),
            volume: None,
            picture: None,
            description: Some(seed.description.to_string()),
            uploaded_picture: picture,
        };
        inserted += ensure::<Wine>(&mut *tx, payload).await? as usize;
    }

    tx.commit().await?;
    db.close().await;

    info!("Seed catalog applied, {} new rows", inserted);
    output_success(
        output_format,
        &format!("Database populated ({} new entries)", inserted),
        Some(json!({
            "inserted": inserted,
            "wine_types": WINE_TYPES,
        })),
    )
}

/// Create the row unless its key exists; nested references create missing parents.
async fn ensure<T: CatalogResource>(
    conn: &mut PgConnection,
    payload: T::Payload,
) -> anyhow::Result<bool> {
    let key = T::payload_key(&payload).unwrap_or_default().to_string();
    if Repository::<T>::new(&mut *conn).exists(&key).await? {
        return Ok(false);
    }
    T::create(&mut *conn, payload).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use garde::Validate;

    #[test]
    fn seed_wines_pass_validation() {
        for seed in WINES {
            let payload = WinePayload {
                name: Some(seed.name.to_string()),
                style: Some(seed.style.to_string()),
                year_produced: Some(seed.year_produced),
                alcohol_percentage: Some(seed.alcohol_percentage),
                description: Some(seed.description.to_string()),
                ..Default::default()
            };
            assert!(payload.validate().is_ok(), "{} is invalid", seed.name);
        }
    }

    #[test]
    fn seed_references_point_at_seeded_rows() {
        for wine in WINES {
            assert!(PRODUCERS.iter().any(|p| p.name == wine.producer));
            assert!(GRAPES.iter().any(|g| g.name == wine.grape));
            assert!(WINE_TYPES.contains(&wine.wine_type));
        }
        for producer in PRODUCERS {
            assert!(REGIONS.iter().any(|r| r.name == producer.region));
        }
    }
}
