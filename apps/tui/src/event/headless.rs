use crate::app::pages::DISEASE_NOT_FOUND_MESSAGE;
use crate::domain::{Coordinate, DiseaseInfo, Place};
use crate::map::{LocatedSearch, PlaceSearch, SearchError, GEOLOCATION_FAILED_MESSAGE};
use crate::services::Services;
use color_eyre::Result;
use serde::Serialize;

/// What a non-interactive run looked up.
#[derive(Debug, Default, Serialize)]
pub struct HeadlessReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease: Option<DiseaseReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearby: Option<NearbyReport>,
}

#[derive(Debug, Serialize)]
pub struct DiseaseReport {
    pub query: String,
    #[serde(flatten)]
    pub info: Option<DiseaseInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NearbyReport {
    pub query: Option<String>,
    pub center: Option<Coordinate>,
    pub places: Vec<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Looks up a disease and/or searches around an address without a
/// terminal UI. With neither given, searches around the configured device
/// location.
pub async fn run_headless(
    services: &Services,
    radius_m: u32,
    disease: Option<&str>,
    near: Option<&str>,
    json: bool,
) -> Result<HeadlessReport> {
    let mut report = HeadlessReport::default();

    if let Some(query) = disease {
        report.disease = Some(lookup_disease(services, query).await);
    }

    if near.is_some() || disease.is_none() {
        report.nearby = Some(search_nearby(services, radius_m, near).await);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(report)
}

async fn lookup_disease(services: &Services, query: &str) -> DiseaseReport {
    match services.disease.lookup(query).await {
        Ok(info) => DiseaseReport {
            query: query.to_string(),
            info: Some(info),
            error: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, query, "disease lookup failed");
            DiseaseReport {
                query: query.to_string(),
                info: None,
                error: Some(DISEASE_NOT_FOUND_MESSAGE.to_string()),
            }
        }
    }
}

async fn search_nearby(services: &Services, radius_m: u32, near: Option<&str>) -> NearbyReport {
    let search = PlaceSearch::new(services.places.clone(), services.geocoder.clone(), radius_m);

    let result: Result<LocatedSearch, String> = match near {
        Some(address) => search
            .search_address(address)
            .await
            .map_err(|err| log_search_error(&err)),
        None => match services.geolocator.current_position().await {
            Ok(center) => search
                .search(center)
                .await
                .map(|places| LocatedSearch { center, places })
                .map_err(|err| log_search_error(&err)),
            Err(err) => {
                tracing::warn!(error = %err, "geolocation failed");
                Err(GEOLOCATION_FAILED_MESSAGE.to_string())
            }
        },
    };

    match result {
        Ok(located) => NearbyReport {
            query: near.map(str::to_string),
            center: Some(located.center),
            places: located.places,
            error: None,
        },
        Err(error) => NearbyReport {
            query: near.map(str::to_string),
            center: None,
            places: Vec::new(),
            error: Some(error),
        },
    }
}

fn log_search_error(err: &SearchError) -> String {
    tracing::warn!(error = %err, "nearby search failed");
    err.user_message().to_string()
}

fn print_list(title: &str, items: &[String]) {
    println!("\n{title}:");
    if items.is_empty() {
        println!("- (none)");
    }
    for item in items {
        println!("- {item}");
    }
}

fn print_report(report: &HeadlessReport) {
    if let Some(disease) = &report.disease {
        println!("\nDisease: {}", disease.query);
        println!("=========");
        if let Some(error) = &disease.error {
            println!("{error}");
        }
        if let Some(info) = &disease.info {
            print_list("Prevention", &info.prevention);
            print_list("Medicines", &info.medicines);
            print_list("Home Remedies", &info.home_remedies);
        }
    }

    if let Some(nearby) = &report.nearby {
        println!("\nNearby Hospitals & Pharmacies");
        println!("=============================");
        if let Some(error) = &nearby.error {
            println!("{error}");
        }
        if let Some(center) = nearby.center {
            println!("Center: {center}");
        }
        for place in &nearby.places {
            let rating = place
                .rating
                .map_or_else(|| "N/A".to_string(), |rating| format!("{rating:.1}"));
            let distance = nearby
                .center
                .map(|center| format!("{:.1} km", center.distance_km(place.location)))
                .unwrap_or_default();
            println!(
                "- {} | {} | {} | {} | {}",
                place.name,
                place.category.label(),
                rating,
                distance,
                place.vicinity
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::testing::offline_services;
    use crate::domain::PlaceCategory;
    use crate::map::LOCATION_NOT_FOUND_MESSAGE;

    #[tokio::test]
    async fn disease_only_run_skips_nearby() {
        let services = offline_services();
        let report = run_headless(&services, 5000, Some("flu"), None, true)
            .await
            .unwrap();

        assert!(report.disease.unwrap().info.is_some());
        assert!(report.nearby.is_none());
    }

    #[tokio::test]
    async fn device_location_search_lists_both_categories() {
        let services = offline_services();
        let report = run_headless(&services, 5000, None, None, false)
            .await
            .unwrap();

        let nearby = report.nearby.unwrap();
        let categories: Vec<PlaceCategory> =
            nearby.places.iter().map(|place| place.category).collect();
        assert_eq!(categories, vec![PlaceCategory::Facility, PlaceCategory::Pharmacy]);
        assert!(nearby.error.is_none());
    }

    #[tokio::test]
    async fn unknown_address_reports_location_not_found() {
        let services = offline_services();
        let report = run_headless(&services, 5000, None, Some("Atlantis"), true)
            .await
            .unwrap();

        let nearby = report.nearby.unwrap();
        assert_eq!(nearby.error.as_deref(), Some(LOCATION_NOT_FOUND_MESSAGE));
        assert!(nearby.places.is_empty());
    }
}
