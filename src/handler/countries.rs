//! Lookup and filter endpoints
//!
//! Each handler validates its query parameters, reads the store, and
//! produces the JSON response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::RequestContext;
use crate::error::ApiError;
use crate::http;
use crate::store::{BoundingBox, CountryStore, RegionFilter};

/// GET /getCountry — case-insensitive exact lookup by name
pub async fn get_country(ctx: &RequestContext, store: &CountryStore) -> Response<Full<Bytes>> {
    let Some(name) = ctx.param("name") else {
        return http::error_response(
            &ApiError::missing_params("A name parameter is required."),
            ctx.is_head,
        );
    };

    match store.find_by_name(name).await {
        Some(country) => http::json_response(StatusCode::OK, &country, ctx.is_head),
        None => http::error_response(&ApiError::not_found("Country not found"), ctx.is_head),
    }
}

/// GET /getCountries — inclusive bounding-box filter on both coordinates
pub async fn get_countries(ctx: &RequestContext, store: &CountryStore) -> Response<Full<Bytes>> {
    let bounds = match parse_bounds(ctx) {
        Ok(bounds) => bounds,
        Err(e) => return http::error_response(&e, ctx.is_head),
    };

    let matches = store.filter_by_bounding_box(bounds).await;
    if matches.is_empty() {
        // valid query, no match: 404 without a machine id
        return http::error_response(
            &ApiError::not_found("No countries found within the specified range."),
            ctx.is_head,
        );
    }
    http::json_response(StatusCode::OK, &matches, ctx.is_head)
}

/// GET /getAllCountries — full dump wrapped in a `data` envelope
pub async fn get_all_countries(ctx: &RequestContext, store: &CountryStore) -> Response<Full<Bytes>> {
    let data = store.list_all().await;
    http::json_response(
        StatusCode::OK,
        &serde_json::json!({ "data": data }),
        ctx.is_head,
    )
}

/// GET /getRegion — filter by exactly one of region or subregion
pub async fn get_region(ctx: &RequestContext, store: &CountryStore) -> Response<Full<Bytes>> {
    let filter = match (ctx.param("region"), ctx.param("subregion")) {
        (Some(region), None) => RegionFilter::Region(region.to_string()),
        (None, Some(subregion)) => RegionFilter::Subregion(subregion.to_string()),
        _ => {
            return http::error_response(
                &ApiError::invalid_params(
                    "Either a region or a subregion is allowed. Neither or both is forbidden.",
                ),
                ctx.is_head,
            );
        }
    };

    let matches = store.filter_by_region(&filter).await;
    if matches.is_empty() {
        // the supplied value named no known region: validation-level rejection
        return http::error_response(
            &ApiError::invalid_params("No countries match that region or subregion."),
            ctx.is_head,
        );
    }
    http::json_response(StatusCode::OK, &matches, ctx.is_head)
}

/// GET /getFavorites — favorites list wrapped in a `favorites` envelope
pub async fn get_favorites(ctx: &RequestContext, store: &CountryStore) -> Response<Full<Bytes>> {
    let favorites = store.list_favorites().await;
    http::json_response(
        StatusCode::OK,
        &serde_json::json!({ "favorites": favorites }),
        ctx.is_head,
    )
}

/// Validate the four bounding-box parameters: presence, numeric form,
/// and min <= max on both axes.
fn parse_bounds(ctx: &RequestContext) -> Result<BoundingBox, ApiError> {
    let mut values = [0.0_f64; 4];
    for (slot, key) in values
        .iter_mut()
        .zip(["latmin", "latmax", "longmin", "longmax"])
    {
        let Some(raw) = ctx.param(key) else {
            return Err(ApiError::missing_params("All four parameters are required."));
        };
        *slot = raw.parse().map_err(|_| {
            ApiError::invalid_params("One or more of the parameters were not numbers.")
        })?;
    }

    let [lat_min, lat_max, lon_min, lon_max] = values;
    if lat_min > lat_max || lon_min > lon_max {
        return Err(ApiError::invalid_params(
            "Minimum values must not exceed maximum values.",
        ));
    }

    Ok(BoundingBox {
        lat_min,
        lat_max,
        lon_min,
        lon_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Country, Finance, TimezoneEntry};
    use http_body_util::BodyExt;
    use std::collections::HashMap;

    fn ctx(pairs: &[(&str, &str)]) -> RequestContext {
        RequestContext {
            query: pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<HashMap<_, _>>(),
            is_head: false,
            if_none_match: None,
        }
    }

    fn country(name: &str, region: &str, subregion: &str, lat: f64, lon: f64) -> Country {
        Country {
            name: name.to_string(),
            capital: format!("{name} City"),
            region: region.to_string(),
            subregion: subregion.to_string(),
            nationality: format!("{name}ian"),
            latitude: lat,
            longitude: lon,
            finance: Finance {
                currency: "USD".to_string(),
                currency_name: "Dollar".to_string(),
                currency_symbol: "$".to_string(),
            },
            timezones: vec![TimezoneEntry {
                zone_name: format!("Test/{name}"),
                gmt_offset: "0".to_string(),
                gmt_offset_name: "UTC±00:00".to_string(),
                abbreviation: "UTC".to_string(),
                tz_name: "Coordinated Universal Time".to_string(),
            }],
            review: None,
        }
    }

    fn fixture_store() -> CountryStore {
        CountryStore::new(vec![
            country("Inside", "Americas", "South America", 5.0, 5.0),
            country("Outside", "Americas", "Northern America", 15.0, 5.0),
            country("Kenya", "Africa", "Eastern Africa", 1.0, 38.0),
        ])
    }

    async fn json_body(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_country_found_and_missing() {
        let store = fixture_store();

        let response = get_country(&ctx(&[("name", "kenya")]), &store).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["name"], "Kenya");

        let response = get_country(&ctx(&[("name", "Atlantis")]), &store).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Country not found");
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn test_get_country_requires_name() {
        let store = fixture_store();
        let response = get_country(&ctx(&[]), &store).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["id"], "missingParams");
    }

    #[tokio::test]
    async fn test_bounding_box_includes_and_excludes() {
        let store = fixture_store();
        let response = get_countries(
            &ctx(&[
                ("latmin", "0"),
                ("latmax", "10"),
                ("longmin", "0"),
                ("longmax", "10"),
            ]),
            &store,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Inside"]);
    }

    #[tokio::test]
    async fn test_bounding_box_missing_and_invalid_params() {
        let store = fixture_store();

        let response = get_countries(&ctx(&[("latmin", "0")]), &store).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["id"], "missingParams");

        let response = get_countries(
            &ctx(&[
                ("latmin", "zero"),
                ("latmax", "10"),
                ("longmin", "0"),
                ("longmax", "10"),
            ]),
            &store,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["id"], "invalidParams");
    }

    #[tokio::test]
    async fn test_bounding_box_rejects_inverted_range() {
        let store = fixture_store();
        let response = get_countries(
            &ctx(&[
                ("latmin", "10"),
                ("latmax", "0"),
                ("longmin", "0"),
                ("longmax", "10"),
            ]),
            &store,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["id"], "invalidParams");
    }

    #[tokio::test]
    async fn test_bounding_box_empty_result_is_not_found() {
        let store = fixture_store();
        let response = get_countries(
            &ctx(&[
                ("latmin", "80"),
                ("latmax", "89"),
                ("longmin", "0"),
                ("longmax", "1"),
            ]),
            &store,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(json_body(response).await.get("id").is_none());
    }

    #[tokio::test]
    async fn test_get_region_exclusivity() {
        let store = fixture_store();

        let response = get_region(&ctx(&[]), &store).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["id"], "invalidParams");

        let response = get_region(
            &ctx(&[("region", "Americas"), ("subregion", "South America")]),
            &store,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["id"], "invalidParams");
    }

    #[tokio::test]
    async fn test_get_region_filters_case_insensitively() {
        let store = fixture_store();
        let response = get_region(&ctx(&[("region", "AMERICAS")]), &store).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);

        let response = get_region(&ctx(&[("subregion", "eastern africa")]), &store).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await[0]["name"], "Kenya");
    }

    #[tokio::test]
    async fn test_get_region_unknown_value_is_rejected() {
        let store = fixture_store();
        let response = get_region(&ctx(&[("region", "Atlantis")]), &store).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["id"], "invalidParams");
    }

    #[tokio::test]
    async fn test_get_all_and_favorites_envelopes() {
        let store = fixture_store();
        store.add_favorite("Kenya").await.unwrap();

        let response = get_all_countries(&ctx(&[]), &store).await;
        let body = json_body(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let response = get_favorites(&ctx(&[]), &store).await;
        let body = json_body(response).await;
        assert_eq!(body["favorites"].as_array().unwrap().len(), 1);
        assert_eq!(body["favorites"][0]["name"], "Kenya");
    }
}
