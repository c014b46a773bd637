use crate::models::{BorderCountry, Country, CountryDetail};
use leptos::logging::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_API_URL: &str = "https://restcountries.com";

const CATALOG_FIELDS: &str = "name,flags,region,languages,population,capital";
const DETAIL_FIELDS: &str = "name,flags,region,languages,population,capital,latlng,cca2,borders";
const BORDER_FIELDS: &str = "name,flags,capital";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{context} ({status})")]
    Http { status: u16, context: String },
    #[error("Unexpected response: {0}")]
    Parse(String),
    #[error("Country not found: {0}")]
    NotFound(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        // Both `window.ENV.COUNTRIES_API_URL` and `window.ENV.countries_api_url` are accepted.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["COUNTRIES_API_URL", "countries_api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self { api_url: url_str };
                            }
                        }
                    }
                }
            }
        }

        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize, Default)]
struct NameRecord {
    #[serde(default)]
    common: String,
}

#[derive(Deserialize, Default)]
struct FlagsRecord {
    #[serde(default)]
    svg: Option<String>,
    #[serde(default)]
    png: Option<String>,
}

impl FlagsRecord {
    fn url(self) -> String {
        self.svg.or(self.png).unwrap_or_default()
    }
}

/// Country object as returned by `/v3.1`. Every field but the name may be absent
/// depending on the `fields` query.
#[derive(Deserialize)]
struct CountryRecord {
    name: NameRecord,
    #[serde(default)]
    flags: Option<FlagsRecord>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    languages: Option<BTreeMap<String, String>>,
    #[serde(default)]
    population: Option<u64>,
    #[serde(default)]
    capital: Option<Vec<String>>,
    #[serde(default)]
    latlng: Option<Vec<f64>>,
    #[serde(default)]
    cca2: Option<String>,
    #[serde(default)]
    borders: Option<Vec<String>>,
}

impl CountryRecord {
    fn into_detail(self) -> CountryDetail {
        let latlng = match self.latlng.as_deref() {
            Some([lat, lng, ..]) => Some((*lat, *lng)),
            _ => None,
        };

        CountryDetail {
            latlng,
            code: self.cca2,
            borders: self.borders.unwrap_or_default(),
            country: Country {
                name: self.name.common,
                flag_url: self.flags.unwrap_or_default().url(),
                region: self.region.unwrap_or_default(),
                languages: self.languages.unwrap_or_default(),
                population: self.population.unwrap_or_default(),
                capitals: self.capital.unwrap_or_default(),
            },
        }
    }
}

impl From<CountryRecord> for Country {
    fn from(record: CountryRecord) -> Self {
        record.into_detail().country
    }
}

impl From<CountryRecord> for BorderCountry {
    fn from(record: CountryRecord) -> Self {
        let country = Country::from(record);
        BorderCountry {
            name: country.name,
            flag_url: country.flag_url,
            capitals: country.capitals,
        }
    }
}

/// Accepts a JSON array, or a single object where the API answers with one.
fn parse_records(body: &str) -> ApiResult<Vec<CountryRecord>> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(ApiError::parse)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        other @ serde_json::Value::Object(_) => vec![other],
        other => return Err(ApiError::parse(format!("expected a list, got {other}"))),
    };
    items
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(ApiError::parse))
        .collect()
}

pub(crate) fn parse_catalog(body: &str) -> ApiResult<Vec<Country>> {
    Ok(parse_records(body)?.into_iter().map(Country::from).collect())
}

pub(crate) fn parse_detail(name: &str, body: &str) -> ApiResult<CountryDetail> {
    parse_records(body)?
        .into_iter()
        .next()
        .map(CountryRecord::into_detail)
        .ok_or_else(|| ApiError::NotFound(name.to_string()))
}

pub(crate) fn parse_borders(body: &str) -> ApiResult<Vec<BorderCountry>> {
    Ok(parse_records(body)?.into_iter().map(BorderCountry::from).collect())
}

pub(crate) fn parse_names(body: &str) -> ApiResult<Vec<String>> {
    Ok(parse_records(body)?
        .into_iter()
        .map(|r| r.name.common)
        .filter(|n| !n.is_empty())
        .collect())
}

/// A country plus its neighbours, resolved in two sequential requests.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedCountry {
    pub detail: CountryDetail,
    pub borders: Vec<BorderCountry>,
}

/// Read-only client for the REST Countries API.
#[derive(Clone, Debug)]
pub struct CountriesClient {
    base_url: String,
}

impl CountriesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    pub(crate) fn catalog_url(&self) -> String {
        format!("{}/v3.1/all?fields={CATALOG_FIELDS}", self.base_url)
    }

    pub(crate) fn country_url(&self, name: &str) -> String {
        format!(
            "{}/v3.1/name/{}?fields={DETAIL_FIELDS}",
            self.base_url,
            urlencoding::encode(name)
        )
    }

    pub(crate) fn borders_url(&self, codes: &[String]) -> String {
        format!(
            "{}/v3.1/alpha?codes={}&fields={BORDER_FIELDS}",
            self.base_url,
            codes.join(",")
        )
    }

    pub(crate) fn names_url(&self, names: &[String]) -> String {
        format!(
            "{}/v3.1/name/{}?fields=name",
            self.base_url,
            urlencoding::encode(&names.join(","))
        )
    }

    async fn get_text(&self, url: &str, context: &str) -> ApiResult<String> {
        let client = reqwest::Client::new();
        let res = client.get(url).send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.text().await.map_err(ApiError::network)
        } else {
            Err(ApiError::Http {
                status: res.status().as_u16(),
                context: context.to_string(),
            })
        }
    }

    /// The full catalog, in API order.
    pub async fn fetch_all(&self) -> ApiResult<Vec<Country>> {
        let body = self
            .get_text(&self.catalog_url(), "Failed to fetch countries")
            .await?;
        parse_catalog(&body)
    }

    /// First match for `name` with the extended field set.
    pub async fn fetch_country(&self, name: &str) -> ApiResult<CountryDetail> {
        let body = self
            .get_text(&self.country_url(name), "Failed to fetch country details")
            .await
            .map_err(|e| match e {
                ApiError::Http { status: 404, .. } => ApiError::NotFound(name.to_string()),
                other => other,
            })?;
        parse_detail(name, &body)
    }

    pub async fn fetch_borders(&self, codes: &[String]) -> ApiResult<Vec<BorderCountry>> {
        if codes.is_empty() {
            return Ok(vec![]);
        }
        let body = self
            .get_text(&self.borders_url(codes), "Failed to fetch border countries")
            .await?;
        parse_borders(&body)
    }

    /// Canonical names for a batch of favorited countries.
    pub async fn fetch_names(&self, names: &[String]) -> ApiResult<Vec<String>> {
        if names.is_empty() {
            return Ok(vec![]);
        }
        let body = self
            .get_text(&self.names_url(names), "Failed to fetch favorite countries")
            .await?;
        parse_names(&body)
    }

    /// Fetches the country, then its border countries.
    ///
    /// A failed border lookup is logged and leaves the border list empty.
    pub async fn resolve_country(&self, name: &str) -> ApiResult<ResolvedCountry> {
        let detail = self.fetch_country(name).await?;
        if detail.borders.is_empty() {
            return Ok(merge_borders(name, detail, Ok(vec![])));
        }
        let borders = self.fetch_borders(&detail.borders).await;
        Ok(merge_borders(name, detail, borders))
    }
}

pub(crate) fn merge_borders(
    name: &str,
    detail: CountryDetail,
    borders: ApiResult<Vec<BorderCountry>>,
) -> ResolvedCountry {
    let borders = borders.unwrap_or_else(|e| {
        warn!("border lookup for `{name}` failed: {e}");
        vec![]
    });
    ResolvedCountry { detail, borders }
}

impl Default for CountriesClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "name": {"common": "France", "official": "French Republic"},
            "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg"},
            "region": "Europe",
            "languages": {"fra": "French"},
            "population": 67391582,
            "capital": ["Paris"]
        },
        {
            "name": {"common": "Antarctica"},
            "flags": {"png": "https://flagcdn.com/w320/aq.png"},
            "region": "Antarctic",
            "population": 1000,
            "capital": []
        }
    ]"#;

    #[test]
    fn test_catalog_contract_deserialize() {
        let countries = parse_catalog(CATALOG).expect("catalog should parse");
        assert_eq!(countries.len(), 2);

        let france = &countries[0];
        assert_eq!(france.name, "France");
        assert_eq!(france.flag_url, "https://flagcdn.com/fr.svg");
        assert_eq!(france.languages.get("fra").map(String::as_str), Some("French"));
        assert_eq!(france.capital(), Some("Paris"));

        let antarctica = &countries[1];
        assert_eq!(antarctica.flag_url, "https://flagcdn.com/w320/aq.png");
        assert!(antarctica.languages.is_empty());
        assert_eq!(antarctica.capital(), None);
    }

    #[test]
    fn test_detail_uses_first_element() {
        let body = r#"[
            {
                "name": {"common": "France"},
                "flags": {"svg": "https://flagcdn.com/fr.svg"},
                "region": "Europe",
                "languages": {"fra": "French"},
                "population": 67391582,
                "capital": ["Paris"],
                "latlng": [46.0, 2.0],
                "cca2": "FR",
                "borders": ["AND", "BEL", "DEU"]
            },
            {"name": {"common": "French Polynesia"}}
        ]"#;
        let detail = parse_detail("France", body).expect("detail should parse");
        assert_eq!(detail.country.name, "France");
        assert_eq!(detail.latlng, Some((46.0, 2.0)));
        assert_eq!(detail.code.as_deref(), Some("FR"));
        assert_eq!(detail.borders, vec!["AND", "BEL", "DEU"]);
    }

    #[test]
    fn test_detail_empty_array_is_not_found() {
        let err = parse_detail("Atlantis", "[]").expect_err("should be not found");
        assert_eq!(err, ApiError::NotFound("Atlantis".to_string()));
        assert_eq!(err.to_string(), "Country not found: Atlantis");
    }

    #[test]
    fn test_island_without_borders() {
        let body = r#"[{"name": {"common": "Iceland"}, "borders": null, "languages": null}]"#;
        let detail = parse_detail("Iceland", body).expect("detail should parse");
        assert!(detail.borders.is_empty());
        assert!(detail.latlng.is_none());
    }

    #[test]
    fn test_borders_contract_deserialize() {
        let body = r#"[{"name": {"common": "Germany"}, "flags": {"svg": "https://flagcdn.com/de.svg"}, "capital": ["Berlin"]}]"#;
        let borders = parse_borders(body).expect("borders should parse");
        assert_eq!(
            borders,
            vec![BorderCountry {
                name: "Germany".to_string(),
                flag_url: "https://flagcdn.com/de.svg".to_string(),
                capitals: vec!["Berlin".to_string()],
            }]
        );
    }

    #[test]
    fn test_names_accept_single_object() {
        let names = parse_names(r#"{"name": {"common": "Peru"}}"#).expect("should parse");
        assert_eq!(names, vec!["Peru"]);
        assert!(parse_names("42").is_err());
        assert!(parse_names("not json").is_err());
    }

    #[test]
    fn test_urls() {
        let client = CountriesClient::new("https://restcountries.com/");
        assert_eq!(
            client.catalog_url(),
            "https://restcountries.com/v3.1/all?fields=name,flags,region,languages,population,capital"
        );
        assert_eq!(
            client.country_url("United States"),
            "https://restcountries.com/v3.1/name/United%20States?fields=name,flags,region,languages,population,capital,latlng,cca2,borders"
        );
        assert_eq!(
            client.borders_url(&["DEU".to_string(), "BEL".to_string()]),
            "https://restcountries.com/v3.1/alpha?codes=DEU,BEL&fields=name,flags,capital"
        );
        assert_eq!(
            client.names_url(&["Peru".to_string(), "Chile".to_string()]),
            "https://restcountries.com/v3.1/name/Peru%2CChile?fields=name"
        );
    }

    fn peru() -> CountryDetail {
        let body = r#"[{"name": {"common": "Peru"}, "region": "Americas", "borders": ["BOL", "CHL"]}]"#;
        parse_detail("Peru", body).expect("detail should parse")
    }

    #[test]
    fn test_failed_border_lookup_keeps_the_country() {
        let resolved = merge_borders("Peru", peru(), Err(ApiError::Network("offline".to_string())));
        assert_eq!(resolved.detail, peru());
        assert!(resolved.borders.is_empty());

        let chile = BorderCountry {
            name: "Chile".to_string(),
            flag_url: String::new(),
            capitals: vec!["Santiago".to_string()],
        };
        let resolved = merge_borders("Peru", peru(), Ok(vec![chile.clone()]));
        assert_eq!(resolved.borders, vec![chile]);
    }

    #[test]
    fn test_no_border_codes_needs_no_request() {
        use std::future::Future;
        use std::task::{Context, Poll, Waker};

        // Nothing listens here; a request would not resolve on the first poll.
        let client = CountriesClient::new("http://127.0.0.1:9");
        let lookup = std::pin::pin!(client.fetch_borders(&[]));
        let mut cx = Context::from_waker(Waker::noop());
        assert_eq!(lookup.poll(&mut cx), Poll::Ready(Ok(vec![])));
    }

    #[test]
    fn test_http_error_message() {
        let err = ApiError::Http {
            status: 500,
            context: "Failed to fetch countries".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch countries (500)");
    }
}
