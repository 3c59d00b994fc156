use crate::core::error::{FxError, Result};
use crate::core::source::RateSource;
use crate::core::table::RateTable;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_ENDPOINT: &str = "https://www.cbr.ru/scripts/XML_daily.asp";

/// Currency every quote in the feed is expressed in.
pub const FEED_BASE: &str = "RUB";

#[derive(Debug, Deserialize)]
struct ValCurs {
    #[serde(rename = "@Date", default)]
    date: Option<String>,
    #[serde(rename = "Valute", default)]
    valutes: Vec<Valute>,
}

#[derive(Debug, Deserialize)]
struct Valute {
    #[serde(rename = "CharCode", default)]
    char_code: Option<String>,
    #[serde(rename = "Value", default)]
    value: Option<String>,
    #[serde(rename = "Nominal", default)]
    nominal: Option<String>,
}

/// A single quote from the feed: `value` base units buy `nominal` units of `code`.
#[derive(Debug, PartialEq)]
struct RateRecord {
    code: String,
    value: f64,
    nominal: u32,
}

impl RateRecord {
    /// Parses a feed entry. `Ok(None)` means a field is missing and the entry is skipped.
    fn from_valute(valute: &Valute) -> Result<Option<Self>> {
        let field = |f: &Option<String>| {
            f.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let (Some(code), Some(value), Some(nominal)) = (
            field(&valute.char_code),
            field(&valute.value),
            field(&valute.nominal),
        ) else {
            return Ok(None);
        };

        let value: f64 = value
            .replace(',', ".")
            .parse()
            .map_err(|_| FxError::ParseError(format!("Invalid value '{value}' for {code}")))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(FxError::ParseError(format!(
                "Non-positive value '{value}' for {code}"
            )));
        }

        let nominal: u32 = nominal
            .parse()
            .map_err(|_| FxError::ParseError(format!("Invalid nominal '{nominal}' for {code}")))?;
        if nominal == 0 {
            return Err(FxError::ParseError(format!("Zero nominal for {code}")));
        }

        Ok(Some(RateRecord {
            code: code.to_uppercase(),
            value,
            nominal,
        }))
    }

    /// Units of the currency per one unit of base currency.
    fn units_per_base(&self) -> f64 {
        f64::from(self.nominal) / self.value
    }
}

fn parse_feed_date(date: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(date.trim(), "%d.%m.%Y") {
        Ok(d) => Some(d),
        Err(e) => {
            debug!(date, error = %e, "Ignoring unparseable feed date");
            None
        }
    }
}

/// Parses a daily rates document into a table against `base`.
///
/// The feed quotes every currency in [`FEED_BASE`]; the parsed table is
/// rebased onto `base`, which must then be quoted by the feed. Incomplete
/// entries are skipped, but a feed left with no usable entry at all is a
/// `ParseError` so that the caller falls back instead of going live with
/// only the base currency.
fn parse_feed(body: &str, base: &str) -> Result<RateTable> {
    let doc: ValCurs =
        quick_xml::de::from_str(body).map_err(|e| FxError::ParseError(e.to_string()))?;

    let as_of = doc.date.as_deref().and_then(parse_feed_date);
    let mut table = RateTable::new(FEED_BASE).with_as_of(as_of);
    let mut records = 0;

    for valute in &doc.valutes {
        let Some(record) = RateRecord::from_valute(valute)? else {
            debug!(entry = ?valute, "Skipping incomplete feed entry");
            continue;
        };
        if record.code == FEED_BASE {
            continue;
        }
        table
            .insert(&record.code, record.units_per_base())
            .map_err(|e| FxError::ParseError(e.to_string()))?;
        records += 1;
    }

    if records == 0 {
        return Err(FxError::ParseError(
            "Feed contains no currency entries".to_string(),
        ));
    }
    debug!(records, "Parsed rate feed");

    if base == FEED_BASE {
        return Ok(table);
    }
    table.rebased(base).map_err(|_| {
        FxError::ParseError(format!("Feed does not quote base currency {base}"))
    })
}

/// Daily official rates published by the Central Bank of Russia.
pub struct CbrRateSource {
    endpoint: String,
    timeout: Duration,
    base: String,
}

impl CbrRateSource {
    pub fn new(endpoint: &str, timeout: Duration, base: &str) -> Self {
        CbrRateSource {
            endpoint: endpoint.to_string(),
            timeout,
            base: base.to_string(),
        }
    }
}

#[async_trait]
impl RateSource for CbrRateSource {
    #[instrument(
        name = "CbrRatesFetch",
        skip(self),
        fields(endpoint = %self.endpoint)
    )]
    async fn fetch(&self) -> Result<RateTable> {
        debug!("Requesting daily rates from {}", self.endpoint);

        let client = reqwest::Client::builder()
            .user_agent("fxconv/0.1")
            .timeout(self.timeout)
            .build()
            .map_err(|e| FxError::SourceUnavailable(format!("Failed to build client: {e}")))?;

        let response = client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FxError::SourceUnavailable(format!("Request error: {e}")))?;

        if !response.status().is_success() {
            return Err(FxError::SourceUnavailable(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FxError::SourceUnavailable(format!("Failed to read response: {e}")))?;

        parse_feed(&text, &self.base)
    }
}
