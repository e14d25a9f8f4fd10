//! HTTP client for the data endpoints.
//!
//! URL components in this context:
//!
//! ```text
//! http://127.0.0.1:8443/update_world_map
//! \____________________/\______________/
//!           |                  |
//!        base url             path
//! ```
//!
//! Every path comes from the [`Source`] configuration section.
pub mod responses;

use std::sync::Arc;

use peermap_configuration::Source;
use peermap_primitives::{CountrySnapshot, Counters, TimeSeriesPoint};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use self::responses::{DefaultMapData, Shape};

/// Errors returned by the data [`Client`].
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("unable to build the http client: {source}")]
    Builder { source: Arc<reqwest::Error> },

    #[error("invalid endpoint path `{path}`: {source}")]
    InvalidPath { path: String, source: url::ParseError },

    #[error("request to {url} failed: {source}")]
    Request { url: Url, source: Arc<reqwest::Error> },

    #[error("{url} answered with status {status}")]
    Status { url: Url, status: StatusCode },

    #[error("unable to decode the body sent by {url}: {source}")]
    Decode { url: Url, source: Arc<serde_json::Error> },

    #[error("{url} sent the {found} where the {expected} was expected")]
    UnexpectedShape { url: Url, expected: Shape, found: Shape },
}

/// Data endpoints client.
#[derive(Debug, Clone)]
pub struct Client {
    reqwest: reqwest::Client,
    world_map_url: Url,
    aggregate_series_url: Url,
    totals_url: Url,
}

impl Client {
    /// # Errors
    ///
    /// Will return an error if a path can't be joined to the base url or if
    /// the underlying http client can't be built.
    pub fn new(source: &Source) -> Result<Self, Error> {
        let reqwest = reqwest::Client::builder()
            .timeout(source.request_timeout())
            .build()
            .map_err(|err| Error::Builder { source: Arc::new(err) })?;

        Ok(Self {
            reqwest,
            world_map_url: endpoint(&source.base_url, &source.world_map_path)?,
            aggregate_series_url: endpoint(&source.base_url, &source.aggregate_series_path)?,
            totals_url: endpoint(&source.base_url, &source.totals_path)?,
        })
    }

    /// Per-country counters for the latest time index.
    ///
    /// # Errors
    ///
    /// Will return an error if the request fails or the body is not a list of
    /// country snapshots.
    pub async fn latest_world_map(&self) -> Result<Vec<CountrySnapshot>, Error> {
        let body = self.get_body(&self.world_map_url).await?;

        decode(&self.world_map_url, &body).map_err(|err| {
            for (row, row_err) in malformed_rows::<CountrySnapshot>(&body) {
                debug!(url = %self.world_map_url, row, err = %row_err, "Malformed world map row");
            }
            err
        })
    }

    /// Aggregate world counters for every time index.
    ///
    /// # Errors
    ///
    /// Will return an error if the request fails or the endpoint answers with
    /// the totals shape.
    pub async fn world_aggregate_series(&self) -> Result<Vec<TimeSeriesPoint>, Error> {
        match self.get_json(&self.aggregate_series_url).await? {
            DefaultMapData::WorldAggregateSeries(series) => Ok(series),
            other => Err(Error::UnexpectedShape {
                url: self.aggregate_series_url.clone(),
                expected: Shape::WorldAggregateSeries,
                found: other.shape(),
            }),
        }
    }

    /// Current aggregate world counters.
    ///
    /// # Errors
    ///
    /// Will return an error if the request fails or the endpoint answers with
    /// the series shape.
    pub async fn current_totals(&self) -> Result<Counters, Error> {
        match self.get_json(&self.totals_url).await? {
            DefaultMapData::CurrentTotals(totals) => Ok(totals),
            other => Err(Error::UnexpectedShape {
                url: self.totals_url.clone(),
                expected: Shape::CurrentTotals,
                found: other.shape(),
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, Error> {
        let body = self.get_body(url).await?;
        decode(url, &body)
    }

    async fn get_body(&self, url: &Url) -> Result<String, Error> {
        let request_error = |err| Error::Request {
            url: url.clone(),
            source: Arc::new(err),
        };

        let response = self.reqwest.get(url.clone()).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url: url.clone(), status });
        }

        response.text().await.map_err(request_error)
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|err| Error::Decode {
        url: url.clone(),
        source: Arc::new(err),
    })
}

/// Positions of the rows of a JSON array body that can't be decoded as `T`,
/// with their errors. Empty when the body is not an array.
fn malformed_rows<T: DeserializeOwned>(body: &str) -> Vec<(usize, serde_json::Error)> {
    let Ok(rows) = serde_json::from_str::<Vec<serde_json::Value>>(body) else {
        return vec![];
    };

    rows.into_iter()
        .enumerate()
        .filter_map(|(row, value)| serde_json::from_value::<T>(value).err().map(|err| (row, err)))
        .collect()
}

fn endpoint(base_url: &Url, path: &str) -> Result<Url, Error> {
    base_url.join(path).map_err(|source| Error::InvalidPath {
        path: path.to_owned(),
        source,
    })
}
