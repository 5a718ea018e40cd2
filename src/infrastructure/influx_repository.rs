// InfluxDB repository implementation
use crate::application::position_repository::PositionRepository;
use crate::domain::position::PositionSample;
use crate::infrastructure::config::{InfluxSettings, prepare_query};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

const LATEST_POSITIONS_QUERY: &str =
    "SELECT \"${x_field}\", \"${y_field}\" FROM \"${measurement}\" ORDER BY time DESC LIMIT ${limit}";

const COUNT_POSITIONS_QUERY: &str = "SELECT COUNT(\"${x_field}\") FROM \"${measurement}\"";

#[derive(Debug, Clone)]
pub struct InfluxRepository {
    client: reqwest::Client,
    host: String,
    token: String,
    database: String,
    retention_policy: String,
    measurement: String,
    x_field: String,
    y_field: String,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResponse {
    results: Vec<InfluxQLResult>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLResult {
    #[serde(default)]
    series: Option<Vec<InfluxQLSeries>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InfluxQLSeries {
    name: String,
    columns: Vec<String>,
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl InfluxRepository {
    pub fn new(settings: InfluxSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: settings.host.trim_end_matches('/').to_string(),
            token: settings.token,
            database: settings.database,
            retention_policy: settings.retention_policy,
            measurement: settings.measurement,
            x_field: settings.x_field,
            y_field: settings.y_field,
        }
    }

    fn build_query_url(&self, query: &str) -> String {
        let encoded_query = urlencoding::encode(query);
        format!(
            "{}/query?db={}&rp={}&q={}",
            self.host, self.database, self.retention_policy, encoded_query
        )
    }

    fn query_vars(&self, limit: Option<usize>) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("measurement".to_string(), self.measurement.clone());
        vars.insert("x_field".to_string(), self.x_field.clone());
        vars.insert("y_field".to_string(), self.y_field.clone());
        if let Some(limit) = limit {
            vars.insert("limit".to_string(), limit.to_string());
        }
        vars
    }

    async fn execute_query(&self, query: &str) -> Result<InfluxQLResponse> {
        let url = self.build_query_url(query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to InfluxDB")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("InfluxDB query failed with status {}: {}", status, body);
        }

        let data = response
            .json::<InfluxQLResponse>()
            .await
            .context("Failed to parse InfluxDB response")?;

        if let Some(result) = data.results.first() {
            if let Some(error) = &result.error {
                anyhow::bail!("InfluxDB query error: {}", error);
            }
        }

        Ok(data)
    }
}

#[async_trait]
impl PositionRepository for InfluxRepository {
    async fn latest_positions(&self, limit: usize) -> Result<Vec<PositionSample>> {
        let query = prepare_query(LATEST_POSITIONS_QUERY, &self.query_vars(Some(limit)));
        tracing::debug!("Executing latest positions query: {}", query);

        let response = self.execute_query(&query).await?;
        let samples = extract_positions(&response, &self.x_field, &self.y_field);

        tracing::debug!("Fetched {} positions from {}", samples.len(), self.measurement);
        Ok(samples)
    }

    async fn count_positions(&self) -> Result<u64> {
        let query = prepare_query(COUNT_POSITIONS_QUERY, &self.query_vars(None));
        let response = self.execute_query(&query).await?;
        Ok(extract_count(&response))
    }
}

/// Rows in the order InfluxDB returned them; rows missing a coordinate are skipped
fn extract_positions(response: &InfluxQLResponse, x_field: &str, y_field: &str) -> Vec<PositionSample> {
    let mut samples = Vec::new();
    let Some(series) = response.results.first().and_then(|r| r.series.as_ref()) else {
        return samples;
    };

    for s in series {
        let time_idx = s.columns.iter().position(|c| c == "time").unwrap_or(0);
        let (Some(x_idx), Some(y_idx)) = (
            s.columns.iter().position(|c| c == x_field),
            s.columns.iter().position(|c| c == y_field),
        ) else {
            tracing::warn!("Series {} lacks {} or {} columns", s.name, x_field, y_field);
            continue;
        };

        for row in &s.values {
            let time = row.get(time_idx).and_then(|v| v.as_str());
            let x = row.get(x_idx).and_then(|v| v.as_f64());
            let y = row.get(y_idx).and_then(|v| v.as_f64());
            if let (Some(time), Some(x), Some(y)) = (time, x, y) {
                samples.push(PositionSample::new(x, y, time));
            }
        }
    }

    samples
}

fn extract_count(response: &InfluxQLResponse) -> u64 {
    response
        .results
        .first()
        .and_then(|r| r.series.as_ref())
        .and_then(|series| series.first())
        .and_then(|s| {
            let count_idx = s.columns.iter().position(|c| c == "count").unwrap_or(1);
            s.values.first()?.get(count_idx)?.as_u64()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> InfluxQLResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extract_positions_keeps_store_order() {
        let response = parse(
            r#"{"results":[{"statement_id":0,"series":[{"name":"positions",
                "columns":["time","pos_x","pos_y"],
                "values":[["2025-06-12T10:15:02Z",7.75,7.75],
                          ["2025-06-12T10:15:01Z",0.25,null],
                          ["2025-06-12T10:15:00Z",0.25,0.25]]}]}]}"#,
        );

        let samples = extract_positions(&response, "pos_x", "pos_y");
        assert_eq!(
            samples,
            vec![
                PositionSample::new(7.75, 7.75, "2025-06-12T10:15:02Z"),
                PositionSample::new(0.25, 0.25, "2025-06-12T10:15:00Z"),
            ]
        );
    }

    #[test]
    fn test_extract_positions_without_series() {
        let response = parse(r#"{"results":[{"statement_id":0}]}"#);
        assert!(extract_positions(&response, "pos_x", "pos_y").is_empty());
    }

    #[test]
    fn test_extract_count() {
        let response = parse(
            r#"{"results":[{"series":[{"name":"positions","columns":["time","count"],
                "values":[["1970-01-01T00:00:00Z",42]]}]}]}"#,
        );
        assert_eq!(extract_count(&response), 42);
        assert_eq!(extract_count(&parse(r#"{"results":[{}]}"#)), 0);
    }

    #[test]
    fn test_latest_positions_query() {
        let repo = InfluxRepository::new(InfluxSettings {
            host: "http://influx:8086/".to_string(),
            token: "t".to_string(),
            database: "acoustics".to_string(),
            retention_policy: "autogen".to_string(),
            measurement: "positions".to_string(),
            x_field: "pos_x".to_string(),
            y_field: "pos_y".to_string(),
        });

        let query = prepare_query(LATEST_POSITIONS_QUERY, &repo.query_vars(Some(50)));
        assert_eq!(
            query,
            "SELECT \"pos_x\", \"pos_y\" FROM \"positions\" ORDER BY time DESC LIMIT 50"
        );
        assert!(repo
            .build_query_url(&query)
            .starts_with("http://influx:8086/query?db=acoustics&rp=autogen&q=SELECT"));
    }
}
