use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

/// REST client for the hosted row store backing all persistence. Tables are
/// exposed PostgREST-style under `/rest/v1/{table}` with `column=eq.value`
/// filters.
pub struct HostedDbApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HostedDbApi {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::new();

        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub async fn select(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> anyhow::Result<Vec<Value>> {
        match self
            .client
            .get(&self.table_url(table))
            .header("apikey", &self.api_key)
            .header("authorization", format!("Bearer {}", self.api_key))
            .query(filters)
            .send()
            .await
        {
            Ok(res) => res.json::<Vec<Value>>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Hosted database GET {} error. Error message: {:?}",
                    table, e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Hosted database GET {} error. Error message: {:?}",
                    table, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    pub async fn insert(&self, table: &str, row: &impl Serialize) -> anyhow::Result<()> {
        match self
            .client
            .post(&self.table_url(table))
            .header("apikey", &self.api_key)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(row)
            .send()
            .await
        {
            Ok(res) => match res.error_for_status() {
                Ok(_) => Ok(()),
                Err(e) => {
                    error!(
                        "[Unexpected Response] Hosted database POST {} error. Error message: {:?}",
                        table, e
                    );
                    Err(anyhow::Error::new(e))
                }
            },
            Err(e) => {
                error!(
                    "[Network Error] Hosted database POST {} error. Error message: {:?}",
                    table, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    pub async fn update(
        &self,
        table: &str,
        filters: &[(&str, String)],
        patch: &impl Serialize,
    ) -> anyhow::Result<()> {
        match self
            .client
            .patch(&self.table_url(table))
            .header("apikey", &self.api_key)
            .header("authorization", format!("Bearer {}", self.api_key))
            .query(filters)
            .json(patch)
            .send()
            .await
        {
            Ok(res) => match res.error_for_status() {
                Ok(_) => Ok(()),
                Err(e) => {
                    error!(
                        "[Unexpected Response] Hosted database PATCH {} error. Error message: {:?}",
                        table, e
                    );
                    Err(anyhow::Error::new(e))
                }
            },
            Err(e) => {
                error!(
                    "[Network Error] Hosted database PATCH {} error. Error message: {:?}",
                    table, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    /// Deletes matching rows and returns them
    pub async fn delete(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> anyhow::Result<Vec<Value>> {
        match self
            .client
            .delete(&self.table_url(table))
            .header("apikey", &self.api_key)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("prefer", "return=representation")
            .query(filters)
            .send()
            .await
        {
            Ok(res) => res.json::<Vec<Value>>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Hosted database DELETE {} error. Error message: {:?}",
                    table, e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Network Error] Hosted database DELETE {} error. Error message: {:?}",
                    table, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }

    /// Decodes rows one by one; a malformed row is logged and skipped so a
    /// single bad record never takes down a whole query.
    pub fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Vec<T> {
        rows.into_iter()
            .filter_map(|row| match serde_json::from_value::<T>(row) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    warn!("Skipping malformed {} row. Error message: {:?}", table, e);
                    None
                }
            })
            .collect()
    }
}
