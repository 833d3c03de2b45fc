use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::DateRange;
use model::records::{
    Category, CreditPurchase, DebtSnapshot, ExerciseDefinition, FinancialEntry, HabitDefinition,
    HabitRecord, InstallmentCharge, ReserveEntry, WorkoutSet,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, instrument, trace};

use crate::error::{Result, StoreError};
use crate::filter::EntryFilter;
use crate::{RecordSource, Upsert};

mod query;

use query::{Query, day};

/// Connection settings of the hosted API.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL; tables live under `{url}/rest/v1/{table}`.
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Record source backed by a PostgREST-style HTTP API.
pub struct RestSource {
    client: Client,
    base: String,
    api_key: String,
}

#[derive(Deserialize)]
struct IdRow {
    id: i32,
}

impl RestSource {
    pub fn new(config: RestConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(StoreError::Config("source URL not configured".to_string()));
        }
        if config.api_key.trim().is_empty() {
            return Err(StoreError::Config("API key not configured".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn request(&self, method: Method, query: &Query) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base, query.table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&query.params)
    }

    async fn select<T: DeserializeOwned>(&self, query: Query) -> Result<Vec<T>> {
        trace!(table = query.table, params = ?query.params, "GET");
        let response = self.request(Method::GET, &query).send().await?;
        let body = checked(query.table, response).await?.text().await?;

        let rows: Vec<T> = serde_json::from_str(&body).map_err(|source| StoreError::Decode {
            table: query.table.to_string(),
            source,
        })?;
        debug!(table = query.table, rows = rows.len(), "Fetched rows");
        Ok(rows)
    }

    async fn send(&self, method: Method, query: Query, body: Option<serde_json::Value>) -> Result<()> {
        trace!(table = query.table, params = ?query.params, %method, "write");
        let mut request = self
            .request(method, &query)
            .header("Prefer", "return=minimal");
        if let Some(body) = body {
            request = request.json(&body);
        }
        checked(query.table, request.send().await?).await?;
        Ok(())
    }
}

async fn checked(table: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!(table, %status, body = %body, "Backend rejected request");
    Err(StoreError::Status {
        table: table.to_string(),
        status,
        body: body.chars().take(200).collect(),
    })
}

#[async_trait]
impl RecordSource for RestSource {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.select(Query::table("tipo").select("id,nome_tipo")).await
    }

    #[instrument(skip(self))]
    async fn financial_entries(&self, filter: &EntryFilter) -> Result<Vec<FinancialEntry>> {
        let mut query = Query::table("financ_regis").select("valor,tipo_id,data_registro,nome");
        if let Some(category_id) = filter.category_id {
            query = query.eq("tipo_id", category_id);
        }
        if let Some(needle) = &filter.label_contains {
            query = query.contains("nome", needle);
        }
        if let Some(range) = filter.range {
            query = query.within("data_registro", range);
        }
        self.select(query).await
    }

    async fn debt_snapshots(&self) -> Result<Vec<DebtSnapshot>> {
        self.select(
            Query::table("cc_e_dividas")
                .select("valor,data_registro")
                .order("data_registro", false),
        )
        .await
    }

    async fn latest_debt_snapshot(&self) -> Result<Option<DebtSnapshot>> {
        let rows: Vec<DebtSnapshot> = self
            .select(
                Query::table("cc_e_dividas")
                    .select("valor,data_registro")
                    .order("data_registro", true)
                    .limit(1),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn delete_debt_snapshots_on(&self, date: NaiveDate) -> Result<()> {
        let query = Query::table("cc_e_dividas").eq("data_registro", day(date));
        self.send(Method::DELETE, query, None).await
    }

    async fn insert_debt_snapshot(&self, snapshot: &DebtSnapshot) -> Result<()> {
        let body = serde_json::to_value(snapshot).map_err(|source| StoreError::Decode {
            table: "cc_e_dividas".to_string(),
            source,
        })?;
        self.send(Method::POST, Query::table("cc_e_dividas"), Some(body))
            .await
    }

    async fn credit_purchases(&self, range: DateRange) -> Result<Vec<CreditPurchase>> {
        self.select(
            Query::table("compras_a_prazo")
                .select("valor,data_registro")
                .within("data_registro", range),
        )
        .await
    }

    async fn installments(&self) -> Result<Vec<InstallmentCharge>> {
        self.select(Query::table("compras_prazo_parcelas").select("valor_parcela,data_vencimento,pago"))
            .await
    }

    async fn reserve_entries(&self) -> Result<Vec<ReserveEntry>> {
        self.select(
            Query::table("reserva")
                .select("valor,data_registro")
                .order("data_registro", false),
        )
        .await
    }

    async fn upsert_reserve_entry(&self, entry: &ReserveEntry) -> Result<Upsert> {
        let existing: Vec<IdRow> = self
            .select(
                Query::table("reserva")
                    .select("id")
                    .eq("data_registro", day(entry.date)),
            )
            .await?;

        if existing.is_empty() {
            let body = serde_json::to_value(entry).map_err(|source| StoreError::Decode {
                table: "reserva".to_string(),
                source,
            })?;
            self.send(Method::POST, Query::table("reserva"), Some(body))
                .await?;
            Ok(Upsert::Inserted)
        } else {
            trace!(ids = ?existing.iter().map(|row| row.id).collect::<Vec<_>>(), "Updating reserve rows");
            let query = Query::table("reserva").eq("data_registro", day(entry.date));
            self.send(Method::PATCH, query, Some(json!({ "valor": entry.amount })))
                .await?;
            Ok(Upsert::Updated)
        }
    }

    async fn habits(&self) -> Result<Vec<HabitDefinition>> {
        self.select(
            Query::table("habitos")
                .select("id,nome,ativo")
                .eq("ativo", true)
                .order("id", false),
        )
        .await
    }

    async fn habit_records(&self, range: DateRange) -> Result<Vec<HabitRecord>> {
        self.select(
            Query::table("habitos_registros")
                .select("habito_id,data_registro,nivel")
                .within("data_registro", range),
        )
        .await
    }

    async fn exercises(&self) -> Result<Vec<ExerciseDefinition>> {
        self.select(
            Query::table("exercicios")
                .select("id,nome,musculo_primario,musculos_secundarios"),
        )
        .await
    }

    async fn workout_sets(&self, range: DateRange) -> Result<Vec<WorkoutSet>> {
        self.select(
            Query::table("treino_series")
                .select("exercicio_id,peso,repeticoes,duracao,data_registro")
                .within("data_registro", range),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, api_key: &str) -> RestConfig {
        RestConfig {
            url: url.to_string(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_new_requires_url_and_key() {
        assert!(matches!(
            RestSource::new(config("", "key")),
            Err(StoreError::Config(_))
        ));
        assert!(matches!(
            RestSource::new(config("https://project.example", " ")),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn test_request_targets_table_endpoint_with_credentials() {
        let source = RestSource::new(config("https://project.example/", "secret")).unwrap();
        let query = Query::table("habitos").select("id").eq("ativo", true);
        let request = source.request(Method::GET, &query).build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://project.example/rest/v1/habitos?select=id&ativo=eq.true"
        );
        assert_eq!(request.headers()["apikey"], "secret");
        assert_eq!(request.headers()["authorization"], "Bearer secret");
    }
}
