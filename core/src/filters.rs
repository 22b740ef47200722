//! Book searches done on the client after fetching the full list.
//!
//! The server has no filtering, so each search costs one `GET /livros` and a
//! linear scan. A failed list request is returned as-is.

use serde_json::Value;

use crate::client::BibliotecaApi;
use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::transport::Transport;

impl<T: Transport> BibliotecaApi<T> {
    /// Books with an author whose `NM_AUTOR` contains `nome_autor`,
    /// ignoring case.
    pub async fn livros_by_autor(&self, nome_autor: &str) -> ApiResponse<Vec<Value>> {
        let needle = nome_autor.to_lowercase();
        self.filter_livros(|livro| has_named(livro, "autores", "NM_AUTOR", &needle))
            .await
    }

    /// Books in a category whose `NM_CATEGORIA` contains `nome_categoria`,
    /// ignoring case.
    pub async fn livros_by_categoria(&self, nome_categoria: &str) -> ApiResponse<Vec<Value>> {
        let needle = nome_categoria.to_lowercase();
        self.filter_livros(|livro| has_named(livro, "categorias", "NM_CATEGORIA", &needle))
            .await
    }

    /// Books whose `PRECO` lies in `[preco_min, preco_max]`.
    pub async fn livros_by_preco(&self, preco_min: f64, preco_max: f64) -> ApiResponse<Vec<Value>> {
        self.filter_livros(|livro| price_in_range(livro, preco_min, preco_max))
            .await
    }

    async fn filter_livros(&self, keep: impl Fn(&Value) -> bool) -> ApiResponse<Vec<Value>> {
        match self.list_livros().await {
            ApiResponse::Success { data, status } => match into_records(data, "/livros") {
                Ok(livros) => ApiResponse::success(livros.into_iter().filter(|l| keep(l)).collect(), status),
                Err(err) => ApiResponse::from_error(&err),
            },
            ApiResponse::Failure { error, status } => ApiResponse::failure(error, status),
        }
    }
}

/// Take the records out of a list payload.
pub(crate) fn into_records(data: Value, path: &str) -> Result<Vec<Value>, ApiError> {
    match data {
        Value::Array(records) => Ok(records),
        other => Err(ApiError::UnexpectedPayload(format!(
            "expected a JSON array from {path}, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// True when `record[list]` has an entry whose `name_key` contains `needle`.
/// `needle` must already be lower-case.
fn has_named(record: &Value, list: &str, name_key: &str, needle: &str) -> bool {
    record
        .get(list)
        .and_then(Value::as_array)
        .is_some_and(|entries| {
            entries.iter().any(|entry| {
                entry
                    .get(name_key)
                    .and_then(Value::as_str)
                    .is_some_and(|name| name.to_lowercase().contains(needle))
            })
        })
}

/// `PRECO` may arrive as a number or as a numeric string.
fn price_in_range(record: &Value, min: f64, max: f64) -> bool {
    let preco = match record.get("PRECO") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    preco.is_some_and(|preco| preco >= min && preco <= max)
}
