//! Aggregate counts over the six main collections.

use futures::join;
use serde_json::Value;
use tracing::info;

use crate::client::BibliotecaApi;
use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::filters::into_records;
use crate::transport::Transport;
use crate::types::Estatisticas;

/// Status of a locally assembled statistics envelope.
const STATS_STATUS: u16 = 200;

impl<T: Transport> BibliotecaApi<T> {
    /// Count states, cities, users, authors, categories and books.
    ///
    /// The six list requests run concurrently. A request that fails counts
    /// as zero instead of failing the whole call; only a successful response
    /// that is not a list turns the result into a failure.
    pub async fn estatisticas(&self) -> ApiResponse<Estatisticas> {
        let (estados, cidades, usuarios, autores, categorias, livros) = join!(
            self.list_estados(),
            self.list_cidades(),
            self.list_usuarios(),
            self.list_autores(),
            self.list_categorias(),
            self.list_livros()
        );

        let totals = (|| {
            Ok::<_, ApiError>(Estatisticas {
                total_estados: count(estados, "/estados")?,
                total_cidades: count(cidades, "/cidades")?,
                total_usuarios: count(usuarios, "/usuarios")?,
                total_autores: count(autores, "/autores")?,
                total_categorias: count(categorias, "/categorias")?,
                total_livros: count(livros, "/livros")?,
            })
        })();

        match totals {
            Ok(stats) => {
                info!(
                    estados = stats.total_estados,
                    cidades = stats.total_cidades,
                    usuarios = stats.total_usuarios,
                    autores = stats.total_autores,
                    categorias = stats.total_categorias,
                    livros = stats.total_livros,
                    "collected statistics"
                );
                ApiResponse::success(stats, STATS_STATUS)
            }
            Err(err) => ApiResponse::from_error(&err),
        }
    }
}

/// Length of a successful list response, zero for a failed one.
fn count(envelope: ApiResponse<Value>, path: &str) -> Result<usize, ApiError> {
    match envelope {
        ApiResponse::Success { data, .. } => into_records(data, path).map(|records| records.len()),
        ApiResponse::Failure { .. } => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn count_uses_array_length() {
        let envelope = ApiResponse::success(json!([{}, {}, {}]), 200);
        assert_eq!(count(envelope, "/autores").unwrap(), 3);
    }

    #[test]
    fn count_masks_failure_as_zero() {
        let envelope = ApiResponse::failure("HTTP 500: Internal Server Error", 500);
        assert_eq!(count(envelope, "/autores").unwrap(), 0);
    }

    #[test]
    fn count_rejects_non_list_payload() {
        let envelope = ApiResponse::success(json!({"total": 3}), 200);
        let err = count(envelope, "/autores").unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedPayload(_)));
    }
}
