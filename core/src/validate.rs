//! Client-side format checks and the book required-field check.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ApiError;

/// Fields that must be present before a book is sent to the server.
pub const LIVRO_REQUIRED_FIELDS: [&str; 10] = [
    "nm_livro",
    "preco",
    "pagamento_eletronico",
    "pagamento_dinheiro",
    "entrega_presencial",
    "entrega_delivery",
    "img_livro",
    "cep",
    "login_comprador",
    "login_vendedor",
];

static CEP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}$").expect("CEP pattern compiles"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// True when `cep` renders as exactly eight ASCII digits.
///
/// Accepts anything `Display`, so both `"01310100"` and `40070110` work.
/// An integer CEP that lost its leading zero is rejected.
pub fn validate_cep(cep: impl Display) -> bool {
    CEP_PATTERN.is_match(&cep.to_string())
}

/// Loose `local@domain.tld` shape check.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check that `payload` is an object carrying every field in `fields`.
///
/// Absent, `null`, `false`, zero and empty-string values count as missing.
/// The first missing field, in `fields` order, is reported.
pub fn require_fields(payload: &Value, fields: &[&str]) -> Result<(), ApiError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ApiError::InvalidPayload("expected a JSON object".to_string()))?;

    for field in fields {
        let missing = match object.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::Bool(b)) => !b,
            Some(Value::Number(n)) => n.as_f64().is_none_or(|v| v == 0.0 || !v.is_finite()),
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if missing {
            return Err(ApiError::MissingField((*field).to_string()));
        }
    }
    Ok(())
}
