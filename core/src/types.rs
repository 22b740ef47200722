//! Request payloads for the biblioteca API.
//!
//! Field names match what the server reads from the JSON body. Records the
//! server sends back are not modelled: they stay `serde_json::Value`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NovoEstado {
    pub nm_estado: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NovaCidade {
    pub nm_cidade: String,
    pub id_estado: i64,
}

/// Neighbourhood, keyed by its CEP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NovoBairro {
    pub cep: i64,
    pub nm_bairro: String,
    pub id_cidade: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtualizaBairro {
    pub nm_bairro: String,
    pub id_cidade: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NovoUsuario {
    pub login: String,
    pub senha: String,
    pub nm_usuario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_contato: Option<String>,
}

/// Update payload for a user. The password is only changed when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtualizaUsuario {
    pub nm_usuario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_contato: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NovoAutor {
    pub nm_autor: String,
}

/// Category payload; `img_categoria` is base64 without a data-URI prefix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NovaCategoria {
    pub nm_categoria: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_categoria: Option<String>,
}

/// Book creation payload.
///
/// The payment and delivery flags are `"S"` / `"N"` strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NovoLivro {
    pub nm_livro: String,
    pub preco: f64,
    pub pagamento_eletronico: String,
    pub pagamento_dinheiro: String,
    pub entrega_presencial: String,
    pub entrega_delivery: String,
    pub img_livro: String,
    pub cep: i64,
    pub login_comprador: String,
    pub login_vendedor: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub autores: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categorias: Vec<i64>,
}

/// Totals reported by the statistics fan-out.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Estatisticas {
    pub total_estados: usize,
    pub total_cidades: usize,
    pub total_usuarios: usize,
    pub total_autores: usize,
    pub total_categorias: usize,
    pub total_livros: usize,
}
