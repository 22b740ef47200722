//! Async client for the biblioteca (library management) REST API.
//!
//! # Overview
//! One method per endpoint for states, cities, neighbourhoods, users,
//! authors, categories and books, plus client-side book searches and a
//! statistics call that fans out to six list endpoints at once.
//!
//! # Design
//! - Every method returns an [`ApiResponse`] envelope; nothing is returned as
//!   `Err` and nothing panics on bad input or network trouble.
//! - `BibliotecaApi` is stateless apart from its base address and transport.
//! - Each endpoint has a pure `build_*` method, so request construction is
//!   testable without I/O; the [`Transport`] trait is the only network seam.
//! - Server records are opaque `serde_json::Value`s.

pub mod client;
pub mod config;
pub mod encoding;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod filters;
pub mod http;
pub mod stats;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::{parse_response, BibliotecaApi};
pub use config::{ClientConfig, ConfigError};
pub use encoding::{bytes_to_base64, file_to_base64, strip_data_uri};
pub use envelope::ApiResponse;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    AtualizaBairro, AtualizaUsuario, Estatisticas, NovaCategoria, NovaCidade, NovoAutor,
    NovoBairro, NovoEstado, NovoLivro, NovoUsuario,
};
pub use validate::{validate_cep, validate_email, LIVRO_REQUIRED_FIELDS};
