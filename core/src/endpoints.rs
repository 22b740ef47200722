//! One method per resource and action.
//!
//! Each resource gets `build_*` request builders and async wrappers that send
//! them. Book creation is the only method with local logic: it checks the
//! required fields before anything is sent.

use serde::Serialize;
use serde_json::Value;

use crate::client::BibliotecaApi;
use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, RequestOptions};
use crate::transport::Transport;
use crate::types::{
    AtualizaBairro, AtualizaUsuario, NovaCategoria, NovaCidade, NovoAutor, NovoBairro, NovoEstado,
    NovoUsuario,
};
use crate::validate::{require_fields, LIVRO_REQUIRED_FIELDS};

impl<T: Transport> BibliotecaApi<T> {
    // ---------------------------------------------------------------------
    // Estados
    // ---------------------------------------------------------------------

    pub fn build_list_estados(&self) -> HttpRequest {
        self.build_request("/estados", RequestOptions::get())
    }

    pub fn build_get_estado(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/estados/{id}"), RequestOptions::get())
    }

    pub fn build_create_estado(&self, nome: &str) -> Result<HttpRequest, ApiError> {
        let payload = NovoEstado {
            nm_estado: nome.to_string(),
        };
        self.build_json(HttpMethod::Post, "/estados", &payload)
    }

    pub fn build_update_estado(&self, id: i64, nome: &str) -> Result<HttpRequest, ApiError> {
        let payload = NovoEstado {
            nm_estado: nome.to_string(),
        };
        self.build_json(HttpMethod::Put, &format!("/estados/{id}"), &payload)
    }

    pub fn build_delete_estado(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/estados/{id}"), RequestOptions::delete())
    }

    pub async fn list_estados(&self) -> ApiResponse<Value> {
        self.send(self.build_list_estados()).await
    }

    pub async fn get_estado(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_get_estado(id)).await
    }

    pub async fn create_estado(&self, nome: &str) -> ApiResponse<Value> {
        self.send_built(self.build_create_estado(nome)).await
    }

    pub async fn update_estado(&self, id: i64, nome: &str) -> ApiResponse<Value> {
        self.send_built(self.build_update_estado(id, nome)).await
    }

    pub async fn delete_estado(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_delete_estado(id)).await
    }

    // ---------------------------------------------------------------------
    // Cidades
    // ---------------------------------------------------------------------

    pub fn build_list_cidades(&self) -> HttpRequest {
        self.build_request("/cidades", RequestOptions::get())
    }

    pub fn build_get_cidade(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/cidades/{id}"), RequestOptions::get())
    }

    pub fn build_create_cidade(&self, nome: &str, id_estado: i64) -> Result<HttpRequest, ApiError> {
        let payload = NovaCidade {
            nm_cidade: nome.to_string(),
            id_estado,
        };
        self.build_json(HttpMethod::Post, "/cidades", &payload)
    }

    pub fn build_update_cidade(
        &self,
        id: i64,
        nome: &str,
        id_estado: i64,
    ) -> Result<HttpRequest, ApiError> {
        let payload = NovaCidade {
            nm_cidade: nome.to_string(),
            id_estado,
        };
        self.build_json(HttpMethod::Put, &format!("/cidades/{id}"), &payload)
    }

    pub fn build_delete_cidade(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/cidades/{id}"), RequestOptions::delete())
    }

    pub async fn list_cidades(&self) -> ApiResponse<Value> {
        self.send(self.build_list_cidades()).await
    }

    pub async fn get_cidade(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_get_cidade(id)).await
    }

    pub async fn create_cidade(&self, nome: &str, id_estado: i64) -> ApiResponse<Value> {
        self.send_built(self.build_create_cidade(nome, id_estado)).await
    }

    pub async fn update_cidade(&self, id: i64, nome: &str, id_estado: i64) -> ApiResponse<Value> {
        self.send_built(self.build_update_cidade(id, nome, id_estado))
            .await
    }

    pub async fn delete_cidade(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_delete_cidade(id)).await
    }

    // ---------------------------------------------------------------------
    // Bairros (keyed by CEP)
    // ---------------------------------------------------------------------

    pub fn build_list_bairros(&self) -> HttpRequest {
        self.build_request("/bairros", RequestOptions::get())
    }

    pub fn build_get_bairro(&self, cep: i64) -> HttpRequest {
        self.build_request(&format!("/bairros/{cep}"), RequestOptions::get())
    }

    pub fn build_create_bairro(&self, bairro: &NovoBairro) -> Result<HttpRequest, ApiError> {
        self.build_json(HttpMethod::Post, "/bairros", bairro)
    }

    pub fn build_update_bairro(
        &self,
        cep: i64,
        bairro: &AtualizaBairro,
    ) -> Result<HttpRequest, ApiError> {
        self.build_json(HttpMethod::Put, &format!("/bairros/{cep}"), bairro)
    }

    pub fn build_delete_bairro(&self, cep: i64) -> HttpRequest {
        self.build_request(&format!("/bairros/{cep}"), RequestOptions::delete())
    }

    pub async fn list_bairros(&self) -> ApiResponse<Value> {
        self.send(self.build_list_bairros()).await
    }

    pub async fn get_bairro(&self, cep: i64) -> ApiResponse<Value> {
        self.send(self.build_get_bairro(cep)).await
    }

    pub async fn create_bairro(&self, bairro: &NovoBairro) -> ApiResponse<Value> {
        self.send_built(self.build_create_bairro(bairro)).await
    }

    pub async fn update_bairro(&self, cep: i64, bairro: &AtualizaBairro) -> ApiResponse<Value> {
        self.send_built(self.build_update_bairro(cep, bairro)).await
    }

    pub async fn delete_bairro(&self, cep: i64) -> ApiResponse<Value> {
        self.send(self.build_delete_bairro(cep)).await
    }

    // ---------------------------------------------------------------------
    // Usuarios (keyed by login)
    // ---------------------------------------------------------------------

    pub fn build_list_usuarios(&self) -> HttpRequest {
        self.build_request("/usuarios", RequestOptions::get())
    }

    pub fn build_get_usuario(&self, login: &str) -> HttpRequest {
        self.build_request(&format!("/usuarios/{login}"), RequestOptions::get())
    }

    /// `email` is only sent when present and non-empty.
    pub fn build_create_usuario(
        &self,
        login: &str,
        senha: &str,
        nome: &str,
        email: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let payload = NovoUsuario {
            login: login.to_string(),
            senha: senha.to_string(),
            nm_usuario: nome.to_string(),
            email_contato: email.filter(|e| !e.is_empty()).map(str::to_string),
        };
        self.build_json(HttpMethod::Post, "/usuarios", &payload)
    }

    pub fn build_update_usuario(
        &self,
        login: &str,
        usuario: &AtualizaUsuario,
    ) -> Result<HttpRequest, ApiError> {
        self.build_json(HttpMethod::Put, &format!("/usuarios/{login}"), usuario)
    }

    pub fn build_delete_usuario(&self, login: &str) -> HttpRequest {
        self.build_request(&format!("/usuarios/{login}"), RequestOptions::delete())
    }

    /// Users come back without their passwords.
    pub async fn list_usuarios(&self) -> ApiResponse<Value> {
        self.send(self.build_list_usuarios()).await
    }

    pub async fn get_usuario(&self, login: &str) -> ApiResponse<Value> {
        self.send(self.build_get_usuario(login)).await
    }

    pub async fn create_usuario(
        &self,
        login: &str,
        senha: &str,
        nome: &str,
        email: Option<&str>,
    ) -> ApiResponse<Value> {
        self.send_built(self.build_create_usuario(login, senha, nome, email))
            .await
    }

    pub async fn update_usuario(&self, login: &str, usuario: &AtualizaUsuario) -> ApiResponse<Value> {
        self.send_built(self.build_update_usuario(login, usuario))
            .await
    }

    pub async fn delete_usuario(&self, login: &str) -> ApiResponse<Value> {
        self.send(self.build_delete_usuario(login)).await
    }

    // ---------------------------------------------------------------------
    // Autores
    // ---------------------------------------------------------------------

    pub fn build_list_autores(&self) -> HttpRequest {
        self.build_request("/autores", RequestOptions::get())
    }

    pub fn build_get_autor(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/autores/{id}"), RequestOptions::get())
    }

    pub fn build_create_autor(&self, nome: &str) -> Result<HttpRequest, ApiError> {
        let payload = NovoAutor {
            nm_autor: nome.to_string(),
        };
        self.build_json(HttpMethod::Post, "/autores", &payload)
    }

    pub fn build_update_autor(&self, id: i64, nome: &str) -> Result<HttpRequest, ApiError> {
        let payload = NovoAutor {
            nm_autor: nome.to_string(),
        };
        self.build_json(HttpMethod::Put, &format!("/autores/{id}"), &payload)
    }

    pub fn build_delete_autor(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/autores/{id}"), RequestOptions::delete())
    }

    pub async fn list_autores(&self) -> ApiResponse<Value> {
        self.send(self.build_list_autores()).await
    }

    pub async fn get_autor(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_get_autor(id)).await
    }

    pub async fn create_autor(&self, nome: &str) -> ApiResponse<Value> {
        self.send_built(self.build_create_autor(nome)).await
    }

    pub async fn update_autor(&self, id: i64, nome: &str) -> ApiResponse<Value> {
        self.send_built(self.build_update_autor(id, nome)).await
    }

    pub async fn delete_autor(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_delete_autor(id)).await
    }

    // ---------------------------------------------------------------------
    // Categorias
    // ---------------------------------------------------------------------

    pub fn build_list_categorias(&self) -> HttpRequest {
        self.build_request("/categorias", RequestOptions::get())
    }

    pub fn build_get_categoria(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/categorias/{id}"), RequestOptions::get())
    }

    pub fn build_create_categoria(
        &self,
        nome: &str,
        imagem_base64: &str,
    ) -> Result<HttpRequest, ApiError> {
        let payload = NovaCategoria {
            nm_categoria: nome.to_string(),
            img_categoria: Some(imagem_base64.to_string()),
        };
        self.build_json(HttpMethod::Post, "/categorias", &payload)
    }

    /// The image is left untouched on the server when `imagem_base64` is `None`.
    pub fn build_update_categoria(
        &self,
        id: i64,
        nome: &str,
        imagem_base64: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let payload = NovaCategoria {
            nm_categoria: nome.to_string(),
            img_categoria: imagem_base64.map(str::to_string),
        };
        self.build_json(HttpMethod::Put, &format!("/categorias/{id}"), &payload)
    }

    pub fn build_delete_categoria(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/categorias/{id}"), RequestOptions::delete())
    }

    pub async fn list_categorias(&self) -> ApiResponse<Value> {
        self.send(self.build_list_categorias()).await
    }

    pub async fn get_categoria(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_get_categoria(id)).await
    }

    pub async fn create_categoria(&self, nome: &str, imagem_base64: &str) -> ApiResponse<Value> {
        self.send_built(self.build_create_categoria(nome, imagem_base64))
            .await
    }

    pub async fn update_categoria(
        &self,
        id: i64,
        nome: &str,
        imagem_base64: Option<&str>,
    ) -> ApiResponse<Value> {
        self.send_built(self.build_update_categoria(id, nome, imagem_base64))
            .await
    }

    pub async fn delete_categoria(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_delete_categoria(id)).await
    }

    // ---------------------------------------------------------------------
    // Livros
    // ---------------------------------------------------------------------

    pub fn build_list_livros(&self) -> HttpRequest {
        self.build_request("/livros", RequestOptions::get())
    }

    pub fn build_get_livro(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/livros/{id}"), RequestOptions::get())
    }

    /// Build the creation request after checking every required book field.
    ///
    /// Accepts a [`NovoLivro`](crate::types::NovoLivro) or any JSON object.
    pub fn build_create_livro<P: Serialize + ?Sized>(
        &self,
        livro: &P,
    ) -> Result<HttpRequest, ApiError> {
        let payload = serde_json::to_value(livro)?;
        require_fields(&payload, &LIVRO_REQUIRED_FIELDS)?;
        self.build_json(HttpMethod::Post, "/livros", &payload)
    }

    /// Partial update; no field is required.
    pub fn build_update_livro<P: Serialize + ?Sized>(
        &self,
        id: i64,
        livro: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_json(HttpMethod::Put, &format!("/livros/{id}"), livro)
    }

    pub fn build_delete_livro(&self, id: i64) -> HttpRequest {
        self.build_request(&format!("/livros/{id}"), RequestOptions::delete())
    }

    pub async fn list_livros(&self) -> ApiResponse<Value> {
        self.send(self.build_list_livros()).await
    }

    /// Single book, including its image, authors and categories.
    pub async fn get_livro(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_get_livro(id)).await
    }

    /// Create a book. A missing required field fails with status 400 and no
    /// request is sent.
    pub async fn create_livro<P: Serialize + ?Sized>(&self, livro: &P) -> ApiResponse<Value> {
        self.send_built(self.build_create_livro(livro)).await
    }

    pub async fn update_livro<P: Serialize + ?Sized>(&self, id: i64, livro: &P) -> ApiResponse<Value> {
        self.send_built(self.build_update_livro(id, livro)).await
    }

    pub async fn delete_livro(&self, id: i64) -> ApiResponse<Value> {
        self.send(self.build_delete_livro(id)).await
    }
}
