//! In-memory stand-in for the biblioteca REST API.
//!
//! Serves the same routes, status codes and JSON shapes as the real server:
//! upper-case record keys, `{"error": ...}` bodies on failure, 201 with the
//! new id on creation. Book list records embed their authors and categories.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Estado {
    pub id_estado: i64,
    pub nm_estado: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Cidade {
    pub id_cidade: i64,
    pub nm_cidade: String,
    pub id_estado: i64,
    #[serde(default)]
    pub nm_estado: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Bairro {
    pub cep: i64,
    pub nm_bairro: String,
    pub id_cidade: i64,
    #[serde(default)]
    pub nm_cidade: Option<String>,
    #[serde(default)]
    pub nm_estado: Option<String>,
}

/// A user as the API exposes it: never with the password.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Usuario {
    pub login: String,
    pub nm_usuario: String,
    pub email_contato: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Autor {
    pub id_autor: i64,
    pub nm_autor: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Categoria {
    pub id_categoria: i64,
    pub nm_categoria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_categoria: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Livro {
    pub id_livro: i64,
    pub nm_livro: String,
    pub preco: f64,
    pub pagamento_eletronico: String,
    pub pagamento_dinheiro: String,
    pub entrega_presencial: String,
    pub entrega_delivery: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_livro: Option<String>,
    pub cep: i64,
    pub login_comprador: String,
    pub login_vendedor: String,
    #[serde(default)]
    pub nm_bairro: Option<String>,
    #[serde(default)]
    pub nm_cidade: Option<String>,
    #[serde(default)]
    pub nm_estado: Option<String>,
    #[serde(default, rename = "autores")]
    pub autores: Vec<Autor>,
    #[serde(default, rename = "categorias")]
    pub categorias: Vec<Categoria>,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct EstadoInput {
    pub nm_estado: Option<String>,
}

#[derive(Deserialize)]
pub struct CidadeInput {
    pub nm_cidade: Option<String>,
    pub id_estado: Option<i64>,
}

#[derive(Deserialize)]
pub struct BairroInput {
    pub cep: Option<i64>,
    pub nm_bairro: Option<String>,
    pub id_cidade: Option<i64>,
}

#[derive(Deserialize)]
pub struct UsuarioInput {
    pub login: Option<String>,
    pub senha: Option<String>,
    pub nm_usuario: Option<String>,
    pub email_contato: Option<String>,
}

#[derive(Deserialize)]
pub struct AutorInput {
    pub nm_autor: Option<String>,
}

#[derive(Deserialize)]
pub struct CategoriaInput {
    pub nm_categoria: Option<String>,
    pub img_categoria: Option<String>,
}

/// Book payload. Every field is optional so that creation can report the
/// first missing one and updates can be partial.
#[derive(Deserialize, Default)]
pub struct LivroInput {
    pub nm_livro: Option<String>,
    pub preco: Option<f64>,
    pub pagamento_eletronico: Option<String>,
    pub pagamento_dinheiro: Option<String>,
    pub entrega_presencial: Option<String>,
    pub entrega_delivery: Option<String>,
    pub img_livro: Option<String>,
    pub cep: Option<i64>,
    pub login_comprador: Option<String>,
    pub login_vendedor: Option<String>,
    pub autores: Option<Vec<i64>>,
    pub categorias: Option<Vec<i64>>,
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

struct StoredLivro {
    livro: Livro,
    autores: Vec<i64>,
    categorias: Vec<i64>,
}

#[derive(Default)]
pub struct Store {
    estados: BTreeMap<i64, Estado>,
    cidades: BTreeMap<i64, Cidade>,
    bairros: BTreeMap<i64, Bairro>,
    // passwords are only checked for presence on creation
    usuarios: BTreeMap<String, Usuario>,
    autores: BTreeMap<i64, Autor>,
    categorias: BTreeMap<i64, Categoria>,
    livros: BTreeMap<i64, StoredLivro>,
    last_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn cidade_view(&self, cidade: &Cidade) -> Cidade {
        Cidade {
            nm_estado: self.estados.get(&cidade.id_estado).map(|e| e.nm_estado.clone()),
            ..cidade.clone()
        }
    }

    fn bairro_view(&self, bairro: &Bairro) -> Bairro {
        let cidade = self.cidades.get(&bairro.id_cidade);
        Bairro {
            nm_cidade: cidade.map(|c| c.nm_cidade.clone()),
            nm_estado: cidade
                .and_then(|c| self.estados.get(&c.id_estado))
                .map(|e| e.nm_estado.clone()),
            ..bairro.clone()
        }
    }

    fn livro_view(&self, stored: &StoredLivro, with_image: bool) -> Livro {
        let bairro = self.bairros.get(&stored.livro.cep).map(|b| self.bairro_view(b));
        Livro {
            img_livro: if with_image { stored.livro.img_livro.clone() } else { None },
            nm_bairro: bairro.as_ref().map(|b| b.nm_bairro.clone()),
            nm_cidade: bairro.as_ref().and_then(|b| b.nm_cidade.clone()),
            nm_estado: bairro.as_ref().and_then(|b| b.nm_estado.clone()),
            autores: stored
                .autores
                .iter()
                .filter_map(|id| self.autores.get(id).cloned())
                .collect(),
            categorias: stored
                .categorias
                .iter()
                .filter_map(|id| self.categorias.get(id))
                .map(|c| Categoria {
                    img_categoria: None,
                    ..c.clone()
                })
                .collect(),
            ..stored.livro.clone()
        }
    }

    fn check_livro_refs(&self, input: &LivroInput) -> Result<(), Failure> {
        if let Some(cep) = input.cep {
            if !self.bairros.contains_key(&cep) {
                return Err(Failure::bad_request(format!("bairro {cep} does not exist")));
            }
        }
        for login in [&input.login_comprador, &input.login_vendedor].into_iter().flatten() {
            if !self.usuarios.contains_key(login) {
                return Err(Failure::bad_request(format!("usuario {login} does not exist")));
            }
        }
        for id in input.autores.iter().flatten() {
            if !self.autores.contains_key(id) {
                return Err(Failure::bad_request(format!("autor {id} does not exist")));
            }
        }
        for id in input.categorias.iter().flatten() {
            if !self.categorias.contains_key(id) {
                return Err(Failure::bad_request(format!("categoria {id} does not exist")));
            }
        }
        Ok(())
    }
}

pub type Db = Arc<RwLock<Store>>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Handler failure rendered as `{"error": message}`.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    message: String,
}

impl Failure {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(what: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{what} not found"),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type HandlerResult<T> = Result<T, Failure>;

fn required<T>(value: Option<T>, message: &str) -> HandlerResult<T> {
    value.ok_or_else(|| Failure::bad_request(message))
}

fn created(id_key: &str, id: Value, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ id_key: id, "message": message })),
    )
}

fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/", get(info))
        .route("/health", get(health))
        .route("/estados", get(list_estados).post(create_estado))
        .route(
            "/estados/{id}",
            get(get_estado).put(update_estado).delete(delete_estado),
        )
        .route("/cidades", get(list_cidades).post(create_cidade))
        .route(
            "/cidades/{id}",
            get(get_cidade).put(update_cidade).delete(delete_cidade),
        )
        .route("/bairros", get(list_bairros).post(create_bairro))
        .route(
            "/bairros/{cep}",
            get(get_bairro).put(update_bairro).delete(delete_bairro),
        )
        .route("/usuarios", get(list_usuarios).post(create_usuario))
        .route(
            "/usuarios/{login}",
            get(get_usuario).put(update_usuario).delete(delete_usuario),
        )
        .route("/autores", get(list_autores).post(create_autor))
        .route(
            "/autores/{id}",
            get(get_autor).put(update_autor).delete(delete_autor),
        )
        .route("/categorias", get(list_categorias).post(create_categoria))
        .route(
            "/categorias/{id}",
            get(get_categoria).put(update_categoria).delete(delete_categoria),
        )
        .route("/livros", get(list_livros).post(create_livro))
        .route(
            "/livros/{id}",
            get(get_livro).put(update_livro).delete(delete_livro),
        )
        .fallback(endpoint_not_found)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock biblioteca API listening");
    }
    axum::serve(listener, app()).await
}

async fn endpoint_not_found() -> Failure {
    Failure::not_found("endpoint")
}

async fn info() -> Json<Value> {
    Json(json!({
        "message": "biblioteca API is running",
        "endpoints": {
            "estados": "/estados",
            "cidades": "/cidades",
            "bairros": "/bairros",
            "usuarios": "/usuarios",
            "autores": "/autores",
            "categorias": "/categorias",
            "livros": "/livros",
            "health": "/health"
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "API is healthy" }))
}

// ---------------------------------------------------------------------------
// Estados
// ---------------------------------------------------------------------------

async fn list_estados(State(db): State<Db>) -> Json<Vec<Estado>> {
    let store = db.read().await;
    let mut estados: Vec<Estado> = store.estados.values().cloned().collect();
    estados.sort_by(|a, b| a.nm_estado.cmp(&b.nm_estado));
    Json(estados)
}

async fn get_estado(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Estado>> {
    let store = db.read().await;
    store
        .estados
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("estado"))
}

async fn create_estado(
    State(db): State<Db>,
    Json(input): Json<EstadoInput>,
) -> HandlerResult<(StatusCode, Json<Value>)> {
    let nm_estado = required(input.nm_estado, "nm_estado is required")?;
    let mut store = db.write().await;
    let id_estado = store.next_id();
    store.estados.insert(id_estado, Estado { id_estado, nm_estado });
    Ok(created("id_estado", json!(id_estado), "estado created"))
}

async fn update_estado(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<EstadoInput>,
) -> HandlerResult<Json<Value>> {
    let nm_estado = required(input.nm_estado, "nm_estado is required")?;
    let mut store = db.write().await;
    let estado = store.estados.get_mut(&id).ok_or_else(|| Failure::not_found("estado"))?;
    estado.nm_estado = nm_estado;
    Ok(message("estado updated"))
}

async fn delete_estado(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Value>> {
    let mut store = db.write().await;
    store
        .estados
        .remove(&id)
        .map(|_| message("estado deleted"))
        .ok_or_else(|| Failure::not_found("estado"))
}

// ---------------------------------------------------------------------------
// Cidades
// ---------------------------------------------------------------------------

async fn list_cidades(State(db): State<Db>) -> Json<Vec<Cidade>> {
    let store = db.read().await;
    let mut cidades: Vec<Cidade> = store.cidades.values().map(|c| store.cidade_view(c)).collect();
    cidades.sort_by(|a, b| a.nm_cidade.cmp(&b.nm_cidade));
    Json(cidades)
}

async fn get_cidade(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Cidade>> {
    let store = db.read().await;
    store
        .cidades
        .get(&id)
        .map(|c| Json(store.cidade_view(c)))
        .ok_or_else(|| Failure::not_found("cidade"))
}

async fn create_cidade(
    State(db): State<Db>,
    Json(input): Json<CidadeInput>,
) -> HandlerResult<(StatusCode, Json<Value>)> {
    let message = "nm_cidade and id_estado are required";
    let nm_cidade = required(input.nm_cidade, message)?;
    let id_estado = required(input.id_estado, message)?;
    let mut store = db.write().await;
    if !store.estados.contains_key(&id_estado) {
        return Err(Failure::bad_request(format!("estado {id_estado} does not exist")));
    }
    let id_cidade = store.next_id();
    store.cidades.insert(
        id_cidade,
        Cidade {
            id_cidade,
            nm_cidade,
            id_estado,
            nm_estado: None,
        },
    );
    Ok(created("id_cidade", json!(id_cidade), "cidade created"))
}

async fn update_cidade(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<CidadeInput>,
) -> HandlerResult<Json<Value>> {
    let text = "nm_cidade and id_estado are required";
    let nm_cidade = required(input.nm_cidade, text)?;
    let id_estado = required(input.id_estado, text)?;
    let mut store = db.write().await;
    if !store.estados.contains_key(&id_estado) {
        return Err(Failure::bad_request(format!("estado {id_estado} does not exist")));
    }
    let cidade = store.cidades.get_mut(&id).ok_or_else(|| Failure::not_found("cidade"))?;
    cidade.nm_cidade = nm_cidade;
    cidade.id_estado = id_estado;
    Ok(message("cidade updated"))
}

async fn delete_cidade(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Value>> {
    let mut store = db.write().await;
    store
        .cidades
        .remove(&id)
        .map(|_| message("cidade deleted"))
        .ok_or_else(|| Failure::not_found("cidade"))
}

// ---------------------------------------------------------------------------
// Bairros
// ---------------------------------------------------------------------------

async fn list_bairros(State(db): State<Db>) -> Json<Vec<Bairro>> {
    let store = db.read().await;
    let mut bairros: Vec<Bairro> = store.bairros.values().map(|b| store.bairro_view(b)).collect();
    bairros.sort_by(|a, b| a.nm_bairro.cmp(&b.nm_bairro));
    Json(bairros)
}

async fn get_bairro(State(db): State<Db>, Path(cep): Path<i64>) -> HandlerResult<Json<Bairro>> {
    let store = db.read().await;
    store
        .bairros
        .get(&cep)
        .map(|b| Json(store.bairro_view(b)))
        .ok_or_else(|| Failure::not_found("bairro"))
}

async fn create_bairro(
    State(db): State<Db>,
    Json(input): Json<BairroInput>,
) -> HandlerResult<(StatusCode, Json<Value>)> {
    let text = "cep, nm_bairro and id_cidade are required";
    let cep = required(input.cep, text)?;
    let nm_bairro = required(input.nm_bairro, text)?;
    let id_cidade = required(input.id_cidade, text)?;
    let mut store = db.write().await;
    if !store.cidades.contains_key(&id_cidade) {
        return Err(Failure::bad_request(format!("cidade {id_cidade} does not exist")));
    }
    if store.bairros.contains_key(&cep) {
        return Err(Failure::bad_request(format!("bairro {cep} already exists")));
    }
    store.bairros.insert(
        cep,
        Bairro {
            cep,
            nm_bairro,
            id_cidade,
            nm_cidade: None,
            nm_estado: None,
        },
    );
    Ok(created("cep", json!(cep), "bairro created"))
}

async fn update_bairro(
    State(db): State<Db>,
    Path(cep): Path<i64>,
    Json(input): Json<BairroInput>,
) -> HandlerResult<Json<Value>> {
    let text = "nm_bairro and id_cidade are required";
    let nm_bairro = required(input.nm_bairro, text)?;
    let id_cidade = required(input.id_cidade, text)?;
    let mut store = db.write().await;
    if !store.cidades.contains_key(&id_cidade) {
        return Err(Failure::bad_request(format!("cidade {id_cidade} does not exist")));
    }
    let bairro = store.bairros.get_mut(&cep).ok_or_else(|| Failure::not_found("bairro"))?;
    bairro.nm_bairro = nm_bairro;
    bairro.id_cidade = id_cidade;
    Ok(message("bairro updated"))
}

async fn delete_bairro(State(db): State<Db>, Path(cep): Path<i64>) -> HandlerResult<Json<Value>> {
    let mut store = db.write().await;
    store
        .bairros
        .remove(&cep)
        .map(|_| message("bairro deleted"))
        .ok_or_else(|| Failure::not_found("bairro"))
}

// ---------------------------------------------------------------------------
// Usuarios
// ---------------------------------------------------------------------------

async fn list_usuarios(State(db): State<Db>) -> Json<Vec<Usuario>> {
    let store = db.read().await;
    let mut usuarios: Vec<Usuario> = store.usuarios.values().cloned().collect();
    usuarios.sort_by(|a, b| a.nm_usuario.cmp(&b.nm_usuario));
    Json(usuarios)
}

async fn get_usuario(State(db): State<Db>, Path(login): Path<String>) -> HandlerResult<Json<Usuario>> {
    let store = db.read().await;
    store
        .usuarios
        .get(&login)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("usuario"))
}

async fn create_usuario(
    State(db): State<Db>,
    Json(input): Json<UsuarioInput>,
) -> HandlerResult<(StatusCode, Json<Value>)> {
    let text = "login, senha and nm_usuario are required";
    let login = required(input.login, text)?;
    required(input.senha, text)?;
    let nm_usuario = required(input.nm_usuario, text)?;
    let mut store = db.write().await;
    if store.usuarios.contains_key(&login) {
        return Err(Failure::bad_request(format!("usuario {login} already exists")));
    }
    store.usuarios.insert(
        login.clone(),
        Usuario {
            login: login.clone(),
            nm_usuario,
            email_contato: input.email_contato,
        },
    );
    Ok(created("login", json!(login), "usuario created"))
}

async fn update_usuario(
    State(db): State<Db>,
    Path(login): Path<String>,
    Json(input): Json<UsuarioInput>,
) -> HandlerResult<Json<Value>> {
    let nm_usuario = required(input.nm_usuario, "nm_usuario is required")?;
    let mut store = db.write().await;
    let usuario = store.usuarios.get_mut(&login).ok_or_else(|| Failure::not_found("usuario"))?;
    usuario.nm_usuario = nm_usuario;
    usuario.email_contato = input.email_contato;
    Ok(message("usuario updated"))
}

async fn delete_usuario(
    State(db): State<Db>,
    Path(login): Path<String>,
) -> HandlerResult<Json<Value>> {
    let mut store = db.write().await;
    store
        .usuarios
        .remove(&login)
        .map(|_| message("usuario deleted"))
        .ok_or_else(|| Failure::not_found("usuario"))
}

// ---------------------------------------------------------------------------
// Autores
// ---------------------------------------------------------------------------

async fn list_autores(State(db): State<Db>) -> Json<Vec<Autor>> {
    let store = db.read().await;
    let mut autores: Vec<Autor> = store.autores.values().cloned().collect();
    autores.sort_by(|a, b| a.nm_autor.cmp(&b.nm_autor));
    Json(autores)
}

async fn get_autor(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Autor>> {
    let store = db.read().await;
    store
        .autores
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("autor"))
}

async fn create_autor(
    State(db): State<Db>,
    Json(input): Json<AutorInput>,
) -> HandlerResult<(StatusCode, Json<Value>)> {
    let nm_autor = required(input.nm_autor, "nm_autor is required")?;
    let mut store = db.write().await;
    let id_autor = store.next_id();
    store.autores.insert(id_autor, Autor { id_autor, nm_autor });
    Ok(created("id_autor", json!(id_autor), "autor created"))
}

async fn update_autor(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<AutorInput>,
) -> HandlerResult<Json<Value>> {
    let nm_autor = required(input.nm_autor, "nm_autor is required")?;
    let mut store = db.write().await;
    let autor = store.autores.get_mut(&id).ok_or_else(|| Failure::not_found("autor"))?;
    autor.nm_autor = nm_autor;
    Ok(message("autor updated"))
}

async fn delete_autor(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Value>> {
    let mut store = db.write().await;
    store
        .autores
        .remove(&id)
        .map(|_| message("autor deleted"))
        .ok_or_else(|| Failure::not_found("autor"))
}

// ---------------------------------------------------------------------------
// Categorias
// ---------------------------------------------------------------------------

/// Listing leaves the images out.
async fn list_categorias(State(db): State<Db>) -> Json<Vec<Categoria>> {
    let store = db.read().await;
    let mut categorias: Vec<Categoria> = store
        .categorias
        .values()
        .map(|c| Categoria {
            img_categoria: None,
            ..c.clone()
        })
        .collect();
    categorias.sort_by(|a, b| a.nm_categoria.cmp(&b.nm_categoria));
    Json(categorias)
}

async fn get_categoria(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> HandlerResult<Json<Categoria>> {
    let store = db.read().await;
    store
        .categorias
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("categoria"))
}

async fn create_categoria(
    State(db): State<Db>,
    Json(input): Json<CategoriaInput>,
) -> HandlerResult<(StatusCode, Json<Value>)> {
    let text = "nm_categoria and img_categoria are required";
    let nm_categoria = required(input.nm_categoria, text)?;
    let img_categoria = required(input.img_categoria, text)?;
    let mut store = db.write().await;
    let id_categoria = store.next_id();
    store.categorias.insert(
        id_categoria,
        Categoria {
            id_categoria,
            nm_categoria,
            img_categoria: Some(img_categoria),
        },
    );
    Ok(created("id_categoria", json!(id_categoria), "categoria created"))
}

async fn update_categoria(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<CategoriaInput>,
) -> HandlerResult<Json<Value>> {
    let nm_categoria = required(input.nm_categoria, "nm_categoria is required")?;
    let mut store = db.write().await;
    let categoria = store
        .categorias
        .get_mut(&id)
        .ok_or_else(|| Failure::not_found("categoria"))?;
    categoria.nm_categoria = nm_categoria;
    if input.img_categoria.is_some() {
        categoria.img_categoria = input.img_categoria;
    }
    Ok(message("categoria updated"))
}

async fn delete_categoria(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Value>> {
    let mut store = db.write().await;
    store
        .categorias
        .remove(&id)
        .map(|_| message("categoria deleted"))
        .ok_or_else(|| Failure::not_found("categoria"))
}

// ---------------------------------------------------------------------------
// Livros
// ---------------------------------------------------------------------------

async fn list_livros(State(db): State<Db>) -> Json<Vec<Livro>> {
    let store = db.read().await;
    let mut livros: Vec<Livro> = store
        .livros
        .values()
        .map(|l| store.livro_view(l, false))
        .collect();
    livros.sort_by(|a, b| a.nm_livro.cmp(&b.nm_livro));
    Json(livros)
}

async fn get_livro(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Livro>> {
    let store = db.read().await;
    store
        .livros
        .get(&id)
        .map(|l| Json(store.livro_view(l, true)))
        .ok_or_else(|| Failure::not_found("livro"))
}

async fn create_livro(
    State(db): State<Db>,
    Json(input): Json<LivroInput>,
) -> HandlerResult<(StatusCode, Json<Value>)> {
    fn field<T>(value: Option<T>, name: &str) -> HandlerResult<T> {
        value.ok_or_else(|| Failure::bad_request(format!("{name} is required")))
    }

    let mut store = db.write().await;
    store.check_livro_refs(&input)?;

    let nm_livro = field(input.nm_livro, "nm_livro")?;
    let preco = field(input.preco, "preco")?;
    let pagamento_eletronico = field(input.pagamento_eletronico, "pagamento_eletronico")?;
    let pagamento_dinheiro = field(input.pagamento_dinheiro, "pagamento_dinheiro")?;
    let entrega_presencial = field(input.entrega_presencial, "entrega_presencial")?;
    let entrega_delivery = field(input.entrega_delivery, "entrega_delivery")?;
    let img_livro = field(input.img_livro, "img_livro")?;
    let cep = field(input.cep, "cep")?;
    let login_comprador = field(input.login_comprador, "login_comprador")?;
    let login_vendedor = field(input.login_vendedor, "login_vendedor")?;

    let id_livro = store.next_id();
    let livro = Livro {
        id_livro,
        nm_livro,
        preco,
        pagamento_eletronico,
        pagamento_dinheiro,
        entrega_presencial,
        entrega_delivery,
        img_livro: Some(img_livro),
        cep,
        login_comprador,
        login_vendedor,
        nm_bairro: None,
        nm_cidade: None,
        nm_estado: None,
        autores: Vec::new(),
        categorias: Vec::new(),
    };
    store.livros.insert(
        id_livro,
        StoredLivro {
            livro,
            autores: input.autores.unwrap_or_default(),
            categorias: input.categorias.unwrap_or_default(),
        },
    );
    Ok(created("id_livro", json!(id_livro), "livro created"))
}

async fn update_livro(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<LivroInput>,
) -> HandlerResult<Json<Value>> {
    let mut store = db.write().await;
    store.check_livro_refs(&input)?;
    let stored = store.livros.get_mut(&id).ok_or_else(|| Failure::not_found("livro"))?;

    let livro = &mut stored.livro;
    if let Some(v) = input.nm_livro {
        livro.nm_livro = v;
    }
    if let Some(v) = input.preco {
        livro.preco = v;
    }
    if let Some(v) = input.pagamento_eletronico {
        livro.pagamento_eletronico = v;
    }
    if let Some(v) = input.pagamento_dinheiro {
        livro.pagamento_dinheiro = v;
    }
    if let Some(v) = input.entrega_presencial {
        livro.entrega_presencial = v;
    }
    if let Some(v) = input.entrega_delivery {
        livro.entrega_delivery = v;
    }
    if let Some(v) = input.img_livro {
        livro.img_livro = Some(v);
    }
    if let Some(v) = input.cep {
        livro.cep = v;
    }
    if let Some(v) = input.login_comprador {
        livro.login_comprador = v;
    }
    if let Some(v) = input.login_vendedor {
        livro.login_vendedor = v;
    }
    if let Some(autores) = input.autores {
        stored.autores = autores;
    }
    if let Some(categorias) = input.categorias {
        stored.categorias = categorias;
    }
    Ok(message("livro updated"))
}

async fn delete_livro(State(db): State<Db>, Path(id): Path<i64>) -> HandlerResult<Json<Value>> {
    let mut store = db.write().await;
    store
        .livros
        .remove(&id)
        .map(|_| message("livro deleted"))
        .ok_or_else(|| Failure::not_found("livro"))
}
