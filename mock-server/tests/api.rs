use axum::http::{self, Request, StatusCode};
use axum::response::Response;
use axum::routing::RouterIntoService;
use http_body_util::BodyExt;
use mock_server::{app, Autor, Estado, Livro};
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn delete(uri: &str) -> Request<String> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn send(app: &mut RouterIntoService<String>, request: Request<String>) -> Response {
    ServiceExt::ready(app).await.unwrap().call(request).await.unwrap()
}

async fn create(app: &mut RouterIntoService<String>, uri: &str, body: Value) -> Value {
    let resp = send(app, json_request("POST", uri, body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "POST {uri}");
    body_json(resp).await
}

// --- system ---

#[tokio::test]
async fn health_reports_ok() {
    let resp = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn info_lists_endpoints() {
    let resp = app().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["endpoints"]["livros"], "/livros");
}

#[tokio::test]
async fn unknown_route_returns_error_json() {
    let resp = app().oneshot(get("/editoras")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"error": "endpoint not found"}));
}

// --- lists ---

#[tokio::test]
async fn lists_start_empty() {
    for uri in ["/estados", "/cidades", "/bairros", "/usuarios", "/autores", "/categorias", "/livros"] {
        let resp = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let records: Vec<Value> = body_json(resp).await;
        assert!(records.is_empty(), "{uri}");
    }
}

// --- create ---

#[tokio::test]
async fn create_estado_returns_id_and_message() {
    let resp = app()
        .oneshot(json_request("POST", "/estados", json!({"nm_estado": "Bahia"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["id_estado"], 1);
    assert_eq!(body["message"], "estado created");
}

#[tokio::test]
async fn create_estado_without_name_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/estados", json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "nm_estado is required");
}

#[tokio::test]
async fn create_cidade_with_unknown_estado_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/cidades",
            json!({"nm_cidade": "Salvador", "id_estado": 99}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "estado 99 does not exist");
}

#[tokio::test]
async fn create_categoria_requires_image() {
    let resp = app()
        .oneshot(json_request("POST", "/categorias", json!({"nm_categoria": "Poesia"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_login_returns_400() {
    let mut app = app().into_service();
    let usuario = json!({"login": "joao123", "senha": "x", "nm_usuario": "João"});
    create(&mut app, "/usuarios", usuario.clone()).await;

    let resp = send(&mut app, json_request("POST", "/usuarios", usuario)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get / update / delete on missing records ---

#[tokio::test]
async fn get_estado_not_found() {
    let resp = app().oneshot(get("/estados/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "estado not found");
}

#[tokio::test]
async fn update_autor_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/autores/7", json!({"nm_autor": "Ninguém"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_livro_not_found() {
    let resp = app().oneshot(delete("/livros/7")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let resp = app().oneshot(get("/estados/bahia")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn estado_crud_lifecycle() {
    let mut app = app().into_service();

    let created = create(&mut app, "/estados", json!({"nm_estado": "Bahia"})).await;
    let id = created["id_estado"].as_i64().unwrap();

    let resp = send(&mut app, get(&format!("/estados/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let estado: Estado = body_json(resp).await;
    assert_eq!(estado.nm_estado, "Bahia");

    let resp = send(
        &mut app,
        json_request("PUT", &format!("/estados/{id}"), json!({"nm_estado": "BA"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&mut app, get("/estados")).await;
    let estados: Vec<Estado> = body_json(resp).await;
    assert_eq!(estados.len(), 1);
    assert_eq!(estados[0].nm_estado, "BA");

    let resp = send(&mut app, delete(&format!("/estados/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "estado deleted");

    let resp = send(&mut app, get(&format!("/estados/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn livro_list_embeds_relations_and_location() {
    let mut app = app().into_service();

    let estado = create(&mut app, "/estados", json!({"nm_estado": "Bahia"})).await;
    let cidade = create(
        &mut app,
        "/cidades",
        json!({"nm_cidade": "Salvador", "id_estado": estado["id_estado"]}),
    )
    .await;
    create(
        &mut app,
        "/bairros",
        json!({"cep": 40070110, "nm_bairro": "Centro", "id_cidade": cidade["id_cidade"]}),
    )
    .await;
    for login in ["joao123", "maria456"] {
        create(
            &mut app,
            "/usuarios",
            json!({"login": login, "senha": "segredo", "nm_usuario": login}),
        )
        .await;
    }
    let autor = create(&mut app, "/autores", json!({"nm_autor": "Jorge Amado"})).await;
    let categoria = create(
        &mut app,
        "/categorias",
        json!({"nm_categoria": "Literatura Regional", "img_categoria": "aW1n"}),
    )
    .await;

    let livro = create(
        &mut app,
        "/livros",
        json!({
            "nm_livro": "Capitães da Areia",
            "preco": 29.9,
            "pagamento_eletronico": "S",
            "pagamento_dinheiro": "S",
            "entrega_presencial": "S",
            "entrega_delivery": "N",
            "img_livro": "aW1n",
            "cep": 40070110,
            "login_comprador": "joao123",
            "login_vendedor": "maria456",
            "autores": [autor["id_autor"]],
            "categorias": [categoria["id_categoria"]]
        }),
    )
    .await;
    let id_livro = livro["id_livro"].as_i64().unwrap();

    let resp = send(&mut app, get("/livros")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let livros: Vec<Livro> = body_json(resp).await;
    assert_eq!(livros.len(), 1);
    let listed = &livros[0];
    assert_eq!(listed.id_livro, id_livro);
    assert_eq!(listed.nm_cidade.as_deref(), Some("Salvador"));
    assert_eq!(listed.nm_estado.as_deref(), Some("Bahia"));
    assert!(listed.img_livro.is_none());
    assert_eq!(
        listed.autores,
        vec![Autor {
            id_autor: autor["id_autor"].as_i64().unwrap(),
            nm_autor: "Jorge Amado".to_string()
        }]
    );
    assert_eq!(listed.categorias[0].nm_categoria, "Literatura Regional");

    let resp = send(&mut app, get(&format!("/livros/{id_livro}"))).await;
    let fetched: Livro = body_json(resp).await;
    assert_eq!(fetched.img_livro.as_deref(), Some("aW1n"));

    // partial update keeps the other fields
    let resp = send(
        &mut app,
        json_request("PUT", &format!("/livros/{id_livro}"), json!({"preco": 19.9})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&mut app, get(&format!("/livros/{id_livro}"))).await;
    let fetched: Livro = body_json(resp).await;
    assert_eq!(fetched.preco, 19.9);
    assert_eq!(fetched.nm_livro, "Capitães da Areia");
}

#[tokio::test]
async fn livro_missing_field_is_named() {
    let resp = app()
        .oneshot(json_request("POST", "/livros", json!({"nm_livro": "Sem preço"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "preco is required");
}

#[tokio::test]
async fn rejected_livro_does_not_consume_an_id() {
    let mut app = app().into_service();

    let resp = send(
        &mut app,
        json_request("POST", "/livros", json!({"nm_livro": "Sem preço"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let created = create(&mut app, "/autores", json!({"nm_autor": "Jorge Amado"})).await;
    assert_eq!(created["id_autor"], 1);
}

#[tokio::test]
async fn usuario_requires_password_but_never_returns_it() {
    let mut app = app().into_service();

    let resp = send(
        &mut app,
        json_request("POST", "/usuarios", json!({"login": "ana", "nm_usuario": "Ana"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    create(
        &mut app,
        "/usuarios",
        json!({"login": "ana", "senha": "segredo", "nm_usuario": "Ana"}),
    )
    .await;
    let resp = send(
        &mut app,
        json_request("PUT", "/usuarios/ana", json!({"nm_usuario": "Ana Maria", "senha": "nova"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&mut app, get("/usuarios/ana")).await;
    let body: Value = body_json(resp).await;
    assert_eq!(body["NM_USUARIO"], "Ana Maria");
    assert!(body.get("SENHA").is_none());
}
