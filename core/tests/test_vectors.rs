//! Verify request building and response normalization against the JSON
//! vectors stored in `test-vectors/`.
//!
//! Bodies are compared as parsed JSON, not raw strings, so field order does
//! not matter.

use biblioteca_core::{
    parse_response, AtualizaUsuario, BibliotecaApi, HttpMethod, HttpRequest, HttpResponse,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:5000";

fn client() -> BibliotecaApi {
    BibliotecaApi::new(BASE_URL).unwrap()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn str_arg<'a>(args: &'a Value, key: &str) -> &'a str {
    args[key].as_str().unwrap()
}

fn int_arg(args: &Value, key: &str) -> i64 {
    args[key].as_i64().unwrap()
}

/// Dispatch a vector's `call` to the matching `build_*` method.
fn build(c: &BibliotecaApi, call: &str, args: &Value) -> HttpRequest {
    match call {
        "health" => c.build_health(),
        "info" => c.build_info(),
        "list_estados" => c.build_list_estados(),
        "create_estado" => c.build_create_estado(str_arg(args, "nome")).unwrap(),
        "create_cidade" => c
            .build_create_cidade(str_arg(args, "nome"), int_arg(args, "id_estado"))
            .unwrap(),
        "delete_cidade" => c.build_delete_cidade(int_arg(args, "id")),
        "get_bairro" => c.build_get_bairro(int_arg(args, "cep")),
        "create_usuario" => c
            .build_create_usuario(
                str_arg(args, "login"),
                str_arg(args, "senha"),
                str_arg(args, "nome"),
                args["email"].as_str(),
            )
            .unwrap(),
        "get_usuario" => c.build_get_usuario(str_arg(args, "login")),
        "create_autor" => c.build_create_autor(str_arg(args, "nome")).unwrap(),
        "create_categoria" => c
            .build_create_categoria(str_arg(args, "nome"), str_arg(args, "imagem"))
            .unwrap(),
        "update_categoria" => c
            .build_update_categoria(int_arg(args, "id"), str_arg(args, "nome"), args["imagem"].as_str())
            .unwrap(),
        "create_livro" => c.build_create_livro(&args["livro"]).unwrap(),
        "update_livro" => c
            .build_update_livro(int_arg(args, "id"), &args["livro"])
            .unwrap(),
        other => panic!("unknown call: {other}"),
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];
        let req = build(&c, case["call"].as_str().unwrap(), &case["args"]);

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let body = req
            .body
            .as_deref()
            .map(|b| serde_json::from_str::<Value>(b).unwrap())
            .unwrap_or(Value::Null);
        assert_eq!(body, expected["body"], "{name}: body");
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        )
        .with_status_text(sim["status_text"].as_str().unwrap());

        let envelope = serde_json::to_value(parse_response(response)).unwrap();
        assert_eq!(envelope, case["expected"], "{name}: envelope");
    }
}

#[test]
fn invalid_json_on_success_is_a_500_failure() {
    let envelope = parse_response(HttpResponse::new(200, "<html>ok</html>"));
    assert!(!envelope.is_success());
    assert_eq!(envelope.status(), 500);
    assert!(envelope.error().unwrap().starts_with("invalid JSON in response body"));
}

#[test]
fn update_usuario_omits_unset_password() {
    let update = AtualizaUsuario {
        nm_usuario: "João".to_string(),
        email_contato: Some("joao@email.com".to_string()),
        senha: None,
    };
    let req = client().build_update_usuario("joao123", &update).unwrap();
    assert_eq!(req.method, HttpMethod::Put);
    assert_eq!(req.url, format!("{BASE_URL}/usuarios/joao123"));
    let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert!(body.get("senha").is_none());
    assert_eq!(body["email_contato"], "joao@email.com");
}
