mod args;

use std::process::ExitCode;

use anyhow::Context;
use biblioteca_core::{
    file_to_base64, validate_cep, validate_email, ApiResponse, BibliotecaApi, ClientConfig,
};
use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands, Resource};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ClientConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config.validate().context("invalid --base-url")?;
    }
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    let api = BibliotecaApi::from_config(&config).context("building HTTP client")?;

    let envelope = match cli.command {
        Commands::Health => api.health().await,
        Commands::Info => api.info().await,
        Commands::Stats => stats(&api).await,
        Commands::List { resource } => list(&api, resource).await,
        Commands::Get { resource, key } => get(&api, resource, &key).await,
        Commands::Books {
            author,
            category,
            min_price,
            max_price,
        } => {
            let found = match (author, category, min_price.zip(max_price)) {
                (Some(author), _, _) => api.livros_by_autor(&author).await,
                (_, Some(category), _) => api.livros_by_categoria(&category).await,
                (_, _, Some((min, max))) => api.livros_by_preco(min, max).await,
                _ => ApiResponse::failure(
                    "one of --author, --category or --min-price/--max-price is required",
                    400,
                ),
            };
            found.map(Value::from)
        }
        Commands::CheckCep { cep } => {
            return print_check(json!({ "cep": cep, "valid": validate_cep(&cep) }))
        }
        Commands::CheckEmail { email } => {
            return print_check(json!({ "email": email, "valid": validate_email(&email) }))
        }
        Commands::Encode { file } => {
            let encoded = file_to_base64(&file)
                .await
                .with_context(|| format!("encoding {}", file.display()))?;
            println!("{encoded}");
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(exit_code(envelope.is_success()))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn list(api: &BibliotecaApi, resource: Resource) -> ApiResponse<Value> {
    match resource {
        Resource::Estados => api.list_estados().await,
        Resource::Cidades => api.list_cidades().await,
        Resource::Bairros => api.list_bairros().await,
        Resource::Usuarios => api.list_usuarios().await,
        Resource::Autores => api.list_autores().await,
        Resource::Categorias => api.list_categorias().await,
        Resource::Livros => api.list_livros().await,
    }
}

async fn get(api: &BibliotecaApi, resource: Resource, key: &str) -> ApiResponse<Value> {
    if resource == Resource::Usuarios {
        return api.get_usuario(key).await;
    }
    let Ok(id) = key.parse::<i64>() else {
        return ApiResponse::failure(format!("invalid numeric key: {key}"), 400);
    };
    match resource {
        Resource::Estados => api.get_estado(id).await,
        Resource::Cidades => api.get_cidade(id).await,
        Resource::Bairros => api.get_bairro(id).await,
        Resource::Autores => api.get_autor(id).await,
        Resource::Categorias => api.get_categoria(id).await,
        Resource::Livros => api.get_livro(id).await,
        Resource::Usuarios => api.get_usuario(key).await,
    }
}

async fn stats(api: &BibliotecaApi) -> ApiResponse<Value> {
    match api.estatisticas().await {
        ApiResponse::Success { data, status } => match serde_json::to_value(data) {
            Ok(data) => ApiResponse::success(data, status),
            Err(e) => ApiResponse::failure(e.to_string(), 500),
        },
        ApiResponse::Failure { error, status } => ApiResponse::failure(error, status),
    }
}

fn print_check(report: Value) -> anyhow::Result<ExitCode> {
    let valid = report["valid"].as_bool().unwrap_or(false);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(exit_code(valid))
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
