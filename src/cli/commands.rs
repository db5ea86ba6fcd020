//! CLI command implementations
//!
//! Startup order for every command that touches the model:
//! 1. Configuration load
//! 2. Model artifact load and column check
//! 3. Command body
//!
//! A failure in 1 or 2 is logged as FATAL and ends the process.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::config::ServiceConfig;
use crate::http_server::HttpServer;
use crate::model::InferenceGateway;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::service::PredictionService;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Predict { config } => predict(&config),
        Command::Encode { config } => encode(&config),
        Command::Check { config } => check(&config),
    }
}

/// Load and validate the configuration, logging a FATAL line on failure
fn load_config(config_path: &Path) -> CliResult<ServiceConfig> {
    match ServiceConfig::load(config_path) {
        Ok(config) => {
            log_event_with_fields(
                Event::ConfigLoaded,
                &[("config", &config_path.display().to_string())],
            );
            Ok(config)
        }
        Err(e) => {
            log_event_with_fields(
                Event::BootFailed,
                &[
                    ("config", &config_path.display().to_string()),
                    ("reason", &e.to_string()),
                ],
            );
            Err(e.into())
        }
    }
}

/// Load the model and assemble the service
fn boot(config: &ServiceConfig) -> CliResult<PredictionService> {
    PredictionService::bootstrap(config).map_err(|e| {
        log_event_with_fields(
            Event::ModelLoadFailed,
            &[
                ("path", &config.model_path.display().to_string()),
                ("code", e.code()),
                ("reason", &e.to_string()),
            ],
        );
        CliError::from(e)
    })
}

/// Load the model and serve HTTP until Ctrl+C
///
/// The listener is only bound once the model is loaded and its columns
/// agree with the encoder.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let service = Arc::new(boot(&config)?);
    let server = HttpServer::new(config.server.clone(), service, config.response_key.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Score one record read from stdin
///
/// Full boot → read record → predict → print → exit
pub fn predict(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let service = boot(&config)?;
    let request = read_request()?;

    match predict_record(&service, &config.response_key, &request) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

fn predict_record(
    service: &PredictionService,
    response_key: &str,
    request: &Value,
) -> CliResult<Value> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let prediction = rt.block_on(service.predict(request))?;

    let mut data = Map::new();
    data.insert(response_key.to_string(), Value::from(prediction.value));
    Ok(Value::Object(data))
}

/// Print the encoded feature vector for one record read from stdin
///
/// Never loads the model artifact.
pub fn encode(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let request = read_request()?;

    match encode_record(&config, &request) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

fn encode_record(config: &ServiceConfig, request: &Value) -> CliResult<Value> {
    let service = PredictionService::new(
        Arc::new(config.schema.clone()),
        InferenceGateway::unavailable(),
    )?;

    let columns = service.explain(request)?;
    let vector: Vec<f64> = columns.iter().map(|c| c.value).collect();

    Ok(json!({
        "columns": columns,
        "vector": vector,
    }))
}

/// Validate config and model artifact, then exit
pub fn check(config_path: &Path) -> CliResult<()> {
    let data = check_config(config_path)?;
    write_response(data)
}

fn check_config(config_path: &Path) -> CliResult<Value> {
    let config = load_config(config_path)?;
    let service = boot(&config)?;

    let model = service
        .gateway()
        .model()
        .ok_or_else(|| CliError::boot_failed("No model loaded"))?;

    Ok(json!({
        "model": model.name(),
        "fingerprint": model.fingerprint(),
        "columns": service.encoder().columns(),
        "inference_timeout_ms": config.inference_timeout_ms,
        "listen": config.server.socket_addr(),
    }))
}
