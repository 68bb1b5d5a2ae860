use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use clap::{Parser, Subcommand};
use events::{BotResponse, DOCTORS_ROOM, Envelope, NewPatient, patient_room};
use futures_util::{SinkExt, StreamExt};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// How long a chat turn waits for the assistant before giving up.
const REPLY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session token; pass --token or set MEDTRIAGE_TOKEN")]
    MissingToken,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("event decode failed: {0}")]
    Decode(#[from] events::CodecError),
    #[error("timed out waiting for the assistant")]
    Timeout,
    #[error("{endpoint} failed: {message}")]
    ServerError { endpoint: String, message: String },
    #[error("stdin read failed: {0}")]
    Stdin(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "medtriage-cli", about = "MedTriage API and live-event CLI")]
struct Cli {
    #[arg(long, env = "MEDTRIAGE_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    #[arg(long, env = "MEDTRIAGE_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the backend is reachable.
    Ping,
    /// Sign in as a doctor and print the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// List the triage queue (requires --token).
    Patients,
    /// Open a triage session for a patient.
    Start {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: i64,
    },
    /// Chat with the triage assistant; reads messages from stdin.
    Chat {
        #[arg(long)]
        session_id: String,
    },
    /// Watch the doctors room for new-patient notifications.
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext {
        base_url: cli.base_url,
        token: cli.token,
    };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Login { email, password } => run_login(&ctx, &email, &password).await,
        Command::Patients => run_patients(&ctx).await,
        Command::Start { name, age } => run_start(&ctx, &name, age).await,
        Command::Chat { session_id } => run_chat(&ctx, &session_id).await,
        Command::Watch => run_watch(&ctx).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let json = api_request(cli, reqwest::Method::GET, "/api/test", None, false).await?;
    match json.get("message").and_then(Value::as_str) {
        Some(message) => println!("{message}"),
        None => print_json(&json)?,
    }
    Ok(())
}

async fn run_login(cli: &CliContext, email: &str, password: &str) -> Result<(), CliError> {
    let json = api_request(
        cli,
        reqwest::Method::POST,
        "/api/auth/login",
        Some(serde_json::json!({ "email": email, "password": password })),
        false,
    )
    .await?;
    print_json(&json)?;
    Ok(())
}

async fn run_patients(cli: &CliContext) -> Result<(), CliError> {
    let json = api_request(cli, reqwest::Method::GET, "/api/doctor/patients", None, true).await?;
    print_json(&json)?;
    Ok(())
}

async fn run_start(cli: &CliContext, name: &str, age: i64) -> Result<(), CliError> {
    let json = api_request(
        cli,
        reqwest::Method::POST,
        "/api/start_triage",
        Some(serde_json::json!({ "name": name, "age": age })),
        false,
    )
    .await?;
    print_json(&json)?;
    Ok(())
}

async fn run_chat(cli: &CliContext, session_id: &str) -> Result<(), CliError> {
    let room = patient_room(session_id);
    let mut stream = connect_events(&cli.base_url).await?;
    send_event(&mut stream, &Envelope::join(&room)).await?;
    eprintln!("joined {room}; type a message and press enter (ctrl-d to quit)");

    let mut reader = BufReader::new(io::stdin());
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        send_event(&mut stream, &Envelope::patient_message(session_id, text)).await?;
        let reply = wait_for_bot_response(&mut stream).await?;
        match reply.kind.as_deref() {
            Some(kind) => println!("[{kind}] {}", reply.message),
            None => println!("{}", reply.message),
        }
    }

    send_event(&mut stream, &Envelope::leave(&room)).await?;
    Ok(())
}

async fn run_watch(cli: &CliContext) -> Result<(), CliError> {
    let mut stream = connect_events(&cli.base_url).await?;
    send_event(&mut stream, &Envelope::join(DOCTORS_ROOM)).await?;
    eprintln!("watching the doctors room; ctrl-c to stop");

    loop {
        let envelope = next_event(&mut stream).await?;
        if envelope.event == "new_patient" {
            match serde_json::from_value::<NewPatient>(envelope.data.clone()) {
                Ok(NewPatient {
                    patient_id: Some(id),
                }) => println!("new patient: id={id}"),
                _ => println!("new patient"),
            }
        } else {
            println!("{}: {}", envelope.event, envelope.data);
        }
    }
}

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
    require_auth: bool,
) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}{}", cli.base_url.trim_end_matches('/'), path);

    let mut request = client.request(method, &url);
    if require_auth {
        let token = cli.token.as_deref().ok_or(CliError::MissingToken)?;
        request = request.header(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    }
    let request = if let Some(json) = body {
        request.json(&json)
    } else {
        request
    };

    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = value.get("error").and_then(Value::as_str).map_or_else(
            || format!("HTTP {}", status.as_u16()),
            ToOwned::to_owned,
        );
        return Err(CliError::ServerError {
            endpoint: path.to_owned(),
            message,
        });
    }

    Ok(value)
}

async fn connect_events(base_url: &str) -> Result<WsStream, CliError> {
    let url = ws_url(base_url)?;
    let (stream, _) = connect_async(url)
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))?;
    Ok(stream)
}

fn ws_url(base_url: &str) -> Result<String, CliError> {
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{}/ws", rest.trim_end_matches('/')));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{}/ws", rest.trim_end_matches('/')));
    }

    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

async fn send_event(stream: &mut WsStream, envelope: &Envelope) -> Result<(), CliError> {
    stream
        .send(Message::Text(events::encode_event(envelope).into()))
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))
}

async fn wait_for_bot_response(stream: &mut WsStream) -> Result<BotResponse, CliError> {
    let fut = async {
        loop {
            let envelope = next_event(stream).await?;
            if envelope.event != "bot_response" {
                continue;
            }
            return serde_json::from_value::<BotResponse>(envelope.data).map_err(CliError::from);
        }
    };

    tokio::time::timeout(REPLY_TIMEOUT, fut)
        .await
        .map_err(|_| CliError::Timeout)?
}

async fn next_event(stream: &mut WsStream) -> Result<Envelope, CliError> {
    loop {
        let Some(message) = stream.next().await else {
            return Err(CliError::WsClosed);
        };
        match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
            Message::Text(text) => return events::decode_event(&text).map_err(CliError::from),
            Message::Close(_) => return Err(CliError::WsClosed),
            _ => {}
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
