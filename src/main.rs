use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::anyhow;
use clap::Parser;
use serde_json::{json, Map, Value};
use tracing_subscriber::EnvFilter;

use darter::middleware::{ErrorLogger, JsonBodyMiddleware, LoggingMiddleware};
use darter::server::{App, Request, Response};

#[derive(Parser, Debug)]
#[command(name = "darter", about = "Example darter service")]
struct Args {
    /// Port to listen on
    #[arg(long, short, default_value_t = 3000, env = "DARTER_PORT")]
    port: u16,
}

fn hello(_req: &mut Request, res: &mut Response) -> anyhow::Result<()> {
    res.set_status(200);
    res.set_header("Content-Type", "text/plain");
    res.send("Hello, World!");
    Ok(())
}

fn time(_req: &mut Request, res: &mut Response) -> anyhow::Result<()> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow!("system clock before epoch: {e}"))?;
    res.set_status(200);
    res.set_header("Content-Type", "text/plain");
    res.send(now.as_secs().to_string());
    Ok(())
}

fn echo(req: &mut Request, res: &mut Response) -> anyhow::Result<()> {
    let body = req
        .parsed_body
        .clone()
        .unwrap_or_else(|| Value::Object(Map::new()));
    res.set_status(200);
    res.send_json(&body);
    Ok(())
}

fn create_user(_req: &mut Request, res: &mut Response) -> anyhow::Result<()> {
    res.set_status(201);
    res.send_json(&json!({ "id": 1, "name": "John Doe" }));
    Ok(())
}

fn add_to_user(req: &mut Request, res: &mut Response) -> anyhow::Result<()> {
    let id = req.get_param("id").unwrap_or_default().to_string();
    let name = req.get_param("name").unwrap_or_default().to_string();
    res.set_status(200);
    res.send_json(&json!({ "id": id, "name": name, "query": req.query.clone() }));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut app = App::new();
    app.use_middleware(LoggingMiddleware);
    app.use_middleware(JsonBodyMiddleware);
    app.use_error_handler(ErrorLogger);

    app.get("/", hello);
    app.get("/time", time);
    app.post("/echo", echo);
    app.post("/users", create_user);
    app.post("/users/:id/add/:name", add_to_user);

    let handle = app.listen(args.port)?;
    handle
        .join()
        .map_err(|e| anyhow!("server thread panicked: {e:?}"))
}
