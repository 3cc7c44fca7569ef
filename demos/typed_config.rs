//! Reading an application config written in extended TOML into typed structs.
//!
//! Run with: cargo run --example typed_config

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_loose::{from_toml_str, parse_toml, Interop, LineBreak, Value};
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Config {
    service: Service,
    backends: Vec<Backend>,
}

#[derive(Debug, Deserialize)]
struct Service {
    name: String,
    listen: Vec<u16>,
    started: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct Backend {
    host: String,
    weight: f64,
}

const CONFIG: &str = r#"
// comments in three styles
/* are all accepted */
[service]
name = 'gateway'
listen = [0x1F90, 8443,]          # 0x1F90 is 8080
started = 2024-03-01 09:30:00+01:00

[[backends]]
host = "10.0.0.1"
weight = .75

[[backends]]
host = "10.0.0.2"
weight = 0.25
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = from_toml_str(CONFIG)?;
    println!("{:#?}", config);

    // The same document as a dynamic value tree
    let value = parse_toml(CONFIG, LineBreak::Lf, Interop::None)?;
    if let Some(Value::DateTime(started)) = value.pointer(&["service", "started"]) {
        println!("started (UTC): {}", started);
    }

    // Errors carry their position
    if let Err(err) = from_toml_str::<Config>("[service]\nname = 'x' 'y\n") {
        println!("\n{}", err);
    }

    Ok(())
}
