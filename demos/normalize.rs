//! Rewrites a loose JSON or extended TOML file as strict JSON.
//!
//! Run with: cargo run --example normalize -- config.toml
//!
//! The dialect follows the file extension; anything other than `.toml` is read
//! as loose JSON. Without a path the input is read from stdin as JSON.

use serde_loose::{normalize_json, normalize_toml};
use std::error::Error;
use std::io::Read;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1);

    let (source, is_toml) = match &path {
        Some(path) => {
            let is_toml = Path::new(path)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
            (std::fs::read_to_string(path)?, is_toml)
        }
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            (source, false)
        }
    };

    let json = if is_toml {
        normalize_toml(&source, true)
    } else {
        normalize_json(&source, true)
    };

    match json {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
