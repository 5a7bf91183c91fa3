//! Reading a record from an environment variable.
//!
//! Run with: MY_CFG="host=localhost port=8080" cargo run --example env

use linecfg::record;
use std::error::Error;

#[derive(Debug, Default)]
struct Config {
    host: String,
    some_port: i32,
}

record!(Config {
    host,
    some_port as "port",
});

fn main() -> Result<(), Box<dyn Error>> {
    let mut config = Config::default();
    linecfg::decode_env("MY_CFG", &mut config)?;

    println!("host {}", config.host);
    println!("port {}", config.some_port);

    // Written back with only the non-zero fields
    println!("MY_CFG=\"{}\"", linecfg::encode(&config));

    Ok(())
}
