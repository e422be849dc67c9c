//! Strips the comments out of a discovery manifest and prints the result.
//!
//! The manifest carries its documentation inline as `//` and `/* */`
//! comments, some of them next to string values that themselves contain
//! comment markers. After stripping, the payload is plain JSON.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsonstrip --example manifest
//! cargo run -p jsonstrip --example manifest -- --copy
//! RUST_LOG=jsonstrip=trace cargo run -p jsonstrip --example manifest
//! ```

use bstr::ByteSlice;
use jsonstrip::{OutputMode, Stripped, strip_json_comments};
use tracing_subscriber::EnvFilter;

const MANIFEST: &str = include_str!("../tests/fixtures/manifest.jsonc");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mode = if std::env::args().any(|arg| arg == "--copy") {
        OutputMode::Copy
    } else {
        OutputMode::InPlace
    };

    let mut payload = MANIFEST.as_bytes().to_vec();
    let stripped = match strip_json_comments(&mut payload, mode) {
        Ok(Stripped::Copied(out)) => out,
        Ok(Stripped::InPlace { .. }) => payload,
        Err(err) => {
            eprintln!("Failed to remove JSON comment: {err}");
            std::process::exit(1);
        }
    };

    println!("JSON comments removed:\n{}", stripped.to_str_lossy());
}
