use std::{env, fs};

use tracing_subscriber::{EnvFilter, FmtSubscriber};
use ttml_subtitles::{TtmlGenerationOptions, generate_ttml, parse_ttml};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ttml_subtitles=debug"));
    FmtSubscriber::builder().with_env_filter(filter).init();

    let input_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/test_data/example-in.ttml".to_string());
    let output_path = "roundtrip_output.ttml";

    let content = fs::read(&input_path)?;
    let subtitles = parse_ttml(&content)?;

    let generation_options = TtmlGenerationOptions {
        language: Some("en".to_string()),
        ..Default::default()
    };
    let generated = generate_ttml(&subtitles, &generation_options)?;

    fs::write(output_path, &generated)?;
    println!("{}", String::from_utf8_lossy(&generated));

    Ok(())
}
