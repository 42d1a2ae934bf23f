//! Chain logging demo
//!
//! Builds a file sink followed by a console sink, sends 200 records through
//! the chain and saves whatever is still buffered.
//!
//! Run with: cargo run --example chain_logging -- [log path]

use sink_chain_logger::prelude::*;

fn main() -> Result<()> {
    println!("Testing client for sink_chain_logger");

    let log_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "chain_logging.log".to_string());

    let chain = Chain::builder()
        .sink(FileSink::new(&log_path))
        .sink(ConsoleSink::new())
        .build();

    for i in 0..200 {
        chain.log_message(format!("Log {}", i), LogType::Information)?;
    }

    chain.save()?;

    let metrics = chain.metrics();
    println!(
        "Done: {} records, {} deliveries, {} filtered. See '{}'",
        metrics.records_received(),
        metrics.records_accepted(),
        metrics.records_filtered(),
        log_path
    );
    Ok(())
}
