//! The desym command: desymmetrize one coordinate file.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::memory::MemorySnapshot;
use crate::mtx::{self, DesymSummary};

/// Configuration for the desym command.
#[derive(Clone, Debug)]
pub struct DesymConfig {
    /// Symmetric coordinate file to transform.
    pub data: PathBuf,
}

/// Run the transform and print a terminal summary.
pub fn handle_desym(config: DesymConfig) -> Result<()> {
    let summary = mtx::desymmetrize_file(&config.data)?;
    print_summary(&summary, MemorySnapshot::capture());
    Ok(())
}

fn print_summary(summary: &DesymSummary, memory: MemorySnapshot) {
    println!(
        "{} {}",
        "Desymmetrized matrix written to".green().bold(),
        summary.output_path.display()
    );

    let stats = &summary.stats;
    println!(
        "  entries read: {} ({} diagonal, {} mirrored)",
        stats.entries_read, stats.diagonal_entries, stats.mirrored_entries
    );
    match stats.declared_output_nonzeros() {
        Some(declared) => println!(
            "  data lines written: {} (header declares {})",
            stats.data_lines_written(),
            declared
        ),
        None => println!("  {}", "no header line found, output is a copy".yellow()),
    }
    println!("Process memory: {:.1} MiB RSS", memory.rss_mib());
}
