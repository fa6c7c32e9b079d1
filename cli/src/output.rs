//! Human-readable rendering of command results.

use std::fmt::Write;

use splitter_core::{CreationResult, DistributionReport};
use splitter_types::{short_address, NetworkId, SplitterSnapshot};

pub fn render_snapshot(snapshot: &SplitterSnapshot, network: NetworkId) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Splitter  {} ({network})", snapshot.address);
    let _ = writeln!(out, "Balance   {}", snapshot.balance);
    let _ = writeln!(out, "Shares    {}", snapshot.total_shares);

    if snapshot.recipients.is_empty() {
        let _ = writeln!(out, "No recipients.");
    } else {
        let _ = writeln!(out);
        for (i, r) in snapshot.recipients.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {i:>2}  {}  {:>3}%  {}",
                short_address(&r.address),
                r.percentage,
                r.balance
            );
        }
    }

    let remainder = snapshot.remainder();
    if !remainder.is_zero() {
        let _ = writeln!(out, "\nRounding remainder (estimate): {remainder}");
    }
    let _ = write!(out, "\n{}", network.address_url(&snapshot.address));
    out
}

pub fn render_creation(created: &CreationResult, network: NetworkId) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Splitter created at {}", created.splitter);
    let _ = writeln!(out, "Creator     {}", created.creator);
    for (address, share) in created.recipients.iter().zip(&created.shares) {
        let _ = writeln!(out, "  {address}  {share}%");
    }
    let _ = writeln!(out, "Transaction {}", network.transaction_url(&created.transaction_hash));
    let _ = write!(out, "Splitter    {}", network.address_url(&created.splitter));
    out
}

pub fn render_distribution(report: &DistributionReport, network: NetworkId) -> String {
    let d = &report.distributed;
    let mut out = String::new();
    // The contract pays out whatever it holds at execution time.
    let _ = writeln!(out, "Distributed ~{} from {}", d.balance, d.splitter);
    let _ = writeln!(out, "Transaction {}", network.transaction_url(&d.transaction_hash));
    match &report.refreshed {
        Ok(snapshot) => {
            let _ = write!(out, "\n{}", render_snapshot(snapshot, network));
        }
        Err(e) => {
            let _ = write!(out, "\nCould not refresh splitter state: {e}");
        }
    }
    out
}
