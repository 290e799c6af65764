// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Protocol definition and service descriptor commands

use anyhow::{Context, Result};
use colored::Colorize;

pub fn proto() -> Result<()> {
    facety_agreements::print_proto().context("Failed to load the protocol definition")
}

pub async fn meta() -> Result<()> {
    let meta = facety_agreements::meta()
        .await
        .context("Failed to fetch the service descriptor document")?;

    println!("{}", "Service hosts:".bold());
    let mut hosts: Vec<_> = meta.host.iter().collect();
    hosts.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in hosts {
        match value.as_str() {
            Some(host) => println!("  {}: {}", key, host),
            None => println!("  {}: {}", key, value),
        }
    }

    if !meta.extra.is_empty() {
        println!();
        println!("{}", "Other sections:".bold());
        println!("{}", serde_json::to_string_pretty(&meta.extra)?);
    }

    Ok(())
}
