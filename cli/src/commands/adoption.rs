// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Adoption service commands
//!
//! Commands: check-protocol, add-protocol, add-remark

use anyhow::{Context, Result};
use clap::Subcommand;
use facety_agreements::{AdoptionClient, ClientOptions, ResponseShape};

use super::{read_payload, render};

#[derive(Subcommand)]
pub enum AdoptionCommand {
    /// Check the acceptance protocol behind a selector
    CheckProtocol {
        /// Selector as JSON, or @FILE
        #[arg(value_name = "JSON")]
        selector: String,
    },

    /// Store a new acceptance protocol
    AddProtocol {
        /// Protocol as JSON, or @FILE
        #[arg(value_name = "JSON")]
        protocol: String,
    },

    /// Attach a country remark to a protocol
    AddRemark {
        /// Remark as JSON, or @FILE
        #[arg(value_name = "JSON")]
        remark: String,
    },
}

pub async fn handle_command(
    command: AdoptionCommand,
    options: ClientOptions,
    shape: ResponseShape,
) -> Result<()> {
    let client = AdoptionClient::connect(options)
        .await
        .context("Failed to configure the Adoption client")?;

    let output = match command {
        AdoptionCommand::CheckProtocol { selector } => render(
            client
                .check_protocol(read_payload(&selector)?, shape)
                .await
                .context("CheckProtocol failed")?,
        )?,
        AdoptionCommand::AddProtocol { protocol } => render(
            client
                .add_protocol(read_payload(&protocol)?, shape)
                .await
                .context("AddProtocol failed")?,
        )?,
        AdoptionCommand::AddRemark { remark } => render(
            client
                .add_remark(read_payload(&remark)?, shape)
                .await
                .context("AddRemark failed")?,
        )?,
    };

    println!("{}", output);
    Ok(())
}
