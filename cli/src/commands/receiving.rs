// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Receiving service commands

use anyhow::{Context, Result};
use clap::Subcommand;
use facety_agreements::{ClientOptions, ReceivingClient, ResponseShape};

use super::{read_payload, render};

#[derive(Subcommand)]
pub enum ReceivingCommand {
    /// Texts of the agreements for a user
    Texts {
        /// User (protocol, langs, country) as JSON, or @FILE
        #[arg(value_name = "JSON")]
        user: String,
    },
}

pub async fn handle_command(
    command: ReceivingCommand,
    options: ClientOptions,
    shape: ResponseShape,
) -> Result<()> {
    let client = ReceivingClient::connect(options)
        .await
        .context("Failed to configure the Receiving client")?;

    match command {
        ReceivingCommand::Texts { user } => {
            let reply = client
                .get_texts(read_payload(&user)?, shape)
                .await
                .context("Texts failed")?;
            println!("{}", render(reply)?);
        }
    }

    Ok(())
}
