// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// This file includes the generated protobuf code from tonic/prost

use crate::domain::payload::{CanonicalMessage, RequestPayload};

pub mod agreements {
    tonic::include_proto!("agreements");
}

use agreements::*;

macro_rules! canonical_messages {
    ($($message:ty => $name:literal),* $(,)?) => {
        $(
            impl CanonicalMessage for $message {
                const FULL_NAME: &'static str = $name;
            }

            impl From<$message> for RequestPayload<$message> {
                fn from(message: $message) -> Self {
                    Self::Typed(message)
                }
            }
        )*
    };
}

canonical_messages! {
    Selector => "agreements.Selector",
    Verdict => "agreements.Verdict",
    VerdictTos => "agreements.VerdictTos",
    VerdictPp => "agreements.VerdictPp",
    VerdictRemark => "agreements.VerdictRemark",
    Protocol => "agreements.Protocol",
    ProtocolTos => "agreements.ProtocolTos",
    ProtocolPp => "agreements.ProtocolPp",
    ProtocolRemark => "agreements.ProtocolRemark",
    Remark => "agreements.Remark",
    User => "agreements.User",
    Agreements => "agreements.Agreements",
    AgreementsTos => "agreements.AgreementsTos",
    AgreementsPp => "agreements.AgreementsPp",
    AgreementsRemark => "agreements.AgreementsRemark",
    // prost maps google.protobuf.Empty to the unit type
    () => "google.protobuf.Empty",
}
