// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Registry of COSE header parameters understood by this crate family.
//!
//! See the IANA "COSE Header Parameters" registry.

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HeaderParameter {
    Alg,
    Crit,
    ContentType,
    Kid,
    Iv,
    PartialIv,
    CounterSignature,
    CounterSignature0,
    KidContext,
    X5Bag,
    X5Chain,
    X5T,
    X5U,
}

impl HeaderParameter {
    pub const ALL: [HeaderParameter; 13] = [
        HeaderParameter::Alg,
        HeaderParameter::Crit,
        HeaderParameter::ContentType,
        HeaderParameter::Kid,
        HeaderParameter::Iv,
        HeaderParameter::PartialIv,
        HeaderParameter::CounterSignature,
        HeaderParameter::CounterSignature0,
        HeaderParameter::KidContext,
        HeaderParameter::X5Bag,
        HeaderParameter::X5Chain,
        HeaderParameter::X5T,
        HeaderParameter::X5U,
    ];

    pub fn label(self) -> i64 {
        match self {
            HeaderParameter::Alg => 1,
            HeaderParameter::Crit => 2,
            HeaderParameter::ContentType => 3,
            HeaderParameter::Kid => 4,
            HeaderParameter::Iv => 5,
            HeaderParameter::PartialIv => 6,
            HeaderParameter::CounterSignature => 7,
            HeaderParameter::CounterSignature0 => 9,
            HeaderParameter::KidContext => 10,
            HeaderParameter::X5Bag => 32,
            HeaderParameter::X5Chain => 33,
            HeaderParameter::X5T => 34,
            HeaderParameter::X5U => 35,
        }
    }

    /// Parameter name as accepted in named header maps.
    pub fn name(self) -> &'static str {
        match self {
            HeaderParameter::Alg => "alg",
            HeaderParameter::Crit => "crit",
            HeaderParameter::ContentType => "ctyp",
            HeaderParameter::Kid => "kid",
            HeaderParameter::Iv => "IV",
            HeaderParameter::PartialIv => "PartialIV",
            HeaderParameter::CounterSignature => "countersignature",
            HeaderParameter::CounterSignature0 => "countersignature0",
            HeaderParameter::KidContext => "kidcontext",
            HeaderParameter::X5Bag => "x5bag",
            HeaderParameter::X5Chain => "x5chain",
            HeaderParameter::X5T => "x5t",
            HeaderParameter::X5U => "x5u",
        }
    }

    pub fn from_label(label: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}
