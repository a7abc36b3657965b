// Copyright 2025 Cedric Hammes
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This module provides the implementation defines for the BGP communities attribute as specified in RFC 1997. BGP communities are used to
//! add extra information to routes announced over BGP. There are some well-known attributes standardized in the RFC whatever this feature
//! is allowing custom communities. The syntax for communities is `<AS number>:<Community>` with the AS number as a "namespace". Below this
//! text you can see the well-known communities (A standalone ASN not part of a confederation should be considered as a confederation
//! itself):
//! - `65535:65281` (`NO_EXPORT`) - All routes received with this community **MUST NOT** be advertised outside a BGP confederation
//! - `65535:65282` (`NO_ADVERTISE`) - All routes received with this community **MUST NOT** be advertised to other BGP peers
//! - `65535:65283` (`NO_EXPORT_SUBCONFED`) - ALl routes received with this community **MUST NOT** be advertised to eBGP peers
//!
//! ## References
//! - [RFC 1997 "BGP Communities Attribute"](https://datatracker.ietf.org/doc/html/rfc1997)

use crate::{
    rfc4271::{
        attribute_length,
        pack_attribute,
        PathAttributeFlags,
        PathAttributeKind,
    },
    Encodable,
};
use alloc::vec::Vec;
use bgpack_common::ConstructionError;
use core::{
    fmt::{
        Display,
        Formatter,
    },
    str::FromStr,
};

/// This enum is representing a BGP community. A community is used to add metainformation to the route like advertisement information for
/// the route. The well-known communities have their own values, every other value is kept as it is.
///
/// ## References
/// - [RFC 1997 "BGP Communities Attribute"](https://datatracker.ietf.org/doc/html/rfc1997)
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy)]
pub enum Community {
    NoExport,
    NoAdvertise,
    NoExportSubconfed,

    /// This value indicates a community value as specified in [RFC 1997](https://datatracker.ietf.org/doc/html/rfc1997) for 2-octet
    /// autonomous systems.
    RFC1997 {
        global_administrator: u16,
        local_administrator: u16,
    },
}

impl Community {
    pub const NO_EXPORT: u32 = 0xFFFF_FF01;
    pub const NO_ADVERTISE: u32 = 0xFFFF_FF02;
    pub const NO_EXPORT_SUBCONFED: u32 = 0xFFFF_FF03;
}

impl From<u32> for Community {
    fn from(value: u32) -> Self {
        match value {
            Self::NO_EXPORT => Self::NoExport,
            Self::NO_ADVERTISE => Self::NoAdvertise,
            Self::NO_EXPORT_SUBCONFED => Self::NoExportSubconfed,
            _ => {
                Self::RFC1997 {
                    global_administrator: (value >> 16) as u16,
                    local_administrator: value as u16,
                }
            }
        }
    }
}

impl From<Community> for u32 {
    fn from(community: Community) -> Self {
        match community {
            Community::NoExport => Community::NO_EXPORT,
            Community::NoAdvertise => Community::NO_ADVERTISE,
            Community::NoExportSubconfed => Community::NO_EXPORT_SUBCONFED,
            Community::RFC1997 {
                global_administrator,
                local_administrator,
            } => ((global_administrator as u32) << 16) | local_administrator as u32,
        }
    }
}

/// Communities are parsed from their well-known name (`no_export`, `no_advertise`, `no_export_subconfed`), from the `<AS number>:<value>`
/// notation or from the raw 32-bit value.
impl FromStr for Community {
    type Err = ConstructionError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "no_export" => Ok(Self::NoExport),
            "no_advertise" => Ok(Self::NoAdvertise),
            "no_export_subconfed" => Ok(Self::NoExportSubconfed),
            _ => {
                if let Some((global_administrator, local_administrator)) = string.split_once(":") {
                    let value = ((global_administrator.parse::<u16>()? as u32) << 16) | local_administrator.parse::<u16>()? as u32;
                    Ok(Self::from(value))
                } else if string.chars().all(|char| char.is_ascii_digit()) && !string.is_empty() {
                    Ok(Self::from(string.parse::<u32>()?))
                } else {
                    Err(ConstructionError::unknown_symbol("community", string))
                }
            }
        }
    }
}

impl Display for Community {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoExport => write!(formatter, "no_export"),
            Self::NoAdvertise => write!(formatter, "no_advertise"),
            Self::NoExportSubconfed => write!(formatter, "no_export_subconfed"),
            Self::RFC1997 {
                global_administrator,
                local_administrator,
            } => write!(formatter, "{}:{}", global_administrator, local_administrator),
        }
    }
}

/// This struct is the communities path attribute, an optional transitive attribute containing a list of communities. With 64 or more
/// communities the value doesn't fit into a 1-byte length anymore and the attribute is written with extended length.
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Communities {
    communities: Vec<Community>,
}

impl Communities {
    pub fn new<I: IntoIterator<Item = Community>>(communities: I) -> Self {
        Self {
            communities: communities.into_iter().collect(),
        }
    }

    pub fn communities(&self) -> &[Community] {
        &self.communities
    }
}

impl Default for Communities {
    fn default() -> Self {
        Self::new([Community::NoExport])
    }
}

impl Encodable for Communities {
    fn length(&self) -> usize {
        attribute_length(4 * self.communities.len())
    }

    fn pack(&self) -> Vec<u8> {
        let mut value = Vec::with_capacity(4 * self.communities.len());
        for community in &self.communities {
            value.extend_from_slice(&u32::from(*community).to_be_bytes());
        }
        pack_attribute(PathAttributeFlags::OPTIONAL | PathAttributeFlags::TRANSITIVE, PathAttributeKind::Communities.code(), &value)
    }
}
