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

//! Shared building blocks of the bgpack workspace: the construction error raised by every fallible constructor, the
//! [Prefix] value type and the [type_enum] macro used for the closed code tables of the BGP protocol.

#![no_std]
extern crate alloc;

pub mod macros;

use alloc::string::{
    String,
    ToString,
};
use core::{
    fmt::{
        Debug,
        Display,
        Formatter,
    },
    net::{
        AddrParseError,
        IpAddr,
        Ipv4Addr,
        Ipv6Addr,
    },
    num::ParseIntError,
    str::FromStr,
};
use thiserror::Error;

/// This enum contains all errors raised while constructing a BGP value. Construction errors are raised at creation time and always name
/// the offending field, so a value that exists is always encodable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("Expected format <address>/<mask> (a.e. 192.168.2.0/24), but got '{0}'")]
    InvalidPrefixFormat(String),
    #[error("Unable to parse address => '{0}'")]
    IpAddrParse(#[from] AddrParseError),
    #[error("Unable to parse int => '{0}'")]
    IntParse(#[from] ParseIntError),
    #[error("Unknown {field} '{symbol}'")]
    UnknownSymbol { field: &'static str, symbol: String },
    #[error("Unknown {field} code {code}")]
    UnknownCode { field: &'static str, code: u32 },
    #[error("Value {value} of {field} exceeds the maximum of {maximum}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        maximum: u64,
    },
    #[error("Expected {expected} address as {field}, but got '{address}'")]
    AddressFamilyMismatch {
        field: &'static str,
        expected: &'static str,
        address: IpAddr,
    },
}

impl ConstructionError {
    #[doc(hidden)]
    pub fn unknown_symbol(field: &'static str, symbol: &str) -> Self {
        Self::UnknownSymbol {
            field,
            symbol: symbol.to_string(),
        }
    }
}

/// This value represents a IPv6/IPv4 network prefix. This prefix represents a sub-share of the network like the local network at home or
/// a subnetwork in a bigger network. The mask is validated against the address family on construction.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy)]
pub struct Prefix {
    address: IpAddr,
    mask: u8,
}

impl FromStr for Prefix {
    type Err = ConstructionError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let (addr, mask) = string.split_once("/").ok_or(ConstructionError::InvalidPrefixFormat(string.to_string()))?;
        Self::new(IpAddr::from_str(addr)?, mask.parse()?)
    }
}

impl Debug for Prefix {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        write!(formatter, "{}/{}", self.address, self.mask)
    }
}

impl Display for Prefix {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        write!(formatter, "{}/{}", self.address, self.mask)
    }
}

impl Prefix {
    pub const ANY_IPV4: Prefix = Prefix {
        address: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
        mask: 0,
    };
    pub const ANY_IPV6: Prefix = Prefix {
        address: IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)),
        mask: 0,
    };

    /// This function creates a new prefix. It fails when the mask is longer than the address itself (32 bits for IPv4, 128 bits for
    /// IPv6).
    pub fn new(address: IpAddr, mask: u8) -> Result<Self, ConstructionError> {
        let maximum = match address {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if mask > maximum {
            return Err(ConstructionError::OutOfRange {
                field: "prefix mask",
                value: mask as u64,
                maximum: maximum as u64,
            });
        }
        Ok(Self { address, mask })
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Number of address bytes needed to carry the mask, `ceil(mask / 8)`.
    pub fn significant_bytes(&self) -> usize {
        (self.mask as usize).div_ceil(8)
    }
}
