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

//! This module implements the variable-width prefix encoding used by the NLRI field of the update message and by the multiprotocol
//! reachability attribute, together with the address family code tables shared by all multiprotocol elements.

use crate::{
    Container,
    Encodable,
};
use alloc::vec::Vec;
use bgpack_common::{
    type_enum,
    ConstructionError,
    Prefix,
};
use core::{
    net::IpAddr,
    str::FromStr,
};

type_enum! {
    /// This value represents the address family specified in the Multiprotocol Extensions associated attributes. Currently we only support
    /// IPv4 and IPv6.
    ///
    /// ## References
    /// - [Address Family Numbers, IANA](https://www.iana.org/assignments/address-family-numbers/address-family-numbers.xhtml)
    #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
    pub enum AddressFamily(u16) {
        IPv4 = 1 => "ipv4",
        IPv6 = 2 => "ipv6"
    }
}

type_enum! {
    /// This enum represents all SAFI (Subsequent address family identifier) supported by this BGP implementation.
    ///
    /// ## References
    /// [Subsequent Address Family Identifier, Section 6 RFC 4760](https://datatracker.ietf.org/doc/html/rfc4760#section-6)
    #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
    pub enum SubsequentAddressFamily(u8) {
        Unicast = 1 => "unicast",
        Multicast = 2 => "multicast",
        MplsLabel = 4 => "mpls_label",
        MplsLabeledVpn = 128 => "mpls_labeled_vpn"
    }
}

impl AddressFamily {
    pub fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => Self::IPv4,
            IpAddr::V6(_) => Self::IPv6,
        }
    }

    /// Returns the length of a full address of this family in bytes.
    pub fn address_length(&self) -> usize {
        match self {
            Self::IPv4 => 4,
            Self::IPv6 => 16,
        }
    }
}

/// The NLRI (Network Layer Reachability Information) is the list of prefixes announced by an update message.
pub type Nlri = Container<Prefix>;

impl Container<Prefix> {
    /// This function parses a list of prefixes in the `<address>/<mask>` notation into NLRI. It fails on the first invalid prefix.
    pub fn parse<'a, I: IntoIterator<Item = &'a str>>(prefixes: I) -> Result<Self, ConstructionError> {
        prefixes.into_iter().map(Prefix::from_str).collect()
    }

    /// Returns the first prefix not matching the specified address family.
    pub(crate) fn find_foreign(&self, address_family: AddressFamily) -> Option<&Prefix> {
        self.iter().find(|prefix| AddressFamily::of(&prefix.address()) != address_family)
    }
}

/// A prefix is encoded as the mask length followed by the significant bytes of the address. Bytes behind the mask are not written and the
/// host bits of the last significant byte are cleared.
///
/// ## References
/// - [UPDATE Message Format, Section 4.3 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.3)
impl Encodable for Prefix {
    fn length(&self) -> usize {
        1 + self.significant_bytes()
    }

    fn pack(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.length());
        buffer.extend_from_slice(&self.mask().to_be_bytes());
        match self.address() {
            IpAddr::V4(addr) => buffer.extend_from_slice(&addr.octets()[0..self.significant_bytes()]),
            IpAddr::V6(addr) => buffer.extend_from_slice(&addr.octets()[0..self.significant_bytes()]),
        }

        let trailing_bits = self.mask() % 8;
        if trailing_bits != 0 {
            if let Some(last) = buffer.last_mut() {
                *last &= u8::MAX << (8 - trailing_bits);
            }
        }
        buffer
    }
}
