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

//! This module of the BGP serialization library implements the serialization of the Multiprotocol extensions in the BGP update message
//! (and the capability) as specified in [RFC 4760](https://datatracker.ietf.org/doc/html/rfc4760). It allows to tell the peer about IPv6
//! prefixes etc.

use crate::{
    prefix::{
        AddressFamily,
        Nlri,
        SubsequentAddressFamily,
    },
    rfc3392::{
        pack_capability,
        CapabilityKind,
    },
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
    net::{
        IpAddr,
        Ipv6Addr,
    },
};

/// This struct represents the capability parameter for the open message that indicates that this router supports the multiprotocol
/// extensions for the following address and subsequent address family.
///
/// ## References
/// - [Use of BGP Capability Advertisement, Section 8 RFC 4760](https://datatracker.ietf.org/doc/html/rfc4760#section-8)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub struct MultiprotocolExtensionsCapability {
    pub address_family: AddressFamily,
    pub subsequent_address_family: SubsequentAddressFamily,
}

impl MultiprotocolExtensionsCapability {
    pub fn new(address_family: AddressFamily, subsequent_address_family: SubsequentAddressFamily) -> Self {
        Self {
            address_family,
            subsequent_address_family,
        }
    }
}

impl Display for MultiprotocolExtensionsCapability {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        write!(formatter, "Multiprotocol support for {} ({})", self.address_family, self.subsequent_address_family)
    }
}

impl Encodable for MultiprotocolExtensionsCapability {
    fn length(&self) -> usize {
        1 + 1 + 2 + 1 + 1
    }

    fn pack(&self) -> Vec<u8> {
        let mut value = Vec::with_capacity(4);
        value.extend_from_slice(&self.address_family.code().to_be_bytes());
        value.extend_from_slice(&0_u8.to_be_bytes());
        value.extend_from_slice(&self.subsequent_address_family.code().to_be_bytes());
        pack_capability(CapabilityKind::MultiprotocolExtensions.code(), &value)
    }
}

/// This struct implements the next hop of the multiprotocol reachability attribute. An IPv6 next hop can be followed by the link-local
/// address of the router.
///
/// ## References
/// - [Multiprotocol Reachable NLRI - MP_REACH_NLRI, Section 3 RFC 4760](https://datatracker.ietf.org/doc/html/rfc4760#section-3)
/// - [BGP-4 Multiprotocol Extensions for IPv6 Inter-Domain Routing, Section 3 RFC 2545](https://datatracker.ietf.org/doc/html/rfc2545#section-3)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub struct MultiprotocolNextHop {
    pub next_hop: IpAddr,
    pub link_local_address: Option<Ipv6Addr>,
}

impl MultiprotocolNextHop {
    pub fn new(next_hop: IpAddr) -> Self {
        Self {
            next_hop,
            link_local_address: None,
        }
    }
}

impl Encodable for MultiprotocolNextHop {
    fn length(&self) -> usize {
        let next_hop = AddressFamily::of(&self.next_hop).address_length();
        next_hop + self.link_local_address.map_or(0, |_| 16)
    }

    fn pack(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.length());
        match self.next_hop {
            IpAddr::V4(addr) => buffer.extend_from_slice(&addr.octets()),
            IpAddr::V6(addr) => buffer.extend_from_slice(&addr.octets()),
        }

        if let Some(link_local_address) = self.link_local_address.as_ref() {
            buffer.extend_from_slice(&link_local_address.octets());
        }
        buffer
    }
}

/// This struct represents the multiprotocol reachable NLRI path attribute defined by the Multiprotocol Extensions for BGP as an optional
/// and non-transitive attribute for announcing routes of other address families than IPv4 unicast. The next hop and the prefixes always
/// match the address family.
///
/// ## References
/// - [Multiprotocol Reachable NLRI - MP_REACH_NLRI, Section 3 RFC 4760](https://datatracker.ietf.org/doc/html/rfc4760#section-3)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub struct MultiprotocolReachNLRI {
    address_family: AddressFamily,
    subsequent_address_family: SubsequentAddressFamily,
    next_hop: MultiprotocolNextHop,
    nlri: Nlri,
}

impl MultiprotocolReachNLRI {
    /// This function creates the attribute. It fails if the next hop or one of the prefixes doesn't belong to the address family, or if a
    /// link-local address is attached to a next hop other than IPv6.
    pub fn new(
        address_family: AddressFamily,
        subsequent_address_family: SubsequentAddressFamily,
        next_hop: MultiprotocolNextHop,
        nlri: Nlri,
    ) -> Result<Self, ConstructionError> {
        if AddressFamily::of(&next_hop.next_hop) != address_family
            || (next_hop.link_local_address.is_some() && address_family != AddressFamily::IPv6)
        {
            return Err(ConstructionError::AddressFamilyMismatch {
                field: "next hop",
                expected: address_family.symbol(),
                address: next_hop.next_hop,
            });
        }

        if let Some(prefix) = nlri.find_foreign(address_family) {
            return Err(ConstructionError::AddressFamilyMismatch {
                field: "NLRI prefix",
                expected: address_family.symbol(),
                address: prefix.address(),
            });
        }

        Ok(Self {
            address_family,
            subsequent_address_family,
            next_hop,
            nlri,
        })
    }

    pub fn address_family(&self) -> AddressFamily {
        self.address_family
    }

    pub fn subsequent_address_family(&self) -> SubsequentAddressFamily {
        self.subsequent_address_family
    }

    pub fn next_hop(&self) -> &MultiprotocolNextHop {
        &self.next_hop
    }

    pub fn nlri(&self) -> &Nlri {
        &self.nlri
    }

    fn value_length(&self) -> usize {
        2 + 1 + 1 + self.next_hop.length() + 1 + self.nlri.length()
    }
}

impl Encodable for MultiprotocolReachNLRI {
    fn length(&self) -> usize {
        attribute_length(self.value_length())
    }

    fn pack(&self) -> Vec<u8> {
        let mut value = Vec::with_capacity(self.value_length());
        value.extend_from_slice(&self.address_family.code().to_be_bytes());
        value.extend_from_slice(&self.subsequent_address_family.code().to_be_bytes());
        value.extend_from_slice(&(self.next_hop.length() as u8).to_be_bytes());
        value.extend_from_slice(&self.next_hop.pack());
        value.extend_from_slice(&0_u8.to_be_bytes()); // Reserved
        value.extend_from_slice(&self.nlri.pack());
        pack_attribute(PathAttributeFlags::OPTIONAL, PathAttributeKind::MpReachNlri.code(), &value)
    }
}
