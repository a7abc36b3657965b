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

//! The scenarios are the fixed message sequences this daemon announces to its peer: the open message, a keep-alive and one update.

use bgpack_common::ConstructionError;
use bgpack_wire::{
    prefix::{
        AddressFamily,
        Nlri,
        SubsequentAddressFamily,
    },
    rfc1997::{
        Communities,
        Community,
    },
    rfc2918::RouteRefreshCapability,
    rfc3392::Capabilities,
    rfc4271::{
        ASPath,
        ASPathSegment,
        AsNumberWidth,
        KeepAliveMessage,
        LocalPreference,
        NextHop,
        OpenMessage,
        OptionalParameter,
        OptionalParameters,
        Origin,
        PathAttributes,
        UpdateMessage,
    },
    rfc4760::{
        MultiprotocolExtensionsCapability,
        MultiprotocolNextHop,
        MultiprotocolReachNLRI,
    },
    rfc6793::{
        two_octet_as_number,
        FourOctetASNumberSupportCapability,
    },
    BGPMessage,
};
use clap::ValueEnum;
use log::debug;
use std::{
    net::{
        IpAddr,
        Ipv4Addr,
    },
    str::FromStr,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ScenarioKind {
    /// Plain IPv4 unicast announcement with two-octet AS numbers
    Ipv4,

    /// Capability negotiation and an IPv6 announcement through the multiprotocol extensions
    Multiprotocol,
}

impl ScenarioKind {
    fn default_prefixes(&self) -> &'static [&'static str] {
        match self {
            Self::Ipv4 => &["10.0.0.0/8", "20.0.0.0/16"],
            Self::Multiprotocol => &["2001:db8:1::/48"],
        }
    }

    fn default_next_hop(&self) -> &'static str {
        match self {
            Self::Ipv4 => "11.0.0.2",
            Self::Multiprotocol => "2001:db8:1::1",
        }
    }
}

/// This struct contains everything needed to build the messages of a scenario. Empty prefixes and a missing next hop fall back to the
/// defaults of the scenario kind, an empty AS path to the sequence 100, 101, 102.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub as_number: u32,
    pub bgp_identifier: Ipv4Addr,
    pub hold_time: u16,
    pub prefixes: Vec<String>,
    pub next_hop: Option<String>,
    pub as_path: Vec<u32>,
    pub communities: Vec<String>,
}

impl Scenario {
    pub const DEFAULT_AS_PATH: [u32; 3] = [100, 101, 102];

    /// Builds the messages of this scenario in the order they are sent. All values are validated here, so a failing scenario never
    /// writes a single byte to the peer.
    pub fn messages(&self) -> Result<Vec<BGPMessage>, ConstructionError> {
        let (open, update) = match self.kind {
            ScenarioKind::Ipv4 => (self.open(OptionalParameters::new())?, self.ipv4_update()?),
            ScenarioKind::Multiprotocol => (self.open(self.capabilities())?, self.multiprotocol_update()?),
        };
        Ok(vec![open.into(), KeepAliveMessage.into(), update.into()])
    }

    /// Builds the open message. AS numbers above 65535 are only announced with the four-octet AS number capability, the open message
    /// itself then carries AS_TRANS. Without the capability such an AS number is rejected.
    fn open(&self, optional_parameters: OptionalParameters) -> Result<OpenMessage, ConstructionError> {
        let autonomous_system = match self.kind {
            ScenarioKind::Ipv4 => u16::try_from(self.as_number).map_err(|_| ConstructionError::OutOfRange {
                field: "open message AS number",
                value: self.as_number as u64,
                maximum: u16::MAX as u64,
            })?,
            ScenarioKind::Multiprotocol => two_octet_as_number(self.as_number),
        };
        if u32::from(autonomous_system) != self.as_number {
            debug!("AS {} is announced as AS {} in the open message", self.as_number, autonomous_system);
        }

        Ok(OpenMessage::new(autonomous_system, self.bgp_identifier)
            .with_hold_time(self.hold_time)
            .with_optional_parameters(optional_parameters))
    }

    fn capabilities(&self) -> OptionalParameters {
        let mut capabilities = Capabilities::new();
        capabilities.add(MultiprotocolExtensionsCapability::new(AddressFamily::IPv4, SubsequentAddressFamily::Unicast).into());
        capabilities.add(MultiprotocolExtensionsCapability::new(AddressFamily::IPv6, SubsequentAddressFamily::Unicast).into());
        capabilities.add(FourOctetASNumberSupportCapability::new(self.as_number).into());
        capabilities.add(RouteRefreshCapability.into());
        OptionalParameters::from(vec![OptionalParameter::from(capabilities)])
    }

    fn prefixes(&self) -> Result<Nlri, ConstructionError> {
        if self.prefixes.is_empty() {
            Nlri::parse(self.kind.default_prefixes().iter().copied())
        } else {
            Nlri::parse(self.prefixes.iter().map(String::as_str))
        }
    }

    fn next_hop(&self) -> &str {
        self.next_hop.as_deref().unwrap_or(self.kind.default_next_hop())
    }

    fn as_path(&self, width: AsNumberWidth) -> Result<ASPath, ConstructionError> {
        let as_numbers = if self.as_path.is_empty() { Self::DEFAULT_AS_PATH.to_vec() } else { self.as_path.clone() };
        Ok(ASPath::from(ASPathSegment::sequence(width, as_numbers)?))
    }

    fn communities(&self) -> Result<Option<Communities>, ConstructionError> {
        if self.communities.is_empty() {
            return Ok(None);
        }

        let communities = self.communities.iter().map(|community| Community::from_str(community)).collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Communities::new(communities)))
    }

    fn ipv4_update(&self) -> Result<UpdateMessage, ConstructionError> {
        let mut path_attributes = PathAttributes::new();
        path_attributes.add(Origin::IGP.into());
        path_attributes.add(self.as_path(AsNumberWidth::TwoOctet)?.into());
        path_attributes.add(NextHop::from_str(self.next_hop())?.into());
        path_attributes.add(LocalPreference::default().into());
        if let Some(communities) = self.communities()? {
            path_attributes.add(communities.into());
        }
        UpdateMessage::new(path_attributes, self.prefixes()?)
    }

    /// The prefixes are announced through the multiprotocol reachability attribute only, the address family follows the next hop.
    fn multiprotocol_update(&self) -> Result<UpdateMessage, ConstructionError> {
        let next_hop = IpAddr::from_str(self.next_hop())?;
        let mp_reach_nlri = MultiprotocolReachNLRI::new(
            AddressFamily::of(&next_hop),
            SubsequentAddressFamily::Unicast,
            MultiprotocolNextHop::new(next_hop),
            self.prefixes()?,
        )?;

        let mut path_attributes = PathAttributes::new();
        path_attributes.add(Origin::IGP.into());
        path_attributes.add(self.as_path(AsNumberWidth::FourOctet)?.into());
        path_attributes.add(LocalPreference::default().into());
        if let Some(communities) = self.communities()? {
            path_attributes.add(communities.into());
        }
        path_attributes.add(mp_reach_nlri.into());
        UpdateMessage::new(path_attributes, Nlri::new())
    }
}
