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

//! This module implements the capabilities optional parameter of [RFC 3392](https://datatracker.ietf.org/doc/html/rfc3392). The capabilities
//! themselves are defined by the RFCs introducing them.

#[cfg(feature = "rfc2918")]
use crate::rfc2918::{
    RouteRefreshCapability,
    RouteRefreshOldCapability,
};
#[cfg(feature = "rfc4724")]
use crate::rfc4724::GracefulRestartCapability;
#[cfg(feature = "rfc4760")]
use crate::rfc4760::MultiprotocolExtensionsCapability;
#[cfg(feature = "rfc6793")]
use crate::rfc6793::FourOctetASNumberSupportCapability;
use crate::{
    Container,
    Encodable,
};
use alloc::vec::Vec;
use bgpack_common::type_enum;

type_enum! {
    /// This enum contains the codes of all capabilities this library is able to encode.
    ///
    /// ## References
    /// - [Capability Codes, IANA](https://www.iana.org/assignments/capability-codes/capability-codes.xhtml)
    #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
    pub enum CapabilityKind(u8) {
        MultiprotocolExtensions = 1 => "multiprotocol_extensions",
        RouteRefresh = 2 => "route_refresh",
        GracefulRestart = 64 => "graceful_restart",
        FourOctetASNumberSupport = 65 => "four_octet_as_number",
        RouteRefreshOld = 128 => "route_refresh_old"
    }
}

/// Writes a capability with the specified code and value.
///
/// ## Panics
/// When the value exceeds the 1-byte length field of the capability.
pub(crate) fn pack_capability(code: u8, value: &[u8]) -> Vec<u8> {
    assert!(value.len() <= u8::MAX as usize, "Capability {} with {} bytes exceeds the length field", code, value.len());
    let mut buffer = Vec::with_capacity(2 + value.len());
    buffer.extend_from_slice(&code.to_be_bytes());
    buffer.extend_from_slice(&(value.len() as u8).to_be_bytes());
    buffer.extend_from_slice(value);
    buffer
}

/// This enum represents a capability. Capabilities are sent in the open message of the BGP router to tell the other peer about the features
/// and supported extensions of this BGP router.
///
/// ## References
/// - [Capabilities Optional Parameter, Section. 4 RFC 3392](https://datatracker.ietf.org/doc/html/rfc3392#section-4)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub enum Capability {
    #[cfg(feature = "rfc4760")]
    MultiprotocolExtensions(MultiprotocolExtensionsCapability),
    #[cfg(feature = "rfc2918")]
    RouteRefresh(RouteRefreshCapability),
    #[cfg(feature = "rfc2918")]
    RouteRefreshOld(RouteRefreshOldCapability),
    #[cfg(feature = "rfc6793")]
    FourOctetASNumberSupport(FourOctetASNumberSupportCapability),
    #[cfg(feature = "rfc4724")]
    GracefulRestart(GracefulRestartCapability),
    Unknown { code: u8, data: Vec<u8> },
}

impl Encodable for Capability {
    fn length(&self) -> usize {
        match self {
            #[cfg(feature = "rfc4760")]
            Self::MultiprotocolExtensions(capability) => capability.length(),
            #[cfg(feature = "rfc2918")]
            Self::RouteRefresh(capability) => capability.length(),
            #[cfg(feature = "rfc2918")]
            Self::RouteRefreshOld(capability) => capability.length(),
            #[cfg(feature = "rfc6793")]
            Self::FourOctetASNumberSupport(capability) => capability.length(),
            #[cfg(feature = "rfc4724")]
            Self::GracefulRestart(capability) => capability.length(),
            Self::Unknown { data, .. } => 1 + 1 + data.len(),
        }
    }

    fn pack(&self) -> Vec<u8> {
        match self {
            #[cfg(feature = "rfc4760")]
            Self::MultiprotocolExtensions(capability) => capability.pack(),
            #[cfg(feature = "rfc2918")]
            Self::RouteRefresh(capability) => capability.pack(),
            #[cfg(feature = "rfc2918")]
            Self::RouteRefreshOld(capability) => capability.pack(),
            #[cfg(feature = "rfc6793")]
            Self::FourOctetASNumberSupport(capability) => capability.pack(),
            #[cfg(feature = "rfc4724")]
            Self::GracefulRestart(capability) => capability.pack(),
            Self::Unknown { code, data } => pack_capability(*code, data),
        }
    }
}

#[cfg(feature = "rfc4760")]
impl From<MultiprotocolExtensionsCapability> for Capability {
    fn from(capability: MultiprotocolExtensionsCapability) -> Self {
        Self::MultiprotocolExtensions(capability)
    }
}

#[cfg(feature = "rfc2918")]
impl From<RouteRefreshCapability> for Capability {
    fn from(capability: RouteRefreshCapability) -> Self {
        Self::RouteRefresh(capability)
    }
}

#[cfg(feature = "rfc2918")]
impl From<RouteRefreshOldCapability> for Capability {
    fn from(capability: RouteRefreshOldCapability) -> Self {
        Self::RouteRefreshOld(capability)
    }
}

#[cfg(feature = "rfc6793")]
impl From<FourOctetASNumberSupportCapability> for Capability {
    fn from(capability: FourOctetASNumberSupportCapability) -> Self {
        Self::FourOctetASNumberSupport(capability)
    }
}

#[cfg(feature = "rfc4724")]
impl From<GracefulRestartCapability> for Capability {
    fn from(capability: GracefulRestartCapability) -> Self {
        Self::GracefulRestart(capability)
    }
}

/// The list of capabilities carried by one capabilities optional parameter.
pub type Capabilities = Container<Capability>;
