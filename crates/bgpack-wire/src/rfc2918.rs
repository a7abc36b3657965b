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

//! Route refresh allows a router to ask its peer to resend all routes without resetting the session. This module only implements the
//! capabilities advertising the support, not the route refresh message itself.

use crate::{
    rfc3392::{
        pack_capability,
        CapabilityKind,
    },
    Encodable,
};
use alloc::vec::Vec;

/// This capability tells the BGP peer that this router is able to handle route refresh messages.
///
/// ## References
/// - [Route Refresh Capability, Section 2 RFC 2918](https://datatracker.ietf.org/doc/html/rfc2918#section-2)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy, Default)]
pub struct RouteRefreshCapability;

impl Encodable for RouteRefreshCapability {
    fn length(&self) -> usize {
        1 + 1
    }

    fn pack(&self) -> Vec<u8> {
        pack_capability(CapabilityKind::RouteRefresh.code(), &[])
    }
}

/// The pre-standard variant of [RouteRefreshCapability] with the code 128, still expected by some older implementations.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy, Default)]
pub struct RouteRefreshOldCapability;

impl Encodable for RouteRefreshOldCapability {
    fn length(&self) -> usize {
        1 + 1
    }

    fn pack(&self) -> Vec<u8> {
        pack_capability(CapabilityKind::RouteRefreshOld.code(), &[])
    }
}
