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

use crate::{
    rfc3392::{
        pack_capability,
        CapabilityKind,
    },
    Encodable,
};
use alloc::vec::Vec;

/// This capability announces graceful restart support. It always carries the same payload: no restart flags, a restart time of 120 seconds
/// and no address families, so it announces the capability without preserving any forwarding state.
///
/// ## References
/// - [Graceful Restart Capability, Section 3 RFC 4724](https://datatracker.ietf.org/doc/html/rfc4724#section-3)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy, Default)]
pub struct GracefulRestartCapability;

impl GracefulRestartCapability {
    pub const RESTART_TIME: u16 = 120;
}

impl Encodable for GracefulRestartCapability {
    fn length(&self) -> usize {
        1 + 1 + 2
    }

    fn pack(&self) -> Vec<u8> {
        pack_capability(CapabilityKind::GracefulRestart.code(), &Self::RESTART_TIME.to_be_bytes())
    }
}
