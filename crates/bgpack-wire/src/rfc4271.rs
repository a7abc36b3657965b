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

//! This file implemented the [RFC 4271 - A Border Gateway Protocol 4 (BGP-4)](https://datatracker.ietf.org/doc/html/rfc4271), the base RFC
//! of the BGP protocol which is specifying the base of the protocol.

#[cfg(feature = "rfc1997")]
use crate::rfc1997::Communities;
#[cfg(feature = "rfc3392")]
use crate::rfc3392::Capabilities;
#[cfg(feature = "rfc4760")]
use crate::rfc4760::MultiprotocolReachNLRI;
use crate::{
    prefix::{
        AddressFamily,
        Nlri,
    },
    Container,
    Encodable,
    Message,
};
use alloc::vec::Vec;
use bgpack_common::{
    type_enum,
    ConstructionError,
};
use bitflags::bitflags;
use core::{
    net::Ipv4Addr,
    str::FromStr,
};
use nom::{
    bytes::complete::take,
    error::{
        Error,
        ErrorKind,
    },
    number::complete::{
        be_u16,
        be_u8,
    },
    IResult,
};

pub const HEADER_SIZE: usize = 19; // Marker (16 bytes) + length (2 bytes) + kind (1 bytes) = Header Size in bytes
pub const MAX_MESSAGE_SIZE: usize = 4096;
pub const MARKER: [u8; 16] = [0xFF; 16];
pub const BGP_VERSION: u8 = 4;
pub const DEFAULT_HOLD_TIME: u16 = 180;

type_enum! {
    /// This enum provides all BGP message kinds/types available through this BGP serialization library.
    ///
    /// ## References
    /// - [Message Header Format, Section 4.1 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.1)
    #[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy)]
    pub enum MessageKind(u8) {
        Open = 1 => "open",
        Update = 2 => "update",
        Notification = 3 => "notification",
        KeepAlive = 4 => "keepalive"
    }
}

/// This struct is the type-safe implementation of the header applied at the start of any BGP packet. It contains the length of the message
/// (inclusive the header itself) and the kind/type of the message.
///
/// ## Reference
/// - [Message Header Format, Section 4.1 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.1)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct BGPMessageHeader {
    pub marker: [u8; 16],
    pub length: u16,
    pub kind: u8,
}

impl BGPMessageHeader {
    /// This function reads the header from the start of the input. The marker has to consist of ones only and the length has to be in the
    /// range allowed by RFC 4271, otherwise the header is rejected. The kind is kept as raw value, see [BGPMessageHeader::message_kind].
    pub fn unpack(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, marker) = take(MARKER.len())(input)?;
        if marker != MARKER.as_slice() {
            return Err(nom::Err::Error(Error::new(input, ErrorKind::Tag)));
        }

        let (input, length) = be_u16(input)?;
        if !(HEADER_SIZE..=MAX_MESSAGE_SIZE).contains(&(length as usize)) {
            return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
        }

        let (input, kind) = be_u8(input)?;
        Ok((
            input,
            Self {
                marker: MARKER,
                length,
                kind,
            },
        ))
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut buffer = self.marker.to_vec();
        buffer.extend_from_slice(&self.length.to_be_bytes());
        buffer.extend_from_slice(&self.kind.to_be_bytes());
        buffer
    }

    pub fn message_kind(&self) -> Result<MessageKind, ConstructionError> {
        MessageKind::try_from(self.kind)
    }

    /// Returns the number of bytes following this header.
    pub fn body_length(&self) -> usize {
        (self.length as usize).saturating_sub(HEADER_SIZE)
    }
}

bitflags! {
    /// This structure contains the flags of a path attribute.
    ///
    /// ## References
    /// - [UPDATE Message Format, Section 4.2 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.3)
    #[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy)]
    pub struct PathAttributeFlags: u8 {
        /// This attribute flag indicates whether the path attribute is optional (1) or well-known (0).
        const OPTIONAL = 0b1000_0000;

        /// This attribute flag indicates whether the path attribute is transitive (1) or non-transitive (0). Well-known attributes require
        /// that the transitive bit is being set.
        const TRANSITIVE  = 0b0100_0000;

        /// This attribute flag indicates whether the information in the path attribute is partial (1) or complete (0). For well-known
        /// attributes and for optional non-transitive, the partial bit MUST be set to 0.
        const PARTIAL = 0b0010_0000;

        /// This attribute flags indicates whether the path attribute's length should be encoded as 2-byte value (1) or as 1-byte value (0).
        const EXTENDED_LENGTH = 0b0001_0000;
    }
}

type_enum! {
    /// This enum contains the type codes of all path attributes this library is able to encode.
    ///
    /// ## References
    /// - [BGP Path Attributes, IANA](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-2)
    #[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Copy)]
    pub enum PathAttributeKind(u8) {
        Origin = 1 => "origin",
        AsPath = 2 => "as_path",
        NextHop = 3 => "next_hop",
        LocalPref = 5 => "local_pref",
        Communities = 8 => "community",
        MpReachNlri = 14 => "mp_reach_nlri"
    }
}

/// Returns the encoded size of a path attribute carrying a value of the specified length.
pub(crate) fn attribute_length(value_length: usize) -> usize {
    let length_field = if value_length > u8::MAX as usize { 2 } else { 1 };
    2 + length_field + value_length
}

/// This function writes a path attribute. Following to the parser rules for path attributes in section 4.3 of RFC 4271, the length is an
/// u16 when the extended length flag is applied. The flag is set exactly when the value doesn't fit into one byte.
///
/// ## Panics
/// When the value doesn't fit into the 2-byte length field.
pub(crate) fn pack_attribute(flags: PathAttributeFlags, kind: u8, value: &[u8]) -> Vec<u8> {
    let use_extended_length = value.len() > u8::MAX as usize;
    let mut flags = flags;
    flags.set(PathAttributeFlags::EXTENDED_LENGTH, use_extended_length);

    let mut buffer = Vec::with_capacity(attribute_length(value.len()));
    buffer.extend_from_slice(&flags.bits().to_be_bytes());
    buffer.extend_from_slice(&kind.to_be_bytes());
    if use_extended_length {
        assert!(value.len() <= u16::MAX as usize, "Path attribute {} with {} bytes exceeds the extended length", kind, value.len());
        buffer.extend_from_slice(&(value.len() as u16).to_be_bytes());
    } else {
        buffer.extend_from_slice(&(value.len() as u8).to_be_bytes());
    }
    buffer.extend_from_slice(value);
    buffer
}

type_enum! {
    /// Origin is a well-known mandatory attribute that defines the origin of the path information.
    ///
    /// ## References
    /// - [ORIGIN Path Attribute Usage, Section 5.1.1 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-5.1.1)
    /// - [UPDATE Message Format, Section 4.2 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.3)
    #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy, Default)]
    pub enum Origin(u8) {
        /// NLRI is interior to the originating AS
        #[default]
        IGP = 0 => "igp",

        /// NLRI was learned via the EGP protocol
        EGP = 1 => "egp",

        /// NLRI learned by some other means
        Incomplete = 2 => "incomplete"
    }
}

impl Encodable for Origin {
    fn length(&self) -> usize {
        attribute_length(1)
    }

    fn pack(&self) -> Vec<u8> {
        pack_attribute(PathAttributeFlags::TRANSITIVE, PathAttributeKind::Origin.code(), &[self.code()])
    }
}

type_enum! {
    /// This enum represents the kind of an AS path segment. A set is an unordered set of ASes a route has traversed, a sequence is the
    /// ordered list of ASes a route has traversed.
    ///
    /// ## References
    /// - [UPDATE Message Format, Section 4.3 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.3)
    #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy, Default)]
    pub enum SegmentKind(u8) {
        Set = 1 => "as_set",
        #[default]
        Sequence = 2 => "as_sequence"
    }
}

/// This enum represents the width of the AS numbers written into an AS path segment. Four-octet AS numbers are only understood by peers
/// advertising the four-octet AS number capability.
///
/// ## References
/// - [BGP Support for Four-Octet AS Numbers, RFC 6793](https://datatracker.ietf.org/doc/html/rfc6793)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy, Default)]
pub enum AsNumberWidth {
    #[default]
    TwoOctet,
    FourOctet,
}

impl AsNumberWidth {
    pub const fn octets(&self) -> usize {
        match self {
            Self::TwoOctet => 2,
            Self::FourOctet => 4,
        }
    }
}

/// This struct represents a single segment of the AS path attribute. The width of the AS numbers is chosen on construction and is always
/// honored when packing, the segment is never converted implicitly.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub struct ASPathSegment {
    kind: SegmentKind,
    width: AsNumberWidth,
    as_numbers: Vec<u32>,
}

impl ASPathSegment {
    /// This function creates a new segment. It fails if the segment contains more than 255 AS numbers or if a two-octet segment contains
    /// an AS number above 65535.
    pub fn new<I: IntoIterator<Item = u32>>(kind: SegmentKind, width: AsNumberWidth, as_numbers: I) -> Result<Self, ConstructionError> {
        let as_numbers: Vec<u32> = as_numbers.into_iter().collect();
        if as_numbers.len() > u8::MAX as usize {
            return Err(ConstructionError::OutOfRange {
                field: "AS path segment length",
                value: as_numbers.len() as u64,
                maximum: u8::MAX as u64,
            });
        }

        if width == AsNumberWidth::TwoOctet {
            if let Some(as_number) = as_numbers.iter().find(|as_number| **as_number > u16::MAX as u32) {
                return Err(ConstructionError::OutOfRange {
                    field: "two-octet AS number",
                    value: *as_number as u64,
                    maximum: u16::MAX as u64,
                });
            }
        }

        Ok(Self { kind, width, as_numbers })
    }

    pub fn sequence<I: IntoIterator<Item = u32>>(width: AsNumberWidth, as_numbers: I) -> Result<Self, ConstructionError> {
        Self::new(SegmentKind::Sequence, width, as_numbers)
    }

    pub fn set<I: IntoIterator<Item = u32>>(width: AsNumberWidth, as_numbers: I) -> Result<Self, ConstructionError> {
        Self::new(SegmentKind::Set, width, as_numbers)
    }

    /// Returns whether every AS number of this segment fits into two octets, so the segment could be sent to a peer without four-octet AS
    /// number support.
    pub fn mappable(&self) -> bool {
        self.as_numbers.iter().all(|as_number| *as_number <= u16::MAX as u32)
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn width(&self) -> AsNumberWidth {
        self.width
    }

    pub fn as_numbers(&self) -> &[u32] {
        &self.as_numbers
    }
}

impl Encodable for ASPathSegment {
    fn length(&self) -> usize {
        1 + 1 + self.as_numbers.len() * self.width.octets()
    }

    fn pack(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.length());
        buffer.extend_from_slice(&self.kind.code().to_be_bytes());
        buffer.extend_from_slice(&(self.as_numbers.len() as u8).to_be_bytes());
        for as_number in &self.as_numbers {
            match self.width {
                AsNumberWidth::TwoOctet => buffer.extend_from_slice(&(*as_number as u16).to_be_bytes()),
                AsNumberWidth::FourOctet => buffer.extend_from_slice(&as_number.to_be_bytes()),
            }
        }
        buffer
    }
}

/// The AS path is a well-known mandatory attribute listing the ASes the route has traversed as a list of segments.
///
/// ## References
/// - [AS_PATH, Section 5.1.2 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-5.1.2)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Default)]
pub struct ASPath {
    segments: Container<ASPathSegment>,
}

impl ASPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, segment: ASPathSegment) {
        self.segments.add(segment);
    }

    pub fn segments(&self) -> &Container<ASPathSegment> {
        &self.segments
    }
}

impl From<ASPathSegment> for ASPath {
    fn from(segment: ASPathSegment) -> Self {
        Self {
            segments: Container::from(alloc::vec![segment]),
        }
    }
}

impl FromIterator<ASPathSegment> for ASPath {
    fn from_iter<I: IntoIterator<Item = ASPathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Encodable for ASPath {
    fn length(&self) -> usize {
        attribute_length(self.segments.length())
    }

    fn pack(&self) -> Vec<u8> {
        pack_attribute(PathAttributeFlags::TRANSITIVE, PathAttributeKind::AsPath.code(), &self.segments.pack())
    }
}

/// The next hop is a well-known mandatory attribute with the IPv4 address of the router that should be used as next hop to the prefixes
/// announced in the update message.
///
/// ## References
/// - [NEXT_HOP, Section 5.1.3 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-5.1.3)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub struct NextHop {
    pub next_hop: Ipv4Addr,
}

impl NextHop {
    pub fn new(next_hop: Ipv4Addr) -> Self {
        Self { next_hop }
    }
}

impl FromStr for NextHop {
    type Err = ConstructionError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(Ipv4Addr::from_str(string)?))
    }
}

impl Encodable for NextHop {
    fn length(&self) -> usize {
        attribute_length(4)
    }

    fn pack(&self) -> Vec<u8> {
        pack_attribute(PathAttributeFlags::TRANSITIVE, PathAttributeKind::NextHop.code(), &self.next_hop.octets())
    }
}

/// The local preference is a well-known attribute sent to internal peers, the higher the preference the more the route is preferred.
///
/// ## References
/// - [LOCAL_PREF, Section 5.1.5 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-5.1.5)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
pub struct LocalPreference {
    pub preference: u32,
}

impl LocalPreference {
    pub const DEFAULT: u32 = 100;

    pub fn new(preference: u32) -> Self {
        Self { preference }
    }
}

impl Default for LocalPreference {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl Encodable for LocalPreference {
    fn length(&self) -> usize {
        attribute_length(4)
    }

    fn pack(&self) -> Vec<u8> {
        pack_attribute(PathAttributeFlags::TRANSITIVE, PathAttributeKind::LocalPref.code(), &self.preference.to_be_bytes())
    }
}

/// This enum represents the path attributes sent in a BGP update message. Path attributes are providing information about the prefixes
/// being sent to the peer like communities, origin etc.
///
/// ## References
/// - [UPDATE Message Format, Section 4.2 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.3)
/// - [Path Attributes, Section 5 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-5)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub enum PathAttribute {
    Origin(Origin),
    AsPath(ASPath),
    NextHop(NextHop),
    LocalPref(LocalPreference),
    #[cfg(feature = "rfc1997")]
    Communities(Communities),
    #[cfg(feature = "rfc4760")]
    MpReachNlri(MultiprotocolReachNLRI),
    Unknown {
        kind: u8,
        flags: PathAttributeFlags,
        data: Vec<u8>,
    },
}

impl PathAttribute {
    pub fn kind(&self) -> u8 {
        match self {
            Self::Origin(_) => PathAttributeKind::Origin.code(),
            Self::AsPath(_) => PathAttributeKind::AsPath.code(),
            Self::NextHop(_) => PathAttributeKind::NextHop.code(),
            Self::LocalPref(_) => PathAttributeKind::LocalPref.code(),
            #[cfg(feature = "rfc1997")]
            Self::Communities(_) => PathAttributeKind::Communities.code(),
            #[cfg(feature = "rfc4760")]
            Self::MpReachNlri(_) => PathAttributeKind::MpReachNlri.code(),
            Self::Unknown { kind, .. } => *kind,
        }
    }
}

impl Encodable for PathAttribute {
    fn length(&self) -> usize {
        match self {
            Self::Origin(origin) => origin.length(),
            Self::AsPath(as_path) => as_path.length(),
            Self::NextHop(next_hop) => next_hop.length(),
            Self::LocalPref(local_pref) => local_pref.length(),
            #[cfg(feature = "rfc1997")]
            Self::Communities(communities) => communities.length(),
            #[cfg(feature = "rfc4760")]
            Self::MpReachNlri(mp_reach_nlri) => mp_reach_nlri.length(),
            Self::Unknown { data, .. } => attribute_length(data.len()),
        }
    }

    fn pack(&self) -> Vec<u8> {
        match self {
            Self::Origin(origin) => origin.pack(),
            Self::AsPath(as_path) => as_path.pack(),
            Self::NextHop(next_hop) => next_hop.pack(),
            Self::LocalPref(local_pref) => local_pref.pack(),
            #[cfg(feature = "rfc1997")]
            Self::Communities(communities) => communities.pack(),
            #[cfg(feature = "rfc4760")]
            Self::MpReachNlri(mp_reach_nlri) => mp_reach_nlri.pack(),
            Self::Unknown { kind, flags, data } => pack_attribute(*flags, *kind, data),
        }
    }
}

impl From<Origin> for PathAttribute {
    fn from(origin: Origin) -> Self {
        Self::Origin(origin)
    }
}

impl From<ASPath> for PathAttribute {
    fn from(as_path: ASPath) -> Self {
        Self::AsPath(as_path)
    }
}

impl From<NextHop> for PathAttribute {
    fn from(next_hop: NextHop) -> Self {
        Self::NextHop(next_hop)
    }
}

impl From<LocalPreference> for PathAttribute {
    fn from(local_pref: LocalPreference) -> Self {
        Self::LocalPref(local_pref)
    }
}

#[cfg(feature = "rfc1997")]
impl From<Communities> for PathAttribute {
    fn from(communities: Communities) -> Self {
        Self::Communities(communities)
    }
}

#[cfg(feature = "rfc4760")]
impl From<MultiprotocolReachNLRI> for PathAttribute {
    fn from(mp_reach_nlri: MultiprotocolReachNLRI) -> Self {
        Self::MpReachNlri(mp_reach_nlri)
    }
}

pub type PathAttributes = Container<PathAttribute>;

/// This enum implements all optional parameters which are sent with the BGP open message. These parameters contains some information about
/// the router and it's capabilities ([RFC 3392](https://datatracker.ietf.org/doc/html/rfc3392)).
///
/// ## References
/// - [OPEN Message Format, Section 4.2 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.2)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub enum OptionalParameter {
    #[cfg(feature = "rfc3392")]
    Capabilities(Capabilities),
    Unknown { kind: u8, data: Vec<u8> },
}

impl Encodable for OptionalParameter {
    fn length(&self) -> usize {
        match self {
            #[cfg(feature = "rfc3392")]
            Self::Capabilities(capabilities) => 1 + 1 + capabilities.length(),
            Self::Unknown { data, .. } => 1 + 1 + data.len(),
        }
    }

    /// ## Panics
    /// When the parameter value exceeds the 1-byte length field.
    fn pack(&self) -> Vec<u8> {
        let (kind, data) = match self {
            #[cfg(feature = "rfc3392")]
            Self::Capabilities(capabilities) => (2_u8, capabilities.pack()),
            Self::Unknown { kind, data } => (*kind, data.clone()),
        };

        assert!(data.len() <= u8::MAX as usize, "Optional parameter {} with {} bytes exceeds the length field", kind, data.len());
        let mut buffer = Vec::with_capacity(2 + data.len());
        buffer.extend_from_slice(&kind.to_be_bytes());
        buffer.extend_from_slice(&(data.len() as u8).to_be_bytes());
        buffer.extend_from_slice(&data);
        buffer
    }
}

#[cfg(feature = "rfc3392")]
impl From<Capabilities> for OptionalParameter {
    fn from(capabilities: Capabilities) -> Self {
        Self::Capabilities(capabilities)
    }
}

pub type OptionalParameters = Container<OptionalParameter>;

/// This struct represents the BGP open message. The open message is sent between two BGP peers to initialize the connection and exchange
/// information about the router (supported extensions/capabilities etc.) to the other peer. This library only supports BGP-4, so the
/// version is always [BGP_VERSION].
///
/// ## References
/// - [OPEN Message Format, Section 4.2 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.2)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub struct OpenMessage {
    pub autonomous_system: u16,
    pub hold_time: u16,
    pub bgp_identifier: Ipv4Addr,
    pub optional_parameters: OptionalParameters,
}

impl OpenMessage {
    /// Creates an open message with the default hold time of 180 seconds and without optional parameters.
    pub fn new(autonomous_system: u16, bgp_identifier: Ipv4Addr) -> Self {
        Self {
            autonomous_system,
            hold_time: DEFAULT_HOLD_TIME,
            bgp_identifier,
            optional_parameters: OptionalParameters::new(),
        }
    }

    pub fn with_hold_time(mut self, hold_time: u16) -> Self {
        self.hold_time = hold_time;
        self
    }

    pub fn with_optional_parameters(mut self, optional_parameters: OptionalParameters) -> Self {
        self.optional_parameters = optional_parameters;
        self
    }
}

impl Encodable for OpenMessage {
    fn length(&self) -> usize {
        1 + 2 + 2 + 4 + 1 + self.optional_parameters.length()
    }

    /// ## Panics
    /// When the optional parameters exceed the 1-byte length field.
    fn pack(&self) -> Vec<u8> {
        let optional_parameters = self.optional_parameters.pack();
        assert!(optional_parameters.len() <= u8::MAX as usize, "Optional parameters with {} bytes exceed the length field", optional_parameters.len());

        let mut buffer = Vec::with_capacity(self.length());
        buffer.extend_from_slice(&BGP_VERSION.to_be_bytes());
        buffer.extend_from_slice(&self.autonomous_system.to_be_bytes());
        buffer.extend_from_slice(&self.hold_time.to_be_bytes());
        buffer.extend_from_slice(&self.bgp_identifier.octets());
        buffer.extend_from_slice(&(optional_parameters.len() as u8).to_be_bytes());
        buffer.extend_from_slice(&optional_parameters);
        buffer
    }
}

impl Message for OpenMessage {
    fn kind(&self) -> MessageKind {
        MessageKind::Open
    }
}

/// This struct represents the BGP update message. The update message is sent after the establishment of the connection to exchange route
/// information to the BGP peer like Network Layer Reachability Information (NLRI, new reachable routes) with some information about the
/// prefixes itself (path attributes). Withdrawing routes is not supported, so the withdrawn routes are always empty. The NLRI field only
/// carries IPv4 prefixes, other address families are announced through the multiprotocol reachability attribute.
///
/// ## References
/// - [UPDATE Message Format, Section 4.3 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.3)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Default)]
pub struct UpdateMessage {
    path_attributes: PathAttributes,
    nlri: Nlri,
}

impl UpdateMessage {
    /// This function creates the update message. It fails if one of the prefixes isn't an IPv4 prefix.
    pub fn new(path_attributes: PathAttributes, nlri: Nlri) -> Result<Self, ConstructionError> {
        if let Some(prefix) = nlri.find_foreign(AddressFamily::IPv4) {
            return Err(ConstructionError::AddressFamilyMismatch {
                field: "NLRI prefix",
                expected: AddressFamily::IPv4.symbol(),
                address: prefix.address(),
            });
        }
        Ok(Self { path_attributes, nlri })
    }

    pub fn path_attributes(&self) -> &PathAttributes {
        &self.path_attributes
    }

    pub fn nlri(&self) -> &Nlri {
        &self.nlri
    }
}

impl Encodable for UpdateMessage {
    fn length(&self) -> usize {
        2 + 2 + self.path_attributes.length() + self.nlri.length()
    }

    /// ## Panics
    /// When the path attributes exceed the 2-byte length field.
    fn pack(&self) -> Vec<u8> {
        let path_attributes = self.path_attributes.pack();
        assert!(path_attributes.len() <= u16::MAX as usize, "Path attributes with {} bytes exceed the length field", path_attributes.len());

        let mut buffer = Vec::with_capacity(self.length());
        buffer.extend_from_slice(&0_u16.to_be_bytes());
        buffer.extend_from_slice(&(path_attributes.len() as u16).to_be_bytes());
        buffer.extend_from_slice(&path_attributes);

        // The NLRI has no length field, it fills the rest of the message
        buffer.extend_from_slice(&self.nlri.pack());
        buffer
    }
}

impl Message for UpdateMessage {
    fn kind(&self) -> MessageKind {
        MessageKind::Update
    }
}

/// This struct represents the BGP notification message. The notification message is sent to inform a peer about an error while processing
/// the peer's routes or generally something related to that peer.
///
/// ## References
/// - [NOTIFICATION Message Format, Section 4.5 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.5)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub struct NotificationMessage {
    pub error_code: u8,
    pub error_subcode: u8,
    pub data: Vec<u8>,
}

impl NotificationMessage {
    pub fn new(error_code: u8, error_subcode: u8, data: Vec<u8>) -> Self {
        Self {
            error_code,
            error_subcode,
            data,
        }
    }
}

impl Encodable for NotificationMessage {
    fn length(&self) -> usize {
        1 + 1 + self.data.len()
    }

    fn pack(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.length());
        buffer.extend_from_slice(&self.error_code.to_be_bytes());
        buffer.extend_from_slice(&self.error_subcode.to_be_bytes());
        buffer.extend_from_slice(&self.data);
        buffer
    }
}

impl Message for NotificationMessage {
    fn kind(&self) -> MessageKind {
        MessageKind::Notification
    }
}

/// The keep-alive message has no body, it only consists of the message header.
///
/// ## References
/// - [KEEPALIVE Message Format, Section 4.4 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.4)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy, Default)]
pub struct KeepAliveMessage;

impl Encodable for KeepAliveMessage {
    fn length(&self) -> usize {
        0
    }

    fn pack(&self) -> Vec<u8> {
        Vec::new()
    }
}

impl Message for KeepAliveMessage {
    fn kind(&self) -> MessageKind {
        MessageKind::KeepAlive
    }
}
