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

//! This crate (bgpack project module) implements the encoding of messages for the Border Gateway Protocol (BGP), that is **the** EGP
//! (Exterior Gateway Protocol) used in the Internet for the exchange of routes between two networks. Every element of a message (path
//! attributes, capabilities, prefixes and the messages themselves) implements [Encodable], so composite elements get their length and
//! their encoding from the elements they contain through [Container].
//!
//! ## RFCs currently implemented
//! | RFC                                                       | Title                                       | Status                   |
//! |-----------------------------------------------------------|---------------------------------------------|--------------------------|
//! | [RFC 1997](https://datatracker.ietf.org/doc/html/rfc1997) | BGP Communities Attribute                   | Implemented              |
//! | [RFC 2918](https://datatracker.ietf.org/doc/html/rfc2918) | Route Refresh Capability for BGP-4          | Capability only          |
//! | [RFC 3392](https://datatracker.ietf.org/doc/html/rfc3392) | Capabilities Advertisement with BGP-4       | Implemented              |
//! | [RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271) | A Border Gateway Protocol 4 (BGP-4)         | Implemented (no withdraw) |
//! | [RFC 4724](https://datatracker.ietf.org/doc/html/rfc4724) | Graceful Restart Mechanism for BGP          | Constant capability only |
//! | [RFC 4760](https://datatracker.ietf.org/doc/html/rfc4760) | Multiprotocol Extensions for BGP-4          | MP_REACH_NLRI only       |
//! | [RFC 6793](https://datatracker.ietf.org/doc/html/rfc6793) | BGP Support for Four-Octet AS Numbers       | Implemented              |
//!
//! ## Examples
//!
//! ```
//! use bgpack_wire::{rfc4271::OpenMessage, Encodable, Envelope};
//! use core::net::Ipv4Addr;
//!
//! let open = OpenMessage::new(7675, Ipv4Addr::new(172, 16, 167, 1));
//! let bytes = Envelope::new(open).pack();
//! assert_eq!(29, bytes.len());
//! ```
//!
//! ## References
//! - [RFC 4271 - A Border Gateway Protocol 4 (BGP-4)](https://datatracker.ietf.org/doc/html/rfc4271)
//! - [Supported Standards for BGP, Juniper](https://www.juniper.net/documentation/us/en/software/junos/standards/bgp/topics/concept/bgp.html)

#![no_std]
extern crate alloc;

pub mod prefix;
#[cfg(feature = "rfc1997")] pub mod rfc1997;
#[cfg(feature = "rfc2918")] pub mod rfc2918;
#[cfg(feature = "rfc3392")] pub mod rfc3392;
pub mod rfc4271;
#[cfg(feature = "rfc4724")] pub mod rfc4724;
#[cfg(feature = "rfc4760")] pub mod rfc4760;
#[cfg(feature = "rfc6793")] pub mod rfc6793;

#[cfg(test)]
mod test;

pub use bgpack_common::{
    ConstructionError,
    Prefix,
};

use crate::rfc4271::{
    BGPMessageHeader,
    KeepAliveMessage,
    MessageKind,
    NotificationMessage,
    OpenMessage,
    UpdateMessage,
    HEADER_SIZE,
    MARKER,
};
use alloc::vec::Vec;
use core::slice::Iter;
use log::trace;

/// This trait is implemented by every element of a BGP message. The length returned by [Encodable::length] is always the number of bytes
/// written by [Encodable::pack], the whole encoder relies on this to fill in the length fields of the containing elements.
pub trait Encodable {
    fn length(&self) -> usize;
    fn pack(&self) -> Vec<u8>;
}

/// This struct is an ordered list of elements. The length of a container is the sum of its elements and the encoding is the concatenation
/// of the element encodings in insertion order. Every element that contains other elements (AS path segments, path attributes, optional
/// parameters, capabilities and NLRI) is built on top of this.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub struct Container<T> {
    elements: Vec<T>,
}

impl<T> Container<T> {
    pub const fn new() -> Self {
        Self { elements: Vec::new() }
    }

    pub fn add(&mut self, element: T) {
        self.elements.push(element);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: Encodable> Container<T> {
    /// Returns whether the elements don't fit into a 1-byte length field.
    pub fn extended(&self) -> bool {
        self.length() > u8::MAX as usize
    }
}

impl<T: Encodable> Encodable for Container<T> {
    fn length(&self) -> usize {
        self.elements.iter().map(Encodable::length).sum()
    }

    fn pack(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.length());
        for element in &self.elements {
            buffer.extend_from_slice(&element.pack());
        }
        buffer
    }
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Container<T> {
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> FromIterator<T> for Container<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Container<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Container<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// This trait is implemented by the bodies of all BGP messages. The kind is written into the message header by the [Envelope].
pub trait Message: Encodable {
    fn kind(&self) -> MessageKind;
}

/// This enum is a wrapper around the BGP messages provided by this library. It allows to handle every BGP message being sent through a
/// single type.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub enum BGPMessage {
    Open(OpenMessage),
    Update(UpdateMessage),
    Notification(NotificationMessage),
    KeepAlive,
}

impl Encodable for BGPMessage {
    fn length(&self) -> usize {
        match self {
            Self::Open(message) => message.length(),
            Self::Update(message) => message.length(),
            Self::Notification(message) => message.length(),
            Self::KeepAlive => KeepAliveMessage.length(),
        }
    }

    fn pack(&self) -> Vec<u8> {
        match self {
            Self::Open(message) => message.pack(),
            Self::Update(message) => message.pack(),
            Self::Notification(message) => message.pack(),
            Self::KeepAlive => KeepAliveMessage.pack(),
        }
    }
}

impl Message for BGPMessage {
    fn kind(&self) -> MessageKind {
        match self {
            Self::Open(_) => MessageKind::Open,
            Self::Update(_) => MessageKind::Update,
            Self::Notification(_) => MessageKind::Notification,
            Self::KeepAlive => MessageKind::KeepAlive,
        }
    }
}

impl From<OpenMessage> for BGPMessage {
    fn from(message: OpenMessage) -> Self {
        Self::Open(message)
    }
}

impl From<UpdateMessage> for BGPMessage {
    fn from(message: UpdateMessage) -> Self {
        Self::Update(message)
    }
}

impl From<NotificationMessage> for BGPMessage {
    fn from(message: NotificationMessage) -> Self {
        Self::Notification(message)
    }
}

impl From<KeepAliveMessage> for BGPMessage {
    fn from(_: KeepAliveMessage) -> Self {
        Self::KeepAlive
    }
}

/// This struct wraps exactly one message into the frame sent over the wire. The frame starts with the 16-byte marker, followed by the
/// total length of the frame (header inclusive) and the kind of the message.
///
/// ## References
/// - [Message Header Format, Section 4.1 RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.1)
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone)]
pub struct Envelope<M = BGPMessage> {
    message: M,
}

impl<M: Message> Envelope<M> {
    pub fn new(message: M) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &M {
        &self.message
    }

    /// Builds the header of this frame.
    ///
    /// ## Panics
    /// When the frame doesn't fit into the 2-byte length field of the header.
    pub fn header(&self) -> BGPMessageHeader {
        let length = self.length();
        assert!(length <= u16::MAX as usize, "{} message of {} bytes exceeds the header length field", self.message.kind(), length);
        BGPMessageHeader {
            marker: MARKER,
            length: length as u16,
            kind: self.message.kind().code(),
        }
    }
}

impl<M: Message> Encodable for Envelope<M> {
    fn length(&self) -> usize {
        HEADER_SIZE + self.message.length()
    }

    /// ## Panics
    /// When the message body disagrees with its own length. This is always a bug of the element implementation and sending the frame
    /// would desynchronize the peer.
    fn pack(&self) -> Vec<u8> {
        let mut buffer = self.header().pack();
        buffer.extend_from_slice(&self.message.pack());
        assert_eq!(self.length(), buffer.len(), "Length of {} message disagrees with its encoding", self.message.kind());
        trace!("Packed {} message ({} bytes)", self.message.kind(), buffer.len());
        buffer
    }
}
