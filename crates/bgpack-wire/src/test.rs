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

use alloc::vec::Vec;

/// Builds the expected frame of a message with the specified kind and body.
fn frame(kind: u8, body: &[u8]) -> Vec<u8> {
    let mut buffer = alloc::vec![0xFF; 16];
    buffer.extend_from_slice(&((body.len() + 19) as u16).to_be_bytes());
    buffer.push(kind);
    buffer.extend_from_slice(body);
    buffer
}

mod container {
    use crate::{
        prefix::Nlri,
        Container,
        Encodable,
        Prefix,
    };
    use alloc::vec;
    use core::str::FromStr;

    #[test]
    fn test_empty_container() {
        let container: Container<Prefix> = Container::new();
        assert_eq!(0, container.length());
        assert!(container.pack().is_empty());
        assert!(!container.extended());
    }

    #[test]
    fn test_container_keeps_insertion_order() {
        let mut container = Container::new();
        container.add(Prefix::from_str("20.0.0.0/16").unwrap());
        container.add(Prefix::from_str("10.0.0.0/8").unwrap());
        container.add(Prefix::from_str("10.0.0.0/8").unwrap());

        assert_eq!(3, container.len());
        assert_eq!(3 + 2 + 2, container.length());
        assert_eq!(vec![16, 20, 0, 8, 10, 8, 10], container.pack());
    }

    #[test]
    fn test_container_extended_threshold() {
        let host = Prefix::from_str("192.0.2.1/32").unwrap();
        let fitting: Nlri = core::iter::repeat(host).take(51).collect();
        assert_eq!(255, fitting.length());
        assert!(!fitting.extended());

        let exceeding: Nlri = core::iter::repeat(host).take(52).collect();
        assert_eq!(260, exceeding.length());
        assert_eq!(260, exceeding.pack().len());
        assert!(exceeding.extended());
    }
}

mod prefixes {
    use crate::{
        prefix::{
            AddressFamily,
            Nlri,
            SubsequentAddressFamily,
        },
        ConstructionError,
        Encodable,
        Prefix,
    };
    use alloc::vec;
    use core::str::FromStr;

    #[test]
    fn test_pack_prefixes() {
        assert_eq!(vec![8, 10], Prefix::from_str("10.0.0.0/8").unwrap().pack());
        assert_eq!(vec![16, 20, 0], Prefix::from_str("20.0.0.0/16").unwrap().pack());
        assert_eq!(vec![0], Prefix::ANY_IPV4.pack());
        assert_eq!(vec![0], Prefix::ANY_IPV6.pack());
        assert_eq!(vec![32, 192, 0, 2, 1], Prefix::from_str("192.0.2.1/32").unwrap().pack());
        assert_eq!(vec![48, 0x20, 0x01, 0x0D, 0xB8, 0x00, 0x01], Prefix::from_str("2001:db8:1::/48").unwrap().pack());

        let host = Prefix::from_str("2001:db8::1/128").unwrap();
        assert_eq!(17, host.length());
        assert_eq!(17, host.pack().len());
    }

    #[test]
    fn test_pack_prefix_clears_host_bits() {
        assert_eq!(vec![9, 10, 0x80], Prefix::from_str("10.255.0.0/9").unwrap().pack());
        assert_eq!(vec![20, 172, 16, 0xA0], Prefix::from_str("172.16.167.1/20").unwrap().pack());
    }

    #[test]
    fn test_parse_nlri() {
        let nlri = Nlri::parse(["10.0.0.0/8", "20.0.0.0/16"]).unwrap();
        assert_eq!(vec![8, 10, 16, 20, 0], nlri.pack());
        assert!(matches!(Nlri::parse(["10.0.0.0/8", "20.0.0.0"]), Err(ConstructionError::InvalidPrefixFormat(_))));
    }

    #[test]
    fn test_address_family_tables() {
        assert_eq!(Ok(AddressFamily::IPv6), AddressFamily::from_str("ipv6"));
        assert_eq!(2, u16::from(AddressFamily::IPv6));
        assert_eq!(Ok(SubsequentAddressFamily::MplsLabeledVpn), SubsequentAddressFamily::from_str("mpls_labeled_vpn"));
        assert_eq!(128, SubsequentAddressFamily::MplsLabeledVpn.code());
        assert_eq!(Ok(SubsequentAddressFamily::MplsLabel), SubsequentAddressFamily::try_from(4));
        assert!(matches!(AddressFamily::from_str("ipx"), Err(ConstructionError::UnknownSymbol { .. })));
        assert_eq!(
            Err(ConstructionError::UnknownCode {
                field: "SubsequentAddressFamily",
                code: 3
            }),
            SubsequentAddressFamily::try_from(3)
        );
    }
}

mod base {
    use super::frame;
    use crate::{
        prefix::Nlri,
        rfc4271::{
            ASPath,
            ASPathSegment,
            AsNumberWidth,
            BGPMessageHeader,
            KeepAliveMessage,
            LocalPreference,
            MessageKind,
            NextHop,
            NotificationMessage,
            OpenMessage,
            Origin,
            PathAttribute,
            PathAttributeFlags,
            PathAttributes,
            UpdateMessage,
        },
        BGPMessage,
        ConstructionError,
        Encodable,
        Envelope,
        Message,
    };
    use alloc::{
        vec,
        vec::Vec,
    };
    use core::{
        net::Ipv4Addr,
        str::FromStr,
    };

    #[test]
    fn test_pack_as_path_segment() {
        let two_octet = ASPathSegment::sequence(AsNumberWidth::TwoOctet, [100, 101, 102]).unwrap();
        assert_eq!(vec![0x02, 0x03, 0x00, 0x64, 0x00, 0x65, 0x00, 0x66], two_octet.pack());
        assert_eq!(8, two_octet.length());

        let four_octet = ASPathSegment::sequence(AsNumberWidth::FourOctet, [100, 101, 102]).unwrap();
        assert_eq!(
            vec![0x02, 0x03, 0x00, 0x00, 0x00, 0x64, 0x00, 0x00, 0x00, 0x65, 0x00, 0x00, 0x00, 0x66],
            four_octet.pack()
        );
        assert_eq!(14, four_octet.length());

        let set = ASPathSegment::set(AsNumberWidth::TwoOctet, [65001]).unwrap();
        assert_eq!(vec![0x01, 0x01, 0xFD, 0xE9], set.pack());
    }

    #[test]
    fn test_as_path_segment_width() {
        assert_eq!(
            Err(ConstructionError::OutOfRange {
                field: "two-octet AS number",
                value: 65536,
                maximum: 65535
            }),
            ASPathSegment::sequence(AsNumberWidth::TwoOctet, [100, 65536])
        );

        let segment = ASPathSegment::sequence(AsNumberWidth::FourOctet, [100, 101, 102, 65536, 65537]).unwrap();
        assert!(!segment.mappable());
        assert_eq!(AsNumberWidth::FourOctet, segment.width());
        assert!(ASPathSegment::sequence(AsNumberWidth::FourOctet, [100, 65535]).unwrap().mappable());

        let too_long = ASPathSegment::sequence(AsNumberWidth::TwoOctet, 0..256);
        assert!(matches!(too_long, Err(ConstructionError::OutOfRange { value: 256, .. })));
    }

    #[test]
    fn test_pack_as_path() {
        let as_path = ASPath::from(ASPathSegment::sequence(AsNumberWidth::TwoOctet, [100, 101, 102]).unwrap());
        assert_eq!(vec![0x40, 0x02, 0x08, 0x02, 0x03, 0x00, 0x64, 0x00, 0x65, 0x00, 0x66], as_path.pack());
        assert_eq!(11, as_path.length());
        assert_eq!(vec![0x40, 0x02, 0x00], ASPath::new().pack());
    }

    #[test]
    fn test_pack_extended_as_path() {
        let mut as_path = ASPath::new();
        as_path.add(ASPathSegment::sequence(AsNumberWidth::FourOctet, 1..=100).unwrap());
        assert!(as_path.segments().extended());

        let buffer = as_path.pack();
        assert_eq!(406, as_path.length());
        assert_eq!(406, buffer.len());
        assert_eq!(&[0x50, 0x02, 0x01, 0x92, 0x02, 0x64], &buffer[0..6]);
    }

    #[test]
    fn test_pack_fixed_attributes() {
        assert_eq!(vec![0x40, 0x01, 0x01, 0x00], Origin::default().pack());
        assert_eq!(vec![0x40, 0x01, 0x01, 0x02], Origin::from_str("incomplete").unwrap().pack());
        assert!(matches!(Origin::from_str("bgp"), Err(ConstructionError::UnknownSymbol { field: "Origin", .. })));
        assert_eq!(vec![0x40, 0x03, 0x04, 11, 0, 0, 2], NextHop::from_str("11.0.0.2").unwrap().pack());
        assert!(matches!(NextHop::from_str("11.0.0"), Err(ConstructionError::IpAddrParse(_))));
        assert_eq!(vec![0x40, 0x05, 0x04, 0x00, 0x00, 0x00, 0x64], LocalPreference::default().pack());
        assert_eq!(vec![0x40, 0x05, 0x04, 0x00, 0x00, 0x00, 0xC8], LocalPreference::new(200).pack());
    }

    #[test]
    fn test_pack_unknown_attribute() {
        let small = PathAttribute::Unknown {
            kind: 99,
            flags: PathAttributeFlags::OPTIONAL | PathAttributeFlags::EXTENDED_LENGTH,
            data: vec![1, 2, 3],
        };
        assert_eq!(vec![0x80, 99, 3, 1, 2, 3], small.pack());
        assert_eq!(6, small.length());

        let large = PathAttribute::Unknown {
            kind: 99,
            flags: PathAttributeFlags::OPTIONAL | PathAttributeFlags::TRANSITIVE,
            data: vec![0; 300],
        };
        let buffer = large.pack();
        assert_eq!(&[0xD0, 99, 0x01, 0x2C], &buffer[0..4]);
        assert_eq!(304, large.length());
        assert_eq!(304, buffer.len());
    }

    #[test]
    fn test_pack_open_message() {
        let open = OpenMessage::new(7675, Ipv4Addr::new(172, 16, 167, 1));
        let mut expected = vec![0xFF; 16];
        expected.extend_from_slice(&[0x00, 0x1D, 0x01, 0x04, 0x1D, 0xFB, 0x00, 0xB4, 0xAC, 0x10, 0xA7, 0x01, 0x00]);

        let envelope = Envelope::new(open);
        assert_eq!(29, envelope.length());
        assert_eq!(expected, envelope.pack());

        let open = OpenMessage::new(65001, Ipv4Addr::new(10, 0, 0, 1)).with_hold_time(90);
        assert_eq!(&[0x04, 0xFD, 0xE9, 0x00, 0x5A], &open.pack()[0..5]);
    }

    #[test]
    fn test_pack_update_message() {
        let mut path_attributes = PathAttributes::new();
        path_attributes.add(Origin::IGP.into());
        path_attributes.add(ASPath::from(ASPathSegment::sequence(AsNumberWidth::TwoOctet, [100, 101, 102]).unwrap()).into());
        path_attributes.add(NextHop::new(Ipv4Addr::new(11, 0, 0, 2)).into());
        path_attributes.add(LocalPreference::default().into());
        let update = UpdateMessage::new(path_attributes, Nlri::parse(["10.0.0.0/8", "20.0.0.0/16"]).unwrap()).unwrap();

        let mut body = vec![0x00, 0x00, 0x00, 29];
        body.extend_from_slice(&[0x40, 0x01, 0x01, 0x00]);
        body.extend_from_slice(&[0x40, 0x02, 0x08, 0x02, 0x03, 0x00, 0x64, 0x00, 0x65, 0x00, 0x66]);
        body.extend_from_slice(&[0x40, 0x03, 0x04, 11, 0, 0, 2]);
        body.extend_from_slice(&[0x40, 0x05, 0x04, 0x00, 0x00, 0x00, 0x64]);
        body.extend_from_slice(&[8, 10, 16, 20, 0]);

        assert_eq!(38, update.length());
        let envelope = Envelope::new(BGPMessage::from(update));
        assert_eq!(57, envelope.length());
        assert_eq!(frame(2, &body), envelope.pack());
    }

    #[test]
    fn test_update_message_rejects_foreign_prefixes() {
        let nlri = Nlri::parse(["10.0.0.0/8", "2001:db8::/32"]).unwrap();
        assert_eq!(
            Err(ConstructionError::AddressFamilyMismatch {
                field: "NLRI prefix",
                expected: "ipv4",
                address: "2001:db8::".parse().unwrap()
            }),
            UpdateMessage::new(PathAttributes::new(), nlri)
        );

        let update = UpdateMessage::new(PathAttributes::new(), Nlri::parse(["20.0.0.0/16"]).unwrap()).unwrap();
        assert_eq!(1, update.nlri().len());
        assert!(update.path_attributes().is_empty());
    }

    #[test]
    fn test_message_kind_symbols() {
        assert_eq!(Ok(MessageKind::KeepAlive), MessageKind::from_str("keepalive"));
        assert_eq!("open", MessageKind::Open.symbol());
        assert!(matches!(MessageKind::from_str("OPEN"), Err(ConstructionError::UnknownSymbol { field: "MessageKind", .. })));
    }

    #[test]
    fn test_pack_empty_update_message() {
        let update = UpdateMessage::default();
        assert_eq!(vec![0, 0, 0, 0], update.pack());
        assert_eq!(MessageKind::Update, update.kind());
    }

    #[test]
    fn test_pack_notification_and_keep_alive() {
        let notification = NotificationMessage::new(6, 2, vec![0xCA, 0xFE]);
        assert_eq!(frame(3, &[6, 2, 0xCA, 0xFE]), Envelope::new(notification).pack());

        let keep_alive = Envelope::new(KeepAliveMessage);
        assert_eq!(19, keep_alive.length());
        assert_eq!(frame(4, &[]), keep_alive.pack());
        assert_eq!(keep_alive.pack(), Envelope::new(BGPMessage::KeepAlive).pack());
    }

    #[test]
    fn test_pack_is_deterministic() {
        let message = BGPMessage::from(OpenMessage::new(65001, Ipv4Addr::new(10, 0, 0, 1)).with_hold_time(90));
        let envelope = Envelope::new(message);
        assert_eq!(envelope.pack(), envelope.pack());
        assert_eq!(envelope.length(), envelope.pack().len());
    }

    #[test]
    fn test_unpack_header() {
        let buffer = Envelope::new(NotificationMessage::new(6, 4, Vec::new())).pack();
        let (remaining, header) = BGPMessageHeader::unpack(&buffer).unwrap();
        assert_eq!(21, header.length);
        assert_eq!(Ok(MessageKind::Notification), header.message_kind());
        assert_eq!(2, header.body_length());
        assert_eq!(&[6, 4], remaining);
        assert_eq!(&buffer[0..19], header.pack().as_slice());
    }

    #[test]
    fn test_unpack_invalid_header() {
        let mut buffer = frame(4, &[]);
        buffer[3] = 0x00;
        assert!(BGPMessageHeader::unpack(&buffer).is_err());

        let mut buffer = frame(4, &[]);
        buffer[17] = 18;
        assert!(BGPMessageHeader::unpack(&buffer).is_err());

        let (_, header) = BGPMessageHeader::unpack(&frame(9, &[])).unwrap();
        assert!(matches!(header.message_kind(), Err(ConstructionError::UnknownCode { code: 9, .. })));
        assert!(BGPMessageHeader::unpack(&[0xFF; 10]).is_err());
    }
}

#[cfg(feature = "rfc1997")]
mod communities {
    use crate::{
        rfc1997::{
            Communities,
            Community,
        },
        ConstructionError,
        Encodable,
    };
    use alloc::vec;
    use core::str::FromStr;

    #[test]
    fn test_parse_communities() {
        assert_eq!(Ok(Community::NoExport), Community::from_str("no_export"));
        assert_eq!(Ok(Community::NoAdvertise), Community::from_str("no_advertise"));
        assert_eq!(0xFFFF_FF03, u32::from(Community::from_str("no_export_subconfed").unwrap()));
        assert_eq!(
            Ok(Community::RFC1997 {
                global_administrator: 65001,
                local_administrator: 100
            }),
            Community::from_str("65001:100")
        );
        assert_eq!(Ok(Community::NoExport), Community::from_str("65535:65281"));
        assert_eq!(Ok(Community::NoExport), Community::from_str("4294967041"));
        assert_eq!(0x0000_1234, u32::from(Community::from(0x0000_1234_u32)));
        assert!(matches!(Community::from_str("no_peer"), Err(ConstructionError::UnknownSymbol { .. })));
        assert!(matches!(Community::from_str("70000:1"), Err(ConstructionError::IntParse(_))));
    }

    #[test]
    fn test_pack_default_communities() {
        assert_eq!(vec![0xC0, 0x08, 0x04, 0xFF, 0xFF, 0xFF, 0x01], Communities::default().pack());
    }

    #[test]
    fn test_pack_communities_length_boundary() {
        let fitting = Communities::new((0..63_u32).map(Community::from));
        let buffer = fitting.pack();
        assert_eq!(&[0xC0, 0x08, 252], &buffer[0..3]);
        assert_eq!(255, buffer.len());
        assert_eq!(fitting.length(), buffer.len());

        let extended = Communities::new((0..64_u32).map(Community::from));
        let buffer = extended.pack();
        assert_eq!(&[0xD0, 0x08, 0x01, 0x00], &buffer[0..4]);
        assert_eq!(260, buffer.len());
        assert_eq!(extended.length(), buffer.len());
    }
}

#[cfg(all(feature = "rfc2918", feature = "rfc4724", feature = "rfc4760", feature = "rfc6793"))]
mod capabilities {
    use super::frame;
    use crate::{
        prefix::{
            AddressFamily,
            SubsequentAddressFamily,
        },
        rfc2918::{
            RouteRefreshCapability,
            RouteRefreshOldCapability,
        },
        rfc3392::{
            Capabilities,
            Capability,
        },
        rfc4271::{
            OpenMessage,
            OptionalParameter,
            OptionalParameters,
        },
        rfc4724::GracefulRestartCapability,
        rfc4760::MultiprotocolExtensionsCapability,
        rfc6793::{
            two_octet_as_number,
            FourOctetASNumberSupportCapability,
            AS_TRANS,
        },
        Encodable,
        Envelope,
    };
    use alloc::vec;
    use core::net::Ipv4Addr;

    #[test]
    fn test_pack_capabilities() {
        let ipv6 = MultiprotocolExtensionsCapability::new(AddressFamily::IPv6, SubsequentAddressFamily::Unicast);
        assert_eq!(vec![1, 4, 0, 2, 0, 1], ipv6.pack());
        assert_eq!(vec![65, 4, 0, 0, 0x1D, 0xFB], FourOctetASNumberSupportCapability::new(7675).pack());
        assert_eq!(vec![2, 0], RouteRefreshCapability.pack());
        assert_eq!(vec![128, 0], RouteRefreshOldCapability.pack());
        assert_eq!(vec![64, 2, 0x00, 0x78], GracefulRestartCapability.pack());
        assert_eq!(4, GracefulRestartCapability.length());

        let unknown = Capability::Unknown { code: 73, data: vec![1, 2, 3] };
        assert_eq!(vec![73, 3, 1, 2, 3], unknown.pack());
        assert_eq!(5, unknown.length());
    }

    #[test]
    fn test_pack_open_message_with_capabilities() {
        let mut capabilities = Capabilities::new();
        capabilities.add(MultiprotocolExtensionsCapability::new(AddressFamily::IPv4, SubsequentAddressFamily::Unicast).into());
        capabilities.add(MultiprotocolExtensionsCapability::new(AddressFamily::IPv6, SubsequentAddressFamily::Unicast).into());
        capabilities.add(FourOctetASNumberSupportCapability::new(7675).into());

        let mut optional_parameters = OptionalParameters::new();
        optional_parameters.add(OptionalParameter::from(capabilities));
        assert_eq!(20, optional_parameters.length());

        let open = OpenMessage::new(7675, Ipv4Addr::new(172, 16, 167, 1)).with_optional_parameters(optional_parameters);
        let body = [
            0x04, 0x1D, 0xFB, 0x00, 0xB4, 0xAC, 0x10, 0xA7, 0x01, 20, // Open
            2, 18, // Capabilities
            1, 4, 0, 1, 0, 1, // IPv4 unicast
            1, 4, 0, 2, 0, 1, // IPv6 unicast
            65, 4, 0, 0, 0x1D, 0xFB, // AS 7675
        ];
        assert_eq!(frame(1, &body), Envelope::new(open).pack());
    }

    #[test]
    fn test_pack_unknown_optional_parameter() {
        let parameter = OptionalParameter::Unknown { kind: 9, data: vec![0xAB] };
        assert_eq!(vec![9, 1, 0xAB], parameter.pack());
        assert_eq!(3, parameter.length());
    }

    #[test]
    fn test_two_octet_as_number() {
        assert_eq!(7675, two_octet_as_number(7675));
        assert_eq!(AS_TRANS, two_octet_as_number(4_200_000_000));
        assert_eq!(AS_TRANS, two_octet_as_number(65536));
    }
}

#[cfg(feature = "rfc4760")]
mod multiprotocol_extensions {
    use crate::{
        prefix::{
            AddressFamily,
            Nlri,
            SubsequentAddressFamily,
        },
        rfc4271::PathAttribute,
        rfc4760::{
            MultiprotocolNextHop,
            MultiprotocolReachNLRI,
        },
        ConstructionError,
        Encodable,
        Prefix,
    };
    use alloc::vec::Vec;
    use core::{
        net::{
            IpAddr,
            Ipv4Addr,
            Ipv6Addr,
        },
        str::FromStr,
    };

    fn ipv6(address: &str) -> Ipv6Addr {
        Ipv6Addr::from_str(address).unwrap()
    }

    #[test]
    fn test_pack_ipv6_reach_nlri() {
        let next_hop = MultiprotocolNextHop::new(IpAddr::V6(ipv6("2001:db8:1::1")));
        let nlri = Nlri::parse(["2001:db8:1::/48"]).unwrap();
        let attribute = MultiprotocolReachNLRI::new(AddressFamily::IPv6, SubsequentAddressFamily::Unicast, next_hop, nlri).unwrap();

        let mut expected = Vec::from([0x80, 14, 28, 0x00, 0x02, 0x01, 16]);
        expected.extend_from_slice(&ipv6("2001:db8:1::1").octets());
        expected.extend_from_slice(&[0x00, 48, 0x20, 0x01, 0x0D, 0xB8, 0x00, 0x01]);
        assert_eq!(expected, attribute.pack());
        assert_eq!(31, attribute.length());
    }

    #[test]
    fn test_pack_ipv4_reach_nlri() {
        let next_hop = MultiprotocolNextHop::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
        let nlri = Nlri::parse(["10.0.0.0/8"]).unwrap();
        let attribute = MultiprotocolReachNLRI::new(AddressFamily::IPv4, SubsequentAddressFamily::Multicast, next_hop, nlri).unwrap();
        assert_eq!(
            Vec::from([0x80, 14, 11, 0x00, 0x01, 0x02, 4, 192, 0, 2, 1, 0x00, 8, 10]),
            PathAttribute::from(attribute).pack()
        );
    }

    #[test]
    fn test_pack_link_local_next_hop() {
        let next_hop = MultiprotocolNextHop {
            next_hop: IpAddr::V6(ipv6("2001:db8::1")),
            link_local_address: Some(ipv6("fe80::1")),
        };
        assert_eq!(32, next_hop.length());

        let attribute = MultiprotocolReachNLRI::new(AddressFamily::IPv6, SubsequentAddressFamily::Unicast, next_hop, Nlri::new()).unwrap();
        let buffer = attribute.pack();
        assert_eq!(32, buffer[6]);
        assert_eq!(&ipv6("fe80::1").octets(), &buffer[23..39]);
        assert_eq!(attribute.length(), buffer.len());
    }

    #[test]
    fn test_pack_extended_reach_nlri() {
        let nlri: Nlri = (0..60_u16)
            .map(|index| Prefix::new(IpAddr::V6(Ipv6Addr::new(0x2001, 0xDB8, index, 0, 0, 0, 0, 0)), 48).unwrap())
            .collect();
        let next_hop = MultiprotocolNextHop::new(IpAddr::V6(ipv6("2001:db8::1")));
        let attribute = MultiprotocolReachNLRI::new(AddressFamily::IPv6, SubsequentAddressFamily::Unicast, next_hop, nlri).unwrap();

        let buffer = attribute.pack();
        assert_eq!(&[0x90, 14, 0x01, 0xB9], &buffer[0..4]);
        assert_eq!(445, attribute.length());
        assert_eq!(445, buffer.len());
    }

    #[test]
    fn test_reject_address_family_mismatch() {
        let next_hop = MultiprotocolNextHop::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(
            Err(ConstructionError::AddressFamilyMismatch {
                field: "next hop",
                expected: "ipv6",
                address: IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))
            }),
            MultiprotocolReachNLRI::new(AddressFamily::IPv6, SubsequentAddressFamily::Unicast, next_hop, Nlri::new())
        );

        let next_hop = MultiprotocolNextHop::new(IpAddr::V6(ipv6("2001:db8::1")));
        let nlri = Nlri::parse(["2001:db8::/32", "10.0.0.0/8"]).unwrap();
        assert!(matches!(
            MultiprotocolReachNLRI::new(AddressFamily::IPv6, SubsequentAddressFamily::Unicast, next_hop, nlri),
            Err(ConstructionError::AddressFamilyMismatch { field: "NLRI prefix", .. })
        ));

        let next_hop = MultiprotocolNextHop {
            next_hop: IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)),
            link_local_address: Some(ipv6("fe80::1")),
        };
        assert!(MultiprotocolReachNLRI::new(AddressFamily::IPv4, SubsequentAddressFamily::Unicast, next_hop, Nlri::new()).is_err());
    }
}
