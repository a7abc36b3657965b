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

use bgpack_wire::{
    rfc4271::{
        BGPMessageHeader,
        HEADER_SIZE,
    },
    Encodable,
    Envelope,
    Message,
};
use log::{
    debug,
    info,
    trace,
};
use socket2::{
    Domain,
    Socket,
    Type,
};
use std::net::SocketAddr;
use tokio::{
    io::{
        self,
        AsyncRead,
        AsyncReadExt,
        AsyncWrite,
        AsyncWriteExt,
    },
    net::{
        TcpListener,
        TcpStream,
    },
};

/// This function creates the listener the session is accepted on. The listener is only used for a single peer, so the backlog is kept
/// minimal.
pub(crate) fn create_tcp_listener(socket_address: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(socket_address), Type::STREAM, None)?;
    if socket_address.is_ipv6() {
        socket.set_only_v6(true)?;
    }

    // Configure listener
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_address.into())?;
    socket.listen(1)?;

    let listener = TcpListener::from_std(std::net::TcpListener::from(socket))?;
    debug!("TCP listener is listening on {}", socket_address);
    Ok(listener)
}

/// Returns the name of the message kind in the header, or the raw code if the kind is unknown to this implementation.
pub fn describe(header: &BGPMessageHeader) -> String {
    match header.message_kind() {
        Ok(kind) => kind.symbol().to_uppercase(),
        Err(_) => format!("unknown ({})", header.kind),
    }
}

/// This struct is the connection to the single peer this daemon talks to. It only moves whole messages over the stream, there is no
/// finite state machine, timer or retransmission behind it.
pub struct BGPSession<S> {
    stream: S,
    peer: String,
}

impl BGPSession<TcpStream> {
    /// This function waits for exactly one peer on the specified address. The listener is closed after the peer was accepted, so further
    /// connection attempts are refused.
    pub async fn accept(socket_address: SocketAddr) -> io::Result<Self> {
        let listener = create_tcp_listener(socket_address)?;
        info!("Waiting for BGP peer on {}", socket_address);

        let (stream, address) = listener.accept().await?;
        drop(listener);
        stream.set_nodelay(true)?;
        info!("Accepted BGP peer {}", address);
        Ok(Self::new(stream, address.to_string()))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> BGPSession<S> {
    pub fn new(stream: S, peer: impl Into<String>) -> Self {
        Self {
            stream,
            peer: peer.into(),
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Reads exactly the specified number of bytes. A peer closing the stream before is reported as [io::ErrorKind::UnexpectedEof].
    pub async fn read_exactly(&mut self, length: usize) -> io::Result<Vec<u8>> {
        let mut buffer = vec![0; length];
        self.stream.read_exact(&mut buffer).await?;
        Ok(buffer)
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes).await?;
        self.stream.flush().await
    }

    /// This function reads the next message header from the peer. The body of the message is read and discarded, so the stream is
    /// positioned at the start of the next message afterward.
    pub async fn read_header(&mut self) -> io::Result<BGPMessageHeader> {
        let buffer = self.read_exactly(HEADER_SIZE).await?;
        let (_, header) = BGPMessageHeader::unpack(&buffer)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid message header from {} => {}", self.peer, error)))?;

        self.read_exactly(header.body_length()).await?;
        trace!("Received {} message ({} bytes) from {}", describe(&header), header.length, self.peer);
        Ok(header)
    }

    /// Wraps the message into its envelope and writes it to the peer.
    pub async fn send<M: Message>(&mut self, message: M) -> io::Result<()> {
        let envelope = Envelope::new(message);
        let buffer = envelope.pack();
        debug!("Sending {} message ({} bytes) to {}", envelope.message().kind(), buffer.len(), self.peer);
        self.write_all(&buffer).await
    }
}

#[cfg(test)]
mod tests {
    use super::{
        create_tcp_listener,
        describe,
        BGPSession,
    };
    use bgpack_wire::{
        rfc4271::{
            KeepAliveMessage,
            MessageKind,
            NotificationMessage,
            OpenMessage,
        },
        Encodable,
        Envelope,
    };
    use std::net::Ipv4Addr;
    use tokio::{
        io::{
            duplex,
            AsyncReadExt,
            AsyncWriteExt,
            ErrorKind,
        },
        net::TcpStream,
    };

    #[tokio::test]
    async fn test_read_header_skips_body() {
        let (mut client, server) = duplex(1024);
        let mut session = BGPSession::new(server, "duplex");
        client.write_all(&Envelope::new(NotificationMessage::new(6, 2, vec![1, 2, 3])).pack()).await.unwrap();
        client.write_all(&Envelope::new(KeepAliveMessage).pack()).await.unwrap();

        let header = session.read_header().await.unwrap();
        assert_eq!(Ok(MessageKind::Notification), header.message_kind());
        assert_eq!(24, header.length);

        let header = session.read_header().await.unwrap();
        assert_eq!(Ok(MessageKind::KeepAlive), header.message_kind());
        assert_eq!("KEEPALIVE", describe(&header));
    }

    #[tokio::test]
    async fn test_send_writes_envelope() {
        let (mut client, server) = duplex(1024);
        let mut session = BGPSession::new(server, "duplex");
        let open = OpenMessage::new(7675, Ipv4Addr::new(172, 16, 167, 1));
        session.send(open.clone()).await.unwrap();

        let mut buffer = vec![0; 29];
        client.read_exact(&mut buffer).await.unwrap();
        assert_eq!(Envelope::new(open).pack(), buffer);
    }

    #[tokio::test]
    async fn test_read_header_rejects_invalid_marker() {
        let (mut client, server) = duplex(1024);
        let mut session = BGPSession::new(server, "duplex");
        client.write_all(&[0; 19]).await.unwrap();

        let error = session.read_header().await.unwrap_err();
        assert_eq!(ErrorKind::InvalidData, error.kind());
    }

    #[tokio::test]
    async fn test_read_header_after_disconnect() {
        let (client, server) = duplex(1024);
        let mut session = BGPSession::new(server, "duplex");
        drop(client);

        let error = session.read_header().await.unwrap_err();
        assert_eq!(ErrorKind::UnexpectedEof, error.kind());
    }

    #[tokio::test]
    async fn test_tcp_session() {
        let listener = create_tcp_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let address = listener.local_addr().unwrap();
        let mut client = TcpStream::connect(address).await.unwrap();
        let (stream, peer) = listener.accept().await.unwrap();
        let mut session = BGPSession::new(stream, peer.to_string());

        session.send(KeepAliveMessage).await.unwrap();
        let mut buffer = vec![0; 19];
        client.read_exact(&mut buffer).await.unwrap();
        assert_eq!(Envelope::new(KeepAliveMessage).pack(), buffer);

        client.write_all(&buffer).await.unwrap();
        assert_eq!(Ok(MessageKind::KeepAlive), session.read_header().await.unwrap().message_kind());
        assert_eq!(19, Envelope::new(KeepAliveMessage).length());
    }
}
