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

mod bgp;
mod scenario;

use crate::{
    bgp::{
        describe,
        BGPSession,
    },
    scenario::{
        Scenario,
        ScenarioKind,
    },
};
use bgpack_wire::rfc4271::DEFAULT_HOLD_TIME;
use clap::Parser;
use colorful::{
    Color,
    Colorful,
};
use log::{
    error,
    info,
    LevelFilter,
};
use simple_logger::SimpleLogger;
use std::{
    io::ErrorKind,
    net::{
        Ipv4Addr,
        SocketAddr,
    },
    process::exit,
};

#[derive(Parser, Debug)]
#[command(name = "bgpack", version, about = "Announces a fixed set of BGP messages to a single peer")]
struct Cli {
    /// Address the daemon waits for its peer on
    #[arg(long, default_value = "0.0.0.0:179")]
    listen: SocketAddr,

    /// Local AS number, four-octet values are announced through the capability
    #[arg(long, default_value_t = 7675)]
    asn: u32,

    #[arg(long, default_value = "172.16.167.1")]
    bgp_id: Ipv4Addr,

    #[arg(long, default_value_t = DEFAULT_HOLD_TIME)]
    hold_time: u16,

    #[arg(long, value_enum, default_value_t = ScenarioKind::Ipv4)]
    scenario: ScenarioKind,

    /// Announced prefix in the <address>/<mask> notation, can be repeated
    #[arg(long = "prefix")]
    prefixes: Vec<String>,

    #[arg(long)]
    next_hop: Option<String>,

    /// AS numbers of the announced path, can be repeated or separated by commas
    #[arg(long, value_delimiter = ',')]
    as_path: Vec<u32>,

    /// Community as well-known name (a.e. no_export) or <AS number>:<value>, can be repeated
    #[arg(long = "community")]
    communities: Vec<String>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl From<Cli> for Scenario {
    fn from(cli: Cli) -> Self {
        Self {
            kind: cli.scenario,
            as_number: cli.asn,
            bgp_identifier: cli.bgp_id,
            hold_time: cli.hold_time,
            prefixes: cli.prefixes,
            next_hop: cli.next_hop,
            as_path: cli.as_path,
            communities: cli.communities,
        }
    }
}

/// This function announces the scenario to the first peer connecting to the listen address. The messages are sent after the first
/// message of the peer, afterward every received message is logged until the peer disconnects.
async fn run(listen: SocketAddr, scenario: Scenario) -> anyhow::Result<()> {
    let messages = scenario.messages()?;
    let mut session = BGPSession::accept(listen).await?;

    let header = session.read_header().await?;
    info!("Received {} message from {}, announcing {:?} scenario", describe(&header), session.peer(), scenario.kind);
    for message in messages {
        session.send(message).await?;
    }

    loop {
        match session.read_header().await {
            Ok(header) => info!("Received {} message ({} bytes) from {}", describe(&header), header.length, session.peer()),
            Err(error) if error.kind() == ErrorKind::UnexpectedEof => {
                info!("Peer {} closed the connection", session.peer());
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = SimpleLogger::new().with_level(cli.log_level).init() {
        println!("Unable to initialize logging => {}", error);
        exit(-1);
    }

    let header = r#"    __
   / /_  ____ _____  ____ ______/ /__
  / __ \/ __ `/ __ \/ __ `/ ___/ //_/
 / /_/ / /_/ / /_/ / /_/ / /__/ ,<
/_.___/\__, / .___/\__,_/\___/_/|_|
      /____/_/  BGP message announcer"#;
    println!("{}\n", header.gradient(Color::Green).bold());

    let listen = cli.listen;
    if let Err(error) = run(listen, Scenario::from(cli)).await {
        error!("Unable to announce scenario => {}", error);
        exit(-1);
    }
}
