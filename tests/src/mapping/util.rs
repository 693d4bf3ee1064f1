#![cfg(test)]
use std::collections::HashMap;
use std::net::{Ipv4Addr, UdpSocket};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ptrmap_common::config::Config;
use ptrmap_common::network::target::ResolutionTarget;
use ptrmap_common::utils::ip::reverse_address_to_ptr;
use ptrmap_protocols::dns;

/// A loopback DNS server answering PTR queries from a fixed table.
pub struct FakeDns {
    pub port: u16,
    handle: JoinHandle<usize>,
}

impl FakeDns {
    /// Serves exactly `expected` queries, then stops.
    pub fn start(records: &[([u8; 4], &str)], expected: usize) -> FakeDns {
        let table: HashMap<String, String> = records
            .iter()
            .map(|(ip, name)| (reverse_address_to_ptr(&Ipv4Addr::from(*ip)), name.to_string()))
            .collect();

        let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        socket.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let port = socket.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let mut buffer = [0u8; 512];
            let mut served = 0;
            while served < expected {
                let Ok((len, peer)) = socket.recv_from(&mut buffer) else {
                    break;
                };
                let query = &buffer[..len];
                let answer = table.get(&question_name(query)).map(String::as_str);
                let response = dns::create_ptr_response(query, answer).unwrap();
                socket.send_to(&response, peer).unwrap();
                served += 1;
            }
            served
        });

        FakeDns { port, handle }
    }

    /// Waits for the server thread and returns how many queries it answered.
    pub fn served(self) -> usize {
        self.handle.join().unwrap()
    }

    pub fn config(&self, start: &str, end: &str) -> Config {
        let mut cfg = Config::new(start, end, ResolutionTarget::Server(Ipv4Addr::LOCALHOST));
        cfg.dns_port = self.port;
        cfg.timeout = Duration::from_secs(2);
        cfg.seed = Some(7);
        cfg
    }
}

fn question_name(query: &[u8]) -> String {
    let mut labels: Vec<String> = Vec::new();
    let mut cursor = dns::DNS_HDR_LEN;
    while query[cursor] != 0 {
        let len = query[cursor] as usize;
        labels.push(String::from_utf8_lossy(&query[cursor + 1..cursor + 1 + len]).into_owned());
        cursor += len + 1;
    }
    labels.join(".")
}
