use crate::domain::model::{IpRange, Ports};
use crate::utils::error::{PolicyError, Result};
use std::net::IpAddr;
use std::str::FromStr;

const PROTOCOLS: [&str; 4] = ["tcp", "udp", "icmp", "all"];

/// Parses `"1.2.3.4"` or `"1.2.3.4-1.2.3.5"`.
impl FromStr for IpRange {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self> {
        let ips: Vec<&str> = value.split('-').collect();
        let (start, end) = match ips.as_slice() {
            [single] => (*single, *single),
            [start, end] => (*start, *end),
            _ => return Err(PolicyError::InvalidIpRangeFormat(value.to_string())),
        };

        for ip in &ips {
            if ip.parse::<IpAddr>().is_err() {
                return Err(PolicyError::InvalidIpAddress(ip.to_string()));
            }
        }

        Ok(IpRange {
            start: start.to_string(),
            end: end.to_string(),
        })
    }
}

/// Parses `"8080"` or `"8080-8090"`.
impl FromStr for Ports {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || PolicyError::InvalidPortRange(value.to_string());
        let parse = |port: &str| port.trim().parse::<u16>().map_err(|_| invalid());

        let ports = match value.split_once('-') {
            None => Ports::single(parse(value)?),
            Some((start, end)) => Ports::new(parse(start)?, parse(end)?),
        };

        if ports.start > ports.end {
            return Err(invalid());
        }
        Ok(ports)
    }
}

pub fn parse_protocol(value: &str) -> Result<String> {
    let protocol = value.to_ascii_lowercase();
    if PROTOCOLS.contains(&protocol.as_str()) {
        Ok(protocol)
    } else {
        Err(PolicyError::InvalidProtocol(value.to_string()))
    }
}
