use std::fmt;

use crate::configs::terms::metric;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    JBossCli,
    Jmx
}

impl Protocol {
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::JBossCli => metric::JBOSSCLI,
            Protocol::Jmx => metric::JMX
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::JBossCli => metric::JBOSSCLI_DEFAULT_PORT,
            Protocol::Jmx => metric::JMX_DEFAULT_PORT
        }
    }
}

/// Connection endpoint metrics are collected from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetricSource {
    pub protocol: Protocol,
    pub host: Box<str>,
    pub port: u16,
    pub username: Option<Box<str>>,
    pub password: Option<Box<str>>
}

impl MetricSource {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            port: protocol.default_port(),
            protocol,
            host: metric::DEFAULT_HOST.into(),
            username: None,
            password: None
        }
    }

    /// Parses `[user[:password]@]host[:port]`. An empty string yields the
    /// protocol's default endpoint.
    pub fn parse(protocol: Protocol, s: &str) -> Result<Self> {
        let mut result = Self::new(protocol);
        if s.is_empty() {
            return Ok(result)
        }
        let invalid = |reason: &str| Error::InvalidAddress {
            address: s.into(),
            reason: reason.into()
        };
        let host_port = match s.rfind('@') {
            Some(at) => {
                let credentials = &s[..at];
                let (username, password) = match credentials.find(':') {
                    Some(colon) => (&credentials[..colon], Some(&credentials[colon + 1..])),
                    None => (credentials, None)
                };
                if username.is_empty() {
                    return Err(invalid("missing user name"))
                }
                result.username = Some(username.into());
                result.password = password.map(|p| p.into());
                &s[at + 1..]
            },
            None => s
        };
        let host = match host_port.rfind(':') {
            Some(colon) => {
                let port = &host_port[colon + 1..];
                result.port = port.parse::<u16>().map_err(|_| invalid(&format!("invalid port \"{}\"", port)))?;
                if result.port == 0 {
                    return Err(invalid("port must be positive"))
                }
                &host_port[..colon]
            },
            None => host_port
        };
        if host.is_empty() {
            return Err(invalid("missing host"))
        }
        if !host.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_') {
            return Err(invalid(&format!("invalid host \"{}\"", host)))
        }
        result.host = host.into();
        Ok(result)
    }
}

impl fmt::Display for MetricSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref username) = self.username {
            write!(f, "{}@", username)?;
        }
        write!(f, "{}:{}", self.host, self.port)
    }
}
