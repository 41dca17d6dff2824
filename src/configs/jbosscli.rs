use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::configs::address::{MetricSource, Protocol};
use crate::configs::definition::{CliPath, CliPathSegment, DefinitionKind, MetricDefinition};
use crate::configs::terms::metric;
use crate::error::{Error, Result};
use crate::utils::utils;

const KIND: &str = "JBoss CLI";

static SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/([a-zA-Z][\w\-]*)=([a-zA-Z][\w\-.]*)").unwrap());
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/([a-zA-Z][\w\-.]*)$").unwrap());

/// Parses `[jbosscli://][user:pass@]host[:port]/key=value.../attribute`.
///
/// Returns `Ok(None)` when the string is not a JBoss CLI definition. Once the
/// `jbosscli://` prefix is present every failure is an error.
pub fn parse(s: &str) -> Result<Option<MetricDefinition>> {
    let (committed, rest) = match utils::protocol_commits(s, metric::JBOSSCLI) {
        Some(result) => result,
        None => {
            debug!("{:?} is not a {} definition", s, KIND);
            return Ok(None)
        }
    };
    let slash = match rest.find('/') {
        Some(slash) => slash,
        None if committed => return Err(Error::MissingPath(s.into())),
        None => return Ok(None)
    };
    let source = match MetricSource::parse(Protocol::JBossCli, &rest[..slash]) {
        Ok(source) => source,
        Err(e) if committed => return Err(e),
        Err(e) => {
            debug!("Declining {:?}: {}", s, e);
            return Ok(None)
        }
    };
    let mut remaining = &rest[slash..];
    let mut segments = Vec::new();
    while let Some(captures) = SEGMENT.captures(remaining) {
        let (Some(whole), Some(key), Some(value)) = (captures.get(0), captures.get(1), captures.get(2)) else {
            break;
        };
        let tail = &remaining[whole.end()..];
        if !tail.is_empty() && !tail.starts_with('/') {
            break;
        }
        segments.push(CliPathSegment {
            key: key.as_str().into(),
            value: value.as_str().into()
        });
        remaining = tail;
    }
    if segments.is_empty() && !committed {
        return Ok(None)
    }
    if remaining.is_empty() || remaining == "/" {
        return Err(Error::MissingAttribute(s.into()))
    }
    let attribute = match ATTRIBUTE.captures(remaining).and_then(|c| c.get(1)) {
        Some(attribute) => attribute.as_str(),
        None => return Err(Error::InvalidPath {
            kind: KIND,
            path: rest[slash..].into(),
            definition: s.into()
        })
    };
    debug!("Parsed {} definition {:?}", KIND, s);
    Ok(Some(MetricDefinition::new(
        DefinitionKind::JBossCli {
            path: CliPath { segments },
            attribute: attribute.into()
        },
        source
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_test() {
        let definition = parse("jbosscli://admin:pw@localhost:9990/subsystem=messaging/hornetq-server=default/message-count")
            .unwrap()
            .unwrap();
        assert_eq!(definition.attribute(), "message-count");
        assert_eq!(definition.id(), "/subsystem=messaging/hornetq-server=default/message-count");
        assert_eq!(definition.source().to_string(), "admin@localhost:9990");
        assert_eq!(definition.name(), "jbosscli://admin@localhost:9990/subsystem=messaging/hornetq-server=default/message-count");
        if let DefinitionKind::JBossCli { path, .. } = definition.kind() {
            assert_eq!(path.segments.len(), 2);
            assert_eq!(&*path.segments[1].key, "hornetq-server");
            assert_eq!(&*path.segments[1].value, "default");
        } else {
            panic!("not a JBoss CLI definition");
        }
    }

    #[test]
    fn parse_without_protocol_test() {
        let definition = parse("/subsystem=web/connector=http/requestCount").unwrap().unwrap();
        assert_eq!(definition.source().to_string(), "localhost:9999");
        assert_eq!(definition.attribute(), "requestCount");
        let definition = parse("example.com:19999/core-service=platform-mbean/heap").unwrap().unwrap();
        assert_eq!(definition.source().port, 19999);
    }

    #[test]
    fn root_attribute_test() {
        let definition = parse("jbosscli://localhost/release-version").unwrap().unwrap();
        assert_eq!(definition.id(), "/release-version");
        assert_eq!(parse("/release-version").unwrap().map(|d| d.name().to_string()), None);
    }

    #[test]
    fn decline_test() {
        assert!(parse("jmx://localhost:1099/java.lang:type=Memory/HeapMemoryUsage").unwrap().is_none());
        assert!(parse("localhost:1099/java.lang:type=Memory/HeapMemoryUsage").unwrap().is_none());
        assert!(parse("no-path-at-all").unwrap().is_none());
        assert!(parse("bad host:x/a=b/c").unwrap().is_none());
    }

    #[test]
    fn missing_path_test() {
        let err = parse("jbosscli://localhost:9999").unwrap_err();
        assert!(matches!(err, Error::MissingPath(_)));
        assert!(err.to_string().contains("missing path separator"));
    }

    #[test]
    fn missing_attribute_test() {
        let err = parse("jbosscli://localhost:9999/subsystem=web").unwrap_err();
        assert!(matches!(err, Error::MissingAttribute(_)));
        let err = parse("/subsystem=web/").unwrap_err();
        assert!(err.to_string().contains("missing attribute name"));
    }

    #[test]
    fn invalid_path_test() {
        let err = parse("jbosscli://localhost:9999/subsystem=web:x/attr").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert!(err.to_string().contains("invalid JBoss CLI path \"/subsystem=web:x/attr\""));
        let err = parse("jbosscli://localhost:9999/1subsystem=web/attr").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn invalid_address_test() {
        let err = parse("jbosscli://admin@localhost:abc/subsystem=web/attr").unwrap_err();
        assert!(matches!(err, Error::InvalidAddress { .. }));
    }
}
