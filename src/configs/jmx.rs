use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::configs::address::{MetricSource, Protocol};
use crate::configs::definition::{DefinitionKind, MetricDefinition};
use crate::configs::objectname::ObjectName;
use crate::configs::terms::metric;
use crate::error::{Error, Result};
use crate::utils::utils;

static DOMAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z][\w\-.]*:").unwrap());
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][\w\-.]*$").unwrap());

/// Parses `[jmx://][user:pass@]host[:port]/domain:key=value,.../attribute`.
pub fn parse(s: &str) -> Result<Option<MetricDefinition>> {
    let (committed, rest) = match utils::protocol_commits(s, metric::JMX) {
        Some(result) => result,
        None => {
            debug!("{:?} is not a JMX definition", s);
            return Ok(None)
        }
    };
    let slash = match rest.find('/') {
        Some(slash) => slash,
        None if committed => return Err(Error::MissingPath(s.into())),
        None => return Ok(None)
    };
    let source = match MetricSource::parse(Protocol::Jmx, &rest[..slash]) {
        Ok(source) => source,
        Err(e) if committed => return Err(e),
        Err(e) => {
            debug!("Declining {:?}: {}", s, e);
            return Ok(None)
        }
    };
    let path = &rest[slash + 1..];
    if !DOMAIN.is_match(path) {
        if !committed {
            return Ok(None)
        }
        return Err(Error::InvalidPath {
            kind: "JMX domain",
            path: path.into(),
            definition: s.into()
        })
    }
    let (object_name, attribute) = match path.rfind('/') {
        Some(last) if last + 1 < path.len() => (&path[..last], &path[last + 1..]),
        _ => return Err(Error::MissingAttribute(s.into()))
    };
    if !ATTRIBUTE.is_match(attribute) {
        return Err(Error::InvalidPath {
            kind: "JMX attribute",
            path: path.into(),
            definition: s.into()
        })
    }
    let object_name = ObjectName::parse(object_name).map_err(|e| Error::InvalidObjectName {
        name: object_name.into(),
        source: e
    })?;
    debug!("Parsed JMX definition {:?}", s);
    Ok(Some(MetricDefinition::new(
        DefinitionKind::Jmx {
            object_name,
            attribute: attribute.into()
        },
        source
    )))
}
