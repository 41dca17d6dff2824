use std::fmt;

use crate::error::ObjectNameError;

/// A validated JMX ObjectName: `domain:key=value[,key=value]*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectName {
    domain: Box<str>,
    properties: Vec<(Box<str>, Box<str>)>
}

impl ObjectName {
    pub fn parse(s: &str) -> Result<Self, ObjectNameError> {
        let colon = s.find(':').ok_or(ObjectNameError::MissingDomain)?;
        let domain = &s[..colon];
        if let Some(c) = domain.chars().find(|c| matches!(c, '*' | '?' | '\n' | '=' | ',')) {
            return Err(ObjectNameError::IllegalDomainCharacter(c))
        }
        let key_properties = &s[colon + 1..];
        if key_properties.is_empty() {
            return Err(ObjectNameError::EmptyKeyProperties)
        }
        let mut properties: Vec<(Box<str>, Box<str>)> = Vec::new();
        let mut chars = key_properties.chars().peekable();
        loop {
            let mut key = String::new();
            while let Some(&c) = chars.peek() {
                if c == '=' || c == ',' {
                    break;
                }
                key.push(c);
                chars.next();
            }
            if chars.next() != Some('=') {
                return Err(ObjectNameError::MalformedKeyProperty(key.into()))
            }
            if key.is_empty() || key.chars().any(|c| matches!(c, ':' | '*' | '?' | '\n')) {
                return Err(ObjectNameError::IllegalKey(key.into()))
            }
            let mut value = String::new();
            if chars.peek() == Some(&'"') {
                value.push('"');
                chars.next();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    value.push(c);
                    match c {
                        '\\' => match chars.next() {
                            Some(escaped @ ('\\' | '"' | '*' | '?' | 'n')) => value.push(escaped),
                            _ => return Err(ObjectNameError::IllegalValue(key.into()))
                        },
                        '"' => {
                            closed = true;
                            break;
                        },
                        '\n' => return Err(ObjectNameError::IllegalValue(key.into())),
                        _ => {}
                    }
                }
                if !closed {
                    return Err(ObjectNameError::UnterminatedQuote(key.into()))
                }
                if !matches!(chars.peek(), None | Some(',')) {
                    return Err(ObjectNameError::IllegalValue(key.into()))
                }
            } else {
                while let Some(&c) = chars.peek() {
                    if c == ',' {
                        break;
                    }
                    if matches!(c, '=' | ':' | '"' | '*' | '?' | '\n') {
                        return Err(ObjectNameError::IllegalValue(key.into()))
                    }
                    value.push(c);
                    chars.next();
                }
                if value.is_empty() {
                    return Err(ObjectNameError::IllegalValue(key.into()))
                }
            }
            if properties.iter().any(|(k, _)| **k == *key) {
                return Err(ObjectNameError::DuplicateKey(key.into()))
            }
            properties.push((key.into(), value.into()));
            match chars.next() {
                Some(',') => continue,
                _ => break
            }
        }
        Ok(Self {
            domain: domain.into(),
            properties
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn key_property(&self, key: &str) -> Option<&str> {
        self.properties.iter()
            .find(|(k, _)| &**k == key)
            .map(|(_, v)| &**v)
    }

    /// Domain followed by the key properties sorted by key.
    pub fn canonical_name(&self) -> String {
        let mut properties: Vec<_> = self.properties.iter().collect();
        properties.sort_by(|a, b| a.0.cmp(&b.0));
        let joined: Vec<String> = properties.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}:{}", self.domain, joined.join(","))
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.domain)?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_test() {
        let name = ObjectName::parse("test.domain:service=Test,subService=Test").unwrap();
        assert_eq!(name.domain(), "test.domain");
        assert_eq!(name.key_property("service"), Some("Test"));
        assert_eq!(name.key_property("subService"), Some("Test"));
        assert_eq!(name.key_property("missing"), None);
        assert_eq!(name.to_string(), "test.domain:service=Test,subService=Test");
        assert_eq!(name.canonical_name(), "test.domain:service=Test,subService=Test");
    }

    #[test]
    fn canonical_name_test() {
        let name = ObjectName::parse("java.lang:type=GarbageCollector,name=G1").unwrap();
        assert_eq!(name.canonical_name(), "java.lang:name=G1,type=GarbageCollector");
    }

    #[test]
    fn quoted_value_test() {
        let name = ObjectName::parse("d:name=\"a,b=c\\\"\",type=x").unwrap();
        assert_eq!(name.key_property("name"), Some("\"a,b=c\\\"\""));
        assert_eq!(name.key_property("type"), Some("x"));
        assert_eq!(
            ObjectName::parse("d:name=\"abc"),
            Err(ObjectNameError::UnterminatedQuote("name".into()))
        );
        assert_eq!(
            ObjectName::parse("d:name=\"a\\b\""),
            Err(ObjectNameError::IllegalValue("name".into()))
        );
    }

    #[test]
    fn invalid_test() {
        assert_eq!(ObjectName::parse("nodomain"), Err(ObjectNameError::MissingDomain));
        assert_eq!(ObjectName::parse("d:"), Err(ObjectNameError::EmptyKeyProperties));
        assert_eq!(ObjectName::parse("d:a"), Err(ObjectNameError::MalformedKeyProperty("a".into())));
        assert_eq!(ObjectName::parse("d:a=1,a=2"), Err(ObjectNameError::DuplicateKey("a".into())));
        assert_eq!(ObjectName::parse("d:=1"), Err(ObjectNameError::IllegalKey("".into())));
        assert_eq!(ObjectName::parse("d:a="), Err(ObjectNameError::IllegalValue("a".into())));
        assert_eq!(ObjectName::parse("d:a=1,"), Err(ObjectNameError::MalformedKeyProperty("".into())));
        assert_eq!(ObjectName::parse("d*:a=1"), Err(ObjectNameError::IllegalDomainCharacter('*')));
        assert_eq!(ObjectName::parse("d:a=b:c"), Err(ObjectNameError::IllegalValue("a".into())));
    }
}
