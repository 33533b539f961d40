//! RDF terms and their SPARQL encodings.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// An absolute IRI.
///
/// Characters that cannot appear inside `<...>` (space, `<`, `>`, `"`, `{`,
/// `}`, `|`, `^`, `` ` ``, backslash and controls) are percent-encoded on
/// construction, so every store sees and returns the same IRI text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Iri(String);

impl Iri {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.chars().any(needs_encoding) {
            Self(encode_iri(&value))
        } else {
            Self(value)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the IRI as `<...>`.
    pub fn to_sparql(&self) -> String {
        format!("<{}>", self.0)
    }
}

fn needs_encoding(c: char) -> bool {
    matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | ' ') || c.is_control()
}

fn encode_iri(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if needs_encoding(c) {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(value: Iri) -> Self {
        value.0
    }
}

/// Literal datatypes the lifecycle records use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Datatype {
    String,
    Integer,
    DateTime,
    /// Language-tagged string; holds the tag.
    LangString(String),
    Other(String),
}

impl Datatype {
    pub fn iri(&self) -> &str {
        match self {
            Datatype::String => XSD_STRING,
            Datatype::Integer => XSD_INTEGER,
            Datatype::DateTime => XSD_DATE_TIME,
            Datatype::LangString(_) => RDF_LANG_STRING,
            Datatype::Other(iri) => iri,
        }
    }

    pub fn from_iri(iri: &str) -> Self {
        match iri {
            XSD_STRING => Datatype::String,
            XSD_INTEGER => Datatype::Integer,
            XSD_DATE_TIME => Datatype::DateTime,
            other => Datatype::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub datatype: Datatype,
}

impl Literal {
    pub fn as_i64(&self) -> Option<i64> {
        self.value.trim().parse().ok()
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.value)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn to_sparql(&self) -> String {
        let escaped = escape_literal(&self.value);
        match &self.datatype {
            Datatype::LangString(tag) => format!("\"{}\"@{}", escaped, tag),
            datatype => format!("\"{}\"^^<{}>", escaped, datatype.iri()),
        }
    }
}

/// A node in the graph: IRI, literal or blank node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "JsonTerm", into = "JsonTerm")]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
    BlankNode(String),
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(Iri::new(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: Datatype::String,
        })
    }

    pub fn integer(value: impl Into<i128>) -> Self {
        Term::Literal(Literal {
            value: value.into().to_string(),
            datatype: Datatype::Integer,
        })
    }

    /// An `xsd:dateTime` literal with millisecond precision in UTC.
    pub fn date_time(value: DateTime<Utc>) -> Self {
        Term::Literal(Literal {
            value: value.to_rfc3339_opts(SecondsFormat::Millis, true),
            datatype: Datatype::DateTime,
        })
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// The lexical value, without datatype or brackets.
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri.as_str(),
            Term::Literal(literal) => &literal.value,
            Term::BlankNode(id) => id,
        }
    }

    pub fn to_sparql(&self) -> String {
        match self {
            Term::Iri(iri) => iri.to_sparql(),
            Term::Literal(literal) => literal.to_sparql(),
            Term::BlankNode(id) => format!("_:{}", id),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sparql())
    }
}

impl From<Iri> for Term {
    fn from(value: Iri) -> Self {
        Term::Iri(value)
    }
}

impl From<&Iri> for Term {
    fn from(value: &Iri) -> Self {
        Term::Iri(value.clone())
    }
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Term::Literal(value)
    }
}

/// Term shape shared by SPARQL JSON results and delta notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTerm {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl From<JsonTerm> for Term {
    fn from(term: JsonTerm) -> Self {
        match term.kind.as_str() {
            "uri" => Term::Iri(Iri::new(term.value)),
            "bnode" => Term::BlankNode(term.value),
            _ => {
                let datatype = match (term.lang, term.datatype) {
                    (Some(lang), _) => Datatype::LangString(lang),
                    (None, Some(datatype)) => Datatype::from_iri(&datatype),
                    (None, None) => Datatype::String,
                };
                Term::Literal(Literal {
                    value: term.value,
                    datatype,
                })
            }
        }
    }
}

impl From<Term> for JsonTerm {
    fn from(term: Term) -> Self {
        match term {
            Term::Iri(iri) => JsonTerm {
                kind: "uri".to_string(),
                value: iri.0,
                datatype: None,
                lang: None,
            },
            Term::BlankNode(id) => JsonTerm {
                kind: "bnode".to_string(),
                value: id,
                datatype: None,
                lang: None,
            },
            Term::Literal(literal) => {
                let (datatype, lang) = match literal.datatype {
                    Datatype::String => (None, None),
                    Datatype::LangString(tag) => (None, Some(tag)),
                    other => (Some(other.iri().to_string()), None),
                };
                JsonTerm {
                    kind: "literal".to_string(),
                    value: literal.value,
                    datatype,
                    lang,
                }
            }
        }
    }
}

fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
