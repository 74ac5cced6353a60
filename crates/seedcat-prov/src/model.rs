//! PROV-JSON document model.
//!
//! Only what the graph needs is kept: element identifiers with their kind, and relations
//! with their two endpoints. Attributes are read past and dropped.

use serde_json::{Map, Value};

use crate::error::{ProvError, ProvResult};

/// Kind of a PROV element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `entity` section.
    Entity,
    /// `activity` section.
    Activity,
    /// `agent` section.
    Agent,
}

impl ElementKind {
    /// Every element kind, in document order.
    pub const ALL: [Self; 3] = [Self::Entity, Self::Activity, Self::Agent];

    /// PROV-JSON section name.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Activity => "activity",
            Self::Agent => "agent",
        }
    }
}

/// Kind of a PROV relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Entity generated by an activity.
    Generation,
    /// Activity used an entity.
    Usage,
    /// Activity informed by another activity.
    Communication,
    /// Activity started by a trigger entity.
    Start,
    /// Activity ended by a trigger entity.
    End,
    /// Entity invalidated by an activity.
    Invalidation,
    /// Entity derived from another entity.
    Derivation,
    /// Entity attributed to an agent.
    Attribution,
    /// Activity associated with an agent.
    Association,
    /// Agent acting on behalf of another agent.
    Delegation,
    /// Generic influence.
    Influence,
    /// Two entities presenting aspects of the same thing.
    Alternate,
    /// Entity specializing another.
    Specialization,
    /// Entity mentioning another within a bundle.
    Mention,
    /// Collection membership.
    Membership,
}

impl RelationKind {
    /// Every relation kind, in document order.
    pub const ALL: [Self; 15] = [
        Self::Generation,
        Self::Usage,
        Self::Communication,
        Self::Start,
        Self::End,
        Self::Invalidation,
        Self::Derivation,
        Self::Attribution,
        Self::Association,
        Self::Delegation,
        Self::Influence,
        Self::Alternate,
        Self::Specialization,
        Self::Mention,
        Self::Membership,
    ];

    /// PROV-JSON section name, also used as the edge label.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Generation => "wasGeneratedBy",
            Self::Usage => "used",
            Self::Communication => "wasInformedBy",
            Self::Start => "wasStartedBy",
            Self::End => "wasEndedBy",
            Self::Invalidation => "wasInvalidatedBy",
            Self::Derivation => "wasDerivedFrom",
            Self::Attribution => "wasAttributedTo",
            Self::Association => "wasAssociatedWith",
            Self::Delegation => "actedOnBehalfOf",
            Self::Influence => "wasInfluencedBy",
            Self::Alternate => "alternateOf",
            Self::Specialization => "specializationOf",
            Self::Mention => "mentionOf",
            Self::Membership => "hadMember",
        }
    }

    /// Attribute names of the (source, target) endpoints.
    #[must_use]
    pub const fn endpoints(self) -> (&'static str, &'static str) {
        match self {
            Self::Generation | Self::Invalidation => ("prov:entity", "prov:activity"),
            Self::Usage => ("prov:activity", "prov:entity"),
            Self::Communication => ("prov:informed", "prov:informant"),
            Self::Start | Self::End => ("prov:activity", "prov:trigger"),
            Self::Derivation => ("prov:generatedEntity", "prov:usedEntity"),
            Self::Attribution => ("prov:entity", "prov:agent"),
            Self::Association => ("prov:activity", "prov:agent"),
            Self::Delegation => ("prov:delegate", "prov:responsible"),
            Self::Influence => ("prov:influencee", "prov:influencer"),
            Self::Alternate => ("prov:alternate1", "prov:alternate2"),
            Self::Specialization | Self::Mention => {
                ("prov:specificEntity", "prov:generalEntity")
            }
            Self::Membership => ("prov:collection", "prov:entity"),
        }
    }

    /// Whether the target endpoint may be absent.
    #[must_use]
    pub const fn target_optional(self) -> bool {
        matches!(
            self,
            Self::Generation
                | Self::Usage
                | Self::Start
                | Self::End
                | Self::Invalidation
                | Self::Association
        )
    }
}

/// A declared element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified identifier, e.g. `ex:article`.
    pub id: String,
    /// Element kind.
    pub kind: ElementKind,
}

/// A relation between two identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Record identifier, often a blank `_:id`.
    pub id: String,
    /// Relation kind.
    pub kind: RelationKind,
    /// Source endpoint identifier.
    pub source: String,
    /// Target endpoint identifier, when present.
    pub target: Option<String>,
}

/// Parsed PROV-JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvDocument {
    /// Elements in section then key order.
    pub elements: Vec<Element>,
    /// Relations in section then key order.
    pub relations: Vec<Relation>,
}

impl ProvDocument {
    /// Parse a PROV-JSON document from text.
    ///
    /// # Errors
    ///
    /// Returns [`ProvError::Json`] for invalid JSON and [`ProvError::Parse`] when the
    /// value does not have the PROV-JSON shape.
    pub fn from_json(text: &str) -> ProvResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| ProvError::Json { source })?;
        Self::from_value(&value)
    }

    /// Parse a PROV-JSON document from an already decoded value.
    ///
    /// Sections other than elements and relations (`prefix`, `bundle`, extensions) are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ProvError::Parse`] when the value does not have the PROV-JSON shape.
    pub fn from_value(value: &Value) -> ProvResult<Self> {
        let document = value
            .as_object()
            .ok_or_else(|| ProvError::parse("document", None, "not_an_object"))?;

        let mut parsed = Self::default();
        for kind in ElementKind::ALL {
            for (id, _record) in records(document, kind.section())? {
                parsed.elements.push(Element {
                    id: id.to_string(),
                    kind,
                });
            }
        }
        for kind in RelationKind::ALL {
            for (id, record) in records(document, kind.section())? {
                parsed.relations.push(parse_relation(kind, id, record)?);
            }
        }
        Ok(parsed)
    }

    /// Whether the document declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.relations.is_empty()
    }
}

// A section maps identifiers to one record or to an array of records sharing the id.
fn records<'a>(
    document: &'a Map<String, Value>,
    section: &'static str,
) -> ProvResult<Vec<(&'a str, &'a Map<String, Value>)>> {
    let Some(value) = document.get(section) else {
        return Ok(Vec::new());
    };
    let entries = value
        .as_object()
        .ok_or_else(|| ProvError::parse(section, None, "section_not_an_object"))?;

    let mut records = Vec::with_capacity(entries.len());
    for (id, value) in entries {
        match value {
            Value::Object(record) => records.push((id.as_str(), record)),
            Value::Array(items) => {
                for item in items {
                    let record = item.as_object().ok_or_else(|| {
                        ProvError::parse(section, Some(id), "record_not_an_object")
                    })?;
                    records.push((id.as_str(), record));
                }
            }
            _ => return Err(ProvError::parse(section, Some(id), "record_not_an_object")),
        }
    }
    Ok(records)
}

fn parse_relation(
    kind: RelationKind,
    id: &str,
    record: &Map<String, Value>,
) -> ProvResult<Relation> {
    let section = kind.section();
    let (source_attr, target_attr) = kind.endpoints();

    let source = endpoint(section, id, record, source_attr)?
        .ok_or_else(|| ProvError::parse(section, Some(id), "missing_endpoint"))?;
    let target = endpoint(section, id, record, target_attr)?;
    if target.is_none() && !kind.target_optional() {
        return Err(ProvError::parse(section, Some(id), "missing_endpoint"));
    }

    Ok(Relation {
        id: id.to_string(),
        kind,
        source,
        target,
    })
}

fn endpoint(
    section: &str,
    id: &str,
    record: &Map<String, Value>,
    attribute: &str,
) -> ProvResult<Option<String>> {
    match record.get(attribute) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) if !value.trim().is_empty() => Ok(Some(value.clone())),
        Some(_) => Err(ProvError::parse(section, Some(id), "invalid_endpoint")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_elements_and_relations() -> ProvResult<()> {
        let document = ProvDocument::from_value(&json!({
            "prefix": {"ex": "http://example.org/"},
            "entity": {"ex:article": {"prov:label": "Article"}, "ex:dataset": {}},
            "activity": {"ex:compose": {}},
            "agent": {"ex:alice": {"prov:type": "prov:Person"}},
            "wasGeneratedBy": {
                "_:g1": {"prov:entity": "ex:article", "prov:activity": "ex:compose"}
            },
            "used": {"_:u1": {"prov:activity": "ex:compose", "prov:entity": "ex:dataset"}},
            "wasAttributedTo": {"_:a1": {"prov:entity": "ex:article", "prov:agent": "ex:alice"}}
        }))?;

        let ids: Vec<(&str, ElementKind)> = document
            .elements
            .iter()
            .map(|element| (element.id.as_str(), element.kind))
            .collect();
        assert_eq!(
            ids,
            [
                ("ex:article", ElementKind::Entity),
                ("ex:dataset", ElementKind::Entity),
                ("ex:compose", ElementKind::Activity),
                ("ex:alice", ElementKind::Agent),
            ]
        );
        assert_eq!(document.relations.len(), 3);
        assert_eq!(
            document.relations[0],
            Relation {
                id: "_:g1".to_string(),
                kind: RelationKind::Generation,
                source: "ex:article".to_string(),
                target: Some("ex:compose".to_string()),
            }
        );
        Ok(())
    }

    #[test]
    fn records_may_be_arrays() -> ProvResult<()> {
        let document = ProvDocument::from_value(&json!({
            "entity": {"ex:e": [{}, {"ex:version": 2}]},
            "wasDerivedFrom": {
                "_:d": [
                    {"prov:generatedEntity": "ex:e", "prov:usedEntity": "ex:a"},
                    {"prov:generatedEntity": "ex:e", "prov:usedEntity": "ex:b"}
                ]
            }
        }))?;
        assert_eq!(document.elements.len(), 2);
        assert_eq!(document.relations.len(), 2);
        Ok(())
    }

    #[test]
    fn optional_targets_may_be_absent() -> ProvResult<()> {
        let document = ProvDocument::from_value(&json!({
            "wasGeneratedBy": {"_:g": {"prov:entity": "ex:e"}}
        }))?;
        assert_eq!(document.relations[0].target, None);
        Ok(())
    }

    #[test]
    fn empty_object_is_an_empty_document() -> ProvResult<()> {
        assert!(ProvDocument::from_json("{}")?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_malformed_shapes() {
        let cases = [
            (json!([]), "document", "not_an_object"),
            (json!({"entity": []}), "entity", "section_not_an_object"),
            (json!({"entity": {"ex:e": 3}}), "entity", "record_not_an_object"),
            (
                json!({"used": {"_:u": {"prov:entity": "ex:e"}}}),
                "used",
                "missing_endpoint",
            ),
            (
                json!({"wasDerivedFrom": {"_:d": {"prov:generatedEntity": "ex:e"}}}),
                "wasDerivedFrom",
                "missing_endpoint",
            ),
            (
                json!({"wasAttributedTo": {"_:a": {"prov:entity": 7, "prov:agent": "ex:x"}}}),
                "wasAttributedTo",
                "invalid_endpoint",
            ),
        ];
        for (value, expected_section, expected_reason) in cases {
            match ProvDocument::from_value(&value) {
                Err(ProvError::Parse {
                    section, reason, ..
                }) => {
                    assert_eq!(section, expected_section);
                    assert_eq!(reason, expected_reason);
                }
                other => panic!("expected parse error for {value}, got {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            ProvDocument::from_json("{not json"),
            Err(ProvError::Json { .. })
        ));
    }
}
