//! The reference (ERE) annotation model.
//!
//! A [`ReferenceDocument`] owns its entities, fillers and events; entities
//! own their mentions. Nothing points back up the tree: the owning entity of
//! a mention is found through a lookup table the document keeps.

use std::collections::HashMap;

use crate::{AlignError, AlignResult, OffsetRange};

/// A single mention of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EntityMention {
    pub id: String,
    /// NAM, NOM or PRO in ERE.
    #[serde(default)]
    pub mention_type: String,
    pub extent: OffsetRange,
    /// Present only if the annotators marked one.
    #[serde(default)]
    pub head: Option<OffsetRange>,
}

impl EntityMention {
    pub fn new(id: impl Into<String>, extent: OffsetRange, head: Option<OffsetRange>) -> Self {
        Self {
            id: id.into(),
            mention_type: String::new(),
            extent,
            head,
        }
    }

    pub fn with_mention_type(mut self, mention_type: impl Into<String>) -> Self {
        self.mention_type = mention_type.into();
        self
    }
}

/// A coreference chain of mentions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub entity_type: String,
    pub mentions: Vec<EntityMention>,
}

impl Entity {
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>, mentions: Vec<EntityMention>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            mentions,
        }
    }
}

/// A standalone annotation (time, value, crime, ...) that belongs to no entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Filler {
    pub id: String,
    #[serde(default)]
    pub filler_type: String,
    pub extent: OffsetRange,
}

impl Filler {
    pub fn new(id: impl Into<String>, filler_type: impl Into<String>, extent: OffsetRange) -> Self {
        Self {
            id: id.into(),
            filler_type: filler_type.into(),
            extent,
        }
    }
}

/// An event argument filled by an entity mention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EntityArgument {
    pub role: String,
    #[serde(default)]
    pub realis: String,
    pub entity_id: String,
    pub mention_id: String,
}

/// An event argument filled by a [`Filler`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FillerArgument {
    pub role: String,
    #[serde(default)]
    pub realis: String,
    pub filler: Filler,
}

/// Event arguments come in two shapes; alignment treats them differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Argument {
    Entity(EntityArgument),
    Filler(FillerArgument),
}

impl Argument {
    pub fn role(&self) -> &str {
        match self {
            Argument::Entity(arg) => &arg.role,
            Argument::Filler(arg) => &arg.role,
        }
    }

    pub fn as_filler(&self) -> Option<&FillerArgument> {
        match self {
            Argument::Filler(arg) => Some(arg),
            Argument::Entity(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EventMention {
    pub id: String,
    pub event_type: String,
    #[serde(default)]
    pub realis: String,
    #[serde(default)]
    pub trigger: Option<OffsetRange>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Event {
    pub id: String,
    pub event_mentions: Vec<EventMention>,
}

/// Serialized shape of a reference document; the mention table is derived.
#[derive(serde::Serialize, serde::Deserialize)]
struct ReferenceDocumentData {
    doc_id: String,
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    fillers: Vec<Filler>,
    #[serde(default)]
    events: Vec<Event>,
}

/// One document's reference annotation. Read-only once built.
#[derive(Debug, Clone)]
pub struct ReferenceDocument {
    doc_id: String,
    entities: Vec<Entity>,
    fillers: Vec<Filler>,
    events: Vec<Event>,
    /// mention id -> index into `entities`
    mention_to_entity: HashMap<String, usize>,
}

impl ReferenceDocument {
    /// Assemble a document and its mention back-reference table.
    ///
    /// Fails if two mentions share an id. Range well-formedness is checked
    /// separately by [`ReferenceDocument::validate`], which every aligner
    /// runs when it builds its indexes.
    pub fn new(
        doc_id: impl Into<String>,
        entities: Vec<Entity>,
        fillers: Vec<Filler>,
        events: Vec<Event>,
    ) -> AlignResult<Self> {
        let mut mention_to_entity = HashMap::new();
        for (entity_idx, entity) in entities.iter().enumerate() {
            for mention in &entity.mentions {
                if mention_to_entity
                    .insert(mention.id.clone(), entity_idx)
                    .is_some()
                {
                    return Err(AlignError::DuplicateMention {
                        mention: mention.id.clone(),
                    });
                }
            }
        }
        Ok(Self {
            doc_id: doc_id.into(),
            entities,
            fillers,
            events,
            mention_to_entity,
        })
    }

    /// Read a document written in RON.
    pub fn from_ron_str(s: &str) -> AlignResult<Self> {
        let data: ReferenceDocumentData = ron::from_str(s).map_err(|e| AlignError::Data {
            message: format!("reference document: {}", e),
        })?;
        Self::new(data.doc_id, data.entities, data.fillers, data.events)
    }

    pub fn to_ron_string(&self) -> AlignResult<String> {
        let data = ReferenceDocumentData {
            doc_id: self.doc_id.clone(),
            entities: self.entities.clone(),
            fillers: self.fillers.clone(),
            events: self.events.clone(),
        };
        ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::new()).map_err(|e| {
            AlignError::Data {
                message: e.to_string(),
            }
        })
    }

    /// Check the annotation invariants: every range has start <= end and
    /// every declared head lies inside its mention's extent.
    pub fn validate(&self) -> AlignResult<()> {
        for mention in self.mentions() {
            mention.extent.validate()?;
            if let Some(head) = mention.head {
                head.validate()?;
                if !mention.extent.encloses(&head) {
                    return Err(AlignError::HeadOutsideExtent {
                        mention: mention.id.clone(),
                        head,
                        extent: mention.extent,
                    });
                }
            }
        }
        for filler in &self.fillers {
            filler.extent.validate()?;
        }
        for arg in self.filler_arguments() {
            arg.filler.extent.validate()?;
        }
        Ok(())
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn fillers(&self) -> &[Filler] {
        &self.fillers
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn filler(&self, id: &str) -> Option<&Filler> {
        self.fillers.iter().find(|f| f.id == id)
    }

    pub fn mention(&self, id: &str) -> Option<&EntityMention> {
        let entity = self.entities.get(*self.mention_to_entity.get(id)?)?;
        entity.mentions.iter().find(|m| m.id == id)
    }

    /// All mentions, entity by entity, in annotation order.
    pub fn mentions(&self) -> impl Iterator<Item = &EntityMention> {
        self.entities.iter().flat_map(|e| e.mentions.iter())
    }

    /// The entity owning `mention`, if the mention belongs to this document.
    ///
    /// A mention from elsewhere that merely shares an id with one of ours is
    /// not ours: the owning entity must hold an equal mention under that id.
    pub fn entity_containing(&self, mention: &EntityMention) -> Option<&Entity> {
        let entity = self.entities.get(*self.mention_to_entity.get(&mention.id)?)?;
        if entity.mentions.iter().any(|m| m == mention) {
            Some(entity)
        } else {
            None
        }
    }

    /// Every filler-typed argument of every event mention, in annotation order.
    pub fn filler_arguments(&self) -> impl Iterator<Item = &FillerArgument> {
        self.events
            .iter()
            .flat_map(|e| e.event_mentions.iter())
            .flat_map(|em| em.arguments.iter())
            .filter_map(Argument::as_filler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: usize, end: usize) -> OffsetRange {
        OffsetRange::new(start, end)
    }

    fn sample_document() -> ReferenceDocument {
        let obama = Entity::new(
            "ent-1",
            "PER",
            vec![
                EntityMention::new("m-1", r(0, 12), Some(r(7, 12))),
                EntityMention::new("m-2", r(40, 42), None),
            ],
        );
        let paris = Entity::new("ent-2", "GPE", vec![EntityMention::new("m-3", r(21, 26), None)]);
        let yesterday = Filler::new("f-1", "time", r(27, 36));
        let event = Event {
            id: "ev-1".into(),
            event_mentions: vec![EventMention {
                id: "em-1".into(),
                event_type: "movement.transport-person".into(),
                realis: "actual".into(),
                trigger: Some(r(13, 20)),
                arguments: vec![
                    Argument::Entity(EntityArgument {
                        role: "person".into(),
                        realis: "true".into(),
                        entity_id: "ent-1".into(),
                        mention_id: "m-1".into(),
                    }),
                    Argument::Filler(FillerArgument {
                        role: "time".into(),
                        realis: "true".into(),
                        filler: yesterday.clone(),
                    }),
                ],
            }],
        };
        ReferenceDocument::new("doc-1", vec![obama, paris], vec![yesterday], vec![event]).unwrap()
    }

    #[test]
    fn test_entity_back_reference() {
        let doc = sample_document();
        let mention = doc.mention("m-2").unwrap();
        assert_eq!(doc.entity_containing(mention).unwrap().id, "ent-1");

        let stranger = EntityMention::new("m-99", r(0, 1), None);
        assert!(doc.entity_containing(&stranger).is_none());
    }

    #[test]
    fn test_colliding_mention_id_from_other_document() {
        let doc = sample_document();
        // same id as a mention of ent-1, different annotation
        let impostor = EntityMention::new("m-2", r(50, 55), None);
        assert!(doc.entity_containing(&impostor).is_none());

        let twin = EntityMention::new("m-2", r(40, 42), None);
        assert_eq!(doc.entity_containing(&twin).unwrap().id, "ent-1");
    }

    #[test]
    fn test_malformed_ron_is_data_error() {
        match ReferenceDocument::from_ron_str("(doc_id: 7)") {
            Err(AlignError::Data { message }) => assert!(message.starts_with("reference document")),
            other => panic!("expected data error, got {:?}", other),
        }
    }

    #[test]
    fn test_mentions_in_annotation_order() {
        let doc = sample_document();
        let ids: Vec<_> = doc.mentions().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m-1", "m-2", "m-3"]);
    }

    #[test]
    fn test_filler_arguments_skip_entity_arguments() {
        let doc = sample_document();
        let roles: Vec<_> = doc.filler_arguments().map(|a| a.role.as_str()).collect();
        assert_eq!(roles, vec!["time"]);
    }

    #[test]
    fn test_duplicate_mention_ids_rejected() {
        let entities = vec![
            Entity::new("e1", "PER", vec![EntityMention::new("m", r(0, 2), None)]),
            Entity::new("e2", "PER", vec![EntityMention::new("m", r(5, 7), None)]),
        ];
        let err = ReferenceDocument::new("d", entities, vec![], vec![]).unwrap_err();
        assert_eq!(err, AlignError::DuplicateMention { mention: "m".into() });
    }

    #[test]
    fn test_validate_head_outside_extent() {
        let entities = vec![Entity::new(
            "e1",
            "PER",
            vec![EntityMention::new("m", r(10, 20), Some(r(18, 22)))],
        )];
        let doc = ReferenceDocument::new("d", entities, vec![], vec![]).unwrap();
        match doc.validate() {
            Err(AlignError::HeadOutsideExtent { mention, .. }) => assert_eq!(mention, "m"),
            other => panic!("expected HeadOutsideExtent, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_inverted_filler() {
        let doc = ReferenceDocument::new("d", vec![], vec![Filler::new("f", "time", r(9, 3))], vec![])
            .unwrap();
        assert_eq!(doc.validate(), Err(AlignError::InvertedRange { start: 9, end: 3 }));
    }

    #[test]
    fn test_ron_round_trip() {
        let doc = sample_document();
        let text = doc.to_ron_string().unwrap();
        let reread = ReferenceDocument::from_ron_str(&text).unwrap();
        assert_eq!(reread.doc_id(), "doc-1");
        assert_eq!(reread.entities(), doc.entities());
        assert_eq!(reread.events(), doc.events());
    }
}
