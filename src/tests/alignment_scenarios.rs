use crate::{
    AlignmentDisplay, Argument, AuxiliaryHeadResolver, Entity, EntityArgument, EntityMention,
    Event, EventMention, Filler, FillerArgument, MatchPolicy, MatchRule, OffsetRange, ParseTree,
    ParsedDocument, ParsedSentence, ReferenceAligner, ReferenceDocument, SystemResponse,
};

const TEXT: &str = "The former president of France visited Berlin on Monday .";

fn r(start: usize, end: usize) -> OffsetRange {
    OffsetRange::new(start, end)
}

fn reference() -> ReferenceDocument {
    let monday = Filler::new("f-1", "time", r(49, 55));
    let event = Event {
        id: "ev-1".into(),
        event_mentions: vec![EventMention {
            id: "em-1".into(),
            event_type: "movement.transport-person".into(),
            realis: "actual".into(),
            trigger: Some(r(31, 38)),
            arguments: vec![
                Argument::Entity(EntityArgument {
                    role: "person".into(),
                    realis: "true".into(),
                    entity_id: "ent-1".into(),
                    mention_id: "m-1".into(),
                }),
                Argument::Entity(EntityArgument {
                    role: "destination".into(),
                    realis: "true".into(),
                    entity_id: "ent-3".into(),
                    mention_id: "m-3".into(),
                }),
                Argument::Filler(FillerArgument {
                    role: "time".into(),
                    realis: "true".into(),
                    filler: monday.clone(),
                }),
            ],
        }],
    };
    ReferenceDocument::new(
        "doc-1",
        vec![
            Entity::new(
                "ent-1",
                "PER",
                vec![EntityMention::new("m-1", r(0, 30), Some(r(11, 20))).with_mention_type("NOM")],
            ),
            Entity::new(
                "ent-2",
                "GPE",
                vec![EntityMention::new("m-2", r(24, 30), Some(r(24, 30))).with_mention_type("NAM")],
            ),
            Entity::new(
                "ent-3",
                "GPE",
                vec![EntityMention::new("m-3", r(39, 45), None).with_mention_type("NAM")],
            ),
        ],
        vec![monday],
        vec![event],
    )
    .unwrap()
}

fn node(label: &str, head: usize, children: Vec<ParseTree>) -> ParseTree {
    ParseTree::node(label, Some(head), children).unwrap()
}

fn np(children: Vec<ParseTree>) -> ParseTree {
    node("NP", 0, children)
}

fn parse() -> ParsedDocument {
    let subject = np(vec![
        node(
            "NP",
            2,
            vec![
                ParseTree::leaf("DT", r(0, 3)),
                ParseTree::leaf("JJ", r(4, 10)),
                ParseTree::leaf("NN", r(11, 20)),
            ],
        ),
        node(
            "PP",
            0,
            vec![ParseTree::leaf("IN", r(21, 23)), np(vec![ParseTree::leaf("NNP", r(24, 30))])],
        ),
    ]);
    let object = np(vec![
        np(vec![ParseTree::leaf("NNP", r(39, 45))]),
        node(
            "PP",
            0,
            vec![ParseTree::leaf("IN", r(46, 48)), np(vec![ParseTree::leaf("NNP", r(49, 55))])],
        ),
    ]);
    let verb_phrase = node("VP", 0, vec![ParseTree::leaf("VBD", r(31, 38)), object]);
    ParsedDocument::new(vec![ParsedSentence::new(node(
        "S",
        1,
        vec![subject, verb_phrase, ParseTree::leaf(".", r(56, 57))],
    ))])
}

fn aligned(aligner: &ReferenceAligner<'_>, span: OffsetRange) -> Vec<(String, MatchRule)> {
    aligner
        .mention_alignments(&SystemResponse::new("resp", "doc-1", span))
        .into_iter()
        .map(|a| (a.mention.id.clone(), a.rule))
        .collect()
}

fn hit(id: &str, rule: MatchRule) -> (String, MatchRule) {
    (id.to_string(), rule)
}

#[test]
fn exact_policy() {
    let doc = reference();
    let aligner = ReferenceAligner::new(&doc, None, MatchPolicy::exact()).unwrap();

    assert_eq!(aligned(&aligner, r(0, 30)), vec![hit("m-1", MatchRule::ExactExtent)]);
    assert_eq!(aligned(&aligner, r(11, 20)), vec![hit("m-1", MatchRule::ExactHead)]);
    assert_eq!(aligned(&aligner, r(24, 30)), vec![hit("m-2", MatchRule::ExactExtent)]);
    assert!(aligned(&aligner, r(4, 20)).is_empty());
    assert!(aligned(&aligner, r(39, 55)).is_empty());
}

#[test]
fn contained_policy() {
    let doc = reference();
    let aligner = ReferenceAligner::new(&doc, None, MatchPolicy::contained()).unwrap();

    assert_eq!(aligned(&aligner, r(4, 20)), vec![hit("m-1", MatchRule::ExtentContainment)]);
    // "France" is its own mention and also sits inside the subject
    assert_eq!(
        aligned(&aligner, r(24, 30)),
        vec![hit("m-1", MatchRule::ExtentContainment), hit("m-2", MatchRule::ExactExtent)]
    );
    let entities: Vec<_> = aligner
        .entities_for_response(&SystemResponse::new("resp", "doc-1", r(24, 30)))
        .into_iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(entities, vec!["ent-1", "ent-2"]);
    assert!(aligned(&aligner, r(39, 55)).is_empty());
}

#[test]
fn relaxed_policy() {
    let doc = reference();
    let parse = parse();
    let aligner =
        ReferenceAligner::new(&doc, Some(AuxiliaryHeadResolver::new(&parse)), MatchPolicy::relaxed())
            .unwrap();

    assert_eq!(aligned(&aligner, r(0, 30)), vec![hit("m-1", MatchRule::ExactExtent)]);
    assert_eq!(aligned(&aligner, r(4, 20)), vec![hit("m-1", MatchRule::ExtentContainment)]);
    // "Berlin on Monday" is headed by "Berlin"
    assert_eq!(aligned(&aligner, r(39, 55)), vec![hit("m-3", MatchRule::AuxiliaryHeadExact)]);
}

#[test]
fn auxiliary_exact_policy() {
    let doc = reference();
    let parse = parse();
    let aligner = ReferenceAligner::new(
        &doc,
        Some(AuxiliaryHeadResolver::new(&parse)),
        MatchPolicy::auxiliary_exact(),
    )
    .unwrap();

    assert!(aligned(&aligner, r(4, 20)).is_empty());
    assert_eq!(aligned(&aligner, r(24, 30)), vec![hit("m-2", MatchRule::ExactExtent)]);
    assert_eq!(aligned(&aligner, r(39, 55)), vec![hit("m-3", MatchRule::AuxiliaryHeadExact)]);
}

#[test]
fn filler_arguments() {
    let doc = reference();
    let parse = parse();
    let aligner =
        ReferenceAligner::new(&doc, Some(AuxiliaryHeadResolver::new(&parse)), MatchPolicy::relaxed())
            .unwrap();

    let fillers = aligner.fillers_for_response(&SystemResponse::new("resp", "doc-1", r(49, 55)));
    assert_eq!(fillers.len(), 1);
    assert_eq!(fillers[0].role, "time");
    // "on Monday" is headed by the preposition
    assert!(aligner
        .fillers_for_response(&SystemResponse::new("resp", "doc-1", r(46, 55)))
        .is_empty());
}

#[test]
fn policy_from_toml() {
    let doc = reference();
    let parse = parse();
    let policy = MatchPolicy::from_toml_str(
        r#"
        [alignment]
        use_auxiliary_relaxation = true
        exact_head_only_for_auxiliary = true
        "#,
    )
    .unwrap();
    let aligner = ReferenceAligner::new(&doc, Some(AuxiliaryHeadResolver::new(&parse)), policy).unwrap();
    assert_eq!(aligner.policy(), MatchPolicy::auxiliary_exact());
    assert!(aligned(&aligner, r(4, 20)).is_empty());
}

#[test]
fn reference_from_ron() {
    let doc = ReferenceDocument::from_ron_str(
        r#"(
            doc_id: "doc-1",
            entities: [
                (
                    id: "ent-1",
                    entity_type: "PER",
                    mentions: [
                        (id: "m-1", extent: (start: 0, end: 30), head: Some((start: 11, end: 20))),
                    ],
                ),
            ],
        )"#,
    )
    .unwrap();
    let aligner = ReferenceAligner::new(&doc, None, MatchPolicy::exact()).unwrap();
    assert_eq!(aligned(&aligner, r(11, 20)), vec![hit("m-1", MatchRule::ExactHead)]);
}

#[test]
fn display_relaxed_alignment() {
    let doc = reference();
    let parse = parse();
    let aligner =
        ReferenceAligner::new(&doc, Some(AuxiliaryHeadResolver::new(&parse)), MatchPolicy::relaxed())
            .unwrap();
    let response = SystemResponse::new("resp-7", "doc-1", r(39, 55));

    let mut display = AlignmentDisplay::new(TEXT).with_window(r(31, 57));
    display
        .include_response(&response)
        .include_mentions(&aligner.mention_alignments(&response))
        .include_fillers(&aligner.filler_alignments(&response));

    insta::assert_snapshot!(display, @r###"
    visited Berlin on Monday .
            ╰──────────────╯System(resp-7)
            ╰────╯AuxiliaryHeadExact(m-3)
    "###);
}
