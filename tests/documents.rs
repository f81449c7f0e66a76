//! Whole-document scenarios run through the preprocessor.

use argdown::argdown::model::{MetaValue, Range, RangeKind, Role};
use argdown::argdown::testing::*;
use argdown::argdown::NodeData;
use argdown::{analyze, analyze_json, ArgdownModel};

/// Every claim occurrence is a member of exactly one class keyed by its title;
/// every other occurrence is the description of exactly one argument.
fn assert_occurrences_are_owned(model: &ArgdownModel) {
    for (id, statement) in model.occurrences.iter().enumerate() {
        let classes: Vec<_> = model
            .statements
            .iter()
            .filter(|(_, ec)| ec.members.contains(&id))
            .collect();
        let descriptions = model
            .arguments
            .values()
            .filter(|argument| argument.descriptions.contains(&id))
            .count();

        match classes.as_slice() {
            [(title, _)] => {
                assert_eq!(descriptions, 0, "statement {} owned twice", id);
                assert_eq!(statement.title.as_deref(), Some(title.as_str()));
            }
            [] => assert_eq!(descriptions, 1, "statement {} has no owner", id),
            _ => panic!("statement {} is in {} classes", id, classes.len()),
        }
    }
}

#[test]
fn argument_definition_continued_across_blank_line() {
    // <A>: desc
    //
    // (1) p
    // (2) q
    // -- inf --
    // (3) r
    let tree = document(vec![
        argument_definition("<A>:", vec![text("desc")]),
        empty_line(),
        reconstruction(vec![
            premise(1, "p"),
            premise(2, "q"),
            inference(vec!["inf"], vec![]),
            premise(3, "r"),
        ]),
    ]);
    let analysis = analyze(&tree);
    let model = &analysis.model;

    assert_eq!(model.arguments.len(), 1);
    let descriptions = model.descriptions("A");
    assert!(descriptions.iter().any(|statement| statement.text == "desc"));

    let pcs = model.pcs("A");
    let texts: Vec<_> = pcs.iter().map(|statement| statement.text.as_str()).collect();
    assert_eq!(texts, vec!["p", "q", "r"]);
    assert_eq!(pcs[0].role, Role::Premise);
    assert_eq!(pcs[1].role, Role::Premise);
    assert_eq!(pcs[2].role, Role::Conclusion);
    assert!(pcs[0].inference.is_none());

    let inference = pcs[2].inference.as_ref().expect("conclusion has inference");
    assert!(inference.inference_rules.contains(&"inf".to_string()));

    let numbers: Vec<_> = analysis
        .annotations
        .iter()
        .filter_map(|(_, data)| match data {
            NodeData::ArgumentStatement { number, .. } => Some(*number),
            _ => None,
        })
        .collect();
    let mut sorted = numbers.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![1, 2, 3]);

    assert_occurrences_are_owned(model);
}

#[test]
fn bare_reconstruction_creates_anonymous_argument() {
    let tree = document(vec![reconstruction(vec![
        premise(1, "p"),
        premise(2, "q"),
        inference(vec!["inf"], vec![]),
        premise(3, "r"),
    ])]);
    let model = analyze(&tree).model;

    assert_eq!(model.arguments.keys().collect::<Vec<_>>(), vec!["Untitled 1"]);
    let texts: Vec<_> = model
        .pcs("Untitled 1")
        .iter()
        .map(|statement| statement.text.clone())
        .collect();
    assert_eq!(texts, vec!["p", "q", "r"]);

    // Premises were titled after the argument itself.
    let titles: Vec<_> = model.statements.keys().cloned().collect();
    assert_eq!(titles, vec!["Untitled 2", "Untitled 3", "Untitled 4"]);
    assert!(model
        .statements
        .values()
        .all(|ec| ec.is_used_in_argument && !ec.is_used_as_thesis));
    assert_occurrences_are_owned(&model);
}

#[test]
fn link_appends_text_and_one_trailing_space() {
    let tree = document(vec![statement(vec![link("[See here](http://x.io) ")])]);
    let analysis = analyze(&tree);
    let statement = &analysis.model.occurrences[0];

    assert_eq!(statement.text, "See here ");
    assert_eq!(
        statement.ranges,
        vec![Range::new(
            RangeKind::Link {
                url: "http://x.io".to_string()
            },
            0,
            7
        )]
    );
    assert!(analysis.annotations.iter().any(|(_, data)| matches!(
        data,
        NodeData::Link {
            trailing_whitespace: true,
            ..
        }
    )));
}

#[test]
fn statement_mention_keeps_raw_image() {
    let tree = document(vec![statement(vec![
        text("As "),
        statement_mention("@[Claim] "),
        text("says"),
    ])]);
    let model = analyze(&tree).model;
    let statement = &model.occurrences[0];

    assert_eq!(statement.text, "As @[Claim] says");
    assert_eq!(statement.ranges.len(), 1);
    let range = &statement.ranges[0];
    assert_eq!(
        range.kind,
        RangeKind::StatementMention {
            title: "Claim".to_string()
        }
    );
    assert_eq!(&statement.text[range.start..=range.stop], "@[Claim] ");

    // A mention is not a reference: no class is created for it.
    assert!(!model.statements.contains_key("Claim"));
}

#[test]
fn repeated_metadata_key_keeps_later_value() {
    let tree = document(vec![reconstruction(vec![
        premise(1, "p"),
        inference(
            vec![],
            vec![metadata(&["uses", "1"]), metadata(&["uses", "2"])],
        ),
        premise(2, "c"),
    ])]);
    let model = analyze(&tree).model;

    let conclusion = model.pcs("Untitled 1")[1];
    let inference = conclusion.inference.as_ref().expect("inference");
    assert_eq!(inference.meta_data.len(), 1);
    assert_eq!(inference.meta_data["uses"], MetaValue::Scalar("2".to_string()));
    assert!(inference.inference_rules.is_empty());
}

#[test]
fn thesis_and_premise_occurrences_share_a_class() {
    // [T]: thesis text
    //
    // (1) [T]
    // --
    // (2) conclusion
    let tree = document(vec![
        statement(vec![statement_definition("[T]:"), text(" thesis text")]),
        empty_line(),
        reconstruction(vec![
            argument_statement(1, statement(vec![statement_reference("[T]")])),
            inference(vec![], vec![]),
            premise(2, "conclusion"),
        ]),
    ]);
    let model = analyze(&tree).model;

    let ec = model.equivalence_class("T").expect("class for T");
    assert_eq!(ec.members.len(), 2);
    assert!(ec.is_used_as_thesis);
    assert!(ec.is_used_in_argument);
    let roles: Vec<_> = model.members("T").iter().map(|s| s.role).collect();
    assert_eq!(roles, vec![Role::Thesis, Role::Premise]);
    assert_occurrences_are_owned(&model);
}

#[test]
fn formatting_inside_argument_description() {
    let tree = document(vec![argument_definition(
        "<A>:",
        vec![text("a "), bold(vec![text("strong")], "** "), text("claim")],
    )]);
    let model = analyze(&tree).model;

    let description = model.descriptions("A")[0];
    assert_eq!(description.text, "a strong claim");
    assert_eq!(description.ranges, vec![Range::new(RangeKind::Bold, 2, 7)]);
}

#[test]
fn json_tree_round_trip_into_model() {
    let json = r#"{
        "kind": "documentRoot",
        "children": [
            {"kind": "statement", "children": [
                {"kind": "statementDefinition", "image": "[A]:"},
                {"kind": "freestyleText", "image": " from json"}
            ]}
        ]
    }"#;
    let analysis = analyze_json(json).expect("valid json tree");
    let members = analysis.model.members("A");
    assert_eq!(members[0].text, " from json");

    let serialized = serde_json::to_value(&analysis.model).expect("serializable model");
    assert_eq!(serialized["statements"]["A"]["isUsedAsThesis"], true);
    assert_eq!(serialized["occurrences"][0]["role"], "thesis");
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(
        analyze_json("{"),
        Err(argdown::Error::Json(_))
    ));
}
