//! Scenario filtering and extraction from parsed feature documents.

use gherkin::{Feature, Scenario};

use super::types::{OptionTag, ScenarioRecord, MANUAL_TAG};

/// Extract the walkthrough records for `target` from one parsed feature,
/// in document order.
pub fn extract_scenarios(feature: &Feature, target: OptionTag) -> Vec<ScenarioRecord> {
    // The feature's canonical classification tag is the LAST tag on the
    // feature line, by corpus convention.
    let feature_tag = feature.tags.last().cloned().unwrap_or_default();

    feature
        .scenarios
        .iter()
        .filter(|scenario| is_selected(scenario, target))
        .map(|scenario| ScenarioRecord {
            name: scenario.name.clone(),
            feature_name: feature.name.clone(),
            feature_tag: feature_tag.clone(),
            option_tag: target.tag().to_string(),
            steps: scenario
                .steps
                .iter()
                .map(|step| format!("{} {}", step.keyword.trim_end(), step.value))
                .collect(),
            rendered_text: render_transcript(scenario),
        })
        .collect()
}

/// A scenario is selected iff it carries the manual marker AND the target
/// option tag. Matching is exact; unrecognized tags are ignored.
fn is_selected(scenario: &Scenario, target: OptionTag) -> bool {
    scenario.tags.iter().any(|tag| tag == MANUAL_TAG)
        && scenario.tags.iter().any(|tag| tag == target.tag())
}

/// Render the operator-facing transcript, Examples tables included.
///
/// Table cells are pipe-delimited with a single space of padding on each
/// side; row and cell order follow the source table exactly.
fn render_transcript(scenario: &Scenario) -> String {
    let mut text = format!("{}: {}\n", scenario.keyword.trim_end(), scenario.name);
    for step in &scenario.steps {
        text.push_str(&format!("  {} {}\n", step.keyword.trim_end(), step.value));
    }

    let tables: Vec<_> = scenario
        .examples
        .iter()
        .filter_map(|examples| examples.table.as_ref())
        .collect();
    if !tables.is_empty() {
        text.push_str("\nExamples:\n");
        for table in tables {
            for row in &table.rows {
                text.push_str("  |");
                for cell in row {
                    text.push_str(&format!(" {} |", cell));
                }
                text.push('\n');
            }
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use gherkin::GherkinEnv;

    fn parse(source: &str) -> Feature {
        Feature::parse(source, GherkinEnv::default()).expect("fixture feature should parse")
    }

    const CHECKOUT: &str = r#"@ui @checkout
Feature: Checkout

  @manual @PV
  Scenario: Pay with a saved card
    Given a signed-in shopper
    When they pay with a saved card
    Then the order is confirmed

  @manual @IV
  Scenario: Pay with a new card
    Given a signed-in shopper
    When they enter a new card
    Then the order is confirmed

  @automated @PV
  Scenario: Price recalculation
    Given a cart with two items
    Then the total matches the sum
"#;

    #[test]
    fn test_selects_only_manual_scenarios_with_target_tag() {
        let feature = parse(CHECKOUT);

        let records = extract_scenarios(&feature, OptionTag::Pv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Pay with a saved card");
        assert_eq!(records[0].option_tag, "PV");

        let records = extract_scenarios(&feature, OptionTag::Iv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Pay with a new card");
    }

    #[test]
    fn test_no_matches_yields_empty_list() {
        let feature = parse(CHECKOUT);
        assert!(extract_scenarios(&feature, OptionTag::PPv).is_empty());
    }

    #[test]
    fn test_feature_tag_is_last_feature_level_tag() {
        let feature = parse(CHECKOUT);
        let records = extract_scenarios(&feature, OptionTag::Pv);
        assert_eq!(records[0].feature_tag, "checkout");
        assert_eq!(records[0].feature_name, "Checkout");
    }

    #[test]
    fn test_untagged_feature_has_empty_feature_tag() {
        let source = r#"Feature: Bare

  @manual @PV
  Scenario: Something manual
    Given a precondition
"#;
        let records = extract_scenarios(&parse(source), OptionTag::Pv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].feature_tag, "");
    }

    #[test]
    fn test_steps_and_transcript() {
        let feature = parse(CHECKOUT);
        let records = extract_scenarios(&feature, OptionTag::Pv);

        assert_eq!(
            records[0].steps,
            vec![
                "Given a signed-in shopper",
                "When they pay with a saved card",
                "Then the order is confirmed",
            ]
        );
        assert_eq!(
            records[0].rendered_text,
            "Scenario: Pay with a saved card\n\
             \x20 Given a signed-in shopper\n\
             \x20 When they pay with a saved card\n\
             \x20 Then the order is confirmed\n"
        );
    }

    #[test]
    fn test_outline_examples_render_pipe_delimited() {
        let source = r#"@payments
Feature: Refunds

  @manual @PV
  Scenario Outline: Refund via <method>
    Given an order paid via <method>
    When support issues a refund
    Then the shopper is repaid within <days> days

    Examples:
      | method | days |
      | card   | 3    |
      | wallet | 1    |
"#;
        let records = extract_scenarios(&parse(source), OptionTag::Pv);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].rendered_text,
            "Scenario Outline: Refund via <method>\n\
             \x20 Given an order paid via <method>\n\
             \x20 When support issues a refund\n\
             \x20 Then the shopper is repaid within <days> days\n\
             \n\
             Examples:\n\
             \x20 | method | days |\n\
             \x20 | card | 3 |\n\
             \x20 | wallet | 1 |\n"
        );
    }

    #[test]
    fn test_document_order_is_preserved() {
        let source = r#"Feature: Ordering

  @manual @PV
  Scenario: First
    Given one

  @manual @PV
  Scenario: Second
    Given two

  @manual @PV
  Scenario: Third
    Given three
"#;
        let records = extract_scenarios(&parse(source), OptionTag::Pv);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }
}
