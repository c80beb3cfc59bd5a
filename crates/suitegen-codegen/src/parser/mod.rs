//! Adapter from the Gherkin grammar parser onto the feature data model.

mod docstring;

use gherkin::{GherkinEnv, StepType};
use suitegen_patterns::{StepKeyword, UnsupportedStepType};
use thiserror::Error;

use crate::model::{Background, DocString, Examples, Feature, Rule, Scenario, Step};

use self::docstring::content_type_after;

const UNNAMED_FEATURE: &str = "Unnamed Feature";
const UNNAMED_SCENARIO: &str = "Unnamed Scenario";
const UNNAMED_RULE: &str = "Unnamed Rule";

/// Section headers that never belong in free-form description text.
const SECTION_HEADERS: [&str; 9] = [
    "Feature:",
    "Rule:",
    "Background:",
    "Scenario Outline:",
    "Scenario Template:",
    "Scenario:",
    "Example:",
    "Examples:",
    "Scenarios:",
];

/// Errors raised while turning feature text into a [`Feature`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The grammar parser rejected the document.
    #[error("Failed to parse Gherkin: {0}")]
    Gherkin(String),
    /// The document parsed but declares no `Feature:`.
    #[error("No feature found in document")]
    MissingFeature,
    /// A step keyword could not be mapped onto a step keyword.
    #[error("Failed to parse Gherkin: {0}")]
    UnsupportedStepType(#[from] UnsupportedStepType),
    /// A section header was swallowed into description text, which happens
    /// when a scenario without steps directly precedes another section.
    #[error(
        "Failed to parse Gherkin: '{line}' was read as description text of {owner}; \
         give the scenario before it at least one step or remove it"
    )]
    SectionInDescription {
        /// Section whose description holds the header.
        owner: String,
        /// The offending line, trimmed.
        line: String,
    },
}

/// Parse feature text into the data model.
///
/// Missing titles default to `Unnamed Feature`, `Unnamed Scenario` and
/// `Unnamed Rule`. A scenario is an outline exactly when it carries at least
/// one `Examples:` block.
///
/// # Errors
/// Returns [`ParseError::MissingFeature`] when the text holds nothing but
/// blank lines, comments and tags, [`ParseError::Gherkin`] when the grammar
/// parser fails, and [`ParseError::SectionInDescription`] when a section
/// header ended up in a description.
///
/// # Examples
/// ```
/// use suitegen_codegen::parse_feature;
///
/// let feature = parse_feature("Feature: Math\n  Scenario: Add\n    Given 1\n")
///     .expect("feature parses");
/// assert_eq!(feature.name, "Math");
/// assert_eq!(feature.scenarios.len(), 1);
/// ```
pub fn parse_feature(text: &str) -> Result<Feature, ParseError> {
    if declares_nothing(text) {
        return Err(ParseError::MissingFeature);
    }
    let mut source = text.to_string();
    if !source.ends_with('\n') {
        source.push('\n');
    }
    let parsed = gherkin::Feature::parse(source.as_str(), GherkinEnv::default())
        .map_err(|err| ParseError::Gherkin(err.to_string()))?;
    FeatureAdapter { source: &source }.feature(&parsed)
}

fn declares_nothing(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line.starts_with('@')
    })
}

struct FeatureAdapter<'a> {
    source: &'a str,
}

impl FeatureAdapter<'_> {
    fn feature(&self, feature: &gherkin::Feature) -> Result<Feature, ParseError> {
        reject_section_headers(feature.description.as_deref(), || {
            format!("feature '{}'", feature.name.trim())
        })?;
        Ok(Feature {
            name: name_or(&feature.name, UNNAMED_FEATURE),
            description: feature
                .description
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            tags: normalise_tags(&feature.tags),
            background: feature
                .background
                .as_ref()
                .map(|bg| self.background(bg))
                .transpose()?,
            scenarios: self.scenarios(&feature.scenarios)?,
            rules: feature
                .rules
                .iter()
                .map(|rule| self.rule(rule))
                .collect::<Result<_, _>>()?,
        })
    }

    fn rule(&self, rule: &gherkin::Rule) -> Result<Rule, ParseError> {
        reject_section_headers(rule.description.as_deref(), || {
            format!("rule '{}'", rule.name.trim())
        })?;
        Ok(Rule {
            name: name_or(&rule.name, UNNAMED_RULE),
            tags: normalise_tags(&rule.tags),
            background: rule
                .background
                .as_ref()
                .map(|bg| self.background(bg))
                .transpose()?,
            scenarios: self.scenarios(&rule.scenarios)?,
        })
    }

    fn background(&self, background: &gherkin::Background) -> Result<Background, ParseError> {
        reject_section_headers(background.description.as_deref(), || "a background".into())?;
        Ok(Background {
            steps: self.steps(&background.steps)?,
        })
    }

    fn scenarios(&self, scenarios: &[gherkin::Scenario]) -> Result<Vec<Scenario>, ParseError> {
        scenarios
            .iter()
            .map(|scenario| {
                reject_section_headers(scenario.description.as_deref(), || {
                    format!("scenario '{}'", scenario.name.trim())
                })?;
                for block in &scenario.examples {
                    reject_section_headers(block.description.as_deref(), || {
                        format!("the examples of scenario '{}'", scenario.name.trim())
                    })?;
                }
                Ok(Scenario {
                    name: name_or(&scenario.name, UNNAMED_SCENARIO),
                    tags: normalise_tags(&scenario.tags),
                    steps: self.steps(&scenario.steps)?,
                    examples: scenario.examples.iter().map(examples).collect(),
                })
            })
            .collect()
    }

    fn steps(&self, steps: &[gherkin::Step]) -> Result<Vec<Step>, ParseError> {
        let mut run = None;
        steps
            .iter()
            .map(|step| {
                let keyword = step_keyword(step, &mut run)?;
                self.step(step, keyword)
            })
            .collect()
    }

    fn step(&self, step: &gherkin::Step, keyword: StepKeyword) -> Result<Step, ParseError> {
        let doc_string = step.docstring.as_ref().map(|content| {
            let start_from = step.table.as_ref().map_or(step.span.end, |t| t.span.end);
            DocString {
                content: content.clone(),
                content_type: content_type_after(self.source, start_from),
            }
        });
        Ok(Step {
            keyword,
            text: step.value.clone(),
            table: step.table.as_ref().map(|table| table.rows.clone()),
            doc_string,
        })
    }
}

/// Keyword of `step` within its step list.
///
/// English spellings map directly. Other dialects only reveal the resolved
/// step type, so `run` tracks the type and spelling of the step that opened
/// the current run: a step of the same type spelled differently continues
/// that run and is read as `And`.
fn step_keyword<'a>(
    step: &'a gherkin::Step,
    run: &mut Option<(StepType, &'a str)>,
) -> Result<StepKeyword, ParseError> {
    let spelled = step.keyword.trim();
    if let Ok(keyword) = spelled.parse::<StepKeyword>() {
        return Ok(keyword);
    }
    if matches!(*run, Some((ty, opener)) if ty == step.ty && opener != spelled) {
        return Ok(StepKeyword::And);
    }
    *run = Some((step.ty, spelled));
    Ok(StepKeyword::try_from(step.ty)?)
}

fn reject_section_headers(
    description: Option<&str>,
    owner: impl FnOnce() -> String,
) -> Result<(), ParseError> {
    let header_line = description
        .into_iter()
        .flat_map(str::lines)
        .map(str::trim)
        .find(|line| SECTION_HEADERS.iter().any(|header| line.starts_with(header)));
    header_line.map_or(Ok(()), |line| {
        Err(ParseError::SectionInDescription {
            owner: owner(),
            line: line.to_string(),
        })
    })
}

fn examples(examples: &gherkin::Examples) -> Examples {
    let mut rows = examples
        .table
        .as_ref()
        .map(|table| table.rows.clone())
        .unwrap_or_default()
        .into_iter();
    Examples {
        tags: normalise_tags(&examples.tags),
        headers: rows.next().unwrap_or_default(),
        rows: rows.collect(),
    }
}

fn name_or(name: &str, fallback: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn normalise_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| {
            if tag.starts_with('@') {
                tag.clone()
            } else {
                format!("@{tag}")
            }
        })
        .collect()
}
