use crate::error::{DiagramError, MalformedDefinitionError};
use crate::ir::{DecisionTree, Node, Tier};
use serde::{Deserialize, Serialize};

/// Declarative input. Every field is optional at the serde level so that
/// structural problems surface as [`MalformedDefinitionError`] with a location
/// instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<GoalDef>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<CriterionDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDef>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDef>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reads a definition as JSON, retrying as JSON5 so hand-written files may
/// carry comments and trailing commas.
pub fn parse_definition(input: &str) -> Result<Definition, DiagramError> {
    match serde_json::from_str::<Definition>(input) {
        Ok(definition) => Ok(definition),
        Err(json_err) => json5::from_str::<Definition>(input)
            .map_err(|_| DiagramError::Syntax(json_err.to_string())),
    }
}

/// Parses and builds in one step.
pub fn parse_tree(input: &str) -> Result<DecisionTree, DiagramError> {
    let definition = parse_definition(input)?;
    Ok(build_tree(&definition)?)
}

pub fn build_tree(definition: &Definition) -> Result<DecisionTree, MalformedDefinitionError> {
    let question = required_label(definition.start_question.as_deref(), "$", "start_question")?;
    let goals = definition
        .goals
        .as_ref()
        .ok_or_else(|| MalformedDefinitionError::MissingField {
            path: "$".to_string(),
            field: "goals",
        })?;

    let mut root = Node::new(question, Tier::Start);
    for (goal_idx, goal_def) in goals.iter().enumerate() {
        let goal_path = format!("goals[{goal_idx}]");
        root.children.push(build_goal(goal_def, &goal_path)?);
    }

    let title = definition
        .title
        .as_ref()
        .filter(|title| !title.trim().is_empty())
        .cloned();
    Ok(DecisionTree { title, root })
}

fn build_goal(goal_def: &GoalDef, path: &str) -> Result<Node, MalformedDefinitionError> {
    let label = required_label(goal_def.label.as_deref(), path, "label")?;
    let mut goal = Node::new(label, Tier::Goal);
    match (&goal_def.criteria, &goal_def.tools) {
        (Some(criteria), None) => {
            for (crit_idx, crit_def) in criteria.iter().enumerate() {
                let crit_path = format!("{path}.criteria[{crit_idx}]");
                goal.children.push(build_criterion(crit_def, &crit_path)?);
            }
        }
        (None, Some(tools)) => {
            goal.children = build_tools(tools, &format!("{path}.tools"))?;
        }
        (None, None) => {
            return Err(MalformedDefinitionError::GoalWithoutChildren {
                path: path.to_string(),
            });
        }
        (Some(_), Some(_)) => {
            return Err(MalformedDefinitionError::GoalWithBothChildKinds {
                path: path.to_string(),
            });
        }
    }
    Ok(goal)
}

fn build_criterion(crit_def: &CriterionDef, path: &str) -> Result<Node, MalformedDefinitionError> {
    let label = required_label(crit_def.label.as_deref(), path, "label")?;
    let tools = crit_def
        .tools
        .as_ref()
        .ok_or_else(|| MalformedDefinitionError::CriterionWithoutTools {
            path: path.to_string(),
        })?;
    let mut criterion = Node::new(label, Tier::Criterion);
    criterion.children = build_tools(tools, &format!("{path}.tools"))?;
    Ok(criterion)
}

fn build_tools(tools: &[ToolDef], base: &str) -> Result<Vec<Node>, MalformedDefinitionError> {
    tools
        .iter()
        .enumerate()
        .map(|(idx, tool_def)| {
            let path = format!("{base}[{idx}]");
            let name = required_label(tool_def.name.as_deref(), &path, "name")?;
            Ok(Node::new(name, Tier::Tool).with_description(tool_def.description.clone()))
        })
        .collect()
}

fn required_label(
    value: Option<&str>,
    path: &str,
    field: &'static str,
) -> Result<String, MalformedDefinitionError> {
    let value = value.ok_or_else(|| MalformedDefinitionError::MissingField {
        path: path.to_string(),
        field,
    })?;
    if value.trim().is_empty() {
        return Err(MalformedDefinitionError::EmptyLabel {
            path: path.to_string(),
        });
    }
    Ok(value.to_string())
}
