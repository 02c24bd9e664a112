//! Workflow templates and canvas seeding
//!
//! A template is an immutable, predefined ordered list of steps. Picking a
//! template seeds the canvas with a linear chain: one trigger node followed
//! by one node per step, each row connected to the previous one. The editor
//! never mutates the template itself.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::step::StepType;
use crate::types::{Graph, Position, StepEdge, StepNode};

/// Column the seeded chain is centered on
const CHAIN_COLUMN_X: f64 = 250.0;
/// Y position of the trigger row
const TRIGGER_ROW_Y: f64 = 40.0;
/// Vertical gap between consecutive rows
const ROW_SPACING: f64 = 130.0;

/// One predefined step in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateStep {
    #[serde(rename = "type")]
    pub step: StepType,
    pub value: String,
}

impl TemplateStep {
    pub fn new(step: StepType, value: impl Into<String>) -> Self {
        Self {
            step,
            value: value.into(),
        }
    }
}

/// An immutable workflow template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Seeds the trigger node's configuration value
    pub trigger_label: String,
    pub steps: Vec<TemplateStep>,
}

impl WorkflowTemplate {
    /// Instantiate this template into an initial graph
    ///
    /// The result is a strictly linear chain: the trigger node at row 0,
    /// node `step-i` at row `i + 1`, and one edge per step connecting it to
    /// the previous row. Instantiation is deterministic: the same template
    /// always yields the same graph.
    pub fn instantiate(&self) -> Graph {
        let mut graph = Graph::new();
        graph.insert_node(StepNode::new(
            "trigger",
            StepType::Trigger,
            Position::new(CHAIN_COLUMN_X, TRIGGER_ROW_Y),
            &self.trigger_label,
        ));

        let mut previous = "trigger".to_string();
        for (i, step) in self.steps.iter().enumerate() {
            let id = format!("step-{i}");
            let row_y = TRIGGER_ROW_Y + ROW_SPACING * (i as f64 + 1.0);
            graph.insert_node(StepNode::new(
                &id,
                step.step,
                Position::new(CHAIN_COLUMN_X, row_y),
                &step.value,
            ));
            graph.edges.push(StepEdge::between(&previous, &id));
            previous = id;
        }

        graph
    }
}

static BUILTIN_TEMPLATES: Lazy<Vec<WorkflowTemplate>> = Lazy::new(|| {
    vec![
        WorkflowTemplate {
            id: "new-lead-nurture".to_string(),
            name: "New Lead Nurture".to_string(),
            description: "Welcome a fresh lead and follow up across channels".to_string(),
            category: "Sales".to_string(),
            trigger_label: "New lead captured".to_string(),
            steps: vec![
                TemplateStep::new(StepType::Wait, "5 minutes"),
                TemplateStep::new(StepType::Email, "Welcome to Dripline"),
                TemplateStep::new(StepType::Wait, "1 day"),
                TemplateStep::new(StepType::ChatMessage, "Hi! Anything we can help with?"),
            ],
        },
        WorkflowTemplate {
            id: "abandoned-cart".to_string(),
            name: "Abandoned Cart Recovery".to_string(),
            description: "Bring shoppers back before the cart expires".to_string(),
            category: "E-commerce".to_string(),
            trigger_label: "Cart abandoned".to_string(),
            steps: vec![
                TemplateStep::new(StepType::Wait, "1 hour"),
                TemplateStep::new(StepType::Email, "You left something behind"),
                TemplateStep::new(StepType::TextMessage, "Your cart expires soon"),
                TemplateStep::new(StepType::Tag, "cart-recovery"),
            ],
        },
        WorkflowTemplate {
            id: "customer-reengagement".to_string(),
            name: "Customer Re-engagement".to_string(),
            description: "Win back contacts that went quiet".to_string(),
            category: "Retention".to_string(),
            trigger_label: "No activity for 30 days".to_string(),
            steps: vec![
                TemplateStep::new(StepType::Email, "We miss you"),
                TemplateStep::new(StepType::Wait, "3 days"),
                TemplateStep::new(StepType::Notification, "Follow up with this contact"),
                TemplateStep::new(StepType::OwnerAssign, "Account executive"),
            ],
        },
        WorkflowTemplate {
            id: "post-signup-onboarding".to_string(),
            name: "Post-signup Onboarding".to_string(),
            description: "Guide new accounts through their first week".to_string(),
            category: "Onboarding".to_string(),
            trigger_label: "Account created".to_string(),
            steps: vec![
                TemplateStep::new(StepType::Email, "Getting started guide"),
                TemplateStep::new(StepType::Wait, "2 days"),
                TemplateStep::new(StepType::Email, "Tips from the team"),
                TemplateStep::new(StepType::Webhook, "https://hooks.dripline.dev/onboarding"),
            ],
        },
    ]
});

/// The templates the product ships with
pub fn builtin_templates() -> &'static [WorkflowTemplate] {
    &BUILTIN_TEMPLATES
}
