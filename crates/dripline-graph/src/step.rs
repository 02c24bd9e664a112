//! Step type system for automation workflows
//!
//! Every node on the canvas represents one of a closed set of step types.
//! Display metadata and connection roles are resolved through exhaustive
//! matches rather than a runtime lookup table, so adding a step type is a
//! compile-time-checked exercise.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of automation step a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepType {
    /// The event that starts a workflow; the only type permitted as a root
    Trigger,
    /// Pause the contact for a configured duration
    Wait,
    /// Send an email
    Email,
    /// Send a WhatsApp message
    ChatMessage,
    /// Notify the workflow owner inside the app
    Notification,
    /// Send an SMS
    TextMessage,
    /// Apply a CRM tag to the contact
    Tag,
    /// Assign an owner to the contact
    OwnerAssign,
    /// Call an external webhook
    Webhook,
}

/// Display metadata for a step type, consumed by the canvas renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Human-readable label
    pub label: &'static str,
    /// Icon reference for the node card
    pub icon: &'static str,
    /// Color classes for the node card accent
    pub color_class: &'static str,
}

/// Which connection handles a node of this type exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRole {
    /// Outbound handle only; the node cannot be the target of an edge
    SourceOnly,
    /// Both inbound and outbound handles
    Bidirectional,
}

impl HandleRole {
    /// Whether a node with this role may be the target of an edge
    pub fn accepts_inbound(self) -> bool {
        matches!(self, HandleRole::Bidirectional)
    }
}

impl StepType {
    /// Every step type, in palette order
    pub const ALL: [StepType; 9] = [
        StepType::Trigger,
        StepType::Wait,
        StepType::Email,
        StepType::ChatMessage,
        StepType::Notification,
        StepType::TextMessage,
        StepType::Tag,
        StepType::OwnerAssign,
        StepType::Webhook,
    ];

    /// The serialized tag for this step type
    pub fn as_str(self) -> &'static str {
        match self {
            StepType::Trigger => "trigger",
            StepType::Wait => "wait",
            StepType::Email => "email",
            StepType::ChatMessage => "chat-message",
            StepType::Notification => "notification",
            StepType::TextMessage => "text-message",
            StepType::Tag => "tag",
            StepType::OwnerAssign => "owner-assign",
            StepType::Webhook => "webhook",
        }
    }

    /// Parse a step tag, e.g. from a canvas drag payload
    pub fn parse(tag: &str) -> Option<StepType> {
        StepType::ALL.iter().copied().find(|s| s.as_str() == tag)
    }

    /// Parse a step tag from stored data, falling back to [`StepType::Wait`]
    ///
    /// Stored graphs may carry tags written by older builds. The documented
    /// default for an unknown tag is the wait entry; the fallback is logged
    /// so the data gap stays visible.
    pub fn parse_lossy(tag: &str) -> StepType {
        StepType::parse(tag).unwrap_or_else(|| {
            log::warn!("unknown step type '{tag}' in stored graph, treating as wait");
            StepType::Wait
        })
    }

    /// Display metadata for this step type
    pub fn descriptor(self) -> StepDescriptor {
        match self {
            StepType::Trigger => StepDescriptor {
                label: "Trigger",
                icon: "zap",
                color_class: "bg-amber-100 text-amber-600",
            },
            StepType::Wait => StepDescriptor {
                label: "Wait",
                icon: "clock",
                color_class: "bg-slate-100 text-slate-600",
            },
            StepType::Email => StepDescriptor {
                label: "Email",
                icon: "mail",
                color_class: "bg-blue-100 text-blue-600",
            },
            StepType::ChatMessage => StepDescriptor {
                label: "WhatsApp",
                icon: "message-circle",
                color_class: "bg-emerald-100 text-emerald-600",
            },
            StepType::Notification => StepDescriptor {
                label: "Notification",
                icon: "bell",
                color_class: "bg-violet-100 text-violet-600",
            },
            StepType::TextMessage => StepDescriptor {
                label: "SMS",
                icon: "message-square",
                color_class: "bg-cyan-100 text-cyan-600",
            },
            StepType::Tag => StepDescriptor {
                label: "Add Tag",
                icon: "tag",
                color_class: "bg-pink-100 text-pink-600",
            },
            StepType::OwnerAssign => StepDescriptor {
                label: "Assign Owner",
                icon: "user-check",
                color_class: "bg-orange-100 text-orange-600",
            },
            StepType::Webhook => StepDescriptor {
                label: "Webhook",
                icon: "webhook",
                color_class: "bg-indigo-100 text-indigo-600",
            },
        }
    }

    /// Connection role for nodes of this type
    ///
    /// The trigger is the graph root: it exposes no inbound handle, so it
    /// can never be the target of an edge. Every other type connects in
    /// both directions.
    pub fn role(self) -> HandleRole {
        match self {
            StepType::Trigger => HandleRole::SourceOnly,
            _ => HandleRole::Bidirectional,
        }
    }

    /// Whether a node of this type may be the target of an edge
    pub fn accepts_inbound(self) -> bool {
        self.role().accepts_inbound()
    }

    /// Default configuration value for a freshly dropped node
    pub fn default_value(self) -> String {
        match self {
            StepType::Trigger => "Manual".to_string(),
            other => format!("New {}", other.descriptor().label),
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
