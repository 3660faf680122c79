//! Shortcuts action descriptors.
//!
//! [`ShortcutAction::for_mode`] derives the descriptor for a catalog mode;
//! [`WorkflowDocument`] is its on-disk shape, a Shortcuts workflow with a
//! single "Run Script over SSH" step that re-invokes `focusctl`.

use serde::{Deserialize, Serialize};

use crate::config::SshConfig;
use crate::error::Result;
use crate::mode::FocusMode;

/// Substring every installed file name carries; `list` and `uninstall` match on it.
pub const PRODUCT_MARKER: &str = "FocusCTL";
pub const SHORTCUT_EXTENSION: &str = "shortcut";
pub const COMMAND_NAME: &str = "focusctl";

const SSH_ACTION_ID: &str = "is.workflow.actions.runsshscript";
const STRING_CONTENT_ITEM: &str = "WFStringContentItem";
const CLIENT_VERSION: u32 = 900;
const ICON_START_COLOR: u32 = 0xFF6B35;

// ---------------------------------------------------------------------------
// ShortcutAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutAction {
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub script: String,
    pub icon: String,
}

impl ShortcutAction {
    pub fn for_mode(mode: FocusMode) -> Self {
        Self {
            identifier: format!("{PRODUCT_MARKER}.{}", mode.as_str()),
            name: format!("Toggle {} Focus", mode.display_name()),
            description: format!("Toggle {} focus mode on/off", mode.display_name()),
            script: format!("{COMMAND_NAME} {} toggle", mode.as_str()),
            icon: mode.icon_tag().to_string(),
        }
    }

    /// Descriptors for the whole catalog, in catalog order.
    pub fn all() -> Vec<Self> {
        FocusMode::all().iter().map(|&m| Self::for_mode(m)).collect()
    }

    /// `FocusCTL - Toggle Work Focus.shortcut`
    pub fn file_name(&self) -> String {
        format!("{PRODUCT_MARKER} - {}.{SHORTCUT_EXTENSION}", self.name)
    }

    pub fn to_document(&self, ssh: &SshConfig) -> WorkflowDocument {
        WorkflowDocument {
            name: self.name.clone(),
            actions: vec![WorkflowAction {
                identifier: SSH_ACTION_ID.to_string(),
                parameters: SshParameters {
                    host: ssh.host.clone(),
                    port: ssh.port.to_string(),
                    user: ssh.resolved_user(),
                    script: self.script.clone(),
                },
            }],
            input_content_item_classes: vec![STRING_CONTENT_ITEM.to_string()],
            output_content_item_classes: vec![STRING_CONTENT_ITEM.to_string()],
            types: vec![
                "NCWidget".to_string(),
                "WatchKit".to_string(),
                "Shortcuts".to_string(),
            ],
            client_version: CLIENT_VERSION.to_string(),
            minimum_client_version: CLIENT_VERSION,
            icon: WorkflowIcon {
                image_data: self.icon.clone(),
                start_color: ICON_START_COLOR,
                glyph_number: 0,
            },
            has_shortcut_input_variables: false,
            import_questions: Vec::new(),
            input_passthrough: false,
            no_input_behavior: "Ask".to_string(),
            action_count: 1,
        }
    }

    /// Pretty-printed JSON document for this action.
    pub fn serialize(&self, ssh: &SshConfig) -> Result<Vec<u8>> {
        let mut data = serde_json::to_vec_pretty(&self.to_document(ssh))?;
        data.push(b'\n');
        Ok(data)
    }
}

// ---------------------------------------------------------------------------
// WorkflowDocument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(rename = "WFWorkflowName")]
    pub name: String,
    #[serde(rename = "WFWorkflowActions")]
    pub actions: Vec<WorkflowAction>,
    #[serde(rename = "WFWorkflowInputContentItemClasses")]
    pub input_content_item_classes: Vec<String>,
    #[serde(rename = "WFWorkflowOutputContentItemClasses")]
    pub output_content_item_classes: Vec<String>,
    #[serde(rename = "WFWorkflowTypes")]
    pub types: Vec<String>,
    #[serde(rename = "WFWorkflowClientVersion")]
    pub client_version: String,
    #[serde(rename = "WFWorkflowMinimumClientVersion")]
    pub minimum_client_version: u32,
    #[serde(rename = "WFWorkflowIcon")]
    pub icon: WorkflowIcon,
    #[serde(rename = "WFWorkflowHasShortcutInputVariables")]
    pub has_shortcut_input_variables: bool,
    #[serde(rename = "WFWorkflowImportQuestions")]
    pub import_questions: Vec<serde_json::Value>,
    #[serde(rename = "WFWorkflowInputPassthrough")]
    pub input_passthrough: bool,
    #[serde(rename = "WFWorkflowNoInputBehavior")]
    pub no_input_behavior: String,
    #[serde(rename = "WFWorkflowActionCount")]
    pub action_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowAction {
    #[serde(rename = "WFWorkflowActionIdentifier")]
    pub identifier: String,
    #[serde(rename = "WFWorkflowActionParameters")]
    pub parameters: SshParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshParameters {
    #[serde(rename = "WFSSHHost")]
    pub host: String,
    #[serde(rename = "WFSSHPort")]
    pub port: String,
    #[serde(rename = "WFSSHUser")]
    pub user: String,
    #[serde(rename = "WFSSHScript")]
    pub script: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowIcon {
    #[serde(rename = "WFWorkflowIconImageData")]
    pub image_data: String,
    #[serde(rename = "WFWorkflowIconStartColor")]
    pub start_color: u32,
    #[serde(rename = "WFWorkflowIconGlyphNumber")]
    pub glyph_number: u32,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
