//! Template variables — serializable rendering payload built once per command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use orchkit_core::types::{Backend, BackendMap, Role, StackName};

use crate::error::RenderError;

/// Name of the orchestrator agent document shipped in the common layer.
pub const ORCHESTRATOR_AGENT: &str = "orchestrator";

/// Read-only variables visible to every template of one invocation.
///
/// | Variable              | Example                          |
/// |-----------------------|----------------------------------|
/// | `stack`               | `golang`                         |
/// | `orchestrator_agent`  | `orchestrator`                   |
/// | `engineer_agent`      | `golang-engineer`                |
/// | `qa_agent`            | `golang-qa`                      |
/// | `evidence_root`       | `./evidence`                     |
/// | `backend_map`         | `{ "engineer": "codex" }`        |
/// | `backend_order`       | `["claude", "codex", "gemini"]`  |
/// | `resolved_backends`   | one backend for every role       |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVars {
    pub stack: String,
    pub orchestrator_agent: String,
    pub engineer_agent: String,
    pub qa_agent: String,
    pub evidence_root: PathBuf,
    pub backend_map: BackendMap,
    pub backend_order: Vec<Backend>,
    pub resolved_backends: BTreeMap<Role, Backend>,
}

impl TemplateVars {
    /// Build the variables for `stack`. Pure; performs no validation beyond
    /// what [`StackName`] and [`BackendMap`] already guarantee.
    pub fn new(stack: &StackName, evidence_root: &Path, backend_map: &BackendMap) -> Self {
        let resolved_backends = Role::all()
            .iter()
            .map(|role| (*role, backend_map.resolve(*role)))
            .collect();

        TemplateVars {
            stack: stack.to_string(),
            orchestrator_agent: ORCHESTRATOR_AGENT.to_string(),
            engineer_agent: format!("{stack}-engineer"),
            qa_agent: format!("{stack}-qa"),
            evidence_root: evidence_root.to_path_buf(),
            backend_map: backend_map.clone(),
            backend_order: Backend::PRECEDENCE.to_vec(),
            resolved_backends,
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
