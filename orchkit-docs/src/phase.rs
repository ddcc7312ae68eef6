//! Phase document generator (`.pm/phase-<stack>-<n>.md`).

use std::path::{Path, PathBuf};

use orchkit_core::StackName;
use serde::{Deserialize, Serialize};

use crate::client::ContentGenerator;
use crate::drafted::{draft, Drafted, Request};
use crate::error::GenerateError;
use crate::{write_document, GeneratedDoc};

/// Title used when none is given.
pub const DEFAULT_PHASE_TITLE: &str = "Starter phase";

const SYSTEM_PROMPT: &str = "You output JSON only.";

/// Inputs for [`generate_phase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOptions {
    pub target: PathBuf,
    pub stack: StackName,
    /// Defaults to `PHASE-<STACK>-1`.
    pub phase_id: Option<String>,
    /// Defaults to [`DEFAULT_PHASE_TITLE`].
    pub title: Option<String>,
}

impl PhaseOptions {
    pub fn phase_id(&self) -> String {
        match &self.phase_id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => default_phase_id(&self.stack),
        }
    }

    pub fn title(&self) -> &str {
        match &self.title {
            Some(t) if !t.trim().is_empty() => t.trim(),
            _ => DEFAULT_PHASE_TITLE,
        }
    }
}

/// One implementation story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub task: String,
}

impl Story {
    fn new(id: &str, title: &str, task: &str) -> Self {
        Story {
            id: id.to_string(),
            title: title.to_string(),
            task: task.to_string(),
        }
    }
}

/// `PHASE-<STACK>-1`.
pub fn default_phase_id(stack: &StackName) -> String {
    format!("PHASE-{}-1", stack.as_str().to_uppercase())
}

/// Stories used when no collaborator content is available.
pub fn default_stories() -> Vec<Story> {
    vec![
        Story::new("STORY-1.1", "CLI foundation", "create root cmd and help"),
        Story::new(
            "STORY-1.2",
            "Templates",
            "add orchestrator/agents/hooks templates",
        ),
    ]
}

/// `<target>/.pm/phase-<stack>-<n>.md`, where `<n>` is the last `-`
/// separated segment of `phase_id`, lower-cased and reduced to ASCII
/// alphanumerics (`1` when nothing remains).
pub fn phase_path(target: &Path, stack: &StackName, phase_id: &str) -> PathBuf {
    let segment: String = phase_id
        .rsplit('-')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    let segment = if segment.is_empty() { "1".to_string() } else { segment };
    target
        .join(".pm")
        .join(format!("phase-{}-{segment}.md", stack.as_str()))
}

/// Parse a reply holding a JSON array of stories. Text around the outermost
/// `[` … `]` is ignored.
pub fn parse_stories(reply: &str) -> Result<Vec<Story>, GenerateError> {
    let (start, end) = match (reply.find('['), reply.rfind(']')) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => return Err(GenerateError::Malformed("no JSON array in reply".into())),
    };
    let stories: Vec<Story> = serde_json::from_str(&reply[start..=end])
        .map_err(|e| GenerateError::Malformed(format!("story array: {e}")))?;
    if stories.is_empty() {
        return Err(GenerateError::Malformed("empty story array".into()));
    }
    if let Some(bad) = stories
        .iter()
        .find(|s| s.id.trim().is_empty() || s.title.trim().is_empty())
    {
        return Err(GenerateError::Malformed(format!("incomplete story: {bad:?}")));
    }
    Ok(stories)
}

/// Render the phase document.
pub fn render_phase(phase_id: &str, title: &str, stories: &[Story]) -> String {
    let mut lines = vec![
        format!("# [ ] {phase_id}: {title}"),
        String::new(),
        "## 2. Phase Scope & Test Case Definitions".to_string(),
        "(define requirements + test IDs here)".to_string(),
        String::new(),
        "## 3. Implementation Plan".to_string(),
    ];
    for story in stories {
        lines.push(format!("### [ ] {}: {}", story.id, story.title));
        lines.push(format!(
            "- Task: {}; evidence to `evidence/{phase_id}/{}/...`",
            story.task,
            story.id.to_lowercase()
        ));
        lines.push(String::new());
    }
    lines.push("## Final Acceptance Gate".to_string());
    lines.push(format!(
        "- Run full regression; log to `evidence/{phase_id}/regression.log`."
    ));
    lines.push(String::new());
    lines.join("\n")
}

/// Build the phase document and write it under `opts.target`.
pub fn generate_phase(
    opts: &PhaseOptions,
    collaborator: Option<&dyn ContentGenerator>,
) -> Result<GeneratedDoc, GenerateError> {
    let phase_id = opts.phase_id();
    let stories = draft_stories(&opts.stack, collaborator);
    let generated = stories.is_generated();
    let body = render_phase(&phase_id, opts.title(), stories.get());

    let path = phase_path(&opts.target, &opts.stack, &phase_id);
    write_document(&path, &body)?;
    Ok(GeneratedDoc { path, generated })
}

/// The stories for a phase of `stack`: the collaborator's when usable,
/// otherwise [`default_stories`].
pub fn draft_stories(
    stack: &StackName,
    collaborator: Option<&dyn ContentGenerator>,
) -> Drafted<Vec<Story>> {
    let prompt = format!(
        "Propose 3-5 user stories for a {stack} stack phase. Return JSON array of {{id,title,task}}. IDs start with STORY-1.x."
    );
    draft(
        collaborator,
        Request {
            prompt: &prompt,
            system: SYSTEM_PROMPT,
        },
        parse_stories,
        default_stories,
    )
}
