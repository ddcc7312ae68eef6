//! Best-effort collaborator consultation.

use tracing::warn;

use crate::client::ContentGenerator;
use crate::error::GenerateError;

/// Content for one section of a generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drafted<T> {
    /// Built-in content: no collaborator, or its reply was unusable.
    Default(T),
    /// Parsed from the collaborator's reply.
    Generated(T),
}

impl<T> Drafted<T> {
    pub fn is_generated(&self) -> bool {
        matches!(self, Drafted::Generated(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Drafted::Default(v) | Drafted::Generated(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Drafted::Default(v) | Drafted::Generated(v) => v,
        }
    }
}

/// A prompt and its system instruction.
pub(crate) struct Request<'a> {
    pub prompt: &'a str,
    pub system: &'a str,
}

/// Ask `collaborator` (if any) and parse the reply; any failure yields the
/// default instead.
pub(crate) fn draft<T>(
    collaborator: Option<&dyn ContentGenerator>,
    request: Request<'_>,
    parse: impl FnOnce(&str) -> Result<T, GenerateError>,
    default: impl FnOnce() -> T,
) -> Drafted<T> {
    let Some(collaborator) = collaborator else {
        return Drafted::Default(default());
    };
    match collaborator
        .generate(request.prompt, Some(request.system))
        .and_then(|reply| parse(&reply))
    {
        Ok(value) => Drafted::Generated(value),
        Err(e) => {
            warn!("collaborator content unusable, using defaults: {e}");
            Drafted::Default(default())
        }
    }
}
