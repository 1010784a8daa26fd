//! The generation step and the request it consumes.

use std::future::Future;
use std::time::Duration;

use log::debug;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::DocuError;
use crate::models::{Attachment, AttachmentKind, ConversationId};
use crate::tools::ToolKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeFile {
    pub name: String,
    pub content: String,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextFile {
    pub name: String,
    pub content: String,
}

/// What a backend receives for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    #[serde(skip)]
    pub tool: ToolKind,
    pub conversation_id: ConversationId,
    pub text: String,
    pub code: Vec<CodeFile>,
    /// OpenAPI / YAML attachments.
    pub specs: Vec<TextFile>,
    /// Markdown attachments.
    pub documents: Vec<TextFile>,
    /// Every attachment in upload order, across kinds.
    #[serde(skip)]
    pub files: Vec<Attachment>,
}

impl GenerationRequest {
    pub fn new(
        tool: ToolKind,
        conversation_id: ConversationId,
        text: impl Into<String>,
        files: &[Attachment],
    ) -> Self {
        let mut request = Self {
            tool,
            conversation_id,
            text: text.into(),
            code: Vec::new(),
            specs: Vec::new(),
            documents: Vec::new(),
            files: files.to_vec(),
        };
        for file in files {
            match file.kind {
                AttachmentKind::Code => request.code.push(CodeFile {
                    name: file.name.clone(),
                    content: file.content.clone(),
                    language: file.language.clone(),
                }),
                AttachmentKind::Yaml => request.specs.push(TextFile {
                    name: file.name.clone(),
                    content: file.content.clone(),
                }),
                AttachmentKind::Markdown => request.documents.push(TextFile {
                    name: file.name.clone(),
                    content: file.content.clone(),
                }),
            }
        }
        request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
}

/// Produces an assistant answer. May fail; the session records failures in
/// the transcript.
pub trait Generator {
    fn generate(&self, request: &GenerationRequest) -> impl Future<Output = Result<Generation, DocuError>>;
}

/// Runtime timer, so the core stays independent of tokio and the browser.
pub trait Delay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Fixed-latency stand-in for the real documentation service.
#[derive(Debug, Clone)]
pub struct SimulatedBackend<D> {
    delay: D,
    latency: Duration,
}

impl<D: Delay> SimulatedBackend<D> {
    pub fn new(delay: D, latency: Duration) -> Self {
        Self { delay, latency }
    }
}

impl<D: Delay> Generator for SimulatedBackend<D> {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, DocuError> {
        debug!(
            "Simulating {} generation for conversation {} ({} ms)",
            request.tool,
            request.conversation_id,
            self.latency.as_millis()
        );
        self.delay.sleep(self.latency).await;
        Ok(Generation { text: request.tool.profile().mock_response(request) })
    }
}

/// An accepted submission whose answer has not arrived yet.
///
/// The conversation id is captured at submission time: the answer lands there
/// even if the user has switched conversations meanwhile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub ticket: Uuid,
    pub conversation_id: ConversationId,
    pub request: GenerationRequest,
}
