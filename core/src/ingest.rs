//! Reading and classifying user-picked files.

use std::future::Future;

use futures_util::future::{self, FutureExt, LocalBoxFuture};
use futures_util::stream::FuturesUnordered;

use crate::errors::DocuError;
use crate::models::{Attachment, AttachmentKind};

pub const CODE_EXTENSIONS: &[&str] =
    &["js", "py", "java", "cpp", "ts", "tsx", "jsx", "php", "rb", "go", "rs"];
pub const YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md"];

/// Extension → attachment kind table for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowList {
    entries: &'static [(&'static [&'static str], AttachmentKind)],
}

impl AllowList {
    pub const fn new(entries: &'static [(&'static [&'static str], AttachmentKind)]) -> Self {
        Self { entries }
    }

    pub fn classify(&self, file_name: &str) -> Option<AttachmentKind> {
        let ext = extension(file_name)?;
        self.entries
            .iter()
            .find(|(exts, _)| exts.contains(&ext.as_str()))
            .map(|(_, kind)| *kind)
    }

    pub fn accepts(&self, kind: AttachmentKind) -> bool {
        self.entries.iter().any(|(_, k)| *k == kind)
    }

    /// Value for the file picker's `accept` attribute, e.g. `.md,.yml,.yaml`.
    pub fn accept_attribute(&self) -> String {
        self.entries
            .iter()
            .flat_map(|(exts, _)| exts.iter())
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Builds the attachment for an already-read file, or rejects it.
    pub fn attach(&self, name: &str, content: String) -> Result<Attachment, DocuError> {
        match self.classify(name) {
            Some(AttachmentKind::Code) => {
                let language = extension(name).unwrap_or_default();
                Ok(Attachment::code(name, content, language))
            }
            Some(kind) => Ok(Attachment::new(name, content, kind)),
            None => Err(DocuError::unsupported(name)),
        }
    }
}

/// Lower-cased text after the last dot, if any. A leading dot counts, so
/// `.py` classifies as `py`.
pub fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// A file the user picked; the browser implements this over `web_sys::File`.
pub trait FileSource {
    fn name(&self) -> String;
    fn read_text(&self) -> impl Future<Output = Result<String, String>>;
}

/// Starts one read per supported file and yields attachments in completion
/// order. Unsupported files are rejected up front without being read.
pub fn ingest<F>(
    files: Vec<F>,
    allow: AllowList,
) -> FuturesUnordered<LocalBoxFuture<'static, Result<Attachment, DocuError>>>
where
    F: FileSource + 'static,
{
    files
        .into_iter()
        .map(|file| {
            let name = file.name();
            if allow.classify(&name).is_none() {
                return future::ready(Err(DocuError::unsupported(name))).boxed_local();
            }
            async move {
                let content = file
                    .read_text()
                    .await
                    .map_err(|message| DocuError::file_read(&name, message))?;
                allow.attach(&name, content)
            }
            .boxed_local()
        })
        .collect()
}
