use std::time::Duration;

use docugenie_core::ingest::FileSource;
use docugenie_core::submission::Delay;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// A file picked through an `<input type="file">`.
pub struct BrowserFile(web_sys::File);

impl FileSource for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    async fn read_text(&self) -> Result<String, String> {
        let text = JsFuture::from(self.0.text())
            .await
            .map_err(|e| format!("{e:?}"))?;
        text.as_string().ok_or_else(|| "file contents are not text".to_string())
    }
}

/// Drains the input's file list so the same file can be picked again.
pub fn picked_files(input: &HtmlInputElement) -> Vec<BrowserFile> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    let files = (0..list.length())
        .filter_map(|i| list.item(i))
        .map(BrowserFile)
        .collect();
    input.set_value("");
    files
}

/// Timer-backed delay for the simulated backend.
#[derive(Clone, Copy)]
pub struct GlooDelay;

impl Delay for GlooDelay {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
