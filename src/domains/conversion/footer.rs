//! Copyright footer handling.
//!
//! Rendered documents carry a copyright notice. When a footer template is
//! available it is handed to Pandoc via `--include-after-body`; otherwise
//! markdown sources get a copyright block appended before conversion.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::format::Format;
use crate::core::config::PandocConfig;

/// Relative location of the footer template, next to the binary or the cwd.
const FOOTER_TEMPLATE: &str = "templates/footer.md";

/// How one Pandoc invocation should carry the copyright notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration<'a> {
    /// Pass the template with `--include-after-body`.
    IncludeTemplate(&'a Path),
    /// Append the copyright block to the source text.
    AppendCopyright(&'a str),
    /// Leave the document untouched.
    None,
}

/// Resolved footer settings, fixed for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct FooterPolicy {
    template: Option<PathBuf>,
    copyright: Option<String>,
}

impl FooterPolicy {
    /// Create a policy from an optional template and copyright block.
    pub fn new(template: Option<PathBuf>, copyright: Option<String>) -> Self {
        Self {
            template,
            copyright,
        }
    }

    /// Build the policy from configuration, discovering the template on disk.
    pub fn from_config(config: &PandocConfig) -> Self {
        let template = match &config.footer_template {
            Some(path) if path.is_file() => Some(path.clone()),
            Some(path) => {
                debug!(path = %path.display(), "Configured footer template not found");
                None
            }
            None => discover_template(),
        };

        let copyright = config
            .copyright
            .enabled
            .then(|| config.copyright.text.clone());

        Self::new(template, copyright)
    }

    /// The footer template in use, if any.
    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    /// Decide the decoration for one invocation.
    ///
    /// `writes_file` is true when Pandoc is given an `-o` path.
    pub fn decoration(&self, input: Format, output: Format, writes_file: bool) -> Decoration<'_> {
        if let Some(template) = self.template.as_deref() {
            if writes_file && output.accepts_footer() {
                return Decoration::IncludeTemplate(template);
            }
        }

        match self.copyright.as_deref() {
            Some(block) if input == Format::Markdown => Decoration::AppendCopyright(block),
            _ => Decoration::None,
        }
    }
}

/// Append a copyright block to markdown content.
pub fn append_copyright(content: &str, block: &str) -> String {
    let mut out = String::with_capacity(content.len() + block.len());
    out.push_str(content);
    out.push_str(block);
    out
}

/// Look for `templates/footer.md` next to the executable, then in the cwd.
fn discover_template() -> Option<PathBuf> {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(FOOTER_TEMPLATE)));

    beside_exe
        .into_iter()
        .chain(std::iter::once(PathBuf::from(FOOTER_TEMPLATE)))
        .find(|candidate| candidate.is_file())
        .inspect(|found| debug!(path = %found.display(), "Footer template discovered"))
}
