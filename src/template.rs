use std::path::Path;

use anyhow::{bail, Context, Result};

/// Header block expected when no template file is supplied.
pub const BUILTIN_TEMPLATE: &str = r#"/* Copyright 2025 Evan Troxell
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *    http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */
"#;

/// The exact text a conforming file must contain.
///
/// Matching is a plain substring test: no trimming, no whitespace or line
/// ending normalization, no case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseTemplate {
    text: String,
}

impl LicenseTemplate {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            bail!("license template must not be empty");
        }
        Ok(Self { text })
    }

    pub fn builtin() -> Self {
        Self {
            text: BUILTIN_TEMPLATE.to_string(),
        }
    }

    /// Load a template verbatim from `path`. A trailing newline in the file is
    /// part of the template.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read license template {}", path.display()))?;
        Self::new(text).with_context(|| format!("invalid license template {}", path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_contained_in(&self, content: &str) -> bool {
        content.contains(&self.text)
    }
}
