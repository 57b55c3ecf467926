//! Document model for `~/.ssh/config` with tool-owned account blocks.
//!
//! The file is split into segments: verbatim text the tool never touches and
//! managed blocks delimited by marker comments. Rendering an unmodified
//! document reproduces the input exactly.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use crate::domain::account::{Account, Provider};
use crate::domain::error::{AccountError, SshConfigError};

const BEGIN_PREFIX: &str = "# >>> git-account-manager: ";
const BEGIN_SUFFIX: &str = " >>>";
const END_PREFIX: &str = "# <<< git-account-manager: ";
const END_SUFFIX: &str = " <<<";

/// A managed account block and the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedBlock {
    pub account: Account,
    /// Blank separator line owned by the block (empty when none).
    leading: String,
    /// Original text from begin to end marker, `None` for freshly added blocks.
    raw: Option<String>,
}

impl ManagedBlock {
    fn render(&self) -> String {
        let body = self
            .raw
            .clone()
            .unwrap_or_else(|| render_block(&self.account));
        format!("{}{body}", self.leading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Unmanaged(String),
    Managed(ManagedBlock),
}

/// Parsed `~/.ssh/config`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshConfigDocument {
    segments: Vec<Segment>,
}

impl SshConfigDocument {
    /// Parse config text into segments.
    ///
    /// # Errors
    ///
    /// Returns an error if a managed block is unterminated, mismatched,
    /// duplicated, or missing one of its required fields.
    pub fn parse(content: &str) -> Result<Self, SshConfigError> {
        let mut segments = Vec::new();
        let mut unmanaged = String::new();
        let mut open: Option<OpenBlock> = None;

        for (idx, line) in content.split_inclusive('\n').enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();

            if let Some(alias) = marker_alias(trimmed, BEGIN_PREFIX, BEGIN_SUFFIX) {
                if let Some(block) = open {
                    return Err(SshConfigError::UnclosedBlock {
                        line: block.start_line,
                        alias: block.alias,
                    });
                }
                let leading = take_trailing_blank_line(&mut unmanaged);
                if !unmanaged.is_empty() {
                    segments.push(Segment::Unmanaged(std::mem::take(&mut unmanaged)));
                }
                open = Some(OpenBlock {
                    alias: alias.to_string(),
                    start_line: line_no,
                    leading,
                    text: line.to_string(),
                });
                continue;
            }

            if let Some(alias) = marker_alias(trimmed, END_PREFIX, END_SUFFIX) {
                match open.take() {
                    Some(mut block) if block.alias == alias => {
                        block.text.push_str(line);
                        let managed = block.finish()?;
                        if segments.iter().any(|s| {
                            matches!(s, Segment::Managed(m) if m.account.alias == managed.account.alias)
                        }) {
                            return Err(SshConfigError::DuplicateBlock(managed.account.alias));
                        }
                        segments.push(Segment::Managed(managed));
                    }
                    _ => {
                        return Err(SshConfigError::UnexpectedEnd {
                            line: line_no,
                            alias: alias.to_string(),
                        });
                    }
                }
                continue;
            }

            match open.as_mut() {
                Some(block) => block.text.push_str(line),
                None => unmanaged.push_str(line),
            }
        }

        if let Some(block) = open {
            return Err(SshConfigError::UnclosedBlock {
                line: block.start_line,
                alias: block.alias,
            });
        }
        if !unmanaged.is_empty() {
            segments.push(Segment::Unmanaged(unmanaged));
        }
        Ok(Self { segments })
    }

    /// Render the document back to config text.
    #[must_use]
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Unmanaged(text) => text.clone(),
                Segment::Managed(block) => block.render(),
            })
            .collect()
    }

    /// Managed accounts in file order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Managed(block) => Some(&block.account),
            Segment::Unmanaged(_) => None,
        })
    }

    /// Look up a managed account by alias.
    #[must_use]
    pub fn find(&self, alias: &str) -> Option<&Account> {
        self.accounts().find(|a| a.alias == alias)
    }

    /// `Host` patterns declared outside managed blocks.
    #[must_use]
    pub fn unmanaged_host_patterns(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Unmanaged(text) => Some(text),
                Segment::Managed(_) => None,
            })
            .flat_map(|text| text.lines())
            .filter_map(|line| {
                let (key, value) = split_directive(line)?;
                key.eq_ignore_ascii_case("host").then_some(value)
            })
            .flat_map(str::split_whitespace)
            .map(str::to_string)
            .collect()
    }

    /// Append a managed block for `account`.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias is already managed or its host alias is
    /// declared by hand elsewhere in the file.
    pub fn add_account(&mut self, account: Account) -> Result<(), AccountError> {
        if self.find(&account.alias).is_some() {
            return Err(AccountError::AlreadyExists(account.alias));
        }
        let host = account.host_alias();
        if self.unmanaged_host_patterns().iter().any(|p| *p == host) {
            return Err(AccountError::HostAliasTaken(host));
        }

        let rendered = self.render();
        if !rendered.is_empty()
            && !rendered.ends_with('\n')
            && let Some(Segment::Unmanaged(text)) = self.segments.last_mut()
        {
            text.push('\n');
        }
        let leading = if rendered.is_empty() { String::new() } else { "\n".to_string() };

        self.segments.push(Segment::Managed(ManagedBlock {
            account,
            leading,
            raw: None,
        }));
        Ok(())
    }

    /// Remove the managed block for `alias`, returning its account.
    ///
    /// # Errors
    ///
    /// Returns an error if no managed block exists for `alias`.
    pub fn remove_account(&mut self, alias: &str) -> Result<Account, AccountError> {
        let idx = self
            .segments
            .iter()
            .position(|s| matches!(s, Segment::Managed(b) if b.account.alias == alias))
            .ok_or_else(|| AccountError::NotFound(alias.to_string()))?;
        let Segment::Managed(block) = self.segments.remove(idx) else {
            return Err(AccountError::NotFound(alias.to_string()));
        };
        self.merge_adjacent_unmanaged();
        Ok(block.account)
    }

    fn merge_adjacent_unmanaged(&mut self) {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for segment in self.segments.drain(..) {
            match (merged.last_mut(), segment) {
                (Some(Segment::Unmanaged(prev)), Segment::Unmanaged(next)) => prev.push_str(&next),
                (_, segment) => merged.push(segment),
            }
        }
        self.segments = merged;
    }
}

/// Renders the canonical managed block for `account`.
#[must_use]
pub fn render_block(account: &Account) -> String {
    let alias = &account.alias;
    format!(
        "{BEGIN_PREFIX}{alias}{BEGIN_SUFFIX}\n\
         # name: {name}\n\
         # email: {email}\n\
         # provider: {provider}\n\
         Host {host_alias}\n\
         \x20   HostName {host}\n\
         \x20   User git\n\
         \x20   IdentityFile {identity}\n\
         \x20   IdentitiesOnly yes\n\
         \x20   AddKeysToAgent yes\n\
         {END_PREFIX}{alias}{END_SUFFIX}\n",
        name = account.name,
        email = account.email,
        provider = account.provider,
        host_alias = account.host_alias(),
        host = account.provider.host(),
        identity = account.identity_file,
    )
}

// ── Parsing helpers ───────────────────────────────────────────────────────────

struct OpenBlock {
    alias: String,
    start_line: usize,
    leading: String,
    text: String,
}

impl OpenBlock {
    fn finish(self) -> Result<ManagedBlock, SshConfigError> {
        let mut name = None;
        let mut email = None;
        let mut provider = None;
        let mut identity_file = None;

        for line in self.text.lines() {
            let trimmed = line.trim();
            if let Some(comment) = trimmed.strip_prefix('#') {
                if let Some((key, value)) = comment.trim().split_once(':') {
                    let value = value.trim().to_string();
                    match key.trim() {
                        "name" => name = Some(value),
                        "email" => email = Some(value),
                        "provider" => provider = Some(value),
                        _ => {}
                    }
                }
                continue;
            }
            if let Some((key, value)) = split_directive(trimmed)
                && key.eq_ignore_ascii_case("identityfile")
            {
                identity_file = Some(value.to_string());
            }
        }

        let missing = |field: &'static str| SshConfigError::MissingField {
            line: self.start_line,
            alias: self.alias.clone(),
            field,
        };
        let provider: Provider = provider
            .as_deref()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| missing("provider"))?;

        Ok(ManagedBlock {
            account: Account {
                alias: self.alias.clone(),
                name: name.ok_or_else(|| missing("name"))?,
                email: email.ok_or_else(|| missing("email"))?,
                provider,
                identity_file: identity_file.ok_or_else(|| missing("IdentityFile"))?,
            },
            leading: self.leading,
            raw: Some(self.text),
        })
    }
}

fn marker_alias<'a>(line: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    let alias = line.strip_prefix(prefix)?.strip_suffix(suffix)?.trim();
    (!alias.is_empty()).then_some(alias)
}

/// Splits `Key Value` or `Key=Value`, ignoring blank lines and comments.
fn split_directive(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = match line.split_once('=') {
        Some((k, v)) if !k.trim().contains(char::is_whitespace) => (k.trim(), v.trim()),
        _ => {
            let (k, v) = line.split_once(char::is_whitespace)?;
            (k, v.trim())
        }
    };
    (!value.is_empty()).then_some((key, value))
}

/// If `text` ends with a whitespace-only line, detach and return it.
fn take_trailing_blank_line(text: &mut String) -> String {
    let Some(body) = text.strip_suffix('\n') else {
        return String::new();
    };
    let start = body.rfind('\n').map_or(0, |i| i + 1);
    if !body[start..].trim().is_empty() {
        return String::new();
    }
    text.split_off(start)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
