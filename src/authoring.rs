//! Authoring surface coordinator
//!
//!     Keeps an editable surface and the pipeline in step. The surface itself (a browser
//!     `contenteditable`, a TUI buffer, a test fake) sits behind [`EditableSurface`]; the
//!     coordinator only decides what to hand it and when to re-read it:
//!
//!     - paste: prefer the HTML flavor of the clipboard, sanitize it, insert at the caret,
//!       re-read the surface
//!     - formatting command: run it, re-read the surface, refresh the active command set
//!     - selection change: refresh the active command set
//!
//!     All of it is synchronous so the tracked content never lags behind what the surface
//!     shows. No sanitization or transpilation logic lives here.

use crate::sanitize::Sanitizer;
use std::collections::BTreeSet;
use std::fmt;

/// Toolbar formatting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    OrderedList,
    UnorderedList,
    Link,
}

impl FormatCommand {
    pub const ALL: [FormatCommand; 7] = [
        FormatCommand::Bold,
        FormatCommand::Italic,
        FormatCommand::Underline,
        FormatCommand::Strikethrough,
        FormatCommand::OrderedList,
        FormatCommand::UnorderedList,
        FormatCommand::Link,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Strikethrough => "strikethrough",
            FormatCommand::OrderedList => "insertOrderedList",
            FormatCommand::UnorderedList => "insertUnorderedList",
            FormatCommand::Link => "createLink",
        }
    }
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The live editable surface.
pub trait EditableSurface {
    /// Current content, serialized as markup.
    fn serialized_content(&self) -> String;

    fn insert_markup_at_caret(&mut self, markup: &str);

    fn exec_command(&mut self, command: FormatCommand);

    /// Whether `command` applies at the caret (drives toolbar highlighting).
    fn is_command_active(&self, command: FormatCommand) -> bool;
}

/// The flavors a paste event may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub html: Option<String>,
    pub text: Option<String>,
}

impl ClipboardPayload {
    pub fn html(html: impl Into<String>) -> Self {
        ClipboardPayload {
            html: Some(html.into()),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ClipboardPayload {
            html: None,
            text: Some(text.into()),
        }
    }

    /// HTML when present and not blank, otherwise the plain text.
    pub fn preferred(&self) -> Option<&str> {
        self.html
            .as_deref()
            .filter(|html| !html.trim().is_empty())
            .or(self.text.as_deref())
    }
}

pub struct AuthoringCoordinator<S> {
    surface: S,
    sanitizer: Sanitizer,
    content: String,
    active: BTreeSet<FormatCommand>,
}

impl<S: EditableSurface> AuthoringCoordinator<S> {
    pub fn new(surface: S, sanitizer: Sanitizer) -> Self {
        let content = surface.serialized_content();
        let mut coordinator = AuthoringCoordinator {
            surface,
            sanitizer,
            content,
            active: BTreeSet::new(),
        };
        coordinator.selection_changed();
        coordinator
    }

    /// Sanitize and insert a paste. Returns the inserted markup, or `None` for an empty
    /// payload.
    pub fn paste(&mut self, payload: &ClipboardPayload) -> Option<String> {
        let raw = payload.preferred()?;
        let markup = self.sanitizer.sanitize(raw);
        self.surface.insert_markup_at_caret(&markup);
        self.refresh_content();
        Some(markup)
    }

    pub fn run_command(&mut self, command: FormatCommand) {
        self.surface.exec_command(command);
        self.refresh_content();
        self.selection_changed();
    }

    /// Recompute the active command set from the surface.
    pub fn selection_changed(&mut self) {
        self.active = FormatCommand::ALL
            .into_iter()
            .filter(|command| self.surface.is_command_active(*command))
            .collect();
    }

    fn refresh_content(&mut self) {
        self.content = self.surface.serialized_content();
    }

    /// Content as last read from the surface; this is what gets generated from.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn active_commands(&self) -> &BTreeSet<FormatCommand> {
        &self.active
    }

    pub fn is_active(&self, command: FormatCommand) -> bool {
        self.active.contains(&command)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
