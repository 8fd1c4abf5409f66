use copypasta::{ClipboardContext, ClipboardProvider};
use log::{debug, warn};

use crate::notice::Notice;

pub const COPIED: &str = "Copied!";

/// System clipboard, opened on first copy and held until dropped.
#[derive(Default)]
pub struct SystemClipboard {
    context: Option<ClipboardContext>,
}

impl SystemClipboard {
    pub fn copy(&mut self, text: &str) -> Notice {
        let context = match self.context.take() {
            Some(context) => context,
            None => match ClipboardContext::new() {
                Ok(context) => context,
                Err(err) => {
                    warn!("no clipboard available: {err}");
                    return Notice::error(format!("clipboard unavailable: {err}"));
                },
            },
        };
        copy_with(self.context.insert(context), text)
    }
}

pub fn copy_with<C>(clipboard: &mut C, text: &str) -> Notice
where
    C: ClipboardProvider + ?Sized,
{
    match clipboard.set_contents(text.to_owned()) {
        Ok(()) => {
            debug!("copied {} bytes to the clipboard", text.len());
            Notice::success(COPIED)
        },
        Err(err) => {
            warn!("failed to copy to clipboard: {err}");
            Notice::error(format!("clipboard write failed: {err}"))
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::error::Error;

    use super::*;

    #[derive(Default)]
    pub(crate) struct FakeClipboard {
        pub contents: Option<String>,
        pub broken: bool,
    }

    impl ClipboardProvider for FakeClipboard {
        fn get_contents(&mut self) -> Result<String, Box<dyn Error + Send + Sync + 'static>> {
            self.contents.clone().ok_or_else(|| "clipboard is empty".into())
        }

        fn set_contents(
            &mut self,
            contents: String,
        ) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
            if self.broken {
                return Err("display connection lost".into());
            }
            self.contents = Some(contents);
            Ok(())
        }
    }

    #[test]
    fn successful_copy_reports_copied() {
        let mut clipboard = FakeClipboard::default();
        let notice = copy_with(&mut clipboard, "#.#\n.#.");

        assert_eq!(notice, Notice::success(COPIED));
        assert_eq!(clipboard.contents.as_deref(), Some("#.#\n.#."));
    }

    #[test]
    fn failed_copy_reports_reason() {
        let mut clipboard = FakeClipboard { broken: true, ..FakeClipboard::default() };
        let notice = copy_with(&mut clipboard, "text");

        assert!(!notice.is_success());
        assert_eq!(notice.text, "clipboard write failed: display connection lost");
        assert_eq!(clipboard.contents, None);
    }
}
