//! Transient flash messages. A new message replaces the previous one and
//! dismisses itself after a fixed delay.

use std::sync::atomic::{AtomicU64, Ordering};

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::models::UploadOutcome;

pub const DISMISS_MS: u32 = 5_000;

// Distinguishes consecutive identical messages, so reposting the same
// text still rekeys the dismiss timer.
static NEXT_STAMP: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    fn css_class(&self) -> &'static str {
        match self {
            Tone::Success => "bg-green-50 border-green-200 text-green-700",
            Tone::Error => "bg-red-50 border-red-200 text-red-700",
            Tone::Warning => "bg-amber-50 border-amber-200 text-amber-700",
            Tone::Info => "bg-blue-50 border-blue-200 text-blue-700",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Flash {
    pub tone: Tone,
    pub text: String,
    stamp: u64,
}

impl Flash {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Flash {
            tone,
            text: text.into(),
            stamp: NEXT_STAMP.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Flash::new(Tone::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Flash::new(Tone::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Flash::new(Tone::Warning, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Flash::new(Tone::Info, text)
    }
}

/// Message for a finished CSV import. A partial import is still an HTTP
/// success; only the tone and wording change.
pub fn import_flash(outcome: &UploadOutcome) -> Flash {
    if outcome.error_count > 0 {
        Flash::warning(format!(
            "Imported {} expenses. {} errors encountered.",
            outcome.imported_count, outcome.error_count
        ))
    } else {
        Flash::success(format!(
            "Successfully imported {} expenses!",
            outcome.imported_count
        ))
    }
}

#[derive(Properties, PartialEq)]
pub struct FlashBannerProps {
    pub flash: Option<Flash>,
    pub on_dismiss: Callback<()>,
}

#[function_component(FlashBanner)]
pub fn flash_banner(props: &FlashBannerProps) -> Html {
    {
        let flash = props.flash.clone();
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |current| {
                let timer = current.as_ref().map(|_| {
                    Timeout::new(DISMISS_MS, move || on_dismiss.emit(()))
                });
                move || drop(timer)
            },
            flash,
        );
    }

    match &props.flash {
        Some(flash) => html! {
            <div class={format!("border rounded-lg px-4 py-3 text-sm font-medium {}", flash.tone.css_class())}>
                { flash.text.clone() }
            </div>
        },
        None => html! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_import_is_success_toned() {
        let outcome = UploadOutcome { imported_count: 12, error_count: 0 };
        let flash = import_flash(&outcome);
        assert_eq!(flash.tone, Tone::Success);
        assert_eq!(flash.text, "Successfully imported 12 expenses!");
    }

    #[test]
    fn partial_import_is_warning_toned() {
        let outcome = UploadOutcome { imported_count: 8, error_count: 3 };
        let flash = import_flash(&outcome);
        assert_eq!(flash.tone, Tone::Warning);
        assert_eq!(flash.text, "Imported 8 expenses. 3 errors encountered.");
    }

    #[test]
    fn reposting_the_same_message_restarts_the_timer() {
        let first = Flash::success("Expense deleted successfully!");
        let second = Flash::success("Expense deleted successfully!");
        assert_eq!(first.text, second.text);
        assert_ne!(first, second, "a repost must rekey the dismiss timer");
    }

    #[test]
    fn the_two_import_messages_differ() {
        let clean = import_flash(&UploadOutcome { imported_count: 5, error_count: 0 });
        let partial = import_flash(&UploadOutcome { imported_count: 5, error_count: 1 });
        assert_ne!(clean.tone, partial.tone);
        assert_ne!(clean.text, partial.text);
    }
}
