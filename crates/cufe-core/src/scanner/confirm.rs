//! Overwrite confirmation.

use crate::models::config::OverwritePolicy;

/// Decides whether an already recorded file may be overwritten.
pub trait ConfirmOverwrite {
    /// Return `true` to replace the stored record for `file_name`.
    fn confirm_overwrite(&mut self, file_name: &str) -> bool;
}

impl<F> ConfirmOverwrite for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm_overwrite(&mut self, file_name: &str) -> bool {
        self(file_name)
    }
}

/// Replace every existing record without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;

impl ConfirmOverwrite for AlwaysOverwrite {
    fn confirm_overwrite(&mut self, _file_name: &str) -> bool {
        true
    }
}

/// Keep every existing record without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverOverwrite;

impl ConfirmOverwrite for NeverOverwrite {
    fn confirm_overwrite(&mut self, _file_name: &str) -> bool {
        false
    }
}

/// Non-interactive confirmation for a policy, or `None` for [`OverwritePolicy::Ask`].
pub fn fixed_policy(policy: OverwritePolicy) -> Option<Box<dyn ConfirmOverwrite>> {
    match policy {
        OverwritePolicy::Ask => None,
        OverwritePolicy::Always => Some(Box::new(AlwaysOverwrite)),
        OverwritePolicy::Never => Some(Box::new(NeverOverwrite)),
    }
}

/// Whether a typed answer means yes. Anything else, including an empty line, is no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}
