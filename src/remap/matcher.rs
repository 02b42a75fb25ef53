//! Binding lookup against the recent-key window

use super::binding::KeyBinding;
use super::types::Key;

/// Find the binding that fires for the current window of recent keys
///
/// Suffixes of `recent` are tried from length 1 up to `longest`. For each
/// length the table is scanned in order and the first binding whose `before`
/// equals the suffix wins. The shortest matching suffix therefore takes
/// precedence: with both `j` and `j j` bound, the second `j` can never be
/// reached because the first one already fired.
///
/// Comparison is key-by-key, so `["ab", "c"]` never equals `["a", "bc"]`.
pub fn find_binding<'a>(
    bindings: &'a [KeyBinding],
    recent: &[Key],
    longest: usize,
) -> Option<&'a KeyBinding> {
    let longest = longest.min(recent.len());

    (1..=longest).find_map(|len| {
        let suffix = &recent[recent.len() - len..];
        bindings.iter().find(|b| b.before() == suffix)
    })
}
