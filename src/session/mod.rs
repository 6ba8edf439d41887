pub mod format;
pub mod sentence;
pub mod syllable;

/// What an exercise asks its parent to do after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuation {
    Stay,
    AdvanceToSentence,
}
