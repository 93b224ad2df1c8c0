use serde::{Deserialize, Serialize};
use serde_binary::binary_stream::Endian;
use thiserror::Error;

use crate::describe::Description;
use crate::nfa::{Automaton, CompileError};
use crate::postfix::{ParsePostfixError, Postfix};

const ENDIAN: Endian = Endian::Little;

// what gets written to disk: enough to redisplay an automaton, and since the
// postfix is kept, enough to rebuild the live graph as well
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAutomaton {
    pub postfix: String,
    pub transitions: String,
    pub start: String,
    pub accept: String,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode automaton: {0}")]
    Encode(serde_binary::Error),
    #[error("failed to decode automaton: {0}")]
    Decode(serde_binary::Error),
    #[error("saved postfix is malformed")]
    Postfix(#[from] ParsePostfixError),
    #[error("saved postfix does not compile")]
    Compile(#[from] CompileError),
    #[error("rebuilt automaton does not match the saved transitions")]
    Mismatch,
}

impl SavedAutomaton {
    pub fn new(automaton: &Automaton, postfix: &Postfix) -> SavedAutomaton {
        let description = automaton.describe();
        SavedAutomaton {
            postfix: postfix.to_string(),
            transitions: description.transition_text(),
            start: description.start,
            accept: description.accept,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        serde_binary::to_vec(self, ENDIAN).map_err(PersistError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<SavedAutomaton, PersistError> {
        serde_binary::from_slice(bytes, ENDIAN).map_err(PersistError::Decode)
    }

    /// The saved form as it was displayed when it was built.
    pub fn description(&self) -> Description {
        Description {
            transitions: self.transitions.lines().map(str::to_string).collect(),
            start: self.start.clone(),
            accept: self.accept.clone(),
        }
    }

    /// Rebuilds a live automaton from the stored postfix, so that a loaded
    /// automaton can be simulated again. Fails if the rebuilt graph does not
    /// describe itself the same way the record does.
    pub fn restore(&self) -> Result<(Automaton, Postfix), PersistError> {
        let postfix: Postfix = self.postfix.parse()?;
        let automaton = Automaton::from_postfix(&postfix)?;
        if automaton.describe() != self.description() {
            return Err(PersistError::Mismatch);
        }

        Ok((automaton, postfix))
    }
}
