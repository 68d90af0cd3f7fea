//! Signals raised by the narration queue.

use stagehand_core::capability::UtteranceTicket;
use stagehand_core::generation::Generation;

/// Something the owner of the queue may need to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrationEvent {
    /// A line was handed to the engine.
    LineStarted {
        /// Ticket the engine will report back with.
        ticket: UtteranceTicket,
        /// The spoken text.
        text: String,
    },
    /// A line ended, normally or with an engine error.
    LineFinished {
        /// The finished utterance.
        ticket: UtteranceTicket,
        /// True when the engine reported an error.
        failed: bool,
    },
    /// Nothing is speaking and nothing is queued.
    Drained {
        /// Generation the drained batch belonged to.
        generation: Generation,
    },
    /// Narration is muted or the engine is missing; nothing was queued.
    Unavailable {
        /// Generation of the rejected batch.
        generation: Generation,
    },
}
