use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info};

use crate::core::notes::ActiveNotes;
use crate::messaging::types::Command;

/// Routes controller commands to the shared note set.
///
/// Producers (the stdin reader, tests) send typed commands over the
/// channel; `run` drains it on the control thread. The render context is
/// never involved: commands reach it only through the note set's atomic
/// operations.
pub struct CommandBus {
    sender: Sender<Command>,
    receiver: Receiver<Command>,
    notes: Arc<ActiveNotes>,
}

impl CommandBus {
    pub fn new(notes: Arc<ActiveNotes>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            notes,
        }
    }

    /// A sender that can be cloned into producer threads.
    pub fn sender(&self) -> Sender<Command> {
        self.sender.clone()
    }

    /// Apply one command immediately.
    pub fn dispatch(&self, command: Command) {
        apply(&self.notes, command);
    }

    /// Drain commands until every producer has hung up.
    pub fn run(self) {
        let Self {
            sender,
            receiver,
            notes,
        } = self;
        // Drop our own sender so `recv` unblocks once producers are gone.
        drop(sender);

        while let Ok(command) = receiver.recv() {
            apply(&notes, command);
        }
        info!("control channel closed");
    }
}

fn apply(notes: &ActiveNotes, command: Command) {
    match command {
        Command::Play { frequencies } => {
            if frequencies.is_empty() {
                debug!("play with no frequencies, clearing");
                notes.clear();
            } else {
                debug!("play {frequencies:?}");
                notes.replace(&frequencies);
            }
        }
        Command::Stop => {
            debug!("stop");
            notes.clear();
        }
    }
}
