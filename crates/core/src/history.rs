//! Undo/redo history
//!
//! Every store mutation made through the editor is recorded as a
//! [`Command`] that knows how to apply and revert itself. Commands are
//! grouped into [`CommandBatch`]es; one batch is one undo step.
//!
//! - A command pushed outside a batch becomes its own undo step
//! - Commands pushed between `start_batch` and `end_batch` form one step
//! - Pushing anything clears the redo stack
//! - `undo` and `redo` close an open batch before touching the stacks

use crate::store::ElementStore;
use doc_model::{Element, ElementId, ElementPatch, ViewKind};
use tracing::{debug, warn};

/// A reversible store mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Element added on top of its view's paint order
    Add { view: ViewKind, element: Element },

    /// Element removed; `layer` is the paint position it held
    Delete { view: ViewKind, element: Element, layer: Option<usize> },

    /// Partial update; `before` restores exactly the fields `after` touched
    Update { id: ElementId, before: ElementPatch, after: ElementPatch },

    /// Paint order of a view replaced
    Reorder { view: ViewKind, before: Vec<ElementId>, after: Vec<ElementId> },
}

impl Command {
    /// Apply the command's forward effect
    pub fn apply(&self, store: &mut ElementStore) {
        match self {
            Command::Add { view, element } => {
                if !store.insert_at_layer(element.clone(), *view, None) {
                    warn!(id = %element.id, "redo add skipped, element already present");
                }
            }
            Command::Delete { view, element, .. } => {
                if store.delete(&element.id, *view).is_none() {
                    warn!(id = %element.id, "redo delete skipped, element not found");
                }
            }
            Command::Update { id, after, .. } => {
                if store.update(id, after).is_none() {
                    warn!(id = %id, "update skipped, element not found");
                }
            }
            Command::Reorder { view, after, .. } => {
                store.layers_mut().set_order(*view, after.clone())
            }
        }
    }

    /// Undo the command's effect
    pub fn revert(&self, store: &mut ElementStore) {
        match self {
            Command::Add { view, element } => {
                if store.delete(&element.id, *view).is_none() {
                    warn!(id = %element.id, "undo add skipped, element not found");
                }
            }
            Command::Delete { view, element, layer } => {
                if !store.insert_at_layer(element.clone(), *view, *layer) {
                    warn!(id = %element.id, "undo delete skipped, element already present");
                }
            }
            Command::Update { id, before, .. } => {
                if store.update(id, before).is_none() {
                    warn!(id = %id, "undo update skipped, element not found");
                }
            }
            Command::Reorder { view, before, .. } => {
                store.layers_mut().set_order(*view, before.clone())
            }
        }
    }
}

/// Commands undone and redone together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBatch {
    /// Commands in application order
    pub commands: Vec<Command>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl CommandBatch {
    pub fn single(command: Command) -> Self {
        Self { commands: vec![command], description: None }
    }

    fn apply(&self, store: &mut ElementStore) {
        for command in &self.commands {
            command.apply(store);
        }
    }

    fn revert(&self, store: &mut ElementStore) {
        for command in self.commands.iter().rev() {
            command.revert(store);
        }
    }
}

/// Undo/redo stacks with batching
#[derive(Debug, Clone)]
pub struct CommandHistory {
    /// Applied batches (most recent last)
    undo_stack: Vec<CommandBatch>,

    /// Undone batches (most recent last)
    redo_stack: Vec<CommandBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Batch being built, if any
    current_batch: Option<CommandBatch>,
}

impl CommandHistory {
    /// Create a history with the default 100 undo levels
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self { undo_stack: Vec::new(), redo_stack: Vec::new(), max_levels, current_batch: None }
    }

    /// Record a command whose effect is already in the store
    pub fn push(&mut self, command: Command) {
        self.redo_stack.clear();

        match &mut self.current_batch {
            Some(batch) => batch.commands.push(command),
            None => self.push_batch(CommandBatch::single(command)),
        }
    }

    /// Apply a command to the store and record it
    pub fn execute(&mut self, command: Command, store: &mut ElementStore) {
        command.apply(store);
        self.push(command);
    }

    /// Start collecting commands into one undo step
    ///
    /// Does nothing if a batch is already open.
    pub fn start_batch(&mut self) {
        if self.current_batch.is_none() {
            self.current_batch = Some(CommandBatch::default());
        }
    }

    /// Close the open batch; an empty batch is discarded
    ///
    /// Returns `true` if a batch was pushed onto the undo stack.
    pub fn end_batch(&mut self) -> bool {
        match self.current_batch.take() {
            Some(batch) if !batch.commands.is_empty() => {
                debug!(
                    commands = batch.commands.len(),
                    description = ?batch.description,
                    "batch committed"
                );
                self.push_batch(batch);
                true
            }
            _ => false,
        }
    }

    /// Drop the open batch without recording it
    ///
    /// The caller is responsible for reverting anything the batch applied.
    pub fn discard_batch(&mut self) -> Option<CommandBatch> {
        self.current_batch.take()
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Set description for the open batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_batch(&mut self, batch: CommandBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
    }

    /// Revert the most recent undo step
    pub fn undo(&mut self, store: &mut ElementStore) -> bool {
        self.end_batch();

        let Some(batch) = self.undo_stack.pop() else {
            return false;
        };
        batch.revert(store);
        debug!(commands = batch.commands.len(), description = ?batch.description, "undo");
        self.redo_stack.push(batch);
        true
    }

    /// Re-apply the most recently undone step
    pub fn redo(&mut self, store: &mut ElementStore) -> bool {
        self.end_batch();

        let Some(batch) = self.redo_stack.pop() else {
            return false;
        };
        batch.apply(store);
        debug!(commands = batch.commands.len(), description = ?batch.description, "redo");
        self.undo_stack.push(batch);
        true
    }

    /// Check if undo would do anything, counting a non-empty open batch
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
            || self.current_batch.as_ref().is_some_and(|batch| !batch.commands.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().and_then(|batch| batch.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().and_then(|batch| batch.description.as_deref())
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Forget all history, including an open batch
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}
