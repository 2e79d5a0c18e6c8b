//! Change notification for form fields.
//!
//! A reactive UI layer subscribes to the form and re-reads whichever field
//! was named in the notification.

use std::fmt;

/// Bindable fields of the book edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    PublicationYear,
    ErrorMessage,
    AuthorChoices,
    SelectedAuthor,
}

/// Callback invoked after a field changes
pub type ChangeListener = Box<dyn FnMut(FormField)>;

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<(SubscriptionId, ChangeListener)>,
    next_id: usize,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the subscription was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Notify listeners in subscription order
    pub fn publish(&mut self, field: FormField) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(field);
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
