//! In-memory editable text field.
//!
//! Positions (caret, edit ranges) are char indices. Change listeners are
//! notified synchronously on the thread that edits the field; a listener that
//! writes back into the field must [`EditField::suspend`] itself first.

use std::{
    cell::{Cell, RefCell},
    ops::Range,
    rc::Rc,
};

use crate::utils::byte_offset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub trait TextWatcher {
    fn before_text_changed(&self, _text: &str, _start: usize, _count: usize, _after: usize) {}

    fn on_text_changed(&self, _text: &str, _start: usize, _before: usize, _count: usize) {}

    fn after_text_changed(&self, field: &EditField);
}

pub trait InputFilter {
    /// Whether replacing `range` of `current` with `inserted` is allowed.
    fn accepts(&self, current: &str, range: Range<usize>, inserted: &str) -> bool;
}

type Subscription = (ListenerId, Rc<dyn TextWatcher>);

#[derive(Default)]
pub struct EditField {
    text: RefCell<String>,
    caret: Cell<usize>,
    filters: RefCell<Vec<Box<dyn InputFilter>>>,
    listeners: RefCell<Vec<Subscription>>,
    suspended: RefCell<Vec<(usize, Subscription)>>,
    next_id: Cell<u64>,
}

impl EditField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.text.borrow().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.borrow().is_empty()
    }

    pub fn caret(&self) -> usize {
        self.caret.get()
    }

    pub fn set_selection(&self, index: usize) {
        self.caret.set(index.min(self.len()));
    }

    pub fn add_filter(&self, filter: impl InputFilter + 'static) {
        self.filters.borrow_mut().push(Box::new(filter));
    }

    pub fn add_text_changed_listener(&self, listener: Rc<dyn TextWatcher>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    /// Unsubscribes `id`, including while it is suspended; the pending
    /// suspension then has nothing to restore.
    pub fn remove_text_changed_listener(&self, id: ListenerId) -> Option<Rc<dyn TextWatcher>> {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|(existing, _)| *existing == id) {
            return Some(listeners.remove(index).1);
        }
        let mut suspended = self.suspended.borrow_mut();
        let index = suspended.iter().position(|(_, (existing, _))| *existing == id)?;
        Some(suspended.remove(index).1.1)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Unsubscribes `id` until the returned guard is dropped, then puts it
    /// back at its original position.
    #[must_use]
    pub fn suspend(&self, id: ListenerId) -> Suspension<'_> {
        let mut listeners = self.listeners.borrow_mut();
        let index = listeners.iter().position(|(existing, _)| *existing == id);
        if let Some(index) = index {
            let subscription = listeners.remove(index);
            self.suspended.borrow_mut().push((index, subscription));
        }
        Suspension {
            field: self,
            id: index.map(|_| id),
        }
    }

    /// Replaces the whole text. Input filters do not apply to programmatic
    /// writes.
    pub fn set_text(&self, text: &str) {
        let len = self.len();
        self.apply(0, len, text);
    }

    /// User edit of the chars in `range`. Returns `false` when the range is
    /// invalid or an input filter rejects the edit; the text is then left
    /// untouched.
    pub fn replace(&self, range: Range<usize>, inserted: &str) -> bool {
        let current = self.text();
        if range.start > range.end || byte_offset(&current, range.end).is_none() {
            return false;
        }
        let rejected = self
            .filters
            .borrow()
            .iter()
            .any(|filter| !filter.accepts(&current, range.clone(), inserted));
        if rejected {
            tracing::debug!(%current, inserted, "edit rejected by input filter");
            return false;
        }
        self.apply(range.start, range.end - range.start, inserted);
        true
    }

    /// Inserts at the caret, like a keystroke.
    pub fn type_text(&self, inserted: &str) -> bool {
        let caret = self.caret();
        self.replace(caret..caret, inserted)
    }

    /// Deletes the char before the caret, like backspace.
    pub fn delete_backward(&self) -> bool {
        match self.caret() {
            0 => false,
            caret => self.replace(caret - 1..caret, ""),
        }
    }

    fn apply(&self, start: usize, removed: usize, inserted: &str) {
        let added = inserted.chars().count();
        let snapshot: Vec<Rc<dyn TextWatcher>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        let before = self.text();
        for listener in &snapshot {
            listener.before_text_changed(&before, start, removed, added);
        }

        {
            let mut text = self.text.borrow_mut();
            let from = byte_offset(&text, start).unwrap_or(text.len());
            let to = byte_offset(&text, start + removed).unwrap_or(text.len());
            text.replace_range(from..to, inserted);
        }
        self.caret.set(start + added);

        let after = self.text();
        for listener in &snapshot {
            listener.on_text_changed(&after, start, removed, added);
        }
        for listener in &snapshot {
            listener.after_text_changed(self);
        }
    }
}

pub struct Suspension<'a> {
    field: &'a EditField,
    id: Option<ListenerId>,
}

impl Drop for Suspension<'_> {
    fn drop(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        let mut suspended = self.field.suspended.borrow_mut();
        let Some(position) = suspended.iter().position(|(_, (existing, _))| *existing == id) else {
            tracing::debug!(?id, "listener removed while suspended, not restoring");
            return;
        };
        let (index, subscription) = suspended.remove(position);
        let mut listeners = self.field.listeners.borrow_mut();
        let index = index.min(listeners.len());
        listeners.insert(index, subscription);
    }
}

type ChangeHook = Box<dyn Fn(&str, usize, usize, usize)>;
type AfterHook = Box<dyn Fn(&EditField)>;

/// Listener assembled from optional closures.
#[derive(Default)]
pub struct ClosureWatcher {
    before: Option<ChangeHook>,
    on: Option<ChangeHook>,
    after: Option<AfterHook>,
}

impl ClosureWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before(mut self, hook: impl Fn(&str, usize, usize, usize) + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    pub fn on(mut self, hook: impl Fn(&str, usize, usize, usize) + 'static) -> Self {
        self.on = Some(Box::new(hook));
        self
    }

    pub fn after(mut self, hook: impl Fn(&EditField) + 'static) -> Self {
        self.after = Some(Box::new(hook));
        self
    }
}

impl TextWatcher for ClosureWatcher {
    fn before_text_changed(&self, text: &str, start: usize, count: usize, after: usize) {
        if let Some(hook) = &self.before {
            hook(text, start, count, after);
        }
    }

    fn on_text_changed(&self, text: &str, start: usize, before: usize, count: usize) {
        if let Some(hook) = &self.on {
            hook(text, start, before, count);
        }
    }

    fn after_text_changed(&self, field: &EditField) {
        if let Some(hook) = &self.after {
            hook(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, ops::Range, rc::Rc};

    use super::{ClosureWatcher, EditField, InputFilter};

    struct NoLetters;

    impl InputFilter for NoLetters {
        fn accepts(&self, _current: &str, _range: Range<usize>, inserted: &str) -> bool {
            !inserted.chars().any(char::is_alphabetic)
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<String>>>) -> ClosureWatcher {
        let before = Rc::clone(log);
        let on = Rc::clone(log);
        let after = Rc::clone(log);
        ClosureWatcher::new()
            .before(move |text, start, count, added| {
                before.borrow_mut().push(format!("before {text:?} {start} {count} {added}"))
            })
            .on(move |text, start, removed, count| {
                on.borrow_mut().push(format!("on {text:?} {start} {removed} {count}"))
            })
            .after(move |field| after.borrow_mut().push(format!("after {:?}", field.text())))
    }

    #[test]
    fn typing_moves_caret_and_notifies_in_order() {
        let field = EditField::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        field.add_text_changed_listener(Rc::new(recorder(&log)));

        assert!(field.type_text("₦1"));
        assert_eq!(field.text(), "₦1");
        assert_eq!(field.caret(), 2);
        assert_eq!(
            *log.borrow(),
            vec![
                "before \"\" 0 0 2".to_string(),
                "on \"₦1\" 0 0 2".to_string(),
                "after \"₦1\"".to_string(),
            ]
        );
    }

    #[test]
    fn delete_backward_removes_previous_char() {
        let field = EditField::new();
        field.set_text("₦12");
        assert_eq!(field.caret(), 3);
        assert!(field.delete_backward());
        assert_eq!(field.text(), "₦1");
        field.set_selection(0);
        assert!(!field.delete_backward());
    }

    #[test]
    fn filters_guard_user_edits_only() {
        let field = EditField::new();
        field.add_filter(NoLetters);
        assert!(!field.type_text("a"));
        assert!(field.is_empty());
        assert!(field.type_text("1"));
        field.set_text("abc");
        assert_eq!(field.text(), "abc");
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let field = EditField::new();
        field.set_text("12");
        assert!(!field.replace(1..5, "3"));
        #[allow(clippy::reversed_empty_ranges)]
        let backwards = 2..1;
        assert!(!field.replace(backwards, "3"));
        assert_eq!(field.text(), "12");
    }

    #[test]
    fn suspended_listener_misses_changes_then_resumes_in_place() {
        let field = EditField::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let first_id = field.add_text_changed_listener(Rc::new(recorder(&first)));
        field.add_text_changed_listener(Rc::new(recorder(&second)));

        {
            let _suspended = field.suspend(first_id);
            assert_eq!(field.listener_count(), 1);
            field.set_text("1");
        }
        assert_eq!(field.listener_count(), 2);
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 3);

        assert!(field.remove_text_changed_listener(first_id).is_some());
        assert!(field.remove_text_changed_listener(first_id).is_none());
    }

    #[test]
    fn removing_a_suspended_listener_cancels_its_restore() {
        let field = EditField::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = field.add_text_changed_listener(Rc::new(recorder(&log)));

        {
            let _suspended = field.suspend(id);
            assert!(field.remove_text_changed_listener(id).is_some());
        }
        assert_eq!(field.listener_count(), 0);
        assert!(field.remove_text_changed_listener(id).is_none());

        field.set_text("1");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn caret_is_clamped_to_text() {
        let field = EditField::new();
        field.set_text("12");
        field.set_selection(10);
        assert_eq!(field.caret(), 2);
    }
}
