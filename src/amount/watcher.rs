use std::{cell::Cell, rc::Rc};

use crate::amount::{Amount, NormalizationMode, normalize::normalize_with};
use crate::config::FormatConfig;
use crate::field::{EditField, ListenerId, TextWatcher};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatcherState {
    Idle,
    Normalizing,
}

/// Reformats an amount field on every change and reports the parsed amount.
///
/// The watcher does not own its field. It only remembers the subscription it
/// got when attached; a detached watcher ignores every notification.
pub struct CurrencyWatcher {
    mode: NormalizationMode,
    config: FormatConfig,
    subscription: Cell<Option<ListenerId>>,
    state: Cell<WatcherState>,
    last_amount: Cell<Amount>,
    is_active: Box<dyn Fn() -> bool>,
    on_amount: Box<dyn Fn(Amount)>,
}

impl CurrencyWatcher {
    pub fn new(mode: NormalizationMode) -> Self {
        Self {
            mode,
            config: FormatConfig::default(),
            subscription: Cell::new(None),
            state: Cell::new(WatcherState::Idle),
            last_amount: Cell::new(0.0),
            is_active: Box::new(|| true),
            on_amount: Box::new(|_| {}),
        }
    }

    pub fn with_config(mut self, config: FormatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn on_amount(mut self, callback: impl Fn(Amount) + 'static) -> Self {
        self.on_amount = Box::new(callback);
        self
    }

    /// Amounts are only reported while `predicate` holds; reports made while
    /// it does not are dropped.
    pub fn active_when(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.is_active = Box::new(predicate);
        self
    }

    pub fn attach(self, field: &EditField) -> Rc<Self> {
        let watcher = Rc::new(self);
        let id = field.add_text_changed_listener(watcher.clone());
        watcher.subscription.set(Some(id));
        watcher
    }

    pub fn detach(&self, field: &EditField) {
        if let Some(id) = self.subscription.take() {
            field.remove_text_changed_listener(id);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.get().is_some()
    }

    pub fn mode(&self) -> NormalizationMode {
        self.mode
    }

    pub fn state(&self) -> WatcherState {
        self.state.get()
    }

    pub fn amount(&self) -> Amount {
        self.last_amount.get()
    }

    fn report(&self, amount: Amount) {
        self.last_amount.set(amount);
        if (self.is_active)() {
            (self.on_amount)(amount);
        } else {
            tracing::debug!(amount, "host inactive, amount not reported");
        }
    }
}

impl TextWatcher for CurrencyWatcher {
    fn after_text_changed(&self, field: &EditField) {
        let Some(id) = self.subscription.get() else {
            return;
        };
        if self.state.get() == WatcherState::Normalizing {
            tracing::debug!("ignoring re-entrant change notification");
            return;
        }

        let text = field.text();
        if text.is_empty() {
            self.report(0.0);
            return;
        }

        self.state.set(WatcherState::Normalizing);
        let normalized = normalize_with(&text, self.mode, &self.config);
        {
            let _suspended = field.suspend(id);
            field.set_text(&normalized.display);
            field.set_selection(normalized.display.chars().count());
        }
        self.state.set(WatcherState::Idle);

        self.report(normalized.amount);
    }
}
