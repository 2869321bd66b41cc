#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    Help,
    Research,
}

impl ModalId {
    pub const ALL: [ModalId; 2] = [ModalId::Help, ModalId::Research];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModalTransition {
    Unchanged,
    Opened,
    /// `restore_scroll` is set when the last open modal closed and the page
    /// should return to the offset recorded when the lock was taken.
    Closed { restore_scroll: Option<f64> },
}

/// Open flags for both dialogs plus the page scroll lock they share.
///
/// The first modal to open records the page offset; the lock is released only
/// when no modal remains open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModalState {
    help_open: bool,
    research_open: bool,
    scroll_lock: Option<f64>,
}

impl ModalState {
    pub fn is_open(&self, modal: ModalId) -> bool {
        match modal {
            ModalId::Help => self.help_open,
            ModalId::Research => self.research_open,
        }
    }

    pub fn any_open(&self) -> bool {
        self.help_open || self.research_open
    }

    pub fn scroll_lock(&self) -> Option<f64> {
        self.scroll_lock
    }

    pub fn open(&mut self, modal: ModalId, scroll_offset: f64) -> ModalTransition {
        if self.is_open(modal) {
            return ModalTransition::Unchanged;
        }
        if self.scroll_lock.is_none() {
            self.scroll_lock = Some(scroll_offset.max(0.0));
        }
        self.set_open(modal, true);
        ModalTransition::Opened
    }

    pub fn close(&mut self, modal: ModalId) -> ModalTransition {
        if !self.is_open(modal) {
            return ModalTransition::Unchanged;
        }
        self.set_open(modal, false);
        let restore_scroll = if self.any_open() {
            None
        } else {
            self.scroll_lock.take()
        };
        ModalTransition::Closed { restore_scroll }
    }

    pub fn toggle(&mut self, modal: ModalId, scroll_offset: f64) -> ModalTransition {
        if self.is_open(modal) {
            self.close(modal)
        } else {
            self.open(modal, scroll_offset)
        }
    }

    fn set_open(&mut self, modal: ModalId, open: bool) {
        match modal {
            ModalId::Help => self.help_open = open,
            ModalId::Research => self.research_open = open,
        }
    }
}
