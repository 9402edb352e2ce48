//! Detail overlay controller shared by every browsable section.
//!
//! At most one overlay is open per controller. While it is open the
//! page-level [`ScrollLock`] is held so the section underneath cannot move.
//! The hold is released when the overlay closes or the controller is
//! dropped; scrolling resumes once every holder has released.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};

/// Shared hold count telling the main view whether page scrolling is
/// suspended. Locked while any guard is alive.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }

    /// Lock scrolling until the returned guard is dropped.
    pub fn acquire(&self) -> ScrollGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollGuard { lock: self.clone() }
    }
}

/// One hold on a [`ScrollLock`], released on drop.
#[derive(Debug)]
pub struct ScrollGuard {
    lock: ScrollLock,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        // Each guard added exactly one hold
        self.lock.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState<Id> {
    Closed,
    Open(Id),
}

/// What the caller should do with a key after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalInput {
    /// No overlay is open; the key belongs to the section.
    Ignored,
    /// The overlay was dismissed by this key.
    Closed,
    /// The overlay is open and owns the key (scrolling, links...).
    Forward,
}

pub struct ModalController<Id> {
    state: ModalState<Id>,
    scroll: ScrollLock,
    guard: Option<ScrollGuard>,
}

impl<Id: Copy + PartialEq + std::fmt::Debug> ModalController<Id> {
    pub fn new(scroll: ScrollLock) -> Self {
        Self {
            state: ModalState::Closed,
            scroll,
            guard: None,
        }
    }

    pub fn state(&self) -> ModalState<Id> {
        self.state
    }

    pub fn open_id(&self) -> Option<Id> {
        match self.state {
            ModalState::Open(id) => Some(id),
            ModalState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// Open the overlay for `id`, replacing whatever was showing.
    ///
    /// Replacing keeps the existing hold rather than taking a second one.
    pub fn open(&mut self, id: Id) {
        if self.guard.is_none() {
            self.guard = Some(self.scroll.acquire());
        }
        log::debug!("Opening detail overlay for {id:?}");
        self.state = ModalState::Open(id);
    }

    /// Close the overlay. Returns false when it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = ModalState::Closed;
        self.guard = None;
        true
    }

    /// Esc closes; everything else goes to the overlay while it is open.
    pub fn handle_key(&mut self, code: KeyCode) -> ModalInput {
        if !self.is_open() {
            return ModalInput::Ignored;
        }
        if code == KeyCode::Esc {
            self.close();
            ModalInput::Closed
        } else {
            ModalInput::Forward
        }
    }

    /// Clicks on the backdrop close; clicks on the content do not.
    pub fn handle_click(&mut self, position: Position, content: Rect) -> ModalInput {
        if !self.is_open() {
            return ModalInput::Ignored;
        }
        if content.contains(position) {
            ModalInput::Forward
        } else {
            self.close();
            ModalInput::Closed
        }
    }

    /// Whether the dismiss key is currently listened for.
    pub fn escape_armed(&self) -> bool {
        self.is_open()
    }

    /// Whether keyboard focus sits inside the overlay.
    pub fn has_focus(&self) -> bool {
        self.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (ModalController<u32>, ScrollLock) {
        let lock = ScrollLock::new();
        (ModalController::new(lock.clone()), lock)
    }

    #[test]
    fn test_open_locks_scroll() {
        let (mut modal, lock) = controller();
        assert!(!lock.is_locked());
        modal.open(2);
        assert_eq!(modal.state(), ModalState::Open(2));
        assert!(lock.is_locked());
        assert!(modal.escape_armed());
        assert!(modal.has_focus());
    }

    #[test]
    fn test_close_restores_scroll() {
        let (mut modal, lock) = controller();
        modal.open(2);
        assert!(modal.close());
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!lock.is_locked());
        assert!(!modal.escape_armed());
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let (mut modal, lock) = controller();
        assert!(!modal.close());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_open_replaces_without_stacking() {
        let (mut modal, lock) = controller();
        modal.open(1);
        modal.open(3);
        assert_eq!(modal.open_id(), Some(3));
        modal.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_restores_previous_lock_state() {
        let lock = ScrollLock::new();
        let outer = lock.acquire();
        let mut modal = ModalController::new(lock.clone());
        modal.open(1);
        modal.close();
        assert!(lock.is_locked(), "outer holder still owns the lock");
        drop(outer);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_shared_lock_released_out_of_order() {
        let lock = ScrollLock::new();
        let mut first = ModalController::new(lock.clone());
        let mut second = ModalController::new(lock.clone());
        first.open(1);
        second.open(2);

        first.close();
        assert!(lock.is_locked(), "second overlay is still open");
        second.close();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_escape_closes() {
        let (mut modal, lock) = controller();
        modal.open(4);
        assert_eq!(modal.handle_key(KeyCode::Esc), ModalInput::Closed);
        assert!(!modal.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_other_keys_forwarded_while_open() {
        let (mut modal, _lock) = controller();
        modal.open(4);
        assert_eq!(modal.handle_key(KeyCode::Char('j')), ModalInput::Forward);
        assert!(modal.is_open());
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let (mut modal, _lock) = controller();
        assert_eq!(modal.handle_key(KeyCode::Esc), ModalInput::Ignored);
    }

    #[test]
    fn test_backdrop_click_closes() {
        let (mut modal, _lock) = controller();
        let content = Rect::new(10, 5, 40, 20);
        modal.open(1);
        assert_eq!(
            modal.handle_click(Position::new(12, 8), content),
            ModalInput::Forward
        );
        assert!(modal.is_open());
        assert_eq!(
            modal.handle_click(Position::new(2, 2), content),
            ModalInput::Closed
        );
        assert!(!modal.is_open());
    }

    #[test]
    fn test_drop_while_open_restores() {
        let lock = ScrollLock::new();
        {
            let mut modal = ModalController::new(lock.clone());
            modal.open(1);
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }
}
