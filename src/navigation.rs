use rand::seq::SliceRandom;
use rand::Rng;

use crate::files::ImageEntry;

/// What the view should do after the current entry was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The list is now empty and the cursor is cleared.
    Empty,
    /// Load this entry, it is the new current one.
    Reload(ImageEntry),
}

/// Ordered file list plus cursor. `index == None` means nothing is loaded.
#[derive(Debug, Default)]
pub struct Navigation {
    canonical: Vec<ImageEntry>,
    active: Vec<ImageEntry>,
    index: Option<usize>,
    shuffled: bool,
}

impl Navigation {
    pub fn set_list(&mut self, entries: Vec<ImageEntry>, start_index: usize) {
        self.canonical = entries.clone();
        self.active = entries;
        self.shuffled = false;
        self.index = if self.active.is_empty() {
            None
        } else {
            Some(start_index.min(self.active.len() - 1))
        };
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.active
    }

    pub fn current(&self) -> Option<&ImageEntry> {
        self.index.and_then(|index| self.active.get(index))
    }

    pub fn next(&mut self) -> Option<&ImageEntry> {
        self.step(1)
    }

    pub fn prev(&mut self) -> Option<&ImageEntry> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<&ImageEntry> {
        let len = self.active.len();
        if len == 0 {
            return None;
        }
        let current = self.index.unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.index = Some(next);
        self.active.get(next)
    }

    pub fn first(&mut self) -> Option<&ImageEntry> {
        self.jump_to(0)
    }

    pub fn last(&mut self) -> Option<&ImageEntry> {
        self.jump_to(self.active.len().checked_sub(1)?)
    }

    fn jump_to(&mut self, index: usize) -> Option<&ImageEntry> {
        if index >= self.active.len() {
            return None;
        }
        self.index = Some(index);
        self.active.get(index)
    }

    /// Flips between canonical and shuffled order and returns the entry to
    /// load, if any.
    pub fn toggle_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&ImageEntry> {
        if self.canonical.is_empty() {
            return None;
        }

        if self.shuffled {
            let displayed = self.current().cloned();
            self.active = self.canonical.clone();
            self.shuffled = false;
            let index = displayed
                .and_then(|entry| self.active.iter().position(|candidate| *candidate == entry))
                .unwrap_or(0);
            self.index = Some(index);
        } else {
            let displayed = self.current().cloned();
            let mut order = self.canonical.clone();
            order.shuffle(rng);
            // The displayed entry leads the shuffled order so the cursor reset
            // to 0 keeps showing it.
            if let Some(position) = displayed
                .and_then(|entry| order.iter().position(|candidate| *candidate == entry))
            {
                order[..=position].rotate_right(1);
            }
            self.active = order;
            self.shuffled = true;
            self.index = Some(0);
        }
        self.current()
    }

    /// Drops the current entry from both orders.
    pub fn remove_current(&mut self) -> Option<Removal> {
        let index = self.index?;
        if index >= self.active.len() {
            return None;
        }
        let removed = self.active.remove(index);
        if let Some(position) = self.canonical.iter().position(|entry| *entry == removed) {
            self.canonical.remove(position);
        }

        if self.active.is_empty() {
            self.index = None;
            return Some(Removal::Empty);
        }

        let index = if index >= self.active.len() { 0 } else { index };
        self.index = Some(index);
        Some(Removal::Reload(self.active[index].clone()))
    }
}
