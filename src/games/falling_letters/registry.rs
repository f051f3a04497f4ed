/// Entity registry for the letters currently on the playfield
use serde::Serialize;

/// Identifier handed out by the registry. Monotonic, never reused.
pub type LetterId = u64;

/// A letter falling down the playfield
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Letter {
    pub id: LetterId,
    pub glyph: char,
    /// Offset from the top of the playfield, grows every advance tick
    pub position: f64,
    /// Per-tick increment, fixed at spawn
    pub speed: f64,
}

/// Ordered set of live letters. Order is spawn order.
#[derive(Debug, Default)]
pub struct Registry {
    letters: Vec<Letter>,
    next_id: LetterId,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a letter under a fresh id and returns that id.
    pub fn insert(&mut self, glyph: char, position: f64, speed: f64) -> LetterId {
        let id = self.next_id;
        self.next_id += 1;
        debug_assert!(self.letters.iter().all(|l| l.id != id), "duplicate letter id {id}");

        self.letters.push(Letter { id, glyph, position, speed });
        id
    }

    /// Removes at most one letter.
    pub fn remove_by_id(&mut self, id: LetterId) -> Option<Letter> {
        let idx = self.letters.iter().position(|l| l.id == id)?;
        Some(self.letters.remove(idx))
    }

    /// Removes every letter matching `pred` and hands them back in spawn order.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<Letter>
    where
        F: FnMut(&Letter) -> bool,
    {
        let (removed, kept): (Vec<Letter>, Vec<Letter>) =
            std::mem::take(&mut self.letters).into_iter().partition(|l| pred(l));
        self.letters = kept;
        removed
    }

    /// Oldest live letter showing `glyph`.
    pub fn find_first_by_glyph(&self, glyph: char) -> Option<&Letter> {
        self.letters.iter().find(|l| l.glyph == glyph)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Letter> {
        self.letters.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Letter> {
        self.letters.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Id the next insert will receive
    #[cfg(test)]
    pub(crate) fn next_id(&self) -> LetterId {
        self.next_id
    }
}
