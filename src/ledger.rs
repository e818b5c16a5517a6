//! Fixed-capacity circular buffer used to count stock units.

/// A fixed-capacity FIFO of stock units.
///
/// Units go in at the rear cursor and come out at the front cursor; both
/// wrap around the backing slots. The capacity never changes after
/// construction and every operation is O(1).
#[derive(Debug)]
pub struct StockLedger<T> {
    slots: Box<[Option<T>]>,
    front: usize,
    rear: usize,
    len: usize,
}

impl<T> StockLedger<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            front: 0,
            rear: 0,
            len: 0,
        }
    }

    /// Add one unit at the rear.
    ///
    /// A full ledger hands the unit back untouched.
    pub fn try_add(&mut self, unit: T) -> Result<(), T> {
        if self.is_full() {
            return Err(unit);
        }
        self.slots[self.rear] = Some(unit);
        self.rear = (self.rear + 1) % self.capacity();
        self.len += 1;
        Ok(())
    }

    /// Remove one unit from the front, or `None` when empty.
    pub fn try_remove(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let unit = self.slots[self.front].take();
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;
        unit
    }

    /// Drop every unit and rewind both cursors.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.front = 0;
        self.rear = 0;
        self.len = 0;
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn count(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
