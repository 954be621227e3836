use glam::DVec3;

/// A fixed-capacity history of a particle's most recent positions.
///
/// For each particle, this buffer stores:
///
/// - The last `capacity` positions, newest logically at index 0.
/// - `filled`: how many positions have been written so far, saturating
///   at the capacity.
/// - `visible`: how many of the newest entries are currently eligible
///   for display (`visible <= filled` always).
///
/// This allows a renderer to draw a fading line of variable length
/// without the simulation ever reallocating.
///
/// Internally the buffer is a ring: `head` indexes the newest entry in
/// `entries`, and older entries follow at increasing offsets modulo the
/// capacity. Pushing moves the cursor instead of shifting elements.
#[derive(Debug)]
pub struct TrailBuffer {
    /// Backing storage; always exactly `capacity` slots.
    entries: Vec<DVec3>,
    /// Index of the newest entry in `entries`.
    head: usize,
    /// Positions written so far, saturating at capacity.
    filled: usize,
    /// Newest entries currently eligible for display.
    visible: usize,
}

impl TrailBuffer {
    /// Creates a new [`TrailBuffer`] with the given capacity.
    ///
    /// Every slot is pre-filled with `initial`, so the storage never
    /// exposes uninitialized positions; `filled` and `visible` start at
    /// `0`, so nothing is reported as history yet.
    ///
    /// ### Parameters
    /// - `capacity` - Number of positions the buffer can hold. Must be
    ///   at least 1; [`crate::config::Config::validate`] enforces this
    ///   upstream.
    /// - `initial` - Position used to pre-fill every slot.
    ///
    /// ### Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize, initial: DVec3) -> Self {
        assert!(capacity > 0, "trail capacity must be at least 1");
        Self {
            entries: vec![initial; capacity],
            head: 0,
            filled: 0,
            visible: 0,
        }
    }

    /// Returns the fixed capacity chosen at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns how many positions have been written, saturating at the
    /// capacity. Only decreases on [`TrailBuffer::reset`].
    #[inline]
    pub fn filled_len(&self) -> usize {
        self.filled
    }

    /// Returns the number of entries currently eligible for display.
    #[inline]
    pub fn visible_len(&self) -> usize {
        self.visible
    }

    /// Inserts `pos` as the new newest entry.
    ///
    /// Once the buffer is full, each push overwrites the oldest entry;
    /// earlier entries keep their relative order.
    ///
    /// ### Parameters
    /// - `pos` - Position that becomes logical index 0.
    pub fn push(&mut self, pos: DVec3) {
        let cap = self.entries.len();
        // Step the cursor toward the oldest end; the slot it lands on is
        // either unused or holds the oldest entry, which is evicted.
        self.head = (self.head + cap - 1) % cap;
        self.entries[self.head] = pos;
        if self.filled < cap {
            self.filled += 1;
        }
    }

    /// Sets how many of the newest entries are eligible for display.
    ///
    /// The value is clamped into `[0, filled_len()]`; requesting more
    /// entries than have been written never exposes pre-fill slots.
    ///
    /// ### Parameters
    /// - `n` - Requested visible length.
    #[inline]
    pub fn set_visible_len(&mut self, n: usize) {
        self.visible = n.min(self.filled);
    }

    /// Returns the newest `visible_len()` positions, newest first.
    ///
    /// Before any push this iterator is empty.
    pub fn visible_prefix(&self) -> impl Iterator<Item = DVec3> + '_ {
        let cap = self.entries.len();
        (0..self.visible).map(move |i| self.entries[(self.head + i) % cap])
    }

    /// Reinitializes every slot to `pos` and zeroes both counters.
    ///
    /// After this call the buffer behaves exactly like a freshly
    /// constructed one; no stale history remains.
    ///
    /// ### Parameters
    /// - `pos` - Position used to re-fill every slot.
    pub fn reset(&mut self, pos: DVec3) {
        for e in &mut self.entries {
            *e = pos;
        }
        self.head = 0;
        self.filled = 0;
        self.visible = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: f64) -> DVec3 {
        DVec3::splat(v)
    }

    #[test]
    fn new_buffer_reports_no_history() {
        let buf = TrailBuffer::new(8, p(0.0));

        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.filled_len(), 0);
        assert_eq!(buf.visible_len(), 0);
        assert_eq!(buf.visible_prefix().count(), 0);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_panics() {
        TrailBuffer::new(0, p(0.0));
    }

    #[test]
    fn push_increments_filled_until_saturation() {
        let mut buf = TrailBuffer::new(3, p(0.0));

        for i in 0..5 {
            buf.push(p(i as f64));
            assert_eq!(buf.filled_len(), (i + 1).min(3));
        }
        assert_eq!(buf.capacity(), 3);
    }

    #[test]
    fn eviction_keeps_newest_first_order() {
        // Six pushes into capacity 5: the first push gets evicted.
        let mut buf = TrailBuffer::new(5, p(0.0));
        for i in 0..=5 {
            buf.push(p(i as f64));
        }

        assert_eq!(buf.filled_len(), 5);

        buf.set_visible_len(5);
        let contents: Vec<DVec3> = buf.visible_prefix().collect();
        assert_eq!(contents, vec![p(5.0), p(4.0), p(3.0), p(2.0), p(1.0)]);

        // (0, 0, 0) was the first push and must be gone.
        assert!(!contents.contains(&p(0.0)));
    }

    #[test]
    fn set_visible_len_clamps_to_filled() {
        let mut buf = TrailBuffer::new(10, p(0.0));
        buf.push(p(1.0));
        buf.push(p(2.0));

        buf.set_visible_len(usize::MAX);
        assert_eq!(buf.visible_len(), 2);

        buf.set_visible_len(1);
        assert_eq!(buf.visible_len(), 1);

        buf.set_visible_len(0);
        assert_eq!(buf.visible_len(), 0);
    }

    #[test]
    fn visible_prefix_returns_newest_entries() {
        let mut buf = TrailBuffer::new(4, p(0.0));
        for i in 1..=3 {
            buf.push(p(i as f64));
        }

        buf.set_visible_len(2);
        let prefix: Vec<DVec3> = buf.visible_prefix().collect();
        assert_eq!(prefix, vec![p(3.0), p(2.0)]);
    }

    #[test]
    fn visible_prefix_wraps_around_the_ring() {
        let mut buf = TrailBuffer::new(3, p(0.0));
        for i in 1..=7 {
            buf.push(p(i as f64));
        }

        buf.set_visible_len(3);
        let prefix: Vec<DVec3> = buf.visible_prefix().collect();
        assert_eq!(prefix, vec![p(7.0), p(6.0), p(5.0)]);
    }

    #[test]
    fn reset_clears_counters_and_stale_data() {
        let mut buf = TrailBuffer::new(4, p(0.0));
        for i in 1..=6 {
            buf.push(p(i as f64));
        }
        buf.set_visible_len(4);

        buf.reset(p(9.0));

        assert_eq!(buf.filled_len(), 0);
        assert_eq!(buf.visible_len(), 0);
        assert_eq!(buf.visible_prefix().count(), 0);

        // History restarts from scratch after the reset.
        buf.push(p(10.0));
        buf.set_visible_len(4);
        assert_eq!(buf.visible_len(), 1);
        let prefix: Vec<DVec3> = buf.visible_prefix().collect();
        assert_eq!(prefix, vec![p(10.0)]);
    }
}
