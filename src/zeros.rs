use crate::error::Error;
use crate::try_filled;

const LIMB_BITS: usize = u64::BITS as usize;

/// Fixed-size bitset of cell positions that can hand back an arbitrary member
/// in O(1).
///
/// Non-empty limbs are threaded on a doubly linked list headed by `first`, so
/// neither [`ZeroIndex::any`] nor [`ZeroIndex::clear`] has to walk past empty
/// words.
#[derive(Debug)]
pub(crate) struct ZeroIndex {
    limbs: Vec<u64>,
    prev: Vec<Option<usize>>,
    next: Vec<Option<usize>>,
    first: Option<usize>,
}

impl ZeroIndex {
    pub(crate) fn with_capacity(bits: usize) -> Result<Self, Error> {
        let count = bits.div_ceil(LIMB_BITS);

        Ok(Self {
            limbs: try_filled(count, 0)?,
            prev: try_filled(count, None)?,
            next: try_filled(count, None)?,
            first: None,
        })
    }

    pub(crate) fn set(&mut self, pos: usize) {
        let limb = pos / LIMB_BITS;
        let was_empty = self.limbs[limb] == 0;
        self.limbs[limb] |= 1u64 << (pos % LIMB_BITS);

        if was_empty {
            if let Some(head) = self.first {
                self.prev[head] = Some(limb);
            }
            self.prev[limb] = None;
            self.next[limb] = self.first;
            self.first = Some(limb);
        }
    }

    pub(crate) fn unset(&mut self, pos: usize) {
        let limb = pos / LIMB_BITS;
        if self.limbs[limb] == 0 {
            return;
        }

        self.limbs[limb] &= !(1u64 << (pos % LIMB_BITS));

        if self.limbs[limb] == 0 {
            self.unlink(limb);
        }
    }

    /// Lowest set position of the most recently populated limb.
    pub(crate) fn any(&self) -> Option<usize> {
        self.first
            .map(|limb| limb * LIMB_BITS + self.limbs[limb].trailing_zeros() as usize)
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub(crate) fn clear(&mut self) {
        while let Some(limb) = self.first {
            self.limbs[limb] = 0;
            self.unlink(limb);
        }
    }

    fn unlink(&mut self, limb: usize) {
        let prev = self.prev[limb];
        let next = self.next[limb];
        if let Some(n) = next {
            self.prev[n] = prev;
        }
        match prev {
            Some(p) => self.next[p] = next,
            None => self.first = next,
        }
        self.prev[limb] = None;
        self.next[limb] = None;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn allocation_failure_is_reported() {
        assert!(matches!(
            ZeroIndex::with_capacity(usize::MAX),
            Err(Error::OutOfMemory(_))
        ));
    }

    #[test]
    fn empty() {
        let index = ZeroIndex::with_capacity(200).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.any(), None);
    }

    #[test]
    fn set_then_unset() {
        let mut index = ZeroIndex::with_capacity(200).unwrap();
        index.set(130);
        assert_eq!(index.any(), Some(130));
        index.unset(130);
        assert_eq!(index.any(), None);
    }

    #[test]
    fn any_returns_lowest_bit_of_head_limb() {
        let mut index = ZeroIndex::with_capacity(256).unwrap();
        index.set(5);
        index.set(3);
        assert_eq!(index.any(), Some(3));

        // limb 2 becomes non-empty last, so it is the head
        index.set(150);
        index.set(140);
        assert_eq!(index.any(), Some(140));

        index.unset(140);
        index.unset(150);
        assert_eq!(index.any(), Some(3));
    }

    #[test]
    fn unlink_middle_limb() {
        let mut index = ZeroIndex::with_capacity(64 * 4).unwrap();
        index.set(10);
        index.set(70);
        index.set(200);
        // list is 3 -> 1 -> 0
        index.unset(70);
        assert_eq!(index.any(), Some(200));
        index.unset(200);
        assert_eq!(index.any(), Some(10));
        index.unset(10);
        assert!(index.is_empty());
    }

    #[test]
    fn unset_absent_is_noop() {
        let mut index = ZeroIndex::with_capacity(128).unwrap();
        index.unset(7);
        index.set(8);
        index.unset(7);
        index.unset(100);
        assert_eq!(index.any(), Some(8));
    }

    #[test]
    fn set_is_idempotent() {
        let mut index = ZeroIndex::with_capacity(64).unwrap();
        index.set(63);
        index.set(63);
        index.unset(63);
        assert!(index.is_empty());
    }

    #[test]
    fn clear_then_reuse() {
        let mut index = ZeroIndex::with_capacity(1000).unwrap();
        for pos in (0..1000).step_by(37) {
            index.set(pos);
        }
        index.clear();
        assert!(index.is_empty());
        index.set(999);
        assert_eq!(index.any(), Some(999));
    }

    #[test]
    fn drains_every_member() {
        let mut index = ZeroIndex::with_capacity(500).unwrap();
        let members: Vec<usize> = (0..500).filter(|p| p % 3 == 0 || p % 7 == 0).collect();
        members.iter().for_each(|&p| index.set(p));

        let mut drained = Vec::new();
        while let Some(p) = index.any() {
            index.unset(p);
            drained.push(p);
        }
        drained.sort_unstable();
        assert_eq!(drained, members);
    }
}
