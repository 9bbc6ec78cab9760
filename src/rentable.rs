/// A reusable buffer slot.
///
/// While the buffer is out, further rents get a fresh empty `Vec`. Only one buffer is
/// kept when they come back: whichever has the most capacity.
#[derive(Debug, Default)]
pub(crate) struct Rentable<T> {
    slot: Option<Vec<T>>,
}

impl<T> Rentable<T> {
    pub(crate) fn new(buf: Vec<T>) -> Rentable<T> { Rentable { slot: Some(buf) } }

    pub(crate) fn is_out(&self) -> bool { self.slot.is_none() }

    #[inline]
    pub(crate) fn rent(&mut self) -> Vec<T> { self.slot.take().unwrap_or_default() }

    #[inline]
    pub(crate) fn replace(&mut self, buf: Vec<T>) {
        let keep = match &self.slot {
            Some(kept) => buf.capacity() > kept.capacity(),
            None => true,
        };
        if keep {
            self.slot = Some(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_rent_gets_fresh_value() {
        let mut r = Rentable::new(Vec::<u8>::with_capacity(16));
        let outer = r.rent();
        assert!(r.is_out());
        let inner = r.rent();
        assert_eq!(inner.capacity(), 0);
        r.replace(inner);
        assert!(!r.is_out());
        r.replace(outer);
        assert!(r.rent().capacity() >= 16);
    }

    #[test]
    fn grown_inner_buffer_is_kept() {
        let mut r = Rentable::new(Vec::<u8>::with_capacity(4));
        let outer = r.rent();
        let mut inner = r.rent();
        inner.reserve(64);
        r.replace(outer);
        r.replace(inner);
        assert!(r.rent().capacity() >= 64);
    }

    #[test]
    fn capacity_survives_a_round_trip() {
        let mut r = Rentable::new(Vec::<u8>::with_capacity(32));
        let mut v = r.rent();
        v.extend_from_slice(&[1, 2, 3]);
        v.clear();
        r.replace(v);
        assert!(r.rent().capacity() >= 32);
    }
}
