//! Reference-counted copy-on-write storage.
//!
//! A [`SharedBuffer`] is a handle to a body holding a small prefix header
//! and a contiguous array. Handles share the body until one of them writes;
//! the writer then receives a private copy ("divorce") and the other handles
//! keep observing the old contents.
//!
//! The count is not atomic, so a buffer cannot leave its thread:
//!
//! ```compile_fail
//! fn assert_send<T: Send>() {}
//! assert_send::<tessera_core::SharedBuffer<u8>>();
//! ```

use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::error::{BufferError, Result};

#[derive(Clone)]
struct Body<T, P> {
    prefix: P,
    data: Vec<T>,
}

/// Whether a buffer handle is the only owner of its body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ownership {
    /// This handle is the only one; writes happen in place.
    Owned,
    /// The body is shared by this many handles; the next write divorces.
    Shared(usize),
}

/// A shared, copy-on-write array of `T` with a prefix header `P`.
pub struct SharedBuffer<T, P = ()> {
    body: Rc<Body<T, P>>,
}

impl<T, P> SharedBuffer<T, P> {
    /// Wraps an existing vector without copying it.
    #[must_use]
    pub fn from_vec(data: Vec<T>, prefix: P) -> Self {
        Self {
            body: Rc::new(Body { prefix, data }),
        }
    }

    /// Returns a new handle to the same body. O(1).
    #[must_use]
    pub fn share(&self) -> Self {
        Self {
            body: Rc::clone(&self.body),
        }
    }

    /// Number of handles sharing the body, including this one.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.body)
    }

    /// Reports whether a write would need to divorce first.
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        match self.ref_count() {
            1 => Ownership::Owned,
            n => Ownership::Shared(n),
        }
    }

    /// Returns true if both handles point at the same body.
    #[must_use]
    pub fn is_same_body(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }

    /// An opaque identity for the body, stable while any handle lives.
    #[must_use]
    pub fn body_id(&self) -> usize {
        Rc::as_ptr(&self.body).cast::<()>() as usize
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.data.len()
    }

    /// Returns true if the buffer has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.data.is_empty()
    }

    /// Read access to the elements. Never copies.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.body.data
    }

    /// Read access to the prefix header.
    #[must_use]
    pub fn prefix(&self) -> &P {
        &self.body.prefix
    }

    /// Exchanges the bodies of two handles. O(1).
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.body, &mut other.body);
    }
}

impl<T: Default, P> SharedBuffer<T, P> {
    /// Creates a buffer of `len` default elements.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails; see [`SharedBuffer::try_acquire`].
    #[must_use]
    pub fn acquire(len: usize, prefix: P) -> Self {
        let mut data = Vec::with_capacity(len);
        data.resize_with(len, T::default);
        Self::from_vec(data, prefix)
    }

    /// Creates a buffer of `len` default elements.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfMemory`] if the allocation is refused.
    pub fn try_acquire(len: usize, prefix: P) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BufferError::OutOfMemory { requested: len })?;
        data.resize_with(len, T::default);
        Ok(Self::from_vec(data, prefix))
    }
}

impl<T: Clone, P: Clone> SharedBuffer<T, P> {
    /// Makes this handle the sole owner of its body, cloning the body if it
    /// is shared, and returns the writable parts.
    pub fn unshare_for_write(&mut self) -> (&mut P, &mut Vec<T>) {
        if Rc::strong_count(&self.body) > 1 {
            trace!(
                "divorcing shared buffer of {} elements ({} handles)",
                self.len(),
                self.ref_count()
            );
        }
        let body = Rc::make_mut(&mut self.body);
        (&mut body.prefix, &mut body.data)
    }

    /// Writable access to the elements; divorces first if shared.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.unshare_for_write().1
    }

    /// Writable access to the prefix header; divorces first if shared.
    pub fn prefix_mut(&mut self) -> &mut P {
        self.unshare_for_write().0
    }

    /// Appends elements at the end; divorces first if shared.
    pub fn append<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.unshare_for_write().1.extend(items);
    }

    /// Consumes the handle and returns the elements, copying only if the
    /// body is still shared.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match Rc::try_unwrap(self.body) {
            Ok(body) => body.data,
            Err(shared) => shared.data.clone(),
        }
    }
}

impl<T: Clone + Default, P: Clone> SharedBuffer<T, P> {
    /// Changes the length, truncating or filling with `T::default()`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails; see [`SharedBuffer::try_resize_with`].
    pub fn resize(&mut self, len: usize) {
        if let Err(err) = self.try_resize_with(len, T::default) {
            panic!("{err}");
        }
    }

    /// Changes the length, truncating or filling with `T::default()`.
    ///
    /// # Errors
    ///
    /// As for [`SharedBuffer::try_resize_with`].
    pub fn try_resize(&mut self, len: usize) -> Result<()> {
        self.try_resize_with(len, T::default)
    }
}

impl<T: Clone, P: Clone> SharedBuffer<T, P> {
    /// Changes the length, truncating or filling with values from `fill`.
    ///
    /// A shared body is not cloned in full: only the elements that survive
    /// the resize are copied into the new private body.
    ///
    /// # Errors
    ///
    /// [`BufferError::OutOfMemory`] if growing the storage is refused. The
    /// buffer is unchanged in that case.
    pub fn try_resize_with(&mut self, len: usize, fill: impl FnMut() -> T) -> Result<()> {
        let oom = |_| BufferError::OutOfMemory { requested: len };
        if let Some(body) = Rc::get_mut(&mut self.body) {
            let old = body.data.len();
            if len > old {
                body.data.try_reserve_exact(len - old).map_err(oom)?;
            }
            body.data.resize_with(len, fill);
            return Ok(());
        }

        trace!(
            "divorcing shared buffer for resize {} -> {} elements",
            self.len(),
            len
        );
        let keep = len.min(self.len());
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(oom)?;
        data.extend_from_slice(&self.body.data[..keep]);
        data.resize_with(len, fill);
        self.body = Rc::new(Body {
            prefix: self.body.prefix.clone(),
            data,
        });
        Ok(())
    }
}

impl<T, P> Clone for SharedBuffer<T, P> {
    /// Shares the body; see [`SharedBuffer::share`].
    fn clone(&self) -> Self {
        self.share()
    }
}

impl<T: Default, P: Default> Default for SharedBuffer<T, P> {
    fn default() -> Self {
        Self::from_vec(Vec::new(), P::default())
    }
}

impl<T: PartialEq, P: PartialEq> PartialEq for SharedBuffer<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_body(other)
            || (self.body.prefix == other.body.prefix && self.body.data == other.body.data)
    }
}

impl<T: Eq, P: Eq> Eq for SharedBuffer<T, P> {}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for SharedBuffer<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("prefix", &self.body.prefix)
            .field("data", &self.body.data)
            .field("refs", &self.ref_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_and_count() {
        let a: SharedBuffer<i32> = SharedBuffer::from_vec(vec![1, 2, 3], ());
        assert_eq!(a.ownership(), Ownership::Owned);

        let b = a.share();
        assert_eq!(a.ref_count(), 2);
        assert_eq!(b.ownership(), Ownership::Shared(2));
        assert!(a.is_same_body(&b));
        assert_eq!(a.body_id(), b.body_id());

        drop(b);
        assert_eq!(a.ownership(), Ownership::Owned);
    }

    #[test]
    fn test_copy_on_write_isolation() {
        let a = SharedBuffer::from_vec(vec![1, 2, 3], 7u8);
        let mut b = a.share();

        b.as_mut_slice()[0] = 10;
        *b.prefix_mut() = 9;

        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(*a.prefix(), 7);
        assert_eq!(b.as_slice(), &[10, 2, 3]);
        assert_eq!(*b.prefix(), 9);
        assert!(!a.is_same_body(&b));
        assert_eq!(a.ownership(), Ownership::Owned);
        assert_eq!(b.ownership(), Ownership::Owned);
    }

    #[test]
    fn test_write_when_owned_is_in_place() {
        let mut a: SharedBuffer<i32> = SharedBuffer::acquire(4, ());
        let id = a.body_id();
        a.as_mut_slice()[3] = 5;
        assert_eq!(a.body_id(), id);
        assert_eq!(a.as_slice(), &[0, 0, 0, 5]);
    }

    #[test]
    fn test_resize() {
        let mut a: SharedBuffer<i32> = SharedBuffer::from_vec(vec![1, 2, 3], ());
        a.resize(5);
        assert_eq!(a.as_slice(), &[1, 2, 3, 0, 0]);
        a.resize(2);
        assert_eq!(a.as_slice(), &[1, 2]);

        let b = a.share();
        a.try_resize_with(4, || 9).unwrap();
        assert_eq!(a.as_slice(), &[1, 2, 9, 9]);
        assert_eq!(b.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_append_divorces() {
        let mut a = SharedBuffer::from_vec(vec!['a'], ());
        let b = a.share();
        a.append(['b', 'c']);
        assert_eq!(a.as_slice(), &['a', 'b', 'c']);
        assert_eq!(b.as_slice(), &['a']);
    }

    #[test]
    fn test_swap_exchanges_bodies() {
        let mut a = SharedBuffer::from_vec(vec![1], ());
        let mut b = SharedBuffer::from_vec(vec![2, 3], ());
        let (ia, ib) = (a.body_id(), b.body_id());
        a.swap(&mut b);
        assert_eq!((a.body_id(), b.body_id()), (ib, ia));
        assert_eq!(a.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_out_of_memory() {
        let huge = usize::MAX / 2;
        let err = SharedBuffer::<u64>::try_acquire(huge, ()).unwrap_err();
        assert_eq!(err, BufferError::OutOfMemory { requested: huge });

        let mut a = SharedBuffer::from_vec(vec![1u64, 2], ());
        assert!(a.try_resize(huge).is_err());
        assert_eq!(a.as_slice(), &[1, 2]);

        let b = a.share();
        assert!(a.try_resize_with(huge, || 7).is_err());
        assert!(a.is_same_body(&b));
    }

    #[test]
    fn test_into_vec() {
        let a = SharedBuffer::from_vec(vec![1, 2], ());
        let b = a.share();
        assert_eq!(a.into_vec(), vec![1, 2]);
        assert_eq!(b.ref_count(), 1);
        assert_eq!(b.into_vec(), vec![1, 2]);
    }
}
