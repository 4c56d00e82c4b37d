use core::fmt;
use core::mem::MaybeUninit;
use core::ops::Deref;
use core::slice;

/// A fixed-capacity vector that lives on the stack or in static memory.
///
/// Pushing past capacity hands the item back instead of growing, which is
/// how bounded reports (such as the first few mismatches) are collected
/// without a heap.
pub struct StaticVec<T: Copy, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

impl<T: Copy, const N: usize> Default for StaticVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> StaticVec<T, N> {
    pub const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, item: T) -> Result<(), T> {
        if self.len < N {
            self.data[self.len].write(item);
            self.len += 1;
            Ok(())
        } else {
            Err(item)
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            // Safety: data[0..len] is initialized.
            slice::from_raw_parts(self.data.as_ptr() as *const T, self.len)
        }
    }
}

impl<T: Copy, const N: usize> Deref for StaticVec<T, N> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T: Copy, const N: usize> Clone for StaticVec<T, N> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        for &item in self.as_slice() {
            let _ = out.push(item);
        }
        out
    }
}

impl<T: Copy + PartialEq, const N: usize> PartialEq for StaticVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Copy + fmt::Debug, const N: usize> fmt::Debug for StaticVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a, T: Copy, const N: usize> IntoIterator for &'a StaticVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}
