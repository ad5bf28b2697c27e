use std::ops::{Index, IndexMut};

/// One of the two stereo view slots.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub const COUNT: usize = 2;

    /// Both eyes in index order.
    pub const ALL: [Eye; Eye::COUNT] = [Eye::Left, Eye::Right];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Eye> {
        match index {
            0 => Some(Eye::Left),
            1 => Some(Eye::Right),
            _ => None,
        }
    }

    #[inline]
    pub const fn other(self) -> Eye {
        match self {
            Eye::Left => Eye::Right,
            Eye::Right => Eye::Left,
        }
    }
}

/// Fixed two-slot container keyed by [`Eye`].
///
/// Used for everything that exists exactly once per eye (viewports, targets,
/// poses, FOV ports). There is no way to construct one with a different slot
/// count.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PerEye<T> {
    pub left: T,
    pub right: T,
}

impl<T> PerEye<T> {
    #[inline]
    pub const fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// Builds both slots by calling `f` for `Left`, then `Right`.
    pub fn from_fn(mut f: impl FnMut(Eye) -> T) -> Self {
        let left = f(Eye::Left);
        let right = f(Eye::Right);
        Self { left, right }
    }

    /// Fallible [`from_fn`](Self::from_fn); stops at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(Eye) -> Result<T, E>) -> Result<Self, E> {
        let left = f(Eye::Left)?;
        let right = f(Eye::Right)?;
        Ok(Self { left, right })
    }

    pub fn map<U>(self, mut f: impl FnMut(Eye, T) -> U) -> PerEye<U> {
        PerEye {
            left: f(Eye::Left, self.left),
            right: f(Eye::Right, self.right),
        }
    }

    pub fn as_ref(&self) -> PerEye<&T> {
        PerEye {
            left: &self.left,
            right: &self.right,
        }
    }

    /// Iterates `(eye, value)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Eye, &T)> {
        [(Eye::Left, &self.left), (Eye::Right, &self.right)].into_iter()
    }

    pub fn into_array(self) -> [T; Eye::COUNT] {
        [self.left, self.right]
    }
}

impl<T> Index<Eye> for PerEye<T> {
    type Output = T;

    #[inline]
    fn index(&self, eye: Eye) -> &T {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Eye> for PerEye<T> {
    #[inline]
    fn index_mut(&mut self, eye: Eye) -> &mut T {
        match eye {
            Eye::Left => &mut self.left,
            Eye::Right => &mut self.right,
        }
    }
}
