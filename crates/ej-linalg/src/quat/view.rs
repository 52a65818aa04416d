use std::{
    mem,
    ops::{Deref, DerefMut},
};

use crate::Quaternion;

/// Named component access for [`Quaternion`], in storage order.
#[repr(C)]
pub struct WXYZ<T> {
    pub w: T,
    pub x: T,
    pub y: T,
    pub z: T,
    _priv: (),
}

impl<T> Deref for Quaternion<T> {
    type Target = WXYZ<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { mem::transmute(self) }
    }
}

impl<T> DerefMut for Quaternion<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { mem::transmute(self) }
    }
}
