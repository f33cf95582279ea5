/// Something that owns GPU-side state and can give it back.
pub trait Release {
    fn release(&mut self);
}

/// Owns a resource and releases it at most once, on `dispose` or on drop.
#[derive(Debug)]
pub struct GpuResource<T: Release> {
    inner: Option<T>,
}

impl<T: Release> GpuResource<T> {
    pub fn new(inner: T) -> Self {
        Self { inner: Some(inner) }
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.inner.as_mut()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns `true` only for the call that actually released the resource.
    pub fn dispose(&mut self) -> bool {
        match self.inner.take() {
            Some(mut inner) => {
                inner.release();
                true
            }
            None => false,
        }
    }
}

impl<T: Release> Drop for GpuResource<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}
