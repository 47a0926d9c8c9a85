//! Growable GPU buffers for the tessellated mesh.
//!
//! The tessellated vertex and index counts change whenever a patch's
//! resolution changes. Buffers grow by at least 2x when the data outgrows
//! them and never shrink (GPU buffers cannot be resized in place).

use std::marker::PhantomData;

/// Smallest buffer ever allocated, in bytes.
const MIN_CAPACITY: usize = 64;
/// Smallest growth step, in bytes.
const MIN_GROWTH: usize = 1024;

/// New byte capacity for `needed` bytes, or `None` if `current` suffices.
fn grown_capacity(current: usize, needed: usize) -> Option<usize> {
    (needed > current).then(|| (needed * 2).max(current + MIN_GROWTH))
}

/// A GPU buffer that can grow dynamically.
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write data to buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let reallocated = match grown_capacity(self.capacity, bytes.len()) {
            Some(capacity) => {
                self.buffer =
                    Self::allocate(device, &self.label, capacity, self.usage);
                self.capacity = capacity;
                true
            }
            None => false,
        };

        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.len = bytes.len();
        reallocated
    }

    /// Underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last [`write`](Self::write).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Typed wrapper for [`DynamicBuffer`] tracking item count.
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with room for `capacity` items.
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: DynamicBuffer::new(
                device,
                label,
                size_of::<T>() * capacity,
                usage,
            ),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Write data to buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.count = data.len();
        self.inner.write(device, queue, data)
    }

    /// Underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Items written by the last write.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
