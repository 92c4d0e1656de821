// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! GPU vertex and index buffers.

use std::sync::Arc;

use crate::renderer::api::{BufferId, BufferKind, BufferUsage};
use crate::renderer::error::ResourceError;
use crate::renderer::traits::GraphicsDriver;

/// A driver-side buffer holding vertex or index data.
#[derive(Debug)]
pub struct GpuBuffer {
    kind: BufferKind,
    usage: BufferUsage,
    size: usize,
    id: BufferId,
    driver: Arc<dyn GraphicsDriver>,
}

impl GpuBuffer {
    /// Creates a buffer and uploads `data` into it.
    ///
    /// Allocation failure is an error; a failed initial upload is logged
    /// and leaves an empty but usable buffer behind.
    pub fn new(
        driver: Arc<dyn GraphicsDriver>,
        kind: BufferKind,
        usage: BufferUsage,
        data: &[u8],
    ) -> Result<Self, ResourceError> {
        let id = driver.create_buffer()?;
        let mut buffer = Self {
            kind,
            usage,
            size: 0,
            id,
            driver,
        };
        buffer.update_data(data);
        Ok(buffer)
    }

    /// Replaces the buffer contents, returning `true` on success.
    ///
    /// Uploading empty data to a `Static` buffer is rejected; static
    /// buffers get their contents exactly once.
    pub fn update_data(&mut self, data: &[u8]) -> bool {
        if data.is_empty() && self.usage == BufferUsage::Static {
            log::warn!("Rejecting empty upload to static {:?} buffer", self.kind);
            return false;
        }
        match self.driver.upload_buffer(self.id, self.kind, self.usage, data) {
            Ok(()) => {
                self.size = data.len();
                true
            }
            Err(err) => {
                log::error!("Buffer upload failed: {err}");
                false
            }
        }
    }

    /// Binds the buffer to its kind's binding point.
    pub fn bind(&self) {
        self.driver.bind_buffer(self.id, self.kind);
    }

    /// What the buffer stores.
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// The buffer's declared update frequency.
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// Byte size of the last successful upload.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The driver-side buffer handle.
    pub fn id(&self) -> BufferId {
        self.id
    }
}

impl Drop for GpuBuffer {
    fn drop(&mut self) {
        self.driver.destroy_buffer(self.id);
    }
}
