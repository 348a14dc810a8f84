//! Pixel layout conversion between disk and memory.
//!
//! MGH files store multi-frame volumes frame by frame: all voxels of the first
//! frame, then all voxels of the second frame, and so on. In memory, the
//! values of each voxel are kept together (`nframes` scalars per voxel).
//! Scalars are big-endian on disk and in host order in memory.

use crate::typedef::ComponentType;

/// Rearrange frame-major disk bytes into voxel-major memory bytes.
///
/// `disk` must hold `voxel_count * nframes * component_size` bytes.
pub fn disk_to_memory(
    disk: &[u8],
    voxel_count: usize,
    nframes: usize,
    component_size: usize,
) -> Vec<u8> {
    debug_assert_eq!(disk.len(), voxel_count * nframes * component_size);
    if nframes <= 1 || voxel_count == 0 {
        return disk.to_vec();
    }
    let frame_size = voxel_count * component_size;
    let pixel_size = component_size * nframes;
    let mut memory = vec![0u8; disk.len()];
    for (f, frame) in disk.chunks_exact(frame_size).enumerate() {
        for (v, value) in frame.chunks_exact(component_size).enumerate() {
            let dst = v * pixel_size + f * component_size;
            memory[dst..dst + component_size].copy_from_slice(value);
        }
    }
    memory
}

/// Rearrange voxel-major memory bytes into frame-major disk bytes.
/// This is the exact inverse of [`disk_to_memory`].
///
/// [`disk_to_memory`]: ./fn.disk_to_memory.html
pub fn memory_to_disk(
    memory: &[u8],
    voxel_count: usize,
    nframes: usize,
    component_size: usize,
) -> Vec<u8> {
    debug_assert_eq!(memory.len(), voxel_count * nframes * component_size);
    if nframes <= 1 || voxel_count == 0 {
        return memory.to_vec();
    }
    let frame_size = voxel_count * component_size;
    let pixel_size = component_size * nframes;
    let mut disk = vec![0u8; memory.len()];
    for (v, pixel) in memory.chunks_exact(pixel_size).enumerate() {
        for (f, value) in pixel.chunks_exact(component_size).enumerate() {
            let dst = f * frame_size + v * component_size;
            disk[dst..dst + component_size].copy_from_slice(value);
        }
    }
    disk
}

/// Swap each element of the buffer between big-endian and host byte order,
/// in place. This is a no-op for single byte types and on big-endian hosts.
pub fn swap_byte_order(buffer: &mut [u8], datatype: ComponentType) {
    let size = datatype.size_of();
    if size == 1 || cfg!(target_endian = "big") {
        return;
    }
    for value in buffer.chunks_exact_mut(size) {
        value.reverse();
    }
}
