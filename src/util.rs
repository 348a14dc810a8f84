//! Private utility module
use std::path::Path;

/// Check whether the given file name designates a compressed MGH file.
///
/// The ".mgz" and ".mgh.gz" suffixes are recognized as compressed. A bare ".gz"
/// suffix is not, since it collides with other formats (e.g. ".nii.gz").
pub fn is_compressed_filename<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    let name = match path.as_ref().file_name() {
        Some(name) => name.to_string_lossy().to_ascii_lowercase(),
        None => return false,
    };
    name.ends_with(".mgz") || name.ends_with(".mgh.gz")
}

/// Calculate the number of voxels in a single frame.
/// Saturates instead of overflowing on absurd dimensions.
pub fn voxel_count(dim: &[u32; 3]) -> usize {
    dim.iter()
        .fold(1usize, |acc, d| acc.saturating_mul(*d as usize))
}

/// Calculate the number of bytes of pixel data for the given geometry.
/// Saturates instead of overflowing, so that reading such a volume fails
/// with a premature end of file.
pub fn nb_bytes_for_dims(dim: &[u32; 3], nframes: u32, component_size: usize) -> usize {
    voxel_count(dim)
        .saturating_mul(nframes as usize)
        .saturating_mul(component_size)
}

#[cfg(test)]
mod tests {
    use super::{is_compressed_filename, nb_bytes_for_dims, voxel_count};

    #[test]
    fn filenames() {
        assert!(is_compressed_filename("brain.mgz"));
        assert!(is_compressed_filename("/data/subj/mri/T1.MGZ"));
        assert!(is_compressed_filename("orig.mgh.gz"));
        assert!(!is_compressed_filename("orig.mgh"));
        assert!(!is_compressed_filename("image.nii.gz"));
        assert!(!is_compressed_filename("volume.gz"));
        assert!(!is_compressed_filename("/"));
    }

    #[test]
    fn sizes() {
        assert_eq!(voxel_count(&[4, 5, 6]), 120);
        assert_eq!(nb_bytes_for_dims(&[4, 5, 6], 3, 2), 720);
        assert_eq!(nb_bytes_for_dims(&[4, 0, 6], 3, 2), 0);
        let huge = [u32::MAX; 3];
        assert_eq!(nb_bytes_for_dims(&huge, u32::MAX, 4), usize::MAX);
    }
}
