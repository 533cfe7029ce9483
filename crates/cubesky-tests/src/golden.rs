//! Content hashes for cube map output.
//!
//! Repeated runs must produce identical bytes, both in memory and once
//! encoded to PNG on disk.

use cubesky_ops::CubeMap;
use sha2::{Digest, Sha256};

/// SHA-256 over the six faces in face order, hex encoded.
pub fn hash_cube_map(cube: &CubeMap) -> String {
    let mut hasher = Sha256::new();
    hasher.update(cube.resolution().to_le_bytes());
    for (_, face) in cube.iter() {
        hasher.update(face.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// SHA-256 of a file's contents, hex encoded.
pub fn hash_file(path: &std::path::Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
