//! Batched 3D Model (b3dm) v1 container emitter, the outer half of
//! spec §4.H. All four batch/feature tables are empty for this
//! generator, so their lengths are zero but still present.

use byteorder::{LittleEndian, WriteBytesExt};

/// Wrap `glb` (an already-built glTF binary body) in the 28-byte b3dm
/// v1 header with all four table lengths zero.
pub fn build_b3dm(glb: &[u8]) -> Vec<u8> {
    let byte_length = 28 + glb.len() as u32;

    let mut out = Vec::with_capacity(byte_length as usize);
    out.extend_from_slice(b"b3dm");
    out.write_u32::<LittleEndian>(1).unwrap();
    out.write_u32::<LittleEndian>(byte_length).unwrap();
    out.write_u32::<LittleEndian>(0).unwrap(); // featureTableJSONByteLength
    out.write_u32::<LittleEndian>(0).unwrap(); // featureTableBinaryByteLength
    out.write_u32::<LittleEndian>(0).unwrap(); // batchTableJSONByteLength
    out.write_u32::<LittleEndian>(0).unwrap(); // batchTableBinaryByteLength
    out.extend_from_slice(glb);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Hemisphere;
    use crate::ellipsoid::Ellipsoid;
    use crate::gltf::{base_gltf_template, build_glb};

    fn sample_b3dm() -> Vec<u8> {
        let ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0);
        let mesh = crate::mesh::build(Hemisphere::West, 0, &ellipsoid, 0.5, 1.0, 1).unwrap();
        let template = base_gltf_template().unwrap();
        let glb = build_glb(&template, &mesh);
        build_b3dm(&glb)
    }

    #[test]
    fn property_8_container_integrity() {
        let b3dm = sample_b3dm();

        assert_eq!(&b3dm[0..4], b"b3dm");
        let version = u32::from_le_bytes(b3dm[4..8].try_into().unwrap());
        assert_eq!(version, 1);
        let byte_length = u32::from_le_bytes(b3dm[8..12].try_into().unwrap());
        assert_eq!(byte_length as usize, b3dm.len());
        for table in 0..4 {
            let offset = 12 + table * 4;
            let length = u32::from_le_bytes(b3dm[offset..offset + 4].try_into().unwrap());
            assert_eq!(length, 0);
        }

        assert_eq!(&b3dm[28..32], b"glTF");
        let content_length = u32::from_le_bytes(b3dm[28 + 12..28 + 16].try_into().unwrap());
        assert_eq!(content_length % 4, 0);
        let glb_length = u32::from_le_bytes(b3dm[28 + 8..28 + 12].try_into().unwrap());
        assert_eq!(glb_length as usize, b3dm.len() - 28);

        let json_start = 28 + 20;
        let json_end = json_start + content_length as usize;
        let json_bytes = &b3dm[json_start..json_end];
        let json_text = std::str::from_utf8(json_bytes).unwrap();
        let trimmed = json_text.trim_end_matches(' ');
        serde_json::from_str::<serde_json::Value>(trimmed).unwrap();
        for &byte in &json_bytes[trimmed.len()..] {
            assert_eq!(byte, b' ');
        }
    }

    #[test]
    fn s6_total_byte_length() {
        let b3dm = sample_b3dm();
        let content_length = u32::from_le_bytes(b3dm[28 + 12..28 + 16].try_into().unwrap());
        assert_eq!(b3dm.len(), 28 + 20 + content_length as usize + 336);
    }
}
